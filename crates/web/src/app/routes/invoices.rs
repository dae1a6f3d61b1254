use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};

use tallydesk_core::InvoiceId;
use tallydesk_forms::RawFields;

use crate::app::routes::{respond_delete, respond_outcome};
use crate::app::services::AppServices;
use crate::app::{actions, dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_invoices).post(create_invoice))
        .route("/:id", get(get_invoice).post(update_invoice))
        .route("/:id/delete", post(delete_invoice))
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> axum::response::Response {
    let fields = RawFields::from(fields);
    let outcome =
        actions::invoices::create_invoice(services.store(), services.revalidator(), &fields).await;
    respond_outcome(outcome)
}

pub async fn update_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> axum::response::Response {
    let id: InvoiceId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid invoice id")
        }
    };
    let fields = RawFields::from(fields);
    let outcome =
        actions::invoices::update_invoice(services.store(), services.revalidator(), id, &fields)
            .await;
    respond_outcome(outcome)
}

pub async fn delete_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InvoiceId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid invoice id")
        }
    };
    let result =
        actions::invoices::delete_invoice(services.store(), services.revalidator(), id).await;
    respond_delete(result)
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<axum::response::Response, errors::WebError> {
    let id: InvoiceId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return Ok(errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_id",
                "invalid invoice id",
            ))
        }
    };
    let invoice = services.store().get_invoice(id).await?;
    Ok(Json(dto::invoice_form_json(&invoice)).into_response())
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ListQuery>,
) -> Result<axum::response::Response, errors::WebError> {
    let items = services
        .store()
        .list_invoices(&params.query, params.page())
        .await?;
    let total_pages = services.store().invoice_pages(&params.query).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "items": items, "total_pages": total_pages })),
    )
        .into_response())
}
