use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};

use tallydesk_core::CustomerId;
use tallydesk_forms::RawFields;

use crate::app::routes::{respond_delete, respond_outcome};
use crate::app::services::AppServices;
use crate::app::{actions, dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(customers_table).post(create_customer))
        .route("/refs", get(list_customer_refs))
        .route("/:id", post(update_customer))
        .route("/:id/delete", post(delete_customer))
}

pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> axum::response::Response {
    let fields = RawFields::from(fields);
    let outcome =
        actions::customers::create_customer(services.store(), services.revalidator(), &fields)
            .await;
    respond_outcome(outcome)
}

pub async fn update_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid customer id")
        }
    };
    let fields = RawFields::from(fields);
    let outcome =
        actions::customers::update_customer(services.store(), services.revalidator(), id, &fields)
            .await;
    respond_outcome(outcome)
}

pub async fn delete_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid customer id")
        }
    };
    let result =
        actions::customers::delete_customer(services.store(), services.revalidator(), id).await;
    respond_delete(result)
}

/// Customers table with per-customer invoice totals, filtered by `?query=`.
pub async fn customers_table(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ListQuery>,
) -> Result<axum::response::Response, errors::WebError> {
    let items = services.store().customers_table(&params.query).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "items": items })),
    )
        .into_response())
}

/// Id/name pairs for the invoice form's customer dropdown.
pub async fn list_customer_refs(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<axum::response::Response, errors::WebError> {
    let items = services.store().list_customers().await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "items": items })),
    )
        .into_response())
}
