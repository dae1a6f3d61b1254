use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::errors::WebError;
use crate::app::services::AppServices;

const LATEST_INVOICES: u32 = 5;

/// Dashboard overview: card aggregates plus the most recent invoices.
pub async fn overview(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<axum::response::Response, WebError> {
    let cards = services.store().card_data().await?;
    let latest = services.store().latest_invoices(LATEST_INVOICES).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "cards": cards,
            "latest_invoices": latest,
        })),
    )
        .into_response())
}
