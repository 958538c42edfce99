use crate::app::state::AppState;
use crate::domain::model::{
    Address, ConnectionAgreement, Customer, CustomerClassification, CustomerPropertyAssociation,
    EmailAddress, MeterNumber, NetworkPropertyLink, PhoneNumber, Property, PropertyClassification,
    Record,
};
use crate::domain::ports::Submit;
use crate::utils::error::Result;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Builds the gateway router: one POST route per entity kind plus `/health`.
pub fn build_router(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(Address::KIND.path(), post(forward::<Address>))
        .route(ConnectionAgreement::KIND.path(), post(forward::<ConnectionAgreement>))
        .route(Customer::KIND.path(), post(forward::<Customer>))
        .route(CustomerClassification::KIND.path(), post(forward::<CustomerClassification>))
        .route(
            CustomerPropertyAssociation::KIND.path(),
            post(forward::<CustomerPropertyAssociation>),
        )
        .route(EmailAddress::KIND.path(), post(forward::<EmailAddress>))
        .route(MeterNumber::KIND.path(), post(forward::<MeterNumber>))
        .route(NetworkPropertyLink::KIND.path(), post(forward::<NetworkPropertyLink>))
        .route(PhoneNumber::KIND.path(), post(forward::<PhoneNumber>))
        .route(Property::KIND.path(), post(forward::<Property>))
        .route(PropertyClassification::KIND.path(), post(forward::<PropertyClassification>))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(body_limit_bytes)),
        )
}

/// Forwards a whole batch to the backend and echoes it back.
///
/// Empty batches are returned as-is without touching the backend.
async fn forward<R: Submit>(
    State(state): State<AppState>,
    Json(mut batch): Json<Vec<R>>,
) -> Result<Json<Vec<R>>> {
    let endpoint = R::KIND.endpoint_name();
    tracing::info!("request to {} endpoint with batch size {}", endpoint, batch.len());

    if batch.is_empty() {
        tracing::info!("Empty set, no processing needed, return.");
        return Ok(Json(batch));
    }

    R::submit(state.backend.as_ref(), &mut batch)
        .await
        .inspect_err(|e| tracing::error!("{} failed: {}", endpoint, e))?;

    Ok(Json(batch))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "timestamp": Utc::now().to_rfc3339()
    }))
}
