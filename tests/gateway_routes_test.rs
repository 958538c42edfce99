use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use poweron_gateway::domain::model::{
    Address, ConnectionAgreement, Customer, CustomerClassification, CustomerPropertyAssociation,
    EmailAddress, EntityKind, MeterNumber, NetworkPropertyLink, PhoneNumber, Property,
    PropertyClassification, Scalar, QUEUED_STATUS,
};
use poweron_gateway::utils::error::{TransactionError, TransactionErrors};
use poweron_gateway::{build_router, AppState, GatewayError, PowerOnBackend, Result};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-memory backend recording every call it receives.
#[derive(Default)]
struct FakeBackend {
    calls: Mutex<Vec<(EntityKind, usize)>>,
    fail_with_status: Option<i32>,
}

impl FakeBackend {
    fn failing(status: i32) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<(EntityKind, usize)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, kind: EntityKind, size: usize) -> Result<()> {
        self.calls.lock().unwrap().push((kind, size));
        match self.fail_with_status {
            Some(status) => Err(GatewayError::RemoteOperation {
                action: format!("Fake/{}", kind),
                status,
                errors: TransactionErrors {
                    errors: vec![TransactionError {
                        code: Some("E1".to_string()),
                        message: Some("rejected by fake".to_string()),
                    }],
                },
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PowerOnBackend for FakeBackend {
    async fn process_addresses(&self, batch: &mut [Address]) -> Result<()> {
        self.record(EntityKind::Address, batch.len())
    }
    async fn process_connection_agreements(
        &self,
        batch: &mut [ConnectionAgreement],
    ) -> Result<()> {
        self.record(EntityKind::ConnectionAgreement, batch.len())
    }
    async fn process_customers(&self, batch: &mut [Customer]) -> Result<()> {
        self.record(EntityKind::Customer, batch.len())
    }
    async fn process_customer_classifications(
        &self,
        batch: &mut [CustomerClassification],
    ) -> Result<()> {
        self.record(EntityKind::CustomerClassification, batch.len())
    }
    async fn process_customer_property_associations(
        &self,
        batch: &mut [CustomerPropertyAssociation],
    ) -> Result<()> {
        self.record(EntityKind::CustomerPropertyAssociation, batch.len())
    }
    async fn process_email_addresses(&self, batch: &mut [EmailAddress]) -> Result<()> {
        self.record(EntityKind::EmailAddress, batch.len())?;
        for record in batch.iter_mut() {
            record.status = Scalar::text(QUEUED_STATUS);
        }
        Ok(())
    }
    async fn process_meter_numbers(&self, batch: &mut [MeterNumber]) -> Result<()> {
        self.record(EntityKind::MeterNumber, batch.len())
    }
    async fn process_network_property_links(
        &self,
        batch: &mut [NetworkPropertyLink],
    ) -> Result<()> {
        self.record(EntityKind::NetworkPropertyLink, batch.len())
    }
    async fn process_phone_numbers(&self, batch: &mut [PhoneNumber]) -> Result<()> {
        self.record(EntityKind::PhoneNumber, batch.len())
    }
    async fn process_properties(&self, batch: &mut [Property]) -> Result<()> {
        self.record(EntityKind::Property, batch.len())
    }
    async fn process_property_classifications(
        &self,
        batch: &mut [PropertyClassification],
    ) -> Result<()> {
        self.record(EntityKind::PropertyClassification, batch.len())
    }
}

fn app_with(backend: Arc<FakeBackend>) -> Router {
    build_router(AppState::new(backend), 1024 * 1024)
}

async fn post_json(app: Router, path: &str, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_empty_batch_skips_backend_on_every_route() {
    let backend = Arc::new(FakeBackend::default());

    for kind in EntityKind::ALL {
        let (status, body) = post_json(app_with(backend.clone()), kind.path(), "[]".to_string()).await;
        assert_eq!(status, StatusCode::OK, "route {}", kind.path());
        assert_eq!(body, json!([]), "route {}", kind.path());
    }

    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_every_route_forwards_to_its_operation() {
    let backend = Arc::new(FakeBackend::default());

    for kind in EntityKind::ALL {
        let input = json!([{ "_id": "a" }, { "_id": "b" }]);
        let (status, body) =
            post_json(app_with(backend.clone()), kind.path(), input.to_string()).await;
        assert_eq!(status, StatusCode::OK, "route {}", kind.path());
        if kind != EntityKind::EmailAddress {
            assert_eq!(body, input, "route {}", kind.path());
        }
    }

    let expected: Vec<(EntityKind, usize)> = EntityKind::ALL.iter().map(|k| (*k, 2)).collect();
    assert_eq!(backend.calls(), expected);
}

#[tokio::test]
async fn test_email_batch_is_echoed_with_status() {
    let backend = Arc::new(FakeBackend::default());
    let input = json!([
        {"_id": "1", "customerNumber": "123", "emailAddress": "a@b.com"},
        {"_id": "2", "customerNumber": "456", "emailAddress": "c@d.com"}
    ]);

    let (status, body) = post_json(app_with(backend.clone()), "/cd_email_addr", input.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"_id": "1", "customerNumber": "123", "emailAddress": "a@b.com", "status": QUEUED_STATUS},
            {"_id": "2", "customerNumber": "456", "emailAddress": "c@d.com", "status": QUEUED_STATUS}
        ])
    );
    assert_eq!(backend.calls(), vec![(EntityKind::EmailAddress, 2)]);
}

#[tokio::test]
async fn test_numeric_customer_number_is_accepted() {
    let backend = Arc::new(FakeBackend::default());
    let input = json!([
        {"customerNumber": 123, "foreName": "Kari", "surName": "Nordmann"},
        {"customerNumber": 4.5, "active": true}
    ]);

    let (status, body) = post_json(app_with(backend.clone()), "/cd_customer", input.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, input);
    assert_eq!(backend.calls(), vec![(EntityKind::Customer, 2)]);
}

#[tokio::test]
async fn test_null_fields_are_echoed_as_null() {
    let backend = Arc::new(FakeBackend::default());
    let input = json!([{"_id": "1", "customerNumber": "123", "emailAddress": null}]);

    let (status, body) = post_json(app_with(backend.clone()), "/cd_email_addr", input.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"_id": "1", "customerNumber": "123", "emailAddress": null, "status": QUEUED_STATUS}])
    );
}

#[tokio::test]
async fn test_nested_value_in_known_field_is_rejected() {
    let backend = Arc::new(FakeBackend::default());
    let input = json!([{"customerNumber": {"id": 1}}]);

    let (status, _) = post_json(app_with(backend.clone()), "/cd_customer", input.to_string()).await;

    assert!(status.is_client_error());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_backend_failure_becomes_server_error() {
    let backend = Arc::new(FakeBackend::failing(7));
    let input = json!([{"customerNumber": "1", "foreName": "Ola", "surName": "Nordmann"}]);

    let (status, body) = post_json(app_with(backend.clone()), "/cd_customer", input.to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "remote_operation_failed");
    assert_eq!(body["transaction_errors"]["errors"][0]["code"], "E1");
    assert!(body["message"].as_str().unwrap().contains("status 7"));
    assert_eq!(backend.calls(), vec![(EntityKind::Customer, 1)]);
}

#[tokio::test]
async fn test_malformed_json_is_rejected_before_backend() {
    let backend = Arc::new(FakeBackend::default());

    let (status, _) = post_json(app_with(backend.clone()), "/cd_customer", "{not json".to_string()).await;
    assert!(status.is_client_error());

    let (status, _) = post_json(app_with(backend.clone()), "/cd_customer", "{}".to_string()).await;
    assert!(status.is_client_error());

    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let backend = Arc::new(FakeBackend::default());
    let app = build_router(AppState::new(backend.clone()), 64);
    let input = json!([{"customerNumber": "1", "emailAddress": "x".repeat(200)}]);

    let (status, _) = post_json(app, "/cd_email_addr", input.to_string()).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_health_check() {
    let app = app_with(Arc::new(FakeBackend::default()));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "poweron-gateway");
}
