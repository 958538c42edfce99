use crate::adapters::soap::envelope::build_request;
use crate::adapters::soap::response::{parse_reply, OperationResponse, SoapReply};
use crate::adapters::soap::wire::{
    connection_agreement_item, customer_item, email_address_item, Operation, OperationType,
    WireItem, CONNECTION_AGREEMENTS, CUSTOMERS, EMAIL_ADDRESSES,
};
use crate::config::PowerOnConfig;
use crate::domain::model::{
    Address, ConnectionAgreement, Customer, CustomerClassification, CustomerPropertyAssociation,
    EmailAddress, EntityKind, MeterNumber, NetworkPropertyLink, PhoneNumber, Property,
    PropertyClassification, Scalar, QUEUED_STATUS,
};
use crate::domain::ports::PowerOnBackend;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// SOAP client for the PowerOn customer-inbound service.
#[derive(Debug, Clone)]
pub struct PowerOnSoapClient {
    client: Client,
    url: String,
    namespace: String,
    operation_type: OperationType,
}

impl PowerOnSoapClient {
    pub fn new(config: &PowerOnConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            url: config.url.clone(),
            namespace: config.namespace.clone(),
            operation_type: OperationType::Insert,
        })
    }

    /// Sends one operation carrying all `items` and checks the PowerOn status.
    async fn call<I: WireItem>(&self, op: &Operation, items: &[I]) -> Result<OperationResponse> {
        let body = build_request(op, &self.namespace, self.operation_type, items)?;

        tracing::debug!(
            "Sending {} with {} items to {} ({} bytes)",
            op.action,
            items.len(),
            self.url,
            body.len()
        );

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header("SOAPAction", format!("\"{}\"", op.action))
            .body(body)
            .send()
            .await?;

        let http_status = response.status();
        let text = response.text().await?;
        tracing::debug!("PowerOn HTTP status for {}: {}", op.action, http_status);

        // faults arrive with HTTP 500, so the body is inspected before the status
        let reply = match parse_reply(&text, op) {
            Ok(reply) => reply,
            Err(_) if !http_status.is_success() => {
                return Err(GatewayError::HttpStatus {
                    action: op.action.to_string(),
                    status: http_status.as_u16(),
                });
            }
            Err(e) => return Err(e),
        };

        let res = match reply {
            SoapReply::Fault(fault) => {
                tracing::error!("SOAP fault from {}: [{}] {}", op.action, fault.code, fault.message);
                return Err(GatewayError::SoapFault {
                    action: op.action.to_string(),
                    code: fault.code,
                    message: fault.message,
                });
            }
            SoapReply::Response(_) if !http_status.is_success() => {
                return Err(GatewayError::HttpStatus {
                    action: op.action.to_string(),
                    status: http_status.as_u16(),
                });
            }
            SoapReply::Response(res) => res,
        };

        tracing::info!(
            "status: {}, message: {}",
            res.status,
            res.transaction_errors
        );

        if !res.is_ok() {
            return Err(GatewayError::RemoteOperation {
                action: op.action.to_string(),
                status: res.status,
                errors: res.transaction_errors,
            });
        }

        Ok(res)
    }

    fn unsupported(kind: EntityKind, batch_size: usize) -> Result<()> {
        tracing::warn!(
            "No PowerOn mapping for {}, rejecting batch of {}",
            kind,
            batch_size
        );
        Err(GatewayError::Unsupported { kind })
    }
}

#[async_trait]
impl PowerOnBackend for PowerOnSoapClient {
    async fn process_addresses(&self, batch: &mut [Address]) -> Result<()> {
        Self::unsupported(EntityKind::Address, batch.len())
    }

    async fn process_connection_agreements(
        &self,
        batch: &mut [ConnectionAgreement],
    ) -> Result<()> {
        let items: Vec<_> = batch.iter().map(connection_agreement_item).collect();
        self.call(&CONNECTION_AGREEMENTS, &items).await?;
        Ok(())
    }

    async fn process_customers(&self, batch: &mut [Customer]) -> Result<()> {
        let items: Vec<_> = batch.iter().map(customer_item).collect();
        self.call(&CUSTOMERS, &items).await?;
        Ok(())
    }

    async fn process_customer_classifications(
        &self,
        batch: &mut [CustomerClassification],
    ) -> Result<()> {
        Self::unsupported(EntityKind::CustomerClassification, batch.len())
    }

    async fn process_customer_property_associations(
        &self,
        batch: &mut [CustomerPropertyAssociation],
    ) -> Result<()> {
        Self::unsupported(EntityKind::CustomerPropertyAssociation, batch.len())
    }

    async fn process_email_addresses(&self, batch: &mut [EmailAddress]) -> Result<()> {
        let items: Vec<_> = batch.iter().map(email_address_item).collect();
        self.call(&EMAIL_ADDRESSES, &items).await?;

        for record in batch.iter_mut() {
            record.status = Scalar::text(QUEUED_STATUS);
        }
        Ok(())
    }

    async fn process_meter_numbers(&self, batch: &mut [MeterNumber]) -> Result<()> {
        Self::unsupported(EntityKind::MeterNumber, batch.len())
    }

    async fn process_network_property_links(
        &self,
        batch: &mut [NetworkPropertyLink],
    ) -> Result<()> {
        Self::unsupported(EntityKind::NetworkPropertyLink, batch.len())
    }

    async fn process_phone_numbers(&self, batch: &mut [PhoneNumber]) -> Result<()> {
        Self::unsupported(EntityKind::PhoneNumber, batch.len())
    }

    async fn process_properties(&self, batch: &mut [Property]) -> Result<()> {
        Self::unsupported(EntityKind::Property, batch.len())
    }

    async fn process_property_classifications(
        &self,
        batch: &mut [PropertyClassification],
    ) -> Result<()> {
        Self::unsupported(EntityKind::PropertyClassification, batch.len())
    }
}
