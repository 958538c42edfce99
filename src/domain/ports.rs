use crate::domain::model::{
    Address, ConnectionAgreement, Customer, CustomerClassification, CustomerPropertyAssociation,
    EmailAddress, MeterNumber, NetworkPropertyLink, PhoneNumber, Property, PropertyClassification,
    Record,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The PowerOn customer-inbound operations, one per entity kind.
///
/// Each call submits the whole batch in a single remote request. Records may
/// be annotated in place (for example with a queuing status) on success.
#[async_trait]
pub trait PowerOnBackend: Send + Sync {
    async fn process_addresses(&self, batch: &mut [Address]) -> Result<()>;
    async fn process_connection_agreements(&self, batch: &mut [ConnectionAgreement])
        -> Result<()>;
    async fn process_customers(&self, batch: &mut [Customer]) -> Result<()>;
    async fn process_customer_classifications(
        &self,
        batch: &mut [CustomerClassification],
    ) -> Result<()>;
    async fn process_customer_property_associations(
        &self,
        batch: &mut [CustomerPropertyAssociation],
    ) -> Result<()>;
    async fn process_email_addresses(&self, batch: &mut [EmailAddress]) -> Result<()>;
    async fn process_meter_numbers(&self, batch: &mut [MeterNumber]) -> Result<()>;
    async fn process_network_property_links(&self, batch: &mut [NetworkPropertyLink])
        -> Result<()>;
    async fn process_phone_numbers(&self, batch: &mut [PhoneNumber]) -> Result<()>;
    async fn process_properties(&self, batch: &mut [Property]) -> Result<()>;
    async fn process_property_classifications(
        &self,
        batch: &mut [PropertyClassification],
    ) -> Result<()>;
}

/// Binds a record type to its backend operation.
#[async_trait]
pub trait Submit: Record + Sized {
    async fn submit(backend: &dyn PowerOnBackend, batch: &mut [Self]) -> Result<()>;
}

macro_rules! submit_via {
    ($($record:ty => $method:ident),+ $(,)?) => {
        $(
            #[async_trait]
            impl Submit for $record {
                async fn submit(backend: &dyn PowerOnBackend, batch: &mut [Self]) -> Result<()> {
                    backend.$method(batch).await
                }
            }
        )+
    };
}

submit_via! {
    Address => process_addresses,
    ConnectionAgreement => process_connection_agreements,
    Customer => process_customers,
    CustomerClassification => process_customer_classifications,
    CustomerPropertyAssociation => process_customer_property_associations,
    EmailAddress => process_email_addresses,
    MeterNumber => process_meter_numbers,
    NetworkPropertyLink => process_network_property_links,
    PhoneNumber => process_phone_numbers,
    Property => process_properties,
    PropertyClassification => process_property_classifications,
}
