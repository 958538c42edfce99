use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Status attached to records PowerOn accepted for queuing.
pub const QUEUED_STATUS: &str = "Successfully added to queue.";

/// The record types routed by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Address,
    ConnectionAgreement,
    Customer,
    CustomerClassification,
    CustomerPropertyAssociation,
    EmailAddress,
    MeterNumber,
    NetworkPropertyLink,
    PhoneNumber,
    Property,
    PropertyClassification,
}

impl EntityKind {
    pub const ALL: [EntityKind; 11] = [
        EntityKind::Address,
        EntityKind::ConnectionAgreement,
        EntityKind::Customer,
        EntityKind::CustomerClassification,
        EntityKind::CustomerPropertyAssociation,
        EntityKind::EmailAddress,
        EntityKind::MeterNumber,
        EntityKind::NetworkPropertyLink,
        EntityKind::PhoneNumber,
        EntityKind::Property,
        EntityKind::PropertyClassification,
    ];

    /// Route the kind is served on.
    pub fn path(self) -> &'static str {
        match self {
            EntityKind::Address => "/cd_addresses",
            EntityKind::ConnectionAgreement => "/cd_connection_agreement",
            EntityKind::Customer => "/cd_customer",
            EntityKind::CustomerClassification => "/cd_customer_classifications",
            EntityKind::CustomerPropertyAssociation => "/cd_cust_property_assoc",
            EntityKind::EmailAddress => "/cd_email_addr",
            EntityKind::MeterNumber => "/cd_meter_no",
            EntityKind::NetworkPropertyLink => "/network_property_link_new",
            EntityKind::PhoneNumber => "/cd_telephone_no",
            EntityKind::Property => "/cd_properties",
            EntityKind::PropertyClassification => "/cd_property_classifications",
        }
    }

    pub fn endpoint_name(self) -> &'static str {
        self.path().trim_start_matches('/')
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A known record field, kept exactly as received.
///
/// Strings, numbers, booleans and `null` are accepted; an absent field stays
/// absent on the way back out, and an explicit `null` stays `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scalar(Option<Value>);

impl Scalar {
    pub fn text(value: impl Into<String>) -> Self {
        Scalar(Some(Value::String(value.into())))
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// String form sent on the wire; `None` for absent and `null` fields.
    pub fn as_text(&self) -> Option<String> {
        match &self.0 {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            value @ (Value::Array(_) | Value::Object(_)) => Err(de::Error::custom(format!(
                "expected a string, number, boolean or null, found {}",
                value
            ))),
            value => Ok(Scalar(Some(value))),
        }
    }
}

/// A record type accepted on one of the gateway routes.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;
}

// Every record keeps the fields it does not model in `extra`, so the echoed
// batch is the caller's entity including its bookkeeping properties.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub customer_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub property_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub address_type: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub street_name: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub house_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub house_letter: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub post_code: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub post_area: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub country: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionAgreement {
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub customer_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub property_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub agreement_start_date: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub notice_to_deenergise: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub customer_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub fore_name: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub sur_name: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerClassification {
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub customer_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub classification_type: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub classification_code: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPropertyAssociation {
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub customer_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub property_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub association_type: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub start_date: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub end_date: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAddress {
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub customer_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub email_address: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub status: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterNumber {
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub property_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub meter_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub meter_point_id: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPropertyLink {
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub property_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub network_object_id: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub network_object_type: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub customer_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub phone_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub phone_type: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub property_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub property_type: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub municipality_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub cadastral_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub description: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyClassification {
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub property_number: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub classification_type: Scalar,
    #[serde(default, skip_serializing_if = "Scalar::is_absent")]
    pub classification_code: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for Address {
    const KIND: EntityKind = EntityKind::Address;
}
impl Record for ConnectionAgreement {
    const KIND: EntityKind = EntityKind::ConnectionAgreement;
}
impl Record for Customer {
    const KIND: EntityKind = EntityKind::Customer;
}
impl Record for CustomerClassification {
    const KIND: EntityKind = EntityKind::CustomerClassification;
}
impl Record for CustomerPropertyAssociation {
    const KIND: EntityKind = EntityKind::CustomerPropertyAssociation;
}
impl Record for EmailAddress {
    const KIND: EntityKind = EntityKind::EmailAddress;
}
impl Record for MeterNumber {
    const KIND: EntityKind = EntityKind::MeterNumber;
}
impl Record for NetworkPropertyLink {
    const KIND: EntityKind = EntityKind::NetworkPropertyLink;
}
impl Record for PhoneNumber {
    const KIND: EntityKind = EntityKind::PhoneNumber;
}
impl Record for Property {
    const KIND: EntityKind = EntityKind::Property;
}
impl Record for PropertyClassification {
    const KIND: EntityKind = EntityKind::PropertyClassification;
}
