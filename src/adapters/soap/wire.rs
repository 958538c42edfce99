//! PowerOn wire items and the record → item mappings.
//!
//! Every operation wraps its items as
//! `<Request><RequestStc><OperationType/><List><ItemTag>..</ItemTag>..</List></RequestStc></Request>`
//! and answers with `<Response><ResponseStc><Status/><TransactionErrors/></ResponseStc></Response>`.

use crate::domain::model::{ConnectionAgreement, Customer, EmailAddress, EntityKind};
use crate::utils::dates::to_xml_date;

/// Element names and SOAPAction of one PowerOn operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub kind: EntityKind,
    pub action: &'static str,
    pub request: &'static str,
    pub request_stc: &'static str,
    pub list: &'static str,
    pub response: &'static str,
    pub response_stc: &'static str,
}

pub const EMAIL_ADDRESSES: Operation = Operation {
    kind: EntityKind::EmailAddress,
    action: "Customer/EmailAddresses",
    request: "EmailAddresses",
    request_stc: "EmailAddressesStc",
    list: "EmailAddressList",
    response: "EmailAddressesResponse",
    response_stc: "EmailAddressesResponseStc",
};

pub const CUSTOMERS: Operation = Operation {
    kind: EntityKind::Customer,
    action: "Customer/Customers",
    request: "Customers",
    request_stc: "CustomersStc",
    list: "CustomerList",
    response: "CustomersResponse",
    response_stc: "CustomersResponseStc",
};

pub const CONNECTION_AGREEMENTS: Operation = Operation {
    kind: EntityKind::ConnectionAgreement,
    action: "Customer/ConnectionAgreements",
    request: "ConnectionAgreements",
    request_stc: "ConnectionAgreementsStc",
    list: "ConnectionAgreementList",
    response: "ConnectionAgreementsResponse",
    response_stc: "ConnectionAgreementsResponseStc",
};

/// Operation code sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationType {
    #[default]
    Insert,
}

impl OperationType {
    pub fn as_wire(self) -> &'static str {
        match self {
            OperationType::Insert => "I",
        }
    }
}

/// One list entry of an operation request.
pub trait WireItem {
    const TAG: &'static str;

    /// Child elements in schema order; `None` values are left out.
    fn fields(&self) -> Vec<(&'static str, Option<&str>)>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailAddressItem {
    pub customer_number: Option<String>,
    pub email_address: Option<String>,
}

impl WireItem for EmailAddressItem {
    const TAG: &'static str = "EmailAddressStc";

    fn fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("CustomerNumber", self.customer_number.as_deref()),
            ("EmailAddress", self.email_address.as_deref()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerItem {
    pub customer_number: Option<String>,
    pub fore_names: Option<String>,
    pub name: Option<String>,
}

impl WireItem for CustomerItem {
    const TAG: &'static str = "CustomerStc";

    fn fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("CustomerNumber", self.customer_number.as_deref()),
            ("ForeNames", self.fore_names.as_deref()),
            ("Name", self.name.as_deref()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionAgreementItem {
    pub agreement_start_date: Option<String>,
    pub customer_number: Option<String>,
    pub notice_to_deenergise: Option<String>,
    pub property_number: Option<String>,
}

impl WireItem for ConnectionAgreementItem {
    const TAG: &'static str = "ConnectionAgreementStc";

    fn fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("AgreementStartDate", self.agreement_start_date.as_deref()),
            ("CustomerNumber", self.customer_number.as_deref()),
            ("NoticeToDeenergise", self.notice_to_deenergise.as_deref()),
            ("PropertyNumber", self.property_number.as_deref()),
        ]
    }
}

pub fn email_address_item(record: &EmailAddress) -> EmailAddressItem {
    EmailAddressItem {
        customer_number: record.customer_number.as_text(),
        email_address: record.email_address.as_text(),
    }
}

pub fn customer_item(record: &Customer) -> CustomerItem {
    CustomerItem {
        customer_number: record.customer_number.as_text(),
        fore_names: record.fore_name.as_text(),
        name: record.sur_name.as_text(),
    }
}

/// An unparseable start date is logged and left out; the record is still sent.
pub fn connection_agreement_item(record: &ConnectionAgreement) -> ConnectionAgreementItem {
    let raw_date = record.agreement_start_date.as_text();
    let agreement_start_date = match raw_date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match to_xml_date(raw) {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::error!(
                    customer_number = ?record.customer_number,
                    property_number = ?record.property_number,
                    "{}, skipping AgreementStartDate",
                    e
                );
                None
            }
        },
    };

    ConnectionAgreementItem {
        agreement_start_date,
        customer_number: record.customer_number.as_text(),
        notice_to_deenergise: record.notice_to_deenergise.as_text(),
        property_number: record.property_number.as_text(),
    }
}
