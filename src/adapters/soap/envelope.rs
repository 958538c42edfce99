use crate::adapters::soap::wire::{Operation, OperationType, WireItem};
use crate::utils::error::{GatewayError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Builds the SOAP 1.1 request envelope for `op` carrying every item.
pub fn build_request<I: WireItem>(
    op: &Operation,
    namespace: &str,
    operation_type: OperationType,
    items: &[I],
) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut envelope = BytesStart::new("soapenv:Envelope");
    envelope.push_attribute(("xmlns:soapenv", SOAP_ENV_NS));
    write(&mut writer, Event::Start(envelope))?;
    write(&mut writer, Event::Empty(BytesStart::new("soapenv:Header")))?;
    write(&mut writer, Event::Start(BytesStart::new("soapenv:Body")))?;

    let mut request = BytesStart::new(op.request);
    request.push_attribute(("xmlns", namespace));
    write(&mut writer, Event::Start(request))?;
    write(&mut writer, Event::Start(BytesStart::new(op.request_stc)))?;
    write_text_element(&mut writer, "OperationType", operation_type.as_wire())?;

    write(&mut writer, Event::Start(BytesStart::new(op.list)))?;
    for item in items {
        write(&mut writer, Event::Start(BytesStart::new(I::TAG)))?;
        for (tag, value) in item.fields() {
            if let Some(value) = value {
                write_text_element(&mut writer, tag, value)?;
            }
        }
        write(&mut writer, Event::End(BytesEnd::new(I::TAG)))?;
    }
    write(&mut writer, Event::End(BytesEnd::new(op.list)))?;

    write(&mut writer, Event::End(BytesEnd::new(op.request_stc)))?;
    write(&mut writer, Event::End(BytesEnd::new(op.request)))?;
    write(&mut writer, Event::End(BytesEnd::new("soapenv:Body")))?;
    write(&mut writer, Event::End(BytesEnd::new("soapenv:Envelope")))?;

    String::from_utf8(writer.into_inner()).map_err(GatewayError::xml)
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(GatewayError::xml)
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, tag: &str, value: &str) -> Result<()> {
    write(writer, Event::Start(BytesStart::new(tag)))?;
    write(writer, Event::Text(BytesText::new(value)))?;
    write(writer, Event::End(BytesEnd::new(tag)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::soap::wire::{customer_item, EmailAddressItem, CUSTOMERS, EMAIL_ADDRESSES};
    use crate::domain::model::{Customer, Scalar};

    #[test]
    fn test_email_envelope_layout() {
        let items = vec![
            EmailAddressItem {
                customer_number: Some("123".to_string()),
                email_address: Some("a@b.com".to_string()),
            },
            EmailAddressItem {
                customer_number: Some("456".to_string()),
                email_address: None,
            },
        ];
        let xml = build_request(
            &EMAIL_ADDRESSES,
            "urn:test",
            OperationType::Insert,
            &items,
        )
        .unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(
            "<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\">"
        ));
        assert!(xml.contains(
            "<EmailAddresses xmlns=\"urn:test\"><EmailAddressesStc><OperationType>I</OperationType><EmailAddressList>"
        ));
        assert!(xml.contains(
            "<EmailAddressStc><CustomerNumber>123</CustomerNumber><EmailAddress>a@b.com</EmailAddress></EmailAddressStc>"
        ));
        assert!(xml.contains("<EmailAddressStc><CustomerNumber>456</CustomerNumber></EmailAddressStc>"));
        assert_eq!(xml.matches("<EmailAddressStc>").count(), 2);
    }

    #[test]
    fn test_text_is_escaped() {
        let items = vec![EmailAddressItem {
            customer_number: Some("1 & 2".to_string()),
            email_address: Some("<x>@b.com".to_string()),
        }];
        let xml = build_request(&EMAIL_ADDRESSES, "urn:test", OperationType::Insert, &items).unwrap();
        assert!(xml.contains("<CustomerNumber>1 &amp; 2</CustomerNumber>"));
        assert!(xml.contains("<EmailAddress>&lt;x&gt;@b.com</EmailAddress>"));
    }

    #[test]
    fn test_every_customer_becomes_one_item() {
        let records = vec![
            Customer {
                customer_number: Scalar::text("1"),
                fore_name: Scalar::text("Kari"),
                ..Default::default()
            },
            Customer {
                customer_number: Scalar::text("2"),
                ..Default::default()
            },
            Customer::default(),
        ];
        let items: Vec<_> = records.iter().map(customer_item).collect();
        let xml = build_request(&CUSTOMERS, "urn:test", OperationType::Insert, &items).unwrap();

        assert_eq!(xml.matches("<CustomerStc>").count(), 3);
        assert!(xml.contains("<CustomerList><CustomerStc><CustomerNumber>1</CustomerNumber><ForeNames>Kari</ForeNames></CustomerStc>"));
        assert!(xml.contains("<CustomerStc><CustomerNumber>2</CustomerNumber></CustomerStc>"));
    }
}
