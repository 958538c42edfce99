use crate::adapters::soap::wire::Operation;
use crate::utils::error::{GatewayError, Result, TransactionError, TransactionErrors};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Decoded body of an operation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResponse {
    pub status: i32,
    pub transaction_errors: TransactionErrors,
}

impl OperationResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoapFault {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoapReply {
    Response(OperationResponse),
    Fault(SoapFault),
}

/// Parses a PowerOn reply envelope for `op`.
///
/// Element names are matched on their local part so any namespace prefixing
/// the service chooses is accepted. Both SOAP 1.1 and 1.2 faults are read.
pub fn parse_reply(xml: &str, op: &Operation) -> Result<SoapReply> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut saw_response = false;
    let mut fault: Option<SoapFault> = None;
    let mut status_text: Option<String> = None;
    let mut errors = TransactionErrors::default();
    // depth of the open TransactionErrors element, if any
    let mut errors_depth: Option<usize> = None;

    loop {
        let event = reader.read_event().map_err(|e| GatewayError::MalformedResponse {
            action: op.action.to_string(),
            message: format!("XML error at position {}: {}", reader.buffer_position(), e),
        })?;

        // a self-closing element opens and closes in one event
        let self_closing = matches!(event, Event::Empty(_));

        match event {
            Event::Start(e) | Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if name == op.response {
                    saw_response = true;
                }
                if name == "Fault" {
                    fault.get_or_insert_with(SoapFault::default);
                }
                if let Some(depth) = errors_depth {
                    if stack.len() == depth + 1 {
                        errors.errors.push(TransactionError::default());
                    }
                }
                stack.push(name);
                if stack.last().map(String::as_str) == Some("TransactionErrors") && in_response(&stack, op) {
                    errors_depth = Some(stack.len() - 1);
                }
                if self_closing {
                    close_element(&mut stack, &mut errors_depth);
                }
            }
            Event::End(_) => close_element(&mut stack, &mut errors_depth),
            Event::Text(e) => {
                let text = e.unescape().map_err(|err| GatewayError::MalformedResponse {
                    action: op.action.to_string(),
                    message: err.to_string(),
                })?;
                on_text(&text, &stack, op, &mut fault, &mut status_text, &mut errors, errors_depth);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                on_text(&text, &stack, op, &mut fault, &mut status_text, &mut errors, errors_depth);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(fault) = fault {
        return Ok(SoapReply::Fault(fault));
    }

    if !saw_response {
        return Err(GatewayError::MalformedResponse {
            action: op.action.to_string(),
            message: format!("missing {} element", op.response),
        });
    }

    let status_text = status_text.ok_or_else(|| GatewayError::MalformedResponse {
        action: op.action.to_string(),
        message: format!("missing Status in {}", op.response_stc),
    })?;
    let status = status_text
        .trim()
        .parse::<i32>()
        .map_err(|e| GatewayError::MalformedResponse {
            action: op.action.to_string(),
            message: format!("invalid Status '{}': {}", status_text, e),
        })?;

    Ok(SoapReply::Response(OperationResponse {
        status,
        transaction_errors: errors,
    }))
}

fn close_element(stack: &mut Vec<String>, errors_depth: &mut Option<usize>) {
    stack.pop();
    if errors_depth.is_some_and(|depth| stack.len() <= depth) {
        *errors_depth = None;
    }
}

fn in_response(stack: &[String], op: &Operation) -> bool {
    stack.iter().any(|name| name == op.response)
}

fn on_text(
    text: &str,
    stack: &[String],
    op: &Operation,
    fault: &mut Option<SoapFault>,
    status_text: &mut Option<String>,
    errors: &mut TransactionErrors,
    errors_depth: Option<usize>,
) {
    let Some(current) = stack.last().map(String::as_str) else {
        return;
    };
    let parent = stack
        .len()
        .checked_sub(2)
        .and_then(|i| stack.get(i))
        .map(String::as_str);

    if let Some(fault) = fault.as_mut() {
        match (parent, current) {
            (_, "faultcode") | (Some("Code"), "Value") => fault.code = text.to_string(),
            (_, "faultstring") | (Some("Reason"), "Text") => fault.message = text.to_string(),
            _ => {}
        }
        return;
    }

    if let Some(depth) = errors_depth {
        if stack.len() == depth + 1 {
            // plain text directly inside TransactionErrors
            errors.errors.push(TransactionError {
                code: None,
                message: Some(text.to_string()),
            });
            return;
        }
        let Some(error) = errors.errors.last_mut() else {
            return;
        };
        if current.ends_with("Code") {
            error.code = Some(text.to_string());
        } else if error.message.is_none() {
            error.message = Some(text.to_string());
        } else if let Some(message) = error.message.as_mut() {
            message.push_str(", ");
            message.push_str(text);
        }
        return;
    }

    if current == "Status" && parent == Some(op.response_stc) {
        *status_text = Some(text.to_string());
    }
}
