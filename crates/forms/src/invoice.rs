use tallydesk_core::{Cents, CustomerId, InvoiceStatus};

use crate::errors::FieldErrors;
use crate::fields::RawFields;

/// Wire names of the invoice form fields.
pub const FIELD_CUSTOMER_ID: &str = "customerId";
pub const FIELD_AMOUNT: &str = "amount";
pub const FIELD_STATUS: &str = "status";

pub const MSG_CUSTOMER: &str = "Please select a customer.";
pub const MSG_AMOUNT: &str = "Please enter an amount greater than $0.";
pub const MSG_STATUS: &str = "Please select an invoice status.";

/// Validated invoice submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoicePayload {
    pub customer_id: CustomerId,
    pub amount: Cents,
    pub status: InvoiceStatus,
}

/// Validation schema for invoice create/update submissions.
pub struct InvoiceSchema;

impl InvoiceSchema {
    /// Validate raw fields into a typed payload, or collect one message per
    /// invalid field.
    pub fn parse(fields: &RawFields) -> Result<InvoicePayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let customer_id = match fields.get(FIELD_CUSTOMER_ID).parse::<CustomerId>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push(FIELD_CUSTOMER_ID, MSG_CUSTOMER);
                None
            }
        };

        let amount = match Cents::parse_dollars(fields.get(FIELD_AMOUNT)) {
            Ok(cents) => Some(cents),
            Err(_) => {
                errors.push(FIELD_AMOUNT, MSG_AMOUNT);
                None
            }
        };

        let status = match fields.get(FIELD_STATUS).parse::<InvoiceStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.push(FIELD_STATUS, MSG_STATUS);
                None
            }
        };

        match (customer_id, amount, status) {
            (Some(customer_id), Some(amount), Some(status)) => Ok(InvoicePayload {
                customer_id,
                amount,
                status,
            }),
            _ => Err(errors),
        }
    }
}
