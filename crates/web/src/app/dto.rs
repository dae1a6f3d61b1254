use serde::Deserialize;
use serde_json::json;

use tallydesk_core::Invoice;

// -------------------------
// Query parameters
// -------------------------

/// `?query=&page=` parameters of the listing routes.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub query: String,
    pub page: Option<u32>,
}

impl ListQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Invoice shaped for the edit form: the amount goes back out as the dollar
/// string the form field expects, not in cents.
pub fn invoice_form_json(invoice: &Invoice) -> serde_json::Value {
    json!({
        "id": invoice.id.to_string(),
        "customerId": invoice.customer_id.to_string(),
        "amount": invoice.amount.to_dollars_string(),
        "status": invoice.status.as_str(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tallydesk_core::{Cents, CustomerId, InvoiceId, InvoiceStatus};

    #[test]
    fn edit_form_amount_is_a_dollar_string() {
        let invoice = Invoice {
            id: InvoiceId::new(),
            customer_id: CustomerId::new(),
            amount: Cents::new(25075).unwrap(),
            status: InvoiceStatus::Pending,
            date: "2026-08-07".parse().unwrap(),
        };
        let value = invoice_form_json(&invoice);
        assert_eq!(value["amount"], "250.75");
        assert_eq!(value["status"], "pending");
    }
}
