//! Invoice submission actions.

use chrono::Utc;

use tallydesk_core::InvoiceId;
use tallydesk_forms::{FormState, InvoiceSchema, RawFields};
use tallydesk_store::{InvoiceUpdate, NewInvoice, Store};

use crate::revalidate::Revalidator;

use super::{ActionOutcome, INVOICES_PATH};

pub async fn create_invoice(
    store: &dyn Store,
    revalidator: &dyn Revalidator,
    fields: &RawFields,
) -> ActionOutcome {
    let payload = match InvoiceSchema::parse(fields) {
        Ok(payload) => payload,
        Err(errors) => {
            return ActionOutcome::ValidationFailed(FormState::validation(
                errors,
                fields.echo(),
                "Missing Fields. Failed to Create Invoice.",
            ));
        }
    };

    let invoice = NewInvoice {
        customer_id: payload.customer_id,
        amount: payload.amount,
        status: payload.status,
        date: Utc::now().date_naive(),
    };

    if let Err(e) = store.create_invoice(invoice).await {
        tracing::error!(error = %e, "invoice insert failed");
        return ActionOutcome::PersistenceFailed(FormState::database(
            fields.echo(),
            "Database Error: Failed to Create Invoice.",
        ));
    }

    revalidator.revalidate(INVOICES_PATH);
    ActionOutcome::Succeeded {
        redirect: INVOICES_PATH,
    }
}

pub async fn update_invoice(
    store: &dyn Store,
    revalidator: &dyn Revalidator,
    id: InvoiceId,
    fields: &RawFields,
) -> ActionOutcome {
    let payload = match InvoiceSchema::parse(fields) {
        Ok(payload) => payload,
        Err(errors) => {
            return ActionOutcome::ValidationFailed(FormState::validation(
                errors,
                fields.echo(),
                "Missing Fields. Failed to Update Invoice.",
            ));
        }
    };

    let update = InvoiceUpdate {
        customer_id: payload.customer_id,
        amount: payload.amount,
        status: payload.status,
    };

    if let Err(e) = store.update_invoice(id, update).await {
        tracing::error!(error = %e, invoice_id = %id, "invoice update failed");
        return ActionOutcome::PersistenceFailed(FormState::database(
            fields.echo(),
            "Database Error: Failed to Update Invoice.",
        ));
    }

    revalidator.revalidate(INVOICES_PATH);
    ActionOutcome::Succeeded {
        redirect: INVOICES_PATH,
    }
}

/// Deletes skip validation and do not navigate; the listing the client is
/// already on refreshes via the revalidated path.
pub async fn delete_invoice(
    store: &dyn Store,
    revalidator: &dyn Revalidator,
    id: InvoiceId,
) -> Result<(), FormState> {
    if let Err(e) = store.delete_invoice(id).await {
        tracing::error!(error = %e, invoice_id = %id, "invoice delete failed");
        return Err(FormState::message("Database Error: Failed to Delete Invoice."));
    }
    revalidator.revalidate(INVOICES_PATH);
    Ok(())
}
