//! Customer submission actions.

use tallydesk_core::{CustomerId, PLACEHOLDER_IMAGE};
use tallydesk_forms::{CustomerSchema, FormState, RawFields};
use tallydesk_store::{CustomerUpdate, NewCustomer, Store};

use crate::revalidate::Revalidator;

use super::{ActionOutcome, CUSTOMERS_PATH};

pub async fn create_customer(
    store: &dyn Store,
    revalidator: &dyn Revalidator,
    fields: &RawFields,
) -> ActionOutcome {
    let payload = match CustomerSchema::parse(fields) {
        Ok(payload) => payload,
        Err(errors) => {
            return ActionOutcome::ValidationFailed(FormState::validation(
                errors,
                fields.echo(),
                "Missing Fields. Failed to Create Customer.",
            ));
        }
    };

    let customer = NewCustomer {
        name: payload.name,
        email: payload.email,
        // New customers always start with the placeholder avatar.
        image_url: PLACEHOLDER_IMAGE.to_string(),
    };

    if let Err(e) = store.create_customer(customer).await {
        tracing::error!(error = %e, "customer insert failed");
        return ActionOutcome::PersistenceFailed(FormState::database(
            fields.echo(),
            "Database Error: Failed to Create Customer.",
        ));
    }

    revalidator.revalidate(CUSTOMERS_PATH);
    ActionOutcome::Succeeded {
        redirect: CUSTOMERS_PATH,
    }
}

pub async fn update_customer(
    store: &dyn Store,
    revalidator: &dyn Revalidator,
    id: CustomerId,
    fields: &RawFields,
) -> ActionOutcome {
    let payload = match CustomerSchema::parse(fields) {
        Ok(payload) => payload,
        Err(errors) => {
            return ActionOutcome::ValidationFailed(FormState::validation(
                errors,
                fields.echo(),
                "Missing Fields. Failed to Update Customer.",
            ));
        }
    };

    let update = CustomerUpdate {
        name: payload.name,
        email: payload.email,
    };

    if let Err(e) = store.update_customer(id, update).await {
        tracing::error!(error = %e, customer_id = %id, "customer update failed");
        return ActionOutcome::PersistenceFailed(FormState::database(
            fields.echo(),
            "Database Error: Failed to Update Customer.",
        ));
    }

    revalidator.revalidate(CUSTOMERS_PATH);
    ActionOutcome::Succeeded {
        redirect: CUSTOMERS_PATH,
    }
}

pub async fn delete_customer(
    store: &dyn Store,
    revalidator: &dyn Revalidator,
    id: CustomerId,
) -> Result<(), FormState> {
    if let Err(e) = store.delete_customer(id).await {
        tracing::error!(error = %e, customer_id = %id, "customer delete failed");
        return Err(FormState::message("Database Error: Failed to Delete Customer."));
    }
    revalidator.revalidate(CUSTOMERS_PATH);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tallydesk_forms::customer::{FIELD_EMAIL, FIELD_NAME, MSG_EMAIL};
    use tallydesk_store::InMemoryStore;

    use crate::revalidate::RevalidationLog;

    fn fields(name: &str, email: &str) -> RawFields {
        RawFields::from([(FIELD_NAME, name), (FIELD_EMAIL, email)])
    }

    #[tokio::test]
    async fn malformed_email_fails_validation_without_persisting() {
        let store = Arc::new(InMemoryStore::new());
        let revalidations = RevalidationLog::new();

        let outcome =
            create_customer(store.as_ref(), &revalidations, &fields("Ada", "not-an-email")).await;

        let ActionOutcome::ValidationFailed(state) = outcome else {
            panic!("expected validation failure");
        };
        assert_eq!(state.errors.get(FIELD_EMAIL).unwrap(), &[MSG_EMAIL]);
        assert_eq!(
            state.message.as_deref(),
            Some("Missing Fields. Failed to Create Customer.")
        );
        assert!(store.list_customers().await.unwrap().is_empty());
        assert!(revalidations.paths().is_empty());
    }

    #[tokio::test]
    async fn new_customers_get_the_placeholder_image() {
        let store = Arc::new(InMemoryStore::new());
        let revalidations = RevalidationLog::new();

        let outcome = create_customer(
            store.as_ref(),
            &revalidations,
            &fields("Ada Lovelace", "ada@example.com"),
        )
        .await;

        assert_eq!(
            outcome,
            ActionOutcome::Succeeded {
                redirect: CUSTOMERS_PATH
            }
        );
        let refs = store.list_customers().await.unwrap();
        assert_eq!(refs.len(), 1);
        let customer = store.get_customer(refs[0].id).await.unwrap();
        assert_eq!(customer.image_url, PLACEHOLDER_IMAGE);
        assert_eq!(revalidations.paths(), vec![CUSTOMERS_PATH.to_string()]);
    }

    #[tokio::test]
    async fn deleting_a_referenced_customer_surfaces_the_template_message() {
        let store = Arc::new(InMemoryStore::new());
        let revalidations = RevalidationLog::new();

        create_customer(
            store.as_ref(),
            &revalidations,
            &fields("Ada Lovelace", "ada@example.com"),
        )
        .await;
        let id = store.list_customers().await.unwrap()[0].id;
        store
            .create_invoice(tallydesk_store::NewInvoice {
                customer_id: id,
                amount: tallydesk_core::Cents::new(100).unwrap(),
                status: tallydesk_core::InvoiceStatus::Pending,
                date: "2026-08-01".parse().unwrap(),
            })
            .await
            .unwrap();

        let state = delete_customer(store.as_ref(), &revalidations, id)
            .await
            .unwrap_err();
        assert_eq!(
            state.message.as_deref(),
            Some("Database Error: Failed to Delete Customer.")
        );
        // Only the create revalidated; the failed delete did not.
        assert_eq!(revalidations.paths().len(), 1);
    }
}
