use crate::errors::FieldErrors;
use crate::fields::RawFields;

/// Wire names of the customer form fields.
pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";

pub const MSG_NAME: &str = "Please enter a name.";
pub const MSG_EMAIL: &str = "Please enter a valid email address.";

/// Validated customer submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerPayload {
    pub name: String,
    pub email: String,
}

/// Validation schema for customer create/update submissions.
pub struct CustomerSchema;

impl CustomerSchema {
    pub fn parse(fields: &RawFields) -> Result<CustomerPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = fields.get(FIELD_NAME).trim();
        if name.is_empty() {
            errors.push(FIELD_NAME, MSG_NAME);
        }

        let email = fields.get(FIELD_EMAIL).trim();
        if !is_valid_email(email) {
            errors.push(FIELD_EMAIL, MSG_EMAIL);
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CustomerPayload {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

/// Syntactic email check: one `@`, non-empty local part, and a domain with a
/// dot in the interior. Deliverability is not our concern here.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.len() < 3 {
        return false;
    }
    if email.chars().any(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    match domain.split_once('.') {
        Some((host, rest)) => !host.is_empty() && !rest.is_empty() && !rest.ends_with('.'),
        None => false,
    }
}
