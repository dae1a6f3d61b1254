use crate::customer::is_valid_email;
use crate::errors::FieldErrors;
use crate::fields::RawFields;

pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";

const MIN_PASSWORD_LEN: usize = 6;

/// Validated sign-in submission.
///
/// The password is intentionally opaque here; verification happens behind
/// the authenticator boundary.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialsPayload {
    pub email: String,
    pub password: String,
}

impl core::fmt::Debug for CredentialsPayload {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Never log the password.
        f.debug_struct("CredentialsPayload")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validation schema for sign-in submissions.
///
/// A failure here is indistinguishable from a wrong password for the caller:
/// both map to the invalid-credentials message without a store lookup.
pub struct CredentialsSchema;

impl CredentialsSchema {
    pub fn parse(fields: &RawFields) -> Result<CredentialsPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let email = fields.get(FIELD_EMAIL).trim();
        if !is_valid_email(email) {
            errors.push(FIELD_EMAIL, "invalid email");
        }

        let password = fields.get(FIELD_PASSWORD);
        if password.len() < MIN_PASSWORD_LEN {
            errors.push(FIELD_PASSWORD, "password too short");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CredentialsPayload {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plausible_credentials() {
        let fields = RawFields::from([(FIELD_EMAIL, "user@tallydesk.dev"), (FIELD_PASSWORD, "123456")]);
        assert!(CredentialsSchema::parse(&fields).is_ok());
    }

    #[test]
    fn rejects_short_password() {
        let fields = RawFields::from([(FIELD_EMAIL, "user@tallydesk.dev"), (FIELD_PASSWORD, "12345")]);
        assert!(CredentialsSchema::parse(&fields).is_err());
    }

    #[test]
    fn debug_never_shows_password() {
        let payload = CredentialsPayload {
            email: "user@tallydesk.dev".into(),
            password: "hunter2secret".into(),
        };
        let rendered = format!("{payload:?}");
        assert!(!rendered.contains("hunter2secret"));
    }
}
