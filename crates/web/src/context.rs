use tallydesk_core::UserId;

/// Session context for a request (authenticated identity).
///
/// Inserted by the session middleware; present on all dashboard routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    user_id: UserId,
    email: String,
}

impl SessionContext {
    pub fn new(user_id: UserId, email: String) -> Self {
        Self { user_id, email }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
