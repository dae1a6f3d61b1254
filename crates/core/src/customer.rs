use serde::{Deserialize, Serialize};

use crate::id::CustomerId;

/// Image shown for customers created without an uploaded avatar.
pub const PLACEHOLDER_IMAGE: &str = "/customers/placeholder.png";

/// A customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub image_url: String,
}
