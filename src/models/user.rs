use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl User {
    /// Display name derived from the local part of an email address.
    pub fn name_from_email(email: &str) -> String {
        email.split('@').next().unwrap_or_default().to_string()
    }
}
