use serde::{Deserialize, Serialize};

/// The only role allowed past the ownership gate.
pub const AUTHENTICATED_ROLE: &str = "authenticated";

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub role: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.role == AUTHENTICATED_ROLE
    }
}
