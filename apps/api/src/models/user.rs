use serde::{Deserialize, Serialize};

/// The authenticated user as reported by the identity provider.
///
/// Read-only: the service never writes identity data back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub display_name: String,
    pub email: String,
}

impl Identity {
    /// Name to pre-fill into the resume; falls back to the email when no display name is set.
    pub fn prefill_name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.email
        } else {
            &self.display_name
        }
    }
}
