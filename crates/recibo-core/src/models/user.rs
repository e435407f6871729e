use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated identity, passed explicitly into every upload-initiating
/// entry point. The identity provider itself is external; absence of a
/// `UserContext` means "not signed in".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    pub user_id: Uuid,
    pub display_name: Option<String>,
}

impl UserContext {
    pub fn new(user_id: Uuid) -> Self {
        UserContext {
            user_id,
            display_name: None,
        }
    }
}
