//! Identity of the signed-in user
//!
//! Authentication happens elsewhere; the controller only reads the user id
//! to put into every mutating call, plus name and authorities for display.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// User id sent as `userId`
    pub uu_identity: String,
    pub name: String,
    #[serde(default)]
    pub authorities: Vec<String>,
}

impl Identity {
    pub fn new(uu_identity: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uu_identity: uu_identity.into(),
            name: name.into(),
            authorities: Vec::new(),
        }
    }

    pub fn with_authorities(mut self, authorities: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.authorities = authorities.into_iter().map(Into::into).collect();
        self
    }

    /// One line describing the user's rights
    pub fn rights_summary(&self) -> String {
        if self.authorities.is_empty() {
            "Nemáš nastavena žádná práva. Smůla.".to_string()
        } else {
            format!("Máš práva: {}", self.authorities.join(", "))
        }
    }

    /// Header line shown above the recipe list
    pub fn greeting(&self) -> String {
        format!("Jsi ověřený uživatel: {} ({})", self.name, self.uu_identity)
    }
}
