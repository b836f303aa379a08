//! The authenticated user, as returned by `users/me`.

use serde::{Deserialize, Serialize};

/// The identity behind the current access token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// ISO 8601 timestamp as sent by the auth service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_complete: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub business_memberships: Vec<BusinessMembership>,
}

/// A business the user belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessMembership {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    pub business: Business,
}

/// A FreshBooks business.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The accounting account id used in `/accounting/account/{id}/...` paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl Identity {
    /// Full name, if either part is known.
    pub fn full_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(name), None) | (None, Some(name)) => Some(name.to_string()),
            (None, None) => None,
        }
    }

    /// Accounting account ids of every business the user can access.
    pub fn account_ids(&self) -> Vec<&str> {
        self.business_memberships
            .iter()
            .filter_map(|m| m.business.account_id.as_deref())
            .collect()
    }
}
