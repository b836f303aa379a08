//! Journal entry details.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// One debit or credit of a journal entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    #[serde(rename = "detailid", default, skip_serializing_if = "Option::is_none")]
    pub detail_id: Option<i64>,

    #[serde(rename = "sub_accountid", default, skip_serializing_if = "Option::is_none")]
    pub sub_account_id: Option<i64>,

    #[serde(rename = "accountid", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debit: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Account name, filled in by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Detail {
    pub const READ_ONLY: &'static [&'static str] = &["detailid", "name"];

    /// A debit against a sub account.
    pub fn debit(sub_account_id: i64, amount: Money) -> Self {
        Self {
            sub_account_id: Some(sub_account_id),
            debit: Some(amount),
            ..Default::default()
        }
    }

    /// A credit against a sub account.
    pub fn credit(sub_account_id: i64, amount: Money) -> Self {
        Self {
            sub_account_id: Some(sub_account_id),
            credit: Some(amount),
            ..Default::default()
        }
    }
}
