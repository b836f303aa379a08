//! Journal entry model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::date;
use super::detail::Detail;
use super::money::Money;
use crate::error::Result;
use crate::traits::Resource;
use crate::transform;

/// A manual journal entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "entryid", default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<i64>,

    pub name: String,

    pub description: String,

    pub currency_code: String,

    #[serde(default, with = "date::date_only", skip_serializing_if = "Option::is_none")]
    pub user_entered_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<Detail>,
}

impl JournalEntry {
    pub const READ_ONLY: &'static [&'static str] = &["id", "entryid"];

    /// Whether total debits equal total credits.
    pub fn is_balanced(&self) -> bool {
        let sum = |pick: fn(&Detail) -> Option<&Money>| -> f64 {
            self.details
                .iter()
                .filter_map(pick)
                .filter_map(Money::as_f64)
                .sum()
        };
        let debits = sum(|d| d.debit.as_ref());
        let credits = sum(|d| d.credit.as_ref());
        (debits - credits).abs() < 0.005
    }
}

impl Resource for JournalEntry {
    const PATH: &'static str = "journal_entries/journal_entries";
    const SINGULAR: &'static str = "journal_entry";
    const PLURAL: &'static str = "journal_entries";
    const NAME: &'static str = "Journal Entry";
    const NAME_PLURAL: &'static str = "Journal Entries";

    fn to_request(&self) -> Result<Value> {
        let mut body = transform::encode_request(Self::SINGULAR, self, Self::READ_ONLY)?;
        if let Some(Value::Array(details)) = body
            .get_mut(Self::SINGULAR)
            .and_then(|entry| entry.get_mut("details"))
        {
            for detail in details.iter_mut() {
                transform::strip_keys(detail, Detail::READ_ONLY);
            }
        }
        Ok(body)
    }
}
