//! Invoice line items.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::date;
use super::money::Money;

/// A line on an invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    #[serde(rename = "lineid", default, skip_serializing_if = "Option::is_none")]
    pub line_id: Option<i64>,

    #[serde(rename = "invoiceid", default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Quantity, a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<Money>,

    /// `qty * unit_cost`, computed by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    #[serde(rename = "taxName1", default, skip_serializing_if = "Option::is_none")]
    pub tax_name1: Option<String>,

    /// Tax percentage, a decimal string.
    #[serde(rename = "taxAmount1", default, skip_serializing_if = "Option::is_none")]
    pub tax_amount1: Option<String>,

    #[serde(rename = "taxName2", default, skip_serializing_if = "Option::is_none")]
    pub tax_name2: Option<String>,

    #[serde(rename = "taxAmount2", default, skip_serializing_if = "Option::is_none")]
    pub tax_amount2: Option<String>,

    /// 0 for a normal line, 1 for a rebilled expense.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub line_type: Option<i32>,

    #[serde(default, with = "date::date_time", skip_serializing_if = "Option::is_none")]
    pub updated: Option<NaiveDateTime>,
}

impl Line {
    /// Wire keys the server computes; never sent.
    pub const READ_ONLY: &'static [&'static str] = &["lineid", "invoiceid", "amount", "updated"];

    /// A line with a name, quantity and unit cost.
    pub fn new(name: impl Into<String>, qty: impl Into<String>, unit_cost: Money) -> Self {
        Self {
            name: Some(name.into()),
            qty: Some(qty.into()),
            unit_cost: Some(unit_cost),
            ..Default::default()
        }
    }
}
