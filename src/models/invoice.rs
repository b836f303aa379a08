//! Invoice model.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::date;
use super::line::Line;
use super::money::Money;
use super::status::{
    AutoBillStatus, DepositStatus, DisplayStatus, InvoiceStatus, InvoiceV3Status, PaymentStatus,
    VisState,
};
use crate::error::Result;
use crate::traits::Resource;
use crate::transform;

/// A FreshBooks invoice.
///
/// Field names follow Rust conventions; the serde attributes hold the wire
/// key for each one. Nullable fields (`Option<Option<T>>`) distinguish an
/// absent key (`None`) from an explicit `null` (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "invoiceid", default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<i64>,

    #[serde(rename = "accountid", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(rename = "accounting_systemid", default, skip_serializing_if = "Option::is_none")]
    pub accounting_system_id: Option<String>,

    /// The client this invoice bills. Required when creating.
    #[serde(rename = "customerid", default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,

    #[serde(default, with = "date::date_only", skip_serializing_if = "Option::is_none")]
    pub create_date: Option<NaiveDate>,

    #[serde(default, with = "date::date_time", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,

    #[serde(default, with = "date::date_only", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_offset_days: Option<i32>,

    #[serde(default, with = "date::nullable_date_only", skip_serializing_if = "Option::is_none")]
    pub date_paid: Option<Option<NaiveDate>>,

    #[serde(default, with = "date::nullable_date_only", skip_serializing_if = "Option::is_none")]
    pub fulfillment_date: Option<Option<NaiveDate>>,

    #[serde(default, with = "date::nullable_date_only", skip_serializing_if = "Option::is_none")]
    pub generation_date: Option<Option<NaiveDate>>,

    #[serde(default, with = "date::nullable_date_time", skip_serializing_if = "Option::is_none")]
    pub updated: Option<Option<NaiveDateTime>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    // Totals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outstanding: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_total: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<f64>,

    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_description: Option<Option<String>>,

    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deposit_amount: Option<Option<f64>>,

    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deposit_percentage: Option<Option<String>>,

    // Statuses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v3_status: Option<InvoiceV3Status>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_status: Option<DisplayStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_status: Option<DepositStatus>,

    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub autobill_status: Option<Option<AutoBillStatus>>,

    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub dispute_status: Option<Option<String>>,

    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_order_status: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vis_state: Option<VisState>,

    // Addressee
    #[serde(rename = "fname", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(rename = "lname", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_organization: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,

    // Content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub terms: Option<Option<String>>,

    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub po_number: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_details: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<Line>>,

    // Links and flags
    #[serde(rename = "ownerid", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,

    #[serde(rename = "estimateid", default, skip_serializing_if = "Option::is_none")]
    pub estimate_id: Option<i64>,

    #[serde(rename = "basecampid", default, skip_serializing_if = "Option::is_none")]
    pub basecamp_id: Option<i64>,

    #[serde(rename = "sentid", default, skip_serializing_if = "Option::is_none")]
    pub sent_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext_archive: Option<i32>,

    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub return_uri: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_bill: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gmail: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_attachments: Option<bool>,
}

impl Invoice {
    /// Wire keys owned by the server; stripped from request bodies.
    pub const READ_ONLY: &'static [&'static str] = &[
        "id",
        "invoiceid",
        "accountid",
        "accounting_systemid",
        "amount",
        "autobill_status",
        "created_at",
        "current_organization",
        "date_paid",
        "deposit_status",
        "discount_total",
        "display_status",
        "dispute_status",
        "due_date",
        "gmail",
        "outstanding",
        "ownerid",
        "paid",
        "payment_status",
        "sentid",
        "updated",
        "v3_status",
    ];

    /// A draft invoice for a client, dated `create_date`.
    pub fn new(customer_id: i64, create_date: NaiveDate) -> Self {
        Self {
            customer_id: Some(customer_id),
            create_date: Some(create_date),
            ..Default::default()
        }
    }

    /// Whether the invoice has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.vis_state == Some(VisState::Deleted)
    }

    /// Whether anything is still owed.
    pub fn is_outstanding(&self) -> bool {
        self.outstanding
            .as_ref()
            .and_then(Money::as_f64)
            .map_or(false, |amount| amount > 0.0)
    }
}

impl Resource for Invoice {
    const PATH: &'static str = "invoices/invoices";
    const SINGULAR: &'static str = "invoice";
    const PLURAL: &'static str = "invoices";
    const NAME: &'static str = "Invoice";
    const NAME_PLURAL: &'static str = "Invoices";

    fn to_request(&self) -> Result<Value> {
        let mut body = transform::encode_request(Self::SINGULAR, self, Self::READ_ONLY)?;
        if let Some(Value::Array(lines)) = body
            .get_mut(Self::SINGULAR)
            .and_then(|invoice| invoice.get_mut("lines"))
        {
            for line in lines.iter_mut() {
                transform::strip_keys(line, Line::READ_ONLY);
            }
        }
        Ok(body)
    }
}
