//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::NaiveDate;

use crate::{
    Business, BusinessMembership, DisplayStatus, Identity, Invoice, InvoiceStatus, Line, Money,
    PaymentStatus, VisState,
};

/// Account the default scenario's invoices belong to.
pub const DEFAULT_ACCOUNT_ID: &str = "zDmNq";

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Invoice Fixtures
    // =========================================================================

    /// Create a minimal invoice with an id and client.
    pub fn minimal_invoice(id: i64, customer_id: i64) -> Invoice {
        Invoice {
            id: Some(id),
            invoice_id: Some(id),
            customer_id: Some(customer_id),
            vis_state: Some(VisState::Active),
            ..Default::default()
        }
    }

    /// Create a sent invoice with one line and an outstanding balance.
    pub fn sent_invoice(id: i64, customer_id: i64, amount: &str) -> Invoice {
        let mut invoice = Self::minimal_invoice(id, customer_id);
        invoice.invoice_number = Some(format!("{id:07}"));
        invoice.create_date = NaiveDate::from_ymd_opt(2020, 10, 12);
        invoice.due_date = NaiveDate::from_ymd_opt(2020, 11, 11);
        invoice.due_offset_days = Some(30);
        invoice.currency_code = Some("CAD".to_string());
        invoice.status = Some(InvoiceStatus::Sent);
        invoice.display_status = Some(DisplayStatus::Sent);
        invoice.payment_status = Some(PaymentStatus::Unpaid);
        invoice.amount = Some(Money::new(amount, "CAD"));
        invoice.outstanding = Some(Money::new(amount, "CAD"));
        invoice.paid = Some(Money::new("0.00", "CAD"));
        invoice.organization = Some("American Cyanide".to_string());
        invoice.lines = Some(vec![Line::new("Services", "1", Money::new(amount, "CAD"))]);
        invoice
    }

    /// Create a paid invoice.
    pub fn paid_invoice(id: i64, customer_id: i64, amount: &str) -> Invoice {
        let mut invoice = Self::sent_invoice(id, customer_id, amount);
        invoice.status = Some(InvoiceStatus::Paid);
        invoice.display_status = Some(DisplayStatus::Paid);
        invoice.payment_status = Some(PaymentStatus::Paid);
        invoice.outstanding = Some(Money::new("0.00", "CAD"));
        invoice.paid = Some(Money::new(amount, "CAD"));
        invoice.date_paid = Some(NaiveDate::from_ymd_opt(2020, 10, 20));
        invoice
    }

    // =========================================================================
    // Identity Fixtures
    // =========================================================================

    /// Create an identity that belongs to one business.
    pub fn identity(id: i64, email: &str, account_id: &str) -> Identity {
        Identity {
            id,
            identity_id: Some(id),
            first_name: Some("Gordon".to_string()),
            last_name: Some("Shumway".to_string()),
            email: Some(email.to_string()),
            language: Some("en".to_string()),
            setup_complete: Some(true),
            business_memberships: vec![BusinessMembership {
                id: 1,
                role: Some("owner".to_string()),
                business: Business {
                    id: 77,
                    name: Some("American Cyanide".to_string()),
                    account_id: Some(account_id.to_string()),
                },
            }],
            ..Default::default()
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// Create a complete test scenario with related data.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            account_id: DEFAULT_ACCOUNT_ID.to_string(),
            invoices: vec![
                Self::sent_invoice(987654, 12345, "41.94"),
                Self::paid_invoice(987655, 12345, "100.00"),
                Self::sent_invoice(987656, 54321, "7.50"),
            ],
            identity: Self::identity(712052, "gshumway@example.com", DEFAULT_ACCOUNT_ID),
        }
    }
}

/// A complete test scenario with related data.
pub struct DefaultScenario {
    pub account_id: String,
    pub invoices: Vec<Invoice>,
    pub identity: Identity,
}
