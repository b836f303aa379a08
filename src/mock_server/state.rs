//! Mock server state management.
//!
//! Provides the in-memory data store for the mock FreshBooks API server.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{Identity, Invoice, JournalEntry, Money, VisState};

/// A token pair handed out by the mock token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub refresh_token: String,
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Invoices by account id, then by invoice id.
    pub invoices: HashMap<String, BTreeMap<i64, Invoice>>,

    /// Journal entries by account id.
    pub journal_entries: HashMap<String, Vec<JournalEntry>>,

    /// The identity returned by `users/me`.
    pub identity: Option<Identity>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    /// Client secret the token endpoint accepts. Any secret is accepted if unset.
    pub client_secret: Option<String>,

    /// Authorization codes the token endpoint will exchange (once each).
    pub authorization_codes: HashSet<String>,

    /// Refresh tokens the token endpoint will exchange (once each).
    pub refresh_tokens: HashSet<String>,

    /// Statuses to answer the next requests with, before any routing.
    pub injected_failures: VecDeque<u16>,

    /// Number of requests received, including failed ones.
    pub request_count: u64,

    /// Fixed `created_at` for issued tokens (seconds since the epoch).
    pub token_created_at: i64,

    issued: u64,
    next_id: i64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self {
            next_id: 1000,
            token_created_at: 1_600_000_000,
            ..Default::default()
        }
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add an invoice to an account. Its `id` is used as the key.
    pub fn with_invoice(mut self, account_id: &str, invoice: Invoice) -> Self {
        let id = invoice.id.unwrap_or_else(|| self.allocate_id());
        self.next_id = self.next_id.max(id + 1);
        self.invoices
            .entry(account_id.to_string())
            .or_default()
            .insert(id, invoice);
        self
    }

    /// Set the identity served by `users/me`.
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Set the client secret the token endpoint checks.
    pub fn with_client_secret(mut self, secret: &str) -> Self {
        self.client_secret = Some(secret.to_string());
        self
    }

    /// Register an authorization code for exchange.
    pub fn with_authorization_code(mut self, code: &str) -> Self {
        self.authorization_codes.insert(code.to_string());
        self
    }

    /// Answer the next request with `status` instead of handling it.
    pub fn with_failure(mut self, status: u16) -> Self {
        self.injected_failures.push_back(status);
        self
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whether a bearer token is acceptable.
    pub fn is_authorized(&self, bearer: Option<&str>) -> bool {
        match &self.required_token {
            Some(required) => bearer == Some(required.as_str()),
            None => true,
        }
    }

    /// Get an invoice by account and id.
    pub fn get_invoice(&self, account_id: &str, id: i64) -> Option<&Invoice> {
        self.invoices.get(account_id).and_then(|m| m.get(&id))
    }

    /// List the invoices of an account in id order.
    pub fn list_invoices(&self, account_id: &str) -> Vec<&Invoice> {
        self.invoices
            .get(account_id)
            .map(|m| m.values().collect())
            .unwrap_or_default()
    }

    /// Store a new invoice, filling in the fields the server owns.
    pub fn create_invoice(&mut self, account_id: &str, mut invoice: Invoice) -> &Invoice {
        let id = self.allocate_id();
        invoice.id = Some(id);
        invoice.invoice_id = Some(id);
        invoice.account_id = Some(account_id.to_string());
        invoice.vis_state.get_or_insert(VisState::Active);
        invoice.status.get_or_insert(crate::InvoiceStatus::Draft);

        let total = Self::invoice_total(&invoice);
        let code = invoice
            .currency_code
            .clone()
            .unwrap_or_else(|| "USD".to_string());
        invoice.amount = Some(Money::new(format!("{total:.2}"), code.clone()));
        invoice.outstanding = Some(Money::new(format!("{total:.2}"), code.clone()));
        invoice.paid = Some(Money::new("0.00", code));

        self.invoices
            .entry(account_id.to_string())
            .or_default()
            .entry(id)
            .or_insert(invoice)
    }

    /// Store a journal entry, assigning its ids.
    pub fn create_journal_entry(
        &mut self,
        account_id: &str,
        mut entry: JournalEntry,
    ) -> &JournalEntry {
        let id = self.allocate_id();
        entry.id = Some(id);
        entry.entry_id = Some(id);
        let entries = self
            .journal_entries
            .entry(account_id.to_string())
            .or_default();
        entries.push(entry);
        &entries[entries.len() - 1]
    }

    /// Exchange an authorization code or refresh token for a new token pair.
    ///
    /// Each code and refresh token works once; the new access token becomes
    /// the required token.
    pub fn exchange(&mut self, grant: &Grant) -> Option<IssuedToken> {
        let accepted = match grant {
            Grant::AuthorizationCode(code) => self.authorization_codes.remove(code),
            Grant::RefreshToken(token) => self.refresh_tokens.remove(token),
        };
        if !accepted {
            return None;
        }

        self.issued += 1;
        let token = IssuedToken {
            access_token: format!("mock-access-{}", self.issued),
            refresh_token: format!("mock-refresh-{}", self.issued),
        };
        self.refresh_tokens.insert(token.refresh_token.clone());
        self.required_token = Some(token.access_token.clone());
        Some(token)
    }

    fn invoice_total(invoice: &Invoice) -> f64 {
        invoice
            .lines
            .iter()
            .flatten()
            .map(|line| {
                let qty = line
                    .qty
                    .as_deref()
                    .and_then(|q| q.parse::<f64>().ok())
                    .unwrap_or(0.0);
                let cost = line.unit_cost.as_ref().and_then(Money::as_f64).unwrap_or(0.0);
                qty * cost
            })
            .sum()
    }
}

/// What the token endpoint is asked to exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant {
    AuthorizationCode(String),
    RefreshToken(String),
}
