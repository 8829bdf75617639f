//! # Domain Types
//!
//! Core domain types used throughout Comptoir.
//!
//! ## Type Hierarchy
//! ```text
//! FinancialDocument (document.rs)      Counterparty        CatalogItem
//!   ├── LineItem                         id (CLI001/FRS001)  id (UUID)
//!   ├── PaymentEntry                     name, phone, email  name
//!   └── derived totals/status            running balance     sell price
//!
//! Enums: DocumentKind, DocumentStatus, PaymentMethod, CounterpartyKind
//! ```
//!
//! ## Identity Pattern
//! Stored records carry a UUID `id` for relations plus a human-facing
//! business identifier (document reference, counterparty code). The
//! business identifier is what prints on paper; the UUID never changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Document Kind
// =============================================================================

/// The kind of financial document.
///
/// Purchases, invoices and proformas share one document shape; the kind
/// decides the reference format and which collection the record lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Supplier purchase (reference `BC-<year>-<seq>` when ordered).
    Purchase,
    /// Client invoice (reference `FAC-<timestamp suffix>`).
    Invoice,
    /// Proforma invoice (reference `PRO-<year>-<random>`).
    Proforma,
}

// =============================================================================
// Document Status
// =============================================================================

/// Payment status of a document, derived from its ledgers.
///
/// Never stored authoritatively: recomputed from `total_amount` and
/// `amount_paid` before every persistence write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// No payment recorded.
    Unpaid,
    /// Paid amount strictly between zero and the document total.
    Partial,
    /// Paid amount covers the total (overpayment included).
    Paid,
}

impl Default for DocumentStatus {
    fn default() -> Self {
        DocumentStatus::Unpaid
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a payment entry was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    /// Physical cash.
    Cash,
    /// First mobile money operator.
    MobileMoneyA,
    /// Second mobile money operator.
    MobileMoneyB,
    /// Bank cheque.
    Cheque,
    /// Bank transfer.
    BankTransfer,
}

// =============================================================================
// Counterparty
// =============================================================================

/// Whether a counterparty is a client or a supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterpartyKind {
    Client,
    Supplier,
}

/// A client or supplier referenced by documents.
///
/// ## Running Balance
/// `balance` is an independent running total maintained by counterparty
/// operations; it is NOT reconciled against the outstanding balances of
/// individual documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counterparty {
    /// Business identifier: prefix + zero-padded sequence (CLI0001, FRS0001).
    pub id: String,

    pub kind: CounterpartyKind,

    pub name: String,

    pub phone: String,

    pub email: Option<String>,

    pub address: Option<String>,

    /// Independent running balance (see struct docs).
    pub balance: Money,

    /// Free-form classification tag (e.g. "grossiste", "detail").
    pub category: String,

    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Catalog
// =============================================================================

/// Whether a catalog entry is a stocked product or a flat-rate service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Product,
    Service,
}

/// An entry of the product/service catalog (the `inventory` collection).
///
/// When added to a document without an explicit price, the line item
/// defaults to `sell_price` (the flat amount, for services).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,

    pub kind: CatalogKind,

    pub name: String,

    /// Sell price for products, flat amount for services.
    pub sell_price: Money,

    /// Purchase cost, when known (products only).
    pub cost_price: Option<Money>,

    pub category: String,

    /// Current stock level; services carry none.
    pub stock: Option<i64>,
}
