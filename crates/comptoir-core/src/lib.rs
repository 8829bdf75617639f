//! # comptoir-core: Pure Business Logic for Comptoir
//!
//! This crate is the heart of the Comptoir back-office. It contains the
//! financial-document arithmetic and domain rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Comptoir Architecture                           │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │              comptoir-session (lifecycle controller)          │ │
//! │  │   new document ──► client binding ──► submit ──► print/close  │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │               ★ comptoir-core (THIS CRATE) ★                  │ │
//! │  │                                                               │ │
//! │  │   money    document    reference    parse    filter           │ │
//! │  │   Money    ledgers     PRO/BC/FAC   coercion  projections     │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                       │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │              comptoir-store (redb key-value)                  │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Counterparty, CatalogItem, enums)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`document`] - FinancialDocument, line-item and payment ledgers
//! - [`reference`] - Reference number generation and validation
//! - [`parse`] - Numeric coercion policy for text input
//! - [`validation`] - Boundary validation rules
//! - [`filter`] - Pure filtering/search projections
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Derived values are never authoritative**: totals, balances and
//!    status are recomputed from the ledgers, never patched independently.
//! 2. **Integer money**: all monetary values are i64 in the smallest
//!    currency unit to avoid float drift.
//! 3. **Explicit errors**: all errors are typed, never strings or panics.

pub mod document;
pub mod error;
pub mod filter;
pub mod money;
pub mod parse;
pub mod reference;
pub mod types;
pub mod validation;

pub use document::{
    amount_paid, derive_status, document_total, FinancialDocument, LineItem, PaymentEntry,
};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

/// Maximum line items allowed on a single document.
///
/// Prevents runaway forms; generous compared to any realistic invoice.
pub const MAX_LINE_ITEMS: usize = 200;

/// Discount upper bound in basis points (100%).
pub const MAX_DISCOUNT_BPS: u32 = 10_000;
