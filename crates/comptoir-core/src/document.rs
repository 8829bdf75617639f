//! # Financial Documents and Ledgers
//!
//! The shared document shape for purchases, invoices and proformas, plus
//! the two ledgers that drive it:
//!
//! - **Line-item ledger**: each item's total is `quantity × unit price`
//!   minus the percentage discount, recomputed on any field change.
//! - **Payment allocation ledger**: payments sum to `amount_paid`, which
//!   derives `balance` and the three-way paid/partial/unpaid status.
//!
//! ## The Derived-Value Invariant
//! ```text
//! total_amount = Σ line_items[].total
//! amount_paid  = Σ payment_entries[].amount
//! balance      = total_amount - amount_paid
//! status       = unpaid | partial | paid   (from amount_paid vs total)
//! ```
//! These four values are snapshots, never authoritative. Every mutating
//! operation on a document recomputes all of them together so that no
//! intermediate state can be observed (or persisted) where they disagree
//! with the ledgers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CatalogItem, DocumentKind, DocumentStatus, PaymentMethod};
use crate::{MAX_DISCOUNT_BPS, MAX_LINE_ITEMS};

// =============================================================================
// Line Items
// =============================================================================

/// A line on a financial document.
///
/// `total` is derived; it has no public setter and is recomputed by every
/// field mutation. Negative quantities are not rejected here — validation,
/// if any, belongs to the UI boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,

    /// Catalog reference when the line came from the catalog.
    pub product_ref: Option<String>,

    pub name: String,

    pub quantity: i64,

    pub unit_price: Money,

    /// Discount in basis points (750 = 7.5%).
    pub discount_bps: u32,

    /// Derived: `unit_price × quantity`, discounted. Never set directly.
    pub total: Money,
}

impl LineItem {
    /// Creates a free-form line: quantity 1, no discount.
    pub fn new(name: impl Into<String>, unit_price: Money) -> Self {
        let mut item = LineItem {
            id: Uuid::new_v4().to_string(),
            product_ref: None,
            name: name.into(),
            quantity: 1,
            unit_price,
            discount_bps: 0,
            total: Money::zero(),
        };
        item.recompute();
        item
    }

    /// Creates a line from a catalog entry.
    ///
    /// Defaults: unit price = catalog sell price (flat amount for
    /// services), quantity 1, discount 0.
    pub fn from_catalog(entry: &CatalogItem) -> Self {
        let mut item = LineItem::new(entry.name.clone(), entry.sell_price);
        item.product_ref = Some(entry.id.clone());
        item
    }

    /// Sets the quantity and recomputes the line total.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.recompute();
    }

    /// Sets the unit price and recomputes the line total.
    pub fn set_unit_price(&mut self, unit_price: Money) {
        self.unit_price = unit_price;
        self.recompute();
    }

    /// Sets the discount and recomputes the line total.
    ///
    /// Returns an error above 10000 bps (100%).
    pub fn set_discount_bps(&mut self, discount_bps: u32) -> CoreResult<()> {
        if discount_bps > MAX_DISCOUNT_BPS {
            return Err(CoreError::DiscountOutOfRange { bps: discount_bps });
        }
        self.discount_bps = discount_bps;
        self.recompute();
        Ok(())
    }

    /// Discount as a display percentage.
    #[inline]
    pub fn discount_percent(&self) -> f64 {
        self.discount_bps as f64 / 100.0
    }

    fn recompute(&mut self) {
        self.total = self
            .unit_price
            .multiply_quantity(self.quantity)
            .apply_percentage_discount(self.discount_bps);
    }
}

/// Sums the derived line totals into a document grand total.
pub fn document_total(items: &[LineItem]) -> Money {
    items.iter().map(|i| i.total).sum()
}

// =============================================================================
// Payment Allocation
// =============================================================================

/// A payment towards a document. Owned exclusively by its parent document;
/// never shared across documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEntry {
    pub id: String,

    pub method: PaymentMethod,

    pub amount: Money,

    pub date: DateTime<Utc>,
}

/// Sums the payment ledger.
pub fn amount_paid(entries: &[PaymentEntry]) -> Money {
    entries.iter().map(|e| e.amount).sum()
}

/// Derives the three-way payment status.
///
/// `paid = 0` → unpaid; `0 < paid < total` → partial; `paid >= total` →
/// paid. A zero-total document with no payments is unpaid; any payment on
/// it makes it paid. Overpayment is permitted and still reads as paid.
pub fn derive_status(total: Money, paid: Money) -> DocumentStatus {
    if paid.is_zero() {
        DocumentStatus::Unpaid
    } else if paid < total {
        DocumentStatus::Partial
    } else {
        DocumentStatus::Paid
    }
}

// =============================================================================
// Financial Document
// =============================================================================

/// The shared shape of purchases, invoices and proformas.
///
/// ## Lifecycle
/// Created in memory when a "new document" flow opens (reference already
/// generated, `id` empty until first save), mutated through the ledger
/// methods below, persisted on explicit submit, loaded back verbatim for
/// edit mode, deleted by id. No soft-delete, no versioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDocument {
    /// Storage id; empty string until the record is first persisted.
    pub id: String,

    pub kind: DocumentKind,

    /// Human-facing reference (PRO-2024-1001, BC-2024-0007, FAC-483920).
    pub reference: String,

    pub date: DateTime<Utc>,

    pub counterparty_id: String,

    /// Denormalized snapshot; not re-synced if the counterparty record
    /// changes later.
    pub counterparty_name: String,

    pub line_items: Vec<LineItem>,

    /// Derived: Σ line totals.
    pub total_amount: Money,

    pub payment_entries: Vec<PaymentEntry>,

    /// Derived: Σ payment amounts.
    pub amount_paid: Money,

    /// Derived: total − paid. Negative on overpayment.
    pub balance: Money,

    /// Derived from total and paid.
    pub status: DocumentStatus,
}

impl FinancialDocument {
    /// Creates an empty in-memory document for a "new document" flow.
    pub fn new(kind: DocumentKind, reference: impl Into<String>, date: DateTime<Utc>) -> Self {
        FinancialDocument {
            id: String::new(),
            kind,
            reference: reference.into(),
            date,
            counterparty_id: String::new(),
            counterparty_name: String::new(),
            line_items: Vec::new(),
            total_amount: Money::zero(),
            payment_entries: Vec::new(),
            amount_paid: Money::zero(),
            balance: Money::zero(),
            status: DocumentStatus::Unpaid,
        }
    }

    /// True until the record has been persisted once.
    #[inline]
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    /// Recomputes every derived value from the two ledgers, together.
    ///
    /// Called by all mutating methods here and again by the lifecycle
    /// controller immediately before persistence, so a record whose
    /// ledgers were edited through any other path is still written
    /// consistent.
    pub fn recompute(&mut self) {
        self.total_amount = document_total(&self.line_items);
        self.amount_paid = amount_paid(&self.payment_entries);
        self.balance = self.total_amount - self.amount_paid;
        self.status = derive_status(self.total_amount, self.amount_paid);
    }

    // ------------------------------------------------------------------
    // Line-item ledger
    // ------------------------------------------------------------------

    /// Appends a line item and re-derives the totals.
    pub fn add_line(&mut self, item: LineItem) -> CoreResult<()> {
        if self.line_items.len() >= MAX_LINE_ITEMS {
            return Err(CoreError::TooManyLineItems {
                max: MAX_LINE_ITEMS,
            });
        }
        self.line_items.push(item);
        self.recompute();
        Ok(())
    }

    /// Removes a line item by id; the grand total is re-derived over the
    /// remaining lines.
    pub fn remove_line(&mut self, id: &str) -> CoreResult<()> {
        let before = self.line_items.len();
        self.line_items.retain(|i| i.id != id);
        if self.line_items.len() == before {
            return Err(CoreError::LineItemNotFound(id.to_string()));
        }
        self.recompute();
        Ok(())
    }

    /// Mutates one line through a closure, then re-derives the totals.
    ///
    /// The closure receives the line with its field setters, so the line
    /// total is already consistent when the document totals are summed.
    pub fn update_line<F>(&mut self, id: &str, f: F) -> CoreResult<()>
    where
        F: FnOnce(&mut LineItem) -> CoreResult<()>,
    {
        let item = self
            .line_items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::LineItemNotFound(id.to_string()))?;
        f(item)?;
        self.recompute();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Payment allocation ledger
    // ------------------------------------------------------------------

    /// Appends a payment with a fresh id and re-derives paid/balance/status.
    ///
    /// No validation against the remaining balance: overpayment is
    /// permitted and yields a negative balance.
    pub fn add_payment(
        &mut self,
        method: PaymentMethod,
        amount: Money,
        date: DateTime<Utc>,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        self.payment_entries.push(PaymentEntry {
            id: id.clone(),
            method,
            amount,
            date,
        });
        self.recompute();
        id
    }

    /// Removes a payment by id and re-derives the totals.
    pub fn remove_payment(&mut self, id: &str) -> CoreResult<()> {
        let before = self.payment_entries.len();
        self.payment_entries.retain(|e| e.id != id);
        if self.payment_entries.len() == before {
            return Err(CoreError::PaymentNotFound(id.to_string()));
        }
        self.recompute();
        Ok(())
    }

    /// Mutates one payment entry, then re-derives the totals.
    pub fn update_payment<F>(&mut self, id: &str, f: F) -> CoreResult<()>
    where
        F: FnOnce(&mut PaymentEntry),
    {
        let entry = self
            .payment_entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CoreError::PaymentNotFound(id.to_string()))?;
        f(entry);
        self.recompute();
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn proforma() -> FinancialDocument {
        FinancialDocument::new(DocumentKind::Proforma, "PRO-2024-1001", Utc::now())
    }

    #[test]
    fn test_line_total_follows_every_field_change() {
        let mut item = LineItem::new("Sac de riz 50kg", Money::from_units(5000));
        assert_eq!(item.total.units(), 5000);

        item.set_quantity(2);
        assert_eq!(item.total.units(), 10_000);

        item.set_unit_price(Money::from_units(4500));
        assert_eq!(item.total.units(), 9000);

        item.set_discount_bps(1000).unwrap();
        assert_eq!(item.total.units(), 8100);
    }

    #[test]
    fn test_discount_out_of_range_rejected() {
        let mut item = LineItem::new("Service", Money::from_units(1000));
        assert!(matches!(
            item.set_discount_bps(10_001),
            Err(CoreError::DiscountOutOfRange { .. })
        ));
        // total untouched by the rejected mutation
        assert_eq!(item.total.units(), 1000);
    }

    #[test]
    fn test_from_catalog_defaults() {
        let entry = CatalogItem {
            id: "cat-1".to_string(),
            kind: crate::types::CatalogKind::Service,
            name: "Livraison".to_string(),
            sell_price: Money::from_units(2000),
            cost_price: None,
            category: "services".to_string(),
            stock: None,
        };
        let item = LineItem::from_catalog(&entry);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.discount_bps, 0);
        assert_eq!(item.unit_price.units(), 2000);
        assert_eq!(item.product_ref.as_deref(), Some("cat-1"));
    }

    #[test]
    fn test_remove_line_rederives_total() {
        let mut doc = proforma();
        doc.add_line(LineItem::new("A", Money::from_units(1000))).unwrap();
        doc.add_line(LineItem::new("B", Money::from_units(2500))).unwrap();
        assert_eq!(doc.total_amount.units(), 3500);

        let id = doc.line_items[0].id.clone();
        doc.remove_line(&id).unwrap();
        assert_eq!(doc.total_amount.units(), 2500);

        assert!(matches!(
            doc.remove_line("missing"),
            Err(CoreError::LineItemNotFound(_))
        ));
    }

    #[test]
    fn test_status_derivation_three_way() {
        let total = Money::from_units(10_000);
        assert_eq!(derive_status(total, Money::zero()), DocumentStatus::Unpaid);
        assert_eq!(
            derive_status(total, Money::from_units(4000)),
            DocumentStatus::Partial
        );
        assert_eq!(
            derive_status(total, Money::from_units(10_000)),
            DocumentStatus::Paid
        );
        // Overpayment still reads as paid
        assert_eq!(
            derive_status(total, Money::from_units(12_000)),
            DocumentStatus::Paid
        );
        // Zero-total edge: unpaid until any payment lands
        assert_eq!(
            derive_status(Money::zero(), Money::zero()),
            DocumentStatus::Unpaid
        );
        assert_eq!(
            derive_status(Money::zero(), Money::from_units(1)),
            DocumentStatus::Paid
        );
    }

    #[test]
    fn test_scenario_proforma_paid_in_full() {
        // PRO-2024-1001, 2 × 5000, no discount
        let mut doc = proforma();
        let mut item = LineItem::new("Sac de riz 50kg", Money::from_units(5000));
        item.set_quantity(2);
        doc.add_line(item).unwrap();

        assert_eq!(doc.total_amount.units(), 10_000);
        assert_eq!(doc.status, DocumentStatus::Unpaid);

        doc.add_payment(PaymentMethod::Cash, Money::from_units(10_000), Utc::now());
        assert_eq!(doc.amount_paid.units(), 10_000);
        assert_eq!(doc.balance.units(), 0);
        assert_eq!(doc.status, DocumentStatus::Paid);
    }

    #[test]
    fn test_overpayment_negative_balance() {
        let mut doc = proforma();
        doc.add_line(LineItem::new("A", Money::from_units(1000))).unwrap();
        doc.add_payment(PaymentMethod::Cheque, Money::from_units(1500), Utc::now());

        assert_eq!(doc.balance.units(), -500);
        assert_eq!(doc.status, DocumentStatus::Paid);
    }

    #[test]
    fn test_update_and_remove_payment() {
        let mut doc = proforma();
        doc.add_line(LineItem::new("A", Money::from_units(8000))).unwrap();
        let pay_id = doc.add_payment(
            PaymentMethod::MobileMoneyA,
            Money::from_units(3000),
            Utc::now(),
        );
        assert_eq!(doc.status, DocumentStatus::Partial);

        doc.update_payment(&pay_id, |p| p.amount = Money::from_units(8000))
            .unwrap();
        assert_eq!(doc.status, DocumentStatus::Paid);

        doc.remove_payment(&pay_id).unwrap();
        assert_eq!(doc.status, DocumentStatus::Unpaid);
        assert_eq!(doc.balance.units(), 8000);

        assert!(matches!(
            doc.remove_payment(&pay_id),
            Err(CoreError::PaymentNotFound(_))
        ));
    }

    #[test]
    fn test_recompute_repairs_stale_derived_fields() {
        let mut doc = proforma();
        doc.add_line(LineItem::new("A", Money::from_units(5000))).unwrap();

        // Simulate a record whose snapshot fields were tampered with
        doc.total_amount = Money::from_units(1);
        doc.status = DocumentStatus::Paid;

        doc.recompute();
        assert_eq!(doc.total_amount.units(), 5000);
        assert_eq!(doc.status, DocumentStatus::Unpaid);
        assert_eq!(doc.balance.units(), 5000);
    }

    #[test]
    fn test_document_serde_round_trip() {
        let mut doc = proforma();
        doc.counterparty_id = "CLI0001".to_string();
        doc.counterparty_name = "Boutique Sanou".to_string();
        doc.add_line(LineItem::new("A", Money::from_units(5000))).unwrap();
        doc.add_payment(PaymentMethod::Cash, Money::from_units(2000), Utc::now());

        let json = serde_json::to_string(&doc).unwrap();
        let back: FinancialDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back.reference, "PRO-2024-1001");
        assert_eq!(back.line_items.len(), 1);
        assert_eq!(back.payment_entries.len(), 1);
        assert_eq!(back.status, DocumentStatus::Partial);
    }
}
