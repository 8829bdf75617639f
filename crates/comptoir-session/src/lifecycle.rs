//! # Document Editing Session
//!
//! One session drives one financial document from creation (or load, in
//! edit mode) to persistence. The working copy lives in memory; nothing
//! touches storage until an explicit submit, and every submit recomputes
//! the derived totals first so a document can never be persisted with
//! snapshots that disagree with its ledgers.
//!
//! ## State Machine
//! ```text
//!        begin_proforma / begin_invoice
//! Idle ────────────────────────────────► ClientSelection
//!  │                                         │ select_counterparty /
//!  │ begin_purchase (supplier pre-bound)     │ create_and_select_counterparty
//!  └────────────────────────────────────►  Editing ◄───────────────┐
//!                                            │ submit              │ failure
//!                                            ▼                     │
//!                                        Submitting ───────────────┘
//!                                            │ success
//!                                            ▼
//!                                       PostSaveHold ──explicit──► Closed
//!                                            │ implicit
//!                                            └──── ignored
//! ```
//!
//! PostSaveHold exists so the "document saved" view (print / share)
//! cannot be dismissed by a stray outside click or escape keypress;
//! only an explicit close clears the document.

use chrono::Utc;
use tracing::{debug, info, warn};

use comptoir_core::{
    reference, Counterparty, CounterpartyKind, DocumentKind, FinancialDocument,
};
use comptoir_store::{Records, Store};

use crate::error::{SessionError, SessionResult};

// =============================================================================
// States and Signals
// =============================================================================

/// Where the editing session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No document open.
    Idle,
    /// Document created in memory; waiting for a counterparty.
    ClientSelection,
    /// Ledgers are editable.
    Editing,
    /// A submit is in flight; all other transitions are refused.
    Submitting,
    /// Saved successfully; held open for print/share until explicit close.
    PostSaveHold,
    /// Session over; document state cleared.
    Closed,
}

/// How a close was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseSignal {
    /// Close button, deliberate dismissal.
    Explicit,
    /// Outside click, escape key. Ignored during the post-save hold.
    Implicit,
}

// =============================================================================
// Session
// =============================================================================

/// The editing session around one financial document.
pub struct DocumentSession {
    store: Store,
    state: SessionState,
    document: Option<FinancialDocument>,
}

impl DocumentSession {
    pub fn new(store: Store) -> Self {
        DocumentSession {
            store,
            state: SessionState::Idle,
            document: None,
        }
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The in-memory working copy, any state.
    pub fn document(&self) -> Option<&FinancialDocument> {
        self.document.as_ref()
    }

    fn records_for(&self, kind: DocumentKind) -> Records<FinancialDocument> {
        match kind {
            DocumentKind::Proforma => self.store.proformas(),
            DocumentKind::Invoice => self.store.invoices(),
            DocumentKind::Purchase => self.store.purchases(),
        }
    }

    fn ensure_can_begin(&self, operation: &'static str) -> SessionResult<()> {
        match self.state {
            SessionState::Idle | SessionState::Closed => Ok(()),
            state => Err(SessionError::invalid_state(operation, state)),
        }
    }

    // ------------------------------------------------------------------
    // Opening flows
    // ------------------------------------------------------------------

    /// Opens a new proforma: the reference is generated up front, checked
    /// against every reference already stored, and the session waits for
    /// a client.
    pub async fn begin_proforma(&mut self) -> SessionResult<&FinancialDocument> {
        self.ensure_can_begin("begin_proforma")?;

        let existing: Vec<String> = self
            .store
            .proformas()
            .get_all()
            .await?
            .into_iter()
            .map(|d| d.reference)
            .collect();
        let reference = reference::proforma_reference(Utc::now(), &existing);

        debug!(reference, "New proforma session");
        self.document = Some(FinancialDocument::new(
            DocumentKind::Proforma,
            reference,
            Utc::now(),
        ));
        self.state = SessionState::ClientSelection;
        Ok(self.document.as_ref().ok_or(SessionError::NoDocument)?)
    }

    /// Opens a new invoice; same flow as a proforma with a timestamp
    /// reference.
    pub async fn begin_invoice(&mut self) -> SessionResult<&FinancialDocument> {
        self.ensure_can_begin("begin_invoice")?;

        let reference = reference::invoice_reference(Utc::now());
        debug!(reference, "New invoice session");
        self.document = Some(FinancialDocument::new(
            DocumentKind::Invoice,
            reference,
            Utc::now(),
        ));
        self.state = SessionState::ClientSelection;
        Ok(self.document.as_ref().ok_or(SessionError::NoDocument)?)
    }

    /// Opens a new purchase with the supplier already bound: purchases
    /// start from a supplier page, so the counterparty-selection step is
    /// skipped and the session lands straight in Editing.
    pub async fn begin_purchase(
        &mut self,
        supplier: &Counterparty,
    ) -> SessionResult<&FinancialDocument> {
        self.ensure_can_begin("begin_purchase")?;

        let sequence = self.store.purchases().get_all().await?.len() as u32 + 1;
        let reference = reference::purchase_order_reference(Utc::now(), sequence);

        let mut doc = FinancialDocument::new(DocumentKind::Purchase, reference, Utc::now());
        doc.counterparty_id = supplier.id.clone();
        doc.counterparty_name = supplier.name.clone();

        debug!(reference = doc.reference, supplier = supplier.id, "New purchase session");
        self.document = Some(doc);
        self.state = SessionState::Editing;
        Ok(self.document.as_ref().ok_or(SessionError::NoDocument)?)
    }

    /// Opens an existing document for editing. The stored record is
    /// loaded verbatim, ledgers included; re-saving preserves its id.
    pub async fn begin_edit(
        &mut self,
        kind: DocumentKind,
        id: &str,
    ) -> SessionResult<&FinancialDocument> {
        self.ensure_can_begin("begin_edit")?;

        let doc = self.records_for(kind).get_by_id(id).await?;
        debug!(id, reference = doc.reference, "Edit session");
        self.document = Some(doc);
        self.state = SessionState::Editing;
        Ok(self.document.as_ref().ok_or(SessionError::NoDocument)?)
    }

    // ------------------------------------------------------------------
    // Counterparty selection
    // ------------------------------------------------------------------

    /// Binds an existing counterparty and moves to Editing.
    ///
    /// The name is denormalized onto the document as a snapshot; later
    /// edits to the counterparty record do not rewrite past documents.
    pub fn select_counterparty(&mut self, counterparty: &Counterparty) -> SessionResult<()> {
        if self.state != SessionState::ClientSelection {
            return Err(SessionError::invalid_state(
                "select_counterparty",
                self.state,
            ));
        }
        let doc = self.document.as_mut().ok_or(SessionError::NoDocument)?;
        doc.counterparty_id = counterparty.id.clone();
        doc.counterparty_name = counterparty.name.clone();
        self.state = SessionState::Editing;
        Ok(())
    }

    /// Creates a counterparty mid-flow and binds it in one step.
    ///
    /// A business id (CLI0001 / FRS0001 family) is assigned from the next
    /// free sequence when the record carries none.
    pub async fn create_and_select_counterparty(
        &mut self,
        mut counterparty: Counterparty,
    ) -> SessionResult<Counterparty> {
        if self.state != SessionState::ClientSelection {
            return Err(SessionError::invalid_state(
                "create_and_select_counterparty",
                self.state,
            ));
        }

        let records = match counterparty.kind {
            CounterpartyKind::Client => self.store.clients(),
            CounterpartyKind::Supplier => self.store.suppliers(),
        };
        if counterparty.id.is_empty() {
            let sequence = next_counterparty_sequence(&records.get_all().await?);
            counterparty.id = reference::counterparty_id(counterparty.kind, sequence);
        }

        let created = records.create(counterparty).await?;
        info!(id = created.id, name = created.name, "Counterparty created in-flow");
        self.select_counterparty(&created)?;
        Ok(created)
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Mutable access to the working copy, Editing state only.
    pub fn document_mut(&mut self) -> SessionResult<&mut FinancialDocument> {
        if self.state != SessionState::Editing {
            return Err(SessionError::invalid_state("document_mut", self.state));
        }
        self.document.as_mut().ok_or(SessionError::NoDocument)
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Persists the working copy and returns the refreshed collection.
    ///
    /// The derived totals are recomputed immediately before the write.
    /// A new document (empty id) is created; a loaded one is replaced
    /// under its stored id. On failure the session returns to Editing
    /// with the working copy intact so the user can retry; on success it
    /// enters the post-save hold.
    pub async fn submit(&mut self) -> SessionResult<Vec<FinancialDocument>> {
        if self.state != SessionState::Editing {
            return Err(SessionError::invalid_state("submit", self.state));
        }
        let mut doc = self.document.clone().ok_or(SessionError::NoDocument)?;
        self.state = SessionState::Submitting;

        doc.recompute();
        let records = self.records_for(doc.kind);
        let result = if doc.is_new() {
            records.create(doc).await
        } else {
            records.save(doc).await
        };

        match result {
            Ok(saved) => {
                info!(
                    id = saved.id,
                    reference = saved.reference,
                    total = saved.total_amount.units(),
                    "Document saved"
                );
                self.document = Some(saved);
                self.state = SessionState::PostSaveHold;
                Ok(records.get_all().await?)
            }
            Err(err) => {
                warn!(error = %err, "Document save failed; session stays editable");
                self.state = SessionState::Editing;
                Err(err.into())
            }
        }
    }

    // ------------------------------------------------------------------
    // Closing
    // ------------------------------------------------------------------

    /// Requests a close. Returns whether the session actually closed.
    ///
    /// During the post-save hold, implicit signals (outside click,
    /// escape) are ignored; only an explicit close ends the session and
    /// clears the document. While a submit is pending, any close is
    /// refused.
    pub fn request_close(&mut self, signal: CloseSignal) -> SessionResult<bool> {
        match self.state {
            SessionState::Submitting => {
                Err(SessionError::invalid_state("request_close", self.state))
            }
            SessionState::PostSaveHold => match signal {
                CloseSignal::Explicit => {
                    self.close();
                    Ok(true)
                }
                CloseSignal::Implicit => {
                    debug!("Implicit close ignored during post-save hold");
                    Ok(false)
                }
            },
            SessionState::Idle | SessionState::Closed => Ok(true),
            SessionState::ClientSelection | SessionState::Editing => {
                self.close();
                Ok(true)
            }
        }
    }

    fn close(&mut self) {
        self.document = None;
        self.state = SessionState::Closed;
    }
}

/// Next free sequence for a CLI/FRS business id, from the highest
/// numeric suffix already in use.
fn next_counterparty_sequence(existing: &[Counterparty]) -> u32 {
    existing
        .iter()
        .filter_map(|c| c.id.get(3..).and_then(|s| s.parse::<u32>().ok()))
        .max()
        .unwrap_or(0)
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: &str) -> Counterparty {
        Counterparty {
            id: id.to_string(),
            kind: CounterpartyKind::Client,
            name: "X".to_string(),
            phone: String::new(),
            email: None,
            address: None,
            balance: comptoir_core::Money::zero(),
            category: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_next_counterparty_sequence() {
        assert_eq!(next_counterparty_sequence(&[]), 1);
        let existing = vec![client("CLI0001"), client("CLI0007"), client("CLI0003")];
        assert_eq!(next_counterparty_sequence(&existing), 8);
        // Non-conforming ids (UUIDs from direct API creation) are skipped
        let mixed = vec![client("CLI0002"), client("6e1c...uuid")];
        assert_eq!(next_counterparty_sequence(&mixed), 3);
    }
}
