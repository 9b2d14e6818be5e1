//! Per-document dispatch queue.
//!
//! One queue is built for each processed document, holding its allowed
//! phones and the rendered message. The operator walks the queue
//! sending or skipping entries; every transition keeps the selection
//! pointing at a live entry or closes the queue.

use tracing::{info, warn};

use crate::dispatch::sink::DispatchSink;
use crate::extract::rules::normalize_phone;

/// Lifecycle of a dispatch queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// Entries remain and the operator is working through them.
    Active,
    /// Every entry was sent or skipped.
    Empty,
    /// The operator walked away before the queue drained.
    Abandoned,
}

/// Interactive send/skip queue over one document's phones.
#[derive(Debug)]
pub struct DispatchQueue {
    pdf_name: String,
    message: String,
    pending: Vec<String>,
    selected: Option<usize>,
    sent: Vec<String>,
    skipped: Vec<String>,
    state: QueueState,
}

impl DispatchQueue {
    /// A queue with no phones is born already drained.
    pub fn new(pdf_name: impl Into<String>, message: impl Into<String>, phones: Vec<String>) -> Self {
        let state = if phones.is_empty() {
            QueueState::Empty
        } else {
            QueueState::Active
        };
        let selected = if phones.is_empty() { None } else { Some(0) };
        Self {
            pdf_name: pdf_name.into(),
            message: message.into(),
            pending: phones,
            selected,
            sent: Vec::new(),
            skipped: Vec::new(),
            state,
        }
    }

    pub fn state(&self) -> QueueState {
        self.state
    }

    pub fn pdf_name(&self) -> &str {
        &self.pdf_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Currently selected pending phone, if the queue is active.
    pub fn selected(&self) -> Option<(usize, &str)> {
        let index = self.selected?;
        self.pending.get(index).map(|p| (index, p.as_str()))
    }

    /// Move the selection. Out-of-range indices and closed queues are
    /// no-ops that report `false`.
    pub fn select(&mut self, index: usize) -> bool {
        if self.state != QueueState::Active || index >= self.pending.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Send the entry at `index` and drop it from the queue. Delivery
    /// failures are logged but the entry still counts as handled, so a
    /// flaky sink cannot wedge the queue.
    pub fn send(&mut self, index: usize, sink: &mut dyn DispatchSink) -> bool {
        if self.state != QueueState::Active || index >= self.pending.len() {
            return false;
        }
        let phone = self.pending.remove(index);
        let normalized = normalize_phone(&phone);
        match sink.send(&normalized, &self.message) {
            Ok(()) => info!(pdf = %self.pdf_name, phone = %normalized, "dispatched"),
            Err(err) => {
                warn!(pdf = %self.pdf_name, phone = %normalized, %err, "dispatch failed");
            }
        }
        self.sent.push(phone);
        self.settle();
        true
    }

    /// Drop the entry at `index` without sending.
    pub fn skip(&mut self, index: usize) -> bool {
        if self.state != QueueState::Active || index >= self.pending.len() {
            return false;
        }
        let phone = self.pending.remove(index);
        self.skipped.push(phone);
        self.settle();
        true
    }

    /// Send whatever is currently selected.
    pub fn send_selected(&mut self, sink: &mut dyn DispatchSink) -> bool {
        match self.selected {
            Some(index) => self.send(index, sink),
            None => false,
        }
    }

    /// Skip whatever is currently selected.
    pub fn skip_selected(&mut self) -> bool {
        match self.selected {
            Some(index) => self.skip(index),
            None => false,
        }
    }

    /// Close the queue with entries still pending. Safe to call in any
    /// state.
    pub fn abandon(&mut self) {
        if self.state == QueueState::Active {
            warn!(
                pdf = %self.pdf_name,
                remaining = self.pending.len(),
                "queue abandoned"
            );
            self.state = QueueState::Abandoned;
            self.selected = None;
        }
    }

    // After removal the selection either clamps to the last entry or
    // the queue drains.
    fn settle(&mut self) {
        if self.pending.is_empty() {
            self.state = QueueState::Empty;
            self.selected = None;
            return;
        }
        if let Some(index) = self.selected {
            if index >= self.pending.len() {
                self.selected = Some(self.pending.len() - 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DispatchError;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct RecordingSink {
        sent: Vec<(String, String)>,
        fail: bool,
    }

    impl DispatchSink for RecordingSink {
        fn send(&mut self, phone: &str, message: &str) -> Result<(), DispatchError> {
            if self.fail {
                return Err(DispatchError::Transport("connection reset".to_string()));
            }
            self.sent.push((phone.to_string(), message.to_string()));
            Ok(())
        }
    }

    fn queue() -> DispatchQueue {
        DispatchQueue::new(
            "romaneio.pdf",
            "Coleta ABC1234",
            vec![
                "11987654321".to_string(),
                "2140028922".to_string(),
                "1936518801".to_string(),
            ],
        )
    }

    #[test]
    fn empty_phone_list_starts_drained() {
        let queue = DispatchQueue::new("a.pdf", "msg", Vec::new());
        assert_eq!(queue.state(), QueueState::Empty);
        assert_eq!(queue.selected(), None);
    }

    #[test]
    fn send_normalizes_phone_and_advances() {
        let mut queue = queue();
        let mut sink = RecordingSink::default();
        assert!(queue.send_selected(&mut sink));
        assert_eq!(
            sink.sent,
            vec![("5511987654321".to_string(), "Coleta ABC1234".to_string())]
        );
        assert_eq!(queue.sent(), ["11987654321"]);
        assert_eq!(queue.selected(), Some((0, "2140028922")));
        assert_eq!(queue.state(), QueueState::Active);
    }

    #[test]
    fn sink_failure_still_consumes_the_entry() {
        let mut queue = queue();
        let mut sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        assert!(queue.send_selected(&mut sink));
        assert_eq!(queue.sent(), ["11987654321"]);
        assert_eq!(queue.pending().len(), 2);
    }

    #[test]
    fn selection_clamps_when_last_entry_is_removed() {
        let mut queue = queue();
        assert!(queue.select(2));
        assert!(queue.skip_selected());
        // index 2 no longer exists; selection clamps to the new tail
        assert_eq!(queue.selected(), Some((1, "2140028922")));
    }

    #[test]
    fn draining_the_queue_empties_it() {
        let mut queue = queue();
        let mut sink = RecordingSink::default();
        assert!(queue.skip(0));
        assert!(queue.send(0, &mut sink));
        assert!(queue.send(0, &mut sink));
        assert_eq!(queue.state(), QueueState::Empty);
        assert_eq!(queue.selected(), None);
        assert_eq!(queue.skipped(), ["11987654321"]);
        assert_eq!(queue.sent(), ["2140028922", "1936518801"]);
    }

    #[test]
    fn send_at_middle_index_then_abandon_leaves_the_rest_pending() {
        let mut queue = queue();
        let mut sink = RecordingSink::default();
        assert!(queue.send(1, &mut sink));
        assert_eq!(queue.pending(), ["11987654321", "1936518801"]);
        assert_eq!(queue.sent(), ["2140028922"]);

        queue.abandon();
        queue.abandon();
        assert_eq!(queue.state(), QueueState::Abandoned);
        // the untouched entries stay pending, neither sent nor skipped
        assert_eq!(queue.pending(), ["11987654321", "1936518801"]);
        assert_eq!(queue.sent(), ["2140028922"]);
        assert!(queue.skipped().is_empty());
    }

    #[test]
    fn invalid_operations_are_noops() {
        let mut queue = queue();
        let mut sink = RecordingSink::default();
        assert!(!queue.select(3));
        assert!(!queue.send(99, &mut sink));
        assert!(!queue.skip(99));
        assert_eq!(queue.pending().len(), 3);
        assert!(sink.sent.is_empty());

        queue.abandon();
        assert_eq!(queue.state(), QueueState::Abandoned);
        assert!(!queue.send(0, &mut sink));
        assert!(!queue.skip(0));
        assert!(!queue.select(0));
    }

    #[test]
    fn abandon_is_idempotent_and_keeps_terminal_state() {
        let mut queue = DispatchQueue::new("a.pdf", "msg", Vec::new());
        queue.abandon();
        assert_eq!(queue.state(), QueueState::Empty);

        let mut active = queue_with_one();
        active.abandon();
        active.abandon();
        assert_eq!(active.state(), QueueState::Abandoned);
    }

    fn queue_with_one() -> DispatchQueue {
        DispatchQueue::new("a.pdf", "msg", vec!["11987654321".to_string()])
    }
}
