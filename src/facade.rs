//! Interactive input binding.
//!
//! [`SmartInput`] sits between a UI text field and the parse pipeline. The
//! field calls [`SmartInput::update`] on every keystroke; the binding
//! debounces, parses, and publishes an [`InputSnapshot`] over a `watch`
//! channel that the UI subscribes to for live tag highlighting.
//!
//! Supersession, not cancellation: every update takes the next value of a
//! monotonically increasing sequence number, and a parse result is published
//! only while its sequence number is still the latest. A stale computation
//! may run to completion, but its result is dropped at publish time, so an
//! older call can never override a newer one.
//!
//! The binding never panics toward the caller: recognizer faults arrive as
//! `result.error` in the published snapshot (see the pipeline's fault
//! isolation), and short inputs publish an empty result immediately.
//!
//! [`SmartInput::update`] spawns onto the ambient tokio runtime; the library
//! never owns a runtime of its own.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;

use crate::api::{Context, Options, ParseResult, parse_with};

/// Tunables for the interactive binding.
#[derive(Debug, Clone)]
pub struct SmartInputConfig {
    /// Quiet period after the last keystroke before a parse runs.
    pub debounce: Duration,
    /// Inputs shorter than this (in chars, after trimming) skip parsing and
    /// publish an empty result immediately.
    pub min_input_len: usize,
}

impl Default for SmartInputConfig {
    fn default() -> Self {
        Self { debounce: Duration::from_millis(100), min_input_len: 2 }
    }
}

/// What the UI sees: the latest result plus the pending-parse flag.
#[derive(Debug, Clone)]
pub struct InputSnapshot {
    pub result: ParseResult,
    /// True while a debounced parse is pending; the previous result stays
    /// visible until the new one lands.
    pub is_loading: bool,
    /// Sequence number of the update that produced `result`.
    pub seq: u64,
}

/// Debounced, last-call-wins front end over [`parse_with`].
pub struct SmartInput {
    config: SmartInputConfig,
    seq: Arc<AtomicU64>,
    tx: watch::Sender<InputSnapshot>,
    context_source: Arc<dyn Fn() -> Context + Send + Sync>,
}

impl SmartInput {
    /// Binding with the default context source (local clock at parse time).
    pub fn new(config: SmartInputConfig) -> Self {
        Self::with_context_source(config, Context::default)
    }

    /// Binding with an explicit anchor source. Tests pass a pinned context;
    /// hosts can pass a frozen "form opened at" instant.
    pub fn with_context_source(
        config: SmartInputConfig,
        context_source: impl Fn() -> Context + Send + Sync + 'static,
    ) -> Self {
        let initial = InputSnapshot { result: empty_result(""), is_loading: false, seq: 0 };
        let (tx, _rx) = watch::channel(initial);
        Self { config, seq: Arc::new(AtomicU64::new(0)), tx, context_source: Arc::new(context_source) }
    }

    /// Subscribe to published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<InputSnapshot> {
        self.tx.subscribe()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> InputSnapshot {
        self.tx.borrow().clone()
    }

    /// Feed the current text value. Must be called inside a tokio runtime.
    pub fn update(&self, text: impl Into<String>) {
        let text = text.into();
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        if text.trim().chars().count() < self.config.min_input_len {
            // Nothing to parse; publish immediately. Bumping `seq` above
            // already invalidated any in-flight parse of older text.
            let result = empty_result(&text);
            self.tx.send_modify(|snap| *snap = InputSnapshot { result, is_loading: false, seq });
            return;
        }

        self.tx.send_modify(|snap| snap.is_loading = true);

        let debounce = self.config.debounce;
        let seq_counter = Arc::clone(&self.seq);
        let context_source = Arc::clone(&self.context_source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if seq_counter.load(Ordering::SeqCst) != seq {
                // Superseded while debouncing.
                return;
            }

            let context = context_source();
            let result = parse_with(&text, &context, &Options::default());
            if let Some(error) = &result.error {
                log::warn!("parse completed with error: {error}");
            }

            let published = tx.send_if_modified(|snap| {
                // Re-check under the channel lock: last call wins.
                if seq_counter.load(Ordering::SeqCst) == seq {
                    *snap = InputSnapshot { result, is_loading: false, seq };
                    true
                } else {
                    false
                }
            });
            if !published {
                log::trace!("discarded stale parse result (seq {seq})");
            }
        });
    }
}

impl std::fmt::Debug for SmartInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartInput")
            .field("config", &self.config)
            .field("seq", &self.seq.load(Ordering::SeqCst))
            .finish()
    }
}

/// An empty result still carries a usable title: the trimmed raw input.
fn empty_result(text: &str) -> ParseResult {
    ParseResult {
        clean_title: text.split_whitespace().collect::<Vec<_>>().join(" "),
        tags: Vec::new(),
        confidence: 1.0,
        conflicts: Vec::new(),
        error: None,
    }
}
