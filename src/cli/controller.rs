//! Single owner of the dashboard refresh lifecycle: which events start a
//! refresh, what state the screen is in, and which of several overlapping
//! in-flight fetches is allowed to commit its result.

use std::time::{Duration, Instant};

use crate::core::market::MarketEnvelope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Startup,
    Manual,
    CurrencyChange,
    Timer,
    Resize,
}

/// Exactly one logical state at a time; mutated only by the controller,
/// read only by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshState {
    Idle,
    Loading,
    Populated {
        envelope: MarketEnvelope,
        currency: String,
    },
    Failed {
        message: String,
    },
}

/// Tag handed to an in-flight fetch. The currency is captured at issue
/// time; the generation lets late completions be matched against newer
/// refreshes.
#[derive(Debug, Clone)]
pub struct RefreshTicket {
    pub generation: u64,
    pub currency: String,
}

pub struct RefreshController {
    state: RefreshState,
    currencies: Vec<String>,
    selected: usize,
    issued_generation: u64,
    committed_generation: u64,
}

impl RefreshController {
    pub fn new(currencies: Vec<String>) -> Self {
        let currencies = if currencies.is_empty() {
            vec!["usd".to_string()]
        } else {
            currencies
        };
        RefreshController {
            state: RefreshState::Idle,
            currencies,
            selected: 0,
            issued_generation: 0,
            committed_generation: 0,
        }
    }

    pub fn state(&self) -> &RefreshState {
        &self.state
    }

    pub fn currency(&self) -> &str {
        &self.currencies[self.selected]
    }

    pub fn cycle_currency(&mut self) -> &str {
        self.selected = (self.selected + 1) % self.currencies.len();
        self.currency()
    }

    /// Moves to `Loading` and issues a ticket for the fetch. The caller
    /// must render the placeholder frame before starting the network call
    /// so stale data is never on screen while a load is outstanding.
    pub fn begin_refresh(&mut self, _trigger: RefreshTrigger) -> RefreshTicket {
        self.issued_generation += 1;
        self.state = RefreshState::Loading;
        RefreshTicket {
            generation: self.issued_generation,
            currency: self.currency().to_string(),
        }
    }

    /// Commits a successful fetch. Returns false when a newer refresh has
    /// already committed; the stale envelope is dropped unrendered.
    pub fn commit_success(&mut self, ticket: &RefreshTicket, envelope: MarketEnvelope) -> bool {
        if ticket.generation < self.committed_generation {
            return false;
        }
        self.committed_generation = ticket.generation;
        self.state = RefreshState::Populated {
            envelope,
            currency: ticket.currency.clone(),
        };
        true
    }

    /// Commits a failed fetch under the same staleness rule.
    pub fn commit_failure(&mut self, ticket: &RefreshTicket, message: String) -> bool {
        if ticket.generation < self.committed_generation {
            return false;
        }
        self.committed_generation = ticket.generation;
        self.state = RefreshState::Failed { message };
        true
    }
}

/// Collapses a burst of events into a single firing once a fixed quiet
/// period has passed since the last event.
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Debouncer {
            quiet,
            deadline: None,
        }
    }

    /// Records an event, pushing the deadline out to `now + quiet`.
    pub fn record(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fires at most once per burst: true only when armed and the quiet
    /// period has elapsed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
