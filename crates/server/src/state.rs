use std::sync::Arc;

use chrono::NaiveDate;
use moviepick_catalog::Aggregator;

/// Source of "today" for the daily pick.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Aggregator,
    pub clock: Clock,
}

impl AppState {
    /// State using the server's local calendar date.
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator,
            clock: Arc::new(|| chrono::Local::now().date_naive()),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }
}
