use chrono::{
    Local,
    NaiveDateTime,
};

use tokio::time::sleep;
use tracing::{
    error,
    info,
    warn,
};

use crate::{
    config::CollectorConfig,
    extractor::extract_series,
    period::DateRange,
    retry::fetch_with_retry,
    shared_state::SharedState,
    storage::{
        SeriesKey,
        SeriesStore,
    },
    transport::{
        RateRequest,
        Transport,
    },
};



/// Walks the currency x period grid and stores every series the endpoint
/// delivers.
///
/// Work is strictly sequential, one request in flight at a time. A failure
/// never stops the run, it only skips the affected series.
pub struct Collector<T, S> {
    config: CollectorConfig,
    transport: T,
    store: S,
    clock: fn() -> NaiveDateTime,
}



/// Counts of what happened during a run.
///
/// `saved` - series written to storage.
/// `skipped` - responses that carried no usable series.
/// `failed` - series that could not be fetched or could not be stored.
/// `interrupted` - run was stopped by shutdown before the grid was finished.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
    pub interrupted: bool,
}



#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Saved,
    NoData,
    StoreFailed,
    FetchFailed,
    InvalidRange,
}



fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}



impl<T: Transport, S: SeriesStore> Collector<T, S> {
    pub fn new(config: CollectorConfig, transport: T, store: S) -> Self {
        Self {
            config,
            transport,
            store,
            clock: local_now,
        }
    }


    /// Replace the wall clock used to compute date ranges.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }


    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }


    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }


    /// Collect the whole grid.
    ///
    /// After every combination the endpoint answered, the collector pauses
    /// for `request_pause` so that the endpoint is not hammered. Combinations
    /// that could not be fetched at all move on immediately, the retry policy
    /// has already waited.
    pub async fn run(&self, shared_state: &SharedState) -> RunSummary {
        let mut summary = RunSummary::default();

        'grid: for currency in &self.config.currencies {
            info!(%currency, "processing currency");

            for period in &self.config.periods {
                if shared_state.is_shutting_down() {
                    warn!("shut down requested, stopping before {}/{}", currency, period);
                    summary.interrupted = true;
                    break 'grid;
                }

                let key = SeriesKey::new(*currency, *period);

                match self.collect_one(&key).await {
                    Outcome::Saved => summary.saved += 1,
                    Outcome::NoData => summary.skipped += 1,
                    Outcome::StoreFailed => summary.failed += 1,
                    Outcome::FetchFailed | Outcome::InvalidRange => {
                        summary.failed += 1;
                        continue;
                    }
                }

                info!("waiting for {:?} before the next request", self.config.request_pause);
                sleep(self.config.request_pause).await;
            }
        }

        info!(
            saved = summary.saved,
            skipped = summary.skipped,
            failed = summary.failed,
            interrupted = summary.interrupted,
            "collection finished"
        );

        summary
    }


    async fn collect_one(&self, key: &SeriesKey) -> Outcome {
        let Some(range) = DateRange::ending_at((self.clock)(), self.config.now_offset,
            key.period
        ) else {
            error!(series = %key, "date range out of calendar bounds, offset {}", self.config.now_offset);
            return Outcome::InvalidRange
        };
        let request = RateRequest::new(key.currency, &range);

        info!(series = %key, stdate = %request.stdate, endate = %request.endate, "processing");

        let body = match fetch_with_retry(&self.transport, &self.config.url, &request,
            &self.config.retry
        ).await {
            Ok(body) => body,
            Err(e) => {
                error!(series = %key, "failed to fetch data: {}", e);
                return Outcome::FetchFailed
            }
        };

        // Whatever was stored before for this key is kept as is.
        let points = match extract_series(&body, key.currency) {
            Ok(points) => points,
            Err(e) => {
                warn!(series = %key, "no valid data, skipping: {}", e);
                return Outcome::NoData
            }
        };

        if let Err(e) = self.store.save(key, &points).await {
            error!(series = %key, "could not store series: {}", e);
            return Outcome::StoreFailed
        }

        Outcome::Saved
    }
}
