//! One forecast query for one location.
//!
//! A session moves `idle → loading → ready | error`; a fresh [`start`]
//! always resets to loading, overwriting whatever the previous query left
//! behind. The raw series stays as received; [`snapshots`] reduces it to at
//! most five representative entries on demand.
//!
//! [`start`]: ForecastSession::start
//! [`snapshots`]: ForecastSession::snapshots

use tracing::warn;

use crate::model::ForecastEntry;
use crate::remote::ForecastApi;

/// Indices of the daily snapshots within the 3-hourly series: the first
/// entry, then the same time-of-day on each of the next four days
/// (8 entries per day).
pub const SNAPSHOT_INDICES: [usize; 5] = [0, 8, 16, 24, 32];

const FETCH_ERROR_MESSAGE: &str = "Error fetching weather data. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

#[derive(Debug)]
pub struct ForecastSession {
    api: Box<dyn ForecastApi>,
    status: SessionStatus,
    raw_series: Vec<ForecastEntry>,
    error_message: Option<String>,
}

impl ForecastSession {
    pub fn new(api: Box<dyn ForecastApi>) -> Self {
        Self { api, status: SessionStatus::Idle, raw_series: Vec::new(), error_message: None }
    }

    /// Query the forecast endpoint for `location`.
    ///
    /// The previous query's series and error are cleared before the request
    /// goes out, so a failed session never shows another location's data.
    /// A blank location is ignored.
    pub async fn start(&mut self, location: &str) {
        let location = location.trim();
        if location.is_empty() {
            return;
        }

        self.status = SessionStatus::Loading;
        self.raw_series.clear();
        self.error_message = None;

        match self.api.fetch_series(location).await {
            Ok(series) => {
                self.raw_series = series;
                self.status = SessionStatus::Ready;
            }
            Err(err) => {
                warn!("forecast fetch for {location:?} failed: {err}");
                self.status = SessionStatus::Error;
                self.error_message = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// At most five representative entries of the raw series, in series
    /// order. Empty unless the session is ready. A series shorter than five
    /// days yields fewer snapshots; nothing is padded or extrapolated.
    pub fn snapshots(&self) -> Vec<&ForecastEntry> {
        if self.status != SessionStatus::Ready {
            return Vec::new();
        }

        SNAPSHOT_INDICES.iter().filter_map(|&index| self.raw_series.get(index)).collect()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn raw_series(&self) -> &[ForecastEntry] {
        &self.raw_series
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}
