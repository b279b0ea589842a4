//! The dashboard's single piece of mutable state.
//!
//! A [`ViewState`] is built once per successful fetch and never modified.
//! [`ViewStore`] holds the current one behind an `arc-swap` cell: readers
//! take a cheap snapshot, writers swap in a whole new state. Each fetch is
//! stamped with a [`Generation`] when it starts, and a state is only
//! published if no newer fetch has already published, so a slow early
//! response can never overwrite a fast later one.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use forecast_client::models::{
    analysis::AnalysisSnapshot,
    prediction::{PredictionRequest, PredictionResult},
};
use serde::Serialize;

use crate::{dashboard::FetchError, display::DisplayMetrics, series::DrawableSequence};

/// Monotonic fetch token issued by [`ViewStore::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Generation(u64);

impl Generation {
    /// Raw counter value; the first fetch is 1.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything shown after one successful combined fetch.
#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    /// Fetch that produced this state.
    pub generation: Generation,
    /// What was asked for.
    pub request: PredictionRequest,
    /// Forecast payload.
    pub prediction: PredictionResult,
    /// Analysis payload.
    pub analysis: AnalysisSnapshot,
    /// Merged chart input.
    pub sequence: DrawableSequence,
    /// Card and insight figures.
    pub metrics: DisplayMetrics,
    /// When both responses had arrived.
    pub fetched_at: DateTime<Utc>,
}

impl ViewState {
    /// Runs the merge and metric derivation over a fetched pair.
    ///
    /// A forecast with no points in either group has nothing to draw and is
    /// rejected as [`FetchError::EmptyForecast`].
    pub fn build(
        generation: Generation,
        request: PredictionRequest,
        prediction: PredictionResult,
        analysis: AnalysisSnapshot,
    ) -> Result<Self, FetchError> {
        let sequence = DrawableSequence::from_prediction(&prediction)?;
        if sequence.is_empty() {
            return Err(FetchError::EmptyForecast {
                symbol: prediction.symbol,
            });
        }
        let metrics = DisplayMetrics::derive(&analysis, &prediction);
        Ok(Self {
            generation,
            request,
            prediction,
            analysis,
            sequence,
            metrics,
            fetched_at: Utc::now(),
        })
    }

    /// Chart heading, e.g. `AAPL Price Prediction`.
    pub fn chart_title(&self) -> String {
        format!("{} Price Prediction", self.prediction.symbol)
    }
}

/// Result of [`ViewStore::publish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The state is now current.
    Applied,
    /// A newer fetch had already published; the state was dropped.
    Superseded {
        /// Generation that stays current.
        current: Generation,
    },
}

/// Holder of the current [`ViewState`].
#[derive(Debug, Default)]
pub struct ViewStore {
    current: ArcSwapOption<ViewState>,
    issued: AtomicU64,
}

impl ViewStore {
    /// An empty store; nothing is shown until the first publish.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the token for a fetch that is about to start.
    pub fn begin(&self) -> Generation {
        Generation(self.issued.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Makes `state` current unless a newer (or the same) generation is already published.
    pub fn publish(&self, state: Arc<ViewState>) -> PublishOutcome {
        let generation = state.generation;
        let previous = self.current.rcu(|current| match current {
            Some(cur) if cur.generation >= generation => Some(Arc::clone(cur)),
            _ => Some(Arc::clone(&state)),
        });

        match previous {
            Some(prev) if prev.generation >= generation => PublishOutcome::Superseded {
                current: prev.generation,
            },
            _ => PublishOutcome::Applied,
        }
    }

    /// The current state, if any fetch has succeeded.
    pub fn snapshot(&self) -> Option<Arc<ViewState>> {
        self.current.load_full()
    }
}
