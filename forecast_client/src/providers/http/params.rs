use serde::{Deserialize, Serialize};

/// Page size the dashboard asks for when listing past forecasts.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Query string of the history endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub limit: u32,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

// Endpoint names double as path segments under the API prefix.
pub(crate) const HEALTH: &str = "";
pub(crate) const CATALOG: &str = "popular-stocks";
pub(crate) const PREDICT: &str = "predict";
pub(crate) const ANALYZE: &str = "analyze";
pub(crate) const HISTORY: &str = "predictions";
