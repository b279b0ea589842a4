//! Fetch orchestration.
//!
//! [`Dashboard::refresh`] is the only writer of view state. It issues the
//! forecast and analysis requests together, and only when both succeed does
//! it merge, derive and publish. Any failure leaves the previously published
//! state in place.

use std::sync::Arc;

use forecast_client::{
    CatalogService, ForecastService, ServiceError,
    models::{catalog::Catalog, prediction::PredictionRequest},
};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::{
    series::MalformedSeries,
    view_state::{PublishOutcome, ViewState, ViewStore},
};

/// What every failed fetch tells the user.
pub const FETCH_FAILED_MESSAGE: &str = "Error fetching prediction. Please try again.";

/// A combined fetch did not produce a usable view.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A request failed, or the service broke its payload contract.
    #[error(transparent)]
    Network(#[from] ServiceError),

    /// The forecast's series could not be merged.
    #[error(transparent)]
    Malformed(#[from] MalformedSeries),

    /// The forecast carried no actual or predicted points.
    #[error("forecast for {symbol} has no price points")]
    EmptyForecast {
        /// Instrument that came back empty.
        symbol: String,
    },
}

impl FetchError {
    /// Text to show instead of the chart.
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }

    /// Whether the underlying request ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(err) if err.is_timeout())
    }
}

/// Result of a successful [`Dashboard::refresh`].
#[derive(Debug, Clone)]
pub struct Refresh {
    /// The state this fetch produced.
    pub state: Arc<ViewState>,
    /// Whether it became current.
    pub outcome: PublishOutcome,
}

/// Owns the service handles and the view store.
pub struct Dashboard {
    forecast: Arc<dyn ForecastService>,
    catalog_service: Arc<dyn CatalogService>,
    catalog: OnceCell<Catalog>,
    store: ViewStore,
}

impl Dashboard {
    /// A dashboard with nothing fetched yet.
    pub fn new(forecast: Arc<dyn ForecastService>, catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            forecast,
            catalog_service,
            catalog: OnceCell::new(),
            store: ViewStore::new(),
        }
    }

    /// Selectable instruments, fetched on first use and cached for the session.
    pub async fn load_catalog(&self) -> Result<&Catalog, ServiceError> {
        self.catalog
            .get_or_try_init(|| async {
                let catalog = self.catalog_service.fetch_catalog().await?;
                info!(instruments = catalog.len(), "catalog loaded");
                Ok(catalog)
            })
            .await
    }

    /// Whether `symbol` is listed in the catalog.
    ///
    /// `None` when the catalog could not be fetched; the failure is logged and
    /// the next call tries again.
    pub async fn is_listed(&self, symbol: &str) -> Option<bool> {
        match self.load_catalog().await {
            Ok(catalog) => Some(catalog.contains(symbol)),
            Err(err) => {
                warn!(error = %err, "catalog unavailable");
                None
            }
        }
    }

    /// Fetches forecast and analysis for `request` and publishes the result.
    pub async fn refresh(&self, request: PredictionRequest) -> Result<Refresh, FetchError> {
        let generation = self.store.begin();
        info!(
            %generation,
            symbol = %request.symbol,
            period = %request.period,
            days = request.prediction_days.get(),
            "fetching forecast"
        );

        let (prediction, analysis) = tokio::try_join!(
            self.forecast.fetch_prediction(&request),
            self.forecast.fetch_analysis(&request.symbol)
        )
        .inspect_err(|err| warn!(%generation, error = %err, "fetch failed; keeping previous view"))?;

        let state = ViewState::build(generation, request, prediction, analysis)
            .inspect_err(|err| warn!(%generation, error = %err, "dropping unusable forecast"))?;
        let state = Arc::new(state);

        let outcome = self.store.publish(Arc::clone(&state));
        match outcome {
            PublishOutcome::Applied => info!(
                %generation,
                points = state.sequence.len(),
                actual = state.sequence.actual_len(),
                "view updated"
            ),
            PublishOutcome::Superseded { current } => {
                info!(%generation, %current, "discarding superseded forecast")
            }
        }

        Ok(Refresh { state, outcome })
    }

    /// The current view, if any fetch has succeeded.
    pub fn view(&self) -> Option<Arc<ViewState>> {
        self.store.snapshot()
    }
}
