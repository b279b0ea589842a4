#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use forecast_client::{
    CatalogService, ForecastService, ServiceError,
    models::{
        analysis::{AnalysisSnapshot, MovingAverages, Recommendation},
        catalog::{Catalog, Instrument},
        prediction::{Indicators, ModelMetrics, PredictionRequest, PredictionResult},
    },
};

pub fn sample_prediction(symbol: &str) -> PredictionResult {
    PredictionResult {
        id: None,
        symbol: symbol.to_string(),
        dates: vec!["2024-05-01".into(), "2024-05-02".into(), "2024-05-03".into()],
        actual_prices: vec![100.0, 102.0, 101.0],
        prediction_dates: vec!["2024-05-06".into(), "2024-05-07".into()],
        predictions: vec![103.0, 105.0],
        indicators: Indicators {
            current_price: 101.0,
            ma_10: Some(100.2),
            ma_50: Some(102.4),
            ma_200: None,
            rsi: Some(48.2),
            macd: None,
            bb_upper: None,
            bb_lower: None,
            volume: Some(48_500_000.0),
        },
        metrics: ModelMetrics {
            accuracy: 98.5,
            mae: 1.5,
            rmse: 2.0,
            mse: 4.0,
        },
        info: None,
        timestamp: None,
    }
}

pub fn sample_analysis(symbol: &str) -> AnalysisSnapshot {
    AnalysisSnapshot {
        symbol: symbol.to_string(),
        current_price: 101.0,
        change: -1.0,
        change_percent: -0.98,
        volume: 48_500_000.0,
        market_cap: None,
        pe_ratio: None,
        moving_averages: MovingAverages {
            ma_10: 100.2,
            ma_50: 102.4,
            ma_200: None,
        },
        rsi: 48.2,
        recommendation: Recommendation::Hold,
    }
}

/// In-process stand-in for the forecast service.
///
/// Every symbol answers with the sample payloads unless configured otherwise.
#[derive(Default)]
pub struct FakeService {
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
    mismatched: HashSet<String>,
    empty: HashSet<String>,
    catalog_down: bool,
    pub catalog_calls: AtomicUsize,
    pub prediction_calls: AtomicUsize,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both calls for `symbol` take `delay` before answering.
    pub fn with_delay(mut self, symbol: &str, delay: Duration) -> Self {
        self.delays.insert(symbol.to_string(), delay);
        self
    }

    /// The analysis call for `symbol` fails with a 500.
    pub fn failing(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_string());
        self
    }

    /// The forecast for `symbol` has one more prediction than prediction dates.
    pub fn mismatched(mut self, symbol: &str) -> Self {
        self.mismatched.insert(symbol.to_string());
        self
    }

    /// The forecast for `symbol` has no actual or predicted points.
    pub fn empty(mut self, symbol: &str) -> Self {
        self.empty.insert(symbol.to_string());
        self
    }

    /// The catalog call fails with a 503.
    pub fn catalog_down(mut self) -> Self {
        self.catalog_down = true;
        self
    }

    async fn pause(&self, symbol: &str) {
        if let Some(delay) = self.delays.get(symbol) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl ForecastService for FakeService {
    async fn fetch_prediction(&self, request: &PredictionRequest) -> Result<PredictionResult, ServiceError> {
        self.prediction_calls.fetch_add(1, Ordering::SeqCst);
        self.pause(&request.symbol).await;
        let mut result = sample_prediction(&request.symbol);
        if self.mismatched.contains(&request.symbol) {
            result.predictions.push(107.0);
        }
        if self.empty.contains(&request.symbol) {
            result.dates.clear();
            result.actual_prices.clear();
            result.prediction_dates.clear();
            result.predictions.clear();
        }
        Ok(result)
    }

    async fn fetch_analysis(&self, symbol: &str) -> Result<AnalysisSnapshot, ServiceError> {
        self.pause(symbol).await;
        if self.failing.contains(symbol) {
            return Err(ServiceError::Api {
                status: 500,
                detail: format!("Error in analysis: No data found for symbol {symbol}"),
            });
        }
        Ok(sample_analysis(symbol))
    }

    async fn fetch_history(&self, _limit: u32) -> Result<Vec<PredictionResult>, ServiceError> {
        Ok(vec![sample_prediction("AAPL")])
    }

    async fn ping(&self) -> Result<String, ServiceError> {
        Ok("Stock Price Prediction API".to_string())
    }
}

#[async_trait]
impl CatalogService for FakeService {
    async fn fetch_catalog(&self) -> Result<Catalog, ServiceError> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        if self.catalog_down {
            return Err(ServiceError::Api {
                status: 503,
                detail: "catalog offline".into(),
            });
        }
        Ok(Catalog::from_instruments([
            Instrument {
                symbol: "AAPL".into(),
                name: "Apple Inc.".into(),
            },
            Instrument {
                symbol: "MSFT".into(),
                name: "Microsoft Corporation".into(),
            },
        ]))
    }
}
