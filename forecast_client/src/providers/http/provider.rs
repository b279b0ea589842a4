use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder,
    header::{self, HeaderMap, HeaderValue},
};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use shared_utils::env::optional_env_var;
use snafu::{ResultExt, ensure};
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::{ServiceConfig, TOKEN_ENV},
    errors::ServiceError,
    models::{
        analysis::AnalysisSnapshot,
        catalog::{Catalog, normalize_symbol},
        prediction::{PredictionRequest, PredictionResult},
    },
    providers::{
        CatalogService, ClientBuildSnafu, ClientInitError, ForecastService, InvalidBaseUrlSnafu,
        InvalidTokenSnafu, UnsupportedBaseUrlSnafu,
        http::{
            params::{ANALYZE, CATALOG, HEALTH, HISTORY, HistoryQuery, PREDICT},
            response::{CatalogResponse, HealthResponse, error_detail},
        },
    },
};

pub struct HttpForecastService {
    client: Client,
    base_url: Url,
    _token: Option<SecretString>,
}

impl HttpForecastService {
    /// Creates a client for the service described by `config`.
    ///
    /// Reads the optional bearer token from the `FORECAST_API_TOKEN`
    /// environment variable.
    pub fn new(config: &ServiceConfig) -> Result<Self, ClientInitError> {
        let token = optional_env_var(TOKEN_ENV).map(|t| SecretString::new(t.into()));
        Self::with_token(config, token)
    }

    pub fn with_token(
        config: &ServiceConfig,
        token: Option<SecretString>,
    ) -> Result<Self, ClientInitError> {
        let base_url = api_base(&config.base_url, &config.api_prefix)?;

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .context(InvalidTokenSnafu)?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url,
            _token: token,
        })
    }

    /// Root every endpoint path is appended to (base URL + API prefix).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `api_base` rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ServiceError> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = error_detail(&body);
            warn!(endpoint, status = status.as_u16(), %detail, "forecast service returned an error");
            return Err(ServiceError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| ServiceError::Decode { endpoint, source })
    }
}

/// Parses the configured base URL and appends the API prefix segments.
fn api_base(raw: &str, api_prefix: &str) -> Result<Url, ClientInitError> {
    let mut url = Url::parse(raw.trim()).context(InvalidBaseUrlSnafu { url: raw })?;
    ensure!(
        !url.cannot_be_a_base() && matches!(url.scheme(), "http" | "https"),
        UnsupportedBaseUrlSnafu { url: raw }
    );

    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty()
            .extend(api_prefix.split('/').filter(|s| !s.is_empty()));
    }
    Ok(url)
}

fn blank_symbol() -> ServiceError {
    ServiceError::Validation("symbol must not be blank".to_string())
}

#[async_trait]
impl ForecastService for HttpForecastService {
    async fn fetch_prediction(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, ServiceError> {
        if request.symbol.trim().is_empty() {
            return Err(blank_symbol());
        }

        let url = self.endpoint(&[PREDICT]);
        debug!(
            %url,
            symbol = %request.symbol,
            period = %request.period,
            days = request.prediction_days.get(),
            "requesting forecast"
        );

        let result: PredictionResult = self.send("predict", self.client.post(url).json(request)).await?;
        result
            .validate()
            .map_err(|source| ServiceError::Malformed {
                endpoint: "predict",
                source,
            })?;
        Ok(result)
    }

    async fn fetch_analysis(&self, symbol: &str) -> Result<AnalysisSnapshot, ServiceError> {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Err(blank_symbol());
        }

        let url = self.endpoint(&[ANALYZE, symbol.as_str()]);
        debug!(%url, %symbol, "requesting analysis");

        let snapshot: AnalysisSnapshot = self.send("analyze", self.client.get(url)).await?;
        snapshot
            .validate()
            .map_err(|source| ServiceError::Malformed {
                endpoint: "analyze",
                source,
            })?;
        Ok(snapshot)
    }

    async fn fetch_history(&self, limit: u32) -> Result<Vec<PredictionResult>, ServiceError> {
        let url = self.endpoint(&[HISTORY]);
        let query = HistoryQuery { limit };
        let results: Vec<PredictionResult> =
            self.send("history", self.client.get(url).query(&query)).await?;

        for result in &results {
            result
                .validate()
                .map_err(|source| ServiceError::Malformed {
                    endpoint: "history",
                    source,
                })?;
        }
        Ok(results)
    }

    async fn ping(&self) -> Result<String, ServiceError> {
        let health: HealthResponse = self
            .send("health", self.client.get(self.endpoint(&[HEALTH])))
            .await?;
        Ok(health.message)
    }
}

#[async_trait]
impl CatalogService for HttpForecastService {
    async fn fetch_catalog(&self) -> Result<Catalog, ServiceError> {
        let response: CatalogResponse = self
            .send("catalog", self.client.get(self.endpoint(&[CATALOG])))
            .await?;
        Ok(response.into())
    }
}
