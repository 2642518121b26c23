//! Casino REST API client
//!
//! Read access to bet history and stats plus bet placement. Transport and HTTP
//! failures are mapped onto [`ClientError`].

use crate::api::models::{BetRecord, BetRequest, BetResponse, PaginatedBets, StatsResponse};
use crate::config::ApiClientConfig;
use crate::errors::ClientError;
use reqwest::{header, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

#[derive(Clone, Debug)]
pub struct CasinoApiClient {
    base_url: String,
    lookup_window: u32,
    http: reqwest::Client,
}

impl CasinoApiClient {
    pub fn new(config: &ApiClientConfig) -> Result<Self, ClientError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ClientError::Request(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            lookup_window: config.lookup_window,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// GET /health, returns the body text
    pub async fn health_check(&self) -> Result<String, ClientError> {
        let response = self
            .http
            .get(self.url("/health"))
            .send()
            .await
            .map_err(map_transport_error)?;
        response.text().await.map_err(map_transport_error)
    }

    /// GET /v1/stats
    pub async fn get_stats(&self) -> Result<StatsResponse, ClientError> {
        self.send(self.http.get(self.url("/v1/stats"))).await
    }

    /// GET /v1/bets
    pub async fn get_bets(
        &self,
        limit: u32,
        offset: u32,
        wallet: Option<&str>,
    ) -> Result<PaginatedBets, ClientError> {
        let mut query = vec![
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        if let Some(wallet) = wallet {
            query.push(("wallet", wallet.to_string()));
        }
        self.send(self.http.get(self.url("/v1/bets")).query(&query)).await
    }

    /// POST /v1/bet
    pub async fn place_bet(&self, request: &BetRequest) -> Result<BetResponse, ClientError> {
        self.send(self.http.post(self.url("/v1/bet")).json(request)).await
    }

    /// Find a bet among the most recent `lookup_window` bets.
    ///
    /// The API has no single-bet lookup, so older bets are not found.
    pub async fn find_bet(&self, tx_hash: &str) -> Result<Option<BetRecord>, ClientError> {
        let page = self.get_bets(self.lookup_window, 0, None).await?;
        debug!(scanned = page.bets.len(), tx_hash, "searched recent bets");
        Ok(page.bets.into_iter().find(|bet| bet.tx_hash == tx_hash))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("casino API rate limit hit");
            return Err(ClientError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown Status")
                )
            } else {
                body
            };
            warn!(status = status.as_u16(), body = %message, "casino API request failed");
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn map_transport_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::Network(e)
    } else {
        ClientError::Request(e.to_string())
    }
}
