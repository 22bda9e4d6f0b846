//! Currency rate cache.
//!
//! Rates used to live in a bare module-level binding mutated by a fetch
//! callback; here the state is owned by [`CurrencyCache`], with an
//! explicit TTL checked against the injected clock and the fetch behind
//! the [`RateSource`] trait.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use marketplace_core::clock::Clock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum RateSourceError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch(&self) -> Result<HashMap<String, Decimal>, RateSourceError>;
    fn name(&self) -> &'static str;
}

/// Fetches rates from a JSON endpoint shaped `{"rates": {"USD": 1, ...}}`.
pub struct HttpRateSource {
    client: reqwest::Client,
    url: String,
}

impl HttpRateSource {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RatesPayload {
    rates: HashMap<String, Decimal>,
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch(&self) -> Result<HashMap<String, Decimal>, RateSourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| RateSourceError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RateSourceError::Connection(format!(
                "rates endpoint returned {}",
                response.status()
            )));
        }

        let payload: RatesPayload = response
            .json()
            .await
            .map_err(|e| RateSourceError::InvalidResponse(e.to_string()))?;

        Ok(payload.rates)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Fixed rate table for tests and deployments with no rates URL.
pub struct StaticRateSource {
    rates: HashMap<String, Decimal>,
}

impl StaticRateSource {
    pub fn new(rates: HashMap<String, Decimal>) -> Self {
        Self { rates }
    }

    /// USD-based defaults matching the storefront's supported currencies.
    pub fn with_defaults() -> Self {
        let rates = HashMap::from([
            ("USD".to_string(), Decimal::ONE),
            ("EUR".to_string(), Decimal::new(92, 2)),
            ("GBP".to_string(), Decimal::new(79, 2)),
            ("AED".to_string(), Decimal::new(367, 2)),
        ]);
        Self::new(rates)
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    async fn fetch(&self) -> Result<HashMap<String, Decimal>, RateSourceError> {
        Ok(self.rates.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// A rate table together with when it was fetched.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSnapshot {
    pub rates: HashMap<String, Decimal>,
    pub fetched_at: DateTime<Utc>,
}

/// Owns the current rate table. `get` serves the cached snapshot while it
/// is younger than the TTL; `refresh` always fetches.
pub struct CurrencyCache {
    source: Arc<dyn RateSource>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    state: RwLock<Option<RateSnapshot>>,
}

impl CurrencyCache {
    pub fn new(source: Arc<dyn RateSource>, clock: Arc<dyn Clock>, ttl_seconds: i64) -> Self {
        Self {
            source,
            clock,
            ttl: Duration::seconds(ttl_seconds),
            state: RwLock::new(None),
        }
    }

    pub async fn get(&self) -> Result<RateSnapshot, RateSourceError> {
        if let Some(snapshot) = self.state.read().await.as_ref() {
            if self.clock.now_utc() - snapshot.fetched_at < self.ttl {
                return Ok(snapshot.clone());
            }
        }
        self.refresh().await
    }

    pub async fn refresh(&self) -> Result<RateSnapshot, RateSourceError> {
        let rates = self.source.fetch().await?;
        let snapshot = RateSnapshot {
            rates,
            fetched_at: self.clock.now_utc(),
        };

        *self.state.write().await = Some(snapshot.clone());

        tracing::info!(
            source = self.source.name(),
            currencies = snapshot.rates.len(),
            "Currency rates refreshed"
        );

        Ok(snapshot)
    }
}
