use marketplace_core::config as core_config;
use marketplace_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub rates: RatesConfig,
}

#[derive(Debug, Clone)]
pub struct RatesConfig {
    /// Rates endpoint; the static in-process table is used when unset.
    pub url: Option<String>,
    pub ttl_seconds: i64,
}

impl PricingConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let common = core_config::Config::load()?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let rates_url = env::var("PRICING_RATES_URL").ok().filter(|u| !u.is_empty());
        let rates_ttl_seconds = env::var("PRICING_RATES_TTL_SECONDS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .unwrap_or(300);

        Ok(Self {
            common,
            service_name: "pricing-service".to_string(),
            log_level,
            rates: RatesConfig {
                url: rates_url,
                ttl_seconds: rates_ttl_seconds,
            },
        })
    }
}
