use crate::models::ButtonRule;
use marketplace_core::config as core_config;
use marketplace_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct RenewalConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    /// Which enablement rule the renew button follows; `legacy` reproduces
    /// the shipped behavior.
    pub button_rule: ButtonRule,
}

impl RenewalConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let common = core_config::Config::load()?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let button_rule = ButtonRule::from_string(
            &env::var("RENEWAL_BUTTON_RULE").unwrap_or_else(|_| "legacy".to_string()),
        );

        Ok(Self {
            common,
            service_name: "renewal-service".to_string(),
            log_level,
            button_rule,
        })
    }
}
