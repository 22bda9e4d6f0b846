//! Renewal lifecycle model.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a company entitlement, classified from the number of
/// days remaining until its renewal date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenewalStatus {
    Active,
    RenewalRequired,
    Expired,
    Cancelled,
}

impl RenewalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenewalStatus::Active => "active",
            RenewalStatus::RenewalRequired => "renewal-required",
            RenewalStatus::Expired => "expired",
            RenewalStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "renewal-required" => RenewalStatus::RenewalRequired,
            "expired" => RenewalStatus::Expired,
            "cancelled" => RenewalStatus::Cancelled,
            _ => RenewalStatus::Active,
        }
    }
}

/// Which enablement rule the renew button follows.
///
/// The shipped front end tests `days >= 15 && days >= -25`, where the second
/// clause can never fire; `Windowed` is the rule that condition was evidently
/// meant to express. Selected via `RENEWAL_BUTTON_RULE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonRule {
    Legacy,
    Windowed,
}

impl ButtonRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonRule::Legacy => "legacy",
            ButtonRule::Windowed => "windowed",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "windowed" => ButtonRule::Windowed,
            _ => ButtonRule::Legacy,
        }
    }
}

/// Renew-button rendering state. Both fields are derived from the same rule,
/// so they always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonState {
    pub is_visible: bool,
    pub is_enabled: bool,
}
