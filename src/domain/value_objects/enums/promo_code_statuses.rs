use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Status of a promo code at a given instant. Only `Inactive` is persisted
/// (as `is_active = false`); the others are derived from the clock and the
/// usage counter.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PromoCodeStatus {
    #[default]
    Active,
    Inactive,
    Expired,
    UsageExceeded,
}

impl Display for PromoCodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            PromoCodeStatus::Active => "active",
            PromoCodeStatus::Inactive => "inactive",
            PromoCodeStatus::Expired => "expired",
            PromoCodeStatus::UsageExceeded => "usage_exceeded",
        };
        write!(f, "{}", status)
    }
}
