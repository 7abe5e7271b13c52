use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::promo_codes::{InsertPromoCodeEntity, PromoCodeEntity},
    value_objects::{
        enums::{promo_code_statuses::PromoCodeStatus, promo_types::PromoType},
        pricing::PricingBreakdown,
    },
};

pub const MIN_CODE_LEN: usize = 3;
pub const MAX_CODE_LEN: usize = 32;

/// Codes are matched case-insensitively by storing and looking them up in
/// upper case.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

pub fn is_well_formed_code(code: &str) -> bool {
    (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&code.len())
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromoCodeModel {
    pub id: Uuid,
    pub code: String,
    pub promo_type: PromoType,
    pub value: i64,
    pub duration_months: Option<i32>,
    pub max_uses: Option<i32>,
    pub current_uses: i32,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub status: PromoCodeStatus,
    pub created_at: DateTime<Utc>,
}

impl PromoCodeModel {
    pub fn from_entity(entity: PromoCodeEntity, now: DateTime<Utc>) -> Result<Self> {
        let promo_type = entity.promo_type()?;
        let status = entity.status_at(now);

        Ok(Self {
            id: entity.id,
            code: entity.code,
            promo_type,
            value: entity.value,
            duration_months: entity.duration_months,
            max_uses: entity.max_uses,
            current_uses: entity.current_uses,
            valid_from: entity.valid_from,
            valid_until: entity.valid_until,
            is_active: entity.is_active,
            status,
            created_at: entity.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertPromoCodeModel {
    pub code: String,
    pub promo_type: PromoType,
    pub value: i64,
    #[serde(default)]
    pub duration_months: Option<i32>,
    #[serde(default)]
    pub max_uses: Option<i32>,
    #[serde(default)]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl InsertPromoCodeModel {
    /// `valid_from` falls back to `now` when the admin did not set one.
    pub fn to_entity(&self, now: DateTime<Utc>) -> InsertPromoCodeEntity {
        InsertPromoCodeEntity {
            code: normalize_code(&self.code),
            promo_type: self.promo_type.to_string(),
            value: self.value,
            duration_months: self.duration_months,
            max_uses: self.max_uses,
            valid_from: self.valid_from.unwrap_or(now),
            valid_until: self.valid_until,
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatePromoModel {
    pub code: String,
    pub base_price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromoValidationModel {
    pub promo: PromoCodeModel,
    pub base_price: i64,
    pub discount_amount: i64,
    pub final_price: i64,
}

impl PromoValidationModel {
    pub fn new(promo: PromoCodeModel, pricing: PricingBreakdown) -> Self {
        Self {
            promo,
            base_price: pricing.base_price,
            discount_amount: pricing.discount_amount,
            final_price: pricing.final_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(normalize_code("  save20 "), "SAVE20");
        assert_eq!(normalize_code("Diwali-Sale_2026"), "DIWALI-SALE_2026");
    }

    #[test]
    fn well_formed_codes() {
        assert!(is_well_formed_code("SAVE20"));
        assert!(is_well_formed_code("NEW-YEAR_26"));
        assert!(!is_well_formed_code("AB"));
        assert!(!is_well_formed_code("save20"));
        assert!(!is_well_formed_code("SAVE 20"));
        assert!(!is_well_formed_code(&"A".repeat(MAX_CODE_LEN + 1)));
    }

    #[test]
    fn insert_model_defaults() {
        let now = Utc::now();
        let model: InsertPromoCodeModel = serde_json::from_value(serde_json::json!({
            "code": "welcome",
            "promo_type": "flat",
            "value": 5000
        }))
        .unwrap();

        let entity = model.to_entity(now);
        assert_eq!(entity.code, "WELCOME");
        assert_eq!(entity.promo_type, "flat");
        assert_eq!(entity.valid_from, now);
        assert_eq!(entity.created_at, now);
        assert_eq!(entity.updated_at, now);
        assert!(entity.is_active);
        assert_eq!(entity.max_uses, None);
    }
}
