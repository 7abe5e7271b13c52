use anyhow::{Context, Result};
use chrono::{DateTime, Months, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::value_objects::enums::{
        promo_code_statuses::PromoCodeStatus, promo_types::PromoType,
    },
    infrastructure::postgres::schema::promo_codes,
};

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = promo_codes)]
pub struct PromoCodeEntity {
    pub id: Uuid,
    pub code: String,
    pub promo_type: String,
    pub value: i64,
    pub duration_months: Option<i32>,
    pub max_uses: Option<i32>,
    pub current_uses: i32,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PromoCodeEntity {
    pub fn promo_type(&self) -> Result<PromoType> {
        self.promo_type
            .parse()
            .with_context(|| format!("promo code {} has a corrupt type", self.code))
    }

    pub fn is_within_window(&self, now: DateTime<Utc>) -> bool {
        if now < self.valid_from {
            return false;
        }
        match self.valid_until {
            Some(valid_until) => now <= valid_until,
            None => true,
        }
    }

    pub fn has_remaining_uses(&self) -> bool {
        match self.max_uses {
            Some(max_uses) => self.current_uses < max_uses,
            None => true,
        }
    }

    /// Expiry is checked before `is_active`: a code past its window reports
    /// `Expired` even when it was also deactivated.
    pub fn status_at(&self, now: DateTime<Utc>) -> PromoCodeStatus {
        if !self.is_within_window(now) {
            PromoCodeStatus::Expired
        } else if !self.is_active {
            PromoCodeStatus::Inactive
        } else if !self.has_remaining_uses() {
            PromoCodeStatus::UsageExceeded
        } else {
            PromoCodeStatus::Active
        }
    }

    /// Calendar-month end of the benefit granted by a redemption at
    /// `redeemed_at`. `None` means open-ended.
    pub fn effective_until_from(&self, redeemed_at: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
        let Some(duration_months) = self.duration_months else {
            return Ok(None);
        };

        let months = u32::try_from(duration_months)
            .with_context(|| format!("negative duration_months on promo code {}", self.code))?;

        redeemed_at
            .checked_add_months(Months::new(months))
            .map(Some)
            .context("failed to compute redemption effective_until")
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = promo_codes)]
pub struct InsertPromoCodeEntity {
    pub code: String,
    pub promo_type: String,
    pub value: i64,
    pub duration_months: Option<i32>,
    pub max_uses: Option<i32>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
