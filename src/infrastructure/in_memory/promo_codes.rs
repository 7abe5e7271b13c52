use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    entities::{
        promo_codes::{InsertPromoCodeEntity, PromoCodeEntity},
        redemptions::{InsertRedemptionEntity, RedemptionEntity},
    },
    repositories::promo_codes::{PromoCodeRepository, RedemptionOutcome},
    value_objects::enums::promo_code_statuses::PromoCodeStatus,
};

#[derive(Default)]
struct PromoTables {
    promo_codes: HashMap<String, PromoCodeEntity>,
    redemptions: Vec<RedemptionEntity>,
}

/// Process-local promo code store.
///
/// Every write happens under a single `RwLock` write guard, which gives the
/// same all-or-nothing redemption semantics as the Postgres transaction.
/// Used when no `DATABASE_URL` is configured and in tests.
#[derive(Default, Clone)]
pub struct InMemoryPromoCodeStore {
    tables: Arc<RwLock<PromoTables>>,
}

impl InMemoryPromoCodeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PromoCodeRepository for InMemoryPromoCodeStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCodeEntity>> {
        let tables = self.tables.read().await;
        Ok(tables.promo_codes.get(code).cloned())
    }

    async fn list_promo_codes(&self) -> Result<Vec<PromoCodeEntity>> {
        let tables = self.tables.read().await;
        let mut promo_codes: Vec<PromoCodeEntity> = tables.promo_codes.values().cloned().collect();
        promo_codes.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.code.cmp(&b.code))
        });
        Ok(promo_codes)
    }

    async fn insert_promo_code(
        &self,
        insert_promo_code_entity: InsertPromoCodeEntity,
    ) -> Result<Option<PromoCodeEntity>> {
        let mut tables = self.tables.write().await;
        if tables.promo_codes.contains_key(&insert_promo_code_entity.code) {
            return Ok(None);
        }

        let entity = PromoCodeEntity {
            id: Uuid::new_v4(),
            code: insert_promo_code_entity.code,
            promo_type: insert_promo_code_entity.promo_type,
            value: insert_promo_code_entity.value,
            duration_months: insert_promo_code_entity.duration_months,
            max_uses: insert_promo_code_entity.max_uses,
            current_uses: 0,
            valid_from: insert_promo_code_entity.valid_from,
            valid_until: insert_promo_code_entity.valid_until,
            is_active: insert_promo_code_entity.is_active,
            created_at: insert_promo_code_entity.created_at,
            updated_at: insert_promo_code_entity.updated_at,
        };
        tables
            .promo_codes
            .insert(entity.code.clone(), entity.clone());
        Ok(Some(entity))
    }

    async fn set_active(
        &self,
        code: &str,
        is_active: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<PromoCodeEntity>> {
        let mut tables = self.tables.write().await;
        Ok(tables.promo_codes.get_mut(code).map(|promo| {
            promo.is_active = is_active;
            promo.updated_at = updated_at;
            promo.clone()
        }))
    }

    async fn find_redemption(
        &self,
        user_id: Uuid,
        promo_code_id: Uuid,
    ) -> Result<Option<RedemptionEntity>> {
        let tables = self.tables.read().await;
        Ok(tables
            .redemptions
            .iter()
            .find(|r| r.user_id == user_id && r.promo_code_id == promo_code_id)
            .cloned())
    }

    async fn list_redemptions(&self, promo_code_id: Uuid) -> Result<Vec<RedemptionEntity>> {
        let tables = self.tables.read().await;
        let mut redemptions: Vec<RedemptionEntity> = tables
            .redemptions
            .iter()
            .filter(|r| r.promo_code_id == promo_code_id)
            .cloned()
            .collect();
        redemptions.sort_by(|a, b| b.redeemed_at.cmp(&a.redeemed_at));
        Ok(redemptions)
    }

    async fn increment_usage_and_insert_redemption(
        &self,
        insert_redemption_entity: InsertRedemptionEntity,
    ) -> Result<RedemptionOutcome> {
        let mut tables = self.tables.write().await;

        let already_redeemed = tables.redemptions.iter().any(|r| {
            r.user_id == insert_redemption_entity.user_id
                && r.promo_code_id == insert_redemption_entity.promo_code_id
        });
        if already_redeemed {
            return Ok(RedemptionOutcome::AlreadyRedeemed);
        }

        let Some(promo) = tables
            .promo_codes
            .values_mut()
            .find(|promo| promo.id == insert_redemption_entity.promo_code_id)
        else {
            return Ok(RedemptionOutcome::UsageUnavailable);
        };

        if promo.status_at(insert_redemption_entity.redeemed_at) != PromoCodeStatus::Active {
            return Ok(RedemptionOutcome::UsageUnavailable);
        }

        promo.current_uses += 1;
        promo.updated_at = insert_redemption_entity.redeemed_at;

        let redemption = RedemptionEntity {
            id: Uuid::new_v4(),
            user_id: insert_redemption_entity.user_id,
            promo_code_id: insert_redemption_entity.promo_code_id,
            base_price: insert_redemption_entity.base_price,
            discount_amount: insert_redemption_entity.discount_amount,
            final_price: insert_redemption_entity.final_price,
            redeemed_at: insert_redemption_entity.redeemed_at,
            effective_until: insert_redemption_entity.effective_until,
        };
        tables.redemptions.push(redemption.clone());

        Ok(RedemptionOutcome::Redeemed(redemption))
    }
}
