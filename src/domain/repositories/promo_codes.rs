use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::{
    promo_codes::{InsertPromoCodeEntity, PromoCodeEntity},
    redemptions::{InsertRedemptionEntity, RedemptionEntity},
};

/// Result of the atomic "consume one use and record the redemption" write.
#[derive(Debug, Clone, PartialEq)]
pub enum RedemptionOutcome {
    Redeemed(RedemptionEntity),
    /// The conditional increment matched nothing: the code stopped being
    /// active, left its window, or hit its cap after it was read.
    UsageUnavailable,
    /// The (user, code) pair already has a redemption. The increment was
    /// rolled back.
    AlreadyRedeemed,
}

#[async_trait]
#[automock]
pub trait PromoCodeRepository {
    /// `code` must already be upper-case normalized.
    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCodeEntity>>;

    async fn list_promo_codes(&self) -> Result<Vec<PromoCodeEntity>>;

    /// Returns `None` when the code already exists. Timestamps are taken
    /// from the insert as given.
    async fn insert_promo_code(
        &self,
        insert_promo_code_entity: InsertPromoCodeEntity,
    ) -> Result<Option<PromoCodeEntity>>;

    async fn set_active(
        &self,
        code: &str,
        is_active: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<PromoCodeEntity>>;

    async fn find_redemption(
        &self,
        user_id: Uuid,
        promo_code_id: Uuid,
    ) -> Result<Option<RedemptionEntity>>;

    async fn list_redemptions(&self, promo_code_id: Uuid) -> Result<Vec<RedemptionEntity>>;

    /// Increments `current_uses` only if the code is still usable at
    /// `redeemed_at`, and inserts the redemption, as one unit.
    async fn increment_usage_and_insert_redemption(
        &self,
        insert_redemption_entity: InsertRedemptionEntity,
    ) -> Result<RedemptionOutcome>;
}
