use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::errors::{PromoError, UseCaseResult},
    domain::{
        clock::Clock,
        entities::{promo_codes::PromoCodeEntity, redemptions::InsertRedemptionEntity},
        repositories::promo_codes::{PromoCodeRepository, RedemptionOutcome},
        value_objects::{
            pricing::PricingBreakdown,
            promo_codes::{PromoCodeModel, PromoValidationModel, normalize_code},
            redemptions::RedeemPromoResultModel,
        },
    },
};

/// Validates promo codes against a base price and redeems them for users.
pub struct PromoEngineUseCase<R, C>
where
    R: PromoCodeRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    promo_code_repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> PromoEngineUseCase<R, C>
where
    R: PromoCodeRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    pub fn new(promo_code_repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            promo_code_repository,
            clock,
        }
    }

    /// Read-only: prices `base_price` against `code` without consuming a use.
    pub async fn validate(&self, code: &str, base_price: i64) -> UseCaseResult<PromoValidationModel> {
        let now = self.clock.now();
        let (promo, pricing) = self.evaluate(code, base_price, now).await?;

        info!(
            code = %promo.code,
            base_price,
            discount_amount = pricing.discount_amount,
            final_price = pricing.final_price,
            "promo_engine: promo code validated"
        );

        Ok(PromoValidationModel::new(
            PromoCodeModel::from_entity(promo, now)?,
            pricing,
        ))
    }

    pub async fn redeem(
        &self,
        user_id: Uuid,
        code: &str,
        base_price: i64,
    ) -> UseCaseResult<RedeemPromoResultModel> {
        let now = self.clock.now();
        info!(%user_id, code, base_price, "promo_engine: redeem requested");

        let (promo, pricing) = self.evaluate(code, base_price, now).await?;

        let existing = self
            .promo_code_repository
            .find_redemption(user_id, promo.id)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    code = %promo.code,
                    db_error = ?err,
                    "promo_engine: failed to look up existing redemption"
                );
                PromoError::Internal(err)
            })?;

        if existing.is_some() {
            warn!(
                %user_id,
                code = %promo.code,
                status = PromoError::AlreadyRedeemed.status_code().as_u16(),
                "promo_engine: user already redeemed this code"
            );
            return Err(PromoError::AlreadyRedeemed);
        }

        let effective_until = promo.effective_until_from(now)?;

        let insert_redemption_entity = InsertRedemptionEntity {
            user_id,
            promo_code_id: promo.id,
            base_price: pricing.base_price,
            discount_amount: pricing.discount_amount,
            final_price: pricing.final_price,
            redeemed_at: now,
            effective_until,
        };

        let outcome = self
            .promo_code_repository
            .increment_usage_and_insert_redemption(insert_redemption_entity)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    code = %promo.code,
                    db_error = ?err,
                    "promo_engine: failed to record redemption"
                );
                PromoError::Internal(err)
            })?;

        match outcome {
            RedemptionOutcome::Redeemed(redemption) => {
                info!(
                    %user_id,
                    code = %promo.code,
                    redemption_id = %redemption.id,
                    discount_amount = redemption.discount_amount,
                    final_price = redemption.final_price,
                    "promo_engine: promo code redeemed"
                );
                Ok(RedeemPromoResultModel::from(redemption))
            }
            RedemptionOutcome::UsageUnavailable => {
                let err = PromoError::ConcurrencyConflict;
                warn!(
                    %user_id,
                    code = %promo.code,
                    status = err.status_code().as_u16(),
                    "promo_engine: conditional usage increment lost a race"
                );
                Err(err)
            }
            RedemptionOutcome::AlreadyRedeemed => {
                let err = PromoError::AlreadyRedeemed;
                warn!(
                    %user_id,
                    code = %promo.code,
                    status = err.status_code().as_u16(),
                    "promo_engine: concurrent redemption by the same user"
                );
                Err(err)
            }
        }
    }

    async fn evaluate(
        &self,
        code: &str,
        base_price: i64,
        now: DateTime<Utc>,
    ) -> UseCaseResult<(PromoCodeEntity, PricingBreakdown)> {
        if base_price < 0 {
            return Err(PromoError::InvalidInput(
                "base_price must not be negative".to_string(),
            ));
        }

        let normalized = normalize_code(code);

        let promo = self
            .promo_code_repository
            .find_by_code(&normalized)
            .await
            .map_err(|err| {
                error!(
                    code = %normalized,
                    db_error = ?err,
                    "promo_engine: failed to load promo code"
                );
                PromoError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(code = %normalized, "promo_engine: promo code not found");
                PromoError::NotFound
            })?;

        let status = promo.status_at(now);
        if let Some(err) = PromoError::from_status(status) {
            warn!(
                code = %promo.code,
                %status,
                "promo_engine: promo code not usable"
            );
            return Err(err);
        }

        let promo_type = promo.promo_type()?;
        let pricing = PricingBreakdown::compute(promo_type, promo.value, base_price);

        Ok((promo, pricing))
    }
}
