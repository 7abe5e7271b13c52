use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            promo_codes::{InsertPromoCodeEntity, PromoCodeEntity},
            redemptions::{InsertRedemptionEntity, RedemptionEntity},
        },
        repositories::promo_codes::{PromoCodeRepository, RedemptionOutcome},
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{promo_codes, promo_redemptions},
    },
};

/// Aborts the redemption transaction without turning a duplicate
/// (user, code) pair into a database error.
#[derive(Debug)]
enum RedeemTxError {
    AlreadyRedeemed,
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for RedeemTxError {
    fn from(err: diesel::result::Error) -> Self {
        RedeemTxError::Database(err)
    }
}

pub struct PromoCodePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PromoCodePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PromoCodeRepository for PromoCodePostgres {
    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCodeEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = promo_codes::table
            .filter(promo_codes::code.eq(code))
            .select(PromoCodeEntity::as_select())
            .first::<PromoCodeEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_promo_codes(&self) -> Result<Vec<PromoCodeEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = promo_codes::table
            .order((promo_codes::created_at.desc(), promo_codes::code.asc()))
            .select(PromoCodeEntity::as_select())
            .load::<PromoCodeEntity>(&mut conn)?;

        Ok(results)
    }

    async fn insert_promo_code(
        &self,
        insert_promo_code_entity: InsertPromoCodeEntity,
    ) -> Result<Option<PromoCodeEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(promo_codes::table)
            .values(&insert_promo_code_entity)
            .on_conflict(promo_codes::code)
            .do_nothing()
            .returning(PromoCodeEntity::as_select())
            .get_result::<PromoCodeEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn set_active(
        &self,
        code: &str,
        is_active: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<PromoCodeEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(promo_codes::table)
            .filter(promo_codes::code.eq(code))
            .set((
                promo_codes::is_active.eq(is_active),
                promo_codes::updated_at.eq(updated_at),
            ))
            .returning(PromoCodeEntity::as_select())
            .get_result::<PromoCodeEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_redemption(
        &self,
        user_id: Uuid,
        promo_code_id: Uuid,
    ) -> Result<Option<RedemptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = promo_redemptions::table
            .filter(promo_redemptions::user_id.eq(user_id))
            .filter(promo_redemptions::promo_code_id.eq(promo_code_id))
            .select(RedemptionEntity::as_select())
            .first::<RedemptionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_redemptions(&self, promo_code_id: Uuid) -> Result<Vec<RedemptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = promo_redemptions::table
            .filter(promo_redemptions::promo_code_id.eq(promo_code_id))
            .order(promo_redemptions::redeemed_at.desc())
            .select(RedemptionEntity::as_select())
            .load::<RedemptionEntity>(&mut conn)?;

        Ok(results)
    }

    async fn increment_usage_and_insert_redemption(
        &self,
        insert_redemption_entity: InsertRedemptionEntity,
    ) -> Result<RedemptionOutcome> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let now = insert_redemption_entity.redeemed_at;

        let result = conn.transaction::<RedemptionOutcome, RedeemTxError, _>(|conn| {
            // Conditional increment: the row lock taken here serializes
            // concurrent redemptions of the same code, and Postgres re-checks
            // the predicate after the lock wait.
            let updated_rows = update(promo_codes::table)
                .filter(promo_codes::id.eq(insert_redemption_entity.promo_code_id))
                .filter(promo_codes::is_active.eq(true))
                .filter(promo_codes::valid_from.le(now))
                .filter(
                    promo_codes::valid_until
                        .is_null()
                        .or(promo_codes::valid_until.assume_not_null().ge(now)),
                )
                .filter(
                    promo_codes::max_uses
                        .is_null()
                        .or(promo_codes::current_uses.lt(promo_codes::max_uses.assume_not_null())),
                )
                .set((
                    promo_codes::current_uses.eq(promo_codes::current_uses + 1),
                    promo_codes::updated_at.eq(now),
                ))
                .execute(conn)?;

            if updated_rows == 0 {
                return Ok(RedemptionOutcome::UsageUnavailable);
            }

            let redemption = insert_into(promo_redemptions::table)
                .values(&insert_redemption_entity)
                .on_conflict((promo_redemptions::user_id, promo_redemptions::promo_code_id))
                .do_nothing()
                .returning(RedemptionEntity::as_select())
                .get_result::<RedemptionEntity>(conn)
                .optional()?;

            match redemption {
                Some(redemption) => Ok(RedemptionOutcome::Redeemed(redemption)),
                // Roll back the increment.
                None => Err(RedeemTxError::AlreadyRedeemed),
            }
        });

        match result {
            Ok(outcome) => Ok(outcome),
            Err(RedeemTxError::AlreadyRedeemed) => Ok(RedemptionOutcome::AlreadyRedeemed),
            Err(RedeemTxError::Database(err)) => Err(err.into()),
        }
    }
}
