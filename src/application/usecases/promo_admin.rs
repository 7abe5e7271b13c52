use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::{
    application::errors::{PromoError, UseCaseResult},
    domain::{
        clock::Clock,
        entities::promo_codes::{InsertPromoCodeEntity, PromoCodeEntity},
        repositories::promo_codes::PromoCodeRepository,
        value_objects::{
            enums::promo_types::PromoType,
            promo_codes::{
                InsertPromoCodeModel, MAX_CODE_LEN, MIN_CODE_LEN, PromoCodeModel,
                is_well_formed_code, normalize_code,
            },
            redemptions::RedemptionModel,
        },
    },
};

/// Admin-side lifecycle of promo codes: create, inspect, deactivate and
/// reactivate. Codes are never deleted.
pub struct PromoAdminUseCase<R, C>
where
    R: PromoCodeRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    promo_code_repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> PromoAdminUseCase<R, C>
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

    pub async fn create_promo_code(
        &self,
        insert_promo_code_model: InsertPromoCodeModel,
    ) -> UseCaseResult<PromoCodeModel> {
        let now = self.clock.now();
        let insert_promo_code_entity = validate_new_promo_code(&insert_promo_code_model, now)
            .inspect_err(|err| {
                warn!(
                    code = %insert_promo_code_model.code,
                    error = %err,
                    status = err.status_code().as_u16(),
                    "promo_admin: rejected promo code input"
                );
            })?;
        let code = insert_promo_code_entity.code.clone();

        let created = self
            .promo_code_repository
            .insert_promo_code(insert_promo_code_entity)
            .await
            .map_err(|err| {
                error!(
                    %code,
                    db_error = ?err,
                    "promo_admin: failed to insert promo code"
                );
                PromoError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(%code, "promo_admin: promo code already exists");
                PromoError::DuplicateCode
            })?;

        info!(
            code = %created.code,
            promo_type = %created.promo_type,
            value = created.value,
            max_uses = ?created.max_uses,
            "promo_admin: promo code created"
        );

        Ok(PromoCodeModel::from_entity(created, now)?)
    }

    pub async fn list_promo_codes(&self) -> UseCaseResult<Vec<PromoCodeModel>> {
        let now = self.clock.now();
        let promo_codes = self
            .promo_code_repository
            .list_promo_codes()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "promo_admin: failed to list promo codes");
                PromoError::Internal(err)
            })?;

        let promo_code_count = promo_codes.len();
        info!(promo_code_count, "promo_admin: promo codes loaded");

        promo_codes
            .into_iter()
            .map(|entity| PromoCodeModel::from_entity(entity, now).map_err(PromoError::from))
            .collect()
    }

    pub async fn get_promo_code(&self, code: &str) -> UseCaseResult<PromoCodeModel> {
        let now = self.clock.now();
        let promo = self.load(code).await?;
        Ok(PromoCodeModel::from_entity(promo, now)?)
    }

    pub async fn deactivate_promo_code(&self, code: &str) -> UseCaseResult<PromoCodeModel> {
        self.set_active(code, false).await
    }

    pub async fn reactivate_promo_code(&self, code: &str) -> UseCaseResult<PromoCodeModel> {
        self.set_active(code, true).await
    }

    pub async fn list_redemptions(&self, code: &str) -> UseCaseResult<Vec<RedemptionModel>> {
        let promo = self.load(code).await?;

        let redemptions = self
            .promo_code_repository
            .list_redemptions(promo.id)
            .await
            .map_err(|err| {
                error!(
                    code = %promo.code,
                    db_error = ?err,
                    "promo_admin: failed to list redemptions"
                );
                PromoError::Internal(err)
            })?;

        Ok(redemptions.into_iter().map(RedemptionModel::from).collect())
    }

    async fn set_active(&self, code: &str, is_active: bool) -> UseCaseResult<PromoCodeModel> {
        let now = self.clock.now();
        let normalized = normalize_code(code);

        let updated = self
            .promo_code_repository
            .set_active(&normalized, is_active, now)
            .await
            .map_err(|err| {
                error!(
                    code = %normalized,
                    is_active,
                    db_error = ?err,
                    "promo_admin: failed to update promo code activity"
                );
                PromoError::Internal(err)
            })?
            .ok_or(PromoError::NotFound)?;

        info!(code = %updated.code, is_active, "promo_admin: promo code activity updated");
        Ok(PromoCodeModel::from_entity(updated, now)?)
    }

    async fn load(&self, code: &str) -> UseCaseResult<PromoCodeEntity> {
        let normalized = normalize_code(code);
        self.promo_code_repository
            .find_by_code(&normalized)
            .await
            .map_err(|err| {
                error!(
                    code = %normalized,
                    db_error = ?err,
                    "promo_admin: failed to load promo code"
                );
                PromoError::Internal(err)
            })?
            .ok_or(PromoError::NotFound)
    }
}

fn validate_new_promo_code(
    model: &InsertPromoCodeModel,
    now: DateTime<Utc>,
) -> UseCaseResult<InsertPromoCodeEntity> {
    let entity = model.to_entity(now);

    if !is_well_formed_code(&entity.code) {
        return Err(PromoError::InvalidInput(format!(
            "code must be {MIN_CODE_LEN}-{MAX_CODE_LEN} characters of A-Z, 0-9, '-' or '_'"
        )));
    }

    match model.promo_type {
        PromoType::Percentage if !(0..=100).contains(&entity.value) => {
            return Err(PromoError::InvalidInput(
                "percentage value must be between 0 and 100".to_string(),
            ));
        }
        PromoType::Flat | PromoType::FixedPrice if entity.value < 0 => {
            return Err(PromoError::InvalidInput(
                "value must not be negative".to_string(),
            ));
        }
        _ => {}
    }

    if entity.max_uses.is_some_and(|max_uses| max_uses < 1) {
        return Err(PromoError::InvalidInput(
            "max_uses must be at least 1".to_string(),
        ));
    }

    if entity
        .duration_months
        .is_some_and(|duration_months| duration_months < 1)
    {
        return Err(PromoError::InvalidInput(
            "duration_months must be at least 1".to_string(),
        ));
    }

    if entity
        .valid_until
        .is_some_and(|valid_until| valid_until <= entity.valid_from)
    {
        return Err(PromoError::InvalidInput(
            "valid_until must be after valid_from".to_string(),
        ));
    }

    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        clock::MockClock,
        entities::redemptions::RedemptionEntity,
        repositories::promo_codes::MockPromoCodeRepository,
        value_objects::enums::promo_code_statuses::PromoCodeStatus,
    };
    use chrono::{Duration, TimeZone};
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn usecase(repo: MockPromoCodeRepository) -> PromoAdminUseCase<MockPromoCodeRepository, MockClock> {
        let mut clock = MockClock::new();
        clock.expect_now().return_const(fixed_now());
        PromoAdminUseCase::new(Arc::new(repo), Arc::new(clock))
    }

    fn entity_from_insert(insert: InsertPromoCodeEntity) -> PromoCodeEntity {
        PromoCodeEntity {
            id: Uuid::new_v4(),
            code: insert.code,
            promo_type: insert.promo_type,
            value: insert.value,
            duration_months: insert.duration_months,
            max_uses: insert.max_uses,
            current_uses: 0,
            valid_from: insert.valid_from,
            valid_until: insert.valid_until,
            is_active: insert.is_active,
            created_at: insert.created_at,
            updated_at: insert.updated_at,
        }
    }

    fn insert_model(code: &str, promo_type: PromoType, value: i64) -> InsertPromoCodeModel {
        InsertPromoCodeModel {
            code: code.to_string(),
            promo_type,
            value,
            duration_months: None,
            max_uses: None,
            valid_from: None,
            valid_until: None,
            is_active: None,
        }
    }

    #[tokio::test]
    async fn create_normalizes_code_and_defaults_window() {
        let mut repo = MockPromoCodeRepository::new();
        repo.expect_insert_promo_code()
            .withf(|insert| {
                insert.code == "SAVE20"
                    && insert.valid_from == fixed_now()
                    && insert.created_at == fixed_now()
                    && insert.updated_at == fixed_now()
            })
            .returning(|insert| {
                let entity = entity_from_insert(insert);
                Box::pin(async move { Ok(Some(entity)) })
            });

        let created = usecase(repo)
            .create_promo_code(insert_model(" save20 ", PromoType::Percentage, 20))
            .await
            .unwrap();

        assert_eq!(created.code, "SAVE20");
        assert_eq!(created.current_uses, 0);
        assert_eq!(created.status, PromoCodeStatus::Active);
        assert_eq!(created.created_at, fixed_now());
    }

    #[tokio::test]
    async fn create_duplicate_code_conflicts() {
        let mut repo = MockPromoCodeRepository::new();
        repo.expect_insert_promo_code()
            .returning(|_| Box::pin(async { Ok(None) }));

        let err = usecase(repo)
            .create_promo_code(insert_model("SAVE20", PromoType::Flat, 500))
            .await
            .unwrap_err();

        assert!(matches!(err, PromoError::DuplicateCode));
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_without_writing() {
        let invalid = [
            insert_model("AB", PromoType::Flat, 100),
            insert_model("SAVE 20", PromoType::Flat, 100),
            insert_model("HALF", PromoType::Percentage, 101),
            insert_model("MINUS", PromoType::Flat, -1),
            insert_model("FIXED", PromoType::FixedPrice, -50),
            InsertPromoCodeModel {
                max_uses: Some(0),
                ..insert_model("NOCAP", PromoType::Flat, 100)
            },
            InsertPromoCodeModel {
                duration_months: Some(0),
                ..insert_model("NOMONTHS", PromoType::Flat, 100)
            },
            InsertPromoCodeModel {
                valid_from: Some(fixed_now()),
                valid_until: Some(fixed_now() - Duration::days(1)),
                ..insert_model("BACKWARDS", PromoType::Flat, 100)
            },
        ];

        for model in invalid {
            let mut repo = MockPromoCodeRepository::new();
            repo.expect_insert_promo_code().never();

            let err = usecase(repo).create_promo_code(model.clone()).await.unwrap_err();
            assert!(
                matches!(err, PromoError::InvalidInput(_)),
                "expected invalid input for {model:?}"
            );
        }
    }

    #[tokio::test]
    async fn deactivate_unknown_code_is_not_found() {
        let mut repo = MockPromoCodeRepository::new();
        repo.expect_set_active()
            .with(eq("MISSING"), eq(false), eq(fixed_now()))
            .returning(|_, _, _| Box::pin(async { Ok(None) }));

        let err = usecase(repo)
            .deactivate_promo_code("missing")
            .await
            .unwrap_err();

        assert!(matches!(err, PromoError::NotFound));
    }

    #[tokio::test]
    async fn deactivate_reports_inactive_status() {
        let mut repo = MockPromoCodeRepository::new();
        repo.expect_set_active()
            .with(eq("SAVE20"), eq(false), eq(fixed_now()))
            .returning(|code, is_active, updated_at| {
                let mut entity = entity_from_insert(
                    insert_model(code, PromoType::Flat, 100)
                        .to_entity(fixed_now() - Duration::days(7)),
                );
                entity.is_active = is_active;
                entity.updated_at = updated_at;
                Box::pin(async move { Ok(Some(entity)) })
            });

        let updated = usecase(repo).deactivate_promo_code("save20").await.unwrap();

        assert!(!updated.is_active);
        assert_eq!(updated.status, PromoCodeStatus::Inactive);
    }

    #[tokio::test]
    async fn list_redemptions_for_known_code() {
        let promo = entity_from_insert(
            insert_model("SAVE20", PromoType::Percentage, 20).to_entity(fixed_now()),
        );
        let promo_id = promo.id;

        let mut repo = MockPromoCodeRepository::new();
        repo.expect_find_by_code()
            .with(eq("SAVE20"))
            .returning(move |_| {
                let promo = promo.clone();
                Box::pin(async move { Ok(Some(promo)) })
            });
        repo.expect_list_redemptions()
            .with(eq(promo_id))
            .returning(|promo_code_id| {
                Box::pin(async move {
                    Ok(vec![RedemptionEntity {
                        id: Uuid::new_v4(),
                        user_id: Uuid::new_v4(),
                        promo_code_id,
                        base_price: 10_000,
                        discount_amount: 2_000,
                        final_price: 8_000,
                        redeemed_at: fixed_now(),
                        effective_until: None,
                    }])
                })
            });

        let redemptions = usecase(repo).list_redemptions("save20").await.unwrap();

        assert_eq!(redemptions.len(), 1);
        assert_eq!(redemptions[0].promo_code_id, promo_id);
    }

    #[tokio::test]
    async fn list_reports_derived_status() {
        let mut expired = entity_from_insert(
            insert_model("OLD", PromoType::Flat, 100).to_entity(fixed_now() - Duration::days(30)),
        );
        expired.valid_until = Some(fixed_now() - Duration::days(1));
        let active =
            entity_from_insert(insert_model("NEW", PromoType::Flat, 100).to_entity(fixed_now()));

        let mut repo = MockPromoCodeRepository::new();
        repo.expect_list_promo_codes().returning(move || {
            let promo_codes = vec![active.clone(), expired.clone()];
            Box::pin(async move { Ok(promo_codes) })
        });

        let listed = usecase(repo).list_promo_codes().await.unwrap();

        assert_eq!(listed[0].status, PromoCodeStatus::Active);
        assert_eq!(listed[1].status, PromoCodeStatus::Expired);
    }
}
