use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use tracing::info;

use crate::{
    application::{errors::PromoError, usecases::promo_engine::PromoEngineUseCase},
    domain::{
        clock::Clock,
        repositories::promo_codes::PromoCodeRepository,
        value_objects::{
            promo_codes::{PromoValidationModel, ValidatePromoModel},
            redemptions::{RedeemPromoModel, RedeemPromoResultModel},
        },
    },
};

pub fn routes<R, C>(promo_code_repository: Arc<R>, clock: Arc<C>) -> Router
where
    R: PromoCodeRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let promo_engine_usecase = PromoEngineUseCase::new(promo_code_repository, clock);

    Router::new()
        .route("/validate", post(validate::<R, C>))
        .route("/redeem", post(redeem::<R, C>))
        .with_state(Arc::new(promo_engine_usecase))
}

pub async fn validate<R, C>(
    State(promo_engine_usecase): State<Arc<PromoEngineUseCase<R, C>>>,
    body: Result<Json<ValidatePromoModel>, JsonRejection>,
) -> Result<Json<PromoValidationModel>, PromoError>
where
    R: PromoCodeRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(validate_promo_model) = body?;

    info!(
        code = %validate_promo_model.code,
        base_price = validate_promo_model.base_price,
        "promo_codes: validate request received"
    );

    let validation = promo_engine_usecase
        .validate(&validate_promo_model.code, validate_promo_model.base_price)
        .await?;

    Ok(Json(validation))
}

pub async fn redeem<R, C>(
    State(promo_engine_usecase): State<Arc<PromoEngineUseCase<R, C>>>,
    body: Result<Json<RedeemPromoModel>, JsonRejection>,
) -> Result<Json<RedeemPromoResultModel>, PromoError>
where
    R: PromoCodeRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(redeem_promo_model) = body?;

    let redemption = promo_engine_usecase
        .redeem(
            redeem_promo_model.user_id,
            &redeem_promo_model.code,
            redeem_promo_model.base_price,
        )
        .await?;

    Ok(Json(redemption))
}
