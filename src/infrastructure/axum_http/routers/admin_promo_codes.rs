use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    application::{errors::PromoError, usecases::promo_admin::PromoAdminUseCase},
    domain::{
        clock::Clock,
        repositories::promo_codes::PromoCodeRepository,
        value_objects::{
            promo_codes::{InsertPromoCodeModel, PromoCodeModel},
            redemptions::RedemptionModel,
        },
    },
};

// Expected to be mounted behind the admin gateway; no auth here.
pub fn routes<R, C>(promo_code_repository: Arc<R>, clock: Arc<C>) -> Router
where
    R: PromoCodeRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let promo_admin_usecase = PromoAdminUseCase::new(promo_code_repository, clock);

    Router::new()
        .route("/", post(create::<R, C>).get(list::<R, C>))
        .route("/:code", get(get_one::<R, C>))
        .route("/:code/deactivate", post(deactivate::<R, C>))
        .route("/:code/activate", post(activate::<R, C>))
        .route("/:code/redemptions", get(list_redemptions::<R, C>))
        .with_state(Arc::new(promo_admin_usecase))
}

pub async fn create<R, C>(
    State(promo_admin_usecase): State<Arc<PromoAdminUseCase<R, C>>>,
    body: Result<Json<InsertPromoCodeModel>, JsonRejection>,
) -> Result<(StatusCode, Json<PromoCodeModel>), PromoError>
where
    R: PromoCodeRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(insert_promo_code_model) = body?;

    let created = promo_admin_usecase
        .create_promo_code(insert_promo_code_model)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list<R, C>(
    State(promo_admin_usecase): State<Arc<PromoAdminUseCase<R, C>>>,
) -> Result<Json<Vec<PromoCodeModel>>, PromoError>
where
    R: PromoCodeRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(promo_admin_usecase.list_promo_codes().await?))
}

pub async fn get_one<R, C>(
    State(promo_admin_usecase): State<Arc<PromoAdminUseCase<R, C>>>,
    Path(code): Path<String>,
) -> Result<Json<PromoCodeModel>, PromoError>
where
    R: PromoCodeRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(promo_admin_usecase.get_promo_code(&code).await?))
}

pub async fn deactivate<R, C>(
    State(promo_admin_usecase): State<Arc<PromoAdminUseCase<R, C>>>,
    Path(code): Path<String>,
) -> Result<Json<PromoCodeModel>, PromoError>
where
    R: PromoCodeRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(promo_admin_usecase.deactivate_promo_code(&code).await?))
}

pub async fn activate<R, C>(
    State(promo_admin_usecase): State<Arc<PromoAdminUseCase<R, C>>>,
    Path(code): Path<String>,
) -> Result<Json<PromoCodeModel>, PromoError>
where
    R: PromoCodeRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(promo_admin_usecase.reactivate_promo_code(&code).await?))
}

pub async fn list_redemptions<R, C>(
    State(promo_admin_usecase): State<Arc<PromoAdminUseCase<R, C>>>,
    Path(code): Path<String>,
) -> Result<Json<Vec<RedemptionModel>>, PromoError>
where
    R: PromoCodeRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(promo_admin_usecase.list_redemptions(&code).await?))
}
