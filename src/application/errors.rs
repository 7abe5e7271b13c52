use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::value_objects::enums::promo_code_statuses::PromoCodeStatus;

#[derive(Debug, Error)]
pub enum PromoError {
    #[error("promo code not found")]
    NotFound,
    #[error("promo code is inactive")]
    Inactive,
    #[error("promo code is expired or not yet valid")]
    Expired,
    #[error("promo code usage limit reached")]
    UsageExceeded,
    #[error("promo code changed while redeeming, retry once")]
    ConcurrencyConflict,
    #[error("promo code already redeemed by this user")]
    AlreadyRedeemed,
    #[error("promo code already exists")]
    DuplicateCode,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PromoError {
    /// Error for a code that is not usable, `None` when it is `Active`.
    pub fn from_status(status: PromoCodeStatus) -> Option<Self> {
        match status {
            PromoCodeStatus::Active => None,
            PromoCodeStatus::Inactive => Some(PromoError::Inactive),
            PromoCodeStatus::Expired => Some(PromoError::Expired),
            PromoCodeStatus::UsageExceeded => Some(PromoError::UsageExceeded),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            PromoError::NotFound => StatusCode::NOT_FOUND,
            PromoError::Inactive | PromoError::Expired | PromoError::UsageExceeded => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            PromoError::ConcurrencyConflict
            | PromoError::AlreadyRedeemed
            | PromoError::DuplicateCode => StatusCode::CONFLICT,
            PromoError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PromoError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PromoError::NotFound => "not_found",
            PromoError::Inactive => "inactive",
            PromoError::Expired => "expired",
            PromoError::UsageExceeded => "usage_exceeded",
            PromoError::ConcurrencyConflict => "concurrency_conflict",
            PromoError::AlreadyRedeemed => "already_redeemed",
            PromoError::DuplicateCode => "duplicate_code",
            PromoError::InvalidInput(_) => "invalid_input",
            PromoError::Internal(_) => "internal",
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, PromoError>;
