use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::redemptions::RedemptionEntity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemPromoModel {
    pub user_id: Uuid,
    pub code: String,
    pub base_price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RedemptionModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub promo_code_id: Uuid,
    pub base_price: i64,
    pub discount_amount: i64,
    pub final_price: i64,
    pub redeemed_at: DateTime<Utc>,
    pub effective_until: Option<DateTime<Utc>>,
}

impl From<RedemptionEntity> for RedemptionModel {
    fn from(value: RedemptionEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            promo_code_id: value.promo_code_id,
            base_price: value.base_price,
            discount_amount: value.discount_amount,
            final_price: value.final_price,
            redeemed_at: value.redeemed_at,
            effective_until: value.effective_until,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RedeemPromoResultModel {
    pub redemption: RedemptionModel,
    pub discount_amount: i64,
    pub final_price: i64,
    pub effective_until: Option<DateTime<Utc>>,
}

impl From<RedemptionEntity> for RedeemPromoResultModel {
    fn from(value: RedemptionEntity) -> Self {
        let redemption = RedemptionModel::from(value);
        Self {
            discount_amount: redemption.discount_amount,
            final_price: redemption.final_price,
            effective_until: redemption.effective_until,
            redemption,
        }
    }
}
