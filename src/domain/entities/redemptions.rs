use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::promo_redemptions;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = promo_redemptions)]
pub struct RedemptionEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub promo_code_id: Uuid,
    pub base_price: i64,
    pub discount_amount: i64,
    pub final_price: i64,
    pub redeemed_at: DateTime<Utc>,
    pub effective_until: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = promo_redemptions)]
pub struct InsertRedemptionEntity {
    pub user_id: Uuid,
    pub promo_code_id: Uuid,
    pub base_price: i64,
    pub discount_amount: i64,
    pub final_price: i64,
    pub redeemed_at: DateTime<Utc>,
    pub effective_until: Option<DateTime<Utc>>,
}
