use serde::{Deserialize, Serialize};

use crate::domain::value_objects::enums::promo_types::PromoType;

/// Discount applied to a base price. All amounts are in paise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricingBreakdown {
    pub base_price: i64,
    pub discount_amount: i64,
    pub final_price: i64,
}

impl PricingBreakdown {
    /// `discount_amount` always lands in `[0, base_price]`, so `final_price`
    /// is never negative. A negative `base_price` is treated as zero.
    pub fn compute(promo_type: PromoType, value: i64, base_price: i64) -> Self {
        let base_price = base_price.max(0);

        let discount_amount = match promo_type {
            PromoType::Percentage => {
                // i128 keeps `base_price * value` exact for any i64 price.
                let discount = i128::from(base_price) * i128::from(value) / 100;
                discount.clamp(0, i128::from(base_price)) as i64
            }
            PromoType::Flat => value.clamp(0, base_price),
            PromoType::FixedPrice => (base_price - value.max(0)).max(0),
        };

        Self {
            base_price,
            discount_amount,
            final_price: base_price - discount_amount,
        }
    }
}
