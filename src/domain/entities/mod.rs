pub mod promo_codes;
pub mod redemptions;
