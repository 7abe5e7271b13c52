pub mod enums;
pub mod pricing;
pub mod promo_codes;
pub mod redemptions;
