pub mod admin_promo_codes;
pub mod promo_codes;
