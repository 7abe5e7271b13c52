pub mod promo_admin;
pub mod promo_engine;
