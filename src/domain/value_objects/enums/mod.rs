pub mod promo_code_statuses;
pub mod promo_types;
