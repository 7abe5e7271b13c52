use std::{fmt::Display, str::FromStr};

use anyhow::{Error, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PromoType {
    Percentage,
    Flat,
    FixedPrice,
}

impl Display for PromoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let promo_type = match self {
            PromoType::Percentage => "percentage",
            PromoType::Flat => "flat",
            PromoType::FixedPrice => "fixed_price",
        };
        write!(f, "{}", promo_type)
    }
}

impl FromStr for PromoType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "percentage" => Ok(PromoType::Percentage),
            "flat" => Ok(PromoType::Flat),
            "fixed_price" => Ok(PromoType::FixedPrice),
            other => bail!("unknown promo type: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_agree() {
        for promo_type in [PromoType::Percentage, PromoType::Flat, PromoType::FixedPrice] {
            let parsed: PromoType = promo_type.to_string().parse().unwrap();
            assert_eq!(parsed, promo_type);
        }
    }

    #[test]
    fn rejects_unknown_type() {
        assert!("bogus".parse::<PromoType>().is_err());
        assert!("Percentage".parse::<PromoType>().is_err());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&PromoType::FixedPrice).unwrap();
        assert_eq!(json, "\"fixed_price\"");
    }
}
