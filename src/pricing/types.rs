//! Pricing data types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Billing period selected by the visitor.
///
/// Serialized lowercase; parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Billing {
    #[default]
    Monthly,
    Annual,
    Lifetime,
}

impl Billing {
    pub fn as_str(self) -> &'static str {
        match self {
            Billing::Monthly => "monthly",
            Billing::Annual => "annual",
            Billing::Lifetime => "lifetime",
        }
    }

    /// Suffix appended to the formatted amount.
    pub fn suffix(self) -> &'static str {
        match self {
            Billing::Monthly => "/mois",
            Billing::Annual => "/an",
            Billing::Lifetime => " une fois",
        }
    }
}

impl fmt::Display for Billing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Billing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monthly" => Ok(Billing::Monthly),
            "annual" => Ok(Billing::Annual),
            "lifetime" => Ok(Billing::Lifetime),
            other => Err(format!("unknown billing period '{other}'")),
        }
    }
}

impl<'de> Deserialize<'de> for Billing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One plan priced for a billing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanOffer {
    pub id: String,
    pub name: String,
    pub billing: Billing,
    /// Amount charged for the period, in euro cents.
    pub amount_cents: u64,
    /// Display string, e.g. `8,99 €/mois`.
    pub price_line: String,
    /// Signup link into the app.
    pub cta_href: String,
}

/// Everything the pricing section needs for one billing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingTable {
    pub billing: Billing,
    pub plans: Vec<PlanOffer>,
    pub login_href: String,
}
