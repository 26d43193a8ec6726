//! Price computation and display for the billing toggle.

use crate::config::{PlanConfig, PricingConfig};
use crate::pricing::links::LinkBuilder;
use crate::pricing::types::{Billing, PlanOffer, PricingTable};

/// Narrow no-break space, the fr-FR thousands separator.
const GROUP_SEPARATOR: char = '\u{202F}';
/// No-break space between the amount and the currency sign.
const CURRENCY_SPACE: char = '\u{00A0}';

/// Computes plan prices for each billing period.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    plans: Vec<PlanConfig>,
    annual_months: u64,
    lifetime_months: u64,
    links: LinkBuilder,
}

impl PricingEngine {
    pub fn from_config(config: &PricingConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            plans: config.plans.clone(),
            annual_months: config.annual_months,
            lifetime_months: config.lifetime_months,
            links: LinkBuilder::from_config(config)?,
        })
    }

    /// Amount charged for one period, in cents.
    pub fn amount_cents(&self, plan: &PlanConfig, billing: Billing) -> u64 {
        let months = match billing {
            Billing::Monthly => 1,
            Billing::Annual => self.annual_months,
            Billing::Lifetime => self.lifetime_months,
        };
        plan.monthly_cents.saturating_mul(months)
    }

    /// Display line for a plan, e.g. `24,99 €/mois`.
    pub fn price_line(&self, plan: &PlanConfig, billing: Billing) -> String {
        if plan.monthly_cents == 0 {
            return "0€".to_string();
        }
        format!(
            "{}{}",
            format_euro(self.amount_cents(plan, billing)),
            billing.suffix()
        )
    }

    /// Full pricing table for one billing period.
    pub fn table(&self, billing: Billing) -> PricingTable {
        let plans = self
            .plans
            .iter()
            .map(|plan| {
                let cta_href = if plan.monthly_cents == 0 {
                    self.links.signup(&plan.id, None)
                } else {
                    self.links.signup(&plan.id, Some(billing.as_str()))
                };
                PlanOffer {
                    id: plan.id.clone(),
                    name: plan.name.clone(),
                    billing,
                    amount_cents: self.amount_cents(plan, billing),
                    price_line: self.price_line(plan, billing),
                    cta_href,
                }
            })
            .collect();

        PricingTable {
            billing,
            plans,
            login_href: self.links.login(),
        }
    }
}

/// Format cents the way fr-FR formats EUR: `1 234,56 €`.
pub fn format_euro(cents: u64) -> String {
    let euros = (cents / 100).to_string();
    let mut grouped = String::with_capacity(euros.len() + euros.len() / 3 * 3);
    for (i, digit) in euros.chars().enumerate() {
        if i > 0 && (euros.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }
    format!("{},{:02}{}€", grouped, cents % 100, CURRENCY_SPACE)
}
