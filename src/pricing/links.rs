//! Call-to-action links into the product application.

use url::Url;

use crate::config::PricingConfig;

/// Builds tracked links into the app.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base: Url,
    defaults: Vec<(&'static str, String)>,
}

impl LinkBuilder {
    pub fn from_config(config: &PricingConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(&config.app_base_url)?,
            defaults: vec![
                ("utm_source", config.utm_source.clone()),
                ("utm_medium", config.utm_medium.clone()),
                ("utm_campaign", config.utm_campaign.clone()),
                ("trial", config.trial.clone()),
            ],
        })
    }

    /// Resolve `path` against the app base and attach tracking plus `params`.
    ///
    /// Later keys replace earlier ones, so `params` override the defaults.
    pub fn build(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = self.base.join(path).unwrap_or_else(|_| self.base.clone());

        let mut pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let overrides = self
            .defaults
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .chain(params.iter().copied());
        for (key, value) in overrides {
            match pairs.iter_mut().find(|(k, _)| k.as_str() == key) {
                Some(pair) => pair.1 = value.to_string(),
                None => pairs.push((key.to_string(), value.to_string())),
            }
        }

        url.query_pairs_mut().clear().extend_pairs(&pairs);
        url.into()
    }

    pub fn login(&self) -> String {
        self.build("/login", &[])
    }

    pub fn signup(&self, plan: &str, billing: Option<&str>) -> String {
        match billing {
            Some(b) => self.build("/signup", &[("plan", plan), ("billing", b)]),
            None => self.build("/signup", &[("plan", plan)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> LinkBuilder {
        LinkBuilder::from_config(&PricingConfig::default()).unwrap()
    }

    #[test]
    fn test_login_link_has_tracking() {
        assert_eq!(
            builder().login(),
            "https://vvault.app/login?utm_source=get.vvault.app&utm_medium=landing&utm_campaign=default&trial=pro7"
        );
    }

    #[test]
    fn test_signup_link_with_billing() {
        assert_eq!(
            builder().signup("pro", Some("annual")),
            "https://vvault.app/signup?utm_source=get.vvault.app&utm_medium=landing&utm_campaign=default&trial=pro7&plan=pro&billing=annual"
        );
    }

    #[test]
    fn test_params_override_defaults() {
        let url = builder().build("/signup", &[("utm_campaign", "spring"), ("plan", "free")]);
        let parsed = Url::parse(&url).unwrap();
        let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("utm_campaign".into(), "spring".into())));
        assert_eq!(pairs.iter().filter(|(k, _)| k == "utm_campaign").count(), 1);
    }
}
