use url::Url;

use crate::app::Result;

/// Resolves feed hrefs against the URL the feed was requested from.
#[derive(Debug, Clone, Default)]
pub struct UrlResolver {
    base: Option<Url>,
}

impl UrlResolver {
    /// An empty or absent base leaves hrefs untouched.
    pub fn new(base: Option<&str>) -> Result<Self> {
        let base = match base.map(str::trim).filter(|b| !b.is_empty()) {
            Some(base) => Some(Url::parse(base)?),
            None => None,
        };
        Ok(Self { base })
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    pub fn resolve(&self, href: &str) -> String {
        let Some(base) = &self.base else {
            return href.to_string();
        };
        match base.join(href) {
            Ok(url) => url.into(),
            Err(e) => {
                tracing::warn!("Keeping unresolvable href {:?}: {}", href, e);
                href.to_string()
            }
        }
    }
}
