// HTTP source: fetches skill lists from the extraction service.
//
// GET {base}/skills returns the contract for every institution;
// GET {base}/skills/{institution} returns one institution's lesson map.
// Both bodies may be wrapped in a {"skills": ...} envelope.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};

use super::traits::SkillSource;
use crate::catalogue::{parse_contract, Catalogue};

pub struct HttpSkillSource {
    client: reqwest::Client,
    base_url: String,
    institution: Option<String>,
}

impl HttpSkillSource {
    /// Create a source pointing at the given service base URL.
    pub fn new(base_url: &str, institution: Option<&str>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("skillaudit/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            institution: institution.map(str::to_string),
        })
    }

    /// Full URL of the skills endpoint for this source.
    pub fn endpoint(&self) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&format!("{}/skills", self.base_url))
            .with_context(|| format!("Invalid skill service URL: {}", self.base_url))?;
        if let Some(name) = &self.institution {
            url.path_segments_mut()
                .map_err(|_| anyhow::anyhow!("Skill service URL cannot be a base: {}", self.base_url))?
                .push(name);
        }
        Ok(url)
    }
}

#[async_trait]
impl SkillSource for HttpSkillSource {
    async fn fetch(&self) -> Result<Catalogue> {
        let url = self.endpoint()?;
        info!(url = %url, "Fetching skill lists");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("Skill service returned an error for {url}"))?;

        let value: serde_json::Value = response
            .json()
            .await
            .context("Skill service response is not valid JSON")?;

        let mut catalogue = parse_contract(&value).context("Unexpected skill-list shape from skill service")?;

        if let Some(name) = &self.institution {
            label_scoped(&mut catalogue, name);
        }

        debug!(
            institutions = catalogue.institutions.len(),
            lessons = catalogue.lesson_count(),
            "Fetched skill lists"
        );

        Ok(catalogue)
    }

    fn describe(&self) -> String {
        match &self.institution {
            Some(name) => format!("{}/skills ({name})", self.base_url),
            None => format!("{}/skills", self.base_url),
        }
    }
}

/// Name the institution of a scoped response after the requested one.
///
/// The service keys institutions by the name in the URL, while the body's
/// `university_name` may carry a longer display name or be missing. Run-time
/// selection matches on the requested name, so it wins.
fn label_scoped(catalogue: &mut Catalogue, requested: &str) {
    if let [only] = catalogue.institutions.as_mut_slice() {
        if only.name.as_deref() != Some(requested) {
            debug!(
                reported = only.name.as_deref().unwrap_or("<unnamed>"),
                requested,
                "Relabelling scoped institution"
            );
            only.name = Some(requested.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scoped_response_takes_requested_name() {
        let mut catalogue = parse_contract(&json!({
            "university_name": "University of Cambridge",
            "Physics 101": ["calculus"]
        }))
        .unwrap();
        label_scoped(&mut catalogue, "Cambridge");
        assert!(catalogue.institution(Some("Cambridge")).is_ok());

        let mut unnamed = parse_contract(&json!({ "Physics 101": ["calculus"] })).unwrap();
        label_scoped(&mut unnamed, "ETH");
        assert_eq!(unnamed.institutions[0].name.as_deref(), Some("ETH"));
    }

    #[test]
    fn test_multi_institution_response_untouched() {
        let mut catalogue = parse_contract(&json!({
            "Cambridge": { "Physics 101": ["calculus"] },
            "ETH": { "Physik 1": ["mechanik"] }
        }))
        .unwrap();
        label_scoped(&mut catalogue, "ETH");
        let names: Vec<_> = catalogue.institutions.iter().map(|i| i.name.as_deref()).collect();
        assert_eq!(names, vec![Some("Cambridge"), Some("ETH")]);
    }

    #[test]
    fn test_endpoint_without_institution() {
        let source = HttpSkillSource::new("http://localhost:8000/", None).unwrap();
        assert_eq!(source.endpoint().unwrap().as_str(), "http://localhost:8000/skills");
    }

    #[test]
    fn test_endpoint_encodes_institution() {
        let source = HttpSkillSource::new("http://localhost:8000", Some("University of Cambridge")).unwrap();
        assert_eq!(
            source.endpoint().unwrap().as_str(),
            "http://localhost:8000/skills/University%20of%20Cambridge"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let source = HttpSkillSource::new("not a url", None).unwrap();
        assert!(source.endpoint().is_err());
    }
}
