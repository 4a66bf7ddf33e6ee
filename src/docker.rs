//! Container registry tag lookups against Docker Hub and Quay.
//!
//! Both APIs are queried unauthenticated and only the first page is read; if
//! the true latest tag is past the first page the answer is silently wrong.
//! Any HTTP or decode failure collapses to the `unknown` sentinel.

use crate::types::UNKNOWN;
use crate::version;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct QuayTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct QuayTagPage {
    #[serde(default)]
    tags: Vec<QuayTag>,
}

#[derive(Debug, Deserialize)]
struct HubTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct HubTagPage {
    #[serde(default)]
    results: Vec<HubTag>,
}

pub struct RegistryClient {
    http: reqwest::Client,
    hub_base: String,
    quay_base: String,
}

impl RegistryClient {
    pub fn new() -> Self {
        Self::with_endpoints("https://hub.docker.com", "https://quay.io")
    }

    /// Endpoint override for tests.
    pub fn with_endpoints(hub_base: impl Into<String>, quay_base: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            http,
            hub_base: hub_base.into(),
            quay_base: quay_base.into(),
        }
    }

    /// Latest tag published for an image, or `"unknown"`.
    pub async fn latest_tag(&self, image: &str) -> String {
        self.try_latest_tag(image)
            .await
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    async fn try_latest_tag(&self, image: &str) -> Option<String> {
        if image.contains("quay.io") {
            version::latest_numeric(self.quay_tags(image).await?)
        } else if image.contains("cloudflare/cloudflared") {
            // cloudflared publishes date tags, not semantic versions.
            version::latest_dated(self.hub_tags(image).await?)
        } else {
            version::latest_numeric(self.hub_tags(image).await?)
        }
    }

    async fn quay_tags(&self, image: &str) -> Option<Vec<String>> {
        let repo = image.trim_start_matches("quay.io/");
        let url = format!("{}/api/v1/repository/{}/tag", self.quay_base, repo);
        let page: QuayTagPage = self
            .http
            .get(url)
            .query(&[("limit", "100"), ("onlyActiveTags", "true")])
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?
            .json()
            .await
            .ok()?;
        Some(page.tags.into_iter().map(|t| t.name).collect())
    }

    async fn hub_tags(&self, image: &str) -> Option<Vec<String>> {
        // Bare image names live in Docker Hub's "library" namespace.
        let (namespace, repo) = match image.split_once('/') {
            Some((ns, _)) => (ns, image.rsplit('/').next().unwrap_or(image)),
            None => ("library", image),
        };
        let url = format!(
            "{}/v2/repositories/{}/{}/tags",
            self.hub_base, namespace, repo
        );
        let page: HubTagPage = self
            .http
            .get(url)
            .query(&[("page_size", "100")])
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?
            .json()
            .await
            .ok()?;
        Some(page.results.into_iter().map(|t| t.name).collect())
    }
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new()
    }
}
