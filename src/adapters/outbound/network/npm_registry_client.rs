use crate::graph_resolution::domain::{PackageMetadata, PackageName};
use crate::ports::outbound::{MetadataSource, PackageSearch, SearchHit};
use crate::shared::error::DepGraphError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_RETRIES: u32 = 3;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    objects: Vec<SearchObject>,
}

#[derive(Debug, Deserialize)]
struct SearchObject {
    package: SearchPackage,
}

#[derive(Debug, Deserialize)]
struct SearchPackage {
    name: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl From<SearchObject> for SearchHit {
    fn from(object: SearchObject) -> Self {
        SearchHit {
            name: object.package.name,
            version: object.package.version,
            description: object.package.description,
        }
    }
}

/// Outcome of a single registry request
enum Attempt {
    NotFound,
    /// Transport errors and server-side failures
    Retryable(String),
    Fatal(String),
}

/// NpmRegistryClient adapter for the npm registry HTTP API
///
/// Implements [`MetadataSource`] (`GET {registry}/{name}`) and
/// [`PackageSearch`] (`GET {registry}/-/v1/search`).
///
/// A 404 maps to `NotFound` right away. Transport errors and 5xx responses
/// are retried with a linear backoff; anything else maps to `MetadataFetch`.
pub struct NpmRegistryClient {
    client: reqwest::Client,
    registry_url: String,
    max_retries: u32,
}

impl NpmRegistryClient {
    /// Creates a client for the public registry with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(
            DEFAULT_REGISTRY_URL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            DEFAULT_MAX_RETRIES,
        )
    }

    pub fn with_config(registry_url: &str, timeout: Duration, max_retries: u32) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("depgraph/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            registry_url: registry_url.trim_end_matches('/').to_string(),
            max_retries: max_retries.max(1),
        })
    }

    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    /// Builds the document URL, keeping the scope's `@` and escaping its `/`
    fn package_url(&self, package_name: &str) -> Result<String> {
        // Security: reject names that could rewrite the request path
        let name = PackageName::new(package_name)?;
        let path = match name.as_str().strip_prefix('@') {
            Some(scoped) => {
                let (scope, bare) = scoped.split_once('/').unwrap_or((scoped, ""));
                format!(
                    "@{}%2F{}",
                    urlencoding::encode(scope),
                    urlencoding::encode(bare)
                )
            }
            None => urlencoding::encode(name.as_str()).into_owned(),
        };
        Ok(format!("{}/{}", self.registry_url, path))
    }

    fn search_url(&self, text: &str, size: usize) -> String {
        format!(
            "{}/-/v1/search?text={}&size={}",
            self.registry_url,
            urlencoding::encode(text),
            size
        )
    }

    async fn fetch_once(&self, url: &str) -> std::result::Result<PackageMetadata, Attempt> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Attempt::Retryable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Attempt::NotFound);
        }
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Attempt::Retryable(format!(
                "Registry returned status code {}",
                status
            )));
        }
        if !status.is_success() {
            return Err(Attempt::Fatal(format!(
                "Registry returned status code {}",
                status
            )));
        }

        response
            .json::<PackageMetadata>()
            .await
            .map_err(|e| Attempt::Fatal(format!("Invalid registry document: {}", e)))
    }

    /// Fetches a registry document with retry logic (async)
    async fn fetch_with_retry(&self, package_name: &str) -> Result<PackageMetadata> {
        let url = self.package_url(package_name)?;
        let mut last_error = String::new();

        for attempt in 1..=self.max_retries {
            match self.fetch_once(&url).await {
                Ok(metadata) => return Ok(metadata),
                Err(Attempt::NotFound) => {
                    return Err(DepGraphError::NotFound {
                        package: package_name.to_string(),
                    }
                    .into())
                }
                Err(Attempt::Fatal(details)) => {
                    return Err(DepGraphError::MetadataFetch {
                        package: package_name.to_string(),
                        details,
                    }
                    .into())
                }
                Err(Attempt::Retryable(details)) => {
                    debug!(package = %package_name, attempt, error = %details, "registry request failed");
                    last_error = details;
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
            }
        }

        Err(DepGraphError::MetadataFetch {
            package: package_name.to_string(),
            details: last_error,
        }
        .into())
    }
}

#[async_trait]
impl MetadataSource for NpmRegistryClient {
    async fn fetch_metadata(&self, package_name: &str) -> Result<PackageMetadata> {
        self.fetch_with_retry(package_name).await
    }
}

#[async_trait]
impl PackageSearch for NpmRegistryClient {
    async fn search(&self, text: &str, size: usize) -> Result<Vec<SearchHit>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let url = self.search_url(text.trim(), size);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("Registry search returned status code {}", response.status());
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.objects.into_iter().map(SearchHit::from).collect())
    }
}
