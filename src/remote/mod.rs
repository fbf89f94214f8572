//! Package repository and catalog client
//!
//! Endpoints, relative to the configured base URLs:
//!
//! ```text
//! <repository>/kloset/recipe/<api>/<name>.yaml      recipe
//! <repository>/kloset/pkg/<api>/<canonical>.ptar    artifact
//! <api-url>/v1/integrations/<api>.json              catalog
//! ```

mod auth;
mod catalog;
mod recipe;

pub use auth::{BearerAuthorizer, RequestAuthorizer};
pub use catalog::{
    Installation, InstallationStatus, Integration, IntegrationIndex, IntegrationType,
    IntegrationTypes,
};
pub use recipe::Recipe;

use std::io::Read;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::AUTHORIZATION;
use tracing::debug;

use crate::error::{Result, authorization_required, fetch_failed, http_error};
use crate::package::{PLUGIN_API_VERSION, PackageIdentity};
use crate::platform::Platform;

/// Default package repository
pub const DEFAULT_REPOSITORY_URL: &str = "https://plugins.plakar.io";

/// Default catalog API
pub const DEFAULT_API_URL: &str = "https://api.plakar.io";

/// Connection timeout; downloads themselves are not bounded
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Product name sent as user agent when none is configured
pub fn default_user_agent() -> String {
    format!("kpkg/{}", env!("CARGO_PKG_VERSION"))
}

/// Settings of a [`RemoteClient`]
#[derive(Debug, Clone)]
pub struct RemoteOptions {
    pub repository_url: String,
    pub api_url: String,
    /// Artifact downloads must carry credentials
    pub binary_needs_auth: bool,
    /// Product name; the platform is appended as ` (os/arch)`
    pub user_agent: String,
    pub platform: Platform,
}

impl Default for RemoteOptions {
    fn default() -> Self {
        Self {
            repository_url: DEFAULT_REPOSITORY_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            binary_needs_auth: false,
            user_agent: default_user_agent(),
            platform: Platform::host(),
        }
    }
}

/// Blocking HTTP client for the repository and the catalog API
pub struct RemoteClient {
    client: Client,
    options: RemoteOptions,
    user_agent: String,
    authorizer: Option<Box<dyn RequestAuthorizer>>,
}

impl std::fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient")
            .field("options", &self.options)
            .field("user_agent", &self.user_agent)
            .field("authorizer", &self.authorizer.is_some())
            .finish()
    }
}

impl RemoteClient {
    pub fn new(options: RemoteOptions) -> Result<Self> {
        let product = if options.user_agent.is_empty() {
            default_user_agent()
        } else {
            options.user_agent.clone()
        };
        let user_agent = format!("{product} ({})", options.platform);

        let client = Client::builder()
            .user_agent(user_agent.clone())
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| http_error(&options.repository_url, e))?;

        Ok(Self {
            client,
            options,
            user_agent,
            authorizer: None,
        })
    }

    /// Use `authorizer` for endpoints that require credentials
    #[must_use]
    pub fn with_authorizer(mut self, authorizer: impl RequestAuthorizer + 'static) -> Self {
        self.authorizer = Some(Box::new(authorizer));
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn platform(&self) -> &Platform {
        &self.options.platform
    }

    /// Fetch the recipe of package `name`
    pub fn fetch_recipe(&self, name: &str) -> Result<Recipe> {
        let endpoint = format!("kloset/recipe/{PLUGIN_API_VERSION}/{name}.yaml");
        let url = endpoint_url(&self.options.repository_url, &endpoint);
        let mut response = self.fetch(&url, false)?;

        let mut body = Vec::new();
        response
            .read_to_end(&mut body)
            .map_err(|e| http_error(&url, e))?;
        Recipe::parse(&body, &url)
    }

    /// Start downloading the artifact of `identity`
    ///
    /// The response body is the artifact.
    pub fn fetch_package(&self, identity: &PackageIdentity) -> Result<Response> {
        let endpoint = format!("kloset/pkg/{PLUGIN_API_VERSION}/{}", identity.file_name());
        let url = endpoint_url(&self.options.repository_url, &endpoint);
        self.fetch(&url, self.options.binary_needs_auth)
    }

    /// Fetch the integration catalog
    pub fn fetch_catalog(&self) -> Result<Vec<Integration>> {
        let endpoint = format!("v1/integrations/{PLUGIN_API_VERSION}.json");
        let url = endpoint_url(&self.options.api_url, &endpoint);
        let response = self.fetch(&url, false)?;

        let index: IntegrationIndex =
            serde_json::from_reader(response).map_err(|e| http_error(&url, e))?;
        Ok(index.integrations)
    }

    /// GET `url`, failing on anything but 200
    ///
    /// When `requires_auth` is set the authorizer must have added an
    /// `Authorization` header, otherwise nothing is sent.
    fn fetch(&self, url: &str, requires_auth: bool) -> Result<Response> {
        let mut request = self
            .client
            .get(url)
            .build()
            .map_err(|e| http_error(url, e))?;

        if requires_auth {
            if let Some(authorizer) = &self.authorizer {
                authorizer.authorize(request.headers_mut())?;
            }
            if !request.headers().contains_key(AUTHORIZATION) {
                return Err(authorization_required(url));
            }
        }

        debug!(url, "GET");
        let response = self.client.execute(request).map_err(|e| http_error(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(fetch_failed(
                url,
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }
        Ok(response)
    }
}

fn endpoint_url(base: &str, endpoint: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), endpoint.trim_start_matches('/'))
}
