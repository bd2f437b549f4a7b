//! The versioned list of assets that make up the application shell.

use serde::{Deserialize, Serialize};

/// Version string naming the current cache container.
pub const DEFAULT_VERSION: &str = "allergen-app-v1";

/// Path of the document served when a navigation cannot reach the network.
pub const ROOT_DOCUMENT: &str = "/index.html";

/// Default origin the shell is served from.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Assets cached on install, relative to the base path.
pub const DEFAULT_ASSETS: &[&str] = &[
    "/",
    "/index.html",
    "/app.js",
    "/manifest.json",
    "/icons/icon-192.png",
    "/icons/icon-512.png",
];

/// Version, origin and asset list of the application shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct AssetManifest {
    /// Cache container name; bump when any asset changes
    pub version: String,
    /// Scheme, host and port, without a trailing slash
    pub origin: String,
    /// Deployment sub-path, e.g. `/allergens`; empty for the domain root
    pub base_path: String,
    /// Asset paths, each starting with `/`
    pub assets: Vec<String>,
    /// Asset served as the offline navigation fallback
    pub root_document: String,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            base_path: String::new(),
            assets: DEFAULT_ASSETS.iter().map(|s| (*s).to_string()).collect(),
            root_document: ROOT_DOCUMENT.to_string(),
        }
    }
}

impl AssetManifest {
    /// Manifest with default assets served from `origin`.
    pub fn for_origin(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Absolute URL of an asset path.
    #[must_use]
    pub fn resolve(&self, asset: &str) -> String {
        let origin = self.origin.trim_end_matches('/');
        let base = self.base_path.trim_end_matches('/');
        let base = if base.is_empty() || base.starts_with('/') {
            base.to_string()
        } else {
            format!("/{base}")
        };
        let asset = if asset.starts_with('/') {
            asset.to_string()
        } else {
            format!("/{asset}")
        };
        format!("{origin}{base}{asset}")
    }

    /// Absolute URLs of every asset, in manifest order.
    #[must_use]
    pub fn asset_urls(&self) -> Vec<String> {
        self.assets.iter().map(|asset| self.resolve(asset)).collect()
    }

    #[must_use]
    pub fn root_document_url(&self) -> String {
        self.resolve(&self.root_document)
    }

    /// Whether `url` belongs to this manifest's origin.
    #[must_use]
    pub fn is_same_origin(&self, url: &str) -> bool {
        let origin = self.origin.trim_end_matches('/');
        url.strip_prefix(origin)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']))
    }
}
