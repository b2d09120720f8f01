//! Defines [`AssetPaths`], which turns the image and logo paths written in
//! content files into the paths the published site serves them from.

/// Base path of the production deployment.
pub const PRODUCTION_BASE_PATH: &str = "/pentasus-dragonboat.github.io";

/// Resolves asset paths against the base path of the current build mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetPaths {
    /// Prefix prepended to every site-local path. Empty in development.
    base_path: String,
}

impl AssetPaths {
    /// Constructs a resolver with an arbitrary `base_path` (e.g.
    /// `/my-project`). A trailing slash is ignored.
    pub fn new(base_path: &str) -> AssetPaths {
        AssetPaths {
            base_path: base_path.trim_end_matches('/').to_owned(),
        }
    }

    /// Paths are served from the site root.
    pub fn development() -> AssetPaths {
        AssetPaths::default()
    }

    /// Paths are served from under [`PRODUCTION_BASE_PATH`].
    pub fn production() -> AssetPaths {
        AssetPaths::new(PRODUCTION_BASE_PATH)
    }

    /// Picks [`AssetPaths::production`] or [`AssetPaths::development`].
    pub fn for_mode(production: bool) -> AssetPaths {
        if production {
            AssetPaths::production()
        } else {
            AssetPaths::development()
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Resolves `src`. Remote (`http...`) and inline (`data:`) sources are
    /// returned untouched; anything else is made root-relative and prefixed
    /// with the base path.
    pub fn resolve(&self, src: &str) -> String {
        if src.starts_with("http") || src.starts_with("data:") {
            return src.to_owned();
        }
        if src.starts_with('/') {
            format!("{}{}", self.base_path, src)
        } else {
            format!("{}/{}", self.base_path, src)
        }
    }
}
