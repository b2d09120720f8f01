//! Build configuration: where the content lives and which asset base path
//! applies.

use std::path::{Path, PathBuf};

use log::warn;

use crate::assets::AssetPaths;

/// Name of the content directory looked up by [`Config::from_directory`].
pub const CONTENT_DIRECTORY: &str = "content";

pub struct Config {
    /// The root of the content tree.
    pub content_directory: PathBuf,

    /// Asset path resolution for the selected build mode.
    pub assets: AssetPaths,
}

impl Config {
    /// Builds a configuration for an explicit content directory.
    pub fn new(content_directory: PathBuf, production: bool) -> Config {
        Config {
            content_directory,
            assets: AssetPaths::for_mode(production),
        }
    }

    /// Looks for a `content` directory in `dir` and then in each of its
    /// ancestors. If there is none, `dir/content` is used anyway; the loaders
    /// treat missing content as empty.
    pub fn from_directory(dir: &Path, production: bool) -> Config {
        match find_content_directory(dir) {
            Some(content_directory) => Config::new(content_directory, production),
            None => {
                let content_directory = dir.join(CONTENT_DIRECTORY);
                warn!(
                    "No `{}` directory found in `{}` or any parent directory, using `{}`",
                    CONTENT_DIRECTORY,
                    dir.display(),
                    content_directory.display()
                );
                Config::new(content_directory, production)
            }
        }
    }
}

fn find_content_directory(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .map(|ancestor| ancestor.join(CONTENT_DIRECTORY))
        .find(|candidate| candidate.is_dir())
}
