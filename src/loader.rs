//! Defines the [`Loader`], which reads the content directory into memory:
//! news articles from `news/*.md`, the rosters from `team.yml` and
//! `admin.yml`, sponsors from `sponsors.yml` and the site configuration
//! from `site.yml`.
//!
//! Content is optional. A missing file or directory is logged and yields an
//! empty list (or the fallback configuration), and a broken article or
//! roster record is logged and left out without affecting the rest. No
//! loader method returns an error.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::{debug, error, warn};
use serde::Serialize;
use walkdir::WalkDir;

use crate::assets::AssetPaths;
use crate::news::{self, parse_source, process_news_item, NewsItem};
use crate::site::{assemble, fallback_site_data, RawSiteFile, SiteData};
use crate::sponsor::{process_sponsor, Sponsor};
use crate::team::{process_team_member, RawTeamMember, TeamMember};

pub const NEWS_DIRECTORY: &str = "news";
pub const TEAM_FILE: &str = "team.yml";
pub const ADMIN_FILE: &str = "admin.yml";
pub const SPONSORS_FILE: &str = "sponsors.yml";
pub const SITE_FILE: &str = "site.yml";

const MARKDOWN_EXTENSION: &str = ".md";

/// Reads content from a content directory. Every call re-reads the files;
/// nothing is cached.
pub struct Loader<'a> {
    /// The root of the content tree (usually `./content`).
    content_directory: &'a Path,

    /// Resolves image and logo paths for the current build mode.
    assets: &'a AssetPaths,
}

/// Everything the site is built from, loaded in one go.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Content {
    pub site: SiteData,
    pub news: Vec<NewsItem>,
    pub team: Vec<TeamMember>,
    pub admin: Vec<TeamMember>,
    pub sponsors: Vec<Sponsor>,
}

/// The result of loading the news directory.
#[derive(Clone, Debug, Default)]
pub struct NewsLoad {
    /// Articles sorted by date, most recent first.
    pub items: Vec<NewsItem>,

    /// Files that were left out, in the order they were encountered.
    pub skipped: Vec<Skipped>,
}

/// A news file that didn't make it into [`NewsLoad::items`].
#[derive(Clone, Debug)]
pub struct Skipped {
    pub file_name: String,
    pub reason: SkipReason,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SkipReason {
    /// The file couldn't be read or parsed; holds the error message.
    Malformed(String),

    /// A more recent article already has this slug.
    DuplicateSlug(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SkipReason::Malformed(err) => fmt::Display::fmt(err, f),
            SkipReason::DuplicateSlug(slug) => {
                write!(f, "slug `{}` is already used by a newer article", slug)
            }
        }
    }
}

impl<'a> Loader<'a> {
    /// Constructs a new loader. See fields on [`Loader`] for argument
    /// descriptions.
    pub fn new(content_directory: &'a Path, assets: &'a AssetPaths) -> Loader<'a> {
        Loader {
            content_directory,
            assets,
        }
    }

    pub fn content_directory(&self) -> &Path {
        self.content_directory
    }

    /// Loads every kind of content.
    pub fn load(&self) -> Content {
        Content {
            site: self.site_config(),
            news: self.news_items(),
            team: self.team_members(),
            admin: self.admin_team(),
            sponsors: self.sponsors(),
        }
    }

    /// All articles, most recent first.
    pub fn news_items(&self) -> Vec<NewsItem> {
        self.load_news().items
    }

    /// The article whose slug is `slug`, if any.
    pub fn news_item_by_slug(&self, slug: &str) -> Option<NewsItem> {
        self.news_items().into_iter().find(|item| item.slug == slug)
    }

    /// The slugs of all articles, most recent first.
    pub fn news_slugs(&self) -> Vec<String> {
        self.news_items().into_iter().map(|item| item.slug).collect()
    }

    /// Loads the `news` directory. Each `.md` file directly inside it
    /// becomes one [`NewsItem`]; files that fail to parse are reported in
    /// [`NewsLoad::skipped`] instead. Items are sorted by date, most recent
    /// first; articles whose date can't be parsed come last. When two files
    /// produce the same slug the more recent one is kept.
    pub fn load_news(&self) -> NewsLoad {
        let directory = self.content_directory.join(NEWS_DIRECTORY);
        let mut load = NewsLoad::default();
        if !directory.is_dir() {
            warn!(
                "News directory `{}` not found, no articles loaded",
                directory.display()
            );
            return load;
        }

        let entries = match news_files(&directory) {
            Ok(entries) => entries,
            Err(e) => {
                error!("Listing news directory `{}`: {}", directory.display(), e);
                return load;
            }
        };

        let mut parsed = Vec::with_capacity(entries.len());
        for (file_name, path) in entries {
            match self.parse_news_file(&file_name, &path) {
                Ok(item) => parsed.push((file_name, item)),
                Err(e) => {
                    warn!("Skipping news file `{}`: {}", path.display(), e);
                    load.skipped.push(Skipped {
                        file_name,
                        reason: SkipReason::Malformed(e.to_string()),
                    });
                }
            }
        }

        parsed.sort_by_cached_key(|(_, item)| Reverse(parse_date(&item.date)));

        let mut seen = HashSet::new();
        for (file_name, item) in parsed {
            if seen.insert(item.slug.clone()) {
                load.items.push(item);
            } else {
                warn!(
                    "Skipping news file `{}`: slug `{}` is already used by a newer article",
                    file_name, item.slug
                );
                load.skipped.push(Skipped {
                    file_name,
                    reason: SkipReason::DuplicateSlug(item.slug),
                });
            }
        }

        debug!(
            "Loaded {} news articles from `{}` ({} skipped)",
            load.items.len(),
            directory.display(),
            load.skipped.len()
        );
        load
    }

    fn parse_news_file(&self, file_name: &str, path: &Path) -> news::Result<NewsItem> {
        let contents = fs::read_to_string(path)?;
        let (frontmatter, body) = parse_source(&contents)
            .map_err(|e| news::Error::Annotated("parsing frontmatter".to_owned(), Box::new(e)))?;
        let images = frontmatter
            .image_sources()
            .iter()
            .map(|src| self.assets.resolve(src))
            .collect();
        Ok(process_news_item(file_name, &frontmatter, body, images))
    }

    /// The athlete roster from `team.yml`.
    pub fn team_members(&self) -> Vec<TeamMember> {
        self.roster(TEAM_FILE)
    }

    /// The admin roster from `admin.yml`.
    pub fn admin_team(&self) -> Vec<TeamMember> {
        self.roster(ADMIN_FILE)
    }

    fn roster(&self, file_name: &str) -> Vec<TeamMember> {
        self.records(file_name)
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let member = serde_yaml::from_value::<RawTeamMember>(record)
                    .map_err(|e| e.to_string())
                    .and_then(|raw| process_team_member(raw).map_err(|e| e.to_string()));
                match member {
                    Ok(member) => Some(member),
                    Err(e) => {
                        warn!("Skipping record {} of `{}`: {}", index, file_name, e);
                        None
                    }
                }
            })
            .collect()
    }

    /// The sponsors from `sponsors.yml`, with resolved logo paths.
    pub fn sponsors(&self) -> Vec<Sponsor> {
        self.records(SPONSORS_FILE)
            .into_iter()
            .enumerate()
            .filter_map(
                |(index, record)| match serde_yaml::from_value::<Sponsor>(record) {
                    Ok(sponsor) => Some(process_sponsor(sponsor, self.assets)),
                    Err(e) => {
                        warn!("Skipping record {} of `{}`: {}", index, SPONSORS_FILE, e);
                        None
                    }
                },
            )
            .collect()
    }

    /// The top-level sequence of a YAML list file, one value per record.
    /// Logs and returns nothing when the file is missing or isn't a list.
    fn records(&self, file_name: &str) -> Vec<serde_yaml::Value> {
        let path = self.content_directory.join(file_name);
        if !path.is_file() {
            warn!("`{}` not found, returning no entries", path.display());
            return Vec::new();
        }
        match read_sequence(&path) {
            Ok(records) => records,
            Err(e) => {
                error!("Loading `{}`: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    /// The site configuration from `site.yml`. If the file is missing or
    /// can't be read or parsed, the fallback configuration is returned
    /// instead.
    pub fn site_config(&self) -> SiteData {
        let path = self.content_directory.join(SITE_FILE);
        match read_yaml::<RawSiteFile>(&path) {
            Ok(raw) => assemble(&raw, self.assets),
            Err(e) => {
                warn!("Could not load `{}`, using defaults: {}", path.display(), e);
                fallback_site_data(self.assets)
            }
        }
    }
}

/// The `.md` files directly inside `directory`, sorted by file name.
fn news_files(directory: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();
    for result in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
    {
        let entry = result?;
        let file_name = entry.file_name().to_string_lossy();
        if entry.file_type().is_file() && file_name.ends_with(MARKDOWN_EXTENSION) {
            files.push((file_name.into_owned(), entry.path().to_owned()));
        }
    }
    Ok(files)
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

fn read_sequence(path: &Path) -> Result<Vec<serde_yaml::Value>> {
    match read_yaml::<serde_yaml::Value>(path)? {
        serde_yaml::Value::Sequence(records) => Ok(records),
        serde_yaml::Value::Null => Ok(Vec::new()),
        _ => Err(Error::NotASequence(path.to_owned())),
    }
}

/// Parses RFC 3339 timestamps, `YYYY-MM-DD HH:MM:SS` and bare dates (taken
/// as midnight UTC).
fn parse_date(date: &str) -> Option<DateTime<Utc>> {
    let date = date.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(date, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
}

/// The result of reading a content file.
type Result<T> = std::result::Result<T, Error>;

/// Represents an error reading a content file. These never leave the
/// [`Loader`]; they end up in the log.
#[derive(Debug)]
pub enum Error {
    /// Returned when a list file holds something other than a YAML sequence.
    NotASequence(PathBuf),

    /// Returned when there was an error parsing YAML.
    DeserializeYaml(serde_yaml::Error),

    /// Returned for I/O errors.
    Io(io::Error),

    /// Returned for WalkDir I/O errors.
    WalkDir(walkdir::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotASequence(path) => {
                write!(f, "`{}` must contain a list", path.display())
            }
            Error::DeserializeYaml(err) => fmt::Display::fmt(err, f),
            Error::Io(err) => fmt::Display::fmt(err, f),
            Error::WalkDir(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotASequence(_) => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::WalkDir(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator while walking directories.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
