//! Defines the [`NewsItem`] type and the logic for turning a Markdown source
//! file (YAML frontmatter followed by a body) into one. See
//! [`process_news_item`] for the defaults applied to missing fields.

use std::fmt;

use chrono::{SecondsFormat, Utc};
use pulldown_cmark::{html, Options, Parser};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

use crate::excerpt::{calculate_reading_time, excerpt};
use crate::slug::generate_slug;

pub const DEFAULT_TITLE: &str = "Untitled Article";
pub const DEFAULT_CATEGORY: &str = "News";
pub const PLACEHOLDER_IMAGE: &str = "/images/news/placeholder.jpg";
pub const VIDEO_DIRECTORY: &str = "/video";
pub const DEFAULT_IMAGE_DURATION: f64 = 5.0;

/// A published article.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Same as `slug`.
    pub id: String,
    pub slug: String,
    pub title: String,

    /// ISO-8601 date (or date-time) of publication.
    pub date: String,
    pub category: String,

    /// The raw Markdown body. See [`NewsItem::content_html`].
    pub content: String,
    pub featured: bool,

    /// Resolved image paths; never empty.
    pub images: Vec<String>,
    pub excerpt: String,

    /// Estimated minutes to read `content`.
    pub reading_time: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Path of the article's video, under `/video/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_media: Option<HeroMedia>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub carousel: Option<Carousel>,
}

impl NewsItem {
    /// Renders the Markdown body to HTML.
    pub fn content_html(&self) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_SMART_PUNCTUATION);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);

        let mut out = String::with_capacity(self.content.len() * 3 / 2);
        html::push_html(&mut out, Parser::new_ext(&self.content, options));
        out
    }
}

/// Which medium leads an article page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroMedia {
    Video,
    Image,
}

/// Display timing for an article's image carousel.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Carousel {
    pub auto_play: bool,

    /// Seconds each image stays on screen.
    pub image_duration: f64,
    pub pause_on_hover: bool,
}

/// The frontmatter of a news source file, as written. Every field is
/// optional; [`process_news_item`] fills in the gaps.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    #[serde(default, deserialize_with = "scalar")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "scalar")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "scalar")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "scalar")]
    pub excerpt: Option<String>,

    #[serde(default)]
    pub featured: Option<bool>,

    #[serde(default)]
    pub images: Option<Vec<String>>,

    /// Older articles list their pictures under `placeholders`; used only
    /// when `images` is missing.
    #[serde(default)]
    pub placeholders: Option<Vec<String>>,

    #[serde(default, deserialize_with = "scalar")]
    pub author: Option<String>,

    /// File name of the video under `/video/`.
    #[serde(default, deserialize_with = "scalar")]
    pub video: Option<String>,

    #[serde(default)]
    pub hero_media: Option<HeroMedia>,

    #[serde(default)]
    pub carousel: Option<RawCarousel>,
}

impl Frontmatter {
    /// The image list as written: `images`, else `placeholders`, else empty.
    pub fn image_sources(&self) -> &[String] {
        self.images
            .as_deref()
            .or(self.placeholders.as_deref())
            .unwrap_or(&[])
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawCarousel {
    #[serde(default)]
    pub auto_play: Option<bool>,

    #[serde(default)]
    pub image_duration: Option<f64>,

    #[serde(default)]
    pub pause_on_hover: Option<bool>,
}

impl From<&RawCarousel> for Carousel {
    fn from(raw: &RawCarousel) -> Carousel {
        Carousel {
            auto_play: raw.auto_play != Some(false),
            image_duration: match raw.image_duration {
                Some(d) if d != 0.0 => d,
                _ => DEFAULT_IMAGE_DURATION,
            },
            pause_on_hover: raw.pause_on_hover != Some(false),
        }
    }
}

/// Accepts any YAML scalar as a string, so `title: 2025` or an unquoted
/// date both come through as text.
pub(crate) fn scalar<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_yaml::Value;
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => {
            return Err(D::Error::custom(format!(
                "expected a string, found {:?}",
                other
            )))
        }
    })
}

/// Treats an empty string the same as a missing one.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// The current time as an ISO-8601 string with millisecond precision.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builds a [`NewsItem`] from a parsed source file.
///
/// * `file_name` is the source file name; the slug is derived from it.
/// * `frontmatter` is the parsed frontmatter.
/// * `content` is the Markdown body.
/// * `images` are the already-resolved image paths.
///
/// Missing fields get their defaults (`"Untitled Article"`, `"News"`, the
/// current time, a placeholder image). `author`, `video`/`hero_media` and
/// `carousel` are only set when the frontmatter has them.
pub fn process_news_item(
    file_name: &str,
    frontmatter: &Frontmatter,
    content: &str,
    images: Vec<String>,
) -> NewsItem {
    let slug = generate_slug(file_name);
    let mut item = NewsItem {
        id: slug.clone(),
        slug,
        title: non_empty(&frontmatter.title)
            .unwrap_or(DEFAULT_TITLE)
            .to_owned(),
        date: non_empty(&frontmatter.date)
            .map(str::to_owned)
            .unwrap_or_else(now_iso8601),
        category: non_empty(&frontmatter.category)
            .unwrap_or(DEFAULT_CATEGORY)
            .to_owned(),
        content: content.to_owned(),
        featured: frontmatter.featured.unwrap_or(false),
        images: if images.is_empty() {
            vec![PLACEHOLDER_IMAGE.to_owned()]
        } else {
            images
        },
        excerpt: non_empty(&frontmatter.excerpt)
            .map(str::to_owned)
            .unwrap_or_else(|| excerpt(content)),
        reading_time: calculate_reading_time(content),
        author: None,
        video: None,
        hero_media: None,
        carousel: None,
    };

    if let Some(author) = non_empty(&frontmatter.author) {
        item.author = Some(author.to_owned());
    }

    if let Some(video) = non_empty(&frontmatter.video) {
        item.video = Some(format!("{}/{}", VIDEO_DIRECTORY, video));
        item.hero_media = Some(frontmatter.hero_media.unwrap_or(HeroMedia::Video));
    } else if let Some(hero_media) = frontmatter.hero_media {
        item.hero_media = Some(hero_media);
    }

    if let Some(carousel) = &frontmatter.carousel {
        item.carousel = Some(carousel.into());
    }

    item
}

/// Splits a source file into its parsed frontmatter and its body. A file
/// that doesn't begin with a `---` fence has no frontmatter and the whole
/// input is the body. For example:
///
/// ```md
/// ---
/// title: First Race
/// date: 2025-06-01
/// images: [start.jpg, finish.jpg]
/// ---
/// We raced hard.
/// ```
pub fn parse_source(input: &str) -> Result<(Frontmatter, &str)> {
    const FENCE: &str = "---";

    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let after_open = match input.strip_prefix(FENCE) {
        Some(rest) => rest,
        None => return Ok((Frontmatter::default(), input)),
    };

    let (yaml, body) = if after_open.starts_with(FENCE) {
        // `------`: empty frontmatter closed on the opening line
        ("", &after_open[FENCE.len()..])
    } else {
        let close = after_open
            .find(&format!("\n{}", FENCE))
            .ok_or(Error::FrontmatterMissingEndFence)?;
        (
            &after_open[..close],
            &after_open[close + 1 + FENCE.len()..],
        )
    };

    // The body starts on the line after the closing fence.
    let body = match body.find('\n') {
        Some(i) if body[..i].trim().is_empty() => &body[i + 1..],
        None if body.trim().is_empty() => "",
        _ => body,
    };

    let frontmatter = if yaml.trim().is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(yaml)?
    };
    Ok((frontmatter, body))
}

/// Represents the result of parsing a news source file.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a news source file.
#[derive(Debug)]
pub enum Error {
    /// Returned when the opening fence was found but the closing `---` was
    /// not.
    FrontmatterMissingEndFence,

    /// Returned when there was an error parsing the frontmatter as YAML.
    DeserializeYaml(serde_yaml::Error),

    /// Returned for I/O errors reading the source file.
    Io(std::io::Error),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::FrontmatterMissingEndFence => {
                write!(f, "missing closing `---` after frontmatter")
            }
            Error::DeserializeYaml(err) => fmt::Display::fmt(err, f),
            Error::Io(err) => fmt::Display::fmt(err, f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FrontmatterMissingEndFence => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
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

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_source() -> Result<()> {
        let (frontmatter, body) = parse_source(
            "---\ntitle: First Race\ndate: 2025-06-01\nimages: [a.jpg, b.jpg]\n---\nWe raced hard.\n",
        )?;
        assert_eq!(Some("First Race"), frontmatter.title.as_deref());
        assert_eq!(Some("2025-06-01"), frontmatter.date.as_deref());
        assert_eq!(vec!["a.jpg", "b.jpg"], frontmatter.image_sources());
        assert_eq!("We raced hard.\n", body);
        Ok(())
    }

    #[test]
    fn test_parse_source_without_frontmatter() -> Result<()> {
        let (frontmatter, body) = parse_source("Just a body.")?;
        assert!(frontmatter.title.is_none());
        assert_eq!("Just a body.", body);
        Ok(())
    }

    #[test]
    fn test_parse_source_with_empty_frontmatter() -> Result<()> {
        let (frontmatter, body) = parse_source("---\n---\nBody")?;
        assert!(frontmatter.date.is_none());
        assert_eq!("Body", body);
        Ok(())
    }

    #[test]
    fn test_parse_source_keeps_horizontal_rules_in_body() -> Result<()> {
        let (_, body) = parse_source("---\ntitle: x\n---\nabove\n\n---\n\nbelow")?;
        assert_eq!("above\n\n---\n\nbelow", body);
        Ok(())
    }

    #[test]
    fn test_parse_source_missing_end_fence() {
        match parse_source("---\ntitle: x\nno closing fence") {
            Err(Error::FrontmatterMissingEndFence) => {}
            other => panic!("unexpected result: {:?}", other.map(|(_, b)| b)),
        }
    }

    #[test]
    fn test_parse_source_invalid_yaml() {
        match parse_source("---\ntitle: [unclosed\n---\nbody") {
            Err(Error::DeserializeYaml(_)) => {}
            other => panic!("unexpected result: {:?}", other.map(|(_, b)| b)),
        }
    }

    #[test]
    fn test_scalar_fields_accept_numbers() -> Result<()> {
        let (frontmatter, _) = parse_source("---\ntitle: 2025\ncategory: true\n---\n")?;
        assert_eq!(Some("2025"), frontmatter.title.as_deref());
        assert_eq!(Some("true"), frontmatter.category.as_deref());
        Ok(())
    }

    #[test]
    fn test_placeholders_are_used_when_images_are_missing() -> Result<()> {
        let (frontmatter, _) = parse_source("---\nplaceholders: [p.jpg]\n---\n")?;
        assert_eq!(vec!["p.jpg"], frontmatter.image_sources());

        let (frontmatter, _) =
            parse_source("---\nimages: []\nplaceholders: [p.jpg]\n---\n")?;
        assert!(frontmatter.image_sources().is_empty());
        Ok(())
    }

    #[test]
    fn test_defaults() {
        let item = process_news_item("Hello World.md", &Frontmatter::default(), "", Vec::new());
        assert_eq!("hello-world", item.slug);
        assert_eq!(item.slug, item.id);
        assert_eq!(DEFAULT_TITLE, item.title);
        assert_eq!(DEFAULT_CATEGORY, item.category);
        assert!(!item.featured);
        assert_eq!(vec![PLACEHOLDER_IMAGE.to_owned()], item.images);
        assert_eq!(1, item.reading_time);
        assert!(chrono::DateTime::parse_from_rfc3339(&item.date).is_ok(), "{}", item.date);
        assert!(item.author.is_none());
        assert!(item.video.is_none());
        assert!(item.hero_media.is_none());
        assert!(item.carousel.is_none());
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let frontmatter = Frontmatter {
            title: Some(String::new()),
            category: Some(String::new()),
            author: Some(String::new()),
            excerpt: Some(String::new()),
            ..Frontmatter::default()
        };
        let content = "The whole crew met at the boathouse early.";
        let item = process_news_item("x.md", &frontmatter, content, Vec::new());
        assert_eq!(DEFAULT_TITLE, item.title);
        assert_eq!(DEFAULT_CATEGORY, item.category);
        assert_eq!(content, item.excerpt);
        assert!(item.author.is_none());
    }

    #[test]
    fn test_explicit_excerpt_is_kept() {
        let frontmatter = Frontmatter {
            excerpt: Some("Hand-written summary".to_owned()),
            ..Frontmatter::default()
        };
        let item = process_news_item("x.md", &frontmatter, "Body text here.", Vec::new());
        assert_eq!("Hand-written summary", item.excerpt);
    }

    #[test]
    fn test_video_defaults_hero_media_to_video() {
        let frontmatter = Frontmatter {
            video: Some("race.mp4".to_owned()),
            ..Frontmatter::default()
        };
        let item = process_news_item("x.md", &frontmatter, "", Vec::new());
        assert_eq!(Some("/video/race.mp4"), item.video.as_deref());
        assert_eq!(Some(HeroMedia::Video), item.hero_media);

        let frontmatter = Frontmatter {
            video: Some("race.mp4".to_owned()),
            hero_media: Some(HeroMedia::Image),
            ..Frontmatter::default()
        };
        let item = process_news_item("x.md", &frontmatter, "", Vec::new());
        assert_eq!(Some(HeroMedia::Image), item.hero_media);
    }

    #[test]
    fn test_hero_media_without_video() {
        let frontmatter = Frontmatter {
            hero_media: Some(HeroMedia::Image),
            ..Frontmatter::default()
        };
        let item = process_news_item("x.md", &frontmatter, "", Vec::new());
        assert!(item.video.is_none());
        assert_eq!(Some(HeroMedia::Image), item.hero_media);
    }

    #[test]
    fn test_carousel_defaults() -> Result<()> {
        let (frontmatter, _) = parse_source("---\ncarousel:\n  imageDuration: 0\n---\n")?;
        let item = process_news_item("x.md", &frontmatter, "", Vec::new());
        assert_eq!(
            Some(Carousel {
                auto_play: true,
                image_duration: 5.0,
                pause_on_hover: true,
            }),
            item.carousel
        );

        let (frontmatter, _) = parse_source(
            "---\ncarousel:\n  autoPlay: false\n  imageDuration: 3\n  pauseOnHover: false\n---\n",
        )?;
        let item = process_news_item("x.md", &frontmatter, "", Vec::new());
        assert_eq!(
            Some(Carousel {
                auto_play: false,
                image_duration: 3.0,
                pause_on_hover: false,
            }),
            item.carousel
        );
        Ok(())
    }

    #[test]
    fn test_optional_fields_are_not_serialized_when_missing() {
        let item = process_news_item("x.md", &Frontmatter::default(), "", Vec::new());
        let json = serde_json::to_value(&item).unwrap();
        let object = json.as_object().unwrap();
        for key in ["author", "video", "heroMedia", "carousel"] {
            assert!(!object.contains_key(key), "unexpected key {}", key);
        }
        for key in ["id", "slug", "readingTime", "images", "excerpt"] {
            assert!(object.contains_key(key), "missing key {}", key);
        }
    }

    #[test]
    fn test_content_html() {
        let item = process_news_item(
            "x.md",
            &Frontmatter::default(),
            "# Race day\n\nWe **won**.",
            Vec::new(),
        );
        let html = item.content_html();
        assert!(html.contains("<h1>Race day</h1>"), "{}", html);
        assert!(html.contains("<strong>won</strong>"), "{}", html);
    }
}
