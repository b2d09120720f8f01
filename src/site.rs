//! Site-wide configuration: the [`SiteData`] handed to every page, built
//! from `site.yml` by [`assemble`] or substituted by [`fallback_site_data`]
//! when that file can't be used. Also home to the theme-mode switch
//! ([`ThemeMode`]).

use serde::{Deserialize, Serialize};

use crate::assets::AssetPaths;
use crate::news::{scalar, HeroMedia};

pub const DEFAULT_NAME: &str = "PENTASUS";
pub const DEFAULT_TAGLINE: &str = "Champions on water, friends for life";
pub const DEFAULT_DESCRIPTION: &str = "United by tradition, driven by excellence.";
pub const LOGO: &str = "/images/logo/pentasus-logo.png";
pub const FALLBACK_FAVICON: &str = "/favicon.ico";
pub const DEFAULT_LOGO_FALLBACK: &str = "waves";
pub const DEFAULT_WECHAT_BLOG_URL: &str = "https://mp.weixin.qq.com/s/pentasus-dragon-boat-journey";
pub const DEFAULT_FALLBACK_GRADIENT: &str = "from-yellow-100 via-pink-100 to-blue-100";
pub const DEFAULT_SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.3)";
pub const DEFAULT_OVERLAY_SOLID: &str = "rgba(0, 0, 0, 0.4)";
pub const DEFAULT_OVERLAY_GRADIENT: &str =
    "linear-gradient(to bottom, rgba(0,0,0,0.2), rgba(0,0,0,0.6))";
pub const DEFAULT_IMAGE_DURATION: f64 = 5.0;

/// Everything a page needs to know about the site.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SiteData {
    pub site: SiteConfig,
    pub navigation: Vec<NavigationItem>,
    pub universities: Vec<University>,
    pub contact: Contact,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub logo: String,

    /// Icon name shown when the logo image can't be loaded.
    pub logo_fallback: String,
    pub favicon: String,
    pub wechat_blog_url: String,
    pub hero: HeroConfig,
}

/// Presentation settings for the landing section.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroConfig {
    /// Image or video path. A non-blank value switches the whole site to
    /// [`ThemeMode::Minimalist`].
    pub background_image: String,

    /// Tailwind gradient classes used when there is no background.
    pub fallback_gradient: String,
    pub logo_enhancement: LogoEnhancement,
    pub overlay: Overlay,
    pub text_optimization: TextOptimization,
    pub title: String,
    pub subtitle: String,
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub carousel: Option<HeroCarousel>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoEnhancement {
    pub drop_shadow: bool,
    pub shadow_intensity: Intensity,
    pub shadow_color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Overlay {
    pub enabled: bool,

    #[serde(rename = "type")]
    pub kind: OverlayKind,
    pub solid: String,
    pub gradient: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOptimization {
    pub use_white_text: bool,
    pub add_text_shadow: bool,
    pub enhance_contrast: bool,
    pub shadow_intensity: Intensity,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Light,
    #[default]
    Medium,
    Strong,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    Solid,
    #[default]
    Gradient,
    None,
}

/// Rotating hero backgrounds.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroCarousel {
    pub auto_play: bool,

    /// Seconds per slide.
    pub image_duration: f64,
    pub pause_on_hover: bool,
    pub media: Vec<MediaEntry>,
}

/// One hero carousel slide: a bare path, or a path with an explicit media
/// type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaEntry {
    Path(String),
    Typed {
        #[serde(rename = "type")]
        kind: HeroMedia,
        src: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub name: String,
    pub href: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    pub name: String,
    pub logo: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub sections: Vec<ContactSection>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSection {
    pub title: String,

    /// Name of the icon drawn next to the section.
    pub icon: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

/// The two presentation variants of the site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// A hero background is configured.
    Minimalist,
    Cartoon,
}

impl ThemeMode {
    pub fn of(data: &SiteData) -> ThemeMode {
        if is_minimalist(data) {
            ThemeMode::Minimalist
        } else {
            ThemeMode::Cartoon
        }
    }
}

/// Whether the site renders in [`ThemeMode::Minimalist`].
pub fn is_minimalist(data: &SiteData) -> bool {
    detect_style_mode(&data.site.hero.background_image)
}

/// True iff `background_image` is non-blank.
pub fn detect_style_mode(background_image: &str) -> bool {
    !background_image.trim().is_empty()
}

/// `site.yml` as written. Every field may be missing.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct RawSiteFile {
    #[serde(default)]
    pub site: Option<RawSite>,

    #[serde(default)]
    pub navigation: Option<Vec<NavigationItem>>,

    #[serde(default)]
    pub universities: Option<Vec<University>>,

    #[serde(default)]
    pub contact: Option<Contact>,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawSite {
    #[serde(default, deserialize_with = "scalar")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub logo_fallback: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub wechat_blog_url: Option<String>,
    #[serde(default)]
    pub hero: Option<RawHero>,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawHero {
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub fallback_gradient: Option<String>,
    #[serde(default)]
    pub logo_enhancement: Option<RawLogoEnhancement>,
    #[serde(default)]
    pub overlay: Option<RawOverlay>,
    #[serde(default)]
    pub text_optimization: Option<RawTextOptimization>,
    #[serde(default, deserialize_with = "scalar")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub description: Option<String>,
    #[serde(default)]
    pub carousel: Option<RawHeroCarousel>,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawLogoEnhancement {
    #[serde(default)]
    pub drop_shadow: Option<bool>,
    #[serde(default)]
    pub shadow_intensity: Option<Intensity>,
    #[serde(default)]
    pub shadow_color: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct RawOverlay {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default, rename = "type")]
    pub kind: Option<OverlayKind>,
    #[serde(default)]
    pub solid: Option<String>,
    #[serde(default)]
    pub gradient: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawTextOptimization {
    #[serde(default)]
    pub use_white_text: Option<bool>,
    #[serde(default)]
    pub add_text_shadow: Option<bool>,
    #[serde(default)]
    pub enhance_contrast: Option<bool>,
    #[serde(default)]
    pub shadow_intensity: Option<Intensity>,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawHeroCarousel {
    #[serde(default)]
    pub auto_play: Option<bool>,
    #[serde(default)]
    pub image_duration: Option<f64>,
    #[serde(default)]
    pub pause_on_hover: Option<bool>,
    #[serde(default)]
    pub media: Option<Vec<MediaEntry>>,
}

/// `value` unless it is missing or empty, else `default`.
fn text_or(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_owned()
}

/// Merges a parsed `site.yml` with the defaults. Empty strings, zero
/// durations and missing values all take the default; switches that are on
/// by default stay on unless explicitly `false`.
pub fn assemble(raw: &RawSiteFile, assets: &AssetPaths) -> SiteData {
    let site = raw.site.clone().unwrap_or_default();
    let hero = site.hero.clone().unwrap_or_default();
    let logo_enhancement = hero.logo_enhancement.clone().unwrap_or_default();
    let overlay = hero.overlay.clone().unwrap_or_default();
    let text = hero.text_optimization.clone().unwrap_or_default();

    let hero_config = HeroConfig {
        background_image: text_or(&hero.background_image, ""),
        fallback_gradient: text_or(&hero.fallback_gradient, DEFAULT_FALLBACK_GRADIENT),
        logo_enhancement: LogoEnhancement {
            drop_shadow: logo_enhancement.drop_shadow != Some(false),
            shadow_intensity: logo_enhancement.shadow_intensity.unwrap_or_default(),
            shadow_color: text_or(&logo_enhancement.shadow_color, DEFAULT_SHADOW_COLOR),
        },
        overlay: Overlay {
            enabled: overlay.enabled != Some(false),
            kind: overlay.kind.unwrap_or_default(),
            solid: text_or(&overlay.solid, DEFAULT_OVERLAY_SOLID),
            gradient: text_or(&overlay.gradient, DEFAULT_OVERLAY_GRADIENT),
        },
        text_optimization: TextOptimization {
            use_white_text: text.use_white_text.unwrap_or(false),
            add_text_shadow: text.add_text_shadow.unwrap_or(false),
            enhance_contrast: text.enhance_contrast.unwrap_or(false),
            shadow_intensity: text.shadow_intensity.unwrap_or_default(),
        },
        title: text_or(&hero.title, DEFAULT_NAME),
        subtitle: text_or(&hero.subtitle, DEFAULT_TAGLINE),
        description: text_or(&hero.description, DEFAULT_DESCRIPTION),
        carousel: hero.carousel.as_ref().map(|carousel| HeroCarousel {
            auto_play: carousel.auto_play != Some(false),
            image_duration: match carousel.image_duration {
                Some(d) if d != 0.0 => d,
                _ => DEFAULT_IMAGE_DURATION,
            },
            pause_on_hover: carousel.pause_on_hover != Some(false),
            media: carousel.media.clone().unwrap_or_default(),
        }),
    };

    SiteData {
        site: SiteConfig {
            name: text_or(&site.name, DEFAULT_NAME),
            tagline: text_or(&site.tagline, DEFAULT_TAGLINE),
            description: text_or(&site.description, DEFAULT_DESCRIPTION),
            logo: assets.resolve(LOGO),
            logo_fallback: text_or(&site.logo_fallback, DEFAULT_LOGO_FALLBACK),
            favicon: assets.resolve(LOGO),
            wechat_blog_url: text_or(&site.wechat_blog_url, DEFAULT_WECHAT_BLOG_URL),
            hero: hero_config,
        },
        navigation: raw
            .navigation
            .clone()
            .unwrap_or_else(default_navigation),
        universities: match &raw.universities {
            Some(universities) => universities
                .iter()
                .map(|u| University {
                    name: u.name.clone(),
                    logo: assets.resolve(&u.logo),
                })
                .collect(),
            None => default_universities(assets),
        },
        contact: raw.contact.clone().unwrap_or_else(default_contact),
    }
}

/// The configuration used when `site.yml` is missing or unusable.
pub fn fallback_site_data(assets: &AssetPaths) -> SiteData {
    SiteData {
        site: SiteConfig {
            name: DEFAULT_NAME.to_owned(),
            tagline: DEFAULT_TAGLINE.to_owned(),
            description: DEFAULT_DESCRIPTION.to_owned(),
            logo: assets.resolve(LOGO),
            logo_fallback: DEFAULT_LOGO_FALLBACK.to_owned(),
            favicon: assets.resolve(FALLBACK_FAVICON),
            wechat_blog_url: DEFAULT_WECHAT_BLOG_URL.to_owned(),
            hero: HeroConfig {
                background_image: String::new(),
                fallback_gradient: DEFAULT_FALLBACK_GRADIENT.to_owned(),
                logo_enhancement: LogoEnhancement {
                    drop_shadow: true,
                    shadow_intensity: Intensity::Medium,
                    shadow_color: DEFAULT_SHADOW_COLOR.to_owned(),
                },
                overlay: Overlay {
                    enabled: false,
                    kind: OverlayKind::None,
                    solid: String::new(),
                    gradient: String::new(),
                },
                text_optimization: TextOptimization {
                    use_white_text: false,
                    add_text_shadow: false,
                    enhance_contrast: false,
                    shadow_intensity: Intensity::Medium,
                },
                title: DEFAULT_NAME.to_owned(),
                subtitle: DEFAULT_TAGLINE.to_owned(),
                description: DEFAULT_DESCRIPTION.to_owned(),
                carousel: None,
            },
        },
        navigation: default_navigation(),
        universities: default_universities(assets),
        contact: default_contact(),
    }
}

pub fn default_navigation() -> Vec<NavigationItem> {
    [
        ("Home", "#home"),
        ("Athletes", "#athletes"),
        ("Admin", "#admin"),
        ("News", "#news"),
        ("Sponsors", "#sponsors"),
        ("Contact", "#contact"),
    ]
    .iter()
    .map(|(name, href)| NavigationItem {
        name: (*name).to_owned(),
        href: (*href).to_owned(),
    })
    .collect()
}

pub fn default_universities(assets: &AssetPaths) -> Vec<University> {
    [
        ("Fudan University", "/images/alumni/fudan.webp"),
        ("Tongji University", "/images/alumni/tongji.webp"),
        (
            "Shanghai University of Finance and Economics",
            "/images/alumni/caijin.webp",
        ),
    ]
    .iter()
    .map(|(name, logo)| University {
        name: (*name).to_owned(),
        logo: assets.resolve(logo),
    })
    .collect()
}

pub fn default_contact() -> Contact {
    Contact {
        sections: vec![
            ContactSection {
                title: "小红书".to_owned(),
                icon: "Heart".to_owned(),
                description: "关注我们的小红书账号，了解龙舟队最新动态和精彩瞬间".to_owned(),
                link: Some("https://xiaohongshu.com/user/profile/pentasus-dragonboat".to_owned()),
                qr_code: None,
            },
            ContactSection {
                title: "微信公众号".to_owned(),
                icon: "MessageCircle".to_owned(),
                description: "扫码关注「Pentasus龙舟队」公众号, 获取第一手训练资讯和比赛信息"
                    .to_owned(),
                link: None,
                qr_code: Some("/images/wechat-qr.png".to_owned()),
            },
            ContactSection {
                title: "训练时间地点".to_owned(),
                icon: "MapPin".to_owned(),
                description: "Fort Point Pier • 每周三、日 • 专业指导 • 欢迎新成员".to_owned(),
                link: None,
                qr_code: None,
            },
        ],
    }
}
