//! Chooses the picture shown for a [`TeamMember`]. There are three sources,
//! tried in order:
//!
//! 1. the member's own photo ([`ImageKind::Local`]),
//! 2. a DiceBear avatar generated from the member's descriptor
//!    ([`ImageKind::Generated`]),
//! 3. the member's initials on a colored background
//!    ([`ImageKind::Initials`]).
//!
//! A source is skipped when the member doesn't have it, or when it failed to
//! load earlier in the same render. Initials are always available, so
//! resolution never fails. [`ProfileImage`] carries the per-render state.

use serde::Serialize;
use url::Url;

use crate::assets::AssetPaths;
use crate::team::{DiceBear, TeamMember};

pub const DICEBEAR_ENDPOINT: &str = "https://api.dicebear.com/9.x/adventurer/svg";

/// The three image sources, highest precedence first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Local,
    Generated,
    Initials,
}

impl ImageKind {
    /// The tier tried after this one fails. Initials have no successor.
    pub fn next(self) -> ImageKind {
        match self {
            ImageKind::Local => ImageKind::Generated,
            ImageKind::Generated | ImageKind::Initials => ImageKind::Initials,
        }
    }
}

/// What to display for a member.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageSource {
    /// The member's photo, at a resolved path.
    Local { src: String },

    /// A generated avatar.
    Generated { url: Url },

    /// Up to two uppercase initials. `background` is a CSS color taken from
    /// the avatar descriptor; `None` means the neutral gradient.
    Initials {
        initials: String,
        background: Option<String>,
    },
}

impl ImageSource {
    pub fn kind(&self) -> ImageKind {
        match self {
            ImageSource::Local { .. } => ImageKind::Local,
            ImageSource::Generated { .. } => ImageKind::Generated,
            ImageSource::Initials { .. } => ImageKind::Initials,
        }
    }
}

/// Picks the highest-precedence source available to `member`, considering
/// only tiers at or below `floor`.
pub fn resolve(member: &TeamMember, assets: &AssetPaths, floor: ImageKind) -> ImageSource {
    if floor <= ImageKind::Local {
        if let Some(image) = &member.image {
            return ImageSource::Local {
                src: assets.resolve(image),
            };
        }
    }
    if floor <= ImageKind::Generated {
        if let Some(dicebear) = member.dicebear.as_ref().filter(|d| d.is_complete()) {
            if let Ok(url) = dicebear_url(dicebear) {
                return ImageSource::Generated { url };
            }
        }
    }
    ImageSource::Initials {
        initials: name_initials(&member.name),
        background: member
            .dicebear
            .as_ref()
            .and_then(|d| d.avatar_bg.as_deref())
            .filter(|bg| !bg.is_empty())
            .map(|bg| format!("#{}", bg)),
    }
}

/// Builds the DiceBear request for `config`. The seed, background color and
/// eye color always come first; optional styling parameters follow and are
/// left out entirely when the descriptor doesn't set them.
pub fn dicebear_url(config: &DiceBear) -> Result<Url, url::ParseError> {
    fn text(value: &Option<String>) -> Option<String> {
        value.as_ref().filter(|s| !s.is_empty()).cloned()
    }
    fn number(value: &Option<f64>) -> Option<String> {
        value.map(|n| n.to_string())
    }

    let eyes = text(&config.eyes_color).or_else(|| text(&config.avatar_eyes));
    let params = [
        ("seed", text(&config.avatar)),
        ("backgroundColor", text(&config.avatar_bg)),
        ("eyesColor", eyes),
        ("hair", text(&config.hair)),
        ("glasses", text(&config.glasses)),
        ("glassesProbability", number(&config.glasses_probability)),
        ("beard", text(&config.beard)),
        ("beardProbability", number(&config.beard_probability)),
        ("clothing", text(&config.clothing)),
        ("clothingColor", text(&config.clothing_color)),
        ("accessories", text(&config.accessories)),
        ("accessoriesProbability", number(&config.accessories_probability)),
        ("mouth", text(&config.mouth)),
        ("skinColor", text(&config.skin_color)),
    ];

    let mut url = Url::parse(DICEBEAR_ENDPOINT)?;
    url.query_pairs_mut().extend_pairs(
        params
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|value| (*key, value))),
    );
    Ok(url)
}

/// The first letter of each whitespace-separated word of `name`,
/// uppercased, keeping at most two.
pub fn name_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// The image state of one member during one render.
///
/// [`ProfileImage::source`] gives the current choice. When that image fails
/// to load, [`ProfileImage::fail`] moves on to the next tier; a failed tier
/// is never tried again for this render.
#[derive(Clone, Debug)]
pub struct ProfileImage<'a> {
    member: &'a TeamMember,
    assets: &'a AssetPaths,
    floor: ImageKind,
}

impl<'a> ProfileImage<'a> {
    pub fn new(member: &'a TeamMember, assets: &'a AssetPaths) -> ProfileImage<'a> {
        ProfileImage {
            member,
            assets,
            floor: ImageKind::Local,
        }
    }

    /// The source to display now.
    pub fn source(&self) -> ImageSource {
        resolve(self.member, self.assets, self.floor)
    }

    /// Records that the current source failed to load and returns the
    /// replacement. Failing the initials changes nothing.
    pub fn fail(&mut self) -> ImageSource {
        self.floor = self.source().kind().next();
        self.source()
    }

    /// Runs the fallback chain to completion. `load` reports whether a
    /// source can be displayed; initials are never probed. `notify` is
    /// called once, with the tier that ended up being used.
    pub fn settle<L, N>(mut self, mut load: L, notify: N) -> ImageSource
    where
        L: FnMut(&ImageSource) -> bool,
        N: FnOnce(ImageKind),
    {
        let mut source = self.source();
        while source.kind() != ImageKind::Initials && !load(&source) {
            source = self.fail();
        }
        notify(source.kind());
        source
    }
}
