//! Defines the [`Sponsor`] type.

use serde::{Deserialize, Serialize};

use crate::assets::AssetPaths;

/// A sponsor listed in `sponsors.yml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sponsor {
    pub id: u64,
    pub name: String,

    /// Path of the sponsor's logo. Resolved by [`process_sponsor`].
    pub logo: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Free-text label such as "Gold Sponsor".
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Resolves the sponsor's logo path for the current build mode.
pub fn process_sponsor(mut sponsor: Sponsor, assets: &AssetPaths) -> Sponsor {
    sponsor.logo = assets.resolve(&sponsor.logo);
    sponsor
}
