//! Roster entries for the athlete and admin pages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A member of the athlete or admin roster.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TeamMember {
    pub id: u64,
    pub name: String,
    pub role: String,

    /// Empty when the roster gives none.
    pub motto: String,

    /// Path of the member's photo, as written in the roster. Only set when
    /// non-blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dicebear: Option<DiceBear>,
}

/// Parameters for a generated DiceBear avatar. `avatar` (the seed),
/// `avatar_bg` and `avatar_eyes` are all required for the avatar to be
/// usable; see [`DiceBear::is_complete`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceBear {
    #[serde(
        default,
        deserialize_with = "crate::news::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<String>,

    /// Background color as hex digits without the leading `#`.
    #[serde(
        default,
        deserialize_with = "crate::news::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar_bg: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::news::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar_eyes: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::news::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub hair: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::news::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub glasses: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glasses_probability: Option<f64>,

    #[serde(
        default,
        deserialize_with = "crate::news::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub beard: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beard_probability: Option<f64>,

    #[serde(
        default,
        deserialize_with = "crate::news::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub clothing: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::news::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub clothing_color: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::news::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub accessories: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessories_probability: Option<f64>,

    #[serde(
        default,
        deserialize_with = "crate::news::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub mouth: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::news::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub skin_color: Option<String>,

    /// Overrides `avatar_eyes` in the generated request.
    #[serde(
        default,
        deserialize_with = "crate::news::scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub eyes_color: Option<String>,
}

impl DiceBear {
    /// Whether the seed, background and eye color are all present and
    /// non-empty.
    pub fn is_complete(&self) -> bool {
        [&self.avatar, &self.avatar_bg, &self.avatar_eyes]
            .iter()
            .all(|field| field.as_deref().map_or(false, |s| !s.is_empty()))
    }
}

/// A roster record as written in `team.yml` or `admin.yml`.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct RawTeamMember {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default, deserialize_with = "crate::news::scalar")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "crate::news::scalar")]
    pub role: Option<String>,

    #[serde(default, deserialize_with = "crate::news::scalar")]
    pub motto: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub dicebear: Option<DiceBear>,
}

/// Builds a [`TeamMember`] from a roster record. `motto` defaults to the
/// empty string, `image` is kept only if it isn't blank and `dicebear` only
/// if present. Records without an `id` or a `name` are rejected.
pub fn process_team_member(raw: RawTeamMember) -> Result<TeamMember, MissingField> {
    let id = raw.id.ok_or(MissingField("id"))?;
    let name = raw
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or(MissingField("name"))?;
    Ok(TeamMember {
        id,
        name,
        role: raw.role.unwrap_or_default(),
        motto: raw.motto.unwrap_or_default(),
        image: raw.image.filter(|image| !image.trim().is_empty()),
        dicebear: raw.dicebear,
    })
}

/// Returned when a roster record lacks a field every member must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingField(pub &'static str);

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "missing required field `{}`", self.0)
    }
}

impl std::error::Error for MissingField {}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(yaml: &str) -> RawTeamMember {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_required_fields_and_defaults() {
        let member = process_team_member(raw("id: 3\nname: Li Wei\nrole: Stroke")).unwrap();
        assert_eq!(3, member.id);
        assert_eq!("Li Wei", member.name);
        assert_eq!("Stroke", member.role);
        assert_eq!("", member.motto);
        assert!(member.image.is_none());
        assert!(member.dicebear.is_none());
    }

    #[test]
    fn test_blank_image_is_dropped() {
        let member = process_team_member(raw("id: 1\nname: A\nimage: '   '")).unwrap();
        assert!(member.image.is_none());

        let member = process_team_member(raw("id: 1\nname: A\nimage: ' a.jpg'")).unwrap();
        assert_eq!(Some(" a.jpg"), member.image.as_deref());
    }

    #[test]
    fn test_dicebear_is_kept() {
        let member = process_team_member(raw(
            "id: 1\nname: A\ndicebear:\n  avatar: seed\n  avatarBg: b6e3f4\n  avatarEyes: variant01\n  glassesProbability: 50",
        ))
        .unwrap();
        let dicebear = member.dicebear.unwrap();
        assert!(dicebear.is_complete());
        assert_eq!(Some(50.0), dicebear.glasses_probability);
    }

    #[test]
    fn test_incomplete_dicebear() {
        let dicebear = DiceBear {
            avatar: Some("seed".to_owned()),
            avatar_bg: Some("b6e3f4".to_owned()),
            avatar_eyes: Some(String::new()),
            ..DiceBear::default()
        };
        assert!(!dicebear.is_complete());
    }

    #[test]
    fn test_missing_required_fields() {
        assert_eq!(
            Err(MissingField("id")),
            process_team_member(raw("name: A"))
        );
        assert_eq!(
            Err(MissingField("name")),
            process_team_member(raw("id: 2\nrole: Drummer"))
        );
    }

    #[test]
    fn test_optional_fields_are_not_serialized_when_missing() {
        let member = process_team_member(raw("id: 1\nname: A\nrole: B")).unwrap();
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(
            serde_json::json!({"id": 1, "name": "A", "role": "B", "motto": ""}),
            json
        );
    }
}
