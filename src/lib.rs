//! The content pipeline for the Pentasus dragon-boat club site. The site's
//! pages are generated from a flat content directory, and this crate turns
//! that directory into typed records the page templates consume:
//!
//! 1. News articles, Markdown files with YAML frontmatter ([`crate::news`]),
//!    with derived slugs ([`crate::slug`]), excerpts and reading times
//!    ([`crate::excerpt`])
//! 2. The athlete and admin rosters ([`crate::team`]) and sponsors
//!    ([`crate::sponsor`])
//! 3. The site-wide configuration and theme mode ([`crate::site`])
//!
//! [`crate::loader::Loader`] reads all of these from disk. It never fails:
//! missing content becomes empty lists or default configuration, and a
//! broken file is logged and left out. Image and logo paths are resolved
//! for the build mode by [`crate::assets`], and [`crate::avatar`] decides
//! which picture to show for each team member.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod assets;
pub mod avatar;
pub mod config;
pub mod excerpt;
pub mod loader;
pub mod news;
pub mod site;
pub mod slug;
pub mod sponsor;
pub mod team;
