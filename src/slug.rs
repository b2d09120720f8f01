//! URL-safe identifiers for articles. A slug is lowercase ASCII letters,
//! digits and single hyphens, with no hyphen at either end.

const MARKDOWN_EXTENSION: &str = ".md";

/// Derives the slug for a news source file. One trailing `.md` is removed
/// before [`create_slug`] is applied, so `My Post!.md` becomes `my-post`.
pub fn generate_slug(file_name: &str) -> String {
    create_slug(file_name.strip_suffix(MARKDOWN_EXTENSION).unwrap_or(file_name))
}

/// Converts arbitrary text into a slug. Every character outside `[a-z0-9-]`
/// (after lowercasing) becomes a hyphen, runs of hyphens collapse to one
/// and leading/trailing hyphens are dropped. The empty string maps to
/// itself.
pub fn create_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        let c = match c {
            'a'..='z' | '0'..='9' => c,
            _ => '-',
        };
        if c == '-' && (slug.is_empty() || slug.ends_with('-')) {
            continue;
        }
        slug.push(c);
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_well_formed(slug: &str) -> bool {
        slug.is_empty()
            || (!slug.starts_with('-')
                && !slug.ends_with('-')
                && !slug.contains("--")
                && slug
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'))
    }

    #[test]
    fn test_strips_extension_and_punctuation() {
        assert_eq!("my-post", generate_slug("My Post!.md"));
    }

    #[test]
    fn test_existing_slug_is_unchanged() {
        assert_eq!("already-slug", generate_slug("already-slug"));
    }

    #[test]
    fn test_dated_file_name() {
        assert_eq!(
            "2025-06-01-first-race",
            generate_slug("2025-06-01-First Race!.md")
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!("", generate_slug(""));
        assert_eq!("", generate_slug(".md"));
        assert_eq!("", generate_slug("!!!"));
    }

    #[test]
    fn test_only_one_extension_is_stripped() {
        assert_eq!("notes-md", generate_slug("notes.md.md"));
    }

    #[test]
    fn test_non_ascii_becomes_hyphen() {
        assert_eq!("caf-cr-me", generate_slug("Café Crème.md"));
        assert_eq!("2024", generate_slug("龙舟 2024.md"));
    }

    #[test]
    fn test_output_is_well_formed_and_idempotent() {
        let inputs = [
            "",
            "-",
            "--a--b--",
            "Hello, World!.md",
            "  spaced   out  ",
            "UPPER_case.MD",
            "a.md.md",
            "龙舟队 Dragon Boat!!",
            "trailing-",
            "x.md",
        ];
        for input in inputs {
            let once = generate_slug(input);
            assert!(is_well_formed(&once), "{:?} -> {:?}", input, once);
            assert_eq!(once, generate_slug(&once), "not idempotent for {:?}", input);
        }
    }
}
