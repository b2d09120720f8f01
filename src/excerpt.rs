//! Summaries and reading-time estimates derived from article bodies.

use regex::Regex;
use std::sync::LazyLock;

/// Default maximum length, in characters, of a generated excerpt (not
/// counting the `...` suffix).
pub const DEFAULT_MAX_LENGTH: usize = 400;

const WORDS_PER_MINUTE: usize = 200;
const MIN_SENTENCE_LENGTH: usize = 15;
const SENTENCES: usize = 4;
const SENTENCES_IF_SHORT: usize = 5;
const SHORT_EXCERPT: usize = 200;
const FALLBACK_LENGTH: usize = 300;
const ELLIPSIS: &str = "...";

static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static TERMINATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

/// Removes every `<...>` tag from `text`.
pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, "").into_owned()
}

/// Estimated reading time in whole minutes at 200 words per minute, rounded
/// up. Content with no words still reads in one minute.
pub fn calculate_reading_time(content: &str) -> u32 {
    let words = strip_markup(content).split_whitespace().count();
    let minutes = (words + WORDS_PER_MINUTE - 1) / WORDS_PER_MINUTE;
    minutes.max(1) as u32
}

/// [`generate_excerpt`] with [`DEFAULT_MAX_LENGTH`].
pub fn excerpt(content: &str) -> String {
    generate_excerpt(content, DEFAULT_MAX_LENGTH)
}

/// Builds a short plain-text summary of `content`.
///
/// The stripped text is split into sentences (fragments terminated by `.`,
/// `!` or `?`); fragments shorter than 15 characters are ignored. The first
/// four usable sentences are joined, or five if four come to less than 200
/// characters. An excerpt longer than `max_length` is cut back, preferably
/// to a full stop past character 200, and gets a `...` suffix; otherwise a
/// closing period is added when missing. Without any usable sentence the
/// result is the start of the stripped text followed by `...`.
///
/// The result is never longer than `max_length + 3` characters.
pub fn generate_excerpt(content: &str, max_length: usize) -> String {
    let plain = strip_markup(content);
    let plain = plain.trim();
    let sentences = sentences(plain);

    let mut excerpt = sentences
        .iter()
        .take(SENTENCES)
        .copied()
        .collect::<Vec<_>>()
        .join(". ");
    if char_len(&excerpt) < SHORT_EXCERPT && sentences.len() > SENTENCES {
        excerpt = sentences[..SENTENCES_IF_SHORT].join(". ");
    }

    if excerpt.is_empty() {
        let mut fallback = prefix(plain, FALLBACK_LENGTH.min(max_length))
            .trim_end()
            .to_owned();
        fallback.push_str(ELLIPSIS);
        return fallback;
    }

    if char_len(&excerpt) > max_length {
        let mut cut = prefix(&excerpt, max_length).trim_end();
        if let Some(period) = cut.rfind('.') {
            if char_len(&cut[..period]) > SHORT_EXCERPT {
                cut = &cut[..period];
            }
        }
        let mut truncated = cut.to_owned();
        truncated.push_str(ELLIPSIS);
        truncated
    } else {
        if !excerpt.ends_with(['.', '!', '?']) {
            excerpt.push('.');
        }
        excerpt
    }
}

/// Terminated, trimmed fragments of at least [`MIN_SENTENCE_LENGTH`]
/// characters. Text after the last terminator is not a sentence.
fn sentences(plain: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for terminator in TERMINATOR.find_iter(plain) {
        let fragment = plain[start..terminator.start()].trim();
        if char_len(fragment) >= MIN_SENTENCE_LENGTH {
            out.push(fragment);
        }
        start = terminator.end();
    }
    out
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `n` characters of `s`.
fn prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["paddle"; n].join(" ")
    }

    #[test]
    fn test_reading_time_of_empty_content_is_one_minute() {
        assert_eq!(1, calculate_reading_time(""));
        assert_eq!(1, calculate_reading_time(" "));
        assert_eq!(1, calculate_reading_time("\n\t  \n"));
    }

    #[test]
    fn test_reading_time_rounds_up() {
        assert_eq!(1, calculate_reading_time(&words(1)));
        assert_eq!(1, calculate_reading_time(&words(200)));
        assert_eq!(2, calculate_reading_time(&words(201)));
        assert_eq!(3, calculate_reading_time(&words(401)));
    }

    #[test]
    fn test_reading_time_ignores_markup() {
        let html = format!("<p>{}</p><img src=\"a.jpg\" alt=\"x\">", words(200));
        assert_eq!(1, calculate_reading_time(&html));
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(
            "Hello world",
            strip_markup("<p class=\"lead\">Hello <b>world</b></p>")
        );
    }

    #[test]
    fn test_excerpt_extends_to_five_sentences_when_short() {
        let content = "The crew trained at dawn every day. \
                       Our coach pushed for longer strokes! \
                       Did the new drummer keep the pace? \
                       Everyone agreed the boat felt faster. \
                       A fifth sentence joins them here.";
        let excerpt = excerpt(content);
        // Four sentences are well under 200 chars and a fifth exists.
        assert_eq!(
            "The crew trained at dawn every day. \
             Our coach pushed for longer strokes. \
             Did the new drummer keep the pace. \
             Everyone agreed the boat felt faster. \
             A fifth sentence joins them here.",
            excerpt
        );
    }

    #[test]
    fn test_excerpt_stops_at_four_sentences_when_long_enough() {
        let sentence = "This sentence is long enough to push the excerpt well past two hundred characters";
        let content = format!("{s}. {s}. {s}. {s}. Fifth sentence that is not included.", s = sentence);
        let excerpt = generate_excerpt(&content, 1000);
        assert_eq!(format!("{s}. {s}. {s}. {s}.", s = sentence), excerpt);
    }

    #[test]
    fn test_excerpt_discards_short_fragments() {
        let content = "Hi. We raced hard. The regatta was a huge success for the club.";
        assert_eq!(
            "The regatta was a huge success for the club.",
            excerpt(content)
        );
    }

    #[test]
    fn test_excerpt_falls_back_without_terminated_sentence() {
        let line = "A single line of exactly fifty characters in total";
        assert_eq!(50, line.chars().count());
        assert_eq!(format!("{}...", line), excerpt(line));
    }

    #[test]
    fn test_excerpt_fallback_is_capped_at_300_characters() {
        let content = "x".repeat(500);
        let excerpt = excerpt(&content);
        assert_eq!(303, excerpt.chars().count());
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn test_excerpt_of_empty_content() {
        assert_eq!("...", excerpt(""));
    }

    #[test]
    fn test_long_excerpt_is_cut_at_full_stop() {
        let sentence = "Paddlers from three universities joined the autumn training camp on the river";
        let content = format!("{s}. {s}. {s}. {s}. {s}.", s = sentence);
        let excerpt = generate_excerpt(&content, 250);
        assert!(excerpt.ends_with("..."));
        assert!(excerpt.chars().count() <= 253);
        let body = excerpt.trim_end_matches("...");
        assert!(body.ends_with("river"), "{:?}", excerpt);
    }

    #[test]
    fn test_long_excerpt_without_late_full_stop_is_hard_cut() {
        let sentence = "w".repeat(500);
        let content = format!("{}.", sentence);
        let excerpt = excerpt(&content);
        assert_eq!(format!("{}...", "w".repeat(400)), excerpt);
    }

    #[test]
    fn test_excerpt_never_contains_markup() {
        let content = "<h1>Race day</h1><p>The <em>whole</em> team showed up before sunrise. \
                       Boats were rigged by <a href=\"/x\">six</a> o'clock sharp!</p>";
        let excerpt = excerpt(content);
        assert!(!excerpt.contains('<') && !excerpt.contains('>'), "{:?}", excerpt);
    }

    #[test]
    fn test_excerpt_length_is_bounded() {
        let long = "Lorem ipsum dolor sit amet consectetur adipiscing elit. ".repeat(40);
        let unicode = "龙舟队在清晨的江面上训练了整整两个小时。".repeat(30);
        let contents = [
            "",
            "short",
            "Short. Tiny! Ok?",
            long.as_str(),
            unicode.as_str(),
            "no punctuation at all but quite a lot of words in a row here",
        ];
        for max_length in [0, 10, 50, 200, 400, 1000] {
            for content in contents.iter() {
                let excerpt = generate_excerpt(content, max_length);
                assert!(
                    excerpt.chars().count() <= max_length + 3,
                    "max_length {} produced {:?}",
                    max_length,
                    excerpt
                );
            }
        }
    }
}
