//! Label normalization shared by every similarity metric.
//!
//! A label such as `"🚀 Website Dev (Q3)"` is reduced to
//! `"website development q3"`:
//!
//! 1. the leading marker run (emoji, pictographs, dingbats, regional
//!    indicators, variation selectors) and the whitespace after it is dropped
//! 2. text is lower-cased, decomposed, and combining marks are removed
//! 3. anything that is not a letter, digit or whitespace becomes a space and
//!    whitespace runs collapse to a single space
//! 4. known abbreviations are expanded word by word

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Code point ranges treated as pictographic markers
const MARKER_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F), // emoticons
    (0x1F300, 0x1F5FF), // symbols & pictographs
    (0x1F680, 0x1F6FF), // transport & map
    (0x1F1E0, 0x1F1FF), // regional indicators
    (0x2600, 0x26FF),   // miscellaneous symbols
    (0x2700, 0x27BF),   // dingbats
    (0xFE00, 0xFE0F),   // variation selectors
    (0x1F900, 0x1F9FF), // supplemental symbols & pictographs
    (0x1F000, 0x1F0F5), // mahjong tiles, dominoes, playing cards
];

const ZERO_WIDTH_JOINER: char = '\u{200D}';

/// Abbreviations expanded during normalization
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("dev", "development"),
    ("mgmt", "management"),
    ("admin", "administration"),
    ("hr", "human resources"),
    ("it", "information technology"),
    ("qa", "quality assurance"),
    ("ui", "user interface"),
    ("ux", "user experience"),
    ("api", "application programming interface"),
    ("db", "database"),
    ("ops", "operations"),
    ("biz", "business"),
    ("fin", "finance"),
    ("mkt", "marketing"),
    ("eng", "engineering"),
];

/// Words ignored by word-set similarity
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "up", "about", "into", "through", "during", "before", "after", "above", "below",
    "between", "among", "along", "project", "area", "folder", "task", "item",
];

/// Is this character part of a pictographic marker?
#[must_use]
pub fn is_marker_char(c: char) -> bool {
    let code = u32::from(c);
    MARKER_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&code))
}

/// Does the label start with a pictographic marker?
#[must_use]
pub fn starts_with_marker(label: &str) -> bool {
    label.chars().next().is_some_and(is_marker_char)
}

/// Remove the leading marker run and any whitespace that follows it.
///
/// A zero-width joiner inside the run is treated as part of the marker so
/// composed emoji (e.g. 🧑‍💻) are removed whole.
#[must_use]
pub fn strip_marker(label: &str) -> &str {
    if !starts_with_marker(label) {
        return label;
    }

    label.trim_start_matches(|c: char| {
        is_marker_char(c) || c == ZERO_WIDTH_JOINER || c.is_whitespace()
    })
}

/// Look up the expansion for an abbreviation
#[must_use]
pub fn expand_abbreviation(word: &str) -> Option<&'static str> {
    ABBREVIATIONS
        .iter()
        .find(|(abbrev, _)| *abbrev == word)
        .map(|(_, expansion)| *expansion)
}

#[must_use]
pub fn is_abbreviation(word: &str) -> bool {
    expand_abbreviation(word).is_some()
}

#[must_use]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Steps 1-3: marker stripping, case/accent folding and punctuation cleanup,
/// without abbreviation expansion.
#[must_use]
pub fn clean(label: &str) -> String {
    let stripped = strip_marker(label);
    let folded = fold_case_and_accents(stripped);

    let spaced: String = folded
        .chars()
        .map(|c| {
            // Dingbat digits are alphanumeric but still count as markers
            if c.is_alphanumeric() && !is_marker_char(c) {
                c
            } else {
                ' '
            }
        })
        .collect();

    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a label for comparison.
///
/// The result is idempotent: `normalize(&normalize(x)) == normalize(x)`.
#[must_use]
pub fn normalize(label: &str) -> String {
    clean(label)
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(|word| expand_abbreviation(word).unwrap_or(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lower-case and drop combining marks.
///
/// Decomposition runs on both sides of lower-casing because lower-casing can
/// itself introduce combining marks (e.g. `İ` → `i̇`).
fn fold_case_and_accents(text: &str) -> String {
    let decomposed: String = text.nfd().filter(|c| !is_combining_mark(*c)).collect();
    decomposed
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_detection() {
        assert!(starts_with_marker("🌐 Website Redesign"));
        assert!(starts_with_marker("💼Work"));
        assert!(starts_with_marker("☀ Morning routine"));
        assert!(!starts_with_marker("Website Redesign"));
        assert!(!starts_with_marker(""));
        assert!(!starts_with_marker("Café"));
    }

    #[test]
    fn test_strip_marker() {
        assert_eq!(strip_marker("🌐 Website Redesign"), "Website Redesign");
        assert_eq!(strip_marker("🚀🔥  Launch"), "Launch");
        assert_eq!(strip_marker("🧑\u{200D}💻 Coding"), "Coding");
        assert_eq!(strip_marker("Plain 🌐 label"), "Plain 🌐 label");
        assert_eq!(strip_marker("🌐"), "");
    }

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("🌐 Website Redesign"), "website redesign");
        assert_eq!(normalize("  Home -- Renovation!! "), "home renovation");
        assert_eq!(normalize("Résumé Update"), "resume update");
        assert_eq!(normalize("snake_case_label"), "snake case label");
    }

    #[test]
    fn test_normalize_expands_abbreviations() {
        assert_eq!(normalize("Team Mgmt"), "team management");
        assert_eq!(normalize("HR onboarding"), "human resources onboarding");
        assert_eq!(normalize("QA / Dev"), "quality assurance development");
        // Only whole words expand
        assert_eq!(normalize("Developer"), "developer");
    }

    #[test]
    fn test_normalize_empty_and_marker_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("🌐"), "");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        for label in [
            "🌐 Website Redesign",
            "Team Mgmt",
            "IT Ops",
            "Ångström Lab",
            "İstanbul Trip",
            "2024 Taxes",
        ] {
            let once = normalize(label);
            assert_eq!(normalize(&once), once, "not idempotent for {label:?}");
        }
    }

    #[test]
    fn test_clean_keeps_abbreviations() {
        assert_eq!(clean("Team Mgmt"), "team mgmt");
    }

    #[test]
    fn test_stop_words() {
        assert!(is_stop_word("project"));
        assert!(is_stop_word("the"));
        assert!(!is_stop_word("website"));
    }
}
