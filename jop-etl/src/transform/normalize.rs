//! Title, color and subject name cleanup
//!
//! All functions are total: empty input yields empty output.

use once_cell::sync::Lazy;
use regex::Regex;

/// Subject substitutions, applied in order (more specific first)
static SUBJECT_REPLACEMENTS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [(r"(?i)\bmt\.", "Mount"), (r"(?i)\bmt ", "Mount ")]
        .into_iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("Invalid subject replacement regex"),
                replacement,
            )
        })
        .collect()
});

/// Capitalize each whitespace-delimited word, lower-casing the rest
///
/// Runs of whitespace collapse to a single space.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trim, drop one surrounding quote on each side, trim again, title-case
pub fn clean_title(title: &str) -> String {
    let trimmed = title.trim();
    let unquoted = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);
    title_case(unquoted.trim())
}

/// Trim, strip embedded line breaks, title-case
pub fn normalize_color_name(name: &str) -> String {
    let stripped: String = name
        .trim()
        .replace("\r\n", "")
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect();
    title_case(&stripped)
}

/// Trim and expand abbreviations; case is left alone
pub fn normalize_subject_name(name: &str) -> String {
    SUBJECT_REPLACEMENTS
        .iter()
        .fold(name.trim().to_string(), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, *replacement).into_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("\"A Walk in the Woods\""), "A Walk In The Woods");
        assert_eq!(clean_title("  \" mt. mckinley \"  "), "Mt. Mckinley");
        assert_eq!(clean_title(""), "");
    }

    #[test]
    fn test_clean_title_strips_only_one_quote_each_side() {
        assert_eq!(clean_title("\"\"quoted\"\""), "\"quoted\"");
    }

    #[test]
    fn test_normalize_color_name() {
        assert_eq!(normalize_color_name("prussian blue\r\n"), "Prussian Blue");
        assert_eq!(normalize_color_name("  TITANIUM WHITE "), "Titanium White");
        assert_eq!(normalize_color_name("Van\r\nDyke Brown"), "Vandyke Brown");
        assert_eq!(normalize_color_name(""), "");
    }

    #[test]
    fn test_normalize_subject_name() {
        assert_eq!(normalize_subject_name("mt. mckinley"), "Mount mckinley");
        assert_eq!(normalize_subject_name("Mt Fuji"), "Mount Fuji");
        assert_eq!(normalize_subject_name("Mt. Hood"), "Mount Hood");
        assert_eq!(normalize_subject_name(""), "");
    }

    #[test]
    fn test_normalize_subject_name_leaves_other_words() {
        assert_eq!(normalize_subject_name("Summit Trees"), "Summit Trees");
        assert_eq!(normalize_subject_name(" Steve Ross "), "Steve Ross");
    }

    #[test]
    fn test_title_case_collapses_whitespace() {
        assert_eq!(title_case("  winter   moon  "), "Winter Moon");
    }
}
