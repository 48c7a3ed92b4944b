//! Text normalization helpers for slugs, headings and hashtags.

/// URL-safe slug: lowercase ASCII alphanumerics separated by single dashes.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Capitalize the first letter of each whitespace-separated word and
/// collapse runs of whitespace.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// `#` followed by the alphanumerics of each word, each word capitalized.
/// Returns `None` when nothing usable remains.
pub fn hashtag(phrase: &str) -> Option<String> {
    let body: String = title_case(phrase)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();

    if body.is_empty() {
        None
    } else {
        Some(format!("#{}", body))
    }
}

/// Truncate to at most `max_chars` characters, ending with an ellipsis when cut.
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }

    let keep = max_chars.saturating_sub(1);
    let mut out: String = input.chars().take(keep).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Gutter Cleaning - Denver #42"), "gutter-cleaning-denver-42");
        assert_eq!(slugify("  --Roof  Repair--  "), "roof-repair");
        assert_eq!(slugify("Café & Deck"), "caf-deck");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn title_case_normalizes_words() {
        assert_eq!(title_case("gutter   CLEANING"), "Gutter Cleaning");
        assert_eq!(title_case("  denver "), "Denver");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn hashtag_strips_punctuation() {
        assert_eq!(hashtag("fort collins"), Some("#FortCollins".to_string()));
        assert_eq!(hashtag("deck & patio"), Some("#DeckPatio".to_string()));
        assert_eq!(hashtag(" - "), None);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("ééééé", 3), "éé…");
        assert_eq!(truncate_chars("abcdef", 4).chars().count(), 4);
    }
}
