//! Search key normalization for game names.

use once_cell::sync::Lazy;
use regex_lite::Regex;

static NON_SEARCHABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9 ]").expect("search key pattern is a valid regex")
});

/// Reduce a display name to its search key: everything outside
/// `[A-Za-z0-9 ]` is dropped, the rest is lowercased.
///
/// Only ASCII survives the filter, so lowercasing is locale independent.
pub fn normalize_search_name(name: &str) -> String {
    NON_SEARCHABLE.replace_all(name, "").to_ascii_lowercase()
}

/// LIKE pattern matching any search key that contains `query`.
pub fn search_pattern(query: &str) -> String {
    format!("%{}%", normalize_search_name(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation_and_lowercases() {
        assert_eq!(normalize_search_name("Dota 2: Epic!"), "dota 2 epic");
        assert_eq!(
            normalize_search_name("Tom Clancy's Rainbow Six® Siege"),
            "tom clancys rainbow six siege"
        );
    }

    #[test]
    fn test_drops_non_ascii_letters() {
        assert_eq!(normalize_search_name("Pokémon"), "pokmon");
        assert_eq!(normalize_search_name("東方Project"), "project");
    }

    #[test]
    fn test_keeps_spaces_as_is() {
        assert_eq!(normalize_search_name("  Half - Life  "), "  half  life  ");
    }

    #[test]
    fn test_is_idempotent() {
        let inputs = [
            "",
            "Dota 2: Epic!",
            "PLAYERUNKNOWN'S BATTLEGROUNDS",
            "Ω-Ω ☃ 123 abc",
            "already normalized",
            "\t tabs\nand newlines",
        ];
        for input in inputs {
            let once = normalize_search_name(input);
            assert_eq!(normalize_search_name(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_search_pattern_wraps_normalized_query() {
        assert_eq!(search_pattern("Half-Life"), "%halflife%");
        assert_eq!(search_pattern(""), "%%");
    }
}
