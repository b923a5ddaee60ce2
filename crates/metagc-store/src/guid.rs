//! Canonical entity-identifier matching.
//!
//! An identifier is rendered as `8-4-4-4-12` hexadecimal digits, either case.
//! Matching is purely textual: identifiers are found wherever they occur,
//! including inside longer tokens.

use regex::Regex;
use std::sync::OnceLock;

fn canonical_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[0-9a-fA-F]{8}-(?:[0-9a-fA-F]{4}-){3}[0-9a-fA-F]{12}")
            .expect("canonical identifier regex must compile")
    })
}

/// Iterate identifier-shaped substrings of `text`, leftmost first and
/// non-overlapping. Matches are returned exactly as written.
pub fn find_entity_ids(text: &str) -> impl Iterator<Item = &str> {
    canonical_id_re().find_iter(text).map(|found| found.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID_A: &str = "0f8e3c2a-1b4d-4e6f-8a9b-0c1d2e3f4a5b";
    const ID_B: &str = "DEADBEEF-0000-4000-8000-00000000CAFE";

    #[test]
    fn finds_identifiers_nested_in_json() {
        let text = format!(
            r#"{{"state":{{"vertexSet":"{ID_A}","attrs":{{"name":"{ID_B}"}}}}}}"#
        );
        let found: Vec<&str> = find_entity_ids(&text).collect();
        assert_eq!(found, vec![ID_A, ID_B]);
    }

    #[test]
    fn preserves_case_of_matches() {
        let found: Vec<&str> = find_entity_ids(ID_B).collect();
        assert_eq!(found, vec![ID_B]);
    }

    #[test]
    fn rejects_short_groups_and_missing_hyphens() {
        assert_eq!(
            find_entity_ids("0f8e3c2a-1b4d-4e6f-8a9b-0c1d2e3f4a5").count(),
            0
        );
        assert_eq!(
            find_entity_ids("0f8e3c2a1b4d4e6f8a9b0c1d2e3f4a5b").count(),
            0
        );
        assert_eq!(
            find_entity_ids("0f8e3c2g-1b4d-4e6f-8a9b-0c1d2e3f4a5b").count(),
            0
        );
    }

    #[test]
    fn matches_inside_longer_hex_runs() {
        let text = format!("a{ID_A}ff");
        let found: Vec<&str> = find_entity_ids(&text).collect();
        assert_eq!(found, vec![ID_A]);
    }

    #[test]
    fn generated_identifiers_match() {
        let id = uuid::Uuid::new_v4().to_string();
        assert_eq!(find_entity_ids(&id).collect::<Vec<_>>(), vec![id.as_str()]);
    }
}
