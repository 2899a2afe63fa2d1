//! Label Normalization
//!
//! Turns free-form diagram labels into definition-safe identifiers. Class names
//! and property names go through the same character filter, so two labels that
//! differ only in punctuation name the same class.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Property name used for edges that carry no label
pub const UNDEF_PROPERTY: &str = "UNDEF_Property";

/// Edge-label suffix that marked a "at least one" cardinality restriction
pub const REQUIRED_SUFFIX: &str = " min 1";

/// The OWL restriction an edge label asked for
///
/// Recorded on the model but not reflected in the schema: every property is
/// emitted the same way whichever restriction its label carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Restriction {
    /// Plain label (`owl:allValuesFrom`)
    AllValuesFrom,
    /// Label ended in ` min 1` (`owl:someValuesFrom`)
    SomeValuesFrom,
}

fn unsafe_chars() -> &'static Regex {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    UNSAFE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_:\-]").expect("static regex"))
}

/// Replace every character outside `[A-Za-z0-9_:-]` with `_`
///
/// Works per character, so a multi-byte character becomes a single `_`.
/// Idempotent: the output only contains characters the filter keeps.
pub fn sanitize(label: &str) -> String {
    unsafe_chars().replace_all(label, "_").into_owned()
}

/// Strip a trailing ` min 1` from an edge label
pub fn strip_required_suffix(label: &str) -> (&str, Restriction) {
    match label.strip_suffix(REQUIRED_SUFFIX) {
        Some(stripped) => (stripped, Restriction::SomeValuesFrom),
        None => (label, Restriction::AllValuesFrom),
    }
}

/// Property name for an edge label
///
/// The suffix is stripped before sanitizing; sanitizing first would turn the
/// spaces of ` min 1` into underscores and the suffix would never match.
/// A label that is nothing but the suffix leaves the empty property name `""`.
pub fn property_name(label: Option<&str>) -> (String, Restriction) {
    match label {
        Some(text) if !text.trim().is_empty() => {
            let (stripped, restriction) = strip_required_suffix(text);
            (sanitize(stripped), restriction)
        }
        _ => (UNDEF_PROPERTY.to_string(), Restriction::AllValuesFrom),
    }
}

/// Whether a (sanitized) edge label denotes generalization
pub fn is_subclass_label(property: &str) -> bool {
    property.eq_ignore_ascii_case("subclassof")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Person", "Person")]
    #[case("Year of birth", "Year_of_birth")]
    #[case("ex:Dataset-Name", "ex:Dataset-Name")]
    #[case("a.b/c(d)", "a_b_c_d_")]
    #[case("Café", "Caf_")]
    #[case("snake_case", "snake_case")]
    fn test_sanitize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize(input), expected);
    }

    #[rstest]
    #[case("Year of birth")]
    #[case("ünïcødé & symbols!")]
    #[case("tabs\tand\nnewlines")]
    fn test_sanitize_is_idempotent(#[case] input: &str) {
        let once = sanitize(input);
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_strip_required_suffix() {
        assert_eq!(strip_required_suffix("author min 1"), ("author", Restriction::SomeValuesFrom));
        assert_eq!(strip_required_suffix("author"), ("author", Restriction::AllValuesFrom));
        // Only a trailing suffix counts
        assert_eq!(
            strip_required_suffix("author min 1 x"),
            ("author min 1 x", Restriction::AllValuesFrom)
        );
    }

    #[rstest]
    #[case(Some("written by min 1"), "written_by", Restriction::SomeValuesFrom)]
    #[case(Some("has part"), "has_part", Restriction::AllValuesFrom)]
    #[case(None, UNDEF_PROPERTY, Restriction::AllValuesFrom)]
    #[case(Some("  "), UNDEF_PROPERTY, Restriction::AllValuesFrom)]
    #[case(Some(" min 1"), "", Restriction::SomeValuesFrom)]
    fn test_property_name(
        #[case] label: Option<&str>,
        #[case] expected: &str,
        #[case] restriction: Restriction,
    ) {
        assert_eq!(property_name(label), (expected.to_string(), restriction));
    }

    #[test]
    fn test_subclass_label_is_case_insensitive() {
        assert!(is_subclass_label("subClassOf"));
        assert!(is_subclass_label("SUBCLASSOF"));
        assert!(!is_subclass_label("subclass_of"));
    }
}
