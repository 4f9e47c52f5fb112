use std::collections::{HashMap, HashSet};
use regex::{Captures, Regex};
use lazy_static::lazy_static;


lazy_static! {
    pub(crate) static ref PLACEHOLDER_MATCH_RE: Regex = Regex::new(r"\{\{.*?\}\}").expect("placeholder regex is valid");
}

#[inline]
pub(crate) fn strip_format(key: &str) -> &str {
    //! Strips "{{" and "}}" from a matched placeholder.
    //! Only call this with a match of [PLACEHOLDER_MATCH_RE].
    &key[2..key.len() - 2]
}

/// Replaces every filled placeholder with its value. Unfilled or unknown placeholders are left as they are.
///
/// Values are inserted verbatim and are not scanned for placeholders again.
pub(crate) fn replace_placeholders(original: &str, mapping: &HashMap<String, Option<String>>) -> String {
    PLACEHOLDER_MATCH_RE
        .replace_all(original, |captures: &Captures| {
            let match_text = &captures[0];
            match mapping.get(strip_format(match_text)) {
                Some(Some(value)) => value.clone(),
                _ => match_text.to_string(),
            }
        })
        .into_owned()
}

pub(crate) fn get_placeholders(string: &str) -> HashSet<String> {
    PLACEHOLDER_MATCH_RE.captures_iter(string)
        .map(|captures| strip_format(&captures[0]).to_string())
        .collect()
}

#[cfg(test)]
mod string_tests {
    use std::collections::{HashMap, HashSet};
    use super::{get_placeholders, replace_placeholders};

    #[test]
    fn test_get_keys() {
        let string = "{{a}}";
        let keys = get_placeholders(string);
        let expect_keys = HashSet::from(["a".to_string()]);
        assert_eq!(expect_keys, keys);

        let string = "{{a\n}}";
        let keys = get_placeholders(string);
        assert_eq!(0, keys.len());

        let string = "{{a}}    {{b}}";
        let keys = get_placeholders(string);
        let expect_keys = HashSet::from(["a".to_string(), "b".to_string()]);
        assert_eq!(expect_keys, keys);
    }

    #[test]
    fn test_replace() {
        let string = "{{a}} and {{b}} and {{a}}";
        let mapping = HashMap::from([
            ("a".to_string(), Some("alice".to_string())),
            ("b".to_string(), Some("bob".to_string())),
        ]);
        assert_eq!("alice and bob and alice", replace_placeholders(string, &mapping));
    }

    #[test]
    fn test_replace_keeps_unfilled_and_values_verbatim() {
        let string = "{{a}} / {{b}}";
        let mapping = HashMap::from([
            ("a".to_string(), Some("{{b}} $1".to_string())),
            ("b".to_string(), None),
        ]);
        assert_eq!("{{b}} $1 / {{b}}", replace_placeholders(string, &mapping));
    }
}
