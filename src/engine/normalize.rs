//! Text normalization shared by the predicates.

/// Lowercase `name` and strip apostrophes, so `"O'Hare Cinema"` and
/// `"ohare cinema"` compare equal.
pub fn normalize_name(name: &str) -> String {
    regex!(r"['\u{2019}`]").replace_all(name.trim(), "").to_lowercase()
}

/// Treat empty and whitespace-only filter values as absent.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apostrophes_and_case_are_ignored() {
        assert_eq!(normalize_name("O'Hare Cinema"), "ohare cinema");
        assert_eq!(normalize_name("O\u{2019}Hare Cinema"), "ohare cinema");
        assert_eq!(normalize_name(" Zoolander 2 "), "zoolander 2");
    }

    #[test]
    fn blank_values_are_absent() {
        assert_eq!(present(Some("")), None);
        assert_eq!(present(Some("  ")), None);
        assert_eq!(present(None), None);
        assert_eq!(present(Some(" RM16 ")), Some("RM16"));
    }
}
