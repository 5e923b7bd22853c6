//! Case folding for title matching.

/// Returns the key used to compare titles and link targets.
///
/// Every case-insensitive comparison in the crate (link resolution, graph
/// node keying, backlink resolution) goes through this function. It applies
/// Unicode lowercase mapping without any normalization, so `Straße` and
/// `STRASSE` are different keys while `Éclair` and `éclair` are the same.
///
/// # Examples
///
/// ```
/// use notegraph::domain::title_key;
///
/// assert_eq!(title_key("My Note"), title_key("my NOTE"));
/// assert_ne!(title_key("My Note"), title_key("My  Note"));
/// ```
pub fn title_key(title: &str) -> String {
    title.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_ascii_case() {
        assert_eq!(title_key("TypeScript Guide"), "typescript guide");
    }

    #[test]
    fn folds_non_ascii_case() {
        assert_eq!(title_key("ÉCLAIR"), title_key("éclair"));
    }

    #[test]
    fn does_not_trim_or_collapse_whitespace() {
        assert_ne!(title_key(" Note"), title_key("Note"));
    }
}
