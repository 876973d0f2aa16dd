use super::model::ResultFile;

// ---------------------------------------------------------------------------
// Field selection: which columns become panels
// ---------------------------------------------------------------------------

/// Choose the fields to plot for `file`.
///
/// * Any canonical field present → exactly those present, in canonical order
///   (the file's own column order is ignored).
/// * Otherwise → the first `fallback_count` columns other than `time_column`,
///   in file order. Fewer is fine.
///
/// An empty result means there is nothing to plot.
pub fn select_fields(
    file: &ResultFile,
    canonical: &[String],
    fallback_count: usize,
    time_column: &str,
) -> Vec<String> {
    let preferred: Vec<String> = canonical
        .iter()
        .filter(|f| file.has_column(f))
        .cloned()
        .collect();
    if !preferred.is_empty() {
        return preferred;
    }

    file.columns
        .iter()
        .filter(|c| c.as_str() != time_column)
        .take(fallback_count)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CANONICAL_FIELDS;

    fn file_with(columns: &[&str]) -> ResultFile {
        ResultFile::new("t", columns.iter().map(|c| c.to_string()).collect(), Vec::new())
    }

    fn select(columns: &[&str]) -> Vec<String> {
        let canonical: Vec<String> = CANONICAL_FIELDS.iter().map(|s| s.to_string()).collect();
        select_fields(&file_with(columns), &canonical, 3, "time")
    }

    #[test]
    fn test_canonical_fields_in_canonical_order() {
        assert_eq!(
            select(&["time", "torque", "vd", "iq", "omega_e"]),
            vec!["iq", "omega_e", "torque"]
        );
        assert_eq!(
            select(&["time", "id", "iq", "vd", "vq", "theta_e", "omega_e", "omega_m", "torque"]),
            vec!["id", "iq", "omega_e", "torque"]
        );
    }

    #[test]
    fn test_single_canonical_field_wins_over_fallback() {
        assert_eq!(select(&["time", "foo", "bar", "torque"]), vec!["torque"]);
    }

    #[test]
    fn test_fallback_first_three_non_time() {
        assert_eq!(
            select(&["time", "foo", "bar", "baz", "qux"]),
            vec!["foo", "bar", "baz"]
        );
        assert_eq!(select(&["foo", "time", "bar"]), vec!["foo", "bar"]);
    }

    #[test]
    fn test_partial_fallback() {
        assert_eq!(select(&["time", "ia"]), vec!["ia"]);
    }

    #[test]
    fn test_time_only_selects_nothing() {
        assert!(select(&["time"]).is_empty());
    }
}
