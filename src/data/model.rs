use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// ResultRow – one data line of a results CSV
// ---------------------------------------------------------------------------

/// A single sample: column name → value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRow {
    pub values: BTreeMap<String, f64>,
}

impl ResultRow {
    /// Value of `column`, if the row carries it.
    pub fn get(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    /// Value of `column`, or NaN when absent so the plot shows a gap.
    pub fn get_or_nan(&self, column: &str) -> f64 {
        self.get(column).unwrap_or(f64::NAN)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ResultRow {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        ResultRow {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// ResultFile – a parsed CSV
// ---------------------------------------------------------------------------

/// All rows of one results file, in file order (not re-sorted by time).
#[derive(Debug, Clone)]
pub struct ResultFile {
    /// File name without extension, e.g. `speed_step_test`.
    pub stem: String,
    /// Header columns in their original order.
    pub columns: Vec<String>,
    pub rows: Vec<ResultRow>,
}

impl ResultFile {
    pub fn new(stem: impl Into<String>, columns: Vec<String>, rows: Vec<ResultRow>) -> Self {
        ResultFile {
            stem: stem.into(),
            columns,
            rows,
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the file had a header but no data.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// One column across all rows; missing cells become NaN.
    pub fn series(&self, column: &str) -> Vec<f64> {
        self.rows.iter().map(|r| r.get_or_nan(column)).collect()
    }
}

// ---------------------------------------------------------------------------
// PlotSpec – what the renderer draws for one file
// ---------------------------------------------------------------------------

/// Derived description of one figure. Built right before rendering and
/// never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    /// Figure title (the file stem).
    pub title: String,
    /// One stacked panel per field, top to bottom.
    pub fields: Vec<String>,
    /// Shared x-axis values.
    pub x: Vec<f64>,
    /// Label under the bottom panel.
    pub x_label: String,
}

impl PlotSpec {
    pub fn new(file: &ResultFile, fields: Vec<String>, time_column: &str, x_label: &str) -> Self {
        PlotSpec {
            title: file.stem.clone(),
            fields,
            x: file.series(time_column),
            x_label: x_label.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultFile {
        ResultFile::new(
            "speed_step_test",
            vec!["time".into(), "omega_e".into()],
            vec![
                [("time", 0.0), ("omega_e", 1.0)].into_iter().collect(),
                [("time", 0.1)].into_iter().collect(),
            ],
        )
    }

    #[test]
    fn test_missing_cell_reads_as_nan() {
        let file = sample();
        let series = file.series("omega_e");
        assert_eq!(series[0], 1.0);
        assert!(series[1].is_nan());
    }

    #[test]
    fn test_plot_spec_takes_stem_and_time() {
        let file = sample();
        let spec = PlotSpec::new(&file, vec!["omega_e".into()], "time", "time [s]");
        assert_eq!(spec.title, "speed_step_test");
        assert_eq!(spec.x, vec![0.0, 0.1]);
        assert_eq!(spec.fields, vec!["omega_e"]);
    }

    #[test]
    fn test_len_and_columns() {
        let file = sample();
        assert_eq!(file.len(), 2);
        assert!(!file.is_empty());
        assert!(file.has_column("time"));
        assert!(!file.has_column("torque"));
    }
}
