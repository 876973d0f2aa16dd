use std::ops::Range;

// ---------------------------------------------------------------------------
// Axis ranges and gap-aware line segments
// ---------------------------------------------------------------------------

/// Min and max over the finite values, or `None` if there are none.
pub fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Turn a data range into an axis range.
///
/// `pad` is a fraction of the span added on both sides. A flat range is
/// widened by ±0.5 and an empty one becomes `-1..1`.
pub fn axis_range(range: Option<(f64, f64)>, pad: f64) -> Range<f64> {
    match range {
        None => -1.0..1.0,
        Some((lo, hi)) => {
            let span = hi - lo;
            if span.abs() < 1e-12 {
                (lo - 0.5)..(hi + 0.5)
            } else {
                (lo - span * pad)..(hi + span * pad)
            }
        }
    }
}

/// Split `(x, y)` pairs into runs of finite points. Any non-finite value
/// ends the current run, which leaves a gap in the drawn line.
pub fn segments(x: &[f64], y: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for (&xi, &yi) in x.iter().zip(y) {
        if xi.is_finite() && yi.is_finite() {
            current.push((xi, yi));
        } else if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_range_ignores_nan() {
        assert_eq!(finite_range(&[f64::NAN, 2.0, -1.0, f64::INFINITY]), Some((-1.0, 2.0)));
        assert_eq!(finite_range(&[f64::NAN]), None);
        assert_eq!(finite_range(&[]), None);
    }

    #[test]
    fn test_axis_range_padding() {
        assert_eq!(axis_range(Some((0.0, 10.0)), 0.1), -1.0..11.0);
        assert_eq!(axis_range(Some((0.0, 10.0)), 0.0), 0.0..10.0);
        assert_eq!(axis_range(Some((3.0, 3.0)), 0.1), 2.5..3.5);
        assert_eq!(axis_range(None, 0.1), -1.0..1.0);
    }

    #[test]
    fn test_segments_split_on_nan() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [1.0, f64::NAN, 3.0, 4.0, f64::NAN];
        let segs = segments(&x, &y);
        assert_eq!(segs, vec![vec![(0.0, 1.0)], vec![(2.0, 3.0), (3.0, 4.0)]]);
    }

    #[test]
    fn test_segments_all_missing() {
        assert!(segments(&[0.0, 1.0], &[f64::NAN, f64::NAN]).is_empty());
    }
}
