// Bias classification: turns a signed bias score into the label and the
// three-way percentage split shown on every article card.
//
// Scores run from -100 (far left) through 0 (center) to +100 (far right).
// A missing score is treated as "unknown" and rendered as neutral.
//
// Everything here is pure: no state, no I/O, safe to call from any task.

pub mod analyzer;
pub mod source;

use serde::{Deserialize, Serialize};

/// Five-bucket categorical lean derived from a bias score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BiasLabel {
    #[serde(rename = "Left")]
    Left,
    #[serde(rename = "Center-Left")]
    CenterLeft,
    #[serde(rename = "Center")]
    Center,
    #[serde(rename = "Center-Right")]
    CenterRight,
    #[serde(rename = "Right")]
    Right,
}

impl BiasLabel {
    /// Determine the label from a known score.
    ///
    /// Inner boundaries are closed: exactly -10 and exactly 10 are `Center`,
    /// exactly -30 is `CenterLeft`, exactly 30 is `CenterRight`.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s < -30.0 => BiasLabel::Left,
            s if s < -10.0 => BiasLabel::CenterLeft,
            s if s <= 10.0 => BiasLabel::Center,
            s if s <= 30.0 => BiasLabel::CenterRight,
            s if s > 30.0 => BiasLabel::Right,
            // NaN fails every comparison
            _ => BiasLabel::Center,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BiasLabel::Left => "Left",
            BiasLabel::CenterLeft => "Center-Left",
            BiasLabel::Center => "Center",
            BiasLabel::CenterRight => "Center-Right",
            BiasLabel::Right => "Right",
        }
    }

    /// All labels, ordered left to right.
    pub fn all() -> [BiasLabel; 5] {
        [
            BiasLabel::Left,
            BiasLabel::CenterLeft,
            BiasLabel::Center,
            BiasLabel::CenterRight,
            BiasLabel::Right,
        ]
    }
}

impl std::fmt::Display for BiasLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Left / center / right percentages used as widths of a stacked bar.
///
/// The three fields always sum to 100. Individual fields are NOT guaranteed
/// to be non-negative: the center branch of [`split`] can produce -10 for the
/// side opposite the lean. Renderers that need drawable widths should go
/// through [`BiasSplit::bar_widths`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiasSplit {
    pub left: f64,
    pub center: f64,
    pub right: f64,
}

impl BiasSplit {
    /// Shown when the score is unknown.
    pub const UNKNOWN: BiasSplit = BiasSplit {
        left: 10.0,
        center: 80.0,
        right: 10.0,
    };

    pub fn total(&self) -> f64 {
        self.left + self.center + self.right
    }

    /// True when any component is below zero.
    pub fn has_negative(&self) -> bool {
        self.left < 0.0 || self.center < 0.0 || self.right < 0.0
    }

    /// Display percentages: negative components count as 0 and the rest are
    /// rescaled to sum to 100. These are the proportions the bar is drawn in.
    pub fn display_percentages(&self) -> [f64; 3] {
        match self.positive_shares() {
            Some([l, c, r]) => [l * 100.0, c * 100.0, r * 100.0],
            None => [0.0, 100.0, 0.0],
        }
    }

    /// Fractions of the positive components, or `None` if nothing is positive.
    fn positive_shares(&self) -> Option<[f64; 3]> {
        let parts = [self.left.max(0.0), self.center.max(0.0), self.right.max(0.0)];
        let positive: f64 = parts.iter().sum();
        if positive <= 0.0 || !positive.is_finite() {
            return None;
        }
        Some(parts.map(|p| p / positive))
    }

    /// Segment widths for drawing a bar `width` cells wide.
    ///
    /// Negative components get zero cells. The remaining cells are shared in
    /// proportion to the positive components, largest remainder first, so the
    /// three widths always add up to `width`.
    pub fn bar_widths(&self, width: usize) -> [usize; 3] {
        let Some(shares) = self.positive_shares() else {
            return [0, width, 0];
        };
        if width == 0 {
            return [0, 0, 0];
        }

        let exact: Vec<f64> = shares.iter().map(|p| p * width as f64).collect();
        let mut cells: [usize; 3] = [
            exact[0].floor() as usize,
            exact[1].floor() as usize,
            exact[2].floor() as usize,
        ];

        let mut order = [0usize, 1, 2];
        order.sort_by(|&a, &b| {
            let ra = exact[a] - exact[a].floor();
            let rb = exact[b] - exact[b].floor();
            rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut assigned: usize = cells.iter().sum();
        for idx in order.iter().cycle() {
            if assigned >= width {
                break;
            }
            cells[*idx] += 1;
            assigned += 1;
        }
        cells
    }
}

/// Classify an optional score. Absent (or NaN) scores are `Center`.
pub fn classify(score: Option<f64>) -> BiasLabel {
    match score {
        Some(s) => BiasLabel::from_score(s),
        None => BiasLabel::Center,
    }
}

/// Derive the left / center / right split for an optional score.
///
/// Each branch computes the third component as the remainder, so the result
/// sums to 100. Only the two outer branches clamp (the minority side at 0).
pub fn split(score: Option<f64>) -> BiasSplit {
    let s = match score {
        Some(s) if !s.is_nan() => s,
        _ => return BiasSplit::UNKNOWN,
    };

    if s < -20.0 {
        let left = 50.0 + s.abs() / 2.0;
        let right = (10.0 - s.abs() / 10.0).max(0.0);
        BiasSplit {
            left,
            center: 100.0 - left - right,
            right,
        }
    } else if s > 20.0 {
        let right = 50.0 + s / 2.0;
        let left = (10.0 - s / 10.0).max(0.0);
        BiasSplit {
            left,
            center: 100.0 - left - right,
            right,
        }
    } else {
        let center = 60.0 + (20.0 - s.abs());
        if s < 0.0 {
            let left = 30.0 + s.abs();
            BiasSplit {
                left,
                center,
                right: 100.0 - center - left,
            }
        } else {
            let right = 30.0 + s;
            BiasSplit {
                left: 100.0 - center - right,
                center,
                right,
            }
        }
    }
}

/// Label and split together, the shape the API and the renderer consume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiasView {
    pub score: Option<f64>,
    pub label: BiasLabel,
    pub split: BiasSplit,
}

impl BiasView {
    pub fn from_score(score: Option<f64>) -> Self {
        Self {
            score,
            label: classify(score),
            split: split(score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_split(actual: BiasSplit, left: f64, center: f64, right: f64) {
        assert!((actual.left - left).abs() < 1e-9, "left: {actual:?}");
        assert!((actual.center - center).abs() < 1e-9, "center: {actual:?}");
        assert!((actual.right - right).abs() < 1e-9, "right: {actual:?}");
    }

    #[test]
    fn test_classify_absent_is_center() {
        assert_eq!(classify(None), BiasLabel::Center);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(Some(-30.0000001)), BiasLabel::Left);
        assert_eq!(classify(Some(-30.0)), BiasLabel::CenterLeft);
        assert_eq!(classify(Some(-10.0000001)), BiasLabel::CenterLeft);
        assert_eq!(classify(Some(-10.0)), BiasLabel::Center);
        assert_eq!(classify(Some(10.0)), BiasLabel::Center);
        assert_eq!(classify(Some(10.0000001)), BiasLabel::CenterRight);
        assert_eq!(classify(Some(30.0)), BiasLabel::CenterRight);
        assert_eq!(classify(Some(30.0000001)), BiasLabel::Right);
    }

    #[test]
    fn test_classify_nan_is_center() {
        assert_eq!(classify(Some(f64::NAN)), BiasLabel::Center);
    }

    #[test]
    fn test_split_absent() {
        assert_split(split(None), 10.0, 80.0, 10.0);
    }

    #[test]
    fn test_split_outer_branches() {
        assert_split(split(Some(-40.0)), 70.0, 24.0, 6.0);
        assert_split(split(Some(40.0)), 6.0, 24.0, 70.0);
    }

    #[test]
    fn test_split_minority_side_clamped_at_extremes() {
        // 10 - 100/10 = 0, and beyond the usual range it would go negative
        assert_split(split(Some(100.0)), 0.0, 0.0, 100.0);
        let far = split(Some(-150.0));
        assert_eq!(far.right, 0.0);
        assert!((far.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_split_center_branch_keeps_negative_component() {
        assert_split(split(Some(0.0)), -10.0, 80.0, 30.0);
        assert_split(split(Some(15.0)), -10.0, 65.0, 45.0);
        assert_split(split(Some(-5.0)), 35.0, 75.0, -10.0);
        assert!(split(Some(0.0)).has_negative());
    }

    #[test]
    fn test_bar_widths_sum_to_width() {
        for score in [-100.0, -40.0, -20.0, -5.0, 0.0, 7.5, 20.0, 33.3, 100.0] {
            let widths = split(Some(score)).bar_widths(30);
            assert_eq!(widths.iter().sum::<usize>(), 30, "score {score}");
        }
    }

    #[test]
    fn test_bar_widths_drop_negative_segment() {
        // left = -10 gets no cells
        let widths = split(Some(0.0)).bar_widths(11);
        assert_eq!(widths[0], 0);
        assert_eq!(widths, [0, 8, 3]);
    }

    #[test]
    fn test_display_percentages_match_bar() {
        let raw = split(Some(0.0));
        let [l, c, r] = raw.display_percentages();
        assert_eq!(l, 0.0);
        assert!((l + c + r - 100.0).abs() < 1e-9);
        // 80:30 between center and right, the same ratio the bar uses
        assert!((c / r - 80.0 / 30.0).abs() < 1e-9);
        assert_eq!(raw.bar_widths(11), [0, 8, 3]);

        // Nothing negative: unchanged
        let [l, c, r] = split(Some(-40.0)).display_percentages();
        assert!((l - 70.0).abs() < 1e-9 && (c - 24.0).abs() < 1e-9 && (r - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_bar_widths_zero_width() {
        assert_eq!(BiasSplit::UNKNOWN.bar_widths(0), [0, 0, 0]);
    }

    #[test]
    fn test_label_serializes_with_hyphen() {
        let json = serde_json::to_string(&BiasLabel::CenterLeft).unwrap();
        assert_eq!(json, "\"Center-Left\"");
        let back: BiasLabel = serde_json::from_str("\"Center-Right\"").unwrap();
        assert_eq!(back, BiasLabel::CenterRight);
    }

    #[test]
    fn test_view_from_score() {
        let view = BiasView::from_score(Some(-40.0));
        assert_eq!(view.label, BiasLabel::Left);
        assert_split(view.split, 70.0, 24.0, 6.0);
    }
}
