// Source-level lean: the small colored dot next to a source badge.
//
// Sources are rated on a coarse -10..10 scale (not the article score scale),
// so only three buckets are shown.

use serde::{Deserialize, Serialize};

/// Threshold beyond which a source is shown as leaning.
const LEAN_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceLean {
    Left,
    Center,
    Right,
}

impl SourceLean {
    /// Bucket a source rating. Missing or zero ratings are `Center`.
    pub fn from_rating(rating: Option<f64>) -> Self {
        match rating {
            Some(r) if r < -LEAN_THRESHOLD => SourceLean::Left,
            Some(r) if r > LEAN_THRESHOLD => SourceLean::Right,
            _ => SourceLean::Center,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLean::Left => "Left",
            SourceLean::Center => "Center",
            SourceLean::Right => "Right",
        }
    }
}

impl std::fmt::Display for SourceLean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_zero_are_center() {
        assert_eq!(SourceLean::from_rating(None), SourceLean::Center);
        assert_eq!(SourceLean::from_rating(Some(0.0)), SourceLean::Center);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(SourceLean::from_rating(Some(-3.0)), SourceLean::Center);
        assert_eq!(SourceLean::from_rating(Some(3.0)), SourceLean::Center);
        assert_eq!(SourceLean::from_rating(Some(-3.5)), SourceLean::Left);
        assert_eq!(SourceLean::from_rating(Some(3.5)), SourceLean::Right);
    }
}
