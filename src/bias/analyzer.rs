// Keyword-based bias scoring for article text.
//
// Counts distinct left-leaning and right-leaning indicator phrases in the
// title and summary, weights loaded/emotional phrasing double, and turns the
// balance into a score from -100 (left) to +100 (right). Neutral reporting
// phrases ("according to", "data shows") pull the score toward zero.

/// Left-leaning policy and political vocabulary.
pub const LEFT_KEYWORDS: &[&str] = &[
    // Social issues
    "progressive",
    "liberal",
    "equality",
    "diversity",
    "inclusion",
    "social justice",
    "climate action",
    "renewable energy",
    "environmental protection",
    "workers' rights",
    "labor union",
    "minimum wage",
    "universal healthcare",
    "public education",
    "welfare",
    "social programs",
    "redistribution",
    // Economic
    "regulate corporations",
    "tax the rich",
    "wealth tax",
    "corporate accountability",
    "public sector",
    "nationalize",
    "subsidize",
    "government intervention",
    // Political
    "congress party",
    "left alliance",
    "secular",
    "minority rights",
    "affirmative action",
    "reservation",
    "social welfare",
];

/// Right-leaning policy and political vocabulary.
pub const RIGHT_KEYWORDS: &[&str] = &[
    // Economic
    "free market",
    "privatization",
    "deregulation",
    "tax cuts",
    "business friendly",
    "entrepreneurship",
    "private sector",
    "capitalism",
    "economic growth",
    "fiscal responsibility",
    "reduce spending",
    "lower taxes",
    // Social / cultural
    "traditional values",
    "national security",
    "strong borders",
    "law and order",
    "military strength",
    "patriotism",
    "cultural heritage",
    "national pride",
    // Political
    "bjp",
    "hindutva",
    "nationalism",
    "hindu rashtra",
    "anti-corruption",
    "development",
    "infrastructure",
    "make in india",
];

/// Attribution and balance phrases that dampen the score.
pub const NEUTRAL_KEYWORDS: &[&str] = &[
    "according to",
    "sources say",
    "reports indicate",
    "data shows",
    "experts say",
    "analysis reveals",
    "study finds",
    "research shows",
    "both sides",
    "debate",
    "discussion",
    "various perspectives",
];

/// Loaded language associated with the left; counts double.
pub const EMOTIONAL_LEFT: &[&str] = &[
    "oppression",
    "exploitation",
    "inequality",
    "injustice",
    "discrimination",
    "marginalized",
    "vulnerable",
    "suffering",
    "crisis",
    "urgent action needed",
];

/// Loaded language associated with the right; counts double.
pub const EMOTIONAL_RIGHT: &[&str] = &[
    "threat",
    "danger",
    "invasion",
    "illegal",
    "radical",
    "extremist",
    "anti-national",
    "terrorist",
    "sedition",
    "betrayal",
    "attack on culture",
];

const EMOTIONAL_WEIGHT: u32 = 2;

/// Raw indicator counts found in a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordCounts {
    pub left: u32,
    pub right: u32,
    pub neutral: u32,
    pub emotional_left: u32,
    pub emotional_right: u32,
}

impl KeywordCounts {
    /// Count distinct indicator phrases present in already-lowercased text.
    pub fn from_lowercase(text: &str) -> Self {
        Self {
            left: count_present(text, LEFT_KEYWORDS),
            right: count_present(text, RIGHT_KEYWORDS),
            neutral: count_present(text, NEUTRAL_KEYWORDS),
            emotional_left: count_present(text, EMOTIONAL_LEFT),
            emotional_right: count_present(text, EMOTIONAL_RIGHT),
        }
    }

    pub fn left_total(&self) -> u32 {
        self.left + self.emotional_left * EMOTIONAL_WEIGHT
    }

    pub fn right_total(&self) -> u32 {
        self.right + self.emotional_right * EMOTIONAL_WEIGHT
    }

    /// Convert the counts into a score in [-100, 100].
    pub fn score(&self) -> f64 {
        let left = self.left_total() as f64;
        let right = self.right_total() as f64;
        let total = left + right;
        if total == 0.0 {
            return 0.0;
        }

        let mut score = (right - left) / total * 100.0;

        if self.neutral > 0 {
            let reduction = (self.neutral as f64 * 0.1).min(0.3);
            score *= 1.0 - reduction;
        }

        score.clamp(-100.0, 100.0)
    }
}

/// Score an article from its title and (optional, possibly empty) summary.
pub fn score_text(title: &str, summary: &str) -> f64 {
    let text = format!("{title} {summary}").to_lowercase();
    KeywordCounts::from_lowercase(&text).score()
}

/// Substring presence, each phrase counted at most once.
fn count_present(text: &str, keywords: &[&str]) -> u32 {
    keywords.iter().filter(|k| text.contains(*k)).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_indicators_is_zero() {
        assert_eq!(score_text("Monsoon arrives in Kerala", ""), 0.0);
    }

    #[test]
    fn test_neutral_only_is_zero() {
        assert_eq!(score_text("According to officials, the debate continues", ""), 0.0);
    }

    #[test]
    fn test_pure_left() {
        let score = score_text("Minimum wage hike backed by labor union", "");
        assert!((score + 100.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_pure_right() {
        let score = score_text("Tax cuts to spur economic growth", "");
        assert!((score - 100.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_emotional_language_counts_double() {
        // left: "welfare" (1); right: emotional "threat" (2) -> (2-1)/3*100
        let score = score_text("Welfare cuts a threat", "");
        assert!((score - 100.0 / 3.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_neutral_phrases_dampen() {
        // pure right (100) with two neutral phrases -> 100 * 0.8
        let score = score_text("Experts say tax cuts drive growth", "according to the ministry");
        assert!((score - 80.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_neutral_dampening_caps_at_thirty_percent() {
        let score = score_text(
            "Free market debate",
            "experts say, data shows, study finds, research shows, according to",
        );
        assert!((score - 70.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_repeated_keyword_counted_once() {
        let counts = KeywordCounts::from_lowercase("welfare welfare welfare");
        assert_eq!(counts.left, 1);
    }

    #[test]
    fn test_summary_contributes() {
        let score = score_text("Budget announced", "Wealth tax proposed");
        assert!(score < 0.0);
    }
}
