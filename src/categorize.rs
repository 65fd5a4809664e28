// Article categorisation and the category navigation filter.
//
// Categories are assigned at ingest time by counting keyword hits in the
// title and summary. The reader filters by the navigation labels, some of
// which are longer display names for the stored category
// ("Business & Markets" -> Business).

use serde::{Deserialize, Serialize};

/// Stored article category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Politics,
    Business,
    Technology,
    Health,
    Environment,
    Sports,
    Entertainment,
    General,
}

impl Category {
    /// Keyword-scored categories in tie-break order. `General` is the fallback.
    pub const SCORED: [Category; 7] = [
        Category::Politics,
        Category::Business,
        Category::Technology,
        Category::Health,
        Category::Environment,
        Category::Sports,
        Category::Entertainment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Politics => "Politics",
            Category::Business => "Business",
            Category::Technology => "Technology",
            Category::Health => "Health",
            Category::Environment => "Environment",
            Category::Sports => "Sports",
            Category::Entertainment => "Entertainment",
            Category::General => "General",
        }
    }

    /// Parse a stored category name (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Category::SCORED
            .into_iter()
            .chain(std::iter::once(Category::General))
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Politics => &[
                "election",
                "government",
                "minister",
                "parliament",
                "political",
                "party",
                "bjp",
                "congress",
                "vote",
                "policy",
                "law",
                "supreme court",
                "president",
                "prime minister",
            ],
            Category::Business => &[
                "business",
                "economy",
                "market",
                "stock",
                "company",
                "corporate",
                "trade",
                "finance",
                "bank",
                "rupee",
                "gdp",
                "industry",
                "startup",
                "investment",
            ],
            Category::Technology => &[
                "technology",
                "tech",
                "ai",
                "artificial intelligence",
                "software",
                "app",
                "digital",
                "internet",
                "cyber",
                "smartphone",
                "computer",
                "innovation",
                "startup",
            ],
            Category::Health => &[
                "health",
                "medical",
                "hospital",
                "doctor",
                "disease",
                "covid",
                "vaccine",
                "medicine",
                "patient",
                "treatment",
                "healthcare",
            ],
            Category::Environment => &[
                "environment",
                "climate",
                "pollution",
                "green",
                "renewable",
                "carbon",
                "weather",
                "forest",
                "wildlife",
                "conservation",
            ],
            Category::Sports => &[
                "cricket",
                "football",
                "sports",
                "match",
                "player",
                "team",
                "tournament",
                "olympics",
                "ipl",
                "fifa",
                "championship",
            ],
            Category::Entertainment => &[
                "film",
                "movie",
                "actor",
                "actress",
                "bollywood",
                "music",
                "celebrity",
                "entertainment",
                "show",
                "series",
                "netflix",
            ],
            Category::General => &[],
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Assign a category from keyword hits in the title and summary.
///
/// Matching is by substring, each keyword counted once. The highest count
/// wins; on a tie the category listed first in [`Category::SCORED`] wins.
pub fn categorize(title: &str, summary: &str) -> Category {
    let text = format!("{title} {summary}").to_lowercase();

    let mut best: Option<(Category, usize)> = None;
    for category in Category::SCORED {
        let hits = category
            .keywords()
            .iter()
            .filter(|k| text.contains(*k))
            .count();
        if hits == 0 {
            continue;
        }
        match best {
            Some((_, best_hits)) if best_hits >= hits => {}
            _ => best = Some((category, hits)),
        }
    }

    best.map(|(c, _)| c).unwrap_or(Category::General)
}

/// One entry in the category navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Navigation entries in display order.
    pub const NAV: [CategoryFilter; 8] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::Politics),
        CategoryFilter::Only(Category::Business),
        CategoryFilter::Only(Category::Technology),
        CategoryFilter::Only(Category::Health),
        CategoryFilter::Only(Category::Environment),
        CategoryFilter::Only(Category::Sports),
        CategoryFilter::Only(Category::Entertainment),
    ];

    /// Label shown in the navigation bar.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(Category::Business) => "Business & Markets",
            CategoryFilter::Only(Category::Health) => "Health & Medicine",
            CategoryFilter::Only(Category::Environment) => "Environment & Climate",
            CategoryFilter::Only(other) => other.as_str(),
        }
    }

    /// Section heading for the article list.
    pub fn heading(&self) -> &'static str {
        match self {
            CategoryFilter::All => "Latest Headlines",
            other => other.label(),
        }
    }

    /// Stored category to query by, or `None` for everything.
    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(c) => Some(*c),
        }
    }

    pub fn matches(&self, stored: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => stored == Some(c.as_str()),
        }
    }

    /// Accepts a navigation label or a stored category name.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(nav) = CategoryFilter::NAV
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(input))
        {
            return Some(nav);
        }
        Category::parse(input).map(CategoryFilter::Only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keywords_is_general() {
        assert_eq!(categorize("Monsoon arrives", ""), Category::General);
    }

    #[test]
    fn test_politics() {
        assert_eq!(
            categorize("Parliament passes election reform", ""),
            Category::Politics
        );
    }

    #[test]
    fn test_highest_count_wins() {
        // sports: cricket, team, tournament vs politics: government
        let c = categorize(
            "Government honours cricket team",
            "after the tournament win",
        );
        assert_eq!(c, Category::Sports);
    }

    #[test]
    fn test_tie_goes_to_earlier_category() {
        // "startup" counts for both Business and Technology
        assert_eq!(categorize("Startup", ""), Category::Business);
    }

    #[test]
    fn test_filter_labels_round_trip() {
        for filter in CategoryFilter::NAV {
            assert_eq!(CategoryFilter::parse(filter.label()), Some(filter));
        }
    }

    #[test]
    fn test_filter_accepts_stored_name() {
        assert_eq!(
            CategoryFilter::parse("business"),
            Some(CategoryFilter::Only(Category::Business))
        );
        assert_eq!(
            CategoryFilter::parse("general"),
            Some(CategoryFilter::Only(Category::General))
        );
        assert_eq!(CategoryFilter::parse("weather"), None);
    }

    #[test]
    fn test_filter_matches() {
        let business = CategoryFilter::parse("Business & Markets").unwrap();
        assert!(business.matches(Some("Business")));
        assert!(!business.matches(Some("Politics")));
        assert!(!business.matches(None));
        assert!(CategoryFilter::All.matches(None));
    }
}
