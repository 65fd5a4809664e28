// Display helper tests: relative time, text cleanup, bar rendering and
// the category navigation.

use chrono::{DateTime, Duration, TimeZone, Utc};

use ground::bias::split;
use ground::categorize::{categorize, Category, CategoryFilter};
use ground::output::terminal::{bar_segments, split_caption, summary_text};
use ground::output::time::{time_ago, time_ago_str};
use ground::output::{strip_html, truncate_chars};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
}

// ============================================================
// Relative time
// ============================================================

#[test]
fn recent_article_reads_in_hours() {
    assert_eq!(time_ago(now() - Duration::hours(5), now()), "about 5 hours ago");
}

#[test]
fn week_old_article_reads_in_days() {
    assert_eq!(time_ago(now() - Duration::days(7), now()), "7 days ago");
}

#[test]
fn stored_timestamps_are_parsed() {
    // Stored format is RFC 3339 with a Z suffix
    assert_eq!(time_ago_str("2024-03-01T09:00:00Z", now()), "30 minutes ago");
    assert_eq!(time_ago_str("2024-03-01T14:30:00+05:30", now()), "30 minutes ago");
}

// ============================================================
// Text cleanup
// ============================================================

#[test]
fn feed_summary_markup_is_removed() {
    let raw = "<div><img src='x.jpg'/>Stocks &amp; bonds <i>slide</i></div>";
    assert_eq!(strip_html(raw), "Stocks & bonds slide");
}

#[test]
fn truncation_is_char_based() {
    assert_eq!(truncate_chars("नमस्ते दुनिया", 3), "नमस...");
}

#[test]
fn missing_summary_has_placeholder() {
    assert_eq!(summary_text(None), "No summary available.");
}

// ============================================================
// Bias bar
// ============================================================

#[test]
fn bar_fills_its_width_for_every_score() {
    for i in -100..=100 {
        let segments = bar_segments(&split(Some(i as f64)), 30);
        let cells: usize = segments.iter().map(|s| s.chars().count()).sum();
        assert_eq!(cells, 30, "score {i}");
    }
    let unknown: usize = bar_segments(&split(None), 30)
        .iter()
        .map(|s| s.chars().count())
        .sum();
    assert_eq!(unknown, 30);
}

#[test]
fn strong_lean_dominates_the_bar() {
    // {90, 8, 2} over 20 cells; the 2% sliver rounds away
    let widths = bar_segments(&split(Some(-80.0)), 20).map(|s| s.chars().count());
    assert_eq!(widths, [18, 2, 0]);
}

#[test]
fn caption_shows_raw_percentages_when_none_is_negative() {
    assert_eq!(split_caption(&split(Some(40.0))), "L 6%  C 24%  R 70%");
}

#[test]
fn caption_and_bar_agree_for_near_center_scores() {
    // raw split {-10, 80, 30}: the bar draws 0/8/3 over 11 cells
    let raw = split(Some(0.0));
    let widths = bar_segments(&raw, 11).map(|s| s.chars().count());
    assert_eq!(widths, [0, 8, 3]);
    assert_eq!(split_caption(&raw), "L 0%  C 73%  R 27%");

    for i in -20..=20 {
        let [l, c, r] = split(Some(i as f64)).display_percentages();
        assert!((l + c + r - 100.0).abs() < 1e-9, "score {i}");
        assert!(l >= 0.0 && c >= 0.0 && r >= 0.0, "score {i}");
    }
}

// ============================================================
// Category navigation
// ============================================================

#[test]
fn navigation_labels_in_order() {
    let labels: Vec<&str> = CategoryFilter::NAV.iter().map(|f| f.label()).collect();
    assert_eq!(
        labels,
        [
            "All",
            "Politics",
            "Business & Markets",
            "Technology",
            "Health & Medicine",
            "Environment & Climate",
            "Sports",
            "Entertainment",
        ]
    );
}

#[test]
fn categorised_articles_match_their_filter() {
    let category = categorize("Hospital adds vaccine doctors", "");
    assert_eq!(category, Category::Health);
    let filter = CategoryFilter::parse("Health & Medicine").unwrap();
    assert!(filter.matches(Some(category.as_str())));
    assert_eq!(CategoryFilter::All.heading(), "Latest Headlines");
    assert_eq!(filter.heading(), "Health & Medicine");
}
