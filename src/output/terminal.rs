// Colored terminal output for headlines, sources and live scores.
//
// This module handles all terminal-specific formatting: colors, tables and
// the bias bar. The main.rs command handlers delegate here.

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};

use super::time::time_ago_str;
use super::truncate_chars;
use crate::bias::source::SourceLean;
use crate::bias::{BiasLabel, BiasSplit, BiasView};
use crate::categorize::CategoryFilter;
use crate::client::{FetchState, Theme};
use crate::db::models::{ArticleView, Source};
use crate::pipeline::ingest::IngestSummary;
use crate::sports::LiveMatch;

/// Cells in the bias bar on an article card.
pub const BAR_WIDTH: usize = 30;

const SUMMARY_CHARS: usize = 200;

const NO_SUMMARY: &str = "No summary available.";

/// Text styled for the current theme's primary foreground.
fn primary(text: &str, theme: Theme) -> ColoredString {
    match theme {
        Theme::Dark => text.bright_white(),
        Theme::Light => text.black(),
    }
}

fn colorize_label(label: BiasLabel) -> ColoredString {
    match label {
        BiasLabel::Left => label.as_str().blue().bold(),
        BiasLabel::CenterLeft => label.as_str().bright_blue(),
        BiasLabel::Center => label.as_str().magenta(),
        BiasLabel::CenterRight => label.as_str().bright_red(),
        BiasLabel::Right => label.as_str().red().bold(),
    }
}

fn lean_dot(lean: SourceLean) -> ColoredString {
    match lean {
        SourceLean::Left => "●".blue(),
        SourceLean::Center => "●".magenta(),
        SourceLean::Right => "●".red(),
    }
}

/// The three bar segments as plain strings (left, center, right).
pub fn bar_segments(split: &BiasSplit, width: usize) -> [String; 3] {
    let [l, c, r] = split.bar_widths(width);
    ["█".repeat(l), "█".repeat(c), "█".repeat(r)]
}

/// A stacked left/center/right bar, blue, purple and red.
pub fn bias_bar(split: &BiasSplit, width: usize) -> String {
    let [left, center, right] = bar_segments(split, width);
    format!("{}{}{}", left.blue(), center.magenta(), right.red())
}

/// Percentages shown beside the bar, in the bar's own proportions.
/// Negative components read as 0%.
pub fn split_caption(split: &BiasSplit) -> String {
    let [left, center, right] = split.display_percentages();
    format!("L {left:.0}%  C {center:.0}%  R {right:.0}%")
}

/// The summary line of a card: truncated text, or a placeholder.
pub fn summary_text(summary: Option<&str>) -> String {
    match summary.map(str::trim) {
        Some(s) if !s.is_empty() => truncate_chars(s, SUMMARY_CHARS),
        _ => NO_SUMMARY.to_string(),
    }
}

/// Display one article card.
pub fn display_article_card(view: &ArticleView, theme: Theme, now: DateTime<Utc>) {
    let article = &view.article;
    let (source_name, lean) = match &article.source {
        Some(source) => (
            source.name.as_str(),
            SourceLean::from_rating(source.bias_rating),
        ),
        None => ("Unknown source", SourceLean::Center),
    };

    println!(
        "  {} {} {}  {}",
        format!(" {source_name} ").on_bright_black().white().bold(),
        lean_dot(lean),
        lean.as_str().dimmed(),
        time_ago_str(&article.published_at, now).dimmed(),
    );
    println!("  {}", primary(&article.title, theme).bold());
    println!(
        "  {}",
        summary_text(article.summary.as_deref()).dimmed()
    );
    display_bias_line(&view.bias, article.category.as_deref());
    println!("  {}", article.url.dimmed().underline());
}

fn display_bias_line(bias: &BiasView, category: Option<&str>) {
    let category = category.unwrap_or("General");
    println!(
        "  {}  {:<13} {}  {}",
        category.cyan(),
        colorize_label(bias.label),
        bias_bar(&bias.split, BAR_WIDTH),
        split_caption(&bias.split).dimmed(),
    );
}

/// Display the headlines page: heading, navigation and cards.
pub fn display_headlines(
    filter: CategoryFilter,
    state: &FetchState<Vec<ArticleView>>,
    theme: Theme,
    now: DateTime<Utc>,
) {
    let nav: Vec<String> = CategoryFilter::NAV
        .iter()
        .map(|f| {
            if *f == filter {
                format!("[{}]", f.label()).bold().to_string()
            } else {
                f.label().dimmed().to_string()
            }
        })
        .collect();
    println!("\n  {}", nav.join("  "));
    println!(
        "\n{}\n",
        primary(&format!("=== {} ===", filter.heading()), theme).bold()
    );

    match state {
        FetchState::Loading => println!("  {}", "Loading headlines...".dimmed()),
        FetchState::Failed(message) => {
            println!("  {} {}", "Error:".red().bold(), message);
            println!("  Is the server running? Start it with `ground serve`.");
        }
        FetchState::Ready(articles) if articles.is_empty() => {
            println!("  No articles found in this category.");
        }
        FetchState::Ready(articles) => {
            for view in articles {
                display_article_card(view, theme, now);
                println!();
            }
        }
    }
}

/// Display the bias breakdown for a single score.
pub fn display_bias(view: &BiasView) {
    let score = view
        .score
        .map(|s| format!("{s:.1}"))
        .unwrap_or_else(|| "unknown".to_string());
    println!("  Score: {score}");
    println!("  Label: {}", colorize_label(view.label));
    println!(
        "  Split: left {:.1}, center {:.1}, right {:.1}",
        view.split.left, view.split.center, view.split.right
    );
    println!(
        "  {}  {}",
        bias_bar(&view.split, BAR_WIDTH),
        split_caption(&view.split).dimmed()
    );
    if view.split.has_negative() {
        println!(
            "  {}",
            "Note: one component is negative; it is drawn as zero width.".yellow()
        );
    }
}

/// Display the source table.
pub fn display_sources(state: &FetchState<Vec<Source>>) {
    let sources = match state {
        FetchState::Loading => {
            println!("  {}", "Loading sources...".dimmed());
            return;
        }
        FetchState::Failed(message) => {
            println!("  {} {}", "Error:".red().bold(), message);
            return;
        }
        FetchState::Ready(sources) => sources,
    };

    if sources.is_empty() {
        println!("No sources yet. Run `ground seed` to add the default outlets.");
        return;
    }

    println!(
        "\n{}",
        format!("=== News Sources ({}) ===", sources.len()).bold()
    );
    println!();
    println!(
        "  {:<28} {:<8} {:>11}  {}",
        "Name".dimmed(),
        "Lean".dimmed(),
        "Reliability".dimmed(),
        "Website".dimmed(),
    );
    println!("  {}", "-".repeat(80).dimmed());

    for source in sources {
        let lean = SourceLean::from_rating(source.bias_rating);
        let reliability = source
            .reliability_rating
            .map(|r| format!("{r:.1}/10"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<28} {} {:<6} {:>11}  {}",
            truncate_chars(&source.name, 25),
            lean_dot(lean),
            lean.as_str(),
            reliability,
            source.url.dimmed(),
        );
    }
    println!();
}

/// Display the live-score board.
pub fn display_live_scores(state: &FetchState<Vec<LiveMatch>>, theme: Theme) {
    println!("\n{}", primary("=== Live Scores ===", theme).bold());
    println!();

    let matches = match state {
        FetchState::Loading => {
            println!("  {}", "Loading live scores...".dimmed());
            return;
        }
        FetchState::Failed(message) => {
            println!("  {} {}", "Error:".red().bold(), message);
            return;
        }
        FetchState::Ready(matches) => matches,
    };

    if matches.is_empty() {
        println!("  No matches live right now.");
        return;
    }

    for m in matches {
        let status = if m.is_live {
            format!(" {} ", m.status).on_red().white().bold()
        } else {
            m.status.dimmed()
        };
        println!(
            "  {}  {} {}",
            m.sport.cyan().bold(),
            m.league,
            status
        );
        for team in [&m.team1, &m.team2] {
            let overs = team
                .overs
                .as_deref()
                .map(|o| format!(" ({o} ov)"))
                .unwrap_or_default();
            println!(
                "    {:<5} {:<26} {}{}",
                team.short.bold(),
                team.name,
                primary(&team.score, theme).bold(),
                overs.dimmed()
            );
        }
        let clock = m.time.as_deref().map(|t| format!("{t}  ")).unwrap_or_default();
        println!("    {}{}", clock.yellow(), m.venue.dimmed());
        println!("    {}", m.details_url.dimmed().underline());
        println!();
    }
}

/// Display the result of a fetch run.
pub fn display_ingest_summary(summary: &IngestSummary) {
    println!(
        "\n{} {} new articles from {} feeds ({} already stored)",
        "Fetched:".green().bold(),
        summary.inserted,
        summary.feeds,
        summary.duplicates
    );
    if summary.failed_feeds > 0 {
        println!(
            "  {} {} feeds could not be fetched (see log)",
            "!".yellow(),
            summary.failed_feeds
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bias::split;

    #[test]
    fn test_bar_segments_drop_negative_side() {
        let [l, c, r] = bar_segments(&split(Some(0.0)), 11);
        assert_eq!(l, "");
        assert_eq!(c.chars().count(), 8);
        assert_eq!(r.chars().count(), 3);
    }

    #[test]
    fn test_split_caption_clamps_display() {
        assert_eq!(split_caption(&split(Some(0.0))), "L 0%  C 73%  R 27%");
        assert_eq!(split_caption(&split(Some(15.0))), "L 0%  C 59%  R 41%");
        assert_eq!(split_caption(&split(Some(-40.0))), "L 70%  C 24%  R 6%");
    }

    #[test]
    fn test_summary_placeholder() {
        assert_eq!(summary_text(None), NO_SUMMARY);
        assert_eq!(summary_text(Some("   ")), NO_SUMMARY);
        assert_eq!(summary_text(Some("Rupee gains")), "Rupee gains");
        let long = "a".repeat(250);
        assert_eq!(summary_text(Some(&long)).chars().count(), SUMMARY_CHARS + 3);
    }
}
