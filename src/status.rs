// System status display: shows DB stats, feed coverage and last fetch time.

use anyhow::Result;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;

use crate::db::Database;
use crate::output::time::time_ago_str;
use crate::pipeline::ingest::LAST_FETCH_KEY;

/// Display system status to the terminal.
pub async fn show(db: &Arc<dyn Database>, db_display_path: &str) -> Result<()> {
    if !Path::new(db_display_path).exists() {
        println!("Database: not initialized");
        println!("\nRun `ground init` to set up the database.");
        return Ok(());
    }

    let file_size = std::fs::metadata(db_display_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_display_path, file_size);

    let stats = db.stats().await?;
    let now = Utc::now();

    println!(
        "Sources: {} total, {} with active feeds",
        stats.sources, stats.feed_sources
    );
    if stats.sources == 0 {
        println!("  Run `ground seed` to add the default outlets");
    }

    println!("Users: {}", stats.users);

    println!("Articles: {}", stats.articles);
    if let Some(newest) = &stats.newest_article_at {
        println!("  Newest: {}", time_ago_str(newest, now));
    }
    for (category, count) in &stats.categories {
        println!("  {:<14} {}", category, count);
    }

    match db.get_state(LAST_FETCH_KEY).await? {
        Some(last) => println!("Last fetch: {}", time_ago_str(&last, now)),
        None => {
            println!("Last fetch: never");
            println!("  Run `ground fetch` to pull the feeds");
        }
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
