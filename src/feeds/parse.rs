// Tolerant RSS 2.0 / Atom extraction.
//
// Feeds in the wild are rarely valid XML (stray ampersands, unclosed <br>,
// HTML pasted into descriptions), so entries are pulled out by pattern rather
// than by a strict parser. Only the handful of fields the store needs are read.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex_lite::Regex;

use super::FeedEntry;
use crate::output::{decode_entities, strip_html};

/// `<tag ...>body</tag>`, excluding self-closing `<tag ... />`.
fn element_regex(tag: &str) -> Regex {
    Regex::new(&format!(r"(?s)<{tag}(?:\s[^>]*[^/>])?\s*>(.*?)</{tag}\s*>")).expect("valid regex")
}

/// Opening or self-closing `<tag ...>`, capturing the attribute text.
fn open_tag_regex(tag: &str) -> Regex {
    Regex::new(&format!(r"<{tag}(\s[^>]*)?/?>")).expect("valid regex")
}

static ITEM: LazyLock<Regex> = LazyLock::new(|| element_regex("item"));
static ENTRY: LazyLock<Regex> = LazyLock::new(|| element_regex("entry"));

static TITLE: LazyLock<Regex> = LazyLock::new(|| element_regex("title"));
static LINK: LazyLock<Regex> = LazyLock::new(|| element_regex("link"));
static GUID: LazyLock<Regex> = LazyLock::new(|| element_regex("guid"));
static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| element_regex("description"));
static SUMMARY: LazyLock<Regex> = LazyLock::new(|| element_regex("summary"));
static CONTENT_ENCODED: LazyLock<Regex> = LazyLock::new(|| element_regex("content:encoded"));
static CONTENT: LazyLock<Regex> = LazyLock::new(|| element_regex("content"));
static PUB_DATE: LazyLock<Regex> = LazyLock::new(|| element_regex("pubDate"));
static DC_DATE: LazyLock<Regex> = LazyLock::new(|| element_regex("dc:date"));
static PUBLISHED: LazyLock<Regex> = LazyLock::new(|| element_regex("published"));
static UPDATED: LazyLock<Regex> = LazyLock::new(|| element_regex("updated"));

static LINK_TAG: LazyLock<Regex> = LazyLock::new(|| open_tag_regex("link"));
static MEDIA_CONTENT: LazyLock<Regex> = LazyLock::new(|| open_tag_regex("media:content"));
static MEDIA_THUMBNAIL: LazyLock<Regex> = LazyLock::new(|| open_tag_regex("media:thumbnail"));
static ENCLOSURE: LazyLock<Regex> = LazyLock::new(|| open_tag_regex("enclosure"));

static CDATA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("valid regex"));

static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("valid regex")
});

/// Extract every usable entry from an RSS or Atom document, in feed order.
///
/// Entries missing a title or a link are dropped. A document with no
/// recognisable entries yields an empty list rather than an error.
pub fn parse_feed(xml: &str) -> Vec<FeedEntry> {
    parse_feed_at(xml, Utc::now())
}

/// As [`parse_feed`], with `now` standing in for missing publish dates.
pub fn parse_feed_at(xml: &str, now: DateTime<Utc>) -> Vec<FeedEntry> {
    let blocks: Vec<&str> = if ITEM.is_match(xml) {
        ITEM.captures_iter(xml)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect()
    } else {
        ENTRY
            .captures_iter(xml)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect()
    };

    blocks
        .into_iter()
        .filter_map(|block| parse_block(block, now))
        .collect()
}

fn parse_block(block: &str, now: DateTime<Utc>) -> Option<FeedEntry> {
    let title = element_text(&TITLE, block)
        .map(|t| strip_html(&decode_entities(&t)))
        .filter(|t| !t.is_empty())?;

    let link = entry_link(block)?;

    let summary = [&DESCRIPTION, &SUMMARY, &CONTENT_ENCODED, &CONTENT]
        .into_iter()
        .find_map(|re| element_text(re, block).filter(|s| !s.trim().is_empty()))
        .map(|s| strip_html(&decode_entities(&s)))
        .unwrap_or_default();

    let published_at = [&PUB_DATE, &PUBLISHED, &DC_DATE, &UPDATED]
        .into_iter()
        .find_map(|re| element_text(re, block))
        .and_then(|raw| parse_date(&raw))
        .unwrap_or(now);

    Some(FeedEntry {
        title,
        link,
        summary,
        published_at,
        image_url: entry_image(block),
    })
}

/// Text content of the first matching element, CDATA unwrapped.
fn element_text(re: &Regex, block: &str) -> Option<String> {
    let raw = re.captures(block)?.get(1)?.as_str();
    Some(CDATA.replace_all(raw, "$1").trim().to_string())
}

/// RSS `<link>url</link>`, else Atom `<link href>` (alternate or unqualified),
/// else a permalink `<guid>`.
fn entry_link(block: &str) -> Option<String> {
    if let Some(link) = element_text(&LINK, block).filter(|l| !l.is_empty()) {
        return Some(decode_entities(&link));
    }

    let atom_link = LINK_TAG.captures_iter(block).find_map(|c| {
        let attrs = c.get(1)?.as_str();
        let rel = attr(attrs, "rel");
        if rel.as_deref().is_some_and(|r| r != "alternate") {
            return None;
        }
        attr(attrs, "href")
    });
    if let Some(href) = atom_link.filter(|h| !h.is_empty()) {
        return Some(href);
    }

    element_text(&GUID, block)
        .filter(|g| g.starts_with("http://") || g.starts_with("https://"))
        .map(|g| decode_entities(&g))
}

fn entry_image(block: &str) -> Option<String> {
    let media = [&MEDIA_CONTENT, &MEDIA_THUMBNAIL].into_iter().find_map(|re| {
        re.captures_iter(block)
            .find_map(|c| attr(c.get(1)?.as_str(), "url"))
    });
    if media.is_some() {
        return media;
    }

    ENCLOSURE.captures_iter(block).find_map(|c| {
        let attrs = c.get(1)?.as_str();
        let kind = attr(attrs, "type").unwrap_or_default();
        if kind.contains("image") {
            attr(attrs, "url").or_else(|| attr(attrs, "href"))
        } else {
            None
        }
    })
}

/// Value of attribute `name` in a tag's attribute text, entity-decoded.
fn attr(attrs: &str, name: &str) -> Option<String> {
    ATTR.captures_iter(attrs).find_map(|c| {
        if &c[1] != name {
            return None;
        }
        let value = c.get(2).or_else(|| c.get(3))?.as_str();
        Some(decode_entities(value.trim()))
    })
}

/// RFC 2822 (RSS) or RFC 3339 (Atom, Dublin Core) timestamps.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
