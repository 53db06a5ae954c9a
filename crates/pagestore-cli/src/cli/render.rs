//! Text and JSON output for page listings and page details.

use chrono::{DateTime, Utc};
use pagestore::Page;
use serde::Serialize;
use std::path::Path;

pub const COL_SIZE: usize = 8;
pub const COL_TIME: usize = 16;

/// Page metadata as printed by `list --json` and `info --json`.
#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    pub name: &'a str,
    pub author: Option<&'a str>,
    pub attributes: &'a std::collections::BTreeMap<String, String>,
    pub size: Option<u64>,
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl<'a> PageView<'a> {
    pub fn new(page: &'a Page, file: Option<&Path>) -> Self {
        Self {
            name: &page.name,
            author: page.author.as_deref(),
            attributes: &page.attributes,
            size: page.size,
            last_modified: page.last_modified,
            file: file.map(|p| p.display().to_string()),
        }
    }
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn render_list(pages: &[Page]) -> String {
    let mut out = String::new();
    for page in pages {
        let size = page.size.map(|s| s.to_string()).unwrap_or_default();
        out.push_str(&format!(
            "{:>size_w$}  {:<time_w$}  {}",
            size,
            format_time(page.last_modified),
            page.name,
            size_w = COL_SIZE,
            time_w = COL_TIME,
        ));
        if let Some(author) = &page.author {
            out.push_str(&format!("  ({})", author));
        }
        out.push('\n');
    }
    out
}

pub fn render_list_json(pages: &[Page]) -> serde_json::Result<String> {
    let views: Vec<PageView> = pages.iter().map(|p| PageView::new(p, None)).collect();
    serde_json::to_string_pretty(&views)
}

pub fn render_info(page: &Page, file: &Path) -> String {
    let mut out = String::new();
    out.push_str(&format!("name:      {}\n", page.name));
    out.push_str(&format!("file:      {}\n", file.display()));
    out.push_str(&format!(
        "size:      {}\n",
        page.size.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())
    ));
    out.push_str(&format!("modified:  {}\n", format_time(page.last_modified)));
    out.push_str(&format!(
        "author:    {}\n",
        page.author.as_deref().unwrap_or("-")
    ));
    for (key, value) in &page.attributes {
        out.push_str(&format!("{}: {}\n", key, value));
    }
    out
}

pub fn render_info_json(page: &Page, file: &Path) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&PageView::new(page, Some(file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Page {
        let mut page = Page::new("Test/Foobar")
            .with_author("Alice")
            .with_attribute("@tag", "intro");
        page.size = Some(42);
        page.last_modified = Some(Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap());
        page
    }

    #[test]
    fn test_render_list_row() {
        let out = render_list(&[sample()]);
        assert_eq!(out, "      42  2024-01-15 14:30  Test/Foobar  (Alice)\n");
    }

    #[test]
    fn test_render_list_without_author() {
        let out = render_list(&[Page::new("Bare")]);
        assert!(out.ends_with("-                 Bare\n"));
    }

    #[test]
    fn test_render_info() {
        let out = render_info(&sample(), Path::new("/pages/Test%2FFoobar.txt"));
        assert!(out.contains("file:      /pages/Test%2FFoobar.txt\n"));
        assert!(out.contains("author:    Alice\n"));
        assert!(out.contains("@tag: intro\n"));
    }

    #[test]
    fn test_render_json() {
        let json = render_list_json(&[sample()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "Test/Foobar");
        assert_eq!(value[0]["attributes"]["@tag"], "intro");
        assert_eq!(value[0]["size"], 42);
        assert!(value[0].get("file").is_none());

        let json = render_info_json(&sample(), Path::new("x.txt")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["file"], "x.txt");
    }
}
