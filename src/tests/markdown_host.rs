use super::{rows, MarkdownHost};
use crate::config::Config;
use crate::formats::markdown::MarkdownFormat;
use crate::host::DocumentHost;
use crate::input::parse_outline;
use crate::page::{Page, PageEvent};
use crate::persistence::{CookieJar, MemoryStore, SessionStore};
use crate::section::NodeKind;
use std::time::{Duration, Instant};

const DOC: &str = "\
# Guide

## Install

Download the archive and unpack it somewhere on the PATH.

### From source

cargo build

## Examples

## API

One.
Two.
";

fn host(width: u32) -> MarkdownHost {
    let outline = parse_outline("guide.md", DOC.to_string(), &MarkdownFormat).unwrap();
    MarkdownHost::new(outline, width)
}

#[test]
fn test_rows_wrap_long_lines_and_skip_outer_blank_lines() {
    assert_eq!(rows("\n\nabcdef\n\n", 4), 2);
    assert_eq!(rows("ab\n\ncd", 4), 3);
    assert_eq!(rows("   \n", 4), 0);
    assert_eq!(rows("", 4), 0);
}

#[test]
fn test_headers_report_content_presence() {
    let host = host(80);
    let headers = host.headers();

    let labels: Vec<(&str, bool)> = headers
        .iter()
        .map(|h| (h.label.as_str(), h.has_body))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("Guide", false),
            ("Install", true),
            ("From source", true),
            ("Examples", false),
            ("API", true),
        ]
    );
    assert_eq!(host.body_extent(4), 2);
    assert_eq!(host.header_extent(0), 1);
}

#[test]
fn test_resize_reflows_bodies() {
    let mut host = host(80);
    assert_eq!(host.body_extent(1), 1);

    host.resize(20);

    assert_eq!(host.width(), 20);
    assert_eq!(host.body_extent(1), 3);
}

#[test]
fn test_page_over_markdown_document() {
    let now = Instant::now();
    let mut store = MemoryStore::new();
    store.set("API", "none");

    let mut page = Page::open(host(80), store, CookieJar::default(), &Config::default());
    let styles = page.host().styles();
    assert_eq!(styles.max_extent(NodeKind::Section, 4), Some(0));
    assert_eq!(styles.class(NodeKind::Section, 4), Some("collapsed"));
    assert_eq!(styles.sections[&4].label, "API");
    assert_eq!(styles.max_extent(NodeKind::Section, 1), Some(3));
    assert!(styles.max_extent(NodeKind::Section, 3).is_none());
    assert_eq!(styles.max_extent(NodeKind::Menu, 0), Some(0));

    assert!(page.dispatch(PageEvent::Activate(2), now));
    assert_eq!(page.host().styles().max_extent(NodeKind::Section, 1), Some(2));
    assert_eq!(page.store().get("From source").as_deref(), Some("none"));

    page.dispatch(PageEvent::Activate(2), now);
    page.dispatch(PageEvent::Resize(20), now);
    assert!(page.poll(now + Duration::from_millis(200)));
    assert_eq!(page.host().styles().max_extent(NodeKind::Section, 1), Some(5));
    assert!(page.host().styles().transitions);
}

#[test]
fn test_repeated_headings_keep_separate_styles() {
    let now = Instant::now();
    let doc = "## Notes\n\nfirst\n\n## Notes\n\nsecond\nthird\n";
    let outline = parse_outline("notes.md", doc.to_string(), &MarkdownFormat).unwrap();
    let host = MarkdownHost::new(outline, 80);
    let mut page = Page::open(host, MemoryStore::new(), CookieJar::default(), &Config::default());

    assert!(page.dispatch(PageEvent::Activate(1), now));

    let styles = page.host().styles();
    assert_eq!(styles.max_extent(NodeKind::Section, 0), Some(1));
    assert_eq!(styles.class(NodeKind::Section, 0), Some("expanded"));
    assert_eq!(styles.max_extent(NodeKind::Section, 1), Some(0));
    assert_eq!(styles.class(NodeKind::Section, 1), Some("collapsed"));
}

#[test]
fn test_quoted_heading_counts_toward_enclosing_section() {
    let doc = "## API\n\n> # Quoted\n> text\n\nMore prose\n\n## Next\n\nEnd.\n";
    let outline = parse_outline("api.md", doc.to_string(), &MarkdownFormat).unwrap();
    let host = MarkdownHost::new(outline, 80);

    assert!(host.headers()[0].has_body);
    assert!(!host.headers()[1].in_section);
    assert_eq!(host.body_extent(0), 4);

    let page = Page::open(host, MemoryStore::new(), CookieJar::default(), &Config::default());
    assert_eq!(page.host().styles().max_extent(NodeKind::Section, 0), Some(4));
    assert_eq!(page.content_extent(), 1 + 4 + 1 + 1);
}
