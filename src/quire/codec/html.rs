//! Static HTML export.
//!
//! One `<section>` per page. Page content is embedded verbatim; titles and
//! icons are escaped. Timestamps use a fixed US-English layout in UTC so the
//! output does not depend on the host locale.

use crate::model::{DocumentCollection, Page, Theme};
use chrono::{DateTime, Utc};
use std::fmt::Write;

const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p UTC";

const STYLESHEET: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; max-width: 860px; margin: 0 auto; padding: 40px 24px; line-height: 1.6; color: #37352f; background: #ffffff; }
body.theme-dark { color: #e6e6e6; background: #191919; }
.page { padding: 32px 0; border-bottom: 1px solid rgba(128, 128, 128, 0.25); }
.page:last-child { border-bottom: none; }
.page-header { display: flex; align-items: center; gap: 12px; }
.page-icon { font-size: 2.2em; }
.page-title { font-size: 2.2em; font-weight: 700; margin: 0; }
.page-meta { font-size: 0.85em; opacity: 0.6; margin: 8px 0 24px; }
.page-content h1 { font-size: 1.9em; margin: 1.2em 0 0.4em; }
.page-content h2 { font-size: 1.5em; margin: 1.1em 0 0.4em; }
.page-content h3 { font-size: 1.25em; margin: 1em 0 0.3em; }
.page-content p { margin: 0.4em 0; }
.page-content blockquote { border-left: 3px solid currentColor; padding-left: 14px; margin: 0.6em 0; opacity: 0.85; }
.page-content pre, .page-content code { font-family: "SFMono-Regular", Menlo, Consolas, monospace; background: rgba(135, 131, 120, 0.15); border-radius: 4px; }
.page-content pre { padding: 12px 16px; overflow-x: auto; }
.page-content hr { border: none; border-top: 1px solid rgba(128, 128, 128, 0.35); margin: 1.2em 0; }
.page-content .todo-list { list-style: none; padding-left: 4px; }
.page-content .todo-list li::before { content: "\2610"; margin-right: 8px; }
.page-content .todo-list li[data-checked="true"]::before { content: "\2611"; }
.page-content .todo-list li[data-checked="true"] { text-decoration: line-through; opacity: 0.6; }
"#;

pub fn export_html(doc: &DocumentCollection) -> String {
    let body_class = match doc.theme {
        Theme::Light => "theme-light",
        Theme::Dark => "theme-dark",
    };

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str("<title>Quire Export</title>\n<style>");
    out.push_str(STYLESHEET);
    out.push_str("</style>\n</head>\n");
    let _ = writeln!(out, "<body class=\"{}\">", body_class);
    for page in &doc.pages {
        render_page(&mut out, page);
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn render_page(out: &mut String, page: &Page) {
    let _ = writeln!(out, "<section class=\"page\" id=\"page-{}\">", escape(&page.id));
    let _ = writeln!(
        out,
        "<div class=\"page-header\"><span class=\"page-icon\">{}</span><h1 class=\"page-title\">{}</h1></div>",
        escape(&page.icon),
        escape(&page.title)
    );
    let _ = writeln!(
        out,
        "<div class=\"page-meta\">Created {} &middot; Updated {}</div>",
        format_timestamp(page.created_at),
        format_timestamp(page.updated_at)
    );
    let _ = writeln!(out, "<div class=\"page-content\">{}</div>", page.content);
    out.push_str("</section>\n");
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn renders_one_section_per_page() {
        let mut doc = DocumentCollection::seeded();
        doc.pages
            .push(Page::new("Second", "", "<p>two</p>".into()));
        let html = export_html(&doc);
        assert_eq!(html.matches("<section class=\"page\"").count(), 2);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("class=\"theme-light\""));
    }

    #[test]
    fn content_is_verbatim_and_title_is_escaped() {
        let mut doc = DocumentCollection::seeded();
        doc.pages[0].title = "Tom & <Jerry>".into();
        doc.pages[0].content = "<h2>Raw</h2><ul class=\"todo-list\"></ul>".into();
        let html = export_html(&doc);
        assert!(html.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(html.contains("<h2>Raw</h2><ul class=\"todo-list\"></ul>"));
    }

    #[test]
    fn timestamps_use_fixed_layout() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(format_timestamp(ts), "3/5/2024, 2:07:09 PM UTC");
    }

    #[test]
    fn dark_theme_sets_body_class() {
        let mut doc = DocumentCollection::seeded();
        doc.theme = Theme::Dark;
        assert!(export_html(&doc).contains("class=\"theme-dark\""));
    }
}
