use chrono::{DateTime, Utc};
use colored::Colorize;
use quire::api::{CmdMessage, ListedPage, MessageLevel};
use quire::config::{QuireConfig, KEYS};
use quire::document::Stats;
use quire::model::Page;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const ACTIVE_MARKER: &str = "▸";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_pages(pages: &[ListedPage]) {
    if pages.is_empty() {
        return;
    }

    for lp in pages {
        let marker = if lp.active {
            format!("  {} ", ACTIVE_MARKER)
        } else {
            "    ".to_string()
        };
        let idx_str = format!("{}. ", lp.index);
        let icon = format!("{} ", lp.page.icon);
        let time_ago = format_time_ago(lp.page.updated_at);

        let fixed_width = marker.width() + idx_str.width() + icon.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title = truncate_to_width(&lp.page.title, available);
        let padding = available.saturating_sub(title.width());

        let (idx_colored, title_colored) = if lp.active {
            (idx_str.yellow(), title.bold())
        } else {
            (idx_str.normal(), title.normal())
        };

        println!(
            "{}{}{}{}{}{}",
            marker,
            idx_colored,
            icon,
            title_colored,
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }
}

pub(super) fn print_page(page: &Page) {
    println!("{} {}", page.icon, page.title.bold());
    println!("--------------------------------");
    println!("{}", page.content);
}

pub(super) fn print_stats(stats: &Stats) {
    println!("{:<12}{}", "Pages", stats.page_count);
    println!("{:<12}{}", "Words", stats.total_words);
    println!("{:<12}{}", "Characters", stats.total_characters);
}

pub(super) fn print_config(config: &QuireConfig) {
    for key in KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key.bold(), value);
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
