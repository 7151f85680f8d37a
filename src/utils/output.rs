//! Rendering of song listings for the terminal

use clap::ValueEnum;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::models::SongEntry;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Table,
    Json,
}

const ID_WIDTH: usize = 10;
const TEXT_WIDTH: usize = 30;

/// Print a listing. JSON output is always an array, empty or not.
pub fn print_entries(entries: &[SongEntry], format: ListFormat, empty_message: &str) -> Result<()> {
    print!("{}", render_entries(entries, format, empty_message)?);
    Ok(())
}

pub fn render_entries(entries: &[SongEntry], format: ListFormat, empty_message: &str) -> Result<String> {
    let rendered = match format {
        ListFormat::Json => format!("{}\n", serde_json::to_string_pretty(entries)?),
        ListFormat::Table if entries.is_empty() => format!("{}\n", empty_message),
        ListFormat::Table => render_table(entries),
    };
    Ok(rendered)
}

pub fn render_table(entries: &[SongEntry]) -> String {
    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{}{}{}{}{}{}{}{}\n",
            left,
            "─".repeat(5),
            mid,
            "─".repeat(ID_WIDTH + 2),
            mid,
            "─".repeat(TEXT_WIDTH + 2),
            mid,
            "─".repeat(TEXT_WIDTH + 2),
            right
        )
    };

    let mut out = String::new();
    out.push_str(&rule("┌", "┬", "┐"));
    out.push_str(&format!(
        "│ #   │ {} │ {} │ {} │\n",
        fit_width("ID", ID_WIDTH),
        fit_width("Artist", TEXT_WIDTH),
        fit_width("Title", TEXT_WIDTH)
    ));
    out.push_str(&rule("├", "┼", "┤"));

    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "│ {:>3} │ {} │ {} │ {} │\n",
            i + 1,
            fit_width(&entry.id.to_string(), ID_WIDTH),
            fit_width(&entry.artist, TEXT_WIDTH),
            fit_width(&entry.title, TEXT_WIDTH)
        ));
    }

    out.push_str(&rule("└", "┴", "┘"));
    out
}

/// Pad or truncate `s` to exactly `max_len` terminal columns.
pub fn fit_width(s: &str, max_len: usize) -> String {
    let visual_width = s.width();
    if visual_width <= max_len {
        return format!("{}{}", s, " ".repeat(max_len - visual_width));
    }

    let ellipsis = UnicodeWidthChar::width('…').unwrap_or(1);
    let mut truncated = String::new();
    let mut current_width = 0;

    for ch in s.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width + ellipsis > max_len {
            break;
        }
        truncated.push(ch);
        current_width += ch_width;
    }

    truncated.push('…');
    current_width += ellipsis;
    format!("{}{}", truncated, " ".repeat(max_len.saturating_sub(current_width)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_width_pads_and_truncates() {
        assert_eq!(fit_width("abc", 5), "abc  ");
        assert_eq!(fit_width("abcdefgh", 5), "abcd…");
        // Wide characters take two columns each
        assert_eq!(fit_width("日本語テキスト", 6).width(), 6);
    }

    #[test]
    fn test_render_table_lists_every_entry() {
        let entries = vec![
            SongEntry { id: 1, title: "Song A".into(), artist: "Artist A".into() },
            SongEntry { id: 2, title: "Song B".into(), artist: "Artist B".into() },
        ];
        let table = render_table(&entries);

        assert!(table.contains("Song A"));
        assert!(table.contains("Artist B"));
        // header rule, header, separator, two rows, footer rule
        assert_eq!(table.lines().count(), 6);
    }

    #[test]
    fn test_empty_listing_per_format() {
        let json = render_entries(&[], ListFormat::Json, "Nothing here").unwrap();
        assert_eq!(json.trim(), "[]");

        let table = render_entries(&[], ListFormat::Table, "Nothing here").unwrap();
        assert_eq!(table, "Nothing here\n");
    }
}
