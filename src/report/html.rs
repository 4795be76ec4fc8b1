use std::borrow::Cow;
use std::io::{self, Write};

use crate::analysis::{AnalysisResult, SizeShare};
use crate::diff::{ComparisonResult, SizeChange};
use crate::format::{format_percentage_change, format_size, format_size_change};

const STYLE: &str = "body { font-family: sans-serif; margin: 2em; }
table { border-collapse: collapse; margin-bottom: 2em; }
th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: right; }
td.path, th.path { text-align: left; }
.increase { color: #b00020; }
.decrease { color: #2e7d32; }
.summary { background: #f5f5f5; padding: 1em; margin-bottom: 2em; }";

/// Escape text for use in element content and attribute values.
fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn delta_class(delta: i64) -> &'static str {
    match delta {
        d if d > 0 => "increase",
        d if d < 0 => "decrease",
        _ => "",
    }
}

fn write_head<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{}</title>", escape(title))?;
    writeln!(out, "<style>\n{STYLE}\n</style>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>{}</h1>", escape(title))
}

fn write_tail<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

pub fn write_analysis<W: Write>(out: &mut W, analysis: &AnalysisResult, top: usize) -> io::Result<()> {
    write_head(out, "Archive Size Report")?;

    writeln!(out, "<div class=\"summary\">")?;
    writeln!(
        out,
        "<p>Archive: {}</p>",
        escape(&analysis.archive_path().display().to_string())
    )?;
    writeln!(out, "<p>Total size: {}</p>", format_size(analysis.total_size()))?;
    writeln!(
        out,
        "<p>Compressed: {}</p>",
        format_size(analysis.total_compressed_size())
    )?;
    writeln!(out, "<p>Files: {}</p>", analysis.file_count())?;
    writeln!(out, "</div>")?;

    writeln!(out, "<h2>Largest files</h2>")?;
    writeln!(out, "<table>")?;
    writeln!(
        out,
        "<tr><th class=\"path\">Path</th><th>Size</th><th>Compressed</th><th>Saved</th><th>Method</th></tr>"
    )?;
    for entry in analysis.entries().iter().take(top) {
        writeln!(
            out,
            "<tr><td class=\"path\">{}</td><td>{}</td><td>{}</td><td>{:.1}%</td><td>{}</td></tr>",
            escape(&entry.path),
            format_size(entry.size),
            format_size(entry.compressed_size),
            entry.compression_savings(),
            entry.compression_method
        )?;
    }
    writeln!(out, "</table>")?;
    if analysis.file_count() > top {
        writeln!(out, "<p>... {} more files</p>", analysis.file_count() - top)?;
    }

    write_shares(out, "Folders", &analysis.folder_summary())?;
    write_shares(out, "File types", &analysis.file_type_summary())?;
    write_tail(out)
}

fn write_shares<W: Write>(out: &mut W, title: &str, rows: &[SizeShare]) -> io::Result<()> {
    writeln!(out, "<h2>{title}</h2>")?;
    writeln!(out, "<table>")?;
    writeln!(out, "<tr><th class=\"path\">Name</th><th>Size</th><th>Share</th></tr>")?;
    for row in rows {
        writeln!(
            out,
            "<tr><td class=\"path\">{}</td><td>{}</td><td>{:.1}%</td></tr>",
            escape(&row.key),
            format_size(row.size),
            row.percentage
        )?;
    }
    writeln!(out, "</table>")
}

pub fn write_comparison<W: Write>(
    out: &mut W,
    comparison: &ComparisonResult,
    top: usize,
) -> io::Result<()> {
    let old = comparison.old_analysis();
    let new = comparison.new_analysis();
    write_head(out, "Archive Size Comparison")?;

    writeln!(out, "<div class=\"summary\">")?;
    writeln!(
        out,
        "<p>Old archive: {} ({})</p>",
        escape(&old.archive_path().display().to_string()),
        format_size(old.total_size())
    )?;
    writeln!(
        out,
        "<p>New archive: {} ({})</p>",
        escape(&new.archive_path().display().to_string()),
        format_size(new.total_size())
    )?;
    writeln!(
        out,
        "<p>Size change: <span class=\"{}\">{} ({})</span>, {}</p>",
        delta_class(comparison.size_difference()),
        format_size_change(comparison.size_difference()),
        format_percentage_change(comparison.percentage_change()),
        comparison.trend()
    )?;
    let (added, removed, modified) = comparison.change_counts();
    writeln!(
        out,
        "<p>Files: {added} added, {removed} removed, {modified} modified</p>"
    )?;
    writeln!(out, "</div>")?;

    writeln!(out, "<h2>File changes</h2>")?;
    writeln!(out, "<table>")?;
    writeln!(
        out,
        "<tr><th class=\"path\">Path</th><th>Change</th><th>Old</th><th>New</th><th>Difference</th></tr>"
    )?;
    let files = comparison.file_changes();
    for change in files.iter().take(top) {
        writeln!(
            out,
            "<tr><td class=\"path\">{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td></tr>",
            escape(&change.path),
            change.kind(),
            change.old_size().map(format_size).unwrap_or_else(|| "-".to_string()),
            change.new_size().map(format_size).unwrap_or_else(|| "-".to_string()),
            delta_class(change.size_difference),
            format_size_change(change.size_difference)
        )?;
    }
    writeln!(out, "</table>")?;
    if files.len() > top {
        writeln!(out, "<p>... {} more changes</p>", files.len() - top)?;
    }

    write_changes(out, "Folder changes", &comparison.sorted_folder_changes())?;
    write_changes(out, "File type changes", &comparison.sorted_type_changes())?;
    write_tail(out)
}

fn write_changes<W: Write>(out: &mut W, title: &str, rows: &[&SizeChange]) -> io::Result<()> {
    writeln!(out, "<h2>{title}</h2>")?;
    if rows.is_empty() {
        return writeln!(out, "<p>(none)</p>");
    }
    writeln!(out, "<table>")?;
    writeln!(
        out,
        "<tr><th class=\"path\">Name</th><th>Old</th><th>New</th><th>Difference</th><th>Change</th></tr>"
    )?;
    for row in rows {
        writeln!(
            out,
            "<tr><td class=\"path\">{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td></tr>",
            escape(&row.key),
            format_size(row.old_size),
            format_size(row.new_size),
            delta_class(row.size_difference),
            format_size_change(row.size_difference),
            format_percentage_change(row.percentage_change)
        )?;
    }
    writeln!(out, "</table>")
}
