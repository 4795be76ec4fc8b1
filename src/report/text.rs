use std::io::{self, Write};

use crate::analysis::{AnalysisResult, SizeShare};
use crate::diff::{ComparisonResult, SizeChange};
use crate::format::{format_percentage_change, format_size, format_size_change};

const RULE_WIDTH: usize = 78;

pub fn write_analysis<W: Write>(out: &mut W, analysis: &AnalysisResult, top: usize) -> io::Result<()> {
    writeln!(out, "Archive:     {}", analysis.archive_path().display())?;
    writeln!(out, "Total size:  {}", format_size(analysis.total_size()))?;
    writeln!(
        out,
        "Compressed:  {}",
        format_size(analysis.total_compressed_size())
    )?;
    writeln!(out, "Files:       {}", analysis.file_count())?;

    writeln!(out)?;
    writeln!(out, "Largest files")?;
    writeln!(
        out,
        "{:>12}  {:>12}  {:>6}  {:<10}  Path",
        "Size", "Compressed", "Saved", "Method"
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for entry in analysis.entries().iter().take(top) {
        writeln!(
            out,
            "{:>12}  {:>12}  {:>5.1}%  {:<10}  {}",
            format_size(entry.size),
            format_size(entry.compressed_size),
            entry.compression_savings(),
            entry.compression_method,
            entry.path
        )?;
    }
    if analysis.file_count() > top {
        writeln!(out, "... {} more files", analysis.file_count() - top)?;
    }

    write_shares(out, "Folders", &analysis.folder_summary())?;
    write_shares(out, "File types", &analysis.file_type_summary())?;
    Ok(())
}

fn write_shares<W: Write>(out: &mut W, title: &str, rows: &[SizeShare]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{:>12}  {:>7}  Name", "Size", "Share")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for row in rows {
        writeln!(
            out,
            "{:>12}  {:>6.1}%  {}",
            format_size(row.size),
            row.percentage,
            row.key
        )?;
    }
    Ok(())
}

pub fn write_comparison<W: Write>(
    out: &mut W,
    comparison: &ComparisonResult,
    top: usize,
) -> io::Result<()> {
    let old = comparison.old_analysis();
    let new = comparison.new_analysis();

    writeln!(
        out,
        "Old archive: {} ({})",
        old.archive_path().display(),
        format_size(old.total_size())
    )?;
    writeln!(
        out,
        "New archive: {} ({})",
        new.archive_path().display(),
        format_size(new.total_size())
    )?;
    writeln!(
        out,
        "Size change: {} ({}), {}",
        format_size_change(comparison.size_difference()),
        format_percentage_change(comparison.percentage_change()),
        comparison.trend()
    )?;

    let (added, removed, modified) = comparison.change_counts();
    writeln!(
        out,
        "Files:       {added} added, {removed} removed, {modified} modified"
    )?;

    writeln!(out)?;
    writeln!(out, "File changes")?;
    writeln!(
        out,
        "{:<8}  {:>12}  {:>12}  {:>13}  Path",
        "Change", "Old", "New", "Difference"
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    let files = comparison.file_changes();
    for change in files.iter().take(top) {
        writeln!(
            out,
            "{:<8}  {:>12}  {:>12}  {:>13}  {}",
            change.kind(),
            change.old_size().map(format_size).unwrap_or_else(|| "-".to_string()),
            change.new_size().map(format_size).unwrap_or_else(|| "-".to_string()),
            format_size_change(change.size_difference),
            change.path
        )?;
    }
    if files.len() > top {
        writeln!(out, "... {} more changes", files.len() - top)?;
    }

    write_changes(out, "Folder changes", &comparison.sorted_folder_changes())?;
    write_changes(out, "File type changes", &comparison.sorted_type_changes())?;
    Ok(())
}

fn write_changes<W: Write>(out: &mut W, title: &str, rows: &[&SizeChange]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    if rows.is_empty() {
        writeln!(out, "  (none)")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:>12}  {:>12}  {:>13}  {:>9}  Name",
        "Old", "New", "Difference", "Change"
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for row in rows {
        writeln!(
            out,
            "{:>12}  {:>12}  {:>13}  {:>9}  {}",
            format_size(row.old_size),
            format_size(row.new_size),
            format_size_change(row.size_difference),
            format_percentage_change(row.percentage_change),
            row.key
        )?;
    }
    Ok(())
}
