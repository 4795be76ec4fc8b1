//! Size and percentage helpers shared by the analysis, diff and report code.

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Format a byte size into a human-readable string.
///
/// # Examples
///
/// ```
/// use apksize::format::format_size;
///
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(1536), "1.50 KB");
/// assert_eq!(format_size(1048576), "1.00 MB");
/// ```
pub fn format_size(size: u64) -> String {
    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} B", size)
    }
}

/// Format a signed size delta, always carrying its sign unless zero.
pub fn format_size_change(delta: i64) -> String {
    match delta {
        0 => "0 B".to_string(),
        d if d > 0 => format!("+{}", format_size(d.unsigned_abs())),
        d => format!("-{}", format_size(d.unsigned_abs())),
    }
}

/// Format a percentage change with an explicit sign and two decimals.
pub fn format_percentage_change(pct: f64) -> String {
    if pct > 0.0 {
        format!("+{:.2}%", pct)
    } else {
        format!("{:.2}%", pct)
    }
}

/// Relative change from `old` to `new`, in percent.
///
/// A zero baseline yields 0.0 when `new` is also zero and 100.0 otherwise.
pub fn percentage_change(old: u64, new: u64) -> f64 {
    if old == 0 {
        return if new == 0 { 0.0 } else { 100.0 };
    }
    (new as f64 - old as f64) / old as f64 * 100.0
}

/// Share of `part` in `total`, in percent; 0.0 when `total` is zero.
pub fn percentage_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// Signed difference `new - old`, saturating at the `i64` range.
pub fn size_delta(old: u64, new: u64) -> i64 {
    let delta = new as i128 - old as i128;
    delta.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}
