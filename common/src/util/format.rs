//! Human-readable formatting helpers for the listing views.

const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Formats a byte count as a human-readable size, e.g. `"2.5 MB"`.
///
/// Missing, zero and negative counts all render as `"0 Bytes"`. Values are
/// scaled by powers of 1024 and shown with at most two decimals, trailing
/// zeros trimmed.
pub fn format_size(bytes: Option<i64>) -> String {
    let bytes = match bytes {
        Some(b) if b > 0 => b,
        _ => return "0 Bytes".to_string(),
    };

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{value:.2}");
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", rendered, UNITS[unit])
}
