//! Summary formatting: aggregate values to display strings. No I/O.

use crate::config::HOUR_THRESHOLD_SECS;

/// Share of `original` represented by `filtered`, e.g. `"42.3%"`.
/// `None` when `original` is zero.
pub fn percentage(filtered: usize, original: usize) -> Option<String> {
    (original > 0).then(|| format!("{:.1}%", filtered as f64 / original as f64 * 100.0))
}

/// `1234567` → `"1,234,567"`.
pub fn grouped_count(n: usize) -> String {
    group_digits(&n.to_string())
}

/// Fixed-point with thousands grouping in the integer part:
/// `12345.67` at one decimal → `"12,345.7"`.
pub fn grouped_decimal(x: f64, decimals: usize) -> String {
    let text = format!("{x:.decimals$}");
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    match unsigned.split_once('.') {
        Some((int, frac)) => format!("{sign}{}.{frac}", group_digits(int)),
        None => format!("{sign}{}", group_digits(unsigned)),
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Minutes below one hour, hours (grouped) from one hour up.
pub fn scaled_duration(secs: f64) -> String {
    scaled_duration_with(secs, HOUR_THRESHOLD_SECS)
}

/// [`scaled_duration`] with an explicit minutes/hours threshold, in seconds.
pub fn scaled_duration_with(secs: f64, hour_threshold_secs: f64) -> String {
    if secs < hour_threshold_secs {
        format!("{:.1} minutes", secs / 60.0)
    } else {
        format!("{} hours", grouped_decimal(secs / 3600.0, 1))
    }
}

/// Hour of day on a 12-hour clock: `17` → `"05:00 PM"`.
pub fn clock_hour(hour: u32) -> String {
    let suffix = if hour % 24 < 12 { "AM" } else { "PM" };
    let h = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{h:02}:00 {suffix}")
}
