/// Converts a span in seconds to whole centiseconds, truncating toward zero.
pub fn centiseconds(seconds: f64) -> i64 {
    (seconds * 100.0) as i64
}

/// Displayed start of a phrase after applying the global shift, clamped at zero.
/// The end of a phrase is never shifted.
pub fn shifted_start(start: f64, shift_time: f64) -> f64 {
    (start + shift_time).max(0.0)
}

/// Lead-in highlight length that offsets the renderer's sweep by the shift.
pub fn lead_in_centiseconds(shift_time: f64) -> i64 {
    (-shift_time * 100.0).floor() as i64
}

/// Formats seconds as an ASS timestamp `H:MM:SS.cc`.
///
/// Hours are unpadded; minutes and seconds are two digits; centiseconds are
/// truncated, not rounded.
pub fn format_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let hours = (seconds / 3600.0) as u64;
    let minutes = ((seconds % 3600.0) / 60.0) as u64;
    let remaining = seconds % 60.0;
    let whole_seconds = remaining as u64;
    let centis = ((remaining - remaining.trunc()) * 100.0) as u64;

    format!("{hours}:{minutes:02}:{whole_seconds:02}.{centis:02}")
}
