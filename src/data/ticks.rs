//! Axis tick placement and label formatting.

/// Minimum number of ticks on an axis (both ends of the window).
pub const MIN_TICKS: usize = 2;

/// Format elapsed seconds as `M:SS.mmm`.
///
/// Minutes are unpadded, seconds are two digits and milliseconds three.
/// The value is rounded to whole nanoseconds, then floored: minutes are
/// `floor(x / 60)` and the rest is taken modulo 60 seconds. Negative values
/// therefore carry the sign on the minutes only (`-6.25` is `-1:53.750`).
pub fn format_elapsed(secs: f64) -> String {
    if !secs.is_finite() {
        return "-:--.---".to_string();
    }

    const NANOS_PER_MILLI: i128 = 1_000_000;
    const MILLIS_PER_MINUTE: i128 = 60_000;

    let nanos = (secs * 1e9).round() as i128;
    let millis = nanos.div_euclid(NANOS_PER_MILLI);
    let minutes = millis.div_euclid(MILLIS_PER_MINUTE);
    let rest = millis.rem_euclid(MILLIS_PER_MINUTE);
    let seconds = rest / 1_000;
    let ms = rest % 1_000;

    format!("{minutes}:{seconds:02}.{ms:03}")
}

/// Format a latency axis value.
pub fn format_latency(value: f64) -> String {
    format!("{value:.1}")
}

/// Evenly spaced tick positions from `lo` to `hi`, both included.
pub fn tick_positions(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    let count = count.max(MIN_TICKS);
    let step = (hi - lo) / (count - 1) as f64;
    (0..count)
        .map(|i| if i == count - 1 { hi } else { lo + step * i as f64 })
        .collect()
}

/// Tick labels for the elapsed-time axis.
pub fn time_labels(lo: f64, hi: f64, count: usize) -> Vec<String> {
    tick_positions(lo, hi, count).into_iter().map(format_elapsed).collect()
}

/// Tick labels for the latency axis.
pub fn latency_labels(lo: f64, hi: f64, count: usize) -> Vec<String> {
    tick_positions(lo, hi, count).into_iter().map(format_latency).collect()
}
