/*!
 * Time conversions for the subtitle document.
 *
 * All document times use centiseconds, the granularity of both event
 * timestamps and `\k` karaoke markers.
 */

/// Visible durations at or below this are not worth an event
pub const NEGLIGIBLE_DURATION_SECS: f64 = 0.01;

/// Seconds to centiseconds, rounding half away from zero
pub fn to_centiseconds(seconds: f64) -> i64 {
    (seconds * 100.0).round() as i64
}

/// Rounded duration of a unit, never less than one centisecond so the
/// highlight always advances
pub fn unit_duration_cs(start: f64, end: f64) -> u32 {
    to_centiseconds(end - start).max(1) as u32
}

/// Split `duration_cs` into `count` segments that sum exactly to it.
///
/// The remainder of the integer division goes to the leftmost segments, one
/// centisecond each.
pub fn distribute(duration_cs: u32, count: usize) -> Vec<u32> {
    if count == 0 {
        return Vec::new();
    }
    let divisor = count as u32;
    let base = duration_cs / divisor;
    let remainder = (duration_cs % divisor) as usize;

    (0..count)
        .map(|idx| if idx < remainder { base + 1 } else { base })
        .collect()
}

/// Format seconds as an event timestamp (`H:MM:SS.CC`)
pub fn format_time(seconds: f64) -> String {
    let total_cs = to_centiseconds(seconds).max(0);
    let cs = total_cs % 100;
    let total_secs = total_cs / 100;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;

    format!("{}:{:02}:{:02}.{:02}", hours, mins, secs, cs)
}
