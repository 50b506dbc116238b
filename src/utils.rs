use std::time::Duration;

/// Format elapsed time as `MM:SS:d`, where `d` is tenths of a second
pub fn format_time(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    let minutes = total_ms / 60_000;
    let seconds = (total_ms / 1000) % 60;
    let tenths = (total_ms % 1000) / 100;
    format!("{:02}:{:02}:{}", minutes, seconds, tenths)
}

/// Format a percentage with one decimal, e.g. `62.5%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Left edge that centers something `inner` wide inside `outer` starting at `start`
pub fn centered(start: f32, outer: f32, inner: f32) -> f32 {
    start + (outer - inner) / 2.0
}
