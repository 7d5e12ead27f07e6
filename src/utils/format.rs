//! Display helpers for the clock face and duration controls

/// Inclusive upper bound and rejected lower bound for a duration adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationRange {
    pub min: i64,
    pub max: i64,
}

impl Default for DurationRange {
    fn default() -> Self {
        Self { min: 0, max: 60 }
    }
}

/// Check whether a proposed duration is acceptable.
///
/// Values above `max` and the exact value `min` are rejected. With the
/// default range this leaves `1..=60` as the usable minutes.
pub fn in_range(number: i64, range: DurationRange) -> bool {
    !(number > range.max || number == range.min)
}

/// Format remaining seconds as `MM:SS`.
///
/// A full hour renders as `60:00` instead of wrapping to `00:00`.
pub fn format_time(total_seconds: u64) -> String {
    if total_seconds == 3600 {
        return "60:00".to_string();
    }

    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Whole minutes left, rounded up
pub fn minutes_left(total_seconds: u64) -> u64 {
    total_seconds.div_ceil(60)
}
