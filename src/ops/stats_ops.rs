use crate::model::stats::{ChannelStats, StatField};

/// Parse a numeric stats entry. Empty, unparseable and non-finite input is zero.
pub fn coerce_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse a count entry. Fractions truncate; negatives and garbage are zero.
pub fn coerce_count(raw: &str) -> u64 {
    let trimmed = raw.trim();
    match trimmed.parse::<u64>() {
        Ok(n) => n,
        Err(_) => clamp_count(coerce_number(trimmed)),
    }
}

pub(crate) fn clamp_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.trunc() as u64
    } else {
        0
    }
}

/// Overwrite one stats field from raw user text
pub fn set_field(stats: &mut ChannelStats, field: StatField, raw: &str) {
    match field {
        StatField::WeeklyMiles => stats.weekly_miles = coerce_number(raw),
        StatField::TotalVideos => stats.total_videos = coerce_count(raw),
        StatField::Subscribers => stats.subscribers = raw.to_string(),
        StatField::AvgViews => stats.avg_views = raw.to_string(),
    }
}

/// Current value of a field as editable text
pub fn field_display(stats: &ChannelStats, field: StatField) -> String {
    match field {
        StatField::WeeklyMiles => format_number(stats.weekly_miles),
        StatField::TotalVideos => stats.total_videos.to_string(),
        StatField::Subscribers => stats.subscribers.clone(),
        StatField::AvgViews => stats.avg_views.clone(),
    }
}

/// `12.0` prints as `12`, `26.2` as `26.2`
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
