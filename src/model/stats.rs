use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Hand-entered channel metrics shown above the idea list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    #[serde(
        default,
        serialize_with = "serialize_number",
        deserialize_with = "deserialize_number"
    )]
    pub weekly_miles: f64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub total_videos: u64,
    /// Free text: may carry unit suffixes like `1.2k`
    #[serde(default = "zero_text", deserialize_with = "deserialize_text")]
    pub subscribers: String,
    #[serde(default = "zero_text", deserialize_with = "deserialize_text")]
    pub avg_views: String,
}

impl Default for ChannelStats {
    fn default() -> Self {
        ChannelStats {
            weekly_miles: 0.0,
            total_videos: 0,
            subscribers: zero_text(),
            avg_views: zero_text(),
        }
    }
}

fn zero_text() -> String {
    "0".to_string()
}

/// One editable field of [`ChannelStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    WeeklyMiles,
    TotalVideos,
    Subscribers,
    AvgViews,
}

impl StatField {
    pub const ALL: [StatField; 4] = [
        StatField::WeeklyMiles,
        StatField::TotalVideos,
        StatField::Subscribers,
        StatField::AvgViews,
    ];

    /// Command-line spelling (`weekly-miles`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            StatField::WeeklyMiles => "weekly-miles",
            StatField::TotalVideos => "total-videos",
            StatField::Subscribers => "subscribers",
            StatField::AvgViews => "avg-views",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatField::WeeklyMiles => "Weekly Miles",
            StatField::TotalVideos => "Total Videos",
            StatField::Subscribers => "Subscribers",
            StatField::AvgViews => "Avg Views",
        }
    }

    /// Numeric fields coerce their input; text fields keep it verbatim
    pub fn is_numeric(self) -> bool {
        matches!(self, StatField::WeeklyMiles | StatField::TotalVideos)
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

/// Integral values are written without a fractional part so `12` stays `12`
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Accepts numbers, numeric strings and null; anything unusable becomes zero
fn deserialize_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        serde_json::Value::String(s) => crate::ops::stats_ops::coerce_number(&s),
        _ => 0.0,
    })
}

fn deserialize_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(crate::ops::stats_ops::clamp_count))
            .unwrap_or(0),
        serde_json::Value::String(s) => crate::ops::stats_ops::coerce_count(&s),
        _ => 0,
    })
}

/// Accepts strings as-is and numbers in their JSON spelling; anything else
/// reads as `"0"`
fn deserialize_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => zero_text(),
    })
}
