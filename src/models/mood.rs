use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: i32,
    /// 0.0 to 1.0
    pub score: f64,
    pub labels: Vec<String>,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcard_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct MoodEntryCreate {
    #[serde(default = "default_score")]
    pub score: f64,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, alias = "postcardUrl")]
    pub postcard_url: Option<String>,
}

fn default_score() -> f64 {
    0.5
}

#[derive(Debug, Serialize)]
pub struct MoodEntriesResponse {
    pub entries: Vec<MoodEntry>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct MoodEntriesQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u32 {
    10
}

#[derive(Debug, Serialize)]
pub struct MoodAnalytics {
    pub average_mood: f64,
    pub mood_trend: MoodTrend,
    pub most_common_emotions: Vec<String>,
    pub entries_count: u32,
    pub period_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodTrend {
    Improving,
    Stable,
    Declining,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    30
}
