// src/handlers/mood.rs
use crate::models::fixed_time;
use crate::models::mood::*;
use axum::{
    extract::Query,
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;

pub fn mood_routes() -> Router {
    Router::new()
        .route("/mood/entries", get(get_mood_entries).post(create_mood_entry))
        .route("/mood/analytics", get(get_mood_analytics))
}

async fn get_mood_entries(Query(params): Query<MoodEntriesQuery>) -> Json<MoodEntriesResponse> {
    tracing::debug!(limit = params.limit, offset = params.offset, "listing mood entries");

    let entries = vec![MoodEntry {
        id: 1,
        score: 0.75,
        labels: vec!["content".to_string(), "peaceful".to_string()],
        notes: "Had a good day at university".to_string(),
        postcard_url: None,
        // 2024-01-01T12:00:00Z
        created_at: fixed_time(1_704_110_400),
    }];

    Json(MoodEntriesResponse {
        total: entries.len(),
        entries,
    })
}

async fn create_mood_entry(Json(payload): Json<MoodEntryCreate>) -> Json<MoodEntry> {
    Json(MoodEntry {
        id: 2,
        score: payload.score,
        labels: payload.labels,
        notes: payload.notes.unwrap_or_default(),
        postcard_url: payload.postcard_url,
        created_at: Utc::now(),
    })
}

async fn get_mood_analytics(Query(params): Query<AnalyticsQuery>) -> Json<MoodAnalytics> {
    Json(MoodAnalytics {
        average_mood: 0.7,
        mood_trend: MoodTrend::Improving,
        most_common_emotions: vec![
            "content".to_string(),
            "hopeful".to_string(),
            "peaceful".to_string(),
        ],
        entries_count: 15,
        period_days: params.days,
    })
}
