// src/companion/mood.rs
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MATCHED_CONFIDENCE: f64 = 0.8;
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anxious,
    Stressed,
    Sad,
    Angry,
    Happy,
    Tired,
    Confused,
    Neutral,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anxious => "anxious",
            Emotion::Stressed => "stressed",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Happy => "happy",
            Emotion::Tired => "tired",
            Emotion::Confused => "confused",
            Emotion::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emotion trigger words, in priority order. The first emotion with a hit
/// becomes the primary one, regardless of where the word sits in the text.
pub static EMOTION_KEYWORDS: &[(Emotion, &[&str])] = &[
    (Emotion::Anxious, &["anxious", "worried", "nervous", "panic", "fear"]),
    (Emotion::Stressed, &["stressed", "overwhelmed", "pressure", "exam", "deadline"]),
    (Emotion::Sad, &["sad", "depressed", "down", "lonely", "empty"]),
    (Emotion::Angry, &["angry", "frustrated", "annoyed", "mad", "upset"]),
    (Emotion::Happy, &["happy", "good", "great", "excited", "joy"]),
    (Emotion::Tired, &["tired", "exhausted", "sleepy", "fatigue", "worn out"]),
    (Emotion::Confused, &["confused", "lost", "uncertain", "unclear", "don't know"]),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodInsight {
    pub detected_emotion: Emotion,
    pub confidence: f64,
    pub all_emotions: Vec<Emotion>,
}

/// Keyword mood analysis. Matching is plain substring containment on the
/// lowercased message, so "sadly" counts as "sad" and "madrigal" as "mad".
pub fn analyze_mood(message: &str) -> MoodInsight {
    let message_lower = message.to_lowercase();

    let all_emotions: Vec<Emotion> = EMOTION_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| message_lower.contains(k)))
        .map(|(emotion, _)| *emotion)
        .collect();

    match all_emotions.first() {
        Some(primary) => MoodInsight {
            detected_emotion: *primary,
            confidence: MATCHED_CONFIDENCE,
            all_emotions,
        },
        None => MoodInsight {
            detected_emotion: Emotion::Neutral,
            confidence: NEUTRAL_CONFIDENCE,
            all_emotions,
        },
    }
}
