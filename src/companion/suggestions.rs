// src/companion/suggestions.rs
use rand::seq::SliceRandom;
use rand::Rng;

pub const SUGGESTION_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionTopic {
    Stress,
    Study,
    Sleep,
    Loneliness,
    General,
}

#[derive(Debug)]
pub struct SuggestionCategory {
    pub topic: SuggestionTopic,
    pub triggers: &'static [&'static str],
    pub suggestions: &'static [&'static str],
}

/// Checked top to bottom; the first category with a trigger hit wins, so a
/// message mentioning both "stress" and "exam" always lands on Stress.
pub static SUGGESTION_CATEGORIES: &[SuggestionCategory] = &[
    SuggestionCategory {
        topic: SuggestionTopic::Stress,
        triggers: &["stress", "stressed", "overwhelmed"],
        suggestions: &[
            "Try the 4-7-8 breathing technique",
            "Take a 10-minute break from studying",
            "Listen to calming music",
            "Practice progressive muscle relaxation",
        ],
    },
    SuggestionCategory {
        topic: SuggestionTopic::Study,
        triggers: &["exam", "test", "study"],
        suggestions: &[
            "Break study sessions into 25-minute chunks",
            "Create a study schedule",
            "Find a study group",
            "Visit the academic support center",
        ],
    },
    SuggestionCategory {
        topic: SuggestionTopic::Sleep,
        triggers: &["sleep", "tired", "exhausted"],
        suggestions: &[
            "Establish a consistent bedtime routine",
            "Limit screen time before bed",
            "Try meditation before sleep",
            "Keep your room cool and dark",
        ],
    },
    SuggestionCategory {
        topic: SuggestionTopic::Loneliness,
        triggers: &["lonely", "alone", "isolated"],
        suggestions: &[
            "Join a campus club or organization",
            "Reach out to a friend or family member",
            "Attend campus social events",
            "Consider peer support groups",
        ],
    },
];

pub static GENERAL_CATEGORY: SuggestionCategory = SuggestionCategory {
    topic: SuggestionTopic::General,
    triggers: &[],
    suggestions: &[
        "Take a few deep breaths",
        "Go for a short walk outside",
        "Practice mindfulness for 5 minutes",
        "Write in a journal",
    ],
};

pub fn match_category(message: &str) -> &'static SuggestionCategory {
    let message_lower = message.to_lowercase();
    SUGGESTION_CATEGORIES
        .iter()
        .find(|category| category.triggers.iter().any(|t| message_lower.contains(t)))
        .unwrap_or(&GENERAL_CATEGORY)
}

/// Random sample of up to three suggestions from the matched category,
/// without replacement. Order carries no meaning.
pub fn pick_suggestions<R: Rng + ?Sized>(message: &str, rng: &mut R) -> Vec<String> {
    let category = match_category(message);
    let count = SUGGESTION_COUNT.min(category.suggestions.len());

    category
        .suggestions
        .choose_multiple(rng, count)
        .map(|s| s.to_string())
        .collect()
}
