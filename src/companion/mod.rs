// src/companion/mod.rs
//! The chat companion: one user message in, one supportive reply out, with
//! a keyword mood estimate and a few coping suggestions attached.

pub mod generator;
pub mod mood;
pub mod suggestions;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;

use generator::{GenerationError, TextGenerator};
use mood::{analyze_mood, MoodInsight};
use suggestions::pick_suggestions;

pub const COMPANION_AVATARS: &[&str] = &[
    "ai-companion-1.png",
    "ai-companion-2.png",
    "ai-companion-3.png",
];

pub const SYSTEM_PROMPT: &str = "You are a gentle and empathetic wellness companion for university students, more like a caring friend than a robot.

Your role is to:
1. Listen with warmth, patience, and genuine empathy to whatever the student shares.
2. Respond with comforting words that provide emotional support and reassurance.
3. Offer thoughtful, practical suggestions that can help with stress, sleep, study-life balance, and emotional wellbeing.
4. Recognize when the situation might require professional support, and gently encourage seeking help.
5. Always keep the conversation natural, encouraging, and relatable, never cold or mechanical.
6. Respect each student's background and individuality, being culturally sensitive and inclusive.

Guidelines:
- Keep responses warm, concise, and meaningful (2-4 sentences usually).
- Prioritize emotional connection over formality. Speak like a trusted confidant.
- Never give medical advice or diagnoses.
- When offering tips, make them specific, gentle, and actionable.
- Remember: you are here to bring comfort, encouragement, and perspective, not to replace professional care.";

pub const FALLBACK_REPLY: &str =
    "I'm here to listen and support you. Could you tell me a bit more about what you're going through?";

pub const FALLBACK_SUGGESTIONS: &[&str] = &[
    "Take a few deep breaths",
    "Try a short walk outside",
    "Consider talking to a counselor",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ChatExchange {
    pub user_message: String,
    pub reply: String,
    pub suggestions: Vec<String>,
    pub mood_insights: Option<MoodInsight>,
    pub companion_avatar: &'static str,
}

#[derive(Debug, Clone)]
pub struct ComposerSettings {
    pub generation_timeout: Duration,
    /// Upper bound on how much of a message is forwarded to the generator.
    pub max_message_chars: usize,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            generation_timeout: Duration::from_secs(20),
            max_message_chars: 2000,
        }
    }
}

#[derive(Clone)]
pub struct Composer {
    generator: Option<Arc<dyn TextGenerator>>,
    settings: ComposerSettings,
}

impl Composer {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, settings: ComposerSettings) -> Self {
        Self { generator, settings }
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.generator.as_ref().map(|g| g.name())
    }

    /// Standalone avatar pick, drawn the same way a composed reply draws one.
    pub fn pick_avatar(&self) -> &'static str {
        pick_avatar(&mut StdRng::from_entropy())
    }

    /// Never fails: any generation problem yields the fallback exchange.
    pub async fn compose(&self, message: &str, context: Option<&str>) -> ChatExchange {
        let mut rng = StdRng::from_entropy();
        self.compose_with_rng(message, context, &mut rng).await
    }

    pub async fn compose_with_rng<R>(&self, message: &str, context: Option<&str>, rng: &mut R) -> ChatExchange
    where
        R: Rng + Send + ?Sized,
    {
        match self.try_compose(message, context, rng).await {
            Ok(exchange) => {
                tracing::debug!(
                    emotion = ?exchange.mood_insights.as_ref().map(|m| m.detected_emotion),
                    avatar = exchange.companion_avatar,
                    "composed companion reply"
                );
                exchange
            }
            Err(e) => {
                tracing::warn!(error = %e, "reply generation unavailable, using fallback");
                fallback_exchange(message, rng)
            }
        }
    }

    pub async fn try_compose<R>(
        &self,
        message: &str,
        context: Option<&str>,
        rng: &mut R,
    ) -> Result<ChatExchange, GenerationError>
    where
        R: Rng + Send + ?Sized,
    {
        let user_turn = build_user_turn(self.bounded(message), context);
        let reply = self.generate(&user_turn).await?;

        let mood_insights = analyze_mood(message);
        let suggestions = pick_suggestions(message, rng);
        let companion_avatar = pick_avatar(rng);

        Ok(ChatExchange {
            user_message: message.to_string(),
            reply,
            suggestions,
            mood_insights: Some(mood_insights),
            companion_avatar,
        })
    }

    async fn generate(&self, user_turn: &str) -> Result<String, GenerationError> {
        let generator = self.generator.as_ref().ok_or(GenerationError::NotConfigured)?;
        let timeout = self.settings.generation_timeout;

        tokio::time::timeout(timeout, generator.generate(SYSTEM_PROMPT, user_turn))
            .await
            .map_err(|_| GenerationError::Timeout(timeout))?
    }

    fn bounded<'a>(&self, message: &'a str) -> &'a str {
        match message.char_indices().nth(self.settings.max_message_chars) {
            Some((end, _)) => &message[..end],
            None => message,
        }
    }
}

pub fn build_user_turn(message: &str, context: Option<&str>) -> String {
    match context.filter(|c| !c.is_empty()) {
        Some(context) => format!("Context: {}\n\nUser message: {}", context, message),
        None => message.to_string(),
    }
}

pub fn pick_avatar<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    COMPANION_AVATARS[rng.gen_range(0..COMPANION_AVATARS.len())]
}

pub fn fallback_exchange<R: Rng + ?Sized>(message: &str, rng: &mut R) -> ChatExchange {
    ChatExchange {
        user_message: message.to_string(),
        reply: FALLBACK_REPLY.to_string(),
        suggestions: FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        mood_insights: None,
        companion_avatar: pick_avatar(rng),
    }
}

#[cfg(test)]
mod tests {
    use super::mood::Emotion;
    use super::suggestions::SUGGESTION_CATEGORIES;
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for StaticGenerator {
        async fn generate(&self, _system_prompt: &str, _user_turn: &str) -> Result<String, GenerationError> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "static"
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _system_prompt: &str, _user_turn: &str) -> Result<String, GenerationError> {
            Err(GenerationError::Provider {
                status: 503,
                body: "overloaded".to_string(),
            })
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        async fn generate(&self, _system_prompt: &str, _user_turn: &str) -> Result<String, GenerationError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".to_string())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    #[derive(Default)]
    struct RecordingGenerator {
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, system_prompt: &str, user_turn: &str) -> Result<String, GenerationError> {
            self.calls
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), user_turn.to_string()));
            Ok("noted".to_string())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn composer_with(generator: Arc<dyn TextGenerator>) -> Composer {
        Composer::new(Some(generator), ComposerSettings::default())
    }

    fn assert_fallback(exchange: &ChatExchange) {
        assert_eq!(exchange.reply, FALLBACK_REPLY);
        assert_eq!(exchange.suggestions, FALLBACK_SUGGESTIONS);
        assert!(exchange.mood_insights.is_none());
        assert!(COMPANION_AVATARS.contains(&exchange.companion_avatar));
    }

    #[tokio::test]
    async fn test_compose_stressed_about_exams() {
        let composer = composer_with(Arc::new(StaticGenerator("You've got this.")));
        let exchange = composer
            .compose("I'm feeling stressed about my exams", None)
            .await;

        assert_eq!(exchange.reply, "You've got this.");
        let mood = exchange.mood_insights.expect("mood insights present");
        assert_eq!(mood.detected_emotion, Emotion::Stressed);
        assert_eq!(mood.confidence, 0.8);

        let stress_list = SUGGESTION_CATEGORIES[0].suggestions;
        assert_eq!(exchange.suggestions.len(), 3);
        assert!(exchange
            .suggestions
            .iter()
            .all(|s| stress_list.contains(&s.as_str())));
        assert!(COMPANION_AVATARS.contains(&exchange.companion_avatar));
    }

    #[tokio::test]
    async fn test_compose_neutral_message() {
        let composer = composer_with(Arc::new(StaticGenerator("I'm glad to hear that.")));
        let exchange = composer.compose("nothing is wrong", None).await;

        let mood = exchange.mood_insights.unwrap();
        assert_eq!(mood.detected_emotion, Emotion::Neutral);
        assert_eq!(mood.confidence, 0.5);
        assert!(exchange
            .suggestions
            .iter()
            .all(|s| suggestions::GENERAL_CATEGORY.suggestions.contains(&s.as_str())));
    }

    #[tokio::test]
    async fn test_provider_error_falls_back() {
        let composer = composer_with(Arc::new(FailingGenerator));
        let exchange = composer.compose("I feel lonely", None).await;
        assert_fallback(&exchange);
    }

    #[tokio::test]
    async fn test_missing_provider_falls_back() {
        let composer = Composer::new(None, ComposerSettings::default());
        let exchange = composer.compose("hello", Some("first chat")).await;
        assert_fallback(&exchange);
        assert!(composer.provider_name().is_none());
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let settings = ComposerSettings {
            generation_timeout: Duration::from_millis(50),
            ..ComposerSettings::default()
        };
        let composer = Composer::new(Some(Arc::new(SlowGenerator)), settings);

        let mut rng = StdRng::seed_from_u64(3);
        let err = composer
            .try_compose("anyone there?", None, &mut rng)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Timeout(_)));

        let exchange = composer.compose("anyone there?", None).await;
        assert_fallback(&exchange);
    }

    #[tokio::test]
    async fn test_context_is_prepended() {
        let recorder = Arc::new(RecordingGenerator::default());
        let composer = composer_with(recorder.clone());

        composer.compose("help me plan", Some("finals week")).await;
        composer.compose("just me", Some("")).await;

        let calls = recorder.calls.lock().unwrap();
        assert_eq!(calls[0].0, SYSTEM_PROMPT);
        assert_eq!(calls[0].1, "Context: finals week\n\nUser message: help me plan");
        assert_eq!(calls[1].1, "just me");
    }

    #[tokio::test]
    async fn test_long_message_is_bounded_for_generation() {
        let recorder = Arc::new(RecordingGenerator::default());
        let settings = ComposerSettings {
            max_message_chars: 5,
            ..ComposerSettings::default()
        };
        let composer = Composer::new(Some(recorder.clone()), settings);

        let exchange = composer.compose("ééééé tired", None).await;

        let calls = recorder.calls.lock().unwrap();
        assert_eq!(calls[0].1, "ééééé");
        // mood detection still sees the whole message
        assert_eq!(exchange.mood_insights.unwrap().detected_emotion, Emotion::Tired);
        assert_eq!(exchange.user_message, "ééééé tired");
    }

    #[tokio::test]
    async fn test_seeded_composition_is_repeatable() {
        let composer = composer_with(Arc::new(StaticGenerator("Take it one step at a time.")));

        let first = composer
            .compose_with_rng("exam tomorrow and I can't sleep", None, &mut StdRng::seed_from_u64(99))
            .await;
        let second = composer
            .compose_with_rng("exam tomorrow and I can't sleep", None, &mut StdRng::seed_from_u64(99))
            .await;

        assert_eq!(first, second);
    }

    #[test]
    fn test_composer_avatar_pick_covers_the_set() {
        let composer = Composer::new(None, ComposerSettings::default());
        let picked: std::collections::HashSet<&str> = (0..200).map(|_| composer.pick_avatar()).collect();
        assert_eq!(picked.len(), COMPANION_AVATARS.len());
        assert!(picked.iter().all(|a| COMPANION_AVATARS.contains(a)));
    }

    #[test]
    fn test_fallback_exchange_shape() {
        let exchange = fallback_exchange("anything", &mut StdRng::seed_from_u64(0));
        assert_fallback(&exchange);
        assert_eq!(exchange.user_message, "anything");
    }
}
