//! Exercise Generator Seam
//!
//! The real generator is an external collaborator (an AI model behind a
//! service boundary) with unspecified latency. The engine only depends on the
//! `ExerciseGenerator` trait; `StubGenerator` stands in with canned content
//! for local development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::language::language_name_with_fallback;
use crate::models::{
    AudioTranscribeExercise, ExerciseKind, ExercisePayload, FillBlankExercise, MatchingExercise,
    NewExercise, TranslateExercise,
};
use crate::recommend::random_exercise_kind;

// == Generator Trait ==
/// Produces one exercise for a language, optionally drilling a specific token.
///
/// Implementations must always return one of the closed exercise-kind payloads
/// but are free to vary the content. Generation has no side effects on the
/// cache; persisting the result is the caller's responsibility.
#[async_trait]
pub trait ExerciseGenerator: Send + Sync {
    async fn generate(&self, language: &str, token: Option<&str>) -> Result<NewExercise>;
}

// == Stub Generator ==
/// Built-in generator returning predefined content per exercise kind.
///
/// The kind is chosen uniformly at random since no priority signal exists for
/// kinds yet; the token only influences logging here, where a real generator
/// would build its prompt around it.
#[derive(Debug, Default, Clone)]
pub struct StubGenerator;

#[async_trait]
impl ExerciseGenerator for StubGenerator {
    async fn generate(&self, language: &str, token: Option<&str>) -> Result<NewExercise> {
        let kind = random_exercise_kind();
        debug!(
            "Generating {} exercise for {} (token: {})",
            kind.as_str(),
            language_name_with_fallback(language),
            token.unwrap_or("none"),
        );

        let payload = match kind {
            ExerciseKind::Translate => ExercisePayload::Translate(TranslateExercise {
                input_language: language.to_string(),
                output_language: "eng".to_string(),
                input_sentence: "我昨天在那間店裡看到一件新衣服".to_string(),
                output_sentences: vec![
                    "yesterday at the store I saw a new shirt".to_string(),
                    "I saw a new shirt yesterday at the store".to_string(),
                    "I saw a new shirt at the store yesterday".to_string(),
                ],
                chunk_options: [
                    "yesterday",
                    "at",
                    "I",
                    "of",
                    "saw",
                    "a new shirt",
                    "the store",
                    "colorful",
                    "wrong",
                    "other stuff",
                    "mouse",
                    "nope",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            }),
            ExerciseKind::Matching => {
                let mut pairs = HashMap::new();
                pairs.insert("你好".to_string(), "hello".to_string());
                pairs.insert("再見".to_string(), "goodbye".to_string());
                pairs.insert("謝謝".to_string(), "thank you".to_string());
                pairs.insert("早安".to_string(), "good morning".to_string());
                ExercisePayload::Matching(MatchingExercise { pairs })
            }
            ExerciseKind::AudioTranscribe => {
                ExercisePayload::AudioTranscribe(AudioTranscribeExercise {
                    input_language: language.to_string(),
                    audio_url: "https://example.com/fake-audio.mp3".to_string(),
                    chunk_options: [
                        "我", "你", "他", "是", "不是", "要", "去", "商店", "學校", "吃飯", "喝水",
                    ]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                    correct_sentences: vec!["我要去商店".to_string(), "我想去商店".to_string()],
                })
            }
            ExerciseKind::FillBlank => ExercisePayload::FillBlank(FillBlankExercise {
                input_language: language.to_string(),
                input_sentence: "我 {} 去商店".to_string(),
                correct_fills: vec!["要".to_string(), "想".to_string(), "會".to_string()],
            }),
        };

        Ok(NewExercise {
            language: language.to_string(),
            payload,
        })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_generates_closed_kind() {
        let generator = StubGenerator;

        for _ in 0..20 {
            let exercise = generator.generate("cmn", Some("商店")).await.unwrap();
            assert_eq!(exercise.language, "cmn");
            assert!(ExerciseKind::ALL.contains(&exercise.payload.kind()));
        }
    }

    #[tokio::test]
    async fn test_stub_generates_without_token() {
        let generator = StubGenerator;
        let exercise = generator.generate("spa", None).await.unwrap();
        assert_eq!(exercise.language, "spa");
    }

    #[tokio::test]
    async fn test_stub_payload_survives_serialization() {
        let generator = StubGenerator;
        let exercise = generator.generate("cmn", Some("商店")).await.unwrap();

        let json = serde_json::to_string(&exercise).unwrap();
        let back: NewExercise = serde_json::from_str(&json).unwrap();
        assert_eq!(back, exercise);
    }
}
