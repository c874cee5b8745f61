//! Exercise Models
//!
//! Defines the closed set of exercise kinds and their type-specific payloads.
//!
//! The payload is a tagged union: on the wire, the discriminant travels in a
//! `type` field next to a `data` object holding the kind-specific fields.
//! Deserialization rejects unknown `type` values outright instead of passing
//! them through.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// == Exercise Kind ==
/// The closed set of exercise kinds the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Matching,
    Translate,
    FillBlank,
    AudioTranscribe,
}

impl ExerciseKind {
    /// Every exercise kind, in declaration order.
    pub const ALL: [ExerciseKind; 4] = [
        ExerciseKind::Matching,
        ExerciseKind::Translate,
        ExerciseKind::FillBlank,
        ExerciseKind::AudioTranscribe,
    ];

    /// Wire name of the kind, matching the serialized `type` discriminant.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Matching => "matching",
            ExerciseKind::Translate => "translate",
            ExerciseKind::FillBlank => "fill_blank",
            ExerciseKind::AudioTranscribe => "audio_transcribe",
        }
    }
}

// == Payloads ==
/// Pair-matching exercise: each left-hand term maps to its translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingExercise {
    pub pairs: HashMap<String, String>,
}

/// Sentence translation built from chunk options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateExercise {
    pub input_language: String,
    pub output_language: String,
    pub input_sentence: String,
    /// Accepted translations, any of which counts as correct
    pub output_sentences: Vec<String>,
    /// Word chunks offered to the learner, correct ones mixed with distractors
    pub chunk_options: Vec<String>,
}

/// Fill-in-the-blank over a sentence with a `{}` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillBlankExercise {
    pub input_language: String,
    pub input_sentence: String,
    pub correct_fills: Vec<String>,
}

/// Transcribe an audio clip by arranging chunk options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioTranscribeExercise {
    pub input_language: String,
    pub audio_url: String,
    pub chunk_options: Vec<String>,
    pub correct_sentences: Vec<String>,
}

// == Tagged Payload Union ==
/// Type-specific exercise content, tagged by kind.
///
/// Serializes as `{"type": "<kind>", "data": {...}}`; an unrecognized `type`
/// fails deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ExercisePayload {
    Matching(MatchingExercise),
    Translate(TranslateExercise),
    FillBlank(FillBlankExercise),
    AudioTranscribe(AudioTranscribeExercise),
}

impl ExercisePayload {
    /// The kind discriminant of this payload.
    pub fn kind(&self) -> ExerciseKind {
        match self {
            ExercisePayload::Matching(_) => ExerciseKind::Matching,
            ExercisePayload::Translate(_) => ExerciseKind::Translate,
            ExercisePayload::FillBlank(_) => ExerciseKind::FillBlank,
            ExercisePayload::AudioTranscribe(_) => ExerciseKind::AudioTranscribe,
        }
    }
}

// == Exercise Documents ==
/// A generated exercise before persistence; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExercise {
    pub language: String,
    #[serde(flatten)]
    pub payload: ExercisePayload,
}

/// A persisted exercise document. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Uuid,
    pub language: String,
    #[serde(flatten)]
    pub payload: ExercisePayload,
}

impl Exercise {
    /// The kind discriminant of this exercise's payload.
    pub fn kind(&self) -> ExerciseKind {
        self.payload.kind()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn matching_payload() -> ExercisePayload {
        let mut pairs = HashMap::new();
        pairs.insert("你好".to_string(), "hello".to_string());
        pairs.insert("再見".to_string(), "goodbye".to_string());
        ExercisePayload::Matching(MatchingExercise { pairs })
    }

    #[test]
    fn test_payload_serializes_with_type_discriminant() {
        let payload = matching_payload();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["type"], "matching");
        assert!(json["data"]["pairs"].is_object());
    }

    #[test]
    fn test_payload_roundtrip() {
        let payload = ExercisePayload::FillBlank(FillBlankExercise {
            input_language: "cmn".to_string(),
            input_sentence: "我 {} 去商店".to_string(),
            correct_fills: vec!["要".to_string(), "想".to_string()],
        });

        let json = serde_json::to_string(&payload).unwrap();
        let back: ExercisePayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
        assert_eq!(back.kind(), ExerciseKind::FillBlank);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"{"type":"word_scramble","data":{"letters":["a","b"]}}"#;
        let result: std::result::Result<ExercisePayload, _> = serde_json::from_str(json);
        assert!(result.is_err(), "Unknown exercise type should be rejected");
    }

    #[test]
    fn test_kind_matches_wire_name() {
        for kind in ExerciseKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
        }
    }

    #[test]
    fn test_exercise_flattens_payload() {
        let exercise = Exercise {
            id: Uuid::new_v4(),
            language: "cmn".to_string(),
            payload: matching_payload(),
        };

        let json = serde_json::to_value(&exercise).unwrap();
        assert_eq!(json["type"], "matching");
        assert_eq!(json["language"], "cmn");
        assert_eq!(exercise.kind(), ExerciseKind::Matching);
    }
}
