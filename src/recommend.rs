//! Recommendation Selector
//!
//! Pure selection logic: which token the next generated exercise should drill,
//! and which exercise kind to produce when no priority signal exists.

use std::collections::HashMap;

use rand::Rng;

use crate::models::ExerciseKind;

// == Token Selection ==
/// Picks the practice token with the lowest count from a tokenbank snapshot.
///
/// Ties on the minimum count are broken by the lexicographically smallest
/// token, so the choice is deterministic across processes.
///
/// Returns `None` for an empty bank; callers must treat that as "no practice
/// material configured" and must not invoke the generator.
pub fn select_next_token(bank: &HashMap<String, u32>) -> Option<&str> {
    bank.iter()
        .min_by(|(token_a, count_a), (token_b, count_b)| {
            count_a.cmp(count_b).then_with(|| token_a.cmp(token_b))
        })
        .map(|(token, _)| token.as_str())
}

// == Exercise Kind Selection ==
/// Picks an exercise kind uniformly at random from the closed set.
///
/// Used only on the generator-facing path when no priority signal exists
/// (cold start); cache-sizing logic never calls this.
pub fn random_exercise_kind() -> ExerciseKind {
    let mut rng = rand::thread_rng();
    ExerciseKind::ALL[rng.gen_range(0..ExerciseKind::ALL.len())]
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn bank(entries: &[(&str, u32)]) -> HashMap<String, u32> {
        entries
            .iter()
            .map(|(token, count)| (token.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_select_lowest_count() {
        let bank = bank(&[("a", 5), ("b", 2), ("c", 9)]);
        assert_eq!(select_next_token(&bank), Some("b"));
    }

    #[test]
    fn test_select_empty_bank() {
        let bank = HashMap::new();
        assert_eq!(select_next_token(&bank), None);
    }

    #[test]
    fn test_select_tie_breaks_lexicographically() {
        let bank = bank(&[("dog", 1), ("cat", 1), ("bird", 3)]);
        assert_eq!(select_next_token(&bank), Some("cat"));
    }

    #[test]
    fn test_select_single_token() {
        let bank = bank(&[("只", 7)]);
        assert_eq!(select_next_token(&bank), Some("只"));
    }

    #[test]
    fn test_random_kind_is_member_of_closed_set() {
        for _ in 0..50 {
            let kind = random_exercise_kind();
            assert!(ExerciseKind::ALL.contains(&kind));
        }
    }
}
