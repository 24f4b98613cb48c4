//! Text similarity scoring for duplicate detection.
//!
//! # Responsibility
//! - Quantify how alike two pieces of text are on a normalized [0,1] scale.
//! - Blend body and subject scores into one duplicate-confidence value.
//!
//! # Invariants
//! - Scores are symmetric, deterministic and bounded in [0,1].
//! - Identical normalized strings score exactly 1.0.
//! - Empty-after-normalization input on either side scores 0.0.

use std::collections::HashSet;

/// Matches below this combined score are not reported as duplicates.
pub const DUPLICATE_THRESHOLD: f64 = 0.5;

/// Weight of the body score when a subject is part of the comparison.
pub const BODY_WEIGHT: f64 = 0.7;

/// Weight of the subject score when a subject is part of the comparison.
pub const SUBJECT_WEIGHT: f64 = 0.3;

/// Candidate bodies shorter than this skip duplicate scanning entirely.
pub const MIN_CHECK_BODY_CHARS: usize = 20;

/// Similarity of two free-text strings via character-bigram Dice overlap.
///
/// Both inputs are normalized (trimmed, lowercased) first. Bigram overlap
/// tolerates token reordering and differing lengths, unlike positional
/// character comparison.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let bigrams_a = char_bigrams(&a);
    let bigrams_b = char_bigrams(&b);
    if bigrams_a.is_empty() || bigrams_b.is_empty() {
        // Distinct single-character inputs share nothing measurable.
        return 0.0;
    }

    let intersection = bigrams_a.intersection(&bigrams_b).count();
    (2.0 * intersection as f64) / (bigrams_a.len() + bigrams_b.len()) as f64
}

/// Blends body and subject similarity into one duplicate-confidence score.
///
/// Without a subject pair the body score stands alone.
pub fn combined_similarity(body_a: &str, body_b: &str, subjects: Option<(&str, &str)>) -> f64 {
    let body_score = text_similarity(body_a, body_b);
    match subjects {
        Some((subject_a, subject_b)) => {
            BODY_WEIGHT * body_score + SUBJECT_WEIGHT * text_similarity(subject_a, subject_b)
        }
        None => body_score,
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn char_bigrams(text: &str) -> HashSet<(char, char)> {
    let chars: Vec<char> = text.chars().collect();
    chars.windows(2).map(|pair| (pair[0], pair[1])).collect()
}
