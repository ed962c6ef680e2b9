//! Lexical similarity between a candidate's CV text and a job description.
//!
//! The two documents form their own two-document corpus: term weights are
//! TF-IDF with `tf` = raw count and `idf = 1 + ln(N / (1 + df))`, N = 2. A term
//! present in both documents therefore weighs `1 + ln(2/3)`, a term present in
//! one weighs 1. Scores are only meaningful relative to the same pair of
//! vocabularies; they are not calibrated across pairs.
//!
//! Pure functions only. Vectors are kept in term order so floating-point sums
//! do not depend on argument order.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"[\p{L}\p{N}]+").expect("token regex is valid");
}

/// Number of documents in the corpus: the candidate text and the job text.
const CORPUS_SIZE: f64 = 2.0;

/// Lowercased word tokens, in document order.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn term_counts(tokens: &[String]) -> BTreeMap<&str, f64> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0.0) += 1.0;
    }
    counts
}

fn idf(document_frequency: f64) -> f64 {
    1.0 + (CORPUS_SIZE / (1.0 + document_frequency)).ln()
}

/// TF-IDF weight vector of `own` over its own term list, with `other` as the
/// second corpus document.
fn weights<'a>(
    own: &BTreeMap<&'a str, f64>,
    other: &BTreeMap<&str, f64>,
) -> BTreeMap<&'a str, f64> {
    own.iter()
        .map(|(term, tf)| {
            let df = if other.contains_key(term) { 2.0 } else { 1.0 };
            (*term, tf * idf(df))
        })
        .collect()
}

fn magnitude(vector: &BTreeMap<&str, f64>) -> f64 {
    vector.values().map(|w| w * w).sum::<f64>().sqrt()
}

/// Cosine similarity of the two texts' TF-IDF vectors, in [0, 1].
///
/// Empty or token-less input yields 0: a zero denominator is replaced by 1,
/// and the dot product of an empty vector is 0.
pub fn similarity(candidate_text: &str, job_text: &str) -> f64 {
    let candidate_tokens = tokenize(candidate_text);
    let job_tokens = tokenize(job_text);
    let candidate_counts = term_counts(&candidate_tokens);
    let job_counts = term_counts(&job_tokens);

    let candidate = weights(&candidate_counts, &job_counts);
    let job = weights(&job_counts, &candidate_counts);

    let dot: f64 = candidate
        .iter()
        .filter_map(|(term, w)| job.get(term).map(|v| w * v))
        .sum();

    let denominator = magnitude(&candidate) * magnitude(&job);
    let denominator = if denominator == 0.0 { 1.0 } else { denominator };

    (dot / denominator).clamp(0.0, 1.0)
}

/// Similarity scaled to a match score in [0, 100].
pub fn text_score(candidate_text: &str, job_text: &str) -> f64 {
    (similarity(candidate_text, job_text) * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CV: &str = "Python, Django, 5 years";
    const PYTHON_JOB: &str = "Looking for Python developer, Django experience required";
    const PASTRY_JOB: &str = "Seeking a pastry chef";

    #[test]
    fn test_tokenize_lowercases_and_strips_punctuation() {
        assert_eq!(
            tokenize("Python, Django; 5-years!"),
            vec!["python", "django", "5", "years"]
        );
        assert!(tokenize("  ,,; ").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_unicode_letters() {
        assert_eq!(tokenize("Geliştirici Müdür"), vec!["geliştirici", "müdür"]);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            (CV, PYTHON_JOB),
            (CV, PASTRY_JOB),
            ("rust rust rust tokio", "tokio axum rust"),
            ("", "anything"),
        ];
        for (a, b) in pairs {
            assert_eq!(
                similarity(a, b),
                similarity(b, a),
                "asymmetric for {:?} / {:?}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_self_similarity_is_maximal() {
        for text in [CV, PYTHON_JOB, "one", "repeat repeat other"] {
            let s = similarity(text, text);
            assert!((s - 1.0).abs() < 1e-9, "self-similarity of {:?} was {}", text, s);
        }
    }

    #[test]
    fn test_empty_inputs_fall_back_to_zero() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("", PYTHON_JOB), 0.0);
        assert_eq!(similarity("!!!", "???"), 0.0);
        assert!(!similarity("", "").is_nan());
    }

    #[test]
    fn test_disjoint_vocabularies_score_zero() {
        assert_eq!(similarity(CV, PASTRY_JOB), 0.0);
    }

    #[test]
    fn test_overlap_beats_unrelated_job() {
        let related = text_score(CV, PYTHON_JOB);
        let unrelated = text_score(CV, PASTRY_JOB);
        assert!(related > 0.0);
        assert!(related > unrelated);
    }

    #[test]
    fn test_known_value() {
        // Shared terms weigh 1 + ln(2/3); unshared weigh 1.
        let shared = 1.0 + (2.0_f64 / 3.0).ln();
        let dot = 2.0 * shared * shared;
        let cv_norm = (2.0 * shared * shared + 2.0).sqrt();
        let job_norm = (2.0 * shared * shared + 5.0).sqrt();
        let expected = dot / (cv_norm * job_norm);
        assert!((similarity(CV, PYTHON_JOB) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(similarity(CV, PYTHON_JOB), similarity(CV, PYTHON_JOB));
    }

    #[test]
    fn test_text_score_bounds() {
        for (a, b) in [(CV, CV), (CV, PYTHON_JOB), ("", "")] {
            let score = text_score(a, b);
            assert!((0.0..=100.0).contains(&score));
        }
    }
}
