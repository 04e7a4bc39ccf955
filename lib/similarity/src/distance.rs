//! Text similarity metrics
//!
//! Every function here is total: empty input on either side scores 0.
//! Scores are integers in `[0, 100]`.

use crate::score::{ratio_to_score, to_score};
use ahash::AHashSet;
use vinsmak_core::text::content_tokens;
use vinsmak_core::{Analyzer, TextAnalysis};

/// Tokens of this many characters or fewer are ignored by [`lexical_similarity`]
pub const LEXICAL_MIN_SHORT: usize = 2;

/// Share of the overlap coefficient in [`lexical_similarity`]; the rest is Jaccard
pub const OVERLAP_SHARE: f64 = 0.6;

/// Lexical overlap similarity between two texts
///
/// Both texts are lowercased, stripped of punctuation and stopwords, and
/// reduced to sets of tokens longer than two characters. The score blends
///
/// - overlap coefficient: `|A ∩ B| / min(|A|, |B|)`
/// - Jaccard index: `|A ∩ B| / |A ∪ B|`
///
/// as `round(100 * (0.6 * overlap + 0.4 * jaccard))`. The overlap term keeps
/// a short note from being swamped by a long reference paragraph.
///
/// Independent of the weight profile.
pub fn lexical_similarity(text1: &str, text2: &str) -> u8 {
    let set1 = token_set(text1);
    let set2 = token_set(text2);

    if set1.is_empty() || set2.is_empty() {
        return 0;
    }

    let intersection = set1.intersection(&set2).count() as f64;
    let union = set1.union(&set2).count() as f64;
    let smaller = set1.len().min(set2.len()) as f64;

    let overlap = intersection / smaller;
    let jaccard = intersection / union;

    ratio_to_score(OVERLAP_SHARE * overlap + (1.0 - OVERLAP_SHARE) * jaccard)
}

fn token_set(text: &str) -> AHashSet<String> {
    content_tokens(text, LEXICAL_MIN_SHORT).into_iter().collect()
}

/// Weighted-lemma cosine similarity between two texts
///
/// Both texts go through the analyzer; each becomes a lemma → summed-weight
/// vector and the score is `round(100 * cosine)`. This is the metric that
/// responds to the active weight profile.
pub fn lemma_similarity(analyzer: &Analyzer<'_>, text1: &str, text2: &str) -> u8 {
    lemma_cosine(&analyzer.analyze(text1), &analyzer.analyze(text2))
}

/// Cosine over two precomputed analyses. 0 if either vector has zero magnitude.
pub fn lemma_cosine(a: &TextAnalysis, b: &TextAnalysis) -> u8 {
    let va = a.lemma_weights();
    let vb = b.lemma_weights();

    if va.is_empty() || vb.is_empty() {
        return 0;
    }

    let (small, large) = if va.len() <= vb.len() { (&va, &vb) } else { (&vb, &va) };
    let dot: f64 = small
        .iter()
        .filter_map(|(lemma, w)| large.get(lemma).map(|o| *w as f64 * *o as f64))
        .sum();

    let norm_a = va.values().map(|w| (*w as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b = vb.values().map(|w| (*w as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0;
    }

    ratio_to_score(dot / (norm_a * norm_b))
}

/// Jaccard index over the sets of recognized categories each text touches
pub fn category_similarity(a: &TextAnalysis, b: &TextAnalysis) -> u8 {
    let ca = a.category_set();
    let cb = b.category_set();

    if ca.is_empty() || cb.is_empty() {
        return 0;
    }

    let intersection = ca.intersection(&cb).count() as f64;
    let union = ca.union(&cb).count() as f64;
    ratio_to_score(intersection / union)
}

/// Unweighted mean of lexical, lemma and category similarity, rounded
pub fn composite_similarity(analyzer: &Analyzer<'_>, text1: &str, text2: &str) -> u8 {
    composite_of(text1, &analyzer.analyze(text1), text2, &analyzer.analyze(text2))
}

/// [`composite_similarity`] with both analyses already computed
pub fn composite_of(text1: &str, a: &TextAnalysis, text2: &str, b: &TextAnalysis) -> u8 {
    let lexical = lexical_similarity(text1, text2) as f64;
    let lemma = lemma_cosine(a, b) as f64;
    let category = category_similarity(a, b) as f64;

    to_score((lexical + lemma + category) / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vinsmak_core::{TermDictionary, WeightProfile};

    fn analyzer(profile: &str) -> Analyzer<'static> {
        Analyzer::new(
            TermDictionary::builtin(),
            WeightProfile::by_name(profile).unwrap(),
        )
    }

    #[test]
    fn test_lexical_empty_is_zero() {
        assert_eq!(lexical_similarity("", "solbær og kirsebær"), 0);
        assert_eq!(lexical_similarity("solbær og kirsebær", ""), 0);
        assert_eq!(lexical_similarity("og i på", "og i på"), 0);
    }

    #[test]
    fn test_lexical_identical() {
        assert_eq!(lexical_similarity("Mørke kirsebær, vanilje", "mørke kirsebær vanilje"), 100);
    }

    #[test]
    fn test_lexical_short_note_vs_long_reference() {
        // overlap = 2/2, jaccard = 2/7
        let score = lexical_similarity(
            "solbær, kirsebær",
            "Solbær og kirsebær med toner av vanilje, tobakk, lær og krydder",
        );
        assert_eq!(score, 71);
    }

    #[test]
    fn test_lexical_ignores_short_tokens() {
        assert_eq!(lexical_similarity("ny ok", "ny ok"), 0);
    }

    #[test]
    fn test_lexical_disjoint() {
        assert_eq!(lexical_similarity("sitron lime", "plomme sviske"), 0);
    }

    #[test]
    fn test_lemma_self_similarity() {
        let a = analyzer("inverted");
        for text in [
            "solbær og kirsebær",
            "Fyldig, rund og balansert med lang ettersmak",
            "eik eik vanilje røyk",
            "ukjent ord her",
        ] {
            assert!(lemma_similarity(&a, text, text) >= 95, "{}", text);
        }
    }

    #[test]
    fn test_lemma_empty_is_zero() {
        let a = analyzer("inverted");
        assert_eq!(lemma_similarity(&a, "", "solbær"), 0);
        assert_eq!(lemma_similarity(&a, "solbær", "  "), 0);
    }

    #[test]
    fn test_lemma_matches_inflections() {
        let a = analyzer("moderate");
        assert_eq!(lemma_similarity(&a, "solbærene, fatpreg", "solbær fat"), 100);
    }

    #[test]
    fn test_lemma_profile_sensitivity() {
        let note = "solbær kirsebær balansert";
        let reference = "solbær kirsebær frisk";

        let inverted = lemma_similarity(&analyzer("inverted"), note, reference);
        let data_driven = lemma_similarity(&analyzer("data-driven"), note, reference);

        // {2,2,1}·{2,2,1} vs {1,1,1.5}·{1,1,1.5}
        assert_eq!(inverted, 89);
        assert_eq!(data_driven, 47);
    }

    #[test]
    fn test_category_similarity() {
        let a = analyzer("inverted");
        let x = a.analyze("solbær eik");
        let y = a.analyze("bringebær vanilje");
        // {berry, barrel} vs {berry, sweet_spice}
        assert_eq!(category_similarity(&x, &y), 33);
        assert_eq!(category_similarity(&x, &a.analyze("spennende")), 0);
    }

    #[test]
    fn test_composite_is_mean() {
        let a = analyzer("inverted");
        let t1 = "solbær kirsebær balansert";
        let t2 = "solbær kirsebær frisk";
        let lexical = lexical_similarity(t1, t2) as f64;
        let lemma = lemma_similarity(&a, t1, t2) as f64;
        let category = category_similarity(&a.analyze(t1), &a.analyze(t2)) as f64;
        let expected = ((lexical + lemma + category) / 3.0).round() as u8;
        assert_eq!(composite_similarity(&a, t1, t2), expected);
    }

    #[test]
    fn test_composite_empty_is_zero() {
        assert_eq!(composite_similarity(&analyzer("moderate"), "", "eik"), 0);
    }
}
