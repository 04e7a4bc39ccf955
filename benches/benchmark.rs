// Benchmarks for the similarity metrics and the recommendation pipeline
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use std::sync::Arc;
use vinsmak_core::{Analyzer, EngineConfig};
use vinsmak_recommend::{
    MemoryStore, NumericValue, RecommendationThresholds, RecommendationWeights, Recommender,
    Tasting, Wine, WineCategory,
};
use vinsmak_similarity::{Algorithm, SimilarityEngine};

const WORDS: &[&str] = &[
    "solbær", "kirsebær", "bringebær", "plomme", "sitrus", "eple", "vanilje", "pepper",
    "eik", "tobakk", "lær", "urter", "flint", "frisk", "balansert", "fyldig", "lang",
    "ettersmak", "og", "med", "hint", "av", "mørke", "modne", "syre", "tanniner",
];

fn generate_note(rng: &mut StdRng, len: usize) -> String {
    (0..len)
        .map(|_| *WORDS.choose(rng).unwrap_or(&"eik"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_wine(rng: &mut StdRng, id: usize) -> Wine {
    let category = if rng.random_bool(0.6) {
        WineCategory::Red
    } else {
        WineCategory::White
    };
    let mut wine = Wine::new(format!("w{}", id), format!("Wine {}", id), category);
    wine.body = Some(NumericValue::from(rng.random_range(1.0..12.0)));
    wine.freshness = Some(NumericValue::from(rng.random_range(1.0..12.0)));
    wine.tannin = Some(NumericValue::from(format!("{}", rng.random_range(1..12)).as_str()));
    wine.sweetness = Some(NumericValue::from(rng.random_range(1.0..12.0)));
    wine.smell = Some(generate_note(rng, 12));
    wine.taste = Some(generate_note(rng, 12));
    wine
}

fn engine() -> SimilarityEngine<'static> {
    SimilarityEngine::new(Analyzer::from_config(&EngineConfig::default()))
}

fn benchmark_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");
    let mut rng = StdRng::seed_from_u64(42);
    let engine = engine();

    for len in [5, 20, 80] {
        let a = generate_note(&mut rng, len);
        let b = generate_note(&mut rng, len);

        for algorithm in [
            Algorithm::Lexical,
            Algorithm::Lemma,
            Algorithm::Category,
            Algorithm::Composite,
        ] {
            group.bench_with_input(BenchmarkId::new(algorithm.as_str(), len), &len, |bench, _| {
                bench.iter(|| black_box(engine.score(algorithm, black_box(&a), black_box(&b))));
            });
        }
    }

    group.finish();
}

fn benchmark_analyze(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let analyzer = Analyzer::from_config(&EngineConfig::default());
    let note = generate_note(&mut rng, 40);

    c.bench_function("analyze_40_tokens", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box(&note))));
    });
}

fn benchmark_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");
    let runtime = tokio::runtime::Runtime::new().unwrap();

    for size in [100, 1000] {
        let mut rng = StdRng::seed_from_u64(size as u64);
        let store = MemoryStore::new();
        for i in 0..size {
            store.upsert_wine(generate_wine(&mut rng, i));
        }
        for i in 0..10 {
            let mut tasting = Tasting::new("bench", format!("w{}", i), 9.0);
            tasting.body = Some(NumericValue::from(rng.random_range(1.0..12.0)));
            tasting.smell = Some(generate_note(&mut rng, 8));
            store.add_tasting(tasting);
        }

        let recommender = Recommender::new(Arc::new(store), engine());
        let weights = RecommendationWeights::default();
        let thresholds = RecommendationThresholds {
            candidate_limit: size,
            ..Default::default()
        };

        group.bench_with_input(BenchmarkId::new("lemma", size), &size, |b, _| {
            b.iter(|| {
                let response = runtime
                    .block_on(recommender.recommend("bench", 10, &weights, &thresholds, None))
                    .unwrap();
                black_box(response);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_metrics, benchmark_analyze, benchmark_recommend);
criterion_main!(benches);
