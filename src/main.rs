use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use vinsmak_core::{Analyzer, EngineConfig, TermDictionary, WeightProfile, PROFILE_ENV_VAR};
use vinsmak_recommend::{
    MemoryStore, RecommendationThresholds, RecommendationWeights, Recommender, WineCategory,
};
use vinsmak_similarity::{Algorithm, SimilarityEngine};

/// Tasting-note similarity and wine recommendations
#[derive(Parser, Debug)]
#[command(name = "vinsmak", version)]
#[command(about = "Compare tasting notes and recommend wines", long_about = None)]
struct Args {
    /// Weight profile (inverted, moderate, data-driven)
    #[arg(long, global = true, env = PROFILE_ENV_VAR)]
    profile: Option<String>,

    /// Log level
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the weighted terms of a tasting note
    Analyze {
        text: String,
    },

    /// Score two tasting notes against each other
    Compare {
        text1: String,
        text2: String,

        /// Metric to use; every text metric when omitted
        #[arg(short, long)]
        algorithm: Option<String>,
    },

    /// Recommend untasted wines for a user
    Recommend {
        /// JSON dataset with `wines` and `tastings`
        #[arg(short, long)]
        data: PathBuf,

        #[arg(short, long)]
        user: String,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Only consider wines of this category
        #[arg(short, long)]
        category: Option<String>,

        /// Text metric for smell and taste
        #[arg(long, default_value = "lemma")]
        metric: String,

        /// Minimum rating (1-10) for a tasting to count as liked
        #[arg(long)]
        min_rating: Option<f64>,

        /// JSON file overriding attribute weights
        #[arg(long)]
        weights: Option<PathBuf>,
    },

    /// List the shipped weight profiles
    Profiles,

    /// Report duplicate forms and category conflicts in term data
    CheckDictionary {
        /// Term data file; the bundled dictionary when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn parse_algorithm(name: &str) -> anyhow::Result<Algorithm> {
    Algorithm::parse(name).ok_or_else(|| anyhow!("Unknown algorithm: {}", name))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries the JSON output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = EngineConfig::new(args.profile);
    let analyzer = Analyzer::from_config(&config);
    info!("Vinsmak v{} using profile {}", env!("CARGO_PKG_VERSION"), analyzer.profile().name);

    match args.command {
        Command::Analyze { text } => {
            let analysis = analyzer.analyze(&text);
            print_json(&json!({
                "profile": analyzer.profile().name,
                "analysis": analysis,
            }))
        }

        Command::Compare {
            text1,
            text2,
            algorithm,
        } => {
            let engine = SimilarityEngine::new(analyzer);
            let scores = match algorithm {
                Some(name) => vec![engine.score(parse_algorithm(&name)?, &text1, &text2)],
                None => engine.score_all(&text1, &text2),
            };
            let scores: Vec<_> = scores
                .into_iter()
                .map(|score| {
                    json!({
                        "algorithm": score.algorithm,
                        "value": score.value,
                        "profile_sensitive": score.algorithm.is_profile_sensitive(),
                    })
                })
                .collect();
            print_json(&json!({
                "profile": analyzer.profile().name,
                "scores": scores,
            }))
        }

        Command::Recommend {
            data,
            user,
            limit,
            category,
            metric,
            min_rating,
            weights,
        } => {
            let category = category
                .map(|c| WineCategory::parse(&c).ok_or_else(|| anyhow!("Unknown category: {}", c)))
                .transpose()?;
            let weights: RecommendationWeights = match weights {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read weights from {:?}", path))?;
                    serde_json::from_str(&raw)?
                }
                None => RecommendationWeights::default(),
            };
            let mut thresholds = RecommendationThresholds::default();
            if let Some(min) = min_rating {
                thresholds.min_rating = min;
            }

            let store = MemoryStore::from_json_file(&data)
                .with_context(|| format!("Failed to load dataset {:?}", data))?;
            info!(
                "Loaded {} wines and {} tastings",
                store.wine_count(),
                store.tasting_count()
            );

            let recommender = Recommender::new(Arc::new(store), SimilarityEngine::new(analyzer))
                .with_metric(parse_algorithm(&metric)?);
            info!("Scoring smell and taste with {}", recommender.metric());
            let response = recommender
                .recommend(&user, limit, &weights, &thresholds, category)
                .await?;
            print_json(&response)
        }

        Command::Profiles => print_json(&WeightProfile::all()),

        Command::CheckDictionary { file } => {
            let loaded;
            let dictionary = match file {
                Some(path) => {
                    loaded = TermDictionary::from_file(&path)
                        .with_context(|| format!("Failed to load term data {:?}", path))?;
                    &loaded
                }
                None => analyzer.dictionary(),
            };
            let lemmas: BTreeSet<&str> = dictionary.iter().map(|e| e.lemma.as_str()).collect();
            let issues = dictionary.consistency_report();
            print_json(&json!({
                "forms": dictionary.len(),
                "lemmas": lemmas.len(),
                "issues": issues,
            }))?;
            if !issues.is_empty() {
                bail!("{} consistency issue(s) found", issues.len());
            }
            Ok(())
        }
    }
}
