//! Minimal CLI demo mirroring the original driver scripts: build a
//! substring or trie reweighter over a direct-mode vocabulary of small
//! integers, or sample paths from a small layered network, and print the
//! result. Masked-mode vocabularies are a library-only feature.

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use weighted_reweight::{
    build_pattern_trie, sample, samples, shortest_distance, substring_matcher, trie_matcher,
    util::{network_fsa, path_score},
    DirectVocabulary, LabelMap, Semiring, Tropical, WeightedAutomatonError,
};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a substring reweighter and score a query sequence against it.
    Substring {
        /// Comma-separated vocabulary symbols, e.g. "1,2,3".
        #[clap(long)]
        vocab: String,
        /// Comma-separated pattern symbols, e.g. "1,2,1,2".
        #[clap(long)]
        pattern: String,
        /// Bonus weight applied per occurrence.
        #[clap(long)]
        alpha: f64,
        /// Comma-separated query sequence to score.
        #[clap(long)]
        query: String,
    },
    /// Build a trie reweighter and score a query sequence against it.
    Trie {
        #[clap(long)]
        vocab: String,
        /// Semicolon-separated `pattern:weight` entries, e.g. "1,2:0.5;2,3:1".
        #[clap(long)]
        patterns: String,
        #[clap(long)]
        query: String,
    },
    /// Sample paths from a small layered network.
    Sample {
        /// Number of intermediate layers.
        #[clap(long, default_value_t = 2)]
        layers: usize,
        /// States per layer.
        #[clap(long, default_value_t = 2)]
        width: usize,
        /// Number of paths to draw.
        #[clap(long, default_value_t = 10)]
        n: usize,
    },
}

fn parse_symbols(s: &str) -> Vec<usize> {
    s.split(',')
        .map(|t| t.trim().parse().expect("vocabulary/query entries must be integers"))
        .collect()
}

fn main() -> Result<(), WeightedAutomatonError> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Substring {
            vocab,
            pattern,
            alpha,
            query,
        } => {
            let vocab = DirectVocabulary::new(parse_symbols(&vocab))?;
            let pattern = parse_symbols(&pattern);
            log::info!(
                "building substring reweighter over {} symbols, pattern length {}",
                vocab.symbols().len(),
                pattern.len()
            );
            let acceptor = substring_matcher(&vocab, &pattern, Tropical(alpha), true)?;
            let query = parse_symbols(&query);
            let score = path_score(&acceptor, &query)?;
            println!("score = {:?}", score);
        }
        Commands::Trie { vocab, patterns, query } => {
            let vocab = DirectVocabulary::new(parse_symbols(&vocab))?;
            let entries: Vec<(Vec<usize>, Tropical)> = patterns
                .split(';')
                .filter(|e| !e.is_empty())
                .map(|entry| {
                    let (pattern, weight) = entry
                        .split_once(':')
                        .expect("pattern entries must be of the form pattern:weight");
                    (parse_symbols(pattern), Tropical(weight.trim().parse().unwrap()))
                })
                .collect();
            let pattern_trie = build_pattern_trie(entries)?;
            log::info!(
                "building trie reweighter over {} symbols, {} patterns",
                vocab.symbols().len(),
                pattern_trie.len()
            );
            let acceptor = trie_matcher(&vocab, &pattern_trie, true)?;
            let query = parse_symbols(&query);
            let score = path_score(&acceptor, &query)?;
            println!("score = {:?}", score);
        }
        Commands::Sample { layers, width, n } => {
            let acceptor = network_fsa(layers, width, |_from, to| {
                (to as u32, weighted_reweight::Log::from_real(1.0 / width as f64))
            })?;
            let totals = shortest_distance(&acceptor);
            let mut rng = StdRng::from_entropy();
            log::info!("sampling {} paths from a {}x{} network", n, layers, width);
            let dist = samples(&acceptor, &totals, n, &mut rng)?;
            for (path, count) in dist {
                println!("{:>5}  {:?}", count, path.labels);
            }
            let single = sample(&acceptor, &totals, &mut rng)?;
            log::debug!("one more single-path draw: {:?}", single.labels);
        }
    }

    Ok(())
}
