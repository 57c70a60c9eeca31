use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::{error, info, Level};

use bloom_compare::candidates::load_candidates;
use bloom_compare::codec::{encode_chunks, DecodeMode};
use bloom_compare::rank::rank;
use bloom_compare::{Arity, CompareConfig, Comparator, Value};

/// Score how many bits base64-encoded bloom filters have in common
#[derive(Parser)]
#[command(name = "bloomcmp", version)]
struct Cli {
    /// Accept exactly one pair of filters instead of any even number
    #[arg(long, global = true)]
    single_pair: bool,

    /// Decode unknown characters as zero bits instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    /// Log every scored pair
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the summed intersection popcount of consecutive token pairs
    Compare {
        #[arg(required = true)]
        tokens: Vec<String>,
    },
    /// Rank candidate filters from a csv file against a query filter
    Rank {
        /// Base64 chunks of the query filter, in order
        #[arg(long, required = true, num_args = 1..)]
        query: Vec<String>,
        /// Headerless csv: id followed by the candidate's chunks
        #[arg(long)]
        candidates: PathBuf,
        #[arg(long, default_value_t = 0)]
        min_score: u64,
        /// Only print the best N candidates
        #[arg(long)]
        top: Option<usize>,
    },
    /// Print the base64 chunks of a raw filter file, one per line
    Encode { path: PathBuf },
}

impl Cli {
    fn config(&self) -> CompareConfig {
        CompareConfig {
            arity: if self.single_pair {
                Arity::SinglePair
            } else {
                Arity::Pairs
            },
            decode_mode: if self.lenient {
                DecodeMode::Lenient
            } else {
                DecodeMode::Strict
            },
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so stdout only carries results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let comparator = Comparator::new(cli.config());

    match &cli.command {
        Command::Compare { tokens } => {
            let arguments: Vec<Value> = tokens.iter().map(|t| Value::from(t.as_str())).collect();
            match comparator.evaluate(&arguments) {
                Value::Integer(score) => println!("{}", score),
                _ => return Ok(ExitCode::FAILURE),
            }
        }
        Command::Rank {
            query,
            candidates,
            min_score,
            top,
        } => {
            let now = Instant::now();
            let candidates = load_candidates(candidates)?;
            info!(
                "Loaded {} candidates [{}ms]",
                candidates.len(),
                now.elapsed().as_millis()
            );

            let now = Instant::now();
            let ranking = rank(&comparator, query.as_slice(), &candidates, *min_score);
            info!(
                "Ranked {} candidates, {} rejected [{}ms]",
                ranking.ranked.len(),
                ranking.rejected.len(),
                now.elapsed().as_millis()
            );

            let shown = top.unwrap_or(ranking.ranked.len());
            for ranked in ranking.ranked.iter().take(shown) {
                println!("{}\t{}", ranked.id, ranked.score);
            }
            if ranking.ranked.is_empty() && !ranking.rejected.is_empty() {
                error!("no candidate could be compared with the query");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Encode { path } => {
            let bytes = fs::read(path)?;
            for chunk in encode_chunks(&bytes) {
                println!("{}", chunk);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
