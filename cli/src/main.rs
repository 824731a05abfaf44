use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use shortlist_cli::collect::{collect_candidates, read_text};
use shortlist_cli::report::{format_summary, format_table, load_report, save_report, RankReport};
use shortlist_core::{Ranker, RankerOptions, TfScheme, TokenizerConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "shortlist")]
#[command(about = "Rank candidate documents against a query by TF-IDF cosine similarity", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank candidates and print the top k
    Rank {
        /// Query text
        #[arg(long, conflicts_with = "query_file")]
        query: Option<String>,
        /// Read the query from a text file
        #[arg(long)]
        query_file: Option<PathBuf>,
        /// Directory of text files, a .jsonl/.json file of {"id","text"}, or one text file
        #[arg(long)]
        candidates: PathBuf,
        /// Number of candidates to keep
        #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
        k: i64,
        /// Write a JSON report to this path
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Print a previously written report
    Show {
        /// Report JSON written by `rank --output`
        report: PathBuf,
    },
}

#[derive(Args)]
struct OptionArgs {
    /// Drop terms shorter than this many characters
    #[arg(long, default_value_t = 1)]
    min_token_len: usize,
    /// Apply English stemming to terms
    #[arg(long, default_value_t = false)]
    stem: bool,
    /// Remove English stopwords
    #[arg(long, default_value_t = false)]
    stopwords: bool,
    /// Use tf = 1 + ln(count) instead of raw counts
    #[arg(long, default_value_t = false)]
    sublinear_tf: bool,
}

impl From<OptionArgs> for RankerOptions {
    fn from(a: OptionArgs) -> Self {
        RankerOptions {
            tokenizer: TokenizerConfig {
                min_token_len: a.min_token_len,
                remove_stopwords: a.stopwords,
                stem: a.stem,
                ..Default::default()
            },
            tf: if a.sublinear_tf { TfScheme::Sublinear } else { TfScheme::Raw },
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank { query, query_file, candidates, k, output, options } => {
            let query = match (query, query_file) {
                (Some(q), _) => q,
                (None, Some(path)) => read_text(&path)?,
                (None, None) => bail!("one of --query or --query-file is required"),
            };
            run_rank(&query, &candidates, k, output, options.into())
        }
        Commands::Show { report } => show_report(&report),
    }
}

fn run_rank(query: &str, candidates: &Path, k: i64, output: Option<PathBuf>, options: RankerOptions) -> Result<()> {
    let candidates = collect_candidates(candidates)?;
    let ranker = Ranker::new(options);
    let results = ranker.rank(query, &candidates, k)?;
    tracing::info!(total_candidates = candidates.len(), returned = results.len(), "ranking complete");

    print!("{}", format_table(&results));

    if let Some(path) = output {
        let report = RankReport::new(k, candidates.len(), ranker.options(), results);
        save_report(&path, &report)?;
        tracing::info!(output = %path.display(), "report written");
    }
    Ok(())
}

fn show_report(path: &Path) -> Result<()> {
    let report = load_report(path).with_context(|| format!("loading report {}", path.display()))?;
    print!("{}", format_summary(&report));
    print!("{}", format_table(&report.results));
    Ok(())
}
