use anyhow::Result;
use axum::Router;
use clap::Parser;
use shortlist_core::{RankerOptions, TfScheme, TokenizerConfig};
use shortlist_server::{build_app, ServerConfig};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Shortlist size when a request omits `k`
    #[arg(long, default_value_t = 10)]
    default_k: i64,
    /// Reject requests with more candidates than this
    #[arg(long, default_value_t = 10_000)]
    max_candidates: usize,
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

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let options = RankerOptions {
        tokenizer: TokenizerConfig {
            min_token_len: args.min_token_len,
            remove_stopwords: args.stopwords,
            stem: args.stem,
            ..Default::default()
        },
        tf: if args.sublinear_tf { TfScheme::Sublinear } else { TfScheme::Raw },
    };
    let config = ServerConfig { options, default_k: args.default_k, max_candidates: args.max_candidates };
    let app: Router = build_app(config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
