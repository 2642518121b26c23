//! Atomiq Verify CLI
//!
//! Verifies casino bets against their published VRF output, either from a
//! saved JSON document or straight from the casino API.

use atomiq_verify::{
    api::{verify_transaction, BetRecord, CasinoApiClient, InMemoryBetSource},
    config::VerifierConfig,
    errors::AtomiqResult,
    format::{format_amount, format_number, format_percentage, DisplayBet, LAMPORTS_PER_SOL},
    verification::{render_report, VerificationInput, VerificationVerdict, VrfVerifier},
};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "atomiq-verify", version)]
#[command(about = "Verify Atomiq casino bets against their VRF output", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Casino API base URL (overrides configuration)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify every bet record in a JSON document ("-" reads stdin)
    File { path: String },

    /// Fetch a bet from the API by transaction hash and verify it
    Tx { tx_hash: String },

    /// List recent bets
    Bets {
        #[arg(long, default_value = "20")]
        limit: u32,

        #[arg(long, default_value = "0")]
        offset: u32,

        /// Only bets placed by this wallet
        #[arg(long)]
        wallet: Option<String>,
    },

    /// Show casino statistics
    Stats,

    /// Check that the API server is up
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            return ExitCode::from(2);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_filter().into()),
        )
        .init();

    match run(args, config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::from(2)
        }
    }
}

fn load_config(args: &Args) -> AtomiqResult<VerifierConfig> {
    let mut config = VerifierConfig::load(args.config.as_deref())?;
    if let Some(api_url) = &args.api_url {
        config.api.base_url = api_url.clone();
        config.validate()?;
    }
    Ok(config)
}

/// Returns whether every verified bet came out `Verified`.
async fn run(args: Args, config: VerifierConfig) -> AtomiqResult<bool> {
    let verifier = VrfVerifier::new();

    match args.command {
        Command::File { path } => {
            let text = read_document(&path).await?;
            let source = InMemoryBetSource::from_json(&text)?;
            info!(records = source.bets().len(), %path, "verifying bet records");

            let mut results = Vec::with_capacity(source.bets().len());
            for bet in source.bets() {
                let verdict = verifier.verify(&VerificationInput::from(bet))?;
                results.push((bet.clone(), verdict));
            }
            print_verdicts(&results, args.json)?;
            Ok(results.iter().all(|(_, verdict)| verdict.is_verified()))
        }
        Command::Tx { tx_hash } => {
            let client = CasinoApiClient::new(&config.api)?;
            info!(base_url = client.base_url(), %tx_hash, "fetching bet");
            let (bet, verdict) = verify_transaction(&client, &verifier, &tx_hash).await?;
            let verified = verdict.is_verified();
            print_verdicts(&[(bet, verdict)], args.json)?;
            Ok(verified)
        }
        Command::Bets { limit, offset, wallet } => {
            let client = CasinoApiClient::new(&config.api)?;
            let page = client.get_bets(limit, offset, wallet.as_deref()).await?;
            let now = chrono::Utc::now().timestamp();
            let rows: Vec<DisplayBet> =
                page.bets.iter().map(|bet| DisplayBet::from_record(bet, now)).collect();

            if args.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!(
                    "📜 Bets (page {}, {} of {} total{})",
                    page.page,
                    rows.len(),
                    page.total_count,
                    if page.has_more { ", more available" } else { "" }
                );
                for row in &rows {
                    println!(
                        "   {:<14} #{:<10} {:<10} {:<6} {:>10} SOL  {}{:.4}  {}",
                        row.hash,
                        row.block,
                        row.game_type,
                        row.result,
                        format_amount(row.wagered, 4),
                        if row.is_positive { "+" } else { "-" },
                        row.net,
                        row.date
                    );
                }
            }
            Ok(true)
        }
        Command::Stats => {
            let client = CasinoApiClient::new(&config.api)?;
            let stats = client.get_stats().await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("📊 Casino Statistics");
                println!("   Current Block: {}", stats.current_block);
                println!("   Total Bets:    {}", format_number(stats.total_bets as f64));
                println!(
                    "   Wagered:       {} SOL",
                    format_amount(stats.total_wagered / LAMPORTS_PER_SOL, 2)
                );
                println!(
                    "   Won:           {} SOL",
                    format_amount(stats.total_won / LAMPORTS_PER_SOL, 2)
                );
                println!("   Gross RTP:     {}", format_percentage(stats.gross_rtp));
                println!("   House Edge:    {}", format_percentage(stats.house_edge));
            }
            Ok(true)
        }
        Command::Health => {
            let client = CasinoApiClient::new(&config.api)?;
            let body = client.health_check().await?;
            println!("{}", body.trim());
            Ok(true)
        }
    }
}

async fn read_document(path: &str) -> AtomiqResult<String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(tokio::fs::read_to_string(path).await?)
    }
}

fn print_verdicts(results: &[(BetRecord, VerificationVerdict)], json: bool) -> AtomiqResult<()> {
    if json {
        let documents: Vec<serde_json::Value> = results
            .iter()
            .map(|(bet, verdict)| {
                serde_json::json!({
                    "tx_hash": bet.tx_hash,
                    "verification": verdict,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&documents)?);
    } else {
        for (bet, verdict) in results {
            println!("{}", render_report(&VerificationInput::from(bet), verdict));
        }
    }
    Ok(())
}
