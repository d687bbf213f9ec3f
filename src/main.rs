use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use showtime_bot::fandango::FandangoClient;
use showtime_bot::omdb::OmdbClient;
use showtime_bot::router;

/// Answer one SMS-style movie command and print the reply.
#[derive(Parser, Debug)]
#[command(about = "Answer one SMS-style movie command and print the reply")]
struct Cli {
    /// Message body, e.g. `info alien` or `showtimes alien 97211`.
    #[arg(required = true)]
    body: Vec<String>,

    /// OMDb API key; defaults to the OMDB_API_KEY environment variable.
    #[arg(long)]
    api_key: Option<String>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "showtime_bot=debug,info"
    } else {
        "showtime_bot=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let api_key = match cli
        .api_key
        .or_else(|| std::env::var("OMDB_API_KEY").ok())
    {
        Some(key) => key,
        None => {
            eprintln!("missing OMDb API key: pass --api-key or set OMDB_API_KEY");
            std::process::exit(2);
        }
    };

    // One fetch per command; the timeout bounds the only blocking call.
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;
    let omdb = OmdbClient::new(client.clone(), api_key);
    let fandango = FandangoClient::new(client);

    let body = cli.body.join(" ");
    tracing::debug!(%body, "handling inbound message");
    let reply = router::handle_message(&body, &omdb, &fandango).await;
    println!("{reply}");

    Ok(())
}
