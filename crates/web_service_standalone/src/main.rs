use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Branching chat relay server.
#[derive(Parser, Debug)]
#[command(about = "Serves the branching chat front-end and LLM relay")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "APP_PORT", default_value_t = 3000)]
    port: u16,

    /// Directory holding persisted settings.
    #[arg(long, env = "APP_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Directory of static front-end assets.
    #[arg(long, env = "APP_STATIC_DIR", default_value = "public")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();

    let args = Args::parse();

    tracing::info!("Starting standalone web service...");

    if let Err(e) = web_service::server::run(args.data_dir, args.static_dir, args.port).await {
        tracing::error!("Failed to run web service: {}", e);
        std::process::exit(1);
    }
}
