//! Command line client for the job order relay.
//!
//! `submit` posts a job order with optional photos. `watch` follows the live
//! visitor count and reconnects on disconnection (max 5 attempts with 5 second
//! interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin jobrelay-client -- submit --name "Jane Doe" --issue "No power" --photo broken.jpg
//! cargo run --bin jobrelay-client -- watch --url http://127.0.0.1:3000
//! ```

use clap::{Parser, Subcommand};
use jobrelay_client::{
    domain::websocket_url,
    error::ClientError,
    formatter::MessageFormatter,
    submit::{JobOrderDraft, submit_job_order},
    watch::run_watch,
};
use jobrelay_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "jobrelay-client")]
#[command(about = "Submit job orders and watch the live visitor count", long_about = None)]
struct Args {
    /// Relay base URL
    #[arg(short = 'u', long, global = true, default_value = "http://127.0.0.1:3000")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a job order
    Submit(JobOrderDraft),
    /// Follow the live visitor count
    Watch {
        /// Exit after this many updates
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
}

async fn run(args: Args) -> Result<(), ClientError> {
    match args.command {
        Command::Submit(draft) => {
            let client = reqwest::Client::new();
            let response = submit_job_order(&client, &args.url, &draft).await?;
            println!("{}", MessageFormatter::format_submission(&response));
            Ok(())
        }
        Command::Watch { count } => run_watch(websocket_url(&args.url)?, count).await,
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run(args).await {
        if let ClientError::Rejected {
            details: Some(details),
            ..
        } = &e
        {
            tracing::error!("Details: {}", details);
        }
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
