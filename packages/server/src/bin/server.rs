//! Job order relay server.
//!
//! Accepts job order requests over HTTP and forwards them to a Telegram chat.
//! Connected WebSocket clients receive the visitor count whenever someone
//! opens the page.
//!
//! Run with:
//! ```not_rust
//! TELEGRAM_BOT_TOKEN=... TELEGRAM_CHAT_ID=... cargo run --bin jobrelay-server
//! cargo run --bin jobrelay-server -- --host 127.0.0.1 --port 8080
//! ```

use std::sync::Arc;

use clap::Parser;
use jobrelay_server::{
    config::{CONFIG_ERROR_EXIT_CODE, Cli, RelayConfig},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::FileVisitorCounter,
        telegram::TelegramNotifier,
    },
    ui::Server,
    usecase::{
        ConnectVisitorUseCase, DisconnectVisitorUseCase, GetVisitorCountUseCase,
        SubmitJobOrderUseCase,
    },
};
use jobrelay_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = match RelayConfig::try_from(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(CONFIG_ERROR_EXIT_CODE);
        }
    };
    tracing::debug!("{:?}", config);

    // Initialize dependencies in order:
    // 1. Counter
    // 2. Notifier
    // 3. MessagePusher
    // 4. UseCases
    // 5. Server

    // 1. Load the persisted visitor count
    let counter = Arc::new(FileVisitorCounter::load(&config.counter_file).await);

    // 2. Create Notifier (Telegram Bot API)
    let notifier = match TelegramNotifier::with_timeout(
        &config.api_base,
        &config.bot_token,
        &config.chat_id,
        config.upstream_timeout,
    ) {
        Ok(notifier) => Arc::new(notifier),
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    // 3. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 4. Create UseCases
    let submit_job_order_usecase = Arc::new(SubmitJobOrderUseCase::new(
        notifier,
        Arc::new(SystemClock),
    ));
    let connect_visitor_usecase = Arc::new(ConnectVisitorUseCase::new(
        counter.clone(),
        message_pusher.clone(),
    ));
    let disconnect_visitor_usecase = Arc::new(DisconnectVisitorUseCase::new(message_pusher));
    let get_visitor_count_usecase = Arc::new(GetVisitorCountUseCase::new(counter));

    // 5. Create and run the server
    let server = Server::new(
        submit_job_order_usecase,
        connect_visitor_usecase,
        disconnect_visitor_usecase,
        get_visitor_count_usecase,
    )
    .with_max_body_bytes(config.max_body_bytes);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
