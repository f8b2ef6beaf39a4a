//! ChatFlow Telegram Bot
//!
//! Demo entry point: a stateful bot running the greeting conversation, and a
//! stateless bot pushing a startup notice to the configured channel.

use tracing::{info, error};

use ChatFlow::{
    config::{BotConfig, Settings},
    handlers::register_greeting_flow,
    utils::logging,
    StateBot,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging, settings.bot.debug)?;

    info!("Starting {}...", ChatFlow::info());

    // Stateful bot answering users by conversation state
    let stateful_config = BotConfig {
        use_state: true,
        ..settings.bot.clone()
    };
    let stateful_bot = StateBot::connect(stateful_config, &settings.uploads).await?;
    register_greeting_flow(&stateful_bot)?;

    let runner = stateful_bot.clone();
    let mut update_loop = tokio::spawn(async move { runner.start().await });

    // Stateless bot used only to push messages
    let stateless_config = BotConfig {
        use_state: false,
        owner_id: 0,
        answer_only_to_owner: false,
        ..settings.bot.clone()
    };
    let stateless_bot = StateBot::connect(stateless_config, &settings.uploads).await?;
    stateless_bot.start().await?;

    if let Err(e) = stateless_bot.send_text(0, "This is a test log message.").await {
        error!(error = %e, "Error sending log message");
    }

    info!("ChatFlow bot is ready!");

    tokio::select! {
        result = &mut update_loop => {
            match result {
                Ok(Ok(stats)) => info!(?stats, "Update loop finished"),
                Ok(Err(e)) => error!(error = %e, "Update loop failed"),
                Err(e) => error!(error = %e, "Update loop task aborted"),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl-C, shutting down");
            update_loop.abort();
        }
    }

    info!("ChatFlow bot has been shut down.");

    Ok(())
}
