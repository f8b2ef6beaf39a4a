//! Bot runtime
//!
//! A [`StateBot`] runs in one of two modes chosen at construction:
//! stateful bots consume inbound updates and dispatch them by user state,
//! stateless bots only push outbound messages triggered by external logic.

pub mod runner;

use std::path::Path;
use std::sync::Arc;
use teloxide::{Bot, prelude::*};
use tracing::info;
use crate::config::{validation::validate_bot_config, BotConfig, UploadsConfig};
use crate::gateway::{ChannelRouted, FormatMode, MediaKind, OutboundGateway, TelegramGateway};
use crate::handlers::StateHandler;
use crate::middleware::OwnerFilter;
use crate::state::{StateManager, StateStore, UserState};
use crate::transport::{TelegramPolling, UpdateSource};
use crate::utils::errors::{ChatFlowError, Result};

pub use runner::{LoopStats, UpdateLoop};

/// Capabilities handed to state handlers
#[derive(Clone)]
pub struct BotContext {
    gateway: Arc<dyn OutboundGateway>,
    store: Arc<StateStore>,
}

impl BotContext {
    pub fn new(gateway: Arc<dyn OutboundGateway>, store: Arc<StateStore>) -> Self {
        Self { gateway, store }
    }

    pub fn gateway(&self) -> &Arc<dyn OutboundGateway> {
        &self.gateway
    }

    pub async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        self.gateway.send_text(chat_id, text).await
    }

    pub async fn send_rich_text(&self, chat_id: i64, text: &str, mode: FormatMode) -> Result<()> {
        self.gateway.send_rich_text(chat_id, text, mode).await
    }

    pub async fn send_media(&self, chat_id: i64, kind: MediaKind, path: impl AsRef<Path>, caption: Option<&str>) -> Result<()> {
        self.gateway.send_media(chat_id, kind, path.as_ref(), caption).await
    }

    pub async fn send_keyboard<S: AsRef<str>>(&self, chat_id: i64, text: &str, buttons: &[S]) -> Result<()> {
        let buttons: Vec<String> = buttons.iter().map(|b| b.as_ref().to_string()).collect();
        self.gateway.send_keyboard(chat_id, text, &buttons).await
    }

    /// Current state of a user
    pub fn get_state(&self, user_id: i64) -> UserState {
        self.store.get(user_id)
    }

    /// Move a user to another state
    pub fn set_state(&self, user_id: i64, state: impl Into<String>) -> Result<()> {
        self.store.set(user_id, state)
    }
}

impl std::fmt::Debug for BotContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotContext")
            .field("tracked_users", &self.store.len())
            .finish_non_exhaustive()
    }
}

/// Operating mode of a bot instance
#[derive(Debug, Clone)]
pub enum BotMode {
    /// Consumes inbound updates and dispatches them by user state
    Stateful(StateManager),
    /// Outbound only
    Stateless,
}

/// A configured bot instance
#[derive(Clone)]
pub struct StateBot {
    telegram: Option<Bot>,
    gateway: Arc<dyn OutboundGateway>,
    mode: BotMode,
    owner_filter: OwnerFilter,
    config: BotConfig,
}

impl StateBot {
    /// Connect to Telegram, verifying the credential with `getMe`.
    ///
    /// Fails fast on an empty or rejected token.
    pub async fn connect(config: BotConfig, uploads: &UploadsConfig) -> Result<Self> {
        validate_bot_config(&config)?;

        let mut bot = Bot::new(config.token.clone());
        if let Some(ref api_url) = config.api_url {
            let url = url::Url::parse(api_url)
                .map_err(|e| ChatFlowError::Config(format!("Invalid Bot API URL '{}': {}", api_url, e)))?;
            bot = bot.set_api_url(url);
        }

        let me = bot.get_me().await?;
        info!(
            username = ?me.user.username,
            use_state = config.use_state,
            "Authorized on Telegram"
        );

        let gateway = TelegramGateway::new(bot.clone(), &uploads.dir);
        Ok(Self::build(Some(bot), config, Arc::new(gateway)))
    }

    /// Build a bot over a custom gateway without a Telegram transport.
    ///
    /// Inbound messages must then be fed with [`StateBot::run`].
    pub fn with_gateway(config: BotConfig, gateway: Arc<dyn OutboundGateway>) -> Self {
        Self::build(None, config, gateway)
    }

    fn build(telegram: Option<Bot>, config: BotConfig, gateway: Arc<dyn OutboundGateway>) -> Self {
        let gateway: Arc<dyn OutboundGateway> = Arc::new(ChannelRouted::new(gateway, config.channel_id));
        let mode = if config.use_state {
            BotMode::Stateful(StateManager::new())
        } else {
            BotMode::Stateless
        };

        Self {
            telegram,
            gateway,
            mode,
            owner_filter: OwnerFilter::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn mode(&self) -> &BotMode {
        &self.mode
    }

    pub fn is_stateful(&self) -> bool {
        matches!(self.mode, BotMode::Stateful(_))
    }

    pub fn owner_filter(&self) -> OwnerFilter {
        self.owner_filter
    }

    /// Outbound gateway, with the channel override applied
    pub fn gateway(&self) -> &Arc<dyn OutboundGateway> {
        &self.gateway
    }

    /// State manager of a stateful bot
    pub fn state_manager(&self) -> Result<&StateManager> {
        match &self.mode {
            BotMode::Stateful(manager) => Ok(manager),
            BotMode::Stateless => Err(ChatFlowError::StatelessMode),
        }
    }

    /// Bind a handler to a state
    pub fn register_state<H>(&self, state: impl Into<String>, handler: H) -> Result<()>
    where
        H: StateHandler + 'static,
    {
        self.state_manager()?.register_state(state, handler);
        Ok(())
    }

    pub fn get_state(&self, user_id: i64) -> Result<UserState> {
        Ok(self.state_manager()?.get_state(user_id))
    }

    pub fn set_state(&self, user_id: i64, state: impl Into<String>) -> Result<()> {
        self.state_manager()?.set_state(user_id, state)
    }

    /// Context handed to handlers; also usable by external logic
    pub fn context(&self) -> Result<BotContext> {
        let manager = self.state_manager()?;
        Ok(BotContext::new(self.gateway.clone(), manager.store().clone()))
    }

    pub async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        self.gateway.send_text(chat_id, text).await
    }

    pub async fn send_rich_text(&self, chat_id: i64, text: &str, mode: FormatMode) -> Result<()> {
        self.gateway.send_rich_text(chat_id, text, mode).await
    }

    pub async fn send_media(&self, chat_id: i64, kind: MediaKind, path: impl AsRef<Path>, caption: Option<&str>) -> Result<()> {
        self.gateway.send_media(chat_id, kind, path.as_ref(), caption).await
    }

    pub async fn send_keyboard<S: AsRef<str>>(&self, chat_id: i64, text: &str, buttons: &[S]) -> Result<()> {
        let buttons: Vec<String> = buttons.iter().map(|b| b.as_ref().to_string()).collect();
        self.gateway.send_keyboard(chat_id, text, &buttons).await
    }

    /// Start the bot on Telegram long polling.
    ///
    /// A stateful bot blocks the calling task while updates keep coming; a
    /// stateless bot returns immediately.
    pub async fn start(&self) -> Result<LoopStats> {
        if !self.is_stateful() {
            return self.run(NoUpdates).await;
        }

        let bot = self.telegram.clone().ok_or_else(|| {
            ChatFlowError::InvalidInput("Bot has no Telegram transport; feed it with run()".to_string())
        })?;
        self.run(TelegramPolling::new(bot, self.config.polling_timeout)).await
    }

    /// Run the update loop over any message source
    pub async fn run<S: UpdateSource>(&self, source: S) -> Result<LoopStats> {
        let manager = match &self.mode {
            BotMode::Stateful(manager) => manager.clone(),
            BotMode::Stateless => {
                info!("Bot started in stateless mode. Ready to send updates.");
                return Ok(LoopStats::default());
            }
        };

        let update_loop = UpdateLoop::new(manager, self.gateway.clone(), self.owner_filter)
            .with_debug(self.config.debug);
        Ok(update_loop.run(source).await)
    }
}

impl std::fmt::Debug for StateBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateBot")
            .field("mode", &self.mode)
            .field("owner_filter", &self.owner_filter)
            .field("channel_id", &self.config.channel_id)
            .field("telegram", &self.telegram.is_some())
            .finish()
    }
}

/// Source used by stateless bots; never read
struct NoUpdates;

#[async_trait::async_trait]
impl UpdateSource for NoUpdates {
    async fn next_message(&mut self) -> Option<crate::transport::IncomingMessage> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::gateway::MemoryGateway;

    fn config(use_state: bool, channel_id: i64) -> BotConfig {
        BotConfig {
            token: "12345:test_token".to_string(),
            use_state,
            channel_id,
            ..BotConfig::default()
        }
    }

    #[tokio::test]
    async fn test_stateless_bot_rejects_state_operations() {
        let bot = StateBot::with_gateway(config(false, 0), Arc::new(MemoryGateway::new()));

        assert!(!bot.is_stateful());
        assert_matches!(bot.get_state(1), Err(ChatFlowError::StatelessMode));
        assert_matches!(bot.set_state(1, "x"), Err(ChatFlowError::StatelessMode));
        assert_matches!(bot.context(), Err(ChatFlowError::StatelessMode));

        let stats = bot.start().await.unwrap();
        assert_eq!(stats, LoopStats::default());
    }

    #[tokio::test]
    async fn test_channel_override_applies_to_bot_sends() {
        let gateway = Arc::new(MemoryGateway::new());
        let bot = StateBot::with_gateway(config(false, -100123), gateway.clone());

        bot.send_text(42, "hi").await.unwrap();

        assert_eq!(gateway.sent().await[0].chat_id(), -100123);
    }

    #[tokio::test]
    async fn test_stateful_bot_without_transport_cannot_poll() {
        let bot = StateBot::with_gateway(config(true, 0), Arc::new(MemoryGateway::new()));
        assert_matches!(bot.start().await, Err(ChatFlowError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_connect_rejects_empty_token() {
        let result = StateBot::connect(BotConfig::default(), &UploadsConfig::default()).await;
        assert_matches!(result, Err(ChatFlowError::Config(_)));
    }
}
