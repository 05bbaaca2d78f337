use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;
use tokio::sync::OnceCell;

use johnson_bot::commands::handlers::builtin_commands;
use johnson_bot::commands::{CommandContext, CommandManifest, CommandRegistry, Dispatcher, Messenger};
use johnson_bot::core::Config;
use johnson_bot::platform::{incoming_from_serenity, DiscordPlatform};

struct Handler {
    config: Config,
    registry: Arc<CommandRegistry>,
    dispatcher: OnceCell<Arc<Dispatcher>>,
}

impl Handler {
    fn new(config: Config, registry: CommandRegistry) -> Self {
        Handler {
            config,
            registry: Arc::new(registry),
            dispatcher: OnceCell::new(),
        }
    }

    /// Built on first use so the platform can share the gateway's HTTP client
    async fn dispatcher(&self, ctx: &Context) -> Arc<Dispatcher> {
        self.dispatcher
            .get_or_init(|| async {
                let platform = Arc::new(DiscordPlatform::new(ctx.http.clone()));
                let messenger = Messenger::new(platform, self.config.delete_after());
                let command_ctx = CommandContext::new(messenger, self.config.prefix.clone());
                Arc::new(Dispatcher::new(self.registry.clone(), Arc::new(command_ctx)))
            })
            .await
            .clone()
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot || !msg.content.starts_with(&self.config.prefix) {
            return;
        }

        let dispatcher = self.dispatcher(&ctx).await;
        let incoming = incoming_from_serenity(&ctx, &msg).await;

        // One task per message; invocations never wait on each other
        tokio::spawn(async move {
            dispatcher.handle(&incoming).await;
        });
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        if let Some(shard) = ready.shard {
            info!("⚡ Shard: {}/{}", shard[0] + 1, shard[1]);
        }

        info!(
            "⌨️ Listening for '{}' commands: {}",
            self.config.prefix,
            self.registry.command_names().collect::<Vec<_>>().join(", ")
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Johnson Bot...");

    let entries = builtin_commands(&config);
    let entries = match CommandManifest::load_optional(&config.manifest_path) {
        Ok(Some(manifest)) => {
            info!("📄 Loaded command manifest from {}", config.manifest_path);
            manifest.select(entries)
        }
        Ok(None) => {
            info!(
                "📄 No command manifest at {} - loading all built-in commands",
                config.manifest_path
            );
            entries
        }
        Err(e) => {
            error!("❌ Failed to load command manifest {}: {e:#}", config.manifest_path);
            return Err(e);
        }
    };

    let registry = CommandRegistry::load(entries);
    if registry.is_empty() {
        anyhow::bail!("No commands loaded, refusing to start");
    }

    match config.delete_after() {
        Some(delay) => info!("🧹 Deletable notices removed after {}ms", delay.as_millis()),
        None => info!("🧹 Auto-delete of notices disabled"),
    }

    let token = config.discord_token.clone();
    let handler = Handler::new(config, registry);

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    // Build the Discord client with proper gateway configuration
    let mut client = Client::builder(&token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            error!("This could indicate:");
            error!("  - Invalid bot token format");
            error!("  - Network issues reaching Discord API");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        error!("This could be due to:");
        error!("  - Invalid bot token");
        error!("  - Network connectivity issues");
        error!("  - Discord API outage");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
