use ::serenity::all::ClientBuilder;
use cadence::{CommandResult, Context, Data, Error};
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use songbird::SerenityInit;
use std::env;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cadence::commands::music::{
    help::*, now_playing::*, pause::*, play::*, resume::*, skip::*, stop::*,
};

#[poise::command(prefix_command, hide_in_help)]
async fn register(ctx: Context<'_>) -> CommandResult {
    poise::builtins::register_application_commands_buttons(ctx)
        .await
        .map_err(|e| e.into())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cadence=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let token = env::var("MUSIC_BOT_TOKEN").expect("Missing MUSIC_BOT_TOKEN");

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_VOICE_STATES;

    let commands = vec![
        register(),
        // Music commands
        play(),
        help(),
        skip(),
        pause(),
        resume(),
        stop(),
        now_playing(),
    ];

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands,
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("?".into()),
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(Data::new())
            })
        });

    let mut client = ClientBuilder::new(token, intents)
        .framework(framework.build())
        .register_songbird()
        .await?;

    client.start().await.map_err(Into::into)
}
