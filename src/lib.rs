pub mod bot;
pub mod cli;
pub mod core;
pub mod providers;

use crate::bot::{CurrencyBot, Reply};
use crate::core::ConversionService;
use crate::core::config::{AppConfig, ListMode};
use crate::providers::OpenErApiProvider;
use anyhow::Result;
use tracing::{debug, info};

/// How `List` should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutput {
    /// Use the configured mode.
    Configured,
    Mode(ListMode),
    Table,
}

pub enum AppCommand {
    /// `<amount> <from> <to>` as typed, validated by the bot.
    Convert(String),
    List(ListOutput),
    Shell,
}

pub fn build_bot(config: &AppConfig) -> CurrencyBot<OpenErApiProvider> {
    let provider = OpenErApiProvider::new(&config.provider.base_url);
    let service = ConversionService::new(provider).with_max_age(config.cache.max_age());
    CurrencyBot::new(service, config.listing.mode)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let bot = build_bot(&config);

    match command {
        AppCommand::Convert(args) => {
            let reply = bot.currency(&args).await;
            println!("{}", cli::ui::render_reply(&reply));
        }
        AppCommand::List(ListOutput::Configured) => {
            let reply = bot.currency_list(None).await;
            println!("{}", cli::ui::render_reply(&reply));
        }
        AppCommand::List(ListOutput::Mode(mode)) => {
            let reply = bot.currency_list(Some(mode)).await;
            println!("{}", cli::ui::render_reply(&reply));
        }
        AppCommand::List(ListOutput::Table) => match bot.currency_list(Some(ListMode::Grouped)).await
        {
            Reply::ByRegion(listing) => {
                println!(
                    "Currencies from {} rates",
                    cli::ui::style_text(&listing.base, cli::ui::StyleType::Title)
                );
                println!("{}", cli::ui::listing_table(&listing));
            }
            reply => println!("{}", cli::ui::render_reply(&reply)),
        },
        AppCommand::Shell => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            cli::shell::run(&bot, stdin, tokio::io::stdout()).await?;
        }
    }

    Ok(())
}
