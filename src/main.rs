use anyhow::Result;
use clap::{App as Cli, Arg};
use venue_tui::app::App;
use venue_tui::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("api-url")
                .long("api-url")
                .value_name("URL")
                .help("Overrides the venue backend URL")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("chat-url")
                .long("chat-url")
                .value_name("URL")
                .help("Overrides the chat assistant URL")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(api_url) = matches.value_of("api-url") {
        config.api_url = api_url.to_string();
    }
    if let Some(chat_url) = matches.value_of("chat-url") {
        config.chat_url = chat_url.to_string();
    }
    config.validate()?;
    App::start(config).await?;
    Ok(())
}
