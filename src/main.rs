//! swipedeck - Swipeable Carousel in the Terminal
//!
//! Drag cards with the mouse or step through them with the arrow keys.

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::info;
use swipedeck::{CarouselConfig, ConfigProfile};

fn cli() -> Command {
    let command = Command::new("swipedeck")
        .version(swipedeck::VERSION)
        .about("A swipeable card carousel for the terminal")
        .long_about(
            "swipedeck shows a deck of cards you can swipe through with mouse drags, \
             flicks, the arrow keys or direct jumps, with transition locking and rate limiting.",
        )
        .arg(
            Arg::new("items")
                .short('n')
                .long("items")
                .help("Number of cards when no titles are given")
                .value_parser(clap::value_parser!(usize))
                .default_value("6"),
        )
        .arg(
            Arg::new("title")
                .short('t')
                .long("title")
                .help("Card title (repeat for each card)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("profile")
                .short('p')
                .long("profile")
                .help("Tuning profile: standard, touch or compact")
                .value_parser(clap::value_parser!(String)),
        );

    #[cfg(feature = "config")]
    let command = command.arg(
        Arg::new("config")
            .short('c')
            .long("config")
            .help("Path to a TOML configuration file")
            .value_parser(clap::value_parser!(std::path::PathBuf)),
    );

    command
}

fn card_titles(matches: &ArgMatches) -> Vec<String> {
    match matches.get_many::<String>("title") {
        Some(titles) => titles.cloned().collect(),
        None => {
            let count = matches.get_one::<usize>("items").copied().unwrap_or(6);
            (1..=count).map(|i| format!("Card {i}")).collect()
        }
    }
}

fn resolve_config(matches: &ArgMatches) -> Result<CarouselConfig> {
    if let Some(config) = config_file(matches)? {
        return Ok(config);
    }

    if let Some(name) = matches.get_one::<String>("profile") {
        let profile: ConfigProfile = name.parse()?;
        info!("using {profile} profile");
        return Ok(profile.config());
    }

    fallback_config()
}

#[cfg(feature = "config")]
fn config_file(matches: &ArgMatches) -> Result<Option<CarouselConfig>> {
    match matches.get_one::<std::path::PathBuf>("config") {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            Ok(Some(CarouselConfig::load_from_path(path)?))
        }
        None => Ok(None),
    }
}

#[cfg(not(feature = "config"))]
fn config_file(_matches: &ArgMatches) -> Result<Option<CarouselConfig>> {
    Ok(None)
}

#[cfg(feature = "config")]
fn fallback_config() -> Result<CarouselConfig> {
    Ok(CarouselConfig::load_default()?)
}

#[cfg(not(feature = "config"))]
fn fallback_config() -> Result<CarouselConfig> {
    Ok(ConfigProfile::default().config())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG controls verbosity
    env_logger::init();

    let matches = cli().get_matches();
    let titles = card_titles(&matches);
    if titles.is_empty() {
        anyhow::bail!("at least one card is required");
    }
    let config = resolve_config(&matches)?;

    // Initialize the Application and start the interactive event loop
    use swipedeck::render::ui::TerminalUI;
    use swipedeck::Application;

    let ui_renderer = Box::new(TerminalUI::new()?);
    let mut app = Application::new(titles, config, ui_renderer)?;

    app.run().await?;

    Ok(())
}
