use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use skinstric::config::ReviewConfig;
use skinstric::error::SkResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "skinstric-cache.json")]
    cache: String,

    /// JSON file with review settings; explicit flags still win.
    #[arg(global = true, long)]
    settings: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Review(cmd::review::ReviewArgs),
    Inspect(cmd::inspect::InspectArgs),
    Intake(cmd::intake::IntakeArgs),
    Store(cmd::store::StoreArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli, &matches) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli, matches: &ArgMatches) -> SkResult<()> {
    match &cli.command {
        Commands::Review(args) => {
            let sub = matches.subcommand_matches("review");
            let config = resolve_config(cli, &args.config, sub)?;
            cmd::review::run(args, &cli.cache, &config)
        }
        Commands::Inspect(args) => {
            let sub = matches.subcommand_matches("inspect");
            let config = resolve_config(cli, &args.config, sub)?;
            cmd::inspect::run(args, &config)
        }
        Commands::Intake(args) => cmd::intake::run(args, &cli.cache),
        Commands::Store(args) => cmd::store::run(args, &cli.cache),
    }
}

/// Settings file as the base, explicit command-line values on top.
fn resolve_config(
    cli: &Cli,
    from_cli: &ReviewConfig,
    sub_matches: Option<&ArgMatches>,
) -> SkResult<ReviewConfig> {
    let Some(path) = &cli.settings else {
        return Ok(from_cli.clone());
    };

    info!("Loading settings from: {}", path);
    let mut config = ReviewConfig::load_from_file(path)?;
    if let Some(sub) = sub_matches {
        config.merge_from_cli(from_cli, sub);
    }
    Ok(config)
}
