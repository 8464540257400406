use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "arcade")]
#[command(about = "Arcade Progress - points, items, companions and a leaderboard")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.arcade/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Player name (defaults to [player] name in the config)
    #[arg(short, long, global = true)]
    player: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default ~/.arcade/config.toml
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show points, inventory, companion and achievements
    Profile,

    /// Report a mini-game win (guess, rps, hangman, code-breaker, descramble, treasure)
    Win { game: String },

    /// Award raw points; zero or negative amounts break the streak
    Award {
        #[arg(allow_hyphen_values = true)]
        amount: i64,

        #[arg(long, default_value = "manual award")]
        reason: String,
    },

    /// Use a consumable (hint, code-hint, retry)
    Use { item: String },

    /// Spend a companion boost for +10 companion XP
    Boost,

    /// Pet the companion (+1 XP)
    Pet,

    /// List items for sale
    Shop,

    /// Buy an item (egg, hat, hint, code-hint, retry, boost)
    Buy { item: String },

    /// Show the top players
    Leaderboard {
        /// Number of rows (defaults to [leaderboard] size)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Show the player's rank
    Rank,

    /// End the running session (win counters and streak start over)
    End,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { force } => {
            cli::init::init_command(cli.config, force)?;
        }
        command => {
            let config = arcade_progress::config::Config::load(cli.config.as_deref())?;
            let ctx = cli::Context::new(config, cli.player);
            run(command, &ctx)?;
        }
    }

    Ok(())
}

fn run(command: Commands, ctx: &cli::Context) -> Result<()> {
    match command {
        Commands::Init { .. } => {}
        Commands::Profile => cli::profile::profile_command(ctx)?,
        Commands::Win { game } => cli::play::win_command(ctx, &game)?,
        Commands::Award { amount, reason } => cli::play::award_command(ctx, amount, &reason)?,
        Commands::Use { item } => cli::play::use_command(ctx, &item)?,
        Commands::Boost => cli::play::boost_command(ctx)?,
        Commands::Pet => cli::play::pet_command(ctx)?,
        Commands::Shop => cli::shop::shop_command(),
        Commands::Buy { item } => cli::shop::buy_command(ctx, &item)?,
        Commands::Leaderboard { top } => cli::leaderboard::leaderboard_command(ctx, top)?,
        Commands::Rank => cli::leaderboard::rank_command(ctx)?,
        Commands::End => cli::play::end_command(ctx)?,
    }
    Ok(())
}
