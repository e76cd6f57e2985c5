use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use configuration::{ServerOverrides, Settings};
use core_types::{Strategy, StrategyStatus};
use database::StrategyRepository;
use std::path::PathBuf;

/// The main entry point for the QuantFlow strategy server.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = configuration::load_config(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(overrides) => {
            overrides.apply(&mut settings.server);
            settings.validate()?;
            web_server::run_server(settings).await
        }
        Commands::List { status } => handle_list(&settings, status).await,
        Commands::Show { id } => handle_show(&settings, &id).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Manage and serve user-authored trading strategies.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve(ServerOverrides),
    /// Print stored strategies as a table.
    List {
        /// Only show strategies in this status (stopped, running, scheduled, error).
        #[arg(long)]
        status: Option<StrategyStatus>,
    },
    /// Print one stored strategy as JSON.
    Show {
        /// The strategy id.
        id: String,
    },
}

// ==============================================================================
// Offline Commands
// ==============================================================================

/// Reads the store directly. An empty store is seeded, exactly as on server startup.
async fn load_strategies(settings: &Settings) -> Result<Vec<Strategy>> {
    let repository = StrategyRepository::new(settings.storage.file_path());
    repository
        .load()
        .await
        .with_context(|| format!("failed to read strategy store {}", repository.path().display()))
}

/// Keeps the strategies matching `status`, or all of them when no filter is given.
fn filter_by_status(strategies: Vec<Strategy>, status: Option<StrategyStatus>) -> Vec<Strategy> {
    match status {
        Some(status) => strategies.into_iter().filter(|s| s.status == status).collect(),
        None => strategies,
    }
}

async fn handle_list(settings: &Settings, status: Option<StrategyStatus>) -> Result<()> {
    let strategies = filter_by_status(load_strategies(settings).await?, status);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Name", "Status", "Schedule", "PnL", "Last Run", "Created"]);

    for strategy in &strategies {
        let schedule = if strategy.schedule_enabled {
            format!(
                "{} - {}",
                strategy.start_time.as_deref().unwrap_or("?"),
                strategy.end_time.as_deref().unwrap_or("?")
            )
        } else {
            "off".to_string()
        };
        let last_run = strategy
            .last_run
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            strategy.id.clone(),
            strategy.name.clone(),
            strategy.status.to_string(),
            schedule,
            strategy.pnl.to_string(),
            last_run,
            strategy.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!("{table}");
    println!("{} strategies", strategies.len());
    Ok(())
}

async fn handle_show(settings: &Settings, id: &str) -> Result<()> {
    let strategies = load_strategies(settings).await?;
    let Some(strategy) = strategies.iter().find(|s| s.id == id) else {
        bail!("strategy not found: {id}");
    };
    println!("{}", serde_json::to_string_pretty(strategy)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy(id: &str, status: StrategyStatus) -> Strategy {
        let mut strategy = Strategy::new(
            id.to_string(),
            id.to_string(),
            String::new(),
            String::new(),
            chrono::Utc::now(),
        );
        strategy.status = status;
        strategy
    }

    #[test]
    fn list_parses_status_filter() {
        let cli = Cli::try_parse_from(["quantflow", "list", "--status", "scheduled"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::List { status: Some(StrategyStatus::Scheduled) }
        ));
        assert!(Cli::try_parse_from(["quantflow", "list", "--status", "paused"]).is_err());
    }

    #[test]
    fn filter_keeps_matching_status_only() {
        let all = vec![
            strategy("a", StrategyStatus::Running),
            strategy("b", StrategyStatus::Stopped),
            strategy("c", StrategyStatus::Running),
        ];

        let running = filter_by_status(all.clone(), Some(StrategyStatus::Running));
        let ids: Vec<_> = running.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        assert_eq!(filter_by_status(all.clone(), None), all);
    }
}
