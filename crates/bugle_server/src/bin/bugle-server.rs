//! Bugle server - the on-call duty assistant.
//!
//! Serves the slash-command HTTP boundary and fires the daily duty call
//! on a working-day schedule.

use bugle_cache::TtlCache;
use bugle_chat::{ChatSender, SlackSender};
use bugle_command::{CommandRegistry, CommandTask, DutyTask, PostponedHandlerBuilder, TimelogTask};
use bugle_core::Team;
use bugle_cron::{EveryWorkingDay, Scheduler};
use bugle_notify::DutyCallJobBuilder;
use bugle_oncall::{DutyProvider, OpsGenieProvider};
use bugle_server::{AppState, Config, create_router};
use bugle_worklog::{JiraWorklogs, WorklogProvider};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Entries the shared reply cache can hold.
const CACHE_ENTRIES: usize = 256;

/// Command-line arguments for the Bugle server.
#[derive(Parser, Debug)]
#[command(name = "bugle-server")]
#[command(about = "Bugle - on-call duty assistant")]
#[command(version)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env = "BUGLE_CONFIG", default_value = "bugle.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!("Starting Bugle server");
    info!(config_file = ?args.config, "Loading configuration");

    let config = Config::from_file(&args.config)?;
    let call_time = config.call_time()?;
    let team = Team::new(config.team().clone());

    let mut slack = SlackSender::new(config.chat().token().clone());
    if let Some(base_url) = config.chat().base_url() {
        slack = slack.with_base_url(base_url.clone());
    }
    let sender: Arc<dyn ChatSender> = Arc::new(slack);

    let mut opsgenie = OpsGenieProvider::new(config.oncall().api_key().clone());
    if let Some(base_url) = config.oncall().base_url() {
        opsgenie = opsgenie.with_base_url(base_url.clone());
    }
    let provider: Arc<dyn DutyProvider> = Arc::new(opsgenie);

    let worklogs: Arc<dyn WorklogProvider> = Arc::new(JiraWorklogs::new(
        config.tracker().base_url().clone(),
        config.tracker().token().clone(),
    ));

    // One cache shared by every command; fingerprints keep entries apart.
    let cache = Arc::new(TtlCache::new(CACHE_ENTRIES));

    let duty_settings = config.commands().duty();
    let duty = PostponedHandlerBuilder::default()
        .task(Arc::new(DutyTask::new(
            provider.clone(),
            config.oncall().schedule_id().clone(),
        )) as Arc<dyn CommandTask>)
        .token(duty_settings.token().clone())
        .cache(cache.clone())
        .ttl(Duration::from_secs(*duty_settings.cache_ttl_secs()))
        .sender(sender.clone())
        .fallback_channel(config.chat().broadcast_channel().clone())
        .build()?;

    let timelog_settings = config.commands().timelogs();
    let timelogs = PostponedHandlerBuilder::default()
        .task(Arc::new(TimelogTask::new(
            worklogs.clone(),
            team.clone(),
            *timelog_settings.minimum_minutes(),
        )) as Arc<dyn CommandTask>)
        .token(timelog_settings.token().clone())
        .cache(cache.clone())
        .ttl(Duration::from_secs(*timelog_settings.cache_ttl_secs()))
        .sender(sender.clone())
        .fallback_channel(config.chat().broadcast_channel().clone())
        .build()?;

    let mut registry = CommandRegistry::new();
    registry.register("duty", Arc::new(duty))?;
    registry.register("timelogs", Arc::new(timelogs))?;

    let duty_call = DutyCallJobBuilder::default()
        .provider(provider.clone())
        .sender(sender.clone())
        .team(team)
        .schedule_id(config.oncall().schedule_id().clone())
        .broadcast_channel(config.chat().broadcast_channel().clone())
        .build()?;

    let mut scheduler = Scheduler::new();
    scheduler.add_job(Box::new(EveryWorkingDay::new(call_time)), Arc::new(duty_call));
    info!(daily_call_time = %call_time, "Scheduler configured");
    tokio::spawn(scheduler.run());

    let app = create_router(AppState::new(Arc::new(registry)));
    let addr = format!("{}:{}", config.server().host(), config.server().port());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Bugle server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Bugle server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    info!("Shutdown signal received, stopping gracefully");
}
