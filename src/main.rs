use std::io::IsTerminal;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use dropout_dashboard::config::{ConfigError, DashboardConfig};
use dropout_dashboard::net::api::{DashboardApi, HttpDashboardApi};
use dropout_dashboard::net::types::ApiError;
use dropout_dashboard::render::{Palette, render_health, render_prediction, render_stats};
use dropout_dashboard::state::prediction::{
    ConstraintViolation, PredictionForm, PredictionState, ShapeError, check_constraints,
};
use dropout_dashboard::state::stats::StatsState;
use dropout_dashboard::views::{PredictionView, StatsView};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid input: {0}")]
    Input(#[from] ShapeError),
    #[error("input out of range: {0}")]
    OutOfRange(#[from] ConstraintViolation),
    #[error("{0} failed")]
    WorkflowFailed(&'static str),
    #[error("service reported status '{0}'")]
    Unhealthy(String),
}

#[derive(Parser, Debug)]
#[command(name = "dropout-dashboard", about = "Student dropout risk dashboard")]
struct Cli {
    /// Service root URL.
    #[arg(long, env = "DROPOUT_API_BASE_URL")]
    base_url: Option<String>,

    /// Disable colored risk levels.
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Log request lifecycle to stderr.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show aggregate dropout statistics.
    Stats,
    /// Predict dropout risk for one student.
    Predict(PredictArgs),
    /// Check that the prediction service is up.
    Health,
}

#[derive(Args, Debug)]
struct PredictArgs {
    /// Average grade (0-100).
    #[arg(long, allow_hyphen_values = true)]
    grades: String,

    /// Attendance percentage (0-100).
    #[arg(long, allow_hyphen_values = true)]
    attendance: String,

    /// Number of behavior incidents (0-10).
    #[arg(long, allow_hyphen_values = true)]
    incidents: String,

    /// Send values outside the form's declared ranges anyway.
    #[arg(long, default_value_t = false)]
    skip_range_check: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let mut config = DashboardConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    tracing::debug!(base_url = %config.base_url, "dashboard configured");

    let api: Arc<dyn DashboardApi> = Arc::new(HttpDashboardApi::new(&config)?);
    let palette = if cli.no_color || !std::io::stdout().is_terminal() { Palette::Plain } else { Palette::Ansi };

    match cli.command {
        Command::Stats => run_stats(api).await,
        Command::Predict(args) => run_predict(api, args, palette).await,
        Command::Health => run_health(api.as_ref()).await,
    }
}

async fn run_stats(api: Arc<dyn DashboardApi>) -> Result<(), CliError> {
    let mut view = StatsView::mount(api);
    let state = view.settled().await;
    print!("{}", render_stats(&state));
    match state {
        StatsState::Failed(_) => Err(CliError::WorkflowFailed("statistics")),
        _ => Ok(()),
    }
}

async fn run_predict(api: Arc<dyn DashboardApi>, args: PredictArgs, palette: Palette) -> Result<(), CliError> {
    let form = PredictionForm::new(args.grades, args.attendance, args.incidents);
    let request = form.shape()?;
    if !args.skip_range_check {
        check_constraints(&request)?;
    }

    let view = PredictionView::new(api);
    let state = view.submit_request(request).await;
    print!("{}", render_prediction(&state, palette));
    match state {
        PredictionState::Succeeded(_) => Ok(()),
        _ => Err(CliError::WorkflowFailed("prediction")),
    }
}

async fn run_health(api: &dyn DashboardApi) -> Result<(), CliError> {
    let health = api.health().await?;
    print!("{}", render_health(&health));
    if health.is_healthy() { Ok(()) } else { Err(CliError::Unhealthy(health.status)) }
}
