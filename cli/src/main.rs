mod render;

use std::path::PathBuf;
use std::rc::Rc;

use clap::{ArgAction, Args, Parser, Subcommand};
use newsbrief::config::BUILD_TIME_API_URL;
use newsbrief::net::types::{ArticlesQuery, Language, RegisterRequest, SummaryQuery, TimeRange};
use newsbrief::state::auth::AuthStatus;
use newsbrief::state::desk::ApiStatus;
use newsbrief::storage::FileStorage;
use newsbrief::{ApiError, App, Endpoint, EndpointSources, PageLocation, Timeouts};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("no data directory found; pass --state-file or set NEWSBRIEF_STATE_FILE")]
    NoStateDir,
    #[error("invalid page URL: {0}")]
    InvalidPageUrl(String),
    #[error("no search history entry with id {0}")]
    HistoryNotFound(i64),
    #[error("not logged in")]
    NotLoggedIn,
    #[error("API health check failed for {0}")]
    Unhealthy(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "newsbrief", about = "News summarization client")]
struct Cli {
    /// API base URL; wins over every other endpoint source.
    #[arg(long, env = "NEWSBRIEF_API_URL")]
    api_url: Option<String>,

    /// Page URL the endpoint heuristics should act on.
    #[arg(long, env = "NEWSBRIEF_PAGE_URL")]
    page_url: Option<String>,

    /// JSON file holding the token, search history and theme.
    #[arg(long, env = "NEWSBRIEF_STATE_FILE")]
    state_file: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe the API health endpoint.
    Health,
    /// Create an account, then log in with it.
    Register(RegisterArgs),
    Login {
        /// Username or email.
        username: String,
        #[arg(long, env = "NEWSBRIEF_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    /// Verify the stored token and show the current user.
    Whoami,
    Summarize(SummarizeArgs),
    /// List raw articles without summarizing.
    Articles(ArticlesArgs),
    History(HistoryCommand),
    Theme(ThemeCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    username: String,
    #[arg(long, env = "NEWSBRIEF_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    full_name: Option<String>,
}

#[derive(Args, Debug)]
struct SummarizeArgs {
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,
    #[arg(long, default_value = "")]
    location: String,
    /// Omit for no limit.
    #[arg(long)]
    max_articles: Option<u32>,
    #[arg(long, default_value_t = Language::Hindi)]
    language: Language,
    /// 1d, 7d or all.
    #[arg(long, default_value_t = TimeRange::LastDay)]
    when: TimeRange,
    /// Also print each article.
    #[arg(long)]
    articles: bool,
}

#[derive(Args, Debug)]
struct ArticlesArgs {
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long, default_value_t = newsbrief::net::types::DEFAULT_ARTICLE_LIMIT)]
    max_articles: u32,
    /// Language for the listing labels.
    #[arg(long, default_value_t = Language::English)]
    language: Language,
}

#[derive(Args, Debug)]
struct HistoryCommand {
    #[command(subcommand)]
    command: HistorySubcommand,
}

#[derive(Subcommand, Debug)]
enum HistorySubcommand {
    List,
    Remove {
        id: i64,
    },
    Clear,
    /// Submit a saved search again.
    Rerun {
        id: i64,
        #[arg(long)]
        articles: bool,
    },
}

#[derive(Args, Debug)]
struct ThemeCommand {
    #[command(subcommand)]
    command: Option<ThemeSubcommand>,
}

#[derive(Subcommand, Debug)]
enum ThemeSubcommand {
    Show,
    Toggle,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut app = build_app(&cli)?;
    let json = cli.json;

    match cli.command {
        Command::Health => run_health(&mut app, json).await,
        Command::Register(args) => run_register(&mut app, args, json).await,
        Command::Login { username, password } => {
            let user = app.session.login(&username, &password).await?;
            emit(json, &serde_json::to_value(&user)?, || format!("Logged in as {}", user.display_name()))
        }
        Command::Logout => {
            app.session.logout();
            emit(json, &json!({ "logged_out": true }), || "Logged out".to_owned())
        }
        Command::Whoami => run_whoami(&mut app, json).await,
        Command::Summarize(args) => run_summarize(&mut app, args, json).await,
        Command::Articles(args) => run_articles(&app, args, json).await,
        Command::History(history) => run_history(&mut app, history, json).await,
        Command::Theme(theme) => run_theme(&app, theme, json),
    }
}

fn init_tracing(verbose: u8) {
    let default = if verbose == 0 { "warn" } else { "debug" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_app(cli: &Cli) -> Result<App, CliError> {
    let page = cli
        .page_url
        .as_deref()
        .map(|href| PageLocation::parse(href).ok_or_else(|| CliError::InvalidPageUrl(href.to_owned())))
        .transpose()?;
    let sources = EndpointSources {
        runtime_override: cli.api_url.clone(),
        build_time: BUILD_TIME_API_URL.map(str::to_owned),
        page,
    };

    let state_file = match &cli.state_file {
        Some(path) => path.clone(),
        None => default_state_file().ok_or(CliError::NoStateDir)?,
    };
    tracing::debug!(path = %state_file.display(), "using state file");

    Ok(App::new(
        Endpoint::Sources(sources),
        Rc::new(FileStorage::new(state_file)),
        Timeouts::from_env(),
    ))
}

fn default_state_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("newsbrief").join("state.json"))
}

async fn run_health(app: &mut App, json: bool) -> Result<(), CliError> {
    let base_url = app.desk.api().endpoint().base_url();
    let status = app.desk.check_api_health().await;
    emit(
        json,
        &json!({ "api_url": base_url, "connected": status == ApiStatus::Connected }),
        || format!("{} {} ({base_url})", status.icon(), status.label()),
    )?;
    if status == ApiStatus::Connected { Ok(()) } else { Err(CliError::Unhealthy(base_url)) }
}

async fn run_register(app: &mut App, args: RegisterArgs, json: bool) -> Result<(), CliError> {
    let request = RegisterRequest::new(
        &args.username,
        &args.password,
        &args.phone,
        args.email.as_deref(),
        args.full_name.as_deref(),
    )?;
    let user = app.session.register(&request).await?;
    emit(json, &serde_json::to_value(&user)?, || {
        format!("Registered and logged in as {}", user.display_name())
    })
}

async fn run_whoami(app: &mut App, json: bool) -> Result<(), CliError> {
    match app.session.initialize().await {
        AuthStatus::Authenticated(user) => {
            emit(json, &serde_json::to_value(user)?, || render::user(user))
        }
        AuthStatus::Anonymous | AuthStatus::Checking => Err(CliError::NotLoggedIn),
    }
}

async fn run_summarize(app: &mut App, args: SummarizeArgs, json: bool) -> Result<(), CliError> {
    let query = SummaryQuery {
        query: args.query.join(" "),
        location: args.location,
        max_articles: args.max_articles,
        language: args.language,
        when: args.when,
    };
    let result = app.desk.submit(query).await?;
    emit(json, &serde_json::to_value(result)?, || render::summary(result, args.articles))
}

async fn run_articles(app: &App, args: ArticlesArgs, json: bool) -> Result<(), CliError> {
    let query = ArticlesQuery {
        query: args.query.join(" "),
        location: args.location,
        max_articles: args.max_articles,
    };
    let articles = app.desk.api().fetch_articles(&query).await?;
    emit(json, &serde_json::to_value(&articles)?, || render::articles(args.language, &articles))
}

async fn run_history(app: &mut App, history: HistoryCommand, json: bool) -> Result<(), CliError> {
    match history.command {
        HistorySubcommand::List => {
            let entries = app.desk.recent_searches();
            emit(json, &serde_json::to_value(&entries)?, || render::history(&entries))
        }
        HistorySubcommand::Remove { id } => {
            if app.desk.history().get(id).is_none() {
                return Err(CliError::HistoryNotFound(id));
            }
            let entries = app.desk.history().remove(id);
            emit(json, &serde_json::to_value(&entries)?, || format!("Removed entry {id}"))
        }
        HistorySubcommand::Clear => {
            app.desk.history().clear();
            emit(json, &json!([]), || "Search history cleared".to_owned())
        }
        HistorySubcommand::Rerun { id, articles } => {
            let Some(result) = app.desk.rerun(id).await? else {
                return Err(CliError::HistoryNotFound(id));
            };
            emit(json, &serde_json::to_value(result)?, || render::summary(result, articles))
        }
    }
}

fn run_theme(app: &App, theme: ThemeCommand, json: bool) -> Result<(), CliError> {
    let current = match theme.command.unwrap_or(ThemeSubcommand::Show) {
        ThemeSubcommand::Show => app.theme.load(),
        ThemeSubcommand::Toggle => app.theme.toggle(),
    };
    emit(json, &json!({ "theme": current.as_str() }), || current.to_string())
}

fn emit(json: bool, value: &Value, text: impl FnOnce() -> String) -> Result<(), CliError> {
    if json {
        print_json(value)
    } else {
        println!("{}", text());
        Ok(())
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
