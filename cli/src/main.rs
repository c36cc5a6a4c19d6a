use clap::Parser;
use taskboard_cli::app;
use taskboard_cli::commands::{assign, cli, list};
use taskboard_core::config::{self, AppConfig, LoggingConfig};
use taskboard_core::error::CliError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let cfg = load_config(&args)?;
    init_tracing(&cfg.logging).map_err(CliError::Command)?;

    dispatch(args, cfg).await
}

fn load_config(args: &cli::Args) -> Result<AppConfig, CliError> {
    let mut cfg = match args.config.as_deref() {
        Some(path) => config::load_from_path(std::path::Path::new(path)),
        None => config::load_default(),
    }
    .map_err(|e| CliError::Config(e.to_string()))?;

    if let Some(url) = args.base_url.as_deref() {
        cfg.api.base_url = url.to_string();
    }
    if let Some(key) = args.api_key.as_deref() {
        cfg.api.api_key = key.to_string();
    }
    Ok(cfg)
}

fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 11: config error
    // 20: transport / IO / command error
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Command(_) => 20,
        CliError::Fetch(_) => 20,
        CliError::Update(_) => 20,
        CliError::Io(_) => 20,
        CliError::Anyhow(_) => 50,
    }
}

async fn dispatch(args: cli::Args, cfg: AppConfig) -> Result<i32, CliError> {
    match args.command {
        None => app::run_browse(&cfg, None).await,
        Some(cli::Commands::Browse(browse_args)) => {
            app::run_browse(&cfg, browse_args.query.as_deref()).await
        }
        Some(cli::Commands::List(list_args)) => {
            let client = app::build_client(&cfg)?;
            list::run(&client, &list_args, cfg.api.page_size).await
        }
        Some(cli::Commands::Assign(assign_args)) => {
            let client = app::build_client(&cfg)?;
            assign::run(&client, &assign_args).await
        }
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("taskboard"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("taskboard.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        // Nothing to write to.
        return Ok(());
    }

    // Console logging goes to stderr so it never fights the TUI's
    // alternate screen on stdout.
    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
