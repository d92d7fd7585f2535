use advmem_cli::commands::cli::{Args, Commands};
use advmem_cli::commands::{config, init};
use advmem_core::api::{resolve_log_dir, CliError, LoggingConfig};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

fn main() {
    let exit = match real_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    };

    std::process::exit(exit);
}

fn real_main() -> Result<i32, CliError> {
    let args = Args::parse();

    // `init` must work even when the existing config is unreadable.
    let cfg = match &args.command {
        Commands::Init(_) => None,
        Commands::Config(c) => Some(config::load_config(c.path.as_deref())?),
    };
    let logging = cfg.as_ref().map(|c| c.logging.clone()).unwrap_or_default();
    init_tracing(&logging).map_err(CliError::Command)?;

    match args.command {
        Commands::Init(init_args) => {
            match init::handle_init(&init_args)? {
                init::InitOutcome::Created(path) => {
                    println!("Configuration written to: {}", path.display());
                }
                init::InitOutcome::AlreadyExists(path) => {
                    println!("Configuration file already exists at: {}", path.display());
                    println!("Re-run with --force to overwrite it.");
                }
            }
            Ok(0)
        }
        Commands::Config(config_args) => {
            let cfg = cfg.unwrap_or_default();
            println!("{}", config::render_config(&cfg, config_args.format)?);
            Ok(0)
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
        let dir = resolve_log_dir(logging);
        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("advmem.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

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
