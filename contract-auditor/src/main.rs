use anyhow::{Context, Result};
use clap::Parser;
use contract_auditor::app::App;
use contract_auditor::cli::{run_command, Args, Command};
use contract_auditor::config::Config;
use contract_auditor::context::AuditorContext;
use contract_auditor::utils::{init_logging, read_source, resolve_language, LogTarget};
use contract_auditor_sdk::log_error;

fn main() {
    if let Err(err) = run() {
        log_error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(api_url) = args.api_url.clone() {
        config.api_url = api_url;
    }
    config.offline = args.offline;
    config.ephemeral = args.ephemeral;

    let command = args.command.unwrap_or(Command::Tui {
        file: None,
        language: None,
    });

    let log_target = match command {
        Command::Tui { .. } => LogTarget::File(config.log_path()),
        _ => LogTarget::Stderr,
    };
    init_logging(log_target, args.verbose)?;
    tracing::debug!(api_url = %config.api_url, offline = config.offline, "configuration loaded");

    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let mut context = AuditorContext::new(config)?;

    match command {
        Command::Tui { file, language } => {
            let mut app = App::new(context, runtime.handle().clone());
            if let Some(path) = file {
                let (code, detected) = read_source(&path)?;
                let label = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned());
                app.set_source(code, resolve_language(language, detected), label);
            } else if let Some(language) = language {
                app.language = language;
            }
            contract_auditor::tui::run(&mut app)
        }
        command => runtime.block_on(run_command(&mut context, command)),
    }
}
