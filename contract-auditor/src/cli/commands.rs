//! One-shot command implementations

use analysis_client::CancellationToken;
use anyhow::{anyhow, bail, Context, Result};
use contract_auditor_sdk::{
    log_error, log_file_saved, log_found, log_info, log_warning, lookup, AnalysisRequest,
    AnalysisResult, ExportFormat,
};
use std::path::{Path, PathBuf};

use super::{AuthAction, Command, SnippetAction};
use crate::auth::{self, mask_token, TokenSource};
use crate::context::AuditorContext;
use crate::export::{self, ExportArtifact};
use crate::history::HistorySelection;
use crate::utils::{read_source, resolve_language};

/// Run a non-interactive command
pub async fn run_command(context: &mut AuditorContext, command: Command) -> Result<()> {
    for warning in &context.startup_warnings {
        log_warning!(warning);
    }

    match command {
        Command::Analyze {
            file,
            language,
            json,
            export,
            out,
        } => analyze(context, &file, language, json, export, out).await,
        Command::Snippets { action } => snippets(context, action),
        Command::History { json } => history(context, json).await,
        Command::Compare { positions } => compare(context, &positions).await,
        Command::Export {
            position,
            format,
            out,
            remote,
        } => export_history_entry(context, position, format, out, remote).await,
        Command::Info { name } => {
            info(&name);
            Ok(())
        }
        Command::Auth { action } => auth_command(context, action),
        Command::Tui { .. } => bail!("The interactive UI is started from main"),
    }
}

async fn analyze(
    context: &AuditorContext,
    file: &Path,
    language: Option<contract_auditor_sdk::Language>,
    json: bool,
    export_format: Option<ExportFormat>,
    out: Option<PathBuf>,
) -> Result<()> {
    let (code, detected) = read_source(file)?;
    if code.trim().is_empty() {
        bail!("{} is empty", file.display());
    }
    let language = resolve_language(language, detected);

    log_info!("Submitting {} as {}...", file.display(), language);

    // Ctrl-C stops polling instead of killing the process mid-request
    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let request = AnalysisRequest::new(code, language);
    let outcome = AuditorContext::analyze(&context.client, &request, &cancel).await;
    watcher.abort();
    let outcome = outcome.context("Analysis failed")?;

    if json {
        println!("{}", export::to_json(&outcome.result)?);
    } else {
        print_result(&outcome.result);
    }

    if let Err(message) = &outcome.history {
        log_warning!("History was not refreshed: {}", message);
    }

    if let Some(format) = export_format {
        let artifact = export::export(Some(&outcome.result), format)?;
        write_artifact(context, &artifact, out)?;
    }

    Ok(())
}

fn print_result(result: &AnalysisResult) {
    log_found!(result.vulnerabilities().len(), "vulnerabilities");
    for vulnerability in result.vulnerabilities() {
        println!("  - {}", vulnerability.name);
        println!("      {}", vulnerability.description);
    }
}

fn write_artifact(
    context: &AuditorContext,
    artifact: &ExportArtifact,
    out: Option<PathBuf>,
) -> Result<()> {
    let dir = out.unwrap_or_else(|| context.config.export_dir.clone());
    let path = artifact.write_to(&dir)?;
    log_file_saved!(path.display());
    Ok(())
}

fn snippets(context: &mut AuditorContext, action: SnippetAction) -> Result<()> {
    match action {
        SnippetAction::Save {
            name,
            file,
            language,
        } => {
            let (code, detected) = read_source(&file)?;
            let language = resolve_language(language, detected);
            if context.snippets.save(&name, &code, language)? {
                log_info!("Saved snippet '{}' ({})", name.trim(), language);
            } else {
                bail!("Snippet name and code must not be empty");
            }
        }
        SnippetAction::List => {
            let snippets = context.snippets.list();
            log_found!(snippets.len(), "saved snippets");
            for (index, snippet) in snippets.iter().enumerate() {
                println!(
                    "  {:>3}  {}  [{}]  {} lines",
                    index,
                    snippet.name,
                    snippet.language,
                    snippet.code.lines().count()
                );
            }
        }
        SnippetAction::Show { index } => {
            let snippet = context
                .snippets
                .get(index)
                .ok_or_else(|| anyhow!("No snippet at index {}", index))?;
            eprintln!("# {} ({})", snippet.name, snippet.language);
            println!("{}", snippet.code);
        }
        SnippetAction::Delete { index } => match context.snippets.delete(index)? {
            Some(removed) => {
                log_info!("Deleted snippet '{}'", removed.name);
            }
            None => bail!("No snippet at index {}", index),
        },
    }
    Ok(())
}

async fn fetch_history(context: &AuditorContext) -> Result<HistorySelection> {
    let results = context
        .history()
        .await
        .context("Failed to fetch history")?;
    Ok(HistorySelection::new(results))
}

async fn history(context: &AuditorContext, json: bool) -> Result<()> {
    let history = fetch_history(context).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(history.results())?);
        return Ok(());
    }

    log_found!(history.len(), "previous analyses");
    for (position, result) in history.results().iter().enumerate() {
        let created = result
            .created_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>3}  {:<12} {:<16}  {} vulnerabilities",
            position,
            result.label(position),
            created,
            result.vulnerabilities().len()
        );
    }
    Ok(())
}

async fn compare(context: &AuditorContext, positions: &[usize]) -> Result<()> {
    let mut history = fetch_history(context).await?;

    for &position in positions {
        if history.get(position).is_none() {
            bail!(
                "No history entry at position {} ({} entries)",
                position,
                history.len()
            );
        }
        if !history.is_selected(position) {
            history.toggle(position);
        }
    }

    let matrix = history.compare_selected()?;
    println!("{}", matrix.render_table());
    Ok(())
}

async fn export_history_entry(
    context: &AuditorContext,
    position: usize,
    format: ExportFormat,
    out: Option<PathBuf>,
    remote: bool,
) -> Result<()> {
    let history = fetch_history(context).await?;
    let result = history.get(position);
    if result.is_none() {
        bail!(
            "No history entry at position {} ({} entries)",
            position,
            history.len()
        );
    }

    let artifact = if remote {
        export::export_remote(&context.client, result, format).await?
    } else {
        export::export(result, format)?
    };
    write_artifact(context, &artifact, out)
}

fn info(name: &str) {
    match lookup(name) {
        Some(info) => {
            println!("{}", info.title);
            println!();
            println!("Description:\n  {}", info.description);
            println!();
            println!("Mitigation:\n  {}", info.mitigation);
            println!();
            println!("Reference: {}", info.reference);
        }
        None => {
            log_warning!("No additional information available for '{}'", name);
        }
    }
}

fn auth_command(context: &AuditorContext, action: AuthAction) -> Result<()> {
    let storage = context.storage.as_ref();
    match action {
        AuthAction::SetToken { token } => {
            if token.trim().is_empty() {
                bail!("Token must not be empty");
            }
            auth::save_token(storage, &token)?;
            log_info!("Token stored");
            if context.config.api_token.is_some() {
                log_warning!("AUDITOR_API_TOKEN is set and takes precedence over the stored token");
            }
        }
        AuthAction::Clear => {
            auth::clear_token(storage)?;
            log_info!("Stored token removed");
        }
        AuthAction::Status => {
            match auth::effective_token(context.config.api_token.as_deref(), storage)? {
                Some((token, TokenSource::Environment)) => {
                    log_info!("Using token {} from AUDITOR_API_TOKEN", mask_token(&token));
                }
                Some((token, TokenSource::Stored)) => {
                    log_info!("Using stored token {}", mask_token(&token));
                }
                None => {
                    log_error!("No token configured; requests are sent without Authorization");
                }
            }
        }
    }
    Ok(())
}
