use crate::{cli, gateway::Gateway, logging, session::Session, tui};
use anyhow::{Context, Result, bail};
use std::env;
use std::path::{Path, PathBuf};

// Checks the source folder before the terminal is taken over, so a typo gets a
// plain error message instead of a TUI failure screen.
fn resolve_source(source: &Path) -> Result<PathBuf> {
    let resolved = source
        .canonicalize()
        .with_context(|| format!("cannot open source folder {}", source.display()))?;
    if !resolved.is_dir() {
        bail!("{} is not a folder", source.display());
    }
    Ok(resolved)
}

// Main orchestrator: validates input, wires the session to the gateway, runs the TUI.
pub fn run_gut(cli_args: cli::Cli) -> Result<()> {
    logging::init(cli_args.log_file.as_deref())?;

    let source = resolve_source(&cli_args.source)?;
    let destination = env::current_dir().context("cannot determine the current directory")?;
    tracing::info!(
        source = %source.display(),
        destination = %destination.display(),
        "starting session"
    );

    let session = Session::new(source.clone());
    let gateway = Gateway::new(source, destination);

    match tui::run_session(session, gateway)? {
        tui::SessionOutcome::Completed => {
            tracing::info!("session completed");
            Ok(())
        }
        tui::SessionOutcome::Aborted => {
            tracing::info!("session aborted by user");
            Ok(())
        }
        tui::SessionOutcome::Failed(message) => bail!(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn source_must_exist() {
        let tmp = tempdir().unwrap();
        let err = resolve_source(&tmp.path().join("missing")).unwrap_err();
        assert!(err.to_string().starts_with("cannot open source folder"));
    }

    #[test]
    fn source_must_be_a_folder() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("a.txt");
        fs::write(&file, "a").unwrap();
        let err = resolve_source(&file).unwrap_err();
        assert!(err.to_string().ends_with("is not a folder"));
    }

    #[test]
    fn folder_resolves_to_absolute_path() {
        let tmp = tempdir().unwrap();
        let resolved = resolve_source(tmp.path()).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.is_dir());
    }
}
