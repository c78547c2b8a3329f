//! Sweep command implementation.

use crate::cli::SweepArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use neighbortip_sdk::{DirectoryClient, DirectoryLookup, SweepController, SweepState};
use std::io::{self, Write};

/// Execute the sweep command.
pub async fn execute_sweep(args: SweepArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut controller = SweepController::new(directory_client(config)?);

    let state = run_sweep(&mut controller, &args.fid, formatter).await?;
    println!("{}", formatter.format_sweep(&state)?);

    Ok(())
}

/// Directory client for the active profile's proxy.
pub fn directory_client(config: &Config) -> Result<DirectoryClient> {
    let profile = config.get_active_profile()?;
    Ok(DirectoryClient::new(&profile.proxy_url)?)
}

/// Submit `raw` to the controller, rendering progress on stderr while it runs.
///
/// Invalid input is returned as an error; the controller keeps the message.
pub async fn run_sweep<D: DirectoryLookup>(
    controller: &mut SweepController<D>,
    raw: &str,
    formatter: &Formatter,
) -> Result<SweepState> {
    let show_progress = formatter.format() == OutputFormat::Table;
    let mut updates = controller.subscribe();
    let printer = *formatter;

    // Ends once it observes an idle state; the last update always clears busy.
    let progress = tokio::spawn(async move {
        let mut shown = false;
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            if !state.busy {
                break;
            }
            if show_progress && state.total > 0 {
                eprint!("\r{}", printer.progress_line(&state));
                io::stderr().flush().ok();
                shown = true;
            }
        }
        shown
    });

    let result = controller.submit(raw).await;

    if progress.await.unwrap_or(false) {
        eprintln!();
    }

    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use neighbortip_domain::{DomainError, Fid, ProofResponse, UserProof};
    use neighbortip_sdk::SdkError;

    /// Directory where only even FIDs exist
    struct EvenDirectory;

    #[async_trait]
    impl DirectoryLookup for EvenDirectory {
        async fn lookup(&self, fid: Fid) -> std::result::Result<ProofResponse, SdkError> {
            let proofs = if fid.value() % 2 == 0 {
                vec![UserProof {
                    timestamp: 0,
                    name: String::new(),
                    owner: format!("0x{:040x}", fid.value()),
                    signature: String::new(),
                    fid,
                    proof_type: String::new(),
                }]
            } else {
                Vec::new()
            };
            Ok(ProofResponse { proofs })
        }
    }

    #[tokio::test]
    async fn test_run_sweep_returns_final_state() {
        let mut controller = SweepController::new(EvenDirectory);
        let formatter = Formatter::new(OutputFormat::Table, false);

        let state = run_sweep(&mut controller, "10", &formatter).await.unwrap();

        let fids: Vec<u64> = state.neighbors.iter().map(|n| n.fid.value()).collect();
        assert_eq!(fids, vec![6, 8, 10, 12, 14]);
        assert!(!state.busy);
        assert_eq!(state.progress, state.total);
    }

    #[tokio::test]
    async fn test_run_sweep_rejects_invalid_fid() {
        let mut controller = SweepController::new(EvenDirectory);
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let result = run_sweep(&mut controller, "abc", &formatter).await;

        assert!(matches!(
            result,
            Err(crate::error::CliError::Domain(DomainError::InvalidFid(_)))
        ));
        assert!(controller.state().error.is_some());
    }

    #[test]
    fn test_directory_client_uses_profile_url() {
        let config = Config::default();
        let client = directory_client(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:3000");
    }
}
