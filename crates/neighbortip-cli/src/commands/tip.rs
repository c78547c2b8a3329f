//! Tip command implementation.

use super::sweep::directory_client;
use super::wallet::connect_wallet;
use crate::cli::TipArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use neighbortip_domain::{Fid, Wei};
use neighbortip_sdk::sweep::center_not_found_message;
use neighbortip_sdk::{DirectoryLookup, TipAction, TipOutcome, Wallet};
use std::io::{self, Write};

/// Execute the tip command.
pub async fn execute_tip(args: TipArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let fid = Fid::parse(&args.fid)?;
    let amount = tip_amount(config, args.amount.as_deref())?;

    let directory = directory_client(config)?;
    let neighbor = directory
        .lookup(fid)
        .await?
        .first_neighbor()
        .ok_or_else(|| CliError::NotFound(center_not_found_message(fid)))?;

    let wallet = connect_wallet(config, args.connector.as_deref()).await?;
    println!("{}", formatter.wallet_status(wallet.status()));

    let mut action = TipAction::new();
    let prompt = action.request(neighbor, amount).prompt();

    if !args.yes && !confirm(&prompt)? {
        action.cancel();
        println!("{}", formatter.info("Tip cancelled"));
        return Ok(());
    }

    match action.confirm(&wallet).await {
        Some(TipOutcome::Failed(message)) => Err(CliError::Transaction(message)),
        Some(outcome) => {
            println!("{}", formatter.tip_outcome(&outcome));
            Ok(())
        }
        None => Ok(()),
    }
}

/// Amount from the command line, else the active profile's.
pub fn tip_amount(config: &Config, amount: Option<&str>) -> Result<Wei> {
    match amount {
        Some(amount) => Ok(Wei::parse_ether(amount)?),
        None => config.get_active_profile()?.tip_amount(),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().eq_ignore_ascii_case("y"))
}
