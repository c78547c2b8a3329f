//! Wallet command implementation.

use crate::cli::{WalletAction, WalletArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use neighbortip_sdk::{RpcWallet, Wallet};

/// Execute the wallet command.
pub async fn execute_wallet(args: WalletArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        WalletAction::Connectors => {
            let active = &config.get_active_profile()?.connector;
            println!("{}", formatter.format_connectors(&config.connectors, active)?);
        }
        WalletAction::Status { connector } => {
            let wallet = connect_wallet(config, connector.as_deref()).await?;
            println!("{}", formatter.wallet_status(wallet.status()));
        }
    }

    Ok(())
}

/// Connect to `name`, or the active profile's connector.
pub async fn connect_wallet(config: &Config, name: Option<&str>) -> Result<RpcWallet> {
    let connector = config.connector(name)?.clone();
    let mut wallet = RpcWallet::new(connector);
    wallet.connect().await?;
    Ok(wallet)
}
