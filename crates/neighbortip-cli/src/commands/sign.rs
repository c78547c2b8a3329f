//! Sign command implementation.

use super::wallet::connect_wallet;
use crate::cli::SignArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use neighbortip_sdk::wallet::DEFAULT_SIGN_MESSAGE;
use neighbortip_sdk::Wallet;

/// Execute the sign command.
pub async fn execute_sign(args: SignArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let message = args.message.unwrap_or_else(|| DEFAULT_SIGN_MESSAGE.to_string());
    let wallet = connect_wallet(config, args.connector.as_deref()).await?;

    let signature = wallet.sign_message(&message).await?;
    println!("{}", format_signature(formatter, &message, wallet.status().address(), &signature)?);

    Ok(())
}

/// Render a signature in the selected output format.
pub fn format_signature(
    formatter: &Formatter,
    message: &str,
    address: Option<&str>,
    signature: &str,
) -> Result<String> {
    Ok(match formatter.format() {
        OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
            "message": message,
            "address": address,
            "signature": signature,
        }))?,
        OutputFormat::Quiet => signature.to_string(),
        OutputFormat::Table => formatter.success(&format!("Signature: {}", signature)),
    })
}
