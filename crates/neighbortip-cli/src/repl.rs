//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! The session keeps one sweep controller, an optional connected wallet,
//! and the pending tip between commands.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::commands::{self, sign::format_signature, sweep::run_sweep};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use neighbortip_domain::{truncate_address, Fid, Neighbor, Wei};
use neighbortip_sdk::wallet::DEFAULT_SIGN_MESSAGE;
use neighbortip_sdk::{
    DirectoryClient, RpcWallet, SweepController, SweepState, TipAction, TipOutcome, Wallet,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::debug;

/// Run the interactive REPL.
pub async fn run_repl(config: &mut Config, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("Tip ur Neighbor - Type 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut session = Session::new(config)?;

    loop {
        match editor.readline(&session.prompt()) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = session.execute(cmd, config, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Connect(Option<String>),
    Disconnect,
    Status,
    Connectors,
    Sign(Option<String>),
    Sweep(String),
    List,
    Amount(Option<String>),
    Tip(String),
    Confirm,
    Cancel,
    Profile(ProfileAction),
}

/// State carried between REPL commands.
struct Session {
    controller: SweepController<DirectoryClient>,
    wallet: Option<RpcWallet>,
    tip: TipAction,
    amount: Wei,
}

impl Session {
    fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            controller: SweepController::new(commands::sweep::directory_client(config)?),
            wallet: None,
            tip: TipAction::new(),
            amount: config.get_active_profile()?.tip_amount()?,
        })
    }

    fn prompt(&self) -> String {
        match self.wallet.as_ref().and_then(|w| w.status().address()) {
            Some(address) => format!("neighbortip ({})> ", truncate_address(address)),
            None => "neighbortip (no wallet)> ".to_string(),
        }
    }

    fn connected_wallet(&self) -> Result<&RpcWallet> {
        self.wallet
            .as_ref()
            .filter(|w| w.status().is_connected())
            .ok_or(CliError::NotConnected)
    }

    async fn execute(&mut self, cmd: ReplCommand, config: &mut Config, formatter: &Formatter) -> Result<()> {
        match cmd {
            ReplCommand::Exit | ReplCommand::Help => {}
            ReplCommand::Connect(name) => {
                if let Some(mut previous) = self.wallet.take() {
                    previous.disconnect().await;
                }
                let connector = config.connector(name.as_deref())?.clone();
                println!("{}", formatter.info(&format!("Connecting to '{}'...", connector.name)));

                let mut wallet = RpcWallet::new(connector);
                let connected = wallet.connect().await;
                println!("{}", formatter.wallet_status(wallet.status()));
                connected?;
                self.wallet = Some(wallet);
            }
            ReplCommand::Disconnect => match self.wallet.take() {
                Some(mut wallet) => {
                    wallet.disconnect().await;
                    self.tip.cancel();
                    println!("{}", formatter.success("Wallet disconnected"));
                }
                None => println!("{}", formatter.info("No wallet connected")),
            },
            ReplCommand::Status => {
                match &self.wallet {
                    Some(wallet) => println!("{}", formatter.wallet_status(wallet.status())),
                    None => println!("{}", formatter.info("Not connected")),
                }
                println!("  Proxy: {}", self.controller.directory().endpoint());
                println!("  Tip amount: {} ETH", self.amount.format_ether());
                if let Some(request) = self.tip.pending() {
                    println!("  Pending: {}", request.prompt());
                }
            }
            ReplCommand::Connectors => {
                let active = self
                    .wallet
                    .as_ref()
                    .map(|w| w.connector().name.clone())
                    .unwrap_or(config.get_active_profile()?.connector.clone());
                println!("{}", formatter.format_connectors(&config.connectors, &active)?);
            }
            ReplCommand::Sign(message) => {
                let wallet = self.connected_wallet()?;
                let message = message.unwrap_or_else(|| DEFAULT_SIGN_MESSAGE.to_string());
                let signature = wallet.sign_message(&message).await?;
                println!(
                    "{}",
                    format_signature(formatter, &message, wallet.status().address(), &signature)?
                );
            }
            ReplCommand::Sweep(raw) => {
                let state = run_sweep(&mut self.controller, &raw, formatter).await?;
                println!("{}", formatter.format_sweep(&state)?);
            }
            ReplCommand::List => {
                let state = self.controller.state();
                println!("{}", formatter.format_neighbors(&state.neighbors, state.center)?);
            }
            ReplCommand::Amount(None) => {
                println!("Tip amount: {} ETH", self.amount.format_ether());
            }
            ReplCommand::Amount(Some(raw)) => {
                self.amount = Wei::parse_ether(&raw)?;
                println!(
                    "{}",
                    formatter.success(&format!("Tip amount set to {} ETH", self.amount.format_ether()))
                );
            }
            ReplCommand::Tip(raw) => {
                let fid = Fid::parse(&raw)?;
                let neighbor = tip_target(&self.controller.state(), fid)?;
                self.connected_wallet()?;

                let request = self.tip.request(neighbor, self.amount);
                println!("{}", request.prompt());
                println!("{}", formatter.info("Type 'confirm' to send or 'cancel' to abort"));
            }
            ReplCommand::Confirm => {
                let wallet = self
                    .wallet
                    .as_ref()
                    .filter(|w| w.status().is_connected())
                    .ok_or(CliError::NotConnected)?;
                match self.tip.confirm(wallet).await {
                    Some(TipOutcome::Failed(message)) => {
                        return Err(CliError::Transaction(message));
                    }
                    Some(outcome) => println!("{}", formatter.tip_outcome(&outcome)),
                    None => println!("{}", formatter.info("No tip pending")),
                }
            }
            ReplCommand::Cancel => match self.tip.cancel() {
                Some(_) => println!("{}", formatter.info("Tip cancelled")),
                None => println!("{}", formatter.info("No tip pending")),
            },
            ReplCommand::Profile(action) => {
                let switched = matches!(action, ProfileAction::Switch { .. });
                commands::execute_profile(ProfileArgs { action }, config, formatter).await?;
                if switched {
                    debug!("Rebuilding session for profile '{}'", config.active_profile);
                    let wallet = self.wallet.take();
                    *self = Session::new(config)?;
                    self.wallet = wallet;
                }
            }
        }

        Ok(())
    }
}

/// The displayed neighbor a tip to `fid` goes to; the sweep center is excluded.
fn tip_target(state: &SweepState, fid: Fid) -> Result<Neighbor> {
    if let Some(neighbor) = state.tippable().find(|n| n.fid == fid) {
        return Ok(neighbor.clone());
    }
    if state.center == Some(fid) {
        return Err(CliError::InvalidInput(format!(
            "FID {} is the center of the sweep and cannot be tipped",
            fid
        )));
    }
    Err(CliError::NotFound(format!(
        "FID {} is not among the displayed neighbors. Run 'sweep' first.",
        fid
    )))
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    let arg = |usage: &str| {
        parts
            .get(1)
            .map(|s| s.to_string())
            .ok_or_else(|| CliError::InvalidInput(format!("Usage: {}", usage)))
    };
    let optional = parts.get(1).map(|s| s.to_string());

    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "connect" => Ok(ReplCommand::Connect(optional)),
        "disconnect" => Ok(ReplCommand::Disconnect),
        "status" => Ok(ReplCommand::Status),
        "connectors" => Ok(ReplCommand::Connectors),
        "sign" => {
            let message = parts[1..].join(" ");
            Ok(ReplCommand::Sign((!message.is_empty()).then_some(message)))
        }
        "sweep" => Ok(ReplCommand::Sweep(arg("sweep <fid>")?)),
        "list" | "ls" => Ok(ReplCommand::List),
        "amount" => Ok(ReplCommand::Amount(optional)),
        "tip" => Ok(ReplCommand::Tip(arg("tip <fid>")?)),
        "confirm" | "y" => Ok(ReplCommand::Confirm),
        "cancel" | "n" => Ok(ReplCommand::Cancel),
        "profile" => parse_profile_command(&parts[1..]),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

fn parse_profile_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Ok(ReplCommand::Profile(ProfileAction::Show));
    }

    let action = match args[0] {
        "list" => ProfileAction::List,
        "show" => ProfileAction::Show,
        "switch" => {
            if args.len() < 2 {
                return Err(CliError::InvalidInput("Usage: profile switch <name>".to_string()));
            }
            ProfileAction::Switch {
                name: args[1].to_string(),
            }
        }
        _ => return Err(CliError::InvalidInput(format!("Unknown profile action: {}", args[0]))),
    };

    Ok(ReplCommand::Profile(action))
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("Failed to initialize editor: {}", e),
    ))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  connect [name]                 - Connect a wallet connector");
    println!("  disconnect                     - Disconnect the wallet");
    println!("  status                         - Show wallet and session state");
    println!("  connectors                     - List configured connectors");
    println!("  sign [message]                 - Sign a message (default: \"{}\")", DEFAULT_SIGN_MESSAGE);
    println!("  sweep <fid>                    - Look up the FIDs around <fid>");
    println!("  list, ls                       - Show the last sweep's neighbors");
    println!("  amount [eth]                   - Show or set the tip amount");
    println!("  tip <fid>                      - Prepare a tip to a displayed neighbor");
    println!("  confirm, y                     - Send the pending tip");
    println!("  cancel, n                      - Drop the pending tip");
    println!("  profile [list|show|switch]     - Manage profiles");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}
