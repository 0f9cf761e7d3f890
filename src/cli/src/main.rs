//! Command line harness for the payment ledger contract.

use anyhow::Result;
use colored::Colorize;
use payment_cli::commands::{balances, events, init_config, invoke, relay};
use payment_cli::{open_executor, CliConfig};
use std::path::PathBuf;
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line arguments for the harness.
#[derive(Debug, StructOpt)]
#[structopt(name = "payment", about = "Local harness for the payment ledger contract")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Path to the data directory
    #[structopt(short, long, parse(from_os_str))]
    data_dir: Option<PathBuf>,

    /// Subcommand to run
    #[structopt(subcommand)]
    cmd: Command,
}

/// Subcommands for the harness.
#[derive(Debug, StructOpt)]
enum Command {
    /// Invoke a contract function as the holder of a certificate
    #[structopt(name = "invoke")]
    Invoke {
        /// PEM certificate of the caller
        #[structopt(long, parse(from_os_str))]
        cert: PathBuf,

        /// Function name (add, debit, credit, query)
        function: String,

        /// Function arguments
        args: Vec<String>,
    },

    /// List committed events
    #[structopt(name = "events")]
    Events {
        /// First sequence number to list
        #[structopt(long, default_value = "0")]
        since: u64,
    },

    /// Credit asset owners for committed debits
    #[structopt(name = "relay")]
    Relay {
        /// PEM certificate the credits are submitted with
        #[structopt(long, parse(from_os_str))]
        cert: PathBuf,

        /// First sequence number to relay
        #[structopt(long, default_value = "0")]
        since: u64,
    },

    /// List all recorded balances
    #[structopt(name = "balances")]
    Balances,

    /// Write a default configuration file
    #[structopt(name = "init-config")]
    InitConfig {
        /// Where to write the configuration
        #[structopt(parse(from_os_str))]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command line arguments
    let opt = Opt::from_args();

    if let Command::InitConfig { path } = &opt.cmd {
        init_config::run(path)?;
        println!("{} {}", "Configuration written:".green(), path.display());
        return Ok(());
    }

    // Load configuration
    let config = match &opt.config {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    // Determine data directory
    let data_dir = match opt.data_dir.or_else(|| config.data_dir.clone()) {
        Some(path) => path,
        None => {
            let mut dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
            dir.push("payment-ledger");
            dir
        }
    };

    let executor = open_executor(&config, &data_dir)?;

    match opt.cmd {
        Command::Invoke { cert, function, args } => {
            let receipt = invoke::run(&executor, &cert, &function, args)?;
            if receipt.response.is_ok() {
                println!("{} {}", "Committed:".green(), receipt.tx_id);
                if !receipt.response.message.is_empty() {
                    println!("{} {}", "Message:".green(), receipt.response.message);
                }
                if !receipt.response.payload.is_empty() {
                    println!(
                        "{} {}",
                        "Payload:".green(),
                        events::display_payload(&receipt.response.payload)
                    );
                }
                if let Some(event) = receipt.event {
                    println!("{} {} #{}", "Event:".green(), event.name, event.seq);
                }
            } else {
                println!("{} {}", "Rejected:".red(), receipt.response);
            }
        }
        Command::Events { since } => {
            for event in events::run(&executor, since)? {
                println!(
                    "{} {} {} {}",
                    format!("#{}", event.seq).cyan(),
                    event.tx_id,
                    event.name.green(),
                    events::display_payload(&event.payload)
                );
            }
        }
        Command::Relay { cert, since } => {
            let report = relay::run(&executor, &config, &cert, since)?;
            println!(
                "{} credited {}, skipped {}, failed {}",
                "Relay:".green(),
                report.credited,
                report.skipped,
                report.failed
            );
            println!("{} {}", "Resume from:".green(), report.cursor);
        }
        Command::Balances => {
            for (key, balance) in balances::run(&executor)? {
                println!("{} {}", key.cyan(), balance);
            }
        }
        Command::InitConfig { .. } => {}
    }

    Ok(())
}
