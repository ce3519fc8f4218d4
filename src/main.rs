use anyhow::Context;
use bigdecimal::BigDecimal;
use clap::{Parser, Subcommand};
use fee_receipt_core::utils::logger;
use fee_receipt_core::{amount_in_words, DeskConfig, ReceiptDesk, ReceiptForm};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Parser)]
#[command(name = "fee-receipts")]
#[command(about = "Issue school fee receipts and manage receipt numbering")]
struct Cli {
    #[arg(long, global = true, help = "Path to a TOML config file")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the current receipt number
    Current,
    /// Advance to the next receipt number
    Next,
    /// Force the counter, e.g. `set NVB500` makes NVB501 current
    Set { number: String },
    /// Erase the counter and restart at NVA001
    Reset {
        #[arg(long, help = "Confirm the reset")]
        yes: bool,
    },
    /// Make NVA001 current without advancing
    ResetToStart,
    /// Spell out an amount in Indian words
    Words { amount: String },
    /// Generate a receipt from a TOML form, export it, then advance the counter
    Issue {
        form: PathBuf,
        #[arg(long, help = "Skip the sheet export and archive")]
        no_export: bool,
    },
    /// Export every archived receipt into one sheet
    ExportAll,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);

    let config = DeskConfig::load_or_default(cli.config.as_deref())?;
    if cli.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    let mut desk = ReceiptDesk::from_config(&config)?;
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Command::Current => {
            println!("{}", desk.current_number().await?);
        }
        Command::Next => {
            println!("{}", desk.new_receipt().await?);
        }
        Command::Set { number } => {
            let current = desk.force_set(number.trim()).await?;
            println!("Receipt number set to: {}", current);
        }
        Command::Reset { yes } => {
            if !yes {
                anyhow::bail!(
                    "Resetting receipt numbering back to NVA001 needs confirmation: pass --yes"
                );
            }
            let current = desk.reset().await?;
            println!("Receipt numbering has been reset to {}", current);
        }
        Command::ResetToStart => {
            let current = desk.reset_to_start().await?;
            println!("Receipt number has been reset to {}", current);
        }
        Command::Words { amount } => {
            let amount = BigDecimal::from_str(amount.trim())
                .with_context(|| format!("'{}' is not a number", amount))?;
            println!("{}", amount_in_words(&amount)?);
        }
        Command::Issue { form, no_export } => {
            let content = std::fs::read_to_string(&form)
                .with_context(|| format!("reading form {}", form.display()))?;
            let mut receipt_form: ReceiptForm = toml::from_str(&content)
                .with_context(|| format!("parsing form {}", form.display()))?;
            receipt_form.receipt_date.get_or_insert(today);
            receipt_form.payment.date.get_or_insert(today);

            let generated = desk.generate(&receipt_form).await?;
            println!("{}", generated.receipt);

            if generated.notice.is_error() {
                eprintln!("❌ {}", generated.notice.message);
            } else {
                eprintln!("✅ {}", generated.notice.message);
            }

            let exported = if no_export {
                Ok(None)
            } else {
                desk.export_receipt(&generated.receipt, &config.export.output_dir)
                    .await
                    .map(Some)
            };

            // The number is spent once the receipt is generated, exported or not
            let next = desk.new_receipt().await?;

            match exported {
                Ok(Some(path)) => println!("📁 Receipt exported to {}", path.display()),
                Ok(None) => {}
                Err(e) => {
                    tracing::error!("Export of receipt {} failed: {}", generated.receipt.number, e);
                    eprintln!("❌ Receipt {} was not exported: {}", generated.receipt.number, e);
                }
            }

            println!("Next receipt number: {}", next);
        }
        Command::ExportAll => {
            let summary = desk.export_all(&config.export.output_dir, today).await?;
            println!(
                "✅ {} receipts exported successfully! File: {}",
                summary.count,
                summary.path.display()
            );
        }
    }

    Ok(())
}
