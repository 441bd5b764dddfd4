use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shared::{domain::CodeId, protocol::parse_prescription_batch};
use storage::Storage;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://./data/prescriptions.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upsert prescriptions from a JSON file holding one object or an array.
    Seed {
        #[arg(long)]
        file: PathBuf,
    },
    Show {
        code_id: String,
    },
    List,
    Delete {
        code_id: String,
    },
}

fn code_id(raw: &str) -> Result<CodeId> {
    CodeId::parse(raw).with_context(|| format!("invalid code id '{raw}'"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url).await?;

    match cli.command {
        Command::Seed { file } => {
            let raw = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read '{}'", file.display()))?;
            let prescriptions = parse_prescription_batch(&raw)
                .with_context(|| format!("invalid prescription file '{}'", file.display()))?;
            for prescription in &prescriptions {
                storage.upsert_prescription(prescription).await?;
                println!(
                    "stored code_id={} medicines={}",
                    prescription.code_id,
                    prescription.medicines.len()
                );
            }
        }
        Command::Show { code_id: raw } => {
            let Some(stored) = storage.find_stored_prescription(&code_id(&raw)?).await? else {
                bail!("no prescription for code id '{raw}'");
            };
            println!("{}", serde_json::to_string_pretty(&stored.prescription)?);
            println!("created_at={} updated_at={}", stored.created_at, stored.updated_at);
        }
        Command::List => {
            for code in storage.list_code_ids().await? {
                println!("{code}");
            }
        }
        Command::Delete { code_id: raw } => {
            if storage.delete_prescription(&code_id(&raw)?).await? {
                println!("deleted code_id={raw}");
            } else {
                println!("no prescription for code id '{raw}'");
            }
        }
    }

    Ok(())
}
