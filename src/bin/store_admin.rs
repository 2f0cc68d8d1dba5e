//! 저장소 관리 도구
//! Store maintenance CLI
//!
//! ```text
//! store-admin inspect
//! store-admin clear-positions [--account default]
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::Value;

use dashboard_server::shared::config::AppConfig;
use dashboard_server::shared::database::{connect_store, EngineStore};
use dashboard_server::shared::logging::init_logging;
use dashboard_server::shared::utils::Document;

#[derive(Parser, Debug)]
#[command(name = "store-admin", about = "Inspect or clean the engine state store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// positions / account / connection_status 내용 출력
    Inspect,

    /// 포지션 삭제 (--account 없으면 전체)
    ClearPositions {
        /// 이 계정의 포지션만 삭제 (예: default)
        #[arg(long)]
        account: Option<String>,
    },
}

fn print_collection(name: &str, docs: &[Document]) {
    println!("{} ({})", name, docs.len());
    for doc in docs {
        println!("  {}", Value::Object(doc.clone()));
    }
}

async fn inspect(store: &dyn EngineStore) -> Result<()> {
    print_collection("positions", &store.list_positions(None).await?);
    print_collection("account", &store.list_accounts().await?);
    print_collection("connection_status", &store.list_connection_statuses(None).await?);
    Ok(())
}

async fn clear_positions(store: &dyn EngineStore, account: Option<&str>) -> Result<()> {
    let deleted = match account {
        Some(account_id) => store.delete_positions(account_id).await?,
        None => store.clear_positions().await?,
    };

    match account {
        Some(account_id) => println!("Deleted {} positions of account {}", deleted, account_id),
        None => println!("Deleted {} positions", deleted),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    init_logging()?;

    let store = connect_store(&config).await?;

    match cli.command {
        Command::Inspect => inspect(store.as_ref()).await,
        Command::ClearPositions { account } => clear_positions(store.as_ref(), account.as_deref()).await,
    }
}
