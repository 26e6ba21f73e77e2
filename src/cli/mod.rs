use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::{LedgerService, LoggingService, WalletService};
use crate::config::ServerConfig;
use crate::domain::{Account, AccountId, Payment, PaymentDirection, parse_amount};
use crate::http;
use crate::storage::StoreConfig;
use crate::telemetry;

/// Wallet Ledger - accounts, balances and atomic payments
#[derive(Parser)]
#[command(name = "wallet-ledger")]
#[command(about = "A wallet ledger service with an HTTP API")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "wallet.db", global = true)]
    pub database: PathBuf,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Serve the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        http_address: SocketAddr,

        /// Size of the database connection pool
        #[arg(long, default_value_t = 5)]
        max_connections: u32,

        /// Deadline for a single request, in milliseconds
        #[arg(long, default_value_t = 5000)]
        request_timeout_ms: u64,

        /// Allow payments to drive balances below zero
        #[arg(long)]
        allow_negative_balances: bool,
    },

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Pay from one account to another
    Pay {
        /// Paying account
        from: String,

        /// Receiving account
        to: String,

        /// Amount (e.g., "50.00" or "50")
        amount: String,

        /// Payment ID (idempotency key); a fresh one is generated if omitted
        #[arg(long)]
        id: Option<Uuid>,
    },

    /// List payments of an account
    Payments {
        /// Account ID
        account: String,
    },
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account ID
        id: String,

        /// Currency code (e.g., USD, EUR)
        currency: String,

        /// Opening balance
        #[arg(short, long, default_value = "0")]
        balance: String,
    },

    /// List all accounts
    List,

    /// Show account details
    Show {
        /// Account ID
        id: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let level = if self.verbose { "debug" } else { "info" };
        telemetry::init(level, self.json_logs);

        let store = StoreConfig::new(&self.database);

        match self.command {
            Commands::Init => {
                LedgerService::init(&store).await?;
                println!("Database initialized: {}", self.database.display());
            }

            Commands::Serve {
                http_address,
                max_connections,
                request_timeout_ms,
                allow_negative_balances,
            } => {
                let config = ServerConfig {
                    http_address,
                    database: self.database,
                    max_connections,
                    request_timeout_ms,
                    allow_negative_balances,
                };
                http::serve(config).await?;
            }

            Commands::Account(account_cmd) => {
                let service = LoggingService::new(LedgerService::connect(&store).await?);
                run_account_command(&service, account_cmd).await?;
            }

            Commands::Pay {
                from,
                to,
                amount,
                id,
            } => {
                let service = LoggingService::new(LedgerService::connect(&store).await?);
                let amount =
                    parse_amount(&amount).context("Invalid amount format. Use '50.00' or '50'")?;
                let payment = Payment::outgoing(id.unwrap_or_else(Uuid::new_v4), from, to, amount);

                let recorded = service.make_payment(payment).await?;
                println!(
                    "Recorded payment: {} {} -> {} ({})",
                    recorded.amount,
                    recorded.account,
                    recorded.counterparty().map(AccountId::as_str).unwrap_or("?"),
                    recorded.id
                );
            }

            Commands::Payments { account } => {
                let service = LoggingService::new(LedgerService::connect(&store).await?);
                let payments = service.get_payments(&AccountId::new(account)).await?;
                print_payments(&payments);
            }
        }
        Ok(())
    }
}

async fn run_account_command(service: &impl WalletService, cmd: AccountCommands) -> Result<()> {
    match cmd {
        AccountCommands::Create {
            id,
            currency,
            balance,
        } => {
            let balance =
                parse_amount(&balance).context("Invalid balance format. Use '50.00' or '50'")?;
            let account = service
                .create_account(Account::new(id, currency, balance))
                .await?;
            println!(
                "Created account: {} ({} {})",
                account.id, account.balance, account.currency
            );
        }

        AccountCommands::List => {
            let ids = service.list_accounts().await?;
            if ids.is_empty() {
                println!("No accounts found.");
            } else {
                for id in ids {
                    println!("{}", id);
                }
            }
        }

        AccountCommands::Show { id } => {
            let account = service.get_account(&AccountId::new(id)).await?;
            let payments = service.get_payments(&account.id).await?;
            let outgoing = payments
                .iter()
                .filter(|p| p.direction == PaymentDirection::Outgoing)
                .count();

            println!("Account: {}", account.id);
            println!("  Currency:  {}", account.currency);
            println!("  Balance:   {} {}", account.balance, account.currency);
            println!(
                "  Payments:  {} ({} in, {} out)",
                payments.len(),
                payments.len() - outgoing,
                outgoing
            );
        }
    }
    Ok(())
}

fn print_payments(payments: &[Payment]) {
    if payments.is_empty() {
        println!("No payments found.");
        return;
    }

    println!(
        "{:<36}  {:<8}  {:<20}  {:>14}  {:<19}",
        "ID", "DIR", "COUNTERPARTY", "AMOUNT", "RECORDED"
    );
    println!("{}", "-".repeat(105));
    for payment in payments {
        println!(
            "{:<36}  {:<8}  {:<20}  {:>14}  {:<19}",
            payment.id,
            payment.direction,
            payment.counterparty().map(AccountId::as_str).unwrap_or("-"),
            payment.amount,
            payment
                .recorded_at
                .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default()
        );
    }
}
