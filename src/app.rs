use std::{
    io::{Read, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand};

use crate::{
    common::{
        error::AppError,
        event::{BankCommand, BankOutcome},
    },
    config::{Backend, Config},
    io::{reader, writer},
    store::AccountStore,
    worker::processor::Processor,
};

#[derive(Parser, Debug)]
#[command(name = "bank_manager")]
#[command(about = "Manage bank accounts kept in SQLite or a local ledger file", long_about = None)]
pub struct Cli {
    /// Storage backend
    #[arg(long, env = "BANK_BACKEND", value_enum, default_value_t = Backend::Sqlite, global = true)]
    pub backend: Backend,
    /// Database or ledger file (defaults to accounts.db / accounts.bin)
    #[arg(long, env = "BANK_DATA", global = true)]
    pub data: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open a new account with an opening deposit
    Create {
        account: String,
        name: String,
        password: String,
        opening_balance: String,
    },
    Deposit {
        account: String,
        password: String,
        amount: String,
    },
    Withdraw {
        account: String,
        password: String,
        amount: String,
    },
    /// Show name and balance
    Balance { account: String, password: String },
    /// Print all transactions as CSV
    History { account: String, password: String },
    /// Delete an account and its transactions
    Delete {
        account: String,
        password: String,
        /// Confirm the deletion; without it nothing is removed
        #[arg(long)]
        yes: bool,
    },
    /// Replay operations from a CSV file (op,account,name,password,amount)
    Batch { file: PathBuf },
}

impl Command {
    fn into_bank_command(self) -> Option<BankCommand> {
        Some(match self {
            Command::Create {
                account,
                name,
                password,
                opening_balance,
            } => BankCommand::Create {
                account,
                name,
                password,
                opening_balance,
            },
            Command::Deposit {
                account,
                password,
                amount,
            } => BankCommand::Deposit {
                account,
                password,
                amount,
            },
            Command::Withdraw {
                account,
                password,
                amount,
            } => BankCommand::Withdraw {
                account,
                password,
                amount,
            },
            Command::Balance { account, password } => BankCommand::Balance { account, password },
            Command::History { account, password } => BankCommand::History { account, password },
            Command::Delete {
                account,
                password,
                yes,
            } => BankCommand::Delete {
                account,
                password,
                confirmed: yes,
            },
            Command::Batch { .. } => return None,
        })
    }
}

/// Counts of a batch replay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub applied: usize,
    pub declined: usize,
}

/// Runs one CLI invocation against the configured store and flushes it
/// afterwards, whether or not the command succeeded.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<(), AppError> {
    let config = Config::new(cli.backend, cli.data)?;
    let mut store = config.open_store()?;
    let mut processor = Processor::new();

    let result = match cli.command {
        Command::Batch { file } => {
            let file = std::fs::File::open(&file)?;
            let mut rdr = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .flexible(true)
                .from_reader(file);
            replay(&mut processor, &mut *store, &mut rdr).and_then(|summary| {
                writeln!(
                    out,
                    "applied {}, declined {}",
                    summary.applied, summary.declined
                )?;
                Ok(())
            })
        }
        other => match other.into_bank_command() {
            Some(command) => processor
                .process(&mut *store, command)
                .and_then(|outcome| render(out, outcome)),
            None => Ok(()),
        },
    };

    let flushed = store.flush();
    result?;
    flushed
}

/// Applies every row of a batch file in order.
///
/// A row the bank declines (unknown account, bad password, bad amount, ...)
/// is logged and counted; a malformed row or a storage failure stops the
/// replay.
pub fn replay<S, R>(
    processor: &mut Processor,
    store: &mut S,
    rdr: &mut csv::Reader<R>,
) -> Result<BatchSummary, AppError>
where
    S: AccountStore + ?Sized,
    R: Read,
{
    let mut summary = BatchSummary::default();

    for (idx, row) in reader::read_commands(rdr).enumerate() {
        let row_no = idx + 1;
        let command = row.map_err(|e| AppError::Parse(format!("row {row_no}: {e}")))?;
        let account = command.account().to_string();

        match processor.process(&mut *store, command) {
            Ok(_) => summary.applied += 1,
            Err(err) if err.is_domain() => {
                tracing::warn!(row = row_no, account = %account, error = %err, "batch row declined");
                summary.declined += 1;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(summary)
}

fn render<W: Write>(out: &mut W, outcome: BankOutcome) -> Result<(), AppError> {
    match outcome {
        BankOutcome::Created => writeln!(out, "Account created.")?,
        BankOutcome::Balance(balance) => writeln!(out, "Success. Balance: ${balance}")?,
        BankOutcome::Statement { name, balance } => writer::write_balance(&mut *out, &name, balance)?,
        BankOutcome::History(history) if history.is_empty() => writeln!(out, "No data found.")?,
        BankOutcome::History(history) => writer::write_history(&mut *out, &history)?,
        BankOutcome::Deleted(true) => writeln!(out, "Account deleted.")?,
        BankOutcome::Deleted(false) => {
            writeln!(out, "Account not deleted; pass --yes to confirm.")?
        }
    }
    Ok(())
}
