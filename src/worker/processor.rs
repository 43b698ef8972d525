use crate::{
    common::{
        error::AppError,
        event::{BankCommand, BankOutcome},
    },
    store::AccountStore,
    worker::handlers::{balance, create, delete, deposit, history, withdrawal},
};

#[derive(Debug, Default)]
pub struct Processor {}
impl Processor {
    pub fn new() -> Self {
        Self {}
    }

    pub fn process<S>(&mut self, store: &mut S, command: BankCommand) -> Result<BankOutcome, AppError>
    where
        S: AccountStore + ?Sized,
    {
        let outcome = match command {
            BankCommand::Create {
                account,
                name,
                password,
                opening_balance,
            } => {
                create::handle(store, &account, &name, &password, &opening_balance)?;
                BankOutcome::Created
            }
            BankCommand::Deposit {
                account,
                password,
                amount,
            } => BankOutcome::Balance(deposit::handle(store, &account, &password, &amount)?),
            BankCommand::Withdraw {
                account,
                password,
                amount,
            } => BankOutcome::Balance(withdrawal::handle(store, &account, &password, &amount)?),
            BankCommand::Balance { account, password } => {
                let (name, balance) = balance::handle(&*store, &account, &password)?;
                BankOutcome::Statement { name, balance }
            }
            BankCommand::History { account, password } => {
                BankOutcome::History(history::handle(&*store, &account, &password)?)
            }
            BankCommand::Delete {
                account,
                password,
                confirmed,
            } => BankOutcome::Deleted(delete::handle(store, &account, &password, confirmed)?),
        };
        Ok(outcome)
    }
}
