use crate::common::event::BankCommand;
use std::io::Read;

#[derive(serde::Deserialize)]
/// Internal CSV row representation matching the batch headers. Columns an
/// operation does not use may stay empty.
struct CsvRow {
    op: String,
    account: String,
    name: Option<String>,
    password: Option<String>,
    // opening balance for create, amount for deposit/withdraw, confirmation for delete
    amount: Option<String>,
}

/// Reads batch operations from a CSV reader.
///
/// Supported headers: `op,account,name,password,amount`.
/// `op` is case-insensitive: `create`, `deposit`, `withdraw`, `balance`,
/// `history` or `delete`. A `delete` row only deletes when `amount` is
/// `yes` or `true`. Errors carry the operation and account of the row.
///
/// # Examples
///
/// ```
/// use bank_manager::io::reader::read_commands;
/// use bank_manager::common::event::BankCommand;
/// use csv::ReaderBuilder;
///
/// let data = "op,account,name,password,amount\n\
/// create,A1,Alice,p,100\n\
/// deposit,A1,,p,50\n";
/// let mut rdr = ReaderBuilder::new().from_reader(data.as_bytes());
/// let commands: Vec<_> = read_commands(&mut rdr).collect();
///
/// assert!(matches!(commands[0], Ok(BankCommand::Create { .. })));
/// assert!(matches!(commands[1], Ok(BankCommand::Deposit { .. })));
/// ```
pub fn read_commands<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<BankCommand, String>> + '_ {
    rdr.deserialize::<CsvRow>().map(|res| {
        let row = res.map_err(|e| e.to_string())?;
        let op = row.op.trim().to_ascii_lowercase();
        let account = row.account;

        let required = |field: Option<String>, what: &str| {
            field
                .filter(|v| !v.is_empty())
                .ok_or_else(|| format!("{op} missing {what} for account {account}"))
        };

        let command = match op.as_str() {
            "create" => BankCommand::Create {
                name: required(row.name, "name")?,
                password: required(row.password, "password")?,
                opening_balance: required(row.amount, "amount")?,
                account: account.clone(),
            },
            "deposit" => BankCommand::Deposit {
                password: required(row.password, "password")?,
                amount: required(row.amount, "amount")?,
                account: account.clone(),
            },
            "withdraw" | "withdrawal" => BankCommand::Withdraw {
                password: required(row.password, "password")?,
                amount: required(row.amount, "amount")?,
                account: account.clone(),
            },
            "balance" => BankCommand::Balance {
                password: required(row.password, "password")?,
                account: account.clone(),
            },
            "history" => BankCommand::History {
                password: required(row.password, "password")?,
                account: account.clone(),
            },
            "delete" => BankCommand::Delete {
                password: required(row.password, "password")?,
                confirmed: row
                    .amount
                    .as_deref()
                    .map(|v| v.eq_ignore_ascii_case("yes") || v.eq_ignore_ascii_case("true"))
                    .unwrap_or(false),
                account: account.clone(),
            },
            other => {
                return Err(format!(
                    "unknown operation: {other} for account {account}"
                ));
            }
        };
        Ok(command)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_commands(input: &str) -> Vec<Result<BankCommand, String>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(input.as_bytes());
        read_commands(&mut reader).collect()
    }

    #[test]
    fn parses_all_supported_operations() {
        let data = "op,account,name,password,amount\n\
create,A1,Alice,p,100\n\
Deposit,A1,,p,50\n\
withdraw,A1,,p,20\n\
balance,A1,,p,\n\
history,A1,,p,\n\
delete,A1,,p,yes\n\
delete,A1,,p\n";
        let commands = collect_commands(data);
        assert_eq!(commands.len(), 7);

        assert_eq!(
            commands[0],
            Ok(BankCommand::Create {
                account: "A1".into(),
                name: "Alice".into(),
                password: "p".into(),
                opening_balance: "100".into(),
            })
        );
        assert_eq!(
            commands[1],
            Ok(BankCommand::Deposit {
                account: "A1".into(),
                password: "p".into(),
                amount: "50".into(),
            })
        );
        assert!(matches!(commands[2], Ok(BankCommand::Withdraw { .. })));
        assert!(matches!(commands[3], Ok(BankCommand::Balance { .. })));
        assert!(matches!(commands[4], Ok(BankCommand::History { .. })));
        assert!(matches!(
            commands[5],
            Ok(BankCommand::Delete { confirmed: true, .. })
        ));
        assert!(matches!(
            commands[6],
            Ok(BankCommand::Delete { confirmed: false, .. })
        ));
    }

    #[test]
    fn reports_missing_amount_error() {
        let data = "op,account,name,password,amount\n\
deposit,A1,,p,\n";
        let commands = collect_commands(data);

        assert_eq!(commands.len(), 1);
        let err = commands.into_iter().next().unwrap().unwrap_err();
        assert_eq!(err, "deposit missing amount for account A1");
    }

    #[test]
    fn reports_unknown_operation_error() {
        let data = "op,account,name,password,amount\n\ntransfer,A1,,p,10\n";
        let commands = collect_commands(data);

        assert_eq!(commands.len(), 1);
        let err = commands.into_iter().next().unwrap().unwrap_err();
        assert_eq!(err, "unknown operation: transfer for account A1");
    }

    #[test]
    fn amounts_stay_raw_for_the_handlers_to_validate() {
        let data = "op,account,name,password,amount\n\
withdraw,A1,,p,lots\n";
        let commands = collect_commands(data);
        assert!(matches!(
            &commands[0],
            Ok(BankCommand::Withdraw { amount, .. }) if amount == "lots"
        ));
    }
}
