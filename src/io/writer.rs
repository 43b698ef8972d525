use std::io::Write;

use crate::{common::money::Money, domain::transaction::TxKind};

#[derive(serde::Serialize)]
/// Internal CSV output row for one history entry.
///
/// Headers written (in this order): `kind,amount`.
struct HistoryRow {
    kind: &'static str,
    amount: String,
}

/// Writes a transaction history as CSV, oldest first.
///
/// Amounts are rendered to 2 decimal places. An empty history still gets
/// the header row.
///
/// # Examples
///
/// ```
/// use bank_manager::io::writer::write_history;
/// use bank_manager::domain::transaction::TxKind;
/// use bank_manager::common::money::Money;
///
/// let history = vec![(TxKind::Deposit, "100".parse::<Money>().unwrap())];
/// let mut out = Vec::new();
/// write_history(&mut out, &history).unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(), "kind,amount\nDeposit,100.00\n");
/// ```
pub fn write_history<W: Write>(writer: W, history: &[(TxKind, Money)]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // Explicit header so an empty history is still a valid CSV document.
    wtr.write_record(["kind", "amount"])?;
    for (kind, amount) in history {
        wtr.serialize(HistoryRow {
            kind: kind.as_str(),
            amount: amount.to_string_2dp(),
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the balance statement shown to an authenticated account holder.
pub fn write_balance<W: Write>(mut writer: W, name: &str, balance: Money) -> std::io::Result<()> {
    writeln!(writer, "Name: {name}")?;
    writeln!(writer, "Balance: ${}", balance.to_string_2dp())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn history_to_string(history: &[(TxKind, Money)]) -> String {
        let mut out = Vec::new();
        write_history(&mut out, history).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn writes_header_and_rows_in_given_order() {
        let history = vec![
            (TxKind::Deposit, Money::from_str("100").unwrap()),
            (TxKind::Deposit, Money::from_str("50.5").unwrap()),
            (TxKind::Withdraw, Money::from_str("0.125").unwrap()),
        ];

        let s = history_to_string(&history);
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(
            lines,
            vec!["kind,amount", "Deposit,100.00", "Deposit,50.50", "Withdraw,0.13"]
        );
    }

    #[test]
    fn empty_history_is_header_only() {
        assert_eq!(history_to_string(&[]), "kind,amount\n");
    }

    #[test]
    fn balance_statement_formats_to_cents() {
        let mut out = Vec::new();
        write_balance(&mut out, "Alice", Money::from_str("150").unwrap()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Name: Alice\nBalance: $150.00\n");
    }
}
