//! Bank account management: accounts, deposits, withdrawals and their
//! transaction logs, kept in SQLite or a single serialized ledger file.

pub mod app;
pub mod common;
pub mod config;
pub mod domain;
pub mod io;
pub mod store;
pub mod telemetry;
pub mod worker;
