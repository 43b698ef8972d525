use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::account::AccountRecord;

/// Whole-file image of the serialized backend.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub accounts: HashMap<String, AccountRecord>,
}
impl Ledger {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }
    pub fn get(&self, account: &str) -> Option<&AccountRecord> {
        self.accounts.get(account)
    }

    pub fn get_mut(&mut self, account: &str) -> Option<&mut AccountRecord> {
        self.accounts.get_mut(account)
    }
}
