use soroban_sdk::{contracttype, Env, Vec};

use crate::ContractError;

/// A rejected batch item: its position in the submitted vector and the
/// `ContractError` code that rejected it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchItemError {
    pub index: u32,
    pub error: u32,
}

/// Result of a multi-item call. Valid items are applied; invalid ones are
/// listed in `rejected` and leave no trace in storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchOutcome {
    pub applied: u32,
    pub rejected: Vec<BatchItemError>,
}

impl BatchOutcome {
    pub fn new(env: &Env) -> Self {
        BatchOutcome {
            applied: 0,
            rejected: Vec::new(env),
        }
    }

    pub fn record(&mut self, index: u32, result: Result<(), ContractError>) {
        match result {
            Ok(()) => self.applied = self.applied.saturating_add(1),
            Err(e) => self.rejected.push_back(BatchItemError {
                index,
                error: e as u32,
            }),
        }
    }

    pub fn rejected_count(&self) -> u32 {
        self.rejected.len()
    }
}
