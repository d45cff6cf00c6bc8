//! Ledger account identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Why an account identifier was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountIdError {
    Empty,
    ContainsWhitespace,
}

impl fmt::Display for AccountIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountIdError::Empty => write!(f, "account id is empty"),
            AccountIdError::ContainsWhitespace => write!(f, "account id contains whitespace"),
        }
    }
}

impl std::error::Error for AccountIdError {}

/// Opaque identifier of a ledger account (a caller or the configured admin).
///
/// Two ids are the same account only if their text is identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Result<Self, AccountIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(AccountIdError::Empty);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(AccountIdError::ContainsWhitespace);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
