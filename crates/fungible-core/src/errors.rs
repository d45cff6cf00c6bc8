//! Module error types.
//!
//! Every failure of a privileged operation maps to exactly one
//! [`ErrorKind`]. Callers that only need to branch on the kind use
//! [`FungibleError::kind`]; the variants carry the detail for logs and
//! audit output.

use std::fmt;

use fungible_admin_types::{AccountId, AddressParseError, ChainAddress, U256};

use crate::abi::AbiError;
use crate::vm::VmError;

/// Stable, comparable classification of a [`FungibleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    InvalidAddress,
    ForeignCoinNotFound,
    ContractCall,
    Store,
}

/// Which of the two contract calls failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPhase {
    /// Read-only call; nothing was persisted.
    Observe,
    /// State-mutating call; a failure here persisted nothing either.
    Commit,
}

impl fmt::Display for CallPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallPhase::Observe => f.write_str("observe"),
            CallPhase::Commit => f.write_str("commit"),
        }
    }
}

/// Underlying cause of a failed contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallFailure {
    /// The call input could not be encoded.
    Encode(AbiError),
    /// The VM reported a failure (revert, out of gas, startup failure).
    Vm(VmError),
    /// The call returned output that does not match the method signature.
    Decode(AbiError),
}

impl fmt::Display for CallFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallFailure::Encode(e) => write!(f, "encode input: {}", e),
            CallFailure::Vm(e) => write!(f, "{}", e),
            CallFailure::Decode(e) => write!(f, "decode output: {}", e),
        }
    }
}

/// Errors returned by the fungible module.
#[derive(Debug, Clone)]
pub enum FungibleError {
    /// The caller is not the configured admin, or no admin is configured.
    Unauthorized { caller: AccountId },

    /// The contract address text is not a valid chain address.
    InvalidAddress {
        input: String,
        source: AddressParseError,
    },

    /// The address is well-formed but has no registry record.
    ForeignCoinNotFound { address: ChainAddress },

    /// A call into the wrapped-asset contract failed.
    ContractCall {
        phase: CallPhase,
        contract: ChainAddress,
        /// Method that was being called
        method: String,
        /// Fee observed before a failed commit, for auditing the attempt
        previous_fee: Option<U256>,
        source: CallFailure,
    },

    /// A record in the module's own store could not be encoded or decoded.
    Store { reason: String },
}

impl FungibleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FungibleError::Unauthorized { .. } => ErrorKind::Unauthorized,
            FungibleError::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            FungibleError::ForeignCoinNotFound { .. } => ErrorKind::ForeignCoinNotFound,
            FungibleError::ContractCall { .. } => ErrorKind::ContractCall,
            FungibleError::Store { .. } => ErrorKind::Store,
        }
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }

    pub(crate) fn store(reason: impl fmt::Display) -> Self {
        FungibleError::Store {
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for FungibleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FungibleError::Unauthorized { caller } => {
                write!(f, "unauthorized: {} is not the admin", caller)
            }
            FungibleError::InvalidAddress { input, source } => {
                write!(f, "invalid address '{}': {}", input, source)
            }
            FungibleError::ForeignCoinNotFound { address } => {
                write!(f, "foreign coin not found for contract {}", address)
            }
            FungibleError::ContractCall {
                phase,
                contract,
                method,
                previous_fee,
                source,
            } => {
                write!(
                    f,
                    "contract call error: {} on {} ({}): {}",
                    method, contract, phase, source
                )?;
                if let Some(fee) = previous_fee {
                    write!(f, " [previous fee {}]", fee)?;
                }
                Ok(())
            }
            FungibleError::Store { reason } => write!(f, "store error: {}", reason),
        }
    }
}

impl std::error::Error for FungibleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FungibleError::InvalidAddress { source, .. } => Some(source),
            FungibleError::ContractCall { source, .. } => match source {
                CallFailure::Encode(e) | CallFailure::Decode(e) => Some(e),
                CallFailure::Vm(e) => Some(e),
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_kind_and_display() {
        let err = FungibleError::Unauthorized {
            caller: AccountId::new("bob").unwrap(),
        };
        assert!(err.is(ErrorKind::Unauthorized));
        assert_eq!(err.to_string(), "unauthorized: bob is not the admin");

        let err = FungibleError::ForeignCoinNotFound {
            address: ChainAddress::from_low_u64(1),
        };
        assert_eq!(err.kind(), ErrorKind::ForeignCoinNotFound);
    }

    #[test]
    fn test_contract_call_exposes_cause() {
        let err = FungibleError::ContractCall {
            phase: CallPhase::Commit,
            contract: ChainAddress::from_low_u64(7),
            method: "updateProtocolFlatFee".to_string(),
            previous_fee: Some(U256::from(3u64)),
            source: CallFailure::Vm(VmError::Reverted {
                reason: "transaction failed".to_string(),
                gas_used: 21_000,
            }),
        };
        let text = err.to_string();
        assert!(text.contains("commit"));
        assert!(text.contains("transaction failed"));
        assert!(text.contains("previous fee 3"));

        let cause = err.source().expect("cause");
        assert!(cause.to_string().contains("reverted"));
    }
}
