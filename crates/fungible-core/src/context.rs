//! Per-transaction execution context.

use serde::{Deserialize, Serialize};

use fungible_admin_types::amount::u256_decimal;
use fungible_admin_types::{AccountId, ChainAddress, CoinType, U256};

/// Emitted after a protocol flat fee has been committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeUpdatedEvent {
    /// Origin chain of the wrapped asset
    pub chain_id: i64,
    pub coin_type: CoinType,
    pub contract: ChainAddress,
    #[serde(with = "u256_decimal")]
    pub old_fee: U256,
    #[serde(with = "u256_decimal")]
    pub new_fee: U256,
    pub signer: AccountId,
    pub block_height: u64,
}

/// Emitted when a wrapped-asset contract is deployed and registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinDeployedEvent {
    pub chain_id: i64,
    pub coin_type: CoinType,
    pub contract: ChainAddress,
    pub symbol: String,
    pub block_height: u64,
}

/// Everything the module emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModuleEvent {
    FeeUpdated(FeeUpdatedEvent),
    CoinDeployed(CoinDeployedEvent),
}

/// Block information plus the event sink of the running transaction.
#[derive(Debug, Clone, Default)]
pub struct Context {
    block_height: u64,
    /// Id of the chain the module runs on
    chain_id: i64,
    events: Vec<ModuleEvent>,
}

impl Context {
    pub fn new(block_height: u64, chain_id: i64) -> Self {
        Self {
            block_height,
            chain_id,
            events: Vec::new(),
        }
    }

    pub fn block_height(&self) -> u64 {
        self.block_height
    }

    pub fn chain_id(&self) -> i64 {
        self.chain_id
    }

    pub fn emit(&mut self, event: ModuleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[ModuleEvent] {
        &self.events
    }

    /// Drain the emitted events.
    pub fn take_events(&mut self) -> Vec<ModuleEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_collected_in_order() {
        let mut ctx = Context::new(10, 7000);
        let deployed = CoinDeployedEvent {
            chain_id: 5,
            coin_type: CoinType::Gas,
            contract: ChainAddress::from_low_u64(1),
            symbol: "ETH".to_string(),
            block_height: 10,
        };
        ctx.emit(ModuleEvent::CoinDeployed(deployed.clone()));
        assert_eq!(ctx.events().len(), 1);

        let drained = ctx.take_events();
        assert_eq!(drained, vec![ModuleEvent::CoinDeployed(deployed)]);
        assert!(ctx.events().is_empty());
    }

    #[test]
    fn test_event_json_shape() {
        let event = ModuleEvent::FeeUpdated(FeeUpdatedEvent {
            chain_id: 5,
            coin_type: CoinType::Gas,
            contract: ChainAddress::from_low_u64(1),
            old_fee: U256::zero(),
            new_fee: U256::from(42u64),
            signer: AccountId::new("admin").unwrap(),
            block_height: 3,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "fee_updated");
        assert_eq!(json["new_fee"], "42");
        assert_eq!(json["signer"], "admin");
    }
}
