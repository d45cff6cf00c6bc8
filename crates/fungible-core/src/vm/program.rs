//! Native contract programs.

use fungible_admin_types::{ChainAddress, U256};

use super::gas::{GasMeter, GasSchedule};
use super::overlay::WriteOverlay;

/// Why a program stopped before returning output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    Revert(String),
    OutOfGas,
}

impl Halt {
    pub fn revert(reason: impl Into<String>) -> Self {
        Halt::Revert(reason.into())
    }
}

/// Contract code executed by [`LocalVm`](super::LocalVm).
///
/// Programs are stateless: everything they keep lives in contract storage,
/// reached through the [`CallEnv`].
pub trait ContractProgram: Send + Sync {
    /// Stable name of the program, used to re-register it when a saved
    /// session is loaded.
    fn kind(&self) -> &str;

    /// Whether calls may carry a non-zero value.
    fn payable(&self) -> bool {
        false
    }

    fn execute(&self, env: &mut CallEnv<'_>, input: &[u8]) -> Result<Vec<u8>, Halt>;
}

/// What a running program can see and touch.
pub struct CallEnv<'a> {
    pub caller: ChainAddress,
    pub address: ChainAddress,
    pub value: U256,
    pub block_height: u64,
    storage: WriteOverlay<'a>,
    meter: GasMeter,
    schedule: GasSchedule,
}

impl<'a> CallEnv<'a> {
    pub(crate) fn new(
        caller: ChainAddress,
        address: ChainAddress,
        value: U256,
        block_height: u64,
        storage: WriteOverlay<'a>,
        meter: GasMeter,
        schedule: GasSchedule,
    ) -> Self {
        Self {
            caller,
            address,
            value,
            block_height,
            storage,
            meter,
            schedule,
        }
    }

    pub fn gas_used(&self) -> u64 {
        self.meter.used()
    }

    /// Metered read of a storage slot.
    pub fn sload(&mut self, slot: &str) -> Result<Option<Vec<u8>>, Halt> {
        self.meter.charge(self.schedule.storage_read)?;
        Ok(self.storage.read(slot.as_bytes()))
    }

    /// Metered write of a storage slot.
    pub fn sstore(&mut self, slot: &str, value: Vec<u8>) -> Result<(), Halt> {
        self.meter.charge(self.schedule.storage_write)?;
        self.storage.write(slot.as_bytes(), value);
        Ok(())
    }

    /// Read a `uint256` slot. Unset slots read as zero.
    pub fn load_uint(&mut self, slot: &str) -> Result<U256, Halt> {
        match self.sload(slot)? {
            None => Ok(U256::zero()),
            Some(bytes) if bytes.len() == 32 => Ok(U256::from_big_endian(&bytes)),
            Some(bytes) => Err(Halt::revert(format!(
                "corrupt uint slot '{}' ({} bytes)",
                slot,
                bytes.len()
            ))),
        }
    }

    pub fn store_uint(&mut self, slot: &str, value: U256) -> Result<(), Halt> {
        self.sstore(slot, encode_uint_slot(value))
    }

    /// Read a string slot. Unset slots read as empty.
    pub fn load_string(&mut self, slot: &str) -> Result<String, Halt> {
        match self.sload(slot)? {
            None => Ok(String::new()),
            Some(bytes) => String::from_utf8(bytes)
                .map_err(|_| Halt::revert(format!("corrupt string slot '{}'", slot))),
        }
    }

    /// Split into the pending writes and the gas used.
    pub(crate) fn finish(self) -> (WriteOverlay<'a>, u64) {
        (self.storage, self.meter.used())
    }
}

/// Storage representation of a `uint256` slot: one big-endian word.
pub(crate) fn encode_uint_slot(value: U256) -> Vec<u8> {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word.to_vec()
}
