//! Gas accounting for the local VM.

use super::program::Halt;

/// Cost of each metered operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasSchedule {
    /// Flat cost charged before any code runs
    pub call_base: u64,
    /// Charged per byte of call input
    pub per_input_byte: u64,
    pub storage_read: u64,
    pub storage_write: u64,
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            call_base: 21_000,
            per_input_byte: 16,
            storage_read: 2_100,
            storage_write: 20_000,
        }
    }
}

impl GasSchedule {
    /// Schedule that charges nothing.
    pub fn free() -> Self {
        Self {
            call_base: 0,
            per_input_byte: 0,
            storage_read: 0,
            storage_write: 0,
        }
    }

    /// Cost charged before the program runs.
    pub fn intrinsic(&self, input_len: usize) -> u64 {
        self.call_base
            .saturating_add(self.per_input_byte.saturating_mul(input_len as u64))
    }
}

/// Running gas counter for a single call.
#[derive(Debug, Clone)]
pub struct GasMeter {
    limit: u64,
    used: u64,
}

impl GasMeter {
    pub fn new(limit: u64) -> Self {
        Self { limit, used: 0 }
    }

    /// Consume `amount`. Exceeding the limit halts the call; the counter
    /// saturates at the limit.
    pub fn charge(&mut self, amount: u64) -> Result<(), Halt> {
        let next = self.used.saturating_add(amount);
        if next > self.limit {
            self.used = self.limit;
            return Err(Halt::OutOfGas);
        }
        self.used = next;
        Ok(())
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn remaining(&self) -> u64 {
        self.limit - self.used
    }
}
