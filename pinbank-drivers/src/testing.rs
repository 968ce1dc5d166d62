//! Test doubles shared by the driver tests

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use pinbank_hal::I2cBus;

/// Most writes a single test case records
const MAX_WRITES: usize = 256;

/// Error raised by [`RecordingBus`] when told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

/// Bus that records every register write
#[derive(Debug, Default)]
pub struct RecordingBus {
    /// (device, register, value) in write order
    pub writes: Vec<(u8, u8, u8), MAX_WRITES>,
    /// Fail the write with this 0-based sequence number
    pub fail_at: Option<usize>,
    attempts: usize,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(write: usize) -> Self {
        Self {
            fail_at: Some(write),
            ..Self::default()
        }
    }

    /// Forget everything written so far
    pub fn clear(&mut self) {
        self.writes.clear();
    }

    /// Writes that went to one register
    pub fn latch_writes(&self, device: u8, register: u8) -> Vec<u8, MAX_WRITES> {
        self.writes
            .iter()
            .filter(|(d, r, _)| *d == device && *r == register)
            .map(|(_, _, v)| *v)
            .collect()
    }

    /// True if anything was ever written to `register` on `device`
    pub fn wrote(&self, device: u8, register: u8) -> bool {
        self.writes
            .iter()
            .any(|(d, r, _)| *d == device && *r == register)
    }
}

impl I2cBus for RecordingBus {
    type Error = BusFault;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusFault> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_at == Some(attempt) {
            return Err(BusFault);
        }
        self.writes
            .push((address, data[0], data[1]))
            .expect("recording bus full");
        Ok(())
    }
}

/// Delay that records requested milliseconds instead of sleeping
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub waits_ms: Vec<u32, MAX_WRITES>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ms
            .push(ns / 1_000_000)
            .expect("recording delay full");
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms).expect("recording delay full");
    }
}
