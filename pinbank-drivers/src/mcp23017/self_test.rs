//! Self test
//!
//! Walks every registered pin in number order, lighting one at a time.
//! After each group of pins the bank is cleared and left dark for a pause,
//! so a long chain of LEDs is easy to follow by eye. The bank is always
//! left all-off.

use embedded_hal::delay::DelayNs;
use pinbank_core::LogicalPin;
use pinbank_hal::I2cBus;

use super::{ControllerError, PinController};

/// Self test timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelfTestTiming {
    /// Time each pin is held before the next one (ms)
    pub dwell_ms: u32,
    /// Dark pause after each group (ms)
    pub pause_ms: u32,
    /// Pins per group (0 = never pause)
    pub group: u16,
}

impl Default for SelfTestTiming {
    fn default() -> Self {
        Self {
            dwell_ms: 100,
            pause_ms: 1000,
            group: 15,
        }
    }
}

impl<B: I2cBus> PinController<B> {
    /// Run the self test with default timing
    pub fn self_test<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), ControllerError<B::Error>> {
        self.self_test_with(delay, SelfTestTiming::default())
    }

    /// Run the self test
    ///
    /// Pins are addressed by their real numbers; aliases are ignored.
    pub fn self_test_with<D: DelayNs>(
        &mut self,
        delay: &mut D,
        timing: SelfTestTiming,
    ) -> Result<(), ControllerError<B::Error>> {
        let count = self.pin_count() as LogicalPin;

        #[cfg(feature = "defmt")]
        defmt::info!("Self test over {} pins", count);

        for pin in 1..=count {
            let slot = self.registry().slot(pin)?;
            self.write_slot(slot, true)?;
            delay.delay_ms(timing.dwell_ms);

            if timing.group != 0 && pin % timing.group == 0 {
                self.turn_off()?;
                delay.delay_ms(timing.pause_ms);
            }
        }

        self.turn_off()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingBus, RecordingDelay};

    #[test]
    fn test_single_port_sequence() {
        let mut controller = PinController::new(RecordingBus::new());
        controller.register_port_group(0x20, 0x00, 0x14, 4).unwrap();
        controller.bus_mut().clear();

        let mut delay = RecordingDelay::default();
        controller.self_test(&mut delay).unwrap();

        // Pins accumulate, then the final turn-off clears the port
        assert_eq!(
            controller.bus_mut().latch_writes(0x20, 0x14),
            [0b0001, 0b0011, 0b0111, 0b1111, 0]
        );
        assert_eq!(delay.waits_ms, [100, 100, 100, 100]);
    }

    #[test]
    fn test_pause_after_each_group() {
        let mut controller = PinController::new(RecordingBus::new());
        controller.register_chip(0x20).unwrap();
        controller.bus_mut().clear();

        let mut delay = RecordingDelay::default();
        controller.self_test(&mut delay).unwrap();

        // 16 dwells plus one pause after pin 15
        assert_eq!(delay.waits_ms.len(), 17);
        assert_eq!(delay.waits_ms[15], 1000);
        assert_eq!(delay.waits_ms.iter().filter(|ms| **ms == 1000).count(), 1);

        // Pin 15 is bit 6 of port B; the group clear follows right after
        assert_eq!(
            controller.bus_mut().latch_writes(0x20, 0x15),
            [1, 3, 7, 15, 31, 63, 127, 0, 128, 0]
        );
        assert_eq!(
            controller.bus_mut().latch_writes(0x20, 0x14),
            [1, 3, 7, 15, 31, 63, 127, 255, 0, 0]
        );
        assert!(controller.registry().ports().all(|(_, port)| port.encode() == 0));
    }

    #[test]
    fn test_custom_timing_ignores_aliases() {
        let mut controller = PinController::new(RecordingBus::new());
        controller.register_port_group(0x20, 0x00, 0x14, 2).unwrap();
        controller.alias(1, 2).unwrap();
        controller.bus_mut().clear();

        let mut delay = RecordingDelay::default();
        let timing = SelfTestTiming {
            dwell_ms: 5,
            pause_ms: 50,
            group: 1,
        };
        controller.self_test_with(&mut delay, timing).unwrap();

        assert_eq!(
            controller.bus_mut().latch_writes(0x20, 0x14),
            [0b01, 0, 0b10, 0, 0]
        );
        assert_eq!(delay.waits_ms, [5, 50, 5, 50]);
    }

    #[test]
    fn test_empty_bank() {
        let mut controller = PinController::new(RecordingBus::new());
        let mut delay = RecordingDelay::default();

        controller.self_test(&mut delay).unwrap();

        assert!(controller.bus_mut().writes.is_empty());
        assert!(delay.waits_ms.is_empty());
    }
}
