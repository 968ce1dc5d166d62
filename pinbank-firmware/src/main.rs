//! pinbank - RP2040 demo firmware
//!
//! Registers the expanders listed in bank.toml on I2C0 (GP4 SDA, GP5 SCL),
//! runs the self test, blinks the power LED and leaves every pin off.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Delay, Duration, Timer};
use embedded_hal::delay::DelayNs;
use {defmt_rtt as _, panic_probe as _};

use pinbank_core::config::BankConfig;
use pinbank_drivers::PinController;
use pinbank_hal::{EmbeddedHalBus, I2cConfig};

/// Bank layout generated from bank.toml by build.rs
mod layout {
    include!(concat!(env!("OUT_DIR"), "/bank.rs"));
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("pinbank firmware starting...");

    let p = embassy_rp::init(Default::default());

    let mut config = i2c::Config::default();
    config.frequency = I2cConfig::FAST.frequency;
    let bus = EmbeddedHalBus::new(I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, config));
    info!("I2C0 initialized at {} Hz", I2cConfig::FAST.frequency);

    let result = PinController::scoped(bus, |bank| {
        let bank_config = BankConfig::from_tables(layout::CHIPS, layout::PORT_GROUPS, layout::ALIASES)?;
        bank.apply_config(&bank_config)?;
        info!("{} pins registered", bank.pin_count());

        bank.self_test(&mut Delay)?;

        // Blink the power LED to show the bank is alive
        bank.set_pins(&[100, 101], &[true, false])?;
        for _ in 0..6 {
            bank.toggle(100)?;
            Delay.delay_ms(250);
        }
        Ok(())
    });

    match result {
        Ok(()) => info!("Self test complete, bank is off"),
        Err(e) => error!("Bank error: {:?}", e),
    }

    loop {
        Timer::after(Duration::from_secs(1)).await;
    }
}

