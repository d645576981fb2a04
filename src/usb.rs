//! Forward `log` records over USB serial.
//!
//! There is no debug probe on a bare Pico, so this is the only way to see what the firmware says.

use embassy_rp::{peripherals::USB, usb::Driver};

#[embassy_executor::task]
pub async fn usb_task(
    // remember this is the Driver struct not the trait
    driver: Driver<'static, USB>,
    level: log::LevelFilter,
) {
    embassy_usb_logger::run!(1024, level, driver);
}
