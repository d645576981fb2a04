#![no_std]
#![no_main]
#![deny(rust_2018_idioms)]

use board_io::blinky::blink_task;
use board_io::unwrap;
use board_io::usb::usb_task;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_time::Timer;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let driver = Driver::new(p.USB, Irqs);
    unwrap(_spawner.spawn(usb_task(driver, log::LevelFilter::Info))).await;
    unwrap(_spawner.spawn(blink_task(p.PIN_25.into()))).await;

    loop {
        log::info!("main: still alive");
        Timer::after_secs(10).await;
    }
}
