//! Blink the onboard LED forever, one step at a time.
//!
//! Resets the board, then runs high / wait / low / wait through `flow::forever`. The loop only
//! ends when a step fails, and then the firmware halts with that error.

#![no_std]
#![no_main]
#![deny(rust_2018_idioms)]

use board_io::blinky::{Action, Blinker};
use board_io::board::Board;
use board_io::usb::usb_task;
use board_io::{flow, halt, pin_array, unwrap};
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_time::Delay;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

/// Header address of the onboard LED.
const LED: u8 = 13;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let driver = Driver::new(p.USB, Irqs);
    unwrap(_spawner.spawn(usb_task(driver, log::LevelFilter::Info))).await;

    // D0-D12 are GPIO0-12, D13 is the LED on GPIO25
    let mut board = Board::from_pins(pin_array!(
        p.PIN_0, p.PIN_1, p.PIN_2, p.PIN_3, p.PIN_4, p.PIN_5, p.PIN_6, p.PIN_7, p.PIN_8,
        p.PIN_9, p.PIN_10, p.PIN_11, p.PIN_12, p.PIN_25
    ));
    board.reset();

    let led = unwrap(board.output_pin(LED)).await;
    let mut ctx = Blinker::new(led, Delay);
    let mut body = [
        Action::High,
        Action::Wait(1000),
        Action::Low,
        Action::Wait(1000),
    ];

    log::info!("main: blinking pin {}", LED);
    let err = flow::forever(&mut ctx, &mut body).await;
    halt(err).await
}
