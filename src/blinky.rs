//! blinky task

use crate::flow::{self, Step};
use embedded_hal_1::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

/// One step of a blink cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    High,
    Low,
    /// Wait this many milliseconds.
    Wait(u32),
}

/// The pin being blinked, and the clock pacing it.
pub struct Blinker<P, D> {
    pub pin: P,
    pub delay: D,
}

impl<P, D> Blinker<P, D> {
    pub fn new(pin: P, delay: D) -> Self {
        Blinker { pin, delay }
    }

    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P: OutputPin, D: DelayNs> Step<Blinker<P, D>> for Action {
    type Error = P::Error;

    async fn run(&mut self, ctx: &mut Blinker<P, D>) -> Result<(), Self::Error> {
        match *self {
            Action::High => ctx.pin.set_high(),
            Action::Low => ctx.pin.set_low(),
            Action::Wait(ms) => {
                ctx.delay.delay_ms(ms).await;
                Ok(())
            }
        }
    }
}

/// High for `on_ms`, then low for `off_ms`.
pub fn cycle(on_ms: u32, off_ms: u32) -> [Action; 4] {
    [
        Action::High,
        Action::Wait(on_ms),
        Action::Low,
        Action::Wait(off_ms),
    ]
}

/// Blink `pin` until writing to it fails, and return that error.
pub async fn blink<P: OutputPin, D: DelayNs>(pin: P, delay: D, on_ms: u32, off_ms: u32) -> P::Error {
    let mut ctx = Blinker::new(pin, delay);
    flow::forever(&mut ctx, &mut cycle(on_ms, off_ms)).await
}

#[cfg(feature = "rp2040")]
#[embassy_executor::task]
pub async fn blink_task(pin: embassy_rp::gpio::AnyPin) {
    use embassy_rp::gpio::{Level, Output};

    let led = Output::new(pin, Level::Low);

    // onboard pins can't fail
    match blink(led, embassy_time::Delay, 100, 900).await {}
}
