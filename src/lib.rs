#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]
#![deny(rust_2018_idioms)]
#![deny(rustdoc::broken_intra_doc_links)]

#[cfg(feature = "rp2040")]
use embassy_time::Timer;
#[cfg(feature = "rp2040")]
use {defmt_rtt as _, panic_probe as _};

pub mod blinky;
pub mod board;
pub mod flow;
#[cfg(feature = "rp2040")]
pub mod usb;

/// Wrapper over unwrap.
///
/// Logs over usb instead of instantly panicking.
#[cfg(feature = "rp2040")]
pub async fn unwrap<T, E: core::fmt::Debug>(res: Result<T, E>) -> T {
    match res {
        Ok(v) => v,
        Err(e) => halt(e).await,
    }
}

/// Log a fatal error, give the logger a second to flush, then panic.
#[cfg(feature = "rp2040")]
pub async fn halt<E: core::fmt::Debug>(err: E) -> ! {
    log::error!("[FATAL] {:?}", err);
    log::error!("HALTING DUE TO PANIC.");
    Timer::after_secs(1).await;
    panic!();
}
