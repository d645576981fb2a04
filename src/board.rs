/*
    board-io
    Copyright (C) 2024 dogeystamp <dogeystamp@disroot.org>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

//! Address the board's GPIO lines by number and hand out pin handles.

use embedded_hal_1::digital;

/// A single physical GPIO line.
///
/// The board only needs to switch direction, drive a level and sample the input.
pub trait Line {
    fn set_as_input(&mut self);
    fn set_as_output(&mut self);
    fn set_level(&mut self, high: bool);
    fn is_high(&self) -> bool;
}

#[cfg(feature = "rp2040")]
impl Line for embassy_rp::gpio::Flex<'static, embassy_rp::gpio::AnyPin> {
    fn set_as_input(&mut self) {
        embassy_rp::gpio::Flex::set_as_input(self)
    }

    fn set_as_output(&mut self) {
        embassy_rp::gpio::Flex::set_as_output(self)
    }

    fn set_level(&mut self, high: bool) {
        use embassy_rp::gpio::Level;
        embassy_rp::gpio::Flex::set_level(self, if high { Level::High } else { Level::Low })
    }

    fn is_high(&self) -> bool {
        embassy_rp::gpio::Flex::is_high(self)
    }
}

/// What an address is currently used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Power-on state: input, nobody holds a handle.
    Unclaimed,
    Input,
    Output,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    InvalidPin(u8),
    NotOutput(u8),
    NotInput(u8),
}

impl digital::Error for Error {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

/// Helper to define the lines of a [`Board`] from embassy pin peripherals.
#[macro_export]
macro_rules! pin_array {
    ($($pin: expr),*) => {
        [$($pin.into(),)*]
    }
}

/// Pin registry for the board.
///
/// Every line gets an address, which is its index in the array passed to [`Board::new`]. Pins
/// are acquired by address, the way headers are numbered on the silkscreen, so the exact GPIO
/// behind an address is up to whoever builds the array.
///
/// Handles returned by [`Board::output_pin`] and [`Board::input_pin`] borrow the board mutably.
/// A pin can therefore not be used across a [`Board::reset`].
pub struct Board<L, const N: usize> {
    lines: [L; N],
    modes: [Mode; N],
    /// Last level written to each line.
    levels: [bool; N],
}

#[cfg(feature = "rp2040")]
impl<const N: usize> Board<embassy_rp::gpio::Flex<'static, embassy_rp::gpio::AnyPin>, N> {
    /// Build a board from on-chip pins, see [`pin_array!`].
    pub fn from_pins(pins: [embassy_rp::gpio::AnyPin; N]) -> Self {
        Self::new(pins.map(embassy_rp::gpio::Flex::new))
    }
}

impl<L: Line, const N: usize> Board<L, N> {
    pub fn new(mut lines: [L; N]) -> Self {
        for line in lines.iter_mut() {
            line.set_as_input();
        }
        log::debug!("Board: {} lines", N);
        Board {
            lines,
            modes: [Mode::Unclaimed; N],
            levels: [false; N],
        }
    }

    /// Number of addressable pins.
    pub fn len(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        N == 0
    }

    fn index(&self, addr: u8) -> Result<usize, Error> {
        if addr as usize >= N {
            return Err(Error::InvalidPin(addr));
        }
        Ok(addr as usize)
    }

    pub fn mode(&self, addr: u8) -> Result<Mode, Error> {
        Ok(self.modes[self.index(addr)?])
    }

    /// Put every line back in its power-on state.
    ///
    /// Lines are driven low before they are released to input, so an output never floats high.
    pub fn reset(&mut self) {
        log::info!("Board: reset");
        for i in 0..N {
            self.lines[i].set_level(false);
            self.lines[i].set_as_input();
            self.levels[i] = false;
            self.modes[i] = Mode::Unclaimed;
        }
    }

    /// Configure a pin as an output, initially low.
    pub fn output_pin(&mut self, addr: u8) -> Result<OutputPin<'_, L, N>, Error> {
        let i = self.index(addr)?;
        // set the level first so the line doesn't glitch to a stale value
        self.lines[i].set_level(false);
        self.lines[i].set_as_output();
        self.levels[i] = false;
        self.modes[i] = Mode::Output;
        log::debug!("Board: pin {} is output", addr);
        Ok(OutputPin { board: self, addr })
    }

    /// Configure a pin as an input.
    pub fn input_pin(&mut self, addr: u8) -> Result<InputPin<'_, L, N>, Error> {
        let i = self.index(addr)?;
        self.lines[i].set_as_input();
        self.modes[i] = Mode::Input;
        log::debug!("Board: pin {} is input", addr);
        Ok(InputPin { board: self, addr })
    }

    /// Drive an output pin.
    pub fn set_level(&mut self, addr: u8, high: bool) -> Result<(), Error> {
        let i = self.index(addr)?;
        if self.modes[i] != Mode::Output {
            return Err(Error::NotOutput(addr));
        }
        log::trace!("set_level: pin {} to {}", addr, high);
        self.lines[i].set_level(high);
        self.levels[i] = high;
        Ok(())
    }

    /// Level last written to an output pin.
    pub fn output_level(&self, addr: u8) -> Result<bool, Error> {
        let i = self.index(addr)?;
        if self.modes[i] != Mode::Output {
            return Err(Error::NotOutput(addr));
        }
        Ok(self.levels[i])
    }

    /// Sample an input pin.
    pub fn read(&self, addr: u8) -> Result<bool, Error> {
        let i = self.index(addr)?;
        if self.modes[i] != Mode::Input {
            return Err(Error::NotInput(addr));
        }
        Ok(self.lines[i].is_high())
    }
}

/// Handle to a pin configured by [`Board::output_pin`].
pub struct OutputPin<'b, L, const N: usize> {
    board: &'b mut Board<L, N>,
    addr: u8,
}

impl<L: Line, const N: usize> OutputPin<'_, L, N> {
    pub fn addr(&self) -> u8 {
        self.addr
    }

    pub fn set_high(&mut self) -> Result<(), Error> {
        self.board.set_level(self.addr, true)
    }

    pub fn set_low(&mut self) -> Result<(), Error> {
        self.board.set_level(self.addr, false)
    }

    pub fn set(&mut self, high: bool) -> Result<(), Error> {
        self.board.set_level(self.addr, high)
    }

    pub fn toggle(&mut self) -> Result<(), Error> {
        let level = self.board.output_level(self.addr)?;
        self.board.set_level(self.addr, !level)
    }

    pub fn is_set_high(&self) -> Result<bool, Error> {
        self.board.output_level(self.addr)
    }
}

impl<L, const N: usize> digital::ErrorType for OutputPin<'_, L, N> {
    type Error = Error;
}

impl<L: Line, const N: usize> digital::OutputPin for OutputPin<'_, L, N> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.board.set_level(self.addr, false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.board.set_level(self.addr, true)
    }
}

impl<L: Line, const N: usize> digital::StatefulOutputPin for OutputPin<'_, L, N> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        self.board.output_level(self.addr)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.board.output_level(self.addr)?)
    }
}

/// Handle to a pin configured by [`Board::input_pin`].
pub struct InputPin<'b, L, const N: usize> {
    board: &'b mut Board<L, N>,
    addr: u8,
}

impl<L: Line, const N: usize> InputPin<'_, L, N> {
    pub fn addr(&self) -> u8 {
        self.addr
    }

    pub fn is_high(&self) -> Result<bool, Error> {
        self.board.read(self.addr)
    }

    pub fn is_low(&self) -> Result<bool, Error> {
        Ok(!self.board.read(self.addr)?)
    }
}

impl<L, const N: usize> digital::ErrorType for InputPin<'_, L, N> {
    type Error = Error;
}

impl<L: Line, const N: usize> digital::InputPin for InputPin<'_, L, N> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.board.read(self.addr)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.board.read(self.addr)?)
    }
}
