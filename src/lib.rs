/*!
# Parallel character LCD driver

Driver for HD44780 compatible character LCD modules wired to the 4-bit or
8-bit parallel bus, including panels with two controller chips sharing one
set of data lines.

Basic usage:

1. Build a bus bridge <br/>
    Either the built-in [`sender::ParallelSender`] over `embedded-hal`
    output pins, or any type implementing [`sender::SendToBus`].
<br/>
<br/>
2. Describe the wiring with [`lcd::Config`], create a [`lcd::Lcd`] with
   [`lcd::Lcd::new()`], then run [`lcd::Lcd::begin()`] to bring the
   controller up
<br/>
<br/>
3. Use the methods on [`lcd::Lcd`] to drive the display
*/

#![no_std]
#![warn(missing_docs)]

pub mod command;
pub mod lcd;
pub mod sender;
mod state;
pub mod utils;
