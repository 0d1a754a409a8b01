//! The protocol engine
//!
//! [`Lcd`] owns the in-memory copy of the controller registers and turns
//! every operation into bus transactions plus the settle delays the
//! controller needs to execute them.

use embedded_hal::delay::DelayNs;

use crate::{
    command::{
        control, BusWidth, Command, CommandSet, Font, LineMode, MoveDirection, PanelSelect,
        RegisterSelection, ShiftType, State,
    },
    sender::SendToBus,
    state::LcdState,
};

mod init;
#[cfg(test)]
mod tests;

pub use init::Config;

/// DDRAM offset of each display line; the set-address command adds 0x80
const LINE_OFFSETS: [u8; 2] = [0x00, 0x40];

/// Columns the controller backs per line, on-screen or not
const LINE_CAPACITY: u8 = 40;

/// Strobe hold and nibble gap
const PULSE_DELAY_US: u32 = 1;
/// Settle time of a data-register write
const DATA_DELAY_US: u32 = 2;
/// Settle time of an ordinary command
const COMMAND_DELAY_US: u32 = 40;
/// Extra execution time of the RAM-clearing commands
const LONG_COMMAND_DELAY_US: u32 = 1_600;

/// Protocol engine over a bus bridge and a delay source.
///
/// Both collaborators are borrowed for the engine's lifetime. All methods
/// block the calling thread for the full settle time of what they send;
/// the engine provides no synchronization of its own.
pub struct Lcd<'a, 'b, Bridge: SendToBus, Delayer: DelayNs> {
    bridge: &'a mut Bridge,
    delayer: &'b mut Delayer,
    state: LcdState,
}

impl<'a, 'b, Bridge: SendToBus, Delayer: DelayNs> Lcd<'a, 'b, Bridge, Delayer> {
    /// Emit one full-byte transaction: set up the lines, raise the enable
    /// line(s) of the selected panel(s), hold, then drop them with the
    /// data still asserted. Exactly one strobe pulse carries the byte.
    fn push_octet(&mut self, data: u8, rs_bits: u8) {
        let enables = self.state.get_target().enable_bits();

        self.bridge.send(rs_bits, data);
        self.bridge.send(rs_bits | enables, data);
        self.delayer.delay_us(PULSE_DELAY_US);
        self.bridge.send(rs_bits, data);
    }

    /// Route a byte through the configured bus width. On the 4-bit bus the
    /// low nibble is shifted up so both halves travel the same four lines,
    /// high nibble first.
    fn push_byte(&mut self, data: u8, rs_bits: u8) {
        match self.state.get_bus_width() {
            BusWidth::Bit8 => self.push_octet(data, rs_bits),
            BusWidth::Bit4 => {
                self.push_octet(data & 0xF0, rs_bits);
                self.delayer.delay_us(PULSE_DELAY_US);
                self.push_octet(data << 4, rs_bits);
            }
        }
    }

    /// Single funnel for every controller access: emit the transaction,
    /// then block for the settle time its register class requires.
    pub fn send(&mut self, command: impl Into<Command>) {
        let command = command.into();

        match command.register_selection() {
            RegisterSelection::Command => {
                self.push_byte(command.data(), 0);
                self.delayer.delay_us(COMMAND_DELAY_US);
            }
            RegisterSelection::Data => {
                self.push_byte(command.data(), control::RS);
                self.delayer.delay_us(DATA_DELAY_US);
            }
        }
    }

    /// Wipe the display; the controller clears its RAM internally, which
    /// takes it well over a millisecond
    pub fn clear(&mut self) {
        self.send(CommandSet::ClearDisplay);
        self.delayer.delay_us(LONG_COMMAND_DELAY_US);
    }

    /// Put cursor and display window back at the origin, same long
    /// execution time as [`clear`](Lcd::clear)
    pub fn return_home(&mut self) {
        self.send(CommandSet::ReturnHome);
        self.delayer.delay_us(LONG_COMMAND_DELAY_US);
    }

    /// Step the cursor one cell to the left
    pub fn move_cursor_left(&mut self) {
        self.send(CommandSet::CursorOrDisplayShift(
            ShiftType::CursorOnly,
            MoveDirection::RightToLeft,
        ));
    }

    /// Step the cursor one cell to the right
    pub fn move_cursor_right(&mut self) {
        self.send(CommandSet::CursorOrDisplayShift(
            ShiftType::CursorOnly,
            MoveDirection::LeftToRight,
        ));
    }

    /// Shift the display window one cell to the left
    pub fn move_display_left(&mut self) {
        self.send(CommandSet::CursorOrDisplayShift(
            ShiftType::CursorAndDisplay,
            MoveDirection::RightToLeft,
        ));
    }

    /// Shift the display window one cell to the right
    pub fn move_display_right(&mut self) {
        self.send(CommandSet::CursorOrDisplayShift(
            ShiftType::CursorAndDisplay,
            MoveDirection::LeftToRight,
        ));
    }

    /// Autoscroll: shift the display window on every data write, so the
    /// cursor appears to stand still
    pub fn set_autoscroll(&mut self, autoscroll: ShiftType) {
        self.state.set_autoscroll(autoscroll);
        self.send_entry_mode();
    }

    #[allow(missing_docs)]
    pub fn get_autoscroll(&self) -> ShiftType {
        self.state.get_autoscroll()
    }

    /// Direction the write pointer moves after each data write
    pub fn set_direction(&mut self, dir: MoveDirection) {
        self.state.set_direction(dir);
        self.send_entry_mode();
    }

    #[allow(missing_docs)]
    pub fn get_direction(&self) -> MoveDirection {
        self.state.get_direction()
    }

    /// Switch the whole display on or off; DDRAM content survives
    pub fn set_display_state(&mut self, display: State) {
        self.state.set_display_state(display);
        self.send_display_control();
    }

    #[allow(missing_docs)]
    pub fn get_display_state(&self) -> State {
        self.state.get_display_state()
    }

    /// Show or hide the cursor underline
    pub fn set_cursor_state(&mut self, cursor: State) {
        self.state.set_cursor_state(cursor);
        self.send_display_control();
    }

    #[allow(missing_docs)]
    pub fn get_cursor_state(&self) -> State {
        self.state.get_cursor_state()
    }

    /// Blink the character cell under the cursor
    pub fn set_cursor_blink(&mut self, blink: State) {
        self.state.set_cursor_blink(blink);
        self.send_display_control();
    }

    #[allow(missing_docs)]
    pub fn get_cursor_blink(&self) -> State {
        self.state.get_cursor_blink()
    }

    // every flag toggle re-transmits the whole register

    fn send_entry_mode(&mut self) {
        self.send(CommandSet::EntryModeSet(
            self.state.get_direction(),
            self.state.get_autoscroll(),
        ));
    }

    fn send_display_control(&mut self) {
        self.send(CommandSet::DisplayOnOff {
            display: self.state.get_display_state(),
            cursor: self.state.get_cursor_state(),
            cursor_blink: self.state.get_cursor_blink(),
        });
    }

    /// Move the cursor to (line, col), both counted from 0.
    ///
    /// Requests outside the controller's 2 x 40 DDRAM window are ignored;
    /// no transaction is sent and the cursor keeps its position.
    pub fn set_cursor(&mut self, line: u8, col: u8) {
        if (line as usize) < LINE_OFFSETS.len() && col < LINE_CAPACITY {
            self.send(CommandSet::SetDDRAM(LINE_OFFSETS[line as usize] + col));
        }
    }

    /// Load a custom glyph into one of the controller's 8 CGRAM slots.
    ///
    /// Out-of-range slots wrap into range. The controller advances its
    /// write pointer across the 8 pattern rows on its own.
    pub fn create_char(&mut self, slot: u8, pattern: &[u8; 8]) {
        let slot = slot & 0b0000_0111;

        self.send(CommandSet::SetCGRAM(slot << 3));
        for &row in pattern {
            self.send(CommandSet::WriteData(row));
        }
    }

    /// Address a single panel; `panel` is 0 or 1, anything else keeps the
    /// current selection
    pub fn select_panel(&mut self, panel: u8) {
        match panel {
            0 => self.state.set_target(PanelSelect::First),
            1 => self.state.set_target(PanelSelect::Second),
            _ => {}
        }
    }

    /// Strobe both panels on every following transaction, mirroring output
    /// across a ganged pair
    pub fn broadcast(&mut self) {
        self.state.set_target(PanelSelect::Both);
    }

    #[allow(missing_docs)]
    pub fn get_target(&self) -> PanelSelect {
        self.state.get_target()
    }

    /// Send exactly the given bytes through the data register
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.send(CommandSet::WriteData(byte));
        }
    }

    /// Send bytes up to, and not including, `delimiter`
    pub fn write_until(&mut self, bytes: &[u8], delimiter: u8) {
        for &byte in bytes {
            if byte == delimiter {
                break;
            }
            self.send(CommandSet::WriteData(byte));
        }
    }

    /// Print a string at the current cursor position
    pub fn print(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
    }

    #[allow(missing_docs)]
    pub fn get_bus_width(&self) -> BusWidth {
        self.state.get_bus_width()
    }

    #[allow(missing_docs)]
    pub fn get_line_mode(&self) -> LineMode {
        self.state.get_line_mode()
    }

    #[allow(missing_docs)]
    pub fn get_font(&self) -> Font {
        self.state.get_font()
    }
}

impl<'a, 'b, Bridge: SendToBus, Delayer: DelayNs> core::fmt::Write
    for Lcd<'a, 'b, Bridge, Delayer>
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.print(s);
        Ok(())
    }
}
