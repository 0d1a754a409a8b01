//! Controller command set and its encoding to register bytes
//!
//! Configuration lives in the crate as typed enums; the single place they
//! turn into raw bits is [`Command::from`], right before the bytes go out on
//! the bus.

use crate::utils::BitOps;

/// Bit positions of the control-line byte handed to the bus bridge.
///
/// Layout follows the bridge wiring: `EN2 | EN1 | RW | RS`.
pub mod control {
    /// Register select, 0 = instruction register, 1 = data register
    pub const RS: u8 = 0b0001;
    /// Read/write line, held low (write) for every transaction
    pub const RW: u8 = 0b0010;
    /// Enable (strobe) line of the first panel
    pub const EN1: u8 = 0b0100;
    /// Enable (strobe) line of the second panel
    pub const EN2: u8 = 0b1000;
}

/// Commands of the controller instruction set
#[derive(Clone, Copy)]
pub enum CommandSet {
    /// Wipe DDRAM and return the cursor to address 0
    ClearDisplay,
    /// Return cursor and display window to the origin
    ReturnHome,
    /// Entry-mode register: write direction and autoscroll
    EntryModeSet(MoveDirection, ShiftType),
    /// Display-control register: display, cursor and blink switches
    DisplayOnOff {
        #[allow(missing_docs)]
        display: State,
        #[allow(missing_docs)]
        cursor: State,
        #[allow(missing_docs)]
        cursor_blink: State,
    },
    /// One-step move of the cursor alone, or of the display window with it
    CursorOrDisplayShift(ShiftType, MoveDirection),
    /// Function-set register: bus width, line count, glyph size
    FunctionSet(BusWidth, LineMode, Font),
    /// Point the controller's write pointer into glyph-generator RAM
    SetCGRAM(u8),
    /// Point the controller's write pointer into display-data RAM
    SetDDRAM(u8),
    /// One byte through the data register, at the current write pointer
    WriteData(u8),
}

/// Direction the cursor moves after a data write
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveDirection {
    #[allow(missing_docs)]
    RightToLeft,
    #[default]
    #[allow(missing_docs)]
    LeftToRight,
}

/// Whether a move carries the display window along with the cursor
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftType {
    #[default]
    #[allow(missing_docs)]
    CursorOnly,
    #[allow(missing_docs)]
    CursorAndDisplay,
}

/// On/off state of a display-control switch
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    #[allow(missing_docs)]
    Off,
    #[default]
    #[allow(missing_docs)]
    On,
}

/// Width of the physical data path
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusWidth {
    /// Four data lines, every byte travels as two nibbles
    #[default]
    Bit4,
    /// Eight data lines, one transaction per byte
    Bit8,
}

/// Line count of the panel, the controller only distinguishes 1 from 2+
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineMode {
    #[allow(missing_docs)]
    OneLine,
    #[default]
    #[allow(missing_docs)]
    TwoLine,
}

/// Glyph cell size
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    #[default]
    #[allow(missing_docs)]
    Font5x8,
    #[allow(missing_docs)]
    Font5x10,
}

/// Which panel's enable line(s) a transaction strobes
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelSelect {
    /// Only the panel on EN1
    First,
    /// Only the panel on EN2
    Second,
    /// Both panels latch the same transaction
    #[default]
    Both,
}

impl PanelSelect {
    pub(crate) fn enable_bits(self) -> u8 {
        match self {
            PanelSelect::First => control::EN1,
            PanelSelect::Second => control::EN2,
            PanelSelect::Both => control::EN1 | control::EN2,
        }
    }
}

/// A fully encoded bus write: target register plus the register byte
pub struct Command {
    rs: RegisterSelection,
    data: u8,
}

#[derive(Clone, Copy, PartialEq)]
pub(crate) enum RegisterSelection {
    Command,
    Data,
}

impl Command {
    pub(crate) fn register_selection(&self) -> RegisterSelection {
        self.rs
    }

    pub(crate) fn data(&self) -> u8 {
        self.data
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::ClearDisplay => Self {
                rs: RegisterSelection::Command,
                data: 0b0000_0001,
            },

            CommandSet::ReturnHome => Self {
                rs: RegisterSelection::Command,
                data: 0b0000_0010,
            },

            CommandSet::EntryModeSet(dir, shift) => {
                let mut raw_bits: u8 = 0b0000_0100;

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(1),
                    MoveDirection::LeftToRight => raw_bits.set_bit(1),
                };

                match shift {
                    ShiftType::CursorOnly => raw_bits.clear_bit(0),
                    ShiftType::CursorAndDisplay => raw_bits.set_bit(0),
                };

                Self {
                    rs: RegisterSelection::Command,
                    data: raw_bits,
                }
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits: u8 = 0b0000_1000;

                match display {
                    State::Off => raw_bits.clear_bit(2),
                    State::On => raw_bits.set_bit(2),
                };
                match cursor {
                    State::Off => raw_bits.clear_bit(1),
                    State::On => raw_bits.set_bit(1),
                };
                match cursor_blink {
                    State::Off => raw_bits.clear_bit(0),
                    State::On => raw_bits.set_bit(0),
                };

                Self {
                    rs: RegisterSelection::Command,
                    data: raw_bits,
                }
            }

            CommandSet::CursorOrDisplayShift(shift, dir) => {
                let mut raw_bits: u8 = 0b0001_0000;

                match shift {
                    ShiftType::CursorOnly => raw_bits.clear_bit(3),
                    ShiftType::CursorAndDisplay => raw_bits.set_bit(3),
                };

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(2),
                    MoveDirection::LeftToRight => raw_bits.set_bit(2),
                };

                Self {
                    rs: RegisterSelection::Command,
                    data: raw_bits,
                }
            }

            CommandSet::FunctionSet(width, line, font) => {
                let mut raw_bits: u8 = 0b0010_0000;

                match width {
                    BusWidth::Bit4 => raw_bits.clear_bit(4),
                    BusWidth::Bit8 => raw_bits.set_bit(4),
                };

                match line {
                    LineMode::OneLine => raw_bits.clear_bit(3),
                    LineMode::TwoLine => raw_bits.set_bit(3),
                };

                match font {
                    Font::Font5x8 => raw_bits.clear_bit(2),
                    Font::Font5x10 => raw_bits.set_bit(2),
                };

                Self {
                    rs: RegisterSelection::Command,
                    data: raw_bits,
                }
            }

            CommandSet::SetCGRAM(addr) => {
                assert!(addr < 2u8.pow(6), "CGRAM address out of range");

                Self {
                    rs: RegisterSelection::Command,
                    data: 0b0100_0000 + addr,
                }
            }

            CommandSet::SetDDRAM(addr) => {
                assert!(addr < 2u8.pow(7), "DDRAM address out of range");

                Self {
                    rs: RegisterSelection::Command,
                    data: 0b1000_0000 + addr,
                }
            }

            CommandSet::WriteData(data) => Self {
                rs: RegisterSelection::Data,
                data,
            },
        }
    }
}
