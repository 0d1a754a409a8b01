use embedded_hal::delay::DelayNs;

use crate::{
    command::{BusWidth, CommandSet, Font, LineMode},
    lcd::Lcd,
    sender::SendToBus,
    state::LcdState,
};

/// [`Config`] is the construction-time configuration of a [`Lcd`]:
/// bus width, line count and glyph size, all fixed for the instance's
/// lifetime
#[derive(Default)]
pub struct Config {
    state: LcdState,
}

#[allow(missing_docs)]
impl Config {
    pub fn get_bus_width(&self) -> BusWidth {
        self.state.get_bus_width()
    }

    pub fn set_bus_width(mut self, bus_width: BusWidth) -> Self {
        self.state.set_bus_width(bus_width);
        self
    }

    pub fn get_line_mode(&self) -> LineMode {
        self.state.get_line_mode()
    }

    pub fn set_line_mode(mut self, line: LineMode) -> Self {
        self.state.set_line_mode(line);
        self
    }

    pub fn get_font(&self) -> Font {
        self.state.get_font()
    }

    pub fn set_font(mut self, font: Font) -> Self {
        self.state.set_font(font);
        self
    }
}

impl<'a, 'b, Bridge, Delayer> Lcd<'a, 'b, Bridge, Delayer>
where
    Bridge: SendToBus,
    Delayer: DelayNs,
{
    /// Create a driver over a bridge and a delayer.
    ///
    /// Nothing goes out on the bus here; call [`Lcd::begin`] to bring the
    /// controller up.
    pub fn new(bridge: &'a mut Bridge, delayer: &'b mut Delayer, config: Config) -> Self {
        Self {
            bridge,
            delayer,
            state: config.state,
        }
    }

    /// Run the controller's documented power-on handshake.
    ///
    /// The step order and the delays come from the datasheet reset
    /// procedure; skipping or reordering them leaves real hardware in an
    /// undefined state. Calling `begin` on a running instance repeats the
    /// whole handshake and re-applies the current register state.
    pub fn begin(&mut self) {
        // worst-case power-up time plus the minimum post-power init latency
        self.delayer.delay_us(55_000);

        // the controller may sit mid-reset in either bus width; three
        // raw 8-bit-mode selects force it into a known state
        self.push_octet(0x30, 0);
        self.delayer.delay_us(4_100);
        self.push_octet(0x30, 0);
        self.delayer.delay_us(100);
        self.push_octet(0x30, 0);
        self.delayer.delay_us(100);

        // one more raw octet narrows the input latch to nibble mode
        if self.state.get_bus_width() == BusWidth::Bit4 {
            self.push_octet(0x20, 0);
        }

        self.send(CommandSet::FunctionSet(
            self.state.get_bus_width(),
            self.state.get_line_mode(),
            self.state.get_font(),
        ));

        self.clear();
        self.return_home();

        self.send(CommandSet::EntryModeSet(
            self.state.get_direction(),
            self.state.get_autoscroll(),
        ));
        self.send(CommandSet::DisplayOnOff {
            display: self.state.get_display_state(),
            cursor: self.state.get_cursor_state(),
            cursor_blink: self.state.get_cursor_blink(),
        });

        self.select_panel(0);
    }
}
