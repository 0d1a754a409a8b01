use crate::command::{BusWidth, Font, LineMode, MoveDirection, PanelSelect, ShiftType, State};

/// In-memory copy of the controller's configuration registers.
///
/// Kept as typed fields and only packed into register bytes at the
/// transmission boundary, so a flag toggle can never leave a register
/// half-applied.
pub(crate) struct LcdState {
    bus_width: BusWidth,
    line: LineMode,
    font: Font,
    display_on: State,
    cursor_on: State,
    cursor_blink: State,
    direction: MoveDirection,
    autoscroll: ShiftType,
    target: PanelSelect,
}

impl Default for LcdState {
    fn default() -> Self {
        // controller power-on defaults: display on, cursor hidden and not
        // blinking, left-to-right entry without autoscroll, both panels
        // enabled until the first explicit selection
        Self {
            bus_width: BusWidth::default(),
            line: LineMode::default(),
            font: Font::default(),
            display_on: State::On,
            cursor_on: State::Off,
            cursor_blink: State::Off,
            direction: MoveDirection::LeftToRight,
            autoscroll: ShiftType::CursorOnly,
            target: PanelSelect::Both,
        }
    }
}

impl LcdState {
    pub(crate) fn get_bus_width(&self) -> BusWidth {
        self.bus_width
    }

    pub(crate) fn set_bus_width(&mut self, bus_width: BusWidth) {
        self.bus_width = bus_width;
    }

    pub(crate) fn get_line_mode(&self) -> LineMode {
        self.line
    }

    pub(crate) fn set_line_mode(&mut self, line: LineMode) {
        self.line = line;
    }

    pub(crate) fn get_font(&self) -> Font {
        self.font
    }

    pub(crate) fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    pub(crate) fn get_display_state(&self) -> State {
        self.display_on
    }

    pub(crate) fn set_display_state(&mut self, display: State) {
        self.display_on = display;
    }

    pub(crate) fn get_cursor_state(&self) -> State {
        self.cursor_on
    }

    pub(crate) fn set_cursor_state(&mut self, cursor: State) {
        self.cursor_on = cursor;
    }

    pub(crate) fn get_cursor_blink(&self) -> State {
        self.cursor_blink
    }

    pub(crate) fn set_cursor_blink(&mut self, blink: State) {
        self.cursor_blink = blink;
    }

    pub(crate) fn get_direction(&self) -> MoveDirection {
        self.direction
    }

    pub(crate) fn set_direction(&mut self, dir: MoveDirection) {
        self.direction = dir;
    }

    pub(crate) fn get_autoscroll(&self) -> ShiftType {
        self.autoscroll
    }

    pub(crate) fn set_autoscroll(&mut self, autoscroll: ShiftType) {
        self.autoscroll = autoscroll;
    }

    pub(crate) fn get_target(&self) -> PanelSelect {
        self.target
    }

    pub(crate) fn set_target(&mut self, target: PanelSelect) {
        self.target = target;
    }
}
