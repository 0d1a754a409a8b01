extern crate std;

use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::{
    command::{control, BusWidth, MoveDirection, ShiftType, State},
    lcd::{Config, Lcd},
    sender::SendToBus,
};

/// Captures every (control, data) pair the engine pushes, in order
#[derive(Default)]
struct RecordingBus {
    writes: Vec<(u8, u8)>,
}

impl SendToBus for RecordingBus {
    fn send(&mut self, control: u8, data: u8) {
        self.writes.push((control, data));
    }
}

/// Captures every requested delay, in microseconds, in order
#[derive(Default)]
struct RecordingDelay {
    delays_us: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_us.push(ns.div_ceil(1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.delays_us.push(us);
    }
}

const ENABLE_MASK: u8 = control::EN1 | control::EN2;

/// The writes that actually latch data: strobe asserted, enable bits
/// stripped so what remains is (register-select, register byte)
fn latched(bus: &RecordingBus) -> Vec<(u8, u8)> {
    bus.writes
        .iter()
        .copied()
        .filter(|&(control, _)| control & ENABLE_MASK != 0)
        .map(|(control, data)| (control & !ENABLE_MASK, data))
        .collect()
}

fn eight_bit() -> Config {
    Config::default().set_bus_width(BusWidth::Bit8)
}

#[test]
fn set_cursor_addresses_every_valid_cell() {
    let line_bases = [0x80u8, 0xC0];

    for line in 0..2u8 {
        for col in 0..40u8 {
            let mut bus = RecordingBus::default();
            let mut delay = RecordingDelay::default();
            let mut lcd = Lcd::new(&mut bus, &mut delay, eight_bit());

            lcd.set_cursor(line, col);

            let latched = latched(&bus);
            assert_eq!(latched.len(), 1);
            assert_eq!(latched[0], (0, line_bases[line as usize] + col));
        }
    }
}

#[test]
fn set_cursor_out_of_range_sends_nothing() {
    for (line, col) in [(2u8, 0u8), (0, 40), (2, 40), (255, 255)] {
        let mut bus = RecordingBus::default();
        let mut delay = RecordingDelay::default();
        let mut lcd = Lcd::new(&mut bus, &mut delay, eight_bit());

        lcd.set_cursor(line, col);

        assert!(bus.writes.is_empty());
        assert!(delay.delays_us.is_empty());
    }
}

#[test]
fn create_char_sends_cgram_address_then_eight_rows() {
    let pattern = [0b00000, 0b01010, 0b11111, 0b11111, 0b01110, 0b00100, 0b00000, 0b00000];

    let mut bus = RecordingBus::default();
    let mut delay = RecordingDelay::default();
    let mut lcd = Lcd::new(&mut bus, &mut delay, eight_bit());

    lcd.create_char(2, &pattern);

    let latched = latched(&bus);
    assert_eq!(latched.len(), 9);
    assert_eq!(latched[0], (0, 0x40 | (2 << 3)));
    for (row, &(rs, data)) in pattern.iter().zip(&latched[1..]) {
        assert_eq!(rs, control::RS);
        assert_eq!(data, *row);
    }
}

#[test]
fn create_char_wraps_out_of_range_slot() {
    let mut bus = RecordingBus::default();
    let mut delay = RecordingDelay::default();
    let mut lcd = Lcd::new(&mut bus, &mut delay, eight_bit());

    // 10 & 0b111 == 2
    lcd.create_char(10, &[0; 8]);

    assert_eq!(latched(&bus)[0], (0, 0x40 | (2 << 3)));
}

#[test]
fn cursor_toggle_changes_only_the_cursor_bit() {
    let mut bus = RecordingBus::default();
    let mut delay = RecordingDelay::default();
    let mut lcd = Lcd::new(&mut bus, &mut delay, eight_bit());

    lcd.set_cursor_state(State::On);
    lcd.set_cursor_state(State::Off);

    let latched = latched(&bus);
    assert_eq!(latched.len(), 2);

    let (on_byte, off_byte) = (latched[0].1, latched[1].1);
    assert_eq!(on_byte ^ off_byte, 0b0000_0010);
    // every other flag keeps its default: display on, blink off
    assert_eq!(off_byte, 0x0C);
    assert_eq!(on_byte, 0x0E);
}

#[test]
fn repeated_display_on_transmits_the_same_register() {
    let mut bus = RecordingBus::default();
    let mut delay = RecordingDelay::default();
    let mut lcd = Lcd::new(&mut bus, &mut delay, eight_bit());

    lcd.set_display_state(State::On);
    lcd.set_display_state(State::On);

    let latched = latched(&bus);
    assert_eq!(latched.len(), 2);
    assert_eq!(latched[0], latched[1]);
    assert_eq!(latched[0], (0, 0x0C));
}

#[test]
fn four_bit_bus_splits_bytes_high_nibble_first() {
    let mut bus = RecordingBus::default();
    let mut delay = RecordingDelay::default();
    let mut lcd = Lcd::new(&mut bus, &mut delay, Config::default());

    lcd.write_bytes(&[0xA7]);

    let latched = latched(&bus);
    assert_eq!(latched.len(), 2);
    assert_eq!(latched[0], (control::RS, 0xA0));
    assert_eq!(latched[1], (control::RS, 0x70));

    // strobe hold, nibble gap, strobe hold, data settle
    assert_eq!(delay.delays_us, [1, 1, 1, 2]);
}

#[test]
fn octet_transaction_pulses_the_selected_enables_once() {
    let mut bus = RecordingBus::default();
    let mut delay = RecordingDelay::default();
    let mut lcd = Lcd::new(&mut bus, &mut delay, eight_bit());

    lcd.select_panel(0);
    lcd.write_bytes(b"X");

    assert_eq!(
        bus.writes,
        [
            (control::RS, b'X'),
            (control::RS | control::EN1, b'X'),
            (control::RS, b'X'),
        ]
    );
}

#[test]
fn panel_selection_rejects_invalid_and_keeps_broadcast_pattern() {
    let mut bus = RecordingBus::default();
    let mut delay = RecordingDelay::default();
    let mut lcd = Lcd::new(&mut bus, &mut delay, eight_bit());

    lcd.select_panel(1);
    lcd.write_bytes(b"a");
    // invalid selector, selection must stay on the second panel
    lcd.select_panel(7);
    lcd.write_bytes(b"b");
    lcd.broadcast();
    lcd.write_bytes(b"c");

    let strobes: Vec<u8> = bus
        .writes
        .iter()
        .filter(|&&(control, _)| control & ENABLE_MASK != 0)
        .map(|&(control, _)| control & ENABLE_MASK)
        .collect();

    assert_eq!(strobes, [control::EN2, control::EN2, ENABLE_MASK]);
}

#[test]
fn begin_replays_the_documented_reset_handshake() {
    let mut bus = RecordingBus::default();
    let mut delay = RecordingDelay::default();
    let mut lcd = Lcd::new(&mut bus, &mut delay, eight_bit());

    lcd.begin();
    // one more write to observe where the handshake parked the selection
    lcd.write_bytes(b"X");

    // mode-select phase with its settle times, then function set, clear
    // and home with their long execution delays, then the two registers
    assert_eq!(
        delay.delays_us[..19],
        [
            55_000, 1, 4_100, 1, 100, 1, 100, // three raw 8-bit selects
            1, 40, // function set
            1, 40, 1_600, // clear
            1, 40, 1_600, // home
            1, 40, // entry mode
            1, 40, // display control
        ]
    );

    let latched = latched(&bus);
    let command_bytes: Vec<u8> = latched[..8].iter().map(|&(_, data)| data).collect();
    assert_eq!(
        command_bytes,
        [0x30, 0x30, 0x30, 0x38, 0x01, 0x02, 0x06, 0x0C]
    );
    // the whole handshake goes to the command register
    assert!(latched[..8].iter().all(|&(rs, _)| rs == 0));

    // the handshake broadcasts, then parks the selection on panel 0
    assert_eq!(bus.writes[1].0 & ENABLE_MASK, ENABLE_MASK);
    assert_eq!(
        bus.writes[bus.writes.len() - 2],
        (control::RS | control::EN1, b'X')
    );
}

#[test]
fn four_bit_begin_narrows_the_latch_before_function_set() {
    let mut bus = RecordingBus::default();
    let mut delay = RecordingDelay::default();
    let mut lcd = Lcd::new(&mut bus, &mut delay, Config::default());

    lcd.begin();

    let latched = latched(&bus);
    let command_bytes: Vec<u8> = latched.iter().map(|&(_, data)| data).collect();
    // raw octets stay whole, everything after the narrowing command is
    // nibble pairs
    assert_eq!(
        command_bytes[..6],
        [0x30, 0x30, 0x30, 0x20, 0x20, 0x80] // 0x28 as two nibbles
    );
}

#[test]
fn write_until_stops_before_the_delimiter() {
    let mut bus = RecordingBus::default();
    let mut delay = RecordingDelay::default();
    let mut lcd = Lcd::new(&mut bus, &mut delay, eight_bit());

    lcd.write_until(b"AB\0CD", 0);

    let latched = latched(&bus);
    assert_eq!(latched, [(control::RS, b'A'), (control::RS, b'B')]);
    assert_eq!(delay.delays_us, [1, 2, 1, 2]);
}

#[test]
fn move_commands_use_the_fixed_opcodes() {
    let mut bus = RecordingBus::default();
    let mut delay = RecordingDelay::default();
    let mut lcd = Lcd::new(&mut bus, &mut delay, eight_bit());

    lcd.move_cursor_left();
    lcd.move_cursor_right();
    lcd.move_display_left();
    lcd.move_display_right();

    let command_bytes: Vec<u8> = latched(&bus).iter().map(|&(_, data)| data).collect();
    assert_eq!(command_bytes, [0x10, 0x14, 0x18, 0x1C]);
}

#[test]
fn entry_mode_setters_retransmit_the_full_register() {
    let mut bus = RecordingBus::default();
    let mut delay = RecordingDelay::default();
    let mut lcd = Lcd::new(&mut bus, &mut delay, eight_bit());

    lcd.set_direction(MoveDirection::RightToLeft);
    lcd.set_autoscroll(ShiftType::CursorAndDisplay);
    lcd.set_direction(MoveDirection::LeftToRight);

    let command_bytes: Vec<u8> = latched(&bus).iter().map(|&(_, data)| data).collect();
    assert_eq!(command_bytes, [0x04, 0x05, 0x07]);
}

#[test]
fn print_goes_through_the_data_register() {
    let mut bus = RecordingBus::default();
    let mut delay = RecordingDelay::default();
    let mut lcd = Lcd::new(&mut bus, &mut delay, eight_bit());

    lcd.print("Hi");

    let latched = latched(&bus);
    assert_eq!(latched, [(control::RS, b'H'), (control::RS, b'i')]);
}

#[test]
fn fmt_write_renders_through_the_engine() {
    use core::fmt::Write;

    let mut bus = RecordingBus::default();
    let mut delay = RecordingDelay::default();
    let mut lcd = Lcd::new(&mut bus, &mut delay, eight_bit());

    write!(lcd, "{:>3}", 7).unwrap();

    let rendered: Vec<u8> = latched(&bus).iter().map(|&(_, data)| data).collect();
    assert_eq!(rendered, b"  7");
}
