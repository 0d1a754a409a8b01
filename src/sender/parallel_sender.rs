use embedded_hal::digital::OutputPin;

use crate::{command::control, sender::SendToBus, utils::BitOps};

/// Bridge for displays wired straight to GPIO, with 4 or 8 data lines.
///
/// In 4-line wiring the data pins are DB4..DB7 and carry the upper lane of
/// the data byte; the engine places each nibble there itself, so this
/// bridge never splits bytes.
pub struct ParallelSender<ControlPin, DBPin, const PIN_CNT: usize>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
{
    rs_pin: ControlPin,
    rw_pin: ControlPin,
    en1_pin: ControlPin,
    en2_pin: Option<ControlPin>,
    db_pins: [DBPin; PIN_CNT],
}

impl<ControlPin, DBPin> ParallelSender<ControlPin, DBPin, 4>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
{
    /// 4-line wiring; pass `None` for `en2` on a single-panel module
    #[allow(clippy::too_many_arguments)]
    pub fn new_4pin(
        rs: ControlPin,
        rw: ControlPin,
        en1: ControlPin,
        en2: Option<ControlPin>,
        db4: DBPin,
        db5: DBPin,
        db6: DBPin,
        db7: DBPin,
    ) -> Self {
        Self {
            rs_pin: rs,
            rw_pin: rw,
            en1_pin: en1,
            en2_pin: en2,
            db_pins: [db4, db5, db6, db7],
        }
    }
}

impl<ControlPin, DBPin> ParallelSender<ControlPin, DBPin, 8>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
{
    /// 8-line wiring; pass `None` for `en2` on a single-panel module
    #[allow(clippy::too_many_arguments)]
    pub fn new_8pin(
        rs: ControlPin,
        rw: ControlPin,
        en1: ControlPin,
        en2: Option<ControlPin>,
        db0: DBPin,
        db1: DBPin,
        db2: DBPin,
        db3: DBPin,
        db4: DBPin,
        db5: DBPin,
        db6: DBPin,
        db7: DBPin,
    ) -> Self {
        Self {
            rs_pin: rs,
            rw_pin: rw,
            en1_pin: en1,
            en2_pin: en2,
            db_pins: [db0, db1, db2, db3, db4, db5, db6, db7],
        }
    }
}

impl<ControlPin, DBPin, const PIN_CNT: usize> ParallelSender<ControlPin, DBPin, PIN_CNT>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
{
    fn push_bits(&mut self, raw_bits: u8) {
        // pin i carries data bit i in 8-line wiring, bit i + 4 in 4-line wiring
        let lane_offset = (8 - PIN_CNT) as u8;

        self.db_pins
            .iter_mut()
            .enumerate()
            .for_each(|(index, pin)| {
                if raw_bits.bit_is_set(index as u8 + lane_offset) {
                    pin.set_high().ok().unwrap();
                } else {
                    pin.set_low().ok().unwrap();
                }
            });
    }
}

impl<ControlPin, DBPin, const PIN_CNT: usize> SendToBus
    for ParallelSender<ControlPin, DBPin, PIN_CNT>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
{
    fn send(&mut self, control: u8, data: u8) {
        assert!(
            PIN_CNT == 4 || PIN_CNT == 8,
            "Pins other than 4 or 8 are not supported"
        );

        if control & control::RS != 0 {
            self.rs_pin.set_high().ok().unwrap();
        } else {
            self.rs_pin.set_low().ok().unwrap();
        }

        if control & control::RW != 0 {
            self.rw_pin.set_high().ok().unwrap();
        } else {
            self.rw_pin.set_low().ok().unwrap();
        }

        self.push_bits(data);

        // enables move last, so the data lines are stable on the strobe edge
        if control & control::EN1 != 0 {
            self.en1_pin.set_high().ok().unwrap();
        } else {
            self.en1_pin.set_low().ok().unwrap();
        }

        if let Some(en2_pin) = self.en2_pin.as_mut() {
            if control & control::EN2 != 0 {
                en2_pin.set_high().ok().unwrap();
            } else {
                en2_pin.set_low().ok().unwrap();
            }
        }
    }
}
