//! Built-in bus bridge
//! If you want to drive a different wiring, you will need to implement the
//! [`SendToBus`] trait

mod parallel_sender;

pub use parallel_sender::ParallelSender;

/// [`SendToBus`] is the capability the protocol engine needs from the
/// physical bus: latch one (control, data) pair onto the lines.
///
/// The write is synchronous and fire-and-forget. The controller offers no
/// feedback path on this bus, so from the engine's point of view a bridge
/// cannot fail.
pub trait SendToBus {
    /// Drive the control lines (`EN2 | EN1 | RW | RS`, see
    /// [`control`](crate::command::control)) and the data lines to the
    /// given levels.
    fn send(&mut self, control: u8, data: u8);
}
