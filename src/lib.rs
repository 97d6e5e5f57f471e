//! Compile controller combos and stream them to a serial gamepad bridge.
//!
//! This is the host-side entry point. It re-exports the combo compiler and
//! sender from [`combopad_core`] and adds what a desktop needs to drive a
//! real device: a serial port [`Transport`] and a sleeping delay.
//!
//! # Example
//!
//! ```no_run
//! use combopad::presets::{buttons, left_stick};
//! use combopad::{Element, Settings};
//!
//! let mut sender = combopad::open_sender("/dev/ttyUSB0", Settings::default())?;
//! sender.send([
//!     left_stick::UP.seconds(0.5).into(),
//!     Element::delay_secs(0.2)?,
//!     buttons::A.into(),
//! ])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod delay;
pub mod serial;

pub use combopad_core::*;
pub use delay::StdDelay;
pub use serial::{SerialConfig, SerialTransport, DEFAULT_BAUD_RATE, DEFAULT_TIMEOUT};

/// Sender writing to a serial port with blocking pacing.
pub type SerialSender = Sender<SerialTransport, StdDelay>;

/// Error type for the host helpers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The serial port could not be opened.
    #[error("failed to open serial port: {0}")]
    Open(#[from] serialport::Error),
    #[error(transparent)]
    Send(#[from] SendError),
}

/// Open a serial port and wrap it in a sender.
pub fn open_sender(path: &str, settings: Settings) -> Result<SerialSender, Error> {
    let transport = SerialTransport::open(path)?;
    Ok(Sender::new(transport, StdDelay, settings))
}

/// Compile `elements` and send them over `transport`, ending at rest.
///
/// Blocks for the whole combo.
pub fn send<T, I>(transport: T, settings: &Settings, elements: I) -> Result<(), SendError>
where
    T: Transport,
    I: IntoIterator<Item = Element>,
{
    Sender::new(transport, StdDelay, settings.clone()).send(elements)
}
