//! Serial port transport.

use std::io::Write;
use std::time::Duration;

use combopad_core::{Transport, TransportError};
use log::{debug, info};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

/// Baud rate of the bridge firmware.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Write timeout for a single frame.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Port settings for [`SerialTransport::open_with`]. Always 8N1 without
/// flow control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    pub path: String,
    pub baud_rate: u32,
    pub timeout: Duration,
}

impl SerialConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// [`Transport`] over a serial port.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open `path` at the default baud rate.
    pub fn open(path: &str) -> Result<Self, serialport::Error> {
        Self::open_with(&SerialConfig::new(path))
    }

    pub fn open_with(config: &SerialConfig) -> Result<Self, serialport::Error> {
        let port = serialport::new(config.path.as_str(), config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.timeout)
            .open()?;
        info!("opened {} at {} baud", config.path, config.baud_rate);
        Ok(Self { port })
    }

    /// Wrap an already opened port.
    pub fn from_port(port: Box<dyn SerialPort>) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &dyn SerialPort {
        self.port.as_ref()
    }

    pub fn into_port(self) -> Box<dyn SerialPort> {
        self.port
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, TransportError> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        Ok(bytes.len())
    }

    /// Query the driver; a vanished device fails the ioctl.
    fn check_alive(&mut self) -> Result<(), TransportError> {
        match self.port.bytes_to_read() {
            Ok(_) => Ok(()),
            Err(e) => {
                debug!("serial port probe failed: {e}");
                Err(TransportError::Disconnected)
            }
        }
    }
}
