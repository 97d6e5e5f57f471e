//! Transport trait and error types.

use std::io;

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The device accepted fewer bytes than were sent.
    #[error("short write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
    /// The device went away.
    #[error("device disconnected")]
    Disconnected,
}

/// Byte sink that carries encoded frames to the device.
///
/// The sender owns its transport for the duration of a send; there is no
/// locking, so callers must not share one transport between senders.
pub trait Transport {
    /// Write one encoded frame.
    ///
    /// Returns the number of bytes accepted. Anything short of
    /// `bytes.len()` is treated as a failure by the sender.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, TransportError>;

    /// Check that the device is still there.
    ///
    /// Called after every neutral frame. Defaults to always alive.
    fn check_alive(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, TransportError> {
        (**self).write(bytes)
    }

    fn check_alive(&mut self) -> Result<(), TransportError> {
        (**self).check_alive()
    }
}

/// Adapter that turns any [`io::Write`] into a [`Transport`].
///
/// Each frame is written in full and flushed.
#[derive(Debug, Default)]
pub struct IoTransport<W> {
    writer: W,
}

impl<W: io::Write> IoTransport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> Transport for IoTransport<W> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, TransportError> {
        self.writer.write_all(bytes)?;
        self.writer.flush()?;
        Ok(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingWriter;

    impl io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_io_transport_writes_all() {
        let mut transport = IoTransport::new(Vec::new());
        assert_eq!(transport.write(b"4 8\r\n").unwrap(), 5);
        assert_eq!(transport.write(b"0 8\r\n").unwrap(), 5);
        assert!(transport.check_alive().is_ok());
        assert_eq!(transport.into_inner(), b"4 8\r\n0 8\r\n");
    }

    #[test]
    fn test_io_transport_error() {
        let mut transport = IoTransport::new(FailingWriter);
        let err = transport.write(b"0 8\r\n").unwrap_err();
        assert!(matches!(err, TransportError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn test_mut_ref_transport() {
        fn write_frame<T: Transport>(mut transport: T) -> Result<usize, TransportError> {
            transport.write(&[1, 2, 3])
        }

        let mut inner = IoTransport::new(Vec::new());
        assert_eq!(write_frame(&mut inner).unwrap(), 3);
        assert_eq!(inner.get_ref(), &vec![1, 2, 3]);
    }
}
