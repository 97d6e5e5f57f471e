//! Sender: paces compiled frames out to a transport.

use core::time::Duration;

use combopad_proto::{
    AsciiCommand, Report, Serialize, SerializeError, MAX_COMMAND_SIZE, MAX_REPORT_SIZE,
};
use embedded_hal::delay::DelayNs;
use log::{debug, info, trace, warn};

use crate::combo::{Combo, Element};
use crate::input::Input;
use crate::settings::{Settings, WireFormat};
use crate::transport::{Transport, TransportError};

/// Where the sender is in its stream of frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SenderState {
    /// Nothing sent yet; the device is assumed to be at rest.
    #[default]
    Idle,
    /// The last report written to the device.
    Streaming(Report),
}

impl SenderState {
    /// The report the device currently holds.
    #[must_use]
    pub fn previous(&self) -> Report {
        match self {
            SenderState::Idle => Report::NEUTRAL,
            SenderState::Streaming(report) => *report,
        }
    }
}

/// Writes frames to a transport and blocks for each frame's duration.
///
/// Frames go out in order. The ASCII wire form only carries stick bytes
/// when a stick moved, so the sender tracks the last report it wrote.
///
/// # Error Handling
///
/// Transport and liveness failures stop the send at the failing frame and
/// are returned as is. Nothing is retried.
pub struct Sender<T, D> {
    transport: T,
    delay: D,
    settings: Settings,
    state: SenderState,
}

impl<T: Transport, D: DelayNs> Sender<T, D> {
    /// Create a sender from a transport, a delay provider and settings.
    pub fn new(transport: T, delay: D, settings: Settings) -> Self {
        Self {
            transport,
            delay,
            settings,
            state: SenderState::Idle,
        }
    }

    /// Compile `elements` and send the result, ending at rest.
    pub fn send<I>(&mut self, elements: I) -> Result<(), SendError>
    where
        I: IntoIterator<Item = Element>,
    {
        let combo = Combo::compile(elements, &self.settings);
        self.send_combo(&combo)
    }

    /// Send every frame of `combo`, then return the device to neutral.
    pub fn send_combo(&mut self, combo: &Combo) -> Result<(), SendError> {
        debug!("sending {} frames", combo.frame_count());
        for frame in combo.frames() {
            self.send_frame(frame)?;
        }
        self.release()
    }

    /// Send a neutral frame unless the device is already at rest.
    pub fn release(&mut self) -> Result<(), SendError> {
        if self.state.previous().is_neutral() {
            return Ok(());
        }
        self.send_frame(&Input::NEUTRAL)
    }

    /// Encode, write and hold a single frame.
    pub fn send_frame(&mut self, frame: &Input) -> Result<(), SendError> {
        let previous = self.state.previous();
        let duration = frame.duration_or(self.settings.input_duration);

        if self.settings.echo_frames {
            info!("{frame}");
        }

        match self.settings.wire_format {
            WireFormat::Binary => {
                let bytes = frame.report.serialize_to_vec::<MAX_REPORT_SIZE>()?;
                debug!("binary frame {:02x?}", bytes.as_slice());
                self.write_all(&bytes)?;
            }
            WireFormat::Ascii => {
                let command = AsciiCommand::diff(&previous, &frame.report);
                let bytes = command.serialize_to_vec::<MAX_COMMAND_SIZE>()?;
                debug!(
                    "ascii frame {:?}",
                    core::str::from_utf8(&bytes).unwrap_or_default().trim_end()
                );
                self.write_all(&bytes)?;
            }
        }
        self.state = SenderState::Streaming(frame.report);

        self.pause(duration);

        if frame.is_neutral() {
            self.transport.check_alive().map_err(|e| {
                warn!("liveness check failed: {e}");
                SendError::Liveness(e)
            })?;
        }
        Ok(())
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), SendError> {
        let written = self.transport.write(bytes)?;
        if written != bytes.len() {
            return Err(TransportError::ShortWrite {
                written,
                expected: bytes.len(),
            }
            .into());
        }
        Ok(())
    }

    fn pause(&mut self, duration: Duration) {
        trace!("holding for {duration:?}");
        let mut micros = duration.as_micros();
        while micros > 0 {
            let chunk = u32::try_from(micros).unwrap_or(u32::MAX);
            self.delay.delay_us(chunk);
            micros -= u128::from(chunk);
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &SenderState {
        &self.state
    }

    /// Get a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Decompose the sender into its transport and delay provider.
    pub fn into_parts(self) -> (T, D) {
        (self.transport, self.delay)
    }
}

/// Error type for send operations.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// Writing a frame failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    /// The liveness check after a neutral frame failed.
    #[error("liveness check failed: {0}")]
    Liveness(TransportError),
    /// A frame did not fit the encode buffer.
    #[error("encode error: {0}")]
    Encode(#[from] SerializeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{buttons, left_stick};
    use combopad_proto::Buttons;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Write(Vec<u8>),
        Pause(Duration),
        Alive,
    }

    type Log = Arc<Mutex<Vec<Event>>>;

    struct MockTransport {
        log: Log,
        fail_on_write: Option<usize>,
        short_write: bool,
        dead: bool,
        writes: usize,
    }

    impl MockTransport {
        fn new(log: Log) -> Self {
            Self {
                log,
                fail_on_write: None,
                short_write: false,
                dead: false,
                writes: 0,
            }
        }
    }

    impl Transport for MockTransport {
        fn write(&mut self, bytes: &[u8]) -> Result<usize, TransportError> {
            if self.fail_on_write == Some(self.writes) {
                return Err(TransportError::Disconnected);
            }
            self.writes += 1;
            self.log.lock().unwrap().push(Event::Write(bytes.to_vec()));
            if self.short_write {
                Ok(bytes.len() - 1)
            } else {
                Ok(bytes.len())
            }
        }

        fn check_alive(&mut self) -> Result<(), TransportError> {
            self.log.lock().unwrap().push(Event::Alive);
            if self.dead {
                Err(TransportError::Disconnected)
            } else {
                Ok(())
            }
        }
    }

    struct MockDelay {
        log: Log,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.log
                .lock()
                .unwrap()
                .push(Event::Pause(Duration::from_nanos(u64::from(ns))));
        }

        fn delay_us(&mut self, us: u32) {
            self.log
                .lock()
                .unwrap()
                .push(Event::Pause(Duration::from_micros(u64::from(us))));
        }
    }

    fn sender(settings: Settings) -> (Sender<MockTransport, MockDelay>, Log) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let sender = Sender::new(
            MockTransport::new(log.clone()),
            MockDelay { log: log.clone() },
            settings,
        );
        (sender, log)
    }

    fn writes(log: &Log) -> Vec<Vec<u8>> {
        log.lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Event::Write(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    fn alive_checks(log: &Log) -> usize {
        log.lock()
            .unwrap()
            .iter()
            .filter(|e| **e == Event::Alive)
            .count()
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_send_binary_end_to_end() {
        let (mut sender, log) = sender(Settings::default().with_wire_format(WireFormat::Binary));

        sender
            .send([buttons::A.seconds(0.1).into(), buttons::B.seconds(0.1).into()])
            .unwrap();

        let events = log.lock().unwrap().clone();
        let neutral = Report::NEUTRAL.to_bytes().to_vec();
        assert_eq!(
            events,
            vec![
                Event::Write(Report::from_buttons(Buttons::A).to_bytes().to_vec()),
                Event::Pause(ms(100)),
                Event::Write(neutral.clone()),
                Event::Pause(ms(50)),
                Event::Alive,
                Event::Write(Report::from_buttons(Buttons::B).to_bytes().to_vec()),
                Event::Pause(ms(100)),
                Event::Write(neutral),
                Event::Pause(ms(50)),
                Event::Alive,
            ]
        );
        assert_eq!(sender.state(), &SenderState::Streaming(Report::NEUTRAL));
    }

    #[test]
    fn test_send_ascii_diff_encoding() {
        let (mut sender, log) = sender(Settings::default());

        let elements = [
            left_stick::LEFT.into(),
            (left_stick::LEFT + buttons::A).into(),
        ];
        sender.send(elements).unwrap();

        assert_eq!(
            writes(&log),
            vec![
                b"2 8 0 80\r\n".to_vec(),
                b"2 8 80 80\r\n".to_vec(),
                b"12 8 0 80\r\n".to_vec(),
                b"2 8 80 80\r\n".to_vec(),
            ]
        );
    }

    #[test]
    fn test_unchanged_stick_not_resent() {
        let settings = Settings::default().with_minimum_interval(Duration::ZERO);
        let (mut sender, log) = sender(settings);

        let elements = [
            left_stick::UP.into(),
            (left_stick::UP + buttons::X).into(),
        ];
        sender.send(elements).unwrap();

        assert_eq!(
            writes(&log),
            vec![
                b"2 8 80 0\r\n".to_vec(),
                b"20 8\r\n".to_vec(),
                b"2 8 80 80\r\n".to_vec(),
            ]
        );
        // Only the trailing neutral frame triggers a liveness check
        assert_eq!(alive_checks(&log), 1);
    }

    #[test]
    fn test_trailing_neutral_added_once() {
        let (mut sender, log) = sender(Settings::default());

        // Background still held at the end: one extra neutral frame
        sender
            .send([buttons::ZR.hold().into(), buttons::A.into()])
            .unwrap();
        let sent = writes(&log);
        assert_eq!(sent.len(), 3);
        assert_eq!(sent.last().unwrap(), &b"0 8\r\n".to_vec());

        // Already at rest: nothing extra
        log.lock().unwrap().clear();
        sender.send([buttons::A.into()]).unwrap();
        assert_eq!(writes(&log).len(), 2);
    }

    #[test]
    fn test_release_when_idle_sends_nothing() {
        let (mut sender, log) = sender(Settings::default());
        sender.release().unwrap();
        sender.send_combo(&Combo::new()).unwrap();
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(sender.state(), &SenderState::Idle);
    }

    #[test]
    fn test_default_duration_for_raw_frames() {
        let settings = Settings::default().with_input_duration(ms(20));
        let (mut sender, log) = sender(settings);
        sender.send_frame(&buttons::HOME).unwrap();
        assert_eq!(log.lock().unwrap()[1], Event::Pause(ms(20)));
        assert_eq!(sender.state().previous(), Report::from_buttons(Buttons::HOME));
    }

    #[test]
    fn test_transport_error_propagates() {
        let (mut sender, log) = sender(Settings::default());
        sender.transport_mut().fail_on_write = Some(1);

        let result = sender.send([buttons::A.into(), buttons::B.into()]);
        assert!(matches!(
            result,
            Err(SendError::Transport(TransportError::Disconnected))
        ));
        // Stopped at the failing frame, no retry
        assert_eq!(writes(&log).len(), 1);
        assert_eq!(sender.state().previous(), Report::from_buttons(Buttons::A));
    }

    #[test]
    fn test_short_write_is_error() {
        let (mut sender, _log) = sender(Settings::default());
        sender.transport_mut().short_write = true;

        let result = sender.send_frame(&buttons::A);
        assert!(matches!(
            result,
            Err(SendError::Transport(TransportError::ShortWrite {
                written: 5,
                expected: 6
            }))
        ));
    }

    #[test]
    fn test_liveness_failure_propagates() {
        let (mut sender, log) = sender(Settings::default());
        sender.transport_mut().dead = true;

        let result = sender.send([buttons::A.into(), buttons::B.into()]);
        assert!(matches!(
            result,
            Err(SendError::Liveness(TransportError::Disconnected))
        ));
        assert_eq!(writes(&log).len(), 2);
    }

    #[test]
    fn test_repeated_combo_is_expanded() {
        let settings = Settings::default();
        let combo = Combo::compile([buttons::A.into()], &settings)
            .repeat(3)
            .unwrap();
        let (mut sender, log) = sender(settings);
        sender.send_combo(&combo).unwrap();
        assert_eq!(writes(&log).len(), 6);
        assert_eq!(alive_checks(&log), 3);
    }

    #[test]
    fn test_long_pause_is_chunked() {
        let (mut sender, log) = sender(Settings::default());
        let long = buttons::A.with_duration(Duration::from_secs(5_000));
        sender.send_frame(&long).unwrap();

        let total: Duration = log
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Event::Pause(d) => Some(*d),
                _ => None,
            })
            .sum();
        assert_eq!(total, Duration::from_secs(5_000));
    }

    #[test]
    fn test_into_parts() {
        let (mut sender, _log) = sender(Settings::default());
        sender.send_frame(&buttons::A).unwrap();
        let (transport, _delay) = sender.into_parts();
        assert_eq!(transport.writes, 1);
    }
}
