//! Blocking delay for pacing frames on the host.

use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;

/// [`DelayNs`] backed by [`thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        thread::sleep(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_delay_blocks() {
        let mut delay = StdDelay;
        let start = Instant::now();
        delay.delay_us(20_000);
        delay.delay_ms(10);
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
