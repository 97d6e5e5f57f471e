//! Combo compiler and paced frame sender for serial controller bridges.
//!
//! This crate turns combo descriptions into timed frames and streams them
//! to a controller bridge. It has no platform dependencies: the byte sink
//! is a [`Transport`] and pacing goes through
//! [`embedded_hal::delay::DelayNs`], so everything can be exercised on the
//! host with mocks.
//!
//! # Overview
//!
//! - [`input`]: timed inputs ([`Input`]) and the [`Hold`] / [`EndHold`] markers
//! - [`presets`]: named inputs (`buttons::A`, `left_stick::UP`, ...)
//! - [`combo`]: the [`Element`] list and its compiler ([`Combo::compile`])
//! - [`settings`]: timing defaults and wire format ([`Settings`])
//! - [`transport`]: byte sink trait ([`Transport`])
//! - [`sender`]: the paced send loop ([`Sender`])
//!
//! # Example
//!
//! ```rust
//! use combopad_core::presets::{buttons, hat};
//! use combopad_core::{Combo, EndHold, Element, Settings};
//!
//! let settings = Settings::default();
//! let combo = Combo::compile(
//!     [
//!         hat::DOWN.hold().into(),
//!         buttons::A.into(),
//!         EndHold::ALL.into(),
//!         Element::delay_secs(0.2)?,
//!         buttons::B.seconds(0.1).into(),
//!     ],
//!     &settings,
//! )
//! .repeat(3)?;
//!
//! assert_eq!(combo.frame_count(), 4 * 3);
//! # Ok::<(), combopad_core::ComboError>(())
//! ```
//!
//! # Features
//!
//! - **`serde`**: derive `Deserialize` / `Serialize` for [`Settings`]

pub mod combo;
pub mod input;
pub mod presets;
pub mod sender;
pub mod settings;
pub mod transport;

// Re-export main types at crate root
pub use combo::{Combo, ComboError, Element, Frames, Step};
pub use input::{EndHold, Hold, Input};
pub use sender::{SendError, Sender, SenderState};
pub use settings::{Settings, WireFormat, DEFAULT_INPUT_DURATION, DEFAULT_MINIMUM_INTERVAL};
pub use transport::{IoTransport, Transport, TransportError};

pub use combopad_proto as proto;
