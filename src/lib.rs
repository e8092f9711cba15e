//! Weather-station reading log
//!
//! Readings from a WMR weather station are encoded into a tagged binary form
//! for persistence or transmission, and decoded back into [`Reading`] values
//! that are handed to sinks.
//!
//! ```
//! use wmr_logger::codec::{ByteBuffer, Codec};
//! use wmr_logger::models::{Payload, Reading, Uvi};
//!
//! let codec = Codec::default();
//! let reading = Reading::new(500, Payload::Uvi(Uvi { index: 7 }));
//!
//! let mut buf = ByteBuffer::new();
//! codec.encode(&reading, &mut buf).unwrap();
//! assert_eq!(buf.len(), 24);
//!
//! assert_eq!(codec.decode(&mut buf).unwrap(), reading);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod latest;
pub mod models;
pub mod replay;
pub mod sinks;
pub mod utils;

pub use codec::{ByteBuffer, Codec, FloatEncoding};
pub use error::{CodecError, SnapshotError};
pub use latest::LatestSnapshot;
pub use models::{Payload, Reading, ReadingKind};
