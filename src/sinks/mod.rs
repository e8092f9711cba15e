//! Consumers of decoded readings
//!
//! Sinks run synchronously, once per reading, in the order readings are
//! produced. A sink only borrows the reading for the duration of the call and
//! must clone whatever it wants to keep.

pub mod logger;
pub mod snapshot;
pub mod stream;

use std::fmt;
use std::str::FromStr;

use crate::models::Reading;

pub use logger::LogSink;
pub use snapshot::SnapshotSink;
pub use stream::StreamSink;

pub trait Sink {
    fn push_reading(&mut self, reading: &Reading);
}

/// Sinks that can be enabled from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    /// Readings rendered through the `log` facade
    Log,
    /// Readings rendered one per line to a file or stdout
    Stream,
    /// Readings kept in the latest-snapshot cache
    Snapshot,
}

impl FromStr for SinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" => Ok(SinkKind::Log),
            "stream" | "file" => Ok(SinkKind::Stream),
            "snapshot" | "server" => Ok(SinkKind::Snapshot),
            other => Err(format!("unknown sink '{}'", other)),
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::Log => f.write_str("log"),
            SinkKind::Stream => f.write_str("stream"),
            SinkKind::Snapshot => f.write_str("snapshot"),
        }
    }
}

/// Fans each reading out to every registered sink, in registration order
#[derive(Default)]
pub struct Dispatcher {
    sinks: Vec<Box<dyn Sink + Send>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<S: Sink + Send + 'static>(&mut self, sink: S) {
        self.sinks.push(Box::new(sink));
    }

    pub fn dispatch(&mut self, reading: &Reading) {
        for sink in self.sinks.iter_mut() {
            sink.push_reading(reading);
        }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Payload, Uvi};
    use std::sync::{Arc, Mutex};

    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<(&'static str, i64)>>>,
    }

    impl Sink for Recorder {
        fn push_reading(&mut self, reading: &Reading) {
            self.log.lock().unwrap().push((self.name, reading.time));
        }
    }

    #[test]
    fn test_dispatch_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = Dispatcher::new();
        assert!(dispatcher.is_empty());
        dispatcher.add(Recorder {
            name: "a",
            log: log.clone(),
        });
        dispatcher.add(Recorder {
            name: "b",
            log: log.clone(),
        });
        assert_eq!(dispatcher.len(), 2);

        for time in [1, 2] {
            dispatcher.dispatch(&Reading::new(time, Payload::Uvi(Uvi { index: 0 })));
        }

        assert_eq!(
            *log.lock().unwrap(),
            vec![("a", 1), ("b", 1), ("a", 2), ("b", 2)]
        );
    }

    #[test]
    fn test_parse_sink_kind() {
        assert_eq!("LOG".parse(), Ok(SinkKind::Log));
        assert_eq!("file".parse(), Ok(SinkKind::Stream));
        assert_eq!("snapshot".parse(), Ok(SinkKind::Snapshot));
        assert!("yaml".parse::<SinkKind>().is_err());
    }
}
