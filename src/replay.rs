//! Replay of an encoded reading log through the configured sinks
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::sync::{Arc, Mutex};

use log::{info, warn};
use tokio::io::AsyncReadExt;

use crate::codec::{ByteBuffer, Codec};
use crate::config::LoggerConfig;
use crate::error::CodecError;
use crate::latest::LatestSnapshot;
use crate::models::ReadingKind;
use crate::sinks::{Dispatcher, LogSink, SinkKind, SnapshotSink, StreamSink};

/// Outcome of one replay
#[derive(Debug, Default)]
pub struct ReplayReport {
    pub decoded: usize,
    pub by_kind: BTreeMap<ReadingKind, usize>,
    /// Decode error that ended the replay early, if any
    pub error: Option<CodecError>,
    /// Bytes left undecoded in the input
    pub remaining: usize,
}

/// Read the whole encoded input from `path`, or stdin when `None`
pub async fn read_input(path: Option<&Path>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) => tokio::fs::read(path).await,
        None => {
            let mut bytes = Vec::new();
            tokio::io::stdin().read_to_end(&mut bytes).await?;
            Ok(bytes)
        }
    }
}

/// Build a dispatcher for the sinks named in `config`
///
/// Returns the shared latest-snapshot cache when the snapshot sink is enabled.
pub fn build_dispatcher(
    config: &LoggerConfig,
) -> io::Result<(Dispatcher, Option<Arc<Mutex<LatestSnapshot>>>)> {
    let mut dispatcher = Dispatcher::new();
    let mut latest = None;

    for kind in &config.sinks {
        match kind {
            SinkKind::Log => dispatcher.add(LogSink::default()),
            SinkKind::Stream => match &config.output {
                Some(path) => dispatcher.add(StreamSink::new(BufWriter::new(File::create(path)?))),
                None => dispatcher.add(StreamSink::new(io::stdout())),
            },
            SinkKind::Snapshot => {
                let sink = SnapshotSink::new(Arc::new(Mutex::new(LatestSnapshot::new(
                    config.temp_sensors,
                ))));
                latest = Some(sink.handle());
                dispatcher.add(sink);
            }
        }
    }

    Ok((dispatcher, latest))
}

/// Decode every reading in `bytes` and hand each one to `dispatcher`
///
/// Decoding stops at the first error; readings before it have already been
/// dispatched.
pub fn replay_bytes(codec: &Codec, bytes: Vec<u8>, dispatcher: &mut Dispatcher) -> ReplayReport {
    let mut buf = ByteBuffer::from(bytes);
    let mut report = ReplayReport::default();

    for result in codec.readings(&mut buf) {
        match result {
            Ok(reading) => {
                dispatcher.dispatch(&reading);
                report.decoded += 1;
                *report.by_kind.entry(reading.kind()).or_insert(0) += 1;
            }
            Err(e) => {
                warn!("Stopping replay after {} readings: {}", report.decoded, e);
                report.error = Some(e);
            }
        }
    }

    report.remaining = buf.len();
    info!(
        "Replayed {} readings, {} bytes left undecoded",
        report.decoded, report.remaining
    );
    report
}
