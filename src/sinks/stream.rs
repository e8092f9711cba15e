use std::io::Write;

use log::error;

use super::Sink;
use crate::models::Reading;
use crate::utils::render_reading;

/// Writes one rendered line per reading to a file or stream
pub struct StreamSink<W: Write> {
    writer: W,
}

impl<W: Write> StreamSink<W> {
    pub fn new(writer: W) -> Self {
        StreamSink { writer }
    }
}

impl<W: Write> Sink for StreamSink<W> {
    fn push_reading(&mut self, reading: &Reading) {
        if let Err(e) = writeln!(self.writer, "{}", render_reading(reading)) {
            error!("Failed to write {} reading: {}", reading.sensor_name(), e);
        }
    }
}

impl<W: Write> Drop for StreamSink<W> {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            error!("Failed to flush reading stream: {}", e);
        }
    }
}
