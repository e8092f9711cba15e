use log::{log, Level};

use super::Sink;
use crate::models::Reading;
use crate::utils::render_reading;

pub const READING_TARGET: &str = "wmr::reading";

/// Renders every reading as one line through the `log` facade
#[derive(Debug, Clone, Copy)]
pub struct LogSink {
    level: Level,
}

impl Default for LogSink {
    fn default() -> Self {
        LogSink { level: Level::Info }
    }
}

impl Sink for LogSink {
    fn push_reading(&mut self, reading: &Reading) {
        log!(target: READING_TARGET, self.level, "{}", render_reading(reading));
    }
}
