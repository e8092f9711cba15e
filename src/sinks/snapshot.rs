use std::sync::{Arc, Mutex};

use log::{error, warn};

use super::Sink;
use crate::latest::LatestSnapshot;
use crate::models::Reading;

/// Keeps the latest-snapshot cache current for anything serving it
///
/// The cache is shared behind a mutex so a server task can read it while
/// readings are still being pushed.
#[derive(Debug, Clone)]
pub struct SnapshotSink {
    latest: Arc<Mutex<LatestSnapshot>>,
}

impl SnapshotSink {
    pub fn new(latest: Arc<Mutex<LatestSnapshot>>) -> Self {
        SnapshotSink { latest }
    }

    pub fn handle(&self) -> Arc<Mutex<LatestSnapshot>> {
        self.latest.clone()
    }
}

impl Sink for SnapshotSink {
    fn push_reading(&mut self, reading: &Reading) {
        let mut latest = match self.latest.lock() {
            Ok(latest) => latest,
            Err(e) => {
                error!("Latest snapshot lock poisoned: {}", e);
                return;
            }
        };
        if let Err(e) = latest.update(reading) {
            warn!("Dropping {} reading: {}", reading.sensor_name(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Payload, Temp, Uvi};

    #[test]
    fn test_updates_shared_snapshot() {
        let latest = Arc::new(Mutex::new(LatestSnapshot::new(1)));
        let mut sink = SnapshotSink::new(latest.clone());

        sink.push_reading(&Reading::new(9, Payload::Uvi(Uvi { index: 3 })));
        sink.push_reading(&Reading::new(
            10,
            Payload::Temp(Temp {
                sensor_id: 5,
                humidity: 0,
                heat_index: 0,
                temp: 0.0,
                dew_point: 0.0,
            }),
        ));

        let latest = latest.lock().unwrap();
        assert_eq!(latest.uvi().map(|r| r.time), Some(9));
        assert!(latest.temp(5).is_none());
    }
}
