//! Most recent reading of every kind
use crate::error::SnapshotError;
use crate::models::{Payload, Reading, ReadingKind};

pub const DEFAULT_TEMP_SENSORS: usize = 10;

/// One slot per reading kind, temperature readings get one slot per sensor id
///
/// Slots are overwritten by newer readings and never expire; consumers decide
/// whether a reading is still relevant from its timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestSnapshot {
    wind: Option<Reading>,
    rain: Option<Reading>,
    uvi: Option<Reading>,
    baro: Option<Reading>,
    temp: Vec<Option<Reading>>,
    status: Option<Reading>,
    meta: Option<Reading>,
}

impl Default for LatestSnapshot {
    fn default() -> Self {
        Self::new(DEFAULT_TEMP_SENSORS)
    }
}

impl LatestSnapshot {
    /// Create an empty cache with `temp_sensors` temperature slots (ids `0..temp_sensors`)
    pub fn new(temp_sensors: usize) -> Self {
        LatestSnapshot {
            wind: None,
            rain: None,
            uvi: None,
            baro: None,
            temp: vec![None; temp_sensors],
            status: None,
            meta: None,
        }
    }

    /// Store `reading` in the slot for its kind, replacing the previous one
    pub fn update(&mut self, reading: &Reading) -> Result<(), SnapshotError> {
        let slot = match &reading.payload {
            Payload::Wind(_) => &mut self.wind,
            Payload::Rain(_) => &mut self.rain,
            Payload::Uvi(_) => &mut self.uvi,
            Payload::Baro(_) => &mut self.baro,
            Payload::Status(_) => &mut self.status,
            Payload::Meta(_) => &mut self.meta,
            Payload::Temp(temp) => {
                let capacity = self.temp.len();
                self.temp
                    .get_mut(usize::from(temp.sensor_id))
                    .ok_or(SnapshotError::SensorOutOfRange {
                        sensor_id: temp.sensor_id,
                        capacity,
                    })?
            }
        };
        *slot = Some(reading.clone());
        Ok(())
    }

    pub fn wind(&self) -> Option<&Reading> {
        self.wind.as_ref()
    }

    pub fn rain(&self) -> Option<&Reading> {
        self.rain.as_ref()
    }

    pub fn uvi(&self) -> Option<&Reading> {
        self.uvi.as_ref()
    }

    pub fn baro(&self) -> Option<&Reading> {
        self.baro.as_ref()
    }

    pub fn temp(&self, sensor_id: u8) -> Option<&Reading> {
        self.temp.get(usize::from(sensor_id))?.as_ref()
    }

    pub fn status(&self) -> Option<&Reading> {
        self.status.as_ref()
    }

    pub fn meta(&self) -> Option<&Reading> {
        self.meta.as_ref()
    }

    pub fn temp_sensors(&self) -> usize {
        self.temp.len()
    }

    /// Latest reading of `kind`; for temperature, the one from the console (sensor 0)
    pub fn get(&self, kind: ReadingKind) -> Option<&Reading> {
        match kind {
            ReadingKind::Wind => self.wind(),
            ReadingKind::Rain => self.rain(),
            ReadingKind::Uvi => self.uvi(),
            ReadingKind::Baro => self.baro(),
            ReadingKind::Temp => self.temp(0),
            ReadingKind::Status => self.status(),
            ReadingKind::Meta => self.meta(),
        }
    }

    /// All occupied slots, temperature sensors in id order
    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        [&self.wind, &self.rain, &self.uvi, &self.baro]
            .into_iter()
            .chain(self.temp.iter())
            .chain([&self.status, &self.meta])
            .filter_map(Option::as_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Temp, Uvi};

    fn temp(sensor_id: u8, time: i64) -> Reading {
        Reading::new(
            time,
            Payload::Temp(Temp {
                sensor_id,
                humidity: 50,
                heat_index: 0,
                temp: 20.0,
                dew_point: 9.0,
            }),
        )
    }

    #[test]
    fn test_newer_reading_overwrites() {
        let mut latest = LatestSnapshot::default();
        latest.update(&Reading::new(1, Payload::Uvi(Uvi { index: 2 }))).unwrap();
        latest.update(&Reading::new(2, Payload::Uvi(Uvi { index: 5 }))).unwrap();

        let uvi = latest.uvi().unwrap();
        assert_eq!(uvi.time, 2);
        assert_eq!(uvi.payload, Payload::Uvi(Uvi { index: 5 }));
        assert!(latest.wind().is_none());
    }

    #[test]
    fn test_temperature_slots_per_sensor() {
        let mut latest = LatestSnapshot::new(3);
        latest.update(&temp(0, 10)).unwrap();
        latest.update(&temp(2, 11)).unwrap();

        assert_eq!(latest.temp(0).map(|r| r.time), Some(10));
        assert!(latest.temp(1).is_none());
        assert_eq!(latest.temp(2).map(|r| r.time), Some(11));
        assert_eq!(latest.get(ReadingKind::Temp).map(|r| r.time), Some(10));
    }

    #[test]
    fn test_sensor_beyond_capacity_is_rejected() {
        let mut latest = LatestSnapshot::new(2);
        assert_eq!(
            latest.update(&temp(2, 1)),
            Err(SnapshotError::SensorOutOfRange {
                sensor_id: 2,
                capacity: 2
            })
        );
        assert!(latest.is_empty());
        assert!(latest.temp(200).is_none());
    }

    #[test]
    fn test_iter_visits_occupied_slots() {
        let mut latest = LatestSnapshot::new(4);
        latest.update(&temp(3, 5)).unwrap();
        latest.update(&Reading::new(6, Payload::Uvi(Uvi { index: 1 }))).unwrap();

        let names: Vec<String> = latest.iter().map(Reading::sensor_name).collect();
        assert_eq!(names, vec!["uvi", "temp3"]);
    }
}
