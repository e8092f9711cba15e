use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Kind tag carried at the head of every encoded reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, IntoPrimitive, TryFromPrimitive)]
#[repr(i64)]
pub enum ReadingKind {
    Wind = 0xD3,
    Rain = 0xD4,
    Uvi = 0xD5,
    Baro = 0xD6,
    Temp = 0xD7,
    Status = 0xD9,
    /// System meta-reading, never produced by the station itself
    Meta = 0xFF,
}

impl ReadingKind {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wind => "wind",
            Self::Rain => "rain",
            Self::Uvi => "uvi",
            Self::Baro => "baro",
            Self::Temp => "temp",
            Self::Status => "status",
            Self::Meta => "meta",
        }
    }
}

impl fmt::Display for ReadingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wind {
    /// Direction label, e.g. "NNE"
    pub direction: String,
    /// Gust speed, m/s
    pub gust_speed: f32,
    /// Average speed, m/s
    pub avg_speed: f32,
    pub chill: f32,
}

/// Rain amounts in mm/m^2
#[derive(Debug, Clone, PartialEq)]
pub struct Rain {
    pub rate: f32,
    pub accum_hour: f32,
    /// Last 24 hours, excluding the current hour
    pub accum_24h: f32,
    /// Accumulated since the station epoch (2007-01-01 12:00)
    pub accum_total: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uvi {
    /// UV index in range 0..=15
    pub index: u8,
}

impl Uvi {
    pub const MAX_INDEX: u8 = 15;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baro {
    /// Immediate pressure, hPa
    pub pressure: u32,
    /// Altitude-adjusted pressure, hPa
    pub alt_pressure: u32,
    /// Name of the forecast icon
    pub forecast: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Temp {
    /// 0 is the console, external sensors count up from 1
    pub sensor_id: u8,
    /// Relative humidity, percent
    pub humidity: u8,
    /// 0..=4, 0 means undefined (temperature too low)
    pub heat_index: u8,
    /// Degrees Celsius
    pub temp: f32,
    /// Degrees Celsius
    pub dew_point: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub wind_battery: String,
    pub temp_battery: String,
    pub rain_battery: String,
    pub uv_battery: String,

    pub wind_sensor: String,
    pub temp_sensor: String,
    pub rain_sensor: String,
    pub uv_sensor: String,

    pub rtc_signal: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Meta {
    pub num_packets: u32,
    pub num_failed: u32,
    pub num_frames: u32,
    pub error_rate: f32,
    pub num_bytes: u64,
    /// Unix time of the latest packet received from the station
    pub latest_packet: i64,
    /// Seconds since startup; kept in memory only, not part of the wire layout
    pub uptime: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Wind(Wind),
    Rain(Rain),
    Uvi(Uvi),
    Baro(Baro),
    Temp(Temp),
    Status(Status),
    Meta(Meta),
}

/// One timestamped observation or system-status record
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Unix time in seconds
    pub time: i64,
    pub payload: Payload,
}

impl Reading {
    pub fn new(time: i64, payload: Payload) -> Self {
        Reading { time, payload }
    }

    /// The kind tag always follows the payload, so the two cannot disagree.
    pub fn kind(&self) -> ReadingKind {
        match self.payload {
            Payload::Wind(_) => ReadingKind::Wind,
            Payload::Rain(_) => ReadingKind::Rain,
            Payload::Uvi(_) => ReadingKind::Uvi,
            Payload::Baro(_) => ReadingKind::Baro,
            Payload::Temp(_) => ReadingKind::Temp,
            Payload::Status(_) => ReadingKind::Status,
            Payload::Meta(_) => ReadingKind::Meta,
        }
    }

    /// Short human name of the sensor that produced this reading
    ///
    /// Temperature readings are suffixed with their sensor id (`temp0`, `temp1`, ...).
    pub fn sensor_name(&self) -> String {
        match &self.payload {
            Payload::Temp(temp) => format!("temp{}", temp.sensor_id),
            _ => self.kind().as_str().to_string(),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Wind(w) => write!(
                f,
                "dir={} gust={:.1} m/s avg={:.1} m/s chill={:.1}",
                w.direction, w.gust_speed, w.avg_speed, w.chill
            ),
            Payload::Rain(r) => write!(
                f,
                "rate={:.1} hour={:.1} 24h={:.1} total={:.1}",
                r.rate, r.accum_hour, r.accum_24h, r.accum_total
            ),
            Payload::Uvi(u) => write!(f, "index={}", u.index),
            Payload::Baro(b) => write!(
                f,
                "pressure={} hPa alt_pressure={} hPa forecast={}",
                b.pressure, b.alt_pressure, b.forecast
            ),
            Payload::Temp(t) => write!(
                f,
                "sensor={} temp={:.1}°C dew_point={:.1}°C humidity={}% heat_index={}",
                t.sensor_id, t.temp, t.dew_point, t.humidity, t.heat_index
            ),
            Payload::Status(s) => write!(
                f,
                "battery(wind={} temp={} rain={} uv={}) sensor(wind={} temp={} rain={} uv={}) rtc={}",
                s.wind_battery,
                s.temp_battery,
                s.rain_battery,
                s.uv_battery,
                s.wind_sensor,
                s.temp_sensor,
                s.rain_sensor,
                s.uv_sensor,
                s.rtc_signal
            ),
            Payload::Meta(m) => write!(
                f,
                "packets={} failed={} frames={} error_rate={:.2}% bytes={} latest_packet={}",
                m.num_packets,
                m.num_failed,
                m.num_frames,
                m.error_rate,
                m.num_bytes,
                m.latest_packet
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(i64::from(ReadingKind::Wind), 0xD3);
        assert_eq!(i64::from(ReadingKind::Status), 0xD9);
        assert_eq!(ReadingKind::try_from(0xFF_i64).ok(), Some(ReadingKind::Meta));
        assert!(ReadingKind::try_from(0xD8_i64).is_err());
        assert!(ReadingKind::try_from(0_i64).is_err());
    }

    #[test]
    fn test_kind_follows_payload() {
        let reading = Reading::new(500, Payload::Uvi(Uvi { index: 7 }));
        assert_eq!(reading.kind(), ReadingKind::Uvi);
    }

    #[test]
    fn test_sensor_name() {
        let temp = Reading::new(
            0,
            Payload::Temp(Temp {
                sensor_id: 3,
                humidity: 40,
                heat_index: 0,
                temp: 12.5,
                dew_point: 1.0,
            }),
        );
        assert_eq!(temp.sensor_name(), "temp3");

        let uvi = Reading::new(0, Payload::Uvi(Uvi { index: 1 }));
        assert_eq!(uvi.sensor_name(), "uvi");
    }
}
