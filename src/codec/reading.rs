//! Tagged encoding of readings
//!
//! ```text
//! Reading := Tag:Int Time:Int Payload(Tag)
//!
//! Wind    := direction:Text gust:Float avg:Float chill:Float
//! Rain    := rate:Float hour:Float 24h:Float total:Float
//! Uvi     := index:Int
//! Baro    := pressure:Int alt_pressure:Int forecast:Text
//! Temp    := sensor_id:Int humidity:Int heat_index:Int temp:Float dew_point:Float
//! Status  := wind_bat:Text temp_bat:Text rain_bat:Text uv_bat:Text
//!            wind_sensor:Text temp_sensor:Text rain_sensor:Text uv_sensor:Text
//!            rtc_signal:Text
//! Meta    := packets:Int failed:Int frames:Int error_rate:Float bytes:Int latest_packet:Int
//! ```
//!
//! There are no length prefixes; every field is self-delimiting, so readings may
//! be concatenated in one buffer and decoded back in order.

use log::debug;

use super::buffer::ByteBuffer;
use super::primitive::{
    put_float, put_int, put_text, put_u64, take_float, take_int, take_narrow, take_text, take_u64,
};
use super::Codec;
use crate::error::{CodecError, Result};
use crate::models::{Baro, Meta, Payload, Rain, Reading, ReadingKind, Status, Temp, Uvi, Wind};

impl Codec {
    /// Append one encoded reading to `buf`
    ///
    /// Fails only on values the wire cannot carry (text containing a nul byte,
    /// UV index above 15). A rejected reading leaves `buf` untouched.
    pub fn encode(&self, reading: &Reading, buf: &mut ByteBuffer) -> Result<()> {
        let mut record = ByteBuffer::new();
        self.encode_record(reading, &mut record)?;
        buf.append_buffer(record);
        Ok(())
    }

    fn encode_record(&self, reading: &Reading, buf: &mut ByteBuffer) -> Result<()> {
        put_int(buf, reading.kind().into());
        put_int(buf, reading.time);

        match &reading.payload {
            Payload::Wind(wind) => self.encode_wind(buf, wind),
            Payload::Rain(rain) => {
                self.encode_rain(buf, rain);
                Ok(())
            }
            Payload::Uvi(uvi) => encode_uvi(buf, uvi),
            Payload::Baro(baro) => encode_baro(buf, baro),
            Payload::Temp(temp) => {
                self.encode_temp(buf, temp);
                Ok(())
            }
            Payload::Status(status) => encode_status(buf, status),
            Payload::Meta(meta) => {
                self.encode_meta(buf, meta);
                Ok(())
            }
        }
    }

    pub fn encode_to_vec(&self, reading: &Reading) -> Result<Vec<u8>> {
        let mut buf = ByteBuffer::new();
        self.encode_record(reading, &mut buf)?;
        Ok(buf.into())
    }

    /// Remove one reading from the head of `buf`
    ///
    /// A tag outside the known kinds, or a buffer that ends mid-field, is
    /// reported as an error. The buffer is left wherever decoding stopped.
    pub fn decode(&self, buf: &mut ByteBuffer) -> Result<Reading> {
        let tag = take_int(buf)?;
        let kind = ReadingKind::try_from(tag).map_err(|_| CodecError::UnknownKind(tag))?;
        let time = take_int(buf)?;

        let payload = match kind {
            ReadingKind::Wind => Payload::Wind(self.decode_wind(buf)?),
            ReadingKind::Rain => Payload::Rain(self.decode_rain(buf)?),
            ReadingKind::Uvi => Payload::Uvi(decode_uvi(buf)?),
            ReadingKind::Baro => Payload::Baro(decode_baro(buf)?),
            ReadingKind::Temp => Payload::Temp(self.decode_temp(buf)?),
            ReadingKind::Status => Payload::Status(decode_status(buf)?),
            ReadingKind::Meta => Payload::Meta(self.decode_meta(buf)?),
        };

        debug!("Decoded {} reading at {}", kind, time);
        Ok(Reading { time, payload })
    }

    /// Iterate over the readings concatenated in `buf`
    pub fn readings<'a>(&self, buf: &'a mut ByteBuffer) -> Readings<'a> {
        Readings {
            codec: *self,
            buf,
            failed: false,
        }
    }

    /// Decode every reading in `buf`
    ///
    /// Stops at the first error, returning it with the readings decoded before it.
    pub fn decode_all(&self, buf: &mut ByteBuffer) -> (Vec<Reading>, Option<CodecError>) {
        let mut readings = Vec::new();
        for result in self.readings(buf) {
            match result {
                Ok(reading) => readings.push(reading),
                Err(e) => return (readings, Some(e)),
            }
        }
        (readings, None)
    }

    fn encode_wind(&self, buf: &mut ByteBuffer, wind: &Wind) -> Result<()> {
        put_text(buf, &wind.direction)?;
        put_float(buf, wind.gust_speed, self.floats);
        put_float(buf, wind.avg_speed, self.floats);
        put_float(buf, wind.chill, self.floats);
        Ok(())
    }

    fn decode_wind(&self, buf: &mut ByteBuffer) -> Result<Wind> {
        Ok(Wind {
            direction: take_text(buf)?,
            gust_speed: take_float(buf, self.floats)?,
            avg_speed: take_float(buf, self.floats)?,
            chill: take_float(buf, self.floats)?,
        })
    }

    fn encode_rain(&self, buf: &mut ByteBuffer, rain: &Rain) {
        put_float(buf, rain.rate, self.floats);
        put_float(buf, rain.accum_hour, self.floats);
        put_float(buf, rain.accum_24h, self.floats);
        put_float(buf, rain.accum_total, self.floats);
    }

    fn decode_rain(&self, buf: &mut ByteBuffer) -> Result<Rain> {
        Ok(Rain {
            rate: take_float(buf, self.floats)?,
            accum_hour: take_float(buf, self.floats)?,
            accum_24h: take_float(buf, self.floats)?,
            accum_total: take_float(buf, self.floats)?,
        })
    }

    fn encode_temp(&self, buf: &mut ByteBuffer, temp: &Temp) {
        put_int(buf, temp.sensor_id.into());
        put_int(buf, temp.humidity.into());
        put_int(buf, temp.heat_index.into());
        put_float(buf, temp.temp, self.floats);
        put_float(buf, temp.dew_point, self.floats);
    }

    fn decode_temp(&self, buf: &mut ByteBuffer) -> Result<Temp> {
        Ok(Temp {
            sensor_id: take_narrow(buf, "sensor_id")?,
            humidity: take_narrow(buf, "humidity")?,
            heat_index: take_narrow(buf, "heat_index")?,
            temp: take_float(buf, self.floats)?,
            dew_point: take_float(buf, self.floats)?,
        })
    }

    fn encode_meta(&self, buf: &mut ByteBuffer, meta: &Meta) {
        put_int(buf, meta.num_packets.into());
        put_int(buf, meta.num_failed.into());
        put_int(buf, meta.num_frames.into());
        put_float(buf, meta.error_rate, self.floats);
        put_u64(buf, meta.num_bytes);
        put_int(buf, meta.latest_packet);
    }

    fn decode_meta(&self, buf: &mut ByteBuffer) -> Result<Meta> {
        Ok(Meta {
            num_packets: take_narrow(buf, "num_packets")?,
            num_failed: take_narrow(buf, "num_failed")?,
            num_frames: take_narrow(buf, "num_frames")?,
            error_rate: take_float(buf, self.floats)?,
            num_bytes: take_u64(buf)?,
            latest_packet: take_int(buf)?,
            uptime: 0,
        })
    }
}

fn encode_uvi(buf: &mut ByteBuffer, uvi: &Uvi) -> Result<()> {
    if uvi.index > Uvi::MAX_INDEX {
        return Err(CodecError::out_of_range("uv_index", uvi.index.into()));
    }
    put_int(buf, uvi.index.into());
    Ok(())
}

fn decode_uvi(buf: &mut ByteBuffer) -> Result<Uvi> {
    let index = take_int(buf)?;
    match u8::try_from(index) {
        Ok(i) if i <= Uvi::MAX_INDEX => Ok(Uvi { index: i }),
        _ => Err(CodecError::out_of_range("uv_index", index)),
    }
}

fn encode_baro(buf: &mut ByteBuffer, baro: &Baro) -> Result<()> {
    put_int(buf, baro.pressure.into());
    put_int(buf, baro.alt_pressure.into());
    put_text(buf, &baro.forecast)
}

fn decode_baro(buf: &mut ByteBuffer) -> Result<Baro> {
    Ok(Baro {
        pressure: take_narrow(buf, "pressure")?,
        alt_pressure: take_narrow(buf, "alt_pressure")?,
        forecast: take_text(buf)?,
    })
}

fn encode_status(buf: &mut ByteBuffer, status: &Status) -> Result<()> {
    for label in [
        &status.wind_battery,
        &status.temp_battery,
        &status.rain_battery,
        &status.uv_battery,
        &status.wind_sensor,
        &status.temp_sensor,
        &status.rain_sensor,
        &status.uv_sensor,
        &status.rtc_signal,
    ] {
        put_text(buf, label)?;
    }
    Ok(())
}

fn decode_status(buf: &mut ByteBuffer) -> Result<Status> {
    Ok(Status {
        wind_battery: take_text(buf)?,
        temp_battery: take_text(buf)?,
        rain_battery: take_text(buf)?,
        uv_battery: take_text(buf)?,

        wind_sensor: take_text(buf)?,
        temp_sensor: take_text(buf)?,
        rain_sensor: take_text(buf)?,
        uv_sensor: take_text(buf)?,

        rtc_signal: take_text(buf)?,
    })
}

/// Iterator returned by [`Codec::readings`]
///
/// Yields one `Err` at most, then ends.
pub struct Readings<'a> {
    codec: Codec,
    buf: &'a mut ByteBuffer,
    failed: bool,
}

impl Iterator for Readings<'_> {
    type Item = Result<Reading>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.buf.is_empty() {
            return None;
        }
        let result = self.codec.decode(self.buf);
        self.failed = result.is_err();
        Some(result)
    }
}
