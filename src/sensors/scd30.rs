//! Sensirion SCD-30 CO2 / temperature / humidity sensor over I2C.
//!
//! Generic over any `embedded-hal` 1.0 I2C bus and delay provider.
//! Every 16-bit word on the wire is followed by a CRC-8 byte
//! (polynomial 0x31, init 0xFF).  Measurements are three big-endian
//! IEEE-754 floats: CO2 (ppm), temperature (C), relative humidity (%).
//!
//! The sensor runs in continuous mode; [`Scd30::read_climate`] starts it
//! on first use and afterwards only reads when a sample is ready.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, I2c};
use log::{debug, info};

use crate::app::ports::{ClimateReading, ClimateSensorPort};
use crate::error::SensorError;

pub const ADDRESS: u8 = 0x61;

const CMD_START_CONTINUOUS: u16 = 0x0010;
const CMD_DATA_READY: u16 = 0x0202;
const CMD_READ_MEASUREMENT: u16 = 0x0300;

/// Command-to-read turnaround required by the sensor.
const READ_DELAY_MS: u32 = 3;

pub fn crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = 0xFF;
    for byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x31
            } else {
                crc << 1
            };
        }
    }
    crc
}

fn bus_error<E: embedded_hal::i2c::Error>(e: &E) -> SensorError {
    match e.kind() {
        ErrorKind::NoAcknowledge(_) => SensorError::NotPresent,
        _ => SensorError::BusError,
    }
}

/// Check and strip CRCs from `[hi, lo, crc]*` triplets.
fn checked_words<const N: usize>(raw: &[u8]) -> Result<[u16; N], SensorError> {
    let mut words = [0_u16; N];
    for (word, chunk) in words.iter_mut().zip(raw.chunks_exact(3)) {
        if crc8(&chunk[..2]) != chunk[2] {
            return Err(SensorError::CrcMismatch);
        }
        *word = u16::from_be_bytes([chunk[0], chunk[1]]);
    }
    Ok(words)
}

fn word_pair_to_f32(hi: u16, lo: u16) -> f32 {
    f32::from_bits((u32::from(hi) << 16) | u32::from(lo))
}

pub struct Scd30<I2C, D> {
    i2c: I2C,
    delay: D,
    started: bool,
}

impl<I2C: I2c, D: DelayNs> Scd30<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            delay,
            started: false,
        }
    }

    /// Start continuous measurement.  `ambient_pressure_mbar` of 0
    /// disables pressure compensation.
    pub fn start_continuous(&mut self, ambient_pressure_mbar: u16) -> Result<(), SensorError> {
        let [arg_hi, arg_lo] = ambient_pressure_mbar.to_be_bytes();
        let [cmd_hi, cmd_lo] = CMD_START_CONTINUOUS.to_be_bytes();
        let frame = [cmd_hi, cmd_lo, arg_hi, arg_lo, crc8(&[arg_hi, arg_lo])];
        self.i2c.write(ADDRESS, &frame).map_err(|e| bus_error(&e))?;
        self.started = true;
        info!("SCD-30: continuous measurement started");
        Ok(())
    }

    pub fn data_ready(&mut self) -> Result<bool, SensorError> {
        let mut raw = [0_u8; 3];
        self.command_read(CMD_DATA_READY, &mut raw)?;
        let [ready] = checked_words::<1>(&raw)?;
        Ok(ready == 1)
    }

    pub fn read_measurement(&mut self) -> Result<ClimateReading, SensorError> {
        let mut raw = [0_u8; 18];
        self.command_read(CMD_READ_MEASUREMENT, &mut raw)?;
        let w = checked_words::<6>(&raw)?;
        Ok(ClimateReading {
            co2_ppm: word_pair_to_f32(w[0], w[1]),
            temp_c: word_pair_to_f32(w[2], w[3]),
            humidity_pct: word_pair_to_f32(w[4], w[5]),
        })
    }

    /// Give the bus back.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn command_read(&mut self, cmd: u16, buf: &mut [u8]) -> Result<(), SensorError> {
        self.i2c
            .write(ADDRESS, &cmd.to_be_bytes())
            .map_err(|e| bus_error(&e))?;
        self.delay.delay_ms(READ_DELAY_MS);
        self.i2c.read(ADDRESS, buf).map_err(|e| bus_error(&e))
    }
}

impl<I2C: I2c, D: DelayNs> ClimateSensorPort for Scd30<I2C, D> {
    fn read_climate(&mut self) -> Result<Option<ClimateReading>, SensorError> {
        if !self.started {
            self.start_continuous(0)?;
        }
        if !self.data_ready()? {
            return Ok(None);
        }
        let reading = self.read_measurement()?;
        debug!(
            "SCD-30: {:.0}ppm {:.1}C {:.1}%",
            reading.co2_ppm, reading.temp_c, reading.humidity_pct
        );
        Ok(Some(reading))
    }
}
