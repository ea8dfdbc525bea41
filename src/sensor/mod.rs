// src/sensor/mod.rs

//! Per-device measurement protocol.
//!
//! A discovered sensor is driven through a fixed sequence:
//! wake -> busy-poll -> read -> sleep. The busy-poll is bounded: a sensor
//! whose busy flag never clears within the poll budget yields
//! [`SoilMuxError::SensorUnresponsive`] and is skipped by the caller, it
//! never stalls the scan.

use crate::common::registers::{
    CAPACITANCE_SCALE, REG_GET_BUSY, REG_GET_CAPACITANCE, REG_GET_VERSION, REG_SLEEP,
};
use crate::common::timing::{
    pause, BUSY_POLL_INTERVAL, BUSY_POLL_MAX_ATTEMPTS, WAKE_SETTLE_DELAY,
};
use crate::common::{DeviceAddress, SoilMuxError};
use crate::report::SensorReading;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Drives one discovered sensor through its measurement protocol.
///
/// The driver borrows the bus and delay provider for the duration of a
/// single protocol run; the channel routing to the device must already be
/// in place.
#[derive(Debug)]
pub struct SoilSensor<'a, I2C, D> {
    bus: &'a mut I2C,
    delay: &'a mut D,
    address: DeviceAddress,
}

impl<'a, I2C, D> SoilSensor<'a, I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(bus: &'a mut I2C, delay: &'a mut D, address: DeviceAddress) -> Self {
        SoilSensor {
            bus,
            delay,
            address,
        }
    }

    /// Executes one full measurement cycle and returns the scaled reading.
    ///
    /// Any bus fault or an exhausted busy-poll budget aborts the cycle; the
    /// caller omits the sensor from the current report.
    pub fn read(mut self) -> Result<SensorReading, SoilMuxError<I2C::Error>> {
        self.wake()?;
        self.wait_while_busy()?;
        let raw = self.read_capacitance()?;
        self.sleep()?;
        Ok(SensorReading {
            address: self.address,
            capacitance: u32::from(raw) * CAPACITANCE_SCALE,
        })
    }

    /// Brings the device out of low-power sleep. Reading the version
    /// register is side-effect free, so it doubles as the wake transaction.
    fn wake(&mut self) -> Result<(), SoilMuxError<I2C::Error>> {
        self.bus
            .write(self.address.get(), &[REG_GET_VERSION])
            .map_err(SoilMuxError::Io)?;
        pause(self.delay, WAKE_SETTLE_DELAY);
        Ok(())
    }

    /// Polls the busy flag with a fixed inter-check delay, bounded by the
    /// poll budget.
    fn wait_while_busy(&mut self) -> Result<(), SoilMuxError<I2C::Error>> {
        for _ in 0..BUSY_POLL_MAX_ATTEMPTS {
            let mut flag = [0u8; 1];
            self.bus
                .write_read(self.address.get(), &[REG_GET_BUSY], &mut flag)
                .map_err(SoilMuxError::Io)?;
            if flag[0] == 0 {
                return Ok(());
            }
            pause(self.delay, BUSY_POLL_INTERVAL);
        }
        Err(SoilMuxError::SensorUnresponsive {
            address: self.address,
        })
    }

    /// Fetches the 16-bit big-endian raw capacitance register.
    fn read_capacitance(&mut self) -> Result<u16, SoilMuxError<I2C::Error>> {
        let mut raw = [0u8; 2];
        self.bus
            .write_read(self.address.get(), &[REG_GET_CAPACITANCE], &mut raw)
            .map_err(SoilMuxError::Io)?;
        Ok(u16::from_be_bytes(raw))
    }

    /// Commands the device back into low-power state before releasing it.
    fn sleep(&mut self) -> Result<(), SoilMuxError<I2C::Error>> {
        self.bus
            .write(self.address.get(), &[REG_SLEEP])
            .map_err(SoilMuxError::Io)
    }
}
