//! ST VNH7040AY H-bridge motor driver.
//!
//! Reference: STMicroelectronics VNH7040AY datasheet.
//!
//! The bridge is controlled through INA/INB direction inputs and a PWM
//! input; diagnostics come back on a single MultiSense pin whose source is
//! selected with SEL0/SEL1. The driver cycles the multisense mux round-
//! robin across high-side A current, high-side B current and chip
//! temperature. Each [`handle`](Vnh7040::handle) call reads the channel
//! selected on the previous call and only then advances the mux, so the
//! analog output always has a full polling period to settle before it is
//! sampled.

use core::marker::PhantomData;

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::adc::AdcChannel;
use crate::config::units::{Milliamps, Ohms};
use crate::driver::state::{DriverState, Ready, StateName, Uninit};
use crate::error::{DeviceError, Error};

/// MultiSense current mirror ratio (load current / sense current).
pub const SENSE_RATIO: u32 = 1550;

/// Default MultiSense shunt resistor.
pub const DEFAULT_SENSE_RESISTOR: Ohms = Ohms(1500);

/// PWM duty denominator; drive strengths are given in permille.
pub const DUTY_FULL_SCALE: u16 = 1000;

/// Bridge drive state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// OUTA high side, OUTB low side.
    Forward,
    /// OUTB high side, OUTA low side.
    Reverse,
    /// Both low sides on; the motor is actively shorted.
    Brake,
    /// All switches off; the motor freewheels.
    Coast,
}

/// MultiSense mux source (SEL1:SEL0 encoding).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SenseTarget {
    /// High-side A current sense (SEL 0b00).
    HighSideA,
    /// High-side B current sense (SEL 0b01).
    HighSideB,
    /// Chip temperature sense (SEL 0b10).
    Temperature,
}

impl SenseTarget {
    const CYCLE: [SenseTarget; 3] = [
        SenseTarget::HighSideA,
        SenseTarget::HighSideB,
        SenseTarget::Temperature,
    ];

    const fn sel_bits(self) -> (bool, bool) {
        // (sel1, sel0)
        match self {
            SenseTarget::HighSideA => (false, false),
            SenseTarget::HighSideB => (false, true),
            SenseTarget::Temperature => (true, false),
        }
    }
}

/// Most recent decoded multisense readings, refreshed one channel per
/// [`handle`](Vnh7040::handle) call. `None` until the channel has been
/// sampled once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurements {
    /// High-side A load current.
    pub current_a: Option<Milliamps>,
    /// High-side B load current.
    pub current_b: Option<Milliamps>,
    /// Chip temperature in degrees Celsius.
    pub temperature_c: Option<i16>,
}

/// Decode a MultiSense current reading to load milliamps.
///
/// I_load = V_sense / R_sense x K, with K the current mirror ratio.
#[inline]
#[must_use]
pub const fn decode_current_ma(sense_mv: u16, sense_resistor: Ohms) -> u32 {
    sense_mv as u32 * SENSE_RATIO / sense_resistor.0
}

/// Decode a MultiSense temperature reading to degrees Celsius.
///
/// The temperature output is linear, 500 mV at 0 C with an 11 mV/C slope.
#[inline]
#[must_use]
pub const fn decode_temperature_c(sense_mv: u16) -> i16 {
    ((sense_mv as i32 - 500) / 11) as i16
}

/// VNH7040 driver with lifecycle type-states.
pub struct Vnh7040<INA, INB, SEL0, SEL1, PWM, ADC, STATE = Uninit> {
    ina: INA,
    inb: INB,
    sel0: SEL0,
    sel1: SEL1,
    pwm: PWM,
    sense: ADC,
    sense_resistor: Ohms,
    slot: usize,
    measurements: Measurements,
    direction: Direction,
    _state: PhantomData<STATE>,
}

impl<INA, INB, SEL0, SEL1, PWM, ADC, P> Vnh7040<INA, INB, SEL0, SEL1, PWM, ADC, Uninit>
where
    INA: OutputPin<Error = P>,
    INB: OutputPin<Error = P>,
    SEL0: OutputPin<Error = P>,
    SEL1: OutputPin<Error = P>,
    PWM: SetDutyCycle,
    ADC: AdcChannel,
{
    /// Create a new driver with the default sense resistor.
    pub fn new(ina: INA, inb: INB, sel0: SEL0, sel1: SEL1, pwm: PWM, sense: ADC) -> Self {
        Self {
            ina,
            inb,
            sel0,
            sel1,
            pwm,
            sense,
            sense_resistor: DEFAULT_SENSE_RESISTOR,
            slot: 0,
            measurements: Measurements::default(),
            direction: Direction::Coast,
            _state: PhantomData,
        }
    }

    /// Override the MultiSense shunt resistor value, clamped to at least
    /// one ohm.
    #[must_use]
    pub fn with_sense_resistor(mut self, sense_resistor: Ohms) -> Self {
        self.sense_resistor = Ohms(sense_resistor.0.max(1));
        self
    }

    /// Initialize the bridge: outputs coasting, zero duty, mux at the
    /// first slot.
    #[allow(clippy::type_complexity)]
    pub fn init(
        mut self,
    ) -> Result<Vnh7040<INA, INB, SEL0, SEL1, PWM, ADC, Ready>, (Self, Error)> {
        match self.safe_state() {
            Ok(()) => Ok(Vnh7040 {
                ina: self.ina,
                inb: self.inb,
                sel0: self.sel0,
                sel1: self.sel1,
                pwm: self.pwm,
                sense: self.sense,
                sense_resistor: self.sense_resistor,
                slot: 0,
                measurements: Measurements::default(),
                direction: Direction::Coast,
                _state: PhantomData,
            }),
            Err(e) => Err((self, e)),
        }
    }

    fn safe_state(&mut self) -> Result<(), Error> {
        self.ina
            .set_low()
            .map_err(|_| Error::Device(DeviceError::PinError))?;
        self.inb
            .set_low()
            .map_err(|_| Error::Device(DeviceError::PinError))?;
        self.pwm
            .set_duty_cycle_fully_off()
            .map_err(|_| Error::Device(DeviceError::PinError))?;
        let (sel1, sel0) = SenseTarget::CYCLE[0].sel_bits();
        self.sel0
            .set_state(sel0.into())
            .map_err(|_| Error::Device(DeviceError::PinError))?;
        self.sel1
            .set_state(sel1.into())
            .map_err(|_| Error::Device(DeviceError::PinError))
    }
}

impl<INA, INB, SEL0, SEL1, PWM, ADC, P> Vnh7040<INA, INB, SEL0, SEL1, PWM, ADC, Ready>
where
    INA: OutputPin<Error = P>,
    INB: OutputPin<Error = P>,
    SEL0: OutputPin<Error = P>,
    SEL1: OutputPin<Error = P>,
    PWM: SetDutyCycle,
    ADC: AdcChannel,
{
    /// Set the bridge state and drive strength in permille (0-1000).
    ///
    /// Duty above full scale is rejected; `Brake` and `Coast` ignore the
    /// duty and force it to zero.
    pub fn set_output(&mut self, direction: Direction, duty_permille: u16) -> Result<(), Error> {
        if duty_permille > DUTY_FULL_SCALE {
            return Err(Error::Device(DeviceError::ValueOutOfRange {
                value: duty_permille as u32,
                min: 0,
                max: DUTY_FULL_SCALE as u32,
            }));
        }
        let (ina, inb, duty) = match direction {
            Direction::Forward => (true, false, duty_permille),
            Direction::Reverse => (false, true, duty_permille),
            Direction::Brake => (false, false, DUTY_FULL_SCALE),
            Direction::Coast => (false, false, 0),
        };
        self.ina
            .set_state(ina.into())
            .map_err(|_| Error::Device(DeviceError::PinError))?;
        self.inb
            .set_state(inb.into())
            .map_err(|_| Error::Device(DeviceError::PinError))?;
        self.pwm
            .set_duty_cycle_fraction(duty, DUTY_FULL_SCALE)
            .map_err(|_| Error::Device(DeviceError::PinError))?;
        self.direction = direction;
        Ok(())
    }

    /// Drive forward at the given permille duty.
    pub fn forward(&mut self, duty_permille: u16) -> Result<(), Error> {
        self.set_output(Direction::Forward, duty_permille)
    }

    /// Drive in reverse at the given permille duty.
    pub fn reverse(&mut self, duty_permille: u16) -> Result<(), Error> {
        self.set_output(Direction::Reverse, duty_permille)
    }

    /// Actively brake the motor.
    pub fn brake(&mut self) -> Result<(), Error> {
        self.set_output(Direction::Brake, 0)
    }

    /// Let the motor freewheel.
    pub fn coast(&mut self) -> Result<(), Error> {
        self.set_output(Direction::Coast, 0)
    }

    /// Sample the multisense channel selected on the previous call, then
    /// advance the mux to the next channel in the cycle.
    ///
    /// Call periodically; after three calls every [`Measurements`] field
    /// holds a reading.
    pub fn handle(&mut self) -> Result<Measurements, Error> {
        let target = SenseTarget::CYCLE[self.slot];
        let mv = self
            .sense
            .read_mv()
            .map_err(|_| Error::Device(DeviceError::AdcError))?;
        match target {
            SenseTarget::HighSideA => {
                self.measurements.current_a =
                    Some(Milliamps(decode_current_ma(mv, self.sense_resistor)));
            }
            SenseTarget::HighSideB => {
                self.measurements.current_b =
                    Some(Milliamps(decode_current_ma(mv, self.sense_resistor)));
            }
            SenseTarget::Temperature => {
                self.measurements.temperature_c = Some(decode_temperature_c(mv));
            }
        }

        self.slot = (self.slot + 1) % SenseTarget::CYCLE.len();
        let (sel1, sel0) = SenseTarget::CYCLE[self.slot].sel_bits();
        self.sel0
            .set_state(sel0.into())
            .map_err(|_| Error::Device(DeviceError::PinError))?;
        self.sel1
            .set_state(sel1.into())
            .map_err(|_| Error::Device(DeviceError::PinError))?;
        Ok(self.measurements)
    }

    /// The multisense channel that the next [`handle`](Self::handle) call
    /// will sample.
    #[inline]
    pub fn pending_target(&self) -> SenseTarget {
        SenseTarget::CYCLE[self.slot]
    }

    /// Last decoded multisense readings.
    #[inline]
    pub fn measurements(&self) -> Measurements {
        self.measurements
    }

    /// Current bridge drive state.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Coast the motor and return to `Uninit`.
    #[allow(clippy::type_complexity)]
    pub fn deinit(
        mut self,
    ) -> Result<Vnh7040<INA, INB, SEL0, SEL1, PWM, ADC, Uninit>, (Self, Error)> {
        match self.coast() {
            Ok(()) => Ok(Vnh7040 {
                ina: self.ina,
                inb: self.inb,
                sel0: self.sel0,
                sel1: self.sel1,
                pwm: self.pwm,
                sense: self.sense,
                sense_resistor: self.sense_resistor,
                slot: 0,
                measurements: Measurements::default(),
                direction: Direction::Coast,
                _state: PhantomData,
            }),
            Err(e) => Err((self, e)),
        }
    }
}

impl<INA, INB, SEL0, SEL1, PWM, ADC, STATE> Vnh7040<INA, INB, SEL0, SEL1, PWM, ADC, STATE>
where
    STATE: DriverState + StateName,
{
    /// Get the lifecycle state name for display/debugging.
    pub fn state_name(&self) -> &'static str {
        STATE::name()
    }

    /// Consume the driver and return the pins, PWM channel and ADC.
    pub fn release(self) -> (INA, INB, SEL0, SEL1, PWM, ADC) {
        (
            self.ina,
            self.inb,
            self.sel0,
            self.sel1,
            self.pwm,
            self.sense,
        )
    }
}
