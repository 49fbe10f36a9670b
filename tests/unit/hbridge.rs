//! Unit tests for the VNH7040 H-bridge driver and its multisense cycle.

use auralix::ext::vnh7040::{Direction, SenseTarget};
use auralix::{AdcChannel, Milliamps, Vnh7040};
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::pwm::{Mock as PwmMock, Transaction as PwmTransaction};

/// ADC channel replaying canned millivolt samples.
struct SeqAdc {
    samples: Vec<u16>,
    index: usize,
}

impl SeqAdc {
    fn new(samples: Vec<u16>) -> Self {
        Self { samples, index: 0 }
    }
}

impl AdcChannel for SeqAdc {
    type Error = core::convert::Infallible;

    fn read_mv(&mut self) -> Result<u16, Self::Error> {
        let mv = self.samples[self.index];
        self.index += 1;
        Ok(mv)
    }
}

#[test]
fn test_round_robin_reads_before_switching() {
    let mut ina = PinMock::new(&[PinTransaction::set(PinState::Low)]);
    let mut inb = PinMock::new(&[PinTransaction::set(PinState::Low)]);
    // init parks the mux at slot 0 (A current); every handle() call then
    // advances it after sampling: B current, temperature, back to A.
    let mut sel0 = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::Low),
    ]);
    let mut sel1 = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ]);
    let mut pwm = PwmMock::new(&[PwmTransaction::set_duty_cycle(0)]);
    // 1.5 kOhm shunt: 1500 mV -> 1550 mA; 775 mV on the temp slot -> 25 C
    let adc = SeqAdc::new(vec![1500, 3000, 775]);

    let mut bridge = Vnh7040::new(
        ina.clone(),
        inb.clone(),
        sel0.clone(),
        sel1.clone(),
        pwm.clone(),
        adc,
    )
    .init()
    .map_err(|(_, e)| e)
    .unwrap();

    assert_eq!(bridge.pending_target(), SenseTarget::HighSideA);

    let m = bridge.handle().unwrap();
    assert_eq!(m.current_a, Some(Milliamps(1550)));
    assert_eq!(m.current_b, None);
    assert_eq!(bridge.pending_target(), SenseTarget::HighSideB);

    let m = bridge.handle().unwrap();
    assert_eq!(m.current_b, Some(Milliamps(3100)));
    assert_eq!(bridge.pending_target(), SenseTarget::Temperature);

    let m = bridge.handle().unwrap();
    assert_eq!(m.temperature_c, Some(25));
    assert_eq!(bridge.pending_target(), SenseTarget::HighSideA);
    // earlier readings survive later cycles
    assert_eq!(m.current_a, Some(Milliamps(1550)));

    bridge.release();
    ina.done();
    inb.done();
    sel0.done();
    sel1.done();
    pwm.done();
}

#[test]
fn test_drive_states_set_pins_and_duty() {
    let mut ina = PinMock::new(&[
        PinTransaction::set(PinState::Low),  // init
        PinTransaction::set(PinState::High), // forward
        PinTransaction::set(PinState::Low),  // brake
    ]);
    let mut inb = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::Low),
    ]);
    let mut sel0 = PinMock::new(&[PinTransaction::set(PinState::Low)]);
    let mut sel1 = PinMock::new(&[PinTransaction::set(PinState::Low)]);
    let mut pwm = PwmMock::new(&[
        PwmTransaction::set_duty_cycle(0), // init
        PwmTransaction::max_duty_cycle(1000),
        PwmTransaction::set_duty_cycle(500), // forward at 50%
        PwmTransaction::max_duty_cycle(1000),
        PwmTransaction::set_duty_cycle(1000), // brake holds full duty
    ]);
    let adc = SeqAdc::new(vec![]);

    let mut bridge = Vnh7040::new(
        ina.clone(),
        inb.clone(),
        sel0.clone(),
        sel1.clone(),
        pwm.clone(),
        adc,
    )
    .init()
    .map_err(|(_, e)| e)
    .unwrap();

    bridge.forward(500).unwrap();
    assert_eq!(bridge.direction(), Direction::Forward);
    bridge.brake().unwrap();
    assert_eq!(bridge.direction(), Direction::Brake);

    // over-scale duty rejected before any pin traffic
    assert!(bridge.forward(1001).is_err());

    bridge.release();
    ina.done();
    inb.done();
    sel0.done();
    sel1.done();
    pwm.done();
}
