//! Unit tests for the TPA3255 fault-recovery state machine.

use auralix::ext::tpa3255::AmpState;
use auralix::Tpa3255;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};

#[test]
fn test_fault_triggers_full_recovery_cycle() {
    let mut reset = PinMock::new(&[
        PinTransaction::set(PinState::High), // init releases reset
        PinTransaction::set(PinState::Low),  // fault: hold reset
        PinTransaction::set(PinState::High), // hold expired: release
    ]);
    let mut fault = PinMock::new(&[
        PinTransaction::get(PinState::Low),  // fault asserted
        PinTransaction::get(PinState::High), // clear after restart
    ]);
    let mut clip = PinMock::new(&[]);

    let mut amp = Tpa3255::new(reset.clone(), fault.clone(), clip.clone())
        .with_timing(100_000, 20_000)
        .init()
        .map_err(|(_, e)| e)
        .unwrap();

    assert_eq!(amp.handle(0).unwrap(), AmpState::ResetHold);
    // hold time not yet elapsed
    assert_eq!(amp.handle(50_000).unwrap(), AmpState::ResetHold);
    assert_eq!(amp.handle(100_000).unwrap(), AmpState::Restarting);
    // settle time not yet elapsed: FAULT line not trusted yet
    assert_eq!(amp.handle(110_000).unwrap(), AmpState::Restarting);
    assert_eq!(amp.handle(120_000).unwrap(), AmpState::Running);
    assert_eq!(amp.recovery_count(), 1);

    reset.done();
    fault.done();
    clip.done();
}

#[test]
fn test_persistent_fault_loops_back_to_hold() {
    let mut reset = PinMock::new(&[
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low), // fault persists: hold again
    ]);
    let mut fault = PinMock::new(&[
        PinTransaction::get(PinState::Low),
        PinTransaction::get(PinState::Low), // still faulted after settle
    ]);
    let mut clip = PinMock::new(&[]);

    let mut amp = Tpa3255::new(reset.clone(), fault.clone(), clip.clone())
        .with_timing(100_000, 20_000)
        .init()
        .map_err(|(_, e)| e)
        .unwrap();

    assert_eq!(amp.handle(0).unwrap(), AmpState::ResetHold);
    assert_eq!(amp.handle(100_000).unwrap(), AmpState::Restarting);
    assert_eq!(amp.handle(120_000).unwrap(), AmpState::ResetHold);
    assert_eq!(amp.recovery_count(), 0);

    reset.done();
    fault.done();
    clip.done();
}

#[test]
fn test_no_fault_stays_running() {
    let mut reset = PinMock::new(&[PinTransaction::set(PinState::High)]);
    let mut fault = PinMock::new(&[
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::High),
    ]);
    let mut clip = PinMock::new(&[PinTransaction::get(PinState::Low)]);

    let mut amp = Tpa3255::new(reset.clone(), fault.clone(), clip.clone())
        .init()
        .map_err(|(_, e)| e)
        .unwrap();

    assert_eq!(amp.handle(0).unwrap(), AmpState::Running);
    assert_eq!(amp.handle(1_000_000).unwrap(), AmpState::Running);
    assert!(amp.is_clipping().unwrap());
    assert_eq!(amp.recovery_count(), 0);

    reset.done();
    fault.done();
    clip.done();
}

#[test]
fn test_deinit_holds_reset() {
    let mut reset = PinMock::new(&[
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ]);
    let mut fault = PinMock::new(&[]);
    let mut clip = PinMock::new(&[]);

    let amp = Tpa3255::new(reset.clone(), fault.clone(), clip.clone())
        .init()
        .map_err(|(_, e)| e)
        .unwrap();
    let _amp = amp.deinit().map_err(|(_, e)| e).unwrap();

    reset.done();
    fault.done();
    clip.done();
}
