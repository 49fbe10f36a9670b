//! Power-board supervision example.
//!
//! Demonstrates parsing a board description from TOML, supervising a rail
//! through its divider, and debouncing an active-low power button.
//!
//! This example uses mock hardware so it runs without a target board.

use auralix::monitor::{GlitchFilter, RailMonitor, RailState};
use auralix::{validate_config, AdcChannel, BoardConfig};

const BOARD_TOML: &str = r#"
[rails.v3v3]
name = "3.3V rail"
r_top_ohm = 100000
r_bottom_ohm = 100000
on_threshold_mv = 3100
off_threshold_mv = 2900
glitch_filter_us = 5000

[inputs.power_button]
stable_high_us = 20000
stable_low_us = 50000
inverted = true
"#;

/// Mock ADC channel replaying a canned sample sequence.
struct MockAdc {
    samples: Vec<u16>,
    index: usize,
}

impl MockAdc {
    fn new(samples: Vec<u16>) -> Self {
        Self { samples, index: 0 }
    }
}

impl AdcChannel for MockAdc {
    type Error = core::convert::Infallible;

    fn read_mv(&mut self) -> Result<u16, Self::Error> {
        let mv = self.samples[self.index.min(self.samples.len() - 1)];
        self.index += 1;
        Ok(mv)
    }
}

fn main() {
    println!("=== Power Board Supervision Example ===\n");

    let config: BoardConfig = toml::from_str(BOARD_TOML).expect("Failed to parse board TOML");
    validate_config(&config).expect("Board config should validate");

    // Rail supervision: the tap sits at half the rail voltage, and the
    // sequence has a short brownout followed by a sustained collapse.
    let rail = config.rail("v3v3").expect("Rail should exist");
    let mut monitor = RailMonitor::from_config(rail);
    let mut adc = MockAdc::new(vec![1650, 1650, 1650, 1300, 1650, 1300, 1300, 1300]);

    println!("--- Rail {} ---", rail.name.as_str());
    for step in 0..8u64 {
        let now_us = step * 5_000;
        let state = monitor.poll(&mut adc, now_us).expect("ADC read");
        println!(
            "t={:>6} us  rail={} mV  state={:?}",
            now_us,
            monitor.rail_mv().0,
            state
        );
    }

    // Button debounce: a 10 ms bounce never registers, a held press does.
    let button = config.input("power_button").expect("Input should exist");
    let mut filter = GlitchFilter::from_config(button);

    println!("\n--- Power button ---");
    let raw_levels = [
        (0u64, false),
        (10_000, true), // bounce back up
        (15_000, false),
        (25_000, false),
        (35_000, false), // held past the 20 ms stable time
    ];
    for (now_us, raw) in raw_levels {
        let pressed = filter.update(now_us, raw);
        println!("t={:>6} us  raw={:5}  pressed={}", now_us, raw, pressed);
    }

    let final_state = if monitor.state() == RailState::Bad {
        "rail down"
    } else {
        "rail up"
    };
    println!("\nFinal: {} / button pressed={}", final_state, filter.output());
}
