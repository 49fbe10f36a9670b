//! Property tests for the hysteresis comparator and glitch filter.

use auralix::{GlitchFilter, Hysteresis, SwTimer};
use proptest::prelude::*;

proptest! {
    /// The comparator output is fully determined at the extremes: any
    /// sample at or above `on` asserts, any sample below `off` deasserts,
    /// regardless of history.
    #[test]
    fn hysteresis_respects_thresholds(
        samples in prop::collection::vec(0u32..6000, 1..100)
    ) {
        let mut h = Hysteresis::new(3100, 2900);
        for s in samples {
            let out = h.update(s);
            if s >= 3100 {
                prop_assert!(out);
            }
            if s < 2900 {
                prop_assert!(!out);
            }
        }
    }

    /// Inside the window the state never changes.
    #[test]
    fn hysteresis_holds_inside_window(
        initial in any::<bool>(),
        samples in prop::collection::vec(2900u32..3100, 1..100)
    ) {
        let mut h = Hysteresis::new(3100, 2900);
        h.update(if initial { 3100 } else { 0 });
        for s in samples {
            prop_assert_eq!(h.update(s), initial);
        }
    }

    /// A high pulse shorter than the stable time never reaches the output.
    #[test]
    fn glitch_filter_ignores_short_pulses(pulse_us in 0u64..10_000) {
        let mut f = GlitchFilter::new(10_000, 10_000, false);
        prop_assert!(!f.update(0, true));
        prop_assert!(!f.update(pulse_us, true));
        prop_assert!(!f.update(pulse_us, false));
        prop_assert!(!f.update(1_000_000, false));
    }

    /// A level held for at least the stable time always propagates.
    #[test]
    fn glitch_filter_passes_long_levels(extra_us in 0u64..1_000_000) {
        let mut f = GlitchFilter::new(5_000, 5_000, false);
        f.update(0, true);
        prop_assert!(f.update(5_000 + extra_us, true));
    }

    /// Timer elapsed time is monotonic in the query timestamp.
    #[test]
    fn timer_elapsed_is_monotonic(start in 0u64..u64::MAX / 2, a in 0u64..1_000_000, b in 0u64..1_000_000) {
        let mut t = SwTimer::new();
        t.start(start);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(t.elapsed_us(start + lo) <= t.elapsed_us(start + hi));
    }
}
