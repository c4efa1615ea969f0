//! Button Pipeline Tests
//!
//! Leaky integrator, debounce state machine, poll-and-clear, fallback
//! averaging and ladder classification.

mod common;

use common::{RecordingDelay, ScriptedAdc};
use sdr_panel::config::{
    ButtonCalibration, FilterTiming, BUTTON_OUTPUT_UP, BUTTON_SAMPLE_RATE_HZ, DEFAULT_SWITCH_VALUES,
    MAX_FILTER_SHIFT, MIN_FILTER_SHIFT,
};
use sdr_panel::input::pipeline::averaged_reading;
use sdr_panel::input::{
    ButtonFilter, ButtonLadder, ButtonPipeline, DebounceState, Debouncer, LeakyIntegrator,
    PanelButton,
};

const TICKS_PER_DEBOUNCE: usize = 50;

fn debouncer(repeat_delay_us: u32) -> Debouncer {
    let calibration = ButtonCalibration::default().with_repeat_delay(repeat_delay_us);
    Debouncer::new(&FilterTiming::default(), &calibration)
}

/// Drive a debouncer into `Pressed` with a steady reading
fn press(debouncer: &mut Debouncer, reading: u16) {
    assert!(debouncer.update(reading).is_none());
    for _ in 0..TICKS_PER_DEBOUNCE - 1 {
        assert!(debouncer.update(reading).is_none());
    }
    assert_eq!(debouncer.update(reading), Some(reading));
}

// ============================================================================
// Leaky Integrator Tests
// ============================================================================

#[test]
fn test_integrator_starts_at_seed() {
    let filter = LeakyIntegrator::new(3, BUTTON_OUTPUT_UP);
    assert_eq!(filter.output(), BUTTON_OUTPUT_UP);
}

#[test]
fn test_integrator_converges_for_every_shift() {
    for shift in 1..=8 {
        let mut filter = LeakyIntegrator::new(shift, BUTTON_OUTPUT_UP);
        for _ in 0..10_000 {
            filter.update(513);
        }
        assert!(
            filter.output().abs_diff(513) <= 1,
            "shift {shift} settled at {}",
            filter.output()
        );
    }
}

#[test]
fn test_integrator_converges_upward() {
    let mut filter = LeakyIntegrator::new(4, 0);
    for _ in 0..10_000 {
        filter.update(900);
    }
    assert!(filter.output().abs_diff(900) <= 1);
}

#[test]
fn test_integrator_is_low_pass() {
    let mut filter = LeakyIntegrator::new(3, BUTTON_OUTPUT_UP);
    // One zero sample moves the output by an eighth of the step
    assert_eq!(filter.update(0), 895);
    assert!(filter.update(BUTTON_OUTPUT_UP) > 895);
}

#[test]
fn test_integrator_clamps_shift() {
    let mut filter = LeakyIntegrator::new(40, BUTTON_OUTPUT_UP);
    assert_eq!(filter.shift(), MAX_FILTER_SHIFT);
    assert_eq!(filter.output(), BUTTON_OUTPUT_UP);
    assert_eq!(filter.update(BUTTON_OUTPUT_UP), BUTTON_OUTPUT_UP);

    let mut filter = LeakyIntegrator::new(0, BUTTON_OUTPUT_UP);
    assert_eq!(filter.shift(), MIN_FILTER_SHIFT);
    // 2046 - 1023 + 0 = 1023, >> 1 = 511
    assert_eq!(filter.update(0), 511);
}

// ============================================================================
// Debounce State Machine Tests
// ============================================================================

#[test]
fn test_debounce_starts_up() {
    let d = debouncer(0);
    assert_eq!(d.state(), DebounceState::Up);
    assert_eq!(d.elapsed_us(), 0);
}

#[test]
fn test_reading_above_threshold_stays_up() {
    let mut d = debouncer(0);
    for _ in 0..1000 {
        assert!(d.update(945).is_none());
    }
    assert_eq!(d.state(), DebounceState::Up);
}

#[test]
fn test_press_latches_after_debounce_delay() {
    let mut d = debouncer(0);

    assert!(d.update(513).is_none());
    assert_eq!(d.state(), DebounceState::Debouncing);

    for _ in 0..TICKS_PER_DEBOUNCE - 1 {
        assert!(d.update(513).is_none());
    }
    assert_eq!(d.state(), DebounceState::Debouncing);
    assert_eq!(d.elapsed_us(), 4_900);

    assert_eq!(d.update(513), Some(513));
    assert_eq!(d.state(), DebounceState::Pressed);
    assert_eq!(d.pressed_value(), 513);
}

#[test]
fn test_held_button_latches_exactly_once() {
    let mut d = debouncer(0);
    let latches = (0..20_000).filter(|_| d.update(513).is_some()).count();
    assert_eq!(latches, 1);
}

#[test]
fn test_short_press_never_latches() {
    let mut d = debouncer(0);
    assert!(d.update(513).is_none());
    for _ in 0..TICKS_PER_DEBOUNCE - 1 {
        assert!(d.update(513).is_none());
    }
    // Released one tick before the delay completes
    assert!(d.update(1000).is_none());
    assert_eq!(d.state(), DebounceState::Up);
}

#[test]
fn test_bounce_restarts_debounce() {
    let mut d = debouncer(0);
    for _ in 0..30 {
        d.update(513);
    }
    d.update(1000);
    assert_eq!(d.state(), DebounceState::Up);

    // A fresh full delay is needed after the bounce
    assert!(d.update(513).is_none());
    for _ in 0..TICKS_PER_DEBOUNCE - 1 {
        assert!(d.update(513).is_none());
    }
    assert_eq!(d.update(513), Some(513));
}

#[test]
fn test_release_needs_released_threshold() {
    let mut d = debouncer(0);
    press(&mut d, 513);

    // Hysteresis band between the thresholds keeps the press
    assert!(d.update(950).is_none());
    assert!(d.update(963).is_none());
    assert_eq!(d.state(), DebounceState::Pressed);

    assert!(d.update(964).is_none());
    assert_eq!(d.state(), DebounceState::Up);
}

#[test]
fn test_no_repeat_when_delay_is_zero() {
    let mut d = debouncer(0);
    press(&mut d, 513);
    for _ in 0..100_000 {
        assert!(d.update(513).is_none());
    }
    assert_eq!(d.state(), DebounceState::Pressed);
}

#[test]
fn test_auto_repeat_period() {
    let mut d = debouncer(300_000);
    press(&mut d, 513);

    // 300 ms at 100 µs per tick
    for _ in 0..2_999 {
        assert!(d.update(513).is_none());
    }
    assert_eq!(d.update(513), Some(513));

    let repeats = (0..9_000).filter(|_| d.update(513).is_some()).count();
    assert_eq!(repeats, 3);
}

#[test]
fn test_auto_repeat_republishes_latched_value() {
    let mut d = debouncer(1_000);
    press(&mut d, 513);
    let repeated: Vec<u16> = (0..30).filter_map(|_| d.update(520)).collect();
    assert_eq!(repeated, vec![513, 513, 513]);
}

// ============================================================================
// Button Filter Tests
// ============================================================================

#[test]
fn test_filter_publishes_and_clears() {
    let mut filter = ButtonFilter::new(FilterTiming::default(), &ButtonCalibration::default());
    assert_eq!(filter.output(), BUTTON_OUTPUT_UP);

    for _ in 0..200 {
        filter.tick(513);
    }
    assert_eq!(filter.state(), DebounceState::Pressed);
    let reading = filter.take_output();
    assert!(reading.abs_diff(513) <= 1, "latched {reading}");
    assert_eq!(filter.take_output(), BUTTON_OUTPUT_UP);
}

#[test]
fn test_filter_rejects_single_sample_glitch() {
    let mut filter = ButtonFilter::new(FilterTiming::default(), &ButtonCalibration::default());
    filter.tick(0);
    for _ in 0..1000 {
        filter.tick(BUTTON_OUTPUT_UP);
    }
    assert_eq!(filter.output(), BUTTON_OUTPUT_UP);
    assert_eq!(filter.state(), DebounceState::Up);
}

// ============================================================================
// Pipeline Tests
// ============================================================================

#[test]
fn test_poll_before_start_returns_sentinel() {
    let pipeline = ButtonPipeline::new();
    assert!(!pipeline.is_running());
    assert_eq!(pipeline.poll_and_clear(), BUTTON_OUTPUT_UP);
}

#[test]
fn test_tick_before_start_is_ignored() {
    let pipeline = ButtonPipeline::new();
    pipeline.tick(513);
    assert!(pipeline.snapshot().is_none());
}

#[test]
fn test_start_is_idempotent() {
    let pipeline = ButtonPipeline::new();
    let calibration = ButtonCalibration::default();
    assert!(pipeline.start(FilterTiming::default(), &calibration));

    for _ in 0..10 {
        pipeline.tick(513);
    }
    let before = pipeline.snapshot();

    assert!(!pipeline.start(FilterTiming::new(BUTTON_SAMPLE_RATE_HZ, 8, 1), &calibration));
    assert_eq!(pipeline.snapshot().map(|f| f.filtered()), before.map(|f| f.filtered()));
}

#[test]
fn test_read_clear_returns_value_then_sentinel() {
    let pipeline = ButtonPipeline::new();
    pipeline.start(FilterTiming::default(), &ButtonCalibration::default());
    for _ in 0..200 {
        pipeline.tick(513);
    }

    let first = pipeline.poll_and_clear();
    assert!(first.abs_diff(513) <= 1);
    assert_eq!(pipeline.poll_and_clear(), BUTTON_OUTPUT_UP);
}

#[test]
fn test_read_selected_while_running() {
    let pipeline = ButtonPipeline::new();
    let ladder = ButtonLadder::default();
    pipeline.start(FilterTiming::default(), &ButtonCalibration::default());

    let mut adc = ScriptedAdc::constant(0);
    let mut delay = RecordingDelay::default();

    assert!(pipeline.read_selected(&ladder, &mut adc, &mut delay).is_none());

    for _ in 0..200 {
        pipeline.tick(513);
    }
    let reading = pipeline.read_selected(&ladder, &mut adc, &mut delay).unwrap();
    assert_eq!(ladder.classify(reading), Some(PanelButton::SetMode));

    // Running pipelines never touch the ADC or block
    assert_eq!(adc.reads, 0);
    assert_eq!(delay.total_ns, 0);
}

// ============================================================================
// Fallback Averaging Tests
// ============================================================================

#[test]
fn test_averaged_reading_converges() {
    let mut adc = ScriptedAdc::constant(513);
    let reading = averaged_reading(&mut adc);
    assert!(reading.abs_diff(513) <= 3, "averaged {reading}");
}

#[test]
fn test_averaged_reading_with_noise() {
    let mut samples = Vec::new();
    for i in 0..40 {
        samples.push(if i % 2 == 0 { 505 } else { 521 });
    }
    samples.push(513);
    let mut adc = ScriptedAdc::new(&samples);
    let reading = averaged_reading(&mut adc);
    assert!(reading.abs_diff(513) <= 11, "averaged {reading}");
}

#[test]
fn test_averaged_reading_unpressed_is_immediate() {
    let mut adc = ScriptedAdc::constant(BUTTON_OUTPUT_UP);
    assert_eq!(averaged_reading(&mut adc), BUTTON_OUTPUT_UP);
    assert_eq!(adc.reads, 1);
}

#[test]
fn test_fallback_read_settles_in_range() {
    let pipeline = ButtonPipeline::new();
    let ladder = ButtonLadder::default();
    let mut adc = ScriptedAdc::constant(DEFAULT_SWITCH_VALUES[2]);
    let mut delay = RecordingDelay::default();

    let reading = pipeline.read_selected(&ladder, &mut adc, &mut delay).unwrap();
    assert_eq!(ladder.classify(reading), Some(PanelButton::BandUp));
    assert_eq!(delay.total_ns, 100_000_000);
}

#[test]
fn test_fallback_read_no_button_skips_delay() {
    let pipeline = ButtonPipeline::new();
    let ladder = ButtonLadder::default();
    let mut adc = ScriptedAdc::constant(BUTTON_OUTPUT_UP);
    let mut delay = RecordingDelay::default();

    assert!(pipeline.read_selected(&ladder, &mut adc, &mut delay).is_none());
    assert_eq!(delay.total_ns, 0);
}

// ============================================================================
// Ladder Classification Tests
// ============================================================================

#[test]
fn test_classify_every_switch_value() {
    let ladder = ButtonLadder::default();
    for (index, &value) in DEFAULT_SWITCH_VALUES.iter().enumerate() {
        assert_eq!(ladder.classify(value), PanelButton::from_index(index));
    }
}

#[test]
fn test_classify_wiggle_is_exclusive() {
    let ladder = ButtonLadder::default();
    assert_eq!(ladder.classify(943), Some(PanelButton::MenuSelect));
    assert_eq!(ladder.classify(944), None);
    assert_eq!(ladder.classify(29), Some(PanelButton::CopyVfoBToA));
    assert_eq!(ladder.classify(30), None);
}

#[test]
fn test_classify_sentinel_is_no_button() {
    let ladder = ButtonLadder::default();
    assert_eq!(ladder.classify(BUTTON_OUTPUT_UP), None);
}

#[test]
fn test_gate_limit() {
    let ladder = ButtonLadder::default();
    assert_eq!(ladder.gate(944), Some(944));
    assert_eq!(ladder.gate(945), None);
    assert_eq!(ladder.gate(BUTTON_OUTPUT_UP), None);
}

#[test]
fn test_button_index_round_trip() {
    for (index, button) in PanelButton::ALL.iter().enumerate() {
        assert_eq!(button.index(), index);
    }
    assert_eq!(PanelButton::from_index(18), None);
}
