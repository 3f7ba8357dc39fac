use std::time::{Duration, Instant};
use tonestream::{
    BridgeSettings, Continuation, Error, Normalization, OutputSample, Signal, SineOscillator,
    StreamSettings, StreamingBridge,
};

fn unit_gain(normalization: Normalization) -> BridgeSettings {
    BridgeSettings {
        buffer_size: 1024,
        master_gain: 1.0,
        normalization,
    }
}

#[test]
fn test_two_tone_mix_stays_in_range() {
    let mut bridge = StreamingBridge::new(unit_gain(Normalization::DivideByCount))
        .unwrap()
        .with_oscillator(SineOscillator::new(200.0, 44_100).unwrap())
        .with_oscillator(SineOscillator::new(400.0, 44_100).unwrap());

    let mut out = vec![0.0f32; 1024];
    for _ in 0..10 {
        assert_eq!(bridge.on_buffer_request(&mut out), Continuation::Continue);
        assert!(out.iter().all(|s| (-1.0..=1.0).contains(s)));
    }
}

#[test]
fn test_two_tone_mix_is_average_of_tones() {
    let mut bridge = StreamingBridge::new(unit_gain(Normalization::DivideByCount))
        .unwrap()
        .with_oscillator(SineOscillator::new(200.0, 44_100).unwrap())
        .with_oscillator(SineOscillator::new(400.0, 44_100).unwrap());
    let mut low = SineOscillator::new(200.0, 44_100).unwrap();
    let mut high = SineOscillator::new(400.0, 44_100).unwrap();

    let mut out = vec![0i16; 1024];
    for _ in 0..3 {
        bridge.on_buffer_request(&mut out);
        let expected: Vec<i16> = low
            .produce_block(1024)
            .iter()
            .zip(high.produce_block(1024))
            .map(|(a, b)| i16::from_normalized((a + b) * 0.5))
            .collect();
        assert_eq!(out, expected);
    }
}

#[test]
fn test_many_tones_clipped() {
    let mut bridge = StreamingBridge::new(unit_gain(Normalization::HardClip)).unwrap();
    for i in 1..=8 {
        bridge.add_oscillator(SineOscillator::new(110.0 * i as f64, 48_000).unwrap());
    }
    let mut out = vec![0i32; 2048];
    for _ in 0..5 {
        bridge.on_buffer_request(&mut out);
        assert!(out.iter().all(|&s| s != i32::MIN));
    }
}

#[test]
fn test_blocks_join_without_jump_after_conversion() {
    let mut bridge = StreamingBridge::new(unit_gain(Normalization::DivideByCount))
        .unwrap()
        .with_oscillator(SineOscillator::new(200.0, 44_100).unwrap());

    // Largest step of a 200 Hz full-scale sine at 44.1 kHz, in i16 units
    let max_step = (std::f64::consts::TAU * 200.0 / 44_100.0 * 32_767.0).ceil() as i32 + 1;

    let mut previous: Option<i16> = None;
    let mut out = vec![0i16; 1024];
    for _ in 0..20 {
        bridge.on_buffer_request(&mut out);
        if let Some(last) = previous {
            assert!((i32::from(out[0]) - i32::from(last)).abs() <= max_step);
        }
        previous = out.last().copied();
    }
}

#[test]
fn test_oscillator_rate_must_match_stream() {
    let settings = StreamSettings::default();
    let bridge = StreamingBridge::new(settings.bridge_settings())
        .unwrap()
        .with_oscillator(SineOscillator::new(200.0, settings.sample_rate).unwrap())
        .with_oscillator(SineOscillator::new(300.0, 48_000).unwrap());
    match bridge.validate_ready(settings.sample_rate) {
        Err(Error::InvalidParameter { name, .. }) => assert_eq!(name, "sample_rate"),
        other => panic!("Expected InvalidParameter, got {:?}", other),
    }

    let matching = StreamingBridge::new(settings.bridge_settings())
        .unwrap()
        .with_oscillator(SineOscillator::new(200.0, settings.sample_rate).unwrap());
    assert!(matching.validate_ready(settings.sample_rate).is_ok());
}

#[test]
fn test_stop_request_ends_stream() {
    let mut bridge = StreamingBridge::new(BridgeSettings::default())
        .unwrap()
        .with_oscillator(SineOscillator::new(200.0, 44_100).unwrap());
    let stop = bridge.stop_signal();

    let mut out = vec![0i16; 1024];
    assert!(bridge.on_buffer_request(&mut out).is_continue());

    std::thread::spawn(move || stop.request_stop()).join().unwrap();
    assert_eq!(bridge.on_buffer_request(&mut out), Continuation::Stop);
    assert!(out.iter().all(|&s| s == 0));
}

#[test]
fn test_block_generation_meets_buffer_period() {
    let settings = StreamSettings::default();
    let deadline = settings.buffer_period();
    assert!(deadline > Duration::from_millis(23));

    let mut osc = SineOscillator::new(440.0, settings.sample_rate).unwrap();
    let mut block = vec![0.0; settings.buffer_size];
    osc.process(&mut block);

    let runs = 100;
    let start = Instant::now();
    for _ in 0..runs {
        osc.process(&mut block);
    }
    let average = start.elapsed() / runs;
    assert!(average < deadline / 4, "average block took {average:?}");
}

#[test]
fn test_bridge_callback_meets_buffer_period() {
    let settings = StreamSettings::default();
    let mut bridge = StreamingBridge::new(settings.bridge_settings())
        .unwrap()
        .with_oscillator(SineOscillator::new(200.0, settings.sample_rate).unwrap())
        .with_oscillator(SineOscillator::new(400.0, settings.sample_rate).unwrap());
    let mut out = vec![0i16; settings.buffer_size];

    let runs = 100;
    let start = Instant::now();
    for _ in 0..runs {
        bridge.on_buffer_request(&mut out);
    }
    let average = start.elapsed() / runs;
    assert!(average < settings.buffer_period(), "average callback took {average:?}");
}
