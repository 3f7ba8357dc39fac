use tonestream::{Error, Oscillator, Signal, SineOscillator};

#[test]
fn test_split_blocks_match_single_block() {
    let frequencies = [1.0, 100.0, 200.0, 261.63, 440.0, 1234.5, 19_999.0];
    let sample_rates = [8_000, 22_050, 44_100, 48_000, 96_000];
    let splits = [(1, 1), (1, 1023), (64, 64), (441, 1024), (1024, 1024), (1000, 7)];

    for &frequency in &frequencies {
        for &sample_rate in &sample_rates {
            for &(n1, n2) in &splits {
                let mut split = SineOscillator::new(frequency, sample_rate).unwrap();
                let mut whole = SineOscillator::new(frequency, sample_rate).unwrap();

                let mut joined = split.produce_block(n1);
                joined.extend(split.produce_block(n2));
                let single = whole.produce_block(n1 + n2);

                assert_eq!(split.position(), whole.position());
                for (index, (a, b)) in joined.iter().zip(&single).enumerate() {
                    assert!(
                        (a - b).abs() < 1e-9,
                        "f={frequency} r={sample_rate} n1={n1} n2={n2} index={index}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_continuity_from_phase_offset() {
    let mut offset = SineOscillator::with_phase_offset(330.0, 44_100, 5_000).unwrap();
    let mut fresh = SineOscillator::new(330.0, 44_100).unwrap();

    fresh.produce_block(5_000);
    let mut a = [0.0; 300];
    let mut b = [0.0; 300];
    offset.process(&mut a[..100]);
    offset.process(&mut a[100..]);
    fresh.process(&mut b);
    for (x, y) in a.iter().zip(&b) {
        assert!((x - y).abs() < 1e-9);
    }
}

#[test]
fn test_periodicity() {
    // 100 Hz at 44.1 kHz has a period of exactly 441 samples
    let mut osc = SineOscillator::new(100.0, 44_100).unwrap();
    let first = osc.produce_block(1024);
    let second = osc.produce_block(1024);
    let stream: Vec<f64> = first.iter().chain(&second).copied().collect();

    assert!((stream[0] - stream[441]).abs() < 1e-9);
    for i in 0..(stream.len() - 441) {
        assert!((stream[i] - stream[i + 441]).abs() < 1e-9, "index {i}");
    }
}

#[test]
fn test_boundedness() {
    for frequency in [27.5, 440.0, 4_186.0, 22_000.0] {
        let mut osc = SineOscillator::new(frequency, 44_100).unwrap();
        for _ in 0..50 {
            for sample in osc.produce_block(1024) {
                assert!((-1.0..=1.0).contains(&sample));
            }
        }
    }
}

#[test]
fn test_zero_length_request() {
    let mut osc = SineOscillator::new(440.0, 44_100).unwrap();
    osc.produce_block(10);
    let before = osc.position();
    assert!(osc.produce_block(0).is_empty());
    osc.process(&mut []);
    assert_eq!(osc.position(), before);
}

#[test]
fn test_construction_validation() {
    for (frequency, sample_rate) in [(0.0, 44_100), (-5.0, 44_100), (440.0, 0)] {
        let result = SineOscillator::new(frequency, sample_rate);
        assert!(matches!(result, Err(Error::InvalidParameter { .. })));
    }
}
