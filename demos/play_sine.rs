mod common;

use tonestream::{SineOscillator, StreamSettings, StreamingBridge};

fn main() -> Result<(), anyhow::Error> {
    let settings = StreamSettings::default();

    // Create oscillator at 440 Hz (A4 note)
    let bridge = StreamingBridge::new(settings.bridge_settings())?
        .with_oscillator(SineOscillator::new(440.0, settings.sample_rate)?);

    // Play it for 5 seconds
    common::play_for(settings, bridge, 5)
}
