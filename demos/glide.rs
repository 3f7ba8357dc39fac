//! Two tones mixed by the bridge, with the upper one stepping through a
//! scale from the main thread while the audio thread keeps playing.

mod common;

use std::thread;
use std::time::Duration;
use tonestream::{SignalExt, SineOscillator, StreamSettings, StreamingBridge};

fn main() -> Result<(), anyhow::Error> {
    let settings = StreamSettings::default();

    let drone = SineOscillator::new(220.0, settings.sample_rate)?;
    let melody = SineOscillator::new(220.0, settings.sample_rate)?;
    let control = melody.frequency_control();

    let bridge = StreamingBridge::new(settings.bridge_settings())?
        .with_oscillator(drone.gain(0.6))
        .with_oscillator(melody);

    let stepper = thread::spawn(move || -> tonestream::Result<()> {
        // A major scale above the drone
        for ratio in [1.0, 9.0 / 8.0, 5.0 / 4.0, 4.0 / 3.0, 3.0 / 2.0, 5.0 / 3.0, 15.0 / 8.0, 2.0] {
            control.set(440.0 * ratio)?;
            thread::sleep(Duration::from_millis(500));
        }
        Ok(())
    });

    common::play_for(settings, bridge, 4)?;
    stepper
        .join()
        .map_err(|_| anyhow::anyhow!("scale thread panicked"))??;
    Ok(())
}
