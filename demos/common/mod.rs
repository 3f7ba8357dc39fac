//! Common utilities for the playback demos.

use anyhow::Result;
use std::time::Duration;
use tonestream::{AudioOutput, StreamSettings, StreamingBridge};

/// Plays `bridge` on the default device for `seconds`, then releases the stream.
pub fn play_for(settings: StreamSettings, bridge: StreamingBridge, seconds: u64) -> Result<()> {
    let output = AudioOutput::open(settings, bridge)?;
    output.start()?;
    println!("Playing for {} seconds...", seconds);
    output.wait_timeout(Duration::from_secs(seconds))?;
    println!("Done!");
    Ok(())
}
