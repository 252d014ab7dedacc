use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use std::time::Duration;

/// Audio manager for playing sound effects. Effects are short synthesized
/// tones, so no asset files are needed. When no output device is available
/// every play call is a silent no-op.
pub struct AudioManager {
    /// Keeps the stream alive for the handle; None when audio is unavailable
    output: Option<(OutputStream, OutputStreamHandle)>,
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            output: OutputStream::try_default().ok(),
        }
    }

    /// Short high blip for a bolt leaving the ship
    pub fn play_fire(&self) {
        self.play_tone(880.0, 60);
    }

    /// Longer low tone for the ship taking a hit
    pub fn play_hit(&self) {
        self.play_tone(220.0, 200);
    }

    fn play_tone(&self, frequency: f32, millis: u64) {
        let Some((_, stream_handle)) = &self.output else {
            return;
        };
        // Ignore errors for sound playback - don't want to crash the game
        if let Ok(sink) = Sink::try_new(stream_handle) {
            let source = SineWave::new(frequency)
                .take_duration(Duration::from_millis(millis))
                .amplify(0.05);
            sink.append(source);
            sink.detach();
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}
