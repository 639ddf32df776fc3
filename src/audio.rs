//! Sound notifications
//!
//! No synthesis: the game only announces what happened. Hosts plug in a
//! [`SoundSink`]; the default one logs.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a wall or the paddle
    Bounce,
    /// Brick destroyed
    Break,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Bounce => "bounce",
            SoundEffect::Break => "break",
        }
    }
}

/// Receives fire-and-forget sound notifications
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Sink that only logs the notification
#[derive(Debug, Default)]
pub struct LogSound {
    muted: bool,
}

impl LogSound {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }
}

impl SoundSink for LogSound {
    fn play(&mut self, effect: SoundEffect) {
        if !self.muted {
            log::debug!("Play sound: {}", effect.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(SoundEffect::Bounce.as_str(), "bounce");
        assert_eq!(SoundEffect::Break.as_str(), "break");
    }

    #[test]
    fn test_log_sound_accepts_everything() {
        for muted in [true, false] {
            let mut sink = LogSound::new(muted);
            sink.play(SoundEffect::Bounce);
            sink.play(SoundEffect::Break);
        }
    }
}
