//! Audio collaborator
//!
//! The run core fires cues and never waits on them. Hosts plug in a real
//! mixer; the headless driver uses `LogAudio`.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Pickup collected
    Collect,
    /// Run ended by an obstacle
    Hit,
}

/// Music commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCommand {
    PlayRun,
    Pause,
    Resume,
    Stop,
}

/// Fire-and-forget audio surface
pub trait AudioSink {
    fn play_effect(&mut self, effect: SoundEffect);
    fn music(&mut self, command: MusicCommand);
    /// Music volume (0 - 100)
    fn set_music_volume(&mut self, volume: u8);
    /// Sound effects volume (0 - 100)
    fn set_sound_volume(&mut self, volume: u8);

    fn play_jump_cue(&mut self) {
        self.play_effect(SoundEffect::Jump);
    }

    fn play_collect_cue(&mut self) {
        self.play_effect(SoundEffect::Collect);
    }

    fn play_hit_cue(&mut self) {
        self.play_effect(SoundEffect::Hit);
    }

    fn play_run_music(&mut self) {
        self.music(MusicCommand::PlayRun);
    }

    fn pause_music(&mut self) {
        self.music(MusicCommand::Pause);
    }

    fn resume_music(&mut self) {
        self.music(MusicCommand::Resume);
    }

    fn stop_music(&mut self) {
        self.music(MusicCommand::Stop);
    }
}

/// Audio sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogAudio {
    music_volume: u8,
    sfx_volume: u8,
    music_playing: bool,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }
}

impl AudioSink for LogAudio {
    fn play_effect(&mut self, effect: SoundEffect) {
        if self.sfx_volume == 0 {
            return;
        }
        log::debug!("♪ {:?} (volume {})", effect, self.sfx_volume);
    }

    fn music(&mut self, command: MusicCommand) {
        self.music_playing = matches!(command, MusicCommand::PlayRun | MusicCommand::Resume);
        log::debug!("Music {:?} (volume {})", command, self.music_volume);
    }

    fn set_music_volume(&mut self, volume: u8) {
        self.music_volume = volume.min(100);
    }

    fn set_sound_volume(&mut self, volume: u8) {
        self.sfx_volume = volume.min(100);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_is_clamped() {
        let mut audio = LogAudio::new();
        audio.set_music_volume(250);
        audio.set_sound_volume(40);
        assert_eq!(audio.music_volume, 100);
        assert_eq!(audio.sfx_volume, 40);
    }

    #[test]
    fn test_music_state_follows_commands() {
        let mut audio = LogAudio::new();
        audio.play_run_music();
        assert!(audio.music_playing());
        audio.pause_music();
        assert!(!audio.music_playing());
        audio.resume_music();
        assert!(audio.music_playing());
        audio.stop_music();
        assert!(!audio.music_playing());
    }
}
