use std::io::{self, Write};

use memomatch_core::{Burst, Cue, CueSink};
use tracing::{debug, warn};

/// Rings the terminal bell for cues and queues bursts for the confetti overlay.
pub struct TerminalCues {
    sound: bool,
    bursts: Vec<Burst>,
}

impl TerminalCues {
    pub fn new(sound: bool) -> Self {
        Self {
            sound,
            bursts: Vec::new(),
        }
    }

    /// Bursts requested since the last call.
    pub fn take_bursts(&mut self) -> Vec<Burst> {
        std::mem::take(&mut self.bursts)
    }
}

impl CueSink for TerminalCues {
    fn play(&mut self, cue: Cue) {
        debug!(cue = cue.name(), "Playing cue");
        if !self.sound {
            return;
        }
        let mut stdout = io::stdout();
        if let Err(err) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            warn!(?err, cue = cue.name(), "Failed to ring terminal bell");
        }
    }

    fn celebrate(&mut self, burst: Burst) {
        debug!(particles = burst.particle_count, "Celebration queued");
        self.bursts.push(burst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bursts_are_drained_once() {
        let mut cues = TerminalCues::new(false);
        cues.play(Cue::Win);
        cues.celebrate(Burst::VICTORY);
        assert_eq!(cues.take_bursts(), vec![Burst::VICTORY]);
        assert!(cues.take_bursts().is_empty());
    }
}
