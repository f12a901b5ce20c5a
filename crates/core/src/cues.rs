//! Sound and celebration hooks invoked by the controller.

use serde::Serialize;

/// Named sound triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cue {
    /// A card turned face up.
    Flip,
    /// Two face-up cards paired.
    Match,
    /// The board was cleared.
    Win,
}

impl Cue {
    /// Stable name for logs and sound lookup.
    pub fn name(self) -> &'static str {
        match self {
            Cue::Flip => "flip",
            Cue::Match => "match",
            Cue::Win => "win",
        }
    }
}

/// Parameters of the confetti burst fired when the board is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Burst {
    /// Number of confetti pieces.
    pub particle_count: u32,
    /// Spread angle in degrees.
    pub spread: f32,
    /// Horizontal origin as a fraction of the surface width.
    pub origin_x: f32,
    /// Vertical origin as a fraction of the surface height.
    pub origin_y: f32,
}

impl Burst {
    /// The burst used for a cleared board.
    pub const VICTORY: Burst = Burst {
        particle_count: 150,
        spread: 100.0,
        origin_x: 0.5,
        origin_y: 0.6,
    };
}

/// Fire-and-forget outputs of the game. Nothing is returned to the caller.
pub trait CueSink {
    /// Play the named sound.
    fn play(&mut self, cue: Cue);

    /// Launch a celebratory burst.
    fn celebrate(&mut self, _burst: Burst) {}
}

/// Sink that drops every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl CueSink for Silent {
    fn play(&mut self, _cue: Cue) {}
}

impl<S: CueSink + ?Sized> CueSink for &mut S {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue);
    }

    fn celebrate(&mut self, burst: Burst) {
        (**self).celebrate(burst);
    }
}
