use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
    deck::Deck,
    models::{Difficulty, Mode, Outcome, Player, Scores, ThemeKind},
};

/// Seconds under which the countdown is shown as urgent.
pub const LOW_TIME_SECS: u32 = 10;

/// Which screen the game is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
    /// Choosing solo or duel.
    ModeSelect,
    /// Mode chosen, choosing a level.
    DifficultySelect,
    /// A board is in play.
    Playing,
    /// The board is still shown but the session has an outcome.
    Ended,
}

/// One play-through from deal to outcome.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) mode: Mode,
    pub(crate) difficulty: Difficulty,
    pub(crate) deck: Deck,
    pub(crate) flipped: Vec<usize>,
    pub(crate) matched: BTreeSet<usize>,
    pub(crate) turns: u32,
    pub(crate) current_player: Player,
    pub(crate) scores: Scores,
    pub(crate) time_remaining: Option<u32>,
    pub(crate) timer_active: bool,
    pub(crate) outcome: Option<Outcome>,
}

impl Session {
    pub(crate) fn new(mode: Mode, difficulty: Difficulty, deck: Deck) -> Self {
        let time_remaining = match mode {
            Mode::Solo => Some(difficulty.countdown_secs()),
            Mode::Duel => None,
        };
        Self {
            mode,
            difficulty,
            deck,
            flipped: Vec::with_capacity(2),
            matched: BTreeSet::new(),
            turns: 0,
            current_player: Player::One,
            scores: Scores::default(),
            time_remaining,
            timer_active: mode == Mode::Solo,
            outcome: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Face-up unresolved cards, in flip order.
    pub fn flipped(&self) -> &[usize] {
        &self.flipped
    }

    pub fn matched(&self) -> &BTreeSet<usize> {
        &self.matched
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// Seconds left on the solo countdown; `None` in duels.
    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    pub fn timer_active(&self) -> bool {
        self.timer_active
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn columns(&self) -> usize {
        self.difficulty.columns()
    }

    pub fn total_pairs(&self) -> usize {
        self.deck.len() / 2
    }

    /// Whether the card shows its icon.
    pub fn is_face_up(&self, index: usize) -> bool {
        self.flipped.contains(&index) || self.matched.contains(&index)
    }

    pub fn is_cleared(&self) -> bool {
        !self.deck.is_empty() && self.matched.len() == self.deck.len()
    }

    /// Share of all pairs found by `player`, in `0.0..=1.0`.
    pub fn progress(&self, player: Player) -> f64 {
        let total = self.total_pairs();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.scores.get(player)) / total as f64
    }

    pub fn is_low_on_time(&self) -> bool {
        matches!(self.time_remaining, Some(left) if left < LOW_TIME_SECS)
    }
}

/// Everything the controller owns between events.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub(crate) mode: Option<Mode>,
    pub(crate) session: Option<Session>,
    pub(crate) theme: ThemeKind,
    pub(crate) epoch: u64,
}

impl GameState {
    /// Fresh state on the mode menu.
    pub fn new(theme: ThemeKind) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn screen(&self) -> Screen {
        match (&self.mode, &self.session) {
            (None, _) => Screen::ModeSelect,
            (Some(_), None) => Screen::DifficultySelect,
            (Some(_), Some(session)) if session.outcome.is_some() => Screen::Ended,
            (Some(_), Some(_)) => Screen::Playing,
        }
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn theme(&self) -> ThemeKind {
        self.theme
    }

    /// Identifier of the current session; deferred events from older epochs are stale.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
