//! State transitions for the memory game.
//!
//! `reduce` applies one event to a [`GameState`] and returns the side effects
//! the caller must carry out. It never sleeps, shuffles or plays sounds, so
//! every transition is reproducible in a unit test.

use crate::{
    cues::{Burst, Cue},
    deck::Deck,
    models::{Difficulty, Mode, Outcome},
};

use super::state::{GameState, Session};

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pick solo or duel on the mode menu.
    SelectMode(Mode),
    /// Leave the difficulty menu for the mode menu.
    BackToModeSelect,
    /// Deal `deck` and start playing at `difficulty`.
    Start {
        /// Level of the new session.
        difficulty: Difficulty,
        /// Already shuffled cards.
        deck: Deck,
    },
    /// Turn a card face up.
    Flip(usize),
    /// End of the reveal delay after two cards were flipped.
    ConcludeTurn {
        /// Session the turn belongs to.
        epoch: u64,
        /// Hand the board to the other player.
        swap_player: bool,
    },
    /// One second of the solo countdown elapsed.
    Tick {
        /// Session the countdown belongs to.
        epoch: u64,
    },
    /// Drop the board and go back to the difficulty menu.
    ReturnToMenu,
    /// Switch between dark and light colours.
    ToggleTheme,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Play a sound.
    Cue(Cue),
    /// Fire the confetti burst.
    Celebrate(Burst),
    /// Deliver `event` once the reveal delay has passed.
    AfterReveal(Event),
    /// Cancel every pending deferred event and the countdown.
    CancelPending,
    /// Start the one-second countdown for `epoch`.
    StartCountdown {
        /// Session the countdown belongs to.
        epoch: u64,
    },
    /// Cancel the countdown.
    StopCountdown,
}

/// Apply `event` to `state`, returning the effects to perform in order.
pub fn reduce(state: &mut GameState, event: Event) -> Vec<Effect> {
    let mut effects = Vec::new();
    match event {
        Event::SelectMode(mode) => {
            if state.mode.is_none() {
                state.mode = Some(mode);
            }
        }
        Event::BackToModeSelect => {
            if state.session.is_none() {
                state.mode = None;
            }
        }
        Event::Start { difficulty, deck } => start(state, difficulty, deck, &mut effects),
        Event::Flip(index) => {
            let epoch = state.epoch;
            if let Some(session) = state.session.as_mut() {
                flip(session, epoch, index, &mut effects);
            }
        }
        Event::ConcludeTurn { epoch, swap_player } => {
            if epoch != state.epoch {
                return effects;
            }
            if let Some(session) = state.session.as_mut() {
                session.flipped.clear();
                if swap_player {
                    session.current_player = session.current_player.other();
                }
            }
        }
        Event::Tick { epoch } => {
            if epoch != state.epoch {
                return effects;
            }
            if let Some(session) = state.session.as_mut() {
                tick(session, &mut effects);
            }
        }
        Event::ReturnToMenu => {
            if state.session.take().is_some() {
                state.epoch += 1;
                effects.push(Effect::CancelPending);
                effects.push(Effect::StopCountdown);
            }
        }
        Event::ToggleTheme => {
            state.theme = state.theme.toggled();
        }
    }
    effects
}

fn start(state: &mut GameState, difficulty: Difficulty, deck: Deck, effects: &mut Vec<Effect>) {
    let Some(mode) = state.mode else {
        return;
    };

    state.epoch += 1;
    effects.push(Effect::CancelPending);
    effects.push(Effect::StopCountdown);

    let session = Session::new(mode, difficulty, deck);
    if session.timer_active {
        effects.push(Effect::StartCountdown { epoch: state.epoch });
    }
    state.session = Some(session);
}

fn flip(session: &mut Session, epoch: u64, index: usize, effects: &mut Vec<Effect>) {
    if session.outcome.is_some()
        || session.flipped.len() >= 2
        || index >= session.deck.len()
        || session.flipped.contains(&index)
        || session.matched.contains(&index)
    {
        return;
    }

    effects.push(Effect::Cue(Cue::Flip));
    session.flipped.push(index);

    if let [first, second] = session.flipped[..] {
        resolve(session, epoch, first, second, effects);
    }
}

fn resolve(
    session: &mut Session,
    epoch: u64,
    first: usize,
    second: usize,
    effects: &mut Vec<Effect>,
) {
    let paired = session.deck.is_pair(first, second);
    if paired {
        effects.push(Effect::Cue(Cue::Match));
        session.matched.insert(first);
        session.matched.insert(second);
        session.scores.award(session.current_player);
    }

    session.turns += 1;
    effects.push(Effect::AfterReveal(Event::ConcludeTurn {
        epoch,
        swap_player: !paired && session.mode == Mode::Duel,
    }));

    if paired && session.is_cleared() {
        effects.push(Effect::Cue(Cue::Win));
        effects.push(Effect::Celebrate(Burst::VICTORY));
        session.timer_active = false;
        effects.push(Effect::StopCountdown);
        session.outcome = Some(Outcome::for_cleared_board(session.mode, &session.scores));
    }
}

fn tick(session: &mut Session, effects: &mut Vec<Effect>) {
    if !session.timer_active || session.outcome.is_some() {
        return;
    }
    let Some(left) = session.time_remaining.as_mut() else {
        return;
    };

    *left = left.saturating_sub(1);
    if *left == 0 {
        session.timer_active = false;
        session.outcome = Some(Outcome::TimeUp);
        effects.push(Effect::StopCountdown);
    }
}
