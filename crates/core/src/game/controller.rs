use std::time::Duration;

use tracing::{debug, info};

use crate::{
    cues::CueSink,
    deck::{Deck, DeckRng},
    models::{Difficulty, Mode, ThemeKind},
    schedule::{Scheduler, TimerId},
};

use super::{
    reducer::{reduce, Effect, Event},
    state::GameState,
};

/// Period of the solo countdown.
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Default time both flipped cards stay visible.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(1000);

/// Owns the game state and carries out reducer effects.
///
/// Front ends call the named operations for input and [`GameController::advance`]
/// with elapsed time; deferred turn endings and the countdown run on an
/// internal [`Scheduler`].
pub struct GameController<S: CueSink> {
    state: GameState,
    scheduler: Scheduler<Event>,
    countdown: Option<TimerId>,
    reveal_delay: Duration,
    rng: DeckRng,
    sink: S,
}

impl<S: CueSink> GameController<S> {
    /// Controller on the mode menu.
    pub fn new(sink: S, rng: DeckRng, theme: ThemeKind, reveal_delay: Duration) -> Self {
        Self {
            state: GameState::new(theme),
            scheduler: Scheduler::new(),
            countdown: None,
            reveal_delay,
            rng,
            sink,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Number of scheduled callbacks, countdown included.
    pub fn pending_callbacks(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn select_mode(&mut self, mode: Mode) {
        info!(?mode, "Mode selected");
        self.dispatch(Event::SelectMode(mode));
    }

    pub fn back_to_mode_select(&mut self) {
        self.dispatch(Event::BackToModeSelect);
    }

    /// Deal a fresh shuffled deck at `difficulty`.
    pub fn start_game(&mut self, difficulty: Difficulty) {
        let deck = Deck::shuffled(difficulty, &mut self.rng);
        self.start_with_deck(difficulty, deck);
    }

    /// Start a session on a specific deck.
    pub fn start_with_deck(&mut self, difficulty: Difficulty, deck: Deck) {
        self.dispatch(Event::Start { difficulty, deck });
        if let Some(session) = self.state.session() {
            info!(
                mode = ?session.mode(),
                %difficulty,
                cards = session.deck().len(),
                "Game started"
            );
        }
    }

    /// Re-deal at the current difficulty. No-op outside a session.
    pub fn restart(&mut self) {
        if let Some(difficulty) = self.state.session().map(|session| session.difficulty()) {
            self.start_game(difficulty);
        }
    }

    pub fn flip(&mut self, index: usize) {
        self.dispatch(Event::Flip(index));
    }

    pub fn return_to_menu(&mut self) {
        info!("Returning to difficulty menu");
        self.dispatch(Event::ReturnToMenu);
    }

    pub fn toggle_theme(&mut self) {
        self.dispatch(Event::ToggleTheme);
    }

    /// Let `elapsed` pass, delivering every callback that came due.
    pub fn advance(&mut self, elapsed: Duration) {
        for event in self.scheduler.advance(elapsed) {
            self.dispatch(event);
        }
    }

    /// Cancel every pending callback. Called on teardown.
    pub fn shutdown(&mut self) {
        self.scheduler.cancel_all();
        self.countdown = None;
    }

    /// Feed one event through the reducer and perform its effects.
    pub fn dispatch(&mut self, event: Event) {
        debug!(?event, "Dispatching");
        let had_outcome = self.outcome_reached();
        let effects = reduce(&mut self.state, event);
        for effect in effects {
            self.apply(effect);
        }
        if !had_outcome {
            if let Some(outcome) = self.state.session().and_then(|session| session.outcome()) {
                info!(?outcome, message = outcome.message(), "Session ended");
            }
        }
    }

    fn outcome_reached(&self) -> bool {
        self.state
            .session()
            .map(|session| session.outcome().is_some())
            .unwrap_or(false)
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Cue(cue) => {
                debug!(cue = cue.name(), "Cue");
                self.sink.play(cue);
            }
            Effect::Celebrate(burst) => self.sink.celebrate(burst),
            Effect::AfterReveal(event) => {
                self.scheduler.after(self.reveal_delay, event);
            }
            Effect::CancelPending => {
                self.scheduler.cancel_all();
                self.countdown = None;
            }
            Effect::StartCountdown { epoch } => {
                if let Some(id) = self.countdown.take() {
                    self.scheduler.cancel(id);
                }
                self.countdown = Some(self.scheduler.every(COUNTDOWN_PERIOD, Event::Tick { epoch }));
            }
            Effect::StopCountdown => {
                if let Some(id) = self.countdown.take() {
                    self.scheduler.cancel(id);
                }
            }
        }
    }
}

impl<S: CueSink> Drop for GameController<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
