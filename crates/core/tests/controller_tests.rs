use std::time::Duration;

use memomatch_core::{
    game::{COUNTDOWN_PERIOD, DEFAULT_REVEAL_DELAY},
    Burst, Cue, CueSink, Deck, DeckRng, Difficulty, GameController, Mode, Outcome, Player, Screen,
    ThemeKind,
};

const SECOND: Duration = Duration::from_secs(1);
const EASY_DECK: [&str; 8] = ["🐱", "🐶", "🐸", "🐵", "🐱", "🐶", "🐸", "🐵"];
const MEDIUM_DECK: [&str; 12] = [
    "🐱", "🐶", "🐸", "🐵", "🐼", "🦊", "🐱", "🐶", "🐸", "🐵", "🐼", "🦊",
];

#[derive(Default)]
struct Recorder {
    cues: Vec<Cue>,
    bursts: Vec<Burst>,
}

impl CueSink for Recorder {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    fn celebrate(&mut self, burst: Burst) {
        self.bursts.push(burst);
    }
}

fn controller() -> GameController<Recorder> {
    GameController::new(
        Recorder::default(),
        DeckRng::seeded(11),
        ThemeKind::Dark,
        DEFAULT_REVEAL_DELAY,
    )
}

fn solo_easy() -> GameController<Recorder> {
    let mut game = controller();
    game.select_mode(Mode::Solo);
    game.start_with_deck(Difficulty::Easy, Deck::from_faces(EASY_DECK));
    game
}

fn flip_pair(game: &mut GameController<Recorder>, first: usize, second: usize) {
    game.flip(first);
    game.flip(second);
    game.advance(DEFAULT_REVEAL_DELAY);
}

#[test]
fn solo_easy_scenario_clears_board() {
    let mut game = solo_easy();

    game.flip(0);
    game.flip(4);
    {
        let session = game.state().session().expect("session");
        assert_eq!(session.matched().iter().copied().collect::<Vec<_>>(), [0, 4]);
        assert_eq!(session.scores().get(Player::One), 1);
    }
    game.advance(DEFAULT_REVEAL_DELAY);

    flip_pair(&mut game, 1, 5);
    flip_pair(&mut game, 2, 6);
    flip_pair(&mut game, 3, 7);

    let session = game.state().session().expect("session");
    assert_eq!(session.matched().len(), 8);
    assert_eq!(session.outcome(), Some(Outcome::Cleared));
    assert_eq!(session.outcome().map(Outcome::message), Some("🎉 You matched them all!"));
    assert!(!session.timer_active());
    assert_eq!(game.state().screen(), Screen::Ended);

    let recorder = game.sink();
    assert_eq!(recorder.cues.iter().filter(|cue| **cue == Cue::Win).count(), 1);
    assert_eq!(recorder.cues.iter().filter(|cue| **cue == Cue::Match).count(), 4);
    assert_eq!(recorder.bursts, vec![Burst::VICTORY]);
}

#[test]
fn win_never_fires_before_last_pair() {
    let mut game = solo_easy();
    flip_pair(&mut game, 0, 4);
    flip_pair(&mut game, 1, 5);
    flip_pair(&mut game, 2, 6);
    game.flip(3);

    let session = game.state().session().expect("session");
    assert_eq!(session.outcome(), None);
    assert!(!game.sink().cues.contains(&Cue::Win));
    assert!(game.sink().bursts.is_empty());
}

#[test]
fn cleared_board_stops_countdown() {
    let mut game = solo_easy();
    for (a, b) in [(0, 4), (1, 5), (2, 6), (3, 7)] {
        flip_pair(&mut game, a, b);
    }
    let frozen = game.state().session().and_then(|s| s.time_remaining());
    game.advance(SECOND * 60);
    let session = game.state().session().expect("session");
    assert_eq!(session.time_remaining(), frozen);
    assert_eq!(session.outcome(), Some(Outcome::Cleared));
    assert_eq!(game.pending_callbacks(), 0);
}

#[test]
fn countdown_runs_and_expires() {
    let mut game = solo_easy();
    assert_eq!(game.state().session().and_then(|s| s.time_remaining()), Some(40));

    game.advance(COUNTDOWN_PERIOD);
    assert_eq!(game.state().session().and_then(|s| s.time_remaining()), Some(39));

    game.advance(Duration::from_millis(500));
    assert_eq!(game.state().session().and_then(|s| s.time_remaining()), Some(39));

    game.advance(SECOND * 45);
    let session = game.state().session().expect("session");
    assert_eq!(session.time_remaining(), Some(0));
    assert!(!session.timer_active());
    assert_eq!(session.outcome(), Some(Outcome::TimeUp));
    assert_eq!(game.pending_callbacks(), 0);
}

#[test]
fn flipped_cards_stay_visible_for_reveal_delay() {
    let mut game = solo_easy();
    game.flip(0);
    game.flip(1);

    game.advance(DEFAULT_REVEAL_DELAY - Duration::from_millis(1));
    assert_eq!(game.state().session().expect("session").flipped(), &[0, 1]);
    game.flip(2);
    assert_eq!(game.state().session().expect("session").flipped(), &[0, 1]);

    game.advance(Duration::from_millis(1));
    assert!(game.state().session().expect("session").flipped().is_empty());
}

#[test]
fn duel_medium_mismatch_swaps_player() {
    let mut game = controller();
    game.select_mode(Mode::Duel);
    game.start_with_deck(Difficulty::Medium, Deck::from_faces(MEDIUM_DECK));
    assert_eq!(game.pending_callbacks(), 0);

    game.flip(0);
    game.flip(1);
    {
        let session = game.state().session().expect("session");
        assert_eq!(session.current_player(), Player::One);
        assert_eq!(session.turns(), 1);
        assert!(session.matched().is_empty());
    }

    game.advance(DEFAULT_REVEAL_DELAY);
    let session = game.state().session().expect("session");
    assert_eq!(session.current_player(), Player::Two);
    assert_eq!(session.turns(), 1);
    assert!(session.flipped().is_empty());
}

#[test]
fn duel_match_keeps_player_and_credits_them() {
    let mut game = controller();
    game.select_mode(Mode::Duel);
    game.start_with_deck(Difficulty::Medium, Deck::from_faces(MEDIUM_DECK));

    flip_pair(&mut game, 0, 1);
    flip_pair(&mut game, 2, 8);

    let session = game.state().session().expect("session");
    assert_eq!(session.current_player(), Player::Two);
    assert_eq!(session.scores().get(Player::Two), 1);
    assert_eq!(session.scores().get(Player::One), 0);
    assert!((session.progress(Player::Two) - 1.0 / 6.0).abs() < f64::EPSILON);
}

#[test]
fn duel_tie_is_reported() {
    let mut game = controller();
    game.select_mode(Mode::Duel);
    game.start_with_deck(Difficulty::Easy, Deck::from_faces(EASY_DECK));

    // Player 1 scores, misses; player 2 scores, misses; then one pair each.
    flip_pair(&mut game, 0, 4);
    flip_pair(&mut game, 1, 2);
    flip_pair(&mut game, 1, 5);
    flip_pair(&mut game, 2, 3);
    flip_pair(&mut game, 2, 6);
    flip_pair(&mut game, 3, 7);

    let session = game.state().session().expect("session");
    assert_eq!(session.scores().get(Player::One), 2);
    assert_eq!(session.scores().get(Player::Two), 2);
    assert_eq!(session.outcome(), Some(Outcome::Tie));
}

#[test]
fn restart_cancels_pending_swap_and_reshuffles() {
    let mut game = controller();
    game.select_mode(Mode::Duel);
    game.start_game(Difficulty::Hard);
    let first_deck = game.state().session().expect("session").deck().clone();

    let (a, b) = first_mismatch(&first_deck);
    game.flip(a);
    game.flip(b);
    game.restart();
    assert_eq!(game.pending_callbacks(), 0);

    game.advance(SECOND * 2);
    let session = game.state().session().expect("session");
    assert_eq!(session.current_player(), Player::One);
    assert_eq!(session.turns(), 0);
    assert!(session.flipped().is_empty());
    assert_eq!(session.deck().len(), 24);
    assert_eq!(session.columns(), 6);
}

#[test]
fn return_to_menu_stops_everything_but_keeps_mode() {
    let mut game = solo_easy();
    game.flip(0);
    game.flip(1);
    game.return_to_menu();

    assert_eq!(game.state().screen(), Screen::DifficultySelect);
    assert_eq!(game.state().mode(), Some(Mode::Solo));
    assert_eq!(game.pending_callbacks(), 0);

    game.back_to_mode_select();
    assert_eq!(game.state().screen(), Screen::ModeSelect);
}

#[test]
fn restart_outside_session_is_noop() {
    let mut game = controller();
    game.select_mode(Mode::Solo);
    game.restart();
    assert_eq!(game.state().screen(), Screen::DifficultySelect);
}

#[test]
fn shutdown_cancels_callbacks() {
    let mut game = solo_easy();
    game.flip(0);
    game.flip(1);
    assert_eq!(game.pending_callbacks(), 2);

    game.shutdown();
    assert_eq!(game.pending_callbacks(), 0);
}

#[test]
fn theme_toggle_does_not_touch_session() {
    let mut game = solo_easy();
    game.flip(0);
    game.toggle_theme();
    assert_eq!(game.state().theme(), ThemeKind::Light);
    assert_eq!(game.state().session().expect("session").flipped(), &[0]);
    assert_eq!(game.sink().cues, vec![Cue::Flip]);
}

fn first_mismatch(deck: &Deck) -> (usize, usize) {
    (1..deck.len())
        .find(|index| !deck.is_pair(0, *index))
        .map(|index| (0, index))
        .expect("deck has more than one icon")
}
