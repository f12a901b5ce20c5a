//! Shared domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

const EASY_ICONS: [&str; 4] = ["🐱", "🐶", "🐸", "🐵"];
const MEDIUM_ICONS: [&str; 6] = ["🐱", "🐶", "🐸", "🐵", "🐼", "🦊"];
const HARD_ICONS: [&str; 12] = [
    "🐱", "🐶", "🐸", "🐵", "🐼", "🦊", "🦁", "🐮", "🐷", "🐔", "🐧", "🐙",
];

/// Whether one player races the clock or two players alternate turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Single player against a countdown.
    Solo,
    /// Two players sharing one board.
    Duel,
}

impl Mode {
    /// Menu label used by front ends.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Solo => "🎯 Single Player",
            Mode::Duel => "👥 Two Player",
        }
    }
}

/// Fixed difficulty levels controlling deck size, grid shape and countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Four pairs.
    Easy,
    /// Six pairs.
    Medium,
    /// Twelve pairs.
    Hard,
}

impl Difficulty {
    /// All levels in menu order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Icon set duplicated into the deck for this level.
    pub fn icons(self) -> &'static [&'static str] {
        match self {
            Difficulty::Easy => &EASY_ICONS,
            Difficulty::Medium => &MEDIUM_ICONS,
            Difficulty::Hard => &HARD_ICONS,
        }
    }

    /// Number of pairs on the board.
    pub fn pairs(self) -> usize {
        self.icons().len()
    }

    /// Columns of the card grid; the largest set gets a wider grid.
    pub fn columns(self) -> usize {
        match self {
            Difficulty::Hard => 6,
            Difficulty::Easy | Difficulty::Medium => 4,
        }
    }

    /// Solo countdown length in seconds.
    pub fn countdown_secs(self) -> u32 {
        match self {
            Difficulty::Easy => 40,
            Difficulty::Medium => 60,
            Difficulty::Hard => 80,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(name)
    }
}

/// Seat at the table. Solo games always play as `One`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    /// Player 1, who always opens.
    One,
    /// Player 2.
    Two,
}

impl Player {
    /// The opponent seat.
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 1-based number shown to players.
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    fn slot(self) -> usize {
        usize::from(self.number() - 1)
    }
}

/// Pair counts per player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scores([u32; 2]);

impl Scores {
    /// Pairs found by `player`.
    pub fn get(&self, player: Player) -> u32 {
        self.0[player.slot()]
    }

    /// Credit one pair to `player`.
    pub fn award(&mut self, player: Player) {
        self.0[player.slot()] += 1;
    }
}

/// Colour scheme flag; game logic never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    /// Neon on navy.
    #[default]
    Dark,
    /// Muted on light grey.
    Light,
}

impl ThemeKind {
    /// The other scheme.
    pub fn toggled(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::Dark,
        }
    }
}

/// A card on the board. `id` is its shuffled position; `icon` decides matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Position in the shuffled deck.
    pub id: usize,
    /// Face symbol.
    pub icon: &'static str,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Solo board cleared.
    Cleared,
    /// Duel board cleared with a higher score for one player.
    Winner(Player),
    /// Duel board cleared with equal scores.
    Tie,
    /// Solo countdown reached zero first.
    TimeUp,
}

impl Outcome {
    /// Decide a finished board: solo games clear, duels compare scores.
    pub fn for_cleared_board(mode: Mode, scores: &Scores) -> Self {
        match mode {
            Mode::Solo => Outcome::Cleared,
            Mode::Duel => {
                let one = scores.get(Player::One);
                let two = scores.get(Player::Two);
                match one.cmp(&two) {
                    std::cmp::Ordering::Greater => Outcome::Winner(Player::One),
                    std::cmp::Ordering::Less => Outcome::Winner(Player::Two),
                    std::cmp::Ordering::Equal => Outcome::Tie,
                }
            }
        }
    }

    /// Banner text shown when the session ends.
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Cleared => "🎉 You matched them all!",
            Outcome::Winner(Player::One) => "🏆 Player 1 Wins!",
            Outcome::Winner(Player::Two) => "🏆 Player 2 Wins!",
            Outcome::Tie => "🤝 It's a Tie!",
            Outcome::TimeUp => "⏰ Time's Up!",
        }
    }
}
