//! Deck construction and shuffling.

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::models::{Card, Difficulty};

/// Shuffle source for new decks. Seeded runs repeat the same deal sequence.
#[derive(Debug, Clone)]
pub struct DeckRng {
    inner: ChaCha8Rng,
}

impl DeckRng {
    /// Deterministic generator for tests and reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_else(Self::from_entropy)
    }
}

/// Ordered cards on the board; every icon appears exactly twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Duplicate the difficulty's icon set and shuffle it.
    pub fn shuffled(difficulty: Difficulty, rng: &mut DeckRng) -> Self {
        let icons = difficulty.icons();
        let mut faces: Vec<&'static str> = icons.iter().chain(icons.iter()).copied().collect();
        faces.shuffle(&mut rng.inner);
        Self::from_faces(faces)
    }

    /// Deck in the exact order given. Callers are responsible for pairing.
    pub fn from_faces(faces: impl IntoIterator<Item = &'static str>) -> Self {
        let cards = faces
            .into_iter()
            .enumerate()
            .map(|(id, icon)| Card { id, icon })
            .collect();
        Self { cards }
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True before a game has been dealt.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card at `index`, if on the board.
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Cards in board order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Whether the cards at both indices carry the same icon.
    pub fn is_pair(&self, first: usize, second: usize) -> bool {
        match (self.get(first), self.get(second)) {
            (Some(a), Some(b)) => first != second && a.icon == b.icon,
            _ => false,
        }
    }
}
