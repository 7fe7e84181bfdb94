//! Decks of card codes for dealing onto the table.

use crate::core::rng::{DealCheckpoint, DealRng};

const SUIT_LETTERS: [char; 4] = ['S', 'H', 'D', 'C'];
const RANK_LABELS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

/// An ordered pile of card codes. The top of the deck is the end of the vec.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    codes: Vec<String>,
}

impl Deck {
    /// Create a deck from explicit codes (last code is the top).
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// The standard 52-card deck, unshuffled.
    #[must_use]
    pub fn standard() -> Self {
        let codes = SUIT_LETTERS
            .iter()
            .flat_map(|suit| RANK_LABELS.iter().map(move |rank| format!("{suit}{rank}")))
            .collect();
        Self { codes }
    }

    /// Add `count` jokers with the given code.
    #[must_use]
    pub fn with_jokers(mut self, joker_code: &str, count: usize) -> Self {
        self.codes
            .extend(std::iter::repeat(joker_code.to_string()).take(count));
        self
    }

    /// Shuffle the deck.
    ///
    /// Returns the checkpoint the shuffle started from; handing it to
    /// [`Deck::replay_shuffle`] on a deck in the same order reproduces it.
    pub fn shuffle(&mut self, rng: &mut DealRng) -> DealCheckpoint {
        let checkpoint = rng.checkpoint();
        rng.shuffle(&mut self.codes);
        checkpoint
    }

    /// Repeat a recorded shuffle.
    pub fn replay_shuffle(&mut self, checkpoint: &DealCheckpoint) {
        DealRng::resume(checkpoint).shuffle(&mut self.codes);
    }

    /// Cut the deck at a random depth: the top part moves to the bottom.
    pub fn cut(&mut self, rng: &mut DealRng) {
        let depth = rng.cut_depth(self.codes.len());
        self.codes.rotate_left(depth);
    }

    /// Draw the top card.
    pub fn draw(&mut self) -> Option<String> {
        self.codes.pop()
    }

    /// Draw up to `count` cards from the top, in draw order.
    pub fn draw_many(&mut self, count: usize) -> Vec<String> {
        let take = count.min(self.codes.len());
        let mut drawn = self.codes.split_off(self.codes.len() - take);
        drawn.reverse();
        drawn
    }

    /// Remaining codes, bottom first.
    #[must_use]
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Number of cards left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the deck is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
