//! Card identity decoding.
//!
//! A card code is a suit letter followed by a rank: `"SA"` is the ace of
//! spades, `"H10"` the ten of hearts, `"CK"` the king of clubs. The joker
//! code (default `"JK"`) is matched case-insensitively before any other
//! parsing.
//!
//! Unparseable ranks never fail: they decode to `Rank::INVALID` (0) so that
//! odd codes still flow through selection and layout.

use serde::{Deserialize, Serialize};

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// `C`
    Clubs,
    /// `D`
    Diamonds,
    /// `H`
    Hearts,
    /// `S`
    Spades,
    /// The configured joker code.
    Joker,
    /// Any other leading character, uppercased.
    Other(char),
    /// Empty code.
    Blank,
}

impl Suit {
    /// Decode a suit from the leading character of a code.
    #[must_use]
    pub fn from_char(c: char) -> Self {
        match c.to_ascii_uppercase() {
            'C' => Suit::Clubs,
            'D' => Suit::Diamonds,
            'H' => Suit::Hearts,
            'S' => Suit::Spades,
            other => Suit::Other(other),
        }
    }

    /// The suit letter used in card codes.
    #[must_use]
    pub fn letter(self) -> Option<char> {
        match self {
            Suit::Clubs => Some('C'),
            Suit::Diamonds => Some('D'),
            Suit::Hearts => Some('H'),
            Suit::Spades => Some('S'),
            Suit::Other(c) => Some(c),
            Suit::Joker | Suit::Blank => None,
        }
    }
}

/// Card rank. Valid ranks are 1 (ace) through 13 (king); 0 marks an
/// unparseable or out-of-range rank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    /// Sentinel for unparseable ranks.
    pub const INVALID: Rank = Rank(0);
    /// Ace.
    pub const ACE: Rank = Rank(1);
    /// Jack.
    pub const JACK: Rank = Rank(11);
    /// Queen.
    pub const QUEEN: Rank = Rank(12);
    /// King.
    pub const KING: Rank = Rank(13);

    /// Parse the rank part of a card code.
    ///
    /// ```
    /// use card_table::cards::Rank;
    ///
    /// assert_eq!(Rank::parse("A"), Rank::ACE);
    /// assert_eq!(Rank::parse("q"), Rank::QUEEN);
    /// assert_eq!(Rank::parse("10"), Rank(10));
    /// assert_eq!(Rank::parse("X"), Rank::INVALID);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.eq_ignore_ascii_case("A") {
            return Rank::ACE;
        }
        if text.eq_ignore_ascii_case("J") {
            return Rank::JACK;
        }
        if text.eq_ignore_ascii_case("Q") {
            return Rank::QUEEN;
        }
        if text.eq_ignore_ascii_case("K") {
            return Rank::KING;
        }
        match text.parse::<u8>() {
            Ok(value) if (1..=13).contains(&value) => Rank(value),
            _ => Rank::INVALID,
        }
    }

    /// Whether this rank is in 1..=13.
    #[must_use]
    pub fn is_valid(self) -> bool {
        (1..=13).contains(&self.0)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Decodes card codes into suit and rank.
///
/// The table consumes identities through this trait so games can plug in
/// their own code grammar.
pub trait CardDecoder {
    /// Decode a card code. Must not fail; use `Rank::INVALID` for bad input.
    fn decode(&self, code: &str) -> (Suit, Rank);
}

/// Decoder for the standard `<suit><rank>` grammar plus a joker code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandardDecoder {
    joker_code: String,
}

impl StandardDecoder {
    /// Create a decoder that treats `joker_code` as the joker.
    pub fn new(joker_code: impl Into<String>) -> Self {
        Self {
            joker_code: joker_code.into(),
        }
    }

    /// The configured joker code.
    #[must_use]
    pub fn joker_code(&self) -> &str {
        &self.joker_code
    }
}

impl Default for StandardDecoder {
    fn default() -> Self {
        Self::new("JK")
    }
}

impl CardDecoder for StandardDecoder {
    fn decode(&self, code: &str) -> (Suit, Rank) {
        let code = code.trim();
        if !self.joker_code.is_empty() && code.eq_ignore_ascii_case(&self.joker_code) {
            return (Suit::Joker, Rank::INVALID);
        }

        let mut chars = code.chars();
        match chars.next() {
            Some(first) => (Suit::from_char(first), Rank::parse(chars.as_str())),
            None => (Suit::Blank, Rank::INVALID),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_grammar() {
        assert_eq!(Rank::parse("A"), Rank(1));
        assert_eq!(Rank::parse("J"), Rank(11));
        assert_eq!(Rank::parse("Q"), Rank(12));
        assert_eq!(Rank::parse("K"), Rank(13));
        assert_eq!(Rank::parse("7"), Rank(7));
        assert_eq!(Rank::parse("10"), Rank(10));
    }

    #[test]
    fn test_rank_invalid() {
        assert_eq!(Rank::parse(""), Rank::INVALID);
        assert_eq!(Rank::parse("Z"), Rank::INVALID);
        assert_eq!(Rank::parse("0"), Rank::INVALID);
        assert_eq!(Rank::parse("14"), Rank::INVALID);
        assert_eq!(Rank::parse("-3"), Rank::INVALID);
        assert!(!Rank::INVALID.is_valid());
        assert!(Rank::KING.is_valid());
    }

    #[test]
    fn test_decode_standard_codes() {
        let decoder = StandardDecoder::default();

        assert_eq!(decoder.decode("SA"), (Suit::Spades, Rank::ACE));
        assert_eq!(decoder.decode("h10"), (Suit::Hearts, Rank(10)));
        assert_eq!(decoder.decode("DQ"), (Suit::Diamonds, Rank::QUEEN));
        assert_eq!(decoder.decode("C2"), (Suit::Clubs, Rank(2)));
    }

    #[test]
    fn test_decode_joker() {
        let decoder = StandardDecoder::default();
        assert_eq!(decoder.decode("JK"), (Suit::Joker, Rank::INVALID));
        assert_eq!(decoder.decode("jk"), (Suit::Joker, Rank::INVALID));

        // A different joker code turns "JK" back into an ordinary code
        let decoder = StandardDecoder::new("XX");
        assert_eq!(decoder.decode("JK"), (Suit::Other('J'), Rank::KING));
        assert_eq!(decoder.decode("XX"), (Suit::Joker, Rank::INVALID));
    }

    #[test]
    fn test_decode_odd_codes() {
        let decoder = StandardDecoder::default();
        assert_eq!(decoder.decode(""), (Suit::Blank, Rank::INVALID));
        assert_eq!(decoder.decode("S"), (Suit::Spades, Rank::INVALID));
        assert_eq!(decoder.decode("?5"), (Suit::Other('?'), Rank(5)));
    }

    #[test]
    fn test_suit_letter() {
        assert_eq!(Suit::Hearts.letter(), Some('H'));
        assert_eq!(Suit::Joker.letter(), None);
        assert_eq!(Suit::from_char('s'), Suit::Spades);
    }
}
