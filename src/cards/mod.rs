//! Cards: identity decoding, decks, and the runtime card entity.
//!
//! ## Key Types
//!
//! - `Suit` / `Rank`: Decoded identity (`Rank::INVALID` for bad codes)
//! - `CardDecoder`: Pluggable code grammar; `StandardDecoder` is the default
//! - `Deck`: Ordered pile of codes for dealing
//! - `Card`: Runtime card state (owner, selection, placement, drag state)

pub mod card;
pub mod code;
pub mod deck;

pub use card::{Card, CardMap, CardState, PreDrag};
pub use code::{CardDecoder, Rank, StandardDecoder, Suit};
pub use deck::Deck;
