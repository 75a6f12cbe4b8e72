//! Core card types: Suit and Card.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::errors::domain::GameError;

pub const MIN_VALUE: u8 = 1;
pub const MAX_VALUE: u8 = 13;
pub const ANCHOR_VALUE: u8 = 7;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// Fixed suit order; also defines the board row mapping (c=0, d=1, h=2, s=3).
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn code(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub fn row(self) -> u8 {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }

    pub fn from_code(code: char) -> Option<Suit> {
        match code {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for Suit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.code())
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let mut chars = s.chars();
        match (chars.next().and_then(Suit::from_code), chars.next()) {
            (Some(suit), None) => Ok(suit),
            _ => Err(de::Error::custom(format!("unknown suit {s:?}"))),
        }
    }
}

/// A playing card. Identity is (suit, value); the wire id is the suit code
/// followed by the zero-padded value, e.g. `c07`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub value: u8,
}

impl Card {
    pub fn new(suit: Suit, value: u8) -> Result<Card, GameError> {
        if !(MIN_VALUE..=MAX_VALUE).contains(&value) {
            return Err(GameError::internal(format!(
                "card value {value} out of range"
            )));
        }
        Ok(Card { suit, value })
    }

    pub fn id(&self) -> String {
        format!("{}{:02}", self.suit.code(), self.value)
    }

    pub fn is_anchor(&self) -> bool {
        self.value == ANCHOR_VALUE
    }
}

// Ordering is for stable hand sorting only: suit order c<d<h<s, then value.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.value.cmp(&other.value),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Card", 3)?;
        s.serialize_field("id", &self.id())?;
        s.serialize_field("suit", &self.suit)?;
        s.serialize_field("value", &self.value)?;
        s.end()
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Wire {
            suit: Suit,
            value: u8,
        }
        let wire = Wire::deserialize(deserializer)?;
        Card::new(wire.suit, wire.value).map_err(|_| {
            de::Error::custom(format!("card value {} out of range", wire.value))
        })
    }
}

/// True iff the two cards share a suit and differ in value by exactly one.
pub fn is_adjacent(a: Card, b: Card) -> bool {
    a.suit == b.suit && a.value.abs_diff(b.value) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_ids_are_zero_padded() {
        let c = Card::new(Suit::Clubs, 7).unwrap();
        assert_eq!(c.id(), "c07");
        let s = Card::new(Suit::Spades, 13).unwrap();
        assert_eq!(s.id(), "s13");
    }

    #[test]
    fn card_rejects_out_of_range_values() {
        assert!(Card::new(Suit::Hearts, 0).is_err());
        assert!(Card::new(Suit::Hearts, 14).is_err());
        assert!(Card::new(Suit::Hearts, 1).is_ok());
        assert!(Card::new(Suit::Hearts, 13).is_ok());
    }

    #[test]
    fn adjacency_requires_same_suit_and_unit_step() {
        let c7 = Card::new(Suit::Clubs, 7).unwrap();
        let c8 = Card::new(Suit::Clubs, 8).unwrap();
        let c9 = Card::new(Suit::Clubs, 9).unwrap();
        let d8 = Card::new(Suit::Diamonds, 8).unwrap();
        assert!(is_adjacent(c7, c8));
        assert!(is_adjacent(c8, c7));
        assert!(!is_adjacent(c7, c9));
        assert!(!is_adjacent(c7, d8));
    }

    #[test]
    fn card_wire_format_round_trips() {
        let card = Card::new(Suit::Diamonds, 3).unwrap();
        let json = serde_json::to_value(card).unwrap();
        assert_eq!(json["id"], "d03");
        assert_eq!(json["suit"], "d");
        assert_eq!(json["value"], 3);

        let back: Card = serde_json::from_value(json).unwrap();
        assert_eq!(back, card);
    }
}
