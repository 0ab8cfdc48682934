//! Deck is the ordered set of flashcards produced by one generation.
//! A deck is never empty: the only constructor rejects an empty card list.
use super::Flashcard;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("a deck needs at least one flashcard")]
pub struct EmptyDeck;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDeck")]
pub struct Deck {
    name: String,
    flashcards: Vec<Flashcard>,
}

/// Unchecked shape used when reading a saved deck back from JSON
#[derive(Deserialize)]
struct RawDeck {
    name: String,
    flashcards: Vec<Flashcard>,
}

impl TryFrom<RawDeck> for Deck {
    type Error = EmptyDeck;

    fn try_from(raw: RawDeck) -> Result<Self, Self::Error> {
        Deck::new(raw.name, raw.flashcards)
    }
}

impl Deck {
    pub fn new(name: impl Into<String>, flashcards: Vec<Flashcard>) -> Result<Self, EmptyDeck> {
        if flashcards.is_empty() {
            return Err(EmptyDeck);
        }
        Ok(Self {
            name: name.into(),
            flashcards,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flashcards(&self) -> &[Flashcard] {
        &self.flashcards
    }

    pub fn get(&self, index: usize) -> Option<&Flashcard> {
        self.flashcards.get(index)
    }

    pub fn len(&self) -> usize {
        self.flashcards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flashcards.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.flashcards.len() - 1
    }
}
