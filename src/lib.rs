pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod relay;

pub use error::GenerateError;
pub use models::{Deck, DeckSession, Flashcard, ViewState};
