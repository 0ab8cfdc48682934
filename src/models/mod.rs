pub mod deck;
pub mod flashcard;
pub mod session;
pub mod transition;

pub use deck::{Deck, EmptyDeck};
pub use flashcard::Flashcard;
pub use session::{
    CardFace, DeckSession, Mode, PendingMove, ResetConfirmation, ResetRequest, ViewState,
};
pub use transition::TransitionTimer;
