//! Deck session: position, flip state and the upload/generation lifecycle
//! over one immutable deck.
//!
//! Navigation is two-phase. `next()`/`prev()` turn the current card face down
//! right away and hand back a [`PendingMove`]; the index only changes once the
//! caller passes that token to [`DeckSession::complete_move`], normally after
//! [`TRANSITION_DELAY`]. Out-of-range requests are ignored, never reported.

use super::Deck;
use super::Flashcard;
use crate::error::GenerateError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Time a card needs to turn back to its question face before the index moves
pub const TRANSITION_DELAY: Duration = Duration::from_millis(200);

pub const RESET_PROMPT: &str = "Upload a new file? Current cards will be cleared.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Mode {
    #[default]
    Empty,
    Loading,
    Browsing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CardFace {
    Front,
    Back,
}

/// A next/prev move that has begun but not yet moved the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingMove {
    target: usize,
    epoch: u64,
}

/// An outstanding "clear the deck?" question, bound to the deck it was asked about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetRequest {
    epoch: u64,
}

/// Yes/no gate asked before the deck is thrown away.
pub trait ResetConfirmation {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl ResetConfirmation for bool {
    fn confirm(&mut self, _prompt: &str) -> bool {
        *self
    }
}

impl<F> ResetConfirmation for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Serializable snapshot of everything the presentation needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub mode: Mode,
    pub file: Option<PathBuf>,
    pub card_count: usize,
    pub current_index: usize,
    pub is_flipped: bool,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub transition_pending: bool,
}

#[derive(Default)]
pub struct DeckSession {
    deck: Option<Deck>,
    file: Option<PathBuf>,
    current_index: usize,
    is_flipped: bool,
    is_loading: bool,
    error_message: Option<String>,
    pending_move: Option<PendingMove>,
    // bumped on every deck change; stale tokens carry an older value
    epoch: u64,
}

impl DeckSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        if self.is_loading {
            Mode::Loading
        } else if self.deck.is_some() {
            Mode::Browsing
        } else {
            Mode::Empty
        }
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        self.deck.as_ref()?.get(self.current_index)
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub fn face(&self) -> CardFace {
        if self.is_flipped {
            CardFace::Back
        } else {
            CardFace::Front
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn can_next(&self) -> bool {
        self.deck
            .as_ref()
            .is_some_and(|deck| self.current_index < deck.last_index())
    }

    pub fn can_prev(&self) -> bool {
        self.deck.is_some() && self.current_index > 0
    }

    /// Fraction of the deck reached so far, counting the current card
    pub fn progress(&self) -> f32 {
        match &self.deck {
            Some(deck) => (self.current_index + 1) as f32 / deck.len() as f32,
            None => 0.0,
        }
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            mode: self.mode(),
            file: self.file.clone(),
            card_count: self.deck.as_ref().map_or(0, Deck::len),
            current_index: self.current_index,
            is_flipped: self.is_flipped,
            is_loading: self.is_loading,
            error_message: self.error_message.clone(),
            transition_pending: self.pending_move.is_some(),
        }
    }

    /// Remembers the document to generate from. Only possible before a deck is loaded.
    pub fn select_file(&mut self, path: impl Into<PathBuf>) {
        if self.mode() != Mode::Empty {
            return;
        }
        self.file = Some(path.into());
        self.error_message = None;
    }

    /// Marks a generation request as outstanding and returns the file to upload.
    /// Returns `None` when there is nothing to upload or a request is already running.
    pub fn begin_generation(&mut self) -> Option<PathBuf> {
        if self.mode() != Mode::Empty {
            return None;
        }
        let file = self.file.clone()?;
        self.is_loading = true;
        self.error_message = None;
        Some(file)
    }

    /// Applies the outcome of the request started by `begin_generation`.
    /// Results that arrive after the request was superseded are dropped.
    pub fn finish_generation(&mut self, result: Result<Deck, GenerateError>) {
        if !self.is_loading {
            return;
        }
        self.is_loading = false;
        match result {
            Ok(deck) => self.load_deck(deck),
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    pub fn report_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    /// Replaces the deck wholesale and starts again from the first question.
    pub fn load_deck(&mut self, deck: Deck) {
        self.deck = Some(deck);
        self.current_index = 0;
        self.is_flipped = false;
        self.is_loading = false;
        self.error_message = None;
        self.pending_move = None;
        self.epoch += 1;
    }

    pub fn flip(&mut self) {
        if self.mode() != Mode::Browsing || self.pending_move.is_some() {
            return;
        }
        self.is_flipped = !self.is_flipped;
    }

    pub fn next(&mut self) -> Option<PendingMove> {
        if !self.can_next() {
            return None;
        }
        self.begin_move(self.current_index + 1)
    }

    pub fn prev(&mut self) -> Option<PendingMove> {
        if !self.can_prev() {
            return None;
        }
        self.begin_move(self.current_index - 1)
    }

    fn begin_move(&mut self, target: usize) -> Option<PendingMove> {
        if self.mode() != Mode::Browsing || self.pending_move.is_some() {
            return None;
        }
        self.is_flipped = false;
        let pending = PendingMove {
            target,
            epoch: self.epoch,
        };
        self.pending_move = Some(pending);
        Some(pending)
    }

    /// Finishes a move begun by `next`/`prev`. Returns false for a stale token.
    pub fn complete_move(&mut self, pending: PendingMove) -> bool {
        if self.pending_move != Some(pending) {
            return false;
        }
        self.pending_move = None;

        let in_range = self
            .deck
            .as_ref()
            .is_some_and(|deck| pending.target <= deck.last_index());
        if !in_range {
            return false;
        }
        self.current_index = pending.target;
        self.is_flipped = false;
        true
    }

    /// Clears the deck if `confirmation` agrees. Returns whether anything was cleared.
    pub fn reset(&mut self, mut confirmation: impl ResetConfirmation) -> bool {
        if self.mode() != Mode::Browsing {
            return false;
        }
        if !confirmation.confirm(RESET_PROMPT) {
            return false;
        }
        self.clear();
        true
    }

    /// Starts an asynchronous reset; answer it later with `resolve_reset`.
    pub fn request_reset(&self) -> Option<ResetRequest> {
        if self.mode() != Mode::Browsing {
            return None;
        }
        Some(ResetRequest { epoch: self.epoch })
    }

    /// Applies the answer to a reset question. A question asked about a deck
    /// that has since been replaced no longer applies.
    pub fn resolve_reset(&mut self, request: ResetRequest, confirmed: bool) -> bool {
        if !confirmed || request.epoch != self.epoch || self.mode() != Mode::Browsing {
            return false;
        }
        self.clear();
        true
    }

    fn clear(&mut self) {
        self.deck = None;
        self.file = None;
        self.current_index = 0;
        self.is_flipped = false;
        self.error_message = None;
        self.pending_move = None;
        self.epoch += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck_of(n: usize) -> Deck {
        let cards = (0..n)
            .map(|i| Flashcard::new(format!("Q{i}"), format!("A{i}")))
            .collect();
        Deck::new("notes", cards).unwrap()
    }

    fn browsing(n: usize) -> DeckSession {
        let mut session = DeckSession::new();
        session.load_deck(deck_of(n));
        session
    }

    fn step_next(session: &mut DeckSession) {
        if let Some(pending) = session.next() {
            session.complete_move(pending);
        }
    }

    fn step_prev(session: &mut DeckSession) {
        if let Some(pending) = session.prev() {
            session.complete_move(pending);
        }
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = DeckSession::new();
        assert_eq!(session.mode(), Mode::Empty);
        assert!(session.current_card().is_none());
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn test_load_deck_starts_on_first_question() {
        for n in 1..6 {
            let mut session = browsing(3);
            step_next(&mut session);
            session.flip();

            session.load_deck(deck_of(n));
            assert_eq!(session.mode(), Mode::Browsing);
            assert_eq!(session.current_index(), 0);
            assert!(!session.is_flipped());
            assert_eq!(session.face(), CardFace::Front);
        }
    }

    #[test]
    fn test_index_stays_in_range() {
        for n in 1..6 {
            let mut session = browsing(n);
            // wander past both ends
            for _ in 0..n + 2 {
                step_next(&mut session);
                assert!(session.current_index() < n);
            }
            assert_eq!(session.current_index(), n - 1);
            for _ in 0..n + 2 {
                step_prev(&mut session);
                assert!(session.current_index() < n);
            }
            assert_eq!(session.current_index(), 0);
        }
    }

    #[test]
    fn test_next_at_last_card_is_noop() {
        let mut session = browsing(2);
        step_next(&mut session);
        session.flip();
        let before = session.view_state();

        assert!(session.next().is_none());
        assert_eq!(session.view_state(), before);
    }

    #[test]
    fn test_prev_at_first_card_is_noop() {
        let mut session = browsing(2);
        session.flip();
        let before = session.view_state();

        assert!(session.prev().is_none());
        assert_eq!(session.view_state(), before);
    }

    #[test]
    fn test_double_flip_restores() {
        let mut session = browsing(1);
        session.flip();
        assert!(session.is_flipped());
        session.flip();
        assert!(!session.is_flipped());
    }

    #[test]
    fn test_flip_outside_browsing_is_noop() {
        let mut session = DeckSession::new();
        session.flip();
        assert!(!session.is_flipped());
    }

    #[test]
    fn test_next_unflips_before_moving() {
        let mut session = DeckSession::new();
        session.load_deck(
            Deck::new(
                "notes",
                vec![Flashcard::new("A", "1"), Flashcard::new("B", "2")],
            )
            .unwrap(),
        );
        session.flip();

        let pending = session.next().unwrap();
        assert!(!session.is_flipped());
        assert_eq!(session.current_index(), 0);
        assert!(session.view_state().transition_pending);

        assert!(session.complete_move(pending));
        assert_eq!(session.current_index(), 1);
        assert!(!session.is_flipped());
        assert_eq!(session.current_card().unwrap().question, "B");
    }

    #[test]
    fn test_prev_unflips_before_moving() {
        let mut session = browsing(3);
        step_next(&mut session);
        session.flip();

        let pending = session.prev().unwrap();
        assert!(!session.is_flipped());
        assert_eq!(session.current_index(), 1);
        session.complete_move(pending);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_moves_do_not_stack_while_pending() {
        let mut session = browsing(2);
        let first = session.next().unwrap();
        assert!(session.next().is_none());
        assert!(session.prev().is_none());

        session.flip();
        assert!(!session.is_flipped());

        session.complete_move(first);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn test_stale_move_is_ignored_after_reload() {
        let mut session = browsing(3);
        let pending = session.next().unwrap();
        session.load_deck(deck_of(3));

        assert!(!session.complete_move(pending));
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_progress_counts_current_card() {
        let mut session = browsing(4);
        assert_eq!(session.progress(), 0.25);
        step_next(&mut session);
        assert_eq!(session.progress(), 0.5);
    }

    #[test]
    fn test_generation_lifecycle_success() {
        let mut session = DeckSession::new();
        assert!(session.begin_generation().is_none());

        session.select_file("notes.pdf");
        assert_eq!(session.begin_generation(), Some(PathBuf::from("notes.pdf")));
        assert_eq!(session.mode(), Mode::Loading);
        assert!(session.begin_generation().is_none());

        session.finish_generation(Ok(deck_of(2)));
        assert_eq!(session.mode(), Mode::Browsing);
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_empty_generation_keeps_deck_unloaded() {
        let mut session = DeckSession::new();
        session.select_file("notes.pdf");
        session.begin_generation();

        session.finish_generation(Err(GenerateError::EmptyGenerationResult));
        assert_eq!(session.mode(), Mode::Empty);
        assert!(session.deck().is_none());
        assert_eq!(
            session.error_message(),
            Some("No flashcards could be generated from this content.")
        );
    }

    #[test]
    fn test_error_cleared_on_new_file_and_request_start() {
        let mut session = DeckSession::new();
        session.select_file("a.pdf");
        session.begin_generation();
        session.finish_generation(Err(GenerateError::network("refused")));
        assert_eq!(
            session.error_message(),
            Some("Error connecting to server. Is the backend running?")
        );

        session.select_file("b.pdf");
        assert!(session.error_message().is_none());

        session.report_error("stale");
        session.begin_generation();
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_late_result_after_load_is_dropped() {
        let mut session = DeckSession::new();
        session.select_file("a.pdf");
        session.begin_generation();
        session.load_deck(deck_of(1));

        session.finish_generation(Err(GenerateError::EmptyGenerationResult));
        assert_eq!(session.mode(), Mode::Browsing);
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_reset_confirmed_clears_everything() {
        let mut session = DeckSession::new();
        session.select_file("notes.pdf");
        session.begin_generation();
        session.finish_generation(Ok(deck_of(3)));
        step_next(&mut session);
        session.flip();

        let mut asked = None;
        let cleared = session.reset(|prompt: &str| {
            asked = Some(prompt.to_string());
            true
        });

        assert!(cleared);
        assert_eq!(asked.as_deref(), Some(RESET_PROMPT));
        assert_eq!(session.mode(), Mode::Empty);
        assert!(session.file().is_none());
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_flipped());
    }

    #[test]
    fn test_reset_declined_changes_nothing() {
        let mut session = browsing(3);
        step_next(&mut session);
        session.flip();
        let before = session.view_state();

        assert!(!session.reset(false));
        assert_eq!(session.view_state(), before);
    }

    #[test]
    fn test_async_reset_invalidated_by_reload() {
        let mut session = browsing(2);
        let request = session.request_reset().unwrap();

        session.load_deck(deck_of(5));
        assert!(!session.resolve_reset(request, true));
        assert_eq!(session.deck().unwrap().len(), 5);

        let request = session.request_reset().unwrap();
        assert!(session.resolve_reset(request, true));
        assert_eq!(session.mode(), Mode::Empty);
    }

    #[test]
    fn test_view_state_serializes() {
        let session = browsing(2);
        let json = serde_json::to_value(session.view_state()).unwrap();

        assert_eq!(json["mode"], "Browsing");
        assert_eq!(json["card_count"], 2);
        assert_eq!(json["current_index"], 0);
        assert_eq!(json["is_flipped"], false);
    }
}
