//! JSON import/export module for generated decks.
//! Lets a deck be saved after generation and studied again later without
//! another round trip to the generation service.

use crate::models::Deck;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not access file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid deck file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exports a deck to a JSON file at the specified path.
pub fn export_json_to_path(deck: &Deck, path: &Path) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, deck)?;
    writer.flush()?;

    info!("Deck '{}' exported to {}", deck.name(), path.display());
    Ok(())
}

/// Imports a deck from a JSON file.
/// Fails on a missing file, malformed JSON, or a deck without cards.
pub fn import_json(path: &Path) -> Result<Deck, ExportError> {
    let reader = BufReader::new(File::open(path)?);
    let deck: Deck = serde_json::from_reader(reader)?;

    info!(
        "Deck '{}' imported from {} ({} cards)",
        deck.name(),
        path.display(),
        deck.len()
    );
    Ok(deck)
}

/// Suggested file name for a deck exported at `time`, e.g. `biology-2024-05-01.json`
pub fn default_export_name(deck: &Deck, time: DateTime<Local>) -> String {
    format!("{}-{}.json", deck.name(), time.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Flashcard;
    use chrono::TimeZone;
    use std::fs;

    fn create_test_deck() -> Deck {
        Deck::new(
            "Test Deck",
            vec![
                Flashcard::new("What does TCP stand for?", "Transmission Control Protocol"),
                Flashcard::new("Default HTTP port?", "80"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_export_json_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");

        export_json_to_path(&create_test_deck(), &path).unwrap();

        assert!(fs::metadata(&path).is_ok(), "File should exist");
    }

    #[test]
    fn test_import_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import.json");
        let json_content = r#"{
  "name": "Import Test Deck",
  "flashcards": [
    {
      "question": "test question",
      "answer": "test answer"
    }
  ]
}"#;
        fs::write(&path, json_content).unwrap();

        let deck = import_json(&path).unwrap();
        assert_eq!(deck.name(), "Import Test Deck");
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.flashcards()[0].question, "test question");
        assert_eq!(deck.flashcards()[0].answer, "test answer");
    }

    #[test]
    fn test_export_and_import_keep_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.json");
        let original = create_test_deck();

        export_json_to_path(&original, &path).unwrap();
        let imported = import_json(&path).unwrap();

        assert_eq!(original, imported);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_json(Path::new("nonexistent_file_xyz123.json"));
        assert!(matches!(result, Err(ExportError::Io(_))));
    }

    #[test]
    fn test_import_empty_deck_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, r#"{"name": "empty", "flashcards": []}"#).unwrap();

        let result = import_json(&path);
        assert!(matches!(result, Err(ExportError::Json(_))));
    }

    #[test]
    fn test_default_export_name() {
        let time = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(
            default_export_name(&create_test_deck(), time),
            "Test Deck-2024-05-01.json"
        );
    }
}
