//! Deck loading: candidate batches from JSON

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;
use crate::error::DeckError;
use crate::types::Candidate;

/// Parse and validate a JSON array of candidates
pub fn parse_deck(json: &str) -> Result<Vec<Candidate>, DeckError> {
    let deck: Vec<Candidate> = serde_json::from_str(json)?;
    validate_deck(&deck)?;
    Ok(deck)
}

/// Read a deck file
pub fn load_deck(path: impl AsRef<Path>) -> Result<Vec<Candidate>, DeckError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| DeckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let deck = parse_deck(&json)?;
    debug!(path = %path.display(), count = deck.len(), "deck loaded");
    Ok(deck)
}

/// Ids must be non-empty and unique
pub fn validate_deck(deck: &[Candidate]) -> Result<(), DeckError> {
    let mut seen = HashSet::with_capacity(deck.len());
    for (i, candidate) in deck.iter().enumerate() {
        if candidate.id.trim().is_empty() {
            return Err(DeckError::EmptyId(i));
        }
        if !seen.insert(candidate.id.as_str()) {
            return Err(DeckError::DuplicateId(candidate.id.clone()));
        }
    }
    Ok(())
}

/// Demo profiles used when no deck is supplied
pub fn sample_deck() -> Vec<Candidate> {
    let mut aisha = Candidate::new("1", "Aisha", 27)
        .with_location("New York")
        .with_compatibility(92);
    aisha.occupation = Some("Software Engineer".into());
    aisha.bio = "I love technology and outdoor activities.".into();
    aisha.interest_tags = vec!["religious:quran".into(), "food:halal_cooking".into(), "tech:coding".into()];

    let mut fatima = Candidate::new("2", "Fatima", 25)
        .with_location("Chicago")
        .with_compatibility(85)
        .liking_you();
    fatima.occupation = Some("Doctor".into());
    fatima.bio = "Passionate about healthcare and helping others.".into();
    fatima.interest_tags = vec!["religious:charity".into(), "health:wellness".into()];

    let mut maryam = Candidate::new("3", "Maryam", 29)
        .with_location("London, UK")
        .with_compatibility(78);
    maryam.occupation = Some("Architect".into());
    maryam.interest_tags = vec!["travel:hiking".into(), "art:calligraphy".into()];

    let mut zainab = Candidate::new("4", "Zainab", 26)
        .with_location("Birmingham, UK")
        .with_compatibility(88)
        .liking_you();
    zainab.occupation = Some("Teacher".into());
    zainab.interest_tags = vec!["learning:languages".into(), "food:baking".into()];

    vec![aisha, fatima, maryam, zainab]
}
