//! Candidate profiles shown in the discovery feed

use serde::{Deserialize, Serialize};

/// A profile eligible for display in the discovery queue.
///
/// The session never edits a candidate; it only moves it between the queue
/// and the rewind history. Identity is the `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique id within a deck
    pub id: String,
    pub name: String,
    pub age: u8,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    /// Compatibility score, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<u8>,
    /// Namespaced tags such as `religious:quran` or `tech:coding`
    #[serde(default)]
    pub interest_tags: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    /// This candidate has already liked the current user
    #[serde(default)]
    pub likes_you: bool,
}

impl Candidate {
    /// Minimal candidate, mostly useful in tests and demos
    pub fn new(id: impl Into<String>, name: impl Into<String>, age: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            location: String::new(),
            bio: String::new(),
            occupation: None,
            compatibility: None,
            interest_tags: Vec::new(),
            photos: Vec::new(),
            likes_you: false,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_compatibility(mut self, score: u8) -> Self {
        self.compatibility = Some(score.min(100));
        self
    }

    pub fn liking_you(mut self) -> Self {
        self.likes_you = true;
        self
    }

    /// One-line card summary: "Aisha, 27 · New York · 92%"
    pub fn summary(&self) -> String {
        let mut out = format!("{}, {}", self.name, self.age);
        if !self.location.is_empty() {
            out.push_str(" · ");
            out.push_str(&self.location);
        }
        if let Some(score) = self.compatibility {
            out.push_str(&format!(" · {}%", score));
        }
        out
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Candidate {}
