//! Generic types used throughout the core codebase.

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

mod roster;

pub use roster::{Roster, RosterError, RosterSnapshot, MAX_NAME_LENGTH};

/// A unique identifier for a player. Callers usually supply their own (for
/// example a timestamp or a backend row id), otherwise one is generated.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    const GENERATED_LENGTH: usize = 12;

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Draw a fresh alphanumeric id from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let id: String = std::iter::repeat_with(|| rng.sample(Alphanumeric))
            .take(Self::GENERATED_LENGTH)
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Information tracked about a player across rounds.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
}

impl Player {
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// URI of the player's picture, if one was uploaded.
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// The fields a caller provides when adding a player. Anything left unset
/// takes its default: a generated id, a score of zero, and no avatar or
/// description.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct PlayerInput {
    pub id: Option<PlayerId>,
    pub name: String,
    pub score: Option<i64>,
    pub avatar: Option<String>,
    pub description: Option<String>,
}

impl PlayerInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<PlayerId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self
    }

    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build the `Player`, drawing an id from `rng` if none was given. Blank
    /// avatar and description strings are treated as absent.
    pub(crate) fn into_player<R: Rng + ?Sized>(self, rng: &mut R) -> Player {
        fn non_blank(s: Option<String>) -> Option<String> {
            s.filter(|s| !s.trim().is_empty())
        }

        Player {
            id: self.id.unwrap_or_else(|| PlayerId::generate(rng)),
            name: self.name,
            score: self.score.unwrap_or(0),
            avatar: non_blank(self.avatar),
            description: non_blank(self.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{Player, PlayerId, PlayerInput};

    #[test]
    pub fn test_generated_ids_are_alphanumeric() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = PlayerId::generate(&mut rng);
        let b = PlayerId::generate(&mut rng);

        assert_eq!(a.as_str().len(), 12);
        assert!(a.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    pub fn test_input_defaults() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = PlayerInput::new("Lan")
            .with_id("p1")
            .with_avatar("  ")
            .into_player(&mut rng);

        assert_eq!(p.id(), &PlayerId::from("p1"));
        assert_eq!(p.name(), "Lan");
        assert_eq!(p.score(), 0);
        assert_eq!(p.avatar(), None);
        assert_eq!(p.description(), None);
    }

    #[test]
    pub fn test_player_deserializes_with_missing_optionals() {
        let p: Player = serde_json::from_str(r#"{"id":"a","name":"An"}"#).unwrap();
        assert_eq!(p.id().as_str(), "a");
        assert_eq!(p.score(), 0);
        assert_eq!(p.avatar(), None);

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json, serde_json::json!({"id": "a", "name": "An", "score": 0}));
    }
}
