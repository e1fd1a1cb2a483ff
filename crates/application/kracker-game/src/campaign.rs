//! Campaign document
//!
//! The creator edits stages and mission copy in the document store; this is
//! the typed shape of an exported copy. Every optional field has a defined
//! default so readers never chain fallbacks.

use crate::puzzle::Puzzle;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Copy shown around a stage's puzzle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionContent {
    pub briefing: String,
    pub clues: Vec<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub puzzle: Puzzle,
    #[serde(default)]
    pub content: MissionContent,
    /// Literal accepted once as a manual override after a wrong answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_answer: Option<String>,
}

/// Ordered stages of one campaign
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub stages: Vec<Stage>,
}

impl Campaign {
    pub fn new(title: impl Into<String>, stages: Vec<Stage>) -> Result<Self> {
        let campaign = Self {
            title: title.into(),
            stages,
        };
        campaign.validate()?;
        Ok(campaign)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let campaign: Campaign = serde_json::from_str(raw)?;
        campaign.validate()?;
        Ok(campaign)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let campaign = Self::from_json(&raw)?;
        tracing::debug!(
            path = %path.display(),
            stages = campaign.stages.len(),
            "loaded campaign"
        );
        Ok(campaign)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn stage(&self, id: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == id)
    }

    /// Zero-based position of a stage in the sequence
    pub fn position(&self, id: &str) -> Option<usize> {
        self.stages.iter().position(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for stage in &self.stages {
            if !seen.insert(stage.id.as_str()) {
                return Err(Error::DuplicateStage(stage.id.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DOC: &str = r#"{
        "title": "Operation Nightfall",
        "stages": [
            {
                "id": "s1",
                "title": "Intercept",
                "puzzle": {"kind": "caesar", "ciphertext": "KHOOR", "shift": 3},
                "content": {"briefing": "Decode the transmission", "clues": ["three steps back"]}
            },
            {
                "id": "s2",
                "puzzle": {"kind": "code", "code": "1947"},
                "override_answer": "ROSWELL"
            },
            {
                "id": "s3",
                "puzzle": {"kind": "riddle", "keywords": ["echo"]}
            }
        ]
    }"#;

    #[test]
    fn test_parse_with_defaults() {
        let campaign = Campaign::from_json(DOC).unwrap();
        assert_eq!(campaign.len(), 3);
        assert_eq!(campaign.stages[0].content.clues, vec!["three steps back"]);
        assert_eq!(campaign.stages[0].content.notes, None);

        let s2 = campaign.stage("s2").unwrap();
        assert_eq!(s2.title, "");
        assert_eq!(s2.content, MissionContent::default());
        assert_eq!(s2.override_answer.as_deref(), Some("ROSWELL"));
    }

    #[test]
    fn test_position() {
        let campaign = Campaign::from_json(DOC).unwrap();
        assert_eq!(campaign.position("s1"), Some(0));
        assert_eq!(campaign.position("s3"), Some(2));
        assert_eq!(campaign.position("s9"), None);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let stage = Stage {
            id: "dup".into(),
            title: String::new(),
            puzzle: Puzzle::Code { code: "1".into() },
            content: MissionContent::default(),
            override_answer: None,
        };
        let err = Campaign::new("x", vec![stage.clone(), stage]).unwrap_err();
        assert!(matches!(err, Error::DuplicateStage(id) if id == "dup"));
    }

    #[test]
    fn test_empty_document() {
        let campaign = Campaign::from_json("{}").unwrap();
        assert!(campaign.is_empty());
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            Campaign::from_json(r#"{"stages": [{"id": "a"}]}"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("campaign.json");
        let campaign = Campaign::from_json(DOC).unwrap();

        std::fs::write(&path, campaign.to_json().unwrap()).unwrap();
        assert_eq!(Campaign::load(&path).unwrap(), campaign);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Campaign::load(dir.path().join("missing.json")),
            Err(Error::Io(_))
        ));
    }
}
