//! Section content shapes
//!
//! Everything a worksheet section needs to render is normalized into one of
//! the types here, exactly once, at the boundary where content arrives (a
//! JSON file or the content source). The rest of the crate never inspects
//! raw JSON.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::Path;

use crate::error::{Error, Result};

/// The three worksheet sections, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Preparation,
    Middle,
    Discussion,
}

impl SectionKind {
    /// Fixed section order of the final document
    pub const ORDER: [SectionKind; 3] = [
        SectionKind::Preparation,
        SectionKind::Middle,
        SectionKind::Discussion,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::Preparation => "preparation",
            SectionKind::Middle => "middle",
            SectionKind::Discussion => "discussion",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered item → correct-answer pairs for the matching task
///
/// Insertion order is load-bearing: it is the fixed 1..N numbering of the
/// item column. Construction rejects duplicate items, duplicate answer
/// values (they would make the answer key ambiguous) and more than 26 pairs
/// (the key labels positions with the letters a-z).
#[derive(Debug, Clone, PartialEq)]
pub struct MatchPairs(Vec<(String, String)>);

impl MatchPairs {
    pub fn new(pairs: Vec<(String, String)>) -> Result<Self> {
        if pairs.len() > 26 {
            return Err(Error::TooManyItems(pairs.len()));
        }
        for (i, (item, answer)) in pairs.iter().enumerate() {
            if pairs[..i].iter().any(|(other, _)| other == item) {
                return Err(Error::General(format!("duplicate item name: {item:?}")));
            }
            if pairs[..i].iter().any(|(_, other)| other == answer) {
                return Err(Error::DuplicateAnswer(answer.clone()));
            }
        }
        Ok(MatchPairs(pairs))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Item names in insertion order
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(item, _)| item.as_str())
    }

    /// Answer values in insertion order
    pub fn answers(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, answer)| answer.as_str())
    }

    /// The correct answer for an item, if present
    pub fn get(&self, item: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(other, _)| other == item)
            .map(|(_, answer)| answer.as_str())
    }
}

impl<'de> Deserialize<'de> for MatchPairs {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // serde_json's Map preserves key order (preserve_order feature)
        let map = serde_json::Map::deserialize(deserializer)?;
        let mut pairs = Vec::with_capacity(map.len());
        for (item, value) in map {
            let answer = value
                .as_str()
                .ok_or_else(|| de::Error::custom(format!("answer for {item:?} is not a string")))?;
            pairs.push((item, answer.to_string()));
        }
        MatchPairs::new(pairs).map_err(de::Error::custom)
    }
}

impl Serialize for MatchPairs {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (item, answer) in &self.0 {
            map.serialize_entry(item, answer)?;
        }
        map.end()
    }
}

/// Content for the preparation (matching) section
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct PreparationContent {
    /// Column headers, e.g. ["Cities", "Countries"]
    pub labels: [String; 2],
    pub correct_pairs: MatchPairs,
}

/// Content for the middle (extract + true/false) section
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct ExtractContent {
    pub topic: String,
    pub extract: String,
    pub questions: Vec<String>,
    pub answers: Vec<bool>,
}

impl ExtractContent {
    /// Questions and answers are positionally paired; reject anything else
    pub fn validate(&self) -> Result<()> {
        if self.questions.is_empty() {
            return Err(Error::ContentShape {
                section: "middle",
                reason: "no questions".to_string(),
            });
        }
        if self.questions.len() != self.answers.len() {
            return Err(Error::ContentShape {
                section: "middle",
                reason: format!(
                    "{} questions but {} answers",
                    self.questions.len(),
                    self.answers.len()
                ),
            });
        }
        Ok(())
    }
}

/// Content for the discussion section
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct DiscussionContent {
    pub question: String,
}

/// Pre-supplied content for any subset of the worksheet sections
///
/// Sections present here are used as-is; absent sections are resolved
/// through the content source at build time.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
pub struct WorksheetContent {
    #[serde(default)]
    pub preparation: Option<PreparationContent>,
    #[serde(default)]
    pub middle: Option<ExtractContent>,
    #[serde(default)]
    pub discussion: Option<DiscussionContent>,
}

impl WorksheetContent {
    /// Load pre-supplied section content from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let file = std::fs::File::open(path)?;
        let content: WorksheetContent = serde_json::from_reader(file).map_err(|e| {
            Error::ContentShape {
                section: "worksheet",
                reason: e.to_string(),
            }
        })?;
        if let Some(middle) = &content.middle {
            middle.validate()?;
        }
        Ok(content)
    }
}
