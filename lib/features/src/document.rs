//! Plain document data produced upstream: text, mention chains, candidates.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A candidate entity proposed for a mention chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Mentions believed to co-refer, with the candidates they share
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentionChain {
    /// Surface strings of the mentions; not used by the context features
    #[serde(default)]
    pub mentions: Vec<String>,
    pub candidates: Vec<Candidate>,
}

impl MentionChain {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mentions: Vec::new(),
            candidates: candidates.into_iter().map(Candidate::new).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub chains: Vec<MentionChain>,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>, chains: Vec<MentionChain>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            chains,
        }
    }

    /// Whitespace tokens of the document text
    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.text.split_whitespace()
    }

    /// Distinct candidate ids over all chains, in first-seen order
    pub fn candidate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.chains
            .iter()
            .flat_map(|chain| chain.candidates.iter())
            .map(|c| c.id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_ids_are_distinct() {
        let doc = Document::new(
            "d1",
            "paris capital france",
            vec![
                MentionChain::new(["Paris", "Texas"]),
                MentionChain::new(["Paris"]),
                MentionChain::new(["Paris_Hilton"]),
            ],
        );
        assert_eq!(doc.candidate_ids(), vec!["Paris", "Texas", "Paris_Hilton"]);
    }

    #[test]
    fn test_deserialize_without_mentions() {
        let doc: Document = serde_json::from_str(
            r#"{"id": "d1", "text": "a b", "chains": [{"candidates": [{"id": "X"}]}]}"#,
        )
        .unwrap();
        assert_eq!(doc.chains[0].candidates[0].id, "X");
        assert!(doc.chains[0].mentions.is_empty());
        assert_eq!(doc.tokens().count(), 2);
    }
}
