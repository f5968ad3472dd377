use crate::core::LexicalRelations;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};

/// Word relations from a fixed table, typically taken from the `[lexicon.entries]` config.
///
/// Lookups are case-insensitive and always include the word itself.
#[derive(Debug, Clone, Default)]
pub struct StaticLexicon {
    entries: HashMap<String, Vec<String>>,
}

impl StaticLexicon {
    pub fn new(entries: HashMap<String, Vec<String>>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(word, related)| (word.to_lowercase(), related))
            .collect();
        Self { entries }
    }
}

#[async_trait]
impl LexicalRelations for StaticLexicon {
    async fn synonyms(&self, word: &str) -> Result<BTreeSet<String>> {
        let mut synonyms: BTreeSet<String> = self
            .entries
            .get(&word.to_lowercase())
            .into_iter()
            .flatten()
            .map(|related| related.trim().to_string())
            .filter(|related| !related.is_empty())
            .collect();
        synonyms.insert(word.to_string());
        Ok(synonyms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_word_includes_itself() {
        let mut entries = HashMap::new();
        entries.insert(
            "Cat".to_string(),
            vec!["kitty".to_string(), " puss ".to_string(), "kitty".to_string()],
        );
        let lexicon = StaticLexicon::new(entries);

        let synonyms = lexicon.synonyms("cat").await.unwrap();
        let synonyms: Vec<&str> = synonyms.iter().map(String::as_str).collect();
        assert_eq!(synonyms, vec!["cat", "kitty", "puss"]);
    }

    #[tokio::test]
    async fn test_unknown_word_is_its_own_synonym() {
        let lexicon = StaticLexicon::default();
        let synonyms = lexicon.synonyms("bagels").await.unwrap();
        assert_eq!(synonyms.len(), 1);
        assert!(synonyms.contains("bagels"));
    }
}
