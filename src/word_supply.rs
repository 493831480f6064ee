use include_dir::{include_dir, Dir};
use rand::{rngs::ThreadRng, seq::SliceRandom, Rng};
use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

pub const PLAIN_CORPUS: &str = "english";
pub const SYMBOL_CORPUS: &str = "symbols";

/// A named list of target words. Tokens are non-empty and whitespace-free.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Corpus {
    pub name: String,
    #[serde(default)]
    pub size: u32,
    pub words: Vec<String>,
}

impl Corpus {
    pub fn new(name: impl Into<String>, words: Vec<String>) -> EngineResult<Self> {
        let corpus = Self {
            name: name.into(),
            size: words.len() as u32,
            words,
        };
        corpus.validate()?;
        Ok(corpus)
    }

    /// Load one of the corpora compiled into the binary from `src/lang`.
    pub fn embedded(name: &str) -> EngineResult<Self> {
        let file_name = format!("{name}.json");
        let file = LANG_DIR
            .get_file(&file_name)
            .ok_or_else(|| EngineError::CorpusNotFound(file_name.clone()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| EngineError::InvalidCorpus(format!("{file_name} is not utf-8")))?;

        let mut corpus: Corpus = serde_json::from_str(contents)?;
        corpus.size = corpus.words.len() as u32;
        corpus.validate()?;
        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn validate(&self) -> EngineResult<()> {
        if self.words.is_empty() {
            return Err(EngineError::InvalidCorpus(format!(
                "corpus '{}' has no words",
                self.name
            )));
        }
        if let Some(bad) = self
            .words
            .iter()
            .find(|w| w.is_empty() || w.chars().any(char::is_whitespace))
        {
            return Err(EngineError::InvalidCorpus(format!(
                "corpus '{}' contains an empty or whitespace-bearing token {bad:?}",
                self.name
            )));
        }
        Ok(())
    }
}

/// Source of target words for a test run.
pub trait WordSupply {
    /// Up to `count` words in random order, never repeating a corpus entry
    /// within one call.
    fn generate(&mut self, count: usize, include_symbols: bool) -> Vec<String>;

    /// Largest `count` a single `generate` call can honour.
    fn capacity(&self, include_symbols: bool) -> usize;
}

/// Shuffles a copy of the plain or extended corpus and takes a prefix.
pub struct ShuffledSupply<R: Rng = ThreadRng> {
    plain: Vec<String>,
    extended: Vec<String>,
    rng: R,
}

impl ShuffledSupply<ThreadRng> {
    /// Supply backed by the embedded corpora and the thread-local rng.
    pub fn embedded() -> EngineResult<Self> {
        let plain = Corpus::embedded(PLAIN_CORPUS)?;
        let symbols = Corpus::embedded(SYMBOL_CORPUS)?;
        Ok(Self::with_rng(plain, symbols, rand::thread_rng()))
    }
}

impl<R: Rng> ShuffledSupply<R> {
    /// The extended corpus is the plain corpus followed by the symbol tokens.
    pub fn with_rng(plain: Corpus, symbols: Corpus, rng: R) -> Self {
        let mut extended = plain.words.clone();
        extended.extend(symbols.words);
        Self {
            plain: plain.words,
            extended,
            rng,
        }
    }

    fn source(&self, include_symbols: bool) -> &[String] {
        if include_symbols {
            &self.extended
        } else {
            &self.plain
        }
    }
}

impl<R: Rng> WordSupply for ShuffledSupply<R> {
    fn generate(&mut self, count: usize, include_symbols: bool) -> Vec<String> {
        let mut words = self.source(include_symbols).to_vec();
        words.shuffle(&mut self.rng);
        words.truncate(count);
        words
    }

    fn capacity(&self, include_symbols: bool) -> usize {
        self.source(include_symbols).len()
    }
}

/// Draw `count` words, splitting the request into calls no larger than the
/// supply's capacity.
pub fn fill(supply: &mut dyn WordSupply, count: usize, include_symbols: bool) -> Vec<String> {
    let capacity = supply.capacity(include_symbols);
    let mut words = Vec::with_capacity(count);
    if capacity == 0 {
        return words;
    }

    while words.len() < count {
        let chunk = (count - words.len()).min(capacity);
        let batch = supply.generate(chunk, include_symbols);
        if batch.is_empty() {
            break;
        }
        words.extend(batch);
    }
    debug!(
        requested = count,
        produced = words.len(),
        include_symbols,
        "filled words"
    );
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn seeded_supply() -> ShuffledSupply<StdRng> {
        let plain = Corpus::new("plain", words(&["alpha", "beta", "gamma", "delta"])).unwrap();
        let symbols = Corpus::new("symbols", words(&["x=1;", "$5"])).unwrap();
        ShuffledSupply::with_rng(plain, symbols, StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_embedded_corpora_load() {
        let plain = Corpus::embedded(PLAIN_CORPUS).unwrap();
        let symbols = Corpus::embedded(SYMBOL_CORPUS).unwrap();

        assert_eq!(plain.name, "english");
        assert_eq!(plain.len(), 100);
        assert_eq!(plain.size as usize, plain.len());
        assert!(!symbols.is_empty());
    }

    #[test]
    fn test_missing_corpus() {
        let result = Corpus::embedded("klingon");
        assert!(matches!(result, Err(EngineError::CorpusNotFound(_))));
    }

    #[test]
    fn test_corpus_rejects_whitespace_tokens() {
        let result = Corpus::new("bad", words(&["fine", "not fine"]));
        assert!(matches!(result, Err(EngineError::InvalidCorpus(_))));

        let result = Corpus::new("empty", vec![]);
        assert!(matches!(result, Err(EngineError::InvalidCorpus(_))));
    }

    #[test]
    fn test_corpus_deserialization() {
        let json_data = r#"{ "name": "test", "size": 3, "words": ["hello", "world", "test"] }"#;
        let corpus: Corpus = serde_json::from_str(json_data).unwrap();

        assert_eq!(corpus.name, "test");
        assert_eq!(corpus.words.len(), 3);
        assert!(corpus.words.contains(&"world".to_string()));
    }

    #[test]
    fn test_generate_is_non_repeating_and_truncated() {
        let mut supply = seeded_supply();

        let batch = supply.generate(3, false);
        assert_eq!(batch.len(), 3);
        let unique: HashSet<_> = batch.iter().collect();
        assert_eq!(unique.len(), 3);
        for w in &batch {
            assert!(["alpha", "beta", "gamma", "delta"].contains(&w.as_str()));
        }
    }

    #[test]
    fn test_generate_does_not_mutate_corpus() {
        let mut supply = seeded_supply();
        let before = supply.plain.clone();

        for _ in 0..5 {
            supply.generate(4, false);
        }

        assert_eq!(supply.plain, before);
    }

    #[test]
    fn test_extended_corpus_contains_symbols() {
        let mut supply = seeded_supply();
        assert_eq!(supply.capacity(false), 4);
        assert_eq!(supply.capacity(true), 6);

        let all = supply.generate(6, true);
        assert!(all.contains(&"x=1;".to_string()));
        assert!(all.contains(&"$5".to_string()));
    }

    #[test]
    fn test_fill_splits_large_requests() {
        let mut supply = seeded_supply();

        let filled = fill(&mut supply, 10, false);

        assert_eq!(filled.len(), 10);
        // every chunk of four is one full shuffle of the corpus
        let first: HashSet<_> = filled[..4].iter().collect();
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_embedded_supply_generates() {
        let mut supply = ShuffledSupply::embedded().unwrap();
        let batch = supply.generate(25, true);
        assert_eq!(batch.len(), 25);
    }
}
