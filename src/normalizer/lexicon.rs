// src/normalizer/lexicon.rs

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{Result, ScrapeError};

/// Decides whether a token is a real word. Swap in a domain vocabulary by
/// implementing this instead of touching the normalizer.
pub trait Lexicon {
    fn is_known_word(&self, token: &str) -> bool;
}

/// A plain word list, one word per line (the `/usr/share/dict/words` format).
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ScrapeError::Lexicon {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_words(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        );
        if list.is_empty() {
            warn!("Lexicon {} is empty; every token will be filtered out", path.display());
        } else {
            info!("Loaded {} words from {}", list.len(), path.display());
        }
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Lexicon for WordList {
    /// Exact match, or a capitalized token whose lower-case form is listed
    /// ("The" at the start of a sentence).
    fn is_known_word(&self, token: &str) -> bool {
        self.words.contains(token) || self.words.contains(&token.to_lowercase())
    }
}

impl<F> Lexicon for F
where
    F: Fn(&str) -> bool,
{
    fn is_known_word(&self, token: &str) -> bool {
        self(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_word_list_lookup() {
        let list = WordList::from_words(["economy", "Paris"]);
        assert!(list.is_known_word("economy"));
        assert!(list.is_known_word("Economy"));
        assert!(list.is_known_word("Paris"));
        assert!(!list.is_known_word("paris"));
        assert!(!list.is_known_word("xyzzy"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "alpha\n\n  beta  \ngamma").unwrap();

        let list = WordList::load(file.path()).unwrap();

        assert_eq!(list.len(), 3);
        assert!(!list.is_empty());
        assert!(list.is_known_word("beta"));
    }

    #[test]
    fn test_empty_file_loads_an_empty_list() {
        let file = NamedTempFile::new().unwrap();
        let list = WordList::load(file.path()).unwrap();
        assert!(list.is_empty());
        assert!(!list.is_known_word("anything"));
    }

    #[test]
    fn test_missing_file_is_a_lexicon_error() {
        let err = WordList::load(Path::new("/definitely/not/here/words")).unwrap_err();
        assert!(matches!(err, ScrapeError::Lexicon { .. }));
    }

    #[test]
    fn test_closures_are_lexicons() {
        let only_short = |token: &str| token.len() < 4;
        assert!(only_short.is_known_word("cat"));
        assert!(!only_short.is_known_word("horse"));
    }
}
