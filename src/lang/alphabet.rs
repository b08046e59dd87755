//! Alphabet handling: the character set that defines what a word is.

use crate::error::{Result, TypofixError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Lowercase `c` as a 1:1 mapping.
///
/// Multi-char lowercase expansions (e.g. 'İ' → "i̇") would break the token
/// alignment between a text and its lowered form, so only the first char of
/// the mapping is kept.
pub fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Ordered, deduplicated set of letters a word may consist of.
///
/// Membership is case-insensitive: the stored letters are lowercased and
/// queries are folded before lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alphabet {
    letters: Vec<char>,
    set: HashSet<char>,
}

impl Alphabet {
    /// Build an alphabet from a string of letters.
    ///
    /// Whitespace is skipped, duplicates are dropped, first-seen order is
    /// preserved.
    pub fn from_letters(letters: &str) -> Self {
        let mut ordered = Vec::new();
        let mut set = HashSet::new();
        for c in letters.chars() {
            if c.is_whitespace() {
                continue;
            }
            let c = fold_char(c);
            if set.insert(c) {
                ordered.push(c);
            }
        }
        Self {
            letters: ordered,
            set,
        }
    }

    /// Load an alphabet from a UTF-8 file containing the letters.
    ///
    /// Returns [`TypofixError::AlphabetEmpty`] if the file holds no
    /// non-whitespace characters.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let alphabet = Self::from_letters(&contents);
        if alphabet.is_empty() {
            return Err(TypofixError::AlphabetEmpty {
                path: path.display().to_string(),
            });
        }
        Ok(alphabet)
    }

    /// Whether `c` is a letter of this alphabet (case-insensitive).
    pub fn contains(&self, c: char) -> bool {
        self.set.contains(&fold_char(c))
    }

    /// The letters in their canonical order.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_letters_preserves_order_and_dedupes() {
        let alphabet = Alphabet::from_letters("abcabc");
        assert_eq!(alphabet.letters(), &['a', 'b', 'c']);
    }

    #[test]
    fn from_letters_skips_whitespace() {
        let alphabet = Alphabet::from_letters("ab c\nd\n");
        assert_eq!(alphabet.letters(), &['a', 'b', 'c', 'd']);
    }

    #[test]
    fn from_letters_folds_to_lowercase() {
        let alphabet = Alphabet::from_letters("ABC");
        assert_eq!(alphabet.letters(), &['a', 'b', 'c']);
        assert!(alphabet.contains('a'));
    }

    #[test]
    fn contains_is_case_insensitive() {
        let alphabet = Alphabet::from_letters("abc");
        assert!(alphabet.contains('a'));
        assert!(alphabet.contains('A'));
        assert!(!alphabet.contains('z'));
        assert!(!alphabet.contains('1'));
    }

    #[test]
    fn load_reads_alphabet_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "abcdefghijklmnopqrstuvwxyz").unwrap();
        file.flush().unwrap();

        let alphabet = Alphabet::load(file.path()).unwrap();
        assert_eq!(alphabet.len(), 26);
        assert!(alphabet.contains('q'));
    }

    #[test]
    fn load_empty_file_returns_error() {
        let file = NamedTempFile::new().unwrap();
        let result = Alphabet::load(file.path());
        assert!(matches!(result, Err(TypofixError::AlphabetEmpty { .. })));
    }

    #[test]
    fn load_missing_file_returns_io_error() {
        let result = Alphabet::load(Path::new("/nonexistent/alphabet.txt"));
        assert!(matches!(result, Err(TypofixError::Io(_))));
    }

    #[test]
    fn fold_char_is_one_to_one() {
        assert_eq!(fold_char('A'), 'a');
        assert_eq!(fold_char('a'), 'a');
        assert_eq!(fold_char('Ж'), 'ж');
        // 'İ' lowercases to two chars; only the first survives
        assert_eq!(fold_char('İ'), 'i');
    }
}
