//! Vocabulary tables used as word pools.
//!
//! The data is organised as books of lessons, each lesson grouping words by
//! their classical root. A crossword pool is built by flattening the chosen
//! lessons of one book into `WordClue`s, with the definition as the clue.

use crate::{VocabularyError, WordClue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Vocabulary table shipped with the crate
const BUNDLED: &str = include_str!("../data/classical-roots.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyData {
    /// Books keyed by id, e.g. "book-4"
    pub books: BTreeMap<String, Book>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub description: String,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub number: u32,
    pub title: String,
    pub roots: Vec<Root>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub root: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub meaning: String,
    pub words: Vec<VocabWord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabWord {
    pub word: String,
    pub definition: String,
    #[serde(default)]
    pub pronunciation: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub example: String,
}

impl VocabularyData {
    /// Parse a vocabulary table from JSON
    pub fn from_json(json: &str) -> Result<Self, VocabularyError> {
        let data: VocabularyData = serde_json::from_str(json)?;
        debug!(books = data.books.len(), "vocabulary loaded");
        Ok(data)
    }

    /// The classical roots table bundled with the crate
    pub fn bundled() -> Result<Self, VocabularyError> {
        Self::from_json(BUNDLED)
    }

    pub fn book(&self, id: &str) -> Result<&Book, VocabularyError> {
        self.books
            .get(id)
            .ok_or_else(|| VocabularyError::UnknownBook(id.to_string()))
    }

    /// Book ids in sorted order
    pub fn book_ids(&self) -> impl Iterator<Item = &str> {
        self.books.keys().map(String::as_str)
    }

    /// Word pool for `lessons` of book `id`; an empty lesson list means every lesson
    pub fn word_pool(&self, id: &str, lessons: &[u32]) -> Result<Vec<WordClue>, VocabularyError> {
        let pool = self.book(id)?.word_clues(lessons);
        if pool.is_empty() {
            return Err(VocabularyError::NoWords);
        }
        Ok(pool)
    }
}

impl Book {
    pub fn lesson(&self, number: u32) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.number == number)
    }

    /// Flatten the selected lessons into clue pairs.
    ///
    /// Lessons are visited in the order given; unknown lesson numbers are skipped.
    pub fn word_clues(&self, lessons: &[u32]) -> Vec<WordClue> {
        let selected: Vec<&Lesson> = if lessons.is_empty() {
            self.lessons.iter().collect()
        } else {
            lessons.iter().filter_map(|n| self.lesson(*n)).collect()
        };
        selected.into_iter().flat_map(Lesson::word_clues).collect()
    }
}

impl Lesson {
    pub fn word_count(&self) -> usize {
        self.roots.iter().map(|r| r.words.len()).sum()
    }

    pub fn word_clues(&self) -> impl Iterator<Item = WordClue> + '_ {
        self.roots
            .iter()
            .flat_map(|r| r.words.iter())
            .map(|w| WordClue::new(w.word.as_str(), w.definition.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "books": {
            "book-x": {
                "title": "Book X",
                "level": "Test",
                "description": "fixture",
                "lessons": [
                    {
                        "number": 1,
                        "title": "Shape",
                        "roots": [
                            {
                                "root": "FORM",
                                "origin": "Latin",
                                "meaning": "shape",
                                "words": [
                                    {"word": "conform", "pronunciation": "kuhn-FAWRM", "partOfSpeech": "verb",
                                     "definition": "to act in accordance with rules", "example": "Conform."},
                                    {"word": "deform", "partOfSpeech": "verb",
                                     "definition": "to spoil the shape of"}
                                ]
                            }
                        ]
                    },
                    {
                        "number": 2,
                        "title": "Movement",
                        "roots": [
                            {
                                "root": "MOV",
                                "words": [
                                    {"word": "mobile", "definition": "able to move"}
                                ]
                            }
                        ]
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn test_parse_nested_shape() {
        let data = VocabularyData::from_json(SAMPLE).unwrap();
        let book = data.book("book-x").unwrap();
        assert_eq!(book.title, "Book X");
        assert_eq!(book.lessons.len(), 2);
        assert_eq!(book.lessons[0].word_count(), 2);

        let word = &book.lessons[0].roots[0].words[0];
        assert_eq!(word.part_of_speech, "verb");
        assert_eq!(word.pronunciation, "kuhn-FAWRM");
    }

    #[test]
    fn test_word_clues_for_selected_lessons() {
        let data = VocabularyData::from_json(SAMPLE).unwrap();
        let book = data.book("book-x").unwrap();

        let lesson_two = book.word_clues(&[2]);
        assert_eq!(lesson_two, vec![WordClue::new("mobile", "able to move")]);

        let all = book.word_clues(&[]);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].clue, "to act in accordance with rules");

        assert!(book.word_clues(&[9]).is_empty());
    }

    #[test]
    fn test_unknown_book() {
        let data = VocabularyData::from_json(SAMPLE).unwrap();
        assert!(matches!(
            data.word_pool("book-z", &[]),
            Err(VocabularyError::UnknownBook(id)) if id == "book-z"
        ));
        assert!(matches!(
            data.word_pool("book-x", &[7]),
            Err(VocabularyError::NoWords)
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            VocabularyData::from_json("{\"books\": 3}"),
            Err(VocabularyError::Parse(_))
        ));
    }

    #[test]
    fn test_bundled_table_loads() {
        let data = VocabularyData::bundled().unwrap();
        assert!(data.book_ids().any(|id| id == "book-4"));
        let pool = data.word_pool("book-6", &[]).unwrap();
        assert!(pool.len() >= 20);
        assert!(pool.iter().all(WordClue::is_placeable));
    }
}
