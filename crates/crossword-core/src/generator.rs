use crate::constructor::{construct_with, DEFAULT_MAX_ATTEMPTS};
use crate::{Crossword, CrosswordError, WordClue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Puzzle size tier, mapped to how many words are drawn from the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl PuzzleSize {
    /// Number of words requested for this size
    pub fn word_count(&self) -> usize {
        match self {
            PuzzleSize::Small => 10,
            PuzzleSize::Medium => 15,
            PuzzleSize::Large => 20,
        }
    }

    pub fn all() -> &'static [PuzzleSize] {
        &[PuzzleSize::Small, PuzzleSize::Medium, PuzzleSize::Large]
    }

    /// Parse "small" / "medium" / "large"
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "small" => Some(PuzzleSize::Small),
            "medium" => Some(PuzzleSize::Medium),
            "large" => Some(PuzzleSize::Large),
            _ => None,
        }
    }
}

impl fmt::Display for PuzzleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleSize::Small => write!(f, "Small"),
            PuzzleSize::Medium => write!(f, "Medium"),
            PuzzleSize::Large => write!(f, "Large"),
        }
    }
}

/// Configuration for puzzle generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// How many words to draw from the pool
    pub size: PuzzleSize,
    /// Maximum construction attempts before keeping the best
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::for_size(PuzzleSize::default())
    }
}

impl GeneratorConfig {
    /// `size` words, default attempt budget
    pub fn for_size(size: PuzzleSize) -> Self {
        Self {
            size,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Crossword puzzle generator: picks words from a pool and builds a grid
pub struct Generator {
    config: GeneratorConfig,
    rng: SimpleRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::with_seed(seed),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a puzzle of the given size from `pool`
    pub fn generate(&mut self, pool: &[WordClue], size: PuzzleSize) -> Result<Crossword, CrosswordError> {
        self.config.size = size;
        self.generate_with_config(pool)
    }

    /// Generate a puzzle with the current configuration
    pub fn generate_with_config(&mut self, pool: &[WordClue]) -> Result<Crossword, CrosswordError> {
        let words = self.select_words(pool);
        debug!(
            pool = pool.len(),
            selected = words.len(),
            size = %self.config.size,
            "generating crossword"
        );
        let rng = &mut self.rng;
        construct_with(&words, self.config.max_attempts, |entries| {
            shuffle(rng, entries)
        })
    }

    /// Shuffle the pool and take the configured number of words
    pub fn select_words(&mut self, pool: &[WordClue]) -> Vec<WordClue> {
        let mut words = pool.to_vec();
        shuffle(&mut self.rng, &mut words);
        words.truncate(self.config.size.word_count());
        words
    }
}

/// Shuffle a slice using Fisher-Yates
fn shuffle<T>(rng: &mut SimpleRng, slice: &mut [T]) {
    for i in (1..slice.len()).rev() {
        let j = rng.next_usize(i + 1);
        slice.swap(i, j);
    }
}

/// Seedable PCG-style PRNG behind both the pool shuffle and the per-attempt
/// reshuffle, so `with_seed` replays the exact same puzzle on native and wasm.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new() -> Self {
        let mut seed_bytes = [0u8; 8];
        if getrandom::getrandom(&mut seed_bytes).is_err() {
            // No entropy source: count up instead
            static FALLBACK: AtomicU64 = AtomicU64::new(1);
            seed_bytes = FALLBACK.fetch_add(1, Ordering::Relaxed).to_le_bytes();
        }
        Self::with_seed(u64::from_le_bytes(seed_bytes))
    }

    fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        // PCG-like PRNG
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        (xorshifted.rotate_right(rot)) as u64
    }

    fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() as usize) % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: usize) -> Vec<WordClue> {
        const WORDS: &[&str] = &[
            "conform", "deform", "formal", "format", "reform", "uniform", "transform", "formula",
            "inform", "platform", "portable", "transport", "import", "export", "report",
            "support", "deport", "porter", "airport", "passport", "rapport", "purport",
        ];
        WORDS
            .iter()
            .take(n)
            .map(|w| WordClue::new(*w, format!("definition of {}", w)))
            .collect()
    }

    #[test]
    fn test_config_for_size() {
        assert_eq!(GeneratorConfig::default(), GeneratorConfig::for_size(PuzzleSize::Medium));
        let config = GeneratorConfig::for_size(PuzzleSize::Large);
        assert_eq!(config.size, PuzzleSize::Large);
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(Generator::with_config(config.clone()).config(), &config);
    }

    #[test]
    fn test_word_counts_per_size() {
        assert_eq!(PuzzleSize::Small.word_count(), 10);
        assert_eq!(PuzzleSize::Medium.word_count(), 15);
        assert_eq!(PuzzleSize::Large.word_count(), 20);
        assert_eq!(PuzzleSize::from_name("LARGE"), Some(PuzzleSize::Large));
        assert_eq!(PuzzleSize::from_name("huge"), None);
    }

    #[test]
    fn test_select_words_caps_at_pool_size() {
        let mut generator = Generator::with_seed(7);
        let words = generator.select_words(&pool(6));
        assert_eq!(words.len(), 6);

        generator.config.size = PuzzleSize::Small;
        let words = generator.select_words(&pool(22));
        assert_eq!(words.len(), 10);
    }

    #[test]
    fn test_select_words_is_a_permutation_subset() {
        let mut generator = Generator::with_seed(3);
        let source = pool(22);
        let words = generator.select_words(&source);
        for word in &words {
            assert!(source.contains(word));
        }
        let mut unique = words.iter().map(|w| w.word.clone()).collect::<Vec<_>>();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), words.len());
    }

    #[test]
    fn test_generate_places_words() {
        let mut generator = Generator::with_seed(42);
        let crossword = generator.generate(&pool(22), PuzzleSize::Small).unwrap();
        assert!(!crossword.words().is_empty());
        assert_eq!(crossword.words().len() + crossword.unplaced().len(), 10);
    }

    #[test]
    fn test_same_seed_same_puzzle() {
        let a = Generator::with_seed(99).generate(&pool(22), PuzzleSize::Medium).unwrap();
        let b = Generator::with_seed(99).generate(&pool(22), PuzzleSize::Medium).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_pool_is_error() {
        let mut generator = Generator::with_seed(1);
        assert_eq!(
            generator.generate(&[], PuzzleSize::Small),
            Err(CrosswordError::EmptyWordList)
        );
    }
}
