//! WebAssembly crossword game
//!
//! Wraps the crossword engine for a browser page. The page owns the DOM: it
//! forwards clicks and key presses here, calls `tick()` from a timer and draws
//! whatever `snapshot()` returns.

use crossword_core::{Generator, PuzzleSize, VocabularyData, WordClue};
use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

mod game;


pub use game::{CellSnapshot, GameState, PuzzleSnapshot, ScreenState, WordSnapshot};

// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Browser clock in milliseconds
fn js_clock() -> u64 {
    js_sys::Date::now() as u64
}

fn parse_size(name: &str) -> PuzzleSize {
    PuzzleSize::from_name(name).unwrap_or_default()
}

/// Words for `book`, from `vocab_json` or the bundled table when it is empty
fn load_pool(vocab_json: &str, book: &str, lessons: &[u32]) -> Result<Vec<WordClue>, JsValue> {
    let data = if vocab_json.trim().is_empty() {
        VocabularyData::bundled()
    } else {
        VocabularyData::from_json(vocab_json)
    }
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    data.word_pool(book, lessons)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The main WASM game controller
#[wasm_bindgen]
pub struct CrosswordGame {
    state: GameState,
}

#[wasm_bindgen]
impl CrosswordGame {
    /// Create a game from a vocabulary book.
    ///
    /// `vocab_json` may be empty to use the bundled words; `lessons` empty
    /// means every lesson in the book.
    #[wasm_bindgen(constructor)]
    pub fn new(vocab_json: &str, book: &str, lessons: &[u32], size: &str) -> Result<CrosswordGame, JsValue> {
        let pool = load_pool(vocab_json, book, lessons)?;
        let state = GameState::new(pool, Generator::new(), parse_size(size), js_clock).map_err(|e| {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
            JsValue::from_str(&e.to_string())
        })?;
        Ok(CrosswordGame { state })
    }

    /// Handle keyboard input, returns true if the key was used
    #[wasm_bindgen]
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> bool {
        let ctrl = event.ctrl_key() || event.meta_key();
        self.state.handle_key(&event.key(), ctrl)
    }

    /// Handle a key by name (`KeyboardEvent.key` values)
    #[wasm_bindgen]
    pub fn handle_key_name(&mut self, key: &str, ctrl: bool) -> bool {
        self.state.handle_key(key, ctrl)
    }

    /// Select a cell, e.g. from a click
    #[wasm_bindgen]
    pub fn select_cell(&mut self, row: usize, col: usize) -> bool {
        self.state.select_cell(row, col)
    }

    /// Update game state (call from a timer, ~100ms)
    #[wasm_bindgen]
    pub fn tick(&mut self) {
        self.state.tick();
    }

    /// Start a new puzzle: "small", "medium" or "large"
    #[wasm_bindgen]
    pub fn new_puzzle(&mut self, size: &str) -> bool {
        self.state.new_puzzle(parse_size(size))
    }

    /// Check every filled cell
    #[wasm_bindgen]
    pub fn check(&mut self) {
        self.state.check_puzzle();
    }

    /// Reveal the selected word
    #[wasm_bindgen]
    pub fn reveal(&mut self) -> bool {
        self.state.reveal()
    }

    /// Current frame as a JS object
    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.state.snapshot()).map_err(JsValue::from)
    }

    /// Current frame as JSON
    #[wasm_bindgen]
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_default()
    }

    /// Check if every word is filled in correctly
    #[wasm_bindgen]
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Get elapsed time in seconds
    #[wasm_bindgen]
    pub fn elapsed_secs(&self) -> u32 {
        self.state.elapsed_secs() as u32
    }

    /// Get formatted elapsed time
    #[wasm_bindgen]
    pub fn elapsed_string(&self) -> String {
        self.state.elapsed_string()
    }
}
