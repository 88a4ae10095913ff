use crate::animations::{CelebrationManager, WinScreen};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use crossword_core::{
    Arrow, CheckReport, CrosswordError, Generator, Position, PuzzleSession, PuzzleSize, WordClue,
};
use std::time::Duration;
use tracing::{debug, info};

/// Ticks a check result stays on screen (~2 seconds at 100ms)
const CHECK_TICKS: u32 = 20;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal solving
    Playing,
    /// Solved celebration screen
    Win,
}

/// Menu state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    None,
    /// Choosing the size of the next puzzle
    NewPuzzle,
}

/// Where the grid was last drawn, for mapping mouse clicks to cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridLayout {
    pub x: u16,
    pub y: u16,
    pub cell_width: u16,
    pub cell_height: u16,
}

impl GridLayout {
    /// Cell under terminal coordinate (column, row)
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Position> {
        if self.cell_width == 0 || self.cell_height == 0 || column < self.x || row < self.y {
            return None;
        }
        Some(Position::new(
            ((row - self.y) / self.cell_height) as usize,
            ((column - self.x) / self.cell_width) as usize,
        ))
    }
}

/// The main application state
pub struct App {
    /// Puzzle being solved
    pub session: PuzzleSession,
    /// Words new puzzles are drawn from
    pool: Vec<WordClue>,
    generator: Generator,
    /// Size used for the next puzzle
    pub size: PuzzleSize,
    /// Where the words came from, shown in the info panel
    pub source: String,
    pub theme: Theme,
    /// Message to display
    pub message: Option<String>,
    message_timer: u32,
    /// Result of the last check, shown until it times out
    pub check: Option<CheckReport>,
    check_timer: u32,
    pub screen_state: ScreenState,
    pub menu: MenuState,
    pub menu_selection: usize,
    pub win_screen: WinScreen,
    pub celebrations: CelebrationManager,
    pub grid_layout: GridLayout,
    /// Whether the solved screen was already shown for this puzzle
    celebrated: bool,
}

impl App {
    /// Create the app and its first puzzle
    pub fn new(
        pool: Vec<WordClue>,
        mut generator: Generator,
        size: PuzzleSize,
        theme: Theme,
        source: String,
    ) -> Result<Self, CrosswordError> {
        let crossword = generator.generate(&pool, size)?;
        info!(
            placed = crossword.words().len(),
            unplaced = crossword.unplaced().len(),
            %size,
            "first puzzle ready"
        );
        Ok(Self {
            session: PuzzleSession::new(crossword),
            pool,
            generator,
            size,
            source,
            theme,
            message: None,
            message_timer: 0,
            check: None,
            check_timer: 0,
            screen_state: ScreenState::Playing,
            menu: MenuState::None,
            menu_selection: 0,
            win_screen: WinScreen::new(),
            celebrations: CelebrationManager::new(),
            grid_layout: GridLayout::default(),
            celebrated: false,
        })
    }

    /// Get the tick rate based on current screen
    pub fn get_tick_rate(&self) -> Duration {
        match self.screen_state {
            ScreenState::Win => Duration::from_millis(33),
            ScreenState::Playing => Duration::from_millis(100),
        }
    }

    /// Update animations and timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if self.check_timer > 0 {
            self.check_timer -= 1;
            if self.check_timer == 0 {
                self.check = None;
            }
        }

        match self.screen_state {
            ScreenState::Win => self.win_screen.update(),
            ScreenState::Playing => {
                self.celebrations.update(&self.session.completed_words());
                if self.session.is_solved() && !self.celebrated {
                    self.celebrated = true;
                    info!(elapsed = %self.session.elapsed_string(), "puzzle solved");
                    self.screen_state = ScreenState::Win;
                    let letters: Vec<char> =
                        self.session.words().iter().flat_map(|w| w.word.chars()).collect();
                    self.win_screen.reset(letters);
                }
            }
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Build a new puzzle from the pool at the current size
    pub fn new_puzzle(&mut self) {
        match self.generator.generate(&self.pool, self.size) {
            Ok(crossword) => {
                let placed = crossword.words().len();
                let requested = placed + crossword.unplaced().len();
                self.session = PuzzleSession::new(crossword);
                self.check = None;
                self.check_timer = 0;
                self.celebrations.reset();
                self.celebrated = false;
                self.screen_state = ScreenState::Playing;

                if placed < requested {
                    self.show_message(&format!(
                        "New {} puzzle: placed {} of {} words",
                        self.size, placed, requested
                    ));
                } else {
                    self.show_message(&format!("New {} puzzle", self.size));
                }
            }
            Err(err) => {
                debug!(error = %err, "puzzle generation failed");
                self.show_message(&err.to_string());
            }
        }
    }

    /// Put the cursor on the first clue if the player has not picked a cell yet.
    /// Selecting starts the clock, so this only happens on the first move or letter.
    fn ensure_selection(&mut self) {
        if self.session.selected().is_none() {
            self.session.select_word(0);
        }
    }

    fn move_cursor(&mut self, arrow: Arrow) {
        self.ensure_selection();
        self.session.move_by_arrow(arrow);
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Win => self.handle_endgame_key(key),
            ScreenState::Playing => match self.menu {
                MenuState::None => self.handle_game_key(key),
                MenuState::NewPuzzle => self.handle_menu_key(key),
            },
        }
    }

    fn handle_endgame_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char('n') => {
                self.screen_state = ScreenState::Playing;
                self.open_size_menu();
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.new_puzzle(),
            KeyCode::Esc => {
                // Back to the (finished) grid
                self.screen_state = ScreenState::Playing;
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return AppAction::Quit,

            KeyCode::Char('n') if ctrl => self.open_size_menu(),
            KeyCode::Char('e') if ctrl => self.check_puzzle(),
            KeyCode::Char('r') if ctrl => self.reveal_word(),
            KeyCode::Char('t') if ctrl => {
                self.theme = Theme::named(self.theme.name.next());
                let label = self.theme.name.label();
                self.show_message(&format!("{} theme", label));
            }

            KeyCode::Up => self.move_cursor(Arrow::Up),
            KeyCode::Down => self.move_cursor(Arrow::Down),
            KeyCode::Left => self.move_cursor(Arrow::Left),
            KeyCode::Right => self.move_cursor(Arrow::Right),
            KeyCode::Tab | KeyCode::BackTab => self.session.toggle_direction(),

            KeyCode::Char(']') => self.cycle_clue(1),
            KeyCode::Char('[') => self.cycle_clue(-1),

            KeyCode::Backspace => {
                self.session.backspace();
            }
            KeyCode::Delete => {
                self.session.clear_cell();
            }

            KeyCode::Char(c) if !ctrl && c.is_alphabetic() => {
                self.ensure_selection();
                self.session.type_character(c);
            }

            _ => {}
        }

        AppAction::Continue
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> AppAction {
        let sizes = PuzzleSize::all();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.menu = MenuState::None,
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_selection = self.menu_selection.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.menu_selection + 1 < sizes.len() {
                    self.menu_selection += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.size = sizes[self.menu_selection.min(sizes.len() - 1)];
                self.menu = MenuState::None;
                self.new_puzzle();
            }
            _ => {}
        }
        AppAction::Continue
    }

    /// Handle a mouse event: a left click selects a grid cell
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if self.screen_state != ScreenState::Playing || self.menu != MenuState::None {
            return;
        }
        if let MouseEventKind::Down(MouseButton::Left) = event.kind {
            if let Some(pos) = self.grid_layout.cell_at(event.column, event.row) {
                self.session.select_cell(pos);
            }
        }
    }

    fn open_size_menu(&mut self) {
        self.menu = MenuState::NewPuzzle;
        self.menu_selection = PuzzleSize::all()
            .iter()
            .position(|s| *s == self.size)
            .unwrap_or(0);
    }

    fn check_puzzle(&mut self) {
        let report = self.session.check_all();
        let (correct, incorrect) = (report.correct_count(), report.incorrect_count());
        self.check = Some(report);
        self.check_timer = CHECK_TICKS;
        if incorrect == 0 && correct > 0 {
            self.show_message(&format!("All {} letters correct", correct));
        } else if correct + incorrect == 0 {
            self.show_message("Nothing to check yet");
        } else {
            self.show_message(&format!("{} correct, {} incorrect", correct, incorrect));
        }
    }

    fn reveal_word(&mut self) {
        if self.session.selected().is_none() {
            self.show_message("Please select a word first");
            return;
        }
        if let Some(index) = self.session.reveal_selected_word() {
            let word = &self.session.words()[index];
            let msg = format!("Revealed {} {}", word.number, word.direction);
            self.show_message(&msg);
        }
    }

    /// Select the next (or previous) clue in number order
    fn cycle_clue(&mut self, step: isize) {
        let total = self.session.total_words() as isize;
        if total == 0 {
            return;
        }
        let next = match self.session.active_word_index() {
            Some(current) => (current as isize + step).rem_euclid(total),
            None if step > 0 => 0,
            None => total - 1,
        };
        self.session.select_word(next as usize);
    }

    /// Whether `pos` belongs to the word being typed
    pub fn in_active_word(&self, pos: Position) -> bool {
        self.session
            .active_word()
            .is_some_and(|word| word.contains(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossword_core::SessionPhase;

    fn pool() -> Vec<WordClue> {
        [
            ("conform", "to act in accordance with rules"),
            ("deform", "to spoil the shape of"),
            ("formal", "following proper rules"),
            ("magnify", "to make something appear larger"),
            ("maximum", "the greatest amount"),
            ("mobile", "able to move"),
            ("motion", "the act of moving"),
            ("promote", "to move forward"),
            ("remote", "far away"),
            ("emotion", "a strong feeling"),
            ("format", "the shape of something"),
            ("transform", "to change the shape of"),
        ]
        .iter()
        .map(|(w, c)| WordClue::new(*w, *c))
        .collect()
    }

    fn app() -> App {
        App::new(
            pool(),
            Generator::with_seed(11),
            PuzzleSize::Small,
            Theme::dark(),
            "test".to_string(),
        )
        .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_clock_waits_for_first_move() {
        let mut app = app();
        for _ in 0..5 {
            app.tick();
        }
        assert_eq!(app.session.selected(), None);
        assert_eq!(app.session.phase(), SessionPhase::Empty);
        assert_eq!(app.session.elapsed_string(), "00:00");

        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.session.phase(), SessionPhase::Active);
        assert!(app.session.selected().is_some());
    }

    #[test]
    fn test_new_puzzle_resets_clock() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.session.phase(), SessionPhase::Active);
        app.new_puzzle();
        assert_eq!(app.session.phase(), SessionPhase::Empty);
        assert_eq!(app.session.selected(), None);
    }

    #[test]
    fn test_first_letter_starts_on_first_clue() {
        let mut app = app();
        let first = app.session.words()[0].clone();
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.session.input(first.start()), Some('X'));
        assert_eq!(app.session.direction(), first.direction);
    }

    #[test]
    fn test_reveal_without_selection_asks_for_one() {
        let mut app = app();
        app.handle_key(ctrl('r'));
        assert_eq!(app.message.as_deref(), Some("Please select a word first"));
        assert_eq!(app.session.completed_count(), 0);
        assert_eq!(app.session.phase(), SessionPhase::Empty);
    }

    #[test]
    fn test_typing_fills_cells() {
        let mut app = app();
        let start = app.session.words()[0].start();
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.session.input(start), Some('X'));

        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.session.input(start), None);
    }

    #[test]
    fn test_control_letters_are_not_typed() {
        let mut app = app();
        let start = app.session.words()[0].start();
        app.handle_key(ctrl('t'));
        assert_eq!(app.session.input(start), None);
        assert_eq!(app.theme.name, crate::theme::ThemeName::Light);
    }

    #[test]
    fn test_tab_toggles_direction() {
        let mut app = app();
        let before = app.session.direction();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.session.direction(), before.perpendicular());
    }

    #[test]
    fn test_check_overlay_expires() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('z')));
        app.handle_key(ctrl('e'));
        assert!(app.check.is_some());
        for _ in 0..CHECK_TICKS {
            app.tick();
        }
        assert!(app.check.is_none());
    }

    #[test]
    fn test_reveal_all_words_shows_win_screen() {
        let mut app = app();
        for index in 0..app.session.total_words() {
            app.session.select_word(index);
            app.handle_key(ctrl('r'));
        }
        assert!(app.session.is_solved());
        app.tick();
        assert_eq!(app.screen_state, ScreenState::Win);

        // Esc returns to the solved grid without re-triggering the screen
        app.handle_key(key(KeyCode::Esc));
        app.tick();
        assert_eq!(app.screen_state, ScreenState::Playing);
    }

    #[test]
    fn test_size_menu_starts_new_puzzle() {
        let mut app = app();
        app.handle_key(ctrl('n'));
        assert_eq!(app.menu, MenuState::NewPuzzle);
        assert_eq!(app.menu_selection, 0);

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.menu, MenuState::None);
        assert_eq!(app.size, PuzzleSize::Medium);
        let session = &app.session;
        assert_eq!(session.words().len() + session.crossword().unplaced().len(), 12);
    }

    #[test]
    fn test_clue_cycling_wraps() {
        let mut app = app();
        let total = app.session.total_words();
        app.handle_key(key(KeyCode::Char('[')));
        assert_eq!(app.session.active_word_index(), Some(total - 1));
        app.handle_key(key(KeyCode::Char(']')));
        assert_eq!(app.session.active_word_index(), Some(0));
    }

    #[test]
    fn test_mouse_click_selects_cell() {
        let mut app = app();
        app.grid_layout = GridLayout {
            x: 10,
            y: 5,
            cell_width: 3,
            cell_height: 2,
        };
        let target = app
            .session
            .grid()
            .positions()
            .find(|p| app.session.grid().is_letter(*p) && Some(*p) != app.session.selected())
            .unwrap();
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10 + target.col as u16 * 3 + 1,
            row: 5 + target.row as u16 * 2 + 1,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.session.selected(), Some(target));
    }

    #[test]
    fn test_grid_layout_outside_is_none() {
        let layout = GridLayout {
            x: 4,
            y: 2,
            cell_width: 3,
            cell_height: 2,
        };
        assert_eq!(layout.cell_at(3, 2), None);
        assert_eq!(layout.cell_at(4, 2), Some(Position::new(0, 0)));
        assert_eq!(layout.cell_at(9, 5), Some(Position::new(1, 1)));
    }
}
