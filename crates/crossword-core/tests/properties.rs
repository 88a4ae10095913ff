use crossword_core::{construct, Crossword, Direction, Position, PuzzleSession, WordClue};
use proptest::prelude::*;

fn word_list() -> impl Strategy<Value = Vec<String>> {
    // Small alphabet so words actually cross
    prop::collection::btree_set("[a-h]{2,8}", 1..12).prop_map(|set| set.into_iter().collect())
}

fn build(words: &[String]) -> Crossword {
    let clues: Vec<_> = words
        .iter()
        .map(|w| WordClue::new(w.as_str(), format!("clue for {}", w)))
        .collect();
    construct(&clues, 10).expect("short letter-only words always place the first word")
}

fn neighbors(pos: Position) -> impl Iterator<Item = Position> {
    [(-1, 0), (1, 0), (0, -1), (0, 1)]
        .into_iter()
        .filter_map(move |(dr, dc)| pos.offset(dr, dc))
}

proptest! {
    #[test]
    fn placed_letters_agree_with_grid(words in word_list()) {
        let crossword = build(&words);
        for word in crossword.words() {
            for (pos, letter) in word.letters() {
                prop_assert_eq!(crossword.grid().letter(pos), Some(letter));
            }
        }
        // Every letter cell belongs to some word
        for pos in crossword.grid().positions() {
            if crossword.grid().is_letter(pos) {
                prop_assert!(crossword.words().iter().any(|w| w.contains(pos)));
            }
        }
    }

    #[test]
    fn adjacent_letters_share_a_word(words in word_list()) {
        let crossword = build(&words);
        let grid = crossword.grid();
        for pos in grid.positions().filter(|p| grid.is_letter(*p)) {
            for next in neighbors(pos).filter(|p| grid.is_letter(*p)) {
                prop_assert!(
                    crossword.words().iter().any(|w| w.contains(pos) && w.contains(next)),
                    "{} touches {} without a word joining them\n{}",
                    pos,
                    next,
                    crossword
                );
            }
        }
    }

    #[test]
    fn grid_is_trimmed_and_numbered(words in word_list()) {
        let crossword = build(&words);
        let grid = crossword.grid();
        let letters: Vec<_> = grid.positions().filter(|p| grid.is_letter(*p)).collect();
        prop_assert!(letters.iter().any(|p| p.row == 0));
        prop_assert!(letters.iter().any(|p| p.col == 0));
        prop_assert!(letters.iter().any(|p| p.row == grid.rows() - 1));
        prop_assert!(letters.iter().any(|p| p.col == grid.cols() - 1));

        for (i, word) in crossword.words().iter().enumerate() {
            prop_assert_eq!(word.number as usize, i + 1);
        }
        prop_assert_eq!(crossword.words().len() + crossword.unplaced().len(), words.len());
        prop_assert_eq!(crossword.words()[0].direction, Direction::Across);
    }

    #[test]
    fn completion_check_is_stable(words in word_list(), typed in "[a-h]{0,12}") {
        let crossword = build(&words);
        let start = crossword.words()[0].start();
        let mut session = PuzzleSession::with_clock(crossword, || 0);
        session.select_cell(start);
        for c in typed.chars() {
            session.type_character(c);
        }
        for word in session.words().to_vec() {
            let first = session.is_word_complete(&word);
            prop_assert_eq!(first, session.is_word_complete(&word));
        }
    }

    #[test]
    fn reveal_completes_word_and_spares_unrelated(words in word_list(), pick in any::<prop::sample::Index>()) {
        let crossword = build(&words);
        let mut session = PuzzleSession::with_clock(crossword, || 0);
        let target = session.words()[pick.index(session.words().len())].clone();
        if session.direction() != target.direction {
            session.toggle_direction();
        }
        let before = session.completed_words();

        let revealed = session.reveal_word_at(target.start());
        prop_assert_eq!(revealed.map(|i| &session.words()[i]), Some(&target));
        prop_assert!(session.is_word_complete(&target));

        let after = session.completed_words();
        for (i, word) in session.words().iter().enumerate() {
            let shares_cell = word.cells().any(|p| target.contains(p));
            if *word != target && !shares_cell {
                prop_assert_eq!(before[i], after[i]);
            }
        }
    }
}
