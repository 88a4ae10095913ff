//! Basic example of using the crossword engine

use crossword_core::{construct, Generator, PuzzleSession, PuzzleSize, VocabularyData, WordClue};

fn main() {
    // Build a puzzle from a hand-written word list
    let words = [
        WordClue::new("cat", "feline"),
        WordClue::new("car", "vehicle"),
        WordClue::new("art", "craft"),
    ];
    let crossword = match construct(&words, 50) {
        Ok(crossword) => crossword,
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };
    println!("{}", crossword);

    // Play it
    let mut session = PuzzleSession::new(crossword);
    session.select_word(0);
    for c in "cat".chars() {
        session.type_character(c);
    }
    println!(
        "Typed CAT: {}/{} words complete",
        session.completed_count(),
        session.total_words()
    );

    session.select_word(2);
    session.reveal_selected_word();
    println!(
        "Revealed 3 Down: {}/{} words complete\n",
        session.completed_count(),
        session.total_words()
    );

    // Generate a random puzzle from the bundled vocabulary
    println!("--- Small puzzle from Book 6, lessons 1-3 ---\n");
    let pool = VocabularyData::bundled().and_then(|data| data.word_pool("book-6", &[1, 2, 3]));
    match pool {
        Ok(pool) => {
            let mut generator = Generator::new();
            match generator.generate(&pool, PuzzleSize::Small) {
                Ok(crossword) => {
                    println!("{}", crossword);
                    println!(
                        "Placed {} of {} words in {} attempt(s)",
                        crossword.words().len(),
                        crossword.words().len() + crossword.unplaced().len(),
                        crossword.attempts()
                    );
                }
                Err(err) => eprintln!("{}", err),
            }
        }
        Err(err) => eprintln!("{}", err),
    }
}
