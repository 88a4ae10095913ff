use crate::animations::particles::hue_to_rgb;
use crate::animations::CelebrationManager;
use crate::app::{App, GridLayout, MenuState, ScreenState};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use crossword_core::{CellCheck, Direction, PlacedWord, Position, PuzzleSize, SessionPhase};
use std::io;

/// Terminal columns per grid cell
const CELL_WIDTH: u16 = 3;
/// Terminal rows per grid cell: clue number on top, letter below
const CELL_HEIGHT: u16 = 2;
/// Narrowest clue panel worth drawing
const MIN_PANEL_WIDTH: u16 = 24;

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide)?;

    match app.screen_state {
        ScreenState::Win => render_win_screen(stdout, app, term_width, term_height)?,
        ScreenState::Playing => {
            execute!(stdout, Clear(ClearType::All))?;
            render_game_screen(stdout, app, term_width, term_height)?;
        }
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let grid = app.session.grid();
    let grid_width = grid.cols() as u16 * CELL_WIDTH;
    let grid_height = grid.rows() as u16 * CELL_HEIGHT;

    let start_x: u16 = 2;
    let start_y: u16 = if term_height > grid_height + 10 { 2 } else { 1 };

    render_active_clue(stdout, app, start_x, start_y, term_width)?;

    let grid_y = start_y + 2;
    app.grid_layout = GridLayout {
        x: start_x,
        y: grid_y,
        cell_width: CELL_WIDTH,
        cell_height: CELL_HEIGHT,
    };
    render_grid(stdout, app, start_x, grid_y)?;

    let panel_x = start_x + grid_width + 3;
    let panel_width = term_width.saturating_sub(panel_x + 1).max(MIN_PANEL_WIDTH);
    let info_rows = render_info_panel(stdout, app, panel_x, grid_y)?;
    render_clue_lists(
        stdout,
        app,
        panel_x,
        grid_y + info_rows + 1,
        panel_width,
        term_height,
    )?;

    let controls_y = grid_y + grid_height + 1;
    render_controls(stdout, app, start_x, controls_y)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    if app.menu != MenuState::None {
        render_menu(stdout, app, term_width, term_height)?;
    }

    Ok(())
}

/// "3 Down: to spoil the shape of" above the grid
fn render_active_clue(
    stdout: &mut io::Stdout,
    app: &App,
    x: u16,
    y: u16,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let text = match (app.session.selected(), app.session.active_word()) {
        (None, _) => "Click a cell or start typing to begin".to_string(),
        (Some(_), Some(word)) => format!("{} {}: {}", word.number, word.direction, word.clue),
        (Some(_), None) => format!("No {} word here (Tab to switch)", app.session.direction()),
    };
    let max = term_width.saturating_sub(x + 1) as usize;

    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.key),
        Print(truncate(&text, max))
    )?;
    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let grid = app.session.grid();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let pos = Position::new(row, col);
            let cell_x = x + col as u16 * CELL_WIDTH;
            let cell_y = y + row as u16 * CELL_HEIGHT;
            render_cell(stdout, app, pos, cell_x, cell_y)?;
        }
    }
    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, pos: Position, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let session = &app.session;

    if !session.grid().is_letter(pos) {
        execute!(stdout, SetBackgroundColor(theme.blocked))?;
        for line in 0..CELL_HEIGHT {
            execute!(stdout, MoveTo(x, y + line), Print("   "))?;
        }
        return Ok(());
    }

    let is_cursor = session.selected() == Some(pos);
    let mut bg = if is_cursor {
        theme.selected_bg
    } else if app.in_active_word(pos) {
        theme.word_bg
    } else {
        theme.cell_bg
    };

    let words = session
        .words()
        .iter()
        .enumerate()
        .filter(|(_, w)| w.contains(pos))
        .map(|(i, _)| i);
    let intensity = app.celebrations.intensity_for(words);
    if intensity > 0.0 {
        bg = CelebrationManager::throb_color(bg, intensity);
    }

    let number = session
        .crossword()
        .number_at(pos)
        .map(|n| format!("{:<3}", n))
        .unwrap_or_else(|| "   ".to_string());
    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(bg),
        SetForegroundColor(theme.number),
        Print(number)
    )?;

    let fg = match app.check.as_ref().and_then(|report| report.get(pos)) {
        Some(CellCheck::Correct) => theme.success,
        Some(CellCheck::Incorrect) => theme.error,
        None => theme.letter,
    };
    let letter = session
        .input(pos)
        .map(|c| format!(" {} ", c))
        .unwrap_or_else(|| "   ".to_string());
    execute!(
        stdout,
        MoveTo(x, y + 1),
        SetForegroundColor(fg),
        Print(letter)
    )?;

    Ok(())
}

/// Draw the info panel, returning how many rows it used
fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<u16> {
    let theme = &app.theme;
    let session = &app.session;

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("═══ CROSSWORD ═══")
    )?;

    let lines = [
        format!("Time:     {:>8}", session.elapsed_string()),
        format!(
            "Words:    {:>8}",
            format!("{}/{}", session.completed_count(), session.total_words())
        ),
        format!("Size:     {:>8}", app.size.to_string()),
        format!("Typing:   {:>8}", session.direction().to_string()),
        format!("Source:   {}", app.source),
    ];
    for (i, line) in lines.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, y + 2 + i as u16),
            SetForegroundColor(theme.info),
            Print(line)
        )?;
    }

    let mut rows = 2 + lines.len() as u16;
    if session.phase() == SessionPhase::Solved {
        execute!(
            stdout,
            MoveTo(x, y + rows),
            SetForegroundColor(theme.success),
            Print("Solved!")
        )?;
        rows += 1;
    }
    Ok(rows)
}

fn render_clue_lists(
    stdout: &mut io::Stdout,
    app: &App,
    x: u16,
    y: u16,
    width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let session = &app.session;
    let active = session.active_word_index();
    let completed = session.completed_words();
    let mut line_y = y;

    for direction in [Direction::Across, Direction::Down] {
        if line_y >= term_height {
            break;
        }
        execute!(
            stdout,
            MoveTo(x, line_y),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.fg),
            Print(direction.to_string().to_uppercase())
        )?;
        line_y += 1;

        let clues = session
            .words()
            .iter()
            .enumerate()
            .filter(|(_, w)| w.direction == direction);
        for (index, word) in clues {
            if line_y >= term_height {
                break;
            }
            let (fg, bg) = if active == Some(index) {
                (theme.key, theme.word_bg)
            } else if completed[index] {
                (theme.success, theme.bg)
            } else {
                (theme.info, theme.bg)
            };
            execute!(
                stdout,
                MoveTo(x, line_y),
                SetForegroundColor(fg),
                SetBackgroundColor(bg),
                Print(truncate(&clue_line(word), width as usize))
            )?;
            line_y += 1;
        }
        line_y += 1;
    }

    Ok(())
}

fn clue_line(word: &PlacedWord) -> String {
    format!("{:>2}. {} ({})", word.number, word.clue, word.len())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let controls = [
        ("Arrows", "Move"),
        ("A-Z", "Type"),
        ("Tab", "Direction"),
        ("[ ]", "Prev/next clue"),
        ("Bksp", "Erase back"),
        ("Del", "Clear cell"),
        ("^E", "Check"),
        ("^R", "Reveal word"),
        ("^N", "New puzzle"),
        ("^T", "Theme"),
        ("Click", "Select"),
        ("Esc", "Quit"),
    ];

    // Display in columns of 4
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 4;
        let row = i % 4;
        let cx = x + (col as u16) * 22;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>6}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.chars().count() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.selected_bg),
        Print(&padded)
    )?;

    Ok(())
}

fn render_menu(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let sizes = PuzzleSize::all();

    let menu_width: u16 = 30;
    let menu_height: u16 = sizes.len() as u16 + 5;
    let x = term_width.saturating_sub(menu_width) / 2;
    let y = term_height.saturating_sub(menu_height) / 2;

    let bg = Color::Rgb { r: 30, g: 30, b: 40 };

    for row in 0..menu_height {
        execute!(
            stdout,
            MoveTo(x, y + row),
            SetBackgroundColor(bg),
            Print(" ".repeat(menu_width as usize))
        )?;
    }

    execute!(stdout, SetForegroundColor(theme.border), SetBackgroundColor(bg))?;
    execute!(
        stdout,
        MoveTo(x, y),
        Print("┌"),
        Print("─".repeat(menu_width as usize - 2)),
        Print("┐")
    )?;
    for row in 1..menu_height - 1 {
        execute!(stdout, MoveTo(x, y + row), Print("│"))?;
        execute!(stdout, MoveTo(x + menu_width - 1, y + row), Print("│"))?;
    }
    execute!(
        stdout,
        MoveTo(x, y + menu_height - 1),
        Print("└"),
        Print("─".repeat(menu_width as usize - 2)),
        Print("┘")
    )?;

    let title = "New Puzzle Size";
    execute!(
        stdout,
        MoveTo(x + (menu_width - title.len() as u16) / 2, y + 1),
        SetForegroundColor(theme.fg),
        Print(title)
    )?;

    for (i, size) in sizes.iter().enumerate() {
        let label = format!("{:<8} {:>2} words", size.to_string(), size.word_count());
        let selected = i == app.menu_selection;
        let (fg, item_bg) = if selected {
            (theme.fg, theme.selected_bg)
        } else {
            (theme.info, bg)
        };
        let marker = if selected { "▶ " } else { "  " };
        execute!(
            stdout,
            MoveTo(x + 3, y + 3 + i as u16),
            SetForegroundColor(fg),
            SetBackgroundColor(item_bg),
            Print(format!("{}{}", marker, label))
        )?;
    }

    Ok(())
}

fn render_win_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    app.win_screen.resize(term_width, term_height);
    let bg_base = app.win_screen.backdrop();

    execute!(stdout, SetBackgroundColor(bg_base), Clear(ClearType::All))?;

    for particle in app.win_screen.particles() {
        if let Some((x, y)) = particle.cell(term_width, term_height) {
            execute!(
                stdout,
                MoveTo(x, y),
                SetForegroundColor(particle.color),
                SetBackgroundColor(bg_base),
                Print(particle.glyph)
            )?;
        }
    }

    let banner = app.win_screen.banner();
    let lines: Vec<&str> = banner.lines().filter(|l| !l.is_empty()).collect();
    let banner_width = lines.iter().map(|l| l.len()).max().unwrap_or(40) as u16;
    let banner_x = term_width.saturating_sub(banner_width) / 2;
    let banner_y = 3;

    for (i, line) in lines.iter().enumerate() {
        let hue = (app.win_screen.hue() + i as f32 * 0.1) % 1.0;
        execute!(
            stdout,
            MoveTo(banner_x, banner_y + i as u16),
            SetForegroundColor(hue_to_rgb(hue)),
            SetBackgroundColor(bg_base),
            Print(line)
        )?;
    }

    let msg = app.win_screen.message();
    let msg_x = term_width.saturating_sub(msg.len() as u16) / 2;
    let msg_y = banner_y + lines.len() as u16 + 2;
    let hue = (app.win_screen.hue() * 2.0) % 1.0;
    execute!(
        stdout,
        MoveTo(msg_x, msg_y),
        SetForegroundColor(hue_to_rgb(hue)),
        SetBackgroundColor(bg_base),
        Print(msg)
    )?;

    let stats = format!(
        "Time: {} | Words: {} | Size: {}",
        app.session.elapsed_string(),
        app.session.total_words(),
        app.size
    );
    let stats_x = term_width.saturating_sub(stats.len() as u16 + 2) / 2;
    execute!(
        stdout,
        MoveTo(stats_x, msg_y + 3),
        SetForegroundColor(Color::White),
        SetBackgroundColor(Color::Rgb { r: 30, g: 50, b: 30 }),
        Print(format!(" {} ", stats))
    )?;

    let instr = "Enter: new puzzle   n: choose size   Esc: view grid   q: quit";
    let instr_x = term_width.saturating_sub(instr.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(instr_x, msg_y + 5),
        SetForegroundColor(Color::Yellow),
        SetBackgroundColor(bg_base),
        Print(instr)
    )?;

    Ok(())
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("deform", 10), "deform");
        assert_eq!(truncate("to spoil the shape", 8), "to spoi…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_clue_line_format() {
        let word = PlacedWord {
            word: "DEFORM".to_string(),
            row: 0,
            col: 0,
            direction: Direction::Down,
            clue: "to spoil the shape of".to_string(),
            number: 3,
        };
        assert_eq!(clue_line(&word), " 3. to spoil the shape of (6)");
    }
}
