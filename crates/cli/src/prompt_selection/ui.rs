use std::fmt::Display;
use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color::{DarkBlue, DarkGreen, Green, Reset, Yellow};
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{queue, terminal, ExecutableCommand};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use redpen_core::error::Result;
use redpen_core::progress::Progress;
use redpen_core::run_order::prompt_name;

use super::types::CycleDirection::{Down, Up};
use super::types::{CycleDirection, PromptChoice, UiState, ViewportState};

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// One selectable row: a prompt with its run-order position.
struct Row<'a> {
    position: usize,
    id: &'a str,
    done: bool,
}

/// What a key press asks the event loop to do.
enum KeyAction {
    Choose,
    Quit,
    Cycle(CycleDirection),
    Update(UiState),
    Nothing,
}

/// Prompts the user to choose a prompt from the run order.
pub fn prompt_for_prompt_choice(
    run_order: &[String],
    progress: &Progress,
) -> Result<PromptChoice> {
    let rows: Vec<Row> = run_order
        .iter()
        .enumerate()
        .map(|(position, id)| Row {
            position,
            id,
            done: progress.is_completed(id),
        })
        .collect();

    let mut stdout = stdout();
    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let _raw_mode_guard = RawModeGuard; // When this goes out of scope, raw mode is disabled

    let (width, height) = terminal::size()?;
    let mut ui_state = UiState {
        selected_index: 0,
        viewport: ViewportState {
            offset: 0,
            height: height.saturating_sub(2), // Subtract 2 for header and filter line
            width,
        },
        is_filtering: false,
        filter_text: String::new(),
    };

    let mut visible = filter_rows(&rows, &ui_state.filter_text);
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            visible = filter_rows(&rows, &ui_state.filter_text);
            if ui_state.selected_index >= visible.len() {
                ui_state.selected_index = visible.len().saturating_sub(1);
            }
            redraw_ui(&ui_state, &rows, &visible)?;
            needs_redraw = false;
        }

        if !event::poll(Duration::from_millis(500))? {
            continue;
        }

        match event::read()? {
            Event::Key(key_event) => match handle_key_event(&key_event, &ui_state) {
                KeyAction::Choose => {
                    if let Some(&row_index) = visible.get(ui_state.selected_index) {
                        return Ok(PromptChoice::Index(rows[row_index].position));
                    }
                    queue!(stdout, Print("\x07"))?;
                    stdout.flush()?;
                }
                KeyAction::Quit => return Ok(PromptChoice::Quit),
                KeyAction::Cycle(direction) => {
                    ui_state = move_selected_index(&ui_state, visible.len(), direction);
                    needs_redraw = true;
                }
                KeyAction::Update(new_state) => {
                    ui_state = new_state;
                    needs_redraw = true;
                }
                KeyAction::Nothing => {}
            },
            Event::Resize(width, height) => {
                ui_state = handle_resize(width, height, &ui_state);
                needs_redraw = true;
            }
            _ => {}
        }
    }
}

fn handle_key_event(key_event: &KeyEvent, ui_state: &UiState) -> KeyAction {
    match key_event.code {
        KeyCode::Up => KeyAction::Cycle(Up),
        KeyCode::Down => KeyAction::Cycle(Down),
        KeyCode::Char('k') if !ui_state.is_filtering => KeyAction::Cycle(Up),
        KeyCode::Char('j') if !ui_state.is_filtering => KeyAction::Cycle(Down),
        KeyCode::Enter => KeyAction::Choose,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyAction::Quit
        }
        KeyCode::Backspace if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.filter_text.pop();
            KeyAction::Update(updated_state)
        }
        KeyCode::Esc if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = false;
            updated_state.filter_text.clear();
            KeyAction::Update(updated_state)
        }
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('/') if !ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = true;
            KeyAction::Update(updated_state)
        }
        KeyCode::Char('q') if !ui_state.is_filtering => KeyAction::Quit,
        KeyCode::Char(c) if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.filter_text.push(c);
            KeyAction::Update(updated_state)
        }
        _ => KeyAction::Nothing,
    }
}

/// Handle window resize events
fn handle_resize(width: u16, height: u16, ui_state: &UiState) -> UiState {
    let mut ui_state = ui_state.clone();
    let new_height = height.saturating_sub(2);

    ui_state.viewport.width = width;
    ui_state.viewport.height = new_height;

    // Keep the selection on screen after shrinking.
    if ui_state.selected_index >= ui_state.viewport.offset + new_height as usize {
        ui_state.viewport.offset = ui_state
            .selected_index
            .saturating_sub(new_height.saturating_sub(1) as usize);
    }

    ui_state
}

/// Move the selected index in the given direction, wrapping at the ends.
fn move_selected_index(
    ui_state: &UiState,
    visible_count: usize,
    direction: CycleDirection,
) -> UiState {
    if visible_count == 0 {
        return ui_state.clone();
    }

    let mut ui_state = ui_state.clone();
    let mut new_index = ui_state.selected_index;

    match direction {
        Up => {
            if new_index == 0 {
                new_index = visible_count - 1;
                ui_state.viewport.offset = new_index
                    .saturating_sub((ui_state.viewport.height as usize).saturating_sub(1));
            } else {
                new_index -= 1;
                if new_index < ui_state.viewport.offset {
                    ui_state.viewport.offset = new_index;
                }
            }
        }
        Down => {
            new_index = (new_index + 1) % visible_count;
            if new_index < ui_state.selected_index {
                ui_state.viewport.offset = 0;
            } else if new_index >= ui_state.viewport.offset + ui_state.viewport.height as usize {
                ui_state.viewport.offset = new_index - ui_state.viewport.height as usize + 1;
            }
        }
    }

    ui_state.selected_index = new_index;
    ui_state
}

fn redraw_ui(ui_state: &UiState, rows: &[Row], visible: &[usize]) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(ui_state, visible.len())?;

    if visible.is_empty() {
        queue!(
            stdout,
            SetForegroundColor(crossterm::style::Color::Red),
            Print("No matching prompts!".to_string()),
            SetAttribute(Attribute::Reset),
            crossterm::cursor::MoveToNextLine(1)
        )?;
    } else {
        print_rows_with_selection(ui_state, rows, visible)?;
    }

    if ui_state.is_filtering {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            Print(format!("Filter: {}", ui_state.filter_text)),
            SetAttribute(Attribute::Reset)
        )?;
    }

    stdout.flush()?;
    Ok(())
}

/// Print the header for the prompt selection UI
fn print_header(ui_state: &UiState, visible_count: usize) -> Result<()> {
    let mut stdout = stdout();
    let width = ui_state.viewport.width as usize;

    let left_padding_size = 2usize;
    let left_padding = " ".repeat(left_padding_size);

    let instructions = if ui_state.is_filtering {
        "<esc>: Stop Filtering".to_string()
    } else {
        format!(
            "/: Begin Filtering   |   {}/{}   |   q: Quit",
            pad_to_width_of(ui_state.selected_index + 1, visible_count),
            visible_count
        )
    };

    let right_padding =
        " ".repeat(width.saturating_sub(left_padding_size + instructions.len()));

    queue!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(DarkGreen),
        Print(left_padding),
        Print(instructions),
        Print(right_padding),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Pad a value to match the width of the largest value
fn pad_to_width_of<T: Display>(value: T, max_number: usize) -> String {
    let width = format!("{max_number}").len();
    format!("{:>width$}", value.to_string())
}

/// Print all visible rows with the selected one highlighted
fn print_rows_with_selection(ui_state: &UiState, rows: &[Row], visible: &[usize]) -> Result<()> {
    let mut stdout = stdout();
    let viewport = &ui_state.viewport;

    let on_screen = visible
        .iter()
        .skip(viewport.offset)
        .take(viewport.height as usize);

    for (i, &row_index) in on_screen.enumerate() {
        let is_selected = i + viewport.offset == ui_state.selected_index;
        write_row(
            i as u16 + 1,
            &rows[row_index],
            rows.len(),
            is_selected,
            viewport.width,
        )?;
        queue!(stdout, crossterm::cursor::MoveToNextLine(1))?;
    }

    Ok(())
}

fn write_row(
    screen_row: u16,
    row: &Row,
    total: usize,
    is_selected: bool,
    terminal_width: u16,
) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, MoveTo(0, screen_row), Clear(ClearType::CurrentLine))?;

    let mark = if row.done { "x" } else { " " };
    let number = pad_to_width_of(row.position + 1, total);
    let content = format!("[{mark}] {number}  {}", prompt_name(row.id));

    let padding = " ".repeat((terminal_width as usize).saturating_sub(content.len()));

    if is_selected {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            SetBackgroundColor(DarkBlue),
            SetForegroundColor(Yellow),
        )?;
    } else if row.done {
        queue!(stdout, SetForegroundColor(Green))?;
    }

    queue!(stdout, Print(content), Print(padding))?;

    queue!(
        stdout,
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Filter the displayed rows based on the current filter text.
///
/// A numeric filter matches against the 1-based display numbers; anything
/// else is fuzzy-matched against the prompt names. Returns indices into
/// `rows`, preserving run-order position.
fn filter_rows(rows: &[Row], predicate: &str) -> Vec<usize> {
    if predicate.is_empty() {
        return (0..rows.len()).collect();
    }

    let matcher = SkimMatcherV2::default();
    let is_numeric = predicate.bytes().all(|b| b.is_ascii_digit());

    rows.iter()
        .enumerate()
        .filter_map(|(i, row)| {
            if is_numeric {
                (row.position + 1)
                    .to_string()
                    .contains(predicate)
                    .then_some(i)
            } else {
                matcher
                    .fuzzy_match(prompt_name(row.id), predicate)
                    .map(|_| i)
            }
        })
        .collect()
}
