//! Type definitions for the prompt selection UI.

/// The user's choice in the interactive picker.
pub enum PromptChoice {
    /// Position of the chosen prompt in the run order.
    Index(usize),
    Quit,
}

/// Direction to cycle through prompts in the selection UI.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// State for the UI viewport.
///
/// Tracks the visible portion of the prompt list when there are more prompts
/// than can fit on screen.
#[derive(Clone, PartialEq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

/// Complete UI state for the prompt selection interface.
#[derive(Clone, PartialEq, Debug)]
pub struct UiState {
    /// Currently selected row in the filtered list
    pub selected_index: usize,
    /// Viewport state for scrolling
    pub viewport: ViewportState,
    /// Whether the user is currently filtering/searching
    pub is_filtering: bool,
    /// Current filter/search text
    pub filter_text: String,
}
