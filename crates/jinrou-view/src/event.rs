#![forbid(unsafe_code)]

//! User input delivered to mounted content.

/// Abstract user interaction, already resolved from raw keys/clicks by
/// the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Primary affordance (OK / Yes / Enter).
    Submit,
    /// Dismiss affordance (Cancel / No / Escape / backdrop click).
    Cancel,
    /// An item in a list was chosen.
    Select(usize),
    /// An item's checkbox was flipped.
    Toggle(usize),
    /// Text field content replaced.
    Input(String),
}
