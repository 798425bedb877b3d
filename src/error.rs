use thiserror::Error;

/// Reasons a world layout is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Error, Debug)]
pub enum MdpError {
    #[error("Malformed layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("Could not read layout: {0}")]
    Io(#[from] std::io::Error),

    #[error("State {state} is out of range (n_s = {n_s})")]
    InvalidState { state: usize, n_s: usize },

    #[error("Action {action} is out of range (n_a = {n_a})")]
    InvalidAction { action: usize, n_a: usize },

    #[error("Position ({x}, {y}) is outside the {width}x{height} grid")]
    InvalidCoordinates {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MdpError>;
