//! Library side of the `quill` command-line editor.

pub mod editor;
pub mod logging;
pub mod prompt;
pub mod settings;
pub mod views;
