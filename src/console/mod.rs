//! Colorized terminal output.

mod color;
mod stream;

pub use color::Color;
pub use stream::{ColorChoice, ConsoleStream};
