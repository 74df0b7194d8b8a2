pub mod commands;
pub mod help;
pub mod render;

pub use commands::{parse_line, ConsoleCommand};
pub use render::TerminalRenderer;
