// Console command parsing. Execution lives in main.rs so long-running calls
// can be spawned while push events keep flowing.

use botpanel_common_ui::{ControlCommand, FormField};

use crate::help;

pub const DEFAULT_LOG_LINES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Help(String),
    Set(FormField, String),
    Control(ControlCommand),
    Status,
    Log(usize),
    Quit,
    /// Bad input; carries the message to print.
    Invalid(String),
}

pub fn parse_line(line: &str) -> Option<ConsoleCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return None;
    }
    let cmd = parts[0].to_lowercase();
    let args = &parts[1..];

    let parsed = match cmd.as_str() {
        "help" => {
            let subcmd = args.first().copied().unwrap_or("");
            ConsoleCommand::Help(help::show_command_help(subcmd))
        }
        "set" => parse_set(line, args),
        "submit" => ConsoleCommand::Control(ControlCommand::Submit),
        "start" => ConsoleCommand::Control(ControlCommand::Start),
        "stop" => ConsoleCommand::Control(ControlCommand::Stop),
        "refresh" => ConsoleCommand::Control(ControlCommand::RefreshCounters),
        "status" => ConsoleCommand::Status,
        "log" => match args.first() {
            None => ConsoleCommand::Log(DEFAULT_LOG_LINES),
            Some(n) => match n.parse::<usize>() {
                Ok(n) => ConsoleCommand::Log(n),
                Err(_) => ConsoleCommand::Invalid("Usage: log [n]".to_string()),
            },
        },
        "quit" | "exit" => ConsoleCommand::Quit,
        _ => ConsoleCommand::Invalid(format!("Unknown command '{}'. Type 'help' for usage.", cmd)),
    };
    Some(parsed)
}

/// `set <field> <value>`; the value is everything after the field name, so
/// inner spaces survive. Trimming is left to validation.
fn parse_set(line: &str, args: &[&str]) -> ConsoleCommand {
    let Some(field_name) = args.first() else {
        return ConsoleCommand::Invalid(
            "Usage: set <field> <value>  (fields: subreddit, username, password, client_id, client_secret)"
                .to_string(),
        );
    };
    let field = match field_name.parse::<FormField>() {
        Ok(field) => field,
        Err(e) => return ConsoleCommand::Invalid(e),
    };

    let rest = line.trim_start();
    let rest = rest.split_once(char::is_whitespace).map(|(_, r)| r).unwrap_or("");
    let rest = rest.trim_start();
    let value = rest
        .strip_prefix(*field_name)
        .map(|v| v.strip_prefix(char::is_whitespace).unwrap_or(v))
        .unwrap_or("");
    ConsoleCommand::Set(field, value.to_string())
}
