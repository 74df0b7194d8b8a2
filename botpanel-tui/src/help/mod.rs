//! Central help module that provides a single entry point (`show_command_help`)
//! to display usage for any recognized console command.

pub mod help_control;
pub mod help_form;

fn show_general_help() -> String {
    let text = r#"Bot Panel - Available Commands:

  help [command]
    Show general help, or detailed help on a specific command.

  set <field> <value>
    Fill in one configuration field.

  submit
    Validate the form, authenticate and set the target subreddit.

  start | stop
    Start or stop the bot.

  refresh
    Re-read the message and subreddit counters.

  status
    Show bot status, controls and counters.

  log [n]
    Show the newest n activity entries (default 10).

  quit
    Leave the panel.
"#;
    text.to_owned()
}

pub fn show_command_help(command: &str) -> String {
    match command {
        "" => show_general_help(),
        "set" | "submit" => help_form::FORM_HELP_TEXT.to_owned(),
        "start" | "stop" | "refresh" | "status" | "log" => help_control::CONTROL_HELP_TEXT.to_owned(),
        "quit" => "Usage: quit\n  Leaves the panel. The bot keeps whatever state it is in.".to_owned(),
        other => format!("No help available for '{}'. Type 'help' for the command list.", other),
    }
}
