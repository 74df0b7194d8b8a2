/// Detailed help text for bot control and inspection:
///  - start / stop
///  - refresh / status
///  - log
pub const CONTROL_HELP_TEXT: &str = r#"Control Commands:

  start
     Asks the service to start the bot. Runs in the background; the result
     shows up in the activity feed.

  stop
     Asks the service to stop the bot. If the stop fails the panel keeps
     showing the last known status.

  refresh
     Re-reads the message/subreddit counters from GET /api/status. The bot
     status and the start/stop controls are not changed, even on failure.

  status
     Prints the displayed bot status, which controls are enabled and the
     message/subreddit counters from the last status query or refresh.

  log [n]
     Prints the newest n activity entries (default 10, at most 50).
"#;
