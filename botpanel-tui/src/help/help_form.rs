/// Detailed help text for the configuration form:
///  - set
///  - submit
pub const FORM_HELP_TEXT: &str = r#"Form Commands:

  set <field> <value>
     Fields: subreddit, username, password, client_id, client_secret.
     A field flagged by a failed submit is unflagged by the next 'set' on it.

  submit
     Checks that every field is filled in, then authenticates and sets the
     target subreddit, in that order. On success password, client_id and
     client_secret are wiped from the form.

Examples:
  set subreddit rust
  set client_secret s3cr3t
  submit
"#;
