use std::io::Write;
use chrono::Local;
use colored::Colorize;

use botpanel_common::models::ActivityEntry;
use botpanel_common_ui::{BotStatus, PanelRenderer, PanelSnapshot};

/// Plain-text presenter writing to any sink (stdout in the binary).
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render_entry(&mut self, entry: &ActivityEntry) -> anyhow::Result<()> {
        let time = entry.timestamp().with_timezone(&Local).format("%H:%M:%S");
        let tag = format!("[{}]", entry.kind());
        let tag = if entry.kind().is_error() { tag.red() } else { tag.yellow() };
        writeln!(self.out, "{} {} {}", time, tag, entry.title().bold())?;
        if !entry.description().is_empty() {
            writeln!(self.out, "    {}", entry.description())?;
        }
        Ok(())
    }
}

impl<W: Write> PanelRenderer for TerminalRenderer<W> {
    fn render_activity(&mut self, entries: &[ActivityEntry]) -> anyhow::Result<()> {
        if entries.is_empty() {
            writeln!(self.out, "(no activity yet)")?;
        }
        for entry in entries {
            self.render_entry(entry)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn render_status(&mut self, snapshot: &PanelSnapshot) -> anyhow::Result<()> {
        let status = match snapshot.status {
            BotStatus::Active => "Active".green(),
            BotStatus::Inactive => "Inactive".dimmed(),
        };
        writeln!(self.out, "Bot: {}", status)?;
        writeln!(
            self.out,
            "Controls: start {}, stop {}",
            if snapshot.controls.start_enabled { "enabled" } else { "disabled" },
            if snapshot.controls.stop_enabled { "enabled" } else { "disabled" },
        )?;
        writeln!(
            self.out,
            "Messages: {}  Subreddits: {}",
            snapshot.counters.messages, snapshot.counters.subreddits
        )?;
        if !snapshot.flagged_fields.is_empty() {
            let names: Vec<&str> = snapshot.flagged_fields.iter().map(|f| f.as_str()).collect();
            writeln!(self.out, "Needs input: {}", names.join(", ").red())?;
        }
        self.out.flush()?;
        Ok(())
    }
}
