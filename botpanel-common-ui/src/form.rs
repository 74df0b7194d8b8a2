use std::fmt;
use std::str::FromStr;

use botpanel_common::models::BotConfig;
use botpanel_common::ValidationError;

/// Inputs of the configuration form, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Subreddit,
    Username,
    Password,
    ClientId,
    ClientSecret,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Subreddit,
        FormField::Username,
        FormField::Password,
        FormField::ClientId,
        FormField::ClientSecret,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Subreddit => "subreddit",
            FormField::Username => "username",
            FormField::Password => "password",
            FormField::ClientId => "client_id",
            FormField::ClientSecret => "client_secret",
        }
    }

    /// Cleared from the form once a submission succeeds.
    pub fn is_secret(&self) -> bool {
        matches!(self, FormField::Password | FormField::ClientId | FormField::ClientSecret)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown field: {}", s))
    }
}

#[derive(Debug, Clone, Default)]
struct FieldState {
    value: String,
    flagged: bool,
}

/// Raw operator input, as typed.
#[derive(Debug, Clone, Default)]
pub struct ConfigForm {
    fields: [FieldState; 5],
}

impl ConfigForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces a field's value. An error flag on the field clears here and
    /// only here.
    pub fn edit(&mut self, field: FormField, value: impl Into<String>) {
        let state = &mut self.fields[field.index()];
        state.value = value.into();
        state.flagged = false;
    }

    pub fn value(&self, field: FormField) -> &str {
        &self.fields[field.index()].value
    }

    pub fn is_flagged(&self, field: FormField) -> bool {
        self.fields[field.index()].flagged
    }

    pub fn flagged(&self) -> Vec<FormField> {
        FormField::ALL.into_iter().filter(|f| self.is_flagged(*f)).collect()
    }

    /// Checks every required field, flagging each blank one, and builds a
    /// trimmed `BotConfig` when nothing is missing.
    pub fn validate(&mut self) -> Result<BotConfig, ValidationError> {
        let mut missing = Vec::new();
        for field in FormField::ALL {
            let state = &mut self.fields[field.index()];
            if state.value.trim().is_empty() {
                state.flagged = true;
                missing.push(field.as_str());
            }
        }
        if !missing.is_empty() {
            return Err(ValidationError { missing });
        }

        let trimmed = |field: FormField| self.value(field).trim().to_string();
        Ok(BotConfig {
            subreddit: trimmed(FormField::Subreddit),
            username: trimmed(FormField::Username),
            password: trimmed(FormField::Password),
            client_id: trimmed(FormField::ClientId),
            client_secret: trimmed(FormField::ClientSecret),
        })
    }

    pub fn clear_secrets(&mut self) {
        for field in FormField::ALL.into_iter().filter(FormField::is_secret) {
            self.fields[field.index()] = FieldState::default();
        }
    }
}
