use indexmap::IndexMap;
use serde::Serialize;

use crate::registry::Registry;

/// Outcome of a successful parse.
///
/// Every declared flag and option has an entry: flags default to `false` and
/// options to their declared default. Owns all of its data, so it outlives the
/// token slice and can be sent across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    flags: IndexMap<String, bool>,
    options: IndexMap<String, String>,
    command: Option<String>,
    positional: Vec<String>,
}

impl ParseResult {
    /// Seed a result with every flag unset and every option at its default.
    pub(crate) fn seeded(registry: &Registry) -> Self {
        Self {
            flags: registry
                .flags()
                .map(|def| (def.name().to_string(), false))
                .collect(),
            options: registry
                .options()
                .map(|def| (def.name().to_string(), def.default_value().to_string()))
                .collect(),
            command: None,
            positional: Vec::new(),
        }
    }

    /// Whether a flag was set. Undeclared flags read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// An option's final value, or `None` for undeclared options.
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    /// The command selected by the first token, if any.
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// Leftover tokens in input order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    pub fn flags(&self) -> &IndexMap<String, bool> {
        &self.flags
    }

    pub fn options(&self) -> &IndexMap<String, String> {
        &self.options
    }

    /// Consume the result and keep only the positional tokens.
    pub fn into_positional(self) -> Vec<String> {
        self.positional
    }
}

impl ParseResult {
    pub(crate) fn set_flag(&mut self, name: &str) {
        if let Some(slot) = self.flags.get_mut(name) {
            *slot = true;
        }
    }

    pub(crate) fn set_option(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.options.get_mut(name) {
            value.clone_into(slot);
        }
    }

    pub(crate) fn set_command(&mut self, name: &str) {
        self.command = Some(name.to_string());
    }

    pub(crate) fn push_positional(&mut self, token: &str) {
        self.positional.push(token.to_string());
    }
}
