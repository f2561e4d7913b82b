//! Declared flags, options and commands.
//!
//! Flags and options share one long-name namespace and one abbreviation
//! namespace. Commands have a namespace of their own. Abbreviations and long
//! names never mix: a one-character long name is unrelated to the abbreviation
//! with the same character.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::display::DisplayOptions;
use crate::error::{ParseError, RegistryError};
use crate::result::ParseResult;
use crate::scanner;

/// A boolean switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagDef {
    name: String,
    help: String,
    abbreviation: Option<char>,
}

impl FlagDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// The abbreviation bound to this flag, if the binding succeeded.
    pub fn abbreviation(&self) -> Option<char> {
        self.abbreviation
    }
}

/// A named argument that takes a string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDef {
    name: String,
    help: String,
    abbreviation: Option<char>,
    default_value: String,
    allowed_values: IndexSet<String>,
}

impl OptionDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// The abbreviation bound to this option, if the binding succeeded.
    pub fn abbreviation(&self) -> Option<char> {
        self.abbreviation
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Allowed values in declaration order. Empty means anything goes.
    pub fn allowed_values(&self) -> impl ExactSizeIterator<Item = &str> {
        self.allowed_values.iter().map(String::as_str)
    }

    pub fn allows(&self, value: &str) -> bool {
        self.allowed_values.is_empty() || self.allowed_values.contains(value)
    }
}

/// A mode selector that may only appear as the first token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDef {
    name: String,
    help: String,
}

impl CommandDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }
}

/// What a name or abbreviation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Flag,
    Option,
    Command,
    Unknown,
}

/// The set of declared arguments.
///
/// Build it once with the `add_*` methods, then hand out shared references to
/// parse any number of token sequences.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    name: String,
    description: String,
    command_required: bool,
    display: DisplayOptions,
    flags: IndexMap<String, FlagDef>,
    flag_abbreviations: IndexMap<char, String>,
    options: IndexMap<String, OptionDef>,
    option_abbreviations: IndexMap<char, String>,
    commands: IndexMap<String, CommandDef>,
}

impl Registry {
    /// Create an empty registry with default display options.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Register a boolean flag.
    ///
    /// If the name is free but the abbreviation is taken, the flag is still
    /// registered (usable by its long name only) and
    /// [`RegistryError::DuplicateAbbreviation`] is returned.
    pub fn add_flag(
        &mut self,
        name: impl Into<String>,
        help: impl Into<String>,
        abbreviation: Option<char>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        self.ensure_name_free(&name)?;

        self.flags.insert(
            name.clone(),
            FlagDef {
                name: name.clone(),
                help: help.into(),
                abbreviation: None,
            },
        );
        tracing::debug!(flag = %name, "registered flag");

        let Some(abbreviation) = abbreviation else {
            return Ok(());
        };
        self.ensure_abbreviation_free(&name, abbreviation)?;
        self.flag_abbreviations.insert(abbreviation, name.clone());
        if let Some(def) = self.flags.get_mut(&name) {
            def.abbreviation = Some(abbreviation);
        }
        Ok(())
    }

    /// Register a value-taking option.
    ///
    /// `allowed_values` is deduplicated in order; it does not have to contain
    /// `default_value`. Same partial-registration rule as [`Registry::add_flag`].
    pub fn add_option<I, S>(
        &mut self,
        name: impl Into<String>,
        help: impl Into<String>,
        abbreviation: Option<char>,
        default_value: impl Into<String>,
        allowed_values: I,
    ) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        self.ensure_name_free(&name)?;

        self.options.insert(
            name.clone(),
            OptionDef {
                name: name.clone(),
                help: help.into(),
                abbreviation: None,
                default_value: default_value.into(),
                allowed_values: allowed_values.into_iter().map(Into::into).collect(),
            },
        );
        tracing::debug!(option = %name, "registered option");

        let Some(abbreviation) = abbreviation else {
            return Ok(());
        };
        self.ensure_abbreviation_free(&name, abbreviation)?;
        self.option_abbreviations.insert(abbreviation, name.clone());
        if let Some(def) = self.options.get_mut(&name) {
            def.abbreviation = Some(abbreviation);
        }
        Ok(())
    }

    /// Register a command.
    pub fn add_command(
        &mut self,
        name: impl Into<String>,
        help: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.commands.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        tracing::debug!(command = %name, "registered command");
        self.commands.insert(
            name.clone(),
            CommandDef {
                name,
                help: help.into(),
            },
        );
        Ok(())
    }

    /// Require the first token to be a command. Ignored while no commands are registered.
    pub fn set_command_required(&mut self, required: bool) {
        self.command_required = required;
    }

    pub fn display_mut(&mut self) -> &mut DisplayOptions {
        &mut self.display
    }

    /// Parse `tokens` (program name already stripped) against this registry.
    pub fn parse<I, S>(&self, tokens: I) -> Result<ParseResult, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        scanner::parse(self, tokens)
    }

    fn ensure_name_free(&self, name: &str) -> Result<(), RegistryError> {
        if self.flags.contains_key(name) || self.options.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    fn ensure_abbreviation_free(&self, name: &str, abbreviation: char) -> Result<(), RegistryError> {
        if self.flag_abbreviations.contains_key(&abbreviation)
            || self.option_abbreviations.contains_key(&abbreviation)
        {
            return Err(RegistryError::DuplicateAbbreviation {
                name: name.to_string(),
                abbreviation,
            });
        }
        Ok(())
    }
}

// Lookups.
impl Registry {
    /// Classify a long name. Flags win over options, options over commands.
    pub fn kind_of(&self, name: &str) -> ArgKind {
        if self.flags.contains_key(name) {
            ArgKind::Flag
        } else if self.options.contains_key(name) {
            ArgKind::Option
        } else if self.commands.contains_key(name) {
            ArgKind::Command
        } else {
            ArgKind::Unknown
        }
    }

    /// Resolve an abbreviation to the long name it is bound to.
    pub fn resolve_abbreviation(&self, abbreviation: char) -> Option<(ArgKind, &str)> {
        if let Some(name) = self.flag_abbreviations.get(&abbreviation) {
            return Some((ArgKind::Flag, name.as_str()));
        }
        self.option_abbreviations
            .get(&abbreviation)
            .map(|name| (ArgKind::Option, name.as_str()))
    }

    pub(crate) fn flag_by_abbreviation(&self, abbreviation: char) -> Option<&str> {
        self.flag_abbreviations.get(&abbreviation).map(String::as_str)
    }

    pub(crate) fn option_by_abbreviation(&self, abbreviation: char) -> Option<&str> {
        self.option_abbreviations
            .get(&abbreviation)
            .map(String::as_str)
    }

    /// Whether `value` may be assigned to `option`. Unknown options and
    /// options without an allowed set accept anything.
    pub fn is_allowed_value(&self, option: &str, value: &str) -> bool {
        self.options.get(option).is_none_or(|def| def.allows(value))
    }
}

// Read-only views for renderers.
impl Registry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn command_required(&self) -> bool {
        self.command_required
    }

    pub fn display(&self) -> &DisplayOptions {
        &self.display
    }

    pub fn flag(&self, name: &str) -> Option<&FlagDef> {
        self.flags.get(name)
    }

    pub fn option(&self, name: &str) -> Option<&OptionDef> {
        self.options.get(name)
    }

    pub fn command(&self, name: &str) -> Option<&CommandDef> {
        self.commands.get(name)
    }

    /// Flags in registration order.
    pub fn flags(&self) -> impl ExactSizeIterator<Item = &FlagDef> {
        self.flags.values()
    }

    /// Options in registration order.
    pub fn options(&self) -> impl ExactSizeIterator<Item = &OptionDef> {
        self.options.values()
    }

    /// Commands in registration order.
    pub fn commands(&self) -> impl ExactSizeIterator<Item = &CommandDef> {
        self.commands.values()
    }

    pub fn has_commands(&self) -> bool {
        !self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_values() -> [&'static str; 0] {
        []
    }

    #[test]
    fn duplicate_names_are_rejected_across_flags_and_options() {
        let mut reg = Registry::new("test", "");
        reg.add_flag("verbose", "first", Some('v')).unwrap();

        let err = reg.add_flag("verbose", "second", Some('x')).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("verbose".to_string()));
        let err = reg
            .add_option("verbose", "", None, "", no_values())
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("verbose".to_string()));

        // First registration untouched, rejected abbreviation never bound.
        assert_eq!(reg.flag("verbose").unwrap().help(), "first");
        assert_eq!(reg.flag("verbose").unwrap().abbreviation(), Some('v'));
        assert_eq!(reg.resolve_abbreviation('x'), None);
        assert_eq!(reg.kind_of("verbose"), ArgKind::Flag);
    }

    #[test]
    fn option_name_blocks_flag_name() {
        let mut reg = Registry::new("test", "");
        reg.add_option("output", "", Some('o'), "out.txt", no_values())
            .unwrap();
        let err = reg.add_flag("output", "", None).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(name) if name == "output"));
        assert_eq!(reg.kind_of("output"), ArgKind::Option);
        assert_eq!(reg.option("output").unwrap().default_value(), "out.txt");
    }

    #[test]
    fn abbreviation_collision_still_registers_long_name() {
        let mut reg = Registry::new("test", "");
        reg.add_flag("force", "", Some('f')).unwrap();

        let err = reg.add_flag("fast", "", Some('f')).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateAbbreviation {
                name: "fast".to_string(),
                abbreviation: 'f',
            }
        );
        assert_eq!(reg.kind_of("fast"), ArgKind::Flag);
        assert_eq!(reg.flag("fast").unwrap().abbreviation(), None);
        assert_eq!(reg.resolve_abbreviation('f'), Some((ArgKind::Flag, "force")));

        let err = reg
            .add_option("file", "", Some('f'), "", no_values())
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateAbbreviation { .. }));
        assert_eq!(reg.kind_of("file"), ArgKind::Option);
        assert_eq!(reg.option("file").unwrap().abbreviation(), None);
    }

    #[test]
    fn missing_abbreviation_never_collides() {
        let mut reg = Registry::new("test", "");
        reg.add_flag("one", "", None).unwrap();
        reg.add_flag("two", "", None).unwrap();
        reg.add_option("three", "", None, "", no_values()).unwrap();
        assert_eq!(reg.flags().len(), 2);
        assert_eq!(reg.options().len(), 1);
    }

    #[test]
    fn abbreviations_and_long_names_do_not_mix() {
        let mut reg = Registry::new("test", "");
        reg.add_flag("x", "", None).unwrap();
        reg.add_option("extra", "", Some('x'), "", no_values()).unwrap();
        assert_eq!(reg.kind_of("x"), ArgKind::Flag);
        assert_eq!(
            reg.resolve_abbreviation('x'),
            Some((ArgKind::Option, "extra"))
        );
    }

    #[test]
    fn commands_have_their_own_namespace() {
        let mut reg = Registry::new("test", "");
        reg.add_flag("build", "", None).unwrap();
        reg.add_command("build", "Build it").unwrap();
        reg.add_command("run", "").unwrap();

        let err = reg.add_command("build", "again").unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("build".to_string()));
        assert_eq!(reg.command("build").unwrap().help(), "Build it");
        assert_eq!(reg.kind_of("run"), ArgKind::Command);
        assert_eq!(reg.kind_of("nope"), ArgKind::Unknown);
    }

    #[test]
    fn allowed_values_check() {
        let mut reg = Registry::new("test", "");
        reg.add_option("level", "", None, "mid", ["low", "high", "low"])
            .unwrap();
        reg.add_option("free", "", None, "", no_values()).unwrap();

        let level = reg.option("level").unwrap();
        assert_eq!(level.allowed_values().collect::<Vec<_>>(), ["low", "high"]);
        assert!(reg.is_allowed_value("level", "high"));
        assert!(!reg.is_allowed_value("level", "mid"));
        assert!(reg.is_allowed_value("free", "anything at all"));
    }

    #[test]
    fn definitions_iterate_in_registration_order() {
        let mut reg = Registry::new("tool", "does things");
        for name in ["zeta", "alpha", "mu"] {
            reg.add_flag(name, "", None).unwrap();
        }
        let names: Vec<&str> = reg.flags().map(FlagDef::name).collect();
        assert_eq!(names, ["zeta", "alpha", "mu"]);
        assert_eq!(reg.name(), "tool");
        assert_eq!(reg.description(), "does things");
        assert_eq!(reg.display().flags_header, "FLAGS");
        assert!(!reg.command_required());
    }
}
