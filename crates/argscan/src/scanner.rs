//! Left-to-right token scanner.
//!
//! Each token is classified once by its shape and consumed together with at
//! most one following token. There is no backtracking.

use crate::error::ParseError;
use crate::registry::{ArgKind, Registry};
use crate::result::ParseResult;

/// Parse `tokens` (program name already stripped) against `registry`.
///
/// Fails on the first malformed token; no partial result is returned.
pub fn parse<I, S>(registry: &Registry, tokens: I) -> Result<ParseResult, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let owned: Vec<S> = tokens.into_iter().collect();
    let tokens: Vec<&str> = owned.iter().map(AsRef::as_ref).collect();
    let result = Scanner::new(registry, &tokens).run()?;
    tracing::debug!(
        command = ?result.command(),
        positional = result.positional().len(),
        "parsed {} token(s)",
        tokens.len()
    );
    Ok(result)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenShape<'t> {
    /// `--`
    Terminator,
    /// `-x`
    Short(char),
    /// Everything after the dash of `-xyz`, `-x=value`, `-abc=value`, `-ovalue`.
    Cluster(&'t str),
    /// Everything after the dashes of `--name` or `--name=value`.
    Long(&'t str),
    Positional,
}

fn classify(token: &str) -> TokenShape<'_> {
    if token == "--" {
        return TokenShape::Terminator;
    }
    if let Some(body) = token.strip_prefix("--") {
        return TokenShape::Long(body);
    }
    let Some(body) = token.strip_prefix('-') else {
        return TokenShape::Positional;
    };
    let mut chars = body.chars();
    match (chars.next(), chars.next()) {
        (None, _) => TokenShape::Positional,
        (Some(c), None) => TokenShape::Short(c),
        (Some(_), Some(_)) => TokenShape::Cluster(body),
    }
}

enum Step {
    Advance(usize),
    Finish,
}

struct Scanner<'r, 't> {
    registry: &'r Registry,
    tokens: &'t [&'t str],
    result: ParseResult,
}

impl<'r, 't> Scanner<'r, 't> {
    fn new(registry: &'r Registry, tokens: &'t [&'t str]) -> Self {
        Self {
            registry,
            tokens,
            result: ParseResult::seeded(registry),
        }
    }

    fn run(mut self) -> Result<ParseResult, ParseError> {
        let registry = self.registry;
        let mut cursor = 0usize;
        let mut command_checked = !registry.has_commands();

        while let Some(&token) = self.tokens.get(cursor) {
            // Only the very first token may select a command.
            if !command_checked && cursor == 0 {
                command_checked = true;
                if registry.command(token).is_some() {
                    tracing::trace!(token, "selected command");
                    self.result.set_command(token);
                    cursor += 1;
                    continue;
                }
                if registry.command_required() {
                    return Err(ParseError::MissingCommand {
                        token: token.to_string(),
                    });
                }
            }

            match self.step(cursor, token)? {
                Step::Advance(n) => cursor += n,
                Step::Finish => break,
            }
        }

        Ok(self.result)
    }

    fn step(&mut self, cursor: usize, token: &'t str) -> Result<Step, ParseError> {
        let shape = classify(token);
        tracing::trace!(token, ?shape, "classified token");

        let tokens = self.tokens;
        let next = tokens.get(cursor + 1).copied();
        match shape {
            TokenShape::Terminator => {
                for &rest in tokens.iter().skip(cursor + 1) {
                    self.result.push_positional(rest);
                }
                Ok(Step::Finish)
            }
            TokenShape::Short(abbreviation) => self.short(token, abbreviation, next),
            TokenShape::Cluster(body) => {
                self.cluster(token, body)?;
                Ok(Step::Advance(1))
            }
            TokenShape::Long(body) => self.long(token, body, next),
            TokenShape::Positional => {
                self.result.push_positional(token);
                Ok(Step::Advance(1))
            }
        }
    }

    /// `-x`, with the option value (if any) in the next token.
    fn short(
        &mut self,
        token: &str,
        abbreviation: char,
        next: Option<&str>,
    ) -> Result<Step, ParseError> {
        let registry = self.registry;
        if let Some(flag) = registry.flag_by_abbreviation(abbreviation) {
            self.result.set_flag(flag);
            return Ok(Step::Advance(1));
        }
        match registry.option_by_abbreviation(abbreviation) {
            Some(option) => self.take_next_value(token, option, next),
            None => Err(invalid_argument(token, abbreviation)),
        }
    }

    /// `-abc`, `-ovalue`, `-o=value` and `-abo=value`.
    fn cluster(&mut self, token: &str, body: &str) -> Result<(), ParseError> {
        let registry = self.registry;

        if let Some((head, value)) = body.split_once('=') {
            // The last character before `=` names the option; anything in
            // front of it is a run of flags.
            let mut head = head.chars();
            let Some(option_abbreviation) = head.next_back() else {
                return Err(invalid_argument(token, '='));
            };
            for abbreviation in head {
                let flag = registry
                    .flag_by_abbreviation(abbreviation)
                    .ok_or_else(|| invalid_argument(token, abbreviation))?;
                self.result.set_flag(flag);
            }
            let option = registry
                .option_by_abbreviation(option_abbreviation)
                .ok_or_else(|| invalid_argument(token, option_abbreviation))?;
            if value.is_empty() {
                return Err(missing_value(token, option));
            }
            return self.assign(option, value);
        }

        let mut chars = body.chars();
        if let Some(option) = chars
            .next()
            .and_then(|first| registry.option_by_abbreviation(first))
        {
            // Attached value: allowed values are deliberately not enforced here.
            self.result.set_option(option, chars.as_str());
            return Ok(());
        }

        for abbreviation in body.chars() {
            let flag = registry
                .flag_by_abbreviation(abbreviation)
                .ok_or_else(|| invalid_argument(token, abbreviation))?;
            self.result.set_flag(flag);
        }
        Ok(())
    }

    /// `--name` or `--name=value`.
    fn long(&mut self, token: &str, body: &str, next: Option<&str>) -> Result<Step, ParseError> {
        let registry = self.registry;

        if let Some((name, value)) = body.split_once('=') {
            let Some(option) = registry.option(name) else {
                return Err(unknown_argument(token));
            };
            if value.is_empty() {
                return Err(missing_value(token, option.name()));
            }
            self.assign(option.name(), value)?;
            return Ok(Step::Advance(1));
        }

        match registry.kind_of(body) {
            ArgKind::Flag => {
                self.result.set_flag(body);
                Ok(Step::Advance(1))
            }
            ArgKind::Option => self.take_next_value(token, body, next),
            ArgKind::Command | ArgKind::Unknown => Err(unknown_argument(token)),
        }
    }

    /// Consume the following token as the value of `option`.
    ///
    /// An empty token is taken verbatim; a dash-prefixed one is refused.
    fn take_next_value(
        &mut self,
        token: &str,
        option: &str,
        next: Option<&str>,
    ) -> Result<Step, ParseError> {
        match next {
            Some("") => self.result.set_option(option, ""),
            Some(value) if !value.starts_with('-') => self.assign(option, value)?,
            _ => return Err(missing_value(token, option)),
        }
        Ok(Step::Advance(2))
    }

    fn assign(&mut self, option: &str, value: &str) -> Result<(), ParseError> {
        if !self.registry.is_allowed_value(option, value) {
            return Err(ParseError::InvalidValue {
                option: option.to_string(),
                value: value.to_string(),
            });
        }
        self.result.set_option(option, value);
        Ok(())
    }
}

fn invalid_argument(token: &str, abbreviation: char) -> ParseError {
    ParseError::InvalidArgument {
        token: token.to_string(),
        abbreviation,
    }
}

fn unknown_argument(token: &str) -> ParseError {
    ParseError::UnknownArgument {
        token: token.to_string(),
    }
}

fn missing_value(token: &str, option: &str) -> ParseError {
    ParseError::MissingValue {
        token: token.to_string(),
        option: option.to_string(),
    }
}
