use thiserror::Error;

/// Registration failures. Raised by `Registry::add_*`, never while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate argument: {0}")]
    DuplicateName(String),

    /// The long name was registered; only the abbreviation binding was refused.
    #[error("duplicate argument: {abbreviation} (requested by '{name}')")]
    DuplicateAbbreviation { name: String, abbreviation: char },
}

/// Scan failures. The first one aborts the parse and no partial result is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid argument: \"{token}\" is not a command")]
    MissingCommand { token: String },

    #[error("unknown argument: {token}")]
    UnknownArgument { token: String },

    #[error("invalid argument: -{abbreviation} in \"{token}\" does not exist")]
    InvalidArgument { token: String, abbreviation: char },

    #[error("missing value: {token} (option '{option}')")]
    MissingValue { token: String, option: String },

    #[error("invalid value: {option} -> {value}")]
    InvalidValue { option: String, value: String },
}

impl ParseError {
    /// The input token that caused the failure.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::MissingCommand { token }
            | Self::UnknownArgument { token }
            | Self::InvalidArgument { token, .. }
            | Self::MissingValue { token, .. } => Some(token.as_str()),
            Self::InvalidValue { .. } => None,
        }
    }
}
