//! Declarative command-line argument registry and token scanner.
//!
//! Declare flags, options and commands on a [`Registry`], then hand it a token
//! sequence (program name already stripped):
//!
//! ```
//! use argscan::Registry;
//!
//! let mut reg = Registry::new("demo", "An example tool");
//! reg.add_flag("verbose", "Print more", Some('v')).unwrap();
//! reg.add_option("format", "Output format", Some('f'), "text", ["text", "json"]).unwrap();
//! reg.add_command("run", "Run the thing").unwrap();
//!
//! let result = reg.parse(["run", "-v", "--format=json", "input.txt"]).unwrap();
//! assert_eq!(result.command(), Some("run"));
//! assert!(result.flag("verbose"));
//! assert_eq!(result.option("format"), Some("json"));
//! assert_eq!(result.positional(), ["input.txt"]);
//! ```
//!
//! Supported token shapes:
//! - `-v`, `-vq` (flag runs), `-o value`, `-ovalue`, `-o=value`, `-vqo=value`
//! - `--flag`, `--option value`, `--option=value`
//! - a registered command as the very first token
//! - `--` to make every following token positional
//!
//! The crate performs no output. Help renderers read definitions through the
//! registry accessors and [`DisplayOptions`].

pub mod display;
pub mod error;
pub mod registry;
pub mod result;
pub mod scanner;

pub use display::{Color, DisplayOptions, Palette};
pub use error::{ParseError, RegistryError};
pub use registry::{ArgKind, CommandDef, FlagDef, OptionDef, Registry};
pub use result::ParseResult;
pub use scanner::parse;
