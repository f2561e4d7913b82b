use anyhow::{Context, Result, bail};
use argscan::{DisplayOptions, Registry, RegistryError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MANIFEST_NAME: &str = "argscan.json";

/// JSON description of a registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default)]
    pub command_required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayOptions>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<FlagEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
    /// Single character, e.g. `"v"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
}

/// A registry plus every registration error hit while building it.
///
/// A rejected abbreviation still leaves its long name registered, so the
/// registry is usable even when `problems` is non-empty.
#[derive(Debug)]
pub struct BuiltRegistry {
    pub registry: Registry,
    pub problems: Vec<RegistryError>,
}

impl Manifest {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse manifest JSON: {}", path.display()))
    }

    /// Register every entry in declaration order, collecting registration errors.
    pub fn build_registry(&self) -> Result<BuiltRegistry> {
        let mut registry = Registry::new(&self.name, &self.description);
        registry.set_command_required(self.command_required);
        if let Some(display) = &self.display {
            *registry.display_mut() = display.clone();
        }

        let mut problems = Vec::new();
        for flag in &self.flags {
            let abbreviation = parse_abbreviation(flag.abbreviation.as_deref(), &flag.name)?;
            if let Err(e) = registry.add_flag(&flag.name, &flag.help, abbreviation) {
                problems.push(e);
            }
        }
        for option in &self.options {
            let abbreviation = parse_abbreviation(option.abbreviation.as_deref(), &option.name)?;
            if let Err(e) = registry.add_option(
                &option.name,
                &option.help,
                abbreviation,
                &option.default,
                &option.allowed,
            ) {
                problems.push(e);
            }
        }
        for command in &self.commands {
            if let Err(e) = registry.add_command(&command.name, &command.help) {
                problems.push(e);
            }
        }

        if !problems.is_empty() {
            tracing::debug!(count = problems.len(), "manifest has registration problems");
        }
        Ok(BuiltRegistry { registry, problems })
    }

    /// Like [`Manifest::build_registry`], but any registration error is fatal.
    pub fn strict_registry(&self) -> Result<Registry> {
        let built = self.build_registry()?;
        if !built.problems.is_empty() {
            let msgs: Vec<String> = built.problems.iter().map(ToString::to_string).collect();
            bail!("invalid manifest: {}", msgs.join("; "));
        }
        Ok(built.registry)
    }
}

fn parse_abbreviation(raw: Option<&str>, owner: &str) -> Result<Option<char>> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Some(c)),
        _ => bail!("abbreviation for '{owner}' must be a single character, got '{raw}'"),
    }
}

pub fn write_default_manifest(project_dir: &Path, name: &str, overwrite: bool) -> Result<PathBuf> {
    let dest = project_dir.join(DEFAULT_MANIFEST_NAME);
    if dest.exists() && !overwrite {
        bail!("{} already exists (use --force to overwrite)", dest.display());
    }

    let manifest = Manifest {
        schema_version: Some(1),
        name: name.to_string(),
        description: "Describe your tool here".to_string(),
        command_required: false,
        display: None,
        flags: vec![FlagEntry {
            name: "verbose".to_string(),
            help: "Print more output".to_string(),
            abbreviation: Some("v".to_string()),
        }],
        options: vec![OptionEntry {
            name: "format".to_string(),
            help: "Output format".to_string(),
            abbreviation: Some("f".to_string()),
            default: "text".to_string(),
            allowed: vec!["text".to_string(), "json".to_string()],
        }],
        commands: vec![CommandEntry {
            name: "run".to_string(),
            help: "Run the tool".to_string(),
        }],
    };

    let bytes = serde_json::to_vec_pretty(&manifest).context("failed to serialize manifest")?;
    let mut out = String::from_utf8(bytes).context("manifest is not valid UTF-8")?;
    out.push('\n');

    let tmp = dest.with_extension("tmp");
    fs::write(&tmp, out.as_bytes())
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    if overwrite && dest.exists() {
        fs::remove_file(&dest).with_context(|| format!("failed to remove {}", dest.display()))?;
    }
    fs::rename(&tmp, &dest)
        .with_context(|| format!("failed to move {} into place", dest.display()))?;
    Ok(dest)
}

/// Project name for `init`: the directory name, falling back to the cwd name.
pub fn guess_project_name(project_dir: &Path) -> Option<String> {
    let file_name = project_dir.file_name().and_then(|s| s.to_str());
    let direct = file_name.filter(|s| !s.is_empty() && *s != "." && *s != "..");
    if let Some(name) = direct {
        return Some(name.to_string());
    }

    let cwd = std::env::current_dir().ok()?;
    cwd.file_name()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .map(|s| s.to_string())
}
