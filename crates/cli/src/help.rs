//! Plain-text help for a registry, optionally colored.

use argscan::{Color, CommandDef, FlagDef, OptionDef, Registry};
use colored::Colorize;

const ENTRY_INDENT: &str = "    ";
const HELP_INDENT: &str = "        ";

/// Render help for `registry`.
///
/// Colors are applied only when the registry's display options enable them;
/// whether escape codes are actually emitted is up to `colored`'s global
/// override (see `--color`).
pub fn render(registry: &Registry) -> String {
    let display = registry.display();
    let painter = Painter {
        enabled: display.colors,
    };
    let palette = &display.palette;

    let mut out = String::new();
    render_title(&mut out, registry, &painter);

    if registry.has_commands() {
        push_header(&mut out, &display.commands_header, palette.header, &painter);
        for cmd in registry.commands() {
            render_command(&mut out, cmd, registry, &painter);
        }
    }

    if registry.flags().len() != 0 {
        push_header(&mut out, &display.flags_header, palette.header, &painter);
        for flag in registry.flags() {
            render_flag(&mut out, flag, registry, &painter);
        }
    }

    if registry.options().len() != 0 {
        push_header(&mut out, &display.options_header, palette.header, &painter);
        for option in registry.options() {
            render_option(&mut out, option, registry, &painter);
        }
    }

    out
}

struct Painter {
    enabled: bool,
}

impl Painter {
    fn paint(&self, text: &str, color: Color) -> String {
        match (self.enabled, to_colored(color)) {
            (true, Some(c)) => text.color(c).to_string(),
            _ => text.to_string(),
        }
    }
}

fn to_colored(color: Color) -> Option<colored::Color> {
    let c = match color {
        Color::Default => return None,
        Color::Black => colored::Color::Black,
        Color::Red => colored::Color::Red,
        Color::Green => colored::Color::Green,
        Color::Yellow => colored::Color::Yellow,
        Color::Blue => colored::Color::Blue,
        Color::Magenta => colored::Color::Magenta,
        Color::Cyan => colored::Color::Cyan,
        Color::White => colored::Color::White,
    };
    Some(c)
}

fn render_title(out: &mut String, registry: &Registry, painter: &Painter) {
    let palette = &registry.display().palette;
    let name = registry.name();
    out.push_str(&painter.paint(name, palette.title));

    let description = registry.description().trim_end();
    if !description.is_empty() {
        // Continuation lines line up under the first description line.
        let indent = " ".repeat(name.chars().count() + 3);
        let mut text = String::from(" - ");
        for (i, line) in description.lines().enumerate() {
            if i > 0 {
                text.push('\n');
                text.push_str(&indent);
            }
            text.push_str(line);
        }
        out.push_str(&painter.paint(&text, palette.description));
    }
    out.push_str("\n\n");
}

fn push_header(out: &mut String, header: &str, color: Color, painter: &Painter) {
    if header.is_empty() {
        return;
    }
    out.push_str(&painter.paint(header, color));
    out.push('\n');
}

fn push_help(out: &mut String, help: &str, color: Color, painter: &Painter) {
    for line in help.trim_end().lines() {
        out.push_str(HELP_INDENT);
        out.push_str(&painter.paint(line, color));
        out.push('\n');
    }
    out.push('\n');
}

fn render_command(out: &mut String, cmd: &CommandDef, registry: &Registry, painter: &Painter) {
    let palette = &registry.display().palette;
    out.push_str(ENTRY_INDENT);
    out.push_str(&painter.paint(cmd.name(), palette.command));
    out.push('\n');
    push_help(out, cmd.help(), palette.command_description, painter);
}

fn render_flag(out: &mut String, flag: &FlagDef, registry: &Registry, painter: &Painter) {
    let palette = &registry.display().palette;
    let mut left = format!("--{}", flag.name());
    if let Some(abbreviation) = flag.abbreviation() {
        left.push_str(&format!(", -{abbreviation}"));
    }
    out.push_str(ENTRY_INDENT);
    out.push_str(&painter.paint(&left, palette.flag));
    out.push('\n');
    push_help(out, flag.help(), palette.flag_description, painter);
}

fn render_option(out: &mut String, option: &OptionDef, registry: &Registry, painter: &Painter) {
    let palette = &registry.display().palette;
    let mut left = format!("--{}", option.name());
    if let Some(abbreviation) = option.abbreviation() {
        left.push_str(&format!(", -{abbreviation}"));
    }
    out.push_str(ENTRY_INDENT);
    out.push_str(&painter.paint(&left, palette.option));

    if option.allowed_values().len() != 0 {
        let allowed: Vec<&str> = option.allowed_values().collect();
        out.push(' ');
        out.push_str(&painter.paint(&allowed.join("|"), palette.option_allowed));
    }
    if !option.default_value().is_empty() {
        out.push_str(&format!(" [default: {}]", option.default_value()));
    }
    out.push('\n');
    push_help(out, option.help(), palette.option_description, painter);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        let mut reg = Registry::new("tool", "Does things\nwith style");
        reg.add_command("run", "Run it").unwrap();
        reg.add_flag("verbose", "Print more\nand more", Some('v'))
            .unwrap();
        reg.add_flag("dry-run", "", None).unwrap();
        reg.add_option("format", "Output format", Some('f'), "text", ["text", "json"])
            .unwrap();
        reg.add_option("name", "", None, "", Vec::<String>::new())
            .unwrap();
        reg
    }

    #[test]
    fn renders_every_section_in_order() {
        let text = render(&registry());
        let expected = "\
tool - Does things
       with style

COMMANDS
    run
        Run it

FLAGS
    --verbose, -v
        Print more
        and more

    --dry-run

OPTIONS
    --format, -f text|json [default: text]
        Output format

    --name

";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_sections_and_headers_are_skipped() {
        let mut reg = Registry::new("bare", "");
        reg.add_flag("quiet", "Say less", Some('q')).unwrap();
        reg.display_mut().flags_header = String::new();

        let text = render(&reg);
        assert_eq!(text, "bare\n\n    --quiet, -q\n        Say less\n\n");
        assert!(!text.contains("COMMANDS"));
        assert!(!text.contains("OPTIONS"));
    }

    #[test]
    fn default_color_is_never_painted() {
        let painter = Painter { enabled: true };
        assert_eq!(painter.paint("plain", Color::Default), "plain");
        let painter = Painter { enabled: false };
        assert_eq!(painter.paint("plain", Color::Red), "plain");
    }
}
