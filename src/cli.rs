//! The command line arguments

use crate::utils::wants_color;
use anyhow::{Context, Result};
use clap::{crate_description, crate_version, AppSettings, Parser, Subcommand, ValueHint};
use once_cell::sync::Lazy;
use std::{fs, path::PathBuf};
use strum_macros::{Display, EnumString};
use x11rb::protocol::xproto::Window;

/// Options for the [`xzones`] program
#[derive(Parser, Clone, Debug, PartialEq)]
#[clap(
    version = crate_version!(),
    about = <String as AsRef<str>>::as_ref(&APP_ABOUT),
    after_help = <String as AsRef<str>>::as_ref(&AFTER_HELP),
    override_usage = <String as AsRef<str>>::as_ref(&OVERRIDE_HELP),
    max_term_width = 100,
    color = clap::ColorChoice::Auto,
    global_setting = AppSettings::DeriveDisplayOrder,
    disable_help_subcommand = true,
    hide_possible_values = true,
    infer_subcommands = true,
)]
pub(crate) struct Opts {
    /// Display debugging messages on various levels
    #[clap(
        long,
        short,
        global = true,
        parse(from_occurrences),
        long_help = "\
        Set the verbosity level of the program. There are 2 extra levels after the default (INFO). \
                     If `-v` is used, DEBUG messages are displayed, and if `-vv` is used TRACE \
                     messages are displayed. The verbosity can also be set with the `XZONES_LOG` \
                     environment variable"
    )]
    pub(crate) verbose: u8,

    /// Location of configuration file
    #[clap(
        long,
        short,
        takes_value = true,
        number_of_values = 1,
        value_name = "file",
        value_hint = ValueHint::FilePath,
        validator = |t| {
            fs::metadata(t)
                .map(|_| ())
                .map_err(|_| String::from("must be a valid path"))
        },
        long_help = "\
        Specify the location of the configuration file. The default location is \
                `$XDG_CONFIG_HOME/xzones/xzones.yml`"
    )]
    pub(crate) config: Option<PathBuf>,

    /// When to colorize output
    #[clap(
        name = "color",
        long = "color",
        short = 'C',
        value_name = "when",
        possible_values = &["never", "auto", "always"],
        long_help = "\
        When to colorize output (usually meant for piping). Valid values are: always, \
                auto, never."
    )]
    pub(crate) color_when: Option<String>,

    /// Subcommand to run
    #[clap(subcommand)]
    pub(crate) cmd: Command,
}

/// Operations on the ordered monitors and their zones
#[derive(Subcommand, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    /// Print the monitors in reading order
    List {
        /// Print as JSON instead of a table
        #[clap(long)]
        json: bool,
    },

    /// Print the numbered zones across all monitors
    Zones {
        /// Print as JSON instead of a table
        #[clap(long)]
        json: bool,
    },

    /// Snap a window into a zone
    Snap {
        /// 1-based zone index, as shown by `xzones zones`
        zone: usize,

        /// Target window ID; defaults to the active window
        #[clap(
            long,
            short,
            value_name = "id",
            long_help = "\
            The X11 ID of the window to snap, in decimal or `0x`-prefixed hex as printed \
                        by tools like `xwininfo` and `wmctrl`. When omitted, the window \
                        currently holding input focus is used"
        )]
        window: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[clap(possible_values = &["bash", "elvish", "fish", "powershell", "zsh"])]
        shell: String,
    },
}

/// When to colorize user-facing output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ColorWhen {
    /// Never colorize
    Never,
    /// Colorize unless `NO_COLOR` is set
    Auto,
    /// Always colorize
    Always,
}

/// Parse a window ID given in decimal or `0x`-prefixed hex
pub(crate) fn parse_window_id(id: &str) -> Result<Window> {
    id.strip_prefix("0x").map_or_else(
        || {
            id.parse::<Window>()
                .context(format!("`{}` is not a valid window ID", id))
        },
        |hex| {
            Window::from_str_radix(hex, 16)
                .context(format!("`{}` is not a valid window ID", id))
        },
    )
}

// =============== Prettify Help ==================

/// Yellow ansi code
const YELLOW: &str = "\x1b[0;33m";
/// Green ansi code
const GREEN: &str = "\x1b[0;32m";
/// Bold-red ansi code
const BRED: &str = "\x1b[01;38;5;1m";
/// Reset colors
const RES: &str = "\x1b[0m";

/// Colored description used in the output of `--help`
pub(crate) static APP_ABOUT: Lazy<String> = Lazy::new(|| {
    wants_color()
        .then(|| {
            format!(
                "{}DESCRIPTION: {}{}{}",
                YELLOW,
                GREEN,
                crate_description!(),
                RES
            )
        })
        .unwrap_or_else(|| crate_description!().to_owned())
});

/// Colorized message to override the generated help message
pub(crate) static OVERRIDE_HELP: Lazy<String> = Lazy::new(|| {
    wants_color()
        .then(|| {
            format!(
                "{}xzones{} [{}FLAGS{}/{}OPTIONS{}] <{}SUBCOMMAND{}>",
                BRED, RES, GREEN, RES, GREEN, RES, GREEN, RES
            )
        })
        .unwrap_or_else(|| String::from("xzones [FLAGS/OPTIONS] <SUBCOMMAND>"))
});

/// Colorized message displayed after the help message
pub(crate) static AFTER_HELP: Lazy<String> = Lazy::new(|| {
    wants_color()
        .then(|| {
            format!(
                "See {}xzones{} {}--help{} for longer explanations of some options.",
                BRED, RES, GREEN, RES
            )
        })
        .unwrap_or_else(|| {
            String::from("See xzones --help for longer explanations of some options.")
        })
});

#[cfg(test)]
mod tests {
    use super::{parse_window_id, ColorWhen};
    use std::str::FromStr;

    #[test]
    fn window_ids_parse_in_both_bases() {
        assert_eq!(parse_window_id("27262979").ok(), Some(0x1a0_0003));
        assert_eq!(parse_window_id("0x1a00003").ok(), Some(0x1a0_0003));
    }

    #[test]
    fn bad_window_ids_are_rejected() {
        assert!(parse_window_id("wininfo").is_err());
        assert!(parse_window_id("0xzz").is_err());
        assert!(parse_window_id("").is_err());
    }

    #[test]
    fn color_when_parses_lowercase_names() {
        assert_eq!(ColorWhen::from_str("always").ok(), Some(ColorWhen::Always));
        assert_eq!(ColorWhen::Auto.to_string(), "auto");
    }
}
