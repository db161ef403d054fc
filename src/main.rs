//! Snap X11 windows into numbered zones spread across monitors in reading order

// monitor -> zone -> window

#![allow(unused)]
#![deny(
    clippy::all,
    clippy::complexity,
    clippy::correctness,
    clippy::nursery,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    absolute_paths_not_starting_with_crate,
    anonymous_parameters,
    bad_style,
    ellipsis_inclusive_range_patterns,
    exported_private_dependencies,
    ill_formed_attribute_input,
    improper_ctypes,
    keyword_idents,
    macro_use_extern_crate,
    meta_variable_misuse,
    missing_abi,
    no_mangle_generic_items,
    non_shorthand_field_patterns,
    noop_method_call,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    semicolon_in_expressions_from_macros,
    single_use_lifetimes,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unreachable_pub,
    unsafe_code,
    variant_size_differences,
    while_true
)]
#![allow(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cognitive_complexity,
    clippy::doc_markdown,
    clippy::exhaustive_enums,
    clippy::exhaustive_structs,
    clippy::implicit_return,
    clippy::indexing_slicing,
    clippy::integer_arithmetic,
    clippy::integer_division,
    clippy::missing_docs_in_private_items,
    clippy::module_name_repetitions,
    clippy::multiple_inherent_impl,
    clippy::print_stdout,
    clippy::redundant_pub_crate,
    clippy::similar_names,
    clippy::struct_excessive_bools,
    clippy::too_many_lines,
    clippy::upper_case_acronyms
)]
#![cfg_attr(
    any(test),
    allow(
        clippy::expect_fun_call,
        clippy::expect_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::unwrap_used,
        clippy::wildcard_enum_match_arm,
    )
)]

mod cli;
mod config;
mod dpi;
mod error;
mod geometry;
mod macros;
mod monitor;
mod rule;
mod utils;
mod x;
mod zone;

use anyhow::Result;
use clap::{crate_name, IntoApp, Parser};
use clap_generate::{
    generate,
    generators::{Bash, Elvish, Fish, PowerShell, Zsh},
};
use colored::Colorize;
use std::{io, str::FromStr};

use cli::{ColorWhen, Command, Opts};
use config::Config;
use error::Error;
use monitor::{order, Monitor};
use rule::Exclusions;
use x::{utils::XUtility, xconnection::XConnection};

fn main() -> Result<()> {
    let args = Opts::parse();

    if let Some(when) = args.color_when.as_deref() {
        match ColorWhen::from_str(when).unwrap_or(ColorWhen::Auto) {
            ColorWhen::Always => colored::control::set_override(true),
            ColorWhen::Never => colored::control::set_override(false),
            ColorWhen::Auto =>
                if !utils::wants_color() {
                    colored::control::set_override(false);
                },
        }
    }

    // Completions never need a config or an X connection
    if let Command::Completions { shell } = &args.cmd {
        print_completions(shell);
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    let _logger = utils::initialize_logging(&config, &args)?;

    log::debug!("{}: {:#?}", "Configuration options".bright_blue(), config);

    let (conn, screen_num) = XUtility::setup_connection()?;
    XUtility::check_randr(&conn)?;
    let xconn = XConnection::new(conn, screen_num)?;

    let monitors = order::order_monitors(xconn.monitors()?);

    match args.cmd {
        Command::List { json } => list_monitors(&monitors, json),
        Command::Zones { json } => list_zones(&monitors, &config, json),
        Command::Snap { zone, window } =>
            snap(&xconn, &config, &monitors, zone, window.as_deref()),
        Command::Completions { .. } => Ok(()),
    }
}

/// Write completions for the given shell to stdout
fn print_completions(shell: &str) {
    let mut app = Opts::into_app();

    match shell {
        "bash" => generate(Bash, &mut app, crate_name!(), &mut io::stdout()),
        "elvish" => generate(Elvish, &mut app, crate_name!(), &mut io::stdout()),
        "fish" => generate(Fish, &mut app, crate_name!(), &mut io::stdout()),
        "powershell" => generate(PowerShell, &mut app, crate_name!(), &mut io::stdout()),
        "zsh" => generate(Zsh, &mut app, crate_name!(), &mut io::stdout()),
        _ => crate::xzones_fatal!("completions are not supported for `{}`", shell),
    }
}

/// Print the monitors, already in reading order
fn list_monitors(monitors: &[Monitor], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(monitors)?);
        return Ok(());
    }

    for (ordinal, monitor) in monitors.iter().enumerate() {
        println!(
            "{}: {} ({}) {} dpi{}",
            ordinal.to_string().bold(),
            monitor.name.bright_blue(),
            monitor.rect,
            monitor.dpi,
            if monitor.primary { " [primary]" } else { "" },
        );
    }

    Ok(())
}

/// Print the numbered zones across all monitors
fn list_zones(monitors: &[Monitor], config: &Config, json: bool) -> Result<()> {
    let zones = zone::zone_table(monitors, &config.zones);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&zones.values().collect::<Vec<_>>())?
        );
        return Ok(());
    }

    for zone in zones.values() {
        println!(
            "{:>3}  {}  ({})",
            zone.index.to_string().bold(),
            monitors[zone.monitor].name.bright_blue(),
            zone.rect,
        );
    }

    Ok(())
}

/// Snap a window into the given zone, honoring the configured exclusions
fn snap(
    xconn: &XConnection,
    config: &Config,
    monitors: &[Monitor],
    zone_idx: usize,
    window: Option<&str>,
) -> Result<()> {
    let zones = zone::zone_table(monitors, &config.zones);
    let zone = zones
        .get(&zone_idx)
        .ok_or(Error::UnknownZone(zone_idx, zones.len()))?;

    let window = match window {
        Some(id) => cli::parse_window_id(id)?,
        None => xconn.active_window()?,
    };

    let exclusions = Exclusions::from_settings(&config.exclusions)?;
    let class = xconn.get_icccm_window_class(window);
    let instance = xconn.get_icccm_window_instance(window);
    let path_ok = xconn
        .process_path(window)
        .map_or(true, |path| exclusions.zonable_path(&path));

    if !xconn.must_zone_window(window) || !exclusions.zonable(&class, &instance) || !path_ok {
        crate::xzones_error!(
            "refusing to snap Window({:#0x}): `{}` is excluded",
            window,
            class
        );
        return Ok(());
    }

    log::debug!(
        "snapping Window({:#0x}) [{}] into zone {}",
        window,
        class,
        zone_idx
    );
    xconn.snap_window(window, zone.rect)
}
