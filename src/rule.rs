//! App-exclusion rules deciding which windows may be zoned

use crate::config::ExclusionSettings;
use anyhow::{Context, Result};
use itertools::Itertools;
use regex::RegexSet;
use std::path::Path;
use which::which;

// ============================ Exclusions ============================
// ====================================================================

/// Compiled form of the user's exclusion rules.
///
/// Name matching is case-insensitive and substring-based on both halves of
/// `WM_CLASS`, so `firefox` excludes `Firefox` and `firefox-esr` alike.
/// Binaries are resolved to absolute paths up front and matched against the
/// path of the process backing the window
#[derive(Debug)]
pub(crate) struct Exclusions {
    /// App names matched against class/instance, stored uppercased
    names:    Vec<String>,
    /// Binary paths matched against the window's process path, uppercased
    binaries: Vec<String>,
    /// User regexes matched against class and instance
    patterns: RegexSet,
}

impl Exclusions {
    /// Compile the configured exclusion rules
    pub(crate) fn from_settings(settings: &ExclusionSettings) -> Result<Self> {
        log::debug!(
            "compiling exclusions: classes: [{}], binaries: [{}], patterns: [{}]",
            settings.classes.iter().join(", "),
            settings.binaries.iter().join(", "),
            settings.patterns.iter().join(", "),
        );

        let patterns = RegexSet::new(settings.patterns.iter().map(|p| format!("(?i){}", p)))
            .context("failed to compile exclusion patterns")?;

        Ok(Self {
            names: settings.classes.iter().map(|c| c.to_uppercase()).collect(),
            binaries: settings
                .binaries
                .iter()
                .map(|b| {
                    which(b).map_or_else(
                        |_| b.to_uppercase(),
                        |path| path.to_string_lossy().to_uppercase(),
                    )
                })
                .collect(),
            patterns,
        })
    }

    /// Would the app named by `class`/`instance` ever be placed in a zone?
    pub(crate) fn zonable(&self, class: &str, instance: &str) -> bool {
        let class_uc = class.to_uppercase();
        let instance_uc = instance.to_uppercase();

        let by_name = self
            .names
            .iter()
            .any(|name| class_uc.contains(name) || instance_uc.contains(name));
        let by_pattern = self.patterns.is_match(class) || self.patterns.is_match(instance);

        !by_name && !by_pattern
    }

    /// Check the path of the process backing a window against the excluded
    /// binaries
    pub(crate) fn zonable_path(&self, path: &Path) -> bool {
        let path_uc = path.to_string_lossy().to_uppercase();
        !self.binaries.iter().any(|binary| path_uc.contains(binary))
    }
}

#[cfg(test)]
mod tests {
    use super::{Exclusions, ExclusionSettings};
    use std::path::Path;

    /// Compile [`Exclusions`] from plain string lists
    fn exclusions(classes: &[&str], binaries: &[&str], patterns: &[&str]) -> Exclusions {
        Exclusions::from_settings(&ExclusionSettings {
            classes:  classes.iter().map(ToString::to_string).collect(),
            binaries: binaries.iter().map(ToString::to_string).collect(),
            patterns: patterns.iter().map(ToString::to_string).collect(),
        })
        .expect("exclusions failed to compile")
    }

    #[test]
    fn empty_rules_zone_everything() {
        let rules = exclusions(&[], &[], &[]);

        assert!(rules.zonable("Firefox", "Navigator"));
        assert!(rules.zonable_path(Path::new("/usr/bin/firefox")));
    }

    #[test]
    fn name_matching_ignores_case() {
        let rules = exclusions(&["firefox"], &[], &[]);

        assert!(!rules.zonable("Firefox", "Navigator"));
        assert!(!rules.zonable("FIREFOX-ESR", "Navigator"));
        assert!(rules.zonable("Alacritty", "Alacritty"));
    }

    #[test]
    fn instance_half_is_matched_too() {
        let rules = exclusions(&["navigator"], &[], &[]);

        assert!(!rules.zonable("Firefox", "Navigator"));
    }

    #[test]
    fn patterns_match_either_half() {
        let rules = exclusions(&[], &[], &["^steam_app_[0-9]+$"]);

        assert!(!rules.zonable("steam_app_440", "steam_app_440"));
        assert!(!rules.zonable("Steam_App_22330", "wine"));
        assert!(rules.zonable("steam", "steam"));
    }

    #[test]
    fn unresolvable_binaries_fall_back_to_substring() {
        // `no-such-binary-xyzzy` will not be on any PATH, so the raw name is
        // matched against the process path instead
        let rules = exclusions(&[], &["no-such-binary-xyzzy"], &[]);

        assert!(!rules.zonable_path(Path::new("/opt/no-such-binary-xyzzy/run")));
        assert!(rules.zonable_path(Path::new("/usr/bin/firefox")));
    }

    #[test]
    fn bad_patterns_are_reported() {
        let result = Exclusions::from_settings(&ExclusionSettings {
            classes:  vec![],
            binaries: vec![],
            patterns: vec![String::from("(unclosed")],
        });

        assert!(result.is_err());
    }
}
