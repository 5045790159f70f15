//! Configuration management for `gitscrub-core`.
//!
//! This module defines the core data structures for scrub rules and rule-set
//! configurations. It handles serialization/deserialization of YAML rule
//! files and provides utilities for loading, merging, and validating them.
//!
//! Rule order is semantic: rules are applied to a blob in listed order, and
//! each rule runs over the output of the previous one. Loading and merging
//! therefore preserve order everywhere.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use regex::bytes::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Represents a single scrub rule applied to blob contents.
///
/// The pattern is a regular expression over bytes; the replacement is a
/// literal byte string (no capture expansion).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrubRule {
    /// Unique identifier for the rule (e.g., "aws_access_key_id_literal").
    pub name: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// The regex pattern string, matched against raw blob bytes.
    pub pattern: String,
    /// The literal bytes to replace matches with.
    pub replace_with: String,
    /// If true, the pattern matches with ASCII case folding.
    pub case_insensitive: bool,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
}

impl Default for ScrubRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern: String::new(),
            replace_with: "[SCRUBBED]".to_string(),
            case_insensitive: false,
            enabled: None,
        }
    }
}

/// Represents the top-level rule-set configuration for a scrub run.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
pub struct ScrubConfig {
    /// Scrub rules in application order.
    pub rules: Vec<ScrubRule>,
}

/// Represents a single item in the scrub summary reported per blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrubSummaryItem {
    pub rule_name: String,
    pub occurrences: usize,
    pub original_texts: Vec<Vec<u8>>,
    pub replacement: String,
}

impl ScrubConfig {
    /// Loads scrub rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule file {}", path.display()))?;
        let config: ScrubConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse rule file {}", path.display()))?;

        validate_rules(&config.rules)?;
        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// Loads the built-in credential scrub rules from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: ScrubConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default rules")?;

        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }

    /// Filters active rules based on enable/disable lists.
    ///
    /// Disabled rules are removed unless named in the enable list, in which
    /// case their `enabled` override is flipped on so the compiler picks them
    /// up. Relative order of the remaining rules is unchanged.
    pub fn set_active_rules(&mut self, enable_rules: &[String], disable_rules: &[String]) {
        let enable_set: HashSet<&str> = enable_rules.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();

        debug!("Initial rules count before filtering: {}", self.rules.len());

        let all_rule_names: HashSet<&str> = self.rules.iter().map(|r| r.name.as_str()).collect();

        for rule_name in enable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `enable_rules` list does not exist.", rule_name);
        }

        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable_rules` list does not exist.", rule_name);
        }

        self.rules.retain_mut(|rule| {
            let name = rule.name.as_str();
            if disable_set.contains(name) {
                return false;
            }
            if rule.enabled == Some(false) {
                if enable_set.contains(name) {
                    rule.enabled = Some(true);
                    return true;
                }
                return false;
            }
            true
        });

        debug!("Final active rules count after filtering: {}", self.rules.len());
    }
}

/// Merges user-defined rules with defaults, preserving application order.
///
/// Default rules keep their position; a user rule with the same name replaces
/// the default in place, and new user rules are appended after the defaults
/// in the order the user listed them.
pub fn merge_rules(default_config: ScrubConfig, user_config: Option<ScrubConfig>) -> ScrubConfig {
    debug!(
        "merge_rules called. Initial default rules count: {}",
        default_config.rules.len()
    );

    let mut final_rules = default_config.rules;

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user rules.", user_cfg.rules.len());
        for user_rule in user_cfg.rules {
            match final_rules.iter_mut().find(|r| r.name == user_rule.name) {
                Some(existing) => *existing = user_rule,
                None => final_rules.push(user_rule),
            }
        }
    }

    debug!("Final total rules after merge: {}", final_rules.len());

    ScrubConfig { rules: final_rules }
}

/// Validates rule integrity (names, pattern compilation, length caps).
pub fn validate_rules(rules: &[ScrubRule]) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.clone()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        if rule.pattern.is_empty() {
            errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
            continue;
        }

        if rule.pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                rule.name,
                rule.pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            continue;
        }

        if let Err(e) = RegexBuilder::new(&rule.pattern).unicode(false).build() {
            errors.push(format!(
                "Rule '{}' has an invalid byte-regex pattern: {}",
                rule.name, e
            ));
        }
    }

    if !errors.is_empty() {
        Err(anyhow!(format!(
            "Rule validation failed:\n{}",
            errors.join("\n")
        )))
    } else {
        Ok(())
    }
}
