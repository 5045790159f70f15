//! compiler.rs - Manages the compilation and caching of scrub rules.
//!
//! This module provides a thread-safe, cached mechanism to convert a
//! `ScrubConfig` into `CompiledRules`, which are optimized for efficient
//! application to blob byte buffers. It uses a global, shared cache to avoid
//! redundant compilation when the same rule set is used across many blobs.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use lazy_static::lazy_static;
use log::debug;
use regex::bytes::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{ScrubConfig, ScrubRule, MAX_PATTERN_LENGTH};
use crate::errors::ScrubError;

/// Represents a single compiled scrub rule.
///
/// Holds a compiled byte-oriented regular expression along with the literal
/// replacement bytes and the rule name, ready for application to a blob.
#[derive(Debug)]
pub struct CompiledRule {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The literal bytes to replace matches of this rule's pattern with.
    pub replace_with: Vec<u8>,
    /// The unique name of the scrub rule.
    pub name: String,
}

/// Represents the full ordered set of compiled rules for a scrub run.
///
/// Rules appear in application order; each rule operates on the output of the
/// previous one.
#[derive(Debug)]
pub struct CompiledRules {
    /// Compiled rules in application order.
    pub rules: Vec<CompiledRule>,
}

lazy_static! {
    /// A thread-safe, global cache for compiled rules.
    /// The key is a hash of the `ScrubConfig`.
    static ref COMPILED_RULES_CACHE: RwLock<HashMap<u64, Arc<CompiledRules>>> =
        RwLock::new(HashMap::new());
}

/// Hashes the `ScrubConfig` to create a stable, unique key for the cache.
///
/// Rules are hashed in listed order: two configs with the same rules in a
/// different order are different rule sets and must not share a cache entry.
fn hash_config(config: &ScrubConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.rules.hash(&mut hasher);
    hasher.finish()
}

/// Compiles a list of `ScrubRule`s into `CompiledRules` for efficient matching.
/// This is the low-level function that performs the actual regex compilation.
///
/// Patterns are compiled in byte mode with Unicode disabled, so character
/// classes and case folding are ASCII-only and any byte content can be
/// matched without UTF-8 validity requirements. Disabled rules are skipped.
pub fn compile_rules(rules_to_compile: Vec<ScrubRule>) -> Result<CompiledRules, ScrubError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::new();
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        if rule.enabled == Some(false) {
            debug!("Skipping disabled rule '{}'.", &rule.name);
            continue;
        }

        debug!(
            "Attempting to compile rule: '{}' with pattern '{:?}'",
            &rule.name, &rule.pattern
        );

        if rule.pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(ScrubError::PatternLengthExceeded(
                rule.name,
                rule.pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let regex_result = RegexBuilder::new(&rule.pattern)
            .unicode(false)
            .case_insensitive(rule.case_insensitive)
            .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
            .build();

        match regex_result {
            Ok(regex) => {
                log::debug!(
                    target: "gitscrub_core::sanitizer",
                    "Rule '{}' compiled successfully.",
                    &rule.name
                );
                compiled_rules.push(CompiledRule {
                    regex,
                    replace_with: rule.replace_with.into_bytes(),
                    name: rule.name,
                });
            }
            Err(e) => {
                compilation_errors.push(ScrubError::RuleCompilationError(rule.name, e));
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(ScrubError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    } else {
        debug!(
            "Finished compiling rules. Total compiled: {}.",
            compiled_rules.len()
        );
        Ok(CompiledRules {
            rules: compiled_rules,
        })
    }
}

/// Gets a `CompiledRules` instance from the cache or compiles them if not found.
///
/// This is the public entry point for retrieving compiled rules. It returns an
/// `Arc` to a `CompiledRules` instance, allowing for cheap sharing across
/// scrub calls.
pub fn get_or_compile_rules(config: &ScrubConfig) -> Result<Arc<CompiledRules>> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_RULES_CACHE.read().unwrap();
        if let Some(rules) = cache.get(&cache_key) {
            debug!("Serving compiled rules from cache for key: {}", &cache_key);
            return Ok(Arc::clone(rules));
        }
    } // Read lock is released here.

    debug!("Compiled rules not found in cache. Compiling now.");
    let compiled = compile_rules(config.rules.clone())?;
    let compiled_arc = Arc::new(compiled);

    COMPILED_RULES_CACHE
        .write()
        .unwrap()
        .insert(cache_key, Arc::clone(&compiled_arc));

    debug!("Successfully compiled and cached rules for key: {}", &cache_key);
    Ok(compiled_arc)
}
