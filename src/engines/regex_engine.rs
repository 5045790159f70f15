// gitscrub-core/src/engines/regex_engine.rs
//! A `BlobSanitizer` implementation that uses byte-oriented regular
//! expressions to find and replace credential material in blob contents.
//! License: MIT OR Apache-2.0

use std::borrow::Cow;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, trace};
use regex::bytes::NoExpand;

use crate::config::{ScrubConfig, ScrubSummaryItem};
use crate::engine::BlobSanitizer;
use crate::sanitizers::compiler::{get_or_compile_rules, CompiledRules};

/// The standard regex-based blob sanitizer.
///
/// Rules are applied as a sequential composition: rule *n* runs `replace_all`
/// over the output of rule *n-1*, matching the rule-set contract that later
/// rules operate on already-scrubbed text. Replacements are literal bytes;
/// no capture-group expansion takes place.
#[derive(Debug)]
pub struct RegexScrubber {
    compiled_rules: Arc<CompiledRules>,
    config: ScrubConfig,
}

impl RegexScrubber {
    pub fn new(config: ScrubConfig) -> Result<Self> {
        let compiled_rules = get_or_compile_rules(&config)
            .context("Failed to compile scrub rules for RegexScrubber")?;

        Ok(Self {
            compiled_rules,
            config,
        })
    }

    /// Runs every compiled rule over `content` in listed order.
    ///
    /// When `collect_samples` is false the buffer is scanned exactly once per
    /// rule: `replace_all` hands back the borrowed input for unmatched rules,
    /// so the per-blob hot path does no counting pass and no per-match
    /// allocations.
    fn apply_rules(
        &self,
        content: &[u8],
        source_id: &str,
        collect_samples: bool,
    ) -> (Vec<u8>, Vec<ScrubSummaryItem>) {
        let mut buf: Cow<[u8]> = Cow::Borrowed(content);
        let mut summary = Vec::new();

        for rule in &self.compiled_rules.rules {
            if collect_samples {
                let originals: Vec<Vec<u8>> = rule
                    .regex
                    .find_iter(&buf)
                    .map(|m| m.as_bytes().to_vec())
                    .collect();

                if originals.is_empty() {
                    trace!("Rule '{}' matched nothing in '{}'.", rule.name, source_id);
                    continue;
                }

                debug!(
                    "Rule '{}' replaced {} occurrence(s) in '{}'.",
                    rule.name,
                    originals.len(),
                    source_id
                );

                let replaced: Vec<u8> = rule
                    .regex
                    .replace_all(&buf, NoExpand(&rule.replace_with))
                    .into_owned();
                buf = Cow::Owned(replaced);

                summary.push(ScrubSummaryItem {
                    rule_name: rule.name.clone(),
                    occurrences: originals.len(),
                    original_texts: originals,
                    replacement: String::from_utf8_lossy(&rule.replace_with).into_owned(),
                });
            } else if let Cow::Owned(replaced) =
                rule.regex.replace_all(&buf, NoExpand(&rule.replace_with))
            {
                debug!("Rule '{}' fired in '{}'.", rule.name, source_id);
                buf = Cow::Owned(replaced);
            } else {
                trace!("Rule '{}' matched nothing in '{}'.", rule.name, source_id);
            }
        }

        (buf.into_owned(), summary)
    }
}

impl BlobSanitizer for RegexScrubber {
    fn scrub(&self, content: &[u8], source_id: &str) -> Result<Vec<u8>> {
        let (scrubbed, _) = self.apply_rules(content, source_id, false);
        Ok(scrubbed)
    }

    fn scrub_with_summary(
        &self,
        content: &[u8],
        source_id: &str,
    ) -> Result<(Vec<u8>, Vec<ScrubSummaryItem>)> {
        Ok(self.apply_rules(content, source_id, true))
    }

    fn analyze(&self, content: &[u8], source_id: &str) -> Result<Vec<ScrubSummaryItem>> {
        let (_, summary) = self.apply_rules(content, source_id, true);
        Ok(summary)
    }

    fn compiled_rules(&self) -> &CompiledRules {
        &self.compiled_rules
    }

    fn config(&self) -> &ScrubConfig {
        &self.config
    }
}
