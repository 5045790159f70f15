// gitscrub-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for one-shot blob scrubbing without constructing an
//! engine by hand. This is the entry point for callers that have a single
//! buffer and a rule set and want the scrubbed bytes back.

use anyhow::Result;

use crate::config::ScrubConfig;
use crate::engine::BlobSanitizer;
use crate::engines::regex_engine::RegexScrubber;

/// Fully scrubs a single blob's contents by applying all configured rules.
///
/// # Arguments
///
/// * `config` - The merged ScrubConfig (defaults + optional user overrides).
/// * `content` - The raw blob bytes to scrub.
/// * `source_id` - A stable identifier for the blob (object id or pseudo id),
///   used for logging only.
pub fn scrub_blob_bytes(config: ScrubConfig, content: &[u8], source_id: &str) -> Result<Vec<u8>> {
    let engine = RegexScrubber::new(config)?;
    engine.scrub(content, source_id)
}
