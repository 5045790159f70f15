// gitscrub-core/src/rewrite.rs
//! rewrite.rs - The surface between this crate and the history-rewriting engine.
//!
//! The engine that actually walks commits, loads blobs, and writes the new
//! history graph is an external collaborator. This module defines the two
//! things the crate hands it: a `RewriteOptions` record selecting which refs
//! to rewrite and how, and the `HistoryRewriter` trait through which the
//! engine is injected. `scrub_history` wires a compiled sanitizer into the
//! injected engine for a full run.
//!
//! License: MIT OR Apache-2.0

use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::ScrubConfig;
use crate::engine::BlobSanitizer;
use crate::engines::regex_engine::RegexScrubber;

/// Options consumed by the history-rewriting engine.
///
/// The crate only sets these; their effects belong entirely to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteOptions {
    /// Overwrite an already-rewritten history.
    pub force: bool,
    /// Allow rewriting a subset of refs without full-repository consistency
    /// checks.
    pub partial: bool,
    /// Refs to rewrite, in order (e.g., `refs/heads/master`).
    pub refs: Vec<String>,
    /// Enable verbose engine logging.
    pub debug: bool,
}

impl RewriteOptions {
    /// Builds options for a forced, partial rewrite of the given refs.
    ///
    /// This is the shape a credential scrub of a subset of branches uses:
    /// existing rewritten history is overwritten and untouched refs are left
    /// alone.
    pub fn forced_partial<I, S>(refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            force: true,
            partial: true,
            refs: refs.into_iter().map(Into::into).collect(),
            debug: false,
        }
    }

    /// Validates the option record before it is handed to the engine.
    ///
    /// An empty ref list is rejected; ref names outside the `refs/` namespace
    /// are passed through with a warning since some engines resolve short
    /// names themselves.
    pub fn validate(&self) -> Result<()> {
        if self.refs.is_empty() {
            bail!("Rewrite options validation failed: 'refs' must name at least one ref.");
        }
        for ref_name in &self.refs {
            if ref_name.trim().is_empty() {
                bail!("Rewrite options validation failed: empty ref name.");
            }
            if !ref_name.starts_with("refs/") {
                warn!(
                    "Ref '{}' is outside the refs/ namespace; the engine must resolve it.",
                    ref_name
                );
            }
        }
        Ok(())
    }
}

/// Counters reported back by a history rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteStats {
    /// Blobs handed to the sanitizer.
    pub blobs_seen: u64,
    /// Blobs whose scrubbed contents differed from the original.
    pub blobs_changed: u64,
}

/// The capability this crate consumes from the external rewriting engine.
///
/// An implementation walks the history reachable from `options.refs`, calls
/// the sanitizer exactly once per blob, stores the returned buffer in place
/// of the original, and reports what it touched. The engine owns iteration
/// order and any parallelism; the sanitizer side of the contract is pure per
/// call.
pub trait HistoryRewriter {
    fn rewrite(
        &mut self,
        options: &RewriteOptions,
        sanitizer: &dyn BlobSanitizer,
    ) -> Result<RewriteStats>;
}

/// Runs a full credential scrub over history through the injected engine.
///
/// Validates `options`, compiles `config` into a `RegexScrubber`, and
/// delegates the traversal to `rewriter`.
pub fn scrub_history<R: HistoryRewriter>(
    rewriter: &mut R,
    config: ScrubConfig,
    options: &RewriteOptions,
) -> Result<RewriteStats> {
    options.validate()?;

    let sanitizer =
        RegexScrubber::new(config).context("Failed to build sanitizer for history scrub")?;

    info!(
        "Starting history scrub over {} ref(s) (force: {}, partial: {}).",
        options.refs.len(),
        options.force,
        options.partial
    );
    if options.debug {
        debug!("Rewrite options: {:?}", options);
    }

    let stats = rewriter
        .rewrite(options, &sanitizer)
        .context("History-rewriting engine failed")?;

    info!(
        "History scrub finished: {} blob(s) seen, {} changed.",
        stats.blobs_seen, stats.blobs_changed
    );
    Ok(stats)
}
