// gitscrub-core/src/engine.rs
//! Defines the core BlobSanitizer trait.
//!
//! The `BlobSanitizer` trait is the narrow capability the external
//! history-rewriting engine consumes: a pure `bytes -> bytes` transform
//! invoked once per blob. This module defines that contract so the rest of
//! the crate stays free of any engine-specific types, and so alternative
//! sanitizer implementations can be swapped in behind the same interface.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;

use crate::config::{ScrubConfig, ScrubSummaryItem};
use crate::sanitizers::compiler::CompiledRules;

/// A trait that defines the core functionality of a blob sanitizer.
///
/// Implementations must be pure per call: no shared mutable state and no
/// cross-call memory, so the host engine may invoke them from any iteration
/// order or parallelism it chooses.
pub trait BlobSanitizer: Send + Sync {
    /// Scrubs a single blob's contents.
    ///
    /// Applies every configured rule, in listed order, to `content` and
    /// returns the resulting buffer. Buffers containing no matches are
    /// returned byte-for-byte unchanged. This transform is total: any byte
    /// content is accepted and rule application itself cannot fail.
    ///
    /// # Arguments
    /// * `content` - The raw blob bytes to scrub.
    /// * `source_id` - An opaque identifier for the blob (e.g., an object id).
    ///   Used for logging only; it never influences matching.
    fn scrub(&self, content: &[u8], source_id: &str) -> Result<Vec<u8>>;

    /// Scrubs a blob and reports what was replaced.
    ///
    /// Returns the scrubbed buffer together with a per-rule summary of the
    /// occurrences each rule replaced.
    fn scrub_with_summary(
        &self,
        content: &[u8],
        source_id: &str,
    ) -> Result<(Vec<u8>, Vec<ScrubSummaryItem>)>;

    /// Scans a blob for rule matches without modifying it.
    ///
    /// The scan walks the same sequential composition as `scrub` (each rule
    /// observes the output of the previous one) so the reported counts match
    /// what a scrub of the same buffer would replace.
    fn analyze(&self, content: &[u8], source_id: &str) -> Result<Vec<ScrubSummaryItem>>;

    /// Returns a reference to the `CompiledRules` used by the sanitizer.
    fn compiled_rules(&self) -> &CompiledRules;

    /// Returns a reference to the sanitizer's rule-set configuration.
    fn config(&self) -> &ScrubConfig;
}
