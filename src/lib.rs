// gitscrub-core/src/lib.rs
//! # gitscrub-core
//!
//! `gitscrub-core` provides the logic for scrubbing hard-coded credential
//! patterns from git blob contents during a history rewrite. It defines the
//! data structures for scrub rules, compiles them into byte-oriented regular
//! expressions, and implements a pluggable `BlobSanitizer` trait applying the
//! rules as an ordered sequence of find/replace passes.
//!
//! The library is pure and stateless: it transforms byte buffers based on
//! configured rules and leaves all traversal, storage, and parallelism to the
//! external history-rewriting engine, which it reaches only through the
//! narrow `HistoryRewriter` seam.
//!
//! ## Modules
//!
//! * `config`: Defines `ScrubRule`s and `ScrubConfig` for specifying credential patterns.
//! * `sanitizers`: Contains the rule compiler producing cached byte-regexes.
//! * `engine`: Defines the `BlobSanitizer` trait, the callback contract the engine consumes.
//! * `engines`: Contains concrete implementations of the `BlobSanitizer` trait.
//! * `rewrite`: The engine-facing surface: `RewriteOptions`, `RewriteStats`, `HistoryRewriter`.
//! * `headless`: Convenience wrapper for one-shot scrubbing of a single buffer.
//!
//! ## Usage Example
//!
//! ```rust
//! use gitscrub_core::{scrub_blob_bytes, ScrubConfig};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // 1. Load the built-in credential scrub rules.
//!     let config = ScrubConfig::load_default_rules()?;
//!
//!     // 2. Scrub one blob's contents.
//!     let blob = b"aws_access_key_id = \"ABC123\"\n".to_vec();
//!     let scrubbed = scrub_blob_bytes(config, &blob, "blob-0001")?;
//!
//!     assert_eq!(scrubbed, b"aws_access_key_id = \"YOUR_ACCESS_KEY_ID\"\n");
//!     Ok(())
//! }
//! ```
//!
//! ## Design Principles
//!
//! * **Pure transform:** rule application is total over any byte buffer;
//!   unmatched buffers pass through unchanged and no error path exists during
//!   application.
//! * **Ordered composition:** rules apply in listed order, each over the
//!   output of the previous one, and no placeholder an earlier rule emits is
//!   re-matched by a later rule.
//! * **Injected engine:** the history-rewriting engine is a collaborator
//!   behind the `HistoryRewriter` trait; the crate carries no engine-specific
//!   types.
//!
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod rewrite;
pub mod sanitizers;

/// Re-exports the public configuration types and functions for managing scrub rules.
pub use config::{
    merge_rules, validate_rules, ScrubConfig, ScrubRule, ScrubSummaryItem, MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::ScrubError;

/// Re-exports the core sanitizer capability trait.
pub use engine::BlobSanitizer;

/// Re-exports the concrete regex-based sanitizer.
pub use engines::regex_engine::RegexScrubber;

/// Re-exports the engine-facing rewrite surface.
pub use rewrite::{scrub_history, HistoryRewriter, RewriteOptions, RewriteStats};

/// Re-exports the one-shot convenience entry point.
pub use headless::scrub_blob_bytes;

// Re-export key types from the sanitizers::compiler module for advanced usage.
pub use sanitizers::compiler::{compile_rules, CompiledRule, CompiledRules};
