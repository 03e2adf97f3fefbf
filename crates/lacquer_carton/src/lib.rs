//! Carton - The artisan's toolbox for Lacquer.
//!
//! This crate provides the small shared utilities the rest of the Lacquer
//! workspace builds on, much like a carton holds the brushes and rags a
//! finisher keeps at hand.
//!
//! # Modules
//!
//! - **Collections**: fast hash maps and inline small vectors
//! - **Strings**: `CompactString` for short, mostly-inline text
//! - **Line index**: byte offset to line/column conversion for reporting
//!
//! # Example
//!
//! ```
//! use lacquer_carton::LineIndex;
//!
//! let index = LineIndex::new("let a;\nlet b;\n");
//! assert_eq!(index.line_col(7), (2, 1));
//! ```

pub mod line_index;

pub use line_index::LineIndex;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;

// Re-export smallvec for stack-optimized collections
pub use smallvec::SmallVec;

// Re-export rustc-hash for fast hash maps
pub use rustc_hash::FxHashMap;
