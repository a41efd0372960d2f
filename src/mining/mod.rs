//! Regression-chain mining
//!
//! The heuristics that turn raw commit history into a labeled dataset:
//! link extraction from commit messages, fix classification, chain
//! assembly over paginated listings, structural filtering, linked-issue
//! resolution, and the bug-type taxonomy classifier.

mod chain_builder;
mod fix_classifier;
mod issue_resolver;
mod lifecycle;
mod link_extractor;
mod structural_filter;
mod taxonomy;

pub use chain_builder::ChainBuilder;
pub use fix_classifier::looks_like_bug_fix;
pub use issue_resolver::resolve_linked_issue_text;
pub use lifecycle::{collect_lifecycle, fix_period_days};
pub use link_extractor::extract_bic_candidate;
pub use structural_filter::StructuralFilter;
pub use taxonomy::classify_bug_types;
