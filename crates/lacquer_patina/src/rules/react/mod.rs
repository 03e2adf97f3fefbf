//! React JSX rules.
//!
//! Compatible with the `react/*` rules of eslint-plugin-react of the same
//! names, restricted to what can be proven from the visible syntax.

// Recommended rules
pub(crate) mod jsx_key;
pub(crate) mod jsx_no_target_blank;
pub(crate) mod no_danger_with_children;

// Opt-in rules
pub(crate) mod jsx_no_comment_textnodes;

// Recommended rules exports
pub use jsx_key::JsxKey;
pub use jsx_no_target_blank::{EnforceDynamicLinks, JsxNoTargetBlank};
pub use no_danger_with_children::NoDangerWithChildren;

// Opt-in rules exports
pub use jsx_no_comment_textnodes::JsxNoCommentTextnodes;
