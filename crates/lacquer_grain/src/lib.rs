//! Grain - Static value analysis over JSX syntax trees.
//!
//! ## Name Origin
//!
//! **Grain** is the figure of the wood beneath a lacquered surface. Every
//! coat follows it, and a finisher who reads the grain knows where the
//! surface will hold and where it will crack. `lacquer_grain` reads the
//! structure beneath JSX markup so the lint rules in `lacquer_patina` can
//! decide what they can prove and what they must leave alone.
//!
//! ## Components
//!
//! - [`value`]: conservative constant resolution (`resolve`)
//! - [`enumerate`]: branch-aware enumeration of possible produced values
//! - [`attribute`]: last-wins attribute lookup and spread positions
//! - [`callback`]: per-function collection of returned expressions
//! - [`calls`]: recognition of iteration, factory and escape-hatch calls
//!
//! Everything here is total: shapes that cannot be proven resolve to
//! [`Resolution::Unresolved`], `None` or an empty sequence, never a guess.

pub mod attribute;
pub mod callback;
pub mod calls;
pub mod enumerate;
pub mod value;

#[cfg(test)]
pub(crate) mod test_utils;

pub use attribute::{
    attribute_name, element_name, find_attribute, has_attribute, is_attribute_named,
    last_spread_index, spread_overrides, AttributePosition,
};
pub use callback::{implicit_return, CallbackResults, FunctionKey};
pub use calls::{callee_path, is_children_to_array_call, iteration_callback, member_property};
pub use enumerate::{potential_values, potential_values_of_attribute, PotentialValues};
pub use value::{
    resolve, resolve_attribute_value, resolve_expression, Resolution, StaticValue, ValueKey,
    ValueNode,
};
