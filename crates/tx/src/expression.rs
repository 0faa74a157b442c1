//! Update-expression synthesis
//!
//! For an existing record, the save path translates its changed attributes
//! into one `SET` expression plus two aliasing maps:
//!
//! - name aliases (`#_n{i}` -> real attribute name), so reserved attribute
//!   names never collide with the store's expression grammar
//! - value placeholders (`:_s{i}` -> dumped value), so values are always
//!   parameterized
//!
//! Every attribute name is aliased uniformly rather than consulting a
//! reserved-word list, which keeps the generator total and side-effect-free.
//! The hash and range key are identity attributes and are never targeted.
//! Placeholder indices follow the changed map's lexicographic iteration
//! order, so identical change sets always synthesize identical expressions.

use dynamap_core::{AttributeValue, TableSchema};
use std::collections::BTreeMap;

/// Prefix for attribute-name aliases
pub const NAME_ALIAS_PREFIX: &str = "#_n";

/// Prefix for value placeholders
pub const VALUE_PLACEHOLDER_PREFIX: &str = ":_s";

/// A synthesized `SET` expression with its aliasing maps
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    /// `SET #_n0 = :_s0, #_n1 = :_s1, ...`
    pub expression: String,
    /// `#_n{i}` -> real attribute name
    pub names: BTreeMap<String, String>,
    /// `:_s{i}` -> dumped value
    pub values: BTreeMap<String, AttributeValue>,
}

/// Synthesize a `SET` expression over the changed attributes
///
/// Key attributes are excluded. Returns `None` when nothing remains to
/// write, so the caller can elide the update operation entirely.
pub fn synthesize_update(
    changed: &BTreeMap<String, AttributeValue>,
    schema: &TableSchema,
) -> Option<UpdateExpression> {
    let mut assignments = Vec::new();
    let mut names = BTreeMap::new();
    let mut values = BTreeMap::new();

    let targets = changed
        .iter()
        .filter(|(name, _)| !schema.is_key_attribute(name));

    for (index, (name, value)) in targets.enumerate() {
        let alias = format!("{}{}", NAME_ALIAS_PREFIX, index);
        let placeholder = format!("{}{}", VALUE_PLACEHOLDER_PREFIX, index);
        assignments.push(format!("{} = {}", alias, placeholder));
        names.insert(alias, name.clone());
        values.insert(placeholder, value.clone());
    }

    if assignments.is_empty() {
        return None;
    }

    Some(UpdateExpression {
        expression: format!("SET {}", assignments.join(", ")),
        names,
        values,
    })
}
