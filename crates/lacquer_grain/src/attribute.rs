//! Attribute lookup on JSX opening elements.
//!
//! JSX props compose like an object literal: a later attribute or spread
//! overrides an earlier one. Lookups therefore return the *last* matching
//! attribute together with its index, so callers can compare it against
//! spread positions.

use oxc_ast::ast::{JSXAttribute, JSXAttributeItem, JSXAttributeName, JSXElementName};

/// The last attribute with a given name and its index in the attribute list.
#[derive(Debug, Clone, Copy)]
pub struct AttributePosition<'b, 'a> {
    pub index: usize,
    pub attribute: &'b JSXAttribute<'a>,
}

/// Whether `item` is a plain attribute named `name` (`<a name=... />`).
#[inline]
pub fn is_attribute_named(item: &JSXAttributeItem<'_>, name: &str) -> bool {
    match item {
        JSXAttributeItem::Attribute(attribute) => attribute_name(attribute) == Some(name),
        JSXAttributeItem::SpreadAttribute(_) => false,
    }
}

/// Identifier name of an attribute; namespaced names (`xlink:href`) have none.
#[inline]
pub fn attribute_name<'b>(attribute: &'b JSXAttribute<'_>) -> Option<&'b str> {
    match &attribute.name {
        JSXAttributeName::Identifier(identifier) => Some(identifier.name.as_str()),
        JSXAttributeName::NamespacedName(_) => None,
    }
}

/// Find the last attribute named `name`.
pub fn find_attribute<'b, 'a>(
    attributes: &'b [JSXAttributeItem<'a>],
    name: &str,
) -> Option<AttributePosition<'b, 'a>> {
    attributes
        .iter()
        .enumerate()
        .rev()
        .find_map(|(index, item)| match item {
            JSXAttributeItem::Attribute(attribute) if attribute_name(attribute) == Some(name) => {
                Some(AttributePosition { index, attribute })
            }
            _ => None,
        })
}

/// Whether any attribute named `name` is present.
#[inline]
pub fn has_attribute(attributes: &[JSXAttributeItem<'_>], name: &str) -> bool {
    attributes.iter().any(|item| is_attribute_named(item, name))
}

/// Index of the last spread attribute (`{...props}`).
#[inline]
pub fn last_spread_index(attributes: &[JSXAttributeItem<'_>]) -> Option<usize> {
    attributes
        .iter()
        .rposition(|item| matches!(item, JSXAttributeItem::SpreadAttribute(_)))
}

/// Whether a spread at `spread` may override an attribute at `index`.
#[inline]
pub fn spread_overrides(spread: Option<usize>, index: usize) -> bool {
    spread.is_some_and(|spread| spread > index)
}

/// Tag name of an element when it is a plain identifier (`a`, `Link`).
///
/// Member (`Foo.Bar`) and namespaced (`svg:a`) names return `None`.
pub fn element_name<'b>(name: &'b JSXElementName<'_>) -> Option<&'b str> {
    match name {
        JSXElementName::Identifier(identifier) => Some(identifier.name.as_str()),
        JSXElementName::IdentifierReference(identifier) => Some(identifier.name.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::with_element;
    use oxc_span::GetSpan;

    #[test]
    fn test_last_match_wins() {
        let source = r#"<a rel="first" href="x" rel="second" />"#;
        with_element(source, |element| {
            let attributes = &element.opening_element.attributes;
            let position = find_attribute(attributes, "rel").unwrap();
            assert_eq!(position.index, 2);
            let span = position.attribute.span();
            assert_eq!(
                &source[span.start as usize..span.end as usize],
                r#"rel="second""#
            );
        });
    }

    #[test]
    fn test_missing_attribute() {
        with_element(r#"<a {...props} data-rel="x" />"#, |element| {
            let attributes = &element.opening_element.attributes;
            assert!(find_attribute(attributes, "rel").is_none());
            assert!(!has_attribute(attributes, "rel"));
            assert!(has_attribute(attributes, "data-rel"));
        });
    }

    #[test]
    fn test_spread_positions() {
        with_element(r#"<a {...a} key="k" {...b} target="_blank" />"#, |element| {
            let attributes = &element.opening_element.attributes;
            let spread = last_spread_index(attributes);
            assert_eq!(spread, Some(2));
            let key = find_attribute(attributes, "key").unwrap();
            let target = find_attribute(attributes, "target").unwrap();
            assert!(spread_overrides(spread, key.index));
            assert!(!spread_overrides(spread, target.index));
            assert!(!spread_overrides(None, key.index));
        });
    }

    #[test]
    fn test_element_names() {
        with_element("<a />", |element| {
            assert_eq!(element_name(&element.opening_element.name), Some("a"));
        });
        with_element("<Link />", |element| {
            assert_eq!(element_name(&element.opening_element.name), Some("Link"));
        });
        with_element("<UI.Link />", |element| {
            assert_eq!(element_name(&element.opening_element.name), None);
        });
    }
}
