//! Shared settings and JSX pragma resolution.
//!
//! Settings are read once from configuration and shared by every rule.
//! Pragmas depend on the linted source as well (`/** @jsx h */` comments),
//! so they are resolved per file.

use lacquer_carton::CompactString;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Settings shared by all rules.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    /// JSX factory configuration
    #[serde(default, alias = "reactLite")]
    pub react: ReactSettings,
    /// Extra components that render links (`a` with `href` is always included)
    #[serde(default)]
    pub link_components: Vec<ComponentSetting<LinkComponent>>,
    /// Extra components that render forms (`form` with `action` is always included)
    #[serde(default)]
    pub form_components: Vec<ComponentSetting<FormComponent>>,
}

/// `settings.react`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ReactSettings {
    /// Namespace of the element factory, `React` in `React.createElement`
    pub pragma: CompactString,
    /// Fragment component under the pragma, `Fragment` in `React.Fragment`
    pub fragment: CompactString,
    /// Full element factory name, overrides `pragma`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx_factory: Option<CompactString>,
    /// Full fragment factory name, overrides `pragma` and `fragment`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx_fragment_factory: Option<CompactString>,
}

impl Default for ReactSettings {
    fn default() -> Self {
        Self {
            pragma: CompactString::const_new("React"),
            fragment: CompactString::const_new("Fragment"),
            jsx_factory: None,
            jsx_fragment_factory: None,
        }
    }
}

/// A link or form component: a bare tag name or a record naming its URL attribute.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ComponentSetting<R> {
    Name(CompactString),
    Record(R),
}

/// A component record with an optional URL attribute.
pub trait ComponentRecord {
    fn name(&self) -> &str;
    fn attribute(&self) -> Option<&str>;
}

/// `{ "name": "Link", "linkAttribute": "to" }`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LinkComponent {
    pub name: CompactString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_attribute: Option<CompactString>,
}

/// `{ "name": "Form", "formAttribute": "endpoint" }`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormComponent {
    pub name: CompactString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_attribute: Option<CompactString>,
}

impl ComponentRecord for LinkComponent {
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn attribute(&self) -> Option<&str> {
        self.link_attribute.as_deref()
    }
}

impl ComponentRecord for FormComponent {
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn attribute(&self) -> Option<&str> {
        self.form_attribute.as_deref()
    }
}

impl<R: ComponentRecord> ComponentSetting<R> {
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name.as_str(),
            Self::Record(record) => record.name(),
        }
    }

    #[inline]
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Record(record) => record.attribute(),
        }
    }
}

impl Settings {
    /// URL attribute of a link component, `None` if `tag` is not a link.
    #[inline]
    pub fn link_attribute(&self, tag: &str) -> Option<&str> {
        lookup_component(&self.link_components, tag, "a", "href")
    }

    /// URL attribute of a form component, `None` if `tag` is not a form.
    #[inline]
    pub fn form_attribute(&self, tag: &str) -> Option<&str> {
        lookup_component(&self.form_components, tag, "form", "action")
    }
}

/// Later entries win; the built-in tag is the lowest-priority entry.
fn lookup_component<'s, R: ComponentRecord>(
    configured: &'s [ComponentSetting<R>],
    tag: &str,
    builtin_tag: &str,
    default_attribute: &'static str,
) -> Option<&'s str> {
    if let Some(component) = configured.iter().rev().find(|c| c.name() == tag) {
        return Some(component.attribute().unwrap_or(default_attribute));
    }
    (tag == builtin_tag).then_some(default_attribute)
}

static PRAGMA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*\*?\s*@(jsx|jsxFrag)\s+(\S+)\s*$").expect("valid pragma regex")
});

/// Effective JSX factory names for one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pragmas {
    /// Element factory, e.g. `React.createElement`
    pub jsx: CompactString,
    /// Fragment factory, e.g. `React.Fragment`
    pub jsx_frag: CompactString,
}

impl Pragmas {
    /// Resolve from settings alone.
    pub fn from_settings(settings: &ReactSettings) -> Self {
        let jsx = match &settings.jsx_factory {
            Some(factory) => factory.clone(),
            None => CompactString::from(format!("{}.createElement", settings.pragma)),
        };
        let jsx_frag = match &settings.jsx_fragment_factory {
            Some(factory) => factory.clone(),
            None => CompactString::from(format!("{}.{}", settings.pragma, settings.fragment)),
        };
        Self { jsx, jsx_frag }
    }

    /// Resolve from settings and the bodies of the source's comments.
    ///
    /// A `@jsx` / `@jsxFrag` pragma in a comment beats any setting; the last
    /// pragma of each kind in source order wins.
    pub fn resolve<'s>(
        settings: &ReactSettings,
        comments: impl IntoIterator<Item = &'s str>,
    ) -> Self {
        let mut pragmas = Self::from_settings(settings);
        for comment in comments {
            for captures in PRAGMA_RE.captures_iter(comment) {
                let name = CompactString::from(&captures[2]);
                match &captures[1] {
                    "jsx" => pragmas.jsx = name,
                    _ => pragmas.jsx_frag = name,
                }
            }
        }
        pragmas
    }
}

impl Default for Pragmas {
    fn default() -> Self {
        Self::from_settings(&ReactSettings::default())
    }
}
