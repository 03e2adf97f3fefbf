//! Lint rules for JSX.

pub mod react;

use crate::rule::{Rule, RuleMeta};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Builds a rule from its resolved options.
pub struct RuleFactory {
    pub meta: &'static RuleMeta,
    create: fn(Option<&Value>) -> Result<Box<dyn Rule>, serde_json::Error>,
    create_default: fn() -> Box<dyn Rule>,
}

impl RuleFactory {
    const fn of<R>(meta: &'static RuleMeta) -> Self
    where
        R: Rule + Default + DeserializeOwned + 'static,
    {
        Self {
            meta,
            create: create_rule::<R>,
            create_default: create_default_rule::<R>,
        }
    }

    /// Create the rule from an options object; `None` means defaults
    #[inline]
    pub fn create(&self, options: Option<&Value>) -> Result<Box<dyn Rule>, serde_json::Error> {
        (self.create)(options)
    }

    /// Create the rule with default options
    #[inline]
    pub fn create_default(&self) -> Box<dyn Rule> {
        (self.create_default)()
    }
}

fn create_rule<R>(options: Option<&Value>) -> Result<Box<dyn Rule>, serde_json::Error>
where
    R: Rule + Default + DeserializeOwned + 'static,
{
    let rule = match options {
        Some(options) => R::deserialize(options)?,
        None => R::default(),
    };
    Ok(Box::new(rule))
}

fn create_default_rule<R>() -> Box<dyn Rule>
where
    R: Rule + Default + 'static,
{
    Box::new(R::default())
}

static RULES: &[RuleFactory] = &[
    RuleFactory::of::<react::JsxKey>(&react::jsx_key::META),
    RuleFactory::of::<react::JsxNoTargetBlank>(&react::jsx_no_target_blank::META),
    RuleFactory::of::<react::NoDangerWithChildren>(&react::no_danger_with_children::META),
    RuleFactory::of::<react::JsxNoCommentTextnodes>(&react::jsx_no_comment_textnodes::META),
];

/// Every built-in rule, recommended rules first.
#[inline]
pub fn builtin_rules() -> &'static [RuleFactory] {
    RULES
}

/// Look up a built-in rule by name
pub fn find_rule(name: &str) -> Option<&'static RuleFactory> {
    RULES.iter().find(|factory| factory.meta.name == name)
}
