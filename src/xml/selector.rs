use regex::Regex;

use crate::error::{Error, Result};
use crate::xml::element::Element;

lazy_static::lazy_static! {
    static ref STEP_PATTERN: Regex = Regex::new(r"^([A-Za-z_*][\w.\-]*)((?:\[[^\]]*\])*)$").expect("step pattern");
    static ref PREDICATE_PATTERN: Regex =
        Regex::new(r#"\[\s*@([\w.\-]+)\s*=\s*(?:'([^']*)'|"([^"]*)")\s*\]"#).expect("predicate pattern");
}

/// Relative path selector over child elements.
///
/// Supported grammar: `step ('/' step)*` where a step is a name (or `*`)
/// followed by zero or more `[@attr='value']` predicates, e.g.
/// `membership/workspaces/workspace` or `actor[@rel='owner']`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    name: String,
    predicates: Vec<(String, String)>,
}

impl Step {
    fn matches(&self, element: &Element) -> bool {
        (self.name == "*" || self.name == element.name)
            && self
                .predicates
                .iter()
                .all(|(attr, value)| element.get(attr) == Some(value.as_str()))
    }
}

impl Selector {
    pub fn parse(expression: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::Xml(format!("invalid selector '{}': {}", expression, reason));

        let trimmed = expression.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty"));
        }

        let mut steps = Vec::new();
        for raw in trimmed.split('/') {
            let caps = STEP_PATTERN.captures(raw.trim()).ok_or_else(|| invalid(raw))?;
            let name = caps[1].to_owned();
            let predicates_src = caps.get(2).map(|m| m.as_str()).unwrap_or("");

            let mut predicates = Vec::new();
            let mut consumed = 0;
            for pred in PREDICATE_PATTERN.captures_iter(predicates_src) {
                let value = pred.get(2).or_else(|| pred.get(3)).map(|m| m.as_str()).unwrap_or("");
                predicates.push((pred[1].to_owned(), value.to_owned()));
                consumed += pred[0].len();
            }
            if consumed != predicates_src.len() {
                return Err(invalid(predicates_src));
            }

            steps.push(Step { name, predicates });
        }

        Ok(Self { steps })
    }

    pub(crate) fn apply<'a>(&self, root: &'a Element) -> Vec<&'a Element> {
        let mut current = vec![root];
        for step in &self.steps {
            current = current
                .into_iter()
                .flat_map(|element| element.children.iter())
                .filter(|child| step.matches(child))
                .collect();
        }
        current
    }
}
