use std::fmt::Display;

use regex::Regex;

use crate::error::{Error, Result};

lazy_static::lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").expect("placeholder pattern");
}

/// Render a path template: every `:name` placeholder is replaced by the
/// string form of the matching substitution.
///
/// template: "/files/folders/:id"
/// substitutions: [("id", &42)]
pub fn resource_path_for(template: &str, substitutions: &[(&str, &dyn Display)]) -> Result<String> {
    let mut unresolved = Vec::new();

    let rendered = PLACEHOLDER.replace_all(template, |caps: &regex::Captures| {
        let name = &caps[1];
        match substitutions.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => value.to_string(),
            None => {
                unresolved.push(name.to_owned());
                caps[0].to_owned()
            }
        }
    });

    if !unresolved.is_empty() {
        return Err(Error::UnresolvedPlaceholder {
            template: template.to_owned(),
            names: unresolved,
        });
    }

    Ok(rendered.into_owned())
}
