use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::xml::selector::Selector;

/// An owned XML element: local name, attributes in document order,
/// child elements and the concatenated text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attribute value by local name.
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == attribute)
            .map(|(_, value)| value.as_str())
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// All elements matching `selector`, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<&Element> {
        selector.apply(self)
    }

    pub fn select_first(&self, selector: &Selector) -> Option<&Element> {
        self.select(selector).into_iter().next()
    }

    /// Trimmed text of the first element matching `path`.
    pub fn child_text(&self, path: &str) -> Result<Option<String>> {
        let selector = Selector::parse(path)?;
        Ok(self
            .select_first(&selector)
            .map(|element| element.text.trim().to_owned()))
    }
}

/// Parse `xml` and return its root element, which must be named `root_name`.
pub fn parse_root(xml: &str, root_name: &str) -> Result<Element> {
    let root = parse(xml)?;
    if root.name != root_name {
        return Err(Error::UnexpectedRoot {
            expected: root_name.to_owned(),
            found: root.name,
        });
    }
    Ok(root)
}

/// Parse `xml` into its root element.
pub fn parse(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                stack.push(open_element(e)?);
            }
            Event::Empty(ref e) => {
                let element = open_element(e)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::Xml("unbalanced end tag".to_owned()))?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::Text(ref e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::Xml("unexpected end of document".to_owned()));
    }
    root.ok_or_else(|| Error::Xml("document has no root element".to_owned()))
}

fn open_element(start: &BytesStart) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.local_name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn close_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(Error::Xml("multiple root elements".to_owned())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKSPACE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<workspace xmlns:x="urn:x" title="Workspace &amp; Co" type="shared">
  <link rel="self" href="https://api.huddle.net/workspaces/1" />
  <x:settings><colour>blue</colour></x:settings>
  <description><![CDATA[<b>raw</b>]]></description>
</workspace>"#;

    #[test]
    fn parses_attributes_children_and_text() {
        let root = parse_root(WORKSPACE, "workspace").unwrap();
        assert_eq!(root.get("title"), Some("Workspace & Co"));
        assert_eq!(root.get("type"), Some("shared"));
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.children_named("link").count(), 1);
        assert_eq!(root.child_text("settings/colour").unwrap().as_deref(), Some("blue"));
        assert_eq!(root.child_text("description").unwrap().as_deref(), Some("<b>raw</b>"));
    }

    #[test]
    fn rejects_unexpected_root() {
        let err = parse_root(WORKSPACE, "folder").unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedRoot { ref expected, ref found } if expected == "folder" && found == "workspace"
        ));
    }

    #[test]
    fn rejects_truncated_documents() {
        assert!(parse("<workspace><link rel=\"self\" href=\"x\"/>").is_err());
    }

    #[test]
    fn missing_child_text_is_none() {
        let root = parse("<user/>").unwrap();
        assert_eq!(root.child_text("profile/personal/displayname").unwrap(), None);
    }
}
