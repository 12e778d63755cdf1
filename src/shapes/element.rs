// Lightweight element tree built from the quick-xml event stream

use super::LoadError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::str::FromStr;

/// A parsed XML element: name, attributes, child elements and text content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    /// Parse a complete document and return its root element
    pub fn parse(xml: &str) -> Result<Element, LoadError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader.read_event().map_err(|source| LoadError::Xml {
                position: reader.buffer_position(),
                source,
            })?;

            match event {
                Event::Start(start) => {
                    stack.push(Element::from_start(&start, reader.buffer_position())?)
                }
                Event::Empty(start) => {
                    let element = Element::from_start(&start, reader.buffer_position())?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    // Mismatched end names are already rejected by the reader
                    let element = stack.pop().ok_or_else(|| {
                        LoadError::Malformed("closing tag without opening tag".to_string())
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|source| LoadError::Xml {
                        position: reader.buffer_position(),
                        source,
                    })?;
                    match stack.last_mut() {
                        Some(current) => current.text.push_str(&text),
                        None => {
                            return Err(LoadError::Malformed(
                                "text outside of the root element".to_string(),
                            ))
                        }
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctype
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(LoadError::Malformed(format!("unclosed element <{}>", open.name)));
        }

        root.ok_or_else(|| LoadError::Malformed("document has no root element".to_string()))
    }

    fn from_start(start: &BytesStart, position: usize) -> Result<Element, LoadError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|source| LoadError::Xml { position, source })?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Element {
            name,
            attributes,
            ..Element::default()
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimmed text content
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All child elements with the given name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Marker flags are expressed by the mere presence of a child element
    pub fn has_child(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    /// Value from an attribute, or else from the text of a child element
    pub fn value(&self, name: &str) -> Option<&str> {
        self.attribute(name)
            .or_else(|| self.child(name).map(Element::text))
    }

    pub fn required_value(&self, name: &str) -> Result<&str, LoadError> {
        self.value(name).ok_or_else(|| LoadError::MissingElement {
            element: self.name.clone(),
            name: name.to_string(),
        })
    }

    pub fn required_attribute(&self, name: &str) -> Result<&str, LoadError> {
        self.attribute(name).ok_or_else(|| LoadError::MissingAttribute {
            element: self.name.clone(),
            name: name.to_string(),
        })
    }

    /// Parse a required value (attribute or child text) as a number
    pub fn parse_value<T: FromStr>(&self, name: &str) -> Result<T, LoadError> {
        let raw = self.required_value(name)?;
        self.parse_number(name, raw)
    }

    /// Parse a required attribute as a number
    pub fn parse_attribute<T: FromStr>(&self, name: &str) -> Result<T, LoadError> {
        let raw = self.required_attribute(name)?;
        self.parse_number(name, raw)
    }

    fn parse_number<T: FromStr>(&self, name: &str, raw: &str) -> Result<T, LoadError> {
        raw.trim().parse().map_err(|_| LoadError::InvalidNumber {
            element: self.name.clone(),
            name: name.to_string(),
            value: raw.to_string(),
        })
    }
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), LoadError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(LoadError::Malformed("multiple root elements".to_string()))
        }
        None => *root = Some(element),
    }
    Ok(())
}
