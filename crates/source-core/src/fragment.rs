//! Configuration fragments handed to the system under test.
//!
//! Fragments are small XML trees (`<mysql>...</mysql>`, `<file>...</file>`)
//! embedded into a larger dictionary definition by the caller.

use std::fmt::{self, Display, Write};

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Empty,
    Text(String),
    Children(Vec<Element>),
}

/// An XML element with either text or child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    content: Content,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Content::Empty,
        }
    }

    /// Element whose body is the escaped `Display` of `value`.
    pub fn leaf(name: impl Into<String>, value: impl Display) -> Self {
        Self {
            name: name.into(),
            content: Content::Text(value.to_string()),
        }
    }

    /// Append a child element. Replaces any text content.
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    /// Shorthand for `.child(Element::leaf(name, value))`.
    pub fn with(self, name: impl Into<String>, value: impl Display) -> Self {
        self.child(Element::leaf(name, value))
    }

    /// Append a leaf only when `value` is present.
    pub fn with_opt(self, name: impl Into<String>, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text of the first descendant with this name, unescaped.
    pub fn find_text(&self, name: &str) -> Option<&str> {
        match &self.content {
            Content::Text(text) if self.name == name => Some(text),
            Content::Children(children) => children.iter().find_map(|c| c.find_text(name)),
            _ => None,
        }
    }

    /// Render with one element per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out, 0);
        out
    }

    fn write_to(&self, out: &mut String, depth: usize) -> fmt::Result {
        let pad = INDENT.repeat(depth);
        match &self.content {
            Content::Empty => writeln!(out, "{pad}<{}/>", self.name),
            Content::Text(text) => {
                writeln!(out, "{pad}<{0}>{1}</{0}>", self.name, escape_xml(text))
            }
            Content::Children(children) => {
                writeln!(out, "{pad}<{}>", self.name)?;
                for child in children {
                    child.write_to(out, depth + 1)?;
                }
                writeln!(out, "{pad}</{}>", self.name)
            }
        }
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Escape text content for XML.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested() {
        let fragment = Element::new("file")
            .with("path", "/users.tsv")
            .with("format", "TabSeparated");
        assert_eq!(
            fragment.render(),
            "<file>\n    <path>/users.tsv</path>\n    <format>TabSeparated</format>\n</file>\n"
        );
    }

    #[test]
    fn test_escape_and_find() {
        let fragment = Element::new("mysql")
            .with("password", "a&b<c")
            .with_opt("user", None::<&str>);
        let rendered = fragment.render();
        assert!(rendered.contains("<password>a&amp;b&lt;c</password>"));
        assert!(!rendered.contains("<user>"));
        assert_eq!(fragment.find_text("password"), Some("a&b<c"));
    }

    #[test]
    fn test_empty_element() {
        assert_eq!(Element::new("flat").render(), "<flat/>\n");
    }
}
