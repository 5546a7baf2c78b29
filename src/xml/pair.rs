//! Generic name/value pair parsing over element text.

use roxmltree::Node;
use tracing::debug;

/// Capability contract for values that can live inside an element's text.
///
/// `from_xml_text` returns `None` when the text is not a valid rendering of the type.
pub trait XmlValue: Sized {
    fn from_xml_text(text: &str) -> Option<Self>;
    fn to_xml_text(&self) -> String;
}

macro_rules! impl_xml_value_via_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl XmlValue for $ty {
                fn from_xml_text(text: &str) -> Option<Self> {
                    text.trim().parse().ok()
                }

                fn to_xml_text(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_xml_value_via_from_str!(f64, f32, i32, i64, u32, u64, usize, bool);

impl XmlValue for String {
    fn from_xml_text(text: &str) -> Option<Self> {
        Some(text.to_string())
    }

    fn to_xml_text(&self) -> String {
        self.clone()
    }
}

/// An element carrying an optional `name` attribute and a typed text value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlPair<T> {
    name: String,
    value: T,
}

impl<T> XmlPair<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T: XmlValue> XmlPair<T> {
    /// Read the `name` attribute and convert the element's direct text into `T`.
    ///
    /// Returns `false` for non-element nodes and for text `T` cannot represent.
    pub fn parse(&mut self, node: Node<'_, '_>) -> bool {
        if !node.is_element() {
            return false;
        }
        self.name = node.attribute("name").unwrap_or_default().to_string();

        let text: String = node
            .children()
            .filter(|child| child.is_text())
            .filter_map(|child| child.text())
            .collect();

        match T::from_xml_text(&text) {
            Some(value) => {
                self.value = value;
                true
            }
            None => {
                debug!(
                    "cannot convert {:?} in <{}>",
                    text,
                    node.tag_name().name()
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn given_numeric_text_with_whitespace_when_parsing_then_value_is_trimmed() {
        let doc = Document::parse("<value name=\"k\"> 2.5 </value>").unwrap();
        let mut pair = XmlPair::<f64>::default();

        assert!(pair.parse(doc.root_element()));
        assert_eq!(pair.name(), "k");
        assert_eq!(*pair.value(), 2.5);
    }

    #[test]
    fn given_non_numeric_text_when_parsing_as_number_then_fails() {
        let doc = Document::parse("<value>abc</value>").unwrap();
        let mut pair = XmlPair::<i32>::default();
        assert!(!pair.parse(doc.root_element()));
    }

    #[test]
    fn given_empty_element_when_parsing_as_string_then_value_is_empty() {
        let doc = Document::parse("<value/>").unwrap();
        let mut pair = XmlPair::<String>::default();
        assert!(pair.parse(doc.root_element()));
        assert_eq!(pair.value(), "");
    }
}
