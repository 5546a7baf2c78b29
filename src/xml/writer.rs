//! Tag writers. Each opening tag is paired with exactly one closing tag and the
//! indentation depth follows the nesting.

use std::borrow::Cow;
use std::io::{self, Write};

use crate::xml::pair::XmlValue;
use crate::xml::tabs::Tabs;

/// Escape text content: the five XML special characters plus `\r`, which
/// line-ending normalization would otherwise read back as `\n`.
pub fn escape(raw: &str) -> Cow<'_, str> {
    escape_with(raw, &['&', '<', '>', '"', '\'', '\r'])
}

/// Escape an attribute value. Attribute-value normalization turns raw
/// `\n`, `\r` and `\t` into spaces, so these are written as character references.
pub fn escape_attribute(raw: &str) -> Cow<'_, str> {
    escape_with(raw, &['&', '<', '>', '"', '\'', '\r', '\n', '\t'])
}

fn escape_with<'a>(raw: &'a str, special: &[char]) -> Cow<'a, str> {
    if !raw.contains(special) {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        if !special.contains(&c) {
            escaped.push(c);
            continue;
        }
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\r' => escaped.push_str("&#13;"),
            '\n' => escaped.push_str("&#10;"),
            '\t' => escaped.push_str("&#9;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn write_attrs<W: Write + ?Sized>(out: &mut W, attrs: &[(&str, &str)]) -> io::Result<()> {
    for (key, value) in attrs {
        write!(out, " {}=\"{}\"", key, escape_attribute(value))?;
    }
    Ok(())
}

/// Write `<element name="...">` and increase the indentation.
///
/// An empty `name` omits the attribute.
pub fn write_opening_tag<W: Write + ?Sized>(
    element: &str,
    out: &mut W,
    tabs: &mut Tabs,
    name: &str,
) -> io::Result<()> {
    if name.is_empty() {
        write_opening_tag_with_attrs(element, out, tabs, &[])
    } else {
        write_opening_tag_with_attrs(element, out, tabs, &[("name", name)])
    }
}

/// Write `<element k="v" ...>` and increase the indentation.
pub fn write_opening_tag_with_attrs<W: Write + ?Sized>(
    element: &str,
    out: &mut W,
    tabs: &mut Tabs,
    attrs: &[(&str, &str)],
) -> io::Result<()> {
    tabs.write_tabs(out)?;
    write!(out, "<{}", element)?;
    write_attrs(out, attrs)?;
    writeln!(out, ">")?;
    tabs.increase();
    Ok(())
}

/// Decrease the indentation and write `</element>`.
pub fn write_closing_tag<W: Write + ?Sized>(
    element: &str,
    out: &mut W,
    tabs: &mut Tabs,
) -> io::Result<()> {
    tabs.decrease();
    tabs.write_tabs(out)?;
    writeln!(out, "</{}>", element)
}

/// Write a single-line `<element>value</element>`.
pub fn write_element<T: XmlValue, W: Write + ?Sized>(
    value: &T,
    element: &str,
    out: &mut W,
    tabs: &Tabs,
) -> io::Result<()> {
    write_element_with_attrs(value, element, out, tabs, &[])
}

/// Write a single-line `<element k="v">value</element>`.
pub fn write_element_with_attrs<T: XmlValue, W: Write + ?Sized>(
    value: &T,
    element: &str,
    out: &mut W,
    tabs: &Tabs,
    attrs: &[(&str, &str)],
) -> io::Result<()> {
    tabs.write_tabs(out)?;
    write!(out, "<{}", element)?;
    write_attrs(out, attrs)?;
    writeln!(out, ">{}</{}>", escape(&value.to_xml_text()), element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_nested_tags_when_written_then_indentation_follows_depth() {
        let mut out = Vec::new();
        let mut tabs = Tabs::new();

        write_opening_tag("outer", &mut out, &mut tabs, "").unwrap();
        write_opening_tag("inner", &mut out, &mut tabs, "x").unwrap();
        write_element(&1.5_f64, "leaf", &mut out, &tabs).unwrap();
        write_closing_tag("inner", &mut out, &mut tabs).unwrap();
        write_closing_tag("outer", &mut out, &mut tabs).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "<outer>\n\t<inner name=\"x\">\n\t\t<leaf>1.5</leaf>\n\t</inner>\n</outer>\n"
        );
        assert_eq!(tabs.depth(), 0);
    }

    #[test]
    fn given_special_characters_when_escaping_then_replaces_entities() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn given_whitespace_controls_when_escaping_then_attribute_keeps_them_as_references() {
        assert_eq!(escape_attribute("a\nb\tc\rd"), "a&#10;b&#9;c&#13;d");
        assert_eq!(escape("a\nb\tc\rd"), "a\nb\tc&#13;d");
        assert!(matches!(escape_attribute("plain name"), Cow::Borrowed(_)));
    }

    #[test]
    fn given_attribute_with_quote_when_writing_then_attribute_is_escaped() {
        let mut out = Vec::new();
        let mut tabs = Tabs::new();
        write_opening_tag("region", &mut out, &mut tabs, "a\"b").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<region name=\"a&quot;b\">\n");
    }
}
