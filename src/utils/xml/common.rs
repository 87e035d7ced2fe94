use quick_xml::escape::{escape, unescape};
use quick_xml::{Reader, Writer, events::BytesStart};
use std::borrow::Cow;
use std::io::Cursor;

pub type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Elements that never take children in HTML.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

#[inline]
pub fn create_xml_reader(content: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(false);
    reader.config_mut().enable_all_checks(false);
    // `a && b` in inline scripts
    reader.config_mut().allow_dangling_amp = true;
    reader
}

#[inline]
pub fn is_void_element(name: &[u8]) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.as_bytes().eq_ignore_ascii_case(name))
}

/// Look up an attribute value, tolerating unquoted and valueless HTML attributes.
///
/// Character references are decoded. Values with references quick-xml does
/// not know (`&nbsp;`, stray `&`) are returned as written.
pub fn get_attr<'a>(elem: &'a BytesStart<'_>, key: &str) -> Option<Cow<'a, str>> {
    let attr = elem
        .html_attributes()
        .flatten()
        .find(|attr| attr.key.as_ref().eq_ignore_ascii_case(key.as_bytes()))?;
    let raw = match attr.value {
        Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
        Cow::Owned(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
    };
    let decoded = match unescape(&raw) {
        Ok(Cow::Owned(decoded)) => Some(decoded),
        _ => None,
    };
    Some(decoded.map_or(raw, Cow::Owned))
}

/// Whether the whitespace-separated `class` attribute contains `class`.
pub fn has_class(elem: &BytesStart<'_>, class: &str) -> bool {
    get_attr(elem, "class").is_some_and(|value| value.split_ascii_whitespace().any(|c| c == class))
}

/// Rebuild an element with transformed attributes (avoids duplication bug).
pub fn rebuild_elem<F>(elem: &BytesStart<'_>, mut transform: F) -> BytesStart<'static>
where
    F: FnMut(&[u8], Cow<'_, [u8]>) -> Cow<'static, [u8]>,
{
    let tag = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
    let attrs: Vec<_> = elem
        .html_attributes()
        .flatten()
        .map(|attr| {
            let key = attr.key.as_ref().to_vec();
            let value = transform(attr.key.as_ref(), attr.value);
            (key, value)
        })
        .collect();

    // every value is written back double-quoted
    let mut new_elem = BytesStart::new(tag);
    for (k, v) in attrs {
        new_elem.push_attribute((k.as_slice(), escape_quotes(&v).as_ref()));
    }
    new_elem
}

/// Replace `"` with `&quot;` in a raw attribute value.
fn escape_quotes(value: &[u8]) -> Cow<'_, [u8]> {
    if !value.contains(&b'"') {
        return Cow::Borrowed(value);
    }
    let mut out = Vec::with_capacity(value.len() + 8);
    for &byte in value {
        match byte {
            b'"' => out.extend_from_slice(b"&quot;"),
            _ => out.push(byte),
        }
    }
    Cow::Owned(out)
}

/// Rebuild an element with one attribute replaced, leaving the rest untouched.
///
/// `value` is the decoded text and gets escaped here.
pub fn with_attr(elem: &BytesStart<'_>, key: &str, value: &str) -> BytesStart<'static> {
    let escaped = escape(value);
    rebuild_elem(elem, |k, v| {
        if k.eq_ignore_ascii_case(key.as_bytes()) {
            Cow::Owned(escaped.as_bytes().to_vec())
        } else {
            Cow::Owned(v.into_owned())
        }
    })
}
