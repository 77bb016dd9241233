use std::fs::File;
use std::io::Read;
use std::path::Path;

use roxmltree::{Document, Node};

use super::error::ParseError;

/// The input shapes a [`RecordParser`] accepts.
///
/// [`RecordParser::parse`] tries them in a fixed order:
///
/// 1. `Node` is decoded directly.
/// 2. `Document` unwraps to its root element and goes to 1.
/// 3. `Value` is decoded directly by parsers that read structured documents.
/// 4. `Reader` is read to the end and parsed in the parser's encoding.
/// 5. `Path`, or a `Str` naming an existing file, is opened and read.
/// 6. Anything else is raw text. A path that does not exist is therefore
///    parsed as literal content.
pub enum Source<'a, 'input> {
    Node(Node<'a, 'input>),
    Document(&'a Document<'input>),
    Value(&'a serde_json::Value),
    Reader(Box<dyn Read + 'a>),
    Path(&'a Path),
    Str(&'a str),
    Bytes(&'a [u8]),
}

impl<'a> Source<'a, 'a> {
    pub fn reader(reader: impl Read + 'a) -> Self {
        Source::Reader(Box::new(reader))
    }
}

impl<'a, 'input> From<Node<'a, 'input>> for Source<'a, 'input> {
    fn from(node: Node<'a, 'input>) -> Self {
        Source::Node(node)
    }
}

impl<'a, 'input> From<&'a Document<'input>> for Source<'a, 'input> {
    fn from(doc: &'a Document<'input>) -> Self {
        Source::Document(doc)
    }
}

impl<'a> From<&'a serde_json::Value> for Source<'a, 'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        Source::Value(value)
    }
}

impl<'a> From<&'a Path> for Source<'a, 'a> {
    fn from(path: &'a Path) -> Self {
        Source::Path(path)
    }
}

impl<'a> From<&'a str> for Source<'a, 'a> {
    fn from(s: &'a str) -> Self {
        Source::Str(s)
    }
}

impl<'a> From<&'a [u8]> for Source<'a, 'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Source::Bytes(bytes)
    }
}

/// A decoder from one source format into a sequence of typed records.
///
/// Implementors provide the terminal decoders; the provided [`parse`]
/// method routes every [`Source`] shape onto them.
///
/// [`parse`]: RecordParser::parse
pub trait RecordParser {
    type Record;

    /// Semantic names of the record fields, in order.
    fn fields(&self) -> &'static [&'static str];

    fn decode_node(&self, node: Node<'_, '_>) -> Result<Vec<Self::Record>, ParseError>;

    fn decode_value(&self, _value: &serde_json::Value) -> Result<Vec<Self::Record>, ParseError> {
        Err(ParseError::UnsupportedSource("structured value"))
    }

    /// Parses raw text in the parser's encoding. XML unless overridden.
    fn decode_text(&self, text: &str) -> Result<Vec<Self::Record>, ParseError> {
        let doc = Document::parse(text)?;
        self.decode_node(doc.root_element())
    }

    fn decode_reader(&self, reader: &mut dyn Read) -> Result<Vec<Self::Record>, ParseError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.decode_text(&text)
    }

    fn decode_file(&self, path: &Path) -> Result<Vec<Self::Record>, ParseError> {
        log::debug!("reading {}", path.display());
        let mut file = File::open(path)?;
        self.decode_reader(&mut file)
    }

    fn parse(&self, source: Source<'_, '_>) -> Result<Vec<Self::Record>, ParseError> {
        match source {
            Source::Node(node) => self.decode_node(node),
            Source::Document(doc) => self.parse(Source::Node(doc.root_element())),
            Source::Value(value) => self.decode_value(value),
            Source::Reader(mut reader) => self.decode_reader(&mut *reader),
            Source::Path(path) if path.exists() => self.decode_file(path),
            Source::Path(path) => self.decode_text(&path.to_string_lossy()),
            Source::Str(s) if Path::new(s).exists() => self.decode_file(Path::new(s)),
            Source::Str(s) => self.decode_text(s),
            Source::Bytes(bytes) => self.decode_text(std::str::from_utf8(bytes)?),
        }
    }
}

/// First descendant of `node` (or `node` itself) with the given qualified name.
pub(crate) fn find<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants()
        .find(|n| n.is_element() && n.has_tag_name((namespace, name)))
}

/// Text of the first matching descendant, which must exist.
pub(crate) fn find_text<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &str,
    name: &'static str,
) -> Result<&'a str, ParseError> {
    let child = find(node, namespace, name).ok_or(ParseError::MissingElement(name))?;
    Ok(child.text().unwrap_or_default())
}

pub(crate) fn parse_f64(field: &'static str, text: &str) -> Result<f64, ParseError> {
    text.trim()
        .parse()
        .map_err(|_| ParseError::number(field, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Names;

    impl RecordParser for Names {
        type Record = String;

        fn fields(&self) -> &'static [&'static str] {
            &["name"]
        }

        fn decode_node(&self, node: Node<'_, '_>) -> Result<Vec<String>, ParseError> {
            Ok(node
                .descendants()
                .filter(|n| n.has_tag_name("item"))
                .filter_map(|n| n.attribute("name"))
                .map(String::from)
                .collect())
        }
    }

    const XML: &str = r#"<list><item name="a"/><item name="b"/></list>"#;

    #[test]
    fn every_shape_reaches_the_node_decoder() {
        let doc = Document::parse(XML).unwrap();
        let expected = vec!["a".to_string(), "b".to_string()];

        assert_eq!(Names.parse(Source::Node(doc.root_element())).unwrap(), expected);
        assert_eq!(Names.parse((&doc).into()).unwrap(), expected);
        assert_eq!(Names.parse(Source::reader(XML.as_bytes())).unwrap(), expected);
        assert_eq!(Names.parse(XML.into()).unwrap(), expected);
        assert_eq!(Names.parse(XML.as_bytes().into()).unwrap(), expected);
    }

    #[test]
    fn existing_path_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.xml");
        std::fs::write(&path, XML).unwrap();

        assert_eq!(Names.parse(path.as_path().into()).unwrap().len(), 2);
        assert_eq!(Names.parse(Source::Str(path.to_str().unwrap())).unwrap().len(), 2);
    }

    #[test]
    fn missing_path_falls_through_to_text() {
        let err = Names.parse(Source::Str("/no/such/file.xml")).unwrap_err();
        assert!(matches!(err, ParseError::Xml(_)));
    }

    #[test]
    fn structured_values_are_rejected_by_default() {
        let value = serde_json::json!({});
        let err = Names.parse((&value).into()).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedSource(_)));
    }
}
