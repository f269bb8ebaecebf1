//! Serializes an [`SvgDocument`] back to text.

use std::fmt::Write;

use super::node::{NodeId, NodeKind, SvgDocument, SvgElement};

// --- Escaping ---

/// Escapes special XML characters (`&`, `<`, `>`) for use in text content.
pub(crate) fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes a value for use inside a double-quoted attribute.
pub(crate) fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\n', "&#10;")
        .replace('\t', "&#9;")
}

// --- Writing ---

pub(crate) fn write_document(document: &SvgDocument) -> Result<String, std::fmt::Error> {
    let mut output = String::new();
    let top_level = document.children(document.document_node());
    for (position, child) in top_level.iter().enumerate() {
        // Top-level siblings have no surrounding text nodes; keep each on its own line.
        if position > 0 {
            output.push('\n');
        }
        write_node(document, *child, &mut output)?;
    }
    Ok(output)
}

fn write_node(document: &SvgDocument, id: NodeId, output: &mut String) -> std::fmt::Result {
    match document.kind(id) {
        NodeKind::Document => {
            for child in document.children(id) {
                write_node(document, *child, output)?;
            }
        }
        NodeKind::Element(element) => write_element(document, id, element, output)?,
        NodeKind::Text(text) => output.push_str(&escape_text(text)),
        NodeKind::CData(text) => {
            // A literal "]]>" has to be split across two sections.
            write!(output, "<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))?;
        }
        NodeKind::Comment(text) => write!(output, "<!--{}-->", text)?,
        NodeKind::ProcessingInstruction { target, value } => match value {
            Some(value) => write!(output, "<?{} {}?>", target, value)?,
            None => write!(output, "<?{}?>", target)?,
        },
    }
    Ok(())
}

fn write_element(
    document: &SvgDocument,
    id: NodeId,
    element: &SvgElement,
    output: &mut String,
) -> std::fmt::Result {
    let name = element.qualified_name();
    write!(output, "<{}", name)?;
    for ns in &element.namespaces {
        match &ns.prefix {
            Some(prefix) => write!(output, r#" xmlns:{}="{}""#, prefix, escape_attribute(&ns.uri))?,
            None => write!(output, r#" xmlns="{}""#, escape_attribute(&ns.uri))?,
        }
    }
    for attr in &element.attributes {
        write!(output, r#" {}="{}""#, attr.name, escape_attribute(&attr.value))?;
    }

    let children = document.children(id);
    if children.is_empty() {
        output.push_str("/>");
        return Ok(());
    }
    output.push('>');
    for child in children {
        write_node(document, *child, output)?;
    }
    write!(output, "</{}>", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_of_canonical_document() {
        let text = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">
  <!-- plan -->
  <g id="layer"><rect id="a" width="5" height="5"/></g>
  <text x="1">Lvi &amp; tygři</text>
</svg>"#;
        let document = SvgDocument::parse(text).expect("document parses");
        let written = write_document(&document).expect("document writes");
        assert_eq!(written, text);
    }

    #[test]
    fn test_prefixed_document_round_trip() {
        let text = r##"<svg:svg xmlns:svg="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><svg:use xlink:href="#a"/></svg:svg>"##;
        let document = SvgDocument::parse(text).expect("document parses");
        assert_eq!(write_document(&document).expect("document writes"), text);
    }

    #[test]
    fn test_attribute_escaping() {
        assert_eq!(
            escape_attribute(r#"a "b" & <c>"#),
            "a &quot;b&quot; &amp; &lt;c&gt;"
        );
    }

    #[test]
    fn test_cdata_terminator_is_split() {
        let mut document = SvgDocument::parse(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#)
            .expect("document parses");
        let root = document.root_element();
        let script = document.create_node(NodeKind::CData("a ]]> b".to_string()));
        document.append_child(root, script);
        let written = write_document(&document).expect("document writes");
        assert_eq!(
            written,
            r#"<svg xmlns="http://www.w3.org/2000/svg"><![CDATA[a ]]]]><![CDATA[> b]]></svg>"#
        );
    }
}
