//! Style and script blocks embedded into the preview and the interactive export.
//!
//! The text built here lands in `<style>` text nodes and a `<script>` CDATA section, so
//! the stylesheets avoid `<`, `>` and `&` (they would be written as entities).

use std::fmt::Write;

use crate::constants::{CONFIGURED_CLASS, ENCLOSURE_CLASS, POPUP_ID, SVG_NAMESPACE};
use crate::models::area::AreaType;

/// One fill rule per area type, e.g. `.water { fill: #87CEEB !important; }`.
fn area_fill_rules(output: &mut String) -> std::fmt::Result {
    for area_type in AreaType::ALL {
        writeln!(
            output,
            "  .{} {{ fill: {} !important; }}",
            area_type.as_str(),
            area_type.fill_color()
        )?;
    }
    Ok(())
}

/// Stylesheet of the highlighted preview: a shared outline plus the fill rules.
pub fn preview_stylesheet() -> Result<String, std::fmt::Error> {
    let mut css = String::from("\n");
    writeln!(
        css,
        "  .{} {{ stroke: #27ae60 !important; stroke-width: 3 !important; opacity: 0.8; }}",
        CONFIGURED_CLASS
    )?;
    area_fill_rules(&mut css)?;
    Ok(css)
}

/// Stylesheet of the interactive export: hover feedback for enclosures, the popup look
/// and the same fill rules as the preview.
pub fn export_stylesheet() -> Result<String, std::fmt::Error> {
    let mut css = String::from("\n");
    writeln!(
        css,
        "  .{} {{ cursor: pointer; transition: all 0.3s ease; }}",
        ENCLOSURE_CLASS
    )?;
    writeln!(
        css,
        "  .{}:hover {{ opacity: 0.85; }}",
        ENCLOSURE_CLASS
    )?;
    writeln!(
        css,
        "  .{}:hover * {{ stroke: #008b8b !important; stroke-width: 4 !important; }}",
        ENCLOSURE_CLASS
    )?;
    writeln!(css, "  .{} {{ cursor: pointer; }}", AreaType::Facility.as_str())?;
    writeln!(
        css,
        "  #{0} rect {{ fill: #ffffff; stroke: #2c3e50; stroke-width: 1.5; rx: 8; }}",
        POPUP_ID
    )?;
    writeln!(
        css,
        "  #{0} text {{ font-family: sans-serif; font-size: 14px; fill: #2c3e50; }}",
        POPUP_ID
    )?;
    writeln!(
        css,
        "  #{0} .popup-title {{ font-size: 16px; font-weight: bold; }}",
        POPUP_ID
    )?;
    writeln!(css, "  #{0} .popup-close {{ cursor: pointer; fill: #c0392b; }}", POPUP_ID)?;
    area_fill_rules(&mut css)?;
    Ok(css)
}

const SCRIPT_TEMPLATE: &str = r#"
var ZOO_SVG_NS = '__SVG_NS__';
var ZOO_POPUP_ID = '__POPUP_ID__';

function closePopup() {
  var popup = document.getElementById(ZOO_POPUP_ID);
  if (popup && popup.parentNode) {
    popup.parentNode.removeChild(popup);
  }
}

function showPopup(target, title, lines) {
  closePopup();
  var root = target.ownerSVGElement || document.documentElement;
  var box = target.getBBox();
  var x = box.x + box.width + 16;
  var y = box.y + 24;
  var popup = document.createElementNS(ZOO_SVG_NS, 'g');
  popup.setAttribute('id', ZOO_POPUP_ID);
  var background = document.createElementNS(ZOO_SVG_NS, 'rect');
  popup.appendChild(background);
  var rows = [title].concat(lines);
  for (var i = 0; i < rows.length; i++) {
    var text = document.createElementNS(ZOO_SVG_NS, 'text');
    text.setAttribute('x', x);
    text.setAttribute('y', y + i * 20);
    if (i === 0) {
      text.setAttribute('class', 'popup-title');
    }
    text.textContent = rows[i];
    popup.appendChild(text);
  }
  var close = document.createElementNS(ZOO_SVG_NS, 'text');
  close.setAttribute('class', 'popup-close');
  close.textContent = '✕';
  close.addEventListener('click', function (event) {
    event.stopPropagation();
    closePopup();
  });
  popup.appendChild(close);
  root.appendChild(popup);
  var inner = popup.getBBox();
  background.setAttribute('x', inner.x - 12);
  background.setAttribute('y', inner.y - 10);
  background.setAttribute('width', inner.width + 44);
  background.setAttribute('height', inner.height + 20);
  close.setAttribute('x', inner.x + inner.width + 14);
  close.setAttribute('y', inner.y + 8);
}

function selectEnclosure(id) {
  var node = document.getElementById(id);
  if (!node) {
    return;
  }
  var target = node.closest ? node.closest('[data-enclosure]') : node;
  if (!target) {
    return;
  }
  var lines = [];
  var info = target.getAttribute('data-info');
  if (info) {
    lines.push(info);
  }
  var zone = target.getAttribute('data-zone');
  if (zone) {
    lines.push('Zóna: ' + zone);
  }
  var animals = target.getAttribute('data-animals');
  if (animals) {
    var emojis = target.getAttribute('data-animal-emojis') || '';
    var count = target.getAttribute('data-animal-count') || '';
    lines.push(emojis + ' ' + animals + ' (' + count + ')');
  }
  var feeding = target.getAttribute('data-feeding-times');
  if (feeding) {
    lines.push('Krmení: ' + feeding);
  }
  showPopup(target, target.getAttribute('data-enclosure'), lines);
}

function showFacility(element) {
  var name = element.getAttribute('data-facility-name') || element.getAttribute('data-facility-type');
  showPopup(element, name, []);
}

document.addEventListener('click', function (event) {
  var target = event.target;
  if (target && target.closest && (target.closest('[data-enclosure]') || target.closest('[data-facility-type]') || target.closest('#' + ZOO_POPUP_ID))) {
    return;
  }
  closePopup();
});
"#;

/// Click handling of the interactive export. All popup content is read from the
/// `data-*` attributes of the clicked region.
pub fn interaction_script() -> String {
    SCRIPT_TEMPLATE
        .replace("__SVG_NS__", SVG_NAMESPACE)
        .replace("__POPUP_ID__", POPUP_ID)
}

/// Quotes `value` as a single-quoted JavaScript string literal.
pub fn js_string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => literal.push_str("\\\\"),
            '\'' => literal.push_str("\\'"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            _ => literal.push(ch),
        }
    }
    literal.push('\'');
    literal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_stylesheet_has_rule_per_area_type() {
        let css = preview_stylesheet().expect("stylesheet builds");
        assert!(css.contains(".configured-element {"));
        for area_type in AreaType::ALL {
            assert!(
                css.contains(&format!(".{} {{ fill: {}", area_type.as_str(), area_type.fill_color())),
                "missing fill rule for {}",
                area_type
            );
        }
    }

    #[test]
    fn test_stylesheets_are_safe_as_text_nodes() {
        for css in [
            preview_stylesheet().expect("stylesheet builds"),
            export_stylesheet().expect("stylesheet builds"),
        ] {
            assert!(!css.contains('<') && !css.contains('>') && !css.contains('&'));
        }
    }

    #[test]
    fn test_script_defines_handlers() {
        let script = interaction_script();
        assert!(script.contains("function selectEnclosure(id)"));
        assert!(script.contains("function closePopup()"));
        assert!(script.contains("function showFacility(element)"));
        assert!(script.contains("'zoo-popup'"));
        assert!(script.contains("'http://www.w3.org/2000/svg'"));
        assert!(!script.contains("]]>"), "script must fit in one CDATA section");
    }

    #[test]
    fn test_js_string_literal_escapes_quotes() {
        assert_eq!(js_string_literal("c1"), "'c1'");
        assert_eq!(js_string_literal("it's"), r"'it\'s'");
        assert_eq!(js_string_literal(r"a\b"), r"'a\\b'");
    }
}
