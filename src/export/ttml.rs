use crate::errors::ExportError;
use crate::export::check_timestamp;
use crate::subtitle::SubtitleSet;

// @module: TTML serializer

// @const: TTML namespace
pub const TTML_NAMESPACE: &str = "http://www.w3.org/ns/ttml";

// @const: TTML styling namespace
pub const TTML_STYLING_NAMESPACE: &str = "http://www.w3.org/ns/ttml#styling";

// @const: Document language
pub const TTML_LANGUAGE: &str = "ru";

// @const: Id of the single paragraph style
pub const DEFAULT_STYLE_ID: &str = "defaultStyle";

/// Render a subtitle set as TTML
///
/// One `<p>` per segment, in set order, carrying the segment text. Word
/// timing is not represented. The style block is a fixed default (centered,
/// white, 18px). The display name is not used in the document body.
pub fn to_ttml(set: &SubtitleSet, _display_name: &str) -> Result<String, ExportError> {
    let mut out = String::with_capacity(256 + set.len() * 96);

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!(
        "<tt xmlns=\"{}\" xmlns:tts=\"{}\" xml:lang=\"{}\">\n",
        TTML_NAMESPACE, TTML_STYLING_NAMESPACE, TTML_LANGUAGE
    ));
    out.push_str("  <head>\n");
    out.push_str("    <styling>\n");
    out.push_str(&format!(
        "      <style xml:id=\"{}\" tts:textAlign=\"center\" tts:color=\"white\" tts:fontSize=\"18px\" />\n",
        DEFAULT_STYLE_ID
    ));
    out.push_str("    </styling>\n");
    out.push_str("  </head>\n");
    out.push_str("  <body>\n");
    out.push_str("    <div>\n");

    for (index, segment) in set.iter().enumerate() {
        let begin = check_timestamp(segment.start, index, None)?;
        let end = check_timestamp(segment.end, index, None)?;

        out.push_str(&format!(
            "      <p begin=\"{:.1}s\" end=\"{:.1}s\" style=\"{}\">{}</p>\n",
            begin,
            end,
            DEFAULT_STYLE_ID,
            escape_xml(&segment.text)
        ));
    }

    out.push_str("    </div>\n");
    out.push_str("  </body>\n");
    out.push_str("</tt>\n");

    Ok(out)
}

/// Escape text for use as XML element content
///
/// Quotes are left as-is; they only need escaping inside attribute values.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
