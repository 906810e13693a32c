use html_escape::encode_text;

use crate::opds::{Summary, TextKind};

/// Produce safe markup from an entry summary.
///
/// Script and style elements are removed together with their content, event
/// handler attributes and `javascript:` URLs are dropped, and inline formatting
/// such as `<b>`, `<i>` and `<br>` survives. Never fails.
pub fn sanitize_summary(summary: &Summary) -> String {
    match summary.kind {
        TextKind::Text => ammonia::clean(&encode_text(&summary.content)),
        TextKind::Html | TextKind::Xhtml => ammonia::clean(&summary.content),
    }
}
