use std::sync::Arc;

use html_escape::{decode_html_entities, encode_text};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::model::{Category, OpdsEntry, OpdsFeed, OpdsLink, Person, Summary, TextKind};
use super::FeedKind;
use crate::app::{OpdsError, Result};

/// Parse an Atom/OPDS document into the object graph the normalizer consumes.
///
/// Structural validation stops at well-formedness: a feed without an `<id>`
/// still parses, and it is up to the caller to reject it.
pub fn parse_feed(body: &[u8]) -> Result<OpdsFeed> {
    let content = std::str::from_utf8(body)
        .map_err(|e| OpdsError::FeedParse(format!("feed is not valid UTF-8: {}", e)))?;

    let mut reader = Reader::from_str(content);
    let mut builder = FeedBuilder::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => builder.start(&e)?,
            Event::Empty(e) => builder.empty(&e)?,
            Event::End(e) => {
                let name = e.name();
                builder.end(name.as_ref());
            }
            Event::Text(e) => builder.text(&String::from_utf8_lossy(&e)),
            Event::CData(e) => builder.text(&String::from_utf8_lossy(&e.into_inner())),
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(&e);
                builder.text(&resolve_reference(&entity));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    builder.finish()
}

/// Strip a namespace prefix: `opds:facetGroup` -> `facetGroup`.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().rposition(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Resolve a general reference that quick-xml reports separately from text.
/// Unknown named entities are passed through untouched.
pub(crate) fn resolve_reference(entity: &str) -> String {
    match entity {
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "amp" => "&".to_string(),
        "apos" => "'".to_string(),
        "quot" => "\"".to_string(),
        _ => {
            let code = entity.strip_prefix('#').and_then(|num| {
                match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => num.parse::<u32>().ok(),
                }
            });
            match code.and_then(char::from_u32) {
                Some(c) => c.to_string(),
                None => format!("&{};", entity),
            }
        }
    }
}

pub(crate) fn attributes(e: &BytesStart) -> Result<Vec<(String, String)>> {
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| OpdsError::FeedParse(err.to_string()))?;
        let key = String::from_utf8_lossy(local_name(attr.key.as_ref())).to_string();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&raw)
            .map_err(|err| OpdsError::FeedParse(err.to_string()))?
            .into_owned();
        attrs.push((key, value));
    }
    Ok(attrs)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Author,
    Contributor,
}

struct PendingPerson {
    role: Role,
    person: Person,
}

/// `<summary>` or `<content>` being collected.
struct RichText {
    from_content: bool,
    kind: TextKind,
    depth: usize,
    buf: String,
}

#[derive(Default)]
struct FeedBuilder {
    feed_seen: bool,
    id: Option<String>,
    title: Option<String>,
    links: Vec<OpdsLink>,
    entries: Vec<Arc<OpdsEntry>>,
    entry: Option<OpdsEntry>,
    person: Option<PendingPerson>,
    rich: Option<RichText>,
    text: String,
}

impl FeedBuilder {
    fn start(&mut self, e: &BytesStart) -> Result<()> {
        if let Some(rich) = self.rich.as_mut() {
            rich.buf.push('<');
            rich.buf.push_str(&String::from_utf8_lossy(e));
            rich.buf.push('>');
            rich.depth += 1;
            return Ok(());
        }

        self.text.clear();
        let name = e.name();
        match local_name(name.as_ref()) {
            b"feed" => self.feed_seen = true,
            b"entry" => self.entry = Some(OpdsEntry::default()),
            b"author" => self.begin_person(Role::Author),
            b"contributor" => self.begin_person(Role::Contributor),
            b"summary" | b"content" if self.entry.is_some() => {
                let kind = attributes(e)?
                    .into_iter()
                    .find(|(k, _)| k == "type")
                    .map(|(_, v)| TextKind::from_type_attr(&v))
                    .unwrap_or_default();
                self.rich = Some(RichText {
                    from_content: local_name(name.as_ref()) == b"content",
                    kind,
                    depth: 0,
                    buf: String::new(),
                });
            }
            b"link" => {
                let link = parse_link(e)?;
                match self.entry.as_mut() {
                    Some(entry) => entry.links.push(link),
                    None => self.links.push(link),
                }
            }
            b"category" => {
                if let Some(entry) = self.entry.as_mut() {
                    let mut category = Category::default();
                    for (key, value) in attributes(e)? {
                        match key.as_str() {
                            "term" => category.term = value,
                            "label" => category.label = Some(value),
                            _ => {}
                        }
                    }
                    entry.categories.push(category);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn empty(&mut self, e: &BytesStart) -> Result<()> {
        if let Some(rich) = self.rich.as_mut() {
            rich.buf.push('<');
            rich.buf.push_str(&String::from_utf8_lossy(e));
            rich.buf.push_str("/>");
            return Ok(());
        }
        self.start(e)?;
        let name = e.name();
        self.end(name.as_ref());
        Ok(())
    }

    fn end(&mut self, qname: &[u8]) {
        if let Some(rich) = self.rich.as_mut() {
            if rich.depth > 0 {
                rich.buf.push_str("</");
                rich.buf.push_str(&String::from_utf8_lossy(qname));
                rich.buf.push('>');
                rich.depth -= 1;
                return;
            }
            if let Some(rich) = self.rich.take() {
                self.finish_rich(rich);
            }
            return;
        }

        let text = std::mem::take(&mut self.text);
        let value = text.trim();

        if let Some(pending) = self.person.as_mut() {
            match local_name(qname) {
                b"name" => pending.person.name = value.to_string(),
                b"uri" => pending.person.uri = Some(value.to_string()),
                b"author" | b"contributor" => self.finish_person(),
                _ => {}
            }
            return;
        }

        let name = local_name(qname);
        if name == b"entry" {
            if let Some(entry) = self.entry.take() {
                self.entries.push(Arc::new(entry));
            }
            return;
        }

        match (name, self.entry.as_mut()) {
            (b"id", Some(entry)) => entry.id = non_empty(value),
            (b"title", Some(entry)) => entry.title = non_empty(&decode_html_entities(value)),
            (b"published", Some(entry)) => entry.published = non_empty(value),
            (b"issued", Some(entry)) => {
                if entry.published.is_none() {
                    entry.published = non_empty(value);
                }
            }
            (b"publisher", Some(entry)) => entry.publisher = non_empty(value),
            (b"id", None) => self.id = non_empty(value),
            (b"title", None) => self.title = non_empty(&decode_html_entities(value)),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        match self.rich.as_mut() {
            Some(rich) if rich.kind == TextKind::Xhtml => rich.buf.push_str(&encode_text(text)),
            Some(rich) => rich.buf.push_str(text),
            None => self.text.push_str(text),
        }
    }

    fn begin_person(&mut self, role: Role) {
        self.person = Some(PendingPerson {
            role,
            person: Person::default(),
        });
    }

    fn finish_person(&mut self) {
        let Some(pending) = self.person.take() else {
            return;
        };
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if pending.person.name.is_empty() {
            return;
        }
        match pending.role {
            Role::Author => entry.authors.push(pending.person),
            Role::Contributor => entry.contributors.push(pending.person),
        }
    }

    fn finish_rich(&mut self, rich: RichText) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        let content = rich.buf.trim();
        if content.is_empty() {
            return;
        }
        // <summary> wins over <content> whichever comes first.
        if rich.from_content && entry.summary.is_some() {
            return;
        }
        let kind = match rich.kind {
            TextKind::Xhtml => TextKind::Html,
            other => other,
        };
        entry.summary = Some(Summary {
            content: content.to_string(),
            kind,
        });
    }

    fn finish(self) -> Result<OpdsFeed> {
        if !self.feed_seen {
            return Err(OpdsError::FeedParse(
                "document has no Atom <feed> element".into(),
            ));
        }

        let mut feed = OpdsFeed {
            id: self.id,
            title: self.title,
            kind: FeedKind::Navigation,
            links: self.links,
            entries: self.entries,
        };
        feed.kind = feed.infer_kind();
        tracing::debug!(
            "Parsed {:?} feed with {} entries and {} links",
            feed.kind,
            feed.entries.len(),
            feed.links.len()
        );
        Ok(feed)
    }
}

fn parse_link(e: &BytesStart) -> Result<OpdsLink> {
    let mut link = OpdsLink::default();
    for (key, value) in attributes(e)? {
        match key.as_str() {
            "rel" => link.rel = Some(value),
            "href" => link.href = value,
            "type" => link.media_type = Some(value),
            "title" => link.title = Some(value),
            "facetGroup" => link.facet_group = Some(value),
            "activeFacet" => link.active_facet = Some(value.trim() == "true"),
            _ => {}
        }
    }
    Ok(link)
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
