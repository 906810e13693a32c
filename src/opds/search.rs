use quick_xml::events::Event;
use quick_xml::Reader;
use url::Url;

use super::parser::{attributes, local_name, resolve_reference};
use crate::app::{OpdsError, Result};
use crate::domain::search::SEARCH_TERMS_PLACEHOLDER;
use crate::domain::SearchData;

// Stands in for `{searchTerms}` while the template goes through `Url::join`,
// which would otherwise percent-encode the braces.
const PLACEHOLDER_MARKER: &str = "__opds_search_terms__";

/// Parse an OpenSearch description document.
///
/// An Atom-typed `<Url>` is preferred over any other. Relative templates are
/// resolved against `description_url`.
pub fn parse_search_description(body: &[u8], description_url: Option<&Url>) -> Result<SearchData> {
    let content = std::str::from_utf8(body).map_err(|e| {
        OpdsError::FeedParse(format!("search description is not valid UTF-8: {}", e))
    })?;

    let mut reader = Reader::from_str(content);
    let mut root_seen = false;
    let mut short_name = String::new();
    let mut description = String::new();
    let mut templates: Vec<(Option<String>, String)> = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                text.clear();
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"OpenSearchDescription" => root_seen = true,
                    b"Url" => {
                        let mut media_type = None;
                        let mut template = None;
                        for (key, value) in attributes(&e)? {
                            match key.as_str() {
                                "type" => media_type = Some(value),
                                "template" => template = Some(value),
                                _ => {}
                            }
                        }
                        if let Some(template) = template {
                            templates.push((media_type, template));
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(e) => text.push_str(&String::from_utf8_lossy(&e)),
            Event::GeneralRef(e) => {
                text.push_str(&resolve_reference(&String::from_utf8_lossy(&e)))
            }
            Event::End(e) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"ShortName" => short_name = text.trim().to_string(),
                    b"Description" => description = text.trim().to_string(),
                    _ => {}
                }
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        return Err(OpdsError::FeedParse(
            "document has no <OpenSearchDescription> element".into(),
        ));
    }

    let template = templates
        .iter()
        .find(|(media_type, _)| media_type.as_deref().is_some_and(|t| t.contains("atom")))
        .or_else(|| templates.first())
        .map(|(_, template)| template.as_str())
        .ok_or(OpdsError::MissingField("Url template"))?;

    Ok(SearchData {
        description,
        short_name,
        template: resolve_template(template, description_url),
    })
}

fn resolve_template(template: &str, base: Option<&Url>) -> String {
    if Url::parse(template).is_ok() {
        return template.to_string();
    }
    let Some(base) = base else {
        return template.to_string();
    };
    match base.join(&template.replace(SEARCH_TERMS_PLACEHOLDER, PLACEHOLDER_MARKER)) {
        Ok(resolved) => resolved
            .as_str()
            .replace(PLACEHOLDER_MARKER, SEARCH_TERMS_PLACEHOLDER),
        Err(e) => {
            tracing::warn!("Could not resolve search template {}: {}", template, e);
            template.to_string()
        }
    }
}
