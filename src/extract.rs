//! Fragment extraction from rendered page markup.
//!
//! The page is parsed with the tolerant `tl` parser and fragments are lifted
//! out by id/class. Removals operate on the original source spans, so the
//! returned body is the page's own markup minus the extracted elements.

use crate::error::SiteError;
use crate::types::PageFragments;
use regex::Regex;
use std::sync::LazyLock;
use tl::{HTMLTag, VDom};

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const CONTENT_ID: &str = "content";
const NAV_ID: &str = "portal-globalnav";
const COLUMN_RIGHT_ID: &str = "portal-column-two";
const BYLINE_ID: &str = "plone-document-byline";
const TITLE_CLASS: &str = "documentFirstHeading";
const DESCRIPTION_CLASS: &str = "documentDescription";

/// Extract the application-shell fragments from rendered page markup.
/// Regions that are absent come back as empty strings.
pub fn extract_fragments(html: &str) -> Result<PageFragments, SiteError> {
    let dom = parse_dom(html)?;

    let mut fragments = PageFragments {
        css_classes: body_classes(&dom),
        column_right: outer_html_by_id(&dom, COLUMN_RIGHT_ID)
            .map(|markup| markup.trim().to_string())
            .unwrap_or_default(),
        nav: outer_html_by_id(&dom, NAV_ID)
            .map(|markup| markup.trim().to_string())
            .unwrap_or_default(),
        ..PageFragments::default()
    };

    if let Some(content) = outer_html_by_id(&dom, CONTENT_ID) {
        let (title, description, body) = extract_content(&content)?;
        fragments.title = title;
        fragments.description = description;
        fragments.body = body;
    }

    Ok(fragments)
}

/// Pull title and description out of the content region and drop designated
/// scaffolding elements; what remains is the body fragment.
fn extract_content(content_html: &str) -> Result<(String, String, String), SiteError> {
    let dom = parse_dom(content_html)?;
    let parser = dom.parser();
    let mut body = content_html.to_string();

    if let Some(byline) = tag_by_id(&dom, BYLINE_ID) {
        remove_span(&mut body, &byline.raw().as_utf8_str());
    }

    let mut title = String::new();
    if let Some(heading) = tag_by_class(&dom, TITLE_CLASS) {
        title = clean_text(&heading.inner_text(parser));
        remove_span(&mut body, &heading.raw().as_utf8_str());
    }

    let mut description = String::new();
    if let Some(blurb) = tag_by_class(&dom, DESCRIPTION_CLASS) {
        description = clean_text(&blurb.inner_text(parser));
        remove_span(&mut body, &blurb.raw().as_utf8_str());
    }

    Ok((title, description, body.trim().to_string()))
}

fn parse_dom(html: &str) -> Result<VDom<'_>, SiteError> {
    tl::parse(html, tl::ParserOptions::default()).map_err(|e| SiteError::Markup(e.to_string()))
}

fn body_classes(dom: &VDom) -> Vec<String> {
    for node in dom.nodes().iter() {
        let Some(tag) = node.as_tag() else {
            continue;
        };
        if tag.name().as_utf8_str().as_ref() != "body" {
            continue;
        }
        return tag
            .attributes()
            .get("class")
            .flatten()
            .map(|classes| {
                classes
                    .as_utf8_str()
                    .split_whitespace()
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();
    }
    Vec::new()
}

fn outer_html_by_id(dom: &VDom, id: &str) -> Option<String> {
    tag_by_id(dom, id).map(|tag| tag.raw().as_utf8_str().to_string())
}

fn tag_by_id<'d, 'h>(dom: &'d VDom<'h>, id: &str) -> Option<&'d HTMLTag<'h>> {
    for node in dom.nodes().iter() {
        let Some(tag) = node.as_tag() else {
            continue;
        };
        let Some(candidate) = tag.attributes().get("id").flatten() else {
            continue;
        };
        if candidate.as_utf8_str().as_ref() == id {
            return Some(tag);
        }
    }
    None
}

fn tag_by_class<'d, 'h>(dom: &'d VDom<'h>, class: &str) -> Option<&'d HTMLTag<'h>> {
    for node in dom.nodes().iter() {
        let Some(tag) = node.as_tag() else {
            continue;
        };
        let is_member = tag
            .attributes()
            .get("class")
            .flatten()
            .map(|classes| {
                classes
                    .as_utf8_str()
                    .split_whitespace()
                    .any(|candidate| candidate == class)
            })
            .unwrap_or(false);
        if is_member {
            return Some(tag);
        }
    }
    None
}

/// Remove the first occurrence of an element's source span.
fn remove_span(haystack: &mut String, span: &str) {
    if let Some(start) = haystack.find(span) {
        haystack.replace_range(start..start + span.len(), "");
    }
}

fn clean_text(text: &str) -> String {
    let text = text.replace("&nbsp;", " ").replace('\u{00a0}', " ");
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}
