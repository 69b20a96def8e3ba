//! Browser bookmark-export parsing.
//!
//! Browsers export bookmarks as a nested definition-list HTML document:
//! folders are `<DT><H3>` items with a `<DL>` list of contents, links are
//! `<DT><A>` items. Most exporters never close the `<DT>`, so depending on
//! how the markup was written a folder's list parses either as a child of
//! the item or as its next sibling; the walker accepts both shapes.
//!
//! Folders become categories and are flattened into one sequence, inner
//! folders first. Loose links at the top level are gathered into a synthetic
//! "Imported Bookmarks" category. The output is a preview; nothing here
//! touches the live collection.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Node};
use tracing::debug;
use url::Url;

use crate::collection::{favicon_url_for, generate_link_id, Collection, LinkCategory, LinkItem};
use crate::config::LinkConfig;

/// Markup node reduced to what the walker needs.
///
/// Detached from the parsing library so the recursive descent works over
/// plain data.
#[derive(Debug)]
struct DocNode {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<DocNode>,
}

impl DocNode {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn child(&self, tag: &str) -> Option<&DocNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    fn deep_text(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.deep_text());
        }
        out
    }

    /// First node with the given tag, depth-first, self included.
    fn find(&self, tag: &str) -> Option<&DocNode> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(tag))
    }
}

fn convert(element: ElementRef<'_>) -> DocNode {
    let mut node = DocNode {
        tag: element.value().name().to_lowercase(),
        attrs: element
            .value()
            .attrs()
            .map(|(key, value)| (key.to_lowercase(), value.to_string()))
            .collect(),
        text: String::new(),
        children: Vec::new(),
    };
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            node.children.push(convert(child_element));
        } else if let Node::Text(text) = child.value() {
            node.text.push_str(&text.text);
        }
    }
    node
}

/// Parse a bookmark-export document into a collection.
///
/// A document without a recognizable root list yields an empty collection;
/// the caller decides whether that is an error.
pub fn parse_bookmarks(html: &str) -> Collection {
    let document = Html::parse_document(html);
    let root = convert(document.root_element());

    let Some(main_list) = root.find("dl") else {
        debug!("no definition list found in document");
        return Collection::default();
    };

    let mut categories = Vec::new();
    let mut root_links = Vec::new();
    walk_list(&main_list.children, &mut categories, &mut root_links);

    if !root_links.is_empty() {
        categories.insert(
            0,
            LinkCategory {
                title: LinkConfig::IMPORTED_BOOKMARKS_TITLE.to_string(),
                links: root_links,
            },
        );
    }
    dedupe_titles(&mut categories);

    Collection::new(categories)
}

/// Walk one list's items, collecting folders into `categories` and links
/// into the caller's `links`.
///
/// Completed folders land in `categories` in post-order: a folder's inner
/// folders are pushed while its own links are still being gathered.
fn walk_list(nodes: &[DocNode], categories: &mut Vec<LinkCategory>, links: &mut Vec<LinkItem>) {
    let mut index = 0;
    while index < nodes.len() {
        let node = &nodes[index];
        let mut consumed_sibling = false;

        if node.tag == "dt" {
            if let Some(heading) = node.child("h3") {
                let heading_text = heading.deep_text().trim().to_string();
                let title = if heading_text.is_empty() {
                    LinkConfig::UNTITLED_FOLDER.to_string()
                } else {
                    heading_text
                };

                // The folder's list is a child when the <DT> was left open,
                // or the next sibling (possibly behind one wrapper) when it
                // was closed.
                let content = node.child("dl").or_else(|| {
                    let next = nodes.get(index + 1)?;
                    let list = match next.tag.as_str() {
                        "dl" => Some(next),
                        "p" => next.children.first().filter(|c| c.tag == "dl"),
                        _ => None,
                    }?;
                    consumed_sibling = true;
                    Some(list)
                });

                let mut folder_links = Vec::new();
                if let Some(list) = content {
                    walk_list(&list.children, categories, &mut folder_links);
                }
                if !folder_links.is_empty() {
                    categories.push(LinkCategory {
                        title,
                        links: folder_links,
                    });
                }
            } else if let Some(anchor) = node.child("a") {
                if let Some(link) = link_from_anchor(anchor) {
                    links.push(link);
                }
            }
        } else if node.tag == "p" || node.tag == "dl" {
            // Filler containers; recurse without producing anything.
            walk_list(&node.children, categories, links);
        }

        index += if consumed_sibling { 2 } else { 1 };
    }
}

fn link_from_anchor(anchor: &DocNode) -> Option<LinkItem> {
    let href = anchor.attr("href")?;
    let parsed = match Url::parse(href) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(href, %err, "skipping bookmark with unparseable URL");
            return None;
        }
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let anchor_text = anchor.deep_text().trim().to_string();
    let name = if anchor_text.is_empty() {
        LinkConfig::UNTITLED_LINK.to_string()
    } else {
        anchor_text
    };

    Some(LinkItem {
        id: generate_link_id("import"),
        name,
        url: href.to_string(),
        favicon_url: favicon_url_for(href),
        description: parsed.host_str().unwrap_or_default().to_string(),
    })
}

/// Suffix repeated folder titles so category identity stays unique.
fn dedupe_titles(categories: &mut [LinkCategory]) {
    let mut seen = HashSet::new();
    for category in categories {
        if seen.insert(category.title.clone()) {
            continue;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{} ({})", category.title, n);
            if seen.insert(candidate.clone()) {
                category.title = candidate;
                break;
            }
            n += 1;
        }
    }
}
