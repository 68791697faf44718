//! Group-header collapse pass.
//!
//! Runs after every filter pass: a listing whose entries are all hidden
//! is hidden, and a header whose owned listings are all hidden is hidden
//! with it. A header owns everything up to the next header of the same
//! or shallower level, so nested sub-group headings collapse with their
//! parent.

use crate::page::{Node, Page};

/// Recompute `hidden` on every listing and header from current entry
/// visibility. A header owning no listing at all is left visible.
pub fn collapse_groups(page: &mut Page) {
    // Listings first: hidden iff every entry is hidden. An empty listing
    // has nothing to show and is hidden too.
    for node in &mut page.nodes {
        if let Node::Listing(listing) = node {
            listing.hidden = listing
                .entries
                .iter()
                .all(|entry| !entry.display.is_visible());
        }
    }

    // Headers second, from listing state. Decisions are collected first
    // so the scan can read listings while headers are pending mutation.
    let decisions: Vec<Option<bool>> = (0..page.nodes.len())
        .map(|i| match &page.nodes[i] {
            Node::Header(header) => Some(region_is_hidden(page, i, header.level)),
            Node::Listing(_) => None,
        })
        .collect();

    for (node, decision) in page.nodes.iter_mut().zip(decisions) {
        if let (Node::Header(header), Some(hidden)) = (node, decision) {
            header.hidden = hidden;
        }
    }
}

/// Whether the header at `index` owns at least one listing and all of
/// its owned listings are hidden.
fn region_is_hidden(page: &Page, index: usize, level: u8) -> bool {
    let mut any_listing = false;

    for node in &page.nodes[index + 1..] {
        match node {
            Node::Header(next) if next.level <= level => break,
            Node::Header(_) => {}
            Node::Listing(listing) => {
                any_listing = true;
                if !listing.hidden {
                    return false;
                }
            }
        }
    }

    any_listing
}
