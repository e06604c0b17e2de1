//! Turning the raw bytes a module stores into displayable content.

use quire_common::Result;
use quire_passage::Verse;

/// One piece of filtered verse content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    Text(String),
}

/// Converts raw stored bytes into content nodes.
///
/// The filter to use follows from the markup a module's text was
/// encoded with; the module name and verse travel along for
/// diagnostics.
pub trait TextFilter: Send + Sync {
    fn filter(&self, module: &str, key: &Verse, raw: &[u8]) -> Result<Vec<ContentNode>>;
}

/// Passes stored bytes through as one plain-text node, replacing
/// invalid UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughFilter;

impl TextFilter for PassthroughFilter {
    fn filter(&self, _module: &str, _key: &Verse, raw: &[u8]) -> Result<Vec<ContentNode>> {
        Ok(vec![ContentNode::Text(
            String::from_utf8_lossy(raw).into_owned(),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use quire_versification::{Catalog, Versification};

    fn kjv() -> Arc<Versification> {
        Catalog::new().lookup("KJV").unwrap()
    }

    #[test]
    fn passthrough_yields_one_text_node() {
        let verse = Verse::parse(&kjv(), "Gen 1:1").unwrap();
        let nodes = PassthroughFilter
            .filter("Demo", &verse, b"In the beginning")
            .unwrap();
        assert_eq!(nodes, vec![ContentNode::Text("In the beginning".into())]);
    }

    #[test]
    fn passthrough_replaces_invalid_utf8() {
        let verse = Verse::parse(&kjv(), "Gen 1:1").unwrap();
        let nodes = PassthroughFilter
            .filter("Demo", &verse, b"li\xffght")
            .unwrap();
        let ContentNode::Text(text) = &nodes[0];
        assert_eq!(text, "li\u{fffd}ght");
    }
}
