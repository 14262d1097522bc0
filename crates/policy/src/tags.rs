//! Tag enablement map
//!
//! Branches of a split plan are labelled with tags. The condition stage
//! writes one `AppliedTag` per evaluated tag; the allocation evaluator
//! consults the set to decide which branches post. A tag never applied is
//! enabled - only an explicit `false` disables a branch.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The resolved enabled/disabled state of one tag for one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedTag {
    pub tag: String,
    pub enabled: bool,
}

/// Map of tag name to applied state.
#[derive(Debug, Clone, Default)]
pub struct TagSet {
    tags: HashMap<String, AppliedTag>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tag's state. Re-applying overwrites the prior value.
    pub fn apply(&mut self, tag: impl Into<String>, enabled: bool) {
        let tag = tag.into();
        self.tags.insert(
            tag.clone(),
            AppliedTag { tag, enabled },
        );
    }

    /// Default-allow: `true` unless the tag was explicitly applied `false`.
    pub fn is_enabled(&self, tag: &str) -> bool {
        self.tags.get(tag).map_or(true, |applied| applied.enabled)
    }

    pub fn get(&self, tag: &str) -> Option<&AppliedTag> {
        self.tags.get(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allow() {
        let tags = TagSet::new();
        assert!(tags.is_enabled("never-mentioned"));
    }

    #[test]
    fn test_explicit_disable() {
        let mut tags = TagSet::new();
        tags.apply("cashback", false);
        assert!(!tags.is_enabled("cashback"));
        assert!(tags.is_enabled("commission"));
    }

    #[test]
    fn test_reapply_overwrites() {
        let mut tags = TagSet::new();
        tags.apply("cashback", false);
        tags.apply("cashback", true);
        assert!(tags.is_enabled("cashback"));
        assert_eq!(tags.len(), 1);
    }
}
