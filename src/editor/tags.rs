/// Tags offered for selection when no list is configured.
pub const PREDEFINED_TAGS: [&str; 12] = [
    "Gaming",
    "Professional Network",
    "Family Friendly",
    "Marketplace",
    "Support Group",
    "Educational Forum",
    "Creative Showcase",
    "Tech Discussion",
    "Local Community",
    "Hobby Club",
    "Book Club",
    "Fitness & Wellness",
];

pub fn default_tags() -> Vec<String> {
    PREDEFINED_TAGS.iter().map(ToString::to_string).collect()
}

/// Currently selected tags, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    tags: Vec<String>,
}

impl TagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `tag` if it is not selected, deselect it otherwise.
    ///
    /// Returns whether the tag is selected afterwards.
    pub fn toggle(&mut self, tag: &str) -> bool {
        if let Some(index) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(index);
            false
        } else {
            self.tags.push(tag.to_string());
            true
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }
}
