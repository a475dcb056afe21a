use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Destructive,
}

/// A user-visible notification produced by an editor operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Destructive,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.level == NoticeLevel::Destructive
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

pub(crate) mod titles {
    pub const NO_TAGS_SELECTED: &str = "No Tags Selected";
    pub const PROMPT_TOO_SHORT: &str = "Prompt Too Short";
    pub const RULES_GENERATED: &str = "Rules Generated!";
    pub const GENERATION_FAILED: &str = "Generation Failed";
    pub const NOTHING_TO_EDIT: &str = "Nothing to Edit";
    pub const NOTHING_TO_COPY: &str = "Nothing to Copy";
    pub const RULES_COPIED: &str = "Rules Copied!";
    pub const COPY_FAILED: &str = "Copy Failed";
    pub const NOTHING_TO_DOWNLOAD: &str = "Nothing to Download";
    pub const MARKDOWN_DOWNLOADED: &str = "Markdown Downloaded!";
    pub const DOWNLOAD_FAILED: &str = "Download Failed";
}
