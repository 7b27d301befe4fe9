use std::path::Path;

use crate::config::TruncationPolicy;
use crate::paginate::AnchorIndex;

/// What the renderer knows about the surroundings of the block it is rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Base for shortening file paths in tool inputs.
    pub working_dir: Option<&'a Path>,
    /// `owner/name`, enables commit links.
    pub github_repo: Option<&'a str>,
    pub truncation: &'a TruncationPolicy,
    /// Tool call locations; `None` disables links from results back to calls.
    pub anchors: Option<&'a AnchorIndex>,
    /// Page being rendered; `None` for the index document.
    pub page: Option<usize>,
}

impl<'a> RenderContext<'a> {
    pub fn new(truncation: &'a TruncationPolicy) -> Self {
        Self { working_dir: None, github_repo: None, truncation, anchors: None, page: None }
    }

    pub fn with_working_dir(mut self, working_dir: Option<&'a Path>) -> Self {
        self.working_dir = working_dir;
        self
    }

    pub fn with_github_repo(mut self, github_repo: Option<&'a str>) -> Self {
        self.github_repo = github_repo;
        self
    }

    pub fn with_anchors(mut self, anchors: &'a AnchorIndex, page: Option<usize>) -> Self {
        self.anchors = Some(anchors);
        self.page = page;
        self
    }
}
