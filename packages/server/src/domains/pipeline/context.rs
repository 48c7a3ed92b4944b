use crate::domains::content::{ContentArtifact, ContentData};

/// Values handed from one step to the next within a single run.
#[derive(Debug)]
pub struct PipelineContext {
    pub content: ContentData,
    pub artifact: Option<ContentArtifact>,
}

impl PipelineContext {
    pub fn new(content: ContentData) -> Self {
        Self {
            content,
            artifact: None,
        }
    }

    pub fn artifact(&self) -> Option<&ContentArtifact> {
        self.artifact.as_ref()
    }
}
