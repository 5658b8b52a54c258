//! Final-document assembly
//!
//! Resolves content for each of the three sections (asking the content
//! source only for sections that were not pre-supplied), renders each into
//! its own fragment, and merges the fragments in fixed order into one PDF.
//!
//! Resolution and render errors abort the whole build; a fragment that turns
//! out to be unreadable at merge time is skipped and the rest of the
//! document is still produced.

use std::path::Path;

use rand::Rng;
use tracing::{error, info};

use crate::content::{
    DiscussionContent, ExtractContent, PreparationContent, SectionKind, WorksheetContent,
};
use crate::error::{Error, Result};
use crate::matching::shuffle_matching;
use crate::pdf::{merge_fragments, MergeSummary, SectionFragment};
use crate::render::{render_discussion, render_middle, render_preparation, SectionHeader};
use crate::source::ContentSource;

/// Default output filename
pub const DEFAULT_OUTPUT: &str = "final_document.pdf";

/// Builds one worksheet document out of the three sections
#[derive(Debug)]
pub struct DocumentAssembler {
    pub skill: String,
    pub difficulty: String,
    pub topic: String,
    pub preparation: Option<PreparationContent>,
    pub middle: Option<ExtractContent>,
    pub discussion: Option<DiscussionContent>,
}

impl DocumentAssembler {
    pub fn new(
        skill: impl Into<String>,
        difficulty: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            skill: skill.into(),
            difficulty: difficulty.into(),
            topic: topic.into(),
            preparation: None,
            middle: None,
            discussion: None,
        }
    }

    /// Pre-supply content for any subset of the sections
    pub fn with_content(mut self, content: WorksheetContent) -> Self {
        self.preparation = content.preparation;
        self.middle = content.middle;
        self.discussion = content.discussion;
        self
    }

    /// Build the worksheet and write it to `output`, overwriting any
    /// existing file. Returns `true` on success; failures are logged.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        source: &dyn ContentSource,
        rng: &mut R,
        output: &Path,
    ) -> bool {
        match self.try_generate(source, rng, output) {
            Ok(summary) => {
                info!(
                    pages = summary.page_count,
                    skipped = summary.skipped.len(),
                    output = %output.display(),
                    "worksheet written"
                );
                true
            }
            Err(e) => {
                error!(error = %e, "worksheet build failed");
                false
            }
        }
    }

    /// Result-typed body of [`generate`]
    pub fn try_generate<R: Rng + ?Sized>(
        &mut self,
        source: &dyn ContentSource,
        rng: &mut R,
        output: &Path,
    ) -> Result<MergeSummary> {
        let fragments = self.build_fragments(source, rng)?;
        merge_fragments(&fragments, output)
    }

    /// Resolve and render every section, in document order
    ///
    /// A section with pre-supplied content never touches the source; an
    /// absent section invokes the source exactly once, and the result is
    /// stored before rendering.
    fn build_fragments<R: Rng + ?Sized>(
        &mut self,
        source: &dyn ContentSource,
        rng: &mut R,
    ) -> Result<Vec<SectionFragment>> {
        let mut fragments = Vec::with_capacity(SectionKind::ORDER.len());

        for kind in SectionKind::ORDER {
            let fragment = match kind {
                SectionKind::Preparation => {
                    if self.preparation.is_none() {
                        self.preparation = Some(source.preparation(&self.topic)?);
                    }
                    let content = self
                        .preparation
                        .as_ref()
                        .ok_or_else(|| Error::General("preparation content missing".to_string()))?;
                    let matching = shuffle_matching(&content.correct_pairs, rng)?;
                    render_preparation(&self.header(), content, &matching)?
                }
                SectionKind::Middle => {
                    if self.middle.is_none() {
                        self.middle = Some(source.middle(&self.topic)?);
                    }
                    let content = self
                        .middle
                        .as_ref()
                        .ok_or_else(|| Error::General("middle content missing".to_string()))?;
                    content.validate()?;
                    render_middle(&self.header(), content)?
                }
                SectionKind::Discussion => {
                    if self.discussion.is_none() {
                        self.discussion = Some(source.discussion(&self.topic)?);
                    }
                    let content = self
                        .discussion
                        .as_ref()
                        .ok_or_else(|| Error::General("discussion content missing".to_string()))?;
                    render_discussion(&self.header(), content)?
                }
            };

            info!(section = %kind, pages = fragment.page_count(), "section rendered");
            fragments.push(fragment);
        }

        Ok(fragments)
    }

    fn header(&self) -> SectionHeader<'_> {
        SectionHeader {
            skill: &self.skill,
            difficulty: &self.difficulty,
            topic: &self.topic,
        }
    }
}
