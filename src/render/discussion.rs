//! Discussion section

use super::{draw_header, SectionHeader, LINE_HEIGHT, TEXT_WIDTH, X_START, Y_START};
use crate::content::{DiscussionContent, SectionKind};
use crate::error::Result;
use crate::pdf::canvas::wrap_text;
use crate::pdf::{Canvas, Font, SectionFragment};

/// Render the discussion prompt: one instruction line and the question
/// verbatim. No answer key.
pub fn render_discussion(
    header: &SectionHeader<'_>,
    content: &DiscussionContent,
) -> Result<SectionFragment> {
    let mut canvas = Canvas::new();
    draw_header(&mut canvas, header);

    canvas.text(X_START, Y_START, Font::HelveticaBold, 16.0, "Discussion");
    canvas.text(
        X_START,
        Y_START - 2.0 * LINE_HEIGHT,
        Font::Helvetica,
        12.0,
        "Discuss the question below with a partner.",
    );

    let mut y = Y_START - 4.0 * LINE_HEIGHT;
    for line in wrap_text(&content.question, 14.0, TEXT_WIDTH) {
        canvas.text(X_START, y, Font::Helvetica, 14.0, &line);
        y -= 7.0;
    }

    canvas.finish(SectionKind::Discussion)
}
