//! Middle (extract + true/false) section

use super::{
    draw_header, SectionHeader, BOTTOM_MARGIN, LINE_HEIGHT, RIGHT_EDGE, TEXT_WIDTH, X_START,
    Y_START,
};
use crate::content::{ExtractContent, SectionKind};
use crate::error::Result;
use crate::pdf::canvas::wrap_text;
use crate::pdf::{Canvas, Font, SectionFragment};

/// Render the reading extract, the true/false statements, and — on a fresh
/// page — the scored answers in statement order
pub fn render_middle(header: &SectionHeader<'_>, content: &ExtractContent) -> Result<SectionFragment> {
    let mut canvas = Canvas::new();
    draw_header(&mut canvas, header);

    canvas.text(X_START, Y_START, Font::HelveticaBold, 16.0, "Task 1");
    canvas.text(
        X_START,
        Y_START - 2.0 * LINE_HEIGHT,
        Font::Helvetica,
        12.0,
        "Read the text, then decide if the sentences below are true or false.",
    );

    // Extract body: line breaks in the source text become paragraph breaks
    let mut y = Y_START - 4.0 * LINE_HEIGHT;
    for paragraph in content.extract.lines() {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            y -= LINE_HEIGHT;
            continue;
        }
        for line in wrap_text(paragraph, 12.0, TEXT_WIDTH) {
            if y < BOTTOM_MARGIN {
                canvas.break_page();
                y = Y_START;
            }
            canvas.text(X_START, y, Font::Helvetica, 12.0, &line);
            y -= LINE_HEIGHT;
        }
        y -= LINE_HEIGHT;
    }

    y -= LINE_HEIGHT;
    for (i, question) in content.questions.iter().enumerate() {
        if y < BOTTOM_MARGIN {
            canvas.break_page();
            y = Y_START;
        }
        canvas.text(
            X_START,
            y,
            Font::Helvetica,
            12.0,
            &format!("{}. {}", i + 1, question),
        );
        canvas.text_right(RIGHT_EDGE, y, Font::Helvetica, 12.0, "True / False");
        y -= 2.0 * LINE_HEIGHT;
    }

    // Answers are positional: answer i scores statement i
    canvas.break_page();
    let mut y = Y_START;
    canvas.text(X_START, y, Font::HelveticaBold, 16.0, "Answers:");
    y -= 8.0;
    canvas.text(X_START, y, Font::HelveticaBold, 14.0, "Task 1");
    y -= 7.0;
    for (i, answer) in content.answers.iter().enumerate() {
        if y < BOTTOM_MARGIN {
            canvas.break_page();
            y = Y_START;
        }
        let verdict = if *answer { "True" } else { "False" };
        canvas.text(
            X_START,
            y,
            Font::Helvetica,
            12.0,
            &format!("{}. {}", i + 1, verdict),
        );
        y -= LINE_HEIGHT;
    }

    canvas.finish(SectionKind::Middle)
}
