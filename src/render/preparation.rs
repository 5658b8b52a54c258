//! Preparation (matching) section

use super::{
    draw_header, SectionHeader, BOTTOM_MARGIN, LINE_HEIGHT, X_ANSWERS, X_START, Y_START,
};
use crate::content::{PreparationContent, SectionKind};
use crate::error::Result;
use crate::matching::{index_letter, ShuffledMatching};
use crate::pdf::{Canvas, Font, SectionFragment};

/// Render the matching task and its answer key
///
/// The numbered item column keeps the content's insertion order; the
/// lettered answer column and the key come pre-shuffled in `matching`.
pub fn render_preparation(
    header: &SectionHeader<'_>,
    content: &PreparationContent,
    matching: &ShuffledMatching,
) -> Result<SectionFragment> {
    let mut canvas = Canvas::new();
    draw_header(&mut canvas, header);

    let n = matching.items.len();

    canvas.text(X_START, Y_START, Font::HelveticaBold, 16.0, "Preparation task");

    let instruction = format!(
        "Match the items (1-{n}) with the answers (a-{}).",
        index_letter(n.saturating_sub(1))
    );
    canvas.text(
        X_START,
        Y_START - 2.0 * LINE_HEIGHT,
        Font::Helvetica,
        12.0,
        &instruction,
    );

    // The content labels double as the column headers
    let headers_y = Y_START - 4.0 * LINE_HEIGHT;
    canvas.text(X_START, headers_y, Font::HelveticaBold, 12.0, &content.labels[0]);
    canvas.text(X_ANSWERS, headers_y, Font::HelveticaBold, 12.0, &content.labels[1]);

    for i in 0..n {
        let y = Y_START - (5 + i) as f64 * LINE_HEIGHT;
        canvas.text(
            X_START,
            y,
            Font::Helvetica,
            12.0,
            &format!("{}. ...... {}", i + 1, matching.items[i]),
        );
        canvas.text(
            X_ANSWERS,
            y,
            Font::Helvetica,
            12.0,
            &format!("{}. {}", index_letter(i), matching.answers[i]),
        );
    }

    // Answer key block below the columns
    let mut y = Y_START - (5 + n) as f64 * LINE_HEIGHT - 15.0;
    if y < BOTTOM_MARGIN {
        canvas.break_page();
        y = Y_START;
    }
    canvas.text(X_START, y, Font::HelveticaBold, 16.0, "Answers:");
    y -= 8.0;
    canvas.text(X_START, y, Font::HelveticaBold, 14.0, "Preparation task");
    y -= 7.0;

    for (position, letter) in matching.key.iter() {
        if y < BOTTOM_MARGIN {
            canvas.break_page();
            y = Y_START;
        }
        canvas.text(
            X_START,
            y,
            Font::Helvetica,
            12.0,
            &format!("{position}. {letter}"),
        );
        y -= LINE_HEIGHT;
    }

    canvas.finish(SectionKind::Preparation)
}
