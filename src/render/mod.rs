//! Section renderers
//!
//! Each renderer turns resolved section content into one finished
//! [`SectionFragment`](crate::pdf::SectionFragment). Rendering is
//! deterministic: all randomness (the answer shuffle) happens before the
//! renderer is called.

mod discussion;
mod middle;
mod preparation;

pub use discussion::render_discussion;
pub use middle::render_middle;
pub use preparation::render_preparation;

use crate::pdf::{Canvas, Font};

// Worksheet geometry in millimetres, A4 portrait
const X_START: f64 = 20.0;
const X_ANSWERS: f64 = 90.0;
const Y_START: f64 = 270.0;
const LINE_HEIGHT: f64 = 5.0;
const BOTTOM_MARGIN: f64 = 20.0;
const RIGHT_EDGE: f64 = 190.0;
const TEXT_WIDTH: f64 = RIGHT_EDGE - X_START;

/// Header fields repeated at the top of every section
#[derive(Debug, Clone, Copy)]
pub struct SectionHeader<'a> {
    pub skill: &'a str,
    pub difficulty: &'a str,
    pub topic: &'a str,
}

/// Skill/difficulty line and topic, right-aligned at the top of the page
fn draw_header(canvas: &mut Canvas, header: &SectionHeader<'_>) {
    canvas.text_right(
        RIGHT_EDGE,
        287.0,
        Font::Helvetica,
        12.0,
        &format!("{}: {}", header.skill, header.difficulty),
    );
    canvas.text_right(RIGHT_EDGE, 280.0, Font::Helvetica, 18.0, header.topic);
}
