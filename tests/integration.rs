//! Integration tests for the worksheet generator

use lopdf::Document;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use tempfile::TempDir;

use pdf_worksheets::content::{
    DiscussionContent, ExtractContent, MatchPairs, PreparationContent, SectionKind,
    WorksheetContent,
};
use pdf_worksheets::document::DocumentAssembler;
use pdf_worksheets::matching::shuffle_matching;
use pdf_worksheets::pdf::{count_pages, merge_fragments, SectionFragment};
use pdf_worksheets::render::{
    render_discussion, render_middle, render_preparation, SectionHeader,
};
use pdf_worksheets::source::ContentSource;
use pdf_worksheets::Error;

fn preparation_content() -> PreparationContent {
    PreparationContent {
        labels: ["Words".to_string(), "Definitions".to_string()],
        correct_pairs: MatchPairs::new(vec![
            (
                "airport".to_string(),
                "a place where planes take off and land".to_string(),
            ),
            ("luggage".to_string(), "bags and suitcases".to_string()),
            (
                "boarding pass".to_string(),
                "a document that allows you to get on a plane".to_string(),
            ),
        ])
        .unwrap(),
    }
}

fn middle_content() -> ExtractContent {
    ExtractContent {
        topic: "An airport departures board".to_string(),
        extract: "Flight BA117 to New York leaves from gate 32 at half past ten.\n\
                  The flight to Tokyo is delayed by two hours and passengers are \
                  asked to wait near the information desk."
            .to_string(),
        questions: vec![
            "The New York flight leaves from gate 32".to_string(),
            "The Tokyo flight is on time".to_string(),
            "Passengers for Tokyo should wait near the information desk".to_string(),
        ],
        answers: vec![true, false, true],
    }
}

fn discussion_content() -> DiscussionContent {
    DiscussionContent {
        question: "How often do you travel by plane? Which countries would you like to visit?"
            .to_string(),
    }
}

fn header() -> SectionHeader<'static> {
    SectionHeader {
        skill: "Reading",
        difficulty: "A1",
        topic: "An airport departures board",
    }
}

/// Content source that always fails; builds that have all content
/// pre-supplied must never reach it
struct UnreachableSource;

impl ContentSource for UnreachableSource {
    fn preparation(&self, _topic: &str) -> pdf_worksheets::Result<PreparationContent> {
        Err(Error::ContentSource("preparation: source should not be called".to_string()))
    }

    fn middle(&self, _topic: &str) -> pdf_worksheets::Result<ExtractContent> {
        Err(Error::ContentSource("middle: source should not be called".to_string()))
    }

    fn discussion(&self, _topic: &str) -> pdf_worksheets::Result<DiscussionContent> {
        Err(Error::ContentSource("discussion: source should not be called".to_string()))
    }
}

/// Decompressed content-stream text of every page, in page order
fn page_texts(path: &Path) -> Vec<String> {
    let mut doc = Document::load(path).expect("merged document should load");
    doc.decompress();
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let content = doc.get_page_content(page_id).expect("page content");
            String::from_utf8_lossy(&content).to_string()
        })
        .collect()
}

#[test]
fn test_full_build_with_presupplied_content() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("final_document.pdf");

    let mut assembler = DocumentAssembler::new("Reading", "A1", "An airport departures board")
        .with_content(WorksheetContent {
            preparation: Some(preparation_content()),
            middle: Some(middle_content()),
            discussion: Some(discussion_content()),
        });

    let mut rng = StdRng::seed_from_u64(99);
    assert!(assembler.generate(&UnreachableSource, &mut rng, &output));
    assert!(output.exists());

    // preparation (1) + middle (2) + discussion (1)
    assert_eq!(count_pages(&output).unwrap(), 4);
}

#[test]
fn test_merged_sections_appear_in_fixed_order() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("ordered.pdf");

    let mut assembler = DocumentAssembler::new("Reading", "A1", "An airport departures board")
        .with_content(WorksheetContent {
            preparation: Some(preparation_content()),
            middle: Some(middle_content()),
            discussion: Some(discussion_content()),
        });

    let mut rng = StdRng::seed_from_u64(5);
    assert!(assembler.generate(&UnreachableSource, &mut rng, &output));

    let texts = page_texts(&output);
    assert_eq!(texts.len(), 4);
    assert!(texts[0].contains("Preparation task"));
    assert!(texts[1].contains("Task 1"));
    assert!(texts[2].contains("Answers:"));
    assert!(texts[3].contains("Discussion"));
}

#[test]
fn test_merge_skips_corrupt_middle_fragment() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("partial.pdf");

    let mut rng = StdRng::seed_from_u64(21);
    let prep = preparation_content();
    let matching = shuffle_matching(&prep.correct_pairs, &mut rng).unwrap();

    let fragments = vec![
        render_preparation(&header(), &prep, &matching).unwrap(),
        SectionFragment::from_bytes(SectionKind::Middle, b"garbage, not a pdf".to_vec(), 2),
        render_discussion(&header(), &discussion_content()).unwrap(),
    ];

    let summary = merge_fragments(&fragments, &output).unwrap();
    assert_eq!(summary.skipped, vec![SectionKind::Middle]);
    assert_eq!(summary.page_count, 2);

    let texts = page_texts(&output);
    assert_eq!(texts.len(), 2);
    assert!(texts[0].contains("Preparation task"));
    assert!(texts[1].contains("Discussion"));
}

#[test]
fn test_middle_answers_render_in_statement_order() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("middle.pdf");

    let fragments = vec![render_middle(&header(), &middle_content()).unwrap()];
    merge_fragments(&fragments, &output).unwrap();

    let texts = page_texts(&output);
    assert_eq!(texts.len(), 2);
    let answers_page = &texts[1];
    assert!(answers_page.contains("(1. True)"));
    assert!(answers_page.contains("(2. False)"));
    assert!(answers_page.contains("(3. True)"));
}

#[test]
fn test_preparation_answer_key_matches_page_content() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("prep.pdf");

    let prep = preparation_content();
    let mut rng = StdRng::seed_from_u64(13);
    let matching = shuffle_matching(&prep.correct_pairs, &mut rng).unwrap();

    let fragments = vec![render_preparation(&header(), &prep, &matching).unwrap()];
    merge_fragments(&fragments, &output).unwrap();

    let texts = page_texts(&output);
    for (position, letter) in matching.key.iter() {
        assert!(texts[0].contains(&format!("({position}. {letter})")));
    }
}

#[test]
fn test_resolution_failure_leaves_no_document() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("never.pdf");

    let mut assembler = DocumentAssembler::new("Reading", "A1", "An airport departures board");
    let mut rng = StdRng::seed_from_u64(0);

    assert!(!assembler.generate(&UnreachableSource, &mut rng, &output));
    assert!(!output.exists());
}
