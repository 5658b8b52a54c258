//! Section-fragment merging using lopdf
//!
//! Concatenates the pages of every readable fragment, in fragment order,
//! into one document. An unreadable fragment is logged and skipped rather
//! than failing the merge; the final write is the only fatal step.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::warn;

use crate::content::SectionKind;
use crate::error::{Error, Result};
use crate::pdf::canvas::SectionFragment;

/// Outcome of a fragment merge
#[derive(Debug, Clone)]
pub struct MergeSummary {
    /// Pages in the merged document
    pub page_count: usize,
    /// Sections whose fragment could not be read and was left out
    pub skipped: Vec<SectionKind>,
}

/// Merge fragments into a single PDF at `output`
///
/// Pages appear in fragment order with no interleaving. The output file is
/// written next to its final path and renamed into place, so a failed write
/// does not leave a half-written document behind (best effort).
pub fn merge_fragments(fragments: &[SectionFragment], output: &Path) -> Result<MergeSummary> {
    if fragments.is_empty() {
        return Err(Error::General("no fragments to merge".to_string()));
    }

    let mut documents: Vec<Document> = Vec::with_capacity(fragments.len());
    let mut skipped = Vec::new();
    for fragment in fragments {
        match Document::load_mem(fragment.bytes()) {
            Ok(doc) if !doc.get_pages().is_empty() => documents.push(doc),
            Ok(_) => {
                warn!(section = %fragment.kind(), "fragment has no pages, skipping");
                skipped.push(fragment.kind());
            }
            Err(e) => {
                warn!(section = %fragment.kind(), error = %e, "unreadable fragment, skipping");
                skipped.push(fragment.kind());
            }
        }
    }

    if documents.is_empty() {
        return Err(Error::NoReadableFragments);
    }

    // Renumber object IDs so the documents can share one object table
    let mut max_id = 1;
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for mut doc in documents {
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        let pages = doc.get_pages();
        page_ids.extend(pages.into_iter().map(|(_, id)| id));
        objects.extend(doc.objects);
    }

    let mut merged_doc = Document::with_version("1.5");
    merged_doc.objects.extend(objects);

    // max_id must cover the objects just added or new_object_id() would
    // hand out colliding IDs
    merged_doc.max_id = max_id - 1;

    let pages_id = merged_doc.new_object_id();

    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();

    let mut pages_object = Dictionary::new();
    pages_object.set("Type", Object::Name(b"Pages".to_vec()));
    pages_object.set("Count", Object::Integer(page_ids.len() as i64));
    pages_object.set("Kids", Object::Array(kids));

    let catalog_id = merged_doc.new_object_id();
    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));

    merged_doc.objects.insert(catalog_id, Object::Dictionary(catalog));
    merged_doc.objects.insert(pages_id, Object::Dictionary(pages_object));
    merged_doc.trailer.set("Root", Object::Reference(catalog_id));

    // Reparent every page under the new Pages node
    for &page_id in &page_ids {
        if let Ok(Object::Dictionary(ref mut dict)) = merged_doc.get_object_mut(page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    merged_doc.compress();

    let tmp = output.with_extension("pdf.tmp");
    if let Err(e) = merged_doc.save(&tmp) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    if let Err(e) = std::fs::rename(&tmp, output) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }

    Ok(MergeSummary {
        page_count: page_ids.len(),
        skipped,
    })
}
