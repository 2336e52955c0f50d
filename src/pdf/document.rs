use crate::page_range::PageSelection;
use anyhow::{Context, Result};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Catalog entries that address pages of the source page tree.
const PAGE_BOUND: [&[u8]; 3] = [b"Outlines", b"Dests", b"PageLabels"];

pub struct PdfDocument {
    pub doc: Document,
    pub path: String,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let doc =
            Document::load(&path).with_context(|| format!("Failed to open PDF: {}", path_str))?;
        Ok(PdfDocument {
            doc,
            path: path_str,
        })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Page object IDs in page order; position `i` holds zero-based page `i`.
    pub fn page_ids(&self) -> Vec<ObjectId> {
        self.doc.get_pages().into_values().collect()
    }

    /// Build a new document holding the selected pages in selection order.
    ///
    /// The page tree is replaced by a single flat `Pages` node. A page selected
    /// more than once is emitted once per occurrence; repeats are fresh page
    /// objects sharing the first copy's content and resources.
    ///
    /// Bookmarks, named destinations and page labels refer to positions in the
    /// source page tree, so they are dropped from the new catalog.
    pub fn select_pages(&self, selection: &PageSelection) -> Result<Document> {
        let page_ids = self.page_ids();
        let mut new_doc = self.doc.clone();
        let pages_id = new_doc.new_object_id();

        let mut placed = HashSet::new();
        let mut kids = Vec::with_capacity(selection.indices().len());
        for &index in selection.indices() {
            let source_id = *page_ids.get(index).with_context(|| {
                format!(
                    "Page {} is out of range (1-{}) in {}",
                    index + 1,
                    page_ids.len(),
                    self.path
                )
            })?;

            let mut page = self.flattened_page(source_id)?;
            page.set("Parent", Object::Reference(pages_id));

            let id = if placed.insert(source_id) {
                new_doc.objects.insert(source_id, Object::Dictionary(page));
                source_id
            } else {
                new_doc.add_object(page)
            };
            kids.push(Object::Reference(id));
        }

        let count = kids.len() as i64;
        new_doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let root_id = new_doc
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .with_context(|| format!("PDF has no document catalog: {}", self.path))?;
        let catalog = new_doc
            .get_dictionary_mut(root_id)
            .with_context(|| format!("PDF has no document catalog: {}", self.path))?;
        catalog.set("Pages", Object::Reference(pages_id));
        for key in PAGE_BOUND {
            catalog.remove(key);
        }
        let names_id = match catalog.get_mut(b"Names") {
            Ok(Object::Dictionary(names)) => {
                names.remove(b"Dests");
                None
            }
            Ok(Object::Reference(id)) => Some(*id),
            _ => None,
        };
        if let Some(names) = names_id.and_then(|id| new_doc.get_dictionary_mut(id).ok()) {
            names.remove(b"Dests");
        }

        let pruned = new_doc.prune_objects();
        debug!(pages = count, pruned = pruned.len(), "built selected document");

        Ok(new_doc)
    }

    /// A copy of the page dictionary with inherited attributes made explicit.
    fn flattened_page(&self, page_id: ObjectId) -> Result<Dictionary> {
        let mut page = self
            .doc
            .get_dictionary(page_id)
            .with_context(|| format!("Failed to read page object {:?}", page_id))?
            .clone();

        let mut visited = HashSet::new();
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
        while let Some(node_id) = parent.filter(|id| visited.insert(*id)) {
            let Ok(node) = self.doc.get_dictionary(node_id) else {
                break;
            };
            for key in INHERITABLE {
                if !page.has(key) {
                    if let Ok(value) = node.get(key) {
                        page.set(key, value.clone());
                    }
                }
            }
            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        }

        Ok(page)
    }

    /// Save to a file, creating missing parent directories
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        doc.save(path)
            .with_context(|| format!("Failed to save PDF: {}", path.display()))?;
        Ok(())
    }
}
