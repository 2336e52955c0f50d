use crate::output_path::default_output_path;
use crate::page_range::{expand_page_ranges, PageSelection};
use crate::pdf::PdfDocument;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    pub pages: String,
    pub output: Option<PathBuf>,
    pub print_only: bool,
}

/// Outcome of a selection run; `output` is `None` in print-only mode.
#[derive(Debug)]
pub struct SelectReport {
    pub selection: PageSelection,
    pub page_count: u32,
    pub output: Option<PathBuf>,
}

/// Expand the pages expression against `input` and, unless print-only, write
/// the selected pages to a new PDF.
///
/// `on_selection` is called with the expanded selection before anything is
/// written.
pub fn select<P: AsRef<Path>>(
    input: P,
    options: &SelectOptions,
    on_selection: impl FnOnce(&PageSelection),
) -> Result<SelectReport> {
    let input = input.as_ref();
    if !input.exists() {
        anyhow::bail!("File not found: {}", input.display());
    }

    let doc = PdfDocument::open(input)?;
    let page_count = doc.page_count();

    let selection = expand_page_ranges(&options.pages, page_count)
        .with_context(|| format!("Invalid pages expression '{}'", options.pages))?;
    on_selection(&selection);

    if options.print_only {
        return Ok(SelectReport {
            selection,
            page_count,
            output: None,
        });
    }

    let mut new_doc = doc.select_pages(&selection)?;
    let output = match &options.output {
        Some(path) => path.clone(),
        None => default_output_path(input),
    };
    PdfDocument::save(&mut new_doc, &output)?;
    info!(
        output = %output.display(),
        pages = selection.indices().len(),
        "wrote selected pages"
    );

    Ok(SelectReport {
        selection,
        page_count,
        output: Some(output),
    })
}

pub fn run<P: AsRef<Path>>(input: P, options: &SelectOptions) -> Result<()> {
    let report = select(input, options, |selection| println!("{}", selection))?;

    if let Some(output) = report.output {
        println!("Wrote: {}", output.display());
    }

    Ok(())
}
