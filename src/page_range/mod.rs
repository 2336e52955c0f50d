//! The page selection expression language.
//!
//! An expression is a list of tokens separated by commas and/or whitespace.
//! Each token is one of:
//!
//! - `N` a single page
//! - `A-B` an inclusive ascending range
//! - `A-B:S`, `A..B..S` or `range(A,B,S)` a stepped range, ascending or descending
//!
//! Pages are 1-based. Expansion keeps token order and duplicates, so `3-1:-1,1`
//! selects pages 3, 2, 1 and 1 again.

mod error;
mod lexer;
mod token;

pub use error::PageRangeError;

use lexer::tokenize;
use token::PageToken;

use std::fmt;
use tracing::debug;

/// Ordered, duplicate-preserving zero-based page indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    indices: Vec<usize>,
}

impl PageSelection {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// 1-based page numbers, in selection order.
    pub fn page_numbers(&self) -> Vec<u32> {
        self.indices.iter().map(|&i| i as u32 + 1).collect()
    }
}

impl fmt::Display for PageSelection {
    /// Comma-separated 1-based page numbers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.indices.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", index + 1)?;
        }
        Ok(())
    }
}

/// Parse and expand a pages expression against a document of `page_count` pages.
pub fn expand_page_ranges(expr: &str, page_count: u32) -> Result<PageSelection, PageRangeError> {
    let mut indices = Vec::new();
    for token in tokenize(expr)? {
        let span = PageToken::parse(token)?.validate(page_count)?;
        let before = indices.len();
        indices.extend(span.indices());
        debug!(token, pages = indices.len() - before, "expanded page token");
    }

    if indices.is_empty() {
        return Err(PageRangeError::EmptySelection);
    }
    Ok(PageSelection { indices })
}
