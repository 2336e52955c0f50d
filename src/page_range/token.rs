use super::error::PageRangeError;
use super::lexer::Scanner;

type FormResult = Option<Result<PageToken, PageRangeError>>;

/// Surface forms in precedence order; the first form that recognizes a token
/// classifies it.
const FORMS: [fn(&str) -> FormResult; 5] = [
    function_form,    // range(a,b,s)
    double_dot_form,  // a..b..s
    colon_form,       // a-b:s
    plain_range_form, // a-b
    single_form,      // n
];

/// A classified but not yet validated token. Numbers are 1-based as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Single(i64),
    Range { start: i64, end: i64 },
    SteppedRange { start: i64, end: i64, step: i64 },
}

/// A validated token: the first and last page the iteration visits (1-based)
/// and the step between consecutive pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpan {
    first: u32,
    last: u32,
    step: i64,
}

impl PageToken {
    /// Classify a single token, e.g. "5", "1-9", "9-53:4", "53..9..-4" or "range(9,53,4)".
    pub fn parse(token: &str) -> Result<Self, PageRangeError> {
        FORMS.iter().find_map(|form| form(token)).unwrap_or_else(|| {
            Err(PageRangeError::syntax(
                token,
                "expected N, A-B, A-B:STEP, A..B..STEP or range(A,B,STEP)",
            ))
        })
    }

    /// Check the token against a document of `page_count` pages.
    ///
    /// Every page the iteration visits is bounds-checked in visiting order, so
    /// the error names the first offending page.
    pub fn validate(self, page_count: u32) -> Result<PageSpan, PageRangeError> {
        match self {
            PageToken::Single(n) => check_page(n, page_count).map(PageSpan::single),
            PageToken::Range { start, end } => {
                if start == end {
                    return PageToken::Single(start).validate(page_count);
                }
                if let Some(n) = [start, end].into_iter().find(|&n| n <= 0) {
                    return Err(PageRangeError::InvalidPageNumber(n));
                }
                if start > end {
                    return Err(PageRangeError::NonProgressingRange {
                        start,
                        end,
                        step: 1,
                    });
                }
                Ok(PageSpan {
                    first: check_page(start, page_count)?,
                    last: check_page(end, page_count)?,
                    step: 1,
                })
            }
            PageToken::SteppedRange { start, end, step } => {
                if step == 0 {
                    return Err(PageRangeError::NonProgressingRange { start, end, step });
                }
                if start == end {
                    return PageToken::Single(start).validate(page_count);
                }
                if end.cmp(&start) != step.cmp(&0) {
                    return Err(PageRangeError::NonProgressingRange { start, end, step });
                }

                let first = check_page(start, page_count)?;
                let mut last = first;
                let mut current = start;
                while let Some(next) = advance(current, end, step) {
                    last = check_page(next, page_count)?;
                    current = next;
                }
                Ok(PageSpan { first, last, step })
            }
        }
    }
}

impl PageSpan {
    fn single(page: u32) -> Self {
        PageSpan {
            first: page,
            last: page,
            step: 1,
        }
    }

    /// Zero-based page indices in visiting order.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        let last = i64::from(self.last);
        std::iter::successors(Some(i64::from(self.first)), move |&n| {
            advance(n, last, self.step)
        })
        .map(|n| (n - 1) as usize)
    }
}

/// The next value after `current`, if it has not passed `end`.
fn advance(current: i64, end: i64, step: i64) -> Option<i64> {
    let next = current.checked_add(step)?;
    let within = if step > 0 { next <= end } else { next >= end };
    within.then_some(next)
}

fn check_page(n: i64, page_count: u32) -> Result<u32, PageRangeError> {
    if n <= 0 {
        Err(PageRangeError::InvalidPageNumber(n))
    } else if n > i64::from(page_count) {
        Err(PageRangeError::OutOfBounds {
            page: n,
            total: page_count,
        })
    } else {
        Ok(n as u32)
    }
}

/// Value of a scanned integer literal. Literals beyond `i64` saturate, so an
/// oversized page number is reported by bounds checking.
fn number(literal: &str) -> i64 {
    literal.parse::<i64>().unwrap_or(if literal.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}

fn stepped(start: &str, end: &str, step: &str) -> FormResult {
    Some(Ok(PageToken::SteppedRange {
        start: number(start),
        end: number(end),
        step: number(step),
    }))
}

fn function_form(token: &str) -> FormResult {
    let head = token.get(..6)?;
    if !head.eq_ignore_ascii_case("range(") || !token.ends_with(')') {
        return None;
    }

    let args: Vec<&str> = token[6..token.len() - 1]
        .split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .collect();
    let &[start, end, step] = args.as_slice() else {
        return Some(Err(PageRangeError::syntax(
            token,
            format!("range(...) takes exactly three integers, got {}", args.len()),
        )));
    };
    if let Some(bad) = args.iter().find(|arg| !is_signed_integer(arg)) {
        return Some(Err(PageRangeError::syntax(
            token,
            format!("`{}` is not an integer", bad),
        )));
    }
    stepped(start, end, step)
}

fn is_signed_integer(s: &str) -> bool {
    let mut scan = Scanner::new(s);
    scan.signed().is_some() && scan.is_done()
}

fn double_dot_form(token: &str) -> FormResult {
    let mut scan = Scanner::new(token);
    let start = scan.signed()?;
    if !scan.eat("..") {
        return None;
    }
    let end = scan.signed()?;
    if !scan.eat("..") {
        return None;
    }
    let step = scan.signed()?;
    if !scan.is_done() {
        return None;
    }
    stepped(start, end, step)
}

fn colon_form(token: &str) -> FormResult {
    let mut scan = Scanner::new(token);
    scan.skip_ws();
    let start = scan.signed()?;
    scan.skip_ws();
    if !scan.eat("-") {
        return None;
    }
    scan.skip_ws();
    let end = scan.signed()?;
    scan.skip_ws();
    if !scan.eat(":") {
        return None;
    }
    scan.skip_ws();
    let step = scan.signed()?;
    scan.skip_ws();
    if !scan.is_done() {
        return None;
    }
    stepped(start, end, step)
}

fn plain_range_form(token: &str) -> FormResult {
    let mut scan = Scanner::new(token);
    let start = scan.unsigned()?;
    if !scan.eat("-") {
        return None;
    }
    let end = scan.unsigned()?;
    if !scan.is_done() {
        return None;
    }
    Some(Ok(PageToken::Range {
        start: number(start),
        end: number(end),
    }))
}

fn single_form(token: &str) -> FormResult {
    let mut scan = Scanner::new(token);
    let n = scan.unsigned()?;
    if !scan.is_done() {
        return None;
    }
    Some(Ok(PageToken::Single(number(n))))
}
