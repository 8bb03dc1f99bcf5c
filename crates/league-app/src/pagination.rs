//! Page slicing and the numbered page window.

use std::fmt;

pub const STOCKS_PER_PAGE: usize = 10;
pub const HOLDINGS_PER_PAGE: usize = 9;

/// Most numbered buttons shown at once.
const MAX_VISIBLE_PAGES: usize = 5;

/// One slot in the page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Number(usize),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Number(n) => write!(f, "{}", n),
            PageItem::Ellipsis => write!(f, "…"),
        }
    }
}

pub fn total_pages(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

/// Numbered buttons for `current` of `total` pages (1-based).
///
/// Up to five pages are listed in full. Beyond that the window is
/// `1 2 3 4 … N` near the start, `1 … N-3 N-2 N-1 N` near the end and
/// `1 … c-1 c c+1 … N` in between.
pub fn page_numbers(current: usize, total: usize) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Number};

    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(Number).collect();
    }

    let mut items = Vec::with_capacity(7);
    if current <= 3 {
        items.extend((1..=4).map(Number));
        items.push(Ellipsis);
        items.push(Number(total));
    } else if current >= total - 2 {
        items.push(Number(1));
        items.push(Ellipsis);
        items.extend((total - 3..=total).map(Number));
    } else {
        items.push(Number(1));
        items.push(Ellipsis);
        items.extend((current - 1..=current + 1).map(Number));
        items.push(Ellipsis);
        items.push(Number(total));
    }
    items
}

/// One page of a list.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based, clamped to the available pages
    pub number: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn window(&self) -> Vec<PageItem> {
        page_numbers(self.number, self.total_pages)
    }

    /// Render as `← 1 2 [3] 4 … 9 →`. Empty when there is a single page.
    pub fn render_nav(&self) -> String {
        if self.total_pages <= 1 {
            return String::new();
        }
        let mut parts = Vec::new();
        if self.has_previous() {
            parts.push("←".to_string());
        }
        for item in self.window() {
            match item {
                PageItem::Number(n) if n == self.number => parts.push(format!("[{}]", n)),
                other => parts.push(other.to_string()),
            }
        }
        if self.has_next() {
            parts.push("→".to_string());
        }
        parts.join(" ")
    }
}

/// Slice out page `page` (1-based). Out of range pages are clamped.
pub fn paginate<T>(items: &[T], per_page: usize, page: usize) -> Page<'_, T> {
    let total = total_pages(items.len(), per_page);
    let number = page.clamp(1, total.max(1));
    let start = (number - 1) * per_page;
    let end = (start + per_page).min(items.len());
    Page {
        items: items.get(start..end).unwrap_or(&[]),
        number,
        total_pages: total,
    }
}
