use serde::Serialize;

pub const FIRST_PAGE: usize = 1;
pub const PAGE_SIZE: usize = 10;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page: Option<usize>,
    pub next_page: Option<usize>,
}

impl<T> Page<T> {
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            has_previous: self.has_previous,
            has_next: self.has_next,
            previous_page: self.previous_page,
            next_page: self.next_page,
        }
    }
}

/// Cuts `items` down to the requested page. Pages are 1-based; a page past the end is empty.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page = page.max(FIRST_PAGE);
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = ((total_items + page_size - 1) / page_size).max(1);
    let offset = (page - 1).saturating_mul(page_size);
    let items: Vec<T> = items.into_iter().skip(offset).take(page_size).collect();
    let has_previous = page > FIRST_PAGE;
    let has_next = page < total_pages;
    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
        has_previous,
        has_next,
        previous_page: if has_previous { Some((page - 1).min(total_pages)) } else { None },
        next_page: if has_next { Some(page + 1) } else { None },
    }
}

/// Reads the `page` query value; anything missing or below 1 means the first page.
pub fn requested_page(raw: Option<i64>) -> usize {
    raw.and_then(|page| usize::try_from(page).ok())
        .filter(|page| *page >= FIRST_PAGE)
        .unwrap_or(FIRST_PAGE)
}
