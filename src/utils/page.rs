/// Fixed-size pages over a slice of rendered items
pub struct Page<T> {
    pub pages: Vec<Vec<T>>,
    pub current_page: usize,
}

impl<T: Clone> Page<T> {
    /// Split `items` into pages of `per_page` items, keeping their order
    pub fn new(items: &[T], per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let pages = items.chunks(per_page).map(|chunk| chunk.to_vec()).collect();
        Page {
            pages,
            current_page: 0,
        }
    }
}

impl<T> Page<T> {
    /// Items of the current page (empty when there are no items at all)
    pub fn current(&self) -> &[T] {
        self.pages
            .get(self.current_page)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Jump to a 1-based page number, returns false if out of range
    pub fn go_to(&mut self, page: usize) -> bool {
        if page == 0 || page > self.pages.len() {
            return false;
        }
        self.current_page = page - 1;
        true
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// "Page 2/5" style footer
    pub fn footer(&self) -> String {
        format!("Page {}/{}", self.current_page + 1, self.total_pages().max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_keep_order() {
        let items: Vec<u32> = (1..=7).collect();
        let mut page = Page::new(&items, 3);

        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.current(), &[1, 2, 3]);
        assert!(page.go_to(3));
        assert_eq!(page.current(), &[7]);
        assert!(page.go_to(2));
        assert_eq!(page.current(), &[4, 5, 6]);
        assert_eq!(page.footer(), "Page 2/3");
    }

    #[test]
    fn test_go_to_out_of_range() {
        let items = vec!["a", "b"];
        let mut page = Page::new(&items, 10);
        assert!(!page.go_to(0));
        assert!(!page.go_to(2));
        assert!(page.go_to(1));

        let empty: Vec<&str> = Vec::new();
        let page = Page::new(&empty, 10);
        assert!(page.current().is_empty());
        assert_eq!(page.footer(), "Page 1/1");
    }
}
