/// One entry of the rendered page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(u32),
    Gap,
}

/// Something the keyboard cursor can rest on in the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerTarget {
    Previous,
    Page(u32),
    Next,
}

/// Window of page numbers around the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    current: u32,
    total: u32,
    slots: Vec<PageSlot>,
}

impl PageWindow {
    /// `None` when there is nothing to paginate (`total <= 1`).
    pub fn new(current: u32, total: u32) -> Option<Self> {
        if total <= 1 {
            return None;
        }

        let mut slots = Vec::new();
        if current > 3 {
            slots.push(PageSlot::Page(1));
            if current > 4 {
                slots.push(PageSlot::Gap);
            }
        }

        let start = current.saturating_sub(2).max(1);
        let end = current.saturating_add(2).min(total);
        slots.extend((start..=end).map(PageSlot::Page));

        if current + 2 < total {
            if current + 3 < total {
                slots.push(PageSlot::Gap);
            }
            slots.push(PageSlot::Page(total));
        }

        Some(Self {
            current,
            total,
            slots,
        })
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn slots(&self) -> &[PageSlot] {
        &self.slots
    }

    pub fn previous_enabled(&self) -> bool {
        self.current != 1
    }

    pub fn next_enabled(&self) -> bool {
        self.current < self.total
    }

    pub fn previous(&self) -> Option<u32> {
        (self.current > 1).then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.next_enabled().then(|| self.current + 1)
    }

    /// Page to load when `page` is picked; the current page is a no-op.
    pub fn activate(&self, page: u32) -> Option<u32> {
        (page != self.current).then_some(page)
    }

    /// Cursor stops, left to right.
    pub fn targets(&self) -> Vec<PagerTarget> {
        std::iter::once(PagerTarget::Previous)
            .chain(self.slots.iter().filter_map(|slot| match slot {
                PageSlot::Page(page) => Some(PagerTarget::Page(*page)),
                PageSlot::Gap => None,
            }))
            .chain(std::iter::once(PagerTarget::Next))
            .collect()
    }

    pub fn activate_target(&self, target: PagerTarget) -> Option<u32> {
        match target {
            PagerTarget::Previous => self.previous(),
            PagerTarget::Next => self.next(),
            PagerTarget::Page(page) => self.activate(page),
        }
    }

    /// Cursor index resting on the current page.
    pub fn current_target_index(&self) -> usize {
        self.targets()
            .iter()
            .position(|target| *target == PagerTarget::Page(self.current))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::PageSlot::{Gap, Page};
    use super::*;

    fn slots(current: u32, total: u32) -> Vec<PageSlot> {
        PageWindow::new(current, total).unwrap().slots().to_vec()
    }

    #[test]
    fn nothing_to_render_for_single_page() {
        assert_eq!(PageWindow::new(1, 0), None);
        assert_eq!(PageWindow::new(1, 1), None);
    }

    #[test]
    fn window_at_start() {
        assert_eq!(slots(1, 5), vec![Page(1), Page(2), Page(3), Gap, Page(5)]);
        assert_eq!(slots(1, 3), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn window_in_the_middle() {
        assert_eq!(
            slots(10, 20),
            vec![Page(1), Gap, Page(8), Page(9), Page(10), Page(11), Page(12), Gap, Page(20)]
        );
    }

    #[test]
    fn window_near_edges_has_no_gap() {
        assert_eq!(slots(4, 5), vec![Page(1), Page(2), Page(3), Page(4), Page(5)]);
        assert_eq!(
            slots(4, 7),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
    }

    #[test]
    fn window_at_end() {
        assert_eq!(slots(7, 7), vec![Page(1), Gap, Page(5), Page(6), Page(7)]);
    }

    #[test]
    fn previous_and_next_enablement() {
        for total in 2..=9 {
            for current in 1..=total {
                let window = PageWindow::new(current, total).unwrap();
                assert_eq!(window.previous_enabled(), current != 1);
                assert_eq!(window.next_enabled(), current != total);
            }
        }
    }

    #[test]
    fn activating_pages() {
        let window = PageWindow::new(2, 5).unwrap();
        assert_eq!(window.activate(3), Some(3));
        assert_eq!(window.activate(2), None);
        assert_eq!(window.activate_target(PagerTarget::Next), Some(3));
        assert_eq!(window.activate_target(PagerTarget::Previous), Some(1));

        let last = PageWindow::new(5, 5).unwrap();
        assert_eq!(last.activate_target(PagerTarget::Next), None);
    }

    #[test]
    fn targets_skip_gaps() {
        let window = PageWindow::new(10, 20).unwrap();
        let targets = window.targets();
        assert_eq!(targets.first(), Some(&PagerTarget::Previous));
        assert_eq!(targets.last(), Some(&PagerTarget::Next));
        assert_eq!(targets.len(), 9);
        assert_eq!(targets[window.current_target_index()], PagerTarget::Page(10));
    }
}
