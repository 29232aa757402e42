use crate::api::Named;

/// Fraction of the list that has to be scrolled past before more options
/// are requested.
pub const LOAD_MORE_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOption {
    /// Clears the filter. Always pinned to the top of the list.
    All { label: String },
    Entity { id: u64, name: String },
}

impl SelectOption {
    pub fn label(&self) -> &str {
        match self {
            SelectOption::All { label } => label,
            SelectOption::Entity { name, .. } => name,
        }
    }
}

/// What a select reports after a pick. Entities are tracked by id, the name
/// is carried along for display and for the backend filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Entity { id: u64, name: String },
}

impl Selection {
    /// Value sent to the backend; empty means "no filter".
    pub fn filter_value(&self) -> &str {
        match self {
            Selection::All => "",
            Selection::Entity { name, .. } => name,
        }
    }

    fn matches(&self, option: &SelectOption) -> bool {
        match (self, option) {
            (Selection::All, SelectOption::All { .. }) => true,
            (Selection::Entity { id, .. }, SelectOption::Entity { id: other, .. }) => id == other,
            _ => false,
        }
    }
}

/// Searchable single select over a list that grows page by page.
#[derive(Debug, Clone)]
pub struct InfiniteSelect {
    field: &'static str,
    all: SelectOption,
    options: Vec<SelectOption>,
    selected: Selection,
    open: bool,
    search: String,
    cursor: usize,
    offset: usize,
    viewport: usize,
}

impl InfiniteSelect {
    pub fn new(field: &'static str, all_label: &str) -> Self {
        Self {
            field,
            all: SelectOption::All {
                label: all_label.to_string(),
            },
            options: Vec::new(),
            selected: Selection::All,
            open: false,
            search: String::new(),
            cursor: 0,
            offset: 0,
            viewport: 8,
        }
    }

    /// Filter field this select drives (`genre`, `actor`, ...).
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn set_options<T: Named>(&mut self, items: &[T]) {
        self.options = items
            .iter()
            .map(|item| SelectOption::Entity {
                id: item.id(),
                name: item.name().to_string(),
            })
            .collect();
        self.clamp_cursor();
    }

    pub fn display_label(&self) -> &str {
        match &self.selected {
            Selection::All => self.all.label(),
            Selection::Entity { name, .. } => name,
        }
    }

    pub fn is_selected(&self, option: &SelectOption) -> bool {
        self.selected.matches(option)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
        self.cursor = 0;
        self.offset = 0;
    }

    /// Closes the dropdown and forgets the search term.
    pub fn close(&mut self) {
        self.open = false;
        self.search.clear();
        self.cursor = 0;
        self.offset = 0;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        self.cursor = 0;
        self.offset = 0;
    }

    pub fn pop_search(&mut self) {
        self.search.pop();
        self.cursor = 0;
        self.offset = 0;
    }

    /// Entities matching the search term, case-insensitively. `All` is never
    /// part of this list.
    pub fn filtered(&self) -> Vec<&SelectOption> {
        let needle = self.search.to_lowercase();
        self.options
            .iter()
            .filter(|option| option.label().to_lowercase().contains(&needle))
            .collect()
    }

    /// Rows of the open dropdown: `All` first, then the filtered entities.
    pub fn rows(&self) -> Vec<&SelectOption> {
        std::iter::once(&self.all).chain(self.filtered()).collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Height of the rendered list in rows, reported by the renderer.
    pub fn set_viewport(&mut self, rows: usize) {
        self.viewport = rows.max(1);
        self.scroll_to_cursor();
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let last = self.rows().len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        self.scroll_to_cursor();
    }

    /// Picks the row under the cursor and closes the dropdown.
    pub fn confirm(&mut self) -> Option<Selection> {
        let selection = match self.rows().get(self.cursor)? {
            SelectOption::All { .. } => Selection::All,
            SelectOption::Entity { id, name } => Selection::Entity {
                id: *id,
                name: name.clone(),
            },
        };
        self.selected = selection.clone();
        self.close();
        Some(selection)
    }

    pub fn reset(&mut self) {
        self.selected = Selection::All;
        self.close();
    }

    /// Whether the open list is scrolled far enough to ask for another page.
    pub fn wants_more(&self, has_more: bool, loading: bool) -> bool {
        self.open
            && has_more
            && !loading
            && past_load_threshold(self.offset, self.viewport, self.rows().len())
    }

    fn scroll_to_cursor(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.viewport {
            self.offset = self.cursor + 1 - self.viewport;
        }
    }

    fn clamp_cursor(&mut self) {
        let last = self.rows().len().saturating_sub(1);
        self.cursor = self.cursor.min(last);
        self.scroll_to_cursor();
    }
}

/// `offset + viewport >= 80%` of all rows.
pub fn past_load_threshold(offset: usize, viewport: usize, rows: usize) -> bool {
    (offset + viewport) as f64 >= rows as f64 * LOAD_MORE_THRESHOLD
}
