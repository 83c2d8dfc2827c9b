//! Selection and viewport state for the listing.

use std::path::PathBuf;

use glidefile_core::DirectoryEntry;

use super::constants::MIN_PAGE_SIZE;

/// Trait for types that support list-style navigation.
///
/// Every move is a no-op on an empty list.
pub trait ListNavigator {
    /// Get the currently selected index.
    fn selected(&self) -> Option<usize>;

    /// Set the selected index. Implementations clamp to the list bounds.
    fn set_selected(&mut self, index: usize);

    /// Number of entries.
    fn len(&self) -> usize;

    /// Rows per page.
    fn page_size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move selection up by count items.
    fn move_up(&mut self, count: usize) {
        if let Some(current) = self.selected() {
            self.set_selected(current.saturating_sub(count));
        }
    }

    /// Move selection down by count items.
    fn move_down(&mut self, count: usize) {
        if let Some(current) = self.selected() {
            self.set_selected(current.saturating_add(count));
        }
    }

    fn page_up(&mut self) {
        self.move_up(self.page_size());
    }

    fn page_down(&mut self) {
        self.move_down(self.page_size());
    }

    fn jump_to_top(&mut self) {
        if !self.is_empty() {
            self.set_selected(0);
        }
    }

    fn jump_to_bottom(&mut self) {
        if !self.is_empty() {
            self.set_selected(self.len() - 1);
        }
    }
}

/// The current directory, its listing and what is shown of it.
///
/// `displayed` is the unfiltered listing or a filtered subset of it (or of
/// the deep cache). The selection is `None` exactly when `displayed` is
/// empty, and the viewport always contains the selection.
#[derive(Debug, Clone)]
pub struct NavigationState {
    pub current_path: PathBuf,
    unfiltered: Vec<DirectoryEntry>,
    displayed: Vec<DirectoryEntry>,
    selected: Option<usize>,
    offset: usize,
    page_size: usize,
}

impl NavigationState {
    pub fn new(current_path: PathBuf) -> Self {
        Self {
            current_path,
            unfiltered: Vec::new(),
            displayed: Vec::new(),
            selected: None,
            offset: 0,
            page_size: MIN_PAGE_SIZE,
        }
    }

    pub fn unfiltered(&self) -> &[DirectoryEntry] {
        &self.unfiltered
    }

    pub fn displayed(&self) -> &[DirectoryEntry] {
        &self.displayed
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn selected_entry(&self) -> Option<&DirectoryEntry> {
        self.selected.and_then(|i| self.displayed.get(i))
    }

    /// Replace the raw listing and show it unfiltered. Selection is left
    /// for the caller to restore.
    pub fn set_listing(&mut self, entries: Vec<DirectoryEntry>) {
        self.displayed = entries.clone();
        self.unfiltered = entries;
        self.selected = None;
        self.offset = 0;
    }

    /// Show a different set of entries, selecting the first one.
    pub fn set_displayed(&mut self, entries: Vec<DirectoryEntry>) {
        self.displayed = entries;
        self.offset = 0;
        self.selected = if self.displayed.is_empty() { None } else { Some(0) };
        self.adjust_viewport();
    }

    /// Show the raw listing again, selecting the first entry.
    pub fn show_unfiltered(&mut self) {
        self.set_displayed(self.unfiltered.clone());
    }

    /// Restore an earlier view verbatim.
    pub fn restore(&mut self, displayed: Vec<DirectoryEntry>, selected: Option<usize>, offset: usize) {
        self.displayed = displayed;
        self.offset = offset;
        self.selected = None;
        self.select_clamped(selected.unwrap_or(0));
    }

    /// Select `index`, clamped into bounds; nothing is selected when empty.
    pub fn select_clamped(&mut self, index: usize) {
        if self.displayed.is_empty() {
            self.selected = None;
            self.offset = 0;
        } else {
            self.selected = Some(index.min(self.displayed.len() - 1));
            self.adjust_viewport();
        }
    }

    /// Select the entry whose name matches, ignoring case. Returns whether
    /// one was found.
    pub fn select_by_name(&mut self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        let found = self
            .displayed
            .iter()
            .position(|e| !e.is_parent_marker && e.display_name.to_lowercase() == wanted);

        if let Some(index) = found {
            self.select_clamped(index);
        }
        found.is_some()
    }

    /// Set the rows per page and re-clamp the viewport.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(MIN_PAGE_SIZE);
        self.adjust_viewport();
    }

    /// Slide the viewport to contain the selection without running past
    /// either end of the list.
    pub fn adjust_viewport(&mut self) {
        let Some(selected) = self.selected else {
            self.offset = 0;
            return;
        };

        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + self.page_size {
            self.offset = selected + 1 - self.page_size;
        }

        let max_offset = self.displayed.len().saturating_sub(self.page_size);
        self.offset = self.offset.min(max_offset);
    }
}

impl ListNavigator for NavigationState {
    fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn set_selected(&mut self, index: usize) {
        self.select_clamped(index);
    }

    fn len(&self) -> usize {
        self.displayed.len()
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn entries(count: usize) -> Vec<DirectoryEntry> {
        (0..count)
            .map(|i| DirectoryEntry {
                path: format!("/tmp/file{i:02}").into(),
                display_name: format!("file{i:02}"),
                is_dir: false,
                is_parent_marker: false,
                size: 0,
                modified: SystemTime::UNIX_EPOCH,
            })
            .collect()
    }

    fn nav(count: usize) -> NavigationState {
        let mut nav = NavigationState::new("/tmp".into());
        nav.set_listing(entries(count));
        nav.select_clamped(0);
        nav
    }

    fn assert_invariants(nav: &NavigationState) {
        match nav.selected() {
            None => assert!(nav.displayed().is_empty()),
            Some(sel) => {
                assert!(sel < nav.len());
                assert!(nav.offset() <= sel);
                assert!(sel < nav.offset() + nav.page_size());
            }
        }
        assert!(nav.offset() <= nav.len().saturating_sub(nav.page_size()));
    }

    #[test]
    fn test_moves_are_clamped() {
        let mut nav = nav(10);
        nav.move_up(3);
        assert_eq!(nav.selected(), Some(0));
        nav.move_down(100);
        assert_eq!(nav.selected(), Some(9));
        assert_invariants(&nav);
    }

    #[test]
    fn test_viewport_follows_selection() {
        let mut nav = nav(20);
        for _ in 0..12 {
            nav.move_down(1);
            assert_invariants(&nav);
        }
        assert_eq!(nav.selected(), Some(12));
        assert_eq!(nav.offset(), 8);

        nav.page_up();
        assert_eq!(nav.selected(), Some(7));
        assert_eq!(nav.offset(), 7);
        assert_invariants(&nav);
    }

    #[test]
    fn test_edges() {
        let mut nav = nav(20);
        nav.jump_to_bottom();
        assert_eq!(nav.selected(), Some(19));
        assert_eq!(nav.offset(), 15);
        nav.jump_to_top();
        assert_eq!((nav.selected(), nav.offset()), (Some(0), 0));
    }

    #[test]
    fn test_empty_list_has_no_selection() {
        let mut nav = nav(0);
        assert_eq!(nav.selected(), None);
        nav.move_down(1);
        nav.jump_to_bottom();
        assert_eq!(nav.selected(), None);
        assert_eq!(nav.offset(), 0);
    }

    #[test]
    fn test_growing_page_size_reclamps_offset() {
        let mut nav = nav(20);
        nav.jump_to_bottom();
        nav.set_page_size(15);
        assert_eq!(nav.offset(), 5);
        nav.set_page_size(1);
        assert_eq!(nav.page_size(), MIN_PAGE_SIZE);
        assert_invariants(&nav);
    }

    #[test]
    fn test_select_by_name_ignores_case() {
        let mut nav = nav(20);
        assert!(nav.select_by_name("FILE13"));
        assert_eq!(nav.selected(), Some(13));
        assert!(!nav.select_by_name("missing"));
        assert_eq!(nav.selected(), Some(13));
        assert_invariants(&nav);
    }

    #[test]
    fn test_restore_clamps_stale_selection() {
        let mut nav = nav(3);
        nav.restore(entries(2), Some(7), 0);
        assert_eq!(nav.selected(), Some(1));
        assert_invariants(&nav);
    }
}
