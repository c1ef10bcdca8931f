/// Which part of the conversation the messages panel shows.
///
/// The viewport is described by the entry pinned to the bottom edge. `None`
/// follows the newest entry, which is what every append resets it to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    bottom_entry: Option<usize>,
}

impl Viewport {
    pub fn follow_latest(&mut self) {
        self.bottom_entry = None;
    }

    pub fn is_following_latest(&self) -> bool {
        self.bottom_entry.is_none()
    }

    /// Index of the entry drawn at the bottom edge, or `None` for an empty log.
    pub fn bottom_entry(&self, entry_count: usize) -> Option<usize> {
        let last = entry_count.checked_sub(1)?;
        Some(self.bottom_entry.map_or(last, |index| index.min(last)))
    }

    pub fn scroll_up(&mut self, by: usize, entry_count: usize) {
        if let Some(current) = self.bottom_entry(entry_count) {
            self.bottom_entry = Some(current.saturating_sub(by));
        }
    }

    /// Scrolling down onto the newest entry resumes following it.
    pub fn scroll_down(&mut self, by: usize, entry_count: usize) {
        let Some(current) = self.bottom_entry(entry_count) else {
            return;
        };

        let target = current.saturating_add(by);
        if target + 1 >= entry_count {
            self.follow_latest();
        } else {
            self.bottom_entry = Some(target);
        }
    }
}
