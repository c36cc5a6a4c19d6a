use crate::task::{Tab, Task, TasksPage};

#[derive(Debug, Clone, Default)]
struct TabState {
    tasks: Vec<Task>,
    cursor: String,
    exhausted: bool,
}

/// Client-side accumulation of paginated task lists, one sequence per
/// status tab. Pages are merged append-only with de-duplication by task
/// id; switching tabs never clears another tab's accumulation.
#[derive(Debug, Clone)]
pub struct Board {
    tabs: [TabState; Tab::ALL.len()],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            tabs: std::array::from_fn(|_| TabState::default()),
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self, tab: Tab) -> &[Task] {
        &self.tabs[tab.index()].tasks
    }

    pub fn is_empty(&self, tab: Tab) -> bool {
        self.tabs[tab.index()].tasks.is_empty()
    }

    /// Cursor to send with the next query for this tab. Empty means
    /// "start from the beginning".
    pub fn cursor(&self, tab: Tab) -> &str {
        &self.tabs[tab.index()].cursor
    }

    /// False once a response for this tab came back with an empty `next`,
    /// which suppresses further load-more fetches until the cursor is
    /// reset.
    pub fn can_load_more(&self, tab: Tab) -> bool {
        !self.tabs[tab.index()].exhausted
    }

    /// Merge one response page into the tab's accumulation: entries that
    /// re-appear in the incoming page are dropped from their old position,
    /// then the page is appended, so the freshest copy of a task wins and
    /// no id occurs twice.
    pub fn merge_page(&mut self, tab: Tab, page: TasksPage) {
        let state = &mut self.tabs[tab.index()];
        if !page.tasks.is_empty() {
            state
                .tasks
                .retain(|task| !page.tasks.iter().any(|incoming| incoming.id == task.id));
            state.tasks.extend(page.tasks);
        }
        state.exhausted = page.next.is_empty();
        state.cursor = page.next;
    }

    /// Called on tab switch: the newly active tab restarts pagination from
    /// the beginning, while its already-loaded tasks stay in place.
    pub fn reset_cursor(&mut self, tab: Tab) {
        let state = &mut self.tabs[tab.index()];
        state.cursor.clear();
        state.exhausted = false;
    }
}
