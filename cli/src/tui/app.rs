use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskboard_core::action::ActionSubmit;
use taskboard_core::config::TuiConfig;
use taskboard_core::query::to_query_value;
use taskboard_core::{Board, Tab, Task, TaskStatus, TasksPage};

/// Events delivered to the view from spawned request tasks.
#[derive(Debug)]
pub enum AppEvent {
    Page {
        tab: Tab,
        generation: u64,
        result: Result<TasksPage, String>,
    },
    SubmitDone {
        task_id: String,
        error: Option<String>,
    },
}

/// What the event loop should do after a key press.
#[derive(Debug)]
pub enum Effect {
    None,
    Quit,
    Fetch,
    Submit(ActionSubmit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Assignee,
    Status,
    EndsOn,
}

/// State of the assign/update form, bound to one task id.
#[derive(Debug, Clone)]
pub struct FormState {
    pub task_id: String,
    pub assignee: String,
    pub status_idx: usize,
    pub ends_on: String,
    pub focus: FormField,
}

impl FormState {
    fn for_task(task: &Task) -> Self {
        let status_idx = TaskStatus::ALL
            .iter()
            .position(|s| *s == task.status)
            .unwrap_or(0);
        Self {
            task_id: task.id.clone(),
            assignee: task.assignee.clone().unwrap_or_default(),
            status_idx,
            ends_on: task.ends_on.map(|d| d.to_string()).unwrap_or_default(),
            focus: FormField::Assignee,
        }
    }

    pub fn status(&self) -> TaskStatus {
        TaskStatus::ALL[self.status_idx]
    }

    fn next_field(&mut self) {
        self.focus = match self.focus {
            FormField::Assignee => FormField::Status,
            FormField::Status => FormField::EndsOn,
            FormField::EndsOn => FormField::Assignee,
        };
    }

    fn cycle_status(&mut self, delta: isize) {
        let len = TaskStatus::ALL.len() as isize;
        self.status_idx = ((self.status_idx as isize + delta).rem_euclid(len)) as usize;
    }
}

/// All mutable state of the board screen. Only the event loop touches it;
/// request tasks report back through `AppEvent`.
pub struct BoardApp {
    pub config: TuiConfig,
    pub board: Board,
    pub selected_tab: Tab,
    pub selected_row: usize,
    /// Bumped on every tab switch / refresh; responses carrying an older
    /// generation are dropped instead of polluting the current tab.
    pub generation: u64,
    pub in_flight: bool,
    pub fetch_error: Option<String>,
    pub footer_msg: Option<String>,
    pub mode: Mode,
    pub form: Option<FormState>,
}

impl BoardApp {
    pub fn new(config: TuiConfig, initial_tab: Tab) -> Self {
        Self {
            config,
            board: Board::new(),
            selected_tab: initial_tab,
            selected_row: 0,
            generation: 0,
            in_flight: false,
            fetch_error: None,
            footer_msg: None,
            mode: Mode::List,
            form: None,
        }
    }

    /// Mark a fetch as issued and hand the loop everything the request
    /// task needs: tab, cursor, and the generation to tag the response
    /// with.
    pub fn begin_fetch(&mut self) -> (Tab, String, u64) {
        self.in_flight = true;
        (
            self.selected_tab,
            self.board.cursor(self.selected_tab).to_string(),
            self.generation,
        )
    }

    /// The `q` value for the active tab, shown in the footer.
    pub fn query_value(&self) -> String {
        to_query_value(self.selected_tab)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// "No tasks found" only renders once nothing is in flight and the
    /// last fetch did not fail.
    pub fn show_no_tasks(&self) -> bool {
        self.board.is_empty(self.selected_tab) && !self.in_flight && self.fetch_error.is_none()
    }

    pub fn show_error(&self) -> bool {
        self.fetch_error.is_some() && self.board.is_empty(self.selected_tab)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.board.tasks(self.selected_tab).get(self.selected_row)
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Page {
                tab,
                generation,
                result,
            } => {
                if generation != self.generation {
                    tracing::debug!(
                        target: "taskboard.tui",
                        tab = tab.as_str(),
                        stale = generation,
                        current = self.generation,
                        "dropping stale page response"
                    );
                    return;
                }
                self.in_flight = false;
                match result {
                    Ok(page) => {
                        self.fetch_error = None;
                        self.board.merge_page(tab, page);
                    }
                    Err(msg) => {
                        self.fetch_error = Some(msg);
                    }
                }
            }
            AppEvent::SubmitDone { task_id, error } => {
                self.footer_msg = Some(match error {
                    None => format!("updated {task_id}"),
                    Some(err) => format!("update of {task_id} failed: {err}"),
                });
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Effect {
        match self.mode {
            Mode::List => self.handle_list_key(key),
            Mode::Form => self.handle_form_key(key),
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Effect {
        match key.code {
            KeyCode::Char('q') => return Effect::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Effect::Quit;
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                return self.select_tab(self.selected_tab.next());
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                return self.select_tab(self.selected_tab.prev());
            }
            KeyCode::Down | KeyCode::Char('j') => return self.move_down(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Char('g') => self.selected_row = 0,
            KeyCode::Char('G') => {
                let len = self.board.tasks(self.selected_tab).len();
                self.selected_row = len.saturating_sub(1);
                return self.maybe_load_more();
            }
            KeyCode::Char('r') => return self.refresh(),
            KeyCode::Char('a') | KeyCode::Enter => {
                if let Some(form) = self.selected_task().map(FormState::for_task) {
                    self.form = Some(form);
                    self.mode = Mode::Form;
                    self.footer_msg = None;
                }
            }
            _ => {}
        }
        Effect::None
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Effect {
        let Some(form) = self.form.as_mut() else {
            self.mode = Mode::List;
            return Effect::None;
        };
        match key.code {
            KeyCode::Esc => {
                self.form = None;
                self.mode = Mode::List;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Effect::Quit;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::Enter => return self.submit_form(),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right
                if form.focus == FormField::Status =>
            {
                let delta = match key.code {
                    KeyCode::Up | KeyCode::Left => -1,
                    _ => 1,
                };
                form.cycle_status(delta);
            }
            KeyCode::Backspace => match form.focus {
                FormField::Assignee => {
                    form.assignee.pop();
                }
                FormField::EndsOn => {
                    form.ends_on.pop();
                }
                FormField::Status => {}
            },
            KeyCode::Char(ch) => match form.focus {
                FormField::Assignee => form.assignee.push(ch),
                FormField::EndsOn => {
                    if ch.is_ascii_digit() || ch == '-' {
                        form.ends_on.push(ch);
                    }
                }
                FormField::Status => {}
            },
            _ => {}
        }
        Effect::None
    }

    fn submit_form(&mut self) -> Effect {
        let Some(form) = self.form.as_ref() else {
            return Effect::None;
        };
        let ends_on = if form.ends_on.trim().is_empty() {
            None
        } else {
            match chrono::NaiveDate::parse_from_str(form.ends_on.trim(), "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    // Keep the form open so the date can be corrected.
                    self.footer_msg = Some(format!("invalid date: {}", form.ends_on));
                    return Effect::None;
                }
            }
        };
        let submit = ActionSubmit {
            task_id: form.task_id.clone(),
            assignee: form.assignee.clone(),
            status: form.status(),
            ends_on,
        };
        self.footer_msg = Some(format!("updating {}...", submit.task_id));
        self.form = None;
        self.mode = Mode::List;
        Effect::Submit(submit)
    }

    fn select_tab(&mut self, tab: Tab) -> Effect {
        if tab == self.selected_tab {
            return Effect::None;
        }
        self.selected_tab = tab;
        self.selected_row = 0;
        self.fetch_error = None;
        // The new tab restarts pagination; in-flight responses for the old
        // tab become stale.
        self.board.reset_cursor(tab);
        self.generation += 1;
        Effect::Fetch
    }

    fn refresh(&mut self) -> Effect {
        self.board.reset_cursor(self.selected_tab);
        self.fetch_error = None;
        self.generation += 1;
        Effect::Fetch
    }

    fn move_down(&mut self) -> Effect {
        let len = self.board.tasks(self.selected_tab).len();
        if self.selected_row + 1 < len {
            self.selected_row += 1;
            if self.selected_row + 1 == len {
                return self.maybe_load_more();
            }
            return Effect::None;
        }
        self.maybe_load_more()
    }

    /// The bottom-sentinel trigger: selection sits on the last loaded row,
    /// the tab still has a cursor, and nothing is in flight.
    fn maybe_load_more(&mut self) -> Effect {
        if self.board.is_empty(self.selected_tab)
            || !self.board.can_load_more(self.selected_tab)
            || self.in_flight
        {
            return Effect::None;
        }
        Effect::Fetch
    }
}
