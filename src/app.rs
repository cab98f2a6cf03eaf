use crate::config::AppConfig;
use crate::domain::{Priority, Task, TaskDraft, TaskId, UiMode, Weekday};
use crate::error::ScheduleError;
use crate::schedule::{DeleteOutcome, Reschedule, Scheduler};
use anyhow::Result;
use log::error;
use std::time::Instant;

/// Number of fields in the add/edit form
pub const FORM_FIELD_COUNT: usize = 6;

/// Form field indices
pub const FIELD_TITLE: usize = 0;
pub const FIELD_DESCRIPTION: usize = 1;
pub const FIELD_PRIORITY: usize = 2;
pub const FIELD_START_TIME: usize = 3;
pub const FIELD_DURATION: usize = 4;
pub const FIELD_DAY: usize = 5;

/// Input form state for adding or editing tasks
#[derive(Debug, Clone)]
pub struct InputFormState {
    /// Task being edited (None when adding)
    pub task_id: Option<TaskId>,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub start_time: String,
    pub duration: String,
    pub day: Weekday,
    pub editing_field: usize,
}

impl InputFormState {
    pub fn new_task() -> Self {
        Self {
            task_id: None,
            title: String::new(),
            description: String::new(),
            priority: Priority::Medium,
            start_time: "09:00".to_string(),
            duration: "30".to_string(),
            day: Weekday::today(),
            editing_field: FIELD_TITLE,
        }
    }

    pub fn for_task(task: &Task) -> Self {
        Self {
            task_id: Some(task.id),
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            start_time: task.start_time.to_string(),
            duration: task.duration.to_string(),
            day: task.day,
            editing_field: FIELD_TITLE,
        }
    }

    pub fn to_draft(&self) -> Result<TaskDraft, ScheduleError> {
        TaskDraft::parse(
            &self.title,
            &self.description,
            self.priority.label(),
            &self.start_time,
            &self.duration,
            self.day.label(),
        )
    }

    /// Text buffer of the current field (None for choice fields)
    fn current_text_mut(&mut self) -> Option<&mut String> {
        match self.editing_field {
            FIELD_TITLE => Some(&mut self.title),
            FIELD_DESCRIPTION => Some(&mut self.description),
            FIELD_START_TIME => Some(&mut self.start_time),
            FIELD_DURATION => Some(&mut self.duration),
            _ => None,
        }
    }
}

/// Severity of a status line message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

/// One-line notice shown under the task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Main application state
pub struct AppState {
    pub scheduler: Scheduler,
    pub config: AppConfig,
    /// Index into the visible (filtered) task list
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub pending_delete: Option<TaskId>,
    pub search_query: String,
    pub status: Option<StatusMessage>,
}

impl AppState {
    pub fn new(scheduler: Scheduler, config: AppConfig) -> Self {
        Self {
            scheduler,
            config,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            pending_delete: None,
            search_query: String::new(),
            status: None,
        }
    }

    /// Tasks matching the current search, in store order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.scheduler.search(&self.search_query)
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.visible_tasks().get(self.selected_index).map(|t| t.id)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible_tasks().len() {
            self.selected_index += 1;
        }
    }

    /// Keep the selection inside the visible list after it shrinks
    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    fn select_task(&mut self, id: TaskId) {
        if let Some(pos) = self.visible_tasks().iter().position(|t| t.id == id) {
            self.selected_index = pos;
        }
    }

    fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    /// Route a core error to the status line; warnings never abort anything
    fn report(&mut self, err: ScheduleError) {
        let kind = if err.is_warning() {
            StatusKind::Warning
        } else {
            error!("event=ui_action module=app status=error error={}", err);
            StatusKind::Error
        };
        self.status = Some(StatusMessage {
            kind,
            text: err.to_string(),
        });
    }

    fn reschedule_notice(prefix: &str, change: Option<Reschedule>) -> String {
        match change {
            Some(change) => format!(
                "{} That slot was taken, rescheduled {} → {}.",
                prefix, change.from, change.to
            ),
            None => prefix.to_string(),
        }
    }

    // ---- add / edit form ----

    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::new_task());
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn start_edit_task(&mut self) {
        let form = self
            .selected_task_id()
            .and_then(|id| self.scheduler.get(id))
            .map(InputFormState::for_task);
        if let Some(form) = form {
            self.input_form = Some(form);
            self.ui_mode = UiMode::EditingTask;
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn input_form_next_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % FORM_FIELD_COUNT;
        }
    }

    pub fn input_form_prev_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + FORM_FIELD_COUNT - 1) % FORM_FIELD_COUNT;
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            if matches!(form.editing_field, FIELD_PRIORITY | FIELD_DAY) {
                if c == ' ' {
                    Self::cycle_choice(form);
                }
            } else if let Some(text) = form.current_text_mut() {
                text.push(c);
            }
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(text) = self.input_form.as_mut().and_then(|f| f.current_text_mut()) {
            text.pop();
        }
    }

    /// Cycle the priority or day field
    pub fn input_form_cycle(&mut self) {
        if let Some(form) = &mut self.input_form {
            Self::cycle_choice(form);
        }
    }

    fn cycle_choice(form: &mut InputFormState) {
        match form.editing_field {
            FIELD_PRIORITY => form.priority = form.priority.next(),
            FIELD_DAY => form.day = form.day.next(),
            _ => {}
        }
    }

    /// Validate and submit; an invalid form stays open with an error
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.clone() else {
            return;
        };

        let draft = match form.to_draft() {
            Ok(draft) => draft,
            Err(err) => {
                self.report(err);
                return;
            }
        };

        let result = match form.task_id {
            None => self.scheduler.create(draft).map(|outcome| {
                (outcome.id, Self::reschedule_notice("Task created.", outcome.rescheduled))
            }),
            Some(id) => self.scheduler.edit(id, draft).map(|outcome| {
                (id, Self::reschedule_notice("Task updated.", outcome.rescheduled))
            }),
        };

        match result {
            Ok((id, notice)) => {
                self.input_form = None;
                self.ui_mode = UiMode::Normal;
                self.select_task(id);
                self.info(notice);
            }
            Err(err) => self.report(err),
        }
    }

    // ---- delete ----

    /// Ask for confirmation (or delete directly when confirmation is off)
    pub fn request_delete(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if self.config.confirm_delete {
            self.pending_delete = Some(id);
            self.ui_mode = UiMode::ConfirmDelete;
        } else {
            self.pending_delete = Some(id);
            self.resolve_delete(true);
        }
    }

    pub fn resolve_delete(&mut self, confirmed: bool) {
        self.ui_mode = UiMode::Normal;
        let Some(id) = self.pending_delete.take() else {
            return;
        };

        match self.scheduler.delete(id, confirmed) {
            Ok(DeleteOutcome::Deleted(task)) => {
                self.clamp_selection();
                self.info(format!("Deleted \"{}\".", task.title));
            }
            Ok(DeleteOutcome::Cancelled) => self.info("Delete cancelled."),
            Err(err) => self.report(err),
        }
    }

    // ---- timer ----

    pub fn start_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            match self.scheduler.start(id) {
                Ok(()) => self.info("Timer started."),
                Err(err) => self.report(err),
            }
        }
    }

    pub fn pause_timer(&mut self) {
        match self.scheduler.pause() {
            Ok(_) => self.info("Timer paused!"),
            Err(err) => self.report(err),
        }
    }

    pub fn stop_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            match self.scheduler.stop(id) {
                Ok(()) => self.info("Timer saved!"),
                Err(err) => self.report(err),
            }
        }
    }

    /// Apply due timer ticks
    pub fn tick(&mut self, now: Instant) -> u32 {
        self.scheduler.poll_timer(now)
    }

    // ---- search ----

    pub fn start_search(&mut self) {
        self.ui_mode = UiMode::Searching;
    }

    pub fn search_add_char(&mut self, c: char) {
        self.search_query.push(c);
        self.selected_index = 0;
    }

    pub fn search_backspace(&mut self) {
        self.search_query.pop();
        self.clamp_selection();
    }

    /// Leave the prompt, keeping the filter
    pub fn finish_search(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    /// Leave the prompt and drop the filter
    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.ui_mode = UiMode::Normal;
        self.clamp_selection();
    }

    /// Persist the store (used on exit)
    pub fn save(&mut self) -> Result<()> {
        self.scheduler.save()?;
        Ok(())
    }
}
