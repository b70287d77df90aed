//! Wizard state for the checklist terminal UI.
//!
//! [`App`] owns the record being filled in and every piece of UI state. The
//! presentation layer only reads it and calls its operations; nothing else
//! mutates the record.

use crate::domain::{
    Catalog, Category, CategoryKind, ChecklistItem, ItemStatus, ReviewSummary, SubmitResult,
    ValidationError, WizardRecord,
};
use tracing::{debug, info, warn};

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted and which popups are
/// drawn on top of the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Navigating steps and rows
    Normal,
    /// Typing into a text field
    Editing(EditTarget),
    /// Blocking message that must be dismissed
    Alert,
    /// Help screen is displayed
    Help,
    /// The record was sent; only a reset is possible
    Submitted,
}

/// Text field being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    VehiclePlate,
    OperatorName,
    Note(&'static str),
}

/// Rows on the identification step.
pub const IDENTIFICATION_ROWS: usize = 2;

/// Main application state.
///
/// # Examples
///
/// ```
/// use ambucheck::application::App;
///
/// let mut app = App::default();
/// assert_eq!(app.current_step, 0);
/// assert!(app.next_step().is_err());
/// assert_eq!(app.current_step, 0);
/// ```
#[derive(Debug)]
pub struct App {
    pub catalog: Catalog,
    /// The checklist being filled in
    pub record: WizardRecord,
    /// Index of the active category, always within the catalog
    pub current_step: usize,
    /// Highlighted row within the active step
    pub selected_row: usize,
    /// First row visible in the viewport
    pub scroll_row: usize,
    pub mode: AppMode,
    /// Input buffer for editing mode
    pub input: String,
    /// Cursor position within the input buffer, in characters
    pub cursor_position: usize,
    /// Message shown by the blocking alert
    pub alert_message: Option<String>,
    /// Inline error on the review step
    pub submit_error: Option<String>,
    /// A submission is in flight
    pub loading: bool,
    /// Whether an endpoint URL was configured at startup
    pub endpoint_configured: bool,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Number of item rows that fit on screen
    pub viewport_rows: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Catalog::default(), false)
    }
}

impl App {
    pub fn new(catalog: Catalog, endpoint_configured: bool) -> Self {
        Self {
            catalog,
            record: catalog.new_record(),
            current_step: 0,
            selected_row: 0,
            scroll_row: 0,
            mode: AppMode::Normal,
            input: String::new(),
            cursor_position: 0,
            alert_message: None,
            submit_error: None,
            loading: false,
            endpoint_configured,
            help_scroll: 0,
            viewport_rows: 10,
        }
    }

    pub fn current_category(&self) -> &'static Category {
        &self.catalog.categories()[self.current_step]
    }

    pub fn step_count(&self) -> usize {
        self.catalog.category_count()
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 >= self.step_count()
    }

    /// Items of the active category, in catalog order.
    pub fn visible_items(&self) -> Vec<&'static ChecklistItem> {
        self.catalog.items_in(self.current_category().id)
    }

    pub fn row_count(&self) -> usize {
        match self.current_category().kind {
            CategoryKind::Identification => IDENTIFICATION_ROWS,
            CategoryKind::Equipment => self.visible_items().len(),
            CategoryKind::Review => 0,
        }
    }

    pub fn selected_item(&self) -> Option<&'static ChecklistItem> {
        self.visible_items().get(self.selected_row).copied()
    }

    // --- Step transitions -------------------------------------------------

    /// Advances one step, clamping at the review step.
    ///
    /// Leaving the identification step requires both the plate and the
    /// operator name. On rejection the step is unchanged and a blocking alert
    /// is raised.
    pub fn next_step(&mut self) -> Result<(), ValidationError> {
        if self.mode == AppMode::Submitted {
            return Ok(());
        }

        if self.current_category().kind == CategoryKind::Identification
            && !self.record.has_identification()
        {
            let err = ValidationError::MissingIdentification;
            debug!("next step rejected: identification incomplete");
            self.alert_message = Some(err.to_string());
            self.mode = AppMode::Alert;
            return Err(err);
        }

        let next = (self.current_step + 1).min(self.step_count() - 1);
        if next != self.current_step {
            self.go_to_step(next);
        }
        Ok(())
    }

    /// Goes back one step, clamping at the first step.
    pub fn prev_step(&mut self) {
        if self.mode == AppMode::Submitted {
            return;
        }
        let prev = self.current_step.saturating_sub(1);
        if prev != self.current_step {
            self.go_to_step(prev);
        }
    }

    /// Selects a step directly from the tab bar.
    ///
    /// Only the first tab is reachable until a plate has been typed. Returns
    /// whether the jump happened.
    pub fn jump_to_tab(&mut self, index: usize) -> bool {
        if self.mode == AppMode::Submitted || index >= self.step_count() {
            return false;
        }
        if index != 0 && self.record.vehicle_plate.is_empty() {
            debug!(index, "tab jump ignored: no plate yet");
            return false;
        }
        self.go_to_step(index);
        true
    }

    fn go_to_step(&mut self, step: usize) {
        debug!(from = self.current_step, to = step, "step change");
        self.current_step = step;
        self.selected_row = 0;
        self.scroll_row = 0;
    }

    // --- Item responses ---------------------------------------------------

    pub fn set_status(&mut self, item_id: &str, status: ItemStatus) -> bool {
        self.record.set_status(item_id, status)
    }

    pub fn set_note(&mut self, item_id: &str, note: &str) -> bool {
        self.record.set_note(item_id, note)
    }

    pub fn set_selected_status(&mut self, status: ItemStatus) {
        if let Some(item) = self.selected_item() {
            self.record.set_status(item.id, status);
        }
    }

    pub fn toggle_selected_status(&mut self) {
        if let Some(item) = self.selected_item() {
            if let Some(current) = self.record.response(item.id).map(|r| r.status) {
                self.record.set_status(item.id, current.toggled());
            }
        }
    }

    /// Conforming / non-conforming split of the current record.
    pub fn review_summary(&self) -> ReviewSummary<'_> {
        ReviewSummary::from_record(&self.catalog, &self.record)
    }

    // --- Row selection ----------------------------------------------------

    pub fn move_selection_up(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
            self.ensure_selection_visible();
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_row + 1 < self.row_count() {
            self.selected_row += 1;
            self.ensure_selection_visible();
        }
    }

    pub fn update_viewport_size(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
        self.ensure_selection_visible();
    }

    pub fn ensure_selection_visible(&mut self) {
        if self.selected_row < self.scroll_row {
            self.scroll_row = self.selected_row;
        } else if self.selected_row >= self.scroll_row + self.viewport_rows {
            self.scroll_row = self.selected_row + 1 - self.viewport_rows;
        }
    }

    // --- Text editing -----------------------------------------------------

    /// Opens the field under the selection for editing.
    ///
    /// Does nothing on the review step.
    pub fn start_editing(&mut self) {
        let target = match self.current_category().kind {
            CategoryKind::Identification if self.selected_row == 0 => EditTarget::VehiclePlate,
            CategoryKind::Identification => EditTarget::OperatorName,
            CategoryKind::Equipment => match self.selected_item() {
                Some(item) => EditTarget::Note(item.id),
                None => return,
            },
            CategoryKind::Review => return,
        };

        self.input = match target {
            EditTarget::VehiclePlate => self.record.vehicle_plate.clone(),
            EditTarget::OperatorName => self.record.operator_name.clone(),
            EditTarget::Note(id) => self
                .record
                .response(id)
                .map(|r| r.note.clone())
                .unwrap_or_default(),
        };
        self.cursor_position = self.input.chars().count();
        self.mode = AppMode::Editing(target);
    }

    /// Commits the input buffer to the edited field and moves to the next row.
    pub fn finish_editing(&mut self) {
        let AppMode::Editing(target) = self.mode else {
            return;
        };

        match target {
            EditTarget::VehiclePlate => self.record.set_vehicle_plate(&self.input),
            EditTarget::OperatorName => self.record.set_operator_name(&self.input),
            EditTarget::Note(id) => {
                self.record.set_note(id, &self.input);
            }
        }

        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
        self.move_selection_down();
    }

    pub fn cancel_editing(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.input.len())
    }

    /// Inserts typed text at the cursor. Plates are upper-cased as typed.
    pub fn insert_char(&mut self, c: char) {
        let typed: String = if self.mode == AppMode::Editing(EditTarget::VehiclePlate) {
            c.to_uppercase().collect()
        } else {
            c.to_string()
        };
        let offset = self.byte_offset(self.cursor_position);
        self.input.insert_str(offset, &typed);
        self.cursor_position += typed.chars().count();
    }

    pub fn delete_char_before_cursor(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let offset = self.byte_offset(self.cursor_position);
            self.input.remove(offset);
        }
    }

    pub fn delete_char_at_cursor(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            let offset = self.byte_offset(self.cursor_position);
            self.input.remove(offset);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.input.chars().count();
    }

    // --- Alerts and help --------------------------------------------------

    pub fn dismiss_alert(&mut self) {
        self.alert_message = None;
        self.mode = AppMode::Normal;
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    // --- Submission -------------------------------------------------------

    /// Marks a submission as in flight.
    ///
    /// Ignored unless the review step is active and no submission is already
    /// running. Returns whether the caller should now dispatch the record.
    pub fn begin_submit(&mut self) -> bool {
        if self.loading
            || self.mode != AppMode::Normal
            || self.current_category().kind != CategoryKind::Review
        {
            return false;
        }
        self.loading = true;
        self.submit_error = None;
        true
    }

    /// Applies the outcome of a dispatched submission.
    pub fn finish_submit(&mut self, result: SubmitResult<()>) {
        self.loading = false;
        match result {
            Ok(()) => {
                info!(plate = %self.record.vehicle_plate, "checklist submitted");
                self.mode = AppMode::Submitted;
            }
            Err(err) => {
                warn!(error = ?err, "checklist submission failed");
                self.submit_error = Some(err.to_string());
            }
        }
    }

    pub fn dismiss_submit_error(&mut self) {
        self.submit_error = None;
    }

    /// Starts a new checklist from the default record on the first step.
    pub fn reset(&mut self) {
        self.record = self.catalog.new_record();
        self.go_to_step(0);
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
        self.alert_message = None;
        self.submit_error = None;
        self.loading = false;
    }
}
