//! Key handling for the application wizard

use super::App;
use crate::state::wizard::{cycle_choice, rows_for, Advance, Field, PreferenceOption, RowKind, WizardStep};
use crate::state::{View, WizardView};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, info, warn};

/// Next enabled option after `current`, wrapping. A blank slot starts at either end.
pub(crate) fn next_enabled<'a>(
    options: &'a [PreferenceOption],
    current: &str,
    forward: bool,
) -> Option<&'a str> {
    let len = options.len();
    if len == 0 {
        return None;
    }
    let start = options.iter().position(|o| o.name == current);
    (1..=len)
        .map(|offset| match (start, forward) {
            (Some(i), true) => (i + offset) % len,
            (Some(i), false) => (i + len - offset % len) % len,
            (None, true) => offset - 1,
            (None, false) => len - offset,
        })
        .map(|i| &options[i])
        .find(|o| !o.disabled)
        .map(|o| o.name.as_str())
}

impl App {
    /// Start a fresh wizard and load institutions
    pub(super) async fn open_wizard(&mut self) {
        self.state.wizard = WizardView::default();
        self.navigate(View::Wizard);
        self.load_institutions().await;
    }

    async fn load_institutions(&mut self) {
        match self.api.list_institutions().await {
            Ok(institutions) => {
                debug!("Loaded {} institutions", institutions.len());
                self.state.wizard.institutions = institutions;
                self.state.wizard.institution_index = 0;
            }
            Err(e) => {
                warn!("Failed to load institutions: {}", e);
                self.state.wizard.institutions.clear();
                self.push_error(format!("Could not load institutions. {}", e));
            }
        }
    }

    async fn load_courses(&mut self) {
        let Ok(institution_id) = self.state.wizard.store.draft.institution_id.parse::<i64>() else {
            return;
        };
        match self.api.list_courses(institution_id).await {
            Ok(courses) => {
                debug!("Loaded {} courses for institution {}", courses.len(), institution_id);
                self.state.wizard.courses = courses;
            }
            Err(e) => {
                warn!("Failed to load courses: {}", e);
                self.state.wizard.courses.clear();
                self.push_error(format!("Could not load courses. {}", e));
            }
        }
    }

    pub(super) async fn handle_wizard_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.wizard.store.is_submitted() {
            self.handle_result_key(key);
            return Ok(());
        }
        if self.state.wizard.store.current_step == 0 {
            self.handle_institution_key(key).await;
        } else {
            self.handle_form_key(key).await;
        }
        Ok(())
    }

    async fn handle_institution_key(&mut self, key: KeyEvent) {
        let wizard = &mut self.state.wizard;
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Up => {
                wizard.institution_index = wizard.institution_index.saturating_sub(1);
            }
            KeyCode::Down => {
                if wizard.institution_index + 1 < wizard.institutions.len() {
                    wizard.institution_index += 1;
                }
            }
            KeyCode::Char('r') => self.load_institutions().await,
            KeyCode::Enter => {
                if let Some(institution) = wizard.institutions.get(wizard.institution_index).cloned() {
                    if let Err(e) = wizard.store.select_institution(&institution) {
                        self.push_error(e.to_string());
                        return;
                    }
                }
                self.advance_wizard().await;
            }
            _ => {}
        }
    }

    async fn handle_form_key(&mut self, key: KeyEvent) {
        let store = &self.state.wizard.store;
        let rows = rows_for(store.step(), store.draft.institution_type);
        let row = rows
            .get(self.state.wizard.active_row.min(rows.len().saturating_sub(1)))
            .copied();

        match key.code {
            KeyCode::Esc => {
                self.leave_row().await;
                self.state.wizard.store.retreat();
                self.state.wizard.active_row = 0;
            }
            KeyCode::Enter => {
                self.leave_row().await;
                self.advance_wizard().await;
            }
            KeyCode::Down | KeyCode::Tab => {
                self.leave_row().await;
                if self.state.wizard.active_row + 1 < rows.len() {
                    self.state.wizard.active_row += 1;
                }
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.leave_row().await;
                self.state.wizard.active_row = self.state.wizard.active_row.saturating_sub(1);
            }
            KeyCode::Left | KeyCode::Right => {
                if let Some(row) = row {
                    self.cycle_row(row.field, row.kind, key.code == KeyCode::Right);
                }
            }
            KeyCode::Char(' ') if row.is_some_and(|r| r.kind == RowKind::Flag) => {
                if let Some(row) = row {
                    let store = &mut self.state.wizard.store;
                    let on = store.draft.is_filled(row.field);
                    store.update_data(row.field, !on);
                }
            }
            _ => {
                if let Some(row) = row.filter(|r| r.kind == RowKind::Text) {
                    let store = &mut self.state.wizard.store;
                    let mut value = store.draft.text(row.field).to_string();
                    if Self::edit_text(&mut value, key) {
                        store.update_data(row.field, value);
                    }
                }
            }
        }
    }

    fn cycle_row(&mut self, field: Field, kind: RowKind, forward: bool) {
        let wizard = &mut self.state.wizard;
        match kind {
            RowKind::Choice(options) => {
                let next = cycle_choice(options, wizard.store.draft.text(field), forward);
                wizard.store.update_data(field, next);
            }
            RowKind::Flag => {
                let on = wizard.store.draft.is_filled(field);
                wizard.store.update_data(field, !on);
            }
            RowKind::Preference(slot) => {
                let options = wizard.store.preference_options(slot, &wizard.courses);
                let current = wizard.store.draft.text(field);
                let Some(next) = next_enabled(&options, current, forward).map(str::to_string) else {
                    return;
                };
                if let Err(e) = wizard.store.select_preference(slot, &next) {
                    self.push_error(e.to_string());
                }
            }
            RowKind::Text => {}
        }
    }

    /// Side effects of moving off the focused row
    async fn leave_row(&mut self) {
        let wizard = &self.state.wizard;
        let store = &wizard.store;
        if store.step() != WizardStep::BasicInfo {
            return;
        }
        let rows = rows_for(store.step(), store.draft.institution_type);
        let on_email = rows
            .get(wizard.active_row)
            .is_some_and(|r| r.field == Field::Email);
        let email = store.draft.email.trim().to_string();
        if !on_email || !email.contains('@') || wizard.looked_up_email.as_deref() == Some(email.as_str()) {
            return;
        }

        self.state.wizard.looked_up_email = Some(email.clone());
        match self.api.lookup_student(&email).await {
            Ok(result) => {
                if let Some(message) = self.state.wizard.store.apply_lookup(&result) {
                    self.state.status_message = Some(message);
                }
            }
            Err(e) => warn!("Applicant lookup failed: {}", e),
        }
    }

    async fn advance_wizard(&mut self) {
        match self.state.wizard.store.advance() {
            Ok(Advance::Moved(step)) => {
                self.state.wizard.active_row = 0;
                if step == WizardStep::CourseSelection {
                    self.load_courses().await;
                }
            }
            Ok(Advance::ReadyToSubmit) => self.submit_application().await,
            Err(e) => self.push_error(e.to_string()),
        }
    }

    async fn submit_application(&mut self) {
        let result = self.state.wizard.store.submit_form(self.api.as_ref()).await;
        match result {
            Ok(status) => {
                info!("Wizard finished with status {}", status);
            }
            Err(e) => self.push_error(format!("Submission failed. {}", e)),
        }
    }

    fn handle_result_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('n') => {
                self.state.wizard.store.reset_form();
                self.state.wizard.active_row = 0;
                self.state.wizard.looked_up_email = None;
            }
            KeyCode::Char('y') => {
                let reference = self
                    .state
                    .wizard
                    .store
                    .outcome
                    .as_ref()
                    .and_then(|o| o.application_ref_id.clone());
                if let Some(reference) = reference {
                    self.copy_text("application reference", &reference);
                }
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.go_back(),
            _ => {}
        }
    }
}
