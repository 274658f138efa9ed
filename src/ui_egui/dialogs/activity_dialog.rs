//! Activity editor dialog. Opens blank for a grid slot or pre-filled for an
//! existing card; the app persists the outcome.

use chrono::{NaiveDate, NaiveTime};
use egui::{ComboBox, Context, TextEdit, Window};
use egui_extras::DatePickerButton;

use crate::models::activity::{Activity, ActivityId, ActivityKind};
use crate::utils::date::{format_hhmm, parse_hhmm};

/// What the dialog asks the app to do on close.
pub enum ActivityDialogAction {
    Save(Activity),
    Delete(ActivityId),
    Cancel,
}

pub struct ActivityDialogState {
    editing: Option<Activity>,
    trip_id: i64,
    title: String,
    description: String,
    location: String,
    kind: ActivityKind,
    notes: String,
    is_confirmed: bool,
    start_date: NaiveDate,
    end_date: NaiveDate,
    start_time_text: String,
    end_time_text: String,
    error_message: Option<String>,
}

impl ActivityDialogState {
    /// Blank form for a new activity at a grid slot.
    pub fn for_slot(trip_id: i64, date: NaiveDate, time: NaiveTime) -> Self {
        let end = time + chrono::Duration::hours(1);
        Self {
            editing: None,
            trip_id,
            title: String::new(),
            description: String::new(),
            location: String::new(),
            kind: ActivityKind::Meeting,
            notes: String::new(),
            is_confirmed: false,
            start_date: date,
            end_date: date,
            start_time_text: format_hhmm(time),
            end_time_text: format_hhmm(end),
            error_message: None,
        }
    }

    /// Pre-filled form for an existing activity.
    pub fn for_activity(activity: &Activity) -> Self {
        Self {
            editing: Some(activity.clone()),
            trip_id: activity.trip_id,
            title: activity.title.clone(),
            description: activity.description.clone().unwrap_or_default(),
            location: activity.location.clone().unwrap_or_default(),
            kind: activity.kind,
            notes: activity.notes.clone().unwrap_or_default(),
            is_confirmed: activity.is_confirmed,
            start_date: activity.start_date,
            end_date: activity.end_date,
            start_time_text: format_hhmm(activity.start_time),
            end_time_text: format_hhmm(activity.end_time),
            error_message: None,
        }
    }

    pub fn render(&mut self, ctx: &Context) -> Option<ActivityDialogAction> {
        let mut action = None;
        let mut open = true;
        let title = if self.editing.is_some() {
            "Edit activity"
        } else {
            "New activity"
        };

        Window::new(title)
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("activity_form")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Title");
                        ui.add(TextEdit::singleline(&mut self.title).desired_width(240.0));
                        ui.end_row();

                        ui.label("Kind");
                        ComboBox::from_id_source("activity_kind")
                            .selected_text(self.kind.as_str())
                            .show_ui(ui, |ui| {
                                for kind in ActivityKind::ALL {
                                    ui.selectable_value(&mut self.kind, kind, kind.as_str());
                                }
                            });
                        ui.end_row();

                        ui.label("Location");
                        ui.add(TextEdit::singleline(&mut self.location).desired_width(240.0));
                        ui.end_row();

                        ui.label("Start date");
                        ui.add(
                            DatePickerButton::new(&mut self.start_date)
                                .id_source("activity_start_date"),
                        );
                        ui.end_row();

                        ui.label("Start time");
                        ui.add(
                            TextEdit::singleline(&mut self.start_time_text).desired_width(60.0),
                        );
                        ui.end_row();

                        ui.label("End date");
                        ui.add(
                            DatePickerButton::new(&mut self.end_date)
                                .id_source("activity_end_date"),
                        );
                        ui.end_row();

                        ui.label("End time");
                        ui.add(TextEdit::singleline(&mut self.end_time_text).desired_width(60.0));
                        ui.end_row();

                        ui.label("Description");
                        ui.add(TextEdit::multiline(&mut self.description).desired_rows(2));
                        ui.end_row();

                        ui.label("Notes");
                        ui.add(TextEdit::multiline(&mut self.notes).desired_rows(2));
                        ui.end_row();

                        ui.label("");
                        ui.checkbox(&mut self.is_confirmed, "Confirmed");
                        ui.end_row();
                    });

                if let Some(error) = &self.error_message {
                    ui.colored_label(egui::Color32::from_rgb(200, 60, 60), error);
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        match self.build_activity() {
                            Ok(activity) => action = Some(ActivityDialogAction::Save(activity)),
                            Err(message) => self.error_message = Some(message),
                        }
                    }
                    if let Some(existing) = &self.editing {
                        if ui.button("Delete").clicked() {
                            action = Some(ActivityDialogAction::Delete(existing.id));
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(ActivityDialogAction::Cancel);
                    }
                });
            });

        if !open {
            action = Some(ActivityDialogAction::Cancel);
        }
        action
    }

    fn build_activity(&self) -> Result<Activity, String> {
        let start_time = parse_hhmm(&self.start_time_text)
            .ok_or_else(|| format!("Invalid start time '{}'", self.start_time_text))?;
        let end_time = parse_hhmm(&self.end_time_text)
            .ok_or_else(|| format!("Invalid end time '{}'", self.end_time_text))?;

        let mut activity = match &self.editing {
            Some(existing) => existing.clone(),
            None => Activity::new(
                self.title.clone(),
                self.trip_id,
                self.start_date,
                start_time,
                end_time,
            )?,
        };

        activity.title = self.title.clone();
        activity.description = non_empty(&self.description);
        activity.location = non_empty(&self.location);
        activity.kind = self.kind;
        activity.notes = non_empty(&self.notes);
        activity.is_confirmed = self.is_confirmed;
        activity.start_date = self.start_date;
        activity.end_date = self.end_date;
        activity.start_time = start_time;
        activity.end_time = end_time;
        activity.normalize();
        activity.validate()?;
        Ok(activity)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
