//! Split dialog: divide one activity's attendees into two groups, each with
//! its own title, location and window. Confirming produces a `SplitPlan`
//! that the app applies in one transaction.

use egui::{Context, TextEdit, Window};

use crate::models::activity::Activity;
use crate::models::participant::{AttendeeItem, AttendeeRef};
use crate::services::scheduling::split::{
    build_split, recorded_attendees, sync_group_windows, SplitGroup, SplitMode, SplitPlan,
};
use crate::utils::date::{format_hhmm, parse_hhmm};

pub enum SplitDialogAction {
    Confirm(SplitPlan),
    Cancel,
}

/// Which group an attendee currently belongs to.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Assignment {
    Unassigned,
    GroupA,
    GroupB,
}

pub struct SplitDialogState {
    source: Activity,
    roster: Vec<AttendeeItem>,
    assignments: Vec<Assignment>,
    mode: SplitMode,
    group_a: SplitGroup,
    group_b: SplitGroup,
    start_text: String,
    end_text: String,
    error_message: Option<String>,
}

impl SplitDialogState {
    pub fn new(source: &Activity, roster: Vec<AttendeeItem>) -> Self {
        let mut group_a = SplitGroup::seeded(source, "Group A");
        let group_b = SplitGroup::seeded(source, "Group B");
        let mut assignments = vec![Assignment::Unassigned; roster.len()];

        // Re-splitting a split product seeds group A with the attendees the
        // earlier split recorded for it.
        let recorded = recorded_attendees(source.notes.as_deref());
        for (index, item) in roster.iter().enumerate() {
            if recorded.contains(&item.reference) {
                group_a.assign(item.reference);
                assignments[index] = Assignment::GroupA;
            }
        }
        Self {
            start_text: format_hhmm(group_a.start_time),
            end_text: format_hhmm(group_a.end_time),
            source: source.clone(),
            roster,
            assignments,
            mode: SplitMode::Parallel,
            group_a,
            group_b,
            error_message: None,
        }
    }

    pub fn render(&mut self, ctx: &Context) -> Option<SplitDialogAction> {
        let mut action = None;
        let mut open = true;

        Window::new(format!("Split '{}'", self.source.title))
            .open(&mut open)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Mode:");
                    let mut changed = false;
                    changed |= ui
                        .radio_value(&mut self.mode, SplitMode::Parallel, "Parallel")
                        .changed();
                    changed |= ui
                        .radio_value(&mut self.mode, SplitMode::Sequential, "Sequential")
                        .changed();
                    if changed {
                        sync_group_windows(self.mode, &self.group_a, &mut self.group_b);
                    }
                });
                ui.separator();

                ui.columns(2, |columns| {
                    self.render_group_column(&mut columns[0], Assignment::GroupA);
                    self.render_group_column(&mut columns[1], Assignment::GroupB);
                });

                if !self.roster.is_empty() {
                    ui.separator();
                    ui.label("Attendees:");
                    for index in 0..self.roster.len() {
                        let name = self.roster[index].name.clone();
                        ui.horizontal(|ui| {
                            ui.label(&name);
                            let current = self.assignments[index];
                            for (target, label) in [
                                (Assignment::GroupA, "A"),
                                (Assignment::GroupB, "B"),
                                (Assignment::Unassigned, "-"),
                            ] {
                                if ui.selectable_label(current == target, label).clicked() {
                                    self.reassign(index, target);
                                }
                            }
                        });
                    }
                } else {
                    ui.label("No attendees on this trip yet.");
                }

                if let Some(error) = &self.error_message {
                    ui.colored_label(egui::Color32::from_rgb(200, 60, 60), error);
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Split").clicked() {
                        self.apply_window_edits();
                        match build_split(&self.source, &self.group_a, &self.group_b) {
                            Ok(plan) => action = Some(SplitDialogAction::Confirm(plan)),
                            Err(error) => self.error_message = Some(error.to_string()),
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(SplitDialogAction::Cancel);
                    }
                });
            });

        if !open {
            action = Some(SplitDialogAction::Cancel);
        }
        action
    }

    fn render_group_column(&mut self, ui: &mut egui::Ui, which: Assignment) {
        let (group, heading) = match which {
            Assignment::GroupA => (&mut self.group_a, "Group A"),
            _ => (&mut self.group_b, "Group B"),
        };

        ui.heading(heading);
        ui.add(TextEdit::singleline(&mut group.title).hint_text("Title"));
        let mut location = group.location.clone().unwrap_or_default();
        if ui
            .add(TextEdit::singleline(&mut location).hint_text("Location"))
            .changed()
        {
            group.location = if location.trim().is_empty() {
                None
            } else {
                Some(location)
            };
        }

        if which == Assignment::GroupA {
            ui.horizontal(|ui| {
                ui.label("From");
                let start_changed = ui
                    .add(TextEdit::singleline(&mut self.start_text).desired_width(48.0))
                    .changed();
                ui.label("to");
                let end_changed = ui
                    .add(TextEdit::singleline(&mut self.end_text).desired_width(48.0))
                    .changed();
                if start_changed || end_changed {
                    self.apply_window_edits();
                }
            });
        } else {
            ui.label(format!(
                "{} – {}",
                format_hhmm(self.group_b.start_time),
                format_hhmm(self.group_b.end_time)
            ));
        }

        let count = match which {
            Assignment::GroupA => self.group_a.attendees.len(),
            _ => self.group_b.attendees.len(),
        };
        ui.label(format!("{} attendee(s)", count));
    }

    fn apply_window_edits(&mut self) {
        if let Some(start) = parse_hhmm(&self.start_text) {
            self.group_a.start_time = start;
        }
        if let Some(end) = parse_hhmm(&self.end_text) {
            self.group_a.end_time = end;
        }
        sync_group_windows(self.mode, &self.group_a, &mut self.group_b);
    }

    fn reassign(&mut self, index: usize, target: Assignment) {
        let reference = self.roster[index].reference;
        self.remove_everywhere(reference);
        match target {
            Assignment::GroupA => self.group_a.assign(reference),
            Assignment::GroupB => self.group_b.assign(reference),
            Assignment::Unassigned => {}
        }
        self.assignments[index] = target;
    }

    fn remove_everywhere(&mut self, reference: AttendeeRef) {
        self.group_a.unassign(reference);
        self.group_b.unassign(reference);
    }
}
