//! Desktop application shell: owns the loaded trip, the dialog states and
//! the application of every grid interaction through the service layer.

#[path = "app/context.rs"]
mod context;
#[path = "app/lifecycle.rs"]
mod lifecycle;

use std::time::{Duration, Instant};

use egui::{CentralPanel, Context, TopBottomPanel};

use self::context::AppContext;
use crate::models::activity::{Activity, ActivityId};
use crate::models::settings::Settings;
use crate::models::trip::Trip;
use crate::services::observer::{LogObserver, ScheduleEvent, ScheduleObserver};
use crate::services::participant::ParticipantService;
use crate::services::scheduling::drop::{plan_drop, DropTarget};
use crate::services::scheduling::resize::TimeSpan;
use crate::services::scheduling::split::SplitPlan;
use crate::services::travel::{recalculate, RegionTableEstimator, TravelUpdate};
use crate::services::trip::Direction;
use crate::ui_egui::debounce::DebouncedSpanWriter;
use crate::ui_egui::drag::DragManager;
use crate::ui_egui::resize::ResizeManager;
use crate::ui_egui::dialogs::{
    ActivityDialogAction, ActivityDialogState, SplitDialogAction, SplitDialogState,
};
use crate::ui_egui::views::palette::TripGridPalette;
use crate::ui_egui::views::{render_trip_grid, GridInteraction};
use crate::models::participant::AttendeeItem;

pub struct TripPlannerApp {
    context: AppContext,
    settings: Settings,
    palette: TripGridPalette,
    trip: Option<Trip>,
    activities: Vec<Activity>,
    observer: LogObserver,
    estimator: RegionTableEstimator,
    activity_dialog: Option<ActivityDialogState>,
    split_dialog: Option<SplitDialogState>,
    debounce: DebouncedSpanWriter,
    /// Travel proposal awaiting confirmation when auto-apply is off.
    pending_travel: Vec<TravelUpdate>,
    status_line: Option<String>,
    search_query: String,
    /// Match count for the current query, `None` while the box is empty.
    search_hits: Option<usize>,
}

impl eframe::App for TripPlannerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.flush_due_resize_writes();

        // Escape abandons an in-flight drag or resize without a write.
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            DragManager::cancel(ctx);
            ResizeManager::cancel(ctx);
        }

        self.render_toolbar(ctx);
        self.render_travel_bar(ctx);

        CentralPanel::default().show(ctx, |ui| match &self.trip {
            Some(trip) => {
                let interaction = render_trip_grid(
                    ui,
                    trip,
                    &self.activities,
                    &self.settings.grid_bounds(),
                    &self.palette,
                    &self.observer,
                );
                self.apply_interaction(interaction);
            }
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label("No trip loaded. Check the log for startup errors.");
                });
            }
        });

        self.render_dialogs(ctx);

        // A pending debounced write needs another frame to land.
        if self.debounce.is_pending() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some((id, span)) = self.debounce.take() {
            self.persist_span(id, &span);
        }
    }
}

impl TripPlannerApp {
    fn render_toolbar(&mut self, ctx: &Context) {
        TopBottomPanel::top("trip_toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let Some(trip) = self.trip.clone() else {
                    ui.label("Trip scheduler");
                    return;
                };
                ui.heading(&trip.name);
                ui.label(format!(
                    "{} – {} ({} days)",
                    trip.start_date,
                    trip.end_date,
                    trip.day_count()
                ));

                ui.separator();
                if ui.button("+ Day before").clicked() {
                    self.extend_trip(Direction::Before);
                }
                if ui.button("+ Day after").clicked() {
                    self.extend_trip(Direction::After);
                }
                if ui.button("− First day").clicked() {
                    self.remove_boundary_day(Direction::Before);
                }
                if ui.button("− Last day").clicked() {
                    self.remove_boundary_day(Direction::After);
                }

                ui.separator();
                if ui
                    .checkbox(&mut self.settings.auto_apply_travel, "Auto travel")
                    .changed()
                {
                    self.persist_settings();
                }
                let theme_label = if self.settings.theme == "dark" {
                    "Light mode"
                } else {
                    "Dark mode"
                };
                if ui.button(theme_label).clicked() {
                    self.settings.theme = if self.settings.theme == "dark" {
                        "light".to_string()
                    } else {
                        "dark".to_string()
                    };
                    self.persist_settings();
                }

                ui.separator();
                ui.label("Find:");
                if ui
                    .add(egui::TextEdit::singleline(&mut self.search_query).desired_width(120.0))
                    .changed()
                {
                    self.refresh_search();
                }
                if let Some(hits) = self.search_hits {
                    ui.label(format!("{} match(es)", hits));
                }

                if let Some(status) = &self.status_line {
                    ui.separator();
                    ui.colored_label(egui::Color32::from_rgb(200, 120, 40), status);
                }
            });
        });
    }

    fn render_travel_bar(&mut self, ctx: &Context) {
        if self.pending_travel.is_empty() {
            return;
        }
        let created = self
            .pending_travel
            .iter()
            .filter(|u| u.should_create)
            .count();
        let removed = self
            .pending_travel
            .iter()
            .filter(|u| u.should_delete)
            .count();

        TopBottomPanel::top("travel_proposal_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "Travel proposal: {} new segment(s), {} removal(s)",
                    created, removed
                ));
                if ui.button("Apply").clicked() {
                    let updates = std::mem::take(&mut self.pending_travel);
                    let result = self.context.activity_service().apply_travel_updates(&updates);
                    match result {
                        Ok(()) => self.reload_activities(),
                        Err(e) => {
                            log::error!("Failed to apply travel updates: {:#}", e);
                            self.status_line = Some(format!("Travel update failed: {}", e));
                        }
                    }
                }
                if ui.button("Dismiss").clicked() {
                    self.pending_travel.clear();
                }
            });
        });
    }

    fn apply_interaction(&mut self, interaction: GridInteraction) {
        if let Some(activity) = interaction.activity_to_edit {
            self.activity_dialog = Some(ActivityDialogState::for_activity(&activity));
        }
        if let Some(request) = interaction.create_request {
            if let Some(trip_id) = self.trip.as_ref().and_then(|t| t.id) {
                self.activity_dialog =
                    Some(ActivityDialogState::for_slot(trip_id, request.date, request.time));
            }
        }
        if let Some(activity) = interaction.split_request {
            self.open_split_dialog(&activity);
        }
        if let Some(toggled) = interaction.confirm_toggled {
            if let Err(e) = self.context.activity_service().update(&toggled) {
                log::error!("Failed to toggle confirmation: {:#}", e);
            }
            self.reload_activities();
        }
        let deleted_any = !interaction.deleted.is_empty();
        for id in interaction.deleted {
            if let Some(row_id) = id.row_id() {
                if let Err(e) = self.context.activity_service().delete(row_id) {
                    log::error!("Failed to delete activity: {:#}", e);
                }
            }
        }
        if deleted_any {
            self.reload_activities();
        }
        if let Some((id, target)) = interaction.drop {
            self.handle_drop(id, target);
        }
        if let Some((id, span)) = interaction.resize_commit {
            self.debounce.queue(
                id,
                span,
                Duration::from_millis(self.settings.resize_debounce_ms),
            );
        }
    }

    fn handle_drop(&mut self, dragged: ActivityId, target: DropTarget) {
        let Some(plan) = plan_drop(&self.activities, dragged, target, &self.observer) else {
            return;
        };

        if let Err(e) = self.context.activity_service().apply_drop(&plan) {
            log::error!("Failed to apply drop: {:#}", e);
            self.status_line = Some(format!("Drop failed: {}", e));
            return;
        }
        self.reload_activities();

        // The landed card may now need different travel fillers around it.
        let proposal = recalculate(
            &self.activities,
            dragged,
            target.date,
            target.time,
            &self.estimator,
            &self.observer,
        );
        // The retiming entry is already persisted by the drop itself.
        let proposal: Vec<TravelUpdate> = proposal
            .into_iter()
            .filter(|u| u.should_create || u.should_delete)
            .collect();
        if proposal.is_empty() {
            return;
        }

        if self.settings.auto_apply_travel {
            let result = self.context.activity_service().apply_travel_updates(&proposal);
            match result {
                Ok(()) => self.reload_activities(),
                Err(e) => {
                    log::error!("Failed to auto-apply travel updates: {:#}", e);
                    self.status_line = Some(format!("Travel update failed: {}", e));
                }
            }
        } else {
            self.pending_travel = proposal;
        }
    }

    fn open_split_dialog(&mut self, activity: &Activity) {
        let Some(trip_id) = self.trip.as_ref().and_then(|t| t.id) else {
            return;
        };
        let service: ParticipantService<'_> = self.context.participant_service();
        let companies = service.companies_for_trip(trip_id).unwrap_or_default();
        let participants = service.participants_for_trip(trip_id).unwrap_or_default();
        let roster = AttendeeItem::roster(&companies, &participants);
        self.split_dialog = Some(SplitDialogState::new(activity, roster));
    }

    fn render_dialogs(&mut self, ctx: &Context) {
        if let Some(mut dialog) = self.activity_dialog.take() {
            match dialog.render(ctx) {
                Some(ActivityDialogAction::Save(activity)) => {
                    let outcome = if activity.id.is_draft() {
                        self.context.activity_service().create(activity).map(|_| ())
                    } else {
                        self.context.activity_service().update(&activity)
                    };
                    if let Err(e) = outcome {
                        log::error!("Failed to save activity: {:#}", e);
                        self.status_line = Some(format!("Save failed: {}", e));
                    }
                    self.reload_activities();
                }
                Some(ActivityDialogAction::Delete(id)) => {
                    if let Some(row_id) = id.row_id() {
                        if let Err(e) = self.context.activity_service().delete(row_id) {
                            log::error!("Failed to delete activity: {:#}", e);
                        }
                    }
                    self.reload_activities();
                }
                Some(ActivityDialogAction::Cancel) => {}
                None => self.activity_dialog = Some(dialog),
            }
        }

        if let Some(mut dialog) = self.split_dialog.take() {
            match dialog.render(ctx) {
                Some(SplitDialogAction::Confirm(plan)) => self.apply_split(plan),
                Some(SplitDialogAction::Cancel) => {}
                None => self.split_dialog = Some(dialog),
            }
        }
    }

    fn apply_split(&mut self, plan: SplitPlan) {
        let result = self.context.activity_service().apply_split(&plan);
        match result {
            Ok([first, second]) => {
                self.observer.on_event(&ScheduleEvent::SplitApplied {
                    original: plan.original,
                    group_a: first.title.clone(),
                    group_b: second.title.clone(),
                });
                self.reload_activities();
            }
            Err(e) => {
                log::error!("Failed to apply split: {:#}", e);
                self.status_line = Some(format!("Split failed: {}", e));
            }
        }
    }

    fn extend_trip(&mut self, direction: Direction) {
        let Some(id) = self.trip.as_ref().and_then(|t| t.id) else {
            return;
        };
        match self.context.trip_service().extend(id, direction) {
            Ok(trip) => {
                self.trip = Some(trip);
                self.status_line = None;
            }
            Err(e) => self.status_line = Some(format!("{}", e)),
        }
    }

    fn remove_boundary_day(&mut self, direction: Direction) {
        let Some(id) = self.trip.as_ref().and_then(|t| t.id) else {
            return;
        };
        let result = match direction {
            Direction::Before => self.context.trip_service().remove_first_day(id),
            Direction::After => self.context.trip_service().remove_last_day(id),
        };
        match result {
            Ok(trip) => {
                self.trip = Some(trip);
                self.status_line = None;
            }
            Err(e) => self.status_line = Some(format!("{}", e)),
        }
    }

    fn refresh_search(&mut self) {
        let Some(trip_id) = self.trip.as_ref().and_then(|t| t.id) else {
            self.search_hits = None;
            return;
        };
        if self.search_query.trim().is_empty() {
            self.search_hits = None;
            return;
        }
        let result = self.context.activity_service().search(trip_id, &self.search_query);
        match result {
            Ok(matches) => self.search_hits = Some(matches.len()),
            Err(e) => {
                log::error!("Search failed: {:#}", e);
                self.search_hits = None;
            }
        }
    }

    fn flush_due_resize_writes(&mut self) {
        if let Some((id, span)) = self.debounce.take_due(Instant::now()) {
            self.persist_span(id, &span);
        }
    }

    fn persist_span(&mut self, id: ActivityId, span: &TimeSpan) {
        let Some(row_id) = id.row_id() else {
            return;
        };
        let service = self.context.activity_service();
        let fetched = match service.get(row_id) {
            Ok(Some(activity)) => activity,
            Ok(None) => return,
            Err(e) => {
                log::error!("Failed to load activity for resize: {:#}", e);
                return;
            }
        };

        let mut activity = fetched;
        activity.start_date = span.start_date;
        activity.start_time = span.start_time;
        activity.end_date = span.end_date;
        activity.end_time = span.end_time;
        activity.normalize();
        if let Err(e) = service.update(&activity) {
            log::error!("Failed to persist resize: {:#}", e);
            self.status_line = Some(format!("Resize failed: {}", e));
        }
        self.reload_activities();
    }
}
