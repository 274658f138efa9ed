//! The trip grid: one column per trip day, one row per visible hour.
//!
//! The grid is a controlled view. It renders the activities it is handed,
//! and every mutation leaves through the returned `GridInteraction` for the
//! app to apply via the service layer.

use chrono::{Datelike, Local, NaiveDate};
use egui::{FontId, Pos2, Rect, ScrollArea, Sense, Vec2};

use super::activity_card::{draw_resize_preview, render_activity_card};
use super::grid_cell::render_grid_cell;
use super::palette::TripGridPalette;
use super::{GridInteraction, HEADER_HEIGHT, TIME_LABEL_WIDTH};
use crate::models::activity::Activity;
use crate::models::grid::{CalendarDay, GridBounds, TimeSlot};
use crate::models::trip::Trip;
use crate::services::observer::ScheduleObserver;
use crate::services::placement::{placement_for_display, SLOT_HEIGHT};
use crate::ui_egui::resize::ResizeManager;

const MIN_COLUMN_WIDTH: f32 = 130.0;

pub fn render_trip_grid(
    ui: &mut egui::Ui,
    trip: &Trip,
    activities: &[Activity],
    bounds: &GridBounds,
    palette: &TripGridPalette,
    observer: &dyn ScheduleObserver,
) -> GridInteraction {
    let mut result = GridInteraction::default();

    let days = CalendarDay::span(trip.start_date, trip.end_date);
    let slots = TimeSlot::day_slots(bounds);
    let today = Local::now().date_naive();

    // Keep the live resize session fed with the pointer position, and commit
    // it the moment the button goes up, wherever the pointer is.
    if ResizeManager::is_active(ui.ctx()) {
        if let Some(pos) = ui.ctx().pointer_hover_pos() {
            ResizeManager::update_pointer(ui.ctx(), pos);
        }
        if ui.input(|i| i.pointer.any_released()) {
            if let Some(session) = ResizeManager::finish(ui.ctx()) {
                let span = session.preview_span(bounds, observer);
                result.resize_commit = Some((session.activity_id, span));
            }
        }
    }

    ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let available = ui.available_width() - TIME_LABEL_WIDTH;
            let col_width = (available / days.len() as f32).max(MIN_COLUMN_WIDTH);
            let grid_height = HEADER_HEIGHT + slots.len() as f32 * SLOT_HEIGHT;
            let total_width = TIME_LABEL_WIDTH + col_width * days.len() as f32;

            let (grid_rect, _) = ui.allocate_exact_size(
                Vec2::new(total_width, grid_height),
                Sense::hover(),
            );

            draw_hour_rail(ui, grid_rect, &slots, palette);

            for (col, day) in days.iter().enumerate() {
                let column_left = grid_rect.left() + TIME_LABEL_WIDTH + col as f32 * col_width;
                let column_rect = Rect::from_min_size(
                    Pos2::new(column_left, grid_rect.top()),
                    Vec2::new(col_width, grid_height),
                );
                result.merge(render_day_column(
                    ui,
                    column_rect,
                    day,
                    activities,
                    bounds,
                    &slots,
                    today,
                    palette,
                    observer,
                ));
            }
        });

    result
}

fn draw_hour_rail(
    ui: &egui::Ui,
    grid_rect: Rect,
    slots: &[TimeSlot],
    palette: &TripGridPalette,
) {
    let rail = Rect::from_min_size(
        grid_rect.min,
        Vec2::new(TIME_LABEL_WIDTH, grid_rect.height()),
    );
    ui.painter().rect_filled(rail, 0.0, palette.hour_label_bg);

    for (row, slot) in slots.iter().enumerate() {
        let y = grid_rect.top() + HEADER_HEIGHT + row as f32 * SLOT_HEIGHT;
        ui.painter().text(
            Pos2::new(rail.right() - 6.0, y + 2.0),
            egui::Align2::RIGHT_TOP,
            &slot.label,
            FontId::proportional(11.0),
            palette.muted_text,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn render_day_column(
    ui: &mut egui::Ui,
    column_rect: Rect,
    day: &CalendarDay,
    activities: &[Activity],
    bounds: &GridBounds,
    slots: &[TimeSlot],
    today: NaiveDate,
    palette: &TripGridPalette,
    observer: &dyn ScheduleObserver,
) -> GridInteraction {
    let mut result = GridInteraction::default();
    let is_today = day.date == today;
    let is_weekend = matches!(
        day.date.weekday(),
        chrono::Weekday::Sat | chrono::Weekday::Sun
    );

    draw_day_header(ui, column_rect, day, is_today, palette);

    let body_top = column_rect.top() + HEADER_HEIGHT;
    for (row, slot) in slots.iter().enumerate() {
        let cell_rect = Rect::from_min_size(
            Pos2::new(column_rect.left(), body_top + row as f32 * SLOT_HEIGHT),
            Vec2::new(column_rect.width(), SLOT_HEIGHT),
        );
        result.merge(render_grid_cell(
            ui,
            cell_rect,
            day.date,
            slot.start(),
            is_today,
            is_weekend,
            palette,
        ));
    }

    // Cards go on top of the cells, positioned by the placement engine.
    for activity in activities {
        let Some(placement) = placement_for_display(activity, day.date, bounds, observer) else {
            continue;
        };
        let row = (placement.start_hour - bounds.day_start_hour) as f32;
        let top = body_top + row * SLOT_HEIGHT + placement.top_offset;
        let card_rect = Rect::from_min_size(
            Pos2::new(column_rect.left() + 2.0, top),
            Vec2::new(column_rect.width() - 4.0, placement.height_px() - 1.0),
        );
        result.merge(render_activity_card(
            ui,
            card_rect,
            activity,
            &placement,
            palette,
        ));
    }

    // Preview outline for a live resize on this column's activity.
    if let Some(session) = ResizeManager::active(ui.ctx()) {
        let span = session.preview_span(bounds, observer);
        if span.start_date == day.date && bounds.contains_hour(chrono::Timelike::hour(&span.start_time)) {
            let start_row =
                (chrono::Timelike::hour(&span.start_time) - bounds.day_start_hour) as f32;
            let offset =
                chrono::Timelike::minute(&span.start_time) as f32 / 60.0 * SLOT_HEIGHT;
            let top = body_top + start_row * SLOT_HEIGHT + offset;
            let minutes = (span.end_at() - span.start_at()).num_minutes() as f32;
            draw_resize_preview(ui, column_rect, top, minutes / 60.0 * SLOT_HEIGHT, palette);
        }
    }

    result
}

fn draw_day_header(
    ui: &egui::Ui,
    column_rect: Rect,
    day: &CalendarDay,
    is_today: bool,
    palette: &TripGridPalette,
) {
    let header_rect = Rect::from_min_size(
        column_rect.min,
        Vec2::new(column_rect.width(), HEADER_HEIGHT),
    );
    let bg = if is_today {
        palette.today_bg
    } else {
        palette.header_bg
    };
    ui.painter().rect_filled(header_rect, 0.0, bg);
    ui.painter().line_segment(
        [
            Pos2::new(header_rect.right(), header_rect.top()),
            Pos2::new(header_rect.right(), header_rect.bottom()),
        ],
        egui::Stroke::new(1.0, palette.divider),
    );

    ui.painter().text(
        Pos2::new(header_rect.center().x, header_rect.top() + 4.0),
        egui::Align2::CENTER_TOP,
        &day.weekday_label,
        FontId::proportional(12.0),
        palette.header_text,
    );
    ui.painter().text(
        Pos2::new(header_rect.center().x, header_rect.top() + 20.0),
        egui::Align2::CENTER_TOP,
        format!("{} {}", day.month_label, day.day_of_month),
        FontId::proportional(14.0),
        palette.header_text,
    );
}
