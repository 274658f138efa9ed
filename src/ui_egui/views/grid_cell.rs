//! Single hour-cell rendering for the trip grid.

use chrono::{NaiveDate, NaiveTime};
use egui::{CursorIcon, Pos2, Rect, Sense, Stroke};

use super::palette::TripGridPalette;
use super::{CreateRequest, GridInteraction};
use crate::ui_egui::drag::DragManager;

/// Paint one hour cell and resolve its pointer interactions: drag hover and
/// drop, and double-click to create.
pub fn render_grid_cell(
    ui: &mut egui::Ui,
    rect: Rect,
    date: NaiveDate,
    slot_start: NaiveTime,
    is_today: bool,
    is_weekend: bool,
    palette: &TripGridPalette,
) -> GridInteraction {
    let mut result = GridInteraction::default();

    let id = ui.id().with(("grid_cell", date, slot_start));
    let response = ui.interact(rect, id, Sense::click());

    let bg = if is_today {
        palette.today_bg
    } else if is_weekend {
        palette.weekend_bg
    } else {
        palette.regular_bg
    };
    ui.painter().rect_filled(rect, 0.0, bg);

    ui.painter().line_segment(
        [
            Pos2::new(rect.left(), rect.top()),
            Pos2::new(rect.right(), rect.top()),
        ],
        Stroke::new(1.0, palette.hour_line),
    );
    ui.painter().line_segment(
        [
            Pos2::new(rect.right(), rect.top()),
            Pos2::new(rect.right(), rect.bottom()),
        ],
        Stroke::new(1.0, palette.divider),
    );

    let drag_active = DragManager::is_active(ui.ctx());

    if response.hovered() {
        if drag_active {
            DragManager::update_hover(ui.ctx(), date, slot_start);
            ui.painter().rect_filled(rect, 0.0, palette.drop_highlight);
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else {
            ui.painter().rect_filled(rect, 0.0, palette.hover_overlay);
        }
    }

    // Drops resolve in the cell under the pointer at release time. Releasing
    // back on the origin cell changes nothing and skips the write.
    if drag_active && response.hovered() && ui.input(|i| i.pointer.any_released()) {
        if let Some(session) = DragManager::finish(ui.ctx()) {
            if !session.is_over_origin() {
                if let Some(target) = session.hovered_target() {
                    result.drop = Some((session.activity_id, target));
                }
            }
        }
    }

    if response.double_clicked() && !drag_active {
        result.create_request = Some(CreateRequest {
            date,
            time: slot_start,
        });
    }

    result
}
