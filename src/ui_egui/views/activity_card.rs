//! Activity card rendering and interaction.

use egui::{Color32, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use super::palette::{card_border, card_fill, TripGridPalette};
use super::GridInteraction;
use crate::models::activity::Activity;
use crate::services::placement::{DaySegment, Placement};
use crate::services::scheduling::resize::ResizeEdge;
use crate::ui_egui::drag::{DragContext, DragManager};
use crate::ui_egui::resize::{HandleRects, ResizeContext, ResizeManager};

/// Render one card segment inside a day column. `rect` comes from the
/// placement engine's geometry.
pub fn render_activity_card(
    ui: &mut egui::Ui,
    rect: Rect,
    activity: &Activity,
    placement: &Placement,
    palette: &TripGridPalette,
) -> GridInteraction {
    let mut result = GridInteraction::default();

    let id = ui.id().with(("activity_card", activity.id, placement.segment));
    let response = ui.interact(rect, id, Sense::click_and_drag());

    let being_dragged = DragManager::is_dragging_activity(ui.ctx(), activity.id);
    let fill = if being_dragged {
        card_fill(activity.kind, palette.is_dark).gamma_multiply(0.5)
    } else {
        card_fill(activity.kind, palette.is_dark)
    };
    ui.painter().rect(
        rect,
        3.0,
        fill,
        Stroke::new(1.5, card_border(activity.kind)),
    );

    draw_card_text(ui, rect, activity, placement, palette);

    // Handles exist wherever that edge of the activity is actually visible.
    let handles = HandleRects::for_card(rect);
    let top_active = matches!(placement.segment, DaySegment::Single | DaySegment::Start);
    let bottom_active = matches!(placement.segment, DaySegment::Single | DaySegment::End);

    if let Some(pos) = response.hover_pos() {
        let on_top = top_active && handles.top.contains(pos);
        let on_bottom = bottom_active && handles.bottom.contains(pos);
        if on_top || on_bottom {
            ui.ctx().set_cursor_icon(CursorIcon::ResizeVertical);
        } else {
            ui.ctx().set_cursor_icon(CursorIcon::Grab);
        }
    }

    // A card with a live resize session is not draggable.
    let being_resized = ResizeManager::is_resizing_activity(ui.ctx(), activity.id);
    if response.drag_started() && !being_resized {
        if let Some(pos) = response.interact_pointer_pos() {
            let edge = match handles.edge_at(pos) {
                Some(ResizeEdge::Start) if top_active => Some(ResizeEdge::Start),
                Some(ResizeEdge::End) if bottom_active => Some(ResizeEdge::End),
                _ => None,
            };
            match edge {
                Some(edge) => ResizeManager::begin(
                    ui.ctx(),
                    ResizeContext::from_activity(activity, edge, pos),
                ),
                None => DragManager::begin(ui.ctx(), DragContext::from_activity(activity)),
            }
        }
    }

    if response.clicked() && !being_dragged {
        result.activity_to_edit = Some(activity.clone());
    }

    let response = response.on_hover_text(card_tooltip(activity));
    response.context_menu(|ui| {
        if ui.button("Edit").clicked() {
            result.activity_to_edit = Some(activity.clone());
            ui.close_menu();
        }
        if ui.button("Split...").clicked() {
            result.split_request = Some(activity.clone());
            ui.close_menu();
        }
        let confirm_label = if activity.is_confirmed {
            "Mark unconfirmed"
        } else {
            "Mark confirmed"
        };
        if ui.button(confirm_label).clicked() {
            let mut toggled = activity.clone();
            toggled.is_confirmed = !toggled.is_confirmed;
            result.confirm_toggled = Some(toggled);
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Delete").clicked() {
            result.deleted.push(activity.id);
            ui.close_menu();
        }
    });

    result
}

fn draw_card_text(
    ui: &egui::Ui,
    rect: Rect,
    activity: &Activity,
    placement: &Placement,
    palette: &TripGridPalette,
) {
    let painter = ui.painter();
    let inner = rect.shrink(3.0);
    let title_font = FontId::proportional(12.0);
    let label_font = FontId::proportional(10.0);

    let title = match placement.segment {
        DaySegment::Continuation | DaySegment::End => {
            format!("{} ({})", activity.title, placement.start_label)
        }
        _ => activity.title.clone(),
    };
    let marker = if activity.is_confirmed { "✓ " } else { "" };
    painter.text(
        inner.min,
        egui::Align2::LEFT_TOP,
        format!("{}{}", marker, title),
        title_font,
        palette.text,
    );

    if rect.height() >= 28.0 {
        let time_line = format!("{}–{}", placement.start_label, placement.end_label);
        painter.text(
            Pos2::new(inner.min.x, inner.min.y + 14.0),
            egui::Align2::LEFT_TOP,
            time_line,
            label_font.clone(),
            palette.muted_text,
        );
    }

    if rect.height() >= 42.0 {
        if let Some(location) = activity.location.as_deref() {
            painter.text(
                Pos2::new(inner.min.x, inner.min.y + 26.0),
                egui::Align2::LEFT_TOP,
                location,
                label_font,
                palette.muted_text,
            );
        }
    }
}

fn card_tooltip(activity: &Activity) -> String {
    let mut lines = vec![activity.title.clone()];
    lines.push(format!(
        "{} {} – {} {}",
        activity.start_date, activity.start_time, activity.end_date, activity.end_time
    ));
    if let Some(location) = activity.location.as_deref() {
        lines.push(location.to_string());
    }
    if let Some(notes) = activity.notes.as_deref() {
        lines.push(notes.to_string());
    }
    lines.join("\n")
}

/// Semi-transparent preview of the span a live resize session would commit.
pub fn draw_resize_preview(
    ui: &egui::Ui,
    column_rect: Rect,
    preview_top: f32,
    preview_height: f32,
    palette: &TripGridPalette,
) {
    let rect = Rect::from_min_size(
        Pos2::new(column_rect.left() + 1.0, preview_top),
        Vec2::new(column_rect.width() - 2.0, preview_height.max(4.0)),
    );
    ui.painter().rect(
        rect,
        3.0,
        Color32::TRANSPARENT,
        Stroke::new(2.0, palette.drop_highlight),
    );
}
