//! Resize session state for activity cards.
//!
//! Cards expose a top and a bottom handle. While a handle is held, vertical
//! pointer travel converts to 15-minute steps through the scheduling layer,
//! which also handles wrapping past the visible window onto neighbouring
//! days. The session stores the span at grab time so every frame recomputes
//! from the original, not from the previous frame's preview.

use egui::{Context, Id, Pos2, Rect, Vec2};

use crate::models::activity::{Activity, ActivityId};
use crate::models::grid::GridBounds;
use crate::services::observer::ScheduleObserver;
use crate::services::scheduling::resize::{
    apply_resize, steps_from_drag, ResizeEdge, TimeSpan,
};

/// Height of the handle hit zone at each edge of a card.
pub const HANDLE_SIZE: f32 = 8.0;

#[derive(Clone, Debug)]
pub struct ResizeContext {
    pub activity_id: ActivityId,
    pub edge: ResizeEdge,
    pub original_span: TimeSpan,
    pub grab_pos: Pos2,
    pub pointer_pos: Option<Pos2>,
}

impl ResizeContext {
    pub fn from_activity(activity: &Activity, edge: ResizeEdge, grab_pos: Pos2) -> Self {
        Self {
            activity_id: activity.id,
            edge,
            original_span: TimeSpan::of(activity),
            grab_pos,
            pointer_pos: None,
        }
    }

    /// Accumulated steps for the current pointer position.
    pub fn steps(&self) -> i64 {
        match self.pointer_pos {
            Some(pos) => steps_from_drag(pos.y - self.grab_pos.y),
            None => 0,
        }
    }

    /// Span the card would have if released now.
    pub fn preview_span(&self, bounds: &GridBounds, observer: &dyn ScheduleObserver) -> TimeSpan {
        apply_resize(
            &self.original_span,
            self.activity_id,
            self.edge,
            self.steps(),
            bounds,
            observer,
        )
    }
}

pub struct ResizeManager;

impl ResizeManager {
    fn storage_id() -> Id {
        Id::new("trip_activity_resize_state")
    }

    pub fn begin(ctx: &Context, context: ResizeContext) {
        ctx.memory_mut(|mem| {
            mem.data.insert_persisted(Self::storage_id(), context);
        });
    }

    pub fn active(ctx: &Context) -> Option<ResizeContext> {
        ctx.memory_mut(|mem| mem.data.get_persisted::<ResizeContext>(Self::storage_id()))
    }

    pub fn is_active(ctx: &Context) -> bool {
        Self::active(ctx).is_some()
    }

    pub fn is_resizing_activity(ctx: &Context, activity_id: ActivityId) -> bool {
        Self::active(ctx).map_or(false, |c| c.activity_id == activity_id)
    }

    pub fn update_pointer(ctx: &Context, pointer_pos: Pos2) {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            if let Some(mut state) = mem.data.get_persisted::<ResizeContext>(id) {
                state.pointer_pos = Some(pointer_pos);
                mem.data.insert_persisted(id, state);
            }
        });
    }

    pub fn finish(ctx: &Context) -> Option<ResizeContext> {
        let id = Self::storage_id();
        let mut result = None;
        ctx.memory_mut(|mem| {
            if let Some(current) = mem.data.get_persisted::<ResizeContext>(id) {
                result = Some(current);
                mem.data.remove::<ResizeContext>(id);
            }
        });
        result
    }

    /// Discard the session without committing the preview span.
    pub fn cancel(ctx: &Context) {
        ctx.memory_mut(|mem| {
            mem.data.remove::<ResizeContext>(Self::storage_id());
        });
    }
}

/// Hit zones for the two handles of a card rect. Small cards split in half
/// so both edges stay grabbable.
pub struct HandleRects {
    pub top: Rect,
    pub bottom: Rect,
}

impl HandleRects {
    pub fn for_card(card_rect: Rect) -> Self {
        let zone_height = if card_rect.height() < HANDLE_SIZE * 2.0 {
            card_rect.height() / 2.0
        } else {
            HANDLE_SIZE
        };

        Self {
            top: Rect::from_min_size(
                Pos2::new(card_rect.left(), card_rect.top()),
                Vec2::new(card_rect.width(), zone_height),
            ),
            bottom: Rect::from_min_size(
                Pos2::new(card_rect.left(), card_rect.bottom() - zone_height),
                Vec2::new(card_rect.width(), zone_height),
            ),
        }
    }

    pub fn edge_at(&self, pos: Pos2) -> Option<ResizeEdge> {
        if self.top.contains(pos) {
            Some(ResizeEdge::Start)
        } else if self.bottom.contains(pos) {
            Some(ResizeEdge::End)
        } else {
            None
        }
    }
}
