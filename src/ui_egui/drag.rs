//! Drag session state for activity cards.
//!
//! The session lives in egui memory so it survives across frames without
//! threading mutable state through the render tree. Cells update the hover
//! target while the pointer is down; the app consumes the session on release
//! and turns it into a drop plan.

use chrono::{NaiveDate, NaiveTime};
use egui::{Context, Id};

use crate::models::activity::{Activity, ActivityId};
use crate::services::scheduling::drop::DropTarget;

#[derive(Clone, Debug)]
pub struct DragContext {
    pub activity_id: ActivityId,
    pub original_date: NaiveDate,
    pub original_time: NaiveTime,
    pub hovered_date: Option<NaiveDate>,
    pub hovered_time: Option<NaiveTime>,
}

impl DragContext {
    pub fn from_activity(activity: &Activity) -> Self {
        Self {
            activity_id: activity.id,
            original_date: activity.start_date,
            original_time: activity.start_time,
            hovered_date: Some(activity.start_date),
            hovered_time: Some(activity.start_time),
        }
    }

    /// The drop target the session currently points at.
    pub fn hovered_target(&self) -> Option<DropTarget> {
        match (self.hovered_date, self.hovered_time) {
            (Some(date), Some(time)) => Some(DropTarget { date, time }),
            _ => None,
        }
    }

    /// Whether releasing here would change anything.
    pub fn is_over_origin(&self) -> bool {
        self.hovered_date == Some(self.original_date)
            && self.hovered_time == Some(self.original_time)
    }
}

pub struct DragManager;

impl DragManager {
    fn storage_id() -> Id {
        Id::new("trip_activity_drag_state")
    }

    pub fn begin(ctx: &Context, context: DragContext) {
        ctx.memory_mut(|mem| {
            mem.data.insert_persisted(Self::storage_id(), context);
        });
    }

    pub fn active(ctx: &Context) -> Option<DragContext> {
        ctx.memory_mut(|mem| mem.data.get_persisted::<DragContext>(Self::storage_id()))
    }

    pub fn is_active(ctx: &Context) -> bool {
        Self::active(ctx).is_some()
    }

    pub fn is_dragging_activity(ctx: &Context, activity_id: ActivityId) -> bool {
        Self::active(ctx).map_or(false, |c| c.activity_id == activity_id)
    }

    pub fn update_hover(ctx: &Context, date: NaiveDate, time: NaiveTime) {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            if let Some(mut state) = mem.data.get_persisted::<DragContext>(id) {
                state.hovered_date = Some(date);
                state.hovered_time = Some(time);
                mem.data.insert_persisted(id, state);
            }
        });
    }

    /// Consume the session on pointer release.
    pub fn finish(ctx: &Context) -> Option<DragContext> {
        let id = Self::storage_id();
        let mut result = None;
        ctx.memory_mut(|mem| {
            if let Some(current) = mem.data.get_persisted::<DragContext>(id) {
                result = Some(current);
                mem.data.remove::<DragContext>(id);
            }
        });
        result
    }

    /// Discard the session without producing a drop.
    pub fn cancel(ctx: &Context) {
        ctx.memory_mut(|mem| {
            mem.data.remove::<DragContext>(Self::storage_id());
        });
    }
}
