//! Trip grid views: the day-by-hour calendar surface and its cards.

use chrono::{NaiveDate, NaiveTime};

use crate::models::activity::{Activity, ActivityId};
use crate::services::scheduling::drop::DropTarget;
use crate::services::scheduling::resize::TimeSpan;

pub mod activity_card;
pub mod grid_cell;
pub mod palette;
pub mod trip_grid;

pub use trip_grid::render_trip_grid;

/// Width of the hour label column.
pub const TIME_LABEL_WIDTH: f32 = 56.0;
/// Height of the day header strip.
pub const HEADER_HEIGHT: f32 = 44.0;

/// Request to open the editor dialog for a fresh activity at a grid slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Everything the grid wants the app to do after a frame. Collected per cell
/// and merged upward, so the render tree itself stays read-only.
#[derive(Default)]
pub struct GridInteraction {
    /// Card clicked for editing.
    pub activity_to_edit: Option<Activity>,
    /// Card whose context menu chose "Split".
    pub split_request: Option<Activity>,
    /// Cards deleted through their context menu.
    pub deleted: Vec<ActivityId>,
    /// Confirmation toggled through the context menu.
    pub confirm_toggled: Option<Activity>,
    /// A drag session finished over this target.
    pub drop: Option<(ActivityId, DropTarget)>,
    /// A resize session finished with this final span.
    pub resize_commit: Option<(ActivityId, TimeSpan)>,
    /// Empty slot double-clicked.
    pub create_request: Option<CreateRequest>,
}

impl GridInteraction {
    pub fn merge(&mut self, other: GridInteraction) {
        if other.activity_to_edit.is_some() {
            self.activity_to_edit = other.activity_to_edit;
        }
        if other.split_request.is_some() {
            self.split_request = other.split_request;
        }
        self.deleted.extend(other.deleted);
        if other.confirm_toggled.is_some() {
            self.confirm_toggled = other.confirm_toggled;
        }
        if other.drop.is_some() {
            self.drop = other.drop;
        }
        if other.resize_commit.is_some() {
            self.resize_commit = other.resize_commit;
        }
        if other.create_request.is_some() {
            self.create_request = other.create_request;
        }
    }
}
