pub mod activity_dialog;
pub mod split_dialog;

pub use activity_dialog::{ActivityDialogAction, ActivityDialogState};
pub use split_dialog::{SplitDialogAction, SplitDialogState};
