//! Activity persistence: CRUD, grid-ordered queries and the transactional
//! application of scheduling plans.

use rusqlite::Connection;

pub mod batch;
pub mod crud;
pub mod queries;
mod shared;

/// Service for managing trip activities stored in SQLite.
pub struct ActivityService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> ActivityService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}
