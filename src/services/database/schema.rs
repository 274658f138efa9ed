use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_settings_table(conn)?;
    insert_default_settings(conn)?;
    create_trips_table(conn)?;
    create_activities_table(conn)?;
    run_activity_migrations(conn)?;
    create_participants_table(conn)?;
    create_companies_table(conn)?;
    Ok(())
}

fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            day_start_hour INTEGER NOT NULL DEFAULT 6,
            day_end_hour INTEGER NOT NULL DEFAULT 22,
            resize_debounce_ms INTEGER NOT NULL DEFAULT 300,
            auto_apply_travel INTEGER NOT NULL DEFAULT 0,
            theme TEXT NOT NULL DEFAULT 'light',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create settings table")?;

    Ok(())
}

fn insert_default_settings(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO settings (id) VALUES (1)",
        [],
    )
    .context("Failed to seed default settings")?;
    Ok(())
}

fn create_trips_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS trips (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )
    .context("Failed to create trips table")?;
    Ok(())
}

fn create_activities_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS activities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            trip_id INTEGER NOT NULL REFERENCES trips(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            description TEXT,
            location TEXT,
            kind TEXT NOT NULL DEFAULT 'meeting',
            notes TEXT,
            is_confirmed INTEGER NOT NULL DEFAULT 0,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )
    .context("Failed to create activities table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_activities_trip_date
         ON activities(trip_id, start_date)",
        [],
    )
    .context("Failed to create activities index")?;
    Ok(())
}

fn run_activity_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "activities",
        "notes",
        "ALTER TABLE activities ADD COLUMN notes TEXT",
    )?;

    migrations::ensure_column(
        conn,
        "activities",
        "is_confirmed",
        "ALTER TABLE activities ADD COLUMN is_confirmed INTEGER NOT NULL DEFAULT 0",
    )?;

    Ok(())
}

fn create_participants_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS participants (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            trip_id INTEGER NOT NULL REFERENCES trips(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            email TEXT
        )",
        [],
    )
    .context("Failed to create participants table")?;
    Ok(())
}

fn create_companies_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS companies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            trip_id INTEGER NOT NULL REFERENCES trips(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            city TEXT
        )",
        [],
    )
    .context("Failed to create companies table")?;
    Ok(())
}
