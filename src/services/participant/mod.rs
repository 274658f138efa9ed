//! Trip roster persistence: the individuals and companies offered as
//! attendees by the split dialog.

use anyhow::{anyhow, Context, Result};
use rusqlite::{self, params, Connection};

use crate::models::participant::{Company, Participant};

pub struct ParticipantService<'a> {
    conn: &'a Connection,
}

impl<'a> ParticipantService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create_participant(&self, mut participant: Participant) -> Result<Participant> {
        if participant.name.trim().is_empty() {
            return Err(anyhow!("Participant name cannot be empty"));
        }
        self.conn
            .execute(
                "INSERT INTO participants (trip_id, name, email) VALUES (?, ?, ?)",
                params![participant.trip_id, participant.name, participant.email],
            )
            .context("Failed to insert participant")?;
        participant.id = Some(self.conn.last_insert_rowid());
        Ok(participant)
    }

    pub fn create_company(&self, mut company: Company) -> Result<Company> {
        if company.name.trim().is_empty() {
            return Err(anyhow!("Company name cannot be empty"));
        }
        self.conn
            .execute(
                "INSERT INTO companies (trip_id, name, city) VALUES (?, ?, ?)",
                params![company.trip_id, company.name, company.city],
            )
            .context("Failed to insert company")?;
        company.id = Some(self.conn.last_insert_rowid());
        Ok(company)
    }

    pub fn participants_for_trip(&self, trip_id: i64) -> Result<Vec<Participant>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, trip_id, name, email FROM participants
             WHERE trip_id = ? ORDER BY name ASC",
        )?;
        let rows = stmt
            .query_map([trip_id], |row| {
                Ok(Participant {
                    id: Some(row.get(0)?),
                    trip_id: row.get(1)?,
                    name: row.get(2)?,
                    email: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn companies_for_trip(&self, trip_id: i64) -> Result<Vec<Company>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, trip_id, name, city FROM companies
             WHERE trip_id = ? ORDER BY name ASC",
        )?;
        let rows = stmt
            .query_map([trip_id], |row| {
                Ok(Company {
                    id: Some(row.get(0)?),
                    trip_id: row.get(1)?,
                    name: row.get(2)?,
                    city: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn delete_participant(&self, id: i64) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM participants WHERE id = ?", [id])
            .context("Failed to delete participant")?;
        if rows == 0 {
            return Err(anyhow!("Participant with id {} not found", id));
        }
        Ok(())
    }

    pub fn delete_company(&self, id: i64) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM companies WHERE id = ?", [id])
            .context("Failed to delete company")?;
        if rows == 0 {
            return Err(anyhow!("Company with id {} not found", id));
        }
        Ok(())
    }
}
