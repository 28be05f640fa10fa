//! Encounter database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{BillingStatus, Encounter, EncounterStatus, EncounterType, SoapNote};

impl Database {
    /// Insert a new encounter.
    pub fn insert_encounter(&self, encounter: &Encounter) -> DbResult<()> {
        let soap_json = encounter
            .soap
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.conn.execute(
            r#"
            INSERT INTO encounters (
                id, patient_id, hospital_id, encounter_type, department, doctor,
                status, created_at, soap, billing_status, total_charge
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                encounter.id,
                encounter.patient_id,
                encounter.hospital_id,
                encounter.encounter_type.as_str(),
                encounter.department,
                encounter.doctor,
                encounter.status.as_str(),
                encounter.created_at,
                soap_json,
                encounter.billing_status.as_str(),
                encounter.total_charge,
            ],
        )?;
        Ok(())
    }

    /// Replace the stored record matching `encounter.id` wholesale.
    ///
    /// Returns false when no row matched. `created_at` is immutable and is
    /// not part of the update.
    pub fn replace_encounter(&self, encounter: &Encounter) -> DbResult<bool> {
        let soap_json = encounter
            .soap
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let rows_affected = self.conn.execute(
            r#"
            UPDATE encounters SET
                patient_id = ?2,
                hospital_id = ?3,
                encounter_type = ?4,
                department = ?5,
                doctor = ?6,
                status = ?7,
                soap = ?8,
                billing_status = ?9,
                total_charge = ?10
            WHERE id = ?1
            "#,
            params![
                encounter.id,
                encounter.patient_id,
                encounter.hospital_id,
                encounter.encounter_type.as_str(),
                encounter.department,
                encounter.doctor,
                encounter.status.as_str(),
                soap_json,
                encounter.billing_status.as_str(),
                encounter.total_charge,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get an encounter by ID.
    pub fn get_encounter(&self, id: &str) -> DbResult<Option<Encounter>> {
        self.conn
            .query_row(
                r#"
                SELECT id, patient_id, hospital_id, encounter_type, department, doctor,
                       status, created_at, soap, billing_status, total_charge
                FROM encounters
                WHERE id = ?
                "#,
                [id],
                encounter_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List encounters for a hospital, newest first.
    pub fn list_encounters_by_hospital(&self, hospital_id: &str) -> DbResult<Vec<Encounter>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, patient_id, hospital_id, encounter_type, department, doctor,
                   status, created_at, soap, billing_status, total_charge
            FROM encounters
            WHERE hospital_id = ?
            ORDER BY created_at DESC, id
            "#,
        )?;

        let rows = stmt.query_map([hospital_id], encounter_row)?;

        let mut encounters = Vec::new();
        for row in rows {
            encounters.push(row?.try_into()?);
        }
        Ok(encounters)
    }

    /// List encounters in a given workflow stage.
    pub fn list_encounters_by_status(&self, status: EncounterStatus) -> DbResult<Vec<Encounter>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, patient_id, hospital_id, encounter_type, department, doctor,
                   status, created_at, soap, billing_status, total_charge
            FROM encounters
            WHERE status = ?
            ORDER BY created_at DESC, id
            "#,
        )?;

        let rows = stmt.query_map([status.as_str()], encounter_row)?;

        let mut encounters = Vec::new();
        for row in rows {
            encounters.push(row?.try_into()?);
        }
        Ok(encounters)
    }

    /// List encounters whose visit has not been closed.
    pub fn list_unfinished_encounters(&self) -> DbResult<Vec<Encounter>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, patient_id, hospital_id, encounter_type, department, doctor,
                   status, created_at, soap, billing_status, total_charge
            FROM encounters
            WHERE status != 'finished'
            ORDER BY created_at DESC, id
            "#,
        )?;

        let rows = stmt.query_map([], encounter_row)?;

        let mut encounters = Vec::new();
        for row in rows {
            encounters.push(row?.try_into()?);
        }
        Ok(encounters)
    }

    /// List encounters ready for claim submission (billing or finished).
    pub fn list_claimable_encounters(&self) -> DbResult<Vec<Encounter>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, patient_id, hospital_id, encounter_type, department, doctor,
                   status, created_at, soap, billing_status, total_charge
            FROM encounters
            WHERE status IN ('billing', 'finished')
            ORDER BY created_at DESC, id
            "#,
        )?;

        let rows = stmt.query_map([], encounter_row)?;

        let mut encounters = Vec::new();
        for row in rows {
            encounters.push(row?.try_into()?);
        }
        Ok(encounters)
    }

    /// Count encounters for a hospital.
    pub fn count_encounters(&self, hospital_id: &str) -> DbResult<u32> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM encounters WHERE hospital_id = ?",
            [hospital_id],
            |row| row.get(0),
        )?;
        Ok(count as u32)
    }

    /// Count encounters of one type for a hospital.
    pub fn count_encounters_by_type(
        &self,
        hospital_id: &str,
        encounter_type: EncounterType,
    ) -> DbResult<u32> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM encounters WHERE hospital_id = ? AND encounter_type = ?",
            params![hospital_id, encounter_type.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as u32)
    }

    /// Count encounters in one workflow stage for a hospital.
    pub fn count_encounters_by_status(
        &self,
        hospital_id: &str,
        status: EncounterStatus,
    ) -> DbResult<u32> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM encounters WHERE hospital_id = ? AND status = ?",
            params![hospital_id, status.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as u32)
    }

    /// Count unpaid encounters for a hospital.
    pub fn count_unpaid_encounters(&self, hospital_id: &str) -> DbResult<u32> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM encounters WHERE hospital_id = ? AND billing_status = 'unpaid'",
            [hospital_id],
            |row| row.get(0),
        )?;
        Ok(count as u32)
    }

    /// Sum of charges over paid encounters for a hospital.
    pub fn sum_paid_charges(&self, hospital_id: &str) -> DbResult<f64> {
        let total: f64 = self.conn.query_row(
            r#"
            SELECT COALESCE(SUM(total_charge), 0)
            FROM encounters
            WHERE hospital_id = ? AND billing_status = 'paid' AND total_charge IS NOT NULL
            "#,
            [hospital_id],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Per-department encounter counts for a hospital, largest first.
    pub fn department_counts(&self, hospital_id: &str) -> DbResult<Vec<(String, u32)>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT department, COUNT(*) as n
            FROM encounters
            WHERE hospital_id = ?
            GROUP BY department
            ORDER BY n DESC, department
            "#,
        )?;

        let rows = stmt.query_map([hospital_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u32))
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// (department, status) pairs for a hospital, the batch form handed to
    /// the insight summarizer.
    pub fn encounter_digest(&self, hospital_id: &str) -> DbResult<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT department, status FROM encounters WHERE hospital_id = ? ORDER BY created_at DESC, id",
        )?;

        let rows = stmt.query_map([hospital_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

/// Intermediate row struct for database mapping.
struct EncounterRow {
    id: String,
    patient_id: String,
    hospital_id: String,
    encounter_type: String,
    department: String,
    doctor: String,
    status: String,
    created_at: String,
    soap: Option<String>,
    billing_status: String,
    total_charge: Option<f64>,
}

fn encounter_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EncounterRow> {
    Ok(EncounterRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        hospital_id: row.get(2)?,
        encounter_type: row.get(3)?,
        department: row.get(4)?,
        doctor: row.get(5)?,
        status: row.get(6)?,
        created_at: row.get(7)?,
        soap: row.get(8)?,
        billing_status: row.get(9)?,
        total_charge: row.get(10)?,
    })
}

impl TryFrom<EncounterRow> for Encounter {
    type Error = DbError;

    fn try_from(row: EncounterRow) -> Result<Self, Self::Error> {
        let encounter_type = EncounterType::parse(&row.encounter_type).ok_or_else(|| {
            DbError::Constraint(format!("Unknown encounter type: {}", row.encounter_type))
        })?;
        let status = EncounterStatus::parse(&row.status)
            .ok_or_else(|| DbError::Constraint(format!("Unknown encounter status: {}", row.status)))?;
        let billing_status = BillingStatus::parse(&row.billing_status).ok_or_else(|| {
            DbError::Constraint(format!("Unknown billing status: {}", row.billing_status))
        })?;
        let soap: Option<SoapNote> = row.soap.as_deref().map(serde_json::from_str).transpose()?;

        Ok(Encounter {
            id: row.id,
            patient_id: row.patient_id,
            hospital_id: row.hospital_id,
            encounter_type,
            department: row.department,
            doctor: row.doctor,
            status,
            created_at: row.created_at,
            soap,
            billing_status,
            total_charge: row.total_charge,
        })
    }
}
