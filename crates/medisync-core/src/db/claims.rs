//! Claim database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Claim, ClaimStatus};

impl Database {
    /// Insert a new claim.
    pub fn insert_claim(&self, claim: &Claim) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO claims (
                id, encounter_id, provider_id, status, amount, submitted_at, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                claim.id,
                claim.encounter_id,
                claim.provider_id,
                claim.status.as_str(),
                claim.amount,
                claim.submitted_at,
                claim.notes,
            ],
        )?;
        Ok(())
    }

    /// Get a claim by ID.
    pub fn get_claim(&self, id: &str) -> DbResult<Option<Claim>> {
        self.conn
            .query_row(
                r#"
                SELECT id, encounter_id, provider_id, status, amount, submitted_at, notes
                FROM claims
                WHERE id = ?
                "#,
                [id],
                claim_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Overwrite a claim's status. Returns false when no row matched.
    pub fn update_claim_status(&self, id: &str, status: ClaimStatus) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE claims SET status = ? WHERE id = ?",
            params![status.as_str(), id],
        )?;
        Ok(rows_affected > 0)
    }

    /// List all claims, newest first.
    pub fn list_claims(&self) -> DbResult<Vec<Claim>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, encounter_id, provider_id, status, amount, submitted_at, notes
            FROM claims
            ORDER BY submitted_at DESC, id
            "#,
        )?;

        let rows = stmt.query_map([], claim_row)?;

        let mut claims = Vec::new();
        for row in rows {
            claims.push(row?.try_into()?);
        }
        Ok(claims)
    }

    /// List claims referencing one encounter.
    pub fn list_claims_for_encounter(&self, encounter_id: &str) -> DbResult<Vec<Claim>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, encounter_id, provider_id, status, amount, submitted_at, notes
            FROM claims
            WHERE encounter_id = ?
            ORDER BY submitted_at DESC, id
            "#,
        )?;

        let rows = stmt.query_map([encounter_id], claim_row)?;

        let mut claims = Vec::new();
        for row in rows {
            claims.push(row?.try_into()?);
        }
        Ok(claims)
    }

    /// Delete a claim. Returns false when no row matched.
    pub fn delete_claim(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM claims WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

/// Intermediate row struct for database mapping.
struct ClaimRow {
    id: String,
    encounter_id: String,
    provider_id: String,
    status: String,
    amount: f64,
    submitted_at: String,
    notes: Option<String>,
}

fn claim_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ClaimRow> {
    Ok(ClaimRow {
        id: row.get(0)?,
        encounter_id: row.get(1)?,
        provider_id: row.get(2)?,
        status: row.get(3)?,
        amount: row.get(4)?,
        submitted_at: row.get(5)?,
        notes: row.get(6)?,
    })
}

impl TryFrom<ClaimRow> for Claim {
    type Error = DbError;

    fn try_from(row: ClaimRow) -> Result<Self, Self::Error> {
        let status = ClaimStatus::parse(&row.status)
            .ok_or_else(|| DbError::Constraint(format!("Unknown claim status: {}", row.status)))?;

        Ok(Claim {
            id: row.id,
            encounter_id: row.encounter_id,
            provider_id: row.provider_id,
            status,
            amount: row.amount,
            submitted_at: row.submitted_at,
            notes: row.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Encounter, EncounterType, Gender, Hospital, InsuranceProvider, Patient,
    };

    fn setup_db() -> (Database, String) {
        let db = Database::open_in_memory().unwrap();
        db.upsert_hospital(&Hospital {
            id: "h1".into(),
            name: "RS Medika Malang".into(),
            code: "MLG".into(),
            location: "Malang".into(),
        })
        .unwrap();
        db.upsert_insurer(&InsuranceProvider {
            id: "ins1".into(),
            name: "BPJS Kesehatan".into(),
            code: "BPJS".into(),
        })
        .unwrap();
        let patient = Patient::new(
            "MRN-1001".into(),
            "Budi Santoso".into(),
            "1985-05-12".into(),
            Gender::Male,
            "3507121205850001".into(),
        );
        db.insert_patient(&patient).unwrap();
        let encounter = Encounter::new(
            patient.id.clone(),
            "h1".into(),
            EncounterType::Outpatient,
            "General Medicine".into(),
            "Dr. On Duty".into(),
        );
        db.insert_encounter(&encounter).unwrap();
        (db, encounter.id)
    }

    #[test]
    fn test_insert_get_and_list() {
        let (db, encounter_id) = setup_db();

        let claim = Claim::new(encounter_id.clone(), "ins1".into(), 250_000.0);
        db.insert_claim(&claim).unwrap();

        let retrieved = db.get_claim(&claim.id).unwrap().unwrap();
        assert_eq!(retrieved.status, ClaimStatus::Submitted);
        assert_eq!(retrieved.amount, 250_000.0);

        assert_eq!(db.list_claims().unwrap().len(), 1);
        assert_eq!(db.list_claims_for_encounter(&encounter_id).unwrap().len(), 1);
        assert_eq!(db.list_claims_for_encounter("ghost").unwrap().len(), 0);
    }

    #[test]
    fn test_update_status() {
        let (db, encounter_id) = setup_db();

        let claim = Claim::new(encounter_id, "ins1".into(), 100_000.0);
        db.insert_claim(&claim).unwrap();

        assert!(db
            .update_claim_status(&claim.id, ClaimStatus::Processing)
            .unwrap());
        let retrieved = db.get_claim(&claim.id).unwrap().unwrap();
        assert_eq!(retrieved.status, ClaimStatus::Processing);

        assert!(!db
            .update_claim_status("CLM-GHOST", ClaimStatus::Approved)
            .unwrap());
    }

    #[test]
    fn test_delete_claim() {
        let (db, encounter_id) = setup_db();

        let claim = Claim::new(encounter_id, "ins1".into(), 100_000.0);
        db.insert_claim(&claim).unwrap();

        assert!(db.delete_claim(&claim.id).unwrap());
        assert!(db.get_claim(&claim.id).unwrap().is_none());
        assert!(!db.delete_claim(&claim.id).unwrap());
    }
}
