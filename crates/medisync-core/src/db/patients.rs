//! Patient database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Gender, Patient};

impl Database {
    /// Insert a new patient.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO patients (
                id, mrn, name, dob, gender, address, phone, nik, bpjs, email, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                patient.id,
                patient.mrn,
                patient.name,
                patient.dob,
                patient.gender.as_str(),
                patient.address,
                patient.phone,
                patient.nik,
                patient.bpjs,
                patient.email,
                patient.created_at,
            ],
        )?;
        Ok(())
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                r#"
                SELECT id, mrn, name, dob, gender, address, phone, nik, bpjs, email, created_at
                FROM patients
                WHERE id = ?
                "#,
                [id],
                patient_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Get a patient by medical record number.
    pub fn get_patient_by_mrn(&self, mrn: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                r#"
                SELECT id, mrn, name, dob, gender, address, phone, nik, bpjs, email, created_at
                FROM patients
                WHERE mrn = ?
                "#,
                [mrn],
                patient_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Check whether an MRN is already taken.
    pub fn mrn_exists(&self, mrn: &str) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM patients WHERE mrn = ?",
            [mrn],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Search patients by substring over name, MRN or national id.
    pub fn search_patients(&self, query: &str) -> DbResult<Vec<Patient>> {
        let pattern = format!("%{}%", query);
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, mrn, name, dob, gender, address, phone, nik, bpjs, email, created_at
            FROM patients
            WHERE name LIKE ?1 OR mrn LIKE ?1 OR nik LIKE ?1
            ORDER BY name
            "#,
        )?;

        let rows = stmt.query_map([pattern], patient_row)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }

    /// List all patients.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, mrn, name, dob, gender, address, phone, nik, bpjs, email, created_at
            FROM patients
            ORDER BY name
            "#,
        )?;

        let rows = stmt.query_map([], patient_row)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }
}

/// Intermediate row struct for database mapping.
struct PatientRow {
    id: String,
    mrn: String,
    name: String,
    dob: String,
    gender: String,
    address: String,
    phone: String,
    nik: String,
    bpjs: Option<String>,
    email: Option<String>,
    created_at: String,
}

fn patient_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok(PatientRow {
        id: row.get(0)?,
        mrn: row.get(1)?,
        name: row.get(2)?,
        dob: row.get(3)?,
        gender: row.get(4)?,
        address: row.get(5)?,
        phone: row.get(6)?,
        nik: row.get(7)?,
        bpjs: row.get(8)?,
        email: row.get(9)?,
        created_at: row.get(10)?,
    })
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let gender = Gender::parse(&row.gender)
            .ok_or_else(|| DbError::Constraint(format!("Unknown gender: {}", row.gender)))?;

        Ok(Patient {
            id: row.id,
            mrn: row.mrn,
            name: row.name,
            dob: row.dob,
            gender,
            address: row.address,
            phone: row.phone,
            nik: row.nik,
            bpjs: row.bpjs,
            email: row.email,
            created_at: row.created_at,
        })
    }
}
