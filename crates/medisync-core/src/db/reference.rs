//! Reference-data operations: hospitals, doctors, insurers, pharmacy stock.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Doctor, Hospital, InsuranceProvider, Medicine};

impl Database {
    // -------------------------------------------------------------------
    // Hospitals
    // -------------------------------------------------------------------

    /// Add or update a hospital.
    pub fn upsert_hospital(&self, hospital: &Hospital) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO hospitals (id, name, code, location)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                code = excluded.code,
                location = excluded.location
            "#,
            params![hospital.id, hospital.name, hospital.code, hospital.location],
        )?;
        Ok(())
    }

    /// Get a hospital by ID.
    pub fn get_hospital(&self, id: &str) -> DbResult<Option<Hospital>> {
        self.conn
            .query_row(
                "SELECT id, name, code, location FROM hospitals WHERE id = ?",
                [id],
                |row| {
                    Ok(Hospital {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        code: row.get(2)?,
                        location: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all hospitals in the network.
    pub fn list_hospitals(&self) -> DbResult<Vec<Hospital>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, code, location FROM hospitals ORDER BY name")?;

        let rows = stmt.query_map([], |row| {
            Ok(Hospital {
                id: row.get(0)?,
                name: row.get(1)?,
                code: row.get(2)?,
                location: row.get(3)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // -------------------------------------------------------------------
    // Doctors
    // -------------------------------------------------------------------

    /// Add or update a doctor.
    pub fn upsert_doctor(&self, doctor: &Doctor) -> DbResult<()> {
        let hospital_ids_json = serde_json::to_string(&doctor.hospital_ids)?;
        self.conn.execute(
            r#"
            INSERT INTO doctors (id, name, specialty, hospital_ids)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                specialty = excluded.specialty,
                hospital_ids = excluded.hospital_ids
            "#,
            params![doctor.id, doctor.name, doctor.specialty, hospital_ids_json],
        )?;
        Ok(())
    }

    /// Get a doctor by ID.
    pub fn get_doctor(&self, id: &str) -> DbResult<Option<Doctor>> {
        self.conn
            .query_row(
                "SELECT id, name, specialty, hospital_ids FROM doctors WHERE id = ?",
                [id],
                |row| {
                    Ok(DoctorRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        specialty: row.get(2)?,
                        hospital_ids: row.get(3)?,
                    })
                },
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List all doctors.
    pub fn list_doctors(&self) -> DbResult<Vec<Doctor>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, specialty, hospital_ids FROM doctors ORDER BY name")?;

        let rows = stmt.query_map([], |row| {
            Ok(DoctorRow {
                id: row.get(0)?,
                name: row.get(1)?,
                specialty: row.get(2)?,
                hospital_ids: row.get(3)?,
            })
        })?;

        let mut doctors = Vec::new();
        for row in rows {
            doctors.push(row?.try_into()?);
        }
        Ok(doctors)
    }

    /// List doctors practicing at a facility.
    pub fn list_doctors_for_hospital(&self, hospital_id: &str) -> DbResult<Vec<Doctor>> {
        // hospital_ids is a JSON column, so membership is filtered in Rust
        let doctors = self.list_doctors()?;
        Ok(doctors
            .into_iter()
            .filter(|d| d.practices_at(hospital_id))
            .collect())
    }

    // -------------------------------------------------------------------
    // Insurance providers
    // -------------------------------------------------------------------

    /// Add or update an insurance provider.
    pub fn upsert_insurer(&self, provider: &InsuranceProvider) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO insurance_providers (id, name, code)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                code = excluded.code
            "#,
            params![provider.id, provider.name, provider.code],
        )?;
        Ok(())
    }

    /// Get an insurance provider by ID.
    pub fn get_insurer(&self, id: &str) -> DbResult<Option<InsuranceProvider>> {
        self.conn
            .query_row(
                "SELECT id, name, code FROM insurance_providers WHERE id = ?",
                [id],
                |row| {
                    Ok(InsuranceProvider {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        code: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all insurance providers.
    pub fn list_insurers(&self) -> DbResult<Vec<InsuranceProvider>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, code FROM insurance_providers ORDER BY name")?;

        let rows = stmt.query_map([], |row| {
            Ok(InsuranceProvider {
                id: row.get(0)?,
                name: row.get(1)?,
                code: row.get(2)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // -------------------------------------------------------------------
    // Pharmacy stock
    // -------------------------------------------------------------------

    /// Add or update a medicine.
    pub fn upsert_medicine(&self, medicine: &Medicine) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO medicines (id, name, stock, unit, price)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                stock = excluded.stock,
                unit = excluded.unit,
                price = excluded.price
            "#,
            params![
                medicine.id,
                medicine.name,
                medicine.stock,
                medicine.unit,
                medicine.price
            ],
        )?;
        Ok(())
    }

    /// List all medicines.
    pub fn list_medicines(&self) -> DbResult<Vec<Medicine>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, stock, unit, price FROM medicines ORDER BY name")?;

        let rows = stmt.query_map([], |row| {
            Ok(Medicine {
                id: row.get(0)?,
                name: row.get(1)?,
                stock: row.get(2)?,
                unit: row.get(3)?,
                price: row.get(4)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List medicines whose stock has fallen below the threshold.
    pub fn list_low_stock_medicines(&self, threshold: i64) -> DbResult<Vec<Medicine>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, stock, unit, price FROM medicines WHERE stock < ? ORDER BY stock",
        )?;

        let rows = stmt.query_map([threshold], |row| {
            Ok(Medicine {
                id: row.get(0)?,
                name: row.get(1)?,
                stock: row.get(2)?,
                unit: row.get(3)?,
                price: row.get(4)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

/// Intermediate row struct for database mapping.
struct DoctorRow {
    id: String,
    name: String,
    specialty: String,
    hospital_ids: String,
}

impl TryFrom<DoctorRow> for Doctor {
    type Error = DbError;

    fn try_from(row: DoctorRow) -> Result<Self, Self::Error> {
        let hospital_ids: Vec<String> = serde_json::from_str(&row.hospital_ids)?;
        Ok(Doctor {
            id: row.id,
            name: row.name,
            specialty: row.specialty,
            hospital_ids,
        })
    }
}
