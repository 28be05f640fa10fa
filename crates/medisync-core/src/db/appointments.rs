//! Appointment database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Appointment, AppointmentStatus};

impl Database {
    /// Insert a new appointment.
    pub fn insert_appointment(&self, appointment: &Appointment) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO appointments (
                id, patient_name, hospital_id, department, doctor, date, time_slot, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                appointment.id,
                appointment.patient_name,
                appointment.hospital_id,
                appointment.department,
                appointment.doctor,
                appointment.date,
                appointment.time_slot,
                appointment.status.as_str(),
            ],
        )?;
        Ok(())
    }

    /// Get an appointment by ID.
    pub fn get_appointment(&self, id: &str) -> DbResult<Option<Appointment>> {
        self.conn
            .query_row(
                r#"
                SELECT id, patient_name, hospital_id, department, doctor, date, time_slot, status
                FROM appointments
                WHERE id = ?
                "#,
                [id],
                appointment_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List all appointments, most recent booking first.
    pub fn list_appointments(&self) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, patient_name, hospital_id, department, doctor, date, time_slot, status
            FROM appointments
            ORDER BY date DESC, time_slot DESC, id
            "#,
        )?;

        let rows = stmt.query_map([], appointment_row)?;

        let mut appointments = Vec::new();
        for row in rows {
            appointments.push(row?.try_into()?);
        }
        Ok(appointments)
    }

    /// Slots already held for a hospital/doctor/date (cancellations excluded).
    pub fn booked_slots(&self, hospital_id: &str, doctor: &str, date: &str) -> DbResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT time_slot
            FROM appointments
            WHERE hospital_id = ? AND doctor = ? AND date = ? AND status != 'Cancelled'
            ORDER BY time_slot
            "#,
        )?;

        let rows = stmt.query_map(params![hospital_id, doctor, date], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Overwrite an appointment's status. Returns false when no row matched.
    pub fn update_appointment_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE appointments SET status = ? WHERE id = ?",
            params![status.as_str(), id],
        )?;
        Ok(rows_affected > 0)
    }
}

/// Intermediate row struct for database mapping.
struct AppointmentRow {
    id: String,
    patient_name: String,
    hospital_id: String,
    department: String,
    doctor: String,
    date: String,
    time_slot: String,
    status: String,
}

fn appointment_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AppointmentRow> {
    Ok(AppointmentRow {
        id: row.get(0)?,
        patient_name: row.get(1)?,
        hospital_id: row.get(2)?,
        department: row.get(3)?,
        doctor: row.get(4)?,
        date: row.get(5)?,
        time_slot: row.get(6)?,
        status: row.get(7)?,
    })
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DbError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        let status = AppointmentStatus::parse(&row.status).ok_or_else(|| {
            DbError::Constraint(format!("Unknown appointment status: {}", row.status))
        })?;

        Ok(Appointment {
            id: row.id,
            patient_name: row.patient_name,
            hospital_id: row.hospital_id,
            department: row.department,
            doctor: row.doctor,
            date: row.date,
            time_slot: row.time_slot,
            status,
        })
    }
}
