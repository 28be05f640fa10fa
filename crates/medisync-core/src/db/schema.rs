//! SQLite schema definition.

/// Complete database schema for the MedisSync store.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Hospital Network Reference Data
-- ============================================================================

CREATE TABLE IF NOT EXISTS hospitals (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    code TEXT NOT NULL UNIQUE,
    location TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS doctors (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    specialty TEXT NOT NULL,
    hospital_ids TEXT NOT NULL DEFAULT '[]'       -- JSON array of hospital ids
);

CREATE TABLE IF NOT EXISTS insurance_providers (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    code TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS medicines (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    stock INTEGER NOT NULL DEFAULT 0,
    unit TEXT NOT NULL DEFAULT '',
    price REAL NOT NULL DEFAULT 0
);

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id TEXT PRIMARY KEY,
    mrn TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    dob TEXT NOT NULL,
    gender TEXT NOT NULL CHECK (gender IN ('M', 'F')),
    address TEXT NOT NULL DEFAULT '',
    phone TEXT NOT NULL DEFAULT '',
    nik TEXT NOT NULL DEFAULT '',
    bpjs TEXT,
    email TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);
CREATE INDEX IF NOT EXISTS idx_patients_nik ON patients(nik);

-- ============================================================================
-- Encounters (the central workflow collection)
-- ============================================================================

CREATE TABLE IF NOT EXISTS encounters (
    id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL REFERENCES patients(id),
    hospital_id TEXT NOT NULL REFERENCES hospitals(id),
    encounter_type TEXT NOT NULL,                 -- Outpatient, ER, Inpatient
    department TEXT NOT NULL,
    doctor TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'waiting',       -- waiting, triaged, doctor, pharmacy, billing, finished
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    soap TEXT,                                    -- JSON object {subjective, objective, assessment, plan}
    billing_status TEXT NOT NULL DEFAULT 'unpaid',-- unpaid, paid, pending
    total_charge REAL CHECK (total_charge IS NULL OR total_charge >= 0)
);

CREATE INDEX IF NOT EXISTS idx_encounters_hospital ON encounters(hospital_id);
CREATE INDEX IF NOT EXISTS idx_encounters_status ON encounters(status);
CREATE INDEX IF NOT EXISTS idx_encounters_patient ON encounters(patient_id);

-- ============================================================================
-- Claims
-- ============================================================================

CREATE TABLE IF NOT EXISTS claims (
    id TEXT PRIMARY KEY,
    encounter_id TEXT NOT NULL REFERENCES encounters(id),
    provider_id TEXT NOT NULL REFERENCES insurance_providers(id),
    status TEXT NOT NULL DEFAULT 'Submitted',     -- Draft, Submitted, Processing, Approved, Rejected, Incomplete
    amount REAL NOT NULL DEFAULT 0 CHECK (amount >= 0),
    submitted_at TEXT NOT NULL DEFAULT (datetime('now')),
    notes TEXT
);

CREATE INDEX IF NOT EXISTS idx_claims_encounter ON claims(encounter_id);
CREATE INDEX IF NOT EXISTS idx_claims_status ON claims(status);

-- ============================================================================
-- Appointments (independent booking ledger)
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id TEXT PRIMARY KEY,
    patient_name TEXT NOT NULL,                   -- free text, deliberately not a patient reference
    hospital_id TEXT NOT NULL REFERENCES hospitals(id),
    department TEXT NOT NULL,
    doctor TEXT NOT NULL,
    date TEXT NOT NULL,
    time_slot TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'Confirmed'      -- Confirmed, Cancelled, Arrived
);

CREATE INDEX IF NOT EXISTS idx_appointments_schedule ON appointments(hospital_id, doctor, date);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_encounter_requires_patient() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        // Encounter referencing a missing patient should fail
        let result = conn.execute(
            "INSERT INTO encounters (id, patient_id, hospital_id, encounter_type, department, doctor)
             VALUES ('e1', 'ghost', 'h1', 'Outpatient', 'General Medicine', 'Dr. X')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_charge_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO hospitals (id, name, code, location) VALUES ('h1', 'RS Medika Malang', 'MLG', 'Malang')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO patients (id, mrn, name, dob, gender) VALUES ('p1', 'MRN-0001', 'Budi', '1985-05-12', 'M')",
            [],
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO encounters (id, patient_id, hospital_id, encounter_type, department, doctor, total_charge)
             VALUES ('e1', 'p1', 'h1', 'Outpatient', 'General Medicine', 'Dr. X', -50)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_mrn_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO patients (id, mrn, name, dob, gender) VALUES ('p1', 'MRN-0001', 'Budi', '1985-05-12', 'M')",
            [],
        )
        .unwrap();
        let result = conn.execute(
            "INSERT INTO patients (id, mrn, name, dob, gender) VALUES ('p2', 'MRN-0001', 'Siti', '1992-08-21', 'F')",
            [],
        );
        assert!(result.is_err());
    }
}
