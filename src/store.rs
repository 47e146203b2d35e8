//! SQLite persistence for prescriptions and their medicine lists.
//!
//! Every operation is scoped by the owning user id; a record that exists but
//! belongs to someone else is reported exactly like a record that does not
//! exist. Medicine lists are replaced wholesale inside the parent's write
//! transaction, with serial numbers recomputed from submission order, so a
//! concurrent reader sees either the complete old list or the complete new
//! one.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::Error;
use crate::model::{
    parse_vital, Medicine, MedicineInput, Prescription, PrescriptionDraft, PrescriptionPatch,
    PrescriptionSummary, Status,
};

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (or create) a SQLite database at the given URL and prepare the
    /// schema. Foreign keys are enforced so medicine rows cascade with their
    /// parent.
    pub async fn connect(url: &str) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(sqlx::Error::from)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        let store = Store { pool };
        store.init_schema().await?;
        info!(url, "prescription store ready");
        Ok(store)
    }

    /// In-memory database for tests. A single connection keeps the database
    /// alive for the pool's lifetime.
    pub async fn connect_in_memory() -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(sqlx::Error::from)?
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let store = Store { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS prescriptions (
                id TEXT PRIMARY KEY,
                rx_id TEXT NOT NULL UNIQUE,
                user_id TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'DRAFT',
                patient_name TEXT NOT NULL,
                patient_id TEXT,
                patient_age INTEGER,
                patient_gender TEXT,
                patient_height INTEGER,
                patient_weight INTEGER,
                prescription_date TEXT NOT NULL,
                diagnosis_code TEXT,
                diagnosis TEXT,
                description TEXT,
                additional_comments TEXT,
                drug_allergies TEXT,
                lab_tests TEXT,
                follow_up TEXT,
                doctor_advice TEXT,
                doctor_name TEXT,
                doctor_qualifications TEXT,
                doctor_reg_id TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS medicines (
                id TEXT PRIMARY KEY,
                prescription_id TEXT NOT NULL
                    REFERENCES prescriptions(id) ON DELETE CASCADE,
                serial_no INTEGER NOT NULL,
                name TEXT NOT NULL,
                dosage TEXT NOT NULL DEFAULT '',
                instructions TEXT NOT NULL DEFAULT ''
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_medicines_prescription
             ON medicines(prescription_id, serial_no)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a prescription and its medicine list in one transaction.
    pub async fn create(&self, owner: &str, draft: PrescriptionDraft) -> Result<Prescription, Error> {
        let patient_name = draft
            .patient_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Validation("patient name is required".into()))?
            .to_string();

        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        let rx_id = format!("RX-{}", now.timestamp_millis());
        let status = draft.status.unwrap_or_default();
        let prescription_date = draft.prescription_date.unwrap_or(now);

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO prescriptions (
                id, rx_id, user_id, status, patient_name, patient_id,
                patient_age, patient_gender, patient_height, patient_weight,
                prescription_date, diagnosis_code, diagnosis, description,
                additional_comments, drug_allergies, lab_tests, follow_up,
                doctor_advice, doctor_name, doctor_qualifications,
                doctor_reg_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&rx_id)
        .bind(owner)
        .bind(status.as_str())
        .bind(&patient_name)
        .bind(&draft.patient_id)
        .bind(parse_vital(draft.patient_age.as_deref()))
        .bind(&draft.patient_gender)
        .bind(parse_vital(draft.patient_height.as_deref()))
        .bind(parse_vital(draft.patient_weight.as_deref()))
        .bind(prescription_date.to_rfc3339())
        .bind(&draft.diagnosis_code)
        .bind(&draft.diagnosis)
        .bind(&draft.description)
        .bind(&draft.additional_comments)
        .bind(&draft.drug_allergies)
        .bind(&draft.lab_tests)
        .bind(&draft.follow_up)
        .bind(&draft.doctor_advice)
        .bind(&draft.doctor_name)
        .bind(&draft.doctor_qualifications)
        .bind(&draft.doctor_reg_id)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        insert_medicines(&mut tx, &id, &draft.medicines).await?;
        tx.commit().await?;

        debug!(id, rx_id, "created prescription");
        self.get(owner, &id).await
    }

    /// Fetch one prescription with its medicines in serial order.
    pub async fn get(&self, owner: &str, id: &str) -> Result<Prescription, Error> {
        let row = sqlx::query("SELECT * FROM prescriptions WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(Error::NotFound)?;

        let mut rx = prescription_from_row(&row)?;
        rx.medicines = sqlx::query(
            "SELECT * FROM medicines WHERE prescription_id = ? ORDER BY serial_no ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(medicine_from_row)
        .collect::<Result<_, _>>()?;

        Ok(rx)
    }

    /// List the owner's prescriptions, most recently touched first.
    pub async fn list(&self, owner: &str) -> Result<Vec<PrescriptionSummary>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.rx_id, p.status, p.patient_name, p.prescription_date,
                   p.updated_at, COUNT(m.id) AS medicine_count
            FROM prescriptions p
            LEFT JOIN medicines m ON m.prescription_id = p.id
            WHERE p.user_id = ?
            GROUP BY p.id
            ORDER BY p.updated_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(PrescriptionSummary {
                    id: row.try_get("id")?,
                    rx_id: row.try_get("rx_id")?,
                    status: Status::parse(row.try_get::<String, _>("status")?.as_str()),
                    patient_name: row.try_get("patient_name")?,
                    prescription_date: timestamp(row, "prescription_date")?,
                    updated_at: timestamp(row, "updated_at")?,
                    medicine_count: row.try_get("medicine_count")?,
                })
            })
            .collect()
    }

    /// Apply a partial update. Fields the patch leaves as `None` keep their
    /// stored values; a submitted medicine list replaces the stored one
    /// wholesale, renumbered from 1.
    pub async fn update(
        &self,
        owner: &str,
        id: &str,
        patch: PrescriptionPatch,
    ) -> Result<Prescription, Error> {
        let current = self.get(owner, id).await?;
        let now = Utc::now();

        let status = patch.status.unwrap_or(current.status);
        let patient_name = patch.patient_name.unwrap_or(current.patient_name);
        let patient_id = patch.patient_id.or(current.patient_id);
        let patient_age = patch
            .patient_age
            .as_deref()
            .map(|s| parse_vital(Some(s)))
            .unwrap_or(current.patient_age);
        let patient_gender = patch.patient_gender.or(current.patient_gender);
        let patient_height = patch
            .patient_height
            .as_deref()
            .map(|s| parse_vital(Some(s)))
            .unwrap_or(current.patient_height);
        let patient_weight = patch
            .patient_weight
            .as_deref()
            .map(|s| parse_vital(Some(s)))
            .unwrap_or(current.patient_weight);
        let prescription_date = patch.prescription_date.unwrap_or(current.prescription_date);
        let diagnosis_code = patch.diagnosis_code.or(current.diagnosis_code);
        let diagnosis = patch.diagnosis.or(current.diagnosis);
        let description = patch.description.or(current.description);
        let additional_comments = patch.additional_comments.or(current.additional_comments);
        let drug_allergies = patch.drug_allergies.or(current.drug_allergies);
        let lab_tests = patch.lab_tests.or(current.lab_tests);
        let follow_up = patch.follow_up.or(current.follow_up);
        let doctor_advice = patch.doctor_advice.or(current.doctor_advice);
        let doctor_name = patch.doctor_name.or(current.doctor_name);
        let doctor_qualifications = patch
            .doctor_qualifications
            .or(current.doctor_qualifications);
        let doctor_reg_id = patch.doctor_reg_id.or(current.doctor_reg_id);

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE prescriptions SET
                status = ?, patient_name = ?, patient_id = ?, patient_age = ?,
                patient_gender = ?, patient_height = ?, patient_weight = ?,
                prescription_date = ?, diagnosis_code = ?, diagnosis = ?,
                description = ?, additional_comments = ?, drug_allergies = ?,
                lab_tests = ?, follow_up = ?, doctor_advice = ?,
                doctor_name = ?, doctor_qualifications = ?, doctor_reg_id = ?,
                updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(status.as_str())
        .bind(&patient_name)
        .bind(&patient_id)
        .bind(patient_age)
        .bind(&patient_gender)
        .bind(patient_height)
        .bind(patient_weight)
        .bind(prescription_date.to_rfc3339())
        .bind(&diagnosis_code)
        .bind(&diagnosis)
        .bind(&description)
        .bind(&additional_comments)
        .bind(&drug_allergies)
        .bind(&lab_tests)
        .bind(&follow_up)
        .bind(&doctor_advice)
        .bind(&doctor_name)
        .bind(&doctor_qualifications)
        .bind(&doctor_reg_id)
        .bind(now.to_rfc3339())
        .bind(id)
        .bind(owner)
        .execute(&mut *tx)
        .await?;

        if let Some(medicines) = &patch.medicines {
            sqlx::query("DELETE FROM medicines WHERE prescription_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_medicines(&mut tx, id, medicines).await?;
        }

        tx.commit().await?;

        debug!(id, "updated prescription");
        self.get(owner, id).await
    }

    /// Delete a prescription; medicines cascade. Deleting a record that is
    /// already gone reports `NotFound`.
    pub async fn delete(&self, owner: &str, id: &str) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM prescriptions WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }
        debug!(id, "deleted prescription");
        Ok(())
    }
}

async fn insert_medicines(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    prescription_id: &str,
    medicines: &[MedicineInput],
) -> Result<(), Error> {
    for (i, input) in medicines.iter().enumerate() {
        sqlx::query(
            "INSERT INTO medicines (id, prescription_id, serial_no, name, dosage, instructions)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(prescription_id)
        .bind((i + 1) as i64)
        .bind(&input.name)
        .bind(input.dosage.as_deref().unwrap_or(""))
        .bind(input.instructions.as_deref().unwrap_or(""))
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

fn prescription_from_row(row: &SqliteRow) -> Result<Prescription, Error> {
    Ok(Prescription {
        id: row.try_get("id")?,
        rx_id: row.try_get("rx_id")?,
        user_id: row.try_get("user_id")?,
        status: Status::parse(row.try_get::<String, _>("status")?.as_str()),
        patient_name: row.try_get("patient_name")?,
        patient_id: row.try_get("patient_id")?,
        patient_age: row.try_get("patient_age")?,
        patient_gender: row.try_get("patient_gender")?,
        patient_height: row.try_get("patient_height")?,
        patient_weight: row.try_get("patient_weight")?,
        prescription_date: timestamp(row, "prescription_date")?,
        diagnosis_code: row.try_get("diagnosis_code")?,
        diagnosis: row.try_get("diagnosis")?,
        description: row.try_get("description")?,
        additional_comments: row.try_get("additional_comments")?,
        drug_allergies: row.try_get("drug_allergies")?,
        lab_tests: row.try_get("lab_tests")?,
        follow_up: row.try_get("follow_up")?,
        doctor_advice: row.try_get("doctor_advice")?,
        doctor_name: row.try_get("doctor_name")?,
        doctor_qualifications: row.try_get("doctor_qualifications")?,
        doctor_reg_id: row.try_get("doctor_reg_id")?,
        created_at: timestamp(row, "created_at")?,
        updated_at: timestamp(row, "updated_at")?,
        medicines: vec![],
    })
}

fn medicine_from_row(row: &SqliteRow) -> Result<Medicine, Error> {
    Ok(Medicine {
        id: row.try_get("id")?,
        prescription_id: row.try_get("prescription_id")?,
        serial_no: row.try_get("serial_no")?,
        name: row.try_get("name")?,
        dosage: row.try_get("dosage")?,
        instructions: row.try_get("instructions")?,
    })
}

fn timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, Error> {
    let raw: String = row.try_get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            Error::Store(sqlx::Error::ColumnDecode {
                index: column.to_string(),
                source: Box::new(e),
            })
        })
}
