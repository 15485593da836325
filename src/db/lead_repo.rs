// src/db/lead_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::lead::Lead,
    services::retention::UpsertDecision,
};

const LEAD_COLUMNS: &str = r#"
    id, name, phone, offer_id, branch_name,
    appointment_date, appointment_time, submitted_at, status,
    follow_up_date, follow_up_status, next_follow_up, notes
"#;

// Repositório da tabela 'leads'
#[derive(Clone)]
pub struct LeadRepository {
    pool: PgPool,
}

impl LeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Lead>, AppError> {
        let sql = format!("SELECT {LEAD_COLUMNS} FROM leads ORDER BY submitted_at DESC");
        let leads = sqlx::query_as::<_, Lead>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(leads)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Lead>, AppError> {
        let sql = format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = $1");
        let lead = sqlx::query_as::<_, Lead>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(lead)
    }

    // UPSERT: o WHERE do ON CONFLICT descarta rascunho atrasado e reenvio
    // sobre lead já trabalhado.
    // Nenhuma linha afetada = gravação ignorada.
    pub async fn upsert(&self, lead: &Lead) -> Result<UpsertDecision, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO leads (
                id, name, phone, offer_id, branch_name,
                appointment_date, appointment_time, submitted_at, status,
                follow_up_date, follow_up_status, next_follow_up, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                phone = EXCLUDED.phone,
                offer_id = EXCLUDED.offer_id,
                branch_name = EXCLUDED.branch_name,
                appointment_date = EXCLUDED.appointment_date,
                appointment_time = EXCLUDED.appointment_time,
                submitted_at = EXCLUDED.submitted_at,
                status = EXCLUDED.status,
                follow_up_date = EXCLUDED.follow_up_date,
                follow_up_status = EXCLUDED.follow_up_status,
                next_follow_up = EXCLUDED.next_follow_up,
                notes = EXCLUDED.notes,
                updated_at = NOW()
            WHERE leads.status = 'Abandoned'
               OR (leads.status = 'New' AND EXCLUDED.status = 'New')
            "#,
        )
        .bind(&lead.id)
        .bind(&lead.name)
        .bind(&lead.phone)
        .bind(lead.offer_id)
        .bind(&lead.branch_name)
        .bind(&lead.appointment_date)
        .bind(&lead.appointment_time)
        .bind(lead.submitted_at)
        .bind(lead.status)
        .bind(lead.follow_up_date)
        .bind(lead.follow_up_status)
        .bind(&lead.next_follow_up)
        .bind(&lead.notes)
        .execute(&self.pool)
        .await?;

        Ok(if result.rows_affected() == 0 {
            UpsertDecision::IgnoreStale
        } else {
            UpsertDecision::Store
        })
    }

    pub async fn overwrite(&self, lead: &Lead) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE leads SET
                name = $2,
                phone = $3,
                offer_id = $4,
                branch_name = $5,
                appointment_date = $6,
                appointment_time = $7,
                submitted_at = $8,
                status = $9,
                follow_up_date = $10,
                follow_up_status = $11,
                next_follow_up = $12,
                notes = $13,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(&lead.id)
        .bind(&lead.name)
        .bind(&lead.phone)
        .bind(lead.offer_id)
        .bind(&lead.branch_name)
        .bind(&lead.appointment_date)
        .bind(&lead.appointment_time)
        .bind(lead.submitted_at)
        .bind(lead.status)
        .bind(lead.follow_up_date)
        .bind(lead.follow_up_status)
        .bind(&lead.next_follow_up)
        .bind(&lead.notes)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
