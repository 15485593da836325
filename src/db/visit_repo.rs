// src/db/visit_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::visit::Visit};

#[derive(Clone)]
pub struct VisitRepository {
    pool: PgPool,
}

impl VisitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn append(&self, visit: &Visit) -> Result<(), AppError> {
        sqlx::query("INSERT INTO visits (visited_at, source, location) VALUES ($1, $2, $3)")
            .bind(visit.timestamp)
            .bind(&visit.source)
            .bind(&visit.location)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Visit>, AppError> {
        let visits = sqlx::query_as::<_, Visit>(
            "SELECT visited_at, source, location FROM visits ORDER BY visited_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(visits)
    }
}
