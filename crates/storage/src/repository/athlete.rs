use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Postgres, QueryBuilder};

use crate::dto::athlete::{AthleteFilter, CreateAthleteRequest, UpdateAthleteRequest};
use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError, write_error};
use crate::models::{Athlete, AthleteRecord, Category, TrainingCenter};

use super::postgres::PgStore;

#[async_trait]
pub trait AthleteRepository: Send + Sync {
    /// Insert an athlete. A taken cpf yields `UniqueViolation`, a missing
    /// category or training center yields `ForeignKeyViolation`.
    async fn create(
        &self,
        req: &CreateAthleteRequest,
        created_at: DateTime<Utc>,
    ) -> Result<AthleteRecord>;

    async fn find_by_id(&self, id: i32) -> Result<AthleteRecord>;

    /// Apply the fields present in `req` and leave the rest untouched
    async fn update(&self, id: i32, req: &UpdateAthleteRequest) -> Result<AthleteRecord>;

    async fn delete(&self, id: i32) -> Result<()>;

    /// One page of matching athletes (ordered by id) and the total number of
    /// matches
    async fn list(
        &self,
        filter: &AthleteFilter,
        pagination: PaginationParams,
    ) -> Result<(Vec<AthleteRecord>, i64)>;
}

/// Athlete joined with its category and training center
#[derive(FromRow)]
struct AthleteRow {
    pk_id: i32,
    nome: String,
    cpf: String,
    idade: i32,
    peso: f64,
    altura: f64,
    sexo: String,
    created_at: DateTime<Utc>,
    categoria_id: i32,
    centro_treinamento_id: i32,
    categoria_nome: String,
    centro_nome: String,
    centro_endereco: String,
    centro_proprietario: String,
}

impl From<AthleteRow> for AthleteRecord {
    fn from(row: AthleteRow) -> Self {
        Self {
            athlete: Athlete {
                pk_id: row.pk_id,
                nome: row.nome,
                cpf: row.cpf,
                idade: row.idade,
                peso: row.peso,
                altura: row.altura,
                sexo: row.sexo,
                created_at: row.created_at,
                categoria_id: row.categoria_id,
                centro_treinamento_id: row.centro_treinamento_id,
            },
            categoria: Category {
                pk_id: row.categoria_id,
                nome: row.categoria_nome,
            },
            centro_treinamento: TrainingCenter {
                pk_id: row.centro_treinamento_id,
                nome: row.centro_nome,
                endereco: row.centro_endereco,
                proprietario: row.centro_proprietario,
            },
        }
    }
}

const ATHLETE_COLUMNS: &str = r#"
    a.pk_id, a.nome, a.cpf, a.idade, a.peso, a.altura, a.sexo, a.created_at,
    a.categoria_id, a.centro_treinamento_id,
    c.nome AS categoria_nome,
    ct.nome AS centro_nome,
    ct.endereco AS centro_endereco,
    ct.proprietario AS centro_proprietario
"#;

const ATHLETE_JOINS: &str = r#"
    JOIN categorias c ON c.pk_id = a.categoria_id
    JOIN centros_treinamento ct ON ct.pk_id = a.centro_treinamento_id
"#;

fn select_by_id() -> String {
    format!("SELECT {ATHLETE_COLUMNS} FROM atletas a {ATHLETE_JOINS} WHERE a.pk_id = $1")
}

/// Escapes `ILIKE` wildcards so the filter matches as a literal substring.
fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &AthleteFilter) {
    builder.push(" WHERE 1=1");

    if let Some(nome) = filter.nome() {
        builder.push(" AND a.nome ILIKE ");
        builder.push_bind(like_pattern(nome));
        builder.push(" ESCAPE '\\'");
    }

    if let Some(cpf) = filter.cpf() {
        builder.push(" AND a.cpf = ");
        builder.push_bind(cpf.to_string());
    }
}

#[async_trait]
impl AthleteRepository for PgStore {
    async fn create(
        &self,
        req: &CreateAthleteRequest,
        created_at: DateTime<Utc>,
    ) -> Result<AthleteRecord> {
        let sql = format!(
            r#"
            WITH a AS (
                INSERT INTO atletas (
                    nome, cpf, idade, peso, altura, sexo, created_at,
                    categoria_id, centro_treinamento_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING *
            )
            SELECT {ATHLETE_COLUMNS}
            FROM a {ATHLETE_JOINS}
            "#
        );

        let row = sqlx::query_as::<_, AthleteRow>(&sql)
            .bind(&req.nome)
            .bind(&req.cpf)
            .bind(req.idade)
            .bind(req.peso)
            .bind(req.altura)
            .bind(&req.sexo)
            .bind(created_at)
            .bind(req.categoria_id)
            .bind(req.centro_treinamento_id)
            .fetch_one(&self.pool)
            .await
            .map_err(write_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<AthleteRecord> {
        let row = sqlx::query_as::<_, AthleteRow>(&select_by_id())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(row.into())
    }

    async fn update(&self, id: i32, req: &UpdateAthleteRequest) -> Result<AthleteRecord> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Athlete>(
            r#"
            SELECT pk_id, nome, cpf, idade, peso, altura, sexo, created_at,
                   categoria_id, centro_treinamento_id
            FROM atletas
            WHERE pk_id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        let nome = req.nome().unwrap_or(&existing.nome);
        let idade = req.idade().unwrap_or(existing.idade);

        sqlx::query(
            r#"
            UPDATE atletas
            SET nome = $2,
                idade = $3
            WHERE pk_id = $1
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(idade)
        .execute(&mut *tx)
        .await
        .map_err(write_error)?;

        let row = sqlx::query_as::<_, AthleteRow>(&select_by_id())
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM atletas WHERE pk_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn list(
        &self,
        filter: &AthleteFilter,
        pagination: PaginationParams,
    ) -> Result<(Vec<AthleteRecord>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM atletas a");
        push_filters(&mut count, filter);

        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {ATHLETE_COLUMNS} FROM atletas a {ATHLETE_JOINS}"
        ));
        push_filters(&mut query, filter);
        query.push(" ORDER BY a.pk_id LIMIT ");
        query.push_bind(pagination.limit() as i64);
        query.push(" OFFSET ");
        query.push_bind(pagination.offset() as i64);

        let rows: Vec<AthleteRow> = query.build_query_as().fetch_all(&self.pool).await?;

        Ok((rows.into_iter().map(AthleteRecord::from).collect(), total_items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_value() {
        assert_eq!(like_pattern("João"), "%João%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_a\\b"), "%50\\%\\_a\\\\b%");
    }

    #[test]
    fn test_filters_only_bind_given_values() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM atletas a");
        push_filters(&mut builder, &AthleteFilter::default());
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM atletas a WHERE 1=1");

        let filter = AthleteFilter {
            nome: Some("jo".to_string()),
            cpf: Some("12345678901".to_string()),
        };
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM atletas a");
        push_filters(&mut builder, &filter);
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM atletas a WHERE 1=1 AND a.nome ILIKE $1 ESCAPE '\\' AND a.cpf = $2"
        );
    }
}
