use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::dto::athlete::{AthleteFilter, CreateAthleteRequest, UpdateAthleteRequest};
use crate::dto::category::CreateCategoryRequest;
use crate::dto::common::PaginationParams;
use crate::dto::training_center::CreateTrainingCenterRequest;
use crate::error::{Result, StorageError};
use crate::models::{Athlete, AthleteRecord, Category, TrainingCenter};

use super::{AthleteRepository, CategoryRepository, TrainingCenterRepository};

#[derive(Debug, Default)]
struct Tables {
    categorias: BTreeMap<i32, Category>,
    centros_treinamento: BTreeMap<i32, TrainingCenter>,
    atletas: BTreeMap<i32, Athlete>,
    last_categoria_id: i32,
    last_centro_id: i32,
    last_atleta_id: i32,
}

impl Tables {
    fn resolve(&self, athlete: &Athlete) -> Result<AthleteRecord> {
        let categoria = self
            .categorias
            .get(&athlete.categoria_id)
            .cloned()
            .ok_or(StorageError::ForeignKeyViolation)?;
        let centro_treinamento = self
            .centros_treinamento
            .get(&athlete.centro_treinamento_id)
            .cloned()
            .ok_or(StorageError::ForeignKeyViolation)?;

        Ok(AthleteRecord {
            athlete: athlete.clone(),
            categoria,
            centro_treinamento,
        })
    }
}

/// In-process store with the same constraints as the Postgres schema.
///
/// Every operation holds the table lock for its whole duration, so a
/// uniqueness check and the insert it guards cannot interleave with another
/// writer, and a rejected write changes nothing.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_match(athlete: &Athlete, nome: Option<&str>, cpf: Option<&str>) -> bool {
    let nome_ok = nome.is_none_or(|n| athlete.nome.to_lowercase().contains(n));
    let cpf_ok = cpf.is_none_or(|c| athlete.cpf == c);
    nome_ok && cpf_ok
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn create(&self, req: &CreateCategoryRequest) -> Result<Category> {
        let mut tables = self.tables.write().await;

        if tables.categorias.values().any(|c| c.nome == req.nome) {
            return Err(StorageError::UniqueViolation);
        }

        tables.last_categoria_id += 1;
        let category = Category {
            pk_id: tables.last_categoria_id,
            nome: req.nome.clone(),
        };
        tables.categorias.insert(category.pk_id, category.clone());

        Ok(category)
    }

    async fn list(&self) -> Result<Vec<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categorias.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Category> {
        let tables = self.tables.read().await;
        tables
            .categorias
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl TrainingCenterRepository for MemoryStore {
    async fn create(&self, req: &CreateTrainingCenterRequest) -> Result<TrainingCenter> {
        let mut tables = self.tables.write().await;

        if tables.centros_treinamento.values().any(|c| c.nome == req.nome) {
            return Err(StorageError::UniqueViolation);
        }

        tables.last_centro_id += 1;
        let center = TrainingCenter {
            pk_id: tables.last_centro_id,
            nome: req.nome.clone(),
            endereco: req.endereco.clone(),
            proprietario: req.proprietario.clone(),
        };
        tables.centros_treinamento.insert(center.pk_id, center.clone());

        Ok(center)
    }

    async fn list(&self) -> Result<Vec<TrainingCenter>> {
        let tables = self.tables.read().await;
        Ok(tables.centros_treinamento.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<TrainingCenter> {
        let tables = self.tables.read().await;
        tables
            .centros_treinamento
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl AthleteRepository for MemoryStore {
    async fn create(
        &self,
        req: &CreateAthleteRequest,
        created_at: DateTime<Utc>,
    ) -> Result<AthleteRecord> {
        let mut tables = self.tables.write().await;

        if tables.atletas.values().any(|a| a.cpf == req.cpf) {
            return Err(StorageError::UniqueViolation);
        }

        let mut athlete = Athlete {
            pk_id: 0,
            nome: req.nome.clone(),
            cpf: req.cpf.clone(),
            idade: req.idade,
            peso: req.peso,
            altura: req.altura,
            sexo: req.sexo.clone(),
            created_at,
            categoria_id: req.categoria_id,
            centro_treinamento_id: req.centro_treinamento_id,
        };
        let mut record = tables.resolve(&athlete)?;

        tables.last_atleta_id += 1;
        athlete.pk_id = tables.last_atleta_id;
        record.athlete.pk_id = athlete.pk_id;
        tables.atletas.insert(athlete.pk_id, athlete);

        Ok(record)
    }

    async fn find_by_id(&self, id: i32) -> Result<AthleteRecord> {
        let tables = self.tables.read().await;
        let athlete = tables.atletas.get(&id).ok_or(StorageError::NotFound)?;
        tables.resolve(athlete)
    }

    async fn update(&self, id: i32, req: &UpdateAthleteRequest) -> Result<AthleteRecord> {
        let mut tables = self.tables.write().await;

        let mut athlete = tables
            .atletas
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)?;

        if let Some(nome) = req.nome() {
            athlete.nome = nome.to_string();
        }
        if let Some(idade) = req.idade() {
            athlete.idade = idade;
        }

        let record = tables.resolve(&athlete)?;
        tables.atletas.insert(id, athlete);

        Ok(record)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .atletas
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    async fn list(
        &self,
        filter: &AthleteFilter,
        pagination: PaginationParams,
    ) -> Result<(Vec<AthleteRecord>, i64)> {
        let tables = self.tables.read().await;
        let nome = filter.nome().map(str::to_lowercase);

        let matching: Vec<&Athlete> = tables
            .atletas
            .values()
            .filter(|a| is_match(a, nome.as_deref(), filter.cpf()))
            .collect();
        let total_items = matching.len() as i64;

        let page = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .map(|a| tables.resolve(a))
            .collect::<Result<Vec<_>>>()?;

        Ok((page, total_items))
    }
}
