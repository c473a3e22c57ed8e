use sqlx::SqlitePool;

use crate::database::participants_repo;
use crate::errors::{ServiceError, ServiceResult};
use crate::models::{MatchField, ParticipantRow, UpdateBirthDateRequest};
use crate::services::spreadsheet_service;

pub const MSG_INVALID_MATCH_FIELD: &str = "Campo 'by' inválido";
pub const MSG_PARTICIPANT_NOT_FOUND: &str = "Participante não encontrado";

/// Parses the workbook and appends one participant per data row. Returns the number inserted.
pub async fn ingest_spreadsheet(pool: &SqlitePool, bytes: Vec<u8>) -> ServiceResult<u64> {
    let size = bytes.len();
    let participants = spreadsheet_service::parse_participants(bytes)?;
    let inserted = participants_repo::insert_participants(pool, &participants).await?;
    tracing::info!(bytes = size, inserted, "participants_ingested");
    Ok(inserted)
}

pub async fn list_participants(
    pool: &SqlitePool,
    gender: Option<&str>,
) -> ServiceResult<Vec<ParticipantRow>> {
    let gender = gender.filter(|g| !g.is_empty()).map(|g| g.to_lowercase());
    let rows = participants_repo::list_participants(pool, gender.as_deref()).await?;
    Ok(rows)
}

pub async fn update_birth_date(
    pool: &SqlitePool,
    request: &UpdateBirthDateRequest,
) -> ServiceResult<u64> {
    let by: MatchField = request
        .by
        .parse()
        .map_err(|_| ServiceError::Validation(MSG_INVALID_MATCH_FIELD.to_string()))?;

    let updated =
        participants_repo::update_birth_date(pool, by, &request.identifier, &request.new_date)
            .await?;
    if updated == 0 {
        return Err(ServiceError::NotFound(MSG_PARTICIPANT_NOT_FOUND.to_string()));
    }

    tracing::info!(by = %by, updated, "birth_date_updated");
    Ok(updated)
}

pub async fn clear_participants(pool: &SqlitePool) -> ServiceResult<u64> {
    let deleted = participants_repo::delete_all_participants(pool).await?;
    tracing::info!(deleted, "participants_cleared");
    Ok(deleted)
}
