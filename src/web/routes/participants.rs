use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::errors::{ErrorResponse, ServiceError, ServiceResult};
use crate::models::{ParticipantRow, UpdateBirthDateRequest};
use crate::services::participants_service;

pub const UPLOAD_FIELD: &str = "file";

pub const MSG_UPLOADED: &str = "Dados registrados com sucesso";
pub const MSG_BIRTH_DATE_UPDATED: &str = "Data de nascimento atualizada";
pub const MSG_CLEARED: &str = "Registros removido com sucesso";

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(value_type = String, example = "Dados registrados com sucesso")]
    pub message: &'static str,
}

/// Multipart body of `POST /upload-excel`; only documents the shape.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct UploadExcelForm {
    /// Planilha .xlsx com as colunas Nome completo, Data de Nascimento, Sexo, E-mail e Celular
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[derive(Debug, Deserialize)]
pub struct ParticipantsQuery {
    pub gender: Option<String>,
}

/// Enviar planilha Excel
///
/// Realiza o upload de um arquivo .xlsx com os campos: Nome completo, Data de Nascimento, Sexo, E-mail e Celular.
#[utoipa::path(
    post,
    path = "/upload-excel",
    tag = "Funcionalidades",
    request_body(content = UploadExcelForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Planilha importada", body = MessageResponse),
        (status = 400, description = "Colunas obrigatórias ausentes", body = ErrorResponse),
        (status = 422, description = "Campo 'file' ausente", body = ErrorResponse)
    )
)]
pub async fn upload_excel_handler(
    State(pool): State<SqlitePool>,
    mut multipart: Multipart,
) -> ServiceResult<Json<MessageResponse>> {
    let mut payload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(UPLOAD_FIELD) {
            tracing::info!(file_name = ?field.file_name(), "upload_excel: received file");
            payload = Some(field.bytes().await?.to_vec());
            break;
        }
    }

    let bytes = payload.ok_or(ServiceError::MissingUpload)?;
    participants_service::ingest_spreadsheet(&pool, bytes).await?;
    Ok(Json(MessageResponse {
        message: MSG_UPLOADED,
    }))
}

/// Listar Participantes Cadastrados
///
/// Retorna todos os participantes cadastrados. Pode-se aplicar filtro por sexo (masculino, feminino, outros).
#[utoipa::path(
    get,
    path = "/participants",
    tag = "Funcionalidades",
    params(
        ("gender" = Option<String>, Query, description = "Filtro por sexo, sem diferenciar maiúsculas")
    ),
    responses(
        (status = 200, description = "Participantes em ordem de cadastro", body = [ParticipantRow])
    )
)]
pub async fn list_participants_handler(
    State(pool): State<SqlitePool>,
    Query(query): Query<ParticipantsQuery>,
) -> ServiceResult<Json<Vec<ParticipantRow>>> {
    let rows = participants_service::list_participants(&pool, query.gender.as_deref()).await?;
    Ok(Json(rows))
}

/// Alterar Data de Nascimento
///
/// Atualiza a data de nascimento de um participante existente com base em email, full_name ou phone.
#[utoipa::path(
    put,
    path = "/participants",
    tag = "Funcionalidades",
    request_body = UpdateBirthDateRequest,
    responses(
        (status = 200, description = "Data atualizada", body = MessageResponse),
        (status = 400, description = "Campo 'by' inválido", body = ErrorResponse),
        (status = 404, description = "Participante não encontrado", body = ErrorResponse)
    )
)]
pub async fn update_birth_date_handler(
    State(pool): State<SqlitePool>,
    Json(body): Json<UpdateBirthDateRequest>,
) -> ServiceResult<Json<MessageResponse>> {
    participants_service::update_birth_date(&pool, &body).await?;
    Ok(Json(MessageResponse {
        message: MSG_BIRTH_DATE_UPDATED,
    }))
}

/// Limpar Banco de Dados
///
/// Remove todos os dados da base de dados.
#[utoipa::path(
    delete,
    path = "/clear",
    tag = "Funcionalidades",
    responses(
        (status = 200, description = "Registros removidos", body = MessageResponse)
    )
)]
pub async fn clear_participants_handler(
    State(pool): State<SqlitePool>,
) -> ServiceResult<Json<MessageResponse>> {
    participants_service::clear_participants(&pool).await?;
    Ok(Json(MessageResponse {
        message: MSG_CLEARED,
    }))
}
