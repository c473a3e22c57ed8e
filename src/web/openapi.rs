use axum::Json;
use utoipa::OpenApi;

use crate::errors::ErrorResponse;
use crate::models::{ParticipantRow, UpdateBirthDateRequest};
use crate::web::routes::participants::{self, MessageResponse, UploadExcelForm};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wayv API - Integração de Formulários",
        version = "1.0.0",
        description = "API para upload de participantes via planilha, atualização, listagem e integração com a plataforma Wayv."
    ),
    paths(
        participants::upload_excel_handler,
        participants::list_participants_handler,
        participants::update_birth_date_handler,
        participants::clear_participants_handler
    ),
    components(schemas(
        ParticipantRow,
        UpdateBirthDateRequest,
        MessageResponse,
        ErrorResponse,
        UploadExcelForm
    )),
    tags((name = "Funcionalidades", description = "Upload, listagem, atualização e limpeza de participantes"))
)]
pub struct ApiDoc;

pub async fn openapi_json_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_operation() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert_eq!(doc["info"]["title"], "Wayv API - Integração de Formulários");
        assert_eq!(doc["info"]["version"], "1.0.0");

        let paths = &doc["paths"];
        assert!(paths["/upload-excel"]["post"].is_object());
        assert!(paths["/participants"]["get"].is_object());
        assert!(paths["/participants"]["put"].is_object());
        assert!(paths["/clear"]["delete"].is_object());
        assert_eq!(paths["/clear"]["delete"]["tags"][0], "Funcionalidades");
    }

    #[test]
    fn test_document_carries_schemas() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];
        for name in [
            "ParticipantRow",
            "UpdateBirthDateRequest",
            "MessageResponse",
            "ErrorResponse",
        ] {
            assert!(schemas[name].is_object(), "missing schema {}", name);
        }
    }
}
