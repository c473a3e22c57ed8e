use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow, ToSchema)]
pub struct ParticipantRow {
    pub id: i64,
    pub full_name: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A participant mapped from one spreadsheet row, before storage assigns an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewParticipant {
    pub full_name: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Column used to locate the records a birth-date update applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Email,
    FullName,
    Phone,
}

impl MatchField {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchField::Email => "email",
            MatchField::FullName => "full_name",
            MatchField::Phone => "phone",
        }
    }
}

impl fmt::Display for MatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMatchField(pub String);

impl FromStr for MatchField {
    type Err = UnknownMatchField;

    // Exact literals only; "Email" or " email" are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(MatchField::Email),
            "full_name" => Ok(MatchField::FullName),
            "phone" => Ok(MatchField::Phone),
            other => Err(UnknownMatchField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateBirthDateRequest {
    /// Identificador do participante (email, nome completo ou telefone)
    #[schema(example = "ana@x.com")]
    pub identifier: String,
    /// Nova data de nascimento no formato YYYY-MM-DD
    #[schema(example = "1990-05-21")]
    pub new_date: String,
    /// Campo usado como chave para atualização
    // Parsed into MatchField by the service so an unknown value is a 400, not a 422.
    #[schema(example = "email", pattern = "^(email|full_name|phone)$")]
    pub by: String,
}
