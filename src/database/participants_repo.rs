use sqlx::SqlitePool;

use crate::models::{MatchField, NewParticipant, ParticipantRow};

const SQL_LIST_PARTICIPANTS: &str = r#"
SELECT
    id,
    full_name,
    birth_date,
    gender,
    email,
    phone
FROM participants
ORDER BY id ASC
"#;

const SQL_LIST_PARTICIPANTS_BY_GENDER: &str = r#"
SELECT
    id,
    full_name,
    birth_date,
    gender,
    email,
    phone
FROM participants
WHERE gender = ?1
ORDER BY id ASC
"#;

const SQL_INSERT_PARTICIPANT: &str = r#"
INSERT INTO participants (
    full_name,
    birth_date,
    gender,
    email,
    phone
) VALUES (?1, ?2, ?3, ?4, ?5)
"#;

const SQL_UPDATE_BIRTH_DATE_BY_EMAIL: &str =
    "UPDATE participants SET birth_date = ?1 WHERE email = ?2";
const SQL_UPDATE_BIRTH_DATE_BY_FULL_NAME: &str =
    "UPDATE participants SET birth_date = ?1 WHERE full_name = ?2";
const SQL_UPDATE_BIRTH_DATE_BY_PHONE: &str =
    "UPDATE participants SET birth_date = ?1 WHERE phone = ?2";

const SQL_DELETE_ALL_PARTICIPANTS: &str = "DELETE FROM participants";

fn update_birth_date_sql(by: MatchField) -> &'static str {
    match by {
        MatchField::Email => SQL_UPDATE_BIRTH_DATE_BY_EMAIL,
        MatchField::FullName => SQL_UPDATE_BIRTH_DATE_BY_FULL_NAME,
        MatchField::Phone => SQL_UPDATE_BIRTH_DATE_BY_PHONE,
    }
}

/// `gender` is compared as-is; callers lower-case it first.
pub async fn list_participants(
    pool: &SqlitePool,
    gender: Option<&str>,
) -> sqlx::Result<Vec<ParticipantRow>> {
    match gender {
        Some(gender) => {
            sqlx::query_as::<_, ParticipantRow>(SQL_LIST_PARTICIPANTS_BY_GENDER)
                .bind(gender)
                .fetch_all(pool)
                .await
        }
        None => {
            sqlx::query_as::<_, ParticipantRow>(SQL_LIST_PARTICIPANTS)
                .fetch_all(pool)
                .await
        }
    }
}

/// Inserts all rows in one transaction; nothing is kept if any insert fails.
pub async fn insert_participants(
    pool: &SqlitePool,
    participants: &[NewParticipant],
) -> sqlx::Result<u64> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;
    for p in participants {
        let res = sqlx::query(SQL_INSERT_PARTICIPANT)
            .bind(p.full_name.as_deref())
            .bind(p.birth_date.as_deref())
            .bind(p.gender.as_deref())
            .bind(p.email.as_deref())
            .bind(p.phone.as_deref())
            .execute(&mut *tx)
            .await?;
        inserted += res.rows_affected();
    }
    tx.commit().await?;
    Ok(inserted)
}

pub async fn update_birth_date(
    pool: &SqlitePool,
    by: MatchField,
    identifier: &str,
    new_date: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(update_birth_date_sql(by))
        .bind(new_date)
        .bind(identifier)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn delete_all_participants(pool: &SqlitePool) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_ALL_PARTICIPANTS).execute(pool).await?;
    Ok(res.rows_affected())
}
