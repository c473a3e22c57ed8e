//! Turns an uploaded workbook into participant rows.
//!
//! The first worksheet is read; its first used row is the header. Required
//! columns are located by their Portuguese labels, in any order, and every
//! following non-blank row becomes one `NewParticipant`.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::{ServiceError, ServiceResult};
use crate::models::NewParticipant;

pub const COL_FULL_NAME: &str = "Nome completo";
pub const COL_BIRTH_DATE: &str = "Data de Nascimento";
pub const COL_GENDER: &str = "Sexo";
pub const COL_EMAIL: &str = "E-mail";
pub const COL_PHONE: &str = "Celular";

pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_FULL_NAME,
    COL_BIRTH_DATE,
    COL_GENDER,
    COL_EMAIL,
    COL_PHONE,
];

struct ColumnIndices {
    full_name: usize,
    birth_date: usize,
    gender: usize,
    email: usize,
    phone: usize,
}

/// Parses the payload and maps every data row. Fails before returning any row
/// if a required column is missing or a cell holds a spreadsheet error value.
pub fn parse_participants(bytes: Vec<u8>) -> ServiceResult<Vec<NewParticipant>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ServiceError::EmptyWorkbook)??;

    // The range begins at the first used cell, which need not be A1.
    let header_row = range.start().map_or(0, |(row, _)| row as usize);

    let mut rows = range.rows();
    let header = rows.next().unwrap_or(&[]);
    let cols = parse_header(header)?;

    let mut participants = Vec::new();
    for (offset, row) in rows.enumerate() {
        if is_blank_row(row) {
            continue;
        }
        let row_number = sheet_row_number(header_row, offset);
        participants.push(map_row(row, &cols, row_number)?);
    }

    tracing::debug!(rows = participants.len(), "spreadsheet parsed");
    Ok(participants)
}

/// 1-based sheet row of the `offset`-th data row under a header on 0-based row `header_row`.
fn sheet_row_number(header_row: usize, offset: usize) -> usize {
    header_row + offset + 2
}

fn parse_header(header: &[Data]) -> ServiceResult<ColumnIndices> {
    let find = |label: &str| {
        header
            .iter()
            .position(|cell| header_label(cell).as_deref() == Some(label))
    };

    match (
        find(COL_FULL_NAME),
        find(COL_BIRTH_DATE),
        find(COL_GENDER),
        find(COL_EMAIL),
        find(COL_PHONE),
    ) {
        (Some(full_name), Some(birth_date), Some(gender), Some(email), Some(phone)) => {
            Ok(ColumnIndices {
                full_name,
                birth_date,
                gender,
                email,
                phone,
            })
        }
        _ => Err(missing_columns_error()),
    }
}

pub fn missing_columns_error() -> ServiceError {
    ServiceError::Validation(format!(
        "Colunas esperadas: {}",
        REQUIRED_COLUMNS.join(", ")
    ))
}

fn header_label(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => Some(s.trim().to_string()),
        Data::Empty | Data::Error(_) => None,
        other => cell_text(other),
    }
}

fn is_blank_row(row: &[Data]) -> bool {
    row.iter().all(|cell| match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    })
}

fn map_row(row: &[Data], cols: &ColumnIndices, row_number: usize) -> ServiceResult<NewParticipant> {
    let cell = |idx: usize| row.get(idx).unwrap_or(&Data::Empty);
    let text = |idx: usize, label: &str| -> ServiceResult<Option<String>> {
        let c = cell(idx);
        reject_error_cell(c, label, row_number)?;
        Ok(cell_text(c))
    };

    let birth = cell(cols.birth_date);
    reject_error_cell(birth, COL_BIRTH_DATE, row_number)?;

    Ok(NewParticipant {
        full_name: text(cols.full_name, COL_FULL_NAME)?,
        birth_date: normalize_birth_date(birth),
        gender: text(cols.gender, COL_GENDER)?.map(|g| g.to_lowercase()),
        email: text(cols.email, COL_EMAIL)?,
        phone: text(cols.phone, COL_PHONE)?,
    })
}

fn reject_error_cell(cell: &Data, label: &str, row_number: usize) -> ServiceResult<()> {
    if let Data::Error(e) = cell {
        return Err(ServiceError::Validation(format!(
            "Linha {}: valor inválido na coluna '{}' ({})",
            row_number, label, e
        )));
    }
    Ok(())
}

/// Structured dates become `YYYY-MM-DD`; text is trimmed; numbers and booleans
/// keep their textual form; empty cells stay empty.
pub fn normalize_birth_date(cell: &Data) -> Option<String> {
    match cell {
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => Some(iso_date(ndt.date())),
            None => Some(format_number(dt.as_f64())),
        },
        Data::DateTimeIso(s) => Some(
            parse_iso_date(s)
                .map(iso_date)
                .unwrap_or_else(|| s.trim().to_string()),
        ),
        Data::String(s) => Some(s.trim().to_string()),
        other => cell_text(other),
    }
}

fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Textual form of a cell for free-form columns. `None` for empty and error cells.
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(format_number(*f)),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(match dt.as_datetime() {
            Some(ndt) if ndt.time() == chrono::NaiveTime::MIN => iso_date(ndt.date()),
            Some(ndt) => ndt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => format_number(dt.as_f64()),
        }),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

// Phone numbers typed as numbers arrive as floats; 5511999990000.0 must stay digits.
fn format_number(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}
