pub mod participants_service;
pub mod spreadsheet_service;
