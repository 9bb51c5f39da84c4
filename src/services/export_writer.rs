use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::{
    domain::{NewsArticle, ARTICLE_HEADER},
    error::{ExportError, ScoutError},
};

pub const SHEET_NAME: &str = "Articles";

/// Writes one sheet with the fixed header and a row per article, replacing any
/// existing file at `destination`.
pub fn write_articles(articles: &[NewsArticle], destination: &Path) -> Result<(), ScoutError> {
    build_and_save(articles, destination).map_err(|source| ScoutError::ExportWrite {
        path: destination.to_path_buf(),
        source,
    })
}

fn build_and_save(articles: &[NewsArticle], destination: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, title) in ARTICLE_HEADER.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    for (idx, article) in articles.iter().enumerate() {
        let row = idx as u32 + 1;
        let (title, date, description, profile_picture, count, contains_money) = article.to_row();

        sheet.write_string(row, 0, title)?;
        sheet.write_string(row, 1, date)?;
        sheet.write_string(row, 2, description)?;
        sheet.write_string(row, 3, profile_picture)?;
        sheet.write_number(row, 4, count as f64)?;
        sheet.write_boolean(row, 5, contains_money)?;
    }

    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)?;
    }
    workbook.save(destination)?;

    Ok(())
}
