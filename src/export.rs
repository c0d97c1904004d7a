// Spreadsheet export of cached posts.
// Reads from the record store only; never triggers a remote fetch.

use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::error::Result;
use crate::store::{Post, RecordStore};

pub const SHEET_NAME: &str = "Posts";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// An encoded workbook ready for download.
#[derive(Debug, Clone)]
pub struct Export {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Export every cached post for `user_id` as a single-sheet workbook.
///
/// The header row is always written, so a key with no cached posts yields a
/// valid workbook with zero data rows.
pub fn export_posts(store: &RecordStore, user_id: u64) -> Result<Export> {
    let posts = store.query_by_key::<Post>(user_id)?;
    let bytes = encode_posts(&posts)?;

    info!(user_id, rows = posts.len(), "exported posts");

    Ok(Export {
        file_name: format!("posts_{}.xlsx", user_id),
        content_type: XLSX_CONTENT_TYPE,
        bytes,
    })
}

/// Encode posts as xlsx bytes, one row per post after the header.
pub fn encode_posts(posts: &[Post]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in (0u16..).zip(Post::COLUMNS) {
        sheet.write_string(0, col, header)?;
    }

    for (row, post) in (1u32..).zip(posts) {
        sheet.write_number(row, 0, post.user_id as f64)?;
        sheet.write_string(row, 1, post.title.as_str())?;
        sheet.write_string(row, 2, post.body.as_str())?;
        if let Some(company) = &post.company {
            sheet.write_string(row, 3, company.as_str())?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
