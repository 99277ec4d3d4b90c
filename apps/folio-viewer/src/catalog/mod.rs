//! Document catalog client
//!
//! Retrieves the document list and filters it for display. Never fetches
//! binaries; that is the viewer's job.

mod client;
mod filter;
mod record;

pub use client::*;
pub use filter::*;
pub use record::*;

#[cfg(test)]
pub(crate) fn test_record(id: u64, name: &str, author: &str, category: &str) -> DocumentRecord {
    use chrono::TimeZone;

    DocumentRecord {
        id,
        name: name.to_string(),
        filename: format!("doc-{}.pdf", id),
        size: 1024 * id,
        pages: 10,
        upload_date: chrono::Utc
            .with_ymd_and_hms(2024, 1, (id % 28 + 1) as u32, 12, 0, 0)
            .unwrap(),
        author: author.to_string(),
        category: category.to_string(),
        description: String::new(),
        downloads: 0,
    }
}

#[cfg(test)]
pub(crate) fn test_records() -> Vec<DocumentRecord> {
    vec![
        test_record(1, "Quarterly Report", "Jane Smith", "reports"),
        test_record(2, "Employee Handbook", "HR Department", "policies"),
        test_record(3, "Smithing Basics", "Ann Lee", "guides"),
        test_record(4, "API Reference", "John SMITHSON", "reports"),
        test_record(5, "User Manual", "Bob Jones", "guides"),
    ]
}
