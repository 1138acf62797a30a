use serde::{Deserialize, Deserializer, Serialize};
use time::{OffsetDateTime, PrimitiveDateTime};

time::serde::format_description!(
    book_timestamp,
    PrimitiveDateTime,
    "[year]-[month]-[day] [hour]:[minute]:[second]"
);

/// Current UTC time truncated to whole seconds.
pub fn now_timestamp() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    let time = now.time();
    PrimitiveDateTime::new(now.date(), time.replace_nanosecond(0).unwrap_or(time))
}

/// A stored book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Book {
    /// Generated 10-character identifier, immutable
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: i32,
    pub read_page: i32,
    pub reading: bool,
    /// Set to `false` on creation and never recomputed
    pub finished: bool,
    #[serde(with = "book_timestamp")]
    pub inserted_at: PrimitiveDateTime,
    #[serde(with = "book_timestamp")]
    pub updated_at: PrimitiveDateTime,
}

impl Book {
    /// Build a fresh record from validated fields, stamping both timestamps.
    pub fn new(id: String, fields: BookFields, now: PrimitiveDateTime) -> Self {
        Self {
            id,
            name: fields.name,
            year: fields.year,
            author: fields.author,
            summary: fields.summary,
            publisher: fields.publisher,
            page_count: fields.page_count,
            read_page: fields.read_page,
            reading: fields.reading,
            finished: false,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every mutable field; `id`, `inserted_at` and `finished` stay.
    pub fn apply(&mut self, fields: &BookFields, now: PrimitiveDateTime) {
        self.name = fields.name.clone();
        self.year = fields.year;
        self.author = fields.author.clone();
        self.summary = fields.summary.clone();
        self.publisher = fields.publisher.clone();
        self.page_count = fields.page_count;
        self.read_page = fields.read_page;
        self.reading = fields.reading;
        self.updated_at = now;
    }
}

/// Projection returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Request body for create and update, as sent by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_count: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub read_page: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reading: bool,
}

/// An explicit `null` reads the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Which operation a payload is validated for; only the wording differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Add,
    Update,
}

fn failure_prefix(action: &WriteAction) -> &'static str {
    match action {
        WriteAction::Add => "failed to add book",
        WriteAction::Update => "failed to update book",
    }
}

/// Why a payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("{}: please provide the book name", failure_prefix(.0))]
    MissingName(WriteAction),
    #[error("{}: readPage must not be greater than pageCount", failure_prefix(.0))]
    ReadPageExceedsPageCount(WriteAction),
}

/// Caller-writable fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: i32,
    pub read_page: i32,
    pub reading: bool,
}

impl BookPayload {
    /// Check the name first, then the page counts.
    pub fn validate(self, action: WriteAction) -> Result<BookFields, PayloadError> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(PayloadError::MissingName(action)),
        };

        if self.read_page > self.page_count {
            return Err(PayloadError::ReadPageExceedsPageCount(action));
        }

        Ok(BookFields {
            name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count: self.page_count,
            read_page: self.read_page,
            reading: self.reading,
        })
    }
}
