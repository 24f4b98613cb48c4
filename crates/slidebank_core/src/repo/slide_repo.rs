//! Slide backend contract shared by all persistence adapters.
//!
//! # Responsibility
//! - Define the capability set the store facade depends on.
//! - Keep adapter-specific details out of facade and caller code.
//!
//! # Invariants
//! - Write paths must call `validate()` before persisting a slide.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Every adapter orders listings by `created_at DESC, id ASC`.

use crate::db::DbError;
use crate::model::slide::{Slide, SlideId, SlideValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for slide persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(SlideValidationError),
    Db(DbError),
    DuplicateId(SlideId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "slide id already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted slide data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateId(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<SlideValidationError> for RepoError {
    fn from(value: SlideValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Window options for ordered listings.
#[derive(Debug, Clone, Default)]
pub struct SlideListQuery {
    /// Maximum number of slides to return; `None` returns the full set.
    pub limit: Option<u32>,
    /// Number of leading slides to skip.
    pub offset: u64,
}

impl SlideListQuery {
    /// Query covering every stored slide, in order.
    pub fn all() -> Self {
        Self::default()
    }

    /// Query for one pagination window.
    pub fn window(offset: u64, limit: u32) -> Self {
        Self {
            limit: Some(limit),
            offset,
        }
    }
}

/// Capability contract every persistence adapter implements.
///
/// The store facade is written against this trait only; swapping the
/// concrete adapter must never change facade or caller code.
pub trait SlideBackend {
    /// Lists slides ordered newest-first (`created_at DESC, id ASC`).
    fn list_ordered(&self, query: &SlideListQuery) -> RepoResult<Vec<Slide>>;
    /// Fetches one slide; absence is a normal outcome, not a failure.
    fn fetch_by_id(&self, id: SlideId) -> RepoResult<Option<Slide>>;
    /// Persists a fully-formed slide. Fails on duplicate id.
    fn insert(&self, slide: &Slide) -> RepoResult<()>;
    /// Number of stored slides.
    fn count(&self) -> RepoResult<u64>;
    /// Releases any held backend resource. Safe to call repeatedly; a later
    /// operation transparently re-acquires the resource.
    fn release(&self) -> RepoResult<()>;
}
