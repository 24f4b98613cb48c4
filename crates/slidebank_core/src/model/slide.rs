//! Slide domain model.
//!
//! # Responsibility
//! - Define the canonical persisted record shape shared by all backends.
//! - Validate create input before it reaches any persistence adapter.
//!
//! # Invariants
//! - `id` is stable, unique and never nil.
//! - `created_at` is stamped by the store facade, never caller-supplied.
//! - A slide is immutable once created; no update surface exists in core.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every persisted slide.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type SlideId = Uuid;

/// Canonical persisted record.
///
/// Field shapes are identical across backends; backend-native id
/// representations are surfaced as the opaque [`SlideId`] before a `Slide`
/// ever leaves the repository layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Stable global ID used for lookup and deduplication reporting.
    pub id: SlideId,
    /// Short topic line. Non-blank.
    pub subject: String,
    /// Main text content. Non-blank.
    pub body: String,
    /// Display name of the submitter. Non-blank.
    pub author: String,
    /// Unix epoch milliseconds, assigned by the store at creation.
    /// Non-decreasing within a process, not unique across same-instant writes.
    pub created_at: i64,
}

/// Create input: the caller-supplied fields of a slide.
///
/// `id` and `created_at` are intentionally absent; the store generates both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSlide {
    pub subject: String,
    pub body: String,
    pub author: String,
}

/// A stored slide paired with its similarity against a candidate text.
///
/// Transient: computed per duplicate query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateMatch {
    pub slide: Slide,
    pub similarity: f64,
}

/// Boundary shape of the duplicate-check operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateCheckReport {
    pub is_duplicate: bool,
    pub matches: Vec<DuplicateMatch>,
}

impl DuplicateCheckReport {
    /// Builds a report from scored matches; `is_duplicate` is true iff any
    /// match survived the threshold.
    pub fn from_matches(matches: Vec<DuplicateMatch>) -> Self {
        Self {
            is_duplicate: !matches.is_empty(),
            matches,
        }
    }

    /// The negative report returned without consulting any backend.
    pub fn empty() -> Self {
        Self {
            is_duplicate: false,
            matches: Vec::new(),
        }
    }
}

/// Validation failure for slide content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideValidationError {
    BlankSubject,
    BlankBody,
    BlankAuthor,
    NilId,
}

impl Display for SlideValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankSubject => write!(f, "subject must not be blank"),
            Self::BlankBody => write!(f, "body must not be blank"),
            Self::BlankAuthor => write!(f, "author must not be blank"),
            Self::NilId => write!(f, "slide id must not be the nil uuid"),
        }
    }
}

impl Error for SlideValidationError {}

impl NewSlide {
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            author: author.into(),
        }
    }

    /// Rejects incomplete create input before it reaches a backend.
    ///
    /// # Invariants
    /// - `subject`, `body` and `author` must contain non-whitespace content.
    pub fn validate(&self) -> Result<(), SlideValidationError> {
        if self.subject.trim().is_empty() {
            return Err(SlideValidationError::BlankSubject);
        }
        if self.body.trim().is_empty() {
            return Err(SlideValidationError::BlankBody);
        }
        if self.author.trim().is_empty() {
            return Err(SlideValidationError::BlankAuthor);
        }
        Ok(())
    }
}

impl Slide {
    /// Assembles a full record from validated input plus store-generated
    /// identity and timestamp.
    ///
    /// # Invariants
    /// - Callers must have validated `input` first; this constructor trusts it.
    pub fn from_input(id: SlideId, created_at: i64, input: NewSlide) -> Self {
        Self {
            id,
            subject: input.subject,
            body: input.body,
            author: input.author,
            created_at,
        }
    }

    /// Re-checks persisted state on read paths.
    ///
    /// Backends call this when decoding rows so invalid persisted data is
    /// surfaced instead of masked.
    pub fn validate(&self) -> Result<(), SlideValidationError> {
        if self.id.is_nil() {
            return Err(SlideValidationError::NilId);
        }
        if self.subject.trim().is_empty() {
            return Err(SlideValidationError::BlankSubject);
        }
        if self.body.trim().is_empty() {
            return Err(SlideValidationError::BlankBody);
        }
        if self.author.trim().is_empty() {
            return Err(SlideValidationError::BlankAuthor);
        }
        Ok(())
    }
}
