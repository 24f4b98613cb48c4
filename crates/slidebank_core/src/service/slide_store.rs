//! Slide store facade.
//!
//! # Responsibility
//! - Provide the single capability surface callers depend on.
//! - Orchestrate backend access and similarity scoring for duplicate checks.
//!
//! # Invariants
//! - The facade holds no record state beyond its backend reference.
//! - `created_at` stamps never decrease within a process.
//! - Swapping the backend adapter never changes caller-visible behavior.

use crate::model::slide::{DuplicateCheckReport, DuplicateMatch, NewSlide, Slide, SlideId};
use crate::repo::slide_repo::{RepoResult, SlideBackend, SlideListQuery};
use crate::similarity::scorer::{
    combined_similarity, DUPLICATE_THRESHOLD, MIN_CHECK_BODY_CHARS,
};
use log::{debug, info};
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::atomic::{self, AtomicI64};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Page number used by the boundary layer when the caller omits one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used by the boundary layer when the caller omits one.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Upper clamp for caller-requested page sizes.
pub const MAX_PER_PAGE: u32 = 100;

/// One bounded, ordered window of slides plus pagination metadata.
///
/// Derived per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlidePage {
    pub data: Vec<Slide>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

/// Use-case facade over one persistence adapter.
///
/// Constructed explicitly at startup and injected into callers; there is no
/// process-global store instance.
pub struct SlideStore<B: SlideBackend> {
    backend: B,
    // High-water mark keeping created_at stamps non-decreasing per process.
    clock_floor: AtomicI64,
}

impl<B: SlideBackend> SlideStore<B> {
    /// Creates a store using the provided backend adapter.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            clock_floor: AtomicI64::new(0),
        }
    }

    /// Returns one page of slides, newest first.
    ///
    /// # Contract
    /// - `page` is clamped to a minimum of 1, `per_page` to `[1, 100]`.
    /// - `total_pages = ceil(total / per_page)`.
    /// - A page past the end of the data returns an empty `data` list with
    ///   `total` still reflecting the full count; this is not an error.
    pub fn get_page(&self, page: u32, per_page: u32) -> RepoResult<SlidePage> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, MAX_PER_PAGE);

        let total = self.backend.count()?;
        let offset = u64::from(page - 1) * u64::from(per_page);
        let data = self
            .backend
            .list_ordered(&SlideListQuery::window(offset, per_page))?;
        let total_pages = total.div_ceil(u64::from(per_page)) as u32;

        Ok(SlidePage {
            data,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    /// Fetches one slide by id; `Ok(None)` when absent.
    pub fn get_by_id(&self, id: SlideId) -> RepoResult<Option<Slide>> {
        self.backend.fetch_by_id(id)
    }

    /// Validates input, stamps identity and creation time, persists and
    /// returns the full record.
    ///
    /// No deduplication is enforced here; callers wanting a warning must run
    /// [`SlideStore::check_duplicates`] beforehand.
    pub fn create(&self, input: NewSlide) -> RepoResult<Slide> {
        input.validate()?;

        let slide = Slide::from_input(Uuid::new_v4(), self.next_created_at(), input);
        self.backend.insert(&slide)?;

        info!(
            "event=slide_create module=service status=ok id={} created_at={}",
            slide.id, slide.created_at
        );
        Ok(slide)
    }

    /// Scores the candidate against every stored slide and returns matches
    /// at or above the duplicate threshold, sorted non-increasing.
    ///
    /// Full O(n) scan per call; acceptable while the collection stays small.
    /// An empty candidate subject is treated as absent.
    pub fn check_duplicates(
        &self,
        body: &str,
        subject: Option<&str>,
    ) -> RepoResult<Vec<DuplicateMatch>> {
        let started_at = Instant::now();
        let subject = subject.filter(|value| !value.is_empty());

        let slides = self.backend.list_ordered(&SlideListQuery::all())?;
        let scanned = slides.len();

        let mut matches: Vec<DuplicateMatch> = slides
            .into_iter()
            .filter_map(|slide| {
                let subjects = subject.map(|candidate| (candidate, slide.subject.as_str()));
                let similarity = combined_similarity(body, &slide.body, subjects);
                (similarity >= DUPLICATE_THRESHOLD).then(|| DuplicateMatch { slide, similarity })
            })
            .collect();

        // Stable sort keeps scan order on equal scores.
        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });

        debug!(
            "event=duplicate_check module=service status=ok scanned={} matches={} duration_ms={}",
            scanned,
            matches.len(),
            started_at.elapsed().as_millis()
        );
        Ok(matches)
    }

    /// Boundary-shaped duplicate check.
    ///
    /// Bodies shorter than [`MIN_CHECK_BODY_CHARS`] short-circuit to a
    /// negative report without touching the backend.
    pub fn duplicate_report(
        &self,
        body: &str,
        subject: Option<&str>,
    ) -> RepoResult<DuplicateCheckReport> {
        if body.chars().count() < MIN_CHECK_BODY_CHARS {
            return Ok(DuplicateCheckReport::empty());
        }

        let matches = self.check_duplicates(body, subject)?;
        Ok(DuplicateCheckReport::from_matches(matches))
    }

    /// Releases the backend's held resource (e.g. the cached SQLite
    /// connection). Safe to call repeatedly; a later store operation
    /// transparently re-establishes the resource.
    pub fn shutdown(&self) -> RepoResult<()> {
        self.backend.release()
    }

    fn next_created_at(&self) -> i64 {
        let now = now_epoch_ms();
        let floor = self.clock_floor.fetch_max(now, atomic::Ordering::SeqCst);
        floor.max(now)
    }
}

fn now_epoch_ms() -> i64 {
    // A clock before the Unix epoch degrades to 0 rather than failing writes.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
