//! Ephemeral in-process slide backend.
//!
//! # Responsibility
//! - Hold slides in a keyed map for the process lifetime.
//! - Serve the full backend contract without any external resource.
//!
//! # Invariants
//! - Readers always observe fully-written slides (lock-guarded snapshot).
//! - `release` is a no-op; the collection lives until process teardown.

use crate::model::slide::{Slide, SlideId};
use crate::repo::slide_repo::{RepoError, RepoResult, SlideBackend, SlideListQuery};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory slide backend keyed by slide id.
#[derive(Debug, Default)]
pub struct MemorySlideBackend {
    slides: RwLock<HashMap<SlideId, Slide>>,
}

impl MemorySlideBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlideBackend for MemorySlideBackend {
    fn list_ordered(&self, query: &SlideListQuery) -> RepoResult<Vec<Slide>> {
        let slides = self
            .slides
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut ordered: Vec<Slide> = slides.values().cloned().collect();
        ordered.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let windowed = ordered.into_iter().skip(offset);
        Ok(match query.limit {
            Some(limit) => windowed.take(limit as usize).collect(),
            None => windowed.collect(),
        })
    }

    fn fetch_by_id(&self, id: SlideId) -> RepoResult<Option<Slide>> {
        let slides = self
            .slides
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(slides.get(&id).cloned())
    }

    fn insert(&self, slide: &Slide) -> RepoResult<()> {
        slide.validate()?;

        let mut slides = self
            .slides
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if slides.contains_key(&slide.id) {
            return Err(RepoError::DuplicateId(slide.id));
        }
        slides.insert(slide.id, slide.clone());
        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let slides = self
            .slides
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(slides.len() as u64)
    }

    fn release(&self) -> RepoResult<()> {
        Ok(())
    }
}
