//! CLI smoke entry point.
//!
//! # Responsibility
//! - Resolve the backend from environment configuration at process start.
//! - Construct the store explicitly and exercise its surface once.
//! - Keep output deterministic for quick local sanity checks.

use slidebank_core::{
    core_version, BackendKind, MemorySlideBackend, SlideBackend, SlideStore, SqliteSlideBackend,
    StoreConfig, DEFAULT_PAGE, DEFAULT_PER_PAGE,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("slidebank_core version={}", core_version());

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Adapter selection happens exactly once, here; probe() is identical for
    // both backends.
    let result = match config.backend {
        BackendKind::Memory => {
            println!("backend=memory");
            probe(SlideStore::new(MemorySlideBackend::new()))
        }
        BackendKind::Sqlite(path) => {
            println!("backend=sqlite db_path={}", path.display());
            probe(SlideStore::new(SqliteSlideBackend::new(path)))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("store probe failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn probe<B: SlideBackend>(store: SlideStore<B>) -> Result<(), Box<dyn std::error::Error>> {
    let page = store.get_page(DEFAULT_PAGE, DEFAULT_PER_PAGE)?;
    println!(
        "slides total={} page={} per_page={} total_pages={}",
        page.total, page.page, page.per_page, page.total_pages
    );
    store.shutdown()?;
    Ok(())
}
