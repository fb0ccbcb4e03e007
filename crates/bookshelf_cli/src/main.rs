//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `bookshelf_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    let seed = bookshelf_core::SeedData::default();
    println!("bookshelf_core version={}", bookshelf_core::core_version());
    println!(
        "bookshelf_core db_file={} default_admin={} default_catalog={}",
        bookshelf_core::DEFAULT_DB_FILE,
        seed.admin_username,
        seed.catalog.len()
    );
}
