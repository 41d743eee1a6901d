//! Disk I/O for downloads.
//!
//! Bodies are streamed into `<destination>.part` and renamed onto the final
//! name only after the whole payload arrived, so an existing destination file
//! always means a completed download.

mod writer;

pub use writer::StorageWriter;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a1b2c3d4.jpg` → `a1b2c3d4.jpg.part`).
pub fn temp_path(final_path: &std::path::Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    std::path::PathBuf::from(o)
}
