//! # addrreg-cli: Address Register Command-Line Interface
//!
//! Provides the `addrreg` binary.
//!
//! ## Subcommands
//!
//! - `addrreg validate`: schema validation of a collection, a feature, or a
//!   bare properties object.
//! - `addrreg qc`: duplicate house numbers per street within a ULB.
//!
//! ```bash
//! addrreg validate data/sample.geojson
//! addrreg validate feature.json --schema-target feature
//! addrreg validate legacy.geojson --legacy
//! addrreg qc data/sample.geojson
//! ```
//!
//! ## Exit Codes
//!
//! Automation branches on these, so they are stable:
//!
//! | code | meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | passed                                              |
//! | 1    | schema violations or duplicates found               |
//! | 2    | input is not the top-level shape the target expects |
//! | 3    | operational failure (IO, parse, schema, config)     |

pub mod config;
pub mod output;
pub mod qc;
pub mod validate;

use std::path::{Path, PathBuf};

/// Validation or QC passed.
pub const EXIT_OK: u8 = 0;
/// Content violations or duplicate findings.
pub const EXIT_FAILED: u8 = 1;
/// Wrong top-level `type` for the requested target.
pub const EXIT_SHAPE_MISMATCH: u8 = 2;
/// The run could not be carried out.
pub const EXIT_ERROR: u8 = 3;

/// Resolve a path that may be relative to `base`.
///
/// Absolute paths are returned as-is. A relative path is taken relative to
/// `base` when that file exists, otherwise relative to the current directory.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let based = base.join(path);
    if based.exists() {
        based
    } else {
        path.to_path_buf()
    }
}
