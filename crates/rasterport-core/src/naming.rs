//! Output filename allocation.
//!
//! Each canonical format has its own counter. Counters start at zero, are
//! bumped once per successful conversion, and never go down.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::{FormatToken, ImageFormat};

/// Hands out `converted_{n}.{ext}` names, one sequence per format.
///
/// Shared by reference between concurrent conversions; the increment is a
/// single atomic `fetch_add`, so two callers never receive the same name.
#[derive(Debug, Default)]
pub struct NameAllocator {
    counters: [AtomicU32; ImageFormat::ALL.len()],
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next filename for `target`.
    ///
    /// `jpg` and `jpeg` share one counter; the extension follows the
    /// token's spelling.
    pub fn allocate(&self, target: &FormatToken) -> String {
        let n = self.counters[target.format().index()].fetch_add(1, Ordering::Relaxed) + 1;
        format!("converted_{}.{}", n, target.extension())
    }

    /// Number of names handed out so far for `format`.
    pub fn count(&self, format: ImageFormat) -> u32 {
        self.counters[format.index()].load(Ordering::Relaxed)
    }
}
