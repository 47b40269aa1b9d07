// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module: loading, RGB flattening, and preview thumbnails.

pub mod processor;

pub use processor::{ImageProcessor, preview_data_uri};
