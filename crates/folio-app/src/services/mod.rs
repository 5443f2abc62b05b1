// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — bridges the command line to the folio backend crates.
//
// The backend is synchronous; services here add persistence and move the
// pipeline off the async runtime's worker threads.

pub mod config_store;
pub mod data_dir;
pub mod format_service;
