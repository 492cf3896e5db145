// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules. Each function takes `&Database` and runs its SQL on
//! the single background writer thread.

pub mod properties;
pub mod stats;
pub mod users;
