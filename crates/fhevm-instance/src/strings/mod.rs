// SPDX-License-Identifier: GPL-3.0

//! Centralized string constants for the fhevm-instance crate.
//!
//! This module organizes static strings used throughout the crate to avoid
//! magic strings scattered across the codebase.

pub mod rpc;
pub mod sdk;
