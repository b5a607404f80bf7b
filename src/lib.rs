// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod controllers;
pub mod error;
pub mod kubernetes;
pub mod operator;
pub mod shutdown;
pub mod types;
pub mod watch;

#[cfg(test)]
pub mod test_utils;
