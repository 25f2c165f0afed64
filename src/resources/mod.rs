// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Generic resource access resolved against discovery.

pub mod access;

pub use access::{effective_namespace, find_descriptor, KubeResourceAccess, ResourceAccess};
