// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource descriptors, identities and documents shared across layers.

pub mod resource;

pub use resource::{
    api_version, normalize_group, ApiResourceDescriptor, GenericResourceDocument,
    ResolvedResource, ResourceIdentity,
};
