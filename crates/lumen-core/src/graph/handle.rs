// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Interns stable resource handles for images, buffers, acceleration structures,
//! textures, shader modules, and pipelines.
//!
//! Resources are named by a generation-checked index pair rather than a raw
//! pointer or address: the index names a slot in an insertion-stable slab, and
//! the generation detects a slot that has since been recycled. Two handles
//! interned with identical arguments always compare equal.

use crate::renderer::error::HandleError;
use std::collections::HashMap;
use std::sync::Mutex;

/// The kind of GPU resource a [`ResourceHandle`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A 2D/3D image (render target, sampled image, storage image).
    Image,
    /// A GPU buffer (vertex, index, uniform, storage).
    Buffer,
    /// A top-level acceleration structure (ray tracing).
    Tlas,
    /// A bottom-level acceleration structure (ray tracing).
    Blas,
    /// A combined image + sampler view used by the interned texture registry.
    Texture,
    /// A compiled shader module.
    ShaderModule,
    /// A graphics, compute, or ray-tracing pipeline.
    Pipeline,
}

/// Bitflags describing attributes of a declared resource (aliasing, transience, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResourceFlags {
    bits: u32,
}

impl ResourceFlags {
    /// No flags set.
    pub const NONE: Self = Self { bits: 0 };
    /// The resource may be aliased (memory-reused) with other resources whose
    /// lifetimes do not overlap.
    pub const TRANSIENT: Self = Self { bits: 1 << 0 };
    /// The resource is externally persistent and outlives any single frame.
    pub const PERSISTENT: Self = Self { bits: 1 << 1 };

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns `true` if `self` contains every flag set in `other`.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }
}

impl std::ops::BitOr for ResourceFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

/// An opaque, generation-checked handle to an interned GPU resource.
///
/// Two handles minted from identical interning arguments always compare equal;
/// a handle from a stale generation (its slot has been recycled) will fail
/// re-resolution with [`HandleError::StaleGeneration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    index: u32,
    generation: u32,
    kind: ResourceKind,
}

impl ResourceHandle {
    /// The resource kind this handle names.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The raw slab index backing this handle, for diagnostics only.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The raw generation backing this handle, for diagnostics only.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Reconstructs a handle from its raw parts. Used by the command decoder
    /// to recover handles serialized by the encoder; never mints a handle
    /// that did not already exist in a registry.
    pub fn from_raw_parts(index: u32, generation: u32, kind: ResourceKind) -> Self {
        Self {
            index,
            generation,
            kind,
        }
    }
}

struct Entry<T> {
    generation: u32,
    value: T,
}

/// An interned record for a resource minted via [`HandleRegistry::intern_resource`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    /// The debug name, or a synthesized unique name if none was given.
    pub name: String,
    /// The resource kind.
    pub kind: ResourceKind,
    /// Declared attribute flags.
    pub flags: ResourceFlags,
    /// Sample count, for multisampled image resources (1 for non-MSAA and buffers).
    pub samples: u32,
    /// A disambiguating index for resources that otherwise share a key (array
    /// elements, mip slices).
    pub index: u32,
    /// The parent handle this resource is a sub-view/alias of, if any.
    pub reference: Option<ResourceHandle>,
}

struct Slab<T> {
    entries: Vec<Entry<T>>,
    interned: HashMap<T, ResourceHandle>,
}

impl<T: Clone + Eq + std::hash::Hash> Slab<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            interned: HashMap::new(),
        }
    }

    fn intern(&mut self, key: T, kind: ResourceKind) -> Result<ResourceHandle, HandleError> {
        if let Some(existing) = self.interned.get(&key) {
            return Ok(*existing);
        }
        let index = u32::try_from(self.entries.len()).map_err(|_| HandleError::Exhausted {
            registry: kind_name(kind),
        })?;
        let generation = 0;
        self.entries.push(Entry {
            generation,
            value: key.clone(),
        });
        let handle = ResourceHandle {
            index,
            generation,
            kind,
        };
        self.interned.insert(key, handle);
        Ok(handle)
    }

    fn resolve(&self, handle: ResourceHandle) -> Result<&T, HandleError> {
        let entry = self
            .entries
            .get(handle.index as usize)
            .ok_or(HandleError::StaleGeneration {
                index: handle.index,
                requested: handle.generation,
                current: 0,
            })?;
        if entry.generation != handle.generation {
            return Err(HandleError::StaleGeneration {
                index: handle.index,
                requested: handle.generation,
                current: entry.generation,
            });
        }
        Ok(&entry.value)
    }
}

fn kind_name(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Image => "image",
        ResourceKind::Buffer => "buffer",
        ResourceKind::Tlas => "tlas",
        ResourceKind::Blas => "blas",
        ResourceKind::Texture => "texture",
        ResourceKind::ShaderModule => "shader_module",
        ResourceKind::Pipeline => "pipeline",
    }
}

/// Interns named handles for images, buffers, acceleration structures, and
/// textures. Handles are stable for the process lifetime and used as map keys
/// throughout the render graph and backend.
///
/// Each interned map has its own [`Mutex`]; lookups and inserts are O(1) amortized.
#[derive(Debug)]
pub struct HandleRegistry {
    textures: Mutex<Slab<String>>,
    resources: Mutex<Slab<ResourceKey>>,
    anon_counter: std::sync::atomic::AtomicU64,
}

impl Default for HandleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            textures: Mutex::new(Slab::new()),
            resources: Mutex::new(Slab::new()),
            anon_counter: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// Interns a texture by name, returning the same handle for repeated calls
    /// with the same name. An empty or absent name mints a fresh handle tagged
    /// with a synthesized unique debug name.
    pub fn intern_texture(&self, name: Option<&str>) -> Result<ResourceHandle, HandleError> {
        let name = self.resolve_name(name);
        let mut textures = self.textures.lock().expect("texture registry poisoned");
        textures.intern(name, ResourceKind::Texture)
    }

    /// Interns a resource by its full key, returning the same handle for
    /// repeated calls with identical arguments (handle stability, §8).
    #[allow(clippy::too_many_arguments)]
    pub fn intern_resource(
        &self,
        name: Option<&str>,
        kind: ResourceKind,
        flags: ResourceFlags,
        samples: u32,
        index: u32,
        reference: Option<ResourceHandle>,
    ) -> Result<ResourceHandle, HandleError> {
        let name = self.resolve_name(name);
        let key = ResourceKey {
            name,
            kind,
            flags,
            samples,
            index,
            reference,
        };
        let mut resources = self.resources.lock().expect("resource registry poisoned");
        resources.intern(key, kind)
    }

    /// Looks up the debug name a handle was interned under.
    pub fn debug_name(&self, handle: ResourceHandle) -> Result<String, HandleError> {
        match handle.kind {
            ResourceKind::Texture => {
                let textures = self.textures.lock().expect("texture registry poisoned");
                textures.resolve(handle).cloned()
            }
            _ => {
                let resources = self.resources.lock().expect("resource registry poisoned");
                resources.resolve(handle).map(|key| key.name.clone())
            }
        }
    }

    fn resolve_name(&self, name: Option<&str>) -> String {
        match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                let n = self
                    .anon_counter
                    .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                format!("anon#{n:x}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_name_returns_identical_handle() {
        let registry = HandleRegistry::new();
        let a = registry.intern_texture(Some("albedo")).unwrap();
        let b = registry.intern_texture(Some("albedo")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn interning_different_names_returns_distinct_handles() {
        let registry = HandleRegistry::new();
        let a = registry.intern_texture(Some("albedo")).unwrap();
        let b = registry.intern_texture(Some("normal")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn anonymous_handles_are_always_distinct() {
        let registry = HandleRegistry::new();
        let a = registry.intern_texture(None).unwrap();
        let b = registry.intern_texture(None).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn intern_resource_is_keyed_on_full_tuple() {
        let registry = HandleRegistry::new();
        let a = registry
            .intern_resource(Some("depth"), ResourceKind::Image, ResourceFlags::NONE, 1, 0, None)
            .unwrap();
        let b = registry
            .intern_resource(Some("depth"), ResourceKind::Image, ResourceFlags::NONE, 1, 0, None)
            .unwrap();
        assert_eq!(a, b);

        let c = registry
            .intern_resource(Some("depth"), ResourceKind::Image, ResourceFlags::NONE, 4, 0, None)
            .unwrap();
        assert_ne!(a, c, "differing sample count must mint a distinct handle");
    }

    #[test]
    fn debug_name_round_trips() {
        let registry = HandleRegistry::new();
        let handle = registry
            .intern_resource(Some("shadow_map"), ResourceKind::Image, ResourceFlags::NONE, 1, 0, None)
            .unwrap();
        assert_eq!(registry.debug_name(handle).unwrap(), "shadow_map");
    }
}
