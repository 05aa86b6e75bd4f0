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

//! Logical-to-physical swapchain management.
//!
//! A swapchain is a sequence of presentable images bound to an output: an OS
//! window surface, a host-memory image sink, or an external video-pipe
//! process. This crate tracks the logical side (settings, extent, the interned
//! image handle an application's render graph reads/writes); the concrete
//! "acquire the next presentable image" operation is supplied by the backend
//! through a narrow callback, so this crate stays free of any GPU API.

#![warn(missing_docs)]

mod error;
mod settings;

pub use self::error::SwapchainError;
pub use self::settings::{SwapchainKind, SwapchainSettings};

use lumen_core::graph::handle::{HandleRegistry, ResourceHandle, ResourceKind};
use std::collections::HashMap;

/// An opaque handle to a managed swapchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapchainHandle(u32);

struct Entry {
    kind: SwapchainKind,
    width: u32,
    height: u32,
    image: ResourceHandle,
}

/// Tracks every swapchain an application has attached to the renderer.
///
/// Handles are stable for the lifetime of the entry (slots are never reused
/// while occupied; a removed slot's index may be reused by a later `add`,
/// but the old handle then correctly fails to resolve since it is simply no
/// longer present in `entries`).
#[derive(Default)]
pub struct SwapchainSet {
    entries: HashMap<u32, Entry>,
    next_id: u32,
}

impl SwapchainSet {
    /// Creates an empty swapchain set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new swapchain, interning a fresh image handle to back it.
    pub fn add_swapchain(
        &mut self,
        settings: &SwapchainSettings,
        registry: &HandleRegistry,
    ) -> Result<SwapchainHandle, SwapchainError> {
        let image = registry
            .intern_resource(
                settings.label.as_deref(),
                ResourceKind::Image,
                Default::default(),
                1,
                0,
                None,
            )
            .map_err(SwapchainError::Handle)?;

        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(
            id,
            Entry {
                kind: settings.kind.clone(),
                width: settings.width,
                height: settings.height,
                image,
            },
        );
        Ok(SwapchainHandle(id))
    }

    /// Removes a swapchain. Further operations on `handle` fail with
    /// [`SwapchainError::NotFound`].
    pub fn remove_swapchain(&mut self, handle: SwapchainHandle) -> Result<(), SwapchainError> {
        self.entries
            .remove(&handle.0)
            .map(|_| ())
            .ok_or(SwapchainError::NotFound)
    }

    /// Updates a swapchain's logical extent, e.g. in response to a window
    /// resize event. The concrete surface is recreated on the next acquire.
    pub fn resize_swapchain(
        &mut self,
        handle: SwapchainHandle,
        width: u32,
        height: u32,
    ) -> Result<(), SwapchainError> {
        let entry = self.entries.get_mut(&handle.0).ok_or(SwapchainError::NotFound)?;
        entry.width = width;
        entry.height = height;
        Ok(())
    }

    /// Returns the interned image handle a swapchain's render-graph passes
    /// should read/write.
    pub fn get_swapchain_resource(&self, handle: SwapchainHandle) -> Result<ResourceHandle, SwapchainError> {
        self.entries
            .get(&handle.0)
            .map(|entry| entry.image)
            .ok_or(SwapchainError::NotFound)
    }

    /// Returns a swapchain's current logical extent.
    pub fn get_swapchain_extent(&self, handle: SwapchainHandle) -> Result<(u32, u32), SwapchainError> {
        self.entries
            .get(&handle.0)
            .map(|entry| (entry.width, entry.height))
            .ok_or(SwapchainError::NotFound)
    }

    /// Returns the kind of a swapchain.
    pub fn get_swapchain_kind(&self, handle: SwapchainHandle) -> Result<SwapchainKind, SwapchainError> {
        self.entries
            .get(&handle.0)
            .map(|entry| entry.kind.clone())
            .ok_or(SwapchainError::NotFound)
    }

    /// Returns the first windowed swapchain with no backing surface yet bound,
    /// used by the renderer's `setup_with_window` convenience path.
    pub fn first_unbound_windowed(&self) -> Option<SwapchainHandle> {
        self.entries
            .iter()
            .find(|(_, entry)| matches!(entry.kind, SwapchainKind::Windowed))
            .map(|(&id, _)| SwapchainHandle(id))
    }

    /// Runs the acquire phase for every tracked swapchain: calls `acquire` for
    /// each entry, which should block on that output's next-image wait and
    /// return the concrete image handle to patch into the graph for this
    /// frame. Out-of-date surfaces are retried exactly once by the caller of
    /// `acquire`, not by this method (per the renderer's resize-and-retry
    /// policy).
    pub fn acquire_swapchain_resources(
        &mut self,
        frame_index: u64,
        mut acquire: impl FnMut(SwapchainHandle, SwapchainKind, u32, u32) -> Result<ResourceHandle, SwapchainError>,
    ) -> Result<(), SwapchainError> {
        let ids: Vec<u32> = self.entries.keys().copied().collect();
        for id in ids {
            let (kind, width, height) = {
                let entry = self.entries.get(&id).expect("id came from entries.keys()");
                (entry.kind.clone(), entry.width, entry.height)
            };
            let image = acquire(SwapchainHandle(id), kind, width, height)?;
            if let Some(entry) = self.entries.get_mut(&id) {
                entry.image = image;
            }
        }
        log::trace!("acquired swapchain resources for frame {frame_index}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_resolve_resource_and_extent() {
        let registry = HandleRegistry::new();
        let mut set = SwapchainSet::new();
        let settings = SwapchainSettings::windowed(Some("main"), 1024, 768);
        let handle = set.add_swapchain(&settings, &registry).unwrap();

        assert_eq!(set.get_swapchain_extent(handle).unwrap(), (1024, 768));
        assert!(set.get_swapchain_resource(handle).is_ok());
    }

    #[test]
    fn resize_updates_extent() {
        let registry = HandleRegistry::new();
        let mut set = SwapchainSet::new();
        let settings = SwapchainSettings::windowed(Some("main"), 1024, 768);
        let handle = set.add_swapchain(&settings, &registry).unwrap();

        set.resize_swapchain(handle, 1280, 720).unwrap();
        assert_eq!(set.get_swapchain_extent(handle).unwrap(), (1280, 720));
    }

    #[test]
    fn removed_swapchain_fails_lookups() {
        let registry = HandleRegistry::new();
        let mut set = SwapchainSet::new();
        let settings = SwapchainSettings::windowed(Some("main"), 800, 600);
        let handle = set.add_swapchain(&settings, &registry).unwrap();
        set.remove_swapchain(handle).unwrap();

        assert!(matches!(
            set.get_swapchain_extent(handle),
            Err(SwapchainError::NotFound)
        ));
    }

    #[test]
    fn settings_linked_list_walks_all_outputs() {
        let second = SwapchainSettings::image(Some("capture"), 512, 512);
        let first = SwapchainSettings::windowed(Some("main"), 1024, 768).with_next(second);

        let mut count = 0;
        let mut cursor = Some(&first);
        while let Some(s) = cursor {
            count += 1;
            cursor = s.next.as_deref();
        }
        assert_eq!(count, 2);
    }
}
