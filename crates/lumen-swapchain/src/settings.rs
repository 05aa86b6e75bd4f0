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

//! Swapchain kinds and the linked-list settings an application builds to
//! describe every output it wants the renderer to manage.

/// The presentation mechanism a swapchain uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapchainKind {
    /// Presents to an OS window surface via `raw-window-handle`.
    Windowed,
    /// Writes each presented frame to host memory instead of a surface.
    Image,
    /// Streams presented frames to an external encoder process.
    VideoPipe,
}

/// Describes one output an application wants the renderer to manage.
///
/// Settings form a linked list via `next`, so a single `setup` call can
/// attach several outputs (e.g. a window plus an offscreen capture) at once.
#[derive(Debug, Clone)]
pub struct SwapchainSettings {
    /// An optional debug label, also used as the interned image handle's name.
    pub label: Option<String>,
    /// The presentation mechanism.
    pub kind: SwapchainKind,
    /// Initial width, in pixels.
    pub width: u32,
    /// Initial height, in pixels.
    pub height: u32,
    /// The next output to attach, if any.
    pub next: Option<Box<SwapchainSettings>>,
}

impl SwapchainSettings {
    /// Describes a window-presented output.
    pub fn windowed(label: Option<&str>, width: u32, height: u32) -> Self {
        Self {
            label: label.map(str::to_string),
            kind: SwapchainKind::Windowed,
            width,
            height,
            next: None,
        }
    }

    /// Describes a host-memory image sink.
    pub fn image(label: Option<&str>, width: u32, height: u32) -> Self {
        Self {
            label: label.map(str::to_string),
            kind: SwapchainKind::Image,
            width,
            height,
            next: None,
        }
    }

    /// Describes an external video-pipe sink.
    pub fn video_pipe(label: Option<&str>, width: u32, height: u32) -> Self {
        Self {
            label: label.map(str::to_string),
            kind: SwapchainKind::VideoPipe,
            width,
            height,
            next: None,
        }
    }

    /// Chains another output after this one.
    pub fn with_next(mut self, next: SwapchainSettings) -> Self {
        self.next = Some(Box::new(next));
        self
    }
}
