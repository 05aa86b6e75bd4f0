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

//! Errors raised while managing swapchains.

use lumen_core::renderer::error::HandleError;
use std::fmt;

/// An error raised by [`super::SwapchainSet`].
#[derive(Debug)]
pub enum SwapchainError {
    /// The handle does not name a currently-registered swapchain.
    NotFound,
    /// Interning the swapchain's backing image handle failed.
    Handle(HandleError),
    /// The surface reported it is out of date and a resize-and-retry failed.
    Lost(String),
}

impl fmt::Display for SwapchainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "swapchain handle does not name a registered swapchain"),
            Self::Handle(err) => write!(f, "failed to intern swapchain image handle: {err}"),
            Self::Lost(msg) => write!(f, "swapchain surface lost: {msg}"),
        }
    }
}

impl std::error::Error for SwapchainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Handle(err) => Some(err),
            _ => None,
        }
    }
}
