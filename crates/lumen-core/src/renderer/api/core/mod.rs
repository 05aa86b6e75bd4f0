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

//! Infrastructure and backend context.
//!
//! This module contains core types and constants for the graphics subsystem.

/// The number of triple-buffered `FrameData` slots the renderer rotates through.
///
/// Frame `F` records into slot `F mod N`, dispatches slot `(F + 2) mod N`, and
/// clears slot `(F + 1) mod N` on the same tick.
pub const MAX_FRAMES_IN_FLIGHT: usize = 3;

pub mod adapter;
pub mod gpu_hook;
pub mod settings;
pub mod stats;

pub use self::adapter::*;
pub use self::gpu_hook::*;
pub use self::settings::*;
pub use self::stats::*;
