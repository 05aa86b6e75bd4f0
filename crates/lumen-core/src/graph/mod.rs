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

//! The render graph: declarative passes, their resource reads/writes, and the
//! setup/build/execute pipeline that turns them into an ordered, pruned
//! schedule each frame.

pub mod handle;
pub mod module;
pub mod pass;
pub mod topological_sort;

pub use self::handle::{HandleRegistry, ResourceFlags, ResourceHandle, ResourceKind};
pub use self::module::{QueueAffinityMask, RenderModule, Schedule};
pub use self::pass::{PassIndex, QueueClass, RenderPass, ResourceUse};
pub use self::topological_sort::{topological_sort, CycleError};
