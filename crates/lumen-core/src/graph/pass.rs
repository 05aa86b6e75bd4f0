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

//! A single declarative render pass: its queue affinity, declared resource
//! uses, and the setup/execute callbacks the graph builder invokes.

use super::handle::ResourceHandle;
use crate::encoder::CommandEncoder;

/// The index of a pass within a [`super::RenderModule`], assigned at `add_pass`
/// time and stable for the lifetime of that module instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassIndex(pub(crate) u32);

impl PassIndex {
    /// The raw index, for diagnostics and logging.
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// The GPU queue family a pass prefers to submit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueClass {
    /// The main graphics/present queue.
    Graphics,
    /// An asynchronous compute queue, where present.
    AsyncCompute,
    /// A dedicated transfer queue, where present.
    Transfer,
}

/// Whether a pass reads, writes, or read-modify-writes a declared resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// The pass reads the resource's current contents.
    Read,
    /// The pass writes the resource without reading its prior contents.
    Write,
    /// The pass reads the resource's prior contents and then writes it;
    /// ordered as both a reader of the preceding writer and a writer for
    /// any subsequent reader.
    ReadWrite,
}

/// One resource declaration made by a pass's setup callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceUse {
    /// The resource being declared.
    pub handle: ResourceHandle,
    /// Whether this use is a read or a write.
    pub access: Access,
}

impl ResourceUse {
    /// Declares a read of `handle`.
    pub fn read(handle: ResourceHandle) -> Self {
        Self {
            handle,
            access: Access::Read,
        }
    }

    /// Declares a write of `handle`.
    pub fn write(handle: ResourceHandle) -> Self {
        Self {
            handle,
            access: Access::Write,
        }
    }

    /// Declares a read-modify-write of `handle`.
    pub fn read_write(handle: ResourceHandle) -> Self {
        Self {
            handle,
            access: Access::ReadWrite,
        }
    }
}

type SetupFn = dyn FnMut() -> Option<Vec<ResourceUse>> + Send;
type ExecuteFn = dyn Fn(&mut CommandEncoder, &[ResourceUse]) + Send + Sync;

/// A declarative render pass.
///
/// The setup callback is invoked once per frame during the graph's setup
/// phase and declares the pass's resource reads/writes; returning `None`
/// vetoes the pass for this frame. The execute callback runs only for passes
/// that survive pruning, in schedule order, and records into a fresh
/// [`CommandEncoder`].
pub struct RenderPass {
    name: String,
    queue_class: QueueClass,
    is_root: bool,
    setup: Box<SetupFn>,
    execute: Box<ExecuteFn>,
}

impl std::fmt::Debug for RenderPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderPass")
            .field("name", &self.name)
            .field("queue_class", &self.queue_class)
            .field("is_root", &self.is_root)
            .finish_non_exhaustive()
    }
}

impl RenderPass {
    /// Declares a new pass. `setup` returns the resources this pass reads and
    /// writes each frame, or `None` to veto its own inclusion this frame.
    /// `execute` records commands for passes that survive pruning.
    pub fn new(
        name: impl Into<String>,
        queue_class: QueueClass,
        setup: impl FnMut() -> Option<Vec<ResourceUse>> + Send + 'static,
        execute: impl Fn(&mut CommandEncoder, &[ResourceUse]) + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            queue_class,
            is_root: false,
            setup: Box::new(setup),
            execute: Box::new(execute),
        }
    }

    /// Marks this pass as a root: a pass the build phase's reverse
    /// reachability walk starts from (typically one that writes a swapchain
    /// image).
    pub fn as_root(mut self) -> Self {
        self.is_root = true;
        self
    }

    /// The pass's debug name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pass's preferred queue class.
    pub fn queue_class(&self) -> QueueClass {
        self.queue_class
    }

    /// Whether this pass is a root pass.
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub(crate) fn run_setup(&mut self) -> Option<Vec<ResourceUse>> {
        (self.setup)()
    }

    pub(crate) fn run_execute(&self, encoder: &mut CommandEncoder, uses: &[ResourceUse]) {
        (self.execute)(encoder, uses)
    }
}
