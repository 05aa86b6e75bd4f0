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

//! The render graph itself: a bag of declared passes plus the setup/build/
//! execute pipeline that turns them into a pruned, ordered [`Schedule`] each
//! frame.

use super::pass::{Access, PassIndex, QueueClass, RenderPass, ResourceUse};
use super::topological_sort::topological_sort;
use crate::encoder::CommandEncoder;
use crate::graph::handle::ResourceHandle;
use crate::renderer::error::GraphError;
use std::collections::{HashMap, HashSet};

/// A bitmask of GPU queues a root pass's subgraph may submit on, letting the
/// backend dispatch independent root subgraphs to different queues in
/// parallel. Bit `i` corresponds to the `i`-th root pass in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueAffinityMask(pub u32);

impl QueueAffinityMask {
    /// The empty mask, meaning "graphics queue only" per this module's
    /// convention for a pass reachable from no declared root.
    pub const NONE: Self = Self(0);

    fn with_bit(self, bit: u32) -> Self {
        Self(self.0 | (1 << bit))
    }
}

/// A pruned, topologically ordered, per-frame render schedule produced by
/// [`RenderModule::build_schedule`].
#[derive(Debug, Default)]
pub struct Schedule {
    /// Surviving passes, in execution order.
    pub order: Vec<PassIndex>,
    /// The resource uses each scheduled pass declared during setup.
    pub uses: HashMap<PassIndex, Vec<ResourceUse>>,
    /// For each resource, the schedule position of its first and last use.
    pub resource_lifetimes: HashMap<ResourceHandle, (usize, usize)>,
    /// The queue affinity mask computed for each scheduled pass.
    pub affinity: HashMap<PassIndex, QueueAffinityMask>,
}

impl Schedule {
    /// Runs the execute phase: invokes each scheduled pass's execute
    /// callback with a fresh encoder, returning the encoded command bytes
    /// keyed by pass index in schedule order.
    pub fn execute(&self, module: &RenderModule) -> Vec<(PassIndex, Vec<u8>)> {
        let mut results = Vec::with_capacity(self.order.len());
        for &index in &self.order {
            let pass = &module.passes[index.0 as usize];
            let uses = self.uses.get(&index).map(Vec::as_slice).unwrap_or(&[]);
            let mut encoder = CommandEncoder::new();
            pass.run_execute(&mut encoder, uses);
            let (bytes, _, _) = encoder.get_encoded_data();
            results.push((index, bytes.to_vec()));
        }
        results
    }
}

/// A bag of declared render passes plus the resources they reference.
///
/// `RenderModule` owns no GPU state; it is pure declaration. An application
/// rebuilds or mutates the passes it holds between frames and calls
/// `build_schedule` once per `record_frame`.
#[derive(Default)]
pub struct RenderModule {
    passes: Vec<RenderPass>,
}

impl std::fmt::Debug for RenderModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderModule")
            .field("pass_count", &self.passes.len())
            .finish()
    }
}

impl RenderModule {
    /// Creates an empty module.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new pass, returning the stable index it is assigned.
    pub fn add_pass(&mut self, pass: RenderPass) -> PassIndex {
        let index = PassIndex(self.passes.len() as u32);
        self.passes.push(pass);
        index
    }

    /// The number of declared passes.
    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    /// Runs the setup and build phases, producing a pruned, ordered
    /// [`Schedule`]. Call `Schedule::execute` to run the execute phase.
    pub fn build_schedule(&mut self) -> Result<Schedule, GraphError> {
        let mut uses: HashMap<PassIndex, Vec<ResourceUse>> = HashMap::new();
        let mut vetoed: HashSet<PassIndex> = HashSet::new();

        for i in 0..self.passes.len() {
            let index = PassIndex(i as u32);
            match self.passes[i].run_setup() {
                Some(declared) => {
                    uses.insert(index, declared);
                }
                None => {
                    vetoed.insert(index);
                }
            }
        }

        if self.passes.is_empty() {
            log::warn!("render graph produced an empty schedule");
            return Ok(Schedule::default());
        }

        let mut writers: HashMap<ResourceHandle, Vec<PassIndex>> = HashMap::new();
        let mut readers: HashMap<ResourceHandle, Vec<PassIndex>> = HashMap::new();
        for (index, declared) in &uses {
            for resource_use in declared {
                match resource_use.access {
                    Access::Write => writers.entry(resource_use.handle).or_default().push(*index),
                    Access::Read => readers.entry(resource_use.handle).or_default().push(*index),
                    Access::ReadWrite => {
                        writers.entry(resource_use.handle).or_default().push(*index);
                        readers.entry(resource_use.handle).or_default().push(*index);
                    }
                }
            }
        }

        for (handle, reader_list) in &readers {
            if !writers.contains_key(handle) {
                log::warn!(
                    "render graph pass(es) {:?} read resource {:?} with no writer; \
                     the backend will substitute a cleared default",
                    reader_list,
                    handle
                );
            }
        }

        let roots: Vec<PassIndex> = (0..self.passes.len())
            .map(|i| PassIndex(i as u32))
            .filter(|index| self.passes[index.0 as usize].is_root() && !vetoed.contains(index))
            .collect();

        let mut contributing: HashSet<PassIndex> = roots.iter().copied().collect();
        loop {
            let mut added = false;
            let contributing_snapshot: Vec<PassIndex> = contributing.iter().copied().collect();
            for index in &contributing_snapshot {
                let Some(declared) = uses.get(index) else {
                    continue;
                };
                for resource_use in declared {
                    if resource_use.access == Access::Write {
                        continue;
                    }
                    if let Some(resource_writers) = writers.get(&resource_use.handle) {
                        for writer in resource_writers {
                            if !vetoed.contains(writer) && contributing.insert(*writer) {
                                added = true;
                            }
                        }
                    }
                }
            }
            if !added {
                break;
            }
        }

        let mut nodes: Vec<PassIndex> = (0..self.passes.len())
            .map(|i| PassIndex(i as u32))
            .filter(|index| contributing.contains(index))
            .collect();
        nodes.sort_by_key(|index| index.0);

        let mut edges: Vec<(PassIndex, PassIndex)> = Vec::new();
        for (handle, resource_writers) in &writers {
            let Some(resource_readers) = readers.get(handle) else {
                continue;
            };
            for writer in resource_writers {
                if !contributing.contains(writer) {
                    continue;
                }
                for reader in resource_readers {
                    if contributing.contains(reader) && writer != reader {
                        edges.push((*writer, *reader));
                    }
                }
            }
        }

        let order = topological_sort(nodes, edges).map_err(|_| {
            let pass = self
                .passes
                .iter()
                .enumerate()
                .find(|(i, _)| contributing.contains(&PassIndex(*i as u32)))
                .map(|(_, pass)| pass.name().to_string())
                .unwrap_or_else(|| "<unknown>".to_string());
            GraphError::Cycle { pass }
        })?;

        let mut resource_lifetimes: HashMap<ResourceHandle, (usize, usize)> = HashMap::new();
        for (position, index) in order.iter().enumerate() {
            if let Some(declared) = uses.get(index) {
                for resource_use in declared {
                    resource_lifetimes
                        .entry(resource_use.handle)
                        .and_modify(|(first, last)| {
                            *first = (*first).min(position);
                            *last = (*last).max(position);
                        })
                        .or_insert((position, position));
                }
            }
        }

        if order.is_empty() {
            log::warn!("render graph produced an empty schedule");
        }

        let affinity = compute_affinity(&roots, &edges, &order);

        Ok(Schedule {
            order,
            uses,
            resource_lifetimes,
            affinity,
        })
    }
}

fn compute_affinity(
    roots: &[PassIndex],
    edges: &[(PassIndex, PassIndex)],
    order: &[PassIndex],
) -> HashMap<PassIndex, QueueAffinityMask> {
    let mut forward: HashMap<PassIndex, Vec<PassIndex>> = HashMap::new();
    for (from, to) in edges {
        forward.entry(*from).or_default().push(*to);
    }

    let mut affinity: HashMap<PassIndex, QueueAffinityMask> =
        order.iter().map(|index| (*index, QueueAffinityMask::NONE)).collect();

    for (bit, root) in roots.iter().enumerate() {
        let bit = (bit as u32) % 32;
        let mut stack = vec![*root];
        let mut visited = HashSet::new();
        while let Some(index) = stack.pop() {
            if !visited.insert(index) {
                continue;
            }
            if let Some(mask) = affinity.get_mut(&index) {
                *mask = mask.with_bit(bit);
            }
            if let Some(next) = forward.get(&index) {
                stack.extend(next.iter().copied());
            }
        }
    }

    affinity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::handle::{HandleRegistry, ResourceFlags, ResourceKind};

    fn resource(registry: &HandleRegistry, name: &str) -> ResourceHandle {
        registry
            .intern_resource(Some(name), ResourceKind::Image, ResourceFlags::NONE, 1, 0, None)
            .unwrap()
    }

    #[test]
    fn empty_module_produces_empty_schedule() {
        let mut module = RenderModule::new();
        let schedule = module.build_schedule().unwrap();
        assert!(schedule.order.is_empty());
    }

    #[test]
    fn vetoed_pass_is_dropped_from_schedule() {
        let registry = HandleRegistry::new();
        let color = resource(&registry, "color");
        let mut module = RenderModule::new();
        module.add_pass(
            RenderPass::new(
                "geometry",
                QueueClass::Graphics,
                move || None,
                |_, _| {},
            )
            .as_root(),
        );
        let schedule = module.build_schedule().unwrap();
        assert!(schedule.order.is_empty());
        let _ = color;
    }

    #[test]
    fn reader_root_pulls_in_its_writer() {
        let registry = HandleRegistry::new();
        let color = resource(&registry, "color");

        let mut module = RenderModule::new();
        let geometry_color = color;
        module.add_pass(RenderPass::new(
            "geometry",
            QueueClass::Graphics,
            move || Some(vec![ResourceUse::write(geometry_color)]),
            |_, _| {},
        ));
        let present_color = color;
        module.add_pass(
            RenderPass::new(
                "present",
                QueueClass::Graphics,
                move || Some(vec![ResourceUse::read(present_color)]),
                |_, _| {},
            )
            .as_root(),
        );

        let schedule = module.build_schedule().unwrap();
        assert_eq!(schedule.order, vec![PassIndex(0), PassIndex(1)]);
    }

    #[test]
    fn disconnected_pass_is_pruned() {
        let registry = HandleRegistry::new();
        let color = resource(&registry, "color");
        let orphan_resource = resource(&registry, "unused");

        let mut module = RenderModule::new();
        module.add_pass(RenderPass::new(
            "orphan",
            QueueClass::Graphics,
            move || Some(vec![ResourceUse::write(orphan_resource)]),
            |_, _| {},
        ));
        let present_color = color;
        module.add_pass(
            RenderPass::new(
                "present",
                QueueClass::Graphics,
                move || Some(vec![ResourceUse::write(present_color)]),
                |_, _| {},
            )
            .as_root(),
        );

        let schedule = module.build_schedule().unwrap();
        assert_eq!(schedule.order, vec![PassIndex(1)]);
    }

    #[test]
    fn cycle_is_reported_as_graph_error() {
        let registry = HandleRegistry::new();
        let a = resource(&registry, "a");
        let b = resource(&registry, "b");

        let mut module = RenderModule::new();
        let pass0_write = b;
        let pass0_read = a;
        module.add_pass(
            RenderPass::new(
                "pass0",
                QueueClass::Graphics,
                move || Some(vec![ResourceUse::read(pass0_read), ResourceUse::write(pass0_write)]),
                |_, _| {},
            )
            .as_root(),
        );
        let pass1_write = a;
        let pass1_read = b;
        module.add_pass(
            RenderPass::new(
                "pass1",
                QueueClass::Graphics,
                move || Some(vec![ResourceUse::read(pass1_read), ResourceUse::write(pass1_write)]),
                |_, _| {},
            )
            .as_root(),
        );

        let result = module.build_schedule();
        assert!(matches!(result, Err(GraphError::Cycle { .. })));
    }
}
