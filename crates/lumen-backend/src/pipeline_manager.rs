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

//! Content-hash-keyed caches for shader modules, descriptor-set layouts,
//! pipeline layouts, and pipelines, plus file-watching shader hot-reload.
//!
//! Every cache is keyed by a hash of the inputs that determine the built
//! object, so two requests for the same shader source or the same pipeline
//! state never compile twice. Hot-reload works by re-hashing a shader file's
//! contents whenever the watcher reports a change; callers re-resolve by path
//! through [`PipelineManager::shader_module_for_path`] rather than holding
//! onto a stale hash across frames.

use lumen_core::renderer::error::{PipelineError, ShaderError};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};

/// A content hash identifying a cached object.
pub type CacheKey = u64;

fn hash_bytes(bytes: &[u8]) -> CacheKey {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

struct ShaderEntry {
    module: wgpu::ShaderModule,
    hash: CacheKey,
}

/// Graphics, compute, and pipeline-layout caches, plus the file watcher that
/// drives shader hot-reload.
pub struct PipelineManager {
    shader_modules: HashMap<CacheKey, wgpu::ShaderModule>,
    shaders_by_path: HashMap<PathBuf, CacheKey>,
    pipeline_layouts: HashMap<CacheKey, wgpu::PipelineLayout>,
    bind_group_layouts: HashMap<CacheKey, wgpu::BindGroupLayout>,
    render_pipelines: HashMap<CacheKey, wgpu::RenderPipeline>,
    compute_pipelines: HashMap<CacheKey, wgpu::ComputePipeline>,
    watcher: Option<RecommendedWatcher>,
    watch_rx: Option<crossbeam_channel::Receiver<notify::Result<notify::Event>>>,
}

impl std::fmt::Debug for PipelineManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineManager")
            .field("shader_modules", &self.shader_modules.len())
            .field("pipeline_layouts", &self.pipeline_layouts.len())
            .field("render_pipelines", &self.render_pipelines.len())
            .field("compute_pipelines", &self.compute_pipelines.len())
            .finish()
    }
}

impl PipelineManager {
    /// Creates an empty manager with no file watcher installed.
    pub fn new() -> Self {
        Self {
            shader_modules: HashMap::new(),
            shaders_by_path: HashMap::new(),
            pipeline_layouts: HashMap::new(),
            bind_group_layouts: HashMap::new(),
            render_pipelines: HashMap::new(),
            compute_pipelines: HashMap::new(),
            watcher: None,
            watch_rx: None,
        }
    }

    /// Installs a file watcher over `dir`, enabling `update_shader_modules`
    /// to pick up on-disk edits.
    pub fn watch_shader_directory(&mut self, dir: &Path) -> Result<(), ShaderError> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut watcher = notify::recommended_watcher(move |event| {
            let _ = tx.send(event);
        })
        .map_err(|err| ShaderError::LoadError {
            path: dir.display().to_string(),
            source_error: err.to_string(),
        })?;
        watcher
            .watch(dir, RecursiveMode::Recursive)
            .map_err(|err| ShaderError::LoadError {
                path: dir.display().to_string(),
                source_error: err.to_string(),
            })?;
        self.watcher = Some(watcher);
        self.watch_rx = Some(rx);
        Ok(())
    }

    /// Compiles (or returns the cached module for) the shader source at
    /// `path`, recording the path so hot-reload can find it again.
    pub fn load_shader_module(
        &mut self,
        device: &wgpu::Device,
        path: &Path,
        source: &str,
        label: Option<&str>,
    ) -> Result<CacheKey, ShaderError> {
        let hash = hash_bytes(source.as_bytes());
        if !self.shader_modules.contains_key(&hash) {
            let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label,
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });
            self.shader_modules.insert(hash, module);
        }
        self.shaders_by_path.insert(path.to_path_buf(), hash);
        Ok(hash)
    }

    /// Looks up the current cache key for a previously loaded shader path.
    pub fn shader_module_for_path(&self, path: &Path) -> Option<CacheKey> {
        self.shaders_by_path.get(path).copied()
    }

    /// Resolves a cache key to its compiled module.
    pub fn shader_module(&self, key: CacheKey) -> Option<&wgpu::ShaderModule> {
        self.shader_modules.get(&key)
    }

    /// Drains pending file-watch events and recompiles any changed shader
    /// whose path is currently tracked. Returns the paths that were reloaded.
    ///
    /// Call once per frame, before the setup phase, so hot-reload never races
    /// a frame already in flight (the structured-concurrency worker-pool path
    /// enforces this ordering with a barrier).
    pub fn update_shader_modules(
        &mut self,
        device: &wgpu::Device,
        read_file: impl Fn(&Path) -> std::io::Result<String>,
    ) -> Vec<PathBuf> {
        let Some(rx) = &self.watch_rx else {
            return Vec::new();
        };

        let mut changed_paths = Vec::new();
        while let Ok(event) = rx.try_recv() {
            match event {
                Ok(event) => {
                    if matches!(
                        event.kind,
                        notify::EventKind::Modify(_) | notify::EventKind::Create(_)
                    ) {
                        changed_paths.extend(event.paths);
                    }
                }
                Err(err) => log::warn!("shader watcher error: {err}"),
            }
        }

        let mut reloaded = Vec::new();
        for path in changed_paths {
            if !self.shaders_by_path.contains_key(&path) {
                continue;
            }
            match read_file(&path) {
                Ok(source) => {
                    match self.load_shader_module(device, &path, &source, path.to_str()) {
                        Ok(_) => reloaded.push(path),
                        Err(err) => log::warn!("failed to recompile shader {path:?}: {err}"),
                    }
                }
                Err(err) => log::warn!("failed to read changed shader {path:?}: {err}"),
            }
        }
        reloaded
    }

    /// Returns (or builds) a bind group layout for the given content hash of
    /// its entries.
    pub fn get_or_create_bind_group_layout(
        &mut self,
        device: &wgpu::Device,
        key: CacheKey,
        build: impl FnOnce() -> wgpu::BindGroupLayout,
    ) -> &wgpu::BindGroupLayout {
        let _ = device;
        self.bind_group_layouts.entry(key).or_insert_with(build)
    }

    /// Returns (or builds) a pipeline layout for the given content hash.
    pub fn get_or_create_pipeline_layout(
        &mut self,
        key: CacheKey,
        build: impl FnOnce() -> wgpu::PipelineLayout,
    ) -> &wgpu::PipelineLayout {
        self.pipeline_layouts.entry(key).or_insert_with(build)
    }

    /// Returns (or builds) a graphics pipeline for the given content hash,
    /// surfacing a [`PipelineError`] if the builder fails.
    pub fn get_or_create_render_pipeline(
        &mut self,
        key: CacheKey,
        build: impl FnOnce() -> Result<wgpu::RenderPipeline, PipelineError>,
    ) -> Result<&wgpu::RenderPipeline, PipelineError> {
        if !self.render_pipelines.contains_key(&key) {
            let pipeline = build()?;
            self.render_pipelines.insert(key, pipeline);
        }
        Ok(self.render_pipelines.get(&key).expect("just inserted"))
    }

    /// Returns (or builds) a compute pipeline for the given content hash.
    pub fn get_or_create_compute_pipeline(
        &mut self,
        key: CacheKey,
        build: impl FnOnce() -> Result<wgpu::ComputePipeline, PipelineError>,
    ) -> Result<&wgpu::ComputePipeline, PipelineError> {
        if !self.compute_pipelines.contains_key(&key) {
            let pipeline = build()?;
            self.compute_pipelines.insert(key, pipeline);
        }
        Ok(self.compute_pipelines.get(&key).expect("just inserted"))
    }
}

impl Default for PipelineManager {
    fn default() -> Self {
        Self::new()
    }
}

/// A small wait used by callers polling the watcher channel in tests.
pub const WATCH_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_bytes_is_deterministic() {
        assert_eq!(hash_bytes(b"hello"), hash_bytes(b"hello"));
        assert_ne!(hash_bytes(b"hello"), hash_bytes(b"world"));
    }
}
