use std::sync::{PoisonError, RwLock};

use rayon::prelude::*;

use crate::{
    assets::cache::ImageSource,
    binding::provider::ContentProvider,
    compile::compositor::compile_project,
    foundation::{core::PixelSize, error::LayerkitResult},
    model::project::Project,
    render::{
        backend::{FrameRGBA, RenderBackend, RenderSettings, execute_plan},
        cpu::CpuBackend,
    },
};

/// Compile + render a single project on a caller-owned backend.
///
/// Reusing one backend across renders keeps its font database warm.
pub fn render_with(
    backend: &mut dyn RenderBackend,
    project: &Project,
    size: PixelSize,
    content: &dyn ContentProvider,
    images: &dyn ImageSource,
) -> LayerkitResult<FrameRGBA> {
    let plan = compile_project(project, size, content, images);
    execute_plan(backend, &plan)
}

/// Compile + render a single project with a fresh CPU backend.
///
/// Returns **premultiplied** RGBA8 pixels. Every call recomputes everything, including
/// binding values.
pub fn render_project(
    project: &Project,
    size: PixelSize,
    content: &dyn ContentProvider,
    images: &dyn ImageSource,
    settings: &RenderSettings,
) -> LayerkitResult<FrameRGBA> {
    let mut backend = CpuBackend::new(settings.clone());
    render_with(&mut backend, project, size, content, images)
}

/// Render a project shared with editors.
///
/// The read lock is held while the plan is compiled; rasterization then runs on the
/// immutable plan with the lock released.
pub fn render_shared(
    project: &RwLock<Project>,
    size: PixelSize,
    content: &dyn ContentProvider,
    images: &dyn ImageSource,
    settings: &RenderSettings,
) -> LayerkitResult<FrameRGBA> {
    let plan = {
        let guard = project.read().unwrap_or_else(PoisonError::into_inner);
        compile_project(&guard, size, content, images)
    };
    let mut backend = CpuBackend::new(settings.clone());
    execute_plan(&mut backend, &plan)
}

/// Render independent `(project, size)` jobs on the rayon pool, one backend per worker.
///
/// Results keep the input order.
pub fn render_batch(
    jobs: &[(&Project, PixelSize)],
    content: &(dyn ContentProvider + Sync),
    images: &dyn ImageSource,
    settings: &RenderSettings,
) -> Vec<LayerkitResult<FrameRGBA>> {
    jobs.par_iter()
        .map_init(
            || CpuBackend::new(settings.clone()),
            |backend, (project, size)| render_with(backend, project, *size, content, images),
        )
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
