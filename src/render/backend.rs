use std::path::PathBuf;

use crate::{
    compile::plan::{BackdropPass, NoisePass, Pass, RenderPlan, ScenePass},
    foundation::{core::PixelSize, error::LayerkitResult},
    paint::color::Color,
};

/// A rendered widget as RGBA8 pixels.
///
/// Frames are premultiplied alpha; the flag makes that explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            crate::assets::decode::unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }
}

/// Default seed of the glass speckle.
pub const DEFAULT_NOISE_SEED: u64 = 0x6c61_7965_726b_6974;

/// Backend-agnostic settings.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    /// If set, the frame is cleared to this straight RGBA8 color before drawing.
    pub clear_rgba: Option<[u8; 4]>,
    /// Fill used where an image background could not be resolved.
    pub placeholder: Color,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` files, on top of system fonts.
    pub font_dirs: Vec<PathBuf>,
    /// Seed for the glass speckle.
    pub noise_seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_rgba: None,
            placeholder: Color::rgb(0.5, 0.5, 0.5),
            font_dirs: Vec::new(),
            noise_seed: DEFAULT_NOISE_SEED,
        }
    }
}

impl RenderSettings {
    /// Defaults with `LAYERKIT_FONT_DIRS` and `LAYERKIT_NOISE_SEED` applied.
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Some(dirs) = std::env::var_os("LAYERKIT_FONT_DIRS") {
            settings
                .font_dirs
                .extend(std::env::split_paths(&dirs).filter(|p| !p.as_os_str().is_empty()));
        }
        if let Some(seed) = std::env::var("LAYERKIT_NOISE_SEED")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            settings.noise_seed = seed;
        }
        settings
    }

    /// Premultiplied clear pixel.
    pub fn clear_premul(&self) -> [u8; 4] {
        self.clear_rgba
            .map(|[r, g, b, a]| Color::from_rgb8(r, g, b).with_alpha(f64::from(a) / 255.0))
            .map_or([0, 0, 0, 0], Color::to_rgba8_premul)
    }
}

/// Pass-level execution interface implemented by pixel backends.
pub trait PassBackend {
    /// Allocate (or reuse) the frame and clear it.
    fn begin(&mut self, size: PixelSize) -> LayerkitResult<()>;

    fn exec_scene(&mut self, pass: &ScenePass) -> LayerkitResult<()>;

    fn exec_backdrop(&mut self, pass: &BackdropPass) -> LayerkitResult<()>;

    fn exec_noise(&mut self, pass: &NoisePass) -> LayerkitResult<()>;

    fn readback_rgba8(&mut self, plan: &RenderPlan) -> LayerkitResult<FrameRGBA>;
}

/// Run every pass of `plan` in order and read back the frame.
pub fn execute_plan<B: PassBackend + ?Sized>(
    backend: &mut B,
    plan: &RenderPlan,
) -> LayerkitResult<FrameRGBA> {
    backend.begin(plan.size)?;
    for pass in &plan.passes {
        match pass {
            Pass::Scene(p) => backend.exec_scene(p)?,
            Pass::Backdrop(p) => backend.exec_backdrop(p)?,
            Pass::Noise(p) => backend.exec_noise(p)?,
        }
    }
    backend.readback_rgba8(plan)
}

/// A renderer that can execute a compiled [`RenderPlan`] into a [`FrameRGBA`].
///
/// Most callers use [`crate::render_project`], which also compiles the plan.
pub trait RenderBackend: PassBackend {
    fn render_plan(&mut self, plan: &RenderPlan) -> LayerkitResult<FrameRGBA> {
        execute_plan(self, plan)
    }
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> LayerkitResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
