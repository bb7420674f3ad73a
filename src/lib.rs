#![forbid(unsafe_code)]
//! Layerkit: declarative layer-based widget composition.
//!
//! A [`Project`] is a stack of [`Layer`]s over one [`Background`]. Rendering is split in two:
//!
//! 1. [`compile_project`] turns a project, a pixel size and the current binding values into a
//!    backend-agnostic [`RenderPlan`]. Compilation is total and never blocks on IO.
//! 2. A [`RenderBackend`] (the CPU backend by default) executes the plan into a [`FrameRGBA`].
//!
//! [`render_project`] does both. Templates live in a [`TemplateLibrary`] and seed new projects
//! through [`TemplateLibrary::instantiate`].

pub mod assets;
pub mod binding;
pub mod catalog;
pub mod compile;
pub mod foundation;
pub mod model;
pub mod paint;
pub mod pattern;
pub mod render;

pub use assets::{
    cache::{AssetEvent, AssetStatus, ImageCache, ImageSource, NoImages},
    decode::{PreparedImage, decode_image},
    store::{AssetStore, DirAssetStore, MemoryAssetStore},
};
pub use binding::provider::{
    BindingKey, ContentProvider, EmptyContentProvider, PreviewContentProvider,
    StaticContentProvider, resolve_binding,
};
pub use catalog::{
    builtin::builtin_templates,
    library::{LibraryState, RECENTS_CAPACITY, TemplateLibrary},
    template::{Template, TemplateCategory},
};
pub use compile::{
    compositor::{compile_project, compile_shared, unit_scale},
    plan::{DrawOp, Paint, Pass, RenderPlan, TextRun},
};
pub use foundation::{
    core::{Affine, BezPath, PixelSize, Point, Rect, Size},
    error::{LayerkitError, LayerkitResult},
};
pub use model::{
    element::{
        DataBindingElement, Element, FontDescriptor, FontDesign, FontWeight, IconElement,
        ShapeElement, ShapeFill, ShapeKind, TextAlignment, TextElement, TextStyle,
    },
    layer::Layer,
    layout::{LayoutFrame, ResolvedFrame, resolve_frame},
    project::{PROJECT_SCHEMA_VERSION, Project, WidgetSize, WidgetType},
};
pub use paint::{
    background::{Background, ContentMode, GlassBackground, ImageBackground, PatternBackground},
    color::Color,
    gradient::{
        AnchorPoint, Gradient, GradientGeometry, GradientKind, GradientStop, ResolvedGradient,
    },
};
pub use pattern::generator::{PatternKind, PatternPrimitive, PatternShape, generate};
pub use render::{
    backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend},
    cpu::CpuBackend,
    pipeline::{render_batch, render_project, render_shared, render_with},
};
