use super::*;
use crate::{
    assets::cache::NoImages,
    binding::provider::EmptyContentProvider,
    model::project::{WidgetSize, WidgetType},
    paint::{background::Background, color::Color},
};

fn red_project() -> Project {
    Project::new("red", WidgetType::Custom, WidgetSize::Small)
        .with_background(Background::solid(Color::rgb(1.0, 0.0, 0.0)))
}

#[test]
fn solid_background_fills_every_pixel() {
    let frame = render_project(
        &red_project(),
        PixelSize::new(17, 17),
        &EmptyContentProvider,
        &NoImages,
        &RenderSettings::default(),
    )
    .unwrap();
    assert_eq!((frame.width, frame.height), (17, 17));
    assert!(frame.data.chunks_exact(4).all(|px| px == [255, 0, 0, 255]));
}

#[test]
fn shared_render_matches_direct_render() {
    let project = red_project();
    let size = PixelSize::new(12, 12);
    let settings = RenderSettings::default();
    let direct = render_project(&project, size, &EmptyContentProvider, &NoImages, &settings).unwrap();
    let lock = RwLock::new(project);
    let shared = render_shared(&lock, size, &EmptyContentProvider, &NoImages, &settings).unwrap();
    assert_eq!(direct, shared);
}

#[test]
fn batch_keeps_job_order() {
    let red = red_project();
    let blue = Project::new("blue", WidgetType::Custom, WidgetSize::Medium)
        .with_background(Background::solid(Color::rgb(0.0, 0.0, 1.0)));
    let jobs = [
        (&red, PixelSize::new(4, 4)),
        (&blue, PixelSize::new(8, 4)),
        (&red, PixelSize::new(2, 2)),
    ];
    let frames: Vec<FrameRGBA> = render_batch(
        &jobs,
        &EmptyContentProvider,
        &NoImages,
        &RenderSettings::default(),
    )
    .into_iter()
    .collect::<LayerkitResult<_>>()
    .unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(frames[1].pixel(7, 3), Some([0, 0, 255, 255]));
    assert_eq!((frames[2].width, frames[2].height), (2, 2));
}

#[test]
fn backend_reuse_across_sizes() {
    let mut backend = CpuBackend::new(RenderSettings::default());
    let project = red_project();
    for size in [PixelSize::new(4, 4), PixelSize::new(6, 3), PixelSize::new(4, 4)] {
        let frame = render_with(&mut backend, &project, size, &EmptyContentProvider, &NoImages).unwrap();
        assert_eq!(frame.data.len(), size.rgba8_len());
        assert_eq!(frame.pixel(size.width - 1, size.height - 1), Some([255, 0, 0, 255]));
    }
}

#[test]
fn glass_blur_radius_softens_the_material() {
    use crate::paint::background::GlassBackground;

    let glass = |blur_radius: f64| {
        let bg = GlassBackground {
            blur_radius,
            tint_color: Color::rgb(0.5, 0.5, 0.5),
            tint_opacity: 0.8,
            noise_opacity: 0.2,
            border_width: 0.0,
            ..GlassBackground::default()
        };
        Project::new("glass", WidgetType::Custom, WidgetSize::Small)
            .with_background(Background::Glass(bg))
    };
    let render = |project: &Project| {
        render_project(
            project,
            PixelSize::new(64, 64),
            &EmptyContentProvider,
            &NoImages,
            &RenderSettings::default(),
        )
        .unwrap()
    };
    let spread = |frame: &FrameRGBA| {
        let reds = frame.data.chunks_exact(4).map(|px| px[0]);
        reds.clone().max().unwrap() - reds.min().unwrap()
    };

    let sharp = render(&glass(0.0));
    let soft = render(&glass(40.0));
    assert_ne!(sharp, soft);
    assert!(spread(&soft) < spread(&sharp));
    assert!(soft.data.chunks_exact(4).all(|px| px[3] == sharp.data[3]));
}
