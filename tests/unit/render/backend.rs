use super::*;
use crate::{
    compile::plan::{Blur, DrawOp},
    foundation::error::LayerkitError,
};

#[derive(Default)]
struct MockBackend {
    calls: Vec<&'static str>,
    fail_noise: bool,
}

impl PassBackend for MockBackend {
    fn begin(&mut self, _size: PixelSize) -> LayerkitResult<()> {
        self.calls.push("begin");
        Ok(())
    }

    fn exec_scene(&mut self, _pass: &ScenePass) -> LayerkitResult<()> {
        self.calls.push("exec_scene");
        Ok(())
    }

    fn exec_backdrop(&mut self, _pass: &BackdropPass) -> LayerkitResult<()> {
        self.calls.push("exec_backdrop");
        Ok(())
    }

    fn exec_noise(&mut self, _pass: &NoisePass) -> LayerkitResult<()> {
        self.calls.push("exec_noise");
        if self.fail_noise {
            return Err(LayerkitError::render("noise failed"));
        }
        Ok(())
    }

    fn readback_rgba8(&mut self, plan: &RenderPlan) -> LayerkitResult<FrameRGBA> {
        self.calls.push("readback_rgba8");
        Ok(FrameRGBA {
            width: plan.size.width,
            height: plan.size.height,
            data: vec![0; plan.size.rgba8_len()],
            premultiplied: true,
        })
    }
}

fn glass_like_plan() -> RenderPlan {
    RenderPlan {
        size: PixelSize::new(4, 3),
        passes: vec![
            Pass::Backdrop(BackdropPass {
                blur: Blur::from_radius(4.0).unwrap(),
            }),
            Pass::Scene(ScenePass {
                ops: Vec::<DrawOp>::new(),
            }),
            Pass::Noise(NoisePass { opacity: 0.1 }),
            Pass::Scene(ScenePass::default()),
        ],
    }
}

#[test]
fn execute_plan_calls_in_expected_order() {
    let mut backend = MockBackend::default();
    let out = execute_plan(&mut backend, &glass_like_plan()).unwrap();
    assert_eq!((out.width, out.height), (4, 3));
    assert!(out.premultiplied);
    assert_eq!(
        backend.calls,
        [
            "begin",
            "exec_backdrop",
            "exec_scene",
            "exec_noise",
            "exec_scene",
            "readback_rgba8"
        ]
    );
}

#[test]
fn execute_plan_stops_at_first_error() {
    let mut backend = MockBackend {
        fail_noise: true,
        ..MockBackend::default()
    };
    assert!(execute_plan(&mut backend, &glass_like_plan()).is_err());
    assert_eq!(backend.calls.last(), Some(&"exec_noise"));
}

#[test]
fn default_settings_are_transparent_with_gray_placeholder() {
    let s = RenderSettings::default();
    assert_eq!(s.clear_premul(), [0, 0, 0, 0]);
    assert_eq!(s.placeholder.to_rgba8_straight(), [128, 128, 128, 255]);
    assert_eq!(s.noise_seed, DEFAULT_NOISE_SEED);

    let opaque = RenderSettings {
        clear_rgba: Some([255, 0, 0, 255]),
        ..RenderSettings::default()
    };
    assert_eq!(opaque.clear_premul(), [255, 0, 0, 255]);
}

#[test]
fn frame_pixel_access_and_unpremultiply() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![0, 0, 0, 0, 64, 0, 0, 128],
        premultiplied: true,
    };
    assert_eq!(frame.pixel(1, 0), Some([64, 0, 0, 128]));
    assert_eq!(frame.pixel(2, 0), None);
    let straight = frame.to_straight_rgba8();
    assert_eq!(straight[3], 0);
    assert_eq!(&straight[4..], &[128, 0, 0, 128]);
}
