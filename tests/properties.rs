mod common;

use common::synthetic_raster::{content_hash, pattern_raster};
use ndarray::arr2;
use pixel_effects::filters::{self, ConvolutionKernel, DEFAULT_REPLACE_THRESHOLD};
use pixel_effects::{apply_effect, Color, Effect, FilterError, Raster};

fn all_effects() -> Vec<Effect> {
    vec![
        Effect::color_replace_with_defaults(0xFF25_0B35, 0),
        Effect::HueScale { level: 3 },
        Effect::Emboss,
        Effect::Smooth { value: 4.0 },
        Effect::Brightness { delta: -60 },
        Effect::Snow { color_max: 180, seed: 11, preserve_depth: false },
    ]
}

#[test]
fn filters_never_mutate_their_input() {
    let src = pattern_raster(9, 6);
    let before = content_hash(&src);

    for effect in all_effects() {
        let out = apply_effect(Some(&src), &effect).unwrap();
        assert_eq!(out.width(), src.width(), "{:?} changed width", effect);
        assert_eq!(out.height(), src.height(), "{:?} changed height", effect);
        assert_eq!(content_hash(&src), before, "{:?} mutated its input", effect);
    }
}

#[test]
fn missing_source_is_null_input() {
    for effect in all_effects() {
        assert_eq!(apply_effect(None, &effect), Err(FilterError::NullInput));
    }
}

#[test]
fn color_replace_only_touches_matching_pixels() {
    let src = pattern_raster(12, 12);
    let from = Color::rgb(120, 90, 60);
    let to = Color::argb(10, 1, 2, 3);
    let result = filters::color_replace(&src, from, to, DEFAULT_REPLACE_THRESHOLD);

    for y in 0..12 {
        for x in 0..12 {
            let px = src.get_pixel(x, y).unwrap();
            let matches = px.r.abs_diff(from.r) <= 60
                && px.g.abs_diff(from.g) <= 60
                && px.b.abs_diff(from.b) <= 60;
            let expected = if matches { to } else { px };
            assert_eq!(result.get_pixel(x, y).unwrap(), expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn color_replace_matches_regardless_of_from_alpha() {
    // A transparent `from` still compares on RGB only, and an unset `to`
    // falls back to white through the menu defaults.
    let effect = Effect::color_replace_with_defaults(0x0000_0001, 0);
    let src = Raster::from_argb_pixels(
        3,
        1,
        &[
            Color::argb(0, 10, 5, 3).into(),
            Color::argb(0x80, 10, 5, 3).into(),
            Color::argb(255, 80, 0, 0).into(),
        ],
    )
    .unwrap();

    let result = apply_effect(Some(&src), &effect).unwrap();
    assert_eq!(result.get_pixel(0, 0).unwrap(), Color::WHITE);
    assert_eq!(result.get_pixel(1, 0).unwrap(), Color::WHITE);
    assert_eq!(result.get_pixel(2, 0).unwrap(), Color::argb(255, 80, 0, 0));
}

#[test]
fn emboss_equals_hand_built_kernel_on_patterned_input() {
    let src = pattern_raster(7, 5);
    let kernel = ConvolutionKernel::new(
        arr2(&[[-1.0, 0.0, -1.0], [0.0, 4.0, 0.0], [-1.0, 0.0, -1.0]]),
        1.0,
        127.0,
    )
    .unwrap();
    let result = filters::emboss(&src).unwrap();
    assert_eq!(result, filters::apply_kernel(&src, &kernel).unwrap());

    for y in 0..5 {
        for x in 0..7 {
            assert_eq!(result.get_pixel(x, y).unwrap().a, src.get_pixel(x, y).unwrap().a);
        }
    }
}

#[test]
fn identity_kernel_round_trip() {
    let src = pattern_raster(8, 5);
    let kernel = ConvolutionKernel::new(
        arr2(&[[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]),
        1.0,
        0.0,
    )
    .unwrap();
    let result = filters::apply_kernel(&src, &kernel).unwrap();
    assert_eq!(result, src);
}

#[test]
fn brightness_identity_and_inverse() {
    let src = pattern_raster(10, 10);
    assert_eq!(filters::brightness(&src, 0).unwrap(), src);

    let mid = Raster::filled(1, 1, Color::argb(90, 100, 150, 200)).unwrap();
    let there = filters::brightness(&mid, 50).unwrap();
    let back = filters::brightness(&there, -50).unwrap();
    assert_eq!(back, mid);

    let bright = Raster::filled(1, 1, Color::argb(90, 240, 150, 10)).unwrap();
    let there = filters::brightness(&bright, 50).unwrap();
    assert_eq!(there.get_pixel(0, 0).unwrap(), Color::argb(90, 255, 200, 60));
    let back = filters::brightness(&there, -50).unwrap();
    assert_eq!(back.get_pixel(0, 0).unwrap(), Color::argb(90, 205, 150, 10));
}

#[test]
fn snow_zero_ceiling_is_rejected() {
    let src = pattern_raster(4, 4);
    let err = filters::snow(&src, 0, 1, false).unwrap_err();
    assert!(matches!(err, FilterError::InvalidParameter { name: "color_max", .. }));
}

#[test]
fn hue_scale_level_one_sets_only_alpha_bits() {
    let src = pattern_raster(7, 7);
    let result = filters::hue_scale(&src, 1);

    for y in 0..7 {
        for x in 0..7 {
            let before = src.get_pixel(x, y).unwrap().to_argb_u32();
            let after = result.get_pixel(x, y).unwrap().to_argb_u32();
            // OR compositing can only add bits, and alpha always ends up opaque.
            assert_eq!(after & before, before, "pixel ({x}, {y}) lost bits");
            assert_eq!(after >> 24, 0xFF);
        }
    }
}

#[test]
fn filters_run_concurrently_on_shared_input() {
    let src = pattern_raster(16, 16);
    let expected = filters::smooth(&src, 2.0).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| filters::smooth(&src, 2.0).unwrap())).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
