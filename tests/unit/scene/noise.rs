use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn build(params: NoiseParams, seed: u64) -> NoiseTexture {
    let mut rng = StdRng::seed_from_u64(seed);
    NoiseTexture::build(&params, &mut rng).unwrap()
}

#[test]
fn default_texture_is_opaque_grayscale() {
    let tex = build(NoiseParams::default(), 7);
    assert_eq!(tex.size(), 128);
    assert_eq!(tex.as_bytes().len(), 128 * 128 * 4);
    for px in tex.as_bytes().chunks_exact(4) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_eq!(px[3], 255);
    }
}

#[test]
fn default_contrast_saturates_some_texels() {
    let tex = build(NoiseParams::default(), 11);
    let bytes = tex.as_bytes();
    assert!(bytes.chunks_exact(4).any(|px| px[0] == 0));
    assert!(bytes.chunks_exact(4).any(|px| px[0] == 255));
}

#[test]
fn binarized_texture_has_exactly_two_levels() {
    let tex = build(
        NoiseParams {
            binarize: true,
            ..NoiseParams::default()
        },
        3,
    );
    let mut seen = std::collections::BTreeSet::new();
    for px in tex.as_bytes().chunks_exact(4) {
        seen.insert(px[0]);
    }
    assert_eq!(
        seen.into_iter().collect::<Vec<_>>(),
        vec![BINARY_LOW, BINARY_HIGH]
    );
}

#[test]
fn blocks_share_one_value_and_are_clipped_at_edges() {
    let tex = build(
        NoiseParams {
            size: 10,
            block_size: 4,
            ..NoiseParams::default()
        },
        5,
    );
    for (bx, by) in [(0u32, 0u32), (4, 4), (8, 8), (8, 0)] {
        let v = tex.pixel(bx, by);
        for y in by..(by + 4).min(10) {
            for x in bx..(bx + 4).min(10) {
                assert_eq!(tex.pixel(x, y), v);
            }
        }
    }
}

#[test]
fn zero_block_size_means_per_texel() {
    let a = build(
        NoiseParams {
            size: 16,
            block_size: 0,
            ..NoiseParams::default()
        },
        9,
    );
    let b = build(
        NoiseParams {
            size: 16,
            block_size: 1,
            ..NoiseParams::default()
        },
        9,
    );
    assert_eq!(a, b);
}

#[test]
fn texel_mapping_matches_contrast_curve() {
    assert_eq!(texel_value(0.0, 2.0, false), 128);
    assert_eq!(texel_value(-0.5, 1.0, false), 0);
    assert_eq!(texel_value(0.3, 2.0, false), 255);
    assert_eq!(texel_value(0.1, 1.0, false), 153);
    assert_eq!(texel_value(0.01, 1.0, true), BINARY_HIGH);
    assert_eq!(texel_value(-0.1, 1.0, true), BINARY_LOW);
}

#[test]
fn invalid_params_are_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    let bad_size = NoiseParams {
        size: 0,
        ..NoiseParams::default()
    };
    assert!(NoiseTexture::build(&bad_size, &mut rng).is_err());
    let bad_contrast = NoiseParams {
        contrast: f64::NAN,
        ..NoiseParams::default()
    };
    assert!(NoiseTexture::build(&bad_contrast, &mut rng).is_err());
}
