use super::*;

#[test]
fn unpremultiply_restores_straight_channels() {
    let f = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![64, 32, 0, 128, 10, 20, 30, 255],
        premultiplied: true,
    };
    let out = f.to_straight_rgba8();
    assert_eq!(&out[..4], &[128, 64, 0, 128]);
    assert_eq!(&out[4..], &[10, 20, 30, 255]);
    assert_eq!(f.pixel(1, 0), [10, 20, 30, 255]);
}

#[test]
fn straight_frames_are_copied_verbatim() {
    let f = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![200, 100, 50, 10],
        premultiplied: false,
    };
    assert_eq!(f.to_straight_rgba8(), vec![200, 100, 50, 10]);
}
