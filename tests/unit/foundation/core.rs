use super::*;

#[test]
fn premultiply_rounds_to_nearest() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.to_array(), [128, 64, 0, 128]);
}

#[test]
fn css_alpha_quantizes_to_u8() {
    assert_eq!(Rgba::rgba(0, 0, 0, 0.25).alpha_u8(), 64);
    assert_eq!(Rgba::rgba(0, 0, 0, 2.0).alpha_u8(), 255);
    assert_eq!(Rgba::rgb(30, 30, 30).to_premul().to_array(), [30, 30, 30, 255]);
}

#[test]
fn lerp_hits_endpoints_and_midpoint() {
    let a = Rgba8Premul::from_straight_rgba(0, 0, 0, 255);
    let b = Rgba8Premul::from_straight_rgba(200, 100, 50, 255);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5).to_array(), [100, 50, 25, 255]);
    assert_eq!(a.lerp(b, 7.0), b);
}
