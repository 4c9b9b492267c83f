use super::*;

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(0, 200), 0);
    assert_eq!(mul_div255_u8(100, 128), 50);
}

#[test]
fn add_saturates() {
    assert_eq!(add_sat_u8(200, 100), 255);
    assert_eq!(add_sat_u8(1, 2), 3);
}

#[test]
fn wrap_mod_stays_in_half_open_range() {
    let m = 768.0;
    for v in [-1e9, -768.0, -1.5, -1e-17, 0.0, 1.0, 767.999, 768.0, 1e12] {
        let r = wrap_mod(v, m);
        assert!((0.0..m).contains(&r), "{v} -> {r}");
    }
    assert!((wrap_mod(-1.5, m) - 766.5).abs() < 1e-9);
    assert!((wrap_mod(770.0, m) - 2.0).abs() < 1e-9);
}
