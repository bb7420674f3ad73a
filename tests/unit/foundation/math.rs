use super::*;

#[test]
fn fnv_chains_across_writes() {
    let whole = fnv1a(FNV_OFFSET, b"layerkit");
    let split = fnv1a(fnv1a(FNV_OFFSET, b"layer"), b"kit");
    assert_eq!(whole, split);
    assert_eq!(fnv1a(FNV_OFFSET, b""), FNV_OFFSET);
}

#[test]
fn hash_unit_is_deterministic_and_in_range() {
    for y in 0..8 {
        for x in 0..8 {
            let v = hash_unit(7, x, y);
            assert!((0.0..1.0).contains(&v));
            assert_eq!(v, hash_unit(7, x, y));
        }
    }
    assert_ne!(hash_unit(7, 1, 2), hash_unit(8, 1, 2));
}

#[test]
fn unit_to_u8_clamps() {
    assert_eq!(unit_to_u8(-1.0), 0);
    assert_eq!(unit_to_u8(0.5), 128);
    assert_eq!(unit_to_u8(2.0), 255);
    assert_eq!(mul_div255(255, 255), 255);
    assert_eq!(mul_div255(0, 200), 0);
}
