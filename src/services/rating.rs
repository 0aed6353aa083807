/// Normalizes a raw rating onto the canonical 0-5 scale.
///
/// Producers are inconsistent about scale: the star picker writes 0-5 but
/// imported records sometimes carry 0-10 values. Anything above 5 is assumed
/// to be on the 10-point scale and halved. Missing or non-finite input maps
/// to 0 rather than erroring.
///
/// Note: new records are created with a 0-5 star control while imported data
/// may be 10-point, and a 10-point 4.8 is indistinguishable from a 5-point
/// 4.8. Known inconsistency; we normalize on read and do not try to guess
/// the producer's scale.
pub fn normalize_rating(raw: Option<f64>) -> f64 {
    let num = match raw {
        Some(n) if n.is_finite() => n,
        _ => return 0.0,
    };
    let scaled = if num > 5.0 { num / 2.0 } else { num };
    scaled.clamp(0.0, 5.0)
}
