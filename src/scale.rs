/// Linearly remaps `value` from `[src_min, src_max]` onto `[dest_min, dest_max]`.
///
/// `src_min` and `src_max` must differ. Equal source bounds divide by zero and
/// the result is `NaN` or infinite; nothing checks for it.
pub fn scale(value: f64, src_min: f64, src_max: f64, dest_min: f64, dest_max: f64) -> f64 {
    ((value - src_min) * (dest_max - dest_min) + dest_min * src_max - dest_min * src_min)
        / (src_max - src_min)
}
