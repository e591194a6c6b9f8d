pub(crate) fn f64_from_usize(x: usize) -> f64 {
    // bin counts stay far below 2^32
    f64::from(u32::try_from(x).unwrap_or(u32::MAX))
}
