// Step interpolation within one series projection

/// Carry the last observed value forward into absent slots and backfill the
/// leading run with the first observed value. A projection with no values
/// comes back unchanged.
pub fn fill_gaps(aligned: &[Option<f64>]) -> Vec<Option<f64>> {
    let Some(mut last) = aligned.iter().flatten().next().copied() else {
        return aligned.to_vec();
    };

    aligned
        .iter()
        .map(|slot| {
            if let Some(value) = slot {
                last = *value;
            }
            Some(last)
        })
        .collect()
}
