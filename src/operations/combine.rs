use crate::math::Point2;

/// Squared distance under which a sequence's leading point duplicates the path end.
pub const JOIN_TOLERANCE_SQ: f64 = 1e-12;

/// Stitches ordered point sequences into one continuous path.
///
/// The first non-empty sequence is taken as is. Each following sequence is
/// appended forward when its first point is at least as close to the path's
/// current end as its last point, otherwise reversed. The appended run's
/// leading point is dropped when it coincides with the path end, so shared
/// junction points appear once.
#[must_use]
pub fn combine(sequences: &[&[Point2]]) -> Vec<Point2> {
    let total: usize = sequences.iter().map(|s| s.len()).sum();
    let mut path: Vec<Point2> = Vec::with_capacity(total);

    for seq in sequences.iter().filter(|s| !s.is_empty()) {
        let Some(end) = path.last().copied() else {
            path.extend_from_slice(seq);
            continue;
        };

        let (first, last) = (seq[0], seq[seq.len() - 1]);
        let forward = (first - end).norm_squared() <= (last - end).norm_squared();
        let run: Box<dyn Iterator<Item = &Point2>> = if forward {
            Box::new(seq.iter())
        } else {
            Box::new(seq.iter().rev())
        };

        let mut run = run.peekable();
        if run
            .peek()
            .is_some_and(|p| (*p - end).norm_squared() < JOIN_TOLERANCE_SQ)
        {
            run.next();
        }
        path.extend(run.copied());
    }

    path
}
