//! Rasterizers for the canopy building blocks: horizontal rings/discs and
//! straight voxel lines.

use glam::IVec3;

/// Cells of a horizontal ring centred on `center`, at `center.y`.
///
/// A cell at squared horizontal distance `d` is included when
/// `inner² <= d <= outer²`; `inner = 0` gives a filled disc. Cells are
/// yielded x-major, z-minor.
pub fn ring(center: IVec3, outer: i32, inner: i32) -> impl Iterator<Item = IVec3> {
    let outer_sq = outer * outer;
    let inner_sq = inner * inner;
    let reach = outer + 1;
    (-reach..=reach).flat_map(move |dx| {
        (-reach..=reach).filter_map(move |dz| {
            let d = dx * dx + dz * dz;
            (d <= outer_sq && d >= inner_sq).then(|| center + IVec3::new(dx, 0, dz))
        })
    })
}

/// Cells of a straight line from `from` to `to`, both ends included.
///
/// Steps one voxel at a time along the axis with the largest extent and
/// rounds the other two axes. Returns nothing when the endpoints coincide.
pub fn line(from: IVec3, to: IVec3) -> Vec<IVec3> {
    let delta = to - from;
    let d = delta.to_array();
    let start = from.to_array();

    let mut major = 0;
    for axis in 1..3 {
        if d[axis].abs() > d[major].abs() {
            major = axis;
        }
    }
    if d[major] == 0 {
        return Vec::new();
    }

    let (a, b) = match major {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };
    let step = d[major].signum();
    let slope_a = d[a] as f64 / d[major] as f64;
    let slope_b = d[b] as f64 / d[major] as f64;

    let mut cells = Vec::with_capacity(d[major].unsigned_abs() as usize + 1);
    let mut k = 0;
    let end = d[major] + step;
    while k != end {
        let mut cell = [0; 3];
        cell[major] = start[major] + k;
        cell[a] = (start[a] as f64 + k as f64 * slope_a + 0.5).floor() as i32;
        cell[b] = (start[b] as f64 + k as f64 * slope_b + 0.5).floor() as i32;
        cells.push(IVec3::from_array(cell));
        k += step;
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_radius_one() {
        let cells: Vec<_> = ring(IVec3::new(5, 3, 5), 1, 0).collect();
        assert_eq!(cells.len(), 5);
        assert!(cells.iter().all(|c| c.y == 3));
        assert!(cells.contains(&IVec3::new(5, 3, 5)));
        assert!(!cells.contains(&IVec3::new(6, 3, 6)));
    }

    #[test]
    fn test_ring_excludes_inner() {
        let cells: Vec<_> = ring(IVec3::ZERO, 2, 1).collect();
        // 13 cells within r=2, minus the centre (d=0 < 1)
        assert_eq!(cells.len(), 12);
        assert!(!cells.contains(&IVec3::ZERO));
        assert!(cells.contains(&IVec3::new(2, 0, 0)));
    }

    #[test]
    fn test_line_axis_aligned() {
        let cells = line(IVec3::new(0, 4, 0), IVec3::new(3, 4, 0));
        assert_eq!(cells, vec![
            IVec3::new(0, 4, 0),
            IVec3::new(1, 4, 0),
            IVec3::new(2, 4, 0),
            IVec3::new(3, 4, 0),
        ]);
    }

    #[test]
    fn test_line_negative_diagonal() {
        let cells = line(IVec3::new(0, 0, 0), IVec3::new(-2, 0, -2));
        assert_eq!(cells, vec![
            IVec3::new(0, 0, 0),
            IVec3::new(-1, 0, -1),
            IVec3::new(-2, 0, -2),
        ]);
    }

    #[test]
    fn test_line_reaches_both_ends() {
        let from = IVec3::new(10, 20, 10);
        let to = IVec3::new(13, 24, 7);
        let cells = line(from, to);
        assert_eq!(cells.len(), 5); // y is the major axis
        assert_eq!(cells.first(), Some(&from));
        assert_eq!(cells.last(), Some(&to));
        // One step per voxel along the major axis
        assert!(cells.windows(2).all(|w| (w[1].y - w[0].y) == 1));
    }

    #[test]
    fn test_degenerate_line() {
        assert!(line(IVec3::ONE, IVec3::ONE).is_empty());
    }
}
