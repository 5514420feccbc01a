//! Nearest-neighbour tour construction.

use greenroute_core::{DistanceMatrix, Tour, TourError};

/// Build a tour by always moving to the closest unvisited stop.
///
/// The tour starts at the depot (stop 0). Ties go to the lowest stop index,
/// so the result is deterministic. Runs in `O(n²)`.
///
/// # Errors
/// Returns [`TourError`] only if the produced order is not a permutation,
/// which indicates a bug rather than bad input.
///
/// # Examples
/// ```
/// use greenroute_core::DistanceMatrix;
/// use greenroute_solver::nearest_neighbour;
///
/// // Stops on a line at 0, 3, 1 and 2.
/// let positions = [0_u64, 3, 1, 2];
/// let matrix = DistanceMatrix::from_fn(4, |a, b| positions[a].abs_diff(positions[b]));
/// let tour = nearest_neighbour(&matrix)?;
/// assert_eq!(tour.as_slice(), &[0, 2, 3, 1]);
/// # Ok::<(), greenroute_core::TourError>(())
/// ```
pub fn nearest_neighbour(matrix: &DistanceMatrix) -> Result<Tour, TourError> {
    let size = matrix.len();
    if size < 2 {
        return Ok(Tour::identity(size));
    }

    let mut visited = vec![false; size];
    let mut order = Vec::with_capacity(size);
    let mut current = 0_usize;
    mark(&mut visited, current);
    order.push(current);

    while order.len() < size {
        let Some(next) = (0..size)
            .filter(|&candidate| visited.get(candidate) == Some(&false))
            .min_by_key(|&candidate| (matrix.cost(current, candidate), candidate))
        else {
            break;
        };
        mark(&mut visited, next);
        order.push(next);
        current = next;
    }

    Tour::for_stops(order, size)
}

fn mark(visited: &mut [bool], stop: usize) {
    if let Some(flag) = visited.get_mut(stop) {
        *flag = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenroute_core::{Cost, DistanceMetric, DistanceModel};
    use greenroute_core::test_support::{square_stops, stops};
    use rstest::rstest;

    #[rstest]
    #[case(0, Vec::new())]
    #[case(1, vec![0])]
    fn degenerate_sizes_return_identity(#[case] size: usize, #[case] expected: Vec<usize>) {
        let matrix = DistanceMatrix::from_fn(size, |_, _| 1);
        let tour = nearest_neighbour(&matrix).expect("trivial tour");
        assert_eq!(tour.into_inner(), expected);
    }

    #[rstest]
    fn ties_prefer_lowest_index() {
        let matrix = DistanceMatrix::from_fn(4, |_, _| 5);
        let tour = nearest_neighbour(&matrix).expect("valid tour");
        assert_eq!(tour.as_slice(), &[0, 1, 2, 3]);
    }

    #[rstest]
    fn square_is_walked_along_its_sides() {
        let matrix = DistanceMetric::Euclidean
            .distance_matrix(&square_stops())
            .expect("euclidean model never fails");
        let tour = nearest_neighbour(&matrix).expect("valid tour");
        assert_eq!(tour.as_slice(), &[0, 1, 2, 3]);
        assert_eq!(tour.cost(&matrix), 3_000_000);
    }

    #[rstest]
    fn greedy_choice_can_be_suboptimal() {
        // Depot at 0 with stops at 1, -2 and 10 on one meridian.
        let matrix = DistanceMetric::Euclidean
            .distance_matrix(&stops(&[(0.0, 0.0), (0.0, 1.0), (0.0, -2.0), (0.0, 10.0)]))
            .expect("euclidean model never fails");
        let tour = nearest_neighbour(&matrix).expect("valid tour");
        assert_eq!(tour.as_slice(), &[0, 1, 2, 3]);
        let expected: Cost = 100_000 + 300_000 + 1_200_000;
        assert_eq!(tour.cost(&matrix), expected);
    }
}
