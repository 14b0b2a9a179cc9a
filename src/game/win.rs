use super::BoardLayout;
use crate::models::{ClaimVector, WinTally};

pub struct WinEvaluator;

impl WinEvaluator {
    /// Count the fully claimed rows, columns and diagonals.
    ///
    /// Positions missing from a short claim vector count as unclaimed and
    /// flags past the end of the grid are ignored. A square can complete a
    /// row and a diagonal at the same time; each line is counted on its own.
    pub fn check(claims: &ClaimVector, layout: &BoardLayout) -> WinTally {
        let side = layout.side();

        let horizontal = (0..side)
            .filter(|&row| is_complete(claims, layout.row_indices(row)))
            .count();
        let vertical = (0..side)
            .filter(|&column| is_complete(claims, layout.column_indices(column)))
            .count();
        let diagonal = (0..2)
            .filter(|&d| is_complete(claims, layout.diagonal_indices(d)))
            .count();

        WinTally::new(horizontal, vertical, diagonal)
    }
}

fn is_complete(claims: &ClaimVector, mut line: impl Iterator<Item = usize>) -> bool {
    line.all(|position| claims.is_claimed(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_at(positions: &[usize], len: usize) -> ClaimVector {
        let mut claims = ClaimVector::unclaimed(len);
        for &position in positions {
            claims.claim(position, len);
        }
        claims
    }

    fn layout() -> BoardLayout {
        BoardLayout::new(5).unwrap()
    }

    #[test]
    fn test_all_unclaimed() {
        let tally = WinEvaluator::check(&ClaimVector::unclaimed(25), &layout());
        assert_eq!(tally, WinTally::new(0, 0, 0));
    }

    #[test]
    fn test_all_claimed() {
        let tally = WinEvaluator::check(&ClaimVector::from(vec![true; 25]), &layout());
        assert_eq!(tally, WinTally::new(5, 5, 2));
    }

    #[test]
    fn test_single_row_any_position() {
        for row in 0..5 {
            let positions: Vec<usize> = layout().row_indices(row).collect();
            let tally = WinEvaluator::check(&claims_at(&positions, 25), &layout());
            assert_eq!(tally, WinTally::new(1, 0, 0), "row {}", row);
        }
    }

    #[test]
    fn test_single_column() {
        let tally = WinEvaluator::check(&claims_at(&[3, 8, 13, 18, 23], 25), &layout());
        assert_eq!(tally, WinTally::new(0, 1, 0));
    }

    #[test]
    fn test_main_diagonal() {
        let tally = WinEvaluator::check(&claims_at(&[0, 6, 12, 18, 24], 25), &layout());
        assert_eq!(tally, WinTally::new(0, 0, 1));
    }

    #[test]
    fn test_both_diagonals() {
        let tally = WinEvaluator::check(
            &claims_at(&[0, 6, 12, 18, 24, 4, 8, 16, 20], 25),
            &layout(),
        );
        assert_eq!(tally, WinTally::new(0, 0, 2));
    }

    #[test]
    fn test_row_and_diagonal_share_a_square() {
        let tally = WinEvaluator::check(
            &claims_at(&[0, 1, 2, 3, 4, 6, 12, 18, 24], 25),
            &layout(),
        );
        assert_eq!(tally, WinTally::new(1, 0, 1));
    }

    #[test]
    fn test_short_vector_treated_as_unclaimed() {
        // Only the first row is present in the stored flags
        let tally = WinEvaluator::check(&ClaimVector::from(vec![true; 5]), &layout());
        assert_eq!(tally, WinTally::new(1, 0, 0));

        let tally = WinEvaluator::check(&ClaimVector::default(), &layout());
        assert_eq!(tally, WinTally::default());
    }

    #[test]
    fn test_excess_flags_ignored() {
        let mut flags = vec![false; 30];
        flags[25..].iter_mut().for_each(|flag| *flag = true);
        let tally = WinEvaluator::check(&ClaimVector::from(flags), &layout());
        assert_eq!(tally, WinTally::default());
    }

    #[test]
    fn test_tally_bounds_for_other_sizes() {
        for side in 1..=6 {
            let layout = BoardLayout::new(side).unwrap();
            let count = layout.square_count();
            let every_other: Vec<usize> = (0..count).step_by(2).collect();

            let tally = WinEvaluator::check(&claims_at(&every_other, count), &layout);
            assert!(tally.horizontal <= side);
            assert!(tally.vertical <= side);
            assert!(tally.diagonal <= 2);

            let full = WinEvaluator::check(&ClaimVector::from(vec![true; count]), &layout);
            assert_eq!(full, WinTally::new(side, side, 2));
        }
    }
}
