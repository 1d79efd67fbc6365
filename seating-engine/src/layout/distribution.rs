//! Seat distribution across the sides of rectangular and square tables

use serde::Serialize;

/// Table side, in seat assignment order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Number of seats on each side of a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SideDistribution {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

/// Where a seat index lands on a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideSlot {
    pub side: Side,
    /// Position within the side, counted from the side's start
    pub slot: i32,
    /// Seats sharing this side
    pub count: i32,
}

impl SideDistribution {
    pub fn total(&self) -> i32 {
        self.top + self.right + self.bottom + self.left
    }

    /// Widest of the two horizontal sides
    pub fn horizontal(&self) -> i32 {
        self.top.max(self.bottom)
    }

    /// Tallest of the two vertical sides
    pub fn vertical(&self) -> i32 {
        self.left.max(self.right)
    }

    pub fn count(&self, side: Side) -> i32 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    /// Map a seat index onto a side
    ///
    /// Index ranges are contiguous in the order top, right, bottom, left.
    /// Returns `None` outside `[0, total)`.
    pub fn slot_of(&self, index: i32) -> Option<SideSlot> {
        if index < 0 {
            return None;
        }
        let mut start = 0;
        for side in [Side::Top, Side::Right, Side::Bottom, Side::Left] {
            let count = self.count(side);
            if index < start + count {
                return Some(SideSlot {
                    side,
                    slot: index - start,
                    count,
                });
            }
            start += count;
        }
        None
    }
}

/// Split `total_seats` across the four sides of a table
///
/// - fewer than one seat: every side is empty
/// - square: an even split, the remainder going to top, right, bottom, left in order
/// - rectangular with exactly 8 seats: 3 / 1 / 3 / 1
/// - any other rectangle: top and bottom only, top takes the odd seat
pub fn distribute(total_seats: i32, is_square: bool) -> SideDistribution {
    if total_seats < 1 {
        return SideDistribution::default();
    }

    if is_square {
        let base = total_seats / 4;
        let extra = total_seats % 4;
        let share = |position: i32| base + i32::from(position < extra);
        return SideDistribution {
            top: share(0),
            right: share(1),
            bottom: share(2),
            left: share(3),
        };
    }

    if total_seats == 8 {
        return SideDistribution {
            top: 3,
            right: 1,
            bottom: 3,
            left: 1,
        };
    }

    SideDistribution {
        top: (total_seats + 1) / 2,
        right: 0,
        bottom: total_seats / 2,
        left: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_matches_total() {
        for n in 0..=200 {
            for is_square in [true, false] {
                assert_eq!(distribute(n, is_square).total(), n, "n={n} square={is_square}");
            }
        }
    }

    #[test]
    fn test_non_positive_is_empty() {
        assert_eq!(distribute(0, true), SideDistribution::default());
        assert_eq!(distribute(-4, false), SideDistribution::default());
    }

    #[test]
    fn test_square_ten_seats() {
        let d = distribute(10, true);
        assert_eq!(
            d,
            SideDistribution {
                top: 3,
                right: 3,
                bottom: 2,
                left: 2
            }
        );
    }

    #[test]
    fn test_rectangular_eight_seats_special_case() {
        let d = distribute(8, false);
        assert_eq!(
            d,
            SideDistribution {
                top: 3,
                right: 1,
                bottom: 3,
                left: 1
            }
        );
    }

    #[test]
    fn test_square_eight_seats_is_even() {
        let d = distribute(8, true);
        assert_eq!((d.top, d.right, d.bottom, d.left), (2, 2, 2, 2));
    }

    #[test]
    fn test_rectangular_top_bottom_only() {
        let d = distribute(7, false);
        assert_eq!((d.top, d.right, d.bottom, d.left), (4, 0, 3, 0));

        let d = distribute(1, false);
        assert_eq!((d.top, d.bottom), (1, 0));
    }

    #[test]
    fn test_slot_ranges_are_contiguous() {
        for n in 0..=40 {
            for is_square in [true, false] {
                let d = distribute(n, is_square);
                let mut previous: Option<Side> = None;
                let mut seen = std::collections::HashSet::new();
                for index in 0..n {
                    let slot = d.slot_of(index).unwrap();
                    assert!(slot.slot >= 0 && slot.slot < slot.count);
                    // once a side is left it is never revisited
                    if previous != Some(slot.side) {
                        assert!(seen.insert(slot.side), "side {:?} split", slot.side);
                    }
                    previous = Some(slot.side);
                }
                assert!(d.slot_of(n).is_none());
                assert!(d.slot_of(-1).is_none());
            }
        }
    }

    #[test]
    fn test_slot_order_top_right_bottom_left() {
        let d = distribute(10, true);
        assert_eq!(d.slot_of(0).unwrap().side, Side::Top);
        assert_eq!(d.slot_of(2).unwrap().side, Side::Top);
        assert_eq!(d.slot_of(3).unwrap().side, Side::Right);
        assert_eq!(d.slot_of(6).unwrap().side, Side::Bottom);
        assert_eq!(d.slot_of(8).unwrap().side, Side::Left);
        assert_eq!(d.slot_of(9).unwrap().slot, 1);
    }
}
