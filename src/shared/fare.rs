use serde::{Deserialize, Serialize};

use crate::shared::geo::Distance;

/// One fare slab: every trip up to `ceiling_km` costs `fare`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareSlab {
    pub ceiling_km: f64,
    pub fare: u32,
}

/// Step function from trip distance to fare.
///
/// Slabs are kept in ascending ceiling order. Distances above the last
/// ceiling are charged `overflow_fare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareTable {
    slabs: Vec<FareSlab>,
    overflow_fare: u32,
}

const DEFAULT_SLABS: [(f64, u32); 15] = [
    (2.0, 6),
    (4.0, 12),
    (6.0, 18),
    (8.0, 23),
    (10.0, 23),
    (12.0, 24),
    (14.0, 24),
    (16.0, 28),
    (18.0, 28),
    (20.0, 28),
    (22.0, 30),
    (24.0, 30),
    (26.0, 30),
    (28.0, 30),
    (30.0, 30),
];
const DEFAULT_OVERFLOW_FARE: u32 = 32;

impl Default for FareTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_SLABS
                .iter()
                .map(|&(ceiling_km, fare)| FareSlab { ceiling_km, fare }),
            DEFAULT_OVERFLOW_FARE,
        )
    }
}

impl FareTable {
    pub fn new<I>(slabs: I, overflow_fare: u32) -> Self
    where
        I: IntoIterator<Item = FareSlab>,
    {
        let mut slabs: Vec<FareSlab> = slabs.into_iter().collect();
        slabs.sort_by(|a, b| a.ceiling_km.total_cmp(&b.ceiling_km));
        Self {
            slabs,
            overflow_fare,
        }
    }

    pub fn slabs(&self) -> &[FareSlab] {
        &self.slabs
    }

    pub fn overflow_fare(&self) -> u32 {
        self.overflow_fare
    }

    pub fn fare_for_km(&self, km: f64) -> u32 {
        self.slabs
            .iter()
            .find(|slab| km <= slab.ceiling_km)
            .map(|slab| slab.fare)
            .unwrap_or(self.overflow_fare)
    }

    pub fn fare(&self, distance: Distance) -> u32 {
        self.fare_for_km(distance.as_kilometers())
    }
}

/// Fare for a trip of `km` kilometers using the default slabs.
pub fn fare(km: f64) -> u32 {
    FareTable::default().fare_for_km(km)
}

#[test]
fn fare_boundaries_test() {
    assert_eq!(fare(0.0), 6);
    assert_eq!(fare(2.0), 6);
    assert_eq!(fare(2.01), 12);
    assert_eq!(fare(30.0), 30);
    assert_eq!(fare(31.0), 32);
}

#[test]
fn fare_unsorted_slabs_test() {
    let table = FareTable::new(
        [
            FareSlab {
                ceiling_km: 10.0,
                fare: 20,
            },
            FareSlab {
                ceiling_km: 5.0,
                fare: 10,
            },
        ],
        25,
    );
    assert_eq!(table.fare_for_km(4.0), 10);
    assert_eq!(table.fare_for_km(7.5), 20);
    assert_eq!(table.fare(Distance::from_kilometers(11.0)), 25);
}
