//! Floor layout contract.
//!
//! The simulator never models building geometry itself.  Everything it needs
//! from the building is the height of each floor's landing and the reverse
//! lookup from a height to the floor whose band contains it.

/// Height lookups for the floors of a building.
///
/// Floors are numbered `0..floor_count()` from the ground up.  Requests use
/// `i32` so that negative input can be represented and refused.
pub trait FloorLayout {
    /// Number of floors served.
    fn floor_count(&self) -> usize;

    /// World height of the base of `floor`, or `None` if it does not exist.
    fn floor_height(&self, floor: i32) -> Option<f32>;

    /// The floor whose height band contains `height`, or `None` when the
    /// height is below the ground floor or above the roof.
    fn floor_for_height(&self, height: f32) -> Option<i32>;

    /// `true` if `floor` is a valid floor index.
    #[inline]
    fn contains_floor(&self, floor: i32) -> bool {
        floor >= 0 && (floor as usize) < self.floor_count()
    }
}

/// A building whose storeys all have the same height.
///
/// Floor `n` occupies the band `[ground + n * storey, ground + (n+1) * storey)`.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformFloors {
    floor_count:   usize,
    storey_height: f32,
    ground_height: f32,
}

impl UniformFloors {
    pub fn new(floor_count: usize, storey_height: f32, ground_height: f32) -> Self {
        Self { floor_count, storey_height, ground_height }
    }

    #[inline]
    pub fn storey_height(&self) -> f32 {
        self.storey_height
    }

    /// Height of the roof (top of the highest band).
    #[inline]
    pub fn roof_height(&self) -> f32 {
        self.ground_height + self.floor_count as f32 * self.storey_height
    }
}

impl FloorLayout for UniformFloors {
    fn floor_count(&self) -> usize {
        self.floor_count
    }

    fn floor_height(&self, floor: i32) -> Option<f32> {
        if !self.contains_floor(floor) {
            return None;
        }
        Some(self.ground_height + floor as f32 * self.storey_height)
    }

    fn floor_for_height(&self, height: f32) -> Option<i32> {
        if self.storey_height <= 0.0 || height < self.ground_height || height > self.roof_height() {
            return None;
        }
        let band = ((height - self.ground_height) / self.storey_height).floor() as i32;
        // The roof itself belongs to the top floor.
        Some(band.min(self.floor_count as i32 - 1))
    }
}
