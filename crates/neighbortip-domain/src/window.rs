//! Sweep window - the FIDs surrounding a center value

use crate::fid::Fid;

/// Number of FIDs looked up on each side of the center
pub const SWEEP_RADIUS: u64 = 5;

/// Size of a full window (both sides plus the center)
pub const SWEEP_WIDTH: usize = (2 * SWEEP_RADIUS + 1) as usize;

/// The range `[center - 5, center + 5]` with non-positive values dropped
///
/// Candidates are always produced in ascending order: the FIDs below the
/// center, the center itself, then the FIDs above it.
///
/// # Examples
///
/// ```
/// use neighbortip_domain::{Fid, SweepWindow};
///
/// let window = SweepWindow::new(Fid::new(3).unwrap());
/// let values: Vec<u64> = window.candidates().iter().map(|f| f.value()).collect();
/// assert_eq!(values, vec![1, 2, 3, 4, 5, 6, 7, 8]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepWindow {
    center: Fid,
}

impl SweepWindow {
    /// Create the window around a center
    pub fn new(center: Fid) -> Self {
        Self { center }
    }

    /// The center FID
    pub fn center(&self) -> Fid {
        self.center
    }

    /// Candidates strictly below the center, skipping anything below 1
    pub fn below(&self) -> impl Iterator<Item = Fid> {
        let center = self.center.value();
        let start = center.saturating_sub(SWEEP_RADIUS).max(1);
        (start..center).map(Fid::from_value)
    }

    /// Candidates strictly above the center
    pub fn above(&self) -> impl Iterator<Item = Fid> {
        let center = self.center.value();
        let end = center.saturating_add(SWEEP_RADIUS);
        (center.saturating_add(1)..=end)
            .filter(move |v| *v > center)
            .map(Fid::from_value)
    }

    /// Every candidate in lookup order
    pub fn candidates(&self) -> Vec<Fid> {
        self.below()
            .chain(std::iter::once(self.center))
            .chain(self.above())
            .collect()
    }

    /// Number of lookups a sweep over this window performs
    pub fn len(&self) -> usize {
        self.below().count() + 1 + self.above().count()
    }

    /// Always false: the center is part of every window
    pub fn is_empty(&self) -> bool {
        false
    }
}
