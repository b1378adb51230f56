//! Cumulative group displacement and its resolution into an item anchor.

use serde::Serialize;
use thiserror::Error;

/// Item at the viewport start and how far it has been scrolled past
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Anchor {
    pub position: usize,
    /// Pixels of `position` already scrolled out of view, always smaller
    /// than the item's size
    pub offset: u32,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    #[error("displacement {0} precedes the first item")]
    NegativeDisplacement(i64),

    #[error("no size known for position {position} with {remaining}px left to resolve")]
    UnknownExtent { position: usize, remaining: i64 },
}

/// Resolve `displacement` into an [`Anchor`], walking item sizes from
/// position 0.
///
/// Only displacements inside the extent covered by known sizes resolve; the
/// walk stops with [`AlignError::UnknownExtent`] at the first unknown size it
/// needs.
pub fn resolve_anchor<F>(displacement: i64, size_at: F) -> Result<Anchor, AlignError>
where
    F: Fn(usize) -> Option<u32>,
{
    if displacement < 0 {
        return Err(AlignError::NegativeDisplacement(displacement));
    }

    let mut remaining = displacement;
    let mut position = 0;
    while remaining > 0 {
        let size = size_at(position).ok_or(AlignError::UnknownExtent {
            position,
            remaining,
        })? as i64;
        if size > remaining {
            break;
        }
        remaining -= size;
        position += 1;
    }

    Ok(Anchor {
        position,
        offset: remaining as u32,
    })
}

/// [`resolve_anchor`] for items that all share `size`, without the walk
pub fn resolve_uniform(displacement: i64, size: u32) -> Result<Anchor, AlignError> {
    if displacement < 0 {
        return Err(AlignError::NegativeDisplacement(displacement));
    }
    if displacement == 0 {
        return Ok(Anchor::default());
    }
    if size == 0 {
        return Err(AlignError::UnknownExtent {
            position: 0,
            remaining: displacement,
        });
    }

    let size = size as i64;
    Ok(Anchor {
        position: (displacement / size) as usize,
        offset: (displacement % size) as u32,
    })
}

/// Tracks the total distance the group has scrolled
#[derive(Debug, Clone, Copy, Default)]
pub struct Accountant {
    displacement: i64,
}

impl Accountant {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn displacement(&self) -> i64 {
        self.displacement
    }

    /// Account for a delta accepted from the driver
    #[inline]
    pub fn advance(&mut self, delta: i32) {
        self.displacement += delta as i64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(size: u32) -> impl Fn(usize) -> Option<u32> {
        move |_| Some(size)
    }

    fn listed(sizes: &[u32]) -> impl Fn(usize) -> Option<u32> + '_ {
        move |position| sizes.get(position).copied()
    }

    #[test]
    fn test_zero_displacement() {
        assert_eq!(resolve_anchor(0, |_| None), Ok(Anchor::default()));
    }

    #[test]
    fn test_uniform_division() {
        for (displacement, position, offset) in [(120, 2, 20), (100, 2, 0), (49, 0, 49), (50, 1, 0)] {
            assert_eq!(
                resolve_anchor(displacement, uniform(50)),
                Ok(Anchor { position, offset }),
                "displacement {}",
                displacement
            );
        }
    }

    #[test]
    fn test_variable_sizes() {
        let sizes = [30, 10, 60, 25];
        assert_eq!(
            resolve_anchor(45, listed(&sizes)),
            Ok(Anchor {
                position: 2,
                offset: 5
            })
        );
        assert_eq!(
            resolve_anchor(100, listed(&sizes)),
            Ok(Anchor {
                position: 3,
                offset: 0
            })
        );
    }

    #[test]
    fn test_zero_width_items_are_stepped_over() {
        let sizes = [10, 0, 0, 10, 10];
        assert_eq!(
            resolve_anchor(15, listed(&sizes)),
            Ok(Anchor {
                position: 3,
                offset: 5
            })
        );
        // Lands exactly on the boundary before the zero-width run
        assert_eq!(
            resolve_anchor(10, listed(&sizes)),
            Ok(Anchor {
                position: 1,
                offset: 0
            })
        );
    }

    #[test]
    fn test_unknown_extent() {
        let sizes = [10, 10];
        assert_eq!(
            resolve_anchor(25, listed(&sizes)),
            Err(AlignError::UnknownExtent {
                position: 2,
                remaining: 5
            })
        );
    }

    #[test]
    fn test_negative_displacement() {
        assert_eq!(
            resolve_anchor(-1, uniform(50)),
            Err(AlignError::NegativeDisplacement(-1))
        );
    }

    #[test]
    fn test_accountant_tracks_signed_deltas() {
        let mut accountant = Accountant::new();
        accountant.advance(120);
        accountant.advance(-30);
        assert_eq!(accountant.displacement(), 90);
        assert_eq!(
            resolve_anchor(accountant.displacement(), uniform(50)),
            Ok(Anchor {
                position: 1,
                offset: 40
            })
        );
    }

    #[test]
    fn test_uniform_matches_walk() {
        for displacement in [0, 1, 49, 50, 120, 9_999] {
            assert_eq!(
                resolve_uniform(displacement, 50),
                resolve_anchor(displacement, uniform(50)),
                "displacement {}",
                displacement
            );
        }
        assert_eq!(
            resolve_uniform(-5, 50),
            Err(AlignError::NegativeDisplacement(-5))
        );
        assert_eq!(
            resolve_uniform(30, 0),
            Err(AlignError::UnknownExtent {
                position: 0,
                remaining: 30
            })
        );
        assert_eq!(resolve_uniform(0, 0), Ok(Anchor::default()));
    }

    #[test]
    fn test_uniform_large_displacement() {
        assert_eq!(
            resolve_uniform(2_000_000_001, 1),
            Ok(Anchor {
                position: 2_000_000_001,
                offset: 0
            })
        );
        assert_eq!(
            resolve_uniform(i64::MAX, 1 << 20),
            Ok(Anchor {
                position: (i64::MAX >> 20) as usize,
                offset: (1 << 20) - 1
            })
        );
    }
}
