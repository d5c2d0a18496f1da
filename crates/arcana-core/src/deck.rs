//! The deck engine.
//!
//! A deck is an order of catalog indices. Each ritual cycle shuffles a fresh
//! identity order, cuts it once, and draws the spread from the top.

use rand::Rng;

use crate::card::{DrawnCard, Orientation};
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};

const LOG_TARGET: &str = "arcana::deck";

/// Number of cards in a spread.
pub const SPREAD_SIZE: usize = 3;

/// How far from either end of the deck a cut must land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutMargin {
    /// Always keep this many cards on each side of the cut.
    Fixed(usize),
    /// Keep `min(max, len / 3)` cards on each side, so small decks still cut.
    Adaptive {
        /// Upper bound on the margin.
        max: usize,
    },
}

impl Default for CutMargin {
    fn default() -> Self {
        Self::Adaptive { max: 5 }
    }
}

impl CutMargin {
    /// The margin for a deck of `len` cards.
    pub fn resolve(self, len: usize) -> usize {
        match self {
            Self::Fixed(m) => m,
            Self::Adaptive { max } => max.min(len / 3),
        }
    }
}

/// The identity order `[0, 1, .., len - 1]`.
pub fn identity(len: usize) -> Vec<usize> {
    (0..len).collect()
}

/// Fisher-Yates shuffle.
pub fn shuffle<R: Rng + ?Sized>(mut order: Vec<usize>, rng: &mut R) -> Vec<usize> {
    for i in (1..order.len()).rev() {
        let j = rng.random_range(0..=i);
        order.swap(i, j);
    }
    order
}

/// Pick a cut point in `[margin, len - margin)`.
///
/// Returns `None` when the deck is empty or shorter than twice the margin.
/// When the deck is exactly twice the margin the cut lands on the margin.
pub fn choose_cut_point<R: Rng + ?Sized>(len: usize, margin: usize, rng: &mut R) -> Option<usize> {
    if len == 0 || len < margin * 2 {
        return None;
    }
    let upper = len - margin;
    if upper > margin {
        Some(rng.random_range(margin..upper))
    } else {
        Some(margin)
    }
}

/// Rotate the order so that `point` becomes the top.
pub fn rotate(order: &[usize], point: usize) -> Vec<usize> {
    let point = point.min(order.len());
    let mut rotated = Vec::with_capacity(order.len());
    rotated.extend_from_slice(&order[point..]);
    rotated.extend_from_slice(&order[..point]);
    rotated
}

/// Cut the deck at a random point, or leave it as is if it is too small.
///
/// Returns the new order and the cut point, `None` when the cut was skipped.
pub fn cut<R: Rng + ?Sized>(
    order: Vec<usize>,
    margin: CutMargin,
    rng: &mut R,
) -> (Vec<usize>, Option<usize>) {
    let m = margin.resolve(order.len());
    match choose_cut_point(order.len(), m, rng) {
        Some(point) => {
            tracing::debug!(target: LOG_TARGET, point, margin = m, "deck cut");
            (rotate(&order, point), Some(point))
        }
        None => {
            tracing::debug!(target: LOG_TARGET, len = order.len(), margin = m, "cut skipped");
            (order, None)
        }
    }
}

/// Draw the top `count` cards, each with an independent fair-coin orientation.
///
/// Either the whole batch is drawn or nothing is.
pub fn draw_batch<R: Rng + ?Sized>(
    order: &[usize],
    count: usize,
    catalog: &Catalog,
    rng: &mut R,
) -> CoreResult<Vec<DrawnCard>> {
    if order.len() < count {
        return Err(CoreError::DeckTooSmall {
            needed: count,
            available: order.len(),
        });
    }
    let top = &order[..count];
    let records = top
        .iter()
        .map(|&index| {
            catalog.get(index).ok_or(CoreError::IndexOutOfBounds {
                index,
                len: catalog.len(),
            })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    Ok(records
        .into_iter()
        .map(|record| DrawnCard::new(record, Orientation::from(rng.random_bool(0.5))))
        .collect())
}
