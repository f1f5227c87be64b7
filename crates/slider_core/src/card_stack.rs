//! Render order for the stacked-cards effect

/// Render order of slide indices. The first entry is drawn first (bottom),
/// the last entry is drawn last (top).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardStack {
    order: Vec<usize>,
}

impl CardStack {
    /// Stack with the first slide on top
    pub fn reversed(len: usize) -> Self {
        Self {
            order: (0..len).rev().collect(),
        }
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Slide drawn on top
    pub fn top(&self) -> Option<usize> {
        self.order.last().copied()
    }

    /// Move the top card to the bottom. Returns the moved slide.
    pub fn rotate_forward(&mut self) -> Option<usize> {
        let card = self.order.pop()?;
        self.order.insert(0, card);
        Some(card)
    }

    /// Move the bottom card to the top. Returns the moved slide.
    pub fn rotate_backward(&mut self) -> Option<usize> {
        if self.order.is_empty() {
            return None;
        }
        let card = self.order.remove(0);
        self.order.push(card);
        Some(card)
    }

    /// Rotate forward until `slide` is on top. Returns the number of moves.
    pub fn bring_to_top(&mut self, slide: usize) -> usize {
        let Some(pos) = self.order.iter().position(|&s| s == slide) else {
            return 0;
        };
        let moves = self.order.len() - 1 - pos;
        self.order.rotate_right(moves);
        moves
    }

    /// Add a newly appended slide at the bottom
    pub fn push_bottom(&mut self, slide: usize) {
        self.order.insert(0, slide);
    }

    /// Drop `slide` and shift the indices of the slides after it
    pub fn remove(&mut self, slide: usize) {
        self.order.retain(|&s| s != slide);
        for s in self.order.iter_mut() {
            if *s > slide {
                *s -= 1;
            }
        }
    }
}
