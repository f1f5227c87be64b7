//! Slider state

use crate::card_stack::CardStack;
use crate::navigation::wrap_index;
use crate::slide::{MediaStatus, SlideItem};
use crate::EffectMode;
use std::time::Duration;

/// Everything the controller knows about the slider, independent of rendering
#[derive(Debug, Clone)]
pub struct SliderState {
    items: Vec<SlideItem>,
    media: Vec<MediaStatus>,
    pub current_index: usize,
    pub mode: EffectMode,
    pub auto_advance_interval: Duration,
    pub is_playing: bool,
    pub is_fullscreen: bool,
    /// Pointer is over the slides; the timer is suspended without touching `is_playing`
    pub hover_paused: bool,
    pub card_stack: CardStack,
}

/// Snapshot of the slide on screen
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSlide<'a> {
    pub index: usize,
    pub item: &'a SlideItem,
    pub total: usize,
}

impl SliderState {
    pub fn new(items: Vec<SlideItem>, interval: Duration) -> Self {
        let media = vec![MediaStatus::Pending; items.len()];
        Self {
            items,
            media,
            current_index: 0,
            mode: EffectMode::AutoSlide,
            auto_advance_interval: interval,
            is_playing: false,
            is_fullscreen: false,
            hover_paused: false,
            card_stack: CardStack::default(),
        }
    }

    pub fn items(&self) -> &[SlideItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn media(&self, index: usize) -> Option<MediaStatus> {
        self.media.get(index).copied()
    }

    pub fn set_media(&mut self, index: usize, status: MediaStatus) -> bool {
        match self.media.get_mut(index) {
            Some(slot) => {
                *slot = status;
                true
            }
            None => false,
        }
    }

    /// Wrap `index` and make it current. Returns the new index.
    pub fn set_index(&mut self, index: i64) -> Option<usize> {
        let index = wrap_index(index, self.items.len())?;
        self.current_index = index;
        Some(index)
    }

    pub fn current(&self) -> Option<CurrentSlide<'_>> {
        self.items.get(self.current_index).map(|item| CurrentSlide {
            index: self.current_index,
            item,
            total: self.items.len(),
        })
    }

    /// Append a slide. In stacked mode it joins the card stack at the bottom,
    /// or starts a new stack if the old one emptied.
    pub fn push(&mut self, item: SlideItem) -> usize {
        self.items.push(item);
        self.media.push(MediaStatus::Pending);
        let index = self.items.len() - 1;
        if self.mode.rotates_stack() {
            if self.card_stack.is_empty() {
                self.card_stack = CardStack::reversed(self.items.len());
            } else {
                self.card_stack.push_bottom(index);
            }
        }
        index
    }

    /// Remove a slide, keeping the current slide selected where possible.
    pub fn remove(&mut self, index: usize) -> Option<SlideItem> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.media.remove(index);
        self.card_stack.remove(index);

        if index < self.current_index {
            self.current_index -= 1;
        }
        if self.current_index >= self.items.len() {
            self.current_index = self.items.len().saturating_sub(1);
        }
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<SlideItem> {
        (0..n)
            .map(|i| SlideItem::new(&format!("img{}.jpg", i), &format!("Slide {}", i), ""))
            .collect()
    }

    #[test]
    fn test_set_index_wraps() {
        let mut state = SliderState::new(items(6), Duration::from_secs(3));
        assert_eq!(state.set_index(7), Some(1));
        assert_eq!(state.set_index(-1), Some(5));
        assert_eq!(state.current_index, 5);
    }

    #[test]
    fn test_empty_has_no_current() {
        let mut state = SliderState::new(Vec::new(), Duration::from_secs(3));
        assert_eq!(state.set_index(1), None);
        assert!(state.current().is_none());
    }

    #[test]
    fn test_remove_keeps_selection() {
        let mut state = SliderState::new(items(4), Duration::from_secs(3));
        state.current_index = 2;
        let removed = state.remove(0).unwrap();
        assert_eq!(removed.title, "Slide 0");
        assert_eq!(state.current_index, 1);
        assert_eq!(state.current().unwrap().item.title, "Slide 2");
    }

    #[test]
    fn test_remove_last_clamps() {
        let mut state = SliderState::new(items(3), Duration::from_secs(3));
        state.current_index = 2;
        state.remove(2);
        assert_eq!(state.current_index, 1);
        state.remove(1);
        state.remove(0);
        assert_eq!(state.current_index, 0);
        assert!(state.is_empty());
        assert!(state.remove(0).is_none());
    }

    #[test]
    fn test_push_tracks_media() {
        let mut state = SliderState::new(items(1), Duration::from_secs(3));
        let index = state.push(SlideItem::new("new.jpg", "New", ""));
        assert_eq!(index, 1);
        assert_eq!(state.media(1), Some(MediaStatus::Pending));
        assert!(state.set_media(1, MediaStatus::Placeholder));
        assert!(!state.set_media(5, MediaStatus::Loaded));
    }

    #[test]
    fn test_push_restarts_empty_stack() {
        let mut state = SliderState::new(items(1), Duration::from_secs(3));
        state.mode = EffectMode::StackedCards;
        state.card_stack = CardStack::reversed(1);
        state.remove(0);
        assert!(state.card_stack.is_empty());

        state.push(SlideItem::new("b.jpg", "B", ""));
        state.push(SlideItem::new("c.jpg", "C", ""));
        assert_eq!(state.card_stack.order(), &[1, 0]);
    }

    #[test]
    fn test_push_outside_stacked_mode_leaves_stack_alone() {
        let mut state = SliderState::new(items(1), Duration::from_secs(3));
        state.push(SlideItem::new("b.jpg", "B", ""));
        assert!(state.card_stack.is_empty());
    }
}
