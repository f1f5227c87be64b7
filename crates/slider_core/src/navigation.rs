//! Index arithmetic for slide navigation

/// Styling tag for a slide relative to the current one
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlideTag {
    Active,
    Prev,
    Next,
}

impl SlideTag {
    pub fn class_name(&self) -> &'static str {
        match self {
            SlideTag::Active => "active",
            SlideTag::Prev => "prev",
            SlideTag::Next => "next",
        }
    }
}

/// Wrap a signed index into `[0, len)`. `None` when there is nothing to index.
pub fn wrap_index(index: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(index.rem_euclid(len as i64) as usize)
}

/// Index after `current`, wrapping at the end
pub fn next_index(current: usize, len: usize) -> Option<usize> {
    wrap_index(current as i64 + 1, len)
}

/// Index before `current`, wrapping at the start
pub fn prev_index(current: usize, len: usize) -> Option<usize> {
    wrap_index(current as i64 - 1, len)
}

/// Coverflow tags: the current slide is active, its wrapped neighbours are
/// prev/next. A single slide has no neighbours; with two, the other slide
/// is tagged prev.
pub fn coverflow_tags(current: usize, len: usize) -> Vec<(usize, SlideTag)> {
    if current >= len {
        return Vec::new();
    }

    let mut tags = vec![(current, SlideTag::Active)];
    if len == 1 {
        return tags;
    }

    let prev = (current + len - 1) % len;
    let next = (current + 1) % len;
    tags.push((prev, SlideTag::Prev));
    if next != prev {
        tags.push((next, SlideTag::Next));
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(7, 6), Some(1));
        assert_eq!(wrap_index(-1, 6), Some(5));
        assert_eq!(wrap_index(-13, 6), Some(5));
        assert_eq!(wrap_index(3, 6), Some(3));
        assert_eq!(wrap_index(0, 0), None);
    }

    #[test]
    fn test_step_wraps() {
        assert_eq!(next_index(5, 6), Some(0));
        assert_eq!(prev_index(0, 6), Some(5));
        assert_eq!(next_index(0, 0), None);
    }

    #[test]
    fn test_coverflow_tags_wrap() {
        let tags = coverflow_tags(0, 6);
        assert!(tags.contains(&(0, SlideTag::Active)));
        assert!(tags.contains(&(5, SlideTag::Prev)));
        assert!(tags.contains(&(1, SlideTag::Next)));

        let tags = coverflow_tags(5, 6);
        assert!(tags.contains(&(4, SlideTag::Prev)));
        assert!(tags.contains(&(0, SlideTag::Next)));
    }

    #[test]
    fn test_coverflow_tags_small() {
        assert_eq!(coverflow_tags(0, 1), vec![(0, SlideTag::Active)]);
        assert_eq!(
            coverflow_tags(1, 2),
            vec![(1, SlideTag::Active), (0, SlideTag::Prev)]
        );
        assert!(coverflow_tags(3, 2).is_empty());
    }
}
