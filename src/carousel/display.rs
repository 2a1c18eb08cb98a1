//! Consolidated display state handed to view renderers.

/// Position of an item relative to the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeTag {
    /// Immediately before the active item
    Before,
    Active,
    /// Immediately after the active item
    After,
    /// Two or more positions away
    Far,
}

impl RelativeTag {
    pub fn for_item(item: usize, active: usize) -> Self {
        if item == active {
            RelativeTag::Active
        } else if item + 1 == active {
            RelativeTag::Before
        } else if item == active + 1 {
            RelativeTag::After
        } else {
            RelativeTag::Far
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelativeTag::Before => "before",
            RelativeTag::Active => "active",
            RelativeTag::After => "after",
            RelativeTag::Far => "far",
        }
    }
}

/// Everything a renderer needs after an index change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub active_index: usize,
    pub tags: Vec<RelativeTag>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl DisplayState {
    /// Build the state for `active_index` within `item_count` items.
    pub fn new(active_index: usize, item_count: usize) -> Self {
        Self {
            active_index,
            tags: (0..item_count)
                .map(|item| RelativeTag::for_item(item, active_index))
                .collect(),
            can_go_previous: active_index > 0,
            can_go_next: active_index + 1 < item_count,
        }
    }

    pub fn item_count(&self) -> usize {
        self.tags.len()
    }

    pub fn tag(&self, item: usize) -> Option<RelativeTag> {
        self.tags.get(item).copied()
    }

    /// Indicator dots highlight the active item only.
    pub fn is_indicator_active(&self, item: usize) -> bool {
        item == self.active_index
    }

    /// Index of the item carrying `tag`, if any.
    pub fn position_of(&self, tag: RelativeTag) -> Option<usize> {
        self.tags.iter().position(|&t| t == tag)
    }
}
