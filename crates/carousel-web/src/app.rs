// Application layer above the engine: the item list and which item, if
// any, is open in the detail view.

use crate::constants::MAX_ITEM_COUNT;
use carousel_core::gpu::item_tint;
use carousel_core::CarouselEvent;

/// Requests queued by exported functions and DOM listeners, applied at the
/// start of the next frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostCommand {
    SetItems(Vec<String>),
    CloseDetail,
    /// Move the ring by whole items (keyboard arrows).
    Step(i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailChange {
    Opened(usize),
    Closed,
}

#[derive(Debug, Default)]
pub struct GalleryApp {
    items: Vec<String>,
    tints: Vec<[f32; 4]>,
    selected: Option<usize>,
}

impl GalleryApp {
    pub fn new(items: Vec<String>) -> Self {
        let mut app = Self::default();
        app.set_items(items);
        app
    }

    /// Replace the item list. An open detail view is closed since its index
    /// no longer refers to the same item.
    pub fn set_items(&mut self, mut items: Vec<String>) -> Option<DetailChange> {
        items.truncate(MAX_ITEM_COUNT);
        self.tints = items.iter().map(|s| item_tint(s)).collect();
        self.items = items;
        self.close()
    }

    pub fn item(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn tints(&self) -> &[[f32; 4]] {
        &self.tints
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select toggles: with a detail view open any select closes it,
    /// otherwise it opens the requested item.
    pub fn apply(&mut self, event: CarouselEvent) -> Option<DetailChange> {
        match event {
            CarouselEvent::Select(_) if self.selected.is_some() => self.close(),
            CarouselEvent::Select(index) if index < self.items.len() => {
                self.selected = Some(index);
                Some(DetailChange::Opened(index))
            }
            CarouselEvent::Select(index) => {
                log::warn!("[app] select {} out of range ({} items)", index, self.items.len());
                None
            }
            CarouselEvent::Close => self.close(),
        }
    }

    pub fn close(&mut self) -> Option<DetailChange> {
        self.selected.take().map(|_| DetailChange::Closed)
    }
}

/// Item references for the demo ring.
pub fn placeholder_items(count: usize) -> Vec<String> {
    (0..count.min(MAX_ITEM_COUNT))
        .map(|i| format!("item-{}", i + 1))
        .collect()
}

/// Parse the `items` query value, capped at `MAX_ITEM_COUNT`.
pub fn parse_item_count(raw: &str) -> Option<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .map(|n| n.min(MAX_ITEM_COUNT))
}

/// Whether a reference can be used directly as an `<img src>`.
pub fn is_image_ref(reference: &str) -> bool {
    ["http://", "https://", "data:image/", "blob:", "/", "./"]
        .iter()
        .any(|p| reference.starts_with(p))
}

/// Map a key to a host command. Arrow keys step the ring, Escape closes.
#[inline]
pub fn command_for_key(key: &str) -> Option<HostCommand> {
    match key {
        "Escape" => Some(HostCommand::CloseDetail),
        "ArrowLeft" => Some(HostCommand::Step(-1)),
        "ArrowRight" => Some(HostCommand::Step(1)),
        _ => None,
    }
}

/// Neighbour of `current` on a ring of `count` items, for keyboard stepping.
pub fn step_index(current: usize, delta: i32, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let next = (current as i64 + delta as i64).rem_euclid(count as i64);
    Some(next as usize)
}
