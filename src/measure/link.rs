//! Many-to-many links between picked entities and the displays they produced.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

use super::display::MeasureDisplay;
use super::scene::GraphicsOwner;

new_key_type! {
    /// Identity of a live display.
    pub struct DisplayId;
    struct LinkId;
}

#[derive(Debug, Clone, Copy)]
struct Link {
    owner: GraphicsOwner,
    display: DisplayId,
}

/// Live displays and the entities linked to each.
///
/// Every display has at least one link; removing the last link of a display
/// removes the display.
#[derive(Default)]
pub struct LinkTable {
    displays: SlotMap<DisplayId, Box<dyn MeasureDisplay>>,
    links: SlotMap<LinkId, Link>,
    by_owner: HashMap<GraphicsOwner, Vec<LinkId>>,
    order: Vec<DisplayId>,
}

impl LinkTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a display linked to each of `owners`.
    ///
    /// A display with no owners would be unreachable, so it is dropped and
    /// `None` is returned.
    pub fn insert(
        &mut self,
        display: Box<dyn MeasureDisplay>,
        owners: &[GraphicsOwner],
    ) -> Option<DisplayId> {
        if owners.is_empty() {
            return None;
        }
        let id = self.displays.insert(display);
        self.order.push(id);
        for owner in owners {
            let link = self.links.insert(Link {
                owner: *owner,
                display: id,
            });
            self.by_owner.entry(*owner).or_default().push(link);
        }
        Some(id)
    }

    /// Removes every link of `owner` together with the displays they point to.
    ///
    /// Displays shared with other entities go too, along with those
    /// entities' links to them. Returns the removed displays.
    pub fn remove_owner(&mut self, owner: &GraphicsOwner) -> Vec<Box<dyn MeasureDisplay>> {
        let Some(link_ids) = self.by_owner.remove(owner) else {
            return Vec::new();
        };
        let mut removed = Vec::new();
        for link_id in link_ids {
            let Some(link) = self.links.remove(link_id) else {
                continue;
            };
            if let Some(display) = self.remove_display(link.display) {
                removed.push(display);
            }
        }
        removed
    }

    /// Removes a display and every link pointing at it.
    pub fn remove_display(&mut self, id: DisplayId) -> Option<Box<dyn MeasureDisplay>> {
        let display = self.displays.remove(id)?;
        self.order.retain(|d| *d != id);
        let stale: Vec<LinkId> = self
            .links
            .iter()
            .filter(|(_, link)| link.display == id)
            .map(|(link_id, _)| link_id)
            .collect();
        for link_id in stale {
            if let Some(link) = self.links.remove(link_id) {
                if let Some(ids) = self.by_owner.get_mut(&link.owner) {
                    ids.retain(|l| *l != link_id);
                    if ids.is_empty() {
                        self.by_owner.remove(&link.owner);
                    }
                }
            }
        }
        Some(display)
    }

    /// Removes everything, returning the displays in insertion order.
    pub fn clear(&mut self) -> Vec<Box<dyn MeasureDisplay>> {
        let order = std::mem::take(&mut self.order);
        self.links.clear();
        self.by_owner.clear();
        order
            .into_iter()
            .filter_map(|id| self.displays.remove(id))
            .collect()
    }

    #[must_use]
    pub fn display(&self, id: DisplayId) -> Option<&dyn MeasureDisplay> {
        self.displays.get(id).map(AsRef::as_ref)
    }

    /// Displays in insertion order.
    pub fn displays(&self) -> impl Iterator<Item = (DisplayId, &dyn MeasureDisplay)> {
        self.order
            .iter()
            .filter_map(|id| self.displays.get(*id).map(|d| (*id, d.as_ref())))
    }

    /// Mutable displays in insertion order.
    pub fn displays_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn MeasureDisplay>> {
        let order = &self.order;
        let mut displays: Vec<(DisplayId, &mut Box<dyn MeasureDisplay>)> =
            self.displays.iter_mut().collect();
        displays.sort_by_key(|(id, _)| order.iter().position(|o| o == id));
        displays.into_iter().map(|(_, d)| d)
    }

    /// Displays linked to `owner`.
    #[must_use]
    pub fn displays_of(&self, owner: &GraphicsOwner) -> Vec<DisplayId> {
        self.by_owner
            .get(owner)
            .into_iter()
            .flatten()
            .filter_map(|l| self.links.get(*l).map(|link| link.display))
            .collect()
    }

    #[must_use]
    pub fn contains_owner(&self, owner: &GraphicsOwner) -> bool {
        self.by_owner.contains_key(owner)
    }

    #[must_use]
    pub fn display_count(&self) -> usize {
        self.displays.len()
    }

    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.displays.is_empty()
    }
}
