//! Group manager: the set of live groups, their placement, and the preview.
//!
//! The `GroupManager` owns every group on the table. It supports:
//! - Creating empty groups at computed placements
//! - Destroying groups
//! - Hit-testing a world point against all groups (creation order)
//! - An ephemeral preview group that is not part of the group set until
//!   confirmed
//!
//! ## Placement
//!
//! The first group sits at `ManagerConfig::origin`. The second is stacked
//! `group_spacing` above the first; every later group is placed
//! `group_spacing` to the right of the most recently created one.

use std::time::Duration;

use kurbo::{Point, Vec2};
use rustc_hash::FxHashMap;

use super::group::Group;
use super::preview::PreviewGroup;
use crate::core::config::ManagerConfig;
use crate::core::ids::GroupId;

/// Owns all groups and the optional preview.
///
/// ```
/// use card_table::core::ManagerConfig;
/// use card_table::groups::GroupManager;
/// use kurbo::Point;
///
/// let mut manager = GroupManager::new(ManagerConfig::default());
///
/// let first = manager.create_empty_group();
/// let second = manager.create_empty_group();
///
/// assert_eq!(manager.get(first).unwrap().origin(), Point::new(-4.0, -2.0));
/// assert_eq!(manager.get(second).unwrap().origin(), Point::new(-4.0, 1.0));
/// ```
#[derive(Clone, Debug)]
pub struct GroupManager {
    config: ManagerConfig,

    /// Live groups by ID.
    groups: FxHashMap<GroupId, Group>,

    /// Creation order, used for placement and hit-test priority.
    order: Vec<GroupId>,

    /// Next group ID to allocate (shared with the preview).
    next_id: u32,

    /// Groups created since the last `clear`, for naming.
    created: u32,

    preview: Option<PreviewGroup>,
}

impl GroupManager {
    /// Create a manager with no groups.
    pub fn new(config: ManagerConfig) -> Self {
        Self {
            config,
            groups: FxHashMap::default(),
            order: Vec::new(),
            next_id: 0,
            created: 0,
            preview: None,
        }
    }

    /// Manager configuration.
    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Create an empty group at the next placement.
    pub fn create_empty_group(&mut self) -> GroupId {
        let id = self.allocate_id();
        self.created += 1;
        let group = Group::new(
            id,
            format!("Group_{}", self.created),
            self.next_placement(),
            self.config.layout.clone(),
        );
        tracing::debug!(%id, origin = ?group.origin(), "group created");
        self.insert(group);
        id
    }

    /// Remove a group from the set. Returns it if it existed.
    pub fn destroy_group(&mut self, id: GroupId) -> Option<Group> {
        let group = self.groups.remove(&id)?;
        self.order.retain(|&g| g != id);
        tracing::debug!(%id, name = group.name(), "group destroyed");
        Some(group)
    }

    /// Where the next group will be placed.
    #[must_use]
    pub fn next_placement(&self) -> Point {
        let Some(last) = self.order.last().and_then(|id| self.groups.get(id)) else {
            return self.config.origin;
        };
        let spacing = self.config.group_spacing;
        let step = if self.order.len() == 1 {
            Vec2::new(0.0, spacing)
        } else {
            Vec2::new(spacing, 0.0)
        };
        last.origin() + step
    }

    /// Get a group.
    #[must_use]
    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// Get a group mutably.
    pub fn get_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(&id)
    }

    /// Whether a group is live.
    #[must_use]
    pub fn contains(&self, id: GroupId) -> bool {
        self.groups.contains_key(&id)
    }

    /// Group IDs in creation order.
    #[must_use]
    pub fn ids(&self) -> &[GroupId] {
        &self.order
    }

    /// Groups in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Group> + '_ {
        self.order.iter().filter_map(|id| self.groups.get(id))
    }

    /// Number of live groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether there are no live groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// First group (creation order) whose bounds contain `point`.
    #[must_use]
    pub fn group_at(&self, point: Point) -> Option<GroupId> {
        self.iter()
            .find(|group| group.contains_point(point))
            .map(Group::id)
    }

    /// Show the preview at `point`, creating it or moving the existing one.
    pub fn show_preview_at(&mut self, point: Point) {
        if let Some(preview) = &mut self.preview {
            if preview.group().origin() != point {
                preview.group_mut().relocate(point);
            }
            return;
        }

        let id = self.allocate_id();
        let layout = self
            .config
            .layout
            .clone()
            .with_extent(self.config.preview_extent);
        let group = Group::new(id, "PreviewGroup", point, layout);
        self.preview = Some(PreviewGroup::new(group, self.config.blink_interval));
        tracing::debug!(%id, origin = ?point, "preview shown");
    }

    /// Discard the preview. Returns `false` if none was shown.
    pub fn hide_preview(&mut self) -> bool {
        let Some(mut preview) = self.preview.take() else {
            return false;
        };
        preview.cancel();
        tracing::debug!(id = %preview.group().id(), "preview hidden");
        true
    }

    /// Promote the preview into the group set.
    ///
    /// The outline stops blinking and the group takes the regular layout
    /// template. Returns the new group's ID, or `None` with no preview.
    pub fn confirm_preview(&mut self) -> Option<GroupId> {
        let preview = self.preview.take()?;
        let mut group = preview.finish();

        self.created += 1;
        group.rename(format!("Group_{}", self.created));
        group.set_layout(self.config.layout.clone());

        let id = group.id();
        tracing::debug!(%id, name = group.name(), "preview confirmed");
        self.insert(group);
        Some(id)
    }

    /// The preview, if shown.
    #[must_use]
    pub fn preview(&self) -> Option<&PreviewGroup> {
        self.preview.as_ref()
    }

    /// Whether a shown preview contains `point`.
    #[must_use]
    pub fn preview_contains(&self, point: Point) -> bool {
        self.preview
            .as_ref()
            .is_some_and(|preview| preview.group().contains_point(point))
    }

    /// Advance time-based behavior (preview blink).
    pub fn tick(&mut self, dt: Duration) {
        if let Some(preview) = &mut self.preview {
            preview.tick(dt);
        }
    }

    /// Remove every group and the preview.
    pub fn clear(&mut self) {
        self.hide_preview();
        self.groups.clear();
        self.order.clear();
        self.created = 0;
    }

    fn allocate_id(&mut self) -> GroupId {
        let id = GroupId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, group: Group) {
        self.order.push(group.id());
        self.groups.insert(group.id(), group);
    }
}

impl Default for GroupManager {
    fn default() -> Self {
        Self::new(ManagerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_rule() {
        let mut manager = GroupManager::default();

        let a = manager.create_empty_group();
        let b = manager.create_empty_group();
        let c = manager.create_empty_group();
        let d = manager.create_empty_group();

        assert_eq!(manager.get(a).unwrap().origin(), Point::new(-4.0, -2.0));
        assert_eq!(manager.get(b).unwrap().origin(), Point::new(-4.0, 1.0));
        assert_eq!(manager.get(c).unwrap().origin(), Point::new(-1.0, 1.0));
        assert_eq!(manager.get(d).unwrap().origin(), Point::new(2.0, 1.0));
    }

    #[test]
    fn test_names_and_order() {
        let mut manager = GroupManager::default();
        let a = manager.create_empty_group();
        let b = manager.create_empty_group();

        assert_eq!(manager.get(a).unwrap().name(), "Group_1");
        assert_eq!(manager.get(b).unwrap().name(), "Group_2");
        assert_eq!(manager.ids(), &[a, b]);
    }

    #[test]
    fn test_destroy() {
        let mut manager = GroupManager::default();
        let a = manager.create_empty_group();
        let b = manager.create_empty_group();

        assert!(manager.destroy_group(a).is_some());
        assert!(manager.destroy_group(a).is_none());
        assert_eq!(manager.ids(), &[b]);
        assert!(!manager.contains(a));

        // Placement follows the most recent surviving group
        let c = manager.create_empty_group();
        assert_eq!(manager.get(c).unwrap().origin(), Point::new(-4.0, 4.0));
    }

    #[test]
    fn test_group_at() {
        let mut manager = GroupManager::default();
        let a = manager.create_empty_group();
        let center = manager.get(a).unwrap().bounds().center();

        assert_eq!(manager.group_at(center), Some(a));
        assert_eq!(manager.group_at(Point::new(100.0, 100.0)), None);
    }

    #[test]
    fn test_preview_is_not_a_group_until_confirmed() {
        let mut manager = GroupManager::default();
        manager.create_empty_group();

        let at = manager.next_placement();
        manager.show_preview_at(at);

        assert_eq!(manager.len(), 1);
        assert!(manager.preview().is_some());
        assert!(manager.preview_contains(at));
        assert_eq!(manager.group_at(at), None);

        let id = manager.confirm_preview().unwrap();
        assert_eq!(manager.len(), 2);
        assert!(manager.preview().is_none());
        assert_eq!(manager.get(id).unwrap().name(), "Group_2");
        assert_eq!(manager.get(id).unwrap().origin(), at);
    }

    #[test]
    fn test_show_preview_relocates() {
        let mut manager = GroupManager::default();
        manager.show_preview_at(Point::new(0.0, 0.0));
        let id = manager.preview().unwrap().group().id();

        manager.show_preview_at(Point::new(5.0, 5.0));

        let preview = manager.preview().unwrap();
        assert_eq!(preview.group().id(), id);
        assert_eq!(preview.group().origin(), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_hide_preview() {
        let mut manager = GroupManager::default();
        assert!(!manager.hide_preview());

        manager.show_preview_at(Point::ORIGIN);
        assert!(manager.hide_preview());
        assert!(manager.preview().is_none());
        assert!(manager.confirm_preview().is_none());
    }

    #[test]
    fn test_tick_blinks_preview() {
        let mut manager = GroupManager::default();
        manager.show_preview_at(Point::ORIGIN);

        manager.tick(Duration::from_millis(300));
        assert!(!manager.preview().unwrap().outline_visible());
    }

    #[test]
    fn test_clear() {
        let mut manager = GroupManager::default();
        manager.create_empty_group();
        manager.show_preview_at(Point::ORIGIN);

        manager.clear();

        assert!(manager.is_empty());
        assert!(manager.preview().is_none());
        assert_eq!(manager.next_placement(), Point::new(-4.0, -2.0));
    }
}
