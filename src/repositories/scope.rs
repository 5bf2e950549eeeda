//! Read/write scopes narrowing what a repository may touch.
//!
//! `None` lists are unrestricted. `readable` narrows reads; `writable`
//! narrows writes and also grants read access.

use crate::id::{SceneId, WorkspaceId};
use crate::store::{apply_optional_scene_filter, apply_scene_filter, apply_workspace_filter, Filter};

/// Concatenates two optional id lists. `None` only if both are `None`.
fn union<T: Clone>(a: &Option<Vec<T>>, b: &Option<Vec<T>>) -> Option<Vec<T>> {
    match (a, b) {
        (None, None) => None,
        (a, b) => Some(
            a.iter()
                .chain(b.iter())
                .flat_map(|ids| ids.iter().cloned())
                .collect(),
        ),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkspaceFilter {
    pub readable: Option<Vec<WorkspaceId>>,
    pub writable: Option<Vec<WorkspaceId>>,
}

impl WorkspaceFilter {
    pub fn new(readable: Option<Vec<WorkspaceId>>, writable: Option<Vec<WorkspaceId>>) -> Self {
        Self { readable, writable }
    }

    pub fn merge(&self, other: &WorkspaceFilter) -> Self {
        Self {
            readable: union(&self.readable, &other.readable),
            writable: union(&self.writable, &other.writable),
        }
    }

    pub fn can_read(&self, id: WorkspaceId) -> bool {
        self.readable.as_ref().map_or(true, |r| r.contains(&id)) || self.can_write(id)
    }

    pub fn can_write(&self, id: WorkspaceId) -> bool {
        self.writable.as_ref().map_or(true, |w| w.contains(&id))
    }

    /// Narrows a read filter to the readable workspaces.
    pub fn read(&self, filter: Filter) -> Filter {
        apply_workspace_filter(filter, self.readable.as_deref())
    }

    /// Narrows a write filter to the writable workspaces.
    pub fn write(&self, filter: Filter) -> Filter {
        apply_workspace_filter(filter, self.writable.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneFilter {
    pub readable: Option<Vec<SceneId>>,
    pub writable: Option<Vec<SceneId>>,
}

impl SceneFilter {
    pub fn new(readable: Option<Vec<SceneId>>, writable: Option<Vec<SceneId>>) -> Self {
        Self { readable, writable }
    }

    pub fn merge(&self, other: &SceneFilter) -> Self {
        Self {
            readable: union(&self.readable, &other.readable),
            writable: union(&self.writable, &other.writable),
        }
    }

    pub fn can_read(&self, id: SceneId) -> bool {
        self.readable.as_ref().map_or(true, |r| r.contains(&id)) || self.can_write(id)
    }

    pub fn can_write(&self, id: SceneId) -> bool {
        self.writable.as_ref().map_or(true, |w| w.contains(&id))
    }

    /// Like [`SceneFilter::can_write`], with scene-less entities always writable.
    pub fn can_write_optional(&self, id: Option<SceneId>) -> bool {
        id.map_or(true, |id| self.can_write(id))
    }

    pub fn read(&self, filter: Filter) -> Filter {
        apply_scene_filter(filter, self.readable.as_deref())
    }

    pub fn write(&self, filter: Filter) -> Filter {
        apply_scene_filter(filter, self.writable.as_deref())
    }

    /// Read filter that keeps scene-less documents visible.
    pub fn read_optional(&self, filter: Filter) -> Filter {
        apply_optional_scene_filter(filter, self.readable.as_deref())
    }

    pub fn write_optional(&self, filter: Filter) -> Filter {
        apply_optional_scene_filter(filter, self.writable.as_deref())
    }
}
