use serde::{Deserialize, Serialize};

use crate::id::{SceneId, TagId};

/// A label attached to layers. Items may belong to one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub scene: SceneId,
    pub label: String,
    #[serde(flatten)]
    pub kind: TagKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TagKind {
    Item { parent: Option<TagId> },
    Group { tags: Vec<TagId> },
}

impl Tag {
    pub fn item(scene: SceneId, label: &str, parent: Option<TagId>) -> Self {
        Self {
            id: TagId::new(),
            scene,
            label: label.to_string(),
            kind: TagKind::Item { parent },
        }
    }

    pub fn group(scene: SceneId, label: &str, tags: Vec<TagId>) -> Self {
        Self {
            id: TagId::new(),
            scene,
            label: label.to_string(),
            kind: TagKind::Group { tags },
        }
    }
}

super::entity!(Tag, TagId, "tag", "Tag");

impl super::SceneOwned for Tag {
    fn scene(&self) -> Option<SceneId> {
        Some(self.scene)
    }
}
