use serde_json::Value as JsonValue;

use super::lookup::find_by_opt;
use super::property::PropertyFieldLink;
use super::ID;
use crate::models;

/// A property overlaid on a parent property.
///
/// `original_id` is the overriding property (e.g. a layer's own property) and
/// `parent_id` the one it inherits from (e.g. the group layer's). Either may
/// be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedProperty {
    pub original_id: Option<ID>,
    pub parent_id: Option<ID>,
    pub schema_id: Option<ID>,
    pub linked_dataset_id: Option<ID>,
    pub groups: Vec<MergedPropertyGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedPropertyGroup {
    pub original_property_id: Option<ID>,
    pub parent_property_id: Option<ID>,
    pub original_id: Option<ID>,
    pub parent_id: Option<ID>,
    pub schema_group_id: ID,
    pub schema_id: Option<ID>,
    pub linked_dataset_id: Option<ID>,
    pub fields: Vec<MergedPropertyField>,
    pub groups: Vec<MergedPropertyGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedPropertyField {
    pub schema_id: Option<ID>,
    pub field_id: ID,
    pub value: Option<JsonValue>,
    pub value_type: String,
    pub links: Option<Vec<PropertyFieldLink>>,
    /// The original sets a value the parent also has.
    pub overridden: bool,
}

impl MergedProperty {
    /// The id to address this property by: the original, else the parent.
    pub fn property_id(&self) -> Option<&ID> {
        self.original_id.as_ref().or(self.parent_id.as_ref())
    }

    pub fn group_by_original(&self, id: &str) -> Option<&MergedPropertyGroup> {
        find_by_opt(&self.groups, id, |g| g.original_id.as_deref())
    }

    pub fn group_by_parent(&self, id: &str) -> Option<&MergedPropertyGroup> {
        find_by_opt(&self.groups, id, |g| g.parent_id.as_deref())
    }

    /// Overlays `original` on `parent`, group by schema group.
    ///
    /// Groups keep the original's order, followed by parent-only groups. For
    /// a direct group, original fields win and parent fields fill the gaps;
    /// a group list is taken whole from the original when present, and from
    /// the parent only when the original has no item for that schema group.
    /// Returns `None` when both sides are missing.
    pub fn merge(
        original: Option<&models::Property>,
        parent: Option<&models::Property>,
        linked_dataset: Option<ID>,
    ) -> Option<Self> {
        if original.is_none() && parent.is_none() {
            return None;
        }

        let schema_id = original.or(parent).map(|p| p.schema.to_string());
        let ctx = MergeContext {
            original_property: original.map(|p| p.id.to_string()),
            parent_property: parent.map(|p| p.id.to_string()),
            schema_id: schema_id.clone(),
            linked_dataset: linked_dataset.clone(),
        };

        let original_items = original.map(|p| p.items.as_slice()).unwrap_or_default();
        let parent_items = parent.map(|p| p.items.as_slice()).unwrap_or_default();

        let mut groups: Vec<MergedPropertyGroup> = original_items
            .iter()
            .map(|o| {
                let p = parent_items
                    .iter()
                    .find(|p| p.schema_group() == o.schema_group());
                ctx.merge_item(Some(o), p)
            })
            .collect();
        groups.extend(
            parent_items
                .iter()
                .filter(|p| {
                    !original_items
                        .iter()
                        .any(|o| o.schema_group() == p.schema_group())
                })
                .map(|p| ctx.merge_item(None, Some(p))),
        );

        Some(Self {
            original_id: ctx.original_property,
            parent_id: ctx.parent_property,
            schema_id,
            linked_dataset_id: linked_dataset,
            groups,
        })
    }
}

impl MergedPropertyGroup {
    /// The id to address this group by: the original, else the parent.
    pub fn property_id(&self) -> Option<&ID> {
        self.original_id.as_ref().or(self.parent_id.as_ref())
    }

    pub fn group_by_original(&self, id: &str) -> Option<&MergedPropertyGroup> {
        find_by_opt(&self.groups, id, |g| g.original_id.as_deref())
    }

    pub fn group_by_parent(&self, id: &str) -> Option<&MergedPropertyGroup> {
        find_by_opt(&self.groups, id, |g| g.parent_id.as_deref())
    }

    pub fn field(&self, id: &str) -> Option<&MergedPropertyField> {
        find_by_opt(&self.fields, id, |f| Some(f.field_id.as_str()))
    }
}

struct MergeContext {
    original_property: Option<ID>,
    parent_property: Option<ID>,
    schema_id: Option<ID>,
    linked_dataset: Option<ID>,
}

impl MergeContext {
    fn merge_item(
        &self,
        original: Option<&models::PropertyItem>,
        parent: Option<&models::PropertyItem>,
    ) -> MergedPropertyGroup {
        let schema_group = original
            .or(parent)
            .map(|i| i.schema_group().to_string())
            .unwrap_or_default();

        let mut merged = self.group_shell(
            original.map(|i| i.id().to_string()),
            parent.map(|i| i.id().to_string()),
            schema_group,
        );

        match (original, parent) {
            (Some(models::PropertyItem::GroupList(list)), _) => {
                merged.groups = list
                    .groups
                    .iter()
                    .map(|g| self.merge_group(Some(g), None))
                    .collect();
            }
            (None, Some(models::PropertyItem::GroupList(list))) => {
                merged.groups = list
                    .groups
                    .iter()
                    .map(|g| self.merge_group(None, Some(g)))
                    .collect();
            }
            // A parent list under a direct original group has no fields to inherit
            (o, p) => merged.fields = merge_fields(as_group(o), as_group(p)),
        }

        merged
    }

    fn merge_group(
        &self,
        original: Option<&models::PropertyGroup>,
        parent: Option<&models::PropertyGroup>,
    ) -> MergedPropertyGroup {
        let schema_group = original
            .or(parent)
            .map(|g| g.schema_group.clone())
            .unwrap_or_default();
        let mut merged = self.group_shell(
            original.map(|g| g.id.to_string()),
            parent.map(|g| g.id.to_string()),
            schema_group,
        );
        merged.fields = merge_fields(original, parent);
        merged
    }

    fn group_shell(
        &self,
        original_id: Option<ID>,
        parent_id: Option<ID>,
        schema_group_id: ID,
    ) -> MergedPropertyGroup {
        MergedPropertyGroup {
            original_property_id: self.original_property.clone(),
            parent_property_id: self.parent_property.clone(),
            original_id,
            parent_id,
            schema_group_id,
            schema_id: self.schema_id.clone(),
            linked_dataset_id: self.linked_dataset.clone(),
            fields: Vec::new(),
            groups: Vec::new(),
        }
    }
}

fn as_group(item: Option<&models::PropertyItem>) -> Option<&models::PropertyGroup> {
    match item {
        Some(models::PropertyItem::Group(g)) => Some(g),
        _ => None,
    }
}

fn merge_fields(
    original: Option<&models::PropertyGroup>,
    parent: Option<&models::PropertyGroup>,
) -> Vec<MergedPropertyField> {
    let original_fields = original.map(|g| g.fields.as_slice()).unwrap_or_default();
    let parent_fields = parent.map(|g| g.fields.as_slice()).unwrap_or_default();

    let to_merged = |f: &models::PropertyField, overridden: bool| MergedPropertyField {
        schema_id: None,
        field_id: f.field.clone(),
        value: f.value.clone(),
        value_type: f.value_type.clone(),
        links: (!f.links.is_empty())
            .then(|| f.links.iter().map(PropertyFieldLink::from).collect()),
        overridden,
    };

    let mut fields: Vec<MergedPropertyField> = original_fields
        .iter()
        .map(|f| to_merged(f, parent_fields.iter().any(|p| p.field == f.field)))
        .collect();
    fields.extend(
        parent_fields
            .iter()
            .filter(|p| !original_fields.iter().any(|o| o.field == p.field))
            .map(|p| to_merged(p, false)),
    );
    fields
}
