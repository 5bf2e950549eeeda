use serde_json::Value as JsonValue;

use super::lookup::find_by;
use super::ID;
use crate::id::{PropertyId, PropertyItemId};
use crate::models;

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: ID,
    pub schema_id: ID,
    pub items: Vec<PropertyItem>,
}

/// A direct child of a property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyItem {
    Group(PropertyGroup),
    GroupList(PropertyGroupList),
}

/// A borrowed item found by [`Property::item`]: a direct item, or a group
/// nested in a group list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyItemRef<'a> {
    Group(&'a PropertyGroup),
    GroupList(&'a PropertyGroupList),
}

impl PropertyItemRef<'_> {
    pub fn id(&self) -> &str {
        match self {
            PropertyItemRef::Group(g) => &g.id,
            PropertyItemRef::GroupList(l) => &l.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyGroup {
    pub id: ID,
    pub schema_id: ID,
    pub schema_group_id: ID,
    pub fields: Vec<PropertyField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyGroupList {
    pub id: ID,
    pub schema_id: ID,
    pub schema_group_id: ID,
    pub groups: Vec<PropertyGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyField {
    /// Composite id, see [`property_field_id`].
    pub id: String,
    pub parent_id: ID,
    pub schema_id: ID,
    pub field_id: ID,
    pub links: Option<Vec<PropertyFieldLink>>,
    pub value_type: String,
    pub value: Option<JsonValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyFieldLink {
    pub dataset_id: Option<ID>,
    pub dataset_schema_id: ID,
    pub dataset_schema_field_id: ID,
}

impl Property {
    /// Field by composite id. Only direct groups are searched; fields inside
    /// group lists are not reachable this way.
    pub fn field(&self, id: &str) -> Option<&PropertyField> {
        if id.is_empty() {
            return None;
        }
        self.items
            .iter()
            .filter_map(|item| match item {
                PropertyItem::Group(g) => Some(g),
                PropertyItem::GroupList(_) => None,
            })
            .find_map(|g| g.field(id))
    }

    /// Item by id. A group list that does not match is searched one level
    /// deep for a nested group.
    pub fn item(&self, id: &str) -> Option<PropertyItemRef<'_>> {
        if id.is_empty() {
            return None;
        }
        self.items.iter().find_map(|item| match item {
            PropertyItem::Group(g) if g.id == id => Some(PropertyItemRef::Group(g)),
            PropertyItem::Group(_) => None,
            PropertyItem::GroupList(l) if l.id == id => Some(PropertyItemRef::GroupList(l)),
            PropertyItem::GroupList(l) => l.group(id).map(PropertyItemRef::Group),
        })
    }
}

impl PropertyGroup {
    pub fn field(&self, id: &str) -> Option<&PropertyField> {
        find_by(&self.fields, id, |f| f.id.as_str())
    }
}

impl PropertyGroupList {
    pub fn group(&self, id: &str) -> Option<&PropertyGroup> {
        find_by(&self.groups, id, |g| g.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    pub id: ID,
    pub groups: Vec<PropertySchemaGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchemaGroup {
    pub schema_group_id: ID,
    pub schema_id: ID,
    pub is_list: bool,
    pub title: Option<String>,
    pub fields: Vec<PropertySchemaField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchemaField {
    pub field_id: ID,
    pub value_type: String,
    pub title: Option<String>,
    pub default_value: Option<JsonValue>,
}

impl PropertySchema {
    /// Field by id, across all groups.
    pub fn field(&self, id: &str) -> Option<&PropertySchemaField> {
        if id.is_empty() {
            return None;
        }
        self.groups
            .iter()
            .find_map(|g| find_by(&g.fields, id, |f| f.field_id.as_str()))
    }

    pub fn group(&self, id: &str) -> Option<&PropertySchemaGroup> {
        find_by(&self.groups, id, |g| g.schema_group_id.as_str())
    }
}

/// `<property>_<group list>_<group>_<field>`, with the group list segment
/// omitted for fields of a direct group.
pub fn property_field_id(
    property: &PropertyId,
    group_list: Option<&PropertyItemId>,
    group: &PropertyItemId,
    field: &str,
) -> String {
    match group_list {
        Some(list) => format!("{}_{}_{}_{}", property, list, group, field),
        None => format!("{}_{}_{}", property, group, field),
    }
}

fn to_group(
    property: &models::Property,
    list: Option<&PropertyItemId>,
    group: &models::PropertyGroup,
) -> PropertyGroup {
    let schema_id = property.schema.to_string();
    PropertyGroup {
        id: group.id.to_string(),
        schema_group_id: group.schema_group.clone(),
        fields: group
            .fields
            .iter()
            .map(|f| PropertyField {
                id: property_field_id(&property.id, list, &group.id, &f.field),
                parent_id: property.id.to_string(),
                schema_id: schema_id.clone(),
                field_id: f.field.clone(),
                links: (!f.links.is_empty())
                    .then(|| f.links.iter().map(PropertyFieldLink::from).collect()),
                value_type: f.value_type.clone(),
                value: f.value.clone(),
            })
            .collect(),
        schema_id,
    }
}

impl From<&models::PropertyLink> for PropertyFieldLink {
    fn from(l: &models::PropertyLink) -> Self {
        Self {
            dataset_id: l.dataset.map(|d| d.to_string()),
            dataset_schema_id: l.schema.to_string(),
            dataset_schema_field_id: l.field.clone(),
        }
    }
}

impl From<&models::Property> for Property {
    fn from(p: &models::Property) -> Self {
        Self {
            id: p.id.to_string(),
            schema_id: p.schema.to_string(),
            items: p
                .items
                .iter()
                .map(|item| match item {
                    models::PropertyItem::Group(g) => PropertyItem::Group(to_group(p, None, g)),
                    models::PropertyItem::GroupList(l) => {
                        PropertyItem::GroupList(PropertyGroupList {
                            id: l.id.to_string(),
                            schema_id: p.schema.to_string(),
                            schema_group_id: l.schema_group.clone(),
                            groups: l.groups.iter().map(|g| to_group(p, Some(&l.id), g)).collect(),
                        })
                    }
                })
                .collect(),
        }
    }
}

impl From<&models::PropertySchema> for PropertySchema {
    fn from(s: &models::PropertySchema) -> Self {
        let id = s.id.to_string();
        Self {
            groups: s
                .groups
                .iter()
                .map(|g| PropertySchemaGroup {
                    schema_group_id: g.id.clone(),
                    schema_id: id.clone(),
                    is_list: g.list,
                    title: g.title.clone(),
                    fields: g
                        .fields
                        .iter()
                        .map(|f| PropertySchemaField {
                            field_id: f.id.clone(),
                            value_type: f.value_type.clone(),
                            title: f.title.clone(),
                            default_value: f.default_value.clone(),
                        })
                        .collect(),
                })
                .collect(),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{DatasetSchemaId, PropertySchemaId, SceneId};
    use serde_json::json;

    fn field(name: &str) -> models::PropertyField {
        models::PropertyField {
            field: name.into(),
            value_type: "string".into(),
            value: Some(json!(name)),
            links: Vec::new(),
        }
    }

    fn group(schema_group: &str, fields: &[&str]) -> models::PropertyGroup {
        models::PropertyGroup {
            id: PropertyItemId::new(),
            schema_group: schema_group.into(),
            fields: fields.iter().map(|f| field(f)).collect(),
        }
    }

    /// A property with a direct group `default` and a list `markers` holding
    /// one nested group.
    fn fixture() -> (models::Property, PropertyItemId, PropertyItemId, PropertyItemId) {
        let mut p = models::Property::new(SceneId::new(), PropertySchemaId::new());
        let direct = group("default", &["title", "color"]);
        let nested = group("markers", &["location"]);
        let list = models::PropertyGroupList {
            id: PropertyItemId::new(),
            schema_group: "markers".into(),
            groups: vec![nested.clone()],
        };
        let ids = (direct.id, list.id, nested.id);
        p.items.push(models::PropertyItem::Group(direct));
        p.items.push(models::PropertyItem::GroupList(list));
        (p, ids.0, ids.1, ids.2)
    }

    #[test]
    fn test_property_field_ids_are_composite() {
        let (p, direct, list, nested) = fixture();
        let view = Property::from(&p);

        let PropertyItem::Group(g) = &view.items[0] else {
            panic!("expected group");
        };
        assert_eq!(g.fields[0].id, format!("{}_{}_title", p.id, direct));

        let PropertyItem::GroupList(l) = &view.items[1] else {
            panic!("expected group list");
        };
        assert_eq!(
            l.groups[0].fields[0].id,
            format!("{}_{}_{}_location", p.id, list, nested)
        );
    }

    #[test]
    fn test_property_field_searches_direct_groups_only() {
        let (p, direct, list, nested) = fixture();
        let view = Property::from(&p);

        let title = view.field(&format!("{}_{}_title", p.id, direct)).unwrap();
        assert_eq!(title.value, Some(json!("title")));

        // Fields inside group lists are not reachable through Property::field
        let nested_id = format!("{}_{}_{}_location", p.id, list, nested);
        assert!(view.field(&nested_id).is_none());
        assert!(view.field("").is_none());
        assert!(view.field("missing").is_none());
    }

    #[test]
    fn test_property_item_descends_one_level() {
        let (p, direct, list, nested) = fixture();
        let view = Property::from(&p);

        assert!(matches!(
            view.item(&direct.to_string()),
            Some(PropertyItemRef::Group(g)) if g.id == direct.to_string()
        ));
        assert!(matches!(
            view.item(&list.to_string()),
            Some(PropertyItemRef::GroupList(l)) if l.id == list.to_string()
        ));
        let found = view.item(&nested.to_string()).unwrap();
        assert!(matches!(found, PropertyItemRef::Group(_)));
        assert_eq!(found.id(), nested.to_string());

        assert!(view.item("").is_none());
        assert!(view.item(&PropertyItemId::new().to_string()).is_none());
    }

    #[test]
    fn test_group_list_group() {
        let (p, _, _, nested) = fixture();
        let view = Property::from(&p);
        let PropertyItem::GroupList(l) = &view.items[1] else {
            panic!("expected group list");
        };
        assert!(l.group(&nested.to_string()).is_some());
        assert!(l.group("").is_none());
    }

    #[test]
    fn test_absent_property_yields_nothing() {
        let absent: Option<&Property> = None;
        assert!(absent.and_then(|p| p.item("x")).is_none());
        assert!(absent.and_then(|p| p.field("x")).is_none());
    }

    #[test]
    fn test_links_are_kept() {
        let mut p = models::Property::new(SceneId::new(), PropertySchemaId::new());
        let mut g = group("default", &["name"]);
        let schema = DatasetSchemaId::new();
        g.fields[0].links.push(models::PropertyLink {
            dataset: None,
            schema,
            field: "city".into(),
        });
        p.items.push(models::PropertyItem::Group(g));

        let view = Property::from(&p);
        let PropertyItem::Group(g) = &view.items[0] else {
            panic!("expected group");
        };
        let links = g.fields[0].links.clone().unwrap();
        assert_eq!(links[0].dataset_schema_id, schema.to_string());
        assert_eq!(links[0].dataset_schema_field_id, "city");
    }

    #[test]
    fn test_property_schema_lookups() {
        let schema = models::PropertySchema {
            id: PropertySchemaId::new(),
            scene: None,
            groups: vec![
                models::PropertySchemaGroup {
                    id: "default".into(),
                    title: None,
                    list: false,
                    fields: vec![models::PropertySchemaField {
                        id: "title".into(),
                        value_type: "string".into(),
                        title: Some("Title".into()),
                        default_value: None,
                    }],
                },
                models::PropertySchemaGroup {
                    id: "markers".into(),
                    title: None,
                    list: true,
                    fields: vec![models::PropertySchemaField {
                        id: "location".into(),
                        value_type: "latlng".into(),
                        title: None,
                        default_value: None,
                    }],
                },
            ],
        };
        let view = PropertySchema::from(&schema);

        assert_eq!(view.field("location").unwrap().value_type, "latlng");
        assert_eq!(view.field("title").unwrap().title.as_deref(), Some("Title"));
        assert!(view.field("").is_none());
        assert!(view.group("markers").unwrap().is_list);
        assert!(view.group("missing").is_none());
        assert!(view.group("").is_none());
    }
}
