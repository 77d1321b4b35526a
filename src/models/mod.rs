use serde::{Deserialize, Serialize};

/// Backend account info object.
///
/// mdreader-rust returns this on session restore.
/// Only `id` is needed client-side; the rest stays flexible so backend
/// field evolution does not break deserialization.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct AccountInfo {
    pub id: String,

    #[serde(flatten)]
    pub extra: serde_json::Value,
}

/// An article record. `id` is absent until the backend has persisted it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Article {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub description: String,
}

/// A folder record. `id` is absent until the backend has persisted it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Folder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum EntityKind {
    Article,
    Folder,
}

/// Tagged union over the two record kinds the profile page manages.
/// Each variant carries only the fields its kind supports.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Entity {
    Article(Article),
    Folder(Folder),
}

impl Entity {
    pub fn id(&self) -> Option<i64> {
        match self {
            Entity::Article(a) => a.id,
            Entity::Folder(f) => f.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entity::Article(a) => &a.name,
            Entity::Folder(f) => &f.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Entity::Article(a) => &a.description,
            Entity::Folder(f) => &f.description,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Article(_) => EntityKind::Article,
            Entity::Folder(_) => EntityKind::Folder,
        }
    }
}

/// One created/updated record as echoed by the backend's save endpoints.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct StoredRecord {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_display_is_lowercase() {
        assert_eq!(EntityKind::Article.to_string(), "article");
        assert_eq!(EntityKind::Folder.to_string(), "folder");
    }

    #[test]
    fn test_article_serialization_omits_missing_id() {
        let a = Article {
            id: None,
            name: "A".to_string(),
            slug: "a".to_string(),
            featured: false,
            description: String::new(),
        };
        let v = serde_json::to_value(&a).expect("should serialize");
        assert!(v.get("id").is_none());
    }

    #[test]
    fn test_entity_accessors() {
        let e = Entity::Folder(Folder {
            id: Some(2),
            name: "F".to_string(),
            description: String::new(),
        });
        assert_eq!(e.id(), Some(2));
        assert_eq!(e.name(), "F");
        assert_eq!(e.kind(), EntityKind::Folder);
    }
}
