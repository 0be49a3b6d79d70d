/// Wire data model shared between the API layer and the UI
///
/// These types mirror the JSON the KittyFind service emits. They are
/// fetched copies only: the client never mutates them in place, every
/// view re-fetches its own slice.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Locations the service accepts for accounts and sighting posts
pub const LOCATIONS: [&str; 4] = ["Kochi", "Ernakulam", "Thrissur", "Alappuzha"];

/// Age bracket of a sighted cat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    Kitten,
    Young,
    Adult,
    Senior,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Kitten,
        AgeGroup::Young,
        AgeGroup::Adult,
        AgeGroup::Senior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Kitten => "Kitten",
            AgeGroup::Young => "Young",
            AgeGroup::Adult => "Adult",
            AgeGroup::Senior => "Senior",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender of a sighted cat, as far as the reporter could tell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Unknown];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored photo reference on a post
///
/// The service emits both bare path strings and `{ "url": … }` objects,
/// depending on how the photo was ingested.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PhotoRef {
    Path(String),
    Object { url: String },
}

impl PhotoRef {
    /// Server-relative path or absolute URL of the photo
    pub fn url(&self) -> &str {
        match self {
            PhotoRef::Path(path) => path,
            PhotoRef::Object { url } => url,
        }
    }
}

/// The user that owns a post, as embedded in the post itself
///
/// The service populates this partially depending on the endpoint, so
/// every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatOwner {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A cat sighting post
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Cat {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub age: AgeGroup,
    pub gender: Gender,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
    /// Set once the cat has found a home
    #[serde(default)]
    pub adopted: bool,
    #[serde(default)]
    pub user: Option<CatOwner>,
}

impl Cat {
    /// Photo shown on cards: the first one, if any
    pub fn cover_photo(&self) -> Option<&PhotoRef> {
        self.photos.first()
    }
}

/// The authenticated account, fetched from `/auth/me`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cat_deserializes_with_both_photo_shapes() {
        let json = r#"{
            "_id": "abc123",
            "name": "Tom",
            "age": "Adult",
            "gender": "Male",
            "location": "Kochi",
            "description": "orange tabby",
            "photos": ["/uploads/tom-1.jpg", { "url": "/uploads/tom-2.jpg" }],
            "adopted": false,
            "user": { "_id": "u1", "name": "Asha", "phone": "919900112233" }
        }"#;

        let cat: Cat = serde_json::from_str(json).unwrap();
        assert_eq!(cat.id, "abc123");
        assert_eq!(cat.age, AgeGroup::Adult);
        assert_eq!(cat.gender, Gender::Male);
        assert_eq!(cat.photos.len(), 2);
        assert_eq!(cat.photos[0].url(), "/uploads/tom-1.jpg");
        assert_eq!(cat.photos[1].url(), "/uploads/tom-2.jpg");
        assert_eq!(cat.user.unwrap().id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_cat_deserializes_without_optional_fields() {
        let json = r#"{
            "_id": "abc124",
            "name": "Stray",
            "age": "Kitten",
            "gender": "Unknown"
        }"#;

        let cat: Cat = serde_json::from_str(json).unwrap();
        assert!(cat.photos.is_empty());
        assert!(cat.user.is_none());
        assert!(!cat.adopted);
        assert_eq!(cat.location, "");
    }

    #[test]
    fn test_user_deserializes() {
        let json = r#"{ "_id": "u9", "name": "Maya", "phone": "911234567890", "location": "Thrissur" }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "u9");
        assert_eq!(user.name, "Maya");
        assert_eq!(user.email, "");
    }

    #[test]
    fn test_age_round_trips_as_plain_string() {
        let age: AgeGroup = serde_json::from_str("\"Senior\"").unwrap();
        assert_eq!(age, AgeGroup::Senior);
        assert_eq!(serde_json::to_string(&age).unwrap(), "\"Senior\"");
    }
}
