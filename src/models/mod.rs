use serde::{Deserialize, Serialize};

/// Whether a listing is offered for rent or for sale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Rent,
    Sale,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Rent => "rent",
            PropertyType::Sale => "sale",
        }
    }
}

/// Core property listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    pub description: String,
    /// Currency-agnostic integer units
    pub price: i64,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    pub bedrooms: u32,
    /// Half steps allowed (2.5 = two full baths and a half bath)
    pub bathrooms: f32,
    pub area: u32,
    pub image: String,
    #[serde(default)]
    pub featured: bool,
}

/// Stored account. The password is kept in clear text; this is a mock backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Signed-in user as remembered between runs (never carries the password)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSession {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<&User> for UserSession {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// A user's saved listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favorite {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub user_email: String,
    pub property_id: String,
    pub date_added: String,
}

/// Request to visit a property at a preferred slot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewingRequest {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub property_id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub preferred_date: String,
    pub preferred_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    pub created_at: String,
}

/// Message sent to the listing agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactRequest {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub property_id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub message: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn property_uses_document_field_names() {
        let property = Property {
            id: "7".to_string(),
            title: "Loft".to_string(),
            description: "Open plan".to_string(),
            price: 2100,
            location: "Brooklyn, New York".to_string(),
            kind: PropertyType::Rent,
            bedrooms: 1,
            bathrooms: 1.5,
            area: 700,
            image: "https://example.com/loft.jpg".to_string(),
            featured: false,
        };

        let value = serde_json::to_value(&property).unwrap();
        assert_eq!(value["_id"], json!("7"));
        assert_eq!(value["type"], json!("rent"));
        assert_eq!(value["bathrooms"], json!(1.5));
    }

    #[test]
    fn unknown_property_type_is_rejected() {
        let raw = json!({
            "_id": "1",
            "title": "t",
            "description": "d",
            "price": 1,
            "location": "l",
            "type": "lease",
            "bedrooms": 0,
            "bathrooms": 1,
            "area": 10,
            "image": "i"
        });
        assert!(serde_json::from_value::<Property>(raw).is_err());
    }

    #[test]
    fn session_drops_password() {
        let user = User {
            id: "u1".to_string(),
            email: "a@x.com".to_string(),
            name: "Ada".to_string(),
            password: "secret".to_string(),
        };
        let session = UserSession::from(&user);
        let value = serde_json::to_value(&session).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(session.email, "a@x.com");
    }
}
