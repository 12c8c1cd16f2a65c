// ── Catalog entities ──
//
// Campsites, partners and promotions share the same card-like shape:
// a name, a description, an image locator and a `featured` flag.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, Featured};

/// A campsite listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Image path relative to the service base URL (e.g. `images/react-lake.jpg`).
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    /// Elevation in feet, when the service provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<u32>,
}

/// A partner organisation shown on the about page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub featured: bool,
}

/// A time-limited promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

macro_rules! impl_catalog_entity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Entity for $ty {
                fn id(&self) -> EntityId {
                    self.id
                }
            }

            impl Featured for $ty {
                fn is_featured(&self) -> bool {
                    self.featured
                }
            }
        )+
    };
}

impl_catalog_entity!(Location, Partner, Promotion);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn location_decodes_wire_shape() {
        let loc: Location = serde_json::from_value(json!({
            "id": 0,
            "name": "React Lake",
            "image": "images/react-lake.jpg",
            "elevation": 1233,
            "featured": false,
            "description": "Nestled in the foothills"
        }))
        .unwrap();

        assert_eq!(loc.id, EntityId::new(0));
        assert_eq!(loc.elevation, Some(1233));
        assert!(!loc.is_featured());
    }

    #[test]
    fn missing_optional_fields_default() {
        let promo: Promotion = serde_json::from_value(json!({
            "id": 1,
            "name": "Kids Camp"
        }))
        .unwrap();

        assert!(!promo.featured);
        assert!(promo.description.is_empty());
        assert_eq!(promo.cost, None);
    }
}
