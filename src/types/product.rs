use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product the user has visited, tracked with its last-viewed time.
///
/// Field names follow the persisted web format (`viewedAt` in camelCase), so
/// blobs written by the storefront hydrate without conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewedProduct {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
    #[serde(with = "viewed_at_format")]
    pub viewed_at: DateTime<Utc>,
}

impl ViewedProduct {
    /// Returns true when the row has somewhere to navigate to.
    pub fn has_link(&self) -> bool {
        !self.link.trim().is_empty()
    }

    /// Returns true when a thumbnail source is present.
    pub fn has_image(&self) -> bool {
        !self.image.trim().is_empty()
    }
}

/// Input to the store's write path. The store stamps `viewed_at` itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewViewedProduct {
    pub id: String,
    pub name: String,
    pub image: String,
    pub link: String,
}

impl NewViewedProduct {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        image: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: image.into(),
            link: link.into(),
        }
    }

    pub(crate) fn stamp(self, viewed_at: DateTime<Utc>) -> ViewedProduct {
        ViewedProduct {
            id: self.id,
            name: self.name,
            image: self.image,
            link: self.link,
            viewed_at,
        }
    }
}

/// `viewedAt` is written as RFC 3339 and read back from either RFC 3339
/// text or epoch milliseconds.
mod viewed_at_format {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Text(String),
        Millis(i64),
        Fractional(f64),
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| D::Error::custom(format!("invalid viewedAt '{}': {}", text, e))),
            RawTimestamp::Millis(ms) => Utc
                .timestamp_millis_opt(ms)
                .single()
                .ok_or_else(|| D::Error::custom(format!("viewedAt out of range: {}", ms))),
            RawTimestamp::Fractional(ms) => Utc
                .timestamp_millis_opt(ms.floor() as i64)
                .single()
                .ok_or_else(|| D::Error::custom(format!("viewedAt out of range: {}", ms))),
        }
    }
}
