use serde::{Deserialize, Deserializer, Serialize};

/// The end-user tied to a membership. Every field may be absent upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    #[serde(default)]
    pub profile_pic_url_32: Option<String>,
    #[serde(default)]
    pub profile_pic_url_64: Option<String>,
    #[serde(default)]
    pub profile_pic_url_128: Option<String>,
    #[serde(default, deserialize_with = "opaque_timestamp")]
    pub created_at: Option<String>,
}

impl CustomerProfile {
    pub fn display_name(&self) -> &str {
        non_empty(&self.name)
            .or_else(|| non_empty(&self.username))
            .unwrap_or("No name")
    }

    pub fn initial(&self) -> char {
        non_empty(&self.name)
            .and_then(|name| name.chars().next())
            .unwrap_or('?')
    }

    pub fn avatar_url(&self) -> Option<&str> {
        non_empty(&self.profile_pic_url_64)
    }
}

/// One active membership as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRecord {
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub status: String,
    #[serde(default, deserialize_with = "nullable_customer")]
    pub customer: CustomerProfile,
    #[serde(default, deserialize_with = "opaque_timestamp")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "opaque_timestamp")]
    pub updated_at: Option<String>,
}

/// One page of the listing response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MembershipPage {
    #[serde(default, deserialize_with = "nullable_records")]
    pub data: Vec<MembershipRecord>,
}

impl MembershipPage {
    pub fn new(data: Vec<MembershipRecord>) -> Self {
        Self { data }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Epoch(i64),
    Fractional(f64),
}

// Timestamps are kept verbatim; the upstream sends either strings or epoch numbers.
fn opaque_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    Ok(raw.map(|ts| match ts {
        RawTimestamp::Text(text) => text,
        RawTimestamp::Epoch(secs) => secs.to_string(),
        RawTimestamp::Fractional(secs) => secs.to_string(),
    }))
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_customer<'de, D>(deserializer: D) -> Result<CustomerProfile, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<CustomerProfile>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_records<'de, D>(deserializer: D) -> Result<Vec<MembershipRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<MembershipRecord>>::deserialize(deserializer)?.unwrap_or_default())
}
