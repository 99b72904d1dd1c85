use serde::{Deserialize, Deserializer, Serialize};

/// Regions an idea can be filed under.
pub const REGIONS: [&str; 7] = [
    "Africa",
    "Asia",
    "Europe",
    "North America",
    "South America",
    "Oceania",
    "Antarctica",
];

/// Idea as returned by the API.
///
/// The API sends `null` for unset columns, so every field except `id` falls
/// back to its default instead of failing the whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: i64,
    #[serde(rename = "colaborative", default, deserialize_with = "null_as_default")]
    pub collaborative: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_shortlisted: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub approved: bool,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_voted: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Display bucket for reward points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointsTier {
    High,
    Medium,
    Low,
}

impl PointsTier {
    pub fn css_class(&self) -> &'static str {
        match self {
            PointsTier::High => "points-high",
            PointsTier::Medium => "points-medium",
            PointsTier::Low => "points-low",
        }
    }
}

/// Direction of a vote request. `Down` withdraws an earlier `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

impl Idea {
    pub fn points_tier(&self) -> PointsTier {
        if self.points > 10 {
            PointsTier::High
        } else if self.points > 5 {
            PointsTier::Medium
        } else {
            PointsTier::Low
        }
    }

    /// Display-only ownership check against the id decoded from the session token.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == Some(user_id)
    }

    /// The vote a click on the vote button sends.
    pub fn next_vote(&self) -> VoteType {
        if self.has_voted { VoteType::Down } else { VoteType::Up }
    }

    pub fn toggle_shortlist(&mut self) {
        self.is_shortlisted = !self.is_shortlisted;
    }
}

/// Owner-editable fields, used for both submission and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IdeaDraft {
    pub title: String,
    pub description: String,
    pub region: String,
    #[serde(rename = "colaborative")]
    pub collaborative: bool,
}

impl IdeaDraft {
    pub fn is_region(&self, region: &str) -> bool {
        self.region == region
    }
}

impl From<&Idea> for IdeaDraft {
    fn from(idea: &Idea) -> Self {
        Self {
            title: idea.title.clone(),
            description: idea.description.clone(),
            region: idea.region.clone(),
            collaborative: idea.collaborative,
        }
    }
}

/// Vote button input. `voted` echoes the state the page showed.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteForm {
    #[serde(default)]
    pub voted: bool,
    pub csrf_token: String,
}

/// Form input for submitting or updating an idea.
#[derive(Debug, Clone, Deserialize)]
pub struct IdeaForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub region: String,
    /// Checkbox: present only when ticked.
    pub collaborative: Option<String>,
    pub csrf_token: String,
}

impl IdeaForm {
    pub fn to_draft(&self) -> IdeaDraft {
        IdeaDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            region: self.region.trim().to_string(),
            collaborative: self.collaborative.is_some(),
        }
    }
}

/// Partial update sent as `PUT /ideas/{id}`. Only set fields go on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IdeaPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(rename = "colaborative", skip_serializing_if = "Option::is_none")]
    pub collaborative: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_shortlisted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
}

impl IdeaPatch {
    pub fn shortlist(is_shortlisted: bool) -> Self {
        Self { is_shortlisted: Some(is_shortlisted), ..Self::default() }
    }

    pub fn approval(approved: bool) -> Self {
        Self { approved: Some(approved), ..Self::default() }
    }

    /// Owner edit. Any edit sends the idea back for approval.
    pub fn edit(draft: &IdeaDraft) -> Self {
        Self {
            title: Some(draft.title.clone()),
            description: Some(draft.description.clone()),
            region: Some(draft.region.clone()),
            collaborative: Some(draft.collaborative),
            approved: Some(false),
            ..Self::default()
        }
    }
}
