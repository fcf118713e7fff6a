//! Data models shared between several parts of the GitHub API.
//!
//! All fields are optional so that partial payloads (webhook deliveries, list responses, request
//! bodies) round-trip without inventing values. Field names match the GitHub API exactly.

/// Timestamps as used throughout the GitHub API (RFC 3339, UTC).
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A GitHub user or organization account.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct User
{
	/// The user’s handle.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub login: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub node_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub avatar_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub html_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	/// Either `User`, `Organization`, or `Bot`.
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub type_: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub site_admin: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
}

/// A repository.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Repository
{
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub node_id: Option<String>,
	/// The name of the repository.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// `owner/name`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub full_name: Option<String>,
	/// Handle of the user or organization owning the repository.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub owner: Option<User>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub private: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fork: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub default_branch: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub html_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub created_at: Option<Timestamp>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<Timestamp>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pushed_at: Option<Timestamp>,
}

/// Reaction counts summarized for a comment or issue.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Reactions
{
	#[serde(skip_serializing_if = "Option::is_none")]
	pub total_count: Option<u64>,
	#[serde(rename = "+1", skip_serializing_if = "Option::is_none")]
	pub plus_one: Option<u64>,
	#[serde(rename = "-1", skip_serializing_if = "Option::is_none")]
	pub minus_one: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub laugh: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub confused: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub heart: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hooray: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rocket: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub eyes: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
}

/// Sort direction for list operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction
{
	Asc,
	Desc,
}

/// Paging parameters understood by all list operations.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize)]
pub struct ListOptions
{
	/// The page of results to retrieve, starting at 1.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub page: Option<u32>,
	/// The number of results per page (at most 100).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub per_page: Option<u32>,
}

/// Data model representing a response we’re going to ignore.
#[derive(Debug, Default, serde::Deserialize)]
pub struct IgnoreResponse
{
}
