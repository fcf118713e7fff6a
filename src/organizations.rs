//! Organizations.
//!
//! GitHub API docs: <https://docs.github.com/en/rest/orgs>

use crate::{ListOptions, Response, Timestamp};

/// An organization.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Organization
{
	/// The organization’s slug.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub login: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub node_id: Option<String>,
	/// The display name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub company: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub blog: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub billing_email: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub twitter_username: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_verified: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub has_organization_projects: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub has_repository_projects: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub public_repos: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub total_private_repos: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub followers: Option<u64>,
	/// One of `read`, `write`, `admin`, or `none`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub default_repository_permission: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub members_can_create_repositories: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub two_factor_requirement_enabled: Option<bool>,
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub type_: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub avatar_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub html_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub created_at: Option<Timestamp>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<Timestamp>,
}

/// Handle for the organization endpoints of the GitHub API, see [crate::Client::organizations].
pub struct OrganizationsService<'a>
{
	#[doc(hidden)]
	client: &'a crate::Client,
}

impl crate::Client
{
	/// Access the organization endpoints.
	pub fn organizations(&self) -> OrganizationsService<'_>
	{
		OrganizationsService{client: self}
	}
}

impl<'a> OrganizationsService<'a>
{
	/// Get an organization by its slug.
	pub async fn get(&self, organization: &str) -> Result<(Organization, Response), crate::Error>
	{
		self.client.get(format!("orgs/{organization}")).await
	}

	/// Update an organization’s profile and member privileges. Only the fields that are set are
	/// changed.
	pub async fn edit(&self, organization: &str, changes: &Organization)
		-> Result<(Organization, Response), crate::Error>
	{
		self.client.patch(format!("orgs/{organization}"), changes).await
	}

	/// List the organizations of the authenticated user.
	pub async fn list_for_authenticated_user(&self, options: Option<&ListOptions>)
		-> Result<(Vec<Organization>, Response), crate::Error>
	{
		self.client.get(crate::add_options("user/orgs", options)?).await
	}

	/// List the public organization memberships of a user.
	pub async fn list_for_user(&self, user: &str, options: Option<&ListOptions>)
		-> Result<(Vec<Organization>, Response), crate::Error>
	{
		self.client.get(crate::add_options(&format!("users/{user}/orgs"), options)?).await
	}
}
