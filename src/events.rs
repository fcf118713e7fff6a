//! Webhook event payloads as delivered by the GitHub server.
//!
//! GitHub API docs: <https://docs.github.com/en/webhooks/webhook-events-and-payloads>

use crate::{Installation, Organization, PullRequest, PullRequestComment, Repository, Timestamp,
	User};

/// Type of a Git ref object.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefType
{
	Branch,
	Tag,
}

/// Configuration of a webhook, as included in ping events.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Hook
{
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<u64>,
	/// `Repository`, `Organization`, or `App`.
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub type_: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub active: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub events: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub app_id: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub created_at: Option<Timestamp>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<Timestamp>,
}

/// The previous value of an edited field.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct EditFrom
{
	#[serde(skip_serializing_if = "Option::is_none")]
	pub from: Option<String>,
}

/// The changes to a resource if the action was `edited`.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct EditChange
{
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<EditFrom>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body: Option<EditFrom>,
}

/// Membership of a user in an organization.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Membership
{
	/// `active` or `pending`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// `admin`, `member`, or `billing_manager`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub organization_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user: Option<User>,
}

/// Sent when a webhook is created, to check that deliveries arrive.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PingEvent
{
	/// A random string of GitHub zen.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub zen: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hook_id: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hook: Option<Hook>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub repository: Option<Repository>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub organization: Option<Organization>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sender: Option<User>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub installation: Option<Installation>,
}

/// Sent when a branch or tag is created.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CreateEvent
{
	/// The name of the created ref, without `refs/heads/` or `refs/tags/`.
	#[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
	pub ref_: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ref_type: Option<RefType>,
	/// The name of the repository’s default branch (usually `main`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub master_branch: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// `user` or `deploy_key`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pusher_type: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub repository: Option<Repository>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub organization: Option<Organization>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sender: Option<User>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub installation: Option<Installation>,
}

/// Sent on activity related to a pull request.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PullRequestEvent
{
	/// For example `opened`, `edited`, `closed`, `reopened`, or `synchronize`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub action: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub number: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pull_request: Option<PullRequest>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub changes: Option<EditChange>,
	/// The commit the head branch pointed to before a `synchronize` action.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub before: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub after: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub requested_reviewer: Option<User>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub repository: Option<Repository>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub organization: Option<Organization>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sender: Option<User>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub installation: Option<Installation>,
}

/// Sent on activity related to a review comment on a pull request’s diff.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PullRequestReviewCommentEvent
{
	/// `created`, `edited`, or `deleted`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub action: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub comment: Option<PullRequestComment>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pull_request: Option<PullRequest>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub changes: Option<EditChange>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub repository: Option<Repository>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub organization: Option<Organization>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sender: Option<User>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub installation: Option<Installation>,
}

/// Sent on activity related to an installation of a GitHub App.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct InstallationEvent
{
	/// For example `created`, `deleted`, `suspend`, `unsuspend`, or `new_permissions_accepted`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub action: Option<String>,
	/// The repositories the installation can access.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub repositories: Option<Vec<Repository>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub requester: Option<User>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sender: Option<User>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub installation: Option<Installation>,
}

/// Sent when repositories are added to or removed from an installation of a GitHub App.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct InstallationRepositoriesEvent
{
	/// `added` or `removed`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub action: Option<String>,
	/// `all` or `selected`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub repository_selection: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub repositories_added: Option<Vec<Repository>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub repositories_removed: Option<Vec<Repository>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sender: Option<User>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub installation: Option<Installation>,
}

/// Sent on activity related to an organization and its members.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct OrganizationEvent
{
	/// For example `member_added`, `member_removed`, `member_invited`, or `renamed`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub action: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub membership: Option<Membership>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub organization: Option<Organization>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sender: Option<User>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub installation: Option<Installation>,
}

/// A decoded webhook event, selected by the `X-GitHub-Event` header of the delivery.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event
{
	Ping(PingEvent),
	Create(CreateEvent),
	PullRequest(PullRequestEvent),
	PullRequestReviewComment(PullRequestReviewCommentEvent),
	Installation(InstallationEvent),
	InstallationRepositories(InstallationRepositoriesEvent),
	Organization(OrganizationEvent),
}

impl Event
{
	/// Decode a webhook payload according to its event type.
	///
	/// # Arguments
	/// - `event_type`: The value of the `X-GitHub-Event` header (example: `pull_request`).
	/// - `payload`: The raw JSON payload.
	pub fn parse(event_type: &str, payload: &[u8]) -> Result<Self, crate::Error>
	{
		fn decode<T>(payload: &[u8]) -> Result<T, crate::Error>
		where
			T: serde::de::DeserializeOwned,
		{
			serde_json::from_slice(payload).map_err(crate::Error::DecodePayloadBody)
		}

		let event = match event_type
		{
			"ping" => Self::Ping(decode(payload)?),
			"create" => Self::Create(decode(payload)?),
			"pull_request" => Self::PullRequest(decode(payload)?),
			"pull_request_review_comment" => Self::PullRequestReviewComment(decode(payload)?),
			"installation" => Self::Installation(decode(payload)?),
			"installation_repositories" => Self::InstallationRepositories(decode(payload)?),
			"organization" => Self::Organization(decode(payload)?),
			_ => return Err(crate::Error::UnknownWebhookEvent(event_type.to_owned())),
		};

		Ok(event)
	}

	/// The event type as sent in the `X-GitHub-Event` header.
	pub fn event_type(&self) -> &'static str
	{
		match self
		{
			Self::Ping(_) => "ping",
			Self::Create(_) => "create",
			Self::PullRequest(_) => "pull_request",
			Self::PullRequestReviewComment(_) => "pull_request_review_comment",
			Self::Installation(_) => "installation",
			Self::InstallationRepositories(_) => "installation_repositories",
			Self::Organization(_) => "organization",
		}
	}

	/// The action that triggered this event, if the event type distinguishes actions.
	pub fn action(&self) -> Option<&str>
	{
		match self
		{
			Self::Ping(_) | Self::Create(_) => None,
			Self::PullRequest(event) => event.action.as_deref(),
			Self::PullRequestReviewComment(event) => event.action.as_deref(),
			Self::Installation(event) => event.action.as_deref(),
			Self::InstallationRepositories(event) => event.action.as_deref(),
			Self::Organization(event) => event.action.as_deref(),
		}
	}

	/// The user who caused this event.
	pub fn sender(&self) -> Option<&User>
	{
		match self
		{
			Self::Ping(event) => event.sender.as_ref(),
			Self::Create(event) => event.sender.as_ref(),
			Self::PullRequest(event) => event.sender.as_ref(),
			Self::PullRequestReviewComment(event) => event.sender.as_ref(),
			Self::Installation(event) => event.sender.as_ref(),
			Self::InstallationRepositories(event) => event.sender.as_ref(),
			Self::Organization(event) => event.sender.as_ref(),
		}
	}

	/// The GitHub App installation this event was delivered to, if any.
	pub fn installation(&self) -> Option<&Installation>
	{
		match self
		{
			Self::Ping(event) => event.installation.as_ref(),
			Self::Create(event) => event.installation.as_ref(),
			Self::PullRequest(event) => event.installation.as_ref(),
			Self::PullRequestReviewComment(event) => event.installation.as_ref(),
			Self::Installation(event) => event.installation.as_ref(),
			Self::InstallationRepositories(event) => event.installation.as_ref(),
			Self::Organization(event) => event.installation.as_ref(),
		}
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn empty_events_serialize_to_empty_objects()
	{
		assert_eq!(serde_json::to_string(&PingEvent::default()).unwrap(), "{}");
		assert_eq!(serde_json::to_string(&CreateEvent::default()).unwrap(), "{}");
		assert_eq!(serde_json::to_string(&PullRequestEvent::default()).unwrap(), "{}");
		assert_eq!(serde_json::to_string(&PullRequestReviewCommentEvent::default()).unwrap(), "{}");
		assert_eq!(serde_json::to_string(&InstallationEvent::default()).unwrap(), "{}");
		assert_eq!(serde_json::to_string(&InstallationRepositoriesEvent::default()).unwrap(), "{}");
		assert_eq!(serde_json::to_string(&OrganizationEvent::default()).unwrap(), "{}");
	}

	#[test]
	fn parses_create_event()
	{
		let payload = br#"{
			"ref": "main",
			"ref_type": "branch",
			"master_branch": "main",
			"pusher_type": "user",
			"repository": {"name": "new-repository", "owner": {"login": "example-organization"}},
			"sender": {"login": "octocat"}
		}"#;

		let event = Event::parse("create", payload).unwrap();
		assert_eq!(event.event_type(), "create");
		assert_eq!(event.action(), None);
		assert_eq!(event.sender().and_then(|sender| sender.login.as_deref()), Some("octocat"));

		let event = match event
		{
			Event::Create(event) => event,
			other => panic!("unexpected event {other:?}"),
		};

		assert_eq!(event.ref_.as_deref(), Some("main"));
		assert_eq!(event.ref_type, Some(RefType::Branch));
		assert_eq!(event.repository.and_then(|repository| repository.owner)
			.and_then(|owner| owner.login).as_deref(), Some("example-organization"));
	}

	#[test]
	fn review_comment_event_matches_api_shape()
	{
		let event = PullRequestReviewCommentEvent
		{
			action: Some("edited".to_owned()),
			comment: Some(PullRequestComment
			{
				id: Some(1),
				body: Some("new".to_owned()),
				..Default::default()
			}),
			changes: Some(EditChange
			{
				body: Some(EditFrom{from: Some("old".to_owned())}),
				..Default::default()
			}),
			repository: Some(Repository{id: Some(2), ..Default::default()}),
			organization: Some(Organization{login: Some("o".to_owned()), ..Default::default()}),
			sender: Some(User{login: Some("s".to_owned()), ..Default::default()}),
			installation: Some(Installation{id: Some(3), ..Default::default()}),
			..Default::default()
		};

		let expected = serde_json::json!(
		{
			"action": "edited",
			"comment": {"id": 1, "body": "new"},
			"changes": {"body": {"from": "old"}},
			"repository": {"id": 2},
			"organization": {"login": "o"},
			"sender": {"login": "s"},
			"installation": {"id": 3},
		});

		assert_eq!(serde_json::to_value(&event).unwrap(), expected);

		let payload = serde_json::to_vec(&expected).unwrap();
		let parsed = Event::parse("pull_request_review_comment", &payload).unwrap();

		assert_eq!(parsed.action(), Some("edited"));
		assert_eq!(parsed.installation().and_then(|installation| installation.id), Some(3));
		assert_eq!(parsed, Event::PullRequestReviewComment(event));
	}

	#[test]
	fn rejects_unknown_event_types()
	{
		assert!(matches!(Event::parse("star", b"{}"),
			Err(crate::Error::UnknownWebhookEvent(event_type)) if event_type == "star"));
	}

	#[test]
	fn rejects_malformed_payloads()
	{
		assert!(matches!(Event::parse("ping", b"not json"),
			Err(crate::Error::DecodePayloadBody(_))));
		assert!(matches!(Event::parse("create", br#"{"ref_type": "commit"}"#),
			Err(crate::Error::DecodePayloadBody(_))));
	}
}
