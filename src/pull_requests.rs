//! Pull requests and their review comments.
//!
//! GitHub API docs: <https://docs.github.com/en/rest/pulls>

use crate::{Direction, ListOptions, Reactions, Repository, Response, Timestamp, User};

/// A pull request.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PullRequest
{
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub node_id: Option<String>,
	/// Number uniquely identifying the pull request within its repository.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub number: Option<u64>,
	/// Either `open` or `closed`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub locked: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user: Option<User>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub draft: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub merged: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mergeable: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub merged_by: Option<User>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub merge_commit_sha: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub comments: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub review_comments: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub commits: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub additions: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub deletions: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub changed_files: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub head: Option<PullRequestBranch>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub base: Option<PullRequestBranch>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub author_association: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub html_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub created_at: Option<Timestamp>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<Timestamp>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub closed_at: Option<Timestamp>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub merged_at: Option<Timestamp>,
}

/// The head or base branch of a pull request.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PullRequestBranch
{
	/// `owner:branch`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
	pub ref_: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sha: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub repo: Option<Repository>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user: Option<User>,
}

/// A review comment on a portion of the unified diff of a pull request.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PullRequestComment
{
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub node_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub in_reply_to_id: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body: Option<String>,
	/// The relative path of the file the comment applies to.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub diff_hunk: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pull_request_review_id: Option<u64>,
	/// The line index in the diff the comment applies to.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub position: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub original_position: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub start_line: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub line: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub original_line: Option<u64>,
	/// Either `LEFT` or `RIGHT`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub side: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub start_side: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub commit_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub original_commit_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user: Option<User>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reactions: Option<Reactions>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub author_association: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub created_at: Option<Timestamp>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<Timestamp>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub html_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pull_request_url: Option<String>,
}

/// Query parameters for [PullRequestsService::list].
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize)]
pub struct PullRequestListOptions
{
	/// `open`, `closed`, or `all` (GitHub defaults to `open`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Only pull requests with this head, in the format `user:ref-name`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub head: Option<String>,
	/// Only pull requests with this base branch.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub base: Option<String>,
	/// `created`, `updated`, `popularity`, or `long-running`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sort: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub direction: Option<Direction>,
	#[serde(flatten)]
	pub list_options: ListOptions,
}

/// Query parameters for [PullRequestsService::list_comments].
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize)]
pub struct PullRequestListCommentsOptions
{
	/// `created` or `updated`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sort: Option<String>,
	/// Ignored unless `sort` is given.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub direction: Option<Direction>,
	/// Only comments updated at or after this time.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub since: Option<Timestamp>,
	#[serde(flatten)]
	pub list_options: ListOptions,
}

/// Which review comments to list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CommentScope
{
	/// The review comments of all pull requests in the repository.
	Repository,
	/// The review comments of the pull request with this number.
	PullRequest(u64),
}

#[doc(hidden)]
#[derive(serde::Serialize)]
struct ReplyRequest<'a>
{
	body: &'a str,
	in_reply_to: u64,
}

/// Handle for the pull request endpoints of the GitHub API, see [crate::Client::pull_requests].
pub struct PullRequestsService<'a>
{
	#[doc(hidden)]
	client: &'a crate::Client,
}

impl crate::Client
{
	/// Access the pull request endpoints.
	pub fn pull_requests(&self) -> PullRequestsService<'_>
	{
		PullRequestsService{client: self}
	}
}

impl<'a> PullRequestsService<'a>
{
	/// Get a single pull request.
	pub async fn get(&self, owner: &str, repo: &str, number: u64)
		-> Result<(PullRequest, Response), crate::Error>
	{
		self.client.get(format!("repos/{owner}/{repo}/pulls/{number}")).await
	}

	/// List the pull requests of a repository.
	pub async fn list(&self, owner: &str, repo: &str, options: Option<&PullRequestListOptions>)
		-> Result<(Vec<PullRequest>, Response), crate::Error>
	{
		let endpoint = crate::add_options(&format!("repos/{owner}/{repo}/pulls"), options)?;

		self.client.get(endpoint).await
	}

	/// List review comments, either on a single pull request or on all pull requests of the
	/// repository. Comments are ordered by ascending ID unless sorted otherwise.
	pub async fn list_comments(
		&self,
		owner: &str,
		repo: &str,
		scope: CommentScope,
		options: Option<&PullRequestListCommentsOptions>)
		-> Result<(Vec<PullRequestComment>, Response), crate::Error>
	{
		let endpoint = match scope
		{
			CommentScope::Repository => format!("repos/{owner}/{repo}/pulls/comments"),
			CommentScope::PullRequest(number) =>
				format!("repos/{owner}/{repo}/pulls/{number}/comments"),
		};
		let endpoint = crate::add_options(&endpoint, options)?;

		self.client.get(endpoint).await
	}

	/// Get a single review comment.
	pub async fn get_comment(&self, owner: &str, repo: &str, comment_id: u64)
		-> Result<(PullRequestComment, Response), crate::Error>
	{
		self.client.get(format!("repos/{owner}/{repo}/pulls/comments/{comment_id}")).await
	}

	/// Create a review comment on a pull request.
	pub async fn create_comment(
		&self,
		owner: &str,
		repo: &str,
		number: u64,
		comment: &PullRequestComment)
		-> Result<(PullRequestComment, Response), crate::Error>
	{
		self.client.post(format!("repos/{owner}/{repo}/pulls/{number}/comments"), comment).await
	}

	/// Reply to an existing top-level review comment on a pull request.
	pub async fn create_comment_in_reply_to(
		&self,
		owner: &str,
		repo: &str,
		number: u64,
		body: &str,
		comment_id: u64)
		-> Result<(PullRequestComment, Response), crate::Error>
	{
		let reply = ReplyRequest{body, in_reply_to: comment_id};

		self.client.post(format!("repos/{owner}/{repo}/pulls/{number}/comments"), &reply).await
	}

	/// Update the body of a review comment.
	pub async fn edit_comment(
		&self,
		owner: &str,
		repo: &str,
		comment_id: u64,
		comment: &PullRequestComment)
		-> Result<(PullRequestComment, Response), crate::Error>
	{
		self.client.patch(format!("repos/{owner}/{repo}/pulls/comments/{comment_id}"), comment)
			.await
	}

	/// Delete a review comment.
	pub async fn delete_comment(&self, owner: &str, repo: &str, comment_id: u64)
		-> Result<Response, crate::Error>
	{
		self.client.delete(format!("repos/{owner}/{repo}/pulls/comments/{comment_id}")).await
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	fn timestamp() -> Timestamp
	{
		chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2002, 2, 10, 15, 30, 0).unwrap()
	}

	#[test]
	fn empty_models_serialize_to_empty_objects()
	{
		assert_eq!(serde_json::to_string(&PullRequest::default()).unwrap(), "{}");
		assert_eq!(serde_json::to_string(&PullRequestBranch::default()).unwrap(), "{}");
		assert_eq!(serde_json::to_string(&PullRequestComment::default()).unwrap(), "{}");
	}

	#[test]
	fn comment_matches_api_shape()
	{
		let comment = PullRequestComment
		{
			id: Some(10),
			in_reply_to_id: Some(8),
			body: Some("Test comment".to_owned()),
			path: Some("file1.txt".to_owned()),
			diff_hunk: Some("@@ -16,33 +16,40 @@ fmt.Errorf(format, args...)".to_owned()),
			position: Some(1),
			original_position: Some(4),
			commit_id: Some("ab".to_owned()),
			original_commit_id: Some("9c".to_owned()),
			user: Some(User
			{
				login: Some("ll".to_owned()),
				id: Some(123),
				..Default::default()
			}),
			reactions: Some(Reactions
			{
				total_count: Some(3),
				plus_one: Some(2),
				minus_one: Some(1),
				..Default::default()
			}),
			created_at: Some(timestamp()),
			updated_at: Some(timestamp()),
			url: Some("pullrequestcommentUrl".to_owned()),
			..Default::default()
		};

		let expected = serde_json::json!(
		{
			"id": 10,
			"in_reply_to_id": 8,
			"body": "Test comment",
			"path": "file1.txt",
			"diff_hunk": "@@ -16,33 +16,40 @@ fmt.Errorf(format, args...)",
			"position": 1,
			"original_position": 4,
			"commit_id": "ab",
			"original_commit_id": "9c",
			"user": {"login": "ll", "id": 123},
			"reactions": {"total_count": 3, "+1": 2, "-1": 1},
			"created_at": "2002-02-10T15:30:00Z",
			"updated_at": "2002-02-10T15:30:00Z",
			"url": "pullrequestcommentUrl",
		});

		assert_eq!(serde_json::to_value(&comment).unwrap(), expected);
		assert_eq!(serde_json::from_value::<PullRequestComment>(expected).unwrap(), comment);
	}

	#[test]
	fn branch_ref_is_renamed()
	{
		let branch = PullRequestBranch
		{
			ref_: Some("main".to_owned()),
			sha: Some("6dcb09b".to_owned()),
			..Default::default()
		};

		assert_eq!(serde_json::to_value(&branch).unwrap(),
			serde_json::json!({"ref": "main", "sha": "6dcb09b"}));
	}

	#[test]
	fn encodes_list_comments_options()
	{
		let options = PullRequestListCommentsOptions
		{
			sort: Some("created".to_owned()),
			direction: Some(Direction::Asc),
			since: Some(timestamp()),
			list_options: ListOptions{page: Some(2), per_page: None},
		};

		let endpoint = crate::add_options("repos/o/r/pulls/comments", Some(&options)).unwrap();
		let url = url::Url::parse("https://api.github.com/").unwrap().join(&endpoint).unwrap();
		let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();

		assert_eq!(query, vec![
			("sort".to_owned(), "created".to_owned()),
			("direction".to_owned(), "asc".to_owned()),
			("since".to_owned(), "2002-02-10T15:30:00Z".to_owned()),
			("page".to_owned(), "2".to_owned()),
		]);
	}

	#[test]
	fn encodes_list_options()
	{
		let options = PullRequestListOptions
		{
			state: Some("closed".to_owned()),
			head: Some("octocat:feature".to_owned()),
			direction: Some(Direction::Desc),
			..Default::default()
		};

		assert_eq!(crate::add_options("repos/o/r/pulls", Some(&options)).unwrap(),
			"repos/o/r/pulls?state=closed&head=octocat%3Afeature&direction=desc");
	}
}
