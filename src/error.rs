/// All errors that may occur while configuring the client, talking to the GitHub API, or
/// validating webhook deliveries.
#[derive(Debug, thiserror::Error)]
pub enum Error
{
	#[error("could not read config file")]
	ReadConfigFile(#[source] std::io::Error),
	#[error("could not parse config file")]
	ParseConfigFile(#[source] serde_yaml::Error),

	#[error("could not create HTTP client")]
	CreateHttpClient(#[source] reqwest::Error),
	#[error("GitHub API base URL “{0}” must end with a slash")]
	BaseUrlWithoutTrailingSlash(url::Url),

	#[error("could not read private GitHub App key file")]
	ReadPrivateGitHubAppKeyFile(#[source] std::io::Error),
	#[error("could not parse private GitHub App key file")]
	ParsePrivateGitHubAppKeyFile(#[source] jsonwebtoken::errors::Error),
	#[error("could not create JWT")]
	CreateJwt(#[source] jsonwebtoken::errors::Error),
	#[error("could not obtain GitHub App installation access token")]
	ObtainGitHubAppInstallationToken(#[source] Box<crate::Error>),

	#[error("could not parse URL")]
	ParseUrl(#[source] url::ParseError),
	#[error("could not encode query parameters")]
	EncodeQuery(#[source] serde_urlencoded::ser::Error),
	#[error("could not encode request body")]
	EncodeRequestBody(#[source] serde_json::Error),
	#[error("invalid header value")]
	InvalidHeaderValue(#[source] reqwest::header::InvalidHeaderValue),

	#[error("could not make GitHub API request")]
	MakeGitHubApiRequest(#[source] reqwest_middleware::Error),
	#[error("could not read GitHub API response body")]
	ReadGitHubApiResponseBody(#[source] reqwest::Error),
	#[error("received GitHub API error (status code {}): {}", .0.status_code, .0.response.message)]
	ReceivedGitHubApiError(Box<ApiError>),
	#[error("GitHub API rate limit exceeded, resets at {}", .rate.reset)]
	RateLimited
	{
		rate: crate::Rate,
		error: Box<ApiError>,
	},
	#[error("GitHub API secondary rate limit exceeded")]
	SecondaryRateLimited
	{
		/// How long to wait before making another request, if the server said so.
		retry_after: Option<std::time::Duration>,
		error: Box<ApiError>,
	},
	#[error("could not decode GitHub API response body")]
	DecodeGitHubApiResponseBody(#[source] serde_json::Error),

	#[error("could not decode payload body")]
	DecodePayloadBody(#[source] serde_json::Error),
	#[error("missing payload signature")]
	MissingPayloadSignature,
	#[error("invalid payload signature")]
	InvalidPayloadSignature,
	#[error("unknown webhook event type “{0}”")]
	UnknownWebhookEvent(String),
}

impl Error
{
	/// The HTTP status code of the response if this error stems from a non-success response of
	/// the GitHub API.
	pub fn status_code(&self) -> Option<reqwest::StatusCode>
	{
		self.api_error().map(|error| error.status_code)
	}

	/// The decoded error response if this error stems from a non-success response of the GitHub
	/// API.
	pub fn api_error(&self) -> Option<&ApiError>
	{
		match self
		{
			Self::ReceivedGitHubApiError(error)
			| Self::RateLimited{error, ..}
			| Self::SecondaryRateLimited{error, ..} => Some(error),
			_ => None,
		}
	}
}

// Allow this crate’s error type to be used for rejecting webhook deliveries
impl warp::reject::Reject for Error
{
}

/// A non-success response of the GitHub API along with the request it belongs to.
#[derive(Debug)]
pub struct ApiError
{
	pub status_code: reqwest::StatusCode,
	pub url: url::Url,
	pub response: ErrorResponse,
}

/// Error body as returned by the GitHub API for failed requests.
///
/// If the server did not respond with a JSON body, the raw response text ends up in `message`.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ErrorResponse
{
	#[serde(default)]
	pub message: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub errors: Vec<FieldError>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub documentation_url: Option<String>,
}

/// Details about why a specific field of a request was rejected.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FieldError
{
	#[serde(skip_serializing_if = "Option::is_none")]
	pub resource: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<String>,
	/// One of `missing`, `missing_field`, `invalid`, `already_exists`, `unprocessable`, or
	/// `custom`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn decodes_validation_failure()
	{
		let body = r#"{
			"message": "Validation Failed",
			"errors": [{"resource": "PullRequestReviewComment", "field": "position", "code": "invalid"}],
			"documentation_url": "https://docs.github.com/rest"
		}"#;

		let response: ErrorResponse = serde_json::from_str(body).unwrap();

		assert_eq!(response.message, "Validation Failed");
		assert_eq!(response.errors, vec![FieldError
		{
			resource: Some("PullRequestReviewComment".to_owned()),
			field: Some("position".to_owned()),
			code: Some("invalid".to_owned()),
			message: None,
		}]);
		assert_eq!(response.documentation_url.as_deref(), Some("https://docs.github.com/rest"));
	}

	#[test]
	fn exposes_status_code_of_api_errors()
	{
		let error = Error::ReceivedGitHubApiError(Box::new(ApiError
		{
			status_code: reqwest::StatusCode::NOT_FOUND,
			url: url::Url::parse("https://api.github.com/repos/o/r").unwrap(),
			response: ErrorResponse{message: "Not Found".to_owned(), ..Default::default()},
		}));

		assert_eq!(error.status_code(), Some(reqwest::StatusCode::NOT_FOUND));
		assert_eq!(error.to_string(), "received GitHub API error (status code 404 Not Found): Not Found");
		assert_eq!(Error::MissingPayloadSignature.status_code(), None);
	}
}
