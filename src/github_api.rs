/// Media type requesting the v3 REST API, as recommended by GitHub’s documentation.
pub const MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Configuration of the GitHub API client.
#[derive(serde::Deserialize)]
pub struct Config
{
	/// The base URL of the GitHub API server with a trailing slash (optional, default:
	/// <https://api.github.com/>). For GitHub Enterprise Server, this is usually
	/// `https://<hostname>/api/v3/`.
	#[serde(default = "github_com_api_base_url")]
	pub base_url: url::Url,
	/// The user agent sent along with every request (optional, defaults to this crate’s name and
	/// version). GitHub rejects requests without a user agent.
	#[serde(default = "default_user_agent")]
	pub user_agent: String,
	/// How to authenticate with the GitHub API (optional, requests are anonymous if omitted).
	#[serde(default)]
	pub credentials: Option<Credentials>,
	/// To verify that incoming webhook payloads actually come from GitHub, provide the webhook
	/// secret (optional, but recommended for production use).
	#[serde(default)]
	pub webhook_secret: Option<String>,
}

impl Default for Config
{
	fn default() -> Self
	{
		Self
		{
			base_url: github_com_api_base_url(),
			user_agent: default_user_agent(),
			credentials: None,
			webhook_secret: None,
		}
	}
}

impl std::fmt::Debug for Config
{
	fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		formatter.debug_struct("Config")
			.field("base_url", &self.base_url)
			.field("user_agent", &self.user_agent)
			.field("credentials", &self.credentials)
			.field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}

#[doc(hidden)]
fn github_com_api_base_url() -> url::Url
{
	url::Url::parse("https://api.github.com/")
		.expect("this call is infallible because we know the URL to be well-formed")
}

#[doc(hidden)]
fn default_user_agent() -> String
{
	concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned()
}

/// The ways in which the client can authenticate with the GitHub API.
#[derive(Clone, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credentials
{
	/// A personal access token, OAuth token, or installation access token, sent as a bearer token.
	Token
	{
		token: String,
	},
	/// Authenticate as an installation of a GitHub App. The client obtains installation access
	/// tokens on its own and renews them shortly before they expire.
	App
	{
		/// The numeric App ID of this GitHub App as shown at the top of its *About* page.
		app_id: u64,
		/// Path to the private key that was generated for the GitHub App. Make sure to set the
		/// permissions in such a way that other users on this machine can’t read it.
		private_key_path: std::path::PathBuf,
		/// Which installation of the GitHub App to act as.
		installation: InstallationTarget,
	},
}

impl std::fmt::Debug for Credentials
{
	fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		match self
		{
			Self::Token{..} => formatter.debug_struct("Token").finish_non_exhaustive(),
			Self::App{app_id, private_key_path, installation} => formatter.debug_struct("App")
				.field("app_id", app_id)
				.field("private_key_path", private_key_path)
				.field("installation", installation)
				.finish(),
		}
	}
}

/// Identifies the installation of a GitHub App.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallationTarget
{
	/// The installation on the organization with this slug, as included in URLs (for an
	/// organization with the URL <https://github.com/example-organization>, this would be
	/// `example-organization`).
	Organization(String),
	/// The installation with this numeric ID.
	Id(u64),
}

/// A GitHub API client.
///
/// Every call makes exactly one HTTP request. Failed requests are not retried, and the client
/// imposes no timeouts of its own. To change that, construct the client with
/// [Client::with_http_client] and pass an HTTP client with the desired middleware and timeouts.
///
/// The client can safely be shared between threads, which is achieved by internally using
/// thread-safe handles to the underlying data structures. Cloning it is cheap.
#[derive(Clone)]
pub struct Client
{
	#[doc(hidden)]
	config: std::sync::Arc<Config>,
	#[doc(hidden)]
	reqwest_client: reqwest_middleware::ClientWithMiddleware,
	#[doc(hidden)]
	authentication: std::sync::Arc<Authentication>,
}

#[doc(hidden)]
enum Authentication
{
	Anonymous,
	Token(AccessToken),
	App(AppAuthentication),
}

#[doc(hidden)]
struct AppAuthentication
{
	app_id: u64,
	private_key: jsonwebtoken::EncodingKey,
	installation: InstallationTarget,
	// The access token is protected by a read–write lock. In this way, tasks can read the token
	// without blocking each other. In the rare event that the token is about to expire, it can be
	// locked for writing in order to renew it. Thanks to tokio’s implementation of read–write
	// locks, writers take precedence over readers, so a renewal can’t be starved by tasks that
	// keep reading the old token
	access_token: tokio::sync::RwLock<Option<AccessToken>>,
}

impl Client
{
	/// Initialize a new GitHub API client with a given configuration.
	pub async fn from_config(config: Config) -> Result<Self, crate::Error>
	{
		let reqwest_client = reqwest::ClientBuilder::new()
			.build().map_err(crate::Error::CreateHttpClient)?;
		let reqwest_client = reqwest_middleware::ClientBuilder::new(reqwest_client).build();

		Self::with_http_client(config, reqwest_client).await
	}

	/// Initialize a new GitHub API client that sends its requests through the given HTTP client.
	///
	/// When authenticating as a GitHub App, this obtains the first installation access token
	/// right away, so that misconfigurations surface early.
	pub async fn with_http_client(
		config: Config,
		reqwest_client: reqwest_middleware::ClientWithMiddleware)
		-> Result<Self, crate::Error>
	{
		// Endpoints are joined onto the base URL, which would replace its last path segment
		if !config.base_url.path().ends_with('/')
		{
			return Err(crate::Error::BaseUrlWithoutTrailingSlash(config.base_url));
		}

		let authentication = match &config.credentials
		{
			None => Authentication::Anonymous,
			Some(Credentials::Token{token}) => Authentication::Token(AccessToken
			{
				token: token.clone(),
				expires_at: None,
			}),
			Some(Credentials::App{app_id, private_key_path, installation}) =>
			{
				// Read and parse the GitHub App’s private key from the .pem file
				let private_key = std::fs::read(private_key_path)
					.map_err(crate::Error::ReadPrivateGitHubAppKeyFile)?;
				let private_key = jsonwebtoken::EncodingKey::from_rsa_pem(&private_key)
					.map_err(crate::Error::ParsePrivateGitHubAppKeyFile)?;

				Authentication::App(AppAuthentication
				{
					app_id: *app_id,
					private_key,
					installation: installation.clone(),
					access_token: tokio::sync::RwLock::new(None),
				})
			},
		};

		let client = Self
		{
			config: std::sync::Arc::new(config),
			reqwest_client,
			authentication: std::sync::Arc::new(authentication),
		};

		if let Authentication::App(app) = &*client.authentication
		{
			client.installation_access_token(app).await?;
		}

		Ok(client)
	}

	/// The configuration this client was created with.
	pub fn config(&self) -> &Config
	{
		&self.config
	}

	/// Build an HTTP request to the GitHub API without sending it.
	///
	/// Authentication is attached when the request is sent with [Client::send] or
	/// [Client::send_bodyless], as installation access tokens may need to be renewed by then.
	///
	/// # Arguments
	/// - `method`: The HTTP method to use (example: [reqwest::Method::POST]).
	/// - `endpoint`: The API endpoint (without host and leading slash, example:
	///   `repos/example_organization`), optionally with a query string (see [add_options]).
	/// - `body`: A serializable type containing the request body.
	pub fn new_request<S, B>(&self, method: reqwest::Method, endpoint: S, body: Option<&B>)
		-> Result<reqwest::Request, crate::Error>
	where
		S: AsRef<str>,
		B: serde::Serialize + ?Sized,
	{
		// Build the API endpoint URL from the base URL and the endpoint path
		let url = self.config.base_url.join(endpoint.as_ref()).map_err(crate::Error::ParseUrl)?;
		let mut request = reqwest::Request::new(method, url);

		let user_agent = reqwest::header::HeaderValue::from_str(&self.config.user_agent)
			.map_err(crate::Error::InvalidHeaderValue)?;

		let headers = request.headers_mut();
		headers.insert(reqwest::header::ACCEPT, reqwest::header::HeaderValue::from_static(MEDIA_TYPE));
		headers.insert(reqwest::header::USER_AGENT, user_agent);

		if let Some(body) = body
		{
			// Append the request body if provided
			let body = serde_json::to_vec(body).map_err(crate::Error::EncodeRequestBody)?;

			request.headers_mut().insert(reqwest::header::CONTENT_TYPE,
				reqwest::header::HeaderValue::from_static("application/json"));
			*request.body_mut() = Some(body.into());
		}

		Ok(request)
	}

	/// Send a request built with [Client::new_request] and decode the JSON response body.
	///
	/// An empty response body is decoded as if it were an empty JSON object. If the GitHub API
	/// responds with a non-success status code, the error body is decoded into the returned
	/// error instead.
	pub async fn send<R>(&self, mut request: reqwest::Request)
		-> Result<(R, Response), crate::Error>
	where
		R: serde::de::DeserializeOwned,
	{
		self.authorize(&mut request).await?;

		let (response, response_body) = execute(&self.reqwest_client, request).await?;

		Ok((decode_response_body(&response_body)?, response))
	}

	/// Send a request built with [Client::new_request] without decoding the response body.
	///
	/// This is meant for requests the GitHub API answers with `204 No Content`.
	pub async fn send_bodyless(&self, mut request: reqwest::Request)
		-> Result<Response, crate::Error>
	{
		self.authorize(&mut request).await?;

		let (response, _) = execute(&self.reqwest_client, request).await?;

		Ok(response)
	}

	/// Send a request that needs to be authenticated as the GitHub App itself rather than as one
	/// of its installations. Without GitHub App credentials, this behaves like [Client::send].
	pub(crate) async fn send_as_app<R>(&self, request: reqwest::Request)
		-> Result<(R, Response), crate::Error>
	where
		R: serde::de::DeserializeOwned,
	{
		match &*self.authentication
		{
			Authentication::App(app) => self.send_with_jwt(request, app).await,
			_ => self.send(request).await,
		}
	}

	#[doc(hidden)]
	async fn send_with_jwt<R>(&self, mut request: reqwest::Request, app: &AppAuthentication)
		-> Result<(R, Response), crate::Error>
	where
		R: serde::de::DeserializeOwned,
	{
		let jwt = AccessToken::sign_jwt(app)?;
		set_bearer_auth(&mut request, &jwt)?;

		let (response, response_body) = execute(&self.reqwest_client, request).await?;

		Ok((decode_response_body(&response_body)?, response))
	}

	/// Build and send an HTTP request to the GitHub API (for arguments, see
	/// [Client::new_request]).
	pub async fn request<S, B, R>(&self, method: reqwest::Method, endpoint: S, body: Option<&B>)
		-> Result<(R, Response), crate::Error>
	where
		S: AsRef<str>,
		B: serde::Serialize + ?Sized,
		R: serde::de::DeserializeOwned,
	{
		let request = self.new_request(method, endpoint, body)?;
		self.send(request).await
	}

	/// Make an HTTP DELETE request to the GitHub API (for arguments, see [Client::new_request]).
	pub async fn delete<S>(&self, endpoint: S) -> Result<Response, crate::Error>
	where
		S: AsRef<str>,
	{
		let request = self.new_request(reqwest::Method::DELETE, endpoint, NO_BODY)?;
		self.send_bodyless(request).await
	}

	/// Make an HTTP GET request to the GitHub API (for arguments, see [Client::new_request]).
	pub async fn get<S, R>(&self, endpoint: S) -> Result<(R, Response), crate::Error>
	where
		S: AsRef<str>,
		R: serde::de::DeserializeOwned,
	{
		self.request(reqwest::Method::GET, endpoint, NO_BODY).await
	}

	/// Make an HTTP PATCH request to the GitHub API (for arguments, see [Client::new_request]).
	pub async fn patch<S, B, R>(&self, endpoint: S, body: &B) -> Result<(R, Response), crate::Error>
	where
		S: AsRef<str>,
		B: serde::Serialize + ?Sized,
		R: serde::de::DeserializeOwned,
	{
		self.request(reqwest::Method::PATCH, endpoint, Some(body)).await
	}

	/// Make an HTTP POST request to the GitHub API (for arguments, see [Client::new_request]).
	pub async fn post<S, B, R>(&self, endpoint: S, body: &B) -> Result<(R, Response), crate::Error>
	where
		S: AsRef<str>,
		B: serde::Serialize + ?Sized,
		R: serde::de::DeserializeOwned,
	{
		self.request(reqwest::Method::POST, endpoint, Some(body)).await
	}

	/// Make an HTTP PUT request to the GitHub API (for arguments, see [Client::new_request]).
	pub async fn put<S, B, R>(&self, endpoint: S, body: &B) -> Result<(R, Response), crate::Error>
	where
		S: AsRef<str>,
		B: serde::Serialize + ?Sized,
		R: serde::de::DeserializeOwned,
	{
		self.request(reqwest::Method::PUT, endpoint, Some(body)).await
	}

	/// Attach the credentials of this client to a request.
	#[doc(hidden)]
	async fn authorize(&self, request: &mut reqwest::Request) -> Result<(), crate::Error>
	{
		let access_token = match &*self.authentication
		{
			Authentication::Anonymous => return Ok(()),
			Authentication::Token(access_token) => access_token.token.clone(),
			Authentication::App(app) => self.installation_access_token(app).await?,
		};

		set_bearer_auth(request, &access_token)
	}

	/// Return a valid installation access token, renewing it first if it is about to expire.
	#[doc(hidden)]
	async fn installation_access_token(&self, app: &AppAuthentication)
		-> Result<String, crate::Error>
	{
		if let Some(access_token) = app.access_token.read().await.as_ref()
			.filter(|access_token| !access_token.is_expiring())
		{
			return Ok(access_token.token.clone());
		}

		let mut access_token_locked = app.access_token.write().await;

		// The access token might already have been renewed in another task while this task was
		// waiting for the write lock. Only renew it if that wasn’t done yet
		if let Some(access_token) = access_token_locked.as_ref()
			.filter(|access_token| !access_token.is_expiring())
		{
			return Ok(access_token.token.clone());
		}

		log::info!("requesting GitHub App installation access token");

		let access_token = self.obtain_installation_access_token(app).await
			.map_err(Box::new).map_err(crate::Error::ObtainGitHubAppInstallationToken)?;
		let token = access_token.token.clone();

		*access_token_locked = Some(access_token);

		Ok(token)
	}

	#[doc(hidden)]
	async fn obtain_installation_access_token(&self, app: &AppAuthentication)
		-> Result<AccessToken, crate::Error>
	{
		let installation_id = match &app.installation
		{
			InstallationTarget::Id(installation_id) => *installation_id,
			InstallationTarget::Organization(organization) =>
			{
				let request = self.new_request(reqwest::Method::GET,
					format!("orgs/{organization}/installation"), NO_BODY)?;
				let (installation, _): (crate::Installation, _) =
					self.send_with_jwt(request, app).await?;

				installation.id.ok_or_else(|| crate::Error::DecodeGitHubApiResponseBody(
					<serde_json::Error as serde::de::Error>::missing_field("id")))?
			},
		};

		// Make another request to generate an access token we can use for this installation
		let request = self.new_request(reqwest::Method::POST,
			format!("app/installations/{installation_id}/access_tokens"), NO_BODY)?;
		let (installation_token, _): (crate::InstallationToken, _) =
			self.send_with_jwt(request, app).await?;

		if installation_token.token.is_empty()
		{
			return Err(crate::Error::DecodeGitHubApiResponseBody(
				<serde_json::Error as serde::de::Error>::missing_field("token")));
		}

		log::info!("successfully obtained access token for installation {installation_id}");

		Ok(AccessToken
		{
			token: installation_token.token,
			expires_at: installation_token.expires_at,
		})
	}
}

/// When making requests without a request body, we don’t care which type is used to represent it.
/// However, the compiler needs to know some type at compile time. This alias is used in order not
/// to have to spell out the dummy type.
pub const NO_BODY: Option<&()> = None;

/// Append the query parameters described by a serializable options type to an endpoint.
///
/// Fields that serialize to nothing (such as `None` with `skip_serializing_if`) are omitted, and
/// the endpoint is returned unchanged if no parameters remain.
pub fn add_options<Q>(endpoint: &str, options: Option<&Q>) -> Result<String, crate::Error>
where
	Q: serde::Serialize + ?Sized,
{
	let options = match options
	{
		Some(options) => options,
		None => return Ok(endpoint.to_owned()),
	};

	let query = serde_urlencoded::to_string(options).map_err(crate::Error::EncodeQuery)?;

	if query.is_empty()
	{
		return Ok(endpoint.to_owned());
	}

	let separator = match endpoint.contains('?')
	{
		true => '&',
		false => '?',
	};

	Ok(format!("{endpoint}{separator}{query}"))
}

/// Metadata of a response from the GitHub API.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response
{
	pub status_code: reqwest::StatusCode,
	/// The rate limit status, if the server reported it.
	pub rate: Option<Rate>,
	/// Pagination links as page numbers, parsed from the `Link` header.
	pub next_page: Option<u32>,
	pub prev_page: Option<u32>,
	pub first_page: Option<u32>,
	pub last_page: Option<u32>,
}

impl Response
{
	fn new(status_code: reqwest::StatusCode, headers: &reqwest::header::HeaderMap) -> Self
	{
		let mut response = Self
		{
			status_code,
			rate: Rate::from_headers(headers),
			next_page: None,
			prev_page: None,
			first_page: None,
			last_page: None,
		};

		if let Some(links) = headers.get(reqwest::header::LINK).and_then(|value| value.to_str().ok())
		{
			response.populate_page_values(links);
		}

		response
	}

	/// Parse a header like `<https://api.github.com/user/repos?page=3>; rel="next", …`.
	fn populate_page_values(&mut self, links: &str)
	{
		for link in links.split(',')
		{
			let mut segments = link.split(';');

			let url = match segments.next()
				.map(str::trim)
				.and_then(|url| url.strip_prefix('<'))
				.and_then(|url| url.strip_suffix('>'))
				.and_then(|url| url::Url::parse(url).ok())
			{
				Some(url) => url,
				None => continue,
			};

			let page = match url.query_pairs()
				.find(|(key, _)| key == "page")
				.and_then(|(_, page)| page.parse().ok())
			{
				Some(page) => page,
				None => continue,
			};

			for segment in segments
			{
				match segment.trim()
				{
					r#"rel="next""# => self.next_page = Some(page),
					r#"rel="prev""# => self.prev_page = Some(page),
					r#"rel="first""# => self.first_page = Some(page),
					r#"rel="last""# => self.last_page = Some(page),
					_ => (),
				}
			}
		}
	}
}

/// Rate limit status as reported by the `X-RateLimit-*` response headers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rate
{
	/// The maximum number of requests per hour.
	pub limit: u32,
	/// The number of requests remaining in the current rate limit window.
	pub remaining: u32,
	/// The number of requests made in the current rate limit window.
	pub used: Option<u32>,
	/// When the current rate limit window resets.
	pub reset: crate::Timestamp,
}

impl Rate
{
	fn from_headers(headers: &reqwest::header::HeaderMap) -> Option<Self>
	{
		let header = |name: &str| headers.get(name)
			.and_then(|value| value.to_str().ok())
			.and_then(|value| value.parse::<i64>().ok());

		let reset = header("x-ratelimit-reset")?;
		let reset = chrono::TimeZone::timestamp_opt(&chrono::Utc, reset, 0).single()?;

		Some(Self
		{
			limit: u32::try_from(header("x-ratelimit-limit")?).ok()?,
			remaining: u32::try_from(header("x-ratelimit-remaining")?).ok()?,
			used: header("x-ratelimit-used").and_then(|used| u32::try_from(used).ok()),
			reset,
		})
	}
}

/// Internal method for sending a fully prepared request exactly once.
///
/// Returns the response metadata along with the raw response body if the server responded with a
/// success status code, and a decoded API error otherwise.
#[doc(hidden)]
async fn execute(
	reqwest_client: &reqwest_middleware::ClientWithMiddleware,
	request: reqwest::Request)
	-> Result<(Response, Vec<u8>), crate::Error>
{
	let method = request.method().clone();

	log::debug!("{method} {}", request.url());

	let response = reqwest_client.execute(request).await
		.map_err(crate::Error::MakeGitHubApiRequest)?;

	let status_code = response.status();
	let url = response.url().to_owned();
	let metadata = Response::new(status_code, response.headers());
	let retry_after = response.headers().get(reqwest::header::RETRY_AFTER)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.parse().ok())
		.map(std::time::Duration::from_secs);

	let response_body = response.bytes().await.map_err(crate::Error::ReadGitHubApiResponseBody)?;

	log::debug!("{method} {url} responded with status code {status_code}");

	if !status_code.is_success()
	{
		return Err(decode_error(status_code, url, metadata.rate, retry_after, &response_body));
	}

	Ok((metadata, response_body.to_vec()))
}

/// Decode the body of a successful response.
#[doc(hidden)]
fn decode_response_body<R>(response_body: &[u8]) -> Result<R, crate::Error>
where
	R: serde::de::DeserializeOwned,
{
	// Allow deserializing empty responses as empty dictionaries instead, as empty strings are
	// invalid JSON
	let response_body = match response_body.is_empty()
	{
		true => "{}".as_bytes(),
		false => response_body,
	};

	serde_json::from_slice(response_body).map_err(crate::Error::DecodeGitHubApiResponseBody)
}

/// Turn a non-success response into the matching error.
#[doc(hidden)]
fn decode_error(
	status_code: reqwest::StatusCode,
	url: url::Url,
	rate: Option<Rate>,
	retry_after: Option<std::time::Duration>,
	response_body: &[u8])
	-> crate::Error
{
	// Keep the raw body for debugging purposes if it isn’t the usual JSON error object
	let response = serde_json::from_slice(response_body)
		.unwrap_or_else(|_| crate::ErrorResponse
		{
			message: String::from_utf8_lossy(response_body).into_owned(),
			..Default::default()
		});

	let error = Box::new(crate::ApiError{status_code, url, response});

	if status_code != reqwest::StatusCode::FORBIDDEN
		&& status_code != reqwest::StatusCode::TOO_MANY_REQUESTS
	{
		return crate::Error::ReceivedGitHubApiError(error);
	}

	if let Some(rate) = rate.filter(|rate| rate.remaining == 0)
	{
		return crate::Error::RateLimited{rate, error};
	}

	let documented_as_secondary_rate_limit = error.response.documentation_url.as_deref()
		.map_or(false, |documentation_url| documentation_url.contains("secondary-rate-limits")
			|| documentation_url.contains("abuse-rate-limits"));

	if retry_after.is_some() || documented_as_secondary_rate_limit
	{
		return crate::Error::SecondaryRateLimited{retry_after, error};
	}

	crate::Error::ReceivedGitHubApiError(error)
}

#[doc(hidden)]
fn set_bearer_auth(request: &mut reqwest::Request, access_token: &str) -> Result<(), crate::Error>
{
	let mut value = reqwest::header::HeaderValue::from_str(&format!("Bearer {access_token}"))
		.map_err(crate::Error::InvalidHeaderValue)?;
	value.set_sensitive(true);

	request.headers_mut().insert(reqwest::header::AUTHORIZATION, value);

	Ok(())
}

#[doc(hidden)]
#[derive(serde::Serialize)]
struct JwtClaims
{
	#[serde(rename = "iat")]
	#[serde(with = "chrono::serde::ts_seconds")]
	issued_at: chrono::DateTime<chrono::Utc>,
	#[serde(rename = "exp")]
	#[serde(with = "chrono::serde::ts_seconds")]
	expires_at: chrono::DateTime<chrono::Utc>,
	#[serde(rename = "iss")]
	issuer: String,
}

#[doc(hidden)]
#[derive(Clone, Eq, PartialEq)]
struct AccessToken
{
	token: String,
	expires_at: Option<crate::Timestamp>,
}

impl AccessToken
{
	/// Whether this token expires within the next minute and should be renewed.
	fn is_expiring(&self) -> bool
	{
		self.expires_at.map_or(false,
			|expires_at| expires_at - chrono::Duration::minutes(1) <= chrono::Utc::now())
	}

	/// Create a JWT authenticating as the GitHub App itself.
	fn sign_jwt(app: &AppAuthentication) -> Result<String, crate::Error>
	{
		let now = chrono::Utc::now();

		// Create JWT claims as explained in the documentation [1]
		// [1] https://docs.github.com/en/developers/apps/building-github-apps/authenticating-with-github-apps#authenticating-as-a-github-app
		let jwt_claims = JwtClaims
		{
			// Pretend that the JWT was issued a minute ago to allow for clock drift
			issued_at: now - chrono::Duration::minutes(1),
			// Ask for the JWT to expire in 10 minutes
			expires_at: now + chrono::Duration::minutes(10),
			// Specify that this JWT was issued by our GitHub App
			issuer: app.app_id.to_string(),
		};

		let jwt_header = jsonwebtoken::Header::new(jsonwebtoken::Algorithm::RS256);

		// Encode the payload with the GitHub App’s private key to obtain the JWT
		jsonwebtoken::encode(&jwt_header, &jwt_claims, &app.private_key)
			.map_err(crate::Error::CreateJwt)
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	async fn client() -> Client
	{
		let config = Config
		{
			base_url: url::Url::parse("https://github.example.com/api/v3/").unwrap(),
			..Default::default()
		};

		Client::from_config(config).await.unwrap()
	}

	#[tokio::test]
	async fn builds_request_with_json_body()
	{
		let client = client().await;
		let body = serde_json::json!({"body": "nice"});

		let request = client.new_request(reqwest::Method::POST, "repos/o/r/pulls/7/comments",
			Some(&body)).unwrap();

		assert_eq!(request.method(), reqwest::Method::POST);
		assert_eq!(request.url().as_str(),
			"https://github.example.com/api/v3/repos/o/r/pulls/7/comments");
		assert_eq!(request.headers()[reqwest::header::ACCEPT], MEDIA_TYPE);
		assert_eq!(request.headers()[reqwest::header::CONTENT_TYPE], "application/json");
		assert_eq!(request.headers()[reqwest::header::USER_AGENT],
			concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
		assert_eq!(request.body().and_then(reqwest::Body::as_bytes), Some(&br#"{"body":"nice"}"#[..]));
	}

	#[tokio::test]
	async fn builds_request_without_body()
	{
		let client = client().await;

		let request = client.new_request(reqwest::Method::GET, "orgs/o", NO_BODY).unwrap();

		assert!(request.body().is_none());
		assert!(request.headers().get(reqwest::header::CONTENT_TYPE).is_none());
		assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
	}

	#[tokio::test]
	async fn rejects_base_url_without_trailing_slash()
	{
		let config = Config
		{
			base_url: url::Url::parse("https://ghe.example.com/api/v3").unwrap(),
			..Default::default()
		};

		let result = Client::from_config(config).await;

		assert!(matches!(result, Err(crate::Error::BaseUrlWithoutTrailingSlash(url))
			if url.path() == "/api/v3"));
	}

	#[tokio::test]
	async fn rejects_unserializable_body()
	{
		let client = client().await;
		// JSON object keys must be strings
		let body = std::collections::HashMap::from([((1, 2), "value")]);

		let result = client.new_request(reqwest::Method::POST, "orgs/o", Some(&body));

		assert!(matches!(result, Err(crate::Error::EncodeRequestBody(_))));
	}

	#[test]
	fn adds_options_as_query_string()
	{
		#[derive(serde::Serialize)]
		struct Options
		{
			sort: &'static str,
			#[serde(skip_serializing_if = "Option::is_none")]
			page: Option<u32>,
		}

		let options = Options{sort: "created", page: None};

		assert_eq!(add_options("repos/o/r/pulls", Some(&options)).unwrap(),
			"repos/o/r/pulls?sort=created");
		assert_eq!(add_options("repos/o/r/pulls", None::<&Options>).unwrap(), "repos/o/r/pulls");
		assert_eq!(add_options("repos/o/r/pulls", Some(&crate::ListOptions::default())).unwrap(),
			"repos/o/r/pulls");
		assert_eq!(add_options("repos/o/r/pulls?state=all",
			Some(&crate::ListOptions{page: Some(2), per_page: None})).unwrap(),
			"repos/o/r/pulls?state=all&page=2");
	}

	#[test]
	fn parses_pagination_links_and_rate()
	{
		let mut headers = reqwest::header::HeaderMap::new();
		headers.insert(reqwest::header::LINK, reqwest::header::HeaderValue::from_static(
			"<https://api.github.com/repositories/1/pulls?page=3&per_page=2>; rel=\"next\", \
			<https://api.github.com/repositories/1/pulls?page=1&per_page=2>; rel=\"prev\", \
			<https://api.github.com/repositories/1/pulls?page=1&per_page=2>; rel=\"first\", \
			<https://api.github.com/repositories/1/pulls?page=5&per_page=2>; rel=\"last\""));
		headers.insert("x-ratelimit-limit", reqwest::header::HeaderValue::from_static("5000"));
		headers.insert("x-ratelimit-remaining", reqwest::header::HeaderValue::from_static("4999"));
		headers.insert("x-ratelimit-used", reqwest::header::HeaderValue::from_static("1"));
		headers.insert("x-ratelimit-reset", reqwest::header::HeaderValue::from_static("1372700873"));

		let response = Response::new(reqwest::StatusCode::OK, &headers);

		assert_eq!(response.next_page, Some(3));
		assert_eq!(response.prev_page, Some(1));
		assert_eq!(response.first_page, Some(1));
		assert_eq!(response.last_page, Some(5));

		let rate = response.rate.unwrap();
		assert_eq!(rate.limit, 5000);
		assert_eq!(rate.remaining, 4999);
		assert_eq!(rate.used, Some(1));
		assert_eq!(rate.reset.timestamp(), 1372700873);
	}

	#[test]
	fn ignores_missing_or_malformed_headers()
	{
		let mut headers = reqwest::header::HeaderMap::new();
		headers.insert(reqwest::header::LINK,
			reqwest::header::HeaderValue::from_static("garbage; rel=\"next\""));
		headers.insert("x-ratelimit-limit", reqwest::header::HeaderValue::from_static("5000"));

		let response = Response::new(reqwest::StatusCode::OK, &headers);

		assert_eq!(response.next_page, None);
		assert_eq!(response.rate, None);
	}

	#[test]
	fn classifies_rate_limit_errors()
	{
		let url = url::Url::parse("https://api.github.com/user").unwrap();
		let rate = Rate
		{
			limit: 60,
			remaining: 0,
			used: Some(60),
			reset: chrono::Utc::now(),
		};

		let error = decode_error(reqwest::StatusCode::FORBIDDEN, url.clone(), Some(rate), None,
			br#"{"message": "API rate limit exceeded"}"#);
		assert!(matches!(error, crate::Error::RateLimited{..}));

		let error = decode_error(reqwest::StatusCode::FORBIDDEN, url.clone(), None, None,
			br#"{"message": "slow down", "documentation_url": "https://docs.github.com/rest/overview/rate-limits-for-the-rest-api#about-secondary-rate-limits"}"#);
		assert!(matches!(error, crate::Error::SecondaryRateLimited{retry_after: None, ..}));

		let error = decode_error(reqwest::StatusCode::FORBIDDEN, url.clone(), None, None,
			b"Forbidden");
		assert_eq!(error.status_code(), Some(reqwest::StatusCode::FORBIDDEN));
		assert_eq!(error.api_error().unwrap().response.message, "Forbidden");
	}

	#[test]
	fn token_expiry()
	{
		let token = |expires_at| AccessToken{token: "t".to_owned(), expires_at};

		assert!(!token(None).is_expiring());
		assert!(token(Some(chrono::Utc::now() + chrono::Duration::seconds(30))).is_expiring());
		assert!(!token(Some(chrono::Utc::now() + chrono::Duration::hours(1))).is_expiring());
	}

	#[test]
	fn credentials_are_not_leaked_through_debug_output()
	{
		let credentials = Credentials::Token{token: "secret".to_owned()};

		assert!(!format!("{credentials:?}").contains("secret"));
	}

	#[test]
	fn webhook_secret_is_not_leaked_through_debug_output()
	{
		let config = Config
		{
			webhook_secret: Some("It's a Secret to Everybody".to_owned()),
			..Default::default()
		};

		let output = format!("{config:?}");

		assert!(!output.contains("Everybody"));
		assert!(output.contains("<redacted>"));
	}
}
