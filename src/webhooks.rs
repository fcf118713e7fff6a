/// Verify a webhook event payload by checking the provided signature.
///
/// # Arguments
/// - `provided_signature`: The value of the `X-Hub-Signature-256` header, if present.
/// - `payload`: The raw payload as received.
/// - `secret`: The webhook secret. If none is configured, all payloads are accepted.
pub fn verify_payload_signature(
	provided_signature: Option<&str>,
	payload: &[u8],
	secret: Option<&str>)
	-> Result<(), crate::Error>
{
	let secret = match secret
	{
		Some(secret) => secret,
		// If no secret was configured, accept all payloads
		None =>
		{
			log::warn!("no webhook secret configured, ignoring payload signature (this should be \
				configured for production use)");
			return Ok(());
		}
	};

	// Otherwise, require a valid payload signature. If none is provided, reject the request
	let provided_signature = provided_signature.ok_or(crate::Error::MissingPayloadSignature)?;

	// Only SHA-256 signatures are supported, reject anything else
	let provided_signature = provided_signature.strip_prefix("sha256=")
		.ok_or(crate::Error::InvalidPayloadSignature)?;

	use hmac::Mac as _;

	// Compute the expected signature
	let mut mac = hmac::Hmac::<sha2::Sha256>::new_from_slice(secret.as_bytes())
		.expect("this call is infallible because HMAC supports keys of arbitrary size");

	mac.update(payload);

	let expected_signature = mac.finalize().into_bytes();
	let expected_signature = hex::encode(expected_signature);

	// Compare the provided signature with what we expect it to be. Use a secure string wrapper that
	// provides a constant-time equality comparator to prevent timing attacks
	let provided_signature = secstr::SecStr::from(provided_signature);
	let expected_signature = secstr::SecStr::from(expected_signature);

	if provided_signature == expected_signature
	{
		log::debug!("successfully verified payload signature");
		Ok(())
	}
	else
	{
		log::warn!("received payload with invalid signature");
		Err(crate::Error::InvalidPayloadSignature)
	}
}

/// The largest webhook payload accepted by [with_validated_event_and_client], in bytes.
pub const MAX_PAYLOAD_SIZE: u64 = 256 * 1024;

/// [1]: <https://github.com/seanmonstar/warp/blob/3ff2eaf41eb5ac9321620e5a6434d5b5ec6f313f/examples/todos.rs#L99-L101>
/// [warp] filter extracting a webhook delivery, verifying its signature if a webhook secret is
/// configured, and decoding it into an [crate::Event] according to its `X-GitHub-Event` header.
/// Returns the decoded event and a handle to the GitHub API client for further usage as arguments
/// to subsequent handlers in that order. Inspired by the [to-do example][1] provided by [warp].
///
/// Rejections carry a [crate::Error] that can be recovered with [warp::Rejection::find].
/// Deliveries larger than [MAX_PAYLOAD_SIZE] or without a `Content-Length` header are rejected
/// by [warp] before their body is read.
///
/// # Arguments
/// - `client`: The handle to the GitHub API client.
pub fn with_validated_event_and_client(client: crate::Client)
	-> impl warp::Filter<Extract = (crate::Event, crate::Client), Error = warp::Rejection> + Clone
{
	use warp::Filter as _;

	warp::any()
		// Relay a handle to the client
		.map(move || {client.clone()})
		// Relay the event type, which determines the shape of the payload
		.and(warp::header::<String>("x-github-event"))
		// Relay the body as raw bytes for payload signature validation and JSON decoding
		.and(warp::body::content_length_limit(MAX_PAYLOAD_SIZE))
		.and(warp::body::bytes())
		// Relay the payload signature header if present
		.and(warp::header::optional::<String>("x-hub-signature-256"))
		// Validate the payload signature if configured and decode the body
		.and_then(
			|client: crate::Client,
				event_type: String,
				bytes: warp::hyper::body::Bytes,
				provided_signature: Option<String>|
			async move
			{
				// If configured, require a valid payload signature
				verify_payload_signature(provided_signature.as_deref(), &bytes,
					client.config().webhook_secret.as_deref())
						.map_err(warp::reject::custom)?;

				let event = crate::Event::parse(&event_type, &bytes)
					.map_err(warp::reject::custom)?;

				log::debug!("received “{event_type}” webhook event");

				Ok::<_, warp::Rejection>((event, client))
			})
		// The last call returned the event and client as a tuple, but we’d like subsequent calls in
		// the filter chain to receive them as top-level arguments and not nested within a single
		// tuple
		.untuple_one()
}

#[cfg(test)]
mod tests
{
	use super::*;

	const SECRET: &str = "It's a Secret to Everybody";
	const PAYLOAD: &[u8] = b"Hello, World!";
	const SIGNATURE: &str =
		"sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17";

	#[test]
	fn accepts_valid_signature()
	{
		assert!(verify_payload_signature(Some(SIGNATURE), PAYLOAD, Some(SECRET)).is_ok());
	}

	#[test]
	fn rejects_invalid_signatures()
	{
		assert!(matches!(verify_payload_signature(None, PAYLOAD, Some(SECRET)),
			Err(crate::Error::MissingPayloadSignature)));
		assert!(matches!(verify_payload_signature(Some(SIGNATURE), b"Goodbye", Some(SECRET)),
			Err(crate::Error::InvalidPayloadSignature)));
		assert!(matches!(
			verify_payload_signature(Some("sha1=757107ea0eb2509fc211221cce984b8a37570b6d"), PAYLOAD,
				Some(SECRET)),
			Err(crate::Error::InvalidPayloadSignature)));
	}

	#[test]
	fn accepts_anything_without_secret()
	{
		assert!(verify_payload_signature(None, PAYLOAD, None).is_ok());
	}

	async fn client(webhook_secret: Option<&str>) -> crate::Client
	{
		let config = crate::github_api::Config
		{
			webhook_secret: webhook_secret.map(str::to_owned),
			..Default::default()
		};

		crate::Client::from_config(config).await.unwrap()
	}

	#[tokio::test]
	async fn filter_extracts_signed_event()
	{
		let filter = with_validated_event_and_client(client(Some(SECRET)).await);
		let payload = br#"{"zen": "Design for failure.", "hook_id": 42}"#;

		use hmac::Mac as _;
		let mut mac = hmac::Hmac::<sha2::Sha256>::new_from_slice(SECRET.as_bytes()).unwrap();
		mac.update(payload);
		let signature = format!("sha256={}", hex::encode(mac.finalize().into_bytes()));

		let (event, _) = warp::test::request()
			.method("POST")
			.header("x-github-event", "ping")
			.header("x-hub-signature-256", signature)
			.body(&payload[..])
			.filter(&filter)
			.await
			.unwrap();

		assert_eq!(event, crate::Event::Ping(crate::PingEvent
		{
			zen: Some("Design for failure.".to_owned()),
			hook_id: Some(42),
			..Default::default()
		}));
	}

	#[tokio::test]
	async fn filter_rejects_unsigned_event()
	{
		let filter = with_validated_event_and_client(client(Some(SECRET)).await);

		let rejection = warp::test::request()
			.method("POST")
			.header("x-github-event", "ping")
			.body("{}")
			.filter(&filter)
			.await
			.err()
			.unwrap();

		assert!(matches!(rejection.find::<crate::Error>(), Some(crate::Error::MissingPayloadSignature)));
	}

	#[tokio::test]
	async fn filter_rejects_oversized_payload()
	{
		let filter = with_validated_event_and_client(client(None).await);
		let payload = vec![b' '; MAX_PAYLOAD_SIZE as usize + 1];

		let result = warp::test::request()
			.method("POST")
			.header("x-github-event", "ping")
			.body(payload)
			.filter(&filter)
			.await;

		assert!(result.is_err());
	}

	#[tokio::test]
	async fn filter_rejects_unknown_event_type()
	{
		let filter = with_validated_event_and_client(client(None).await);

		let rejection = warp::test::request()
			.method("POST")
			.header("x-github-event", "star")
			.body("{}")
			.filter(&filter)
			.await
			.err()
			.unwrap();

		assert!(matches!(rejection.find::<crate::Error>(),
			Some(crate::Error::UnknownWebhookEvent(_))));
	}
}
