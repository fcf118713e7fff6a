#[derive(Debug, Default, serde::Deserialize)]
/// Top-level configuration file layout.
///
/// Currently, only GitHub-API-specific configuration options are available, but applications
/// embedding this crate can nest this section into their own configuration.
pub struct Config
{
	/// Configuration options specific to the GitHub API and authentication.
	pub github_api: crate::github_api::Config,
}

impl Config
{
	/// Attempt to read and parse the configuration from a YAML file.
	///
	/// # Arguments
	/// `path`: Path to the configuration file in YAML format.
	pub fn from_file<P>(path: P) -> Result<Self, crate::Error>
	where
		P: AsRef<std::path::Path>
	{
		let file = std::fs::File::open(&path).map_err(crate::Error::ReadConfigFile)?;
		serde_yaml::from_reader(&file).map_err(crate::Error::ParseConfigFile)
	}

	/// Parse the configuration from a string in YAML format.
	pub fn from_yaml(yaml: &str) -> Result<Self, crate::Error>
	{
		serde_yaml::from_str(yaml).map_err(crate::Error::ParseConfigFile)
	}
}
