use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub service: Service,
	#[serde(default)]
	pub storage: Storage,
	#[serde(default)]
	pub review: Review,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	#[serde(default = "default_http_bind")]
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { http_bind: default_http_bind(), log_level: default_log_level() }
	}
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Storage {
	#[serde(default)]
	pub postgres: Postgres,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Postgres {
	/// Empty until resolved from the file or the environment.
	#[serde(default)]
	pub dsn: String,
	#[serde(default = "default_pool_max_conns")]
	pub pool_max_conns: u32,
}
impl Default for Postgres {
	fn default() -> Self {
		Self { dsn: String::new(), pool_max_conns: default_pool_max_conns() }
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Review {
	/// Tag types produced by upstream generators. They stay in storage but are never shown to
	/// reviewers.
	#[serde(default = "default_hidden_tag_types")]
	pub hidden_tag_types: Vec<String>,
}
impl Default for Review {
	fn default() -> Self {
		Self { hidden_tag_types: default_hidden_tag_types() }
	}
}

fn default_http_bind() -> String {
	"127.0.0.1:8080".to_string()
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_pool_max_conns() -> u32 {
	5
}

fn default_hidden_tag_types() -> Vec<String> {
	vec!["generated_industry".to_string(), "generated_skill".to_string()]
}
