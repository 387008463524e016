//! HTTP listener settings

use clap::Args;
use std::net::SocketAddr;
use std::time::Duration;

/// Listener settings, parsed from flags or environment
///
/// # Examples
///
/// ```
/// use clap::Parser;
/// use pgprovision_conf::ServerSettings;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     server: ServerSettings,
/// }
///
/// let cli = Cli::parse_from(["pgprovision", "--bind", "127.0.0.1:9000"]);
/// assert_eq!(cli.server.bind.port(), 9000);
/// ```
#[derive(Debug, Clone, Args)]
pub struct ServerSettings {
	/// Address the HTTP listener binds to
	#[arg(long, env = "PGPROVISION_BIND", default_value = "0.0.0.0:8080")]
	pub bind: SocketAddr,

	/// Seconds to wait for in-flight requests after a shutdown signal
	#[arg(long = "shutdown-grace", env = "PGPROVISION_SHUTDOWN_GRACE", default_value_t = 10)]
	pub shutdown_grace_secs: u64,
}

impl ServerSettings {
	/// Grace period as a [`Duration`]
	pub fn shutdown_grace(&self) -> Duration {
		Duration::from_secs(self.shutdown_grace_secs)
	}
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
			shutdown_grace_secs: 10,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::Parser;
	use rstest::rstest;
	use serial_test::serial;

	#[derive(Parser)]
	struct Cli {
		#[command(flatten)]
		server: ServerSettings,
	}

	#[rstest]
	#[serial(env)]
	fn test_defaults() {
		let cli = Cli::parse_from(["pgprovision"]);
		assert_eq!(cli.server.bind, ServerSettings::default().bind);
		assert_eq!(cli.server.shutdown_grace(), Duration::from_secs(10));
	}

	#[rstest]
	#[serial(env)]
	fn test_flags_override_defaults() {
		let cli = Cli::parse_from([
			"pgprovision",
			"--bind",
			"127.0.0.1:3000",
			"--shutdown-grace",
			"2",
		]);
		assert_eq!(cli.server.bind, SocketAddr::from(([127, 0, 0, 1], 3000)));
		assert_eq!(cli.server.shutdown_grace_secs, 2);
	}
}
