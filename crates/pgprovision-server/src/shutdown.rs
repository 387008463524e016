//! Shutdown coordination
//!
//! One [`ShutdownCoordinator`] is shared by the signal listener and the
//! server. Triggering it stops the accept loop; in-flight connections then
//! get the grace period to finish. The request is sticky: waiting after it
//! was made returns immediately.

use std::time::Duration;
use tokio::sync::watch;

/// Carries a single shutdown request
#[derive(Debug, Clone)]
pub struct ShutdownCoordinator {
	tx: watch::Sender<bool>,
	grace: Duration,
}

impl ShutdownCoordinator {
	pub fn new(grace: Duration) -> Self {
		let (tx, _) = watch::channel(false);
		Self { tx, grace }
	}

	/// Request shutdown
	pub fn shutdown(&self) {
		self.tx.send_replace(true);
	}

	pub fn is_shutdown(&self) -> bool {
		*self.tx.borrow()
	}

	/// Resolves once shutdown has been requested
	pub async fn wait(&self) {
		let mut rx = self.tx.subscribe();
		// The sender lives in `self`, so the channel cannot close here.
		let _ = rx.wait_for(|requested| *requested).await;
	}

	/// How long in-flight connections may keep running after shutdown
	pub fn grace_period(&self) -> Duration {
		self.grace
	}
}

/// Resolves on Ctrl-C, or SIGTERM on Unix
pub async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			tracing::error!(error = %e, "Failed to listen for Ctrl-C");
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut sig) => {
				sig.recv().await;
			}
			Err(e) => {
				tracing::error!(error = %e, "Failed to listen for SIGTERM");
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => tracing::info!("Received Ctrl-C"),
		_ = terminate => tracing::info!("Received SIGTERM"),
	}
}
