use std::{
	collections::HashMap,
	sync::{Arc, Mutex},
	time::{Duration, Instant},
};

use uuid::Uuid;

use review_domain::session::ReviewSession;
use review_service::ReviewService;
use review_storage::db::Db;

const SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);
const MAX_SESSIONS: usize = 10_000;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ReviewService>,
	pub sessions: Arc<SessionStore>,
}
impl AppState {
	pub async fn new(config: review_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		Ok(Self::with_service(ReviewService::new(config, db)))
	}

	pub fn with_service(service: ReviewService) -> Self {
		Self::with_sessions(service, SessionStore::new(SESSION_TTL, MAX_SESSIONS))
	}

	pub fn with_sessions(service: ReviewService, sessions: SessionStore) -> Self {
		Self { service: Arc::new(service), sessions: Arc::new(sessions) }
	}
}

struct SessionEntry {
	session: ReviewSession,
	last_seen: Instant,
}

/// Reviewer session counters keyed by the client-chosen session id.
///
/// Idle sessions expire after `ttl`. At `max_sessions` the least recently seen session is evicted
/// to admit a new one.
pub struct SessionStore {
	ttl: Duration,
	max_sessions: usize,
	entries: Mutex<HashMap<Uuid, SessionEntry>>,
}
impl SessionStore {
	pub fn new(ttl: Duration, max_sessions: usize) -> Self {
		Self { ttl, max_sessions: max_sessions.max(1), entries: Mutex::new(HashMap::new()) }
	}

	/// Adds `stored` feedback rows to the session and returns its updated state.
	///
	/// Nothing is tracked for a session until it stores at least one row.
	pub fn record(&self, session_id: Uuid, stored: u64) -> ReviewSession {
		self.record_at(session_id, stored, Instant::now())
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn record_at(&self, session_id: Uuid, stored: u64, now: Instant) -> ReviewSession {
		let mut entries = self.lock();

		if stored == 0 {
			let mut session = match entries.get_mut(&session_id) {
				Some(entry) if now.saturating_duration_since(entry.last_seen) < self.ttl => {
					entry.last_seen = now;

					entry.session
				},
				_ => ReviewSession::new(),
			};

			session.record_submissions(0);

			return session;
		}

		let ttl = self.ttl;

		entries.retain(|_, entry| now.saturating_duration_since(entry.last_seen) < ttl);

		if !entries.contains_key(&session_id) && entries.len() >= self.max_sessions {
			let oldest =
				entries.iter().min_by_key(|(_, entry)| entry.last_seen).map(|(id, _)| *id);

			if let Some(oldest) = oldest {
				entries.remove(&oldest);
			}
		}

		let entry = entries
			.entry(session_id)
			.or_insert_with(|| SessionEntry { session: ReviewSession::new(), last_seen: now });

		entry.last_seen = now;
		entry.session.record_submissions(stored);

		entry.session
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, SessionEntry>> {
		self.entries.lock().unwrap_or_else(|err| err.into_inner())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ignored_resubmission_is_not_counted_or_tracked() {
		let store = SessionStore::new(SESSION_TTL, MAX_SESSIONS);
		let id = Uuid::new_v4();

		assert_eq!(store.record(id, 0).submitted(), 0);
		assert!(store.is_empty());
		assert_eq!(store.record(id, 1).submitted(), 1);
		assert_eq!(store.record(id, 0).submitted(), 1);
		assert_eq!(store.len(), 1);
	}

	#[test]
	fn idle_sessions_expire() {
		let store = SessionStore::new(Duration::from_secs(60), MAX_SESSIONS);
		let start = Instant::now();
		let idle = Uuid::new_v4();
		let active = Uuid::new_v4();

		store.record_at(idle, 2, start);
		store.record_at(active, 1, start + Duration::from_secs(30));
		store.record_at(active, 1, start + Duration::from_secs(61));

		assert_eq!(store.len(), 1);
		assert_eq!(store.record_at(idle, 0, start + Duration::from_secs(62)).submitted(), 0);
		assert_eq!(store.record_at(active, 0, start + Duration::from_secs(62)).submitted(), 2);
	}

	#[test]
	fn full_store_evicts_least_recently_seen() {
		let store = SessionStore::new(SESSION_TTL, 2);
		let start = Instant::now();
		let first = Uuid::new_v4();
		let second = Uuid::new_v4();
		let third = Uuid::new_v4();

		store.record_at(first, 1, start);
		store.record_at(second, 1, start + Duration::from_secs(1));
		store.record_at(first, 1, start + Duration::from_secs(2));
		store.record_at(third, 1, start + Duration::from_secs(3));

		assert_eq!(store.len(), 2);
		assert_eq!(store.record_at(first, 0, start + Duration::from_secs(4)).submitted(), 2);
		assert_eq!(store.record_at(second, 0, start + Duration::from_secs(4)).submitted(), 0);
	}
}
