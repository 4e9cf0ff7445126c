//! Session id bookkeeping
//!
//! The id is an opaque token the backend uses to scope history. It is created
//! once per brand and kept in client storage; nothing here ever parses it.

use crate::brand::Brand;
use crate::db::Database;
use rand::Rng;
use tracing::{info, warn};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// `session_<unix millis>_<9 base-36 chars>`
pub fn generate_session_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("session_{}_{}", chrono::Utc::now().timestamp_millis(), suffix)
}

/// Return the stored id for `brand`, creating and persisting one if absent.
pub fn load_or_create(db: &Database, brand: Brand) -> String {
    let key = brand.storage_key();
    match db.get(key) {
        Ok(Some(existing)) if !existing.is_empty() => {
            info!(session_id = %existing, "Session restored");
            return existing;
        }
        Ok(_) => {}
        Err(e) => warn!(error = %e, key, "Failed to read session id"),
    }

    let session_id = generate_session_id();
    if let Err(e) = db.set(key, &session_id) {
        warn!(error = %e, key, "Failed to persist session id");
    }
    info!(session_id = %session_id, "Session created");
    session_id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_have_expected_shape() {
        let id = generate_session_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "session");
        assert!(parts[1].parse::<i64>().unwrap() > 0);
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn load_or_create_is_stable_per_brand() {
        let db = Database::open_in_memory().unwrap();
        let first = load_or_create(&db, Brand::CineAi);
        let again = load_or_create(&db, Brand::CineAi);
        assert_eq!(first, again);
        assert_eq!(db.get("cineai_session_id").unwrap(), Some(first.clone()));

        let other = load_or_create(&db, Brand::FlickFinder);
        assert_ne!(first, other);
        assert_eq!(db.get("flickfinder_session_id").unwrap(), Some(other));
    }

    #[test]
    fn stored_value_is_used_verbatim() {
        let db = Database::open_in_memory().unwrap();
        db.set("cineai_session_id", "anything-goes").unwrap();
        assert_eq!(load_or_create(&db, Brand::CineAi), "anything-goes");
    }
}
