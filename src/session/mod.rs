//! Pagination session tracking
//!
//! Paginated endpoints return a `cursors` object with each page. A session
//! remembers where the last page ended for one logical request, identified by
//! the endpoint plus the caller's original parameters, so that calling
//! `request` again with the same arguments fetches the following page.
//!
//! # Overview
//!
//! - `SessionKey` - Digest of endpoint + original parameters
//! - `SessionState` - Cursor position and total for one session
//! - `SessionTracker` - Owns all sessions for one client, bounded LRU

mod tracker;
mod types;

pub use tracker::{SessionTracker, PAGE_SIZE};
pub use types::{NextPage, SessionKey, SessionState};
