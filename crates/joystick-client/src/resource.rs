//! The fetch/sync state primitive backing every data-backed view.
//!
//! A [`Resource`] holds the (payload, loading, error) tuple for one remote
//! endpoint. Each fetch cycle opens with [`Resource::begin`], which hands
//! back a [`FetchTicket`], and settles with [`Resource::resolve`]. Tickets
//! carry a generation number: if a newer fetch has started (or the owning
//! view has moved on), resolving with the old ticket is a no-op, so a
//! late-arriving response can never clobber fresher state.

use crate::error::StoreError;

/// Identifies one fetch cycle. Resolving with a stale ticket is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Loading/error/data state for a single remote resource.
#[derive(Debug)]
pub struct Resource<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<T> Resource<T> {
    /// A fresh resource: loading, no payload, no error — the state a view
    /// is in before its first response arrives.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
            generation: 0,
        }
    }

    /// Opens a fetch cycle: sets loading, clears the error, and returns the
    /// ticket the eventual response must present to [`Resource::resolve`].
    pub fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        FetchTicket(self.generation)
    }

    /// Settles a fetch cycle. On success the payload is replaced; on error
    /// the message is stored and the previous payload kept
    /// (stale-but-available beats blank). Either way loading ends.
    ///
    /// Returns `false` without touching any state when `ticket` is not the
    /// latest one handed out by [`Resource::begin`].
    pub fn resolve(&mut self, ticket: FetchTicket, result: Result<T, StoreError>) -> bool {
        if ticket.0 != self.generation {
            tracing::warn!(
                ticket = ticket.0,
                current = self.generation,
                "dropping response for a superseded fetch"
            );
            return false;
        }
        match result {
            Ok(value) => {
                self.data = Some(value);
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
        true
    }

    /// Replaces the payload locally, bypassing the network — the optimistic
    /// path after a confirmed mutation.
    pub fn set(&mut self, value: T) {
        self.data = Some(value);
    }

    /// Mutates the payload in place when one is present; returns whether
    /// anything was there to mutate.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) -> bool {
        match self.data.as_mut() {
            Some(value) => {
                f(value);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_error(status: u16) -> StoreError {
        StoreError::UnexpectedStatus {
            status,
            url: "http://localhost:4000/products".to_owned(),
        }
    }

    #[test]
    fn starts_loading_with_no_data_or_error() {
        let resource: Resource<Vec<i64>> = Resource::new();
        assert!(resource.loading());
        assert!(resource.data().is_none());
        assert!(resource.error().is_none());
    }

    #[test]
    fn successful_resolve_stores_payload_and_ends_loading() {
        let mut resource = Resource::new();
        let ticket = resource.begin();
        assert!(resource.resolve(ticket, Ok(vec![1, 2, 3])));
        assert!(!resource.loading());
        assert_eq!(resource.data(), Some(&vec![1, 2, 3]));
        assert!(resource.error().is_none());
    }

    #[test]
    fn failed_resolve_stores_message_and_keeps_old_payload() {
        let mut resource = Resource::new();
        let ticket = resource.begin();
        resource.resolve(ticket, Ok(vec![1]));

        let ticket = resource.begin();
        assert!(resource.loading());
        assert!(resource.error().is_none(), "begin must clear the error");
        resource.resolve(ticket, Err(http_error(500)));

        assert!(!resource.loading(), "loading never survives a settled outcome");
        assert_eq!(resource.data(), Some(&vec![1]), "payload untouched on error");
        let error = resource.error().expect("error message stored");
        assert!(error.contains("HTTP"), "got: {error}");
        assert!(error.contains("500"), "got: {error}");
    }

    #[test]
    fn stale_ticket_resolve_is_ignored() {
        let mut resource = Resource::new();
        let old = resource.begin();
        let fresh = resource.begin();

        // The abandoned fetch comes back late; nothing may change.
        assert!(!resource.resolve(old, Ok(vec![9])));
        assert!(resource.loading());
        assert!(resource.data().is_none());

        assert!(resource.resolve(fresh, Ok(vec![1])));
        assert_eq!(resource.data(), Some(&vec![1]));
    }

    #[test]
    fn stale_error_resolve_is_also_ignored() {
        let mut resource = Resource::new();
        let old = resource.begin();
        let fresh = resource.begin();
        resource.resolve(fresh, Ok(vec![1]));

        assert!(!resource.resolve(old, Err(http_error(503))));
        assert!(resource.error().is_none());
        assert_eq!(resource.data(), Some(&vec![1]));
    }

    #[test]
    fn set_replaces_payload_without_a_fetch_cycle() {
        let mut resource = Resource::new();
        let ticket = resource.begin();
        resource.resolve(ticket, Ok(vec![1, 2]));

        resource.set(vec![2]);
        assert_eq!(resource.data(), Some(&vec![2]));
        assert!(!resource.loading());
    }

    #[test]
    fn update_mutates_in_place_when_present() {
        let mut resource = Resource::new();
        assert!(!resource.update(|v: &mut Vec<i64>| v.push(1)));

        resource.set(vec![1]);
        assert!(resource.update(|v| v.push(2)));
        assert_eq!(resource.data(), Some(&vec![1, 2]));
    }

    #[test]
    fn transport_error_message_is_surfaced_verbatim() {
        let mut resource: Resource<Vec<i64>> = Resource::new();
        let ticket = resource.begin();
        let err = StoreError::InvalidBaseUrl {
            url: "nope".to_owned(),
            reason: "relative URL without a base".to_owned(),
        };
        let expected = err.to_string();
        resource.resolve(ticket, Err(err));
        assert_eq!(resource.error(), Some(expected.as_str()));
    }
}
