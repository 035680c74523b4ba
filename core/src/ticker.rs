//! Manual invalidation signal.
//!
//! A `Ticker` is a versioned token: every `update()` bumps the version, and
//! anything keyed on `token()` (the list fetch in `TodoPage`) sees a new
//! dependency value and re-runs. Nothing is pushed from the server; callers
//! invalidate after a mutation they know has completed.

use std::sync::Arc;

use tokio::sync::watch;

/// Opaque version produced by a `Ticker`. Later tokens compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TickerToken(u64);

impl TickerToken {
    pub fn version(&self) -> u64 {
        self.0
    }
}

/// Shared invalidation channel. Clones observe and bump the same version.
#[derive(Debug, Clone)]
pub struct Ticker {
    tx: Arc<watch::Sender<TickerToken>>,
}

impl Ticker {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(TickerToken::default());
        Self { tx: Arc::new(tx) }
    }

    /// Invalidate: returns the new token, distinct from every earlier one.
    pub fn update(&self) -> TickerToken {
        let mut next = TickerToken::default();
        self.tx.send_modify(|token| {
            token.0 += 1;
            next = *token;
        });
        next
    }

    pub fn token(&self) -> TickerToken {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<TickerToken> {
        self.tx.subscribe()
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_update_yields_a_new_token() {
        let ticker = Ticker::new();
        let first = ticker.token();
        let a = ticker.update();
        let b = ticker.update();
        assert_ne!(first, a);
        assert_ne!(a, b);
        assert!(b > a);
        assert_eq!(ticker.token(), b);
    }

    #[test]
    fn clones_share_the_version() {
        let ticker = Ticker::new();
        let other = ticker.clone();
        other.update();
        assert_eq!(ticker.token().version(), 1);
    }

    #[tokio::test]
    async fn subscribers_see_updates() {
        let ticker = Ticker::new();
        let mut rx = ticker.subscribe();
        let token = ticker.update();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), token);
    }
}
