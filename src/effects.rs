use crate::pool::{FixedPool, Handle};
use crate::popup::{Glyph, ScorePopup};

/// Owns the popup pool and tracks which slots are alive.
///
/// Popups are best-effort: when the pool is saturated, `try_emit` drops the
/// request and reports it. Nothing is queued — a slot only comes back when
/// an older popup expires and a `sweep` reclaims it.
pub struct PopupSystem {
    pool: FixedPool<ScorePopup>,
    /// Live handles in insertion order; drives render order.
    live: Vec<Handle>,
}

impl PopupSystem {
    /// All storage — pool slots and handle tracking — is reserved here,
    /// once, for the system's lifetime.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            pool: FixedPool::with_capacity(cap),
            live: Vec::with_capacity(cap),
        }
    }

    /// Spawn a popup at (`col`, `row`). Returns false when the pool is
    /// saturated; the effect is simply dropped.
    pub fn try_emit(
        &mut self,
        col: u16,
        row: u16,
        value: u64,
        now: f64,
        rng: &mut fastrand::Rng,
    ) -> bool {
        match self
            .pool
            .acquire_with(|| ScorePopup::new(col, row, value, now, rng))
        {
            Some(handle) => {
                self.live.push(handle);
                true
            }
            None => {
                log::debug!("popup pool saturated, dropping emit at ({col},{row})");
                false
            }
        }
    }

    /// Release every expired popup back to the pool. Handle removal and
    /// slot release happen together, so the live list never dangles.
    pub fn sweep(&mut self, now: f64) {
        let pool = &mut self.pool;
        let before = self.live.len();
        self.live.retain(|&handle| {
            let expired = pool.get(handle).is_none_or(|p| p.is_expired(now));
            if expired {
                pool.release(Some(handle));
            }
            !expired
        });
        let reclaimed = before - self.live.len();
        if reclaimed > 0 {
            log::trace!("swept {reclaimed} expired popups, {} live", self.live.len());
        }
    }

    /// Append draw primitives for every live popup, in insertion order.
    pub fn render_all(&self, now: f64, out: &mut Vec<Glyph>) {
        for &handle in &self.live {
            if let Some(popup) = self.pool.get(handle) {
                popup.render(now, out);
            }
        }
    }

    /// Number of live popups.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }
}
