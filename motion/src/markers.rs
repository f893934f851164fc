//! Bookkeeping for the fading copies the mover leaves behind.
//!
//! The state machine only decides *when* a marker appears. Hosts keep the
//! live set here and call [`TrailMarkers::expire`] every frame so markers are
//! removed once their fade has run out.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailMarker {
    pub id: u64,
    pub pixel_offset: f64,
    pub spawned_at: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrailMarkers {
    lifetime_millis: f64,
    next_id: u64,
    live: Vec<TrailMarker>,
}

impl TrailMarkers {
    #[must_use]
    pub const fn new(lifetime_millis: f64) -> Self {
        Self {
            lifetime_millis,
            next_id: 0,
            live: Vec::new(),
        }
    }

    /// Records a marker spawned at `now_millis` and returns it.
    pub fn spawn(&mut self, pixel_offset: f64, now_millis: f64) -> TrailMarker {
        let marker = TrailMarker {
            id: self.next_id,
            pixel_offset,
            spawned_at: now_millis,
        };
        self.next_id += 1;
        self.live.push(marker);
        marker
    }

    /// Drops markers whose fade has finished; returns how many were removed.
    pub fn expire(&mut self, now_millis: f64) -> usize {
        let before = self.live.len();
        let lifetime = self.lifetime_millis;
        self.live
            .retain(|marker| now_millis - marker.spawned_at < lifetime);
        before - self.live.len()
    }

    #[must_use]
    pub fn markers(&self) -> &[TrailMarker] {
        &self.live
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    #[must_use]
    pub const fn lifetime_millis(&self) -> f64 {
        self.lifetime_millis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut trail = TrailMarkers::new(750.0);
        let first = trail.spawn(10.0, 100.0);
        let second = trail.spawn(40.0, 900.0);

        assert_eq!(first.id, 0);
        assert_eq!(second.id, 1);
        assert_eq!(trail.len(), 2);
    }

    #[test]
    fn expire_removes_markers_at_end_of_lifetime() {
        let mut trail = TrailMarkers::new(750.0);
        trail.spawn(10.0, 100.0);
        trail.spawn(40.0, 900.0);

        assert_eq!(trail.expire(849.0), 0);
        assert_eq!(trail.expire(850.0), 1);
        assert_eq!(trail.markers()[0].pixel_offset, 40.0);

        assert_eq!(trail.expire(1650.0), 1);
        assert!(trail.is_empty());
    }

    #[test]
    fn ids_keep_increasing_after_expiry() {
        let mut trail = TrailMarkers::new(100.0);
        trail.spawn(0.0, 0.0);
        trail.expire(500.0);

        assert_eq!(trail.spawn(5.0, 600.0).id, 1);
    }
}
