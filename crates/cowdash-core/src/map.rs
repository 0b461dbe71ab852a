//! Site map: where each ticket is drawn.
//!
//! Sites are looked up in the configured location table; unknown sites fall
//! back to the map centre. Every marker gets a small offset so tickets at the
//! same site do not overlap. The offset is derived from a hash of the ticket
//! id, so the same ticket lands on the same spot after every refresh.

use crate::config::MapConfig;
use crate::{StatusClass, Ticket};
use serde::Serialize;

/// Markers are spread over `[0, JITTER_SPAN)` degrees on each axis.
pub const JITTER_SPAN: f64 = 0.01;

const JITTER_STEPS: u64 = 1000;

/// One plotted ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    pub site: String,
    pub lat: f64,
    pub lon: f64,
    pub class: StatusClass,
    pub color: &'static str,
}

/// Site name → coordinate lookup with a fallback centre.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteMap {
    center: (f64, f64),
    sites: Vec<(String, f64, f64)>,
}

impl SiteMap {
    pub fn from_config(config: &MapConfig) -> Self {
        Self {
            center: (config.center[0], config.center[1]),
            sites: config
                .sites
                .iter()
                .map(|s| (s.name.clone(), s.lat, s.lon))
                .collect(),
        }
    }

    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    /// Configured sites as `(name, lat, lon)`, in config order.
    pub fn sites(&self) -> impl Iterator<Item = (&str, f64, f64)> + '_ {
        self.sites.iter().map(|(name, lat, lon)| (name.as_str(), *lat, *lon))
    }

    /// `(lat, lon)` of `site`, or the map centre when the site is unknown.
    /// Names match exactly.
    pub fn locate(&self, site: &str) -> (f64, f64) {
        self.sites
            .iter()
            .find(|(name, _, _)| name == site)
            .map(|&(_, lat, lon)| (lat, lon))
            .unwrap_or(self.center)
    }

    /// `(min_lat, max_lat, min_lon, max_lon)` covering the centre and every
    /// known site, widened by the jitter span.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (clat, clon) = self.center;
        let init = (clat, clat, clon, clon);
        let (min_lat, max_lat, min_lon, max_lon) =
            self.sites.iter().fold(init, |(a, b, c, d), &(_, lat, lon)| {
                (a.min(lat), b.max(lat), c.min(lon), d.max(lon))
            });
        (min_lat, max_lat + JITTER_SPAN, min_lon, max_lon + JITTER_SPAN)
    }

    /// Markers for open, pending and resolved tickets. Tickets with any
    /// other status are not plotted.
    pub fn markers(&self, tickets: &[Ticket]) -> Vec<Marker> {
        tickets
            .iter()
            .filter_map(|t| {
                let class = t.status_class();
                if class == StatusClass::Other {
                    return None;
                }
                let (lat, lon) = self.locate(&t.site);
                let (dlat, dlon) = jitter(&t.id);
                Some(Marker {
                    id: t.id.clone(),
                    site: t.site.clone(),
                    lat: lat + dlat,
                    lon: lon + dlon,
                    class,
                    color: class.color(),
                })
            })
            .collect()
    }
}

/// Offset in `[0, JITTER_SPAN)` on both axes, stable for a given key.
pub fn jitter(key: &str) -> (f64, f64) {
    let h = stable_hash(key);
    let scale = JITTER_SPAN / JITTER_STEPS as f64;
    let lat = (h % JITTER_STEPS) as f64 * scale;
    let lon = ((h / JITTER_STEPS) % JITTER_STEPS) as f64 * scale;
    (lat, lon)
}

/// djb2-style hash that is stable across Rust versions and process restarts.
fn stable_hash(s: &str) -> u64 {
    s.bytes()
        .fold(5381u64, |acc, b| acc.wrapping_mul(33).wrapping_add(b as u64))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
