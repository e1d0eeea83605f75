//! Sink placement engine
//!
//! Clearance rules, collision detection, and position suggestion for sink
//! cutouts on a rectangular slab. Everything here is a pure function of the
//! slab dimensions and the sinks already placed; the [`Configuration`]
//! command handlers call into it and commit only the positions it returns.
//!
//! Footprints are treated as axis-aligned rectangles, ovals included (their
//! bounding box is used).
//!
//! [`Configuration`]: crate::configuration::Configuration

use tracing::debug;

use crate::error::{PlacementError, PlacementResult};
use crate::geometry::Point;
use crate::sink::{SinkId, SinkPlacement, SinkTemplate};

/// Minimum distance between a cutout and any slab edge (in).
pub const MIN_EDGE_CLEARANCE: f64 = 4.0;
/// Minimum distance between two cutouts (in).
pub const MIN_GAP: f64 = 4.0;
/// Most sinks a slab can hold.
pub const MAX_SINKS: usize = 2;

/// Positions are committed on a 0.01in grid.
const GRID: f64 = 100.0;
const EPSILON: f64 = 1e-9;

/// Region in which a template's center may lie on a given slab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl PlacementBounds {
    pub fn for_template(template: SinkTemplate, length: f64, width: f64) -> Self {
        let (w, h) = template.footprint();
        Self {
            min_x: MIN_EDGE_CLEARANCE + w / 2.0,
            max_x: length - MIN_EDGE_CLEARANCE - w / 2.0,
            min_y: MIN_EDGE_CLEARANCE + h / 2.0,
            max_y: width - MIN_EDGE_CLEARANCE - h / 2.0,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.min_x > self.max_x + EPSILON || self.min_y > self.max_y + EPSILON
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x - EPSILON
            && p.x <= self.max_x + EPSILON
            && p.y >= self.min_y - EPSILON
            && p.y <= self.max_y + EPSILON
    }

    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            clamp_axis(p.x, self.min_x, self.max_x),
            clamp_axis(p.y, self.min_y, self.max_y),
        )
    }

    /// Corners in the order bottom-left, bottom-right, top-left, top-right.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.min_x, self.max_y),
            Point::new(self.max_x, self.max_y),
        ]
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Snap a point that is already inside the bounds onto the 0.01in grid
    /// without leaving the bounds.
    pub fn snap(&self, p: Point) -> Point {
        Point::new(
            snap_axis(p.x, self.min_x, self.max_x),
            snap_axis(p.y, self.min_y, self.max_y),
        )
    }
}

/// Whether the template plus edge clearance fits inside the slab.
pub fn fits(template: SinkTemplate, length: f64, width: f64) -> bool {
    let (w, h) = template.footprint();
    w + 2.0 * MIN_EDGE_CLEARANCE <= length + EPSILON
        && h + 2.0 * MIN_EDGE_CLEARANCE <= width + EPSILON
}

/// Separation required between two templates' centers along each axis.
pub fn required_separation(a: SinkTemplate, b: SinkTemplate) -> (f64, f64) {
    let (aw, ah) = a.footprint();
    let (bw, bh) = b.footprint();
    ((aw + bw) / 2.0 + MIN_GAP, (ah + bh) / 2.0 + MIN_GAP)
}

/// Two footprints (plus gap) cannot overlap when they are separated along
/// either axis.
pub fn clearance_ok(a_center: Point, a: SinkTemplate, b_center: Point, b: SinkTemplate) -> bool {
    let (min_dx, min_dy) = required_separation(a, b);
    let dx = (a_center.x - b_center.x).abs();
    let dy = (a_center.y - b_center.y).abs();
    dx >= min_dx - EPSILON || dy >= min_dy - EPSILON
}

fn clear_of_all(center: Point, template: SinkTemplate, others: &[SinkPlacement]) -> bool {
    others
        .iter()
        .all(|o| clearance_ok(center, template, o.center, o.template))
}

/// Auto-placement for the first sink on an empty slab: centered along the
/// length, 35% of the way up the width, clamped into the valid region.
pub fn initial_position(
    template: SinkTemplate,
    length: f64,
    width: f64,
) -> PlacementResult<Point> {
    if !fits(template, length, width) {
        return Err(PlacementError::DoesNotFit {
            template,
            length,
            width,
        });
    }
    let bounds = PlacementBounds::for_template(template, length, width);
    let preferred = Point::new(length * 0.5, width * 0.35);
    Ok(bounds.snap(bounds.clamp(preferred)))
}

/// Suggest a position for `template` next to an already placed sink.
///
/// Candidates are tried in order: mirror through the slab center, horizontal
/// mirror, vertical mirror, the points exactly one required separation away
/// from the existing sink along each axis (clamped), the corners of the
/// valid region, then its center. The first candidate inside the valid
/// region that clears the existing sink wins.
pub fn suggest_second(
    template: SinkTemplate,
    length: f64,
    width: f64,
    existing: &SinkPlacement,
) -> PlacementResult<Point> {
    if !fits(template, length, width) {
        return Err(PlacementError::DoesNotFit {
            template,
            length,
            width,
        });
    }
    let bounds = PlacementBounds::for_template(template, length, width);
    if bounds.is_degenerate() {
        return Err(PlacementError::DoesNotFit {
            template,
            length,
            width,
        });
    }

    let (min_dx, min_dy) = required_separation(template, existing.template);
    let first = existing.center;

    // The farthest reachable point along each axis decides whether any
    // compliant position exists at all.
    let reach_x = (bounds.min_x - first.x).abs().max((bounds.max_x - first.x).abs());
    let reach_y = (bounds.min_y - first.y).abs().max((bounds.max_y - first.y).abs());
    if reach_x < min_dx - EPSILON && reach_y < min_dy - EPSILON {
        debug!(
            "No room for {} next to {} on {}x{} slab",
            template, existing.template, length, width
        );
        return Err(PlacementError::NoRoomForSecond { template });
    }

    let mut candidates = vec![
        Point::new(length - first.x, width - first.y),
        Point::new(length - first.x, first.y),
        Point::new(first.x, width - first.y),
        bounds.clamp(Point::new(first.x + min_dx, first.y)),
        bounds.clamp(Point::new(first.x - min_dx, first.y)),
        bounds.clamp(Point::new(first.x, first.y + min_dy)),
        bounds.clamp(Point::new(first.x, first.y - min_dy)),
    ];
    candidates.extend(bounds.corners());
    candidates.push(bounds.center());

    candidates
        .into_iter()
        .filter(|c| bounds.contains(*c))
        .map(|c| bounds.snap(c))
        .find(|c| clearance_ok(*c, template, first, existing.template))
        .ok_or(PlacementError::NoRoomForSecond { template })
}

/// Where a new sink of `template` should go given the sinks already placed.
pub fn place_new(
    template: SinkTemplate,
    length: f64,
    width: f64,
    sinks: &[SinkPlacement],
) -> PlacementResult<Point> {
    match sinks {
        [] => initial_position(template, length, width),
        [existing] => suggest_second(template, length, width, existing),
        _ => Err(PlacementError::AtCapacity { max: MAX_SINKS }),
    }
}

/// Resolve a drag: clamp the proposed center into the valid region and
/// return it if it clears every other sink. `None` means the move is
/// withheld for this frame.
pub fn resolve_drag(
    sink: &SinkPlacement,
    proposed: Point,
    length: f64,
    width: f64,
    sinks: &[SinkPlacement],
) -> Option<Point> {
    let bounds = PlacementBounds::for_template(sink.template, length, width);
    if bounds.is_degenerate() || proposed.x.is_nan() || proposed.y.is_nan() {
        return None;
    }
    let target = bounds.snap(bounds.clamp(proposed));
    let others: Vec<SinkPlacement> = sinks.iter().filter(|s| s.id != sink.id).copied().collect();
    if clear_of_all(target, sink.template, &others) {
        Some(target)
    } else {
        None
    }
}

/// Whether both coordinates of `p` sit exactly on the 0.01in grid.
pub fn on_grid(p: Point) -> bool {
    (p.x * GRID).round() / GRID == p.x && (p.y * GRID).round() / GRID == p.y
}

/// Whether a set of sinks satisfies every placement invariant on the slab.
pub fn layout_is_valid(length: f64, width: f64, sinks: &[SinkPlacement]) -> bool {
    if sinks.len() > MAX_SINKS {
        return false;
    }
    for (i, sink) in sinks.iter().enumerate() {
        if !fits(sink.template, length, width) {
            return false;
        }
        let bounds = PlacementBounds::for_template(sink.template, length, width);
        if !bounds.contains(sink.center) {
            return false;
        }
        if !clear_of_all(sink.center, sink.template, &sinks[i + 1..]) {
            return false;
        }
    }
    true
}

/// Re-seat sinks after the slab was resized.
///
/// Each sink is clamped into its new valid region. A sink whose template no
/// longer fits, or that collides with a sink kept before it and cannot be
/// re-placed, is dropped. Returns the kept sinks and the ids of dropped ones.
pub fn reflow(
    length: f64,
    width: f64,
    sinks: &[SinkPlacement],
) -> (Vec<SinkPlacement>, Vec<SinkId>) {
    let mut kept: Vec<SinkPlacement> = Vec::with_capacity(sinks.len());
    let mut dropped = Vec::new();

    for sink in sinks {
        if !fits(sink.template, length, width) {
            dropped.push(sink.id);
            continue;
        }
        let bounds = PlacementBounds::for_template(sink.template, length, width);
        let clamped = bounds.snap(bounds.clamp(sink.center));
        let center = if clear_of_all(clamped, sink.template, &kept) {
            Some(clamped)
        } else {
            match kept.as_slice() {
                [existing] => suggest_second(sink.template, length, width, existing).ok(),
                _ => None,
            }
        };
        match center {
            Some(center) => kept.push(SinkPlacement { center, ..*sink }),
            None => dropped.push(sink.id),
        }
    }

    if !dropped.is_empty() {
        debug!("Dropped sinks {:?} after resize to {}x{}", dropped, length, width);
    }
    (kept, dropped)
}

fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    if max < min {
        return (min + max) / 2.0;
    }
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max)
}

fn snap_axis(value: f64, min: f64, max: f64) -> f64 {
    let snapped = (value * GRID).round() / GRID;
    if snapped < min - EPSILON {
        let up = (min * GRID).ceil() / GRID;
        if up <= max + EPSILON {
            return up;
        }
        return value;
    }
    if snapped > max + EPSILON {
        let down = (max * GRID).floor() / GRID;
        if down >= min - EPSILON {
            return down;
        }
        return value;
    }
    snapped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(id: u32, template: SinkTemplate, x: f64, y: f64) -> SinkPlacement {
        SinkPlacement::new(SinkId(id), template, Point::new(x, y))
    }

    #[test]
    fn test_fit_test_is_inclusive() {
        // 22 + 8 = 30 and 16 + 8 = 24
        assert!(fits(SinkTemplate::KitchenRect, 30.0, 24.0));
        assert!(!fits(SinkTemplate::KitchenRect, 29.99, 24.0));
        assert!(!fits(SinkTemplate::KitchenDouble, 48.0, 24.0));
    }

    #[test]
    fn test_initial_position_clamped() {
        // 0.35 * 24 = 8.4 is below the 4 + 7 = 11 floor for a 14" tall oval
        let p = initial_position(SinkTemplate::BathOval, 48.0, 24.0).unwrap();
        assert_eq!(p, Point::new(24.0, 11.0));
    }

    #[test]
    fn test_initial_position_snaps_to_grid() {
        let p = initial_position(SinkTemplate::BarOval, 40.0, 40.5).unwrap();
        // 0.35 * 40.5 = 14.175
        assert!((p.y - 14.18).abs() < 1e-9 || (p.y - 14.17).abs() < 1e-9);
        assert!((p.y * 100.0 - (p.y * 100.0).round()).abs() < 1e-6);
    }

    #[test]
    fn test_on_grid() {
        assert!(on_grid(Point::new(27.83, 11.0)));
        assert!(!on_grid(Point::new(27.837, 11.0)));
        assert!(!on_grid(Point::new(27.83, 11.004)));
    }

    #[test]
    fn test_clearance_is_or_of_axes() {
        let a = Point::new(20.0, 20.0);
        // minDx = (17 + 17) / 2 + 4 = 21
        assert!(clearance_ok(a, SinkTemplate::BathOval, Point::new(41.0, 20.0), SinkTemplate::BathOval));
        assert!(!clearance_ok(a, SinkTemplate::BathOval, Point::new(40.9, 20.0), SinkTemplate::BathOval));
        // minDy = 14 + 4 = 18
        assert!(clearance_ok(a, SinkTemplate::BathOval, Point::new(20.0, 38.0), SinkTemplate::BathOval));
    }

    #[test]
    fn test_second_sink_prefers_center_mirror() {
        let first = placed(1, SinkTemplate::BathOval, 15.0, 12.0);
        let p = suggest_second(SinkTemplate::BathOval, 72.0, 26.0, &first).unwrap();
        // Mirror through center is (57, 14): inside bounds and 42" apart.
        assert_eq!(p, Point::new(57.0, 14.0));
    }

    #[test]
    fn test_second_sink_falls_back_to_offset() {
        // Sink centered along the length: every mirror lands on top of it.
        let first = placed(1, SinkTemplate::BathOval, 36.0, 13.0);
        let p = suggest_second(SinkTemplate::BathOval, 72.0, 26.0, &first).unwrap();
        assert_eq!(p, Point::new(57.0, 13.0));
        assert!(clearance_ok(p, SinkTemplate::BathOval, first.center, first.template));
    }

    #[test]
    fn test_second_sink_no_room() {
        let first = placed(1, SinkTemplate::BathOval, 24.0, 11.0);
        let err = suggest_second(SinkTemplate::KitchenRect, 48.0, 24.0, &first).unwrap_err();
        assert_eq!(
            err,
            PlacementError::NoRoomForSecond {
                template: SinkTemplate::KitchenRect
            }
        );
    }

    #[test]
    fn test_place_new_at_capacity() {
        let sinks = [
            placed(1, SinkTemplate::BarOval, 12.0, 12.0),
            placed(2, SinkTemplate::BarOval, 50.0, 12.0),
        ];
        assert_eq!(
            place_new(SinkTemplate::BarOval, 72.0, 30.0, &sinks),
            Err(PlacementError::AtCapacity { max: 2 })
        );
    }

    #[test]
    fn test_drag_withheld_on_collision() {
        let a = placed(1, SinkTemplate::BathOval, 15.0, 13.0);
        let b = placed(2, SinkTemplate::BathOval, 57.0, 13.0);
        let sinks = [a, b];
        assert_eq!(resolve_drag(&b, Point::new(30.0, 13.0), 72.0, 26.0, &sinks), None);
        assert_eq!(
            resolve_drag(&b, Point::new(40.0, 13.0), 72.0, 26.0, &sinks),
            Some(Point::new(40.0, 13.0))
        );
    }

    #[test]
    fn test_drag_clamps_to_bounds() {
        let a = placed(1, SinkTemplate::BathOval, 30.0, 13.0);
        let p = resolve_drag(&a, Point::new(-50.0, 100.0), 72.0, 26.0, &[a]).unwrap();
        assert_eq!(p, Point::new(12.5, 15.0));
    }

    #[test]
    fn test_reflow_drops_sink_that_no_longer_fits() {
        let sinks = [
            placed(1, SinkTemplate::BarOval, 12.0, 12.0),
            placed(2, SinkTemplate::KitchenDouble, 50.0, 13.0),
        ];
        let (kept, dropped) = reflow(40.0, 24.0, &sinks);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, SinkId(1));
        assert_eq!(dropped, vec![SinkId(2)]);
        assert!(layout_is_valid(40.0, 24.0, &kept));
    }
}
