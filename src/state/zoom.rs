//! Dynamic zoom session: the state behind the overview/detail viewer
//!
//! A session borrows the caller's series, owns the downsampled overview and
//! the overlay band, and turns control values into an index window. All
//! mutation happens through [`ZoomSession::handle`], one event at a time.

use crate::constants::zoom::AXIS_MARGIN;
use crate::data::downsample::{finite_range, stride_downsample, to_points};
use crate::data::nearest::closest_index;
use crate::error::{self, PlotError, Result};

/// Slider values: window centre and half-width, in sample-index units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomControls {
    pub center: f64,
    pub half_width: f64,
}

/// Resolved sample range `[left, right)`, always `0 <= left < right <= len - 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexWindow {
    pub left: usize,
    pub right: usize,
}

impl IndexWindow {
    /// Clamp `center ± half_width` into `[0, len - 1]`.
    ///
    /// Bounds are truncated toward zero before clamping. A window that
    /// collapses after clamping is widened to one sample. `len` must be at
    /// least 2.
    pub fn resolve(controls: ZoomControls, len: usize) -> Self {
        debug_assert!(len >= 2, "a zoom window needs at least two samples");
        let last = len.saturating_sub(1) as i64;

        let a = ((controls.center - controls.half_width).trunc() as i64).clamp(0, last);
        let b = ((controls.center + controls.half_width).trunc() as i64).clamp(0, last);
        let (lo, hi) = (a.min(b), a.max(b));

        let (left, right) = if lo < hi {
            (lo, hi)
        } else if lo >= last {
            (last - 1, last)
        } else {
            (lo, lo + 1)
        };

        Self {
            left: left as usize,
            right: right as usize,
        }
    }

    pub fn len(&self) -> usize {
        self.right - self.left
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shaded band on the overview marking the current window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayRegion {
    pub x_start: f64,
    pub x_end: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl OverlayRegion {
    fn covering(x: &[f64], window: IndexWindow, y_range: (f64, f64)) -> Self {
        let (x_start, x_end) = finite_range(&x[window.left..window.right])
            .unwrap_or((x[window.left], x[window.left]));
        Self {
            x_start,
            x_end,
            y_min: y_range.0,
            y_max: y_range.1,
        }
    }

    /// Closed outline of the band
    pub fn polygon(&self) -> Vec<[f64; 2]> {
        vec![
            [self.x_start, self.y_min],
            [self.x_end, self.y_min],
            [self.x_end, self.y_max],
            [self.x_start, self.y_max],
        ]
    }
}

/// Input from the range controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// One or both sliders moved
    Changed(ZoomControls),
    /// Reset button pressed
    Reset,
    /// Overview clicked at this x value
    CenterOn(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Initialized,
    Viewing,
}

pub struct ZoomSession<'a> {
    x: &'a [f64],
    y: &'a [f64],
    stride: usize,
    overview: Vec<[f64; 2]>,
    x_sorted: bool,
    y_range: (f64, f64),

    initial: ZoomControls,
    controls: ZoomControls,
    window: IndexWindow,
    overlay: OverlayRegion,
    detail: Vec<[f64; 2]>,

    state: SessionState,
    redraw_requested: bool,
    revision: u64,
}

impl<'a> ZoomSession<'a> {
    /// Set up a session over `x`/`y`, showing every `stride`-th sample in the
    /// overview and starting with a half-width of `len / region_start_size`
    pub fn new(x: &'a [f64], y: &'a [f64], stride: usize, region_start_size: f64) -> Result<Self> {
        profiling::scope!("ZoomSession::new");

        error::check_pair(x, y)?;
        if x.len() < 2 {
            return Err(PlotError::InsufficientData {
                operation: "Dynamic zoom".to_string(),
                required: 2,
                actual: x.len(),
            });
        }
        if !(region_start_size > 0.0 && region_start_size.is_finite()) {
            return Err(PlotError::Validation(format!(
                "region start size must be positive, got {}",
                region_start_size
            )));
        }

        let overview_x = stride_downsample(x, stride)?;
        let overview_y = stride_downsample(y, stride)?;
        let y_range = finite_range(y).ok_or_else(|| {
            PlotError::Validation("y contains no finite samples".to_string())
        })?;

        let len = x.len() as f64;
        let initial = ZoomControls {
            center: len / 2.0,
            half_width: len / region_start_size,
        };
        let window = IndexWindow::resolve(initial, x.len());

        let session = Self {
            x,
            y,
            stride,
            overview: to_points(&overview_x, &overview_y),
            x_sorted: x.is_sorted(),
            y_range,
            initial,
            controls: initial,
            window,
            overlay: OverlayRegion::covering(x, window, y_range),
            detail: to_points(&x[window.left..window.right], &y[window.left..window.right]),
            state: SessionState::Initialized,
            redraw_requested: true,
            revision: 0,
        };

        tracing::info!(
            samples = x.len(),
            stride,
            overview = session.overview.len(),
            left = window.left,
            right = window.right,
            "dynamic zoom session ready"
        );

        Ok(session)
    }

    /// Dispatch a control event and return the window now on display
    pub fn handle(&mut self, event: ControlEvent) -> IndexWindow {
        match event {
            ControlEvent::Changed(controls) => self.on_controls_changed(controls),
            ControlEvent::Reset => self.reset(),
            ControlEvent::CenterOn(x_value) => self.center_on(x_value).unwrap_or(self.window),
        }
    }

    /// Recompute the window from new control values, replace the overlay and
    /// the detail data, and request a redraw
    pub fn on_controls_changed(&mut self, controls: ZoomControls) -> IndexWindow {
        profiling::scope!("on_controls_changed");

        self.controls = controls;
        let window = IndexWindow::resolve(controls, self.x.len());

        // Old band and detail slice are dropped here, before the next frame reads them
        self.overlay = OverlayRegion::covering(self.x, window, self.y_range);
        self.detail = to_points(&self.x[window.left..window.right], &self.y[window.left..window.right]);
        self.window = window;
        self.state = SessionState::Viewing;
        self.redraw_requested = true;
        self.revision += 1;

        tracing::debug!(
            center = controls.center,
            half_width = controls.half_width,
            left = window.left,
            right = window.right,
            "zoom window updated"
        );

        window
    }

    /// Restore the construction-time controls
    pub fn reset(&mut self) -> IndexWindow {
        tracing::debug!("zoom controls reset");
        self.on_controls_changed(self.initial)
    }

    /// Re-centre on the sample nearest to `x_value`, keeping the width.
    /// Only possible when x is sorted.
    pub fn center_on(&mut self, x_value: f64) -> Option<IndexWindow> {
        if !self.x_sorted {
            return None;
        }
        let idx = closest_index(self.x, x_value)?;
        Some(self.on_controls_changed(ZoomControls {
            center: idx as f64,
            half_width: self.controls.half_width,
        }))
    }

    /// Sample nearest to `x_value` within the current window (sorted x only)
    pub fn nearest_sample(&self, x_value: f64) -> Option<(usize, f64, f64)> {
        if !self.x_sorted {
            return None;
        }
        let slice = &self.x[self.window.left..self.window.right];
        let i = self.window.left + closest_index(slice, x_value)?;
        Some((i, self.x[i], self.y[i]))
    }

    /// Called after a frame has been drawn
    pub fn mark_rendered(&mut self) {
        if self.state == SessionState::Initialized {
            self.state = SessionState::Viewing;
        }
    }

    /// Take the pending redraw request
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn controls(&self) -> ZoomControls {
        self.controls
    }

    pub fn initial_controls(&self) -> ZoomControls {
        self.initial
    }

    pub fn window(&self) -> IndexWindow {
        self.window
    }

    pub fn overlay(&self) -> &OverlayRegion {
        &self.overlay
    }

    /// Number of times the overlay has been replaced
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn overview_points(&self) -> &[[f64; 2]] {
        &self.overview
    }

    pub fn detail_points(&self) -> &[[f64; 2]] {
        &self.detail
    }

    pub fn is_x_sorted(&self) -> bool {
        self.x_sorted
    }

    /// Horizontal bounds of the detail panel: `[x[left], x[right]]`
    pub fn detail_x_bounds(&self) -> (f64, f64) {
        let (a, b) = (self.x[self.window.left], self.x[self.window.right]);
        widen_if_flat(a.min(b), a.max(b))
    }

    /// Horizontal bounds of the overview panel
    pub fn overview_x_bounds(&self) -> (f64, f64) {
        let (lo, hi) = finite_range(self.x).unwrap_or((0.0, 1.0));
        let pad = (hi - lo) * AXIS_MARGIN;
        widen_if_flat(lo - pad, hi + pad)
    }

    /// Vertical bounds shared by both panels
    pub fn y_bounds(&self) -> (f64, f64) {
        let (lo, hi) = self.y_range;
        let pad = (hi - lo) * AXIS_MARGIN;
        widen_if_flat(lo - pad, hi + pad)
    }

    /// Upper end of both slider ranges
    pub fn slider_max(&self) -> f64 {
        self.x.len() as f64
    }
}

fn widen_if_flat(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ramp(n: usize) -> (Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (0..n).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = (0..n).map(|i| ((i as f64) * 0.01).sin()).collect();
        (x, y)
    }

    fn controls(center: f64, half_width: f64) -> ZoomControls {
        ZoomControls { center, half_width }
    }

    #[test]
    fn test_initial_window_from_region_start_size() {
        let (x, y) = ramp(100_000);
        let session = ZoomSession::new(&x, &y, 1, 1000.0).unwrap();

        assert_eq!(session.initial_controls(), controls(50_000.0, 100.0));
        assert_eq!(session.window(), IndexWindow { left: 49_900, right: 50_100 });
        assert_eq!(session.detail_points().len(), 200);
        assert_eq!(session.state(), SessionState::Initialized);
    }

    #[test]
    fn test_window_clamped_at_start() {
        let w = IndexWindow::resolve(controls(0.0, 50.0), 1000);
        assert_eq!(w, IndexWindow { left: 0, right: 50 });
    }

    #[test]
    fn test_window_clamped_at_end() {
        let len = 1000;
        let w = IndexWindow::resolve(controls((len - 1) as f64, 50.0), len);
        assert_eq!(w, IndexWindow { left: len - 51, right: len - 1 });
    }

    #[test]
    fn test_degenerate_windows_widen_to_one_sample() {
        assert_eq!(
            IndexWindow::resolve(controls(10.0, 0.0), 100),
            IndexWindow { left: 10, right: 11 }
        );
        assert_eq!(
            IndexWindow::resolve(controls(500.0, 10.0), 100),
            IndexWindow { left: 98, right: 99 }
        );
        assert_eq!(
            IndexWindow::resolve(controls(-500.0, 10.0), 100),
            IndexWindow { left: 0, right: 1 }
        );
    }

    #[test]
    fn test_controls_change_updates_detail_and_overlay() {
        let (x, y) = ramp(1000);
        let mut session = ZoomSession::new(&x, &y, 10, 100.0).unwrap();
        let before = session.revision();

        let w = session.handle(ControlEvent::Changed(controls(200.0, 20.0)));

        assert_eq!(w, IndexWindow { left: 180, right: 220 });
        assert_eq!(session.revision(), before + 1);
        assert_eq!(session.detail_points().len(), 40);
        assert_eq!(session.detail_points()[0], [x[180], y[180]]);
        assert_eq!(session.detail_x_bounds(), (x[180], x[220]));
        assert_eq!(session.overlay().x_start, x[180]);
        assert_eq!(session.overlay().x_end, x[219]);
        assert_eq!(session.state(), SessionState::Viewing);
        assert!(session.take_redraw());
        assert!(!session.take_redraw());
    }

    #[test]
    fn test_overlay_spans_y_range() {
        let (x, y) = ramp(1000);
        let session = ZoomSession::new(&x, &y, 1, 10.0).unwrap();
        let (lo, hi) = finite_range(&y).unwrap();

        assert_eq!(session.overlay().y_min, lo);
        assert_eq!(session.overlay().y_max, hi);
        assert_eq!(session.overlay().polygon().len(), 4);
    }

    #[test]
    fn test_reset_restores_initial_window() {
        let (x, y) = ramp(5000);
        let mut session = ZoomSession::new(&x, &y, 5, 1000.0).unwrap();
        let initial_window = session.window();

        session.handle(ControlEvent::Changed(controls(10.0, 3000.0)));
        assert_ne!(session.window(), initial_window);

        let w = session.handle(ControlEvent::Reset);
        assert_eq!(w, initial_window);
        assert_eq!(session.controls(), session.initial_controls());
    }

    #[test]
    fn test_center_on_uses_nearest_sample() {
        let (x, y) = ramp(1000);
        let mut session = ZoomSession::new(&x, &y, 1, 100.0).unwrap();
        let half_width = session.controls().half_width;

        // x = 0.5 * i, so 100.2 is nearest to index 200
        let w = session.handle(ControlEvent::CenterOn(100.2)).left;

        assert_eq!(session.controls().center, 200.0);
        assert_eq!(session.controls().half_width, half_width);
        assert_eq!(w, 190);
    }

    #[test]
    fn test_center_on_ignored_for_unsorted_x() {
        let x = vec![3.0, 1.0, 2.0, 0.0];
        let y = vec![0.0, 1.0, 0.0, 1.0];
        let mut session = ZoomSession::new(&x, &y, 1, 2.0).unwrap();
        let before = session.window();

        assert!(session.center_on(1.0).is_none());
        assert_eq!(session.handle(ControlEvent::CenterOn(1.0)), before);
        assert!(session.nearest_sample(1.0).is_none());
    }

    #[test]
    fn test_nearest_sample_within_window() {
        let (x, y) = ramp(1000);
        let mut session = ZoomSession::new(&x, &y, 1, 100.0).unwrap();
        session.on_controls_changed(controls(100.0, 10.0));

        let (i, xv, yv) = session.nearest_sample(45.26).unwrap();
        assert_eq!(i, 91);
        assert_eq!((xv, yv), (x[91], y[91]));

        // Outside the window, the nearest edge sample is reported
        assert_eq!(session.nearest_sample(0.0).unwrap().0, 90);
    }

    #[test]
    fn test_overview_is_downsampled() {
        let (x, y) = ramp(1001);
        let session = ZoomSession::new(&x, &y, 10, 100.0).unwrap();

        assert_eq!(session.overview_points().len(), 101);
        assert_eq!(session.overview_points()[1], [x[10], y[10]]);
    }

    #[test]
    fn test_mark_rendered_enters_viewing() {
        let (x, y) = ramp(10);
        let mut session = ZoomSession::new(&x, &y, 1, 2.0).unwrap();
        session.mark_rendered();
        assert_eq!(session.state(), SessionState::Viewing);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            ZoomSession::new(&[1.0], &[1.0], 1, 10.0),
            Err(PlotError::InsufficientData { actual: 1, .. })
        ));
        assert!(matches!(
            ZoomSession::new(&[1.0, 2.0], &[1.0], 1, 10.0),
            Err(PlotError::LengthMismatch { .. })
        ));
        assert!(ZoomSession::new(&[1.0, 2.0], &[1.0, 2.0], 0, 10.0).is_err());
        assert!(ZoomSession::new(&[1.0, 2.0], &[1.0, 2.0], 1, 0.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_window_bounds_hold(
            len in 2usize..200_000,
            center_frac in 0.0f64..=1.0,
            width_frac in 0.0f64..=1.0,
        ) {
            let c = controls(center_frac * len as f64, width_frac * len as f64);
            let w = IndexWindow::resolve(c, len);

            prop_assert!(w.left < w.right);
            prop_assert!(w.right <= len - 1);
        }

        #[test]
        fn prop_resolve_is_idempotent(
            len in 2usize..10_000,
            center in -20_000.0f64..20_000.0,
            half_width in 0.0f64..20_000.0,
        ) {
            let c = controls(center, half_width);
            prop_assert_eq!(IndexWindow::resolve(c, len), IndexWindow::resolve(c, len));
        }

        #[test]
        fn prop_overview_length_is_ceil(len in 2usize..5_000, stride in 1usize..300) {
            let (x, y) = ramp(len);
            let session = ZoomSession::new(&x, &y, stride, 10.0).unwrap();
            prop_assert_eq!(session.overview_points().len(), len.div_ceil(stride));
        }
    }
}
