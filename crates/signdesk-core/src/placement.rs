//! Signature placement overlay
//!
//! Operators arm the overlay with [`PlacementOverlay::toggle_placing`], then
//! click the page preview. The click offset is stored as page fractions so a
//! marker stays put no matter how the preview is zoomed. Page navigation and
//! zoom are presentation state only.

use crate::config::PlacementConfig;
use crate::coords::normalize;
use crate::error::{Result, SignDeskError};
use signdesk_types::SignaturePosition;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct PlacementOverlay {
    markers: Vec<SignaturePosition>,
    placing: bool,
    current_page: u32,
    total_pages: u32,
    /// Zoom in whole percent; integer steps never drift
    zoom_percent: u32,
    min_zoom: u32,
    max_zoom: u32,
    zoom_step: u32,
}

impl PlacementOverlay {
    pub fn new(total_pages: u32) -> Self {
        Self::with_config(total_pages, &PlacementConfig::default())
    }

    pub fn with_config(total_pages: u32, config: &PlacementConfig) -> Self {
        let min_zoom = config.min_zoom_percent.max(1);
        let max_zoom = config.max_zoom_percent.max(min_zoom);
        Self {
            markers: Vec::new(),
            placing: false,
            current_page: 1,
            total_pages: total_pages.max(1),
            zoom_percent: 100_u32.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            zoom_step: config.zoom_step_percent.max(1),
        }
    }

    /// Start from previously saved positions, e.g. when editing a template
    pub fn with_markers(mut self, markers: Vec<SignaturePosition>) -> Self {
        // Pages beyond the preview would be unreachable
        if let Some(max_page) = markers.iter().map(|m| m.page).max() {
            self.total_pages = self.total_pages.max(max_page);
        }
        self.markers = markers;
        self
    }

    pub fn markers(&self) -> &[SignaturePosition] {
        &self.markers
    }

    pub fn is_placing(&self) -> bool {
        self.placing
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn toggle_placing(&mut self) -> bool {
        self.placing = !self.placing;
        debug!(placing = self.placing, "placement toggled");
        self.placing
    }

    /// Handle a click on the preview surface.
    ///
    /// `offset_x`/`offset_y` are relative to the surface's top-left corner
    /// and `width`/`height` are its rendered size. Returns the new marker,
    /// or `None` when the overlay is not armed.
    pub fn click_surface(
        &mut self,
        offset_x: f64,
        offset_y: f64,
        width: f64,
        height: f64,
    ) -> Result<Option<SignaturePosition>> {
        if !self.placing {
            return Ok(None);
        }

        let (x, y) = normalize(offset_x, offset_y, width, height)?;
        let marker = SignaturePosition::new(x, y, self.current_page);
        self.markers.push(marker);
        self.placing = false;

        info!(
            x = marker.x,
            y = marker.y,
            page = marker.page,
            "signature marker added"
        );
        Ok(Some(marker))
    }

    /// Remove one marker by its index in [`Self::markers`]
    pub fn remove_marker(&mut self, index: usize) -> Result<SignaturePosition> {
        if index >= self.markers.len() {
            return Err(SignDeskError::MarkerNotFound(index));
        }
        let removed = self.markers.remove(index);
        info!(index, page = removed.page, "signature marker removed");
        Ok(removed)
    }

    /// Markers on the page being shown, paired with their index in [`Self::markers`]
    pub fn markers_on_current_page(&self) -> Vec<(usize, SignaturePosition)> {
        self.markers
            .iter()
            .enumerate()
            .filter(|(_, m)| m.page == self.current_page)
            .map(|(i, m)| (i, *m))
            .collect()
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn next_page(&mut self) -> u32 {
        if self.can_go_next() {
            self.current_page += 1;
        }
        self.current_page
    }

    pub fn prev_page(&mut self) -> u32 {
        if self.can_go_prev() {
            self.current_page -= 1;
        }
        self.current_page
    }

    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages.max(1);
        self.current_page = self.current_page.min(self.total_pages);
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }

    pub fn zoom(&self) -> f64 {
        f64::from(self.zoom_percent) / 100.0
    }

    pub fn zoom_label(&self) -> String {
        format!("{}%", self.zoom_percent)
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom_percent < self.max_zoom
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom_percent > self.min_zoom
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.zoom_percent = self
            .zoom_percent
            .saturating_add(self.zoom_step)
            .min(self.max_zoom);
        self.zoom()
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.zoom_percent = self
            .zoom_percent
            .saturating_sub(self.zoom_step)
            .max(self.min_zoom);
        self.zoom()
    }

    /// The full ordered marker list, if there is at least one marker
    pub fn save(&self) -> Result<Vec<SignaturePosition>> {
        if self.markers.is_empty() {
            warn!("placement save rejected: no markers");
            return Err(SignDeskError::NoMarkers);
        }
        Ok(self.markers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_click_without_placing_does_nothing() {
        let mut overlay = PlacementOverlay::new(3);
        assert_eq!(overlay.click_surface(10.0, 10.0, 300.0, 600.0).unwrap(), None);
        assert!(overlay.markers().is_empty());
    }

    #[test]
    fn test_center_click_on_portrait_surface() {
        let mut overlay = PlacementOverlay::new(1);
        overlay.toggle_placing();
        let marker = overlay
            .click_surface(150.0, 300.0, 300.0, 600.0)
            .unwrap()
            .unwrap();
        assert_eq!(marker, SignaturePosition::new(0.5, 0.5, 1));
        assert!(!overlay.is_placing());
    }

    #[test]
    fn test_placing_disarms_after_one_marker() {
        let mut overlay = PlacementOverlay::new(1);
        overlay.toggle_placing();
        overlay.click_surface(10.0, 10.0, 100.0, 100.0).unwrap();
        overlay.click_surface(20.0, 20.0, 100.0, 100.0).unwrap();
        assert_eq!(overlay.markers().len(), 1);
    }

    #[test]
    fn test_toggle_twice_disarms() {
        let mut overlay = PlacementOverlay::new(1);
        assert!(overlay.toggle_placing());
        assert!(!overlay.toggle_placing());
    }

    #[test]
    fn test_marker_is_tagged_with_current_page() {
        let mut overlay = PlacementOverlay::new(3);
        overlay.next_page();
        overlay.next_page();
        overlay.toggle_placing();
        let marker = overlay
            .click_surface(30.0, 60.0, 300.0, 600.0)
            .unwrap()
            .unwrap();
        assert_eq!(marker.page, 3);
    }

    #[test]
    fn test_remove_keeps_order_of_others() {
        let mut overlay = PlacementOverlay::new(2);
        for (x, page) in [(10.0, 1), (20.0, 2), (30.0, 1)] {
            if overlay.current_page() != page {
                if page > overlay.current_page() {
                    overlay.next_page();
                } else {
                    overlay.prev_page();
                }
            }
            overlay.toggle_placing();
            overlay.click_surface(x, 50.0, 100.0, 100.0).unwrap();
        }

        let removed = overlay.remove_marker(1).unwrap();
        assert_eq!(removed.page, 2);
        assert_eq!(
            overlay.markers(),
            &[
                SignaturePosition::new(0.1, 0.5, 1),
                SignaturePosition::new(0.3, 0.5, 1),
            ]
        );
    }

    #[test]
    fn test_remove_does_not_need_placing() {
        let mut overlay =
            PlacementOverlay::new(1).with_markers(vec![SignaturePosition::new(0.5, 0.5, 1)]);
        assert!(!overlay.is_placing());
        overlay.remove_marker(0).unwrap();
        assert!(overlay.markers().is_empty());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut overlay = PlacementOverlay::new(1);
        assert_eq!(
            overlay.remove_marker(0).unwrap_err(),
            SignDeskError::MarkerNotFound(0)
        );
    }

    #[test]
    fn test_markers_on_current_page_keep_global_index() {
        let overlay = PlacementOverlay::new(3).with_markers(vec![
            SignaturePosition::new(0.2, 0.7, 1),
            SignaturePosition::new(0.8, 0.9, 3),
            SignaturePosition::new(0.4, 0.1, 1),
        ]);
        let on_page: Vec<usize> = overlay
            .markers_on_current_page()
            .into_iter()
            .map(|(i, _)| i)
            .collect();
        assert_eq!(on_page, vec![0, 2]);
    }

    #[test]
    fn test_with_markers_extends_page_count() {
        let overlay =
            PlacementOverlay::new(1).with_markers(vec![SignaturePosition::new(0.8, 0.9, 3)]);
        assert_eq!(overlay.total_pages(), 3);
    }

    #[test]
    fn test_page_navigation_is_bounded() {
        let mut overlay = PlacementOverlay::new(2);
        assert_eq!(overlay.prev_page(), 1);
        assert_eq!(overlay.next_page(), 2);
        assert_eq!(overlay.next_page(), 2);
        assert_eq!(overlay.page_label(), "Page 2 of 2");
        overlay.set_total_pages(1);
        assert_eq!(overlay.current_page(), 1);
    }

    #[test]
    fn test_zoom_steps_and_bounds() {
        let mut overlay = PlacementOverlay::new(1);
        assert_eq!(overlay.zoom_label(), "100%");
        for _ in 0..20 {
            overlay.zoom_in();
        }
        assert_eq!(overlay.zoom(), 2.0);
        assert!(!overlay.can_zoom_in());

        for _ in 0..30 {
            overlay.zoom_out();
        }
        assert_eq!(overlay.zoom(), 0.5);
        assert_eq!(overlay.zoom_label(), "50%");
        assert!(!overlay.can_zoom_out());

        overlay.zoom_in();
        assert_eq!(overlay.zoom_label(), "60%");
    }

    #[test]
    fn test_zoom_in_saturates_at_extreme_bounds() {
        let config = PlacementConfig {
            min_zoom_percent: 50,
            max_zoom_percent: u32::MAX,
            zoom_step_percent: u32::MAX - 95,
            preview_pages: 1,
        };
        let mut overlay = PlacementOverlay::with_config(1, &config);
        overlay.zoom_in();
        assert_eq!(overlay.zoom_label(), format!("{}%", u32::MAX));
        overlay.zoom_in();
        assert!(!overlay.can_zoom_in());
    }

    #[test]
    fn test_inverted_zoom_bounds_do_not_panic() {
        let config = PlacementConfig {
            min_zoom_percent: 300,
            max_zoom_percent: 100,
            ..PlacementConfig::default()
        };
        let overlay = PlacementOverlay::with_config(1, &config);
        assert_eq!(overlay.zoom_label(), "300%");
    }

    #[test]
    fn test_zoom_does_not_move_markers() {
        let mut overlay = PlacementOverlay::new(1);
        overlay.toggle_placing();
        overlay.click_surface(75.0, 150.0, 300.0, 600.0).unwrap();
        let before = overlay.markers().to_vec();
        overlay.zoom_in();
        overlay.zoom_in();
        assert_eq!(overlay.markers(), before.as_slice());
    }

    #[test]
    fn test_save_requires_markers() {
        let overlay = PlacementOverlay::new(1);
        assert_eq!(overlay.save().unwrap_err(), SignDeskError::NoMarkers);

        let overlay =
            PlacementOverlay::new(1).with_markers(vec![SignaturePosition::new(0.5, 0.8, 1)]);
        assert_eq!(overlay.save().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_surface_keeps_placing_armed() {
        let mut overlay = PlacementOverlay::new(1);
        overlay.toggle_placing();
        assert!(overlay.click_surface(1.0, 1.0, 0.0, 0.0).is_err());
        assert!(overlay.is_placing());
    }
}
