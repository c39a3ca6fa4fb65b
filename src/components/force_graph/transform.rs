//! Pan and zoom mapping between world (simulation) and screen (canvas pixel)
//! coordinates: `screen = world * k + (x, y)`.

pub const MIN_ZOOM: f64 = 0.3;
pub const MAX_ZOOM: f64 = 3.0;
/// Zoom multiplier per wheel notch toward the viewer.
pub const ZOOM_IN_FACTOR: f64 = 1.1;
/// Zoom multiplier per wheel notch away from the viewer.
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal pan in screen pixels.
	pub x: f64,
	/// Vertical pan in screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to `MIN_ZOOM..=MAX_ZOOM`).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
		(wx * self.k + self.x, wy * self.k + self.y)
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.x += dx;
		self.y += dy;
	}

	/// Zoom one wheel notch in or out, keeping the world point under
	/// `(sx, sy)` fixed on screen.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, zoom_in: bool) {
		let factor = if zoom_in {
			ZOOM_IN_FACTOR
		} else {
			ZOOM_OUT_FACTOR
		};
		self.zoom_to(sx, sy, self.k * factor);
	}

	/// Set an absolute zoom level (clamped), anchored at `(sx, sy)`.
	pub fn zoom_to(&mut self, sx: f64, sy: f64, k: f64) {
		let new_k = k.clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}

	/// Zoom as a whole percentage for the on-canvas readout.
	pub fn zoom_percent(&self) -> u32 {
		(self.k * 100.0).round() as u32
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn screen_world_inverse() {
		let t = ViewTransform {
			x: 40.0,
			y: -12.0,
			k: 1.7,
		};
		let (wx, wy) = t.screen_to_world(310.0, 95.0);
		let (sx, sy) = t.world_to_screen(wx, wy);
		assert!((sx - 310.0).abs() < 1e-9);
		assert!((sy - 95.0).abs() < 1e-9);
	}

	#[test]
	fn zoom_stays_in_bounds() {
		let mut t = ViewTransform::default();
		for _ in 0..100 {
			t.zoom_at(200.0, 150.0, true);
			assert!(t.k <= MAX_ZOOM);
		}
		assert_eq!(t.k, MAX_ZOOM);
		for _ in 0..200 {
			t.zoom_at(200.0, 150.0, false);
			assert!(t.k >= MIN_ZOOM);
		}
		assert_eq!(t.k, MIN_ZOOM);
	}

	#[test]
	fn zoom_keeps_pointer_anchored() {
		let mut t = ViewTransform {
			x: 25.0,
			y: 60.0,
			k: 0.8,
		};
		let (px, py) = (412.0, 233.0);
		for zoom_in in [true, true, false, true, false, false, false] {
			let before = t.screen_to_world(px, py);
			t.zoom_at(px, py, zoom_in);
			let (sx, sy) = t.world_to_screen(before.0, before.1);
			assert!((sx - px).abs() < 1e-9);
			assert!((sy - py).abs() < 1e-9);
		}
	}

	#[test]
	fn clamped_zoom_does_not_drift_pan() {
		let mut t = ViewTransform {
			x: 10.0,
			y: 20.0,
			k: MAX_ZOOM,
		};
		t.zoom_at(300.0, 300.0, true);
		assert_eq!((t.x, t.y, t.k), (10.0, 20.0, MAX_ZOOM));
	}

	#[test]
	fn pan_and_percent() {
		let mut t = ViewTransform::default();
		t.pan_by(5.0, -3.0);
		assert_eq!((t.x, t.y), (5.0, -3.0));
		assert_eq!(t.zoom_percent(), 100);
		t.zoom_to(0.0, 0.0, 1.234);
		assert_eq!(t.zoom_percent(), 123);
	}
}
