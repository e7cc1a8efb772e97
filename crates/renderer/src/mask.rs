use shimmerconfig::Rgba;

use crate::types::ColorStop;

/// Banded vertical opacity mask revealing stacked skeleton rows in sequence.
///
/// The animator cycle is split in two halves: during the first every band
/// fades out from top to bottom, during the second the bands fade back in
/// in the same order. Each band owns two stops with the same alpha, so the
/// gradient is flat inside a band and blends only across band edges.
#[derive(Debug, Clone)]
pub struct RevealMask {
    item_count: u32,
    reveal_fraction: f32,
    stops: Vec<ColorStop>,
}

impl Default for RevealMask {
    fn default() -> Self {
        Self::new(1, 1.0)
    }
}

impl RevealMask {
    pub fn new(item_count: u32, reveal_fraction: f32) -> Self {
        let item_count = item_count.max(1);
        let mut mask = Self {
            item_count,
            reveal_fraction: reveal_fraction.clamp(0.0, 1.0),
            stops: Vec::with_capacity(2 * item_count as usize),
        };
        mask.update(0.0);
        mask
    }

    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    pub fn reveal_fraction(&self) -> f32 {
        self.reveal_fraction
    }

    /// Changes the band count. Zero is treated as one band.
    pub fn set_item_count(&mut self, item_count: u32) {
        self.item_count = item_count.max(1);
        let wanted = 2 * self.item_count as usize;
        if self.stops.capacity() < wanted {
            self.stops.reserve(wanted - self.stops.len());
        }
    }

    pub fn set_reveal_fraction(&mut self, reveal_fraction: f32) {
        self.reveal_fraction = if reveal_fraction.is_nan() {
            0.0
        } else {
            reveal_fraction.clamp(0.0, 1.0)
        };
    }

    /// Drops the stop buffer; the next [`RevealMask::update`] reallocates it.
    pub fn release(&mut self) {
        self.stops = Vec::new();
    }

    /// Stops computed by the last [`RevealMask::update`].
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Recomputes the band stops for an animator fraction in `[0, 1]`.
    pub fn update(&mut self, fraction: f32) {
        let count = self.item_count as f32;
        let band = self.reveal_fraction / count;
        let hold = self.reveal_fraction / 100.0;

        self.stops.clear();
        for i in 0..self.item_count {
            let opacity = band_opacity(self.item_count, i, fraction);
            let color = Rgba::BLACK.with_alpha((opacity * 255.0) as u8);
            let index = i as f32;
            self.stops.push(ColorStop::new(index * band, color));
            self.stops.push(ColorStop::new((index + 1.0) * band - hold, color));
        }
    }
}

/// Opacity of band `index` out of `count` at animator fraction `fraction`.
pub fn band_opacity(count: u32, index: u32, fraction: f32) -> f32 {
    let uncovering = fraction > 0.5;
    let phase = if uncovering {
        (fraction - 0.5) / 0.5
    } else {
        fraction / 0.5
    };

    let width = 1.0 / count.max(1) as f32;
    let threshold = width * index as f32;
    let progress = (phase - threshold).clamp(0.0, width) / width;

    if uncovering {
        progress
    } else {
        1.0 - progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_band_fades_out_then_back_in() {
        let mut previous = f32::MAX;
        for step in 0..=50 {
            let opacity = band_opacity(1, 0, step as f32 / 100.0);
            assert!(opacity <= previous, "not decreasing at {step}");
            previous = opacity;
        }
        assert!(band_opacity(1, 0, 0.5).abs() < 1e-6);
        assert!(band_opacity(1, 0, 0.501).abs() < 0.01);

        let mut previous = -1.0;
        for step in 51..=100 {
            let opacity = band_opacity(1, 0, step as f32 / 100.0);
            assert!(opacity >= previous, "not increasing at {step}");
            previous = opacity;
        }
        assert!((band_opacity(1, 0, 1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rows_reveal_in_index_order() {
        let count = 4;
        let first_visible = |index: u32| {
            (51..=100)
                .map(|step| step as f32 / 100.0)
                .find(|&fraction| band_opacity(count, index, fraction) > 0.0)
                .expect("band never revealed")
        };
        for index in 1..count {
            assert!(first_visible(index) > first_visible(index - 1));
        }
    }

    #[test]
    fn stops_are_paired_per_band() {
        let mut mask = RevealMask::new(2, 1.0);
        mask.update(0.75);
        let stops = mask.stops();
        assert_eq!(stops.len(), 4);
        assert!((stops[0].position - 0.0).abs() < 1e-6);
        assert!((stops[1].position - 0.49).abs() < 1e-6);
        assert!((stops[2].position - 0.5).abs() < 1e-6);
        assert!((stops[3].position - 0.99).abs() < 1e-6);
        // phase 0.5: first band fully back, second still hidden.
        assert_eq!(stops[0].color.a, 255);
        assert_eq!(stops[1].color, stops[0].color);
        assert_eq!(stops[2].color.a, 0);
        assert_eq!(stops[3].color.a, 0);
    }

    #[test]
    fn partial_reveal_fraction_scales_bands() {
        let mut mask = RevealMask::new(2, 0.5);
        mask.update(0.0);
        let stops = mask.stops();
        assert!((stops[1].position - 0.245).abs() < 1e-6);
        assert!((stops[2].position - 0.25).abs() < 1e-6);
        assert!((stops[3].position - 0.495).abs() < 1e-6);
        assert!(stops.iter().all(|stop| stop.color.a == 255));
    }

    #[test]
    fn buffer_is_reused_between_updates() {
        let mut mask = RevealMask::new(3, 1.0);
        let capacity = mask.stops.capacity();
        for step in 0..20 {
            mask.update(step as f32 / 20.0);
        }
        assert_eq!(mask.stops.capacity(), capacity);
        assert_eq!(mask.stops().len(), 6);

        mask.release();
        assert!(mask.stops().is_empty());
        mask.update(0.25);
        assert_eq!(mask.stops().len(), 6);
    }

    #[test]
    fn reveal_fraction_is_clamped() {
        let mut mask = RevealMask::default();
        mask.set_reveal_fraction(2.5);
        assert_eq!(mask.reveal_fraction(), 1.0);
        mask.set_reveal_fraction(-1.0);
        assert_eq!(mask.reveal_fraction(), 0.0);
        mask.set_item_count(0);
        assert_eq!(mask.item_count(), 1);
    }
}
