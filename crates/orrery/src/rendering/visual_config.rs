use std::time::Duration;

use crate::rendering::primitives::Color;

/// Marker look for one of the two discrete states
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub glow_radius: f64,
    pub glow_opacity: f64,
    pub base_radius: f64,
    pub base_stroke_width: f64,
    pub symbol_size: f64,
}

/// Visual styling configuration for chart elements
#[derive(Debug, Clone)]
pub struct VisualConfig {
    pub background_color: Color,
    pub wedge_fill: Color,
    pub wedge_stroke: Color,
    pub wedge_stroke_width: f64,
    pub wedge_opacity: f64,
    pub wedge_label_color: Color,
    pub wedge_label_size: f64,
    pub focused_marker: MarkerStyle,
    /// Ambient style before the secondary-body multiplier
    pub ambient_marker: MarkerStyle,
    /// Multiplier applied to ambient non-primary markers
    pub secondary_scale: f64,
    /// Vertical offset of the marker glyph, scaled like the marker
    pub symbol_offset: f64,
    pub ambient_fill: Color,
    pub focused_stroke: Color,
    pub focused_symbol: Color,
    pub conjunction_width: f64,
    pub aspect_width: f64,
    pub aspect_dash: [f64; 2],
    pub aspect_opacity: f64,
    pub ray_color: Color,
    pub ray_width: f64,
    pub ray_opacity: f64,
    pub ray_core_radius: f64,
    pub ray_core_opacity: f64,
    /// Duration of enter/exit fades
    pub fade: Duration,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            background_color: Color::VOID,
            wedge_fill: Color::VOID,
            wedge_stroke: Color::from_hex("#1e293b").unwrap_or(Color::WHITE),
            wedge_stroke_width: 1.5,
            wedge_opacity: 0.8,
            wedge_label_color: Color::from_hex("#475569").unwrap_or(Color::WHITE),
            wedge_label_size: 34.0,
            focused_marker: MarkerStyle {
                glow_radius: 100.0,
                glow_opacity: 0.4,
                base_radius: 48.0,
                base_stroke_width: 5.0,
                symbol_size: 44.0,
            },
            ambient_marker: MarkerStyle {
                glow_radius: 75.0,
                glow_opacity: 0.1,
                base_radius: 38.0,
                base_stroke_width: 3.0,
                symbol_size: 32.0,
            },
            secondary_scale: 0.45,
            symbol_offset: 15.0,
            ambient_fill: Color::VOID,
            focused_stroke: Color::WHITE,
            focused_symbol: Color::BLACK,
            conjunction_width: 14.0,
            aspect_width: 3.0,
            aspect_dash: [10.0, 10.0],
            aspect_opacity: 0.15,
            ray_color: Color::from_hex("#fbbf24").unwrap_or(Color::WHITE),
            ray_width: 60.0,
            ray_opacity: 0.3,
            ray_core_radius: 10.0,
            ray_core_opacity: 0.2,
            fade: Duration::from_millis(300),
        }
    }
}

impl MarkerStyle {
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            glow_radius: self.glow_radius * factor,
            glow_opacity: self.glow_opacity,
            base_radius: self.base_radius * factor,
            base_stroke_width: self.base_stroke_width * factor,
            symbol_size: self.symbol_size * factor,
        }
    }
}
