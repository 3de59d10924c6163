//=========================================================================
// Color Cycler
//=========================================================================
//
// Rate-limited palette cycling for the installation's directional light.
//
// Each cycle request pushes the next palette color to the host light rig.
// Changes are capped to one per interval so a held contact does not make
// the room flicker.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::host::{LightRig, Rgb};

//=== Palette Defaults ====================================================

/// Neutral white.
pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

/// Sea / beach scene tint.
pub const SEA_BLUE: Rgb = Rgb::new(0.4157, 0.3765, 0.7843);

/// Forest scene tint; natural light.
pub const NATURAL_YELLOW: Rgb = Rgb::new(0.8431, 0.7529, 0.2667);

/// Minimum spacing between two color changes.
pub const DEFAULT_COLOR_INTERVAL: f64 = 0.5;

/// The installation's stock palette, in scene order.
pub fn default_palette() -> Vec<Rgb> {
    vec![WHITE, SEA_BLUE, NATURAL_YELLOW]
}

//=== ColorCycler =========================================================

/// Steps through a color palette, wrapping, at most once per interval.
pub struct ColorCycler {
    palette: Vec<Rgb>,
    cursor: usize,
    min_interval: f64,
    last_change: f64,
}

impl ColorCycler {
    /// Creates a cycler over `palette` with the default interval.
    pub fn new(palette: Vec<Rgb>) -> Self {
        Self::with_interval(palette, DEFAULT_COLOR_INTERVAL)
    }

    /// Creates a cycler with an explicit minimum change interval.
    pub fn with_interval(palette: Vec<Rgb>, min_interval: f64) -> Self {
        Self {
            palette,
            cursor: 0,
            min_interval,
            last_change: f64::NEG_INFINITY,
        }
    }

    //--- Cycling ----------------------------------------------------------

    /// Applies the next palette color to `light`.
    ///
    /// Returns false when suppressed by the rate limit or when the palette
    /// is empty (warn-logged, not fatal).
    pub fn cycle(&mut self, now: f64, light: &mut dyn LightRig) -> bool {
        if self.palette.is_empty() {
            warn!("color cycle requested with an empty palette");
            return false;
        }

        if now - self.last_change < self.min_interval {
            return false;
        }

        let color = self.palette[self.cursor];
        debug!("light color -> {:?}", color);
        light.set_color(color);

        self.cursor = (self.cursor + 1) % self.palette.len();
        self.last_change = now;
        true
    }

    //--- Queries ----------------------------------------------------------

    pub fn palette_len(&self) -> usize {
        self.palette.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
