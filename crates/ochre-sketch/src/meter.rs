// Copyright 2026 the Ochre Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The tiered sketch cost meter.
//!
//! The meter keeps a running, signed, resettable total of the "cost units"
//! strokes and widgets consume, stored as `(tier_index, amount_in_tier)` so
//! very large sketches stay representable without float precision loss in a
//! single accumulator. The host UI renders the pair as a gauge that wraps
//! into a new colored tier each time a tier fills.

use ochre_core::math::LinearRgba;
use ochre_core::sketch::Stroke;

/// Cost capacity of a single meter tier.
///
/// One tier corresponds to 250,000 control points of a nominal brush at
/// size 1.
pub const TIER_CAPACITY: f32 = 250_000.0;

/// Display description of one meter tier.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterTier {
    /// Short label shown when the gauge is inside this tier.
    pub label: String,
    /// Gauge fill color for this tier.
    pub color: LinearRgba,
}

impl MeterTier {
    /// Creates a display tier.
    pub fn new(label: impl Into<String>, color: LinearRgba) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}

/// A tiered, signed accumulator of sketch cost.
///
/// State is the pair `(tier_index, amount_in_tier)`; after every
/// adjustment `0 <= amount_in_tier < TIER_CAPACITY` and `tier_index >= 0`
/// hold. Costs are added when strokes or widgets are created and
/// subtracted when they are deleted or undone, so deltas are signed and
/// the accumulator floors at zero (a deficit is forgotten, not carried).
///
/// Purely arithmetic: no operation here fails.
#[derive(Debug, Clone, PartialEq)]
pub struct SketchMeter {
    tiers: Vec<MeterTier>,
    max_label: String,
    brush_size_affects_cost: bool,
    widget_cost_scalar: f32,
    tier_index: i32,
    amount_in_tier: f32,
}

impl SketchMeter {
    /// Creates a meter with the given display tiers and the label shown
    /// once the gauge has filled past the last tier.
    pub fn new(tiers: Vec<MeterTier>, max_label: impl Into<String>) -> Self {
        Self {
            tiers,
            max_label: max_label.into(),
            brush_size_affects_cost: false,
            widget_cost_scalar: 0.002,
            tier_index: 0,
            amount_in_tier: 0.0,
        }
    }

    /// Makes stroke cost scale with brush size. Off by default.
    pub fn with_brush_size_cost(mut self, enabled: bool) -> Self {
        self.brush_size_affects_cost = enabled;
        self
    }

    // --- Read accessors ---

    /// The tier the gauge is currently in.
    #[inline]
    pub fn tier_index(&self) -> i32 {
        self.tier_index
    }

    /// Cost accumulated within the current tier, in `[0, TIER_CAPACITY)`.
    #[inline]
    pub fn amount_in_tier(&self) -> f32 {
        self.amount_in_tier
    }

    /// The total accumulated cost as a single monotonic scalar. For
    /// debugging and analytics; the tiered UI reads the pair instead.
    #[inline]
    pub fn unified_value(&self) -> f32 {
        self.tier_index as f32 * TIER_CAPACITY + self.amount_in_tier
    }

    /// How full the current tier's gauge is, in `[0, 1]`. Pinned to 1.0
    /// once the meter has passed the last display tier.
    pub fn tier_full_ratio(&self) -> f32 {
        if self.tier_index as usize + 1 > self.tiers.len() {
            return 1.0;
        }
        self.amount_in_tier / TIER_CAPACITY
    }

    /// Gauge fill color for the current tier (the last tier's color once
    /// past the end of the display tiers).
    ///
    /// # Panics
    /// Panics if the meter was created with no display tiers.
    pub fn tier_color(&self) -> LinearRgba {
        let capped = (self.tier_index as usize).min(self.tiers.len() - 1);
        self.tiers[capped].color
    }

    /// Gauge background color: the previous tier's color, half-grey below
    /// the first tier, the last tier's color past the end.
    ///
    /// # Panics
    /// Panics if the meter was created with no display tiers.
    pub fn tier_bg_color(&self) -> LinearRgba {
        let over_max = self.tier_index as usize > self.tiers.len() - 1;
        if self.tier_index < 1 {
            LinearRgba::GREY * 0.5
        } else if over_max {
            self.tiers[self.tiers.len() - 1].color
        } else {
            self.tiers[self.tier_index as usize - 1].color
        }
    }

    /// Color for an absolute meter value on a `[0, 1]` scale, lerping
    /// between adjacent tier colors.
    ///
    /// # Panics
    /// Panics if the meter was created with no display tiers.
    pub fn color_for_value(&self, value: f32) -> LinearRgba {
        let per_tier = 1.0 / self.tiers.len() as f32;
        let mut value = value;
        let mut tier = 0usize;
        while value > per_tier {
            tier += 1;
            value -= per_tier;
        }
        if tier >= self.tiers.len() - 1 {
            return self.tiers[self.tiers.len() - 1].color;
        }
        LinearRgba::lerp(
            self.tiers[tier].color,
            self.tiers[tier + 1].color,
            value / per_tier,
        )
    }

    /// Label for the current tier. Past the last display tier this is the
    /// max label, suffixed with a multiplier once more than one tier over.
    pub fn tier_text(&self) -> String {
        let capped = (self.tier_index as usize).min(self.tiers.len().saturating_sub(1));
        if self.tier_index as usize > self.tiers.len().saturating_sub(1) {
            let over = self.tier_index as usize - capped;
            if over > 1 {
                format!("{} x{over}", self.max_label)
            } else {
                self.max_label.clone()
            }
        } else {
            self.tiers[capped].label.clone()
        }
    }

    // --- Mutation ---

    /// Reinitializes the meter to `(0, 0)`. Invoked on new-sketch/load.
    pub fn reset(&mut self) {
        self.tier_index = 0;
        self.amount_in_tier = 0.0;
    }

    /// Adds or removes the cost of a brush stroke.
    ///
    /// `vertex_count` is the stroke's generated geometry size and
    /// `per_vertex_cost` the brush's cost weight, both supplied by the host
    /// geometry subsystem.
    pub fn adjust_for_stroke(
        &mut self,
        stroke: &Stroke,
        vertex_count: u32,
        per_vertex_cost: f32,
        up: bool,
    ) {
        // Make brush size not matter if we're ignoring it.
        let size = if self.brush_size_affects_cost {
            stroke.brush_size
        } else {
            1.0
        };
        let cost = per_vertex_cost * vertex_count as f32 * size;
        if cost > 0.0 {
            self.adjust(if up { cost } else { -cost });
        }
    }

    /// Adds or removes the cost of a non-stroke widget (models, images...).
    pub fn adjust_for_widget(&mut self, widget_cost: i32, up: bool) {
        let sign = if up { 1.0 } else { -1.0 };
        self.adjust(widget_cost as f32 * self.widget_cost_scalar * sign);
    }

    /// Applies a signed cost delta and renormalizes the tier pair.
    pub fn adjust(&mut self, delta: f32) {
        self.amount_in_tier += delta;

        while self.amount_in_tier >= TIER_CAPACITY {
            self.amount_in_tier -= TIER_CAPACITY;
            self.tier_index += 1;
        }
        while self.amount_in_tier < 0.0 {
            self.amount_in_tier += TIER_CAPACITY;
            self.tier_index -= 1;
        }

        // Cost cannot go negative overall; a deficit floors the meter.
        if self.tier_index < 0 {
            self.tier_index = 0;
            self.amount_in_tier = 0.0;
        }
    }
}

impl Default for SketchMeter {
    /// A meter with no display tiers; the accounting accessors work, the
    /// color accessors require tiers.
    fn default() -> Self {
        Self::new(Vec::new(), String::new())
    }
}
