//! Lead-time color bins and order-volume marker tiers.

use serde::Serialize;

/// Color bin of a region's minimum lead time
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    NoData,
    Fastest,
    Fast,
    Medium,
    Slow,
    Slowest,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::NoData,
        Category::Fastest,
        Category::Fast,
        Category::Medium,
        Category::Slow,
        Category::Slowest,
    ];

    /// Fill color used by the map
    pub fn color(self) -> &'static str {
        match self {
            Category::NoData => "white",
            Category::Fastest => "blue",
            Category::Fast => "green",
            Category::Medium => "yellow",
            Category::Slow => "orange",
            Category::Slowest => "red",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::NoData => "no data",
            Category::Fastest => "0-2 days",
            Category::Fast => "3 days",
            Category::Medium => "4 days",
            Category::Slow => "5-6 days",
            Category::Slowest => "7+ days",
        }
    }
}

/// Classify a minimum lead time; `None` means no qualifying shipment
pub fn color_for(lead_time_days: Option<u32>) -> Category {
    match lead_time_days {
        None => Category::NoData,
        Some(0..=2) => Category::Fastest,
        Some(3) => Category::Fast,
        Some(4) => Category::Medium,
        Some(5..=6) => Category::Slow,
        Some(_) => Category::Slowest,
    }
}

/// Marker size class of a destination's total order count
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SizeTier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
    Tier5,
}

impl SizeTier {
    /// Drawn circle radius in pixels
    pub fn radius(self) -> u32 {
        match self {
            SizeTier::Tier1 => 5,
            SizeTier::Tier2 => 10,
            SizeTier::Tier3 => 15,
            SizeTier::Tier4 => 20,
            SizeTier::Tier5 => 25,
        }
    }
}

pub fn size_tier_for(count: u64) -> SizeTier {
    match count {
        c if c < 200 => SizeTier::Tier1,
        c if c < 500 => SizeTier::Tier2,
        c if c < 700 => SizeTier::Tier3,
        c if c < 1000 => SizeTier::Tier4,
        _ => SizeTier::Tier5,
    }
}

/// One row of the map legend
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LegendEntry {
    pub category: Category,
    pub color: &'static str,
    pub description: &'static str,
}

pub fn legend() -> Vec<LegendEntry> {
    Category::ALL
        .iter()
        .map(|&category| LegendEntry {
            category,
            color: category.color(),
            description: category.description(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_boundaries() {
        assert_eq!(color_for(None), Category::NoData);
        assert_eq!(color_for(Some(0)), Category::Fastest);
        assert_eq!(color_for(Some(2)), Category::Fastest);
        assert_eq!(color_for(Some(3)), Category::Fast);
        assert_eq!(color_for(Some(4)), Category::Medium);
        assert_eq!(color_for(Some(5)), Category::Slow);
        assert_eq!(color_for(Some(6)), Category::Slow);
        assert_eq!(color_for(Some(7)), Category::Slowest);
        assert_eq!(color_for(Some(u32::MAX)), Category::Slowest);
    }

    #[test]
    fn test_colors() {
        assert_eq!(color_for(None).color(), "white");
        assert_eq!(color_for(Some(1)).color(), "blue");
        assert_eq!(color_for(Some(9)).color(), "red");
    }

    #[test]
    fn test_size_tier_boundaries() {
        let cases = [
            (0, SizeTier::Tier1),
            (199, SizeTier::Tier1),
            (200, SizeTier::Tier2),
            (499, SizeTier::Tier2),
            (500, SizeTier::Tier3),
            (699, SizeTier::Tier3),
            (700, SizeTier::Tier4),
            (999, SizeTier::Tier4),
            (1000, SizeTier::Tier5),
        ];
        for (count, tier) in cases {
            assert_eq!(size_tier_for(count), tier, "count {}", count);
        }
    }

    #[test]
    fn test_radii_strictly_increase() {
        let radii: Vec<u32> = [SizeTier::Tier1, SizeTier::Tier2, SizeTier::Tier3, SizeTier::Tier4, SizeTier::Tier5]
            .iter()
            .map(|t| t.radius())
            .collect();
        assert!(radii.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(radii, vec![5, 10, 15, 20, 25]);
    }

    #[test]
    fn test_legend_covers_every_category() {
        let legend = legend();
        assert_eq!(legend.len(), 6);
        assert_eq!(legend[0].color, "white");
        assert_eq!(legend[5].description, "7+ days");
    }
}
