//! Dashboard view model.
//!
//! Fans a [`PulseResult`] out into the three-panel layout: perspective A card,
//! proportion chart, perspective B card, plus neutral summary and citation
//! chips. No decisions beyond display defaults live here.

use serde::Serialize;

use crate::types::{Perspective, PulseResult, Source};

pub const NEUTRAL_LABEL: &str = "Neutral/Undecided";
pub const UNKNOWN_SOURCE_TITLE: &str = "Unknown Source";

/// Which slice of the split a panel or chart segment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    SideA,
    Neutral,
    SideB,
}

impl Stance {
    /// Chart colour for this slice.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Stance::SideA => "#ef4444",
            Stance::Neutral => "#94a3b8",
            Stance::SideB => "#06b6d4",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerspectiveCard {
    pub stance: Stance,
    pub name: String,
    pub percentage: u8,
    pub emotion: String,
    pub arguments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub stance: Stance,
    pub label: String,
    pub percentage: u8,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeutralPanel {
    pub percentage: u8,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceChip {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub topic: String,
    pub summary: String,
    pub side_a: PerspectiveCard,
    /// Slices in display order: sideA, neutral, sideB.
    pub chart: Vec<ChartSlice>,
    pub side_b: PerspectiveCard,
    pub neutral: NeutralPanel,
    pub sources: Vec<SourceChip>,
    /// The slice with the strictly largest share; ties resolve to neutral.
    pub dominant: Stance,
}

impl DashboardView {
    #[must_use]
    pub fn from_result(result: &PulseResult) -> Self {
        let chart = vec![
            ChartSlice {
                stance: Stance::SideA,
                label: result.side_a.name.clone(),
                percentage: result.side_a.percentage,
                color: Stance::SideA.color(),
            },
            ChartSlice {
                stance: Stance::Neutral,
                label: NEUTRAL_LABEL.to_owned(),
                percentage: result.neutral.percentage,
                color: Stance::Neutral.color(),
            },
            ChartSlice {
                stance: Stance::SideB,
                label: result.side_b.name.clone(),
                percentage: result.side_b.percentage,
                color: Stance::SideB.color(),
            },
        ];

        Self {
            topic: result.topic.clone(),
            summary: result.summary.clone(),
            side_a: card(Stance::SideA, &result.side_a),
            chart,
            side_b: card(Stance::SideB, &result.side_b),
            neutral: NeutralPanel {
                percentage: result.neutral.percentage,
                summary: result.neutral.summary.clone(),
            },
            sources: result.sources.iter().map(chip).collect(),
            dominant: dominant(result),
        }
    }
}

fn card(stance: Stance, perspective: &Perspective) -> PerspectiveCard {
    PerspectiveCard {
        stance,
        name: perspective.name.clone(),
        percentage: perspective.percentage,
        emotion: perspective.emotion.clone(),
        arguments: perspective.arguments.clone(),
    }
}

fn chip(source: &Source) -> SourceChip {
    SourceChip {
        title: source
            .title
            .clone()
            .unwrap_or_else(|| UNKNOWN_SOURCE_TITLE.to_owned()),
        uri: source.uri.clone(),
    }
}

fn dominant(result: &PulseResult) -> Stance {
    let a = result.side_a.percentage;
    let b = result.side_b.percentage;
    let n = result.neutral.percentage;
    if a > b && a > n {
        Stance::SideA
    } else if b > a && b > n {
        Stance::SideB
    } else {
        Stance::Neutral
    }
}
