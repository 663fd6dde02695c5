//! Plain-text rendering of the dashboard for terminals.

use std::fmt;

use pulse_core::present::{PerspectiveCard, Stance};
use pulse_core::DashboardView;

const BAR_WIDTH: usize = 40;

/// Display adapter that writes a [`DashboardView`] as terminal text.
pub struct Dashboard<'a>(pub &'a DashboardView);

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        writeln!(f, "{}", view.topic)?;
        writeln!(f, "{}", "=".repeat(view.topic.chars().count()))?;
        writeln!(f, "{}", view.summary)?;
        writeln!(f)?;

        write_card(f, &view.side_a, view.dominant)?;
        writeln!(f)?;
        writeln!(f, "[{}]", bar(view))?;
        for slice in &view.chart {
            writeln!(f, "  {} {:>3}%  {}", glyph(slice.stance), slice.percentage, slice.label)?;
        }
        writeln!(f, "  {}", view.neutral.summary)?;
        writeln!(f)?;
        write_card(f, &view.side_b, view.dominant)?;

        if !view.sources.is_empty() {
            writeln!(f)?;
            writeln!(f, "Sources")?;
            for (i, source) in view.sources.iter().enumerate() {
                writeln!(f, "  {}. {} <{}>", i + 1, source.title, source.uri)?;
            }
        }
        Ok(())
    }
}

fn write_card(f: &mut fmt::Formatter<'_>, card: &PerspectiveCard, dominant: Stance) -> fmt::Result {
    let marker = if card.stance == dominant { " *" } else { "" };
    writeln!(
        f,
        "{} {} {}% ({}){marker}",
        glyph(card.stance),
        card.name,
        card.percentage,
        card.emotion
    )?;
    for argument in &card.arguments {
        writeln!(f, "    - {argument}")?;
    }
    Ok(())
}

fn glyph(stance: Stance) -> char {
    match stance {
        Stance::SideA => '█',
        Stance::Neutral => '░',
        Stance::SideB => '▓',
    }
}

/// Proportion bar in chart order. Side segments are floored and neutral takes
/// the remainder, so the bar is always exactly `BAR_WIDTH` wide.
fn bar(view: &DashboardView) -> String {
    let width_of = |pct: u8| usize::from(pct) * BAR_WIDTH / 100;
    let a = width_of(view.side_a.percentage);
    let b = width_of(view.side_b.percentage);
    let neutral = BAR_WIDTH.saturating_sub(a + b);

    let mut out = String::with_capacity(BAR_WIDTH * 3);
    out.extend(std::iter::repeat(glyph(Stance::SideA)).take(a));
    out.extend(std::iter::repeat(glyph(Stance::Neutral)).take(neutral));
    out.extend(std::iter::repeat(glyph(Stance::SideB)).take(b));
    out
}

#[cfg(test)]
mod tests {
    use pulse_core::{NeutralBlock, Perspective, PulseResult, Source};

    use super::*;

    fn view(a: u8, b: u8, n: u8) -> DashboardView {
        DashboardView::from_result(&PulseResult {
            topic: "Remote Work".to_string(),
            summary: "Hybrid is winning.".to_string(),
            side_a: Perspective {
                name: "Pro-Remote".to_string(),
                percentage: a,
                emotion: "Hopeful".to_string(),
                arguments: vec!["No commute".to_string(), "Flexibility".to_string()],
            },
            side_b: Perspective {
                name: "Pro-Office".to_string(),
                percentage: b,
                emotion: "Skeptical".to_string(),
                arguments: vec!["Culture".to_string()],
            },
            neutral: NeutralBlock {
                percentage: n,
                summary: "Depends on the team.".to_string(),
            },
            sources: vec![Source {
                title: None,
                uri: "https://news.example/remote".to_string(),
            }],
            warnings: vec![],
        })
    }

    #[test]
    fn renders_both_cards_and_neutral_summary() {
        let text = Dashboard(&view(55, 35, 10)).to_string();
        assert!(text.starts_with("Remote Work\n"));
        assert!(text.contains("Pro-Remote 55% (Hopeful) *"));
        assert!(text.contains("Pro-Office 35% (Skeptical)\n"));
        assert!(text.contains("    - Flexibility"));
        assert!(text.contains("Neutral/Undecided"));
        assert!(text.contains("Depends on the team."));
    }

    #[test]
    fn lists_sources_with_fallback_title() {
        let text = Dashboard(&view(55, 35, 10)).to_string();
        assert!(text.contains("  1. Unknown Source <https://news.example/remote>"));
    }

    #[test]
    fn bar_is_fixed_width() {
        for (a, b, n) in [(55, 35, 10), (0, 0, 100), (100, 0, 0), (33, 33, 34)] {
            let rendered = bar(&view(a, b, n));
            assert_eq!(rendered.chars().count(), BAR_WIDTH, "split {a}/{b}/{n}");
        }
    }

    #[test]
    fn bar_segments_follow_chart_order() {
        let rendered = bar(&view(50, 25, 25));
        let expected: String = std::iter::repeat('█')
            .take(20)
            .chain(std::iter::repeat('░').take(10))
            .chain(std::iter::repeat('▓').take(10))
            .collect();
        assert_eq!(rendered, expected);
    }
}
