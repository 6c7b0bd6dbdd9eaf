use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};
use strum::IntoEnumIterator;

use crate::compare::{SelectionReport, SideBySide, TeamDistribution, TeamShare};
use crate::distribution::Distribution;
use crate::zone::Zone;

fn label_col(min_width: usize) -> Col {
    Col::new(Styles::default().with(MinWidth(min_width)).with(HAlign::Left))
}

fn value_col(min_width: usize) -> Col {
    Col::new(Styles::default().with(MinWidth(min_width)).with(HAlign::Right))
}

fn separated_value_col(min_width: usize) -> Col {
    Col::new(
        Styles::default()
            .with(Separator(true))
            .with(MinWidth(min_width))
            .with(HAlign::Right),
    )
}

fn region_label(zone: Zone) -> String {
    zone.region()
        .map(|region| region.to_string())
        .unwrap_or_default()
}

/// One row per zone: region, count and share of the total.
pub fn tabulate_distribution(distribution: &Distribution) -> Table {
    let mut table = Table::default()
        .with_cols(vec![label_col(16), label_col(24), value_col(6), value_col(8)])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Zone".into(), "Region".into(), "Count".into(), "Share".into()],
        ));
    for (zone, percentage) in distribution.iter() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                zone.to_string().into(),
                region_label(zone).into(),
                format!("{}", distribution.count(zone)).into(),
                format!("{percentage:.1}%").into(),
            ],
        ));
    }
    table.push_row(Row::new(
        Styles::default().with(Header(true)),
        vec![
            "Total".into(),
            "".into(),
            format!("{}", distribution.total()).into(),
            "".into(),
        ],
    ));
    table
}

/// Both selections next to each other, with goal and assist distributions per zone.
pub fn tabulate_side_by_side(side_by_side: &SideBySide) -> Table {
    let SideBySide { first, second } = side_by_side;
    let mut table = Table::default()
        .with_cols(vec![
            label_col(16),
            value_col(10),
            value_col(10),
            separated_value_col(10),
            value_col(10),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "".into(),
                first.selection.to_string().into(),
                "".into(),
                second.selection.to_string().into(),
                "".into(),
            ],
        ))
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Zone".into(),
                "Goals".into(),
                "Assists".into(),
                "Goals".into(),
                "Assists".into(),
            ],
        ));
    for zone in Zone::iter() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                zone.to_string().into(),
                format!("{:.1}%", first.goal_distribution[zone]).into(),
                format!("{:.1}%", first.assist_distribution[zone]).into(),
                format!("{:.1}%", second.goal_distribution[zone]).into(),
                format!("{:.1}%", second.assist_distribution[zone]).into(),
            ],
        ));
    }
    table.push_row(Row::new(
        Styles::default().with(Header(true)),
        vec![
            "Total".into(),
            format!("{}", first.goals).into(),
            format!("{}", first.assists).into(),
            format!("{}", second.goals).into(),
            format!("{}", second.assists).into(),
        ],
    ));
    table
}

/// Headline figures for one side of a comparison, as plain lines.
pub fn summarise(report: &SelectionReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{}: {} goals, {} assists",
        report.selection, report.goals, report.assists
    )];
    if !report.annotation.is_empty() {
        lines.push(format!("  {}", report.annotation));
    }
    lines.push(format!(
        "  golden zone (goals): {}/{} ({:.1}%)",
        report.golden_zone.hits, report.golden_zone.total, report.golden_zone.percentage
    ));
    lines.push(format!(
        "  zone 14 (assists): {}/{} ({:.1}%)",
        report.zone_14.hits, report.zone_14.total, report.zone_14.percentage
    ));
    lines
}

pub fn tabulate_zone_comparison(shares: &[TeamShare]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![label_col(10), value_col(6), value_col(6), value_col(8)])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Team".into(), "Hits".into(), "Total".into(), "Share".into()],
        ));
    for TeamShare { team, share } in shares {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                team.clone().into(),
                format!("{}", share.hits).into(),
                format!("{}", share.total).into(),
                format!("{:.1}%", share.percentage).into(),
            ],
        ));
    }
    table
}

/// Teams down, zones across, percentages in the cells.
pub fn tabulate_overview(overview: &[TeamDistribution]) -> Table {
    let mut cols = vec![label_col(10)];
    cols.extend(Zone::iter().map(|_| value_col(7)));
    cols.push(separated_value_col(6));

    let mut header_cells = vec!["Team".into()];
    header_cells.extend(Zone::iter().map(|zone| zone.to_string().into()));
    header_cells.push("Total".into());

    let mut table = Table::default()
        .with_cols(cols)
        .with_row(Row::new(Styles::default().with(Header(true)), header_cells));
    for TeamDistribution { team, distribution } in overview {
        let mut row_cells = vec![team.clone().into()];
        row_cells.extend(
            distribution
                .iter()
                .map(|(_, percentage)| format!("{percentage:.1}%").into()),
        );
        row_cells.push(format!("{}", distribution.total()).into());
        table.push_row(Row::new(Styles::default(), row_cells));
    }
    table
}

#[cfg(test)]
mod tests {
    use stanza::renderer::console::Console;
    use stanza::renderer::Renderer;

    use super::*;
    use crate::compare::{overview, side_by_side, zone_comparison, Selection};
    use crate::dataset::{Category, EventSet, Kind, MemoryRepository, TeamSelection};
    use crate::distribution::aggregate;
    use crate::testing::coords;

    fn repository() -> MemoryRepository {
        MemoryRepository::default().with(EventSet {
            team: "U15".into(),
            category: Category::Own,
            goals: coords(&[(34, 89), (20, 80)]),
            assists: coords(&[(30, 80)]),
            annotation: "1 Eigentor".into(),
        })
    }

    #[test]
    fn distribution_table() {
        let distribution = aggregate(&coords(&[(34, 89), (20, 80), (34, 10), (34, 11)]));
        let rendered = Console::default().render(&tabulate_distribution(&distribution)).to_string();
        assert!(rendered.contains("golden zone"));
        assert!(rendered.contains("25≤x≤43, 84≤y≤100"));
        assert!(rendered.contains("50.0%"));
        assert!(rendered.contains("Total"));
    }

    #[test]
    fn side_by_side_table_and_summary() {
        let first = Selection::new(TeamSelection::Team("U15".into()), Category::Own);
        let report = side_by_side(&repository(), first, None).unwrap();
        let rendered = Console::default().render(&tabulate_side_by_side(&report)).to_string();
        assert!(rendered.contains("U15 own goals"));
        assert!(rendered.contains("U15 conceded goals"));
        assert!(rendered.contains("100.0%"));

        let summary = summarise(&report.first);
        assert_eq!("U15 own goals: 2 goals, 1 assists", summary[0]);
        assert_eq!("  1 Eigentor", summary[1]);
        assert_eq!("  golden zone (goals): 1/2 (50.0%)", summary[2]);
        assert_eq!("  zone 14 (assists): 1/1 (100.0%)", summary[3]);
        assert_eq!(3, summarise(&report.second).len());
    }

    #[test]
    fn comparison_and_overview_tables() {
        let repository = repository();
        let shares = zone_comparison(&repository, Zone::FdLeft, Category::Own, Kind::Goal);
        let rendered = Console::default().render(&tabulate_zone_comparison(&shares)).to_string();
        assert!(rendered.contains("U15"));
        assert!(rendered.contains("50.0%"));

        let overview = overview(&repository, Category::Own, Kind::Assist);
        let rendered = Console::default().render(&tabulate_overview(&overview)).to_string();
        assert!(rendered.contains("remaining pitch"));
        assert!(rendered.contains("100.0%"));
    }
}
