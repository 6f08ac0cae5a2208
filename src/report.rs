//! Terminal tables for the building stock, yearly consumption and the measure plan.

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::plan::measure::HexColor;
use crate::plan::types::{Inventory, KWH_PER_MILLION, Projection};

fn base_table(header: Vec<Cell>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .set_header(header);
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

const fn cell_color(c: HexColor) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Building classes with their yearly consumption before any measure.
#[must_use]
pub fn inventory_table(inventory: &Inventory) -> Table {
    let mut table = base_table(vec![
        header_cell("Class"),
        header_cell("Count"),
        header_cell("kWh/month"),
        header_cell("M kWh/year"),
    ]);
    for class in inventory.classes() {
        table.add_row(vec![
            Cell::new(class.name()),
            Cell::new(class.count()).set_alignment(CellAlignment::Right),
            Cell::new(class.monthly_kwh_per_unit()).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", class.yearly_kwh() / KWH_PER_MILLION))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Year and consumption in millions of kWh.
#[must_use]
pub fn consumption_table(projection: &Projection) -> Table {
    let mut table = base_table(vec![
        header_cell("Year"),
        header_cell("Consumption (M kWh)"),
    ]);
    for r in &projection.years {
        table.add_row(vec![
            Cell::new(r.year),
            Cell::new(format!("{:.2}", r.consumption_mkwh())).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// One row per applied measure, labelled `name (x.x%)` on the measure colour.
#[must_use]
pub fn plan_table(projection: &Projection) -> Table {
    let mut table = base_table(vec![
        header_cell("Year"),
        header_cell("Scale"),
        header_cell("Measure"),
    ]);
    for r in &projection.years {
        let scale = Cell::new(format!("{:.3}", r.scale)).set_alignment(CellAlignment::Right);
        if r.measures.is_empty() {
            table.add_row(vec![Cell::new(r.year), scale, Cell::new("(none)")]);
            continue;
        }
        for (i, m) in r.measures.iter().enumerate() {
            let (year, scale) = if i == 0 {
                (Cell::new(r.year), scale.clone())
            } else {
                (Cell::new(""), Cell::new(""))
            };
            table.add_row(vec![
                year,
                scale,
                Cell::new(m)
                    .fg(Color::White)
                    .bg(cell_color(m.color)),
            ]);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::climate::{ClimatePlan, ClimatePlanTable};
    use crate::plan::measure::MeasureCatalog;
    use crate::plan::types::{BuildingClass, Inventory};
    use crate::plan::{Simulator, simulate};

    fn inventory() -> Inventory {
        Inventory::new()
            .with(BuildingClass::new("Block", 1000, 250.0).unwrap())
            .unwrap()
    }

    #[test]
    fn inventory_table_lists_each_class() {
        let inventory = crate::config::ScenarioConfig::default_city()
            .inventory()
            .unwrap();
        let table = inventory_table(&inventory);
        assert_eq!(table.row_iter().count(), 3);
        let rendered = table.to_string();
        assert!(rendered.contains("private_houses"));
        assert!(rendered.contains("40000"));
        // 300 * 3000 * 12
        assert!(rendered.contains("10.80"), "{rendered}");
    }

    #[test]
    fn consumption_table_has_ten_years() {
        let projection = simulate(&inventory(), 100.0, "Moderate").unwrap();
        let table = consumption_table(&projection);
        assert_eq!(table.row_iter().count(), 10);
        let rendered = table.to_string();
        assert!(rendered.contains("Consumption (M kWh)"));
        // 1000 * 250 * 12 = 3 M kWh before year 1
        assert!(rendered.contains("1.50"), "{rendered}");
    }

    #[test]
    fn plan_table_labels_measures_with_percentages() {
        let projection = simulate(&inventory(), 100.0, "Sunny").unwrap();
        let rendered = plan_table(&projection).to_string();
        assert!(rendered.contains("LED (8.0%)"));
        assert!(rendered.contains("Solar (20.0%)"));
        assert!(rendered.contains("Smart_home (3.0%)"));
    }

    #[test]
    fn empty_bucket_renders_placeholder() {
        let plans = ClimatePlanTable::new(vec![ClimatePlan {
            name: "Idle".to_string(),
            year_1: vec![],
            years_2_4: vec![],
            years_5_10: vec![],
        }])
        .unwrap();
        let sim = Simulator::new(MeasureCatalog::builtin(), plans).unwrap();
        let projection = sim.simulate(&inventory(), 10.0, "Idle", 1.0).unwrap();
        let table = plan_table(&projection);
        assert_eq!(table.row_iter().count(), 10);
        assert!(table.to_string().contains("(none)"));
    }
}
