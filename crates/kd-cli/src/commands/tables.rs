use comfy_table::{ContentArrangement, Table};

use kd_dice::DieDenomination;
use kd_karma::{Localizer, ResultTables, SymbolRegistry, Translations, label_for};

pub fn run(denomination: Option<&str>) -> Result<(), String> {
    let tables = ResultTables::standard();
    let selected: Vec<DieDenomination> = match denomination {
        Some(tag) => {
            let denom: DieDenomination = tag.parse().map_err(|e: kd_dice::DiceError| e.to_string())?;
            if tables.table(&denom).is_none() {
                return Err(format!("no result table for '{denom}'"));
            }
            vec![denom]
        }
        None => tables.denominations().cloned().collect(),
    };

    let localizer = Translations::english();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Die", "Face", "Label", "Image"]);

    for denom in &selected {
        let Some(faces) = tables.table(denom) else {
            continue;
        };
        for (face, symbol) in faces {
            let label = symbol
                .label
                .as_deref()
                .map(|key| localizer.localize(key))
                .transpose()
                .map_err(|e| e.to_string())?
                .unwrap_or_else(|| format!("Face {face}"));
            table.add_row(vec![
                label_for(denom),
                face.to_string(),
                label,
                symbol.image.clone().unwrap_or_else(|| "—".to_string()),
            ]);
        }
    }

    println!("{table}");
    Ok(())
}
