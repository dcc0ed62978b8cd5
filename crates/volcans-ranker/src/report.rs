//! Analogue tables and a priori summaries for people and files.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;
use volcans_common::Result;

use crate::percentile::AprioriPercentile;
use crate::scorer::AnalogueResult;

const TABLE_HEADER: [&str; 4] = ["smithsonian_id", "name", "country", "analogy_score"];

/// Global Volcanism Program page (General Info tab) for a volcano.
pub fn gvp_url(smithsonian_id: u32) -> String {
    format!("https://volcano.si.edu/volcano.cfm?vn={smithsonian_id}&vtab=GeneralInfo")
}

/// `{clean_name}_top{count}_analogues.csv`, where apostrophes, commas and
/// periods are dropped and whitespace runs become underscores.
pub fn analogue_csv_filename(volcano_name: &str, count: usize) -> String {
    let cleaned: String = volcano_name
        .chars()
        .filter(|c| !matches!(c, '\'' | ',' | '.'))
        .collect();
    let joined = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{joined}_top{count}_analogues.csv")
}

/// Tab-separated analogue table with a header row, scores to 3 decimals.
pub fn write_analogue_table<W: Write>(writer: W, result: &AnalogueResult) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);

    wtr.write_record(TABLE_HEADER)?;
    for row in &result.rows {
        wtr.write_record([
            row.smithsonian_id.to_string(),
            row.name.clone(),
            row.country.clone(),
            format!("{:.3}", row.analogy_score),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the table to `dir` under [`analogue_csv_filename`]; returns the path written.
pub fn write_analogue_csv(dir: &Path, result: &AnalogueResult) -> Result<PathBuf> {
    let path = dir.join(analogue_csv_filename(&result.target.name, result.count));
    let file = std::fs::File::create(&path)?;
    write_analogue_table(file, result)?;
    info!("Wrote analogue table to {:?}", path);
    Ok(path)
}

/// Human-readable "better analogues" summary for the a priori analogues.
pub fn write_better_analogues_summary<W: Write>(
    mut writer: W,
    target_name: &str,
    apriori: &[AprioriPercentile],
) -> Result<()> {
    writeln!(
        writer,
        "\n\nAccording to VOLCANS, the following percentages of volcanoes in the catalogue\n\
         are better analogues to {target_name} than the a priori analogues reported below:\n"
    )?;
    for p in apriori {
        writeln!(writer, "{}: {}%\n", p.volcano, p.better_analogues)?;
    }
    Ok(())
}
