//! CSV export of yearly projections

use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::yearly::OfferProjection;

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Offer")]
    offer: &'a str,
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "BaseSalary")]
    base_salary: f64,
    #[serde(rename = "Bonus")]
    bonus: f64,
    #[serde(rename = "EquityValue")]
    equity_value: f64,
    #[serde(rename = "Total")]
    total: f64,
}

/// Write one row per offer-year to any writer
pub fn write_projections_csv<W: Write>(writer: W, projections: &[OfferProjection]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for projection in projections {
        for year in &projection.years {
            csv_writer.serialize(CsvRow {
                offer: &projection.offer_name,
                year: year.year,
                base_salary: year.base_salary,
                bonus: year.bonus,
                equity_value: year.equity_value,
                total: year.total,
            })?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write projections to a CSV file
pub fn write_projections_csv_path<P: AsRef<Path>>(path: P, projections: &[OfferProjection]) -> Result<(), csv::Error> {
    let file = File::create(path)?;
    write_projections_csv(file, projections)
}
