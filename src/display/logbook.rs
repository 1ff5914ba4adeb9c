//! Logbook display formatting

use tabled::{Table, Tabled};

use crate::models::TripLeg;

/// Trip leg row for table display
#[derive(Debug, Tabled)]
struct LegRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "From")]
    origin: String,
    #[tabled(rename = "To")]
    destination: String,
    #[tabled(rename = "Start km")]
    start_kilometres: i64,
    #[tabled(rename = "End km")]
    end_kilometres: i64,
    #[tabled(rename = "Driven km")]
    driven_kilometres: i64,
    #[tabled(rename = "Litres")]
    litres: String,
}

impl From<&TripLeg> for LegRow {
    fn from(leg: &TripLeg) -> Self {
        Self {
            date: leg.driven_on.format("%Y-%m-%d").to_string(),
            origin: leg.origin.clone(),
            destination: leg.destination.clone(),
            start_kilometres: leg.start_kilometres,
            end_kilometres: leg.end_kilometres,
            driven_kilometres: leg.driven_kilometres,
            litres: leg
                .litres_refuelled
                .map(|l| l.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Format trip legs as a table
pub fn format_leg_table(legs: &[TripLeg]) -> String {
    if legs.is_empty() {
        return "No trips.\n".to_string();
    }

    let rows: Vec<LegRow> = legs.iter().map(LegRow::from).collect();
    format!("{}\n", Table::new(rows))
}
