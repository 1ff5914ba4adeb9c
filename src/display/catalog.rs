//! Service catalog and settings display

use std::collections::BTreeSet;
use std::fmt::Write as _;

use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::{ServiceCatalog, ServiceId};

#[derive(Debug, Tabled)]
struct ServiceRow {
    #[tabled(rename = "Service")]
    id: String,
    #[tabled(rename = "Type")]
    service_type: String,
    #[tabled(rename = "Hourly")]
    hourly: String,
}

/// Format the cached catalog as a table, one row per known service
pub fn format_catalog(catalog: &ServiceCatalog) -> String {
    if catalog.is_empty() {
        return "Service catalog is empty. Use 'quokka catalog import' or 'quokka catalog set-hourly'.\n"
            .to_string();
    }

    let mut ids: BTreeSet<ServiceId> = catalog.hourly_based_ids().collect();
    ids.extend(catalog.type_entries().into_iter().map(|entry| entry.id));

    let rows: Vec<ServiceRow> = ids
        .into_iter()
        .map(|id| ServiceRow {
            id: id.to_string(),
            service_type: catalog
                .service_type(id)
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string()),
            hourly: if catalog.is_hourly_based(id) { "yes" } else { "no" }.to_string(),
        })
        .collect();

    format!("{}\n", Table::new(rows))
}

pub fn format_settings(settings: &Settings) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "Minimum amount:        {} h",
        settings.accounting_min_amount.normalize()
    );
    let _ = writeln!(output, "Currency unit:         {}", settings.currency_unit);
    match settings.utc_offset_minutes {
        Some(minutes) => {
            let _ = writeln!(output, "UTC offset:            {} min", minutes);
        }
        None => {
            let _ = writeln!(output, "UTC offset:            system");
        }
    }
    let _ = writeln!(
        output,
        "Accumulate errors:     {}",
        settings.accumulate_validation_errors
    );

    output
}
