//! Accounting display formatting

use std::fmt::Write as _;

use crate::models::{AccountingEntry, FieldErrors, FormField, ServiceType, TimeFields};

/// Format the three time fields after autofill
pub fn format_autofill_result(fields: &TimeFields) -> String {
    let mut output = String::new();
    let blank = "(blank)".to_string();

    let start = fields
        .started_at
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| blank.clone());
    let end = fields
        .ended_at
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| blank.clone());
    let amount = fields
        .amount
        .map(|a| a.normalize().to_string())
        .unwrap_or(blank);

    let _ = writeln!(output, "Start:  {}", start);
    let _ = writeln!(output, "End:    {}", end);
    let _ = writeln!(output, "Amount: {}", amount);
    output
}

/// Format a validated entry
///
/// Material amounts are shown with the currency unit, wage amounts in hours.
pub fn format_entry_details(
    entry: &AccountingEntry,
    service_type: Option<ServiceType>,
    currency_unit: &str,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Service:  {}", entry.service_id);
    let _ = writeln!(output, "Project:  {}", entry.project_id);
    let _ = writeln!(output, "Date:     {}", entry.provided_on.format("%Y-%m-%d"));

    if let (Some(start), Some(end)) = (entry.started_at, entry.ended_at) {
        let _ = writeln!(
            output,
            "Time:     {} - {}",
            start.format("%H:%M"),
            end.format("%H:%M")
        );
    }

    let amount = entry.amount.normalize();
    match service_type {
        Some(ServiceType::Material) => {
            let _ = writeln!(output, "Amount:   {} {}", amount, currency_unit);
        }
        Some(ServiceType::Wage) => {
            let _ = writeln!(output, "Amount:   {} h", amount);
        }
        None => {
            let _ = writeln!(output, "Amount:   {}", amount);
        }
    }

    if let Some(comment) = &entry.comment {
        let _ = writeln!(output, "Comment:  {}", comment);
    }

    output
}

/// Format field errors, one line per message, keyed by API field name
pub fn format_field_errors<F: FormField>(errors: &FieldErrors<F>) -> String {
    let mut output = String::new();

    for (field, message) in errors.iter() {
        let _ = writeln!(output, "  {}: {}", field.api_name(), message);
    }
    for message in errors.general() {
        let _ = writeln!(output, "  {}", message);
    }

    output
}
