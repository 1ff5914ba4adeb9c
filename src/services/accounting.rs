//! Accounting reconciliation
//!
//! Keeps the start time, end time and amount of a service record in step.
//! When exactly one of the three is blank it is derived from the other two
//! (autofill), and before submission the whole record is checked against
//! the service's rules (validation).
//!
//! Everything here is pure: the form layer applies an edit with
//! [`apply_change`], calls [`autofill_missing_field`] when a clock time was
//! edited, and runs [`validate_record`] on submit.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::Settings;
use crate::models::quantity::{
    elapsed_minutes, hours_to_duration, is_multiple_of, max_hours_between, minutes_to_hours,
    truncate_to_unit, unit_minutes, MATERIAL_AMOUNT_STEP,
};
use crate::models::{
    AccountingChange, AccountingEntry, AccountingErrors, AccountingField, ServiceCatalog,
    ServiceRecord, ServiceType, TimeFields,
};

/// How many rule groups report their failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Stop at the first rule group that fails
    #[default]
    FirstFailingGroup,
    /// Run every rule group and report all failures
    Accumulate,
}

impl ValidationMode {
    pub fn from_settings(settings: &Settings) -> Self {
        if settings.accumulate_validation_errors {
            Self::Accumulate
        } else {
            Self::FirstFailingGroup
        }
    }
}

/// Derive whichever one of start, end and amount is blank
///
/// Autofill only happens when exactly one field is blank; otherwise the
/// fields are returned unchanged. A zero amount counts as blank. Times are
/// composed onto `reference_date` so the arithmetic never depends on the
/// record's own day; the result wraps around midnight like a clock face.
/// An amount that reaches past the representable calendar derives nothing.
pub fn autofill_missing_field(
    fields: TimeFields,
    reference_date: NaiveDate,
    min_amount_unit: Decimal,
) -> TimeFields {
    let blanks = TimeFields {
        amount: fields.amount.filter(|amount| !amount.is_zero()),
        ..fields
    };
    if blanks.missing_count() != 1 {
        return fields;
    }

    match (blanks.started_at, blanks.ended_at, blanks.amount) {
        (Some(start), Some(end), None) => {
            // Wrong order is reported by validation, not corrected here
            if start >= end {
                return fields;
            }
            let minutes = elapsed_minutes(start, end);
            let minutes = if Decimal::from(minutes) >= unit_minutes(min_amount_unit) {
                truncate_to_unit(minutes, min_amount_unit)
            } else {
                Decimal::from(minutes)
            };
            TimeFields {
                amount: Some(minutes_to_hours(minutes)),
                ..fields
            }
        }
        (Some(start), None, Some(hours)) => {
            let ended_at = hours_to_duration(hours)
                .and_then(|duration| reference_date.and_time(start).checked_add_signed(duration));
            match ended_at {
                Some(ended_at) => TimeFields {
                    ended_at: Some(ended_at.time()),
                    ..fields
                },
                None => fields,
            }
        }
        (None, Some(end), Some(hours)) => {
            let started_at = hours_to_duration(hours)
                .and_then(|duration| reference_date.and_time(end).checked_sub_signed(duration));
            match started_at {
                Some(started_at) => TimeFields {
                    started_at: Some(started_at.time()),
                    ..fields
                },
                None => fields,
            }
        }
        _ => fields,
    }
}

/// Apply one form edit to the record
///
/// Choosing a service that is not hourly-based clears both clock times.
pub fn apply_change(
    record: &ServiceRecord,
    change: AccountingChange,
    catalog: &ServiceCatalog,
) -> ServiceRecord {
    let mut next = record.clone();

    match change {
        AccountingChange::Service(service_id) => {
            next.service_id = Some(service_id);
            if !catalog.is_hourly_based(service_id) {
                next.started_at = None;
                next.ended_at = None;
            }
        }
        AccountingChange::Project(project_id) => next.project_id = project_id,
        AccountingChange::ProvidedOn(date) => next.provided_on = date,
        AccountingChange::StartedAt(time) => next.started_at = time,
        AccountingChange::EndedAt(time) => next.ended_at = time,
        AccountingChange::Amount(amount) => next.amount = amount,
        AccountingChange::Comment(comment) => {
            next.comment = comment.filter(|c| !c.trim().is_empty());
        }
    }

    next
}

/// Everything the rules need besides the record itself
struct RuleContext<'a> {
    catalog: &'a ServiceCatalog,
    min_amount_unit: Decimal,
}

impl RuleContext<'_> {
    fn is_hourly(&self, record: &ServiceRecord) -> Option<bool> {
        record
            .service_id
            .map(|id| self.catalog.is_hourly_based(id))
    }
}

type Rule = fn(&RuleContext<'_>, &ServiceRecord, &mut AccountingErrors);

/// Rule groups in the order they are checked
const RULES: [Rule; 6] = [
    required_fields,
    hour_field_exclusivity,
    hour_field_requirement,
    time_ordering,
    amount_granularity,
    amount_fits_duration,
];

fn required_fields(_ctx: &RuleContext<'_>, record: &ServiceRecord, errors: &mut AccountingErrors) {
    if record.service_id.is_none() {
        errors.add(AccountingField::ServiceId, "A service is required");
    }
    if record.project_id.is_none() {
        errors.add(AccountingField::ProjectId, "A project is required");
    }
    match record.amount {
        None => errors.add(AccountingField::Amount, "An amount is required"),
        Some(amount) if amount <= Decimal::ZERO => {
            errors.add(AccountingField::Amount, "The amount must be positive")
        }
        Some(_) => {}
    }
}

fn hour_field_exclusivity(
    ctx: &RuleContext<'_>,
    record: &ServiceRecord,
    errors: &mut AccountingErrors,
) {
    if ctx.is_hourly(record) != Some(false) {
        return;
    }
    if record.started_at.is_some() {
        errors.add(
            AccountingField::StartedAt,
            "A start time may only be given for hourly-based services",
        );
    }
    if record.ended_at.is_some() {
        errors.add(
            AccountingField::EndedAt,
            "An end time may only be given for hourly-based services",
        );
    }
}

fn hour_field_requirement(
    ctx: &RuleContext<'_>,
    record: &ServiceRecord,
    errors: &mut AccountingErrors,
) {
    if ctx.is_hourly(record) != Some(true) {
        return;
    }
    if record.started_at.is_none() {
        errors.add(
            AccountingField::StartedAt,
            "A start time is required for hourly-based services",
        );
    }
    if record.ended_at.is_none() {
        errors.add(
            AccountingField::EndedAt,
            "An end time is required for hourly-based services",
        );
    }
}

fn time_ordering(_ctx: &RuleContext<'_>, record: &ServiceRecord, errors: &mut AccountingErrors) {
    if let (Some(start), Some(end)) = (record.started_at, record.ended_at) {
        if start >= end {
            errors.add(AccountingField::StartedAt, "The start must be before the end");
            errors.add(AccountingField::EndedAt, "The end must be after the start");
        }
    }
}

fn amount_granularity(
    ctx: &RuleContext<'_>,
    record: &ServiceRecord,
    errors: &mut AccountingErrors,
) {
    let (Some(service_id), Some(amount)) = (record.service_id, record.amount) else {
        return;
    };

    match ctx.catalog.service_type(service_id) {
        Some(ServiceType::Material) if !is_multiple_of(amount, MATERIAL_AMOUNT_STEP) => {
            errors.add(
                AccountingField::Amount,
                format!("The amount must be a multiple of {}", MATERIAL_AMOUNT_STEP),
            );
        }
        Some(ServiceType::Wage) if !is_multiple_of(amount, ctx.min_amount_unit) => {
            errors.add(
                AccountingField::Amount,
                format!(
                    "The amount must be a multiple of {}",
                    ctx.min_amount_unit.normalize()
                ),
            );
        }
        _ => {}
    }
}

fn amount_fits_duration(
    ctx: &RuleContext<'_>,
    record: &ServiceRecord,
    errors: &mut AccountingErrors,
) {
    if ctx.is_hourly(record) != Some(true) {
        return;
    }
    let (Some(start), Some(end), Some(amount)) = (record.started_at, record.ended_at, record.amount)
    else {
        return;
    };
    // Reversed times already fail the ordering rule
    if start >= end {
        return;
    }
    if amount > max_hours_between(start, end, ctx.min_amount_unit) {
        errors.add(
            AccountingField::Amount,
            "The amount must not exceed the given time range in hours",
        );
    }
}

/// Check a record against every accounting rule
///
/// Failures are returned as field-keyed messages. With
/// [`ValidationMode::FirstFailingGroup`] only the first failing rule group
/// is reported.
pub fn validate_record(
    record: &ServiceRecord,
    catalog: &ServiceCatalog,
    min_amount_unit: Decimal,
    mode: ValidationMode,
) -> Result<AccountingEntry, AccountingErrors> {
    let ctx = RuleContext {
        catalog,
        min_amount_unit,
    };
    let mut errors = AccountingErrors::new();

    for rule in RULES {
        let mut group = AccountingErrors::new();
        rule(&ctx, record, &mut group);
        if group.is_empty() {
            continue;
        }
        errors.merge(group);
        if mode == ValidationMode::FirstFailingGroup {
            break;
        }
    }

    let (Some(service_id), Some(project_id), Some(amount)) =
        (record.service_id, record.project_id, record.amount)
    else {
        return Err(errors);
    };

    errors.into_result(AccountingEntry {
        service_id,
        project_id,
        provided_on: record.provided_on,
        started_at: record.started_at,
        ended_at: record.ended_at,
        amount,
        comment: record.comment.clone(),
    })
}

/// Service bundling the catalog and settings the reconciliation depends on
pub struct AccountingService<'a> {
    catalog: &'a ServiceCatalog,
    settings: &'a Settings,
}

impl<'a> AccountingService<'a> {
    /// Create a new accounting service
    pub fn new(catalog: &'a ServiceCatalog, settings: &'a Settings) -> Self {
        Self { catalog, settings }
    }

    pub fn min_amount_unit(&self) -> Decimal {
        self.settings.accounting_min_amount
    }

    /// Fill the blank one of start, end and amount
    pub fn autofill(&self, fields: TimeFields, reference_date: NaiveDate) -> TimeFields {
        autofill_missing_field(fields, reference_date, self.min_amount_unit())
    }

    /// Recompute the record's time fields
    pub fn recompute(&self, record: ServiceRecord, reference_date: NaiveDate) -> ServiceRecord {
        let fields = self.autofill(record.time_fields(), reference_date);
        record.with_time_fields(fields)
    }

    /// Apply an edit and recompute when a clock time changed
    pub fn edit(
        &self,
        record: &ServiceRecord,
        change: AccountingChange,
        reference_date: NaiveDate,
    ) -> ServiceRecord {
        let recompute = change.triggers_autofill();
        let next = apply_change(record, change, self.catalog);
        if recompute {
            self.recompute(next, reference_date)
        } else {
            next
        }
    }

    pub fn validate(&self, record: &ServiceRecord) -> Result<AccountingEntry, AccountingErrors> {
        validate_record(
            record,
            self.catalog,
            self.min_amount_unit(),
            ValidationMode::from_settings(self.settings),
        )
    }

    /// Autofill, then validate: what the form does on submit
    pub fn prepare(
        &self,
        record: ServiceRecord,
        reference_date: NaiveDate,
    ) -> Result<AccountingEntry, AccountingErrors> {
        let record = self.recompute(record, reference_date);
        self.validate(&record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectId, ServiceId, ServiceTypeEntry};
    use chrono::NaiveTime;

    const HOURLY_WAGE: ServiceId = ServiceId::new(1);
    const MATERIAL: ServiceId = ServiceId::new(2);
    const FIXED_WAGE: ServiceId = ServiceId::new(3);

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 10).unwrap()
    }

    fn catalog() -> ServiceCatalog {
        ServiceCatalog::from_parts(
            [HOURLY_WAGE],
            [
                ServiceTypeEntry {
                    id: HOURLY_WAGE,
                    service_type: ServiceType::Wage,
                },
                ServiceTypeEntry {
                    id: MATERIAL,
                    service_type: ServiceType::Material,
                },
                ServiceTypeEntry {
                    id: FIXED_WAGE,
                    service_type: ServiceType::Wage,
                },
            ],
        )
    }

    fn record(service: ServiceId, start: Option<NaiveTime>, end: Option<NaiveTime>, amount: &str) -> ServiceRecord {
        ServiceRecord {
            service_id: Some(service),
            project_id: Some(ProjectId::new(10)),
            provided_on: day(),
            started_at: start,
            ended_at: end,
            amount: Some(d(amount)),
            comment: None,
        }
    }

    fn validate(record: &ServiceRecord) -> Result<AccountingEntry, AccountingErrors> {
        validate_record(record, &catalog(), d("0.25"), ValidationMode::FirstFailingGroup)
    }

    #[test]
    fn test_autofill_amount_truncates_to_unit() {
        let fields = TimeFields::new(Some(t(8, 0)), Some(t(10, 40)), None);
        let filled = autofill_missing_field(fields, day(), d("0.25"));
        assert_eq!(filled.amount, Some(d("2.5")));
        assert_eq!(filled.started_at, Some(t(8, 0)));
        assert_eq!(filled.ended_at, Some(t(10, 40)));
    }

    #[test]
    fn test_autofill_amount_below_one_unit_keeps_elapsed_time() {
        let fields = TimeFields::new(Some(t(8, 0)), Some(t(8, 10)), None);
        let filled = autofill_missing_field(fields, day(), d("0.25"));
        assert_eq!(minutes_to_hours(Decimal::from(10)), filled.amount.unwrap());
    }

    #[test]
    fn test_autofill_treats_zero_amount_as_blank() {
        let fields = TimeFields::new(Some(t(9, 0)), Some(t(10, 0)), Some(Decimal::ZERO));
        let filled = autofill_missing_field(fields, day(), d("0.25"));
        assert_eq!(filled.amount, Some(d("1")));
    }

    #[test]
    fn test_autofill_skips_reversed_times() {
        let fields = TimeFields::new(Some(t(10, 0)), Some(t(8, 0)), None);
        assert_eq!(autofill_missing_field(fields, day(), d("0.25")), fields);

        let same = TimeFields::new(Some(t(10, 0)), Some(t(10, 0)), None);
        assert_eq!(autofill_missing_field(same, day(), d("0.25")), same);
    }

    #[test]
    fn test_autofill_end_from_start_and_amount() {
        let fields = TimeFields::new(Some(t(8, 15)), None, Some(d("1.75")));
        let filled = autofill_missing_field(fields, day(), d("0.25"));
        assert_eq!(filled.ended_at, Some(t(10, 0)));
    }

    #[test]
    fn test_autofill_start_from_end_and_amount() {
        let fields = TimeFields::new(None, Some(t(17, 0)), Some(d("8.5")));
        let filled = autofill_missing_field(fields, day(), d("0.25"));
        assert_eq!(filled.started_at, Some(t(8, 30)));
    }

    #[test]
    fn test_autofill_end_wraps_past_midnight() {
        let fields = TimeFields::new(Some(t(22, 0)), None, Some(d("3")));
        let filled = autofill_missing_field(fields, day(), d("0.25"));
        assert_eq!(filled.ended_at, Some(t(1, 0)));
    }

    #[test]
    fn test_autofill_ignores_amount_past_calendar_range() {
        let forward = TimeFields::new(Some(t(8, 0)), None, Some(d("3000000000")));
        assert_eq!(autofill_missing_field(forward, day(), d("0.25")), forward);

        let backward = TimeFields::new(None, Some(t(8, 0)), Some(d("3000000000")));
        assert_eq!(autofill_missing_field(backward, day(), d("0.25")), backward);

        let huge = TimeFields::new(Some(t(8, 0)), None, Some(Decimal::MAX));
        assert_eq!(autofill_missing_field(huge, day(), d("0.25")), huge);
    }

    #[test]
    fn test_autofill_needs_exactly_one_blank() {
        let none = TimeFields::new(None, None, Some(d("2")));
        assert_eq!(autofill_missing_field(none, day(), d("0.25")), none);

        let all = TimeFields::new(Some(t(8, 0)), Some(t(9, 0)), Some(d("5")));
        assert_eq!(autofill_missing_field(all, day(), d("0.25")), all);

        let empty = TimeFields::default();
        assert_eq!(autofill_missing_field(empty, day(), d("0.25")), empty);

        let zero_and_blank = TimeFields::new(Some(t(8, 0)), None, Some(Decimal::ZERO));
        assert_eq!(
            autofill_missing_field(zero_and_blank, day(), d("0.25")),
            zero_and_blank
        );
    }

    #[test]
    fn test_autofill_is_idempotent() {
        let inputs = [
            TimeFields::new(Some(t(8, 0)), Some(t(10, 40)), None),
            TimeFields::new(Some(t(7, 45)), None, Some(d("2.25"))),
            TimeFields::new(None, Some(t(12, 0)), Some(d("0.5"))),
            TimeFields::new(Some(t(12, 0)), Some(t(11, 0)), None),
        ];
        for input in inputs {
            let once = autofill_missing_field(input, day(), d("0.25"));
            let twice = autofill_missing_field(once, day(), d("0.25"));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_valid_hourly_record() {
        let entry = validate(&record(HOURLY_WAGE, Some(t(8, 0)), Some(t(10, 40)), "2.5")).unwrap();
        assert_eq!(entry.amount, d("2.5"));
        assert_eq!(entry.project_id, ProjectId::new(10));
    }

    #[test]
    fn test_required_fields() {
        let mut blank = ServiceRecord::new(day());
        blank.amount = Some(d("-1"));

        let errors = validate(&blank).unwrap_err();
        assert!(errors.has(AccountingField::ServiceId));
        assert!(errors.has(AccountingField::ProjectId));
        assert_eq!(errors.messages(AccountingField::Amount), ["The amount must be positive"]);
    }

    #[test]
    fn test_exclusivity_rejects_times_for_non_hourly_service() {
        let errors = validate(&record(FIXED_WAGE, Some(t(8, 0)), None, "1")).unwrap_err();
        assert!(errors.has(AccountingField::StartedAt));
        assert!(!errors.has(AccountingField::EndedAt));

        let errors = validate(&record(MATERIAL, Some(t(8, 0)), Some(t(9, 0)), "1")).unwrap_err();
        assert!(errors.has(AccountingField::StartedAt));
        assert!(errors.has(AccountingField::EndedAt));
    }

    #[test]
    fn test_requirement_flags_each_missing_time_on_its_own_field() {
        let errors = validate(&record(HOURLY_WAGE, None, Some(t(9, 0)), "1")).unwrap_err();
        assert!(errors.has(AccountingField::StartedAt));
        assert!(!errors.has(AccountingField::EndedAt));

        let errors = validate(&record(HOURLY_WAGE, Some(t(9, 0)), None, "1")).unwrap_err();
        assert!(!errors.has(AccountingField::StartedAt));
        assert!(errors.has(AccountingField::EndedAt));
    }

    #[test]
    fn test_ordering_flags_both_fields() {
        let errors = validate(&record(HOURLY_WAGE, Some(t(9, 0)), Some(t(9, 0)), "1")).unwrap_err();
        assert!(errors.has(AccountingField::StartedAt));
        assert!(errors.has(AccountingField::EndedAt));
        assert!(!errors.has(AccountingField::Amount));
    }

    #[test]
    fn test_wage_granularity() {
        let errors = validate(&record(FIXED_WAGE, None, None, "2.6")).unwrap_err();
        assert_eq!(
            errors.messages(AccountingField::Amount),
            ["The amount must be a multiple of 0.25"]
        );
        assert!(validate(&record(FIXED_WAGE, None, None, "2.75")).is_ok());
    }

    #[test]
    fn test_material_granularity() {
        assert!(validate(&record(MATERIAL, None, None, "3.14")).is_ok());
        let errors = validate(&record(MATERIAL, None, None, "3.141")).unwrap_err();
        assert!(errors.has(AccountingField::Amount));
    }

    #[test]
    fn test_unknown_service_type_skips_granularity() {
        assert!(validate(&record(ServiceId::new(99), None, None, "1.234")).is_ok());
    }

    #[test]
    fn test_amount_must_fit_duration() {
        // 160 minutes fit 2.5 hours in quarter-hour units, not 2.75
        let errors = validate(&record(HOURLY_WAGE, Some(t(8, 0)), Some(t(10, 40)), "2.75")).unwrap_err();
        assert_eq!(
            errors.messages(AccountingField::Amount),
            ["The amount must not exceed the given time range in hours"]
        );
        assert!(validate(&record(HOURLY_WAGE, Some(t(8, 0)), Some(t(10, 40)), "1")).is_ok());
    }

    #[test]
    fn test_first_failing_group_short_circuits() {
        // Reversed times and a bad granularity: only the ordering group reports
        let bad = record(HOURLY_WAGE, Some(t(10, 0)), Some(t(9, 0)), "2.6");
        let errors = validate(&bad).unwrap_err();
        assert!(errors.has(AccountingField::StartedAt));
        assert!(!errors.has(AccountingField::Amount));

        let errors = validate_record(&bad, &catalog(), d("0.25"), ValidationMode::Accumulate).unwrap_err();
        assert!(errors.has(AccountingField::StartedAt));
        assert!(errors.has(AccountingField::EndedAt));
        assert_eq!(errors.messages(AccountingField::Amount).len(), 1);
    }

    #[test]
    fn test_selecting_non_hourly_service_clears_times() {
        let catalog = catalog();
        let start = record(HOURLY_WAGE, Some(t(8, 0)), Some(t(9, 0)), "1");

        let next = apply_change(&start, AccountingChange::Service(MATERIAL), &catalog);
        assert_eq!(next.service_id, Some(MATERIAL));
        assert!(next.started_at.is_none());
        assert!(next.ended_at.is_none());

        let kept = apply_change(&start, AccountingChange::Service(HOURLY_WAGE), &catalog);
        assert!(kept.has_times());
    }

    #[test]
    fn test_edit_recomputes_only_on_time_changes() {
        let catalog = catalog();
        let settings = Settings::default();
        let service = AccountingService::new(&catalog, &settings);

        let mut form = ServiceRecord::new(day());
        form = service.edit(&form, AccountingChange::Service(HOURLY_WAGE), day());
        form = service.edit(&form, AccountingChange::StartedAt(Some(t(8, 0))), day());
        assert!(form.amount.is_none());

        form = service.edit(&form, AccountingChange::EndedAt(Some(t(10, 40))), day());
        assert_eq!(form.amount, Some(d("2.5")));

        // Clearing the end derives it again from start and amount
        form = service.edit(&form, AccountingChange::EndedAt(None), day());
        assert_eq!(form.ended_at, Some(t(10, 30)));

        // Typing an amount does not recompute by itself
        form = service.edit(&form, AccountingChange::StartedAt(None), day());
        assert_eq!(form.started_at, Some(t(8, 0)));
        form.started_at = None;
        form = service.edit(&form, AccountingChange::Amount(Some(d("1"))), day());
        assert!(form.started_at.is_none());

        let recomputed = service.recompute(form, day());
        assert_eq!(recomputed.started_at, Some(t(9, 30)));
    }

    #[test]
    fn test_prepare_autofills_then_validates() {
        let catalog = catalog();
        let settings = Settings::default();
        let service = AccountingService::new(&catalog, &settings);

        let mut form = record(HOURLY_WAGE, Some(t(8, 0)), Some(t(10, 40)), "1");
        form.amount = None;

        let entry = service.prepare(form, day()).unwrap();
        assert_eq!(entry.amount, d("2.5"));
    }

    #[test]
    fn test_service_honours_accumulate_setting() {
        let catalog = catalog();
        let settings = Settings {
            accumulate_validation_errors: true,
            ..Settings::default()
        };
        let service = AccountingService::new(&catalog, &settings);

        let errors = service
            .validate(&record(HOURLY_WAGE, Some(t(10, 0)), Some(t(9, 0)), "2.6"))
            .unwrap_err();
        assert!(errors.has(AccountingField::Amount));
    }
}
