use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quokka(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("quokka").unwrap();
    cmd.env("QUOKKA_DATA_DIR", data_dir.path());
    cmd
}

/// Hourly wage service 1, fixed wage service 2, material service 3
fn seed_catalog(data_dir: &TempDir) {
    let export = data_dir.path().join("export.json");
    std::fs::write(
        &export,
        r#"{
            "hourly_based_ids": [1],
            "types": [
                {"id": 1, "type": "wage"},
                {"id": 2, "type": "wage"},
                {"id": 3, "type": "material"}
            ]
        }"#,
    )
    .unwrap();

    quokka(data_dir)
        .args(["catalog", "import"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 hourly-based service(s) and 3 service type(s)"));
}

#[test]
fn init_creates_settings_and_catalog() {
    let dir = TempDir::new().unwrap();

    quokka(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("services.json").exists());

    quokka(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
}

#[test]
fn autofill_truncates_amount_to_quarter_hours() {
    let dir = TempDir::new().unwrap();

    quokka(&dir)
        .args(["accounting", "autofill", "--start", "08:00", "--end", "10:40"])
        .args(["--date", "2025-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amount: 2.5"));
}

#[test]
fn autofill_derives_end_time() {
    let dir = TempDir::new().unwrap();

    quokka(&dir)
        .args(["accounting", "autofill", "--start", "08:00", "--amount", "2,5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("End:    10:30"));
}

#[test]
fn autofill_leaves_end_blank_for_out_of_range_amount() {
    let dir = TempDir::new().unwrap();

    quokka(&dir)
        .args(["accounting", "autofill", "--start", "08:00", "--amount", "3000000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("End:    (blank)"));
}

#[test]
fn validate_rejects_amount_off_the_time_unit() {
    let dir = TempDir::new().unwrap();
    seed_catalog(&dir);

    quokka(&dir)
        .args(["accounting", "validate", "--service", "1", "--project", "9"])
        .args(["--on", "2025-01-15", "--start", "08:00", "--end", "10:40", "--amount", "2.6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "amount: The amount must be a multiple of 0.25",
        ));
}

#[test]
fn validate_rejects_times_on_fixed_service() {
    let dir = TempDir::new().unwrap();
    seed_catalog(&dir);

    quokka(&dir)
        .args(["accounting", "validate", "--service", "svc-2", "--project", "9"])
        .args(["--start", "08:00", "--end", "09:00", "--amount", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A start time may only be given for hourly-based services",
        ));
}

#[test]
fn validate_accepts_material_amount() {
    let dir = TempDir::new().unwrap();
    seed_catalog(&dir);

    quokka(&dir)
        .args(["accounting", "validate", "--service", "3", "--project", "9"])
        .args(["--on", "2025-01-15", "--amount", "3.75"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid: 2025-01-15 svc-3 x3.75"))
        .stdout(predicate::str::contains("Amount:   3.75 €"));
}

#[test]
fn prepare_prints_payload_and_writes_audit_entry() {
    let dir = TempDir::new().unwrap();
    seed_catalog(&dir);

    quokka(&dir)
        .args(["accounting", "prepare", "--service", "1", "--project", "9"])
        .args(["--on", "2025-01-15", "--start", "08:00", "--end", "10:40"])
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"amount\": 2.5"))
        .stdout(predicate::str::contains("\"service_provided_on\": \"2025-01-15\""))
        .stdout(predicate::str::contains("\"service_provided_ended_at\": \"10:40\""));

    quokka(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE AccountingEntry svc-1"));
}

#[test]
fn split_gives_odd_kilometre_to_first_leg() {
    let dir = TempDir::new().unwrap();

    quokka(&dir)
        .args(["logbook", "split", "--vehicle", "4", "--on", "2025-04-01"])
        .args(["--start-km", "100", "--end-km", "107"])
        .args(["--origin", "Depot", "--destination", "Site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("104"))
        .stdout(predicate::str::contains("Depot"))
        .stdout(predicate::str::contains("Site"));
}

#[test]
fn logbook_prepare_return_trip_emits_two_payloads() {
    let dir = TempDir::new().unwrap();

    quokka(&dir)
        .args(["logbook", "prepare", "--vehicle", "4", "--on", "2025-04-01"])
        .args(["--start-km", "100", "--end-km", "107", "--litres", "30"])
        .args(["--origin", "Depot", "--destination", "Site"])
        .args(["--return-trip", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"driven_kilometres\": 4"))
        .stdout(predicate::str::contains("\"driven_kilometres\": 3"))
        .stdout(predicate::str::contains("\"litres_refuelled\": 30"))
        .stdout(predicate::str::contains("\"litres_refuelled\": null"));

    let audit = std::fs::read_to_string(dir.path().join("audit.log")).unwrap();
    assert_eq!(audit.lines().count(), 2);
}

#[test]
fn logbook_prepare_rejects_reversed_odometer() {
    let dir = TempDir::new().unwrap();

    quokka(&dir)
        .args(["logbook", "prepare", "--vehicle", "4"])
        .args(["--start-km", "107", "--end-km", "100"])
        .args(["--origin", "Depot", "--destination", "Site"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "start_kilometres: Start kilometres must be less than end kilometres",
        ));

    assert!(!dir.path().join("audit.log").exists());
}

#[test]
fn logbook_handles_odometer_at_integer_limit() {
    let dir = TempDir::new().unwrap();

    quokka(&dir)
        .args(["logbook", "split", "--vehicle", "1"])
        .args(["--start-km=-9223372036854775808", "--end-km", "5"])
        .args(["--origin", "A", "--destination", "B"])
        .assert()
        .success();

    quokka(&dir)
        .args(["logbook", "prepare", "--vehicle", "1"])
        .args(["--start-km=-9223372036854775808", "--end-km", "5"])
        .args(["--origin", "A", "--destination", "B"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "driven_kilometres: Driven kilometres must equal end kilometres minus start kilometres",
        ));

    assert!(!dir.path().join("audit.log").exists());
}

#[test]
fn config_change_is_audited() {
    let dir = TempDir::new().unwrap();

    quokka(&dir)
        .args(["config", "set-min-amount", "0.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Minimum amount:        0.5 h"));

    quokka(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("UPDATE Settings settings"))
        .stdout(predicate::str::contains("accounting_min_amount"));

    quokka(&dir)
        .args(["accounting", "autofill", "--start", "08:00", "--end", "10:40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amount: 2.5"));
}

#[test]
fn server_errors_are_mapped_to_fields() {
    let dir = TempDir::new().unwrap();
    let body = dir.path().join("response.json");
    std::fs::write(
        &body,
        r#"{"message": "The given data was invalid.", "errors": {"end_kilometres": ["Too low"]}}"#,
    )
    .unwrap();

    quokka(&dir)
        .args(["logbook", "server-errors"])
        .arg(&body)
        .assert()
        .success()
        .stdout(predicate::str::contains("end_kilometres: Too low"));
}
