use attendance_totals::aggregate::aggregate;
use attendance_totals::model::{AttendanceMapping, RegisterRow, RegisterTable};
use attendance_totals::pipeline::totals_for;
use attendance_totals::totals::{NAME_COLUMN, OutputTable, build_totals};
use attendance_totals::validate::{ValidationKind, validate, validate_batch};
use attendance_totals::AttendanceError;

fn periods(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| label.to_string()).collect()
}

fn youth() -> RegisterTable {
    RegisterTable::new("Youth", periods(&["3/09", "10/09"]))
        .with_row("Alex Smith", &["Y", ""])
        .with_row("Bea Jones", &["", "Y"])
}

fn kids() -> RegisterTable {
    RegisterTable::new("Kids", periods(&["3/09"])).with_row("Alex Smith", &["Y"])
}

fn aggregate_tables(tables: &[RegisterTable]) -> (AttendanceMapping, Vec<String>) {
    let valid = validate_batch(tables).expect("registers are valid");
    let (mapping, order) = aggregate(AttendanceMapping::new(), valid);
    (mapping, order.as_slice().to_vec())
}

#[test]
fn single_register_counts_each_mark() {
    let (mapping, order) = aggregate_tables(&[youth()]);

    assert_eq!(order, vec!["Youth".to_string()]);
    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping.count("Alex Smith", "Youth"), Some(1));
    assert_eq!(mapping.count("Bea Jones", "Youth"), Some(1));
}

#[test]
fn two_registers_merge_by_person() {
    let (mapping, order) = aggregate_tables(&[youth(), kids()]);

    assert_eq!(order, vec!["Youth".to_string(), "Kids".to_string()]);
    assert_eq!(mapping.count("Alex Smith", "Youth"), Some(1));
    assert_eq!(mapping.count("Alex Smith", "Kids"), Some(1));
    assert_eq!(mapping.count("Bea Jones", "Youth"), Some(1));
    assert_eq!(mapping.count("Bea Jones", "Kids"), None);
    assert_eq!(mapping.groups_of("Bea Jones").map(|groups| groups.len()), Some(1));

    let table = totals_for(&[youth(), kids()]).expect("totals built");
    assert_eq!(table.columns, vec![NAME_COLUMN, "Youth", "Kids"]);
    assert_eq!(table.cell("Alex Smith", "Kids"), Some(Some(1)));
    assert_eq!(table.cell("Bea Jones", "Youth"), Some(Some(1)));
    assert_eq!(table.cell("Bea Jones", "Kids"), Some(None));
}

#[test]
fn membership_is_kept_without_marks() {
    let register = RegisterTable::new("Kids", periods(&["3/09", "10/09"]))
        .with_row("Cara Lee", &["", ""])
        .with_row("Alex Smith", &["Y", "Y"]);

    let (mapping, _) = aggregate_tables(&[register]);

    assert_eq!(mapping.count("Cara Lee", "Kids"), Some(0));
    assert_eq!(mapping.count("Alex Smith", "Kids"), Some(2));

    let (mapping, order) = aggregate_tables(&[youth()]);
    let mut with_kids = mapping.clone();
    with_kids.enrol("Bea Jones", "Kids");
    assert_eq!(with_kids.count("Bea Jones", "Kids"), Some(0));
    with_kids.enrol("Alex Smith", "Youth");
    assert_eq!(with_kids.count("Alex Smith", "Youth"), Some(1));
    assert_eq!(order.len(), 1);
}

#[test]
fn zero_count_renders_as_zero_not_blank() {
    let register = RegisterTable::new("Kids", periods(&["3/09"])).with_row("Cara Lee", &[""]);

    let table = totals_for(&[register]).expect("totals built");

    assert_eq!(table.cell("Cara Lee", "Kids"), Some(Some(0)));
}

#[test]
fn unpadded_month_is_a_bad_date_header() {
    let register = RegisterTable::new("Kids", periods(&["3/9"])).with_row("Alex Smith", &["Y"]);

    let error = validate(&register).expect_err("header rejected");

    assert_eq!(error.kind, ValidationKind::BadDateHeader);
    assert_eq!(error.group, "Kids");
    assert_eq!(error.value, "3/9");
}

#[test]
fn malformed_register_fails_whole_batch() {
    let broken = RegisterTable::new("Kids", periods(&["3/9"])).with_row("Alex Smith", &["Y"]);

    let error = totals_for(&[youth(), broken]).expect_err("batch rejected");

    match error {
        AttendanceError::Validation(error) => {
            assert_eq!(error.kind, ValidationKind::BadDateHeader);
            assert_eq!(error.group, "Kids");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn single_token_name_is_rejected() {
    let register = RegisterTable::new("Youth", periods(&["3/09"])).with_row("Madonna", &["Y"]);

    let error = validate(&register).expect_err("name rejected");

    assert_eq!(error.kind, ValidationKind::BadName);
    assert_eq!(error.value, "Madonna");
}

#[test]
fn lowercase_mark_is_rejected() {
    let register = RegisterTable::new("Youth", periods(&["3/09", "10/09"]))
        .with_row("Alex Smith", &["Y", "y"]);

    let error = validate(&register).expect_err("mark rejected");

    assert_eq!(error.kind, ValidationKind::BadMark);
    assert_eq!(error.value, "y");
    assert_eq!(
        error.to_string(),
        "incorrect spreadsheet format for 'Youth': data must consist of 'Y's and empty cells only (found \"y\")"
    );
}

#[test]
fn header_is_checked_before_names_and_marks() {
    let register = RegisterTable::new("Youth", periods(&["Sept"]))
        .with_row("Madonna", &["x"]);

    let error = validate(&register).expect_err("register rejected");
    assert_eq!(error.kind, ValidationKind::BadDateHeader);

    let register = RegisterTable::new("Youth", periods(&["3/09"])).with_row("Madonna", &["x"]);
    let error = validate(&register).expect_err("register rejected");
    assert_eq!(error.kind, ValidationKind::BadName);
}

#[test]
fn register_without_periods_is_a_bad_date_header() {
    let register = RegisterTable::new("Youth", Vec::new());

    let error = validate(&register).expect_err("register rejected");

    assert_eq!(error.kind, ValidationKind::BadDateHeader);
}

#[test]
fn register_without_people_contributes_nothing() {
    let empty = RegisterTable::new("Leaders", periods(&["3/09"]));

    let (mapping, order) = aggregate_tables(&[empty.clone()]);
    assert!(mapping.is_empty());
    assert_eq!(order, vec!["Leaders".to_string()]);

    let (mapping, _) = aggregate_tables(&[youth(), empty]);
    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping.count("Alex Smith", "Leaders"), None);
}

#[test]
fn empty_batch_builds_empty_table() {
    let table = totals_for(&[]).expect("empty batch is fine");

    assert!(table.is_empty());
    assert_eq!(table, OutputTable::empty());
    assert!(table.rows.is_empty());
}

#[test]
fn group_order_follows_supply_not_alphabet() {
    let zeta = RegisterTable::new("Zeta", periods(&["3/09"])).with_row("Alex Smith", &["Y"]);
    let alpha = RegisterTable::new("Alpha", periods(&["3/09"])).with_row("Alex Smith", &[""]);
    let mid = RegisterTable::new("Mid", periods(&["3/09"])).with_row("Bea Jones", &["Y"]);

    let (_, order) = aggregate_tables(&[zeta.clone(), alpha.clone(), mid.clone()]);
    assert_eq!(order, vec!["Zeta", "Alpha", "Mid"]);

    let (_, order) = aggregate_tables(&[mid, zeta, alpha]);
    assert_eq!(order, vec!["Mid", "Zeta", "Alpha"]);
}

#[test]
fn row_order_does_not_change_counts() {
    let forward = RegisterTable::new("Youth", periods(&["3/09", "10/09", "17/09"]))
        .with_row("Alex Smith", &["Y", "", "Y"])
        .with_row("Bea Jones", &["", "Y", ""])
        .with_row("Cara Lee", &["Y", "Y", "Y"]);
    let mut reversed = forward.clone();
    reversed.rows.reverse();

    let (forward_mapping, _) = aggregate_tables(&[forward]);
    let (reversed_mapping, _) = aggregate_tables(&[reversed]);

    assert_eq!(forward_mapping, reversed_mapping);
    assert_eq!(forward_mapping.count("Cara Lee", "Youth"), Some(3));
}

#[test]
fn repeated_name_in_one_register_accumulates() {
    let register = RegisterTable::new("Youth", periods(&["3/09", "10/09"]))
        .with_row("Alex Smith", &["Y", ""])
        .with_row("Alex Smith", &["", "Y"]);

    let (mapping, _) = aggregate_tables(&[register]);

    assert_eq!(mapping.count("Alex Smith", "Youth"), Some(2));
}

#[test]
fn aggregation_is_repeatable() {
    let tables = [youth(), kids()];

    let (first, first_order) = aggregate_tables(&tables);
    let (second, second_order) = aggregate_tables(&tables);

    assert_eq!(first, second);
    assert_eq!(first_order, second_order);
}

#[test]
fn aggregation_extends_existing_mapping() {
    let mut existing = AttendanceMapping::new();
    existing.record_presence("Alex Smith", "Youth");

    let youth = youth();
    let valid = validate(&youth).expect("register is valid");
    let (mapping, order) = aggregate(existing, [valid]);

    assert_eq!(mapping.count("Alex Smith", "Youth"), Some(2));
    assert!(mapping.contains_person("Bea Jones"));
    assert!(!mapping.contains_person("Cara Lee"));
    assert_eq!(order.as_slice(), ["Youth".to_string()]);
    assert_eq!(order.position("Youth"), Some(0));
    assert_eq!(order.position("Kids"), None);
}

#[test]
fn empty_string_cells_are_blank() {
    let mut register = RegisterTable::new("Youth", periods(&["3/09", "10/09"]));
    register.push_row("Alex Smith", vec![Some("Y".into()), Some(String::new())]);
    register.rows.push(RegisterRow::new(
        "Bea Jones",
        vec![Some(String::new()), Some("Y".into())],
    ));

    let valid = validate(&register).expect("empty strings are blank");
    let (mapping, _) = aggregate(AttendanceMapping::new(), [valid]);

    assert_eq!(register.rows[0].marks, vec![Some("Y".to_string()), None]);
    assert_eq!(mapping.count("Alex Smith", "Youth"), Some(1));
    assert_eq!(mapping.count("Bea Jones", "Youth"), Some(1));
}

#[test]
fn mark_without_period_label_is_rejected() {
    let mut register = RegisterTable::new("Youth", periods(&["3/09"]));
    register.push_row("Alex Smith", vec![None, Some("Y".into())]);

    assert_eq!(register.rows[0].marks.len(), 2);
    let error = validate(&register).expect_err("unlabelled mark rejected");
    assert_eq!(error.kind, ValidationKind::BadDateHeader);
    assert_eq!(error.value, "");

    let mut register = RegisterTable::new("Youth", periods(&["3/09"]));
    register.push_row("Alex Smith", vec![Some("Y".into()), None]);
    let valid = validate(&register).expect("trailing blank is fine");
    let (mapping, _) = aggregate(AttendanceMapping::new(), [valid]);
    assert_eq!(mapping.count("Alex Smith", "Youth"), Some(1));
}

#[test]
fn short_rows_are_padded_with_blanks() {
    let mut register = RegisterTable::new("Youth", periods(&["3/09", "10/09", "17/09"]));
    register.push_row("Alex Smith", vec![Some("Y".into())]);

    assert_eq!(register.rows[0].marks, vec![Some("Y".to_string()), None, None]);
}

#[test]
fn rows_are_sorted_case_sensitively() {
    let register = RegisterTable::new("Youth", periods(&["3/09"]))
        .with_row("bea jones", &["Y"])
        .with_row("Cara Lee", &["Y"])
        .with_row("Alex Smith", &[""]);
    let valid = validate(&register).expect("register is valid");
    let (mapping, order) = aggregate(AttendanceMapping::new(), [valid]);

    let table = build_totals(&mapping, &order);

    let names: Vec<&str> = table.rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Alex Smith", "Cara Lee", "bea jones"]);
}
