// Integration tests for Roommate Algo

use roommate_algo::config::SurveySettings;
use roommate_algo::core::{
    build_preferences, run, unsatisfied_wishes, IrvingSolver, ParticipantRegistry,
    RegistryError, RoommateSolver, SolverError,
};
use roommate_algo::models::{Gender, Matching, SurveyRow};
use roommate_algo::services::{read_matching, write_matching, SurveyReader};
use std::fs;
use tempfile::TempDir;

const HEADER: &str = "Hva er ditt navn?,Skal du delta på sosial del?,Hvilket kjønn er du?,Førstevalg,Andrevalg,Tredjevalg,Sosialt ønske";

fn four_people() -> ParticipantRegistry {
    ParticipantRegistry::from_rows(vec![
        SurveyRow::new("A", Gender::Female, true).with_wishes(&["C"]),
        SurveyRow::new("B", Gender::Female, true),
        SurveyRow::new("C", Gender::Male, true).with_wishes(&["A"]),
        SurveyRow::new("D", Gender::Male, true),
    ])
    .unwrap()
}

#[test]
fn test_integration_four_person_scenario() {
    let registry = four_people();
    let preferences = build_preferences(&registry);

    assert_eq!(preferences.complete["A"], vec!["C", "B", "D"]);

    let report = run(&registry, &IrvingSolver).unwrap();
    assert_eq!(report.matching.get("A"), Some("C"));
    assert_eq!(report.matching.get("D"), Some("B"));

    let misses: Vec<String> = unsatisfied_wishes(&preferences.initial, &report.matching)
        .into_iter()
        .map(|m| m.participant)
        .collect();
    assert_eq!(misses, vec!["B", "D"]);
    assert_eq!(report.score, 2);
}

#[test]
fn test_integration_late_opt_out() {
    // E opts out after D named them
    let registry = ParticipantRegistry::from_rows(vec![
        SurveyRow::new("A", Gender::Female, true).with_wishes(&["C"]),
        SurveyRow::new("B", Gender::Female, true),
        SurveyRow::new("C", Gender::Male, true).with_wishes(&["A"]),
        SurveyRow::new("D", Gender::Male, true).with_wishes(&["E"]),
        SurveyRow::new("E", Gender::Male, false),
    ])
    .unwrap();

    let preferences = build_preferences(&registry);
    let opted_in = registry.opted_in().count();

    assert_eq!(opted_in, 4);
    assert_eq!(preferences.complete["D"].len(), opted_in - 1);
    assert!(!preferences.complete["D"].iter().any(|n| n == "E"));
    assert!(preferences.initial["D"].is_empty());
    assert!(!preferences.complete.contains_key("E"));

    let report = run(&registry, &IrvingSolver).unwrap();
    assert!(!report.matching.contains("E"));
    assert_eq!(report.matching.len(), 2);
}

#[test]
fn test_integration_survey_file_to_matching_file() {
    let dir = TempDir::new().unwrap();
    let survey = dir.path().join("wishes.csv");
    let output = dir.path().join("matching.json");

    let body = [
        HEADER,
        "Anna,Ja,Jente,Kaja,,,",
        "Kaja,Ja,Jente,Anna,,,",
        "Maja,Ja,Jente,Vilde,,,Jo",
        "Vilde,Ja,Jente,Maja,,,",
        "Jo,Ja,Gutt,Per,,,Maja",
        "Per,Ja,Gutt,Jo,,,",
        "Torbjørn,Nei,Gutt,Per,,,",
    ]
    .join("\n");
    fs::write(&survey, body).unwrap();

    let rows = SurveyReader::new(SurveySettings::default())
        .read_path(&survey)
        .unwrap();
    let registry = ParticipantRegistry::from_rows(rows).unwrap();
    let report = run(&registry, &IrvingSolver).unwrap();

    assert_eq!(report.opted_in, 6);
    assert_eq!(report.matching.get("Anna"), Some("Kaja"));
    // Maja and Jo named each other as partners, which outranks Vilde's wish
    assert_eq!(report.matching.get("Maja"), Some("Jo"));
    assert_eq!(report.matching.get("Per"), Some("Vilde"));
    assert_eq!(report.score, 4);

    write_matching(&output, &report.matching).unwrap();
    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("\"Anna\": \"Kaja\""));
    assert!(!written.contains("\"Kaja\":"));

    assert_eq!(read_matching(&output).unwrap(), report.matching);
}

#[test]
fn test_integration_duplicate_wish_is_reported() {
    let data = format!("{}\nAnna,Ja,Jente,Kaja,Kaja,,\nKaja,Ja,Jente,,,,\n", HEADER);
    let rows = SurveyReader::new(SurveySettings::default())
        .read(data.as_bytes())
        .unwrap();

    match ParticipantRegistry::from_rows(rows) {
        Err(RegistryError::DuplicateWish { participant, wish }) => {
            assert_eq!(participant, "Anna");
            assert_eq!(wish, "Kaja");
        }
        other => panic!("expected a duplicate wish error, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn test_integration_unknown_name_is_reported() {
    let result = ParticipantRegistry::from_rows(vec![
        SurveyRow::new("Anna", Gender::Female, true).with_wishes(&["Kaia"]),
        SurveyRow::new("Kaja", Gender::Female, true),
    ]);

    assert!(matches!(
        result,
        Err(RegistryError::UnknownParticipant { .. })
    ));
}

/// A solver that never finds a matching
struct Unsolvable;

impl RoommateSolver for Unsolvable {
    fn solve(
        &self,
        _preferences: &roommate_algo::PreferenceTable,
    ) -> Result<Matching, SolverError> {
        Err(SolverError::IncompleteMatch("test solver".to_string()))
    }
}

#[test]
fn test_integration_solver_failure_is_surfaced() {
    let err = run(&four_people(), &Unsolvable).unwrap_err();
    assert_eq!(err, SolverError::IncompleteMatch("test solver".to_string()));
}

#[test]
fn test_integration_forty_person_chain() {
    // P_i wishes for P_(i+2); every 13th participant opts out
    let names: Vec<String> = (0..40).map(|i| format!("P{:02}", i)).collect();
    let rows = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let gender = if i % 2 == 0 { Gender::Female } else { Gender::Male };
            let wish = &names[(i + 2) % names.len()];
            let mut row = SurveyRow::new(name, gender, i % 13 != 0);
            row.wishes = vec![wish.clone()];
            row
        })
        .collect();
    let registry = ParticipantRegistry::from_rows(rows).unwrap();

    let report = run(&registry, &IrvingSolver).unwrap();

    assert_eq!(report.opted_in, 36);
    assert_eq!(report.matching.len(), 18);
    for out in ["P00", "P13", "P26", "P39"] {
        assert!(!report.matching.contains(out));
    }

    // each run of four along the chain splits into two wished-for pairs
    let expected = [
        ("P01", "P03"), ("P02", "P04"), ("P05", "P07"), ("P06", "P08"),
        ("P09", "P11"), ("P10", "P12"), ("P14", "P16"), ("P15", "P17"),
        ("P18", "P20"), ("P19", "P21"), ("P22", "P24"), ("P23", "P25"),
        ("P27", "P29"), ("P28", "P30"), ("P31", "P33"), ("P32", "P34"),
        ("P35", "P37"), ("P36", "P38"),
    ];
    for (a, b) in expected {
        assert_eq!(report.matching.get(a), Some(b));
    }
    assert_eq!(report.score, 18);
}

#[test]
fn test_integration_lenient_registry_drops_bad_rows() {
    let data = format!(
        "{}\nAnna,Ja,Jente,Kaja,Kaja,,\nKaja,Ja,Jente,Maja,,,\nMaja,Ja,Jente,Kaja,,,\nJo,Ja,Gutt,,,,\nPer,Ja,Gutt,,,,\n",
        HEADER
    );
    let rows = SurveyReader::new(SurveySettings::default())
        .read(data.as_bytes())
        .unwrap();

    let (registry, rejected) = ParticipantRegistry::from_rows_lenient(rows).unwrap();

    assert_eq!(
        rejected,
        vec![RegistryError::DuplicateWish {
            participant: "Anna".to_string(),
            wish: "Kaja".to_string(),
        }]
    );
    assert!(!registry.contains("Anna"));

    let report = run(&registry, &IrvingSolver).unwrap();
    assert_eq!(report.matching.get("Kaja"), Some("Maja"));
    assert_eq!(report.matching.get("Jo"), Some("Per"));
}
