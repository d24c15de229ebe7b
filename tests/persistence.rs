//! Integration tests for saving and loading tournament documents.

use padel_tournament::persistence::{from_json, load_from_path, save_to_path, to_json};
use padel_tournament::{
    generate_schedule, record_score, MatchFormat, Score, Tournament, TournamentConfig,
    TournamentError,
};
use serde_json::{json, Value};

fn saved_document() -> Value {
    json!({
        "id": "2f1c6a1e-8d4b-4c3a-9a57-0b6f1d2e3c4d",
        "created_at": "2026-10-18T09:00:00Z",
        "roster": [
            { "name": "Alice" },
            { "name": "Bob" },
            { "name": "Carol" },
            { "name": "Dave" },
            { "name": "Eve" }
        ],
        "courts": [
            { "id": 1, "name": "Centre court" },
            { "id": 2, "name": "Court 2" }
        ],
        "format": "doubles",
        "rounds": [
            {
                "number": 1,
                "matches": [
                    {
                        "round": 1,
                        "court": 1,
                        "team_one": ["Alice", "Bob"],
                        "team_two": ["Carol", "Dave"],
                        "score": { "team_one": 6, "team_two": 3 }
                    }
                ],
                "idle_courts": [2],
                "resting": ["Eve"]
            },
            {
                "number": 2,
                "matches": [
                    {
                        "round": 2,
                        "court": 1,
                        "team_one": ["Alice", "Carol"],
                        "team_two": ["Bob", "Eve"],
                        "score": null
                    }
                ],
                "idle_courts": [2],
                "resting": ["Dave"]
            }
        ]
    })
}

fn scheduled_tournament() -> Tournament {
    let config = TournamentConfig::new(
        ["Ana", "Bea", "Cleo", "Dora", "Eli", "Fay", "Gus"],
        2,
        MatchFormat::Doubles,
    );
    let mut t = Tournament::new(config).unwrap();
    generate_schedule(&mut t, 4).unwrap();
    record_score(&mut t, 1, 1, Some(Score::new(6, 4))).unwrap();
    record_score(&mut t, 2, 1, Some(Score::new(3, 6))).unwrap();
    t
}

#[test]
fn load_then_save_reproduces_the_document() {
    let doc = saved_document();
    let t = from_json(&doc.to_string()).unwrap();
    assert_eq!(t.roster.len(), 5);
    assert_eq!(t.rounds[0].matches[0].score, Some(Score::new(6, 3)));
    assert_eq!(t.rounds[1].matches[0].score, None);

    let saved: Value = serde_json::from_str(&to_json(&t).unwrap()).unwrap();
    assert_eq!(saved, doc);
}

#[test]
fn save_then_load_is_lossless() {
    let t = scheduled_tournament();
    let restored = from_json(&to_json(&t).unwrap()).unwrap();
    assert_eq!(restored, t);
    assert_eq!(restored.rankings(), t.rankings());
}

#[test]
fn rankings_are_not_persisted() {
    let t = scheduled_tournament();
    let saved: Value = serde_json::from_str(&to_json(&t).unwrap()).unwrap();
    let keys: Vec<&str> = saved.as_object().unwrap().keys().map(String::as_str).collect();
    assert!(!keys.contains(&"rankings"));
    assert!(!keys.contains(&"history"));
}

#[test]
fn missing_fields_use_defaults() {
    let doc = r#"{ "roster": [{ "name": "A" }, { "name": "B" }] }"#;
    let t = from_json(doc).unwrap();
    assert_eq!(t.format, MatchFormat::Doubles);
    assert_eq!(t.court_count(), 1);
    assert!(t.rounds.is_empty());
}

#[test]
fn unparsable_documents_are_malformed() {
    for doc in ["", "not json", r#"{ "roster": 3 }"#, r#"{ "courts": [] }"#] {
        assert!(
            matches!(from_json(doc), Err(TournamentError::MalformedPersistedState(_))),
            "{doc:?} should be rejected"
        );
    }
}

#[test]
fn inconsistent_documents_are_malformed() {
    let mut unknown_player = saved_document();
    unknown_player["rounds"][0]["matches"][0]["team_two"] = json!(["Carol", "Mallory"]);

    let mut double_booked = saved_document();
    double_booked["rounds"][1]["matches"][0]["team_two"] = json!(["Bob", "Alice"]);

    let mut wrong_idle = saved_document();
    wrong_idle["rounds"][0]["idle_courts"] = json!([]);

    let mut no_courts = saved_document();
    no_courts["courts"] = json!([]);

    for doc in [unknown_player, double_booked, wrong_idle, no_courts] {
        assert!(matches!(
            from_json(&doc.to_string()),
            Err(TournamentError::MalformedPersistedState(_))
        ));
    }
}

#[test]
fn files_round_trip() {
    let t = scheduled_tournament();
    let path = std::env::temp_dir().join(format!("padel-{}.json", uuid::Uuid::new_v4()));
    save_to_path(&path, &t).unwrap();
    let restored = load_from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(restored, t);
}

#[test]
fn missing_file_is_a_storage_error() {
    let path = std::env::temp_dir().join(format!("padel-missing-{}.json", uuid::Uuid::new_v4()));
    assert!(matches!(
        load_from_path(&path),
        Err(TournamentError::Storage(_))
    ));
}
