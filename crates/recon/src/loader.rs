use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ReconError;
use crate::model::{ClubRecord, EventRecord, ResolvedMapping};

/// Parse the club directory snapshot (a JSON array of club objects).
pub fn load_clubs(source: &str, json: &str) -> Result<Vec<ClubRecord>, ReconError> {
    load_array(source, json)
}

/// Parse the event snapshot (a JSON array of event objects).
pub fn load_events(source: &str, json: &str) -> Result<Vec<EventRecord>, ReconError> {
    load_array(source, json)
}

pub fn load_clubs_file(path: &Path) -> Result<Vec<ClubRecord>, ReconError> {
    let json = read(path)?;
    load_clubs(&path.display().to_string(), &json)
}

pub fn load_events_file(path: &Path) -> Result<Vec<EventRecord>, ReconError> {
    let json = read(path)?;
    load_events(&path.display().to_string(), &json)
}

/// Render a resolved mapping as pretty JSON, keys in first-match order.
pub fn write_mapping(mapping: &ResolvedMapping) -> Result<String, ReconError> {
    serde_json::to_string_pretty(mapping).map_err(|e| ReconError::Serialize(e.to_string()))
}

pub fn write_mapping_file(path: &Path, mapping: &ResolvedMapping) -> Result<(), ReconError> {
    let json = write_mapping(mapping)?;
    std::fs::write(path, json)
        .map_err(|e| ReconError::Io(format!("cannot write {}: {e}", path.display())))
}

fn read(path: &Path) -> Result<String, ReconError> {
    std::fs::read_to_string(path)
        .map_err(|e| ReconError::Io(format!("cannot read {}: {e}", path.display())))
}

fn load_array<T: DeserializeOwned>(source: &str, json: &str) -> Result<Vec<T>, ReconError> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(|e| ReconError::DataParse {
        source: source.into(),
        message: e.to_string(),
    })?;

    let serde_json::Value::Array(items) = value else {
        return Err(ReconError::DataParse {
            source: source.into(),
            message: "expected a JSON array of records".into(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item).map_err(|e| ReconError::DataParse {
                source: source.into(),
                message: format!("record {i}: {e}"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_clubs_basic() {
        let json = r#"[
            {"serial": 1, "name": "IEEE-VIT", "asc_type": "CHAPTER", "club_type": ["TECHNICAL"]},
            {"serial": 2, "name": "Chess Club", "description": "Strategy and tactics"}
        ]"#;
        let clubs = load_clubs("data.json", json).unwrap();
        assert_eq!(clubs.len(), 2);
        assert_eq!(clubs[0].name, "IEEE-VIT");
        assert_eq!(clubs[0].club_type, vec!["TECHNICAL"]);
        assert_eq!(clubs[1].description, "Strategy and tactics");
    }

    #[test]
    fn load_events_tolerates_missing_fields() {
        let json = r#"[{"name": "Blitz"}, {"club": "Chess Club"}]"#;
        let events = load_events("events.json", json).unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0].club.is_empty());
        assert!(events[1].name.is_empty());
    }

    #[test]
    fn null_club_label_is_loaded_and_left_unmatched() {
        let json = r#"[
            {"name": "Blitz", "club": "Chess Club"},
            {"name": "Mystery", "club": null, "tagline": null}
        ]"#;
        let events = load_events("events.json", json).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].name, "Mystery");
        assert!(events[1].club.is_empty());
        assert!(events[1].tagline.is_empty());

        let clubs = vec![ClubRecord::named("Chess Club")];
        let out = crate::Resolver::default().resolve(&clubs, &events);
        assert_eq!(out.mapping["Chess Club"].len(), 1);
        assert_eq!(out.unmatched, vec![""]);
    }

    #[test]
    fn null_club_name_is_loaded_and_never_matches() {
        let json = r#"[
            {"serial": 1, "name": null, "description": null},
            {"serial": 2, "name": "Chess Club"}
        ]"#;
        let clubs = load_clubs("data.json", json).unwrap();
        assert_eq!(clubs.len(), 2);
        assert!(clubs[0].name.is_empty());
        assert!(clubs[0].description.is_empty());

        let events = vec![EventRecord::labelled("Blitz", "chess club")];
        let out = crate::Resolver::default().resolve(&clubs, &events);
        assert_eq!(out.mapping.keys().collect::<Vec<_>>(), vec!["Chess Club"]);
        assert!(out.unmatched.is_empty());
    }

    #[test]
    fn reject_non_array() {
        let err = load_events("events.json", r#"{"name": "Blitz"}"#).unwrap_err();
        assert!(matches!(err, ReconError::DataParse { .. }));
        assert!(err.to_string().contains("expected a JSON array"));
    }

    #[test]
    fn reject_bad_record_names_index() {
        let err = load_clubs("data.json", r#"[{"name": "A"}, {"name": 7}]"#).unwrap_err();
        assert!(err.to_string().contains("record 1"), "{err}");
    }

    #[test]
    fn reject_invalid_json() {
        let err = load_clubs("data.json", "[{").unwrap_err();
        assert!(err.to_string().starts_with("data.json:"));
    }

    #[test]
    fn write_mapping_preserves_key_order() {
        let mut mapping = ResolvedMapping::new();
        mapping.insert("Zeta Club".into(), vec![EventRecord::labelled("Z", "Zeta")]);
        mapping.insert("Alpha Club".into(), vec![EventRecord::labelled("A", "Alpha")]);

        let json = write_mapping(&mapping).unwrap();
        let zeta = json.find("Zeta Club").unwrap();
        let alpha = json.find("Alpha Club").unwrap();
        assert!(zeta < alpha);
        assert!(json.contains("\n  \"Zeta Club\""));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matched_events.json");

        let mut mapping = ResolvedMapping::new();
        mapping.insert("Chess Club".into(), vec![EventRecord::labelled("Blitz", "chess club")]);
        write_mapping_file(&path, &mapping).unwrap();

        let written: ResolvedMapping =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, mapping);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_events_file(Path::new("/nonexistent/events.json")).unwrap_err();
        assert!(matches!(err, ReconError::Io(_)));
    }
}
