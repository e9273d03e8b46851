use super::*;

fn summary(short: Option<&str>, description: &str) -> SkillSummary {
    SkillSummary {
        skill_id: "code_review".to_string(),
        name: "Code Review".to_string(),
        short_description: short.map(str::to_string),
        description: description.to_string(),
        version: "1.0.0".to_string(),
        category: None,
        tags: Vec::new(),
        priority: 0,
    }
}

#[test]
fn test_catalog_description_prefers_short() {
    let s = summary(Some("Reviews code for bugs and style"), "Long form text");
    assert_eq!(s.catalog_description(), "Reviews code for bugs and style");
}

#[test]
fn test_catalog_description_falls_back_to_description() {
    assert_eq!(summary(None, "Long form").catalog_description(), "Long form");
    assert_eq!(summary(Some(""), "Long form").catalog_description(), "Long form");
}

#[test]
fn test_catalog_description_ignores_blank_short() {
    assert_eq!(summary(Some("   "), "Long form").catalog_description(), "Long form");
    assert_eq!(summary(Some("\t\n"), "Long form").catalog_description(), "Long form");
}

#[test]
fn test_skill_status_round_trip_strings() {
    for status in [SkillStatus::Active, SkillStatus::Deprecated, SkillStatus::Archived] {
        assert_eq!(status.as_str().parse::<SkillStatus>().unwrap(), status);
    }
    assert_eq!(SkillStatus::default(), SkillStatus::Active);
}

#[test]
fn test_skill_status_unknown_is_validation_error() {
    let err = "retired".parse::<SkillStatus>().unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[test]
fn test_requirement_type_strings() {
    assert_eq!(RequirementType::ApiKey.as_str(), "api_key");
    assert_eq!(
        "min_version".parse::<RequirementType>().unwrap(),
        RequirementType::MinVersion
    );
    assert!("plugin".parse::<RequirementType>().is_err());
}

#[test]
fn test_provenance() {
    let local = Provenance::from_file("skill-example/code_review/content.md");
    assert!(!local.is_remote());

    let remote = Provenance {
        repo_url: Some("https://example.com/skills.git".to_string()),
        ..Provenance::default()
    };
    assert!(remote.is_remote());
}
