use vat_playback_core::{parse_catalog_json, CatalogError, ClipCatalog, ControllerConfig};
use vat_playback_core::{PlaybackCommand, StartupPolicy};

#[test]
fn every_catalog_fixture_parses() {
    for key in vat_test_fixtures::catalogs::keys() {
        let json = vat_test_fixtures::catalogs::json(&key).unwrap();
        parse_catalog_json(&json).unwrap_or_else(|e| panic!("catalog '{key}': {e}"));
    }
}

#[test]
fn creature_catalog_contents() {
    let catalog: ClipCatalog = vat_test_fixtures::catalogs::load("creature").unwrap();
    assert_eq!(catalog.len(), 8);
    assert_eq!(catalog.find("Emerge_01"), Some(2));
    let death = &catalog[7];
    assert_eq!((death.frame_start, death.frame_end), (280, 280));
    assert_eq!(death.frame_count(), 1);
    assert!(!death.looping);
}

#[test]
fn empty_catalog_parses_to_nothing() {
    let json = vat_test_fixtures::catalogs::json("empty").unwrap();
    let catalog = ClipCatalog::from_json(&json).unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn bad_clips_are_rejected() {
    let reversed = r#"[{ "name": "Back", "frameStart": 10, "frameEnd": 2 }]"#;
    assert!(matches!(
        parse_catalog_json(reversed),
        Err(CatalogError::InvalidFrameRange { start: 10, end: 2, .. })
    ));
    let still = r#"[{ "name": "Still", "framerate": 0 }]"#;
    assert!(matches!(
        parse_catalog_json(still),
        Err(CatalogError::InvalidFramerate { .. })
    ));
    assert!(matches!(
        parse_catalog_json("{ \"clips\": [] }"),
        Err(CatalogError::Parse(_))
    ));
}

#[test]
fn controller_fixtures_parse() {
    let single =
        ControllerConfig::from_json(&vat_test_fixtures::controllers::json("single-run").unwrap())
            .unwrap();
    assert_eq!(single.startup, StartupPolicy::Single { index: 1 });
    assert_eq!(single.playback.random_seed, Some(1234));

    let intro = ControllerConfig::from_json(
        &vat_test_fixtures::controllers::json("intro-sequence").unwrap(),
    )
    .unwrap();
    assert!(matches!(
        intro.startup,
        StartupPolicy::Sequence { start: 2, end: 5, looping: false, .. }
    ));
}

#[test]
fn command_script_parses() {
    let cmds: Vec<PlaybackCommand> = vat_test_fixtures::commands::load("locomotion").unwrap();
    assert_eq!(cmds.len(), 7);
    assert_eq!(
        cmds[5],
        PlaybackCommand::PlayInstant { index: 0 }
    );
}
