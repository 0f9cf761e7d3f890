//! Tests for the command line harness commands.

use crate::certificate_pem;
use payment_cli::commands::{balances, events, invoke, relay};
use payment_cli::{open_executor, CliConfig};
use tempfile::tempdir;

/// Tests a debit and its relay through the harness commands.
#[test]
fn test_harness_flow() {
    let dir = tempdir().unwrap();
    let fan = dir.path().join("fan.pem");
    let artist = dir.path().join("artist.pem");
    let relayer = dir.path().join("relayer.pem");
    std::fs::write(&fan, certificate_pem("fan", "Gateway").unwrap()).unwrap();
    std::fs::write(&artist, certificate_pem("artist", "Label").unwrap()).unwrap();
    std::fs::write(&relayer, certificate_pem("relayer", "Gateway").unwrap()).unwrap();

    let mut config = CliConfig::default();
    config.assets.insert("album".to_string(), "artist@Label".to_string());
    config.relay.prices.insert("album".to_string(), 10);

    let executor = open_executor(&config, dir.path().join("data")).unwrap();

    let receipt = invoke::run(&executor, &fan, "add", vec!["25".to_string()]).unwrap();
    assert!(receipt.committed);
    let receipt = invoke::run(&executor, &artist, "add", vec!["0".to_string()]).unwrap();
    assert!(receipt.committed);

    let receipt = invoke::run(
        &executor,
        &fan,
        "debit",
        vec!["10".to_string(), "album".to_string()],
    )
    .unwrap();
    assert!(receipt.committed);

    let listed = events::run(&executor, 0).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(events::display_payload(&listed[0].payload), "album");

    let report = relay::run(&executor, &config, &relayer, 0).unwrap();
    assert_eq!(report.credited, 1);
    assert_eq!(report.cursor, 1);

    assert_eq!(
        balances::run(&executor).unwrap(),
        vec![
            ("artist@Label".to_string(), "10".to_string()),
            ("fan@Gateway".to_string(), "15".to_string()),
        ]
    );
}
