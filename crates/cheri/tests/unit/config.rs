//! # Configuration Tests

use rvsim_cheri::config::CheriConfig;

#[test]
fn test_defaults() {
    let config = CheriConfig::default();
    assert_eq!(config.memory.ram_base, 0x8000_0000);
    assert_eq!(config.memory.ram_size, 128 * 1024 * 1024);
    assert_eq!(config.reset.start_pc, None);
    assert!(config.reset.ddc_almighty);
    assert!(!config.general.trace_checks);
}

#[test]
fn test_empty_document_takes_defaults() {
    let config = CheriConfig::from_json("{}").unwrap();
    assert_eq!(config.memory.ram_base, 0x8000_0000);
    assert!(config.reset.ddc_almighty);
}

#[test]
fn test_explicit_start_pc() {
    let config =
        CheriConfig::from_json(r#"{ "reset": { "start_pc": 2147487744 } }"#).unwrap();
    assert_eq!(config.start_pc(), 0x8000_1000);
    assert!(config.reset.ddc_almighty);
}

#[test]
fn test_partial_memory_section() {
    let config = CheriConfig::from_json(r#"{ "memory": { "ram_size": 4096 } }"#).unwrap();
    assert_eq!(config.memory.ram_base, 0x8000_0000);
    assert_eq!(config.memory.ram_size, 4096);
}

#[test]
fn test_mistyped_field_is_rejected() {
    assert!(CheriConfig::from_json(r#"{ "reset": { "ddc_almighty": "yes" } }"#).is_err());
    assert!(CheriConfig::from_json("not json").is_err());
}
