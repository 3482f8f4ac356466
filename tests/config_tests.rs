//! Tests for loading engine configuration from disk.

use butterfly_fft::fft::signal::white_noise;
use butterfly_fft::fft::ConfigError;
use butterfly_fft::{CpuFft, FftConfig, FftError, Normalization, OutputOrder};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_partial_config_fills_defaults() {
    let file = write_config(r#"{ "max_size": 256, "inverse_order": "mirrored" }"#);
    let config = FftConfig::from_file(file.path()).unwrap();

    assert_eq!(config.max_size, 256);
    assert_eq!(config.inverse_order, OutputOrder::Mirrored);
    assert_eq!(config.inverse_normalization, Normalization::ByLength);
    assert!(config.radix8);
}

#[test]
fn test_custom_normalization_from_file() {
    let file = write_config(
        r#"{
            "max_size": 64,
            "workers": 1,
            "forward_normalization": { "custom": 0.5 },
            "inverse_normalization": "unitary"
        }"#,
    );
    let config = FftConfig::from_file(file.path()).unwrap();
    assert_eq!(config.forward_normalization, Normalization::Custom(0.5));
    assert_eq!(config.inverse_normalization, Normalization::Unitary);

    let engine = CpuFft::<f64>::new(config).unwrap();
    let mut buffer = vec![butterfly_fft::Complex::new(1.0, 0.0); 64];
    engine.forward(&mut buffer).unwrap();
    assert!((buffer[0].re - 32.0).abs() < 1e-12);
}

#[test]
fn test_saved_config_reloads() {
    let config = FftConfig {
        max_size: 1 << 15,
        workers: 2,
        parallel_threshold: 1024,
        grain: 128,
        radix8: false,
        ..FftConfig::default()
    };

    let file = write_config(&config.to_json().unwrap());
    let loaded = FftConfig::from_file(file.path()).unwrap();
    assert_eq!(loaded, config);

    let engine = CpuFft::<f64>::new(loaded).unwrap();
    let input = white_noise::<f64>(4096, 1.0, 8);
    let mut buffer = input.clone();
    engine.forward(&mut buffer).unwrap();
    engine.inverse(&mut buffer).unwrap();
    for (a, b) in buffer.iter().zip(&input) {
        assert!((a - b).norm() < 1e-9);
    }
}

#[test]
fn test_invalid_max_size_is_rejected() {
    let file = write_config(r#"{ "max_size": 1000 }"#);
    assert!(matches!(
        FftConfig::from_file(file.path()),
        Err(ConfigError::Invalid(FftError::InvalidSize(1000)))
    ));
}

#[test]
fn test_malformed_json_is_rejected() {
    let file = write_config("{ max_size: ");
    assert!(matches!(
        FftConfig::from_file(file.path()),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = FftConfig::from_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
