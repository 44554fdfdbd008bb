//! Unit tests for error handling

use super::*;
use std::io;

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
    let err = FootdataError::from(json_error);

    match err {
        FootdataError::Json(_) => (),
        _ => panic!("Expected Json error variant"),
    }
}

#[test]
fn test_io_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
    let err = FootdataError::from(io_error);

    match err {
        FootdataError::Io(_) => (),
        _ => panic!("Expected Io error variant"),
    }
}

#[test]
fn test_invalid_header_error_conversion() {
    let header_error = reqwest::header::HeaderValue::from_str("invalid\nheader").unwrap_err();
    let err = FootdataError::from(header_error);

    match err {
        FootdataError::InvalidHeader(_) => (),
        _ => panic!("Expected InvalidHeader error variant"),
    }
}

#[test]
fn test_parse_int_error_conversion() {
    let parse_error = "not_a_number".parse::<u32>().unwrap_err();
    let err = FootdataError::from(parse_error);

    match err {
        FootdataError::InvalidId(_) => (),
        _ => panic!("Expected InvalidId error variant"),
    }
}

#[test]
fn test_anyhow_error_conversion() {
    let anyhow_error = anyhow::anyhow!("constraint violated");
    let err = FootdataError::from(anyhow_error);

    match err {
        FootdataError::Database { message } => {
            assert!(message.contains("constraint violated"));
        }
        _ => panic!("Expected Database error variant"),
    }
}

#[test]
fn test_missing_api_key_error() {
    let err = FootdataError::MissingApiKey {
        env_var: "API_FOOTBALL_KEY".to_string(),
    };

    let error_string = err.to_string();
    assert!(error_string.contains("API key not provided"));
    assert!(error_string.contains("API_FOOTBALL_KEY"));
}

#[test]
fn test_http_status_error_display() {
    let err = FootdataError::HttpStatus {
        status: 403,
        endpoint: "players".to_string(),
    };

    let error_string = err.to_string();
    assert!(error_string.contains("403"));
    assert!(error_string.contains("players"));
}

#[test]
fn test_league_not_found_display() {
    let err = FootdataError::LeagueNotFound {
        league_id: 71,
        season: 2024,
    };

    let error_string = err.to_string();
    assert!(error_string.contains("71"));
    assert!(error_string.contains("2024"));
}
