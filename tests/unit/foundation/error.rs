use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GridError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(GridError::mask("x").to_string().contains("mask error:"));
    assert!(GridError::render("x").to_string().contains("render error:"));
    assert!(
        GridError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GridError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_convert() {
    let err: GridError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, GridError::Serde(_)));
}
