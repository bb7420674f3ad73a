use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LayerkitError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(LayerkitError::asset("x").to_string().contains("asset error:"));
    assert!(
        LayerkitError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        LayerkitError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LayerkitError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err: LayerkitError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, LayerkitError::Serde(_)));
}
